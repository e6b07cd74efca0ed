use std::path::Path;

use abi::Config;
use anyhow::{anyhow, Result};
use homestay_service::start_server;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let filename = config_file()?;
    info!("config file: {}", filename);
    let config = Config::load(&filename)?;
    start_server(&config).await
}

// we would first try HOMESTAY_CONFIG env var,
// then try "./homestay.yml", then try "~/.config/homestay.yml",
// then try "/etc/homestay.yml"
fn config_file() -> Result<String> {
    if let Ok(filename) = std::env::var("HOMESTAY_CONFIG") {
        return Ok(filename);
    }
    let home = shellexpand::tilde("~/.config/homestay.yml").into_owned();
    find_config(&["./homestay.yml", home.as_str(), "/etc/homestay.yml"])
}

fn find_config(candidates: &[&str]) -> Result<String> {
    candidates
        .iter()
        .find(|p| Path::new(p).exists())
        .map(ToString::to_string)
        .ok_or_else(|| anyhow!("no config file found"))
}
