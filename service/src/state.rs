use std::sync::Arc;

use abi::AuthConfig;
use booking::Store;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn Store>,
    pub admin_token: Arc<str>,
}

impl AppState {
    pub fn new(store: impl Store + 'static, auth: &AuthConfig) -> Self {
        Self {
            store: Arc::new(store),
            admin_token: auth.admin_token.trim().into(),
        }
    }
}
