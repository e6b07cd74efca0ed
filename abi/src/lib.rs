mod config;
mod error;
mod pager;
mod types;

pub use config::{AuthConfig, Config, DbConfig, ServerConfig};
pub use error::{Error, ReservationConflict, ReservationConflictInfo, ReservationWindow};
pub use pager::{Id, Page};
pub use types::*;

pub type HomestayId = i64;
pub type ReservationId = i64;
pub type MessageId = i64;

/// validate the data structure, raise error if invalid
pub trait Validator {
    fn validate(&self) -> Result<(), Error>;
}

/// normalize the data structure (trim, fill defaults), then validate it
pub trait Normalizer: Validator {
    fn normalize(&mut self) -> Result<(), Error> {
        self.do_normalize();
        self.validate()?;
        Ok(())
    }

    fn do_normalize(&mut self);
}
