use sqlx::postgres::PgDatabaseError;
use thiserror::Error;
mod conflict;
pub use conflict::{ReservationConflict, ReservationConflictInfo, ReservationWindow};

use crate::ReservationStatus;

#[derive(Error, Debug)]
pub enum Error {
    #[error("sqlx error: {0}")]
    DbError(sqlx::Error),

    #[error("Failed to read configuration file")]
    ConfigReadError,

    #[error("Failed to parse configuration file")]
    ConfigParseError,

    #[error("Missing required parameter {0}")]
    MissingParam(String),

    #[error("Invalid date {0}, expected YYYY-MM-DD")]
    InvalidDate(String),

    #[error("Check-out date must be after check-in date")]
    InvalidDateRange,

    #[error("Invalid slug {0}")]
    InvalidSlug(String),

    #[error("Invalid email {0}")]
    InvalidEmail(String),

    #[error("Invalid number of guests {0}")]
    InvalidGuests(i32),

    #[error("Invalid price {0}")]
    InvalidPrice(i64),

    #[error("{0} must not be empty")]
    EmptyField(String),

    #[error("Invalid status {0}")]
    InvalidStatus(String),

    #[error("Invalid listing kind {0}")]
    InvalidKind(String),

    #[error("Invalid page size {0}")]
    InvalidPageSize(i64),

    #[error("Invalid cursor {0}")]
    InvalidCursor(i64),

    #[error("Cannot change reservation status from {from} to {to}")]
    InvalidTransition {
        from: ReservationStatus,
        to: ReservationStatus,
    },

    #[error("conflict reservation: {0}")]
    ConflictReservation(ReservationConflictInfo),

    #[error("{0} already exists")]
    AlreadyExists(String),

    #[error("Missing admin credentials")]
    Unauthorized,

    #[error("Admin role required")]
    Forbidden,

    #[error("No record found by the given condition")]
    NotFound,

    #[error("unknown error")]
    Unknown,
}

impl Error {
    /// Errors caused by a malformed request rather than by the system state.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::MissingParam(_)
                | Self::InvalidDate(_)
                | Self::InvalidDateRange
                | Self::InvalidSlug(_)
                | Self::InvalidEmail(_)
                | Self::InvalidGuests(_)
                | Self::InvalidPrice(_)
                | Self::EmptyField(_)
                | Self::InvalidStatus(_)
                | Self::InvalidKind(_)
                | Self::InvalidPageSize(_)
                | Self::InvalidCursor(_)
        )
    }
}

impl PartialEq for Error {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            // sqlx errors carry no comparable payload
            (Self::DbError(_), Self::DbError(_)) => true,
            (Self::ConfigReadError, Self::ConfigReadError) => true,
            (Self::ConfigParseError, Self::ConfigParseError) => true,
            (Self::MissingParam(v1), Self::MissingParam(v2)) => v1 == v2,
            (Self::InvalidDate(v1), Self::InvalidDate(v2)) => v1 == v2,
            (Self::InvalidDateRange, Self::InvalidDateRange) => true,
            (Self::InvalidSlug(v1), Self::InvalidSlug(v2)) => v1 == v2,
            (Self::InvalidEmail(v1), Self::InvalidEmail(v2)) => v1 == v2,
            (Self::InvalidGuests(v1), Self::InvalidGuests(v2)) => v1 == v2,
            (Self::InvalidPrice(v1), Self::InvalidPrice(v2)) => v1 == v2,
            (Self::EmptyField(v1), Self::EmptyField(v2)) => v1 == v2,
            (Self::InvalidStatus(v1), Self::InvalidStatus(v2)) => v1 == v2,
            (Self::InvalidKind(v1), Self::InvalidKind(v2)) => v1 == v2,
            (Self::InvalidPageSize(v1), Self::InvalidPageSize(v2)) => v1 == v2,
            (Self::InvalidCursor(v1), Self::InvalidCursor(v2)) => v1 == v2,
            (
                Self::InvalidTransition { from: f1, to: t1 },
                Self::InvalidTransition { from: f2, to: t2 },
            ) => f1 == f2 && t1 == t2,
            (Self::ConflictReservation(v1), Self::ConflictReservation(v2)) => v1 == v2,
            (Self::AlreadyExists(v1), Self::AlreadyExists(v2)) => v1 == v2,
            (Self::Unauthorized, Self::Unauthorized) => true,
            (Self::Forbidden, Self::Forbidden) => true,
            (Self::NotFound, Self::NotFound) => true,
            (Self::Unknown, Self::Unknown) => true,
            _ => false,
        }
    }
}

impl From<sqlx::Error> for Error {
    fn from(e: sqlx::Error) -> Self {
        match e {
            sqlx::Error::Database(e) => {
                let mapped = e.try_downcast_ref::<PgDatabaseError>().and_then(|err| {
                    match (err.code(), err.schema(), err.table()) {
                        ("23P01", Some("stay"), Some("reservations")) => {
                            let detail = err.detail().unwrap_or_default();
                            let info = detail.parse().unwrap_or_else(|_| {
                                ReservationConflictInfo::Unparsed(detail.to_string())
                            });
                            Some(Error::ConflictReservation(info))
                        }
                        ("23505", Some("stay"), Some("homestays")) => {
                            Some(Error::AlreadyExists("homestay slug".into()))
                        }
                        _ => None,
                    }
                });
                mapped.unwrap_or_else(|| Error::DbError(sqlx::Error::Database(e)))
            }
            sqlx::Error::RowNotFound => Error::NotFound,
            _ => Error::DbError(e),
        }
    }
}
