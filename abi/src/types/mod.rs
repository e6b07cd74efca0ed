use std::str::FromStr;

use sqlx::{postgres::PgRow, Row};

use crate::Error;

mod contact;
mod date_range;
mod homestay;
mod listing;
mod reservation;
mod reservation_filter;
mod reservation_status;

pub use contact::{ContactInfo, ContactInfoForm, ContactMessage, MessageStatus, NewContactMessage};
pub use date_range::DateRange;
pub use homestay::{slugify, validate_slug, Facility, Homestay, HomestayFilter, HomestayForm};
pub use listing::{Listing, ListingKind};
pub use reservation::{Availability, NewReservation, Reservation};
pub use reservation_filter::{ReservationFilter, ReservationFilterBuilder};
pub use reservation_status::ReservationStatus;

/// enum columns are selected as `::TEXT` and parsed here
fn decode_text<T>(row: &PgRow, column: &str) -> Result<T, sqlx::Error>
where
    T: FromStr<Err = Error>,
{
    let value: String = row.try_get(column)?;
    value.parse().map_err(|e: Error| sqlx::Error::Decode(Box::new(e)))
}

fn validate_not_empty(field: &str, value: &str) -> Result<(), Error> {
    if value.trim().is_empty() {
        return Err(Error::EmptyField(field.to_string()));
    }
    Ok(())
}

fn validate_email(email: &str) -> Result<(), Error> {
    match email.split_once('@') {
        Some((user, domain)) if !user.is_empty() && domain.contains('.') => Ok(()),
        _ => Err(Error::InvalidEmail(email.to_string())),
    }
}
