use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{postgres::PgRow, FromRow, Row};

use super::{decode_text, validate_email, validate_not_empty};
use crate::{DateRange, Error, Id, Normalizer, ReservationStatus, Validator};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reservation {
    pub id: i64,
    pub homestay_id: i64,
    pub guest_name: String,
    pub guest_email: String,
    pub guests: i32,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub note: String,
    pub status: ReservationStatus,
    pub created_at: DateTime<Utc>,
}

/// A booking request as submitted by a guest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewReservation {
    pub guest_name: String,
    pub guest_email: String,
    pub guests: i32,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    #[serde(default)]
    pub note: String,
}

/// Answer of an availability check for one homestay and stay range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Availability {
    pub available: bool,
    pub homestay_id: i64,
    pub check_in_date: NaiveDate,
    pub check_out_date: NaiveDate,
}

impl Availability {
    pub fn new(homestay_id: i64, range: DateRange, available: bool) -> Self {
        Self {
            available,
            homestay_id,
            check_in_date: range.check_in,
            check_out_date: range.check_out,
        }
    }
}

impl Reservation {
    pub fn range(&self) -> DateRange {
        DateRange {
            check_in: self.check_in,
            check_out: self.check_out,
        }
    }

    /// whether this reservation makes `range` unavailable
    pub fn blocks(&self, range: &DateRange) -> bool {
        self.status.is_blocking() && self.range().overlaps(range)
    }
}

impl Id for Reservation {
    fn id(&self) -> i64 {
        self.id
    }
}

impl NewReservation {
    pub fn new(
        guest_name: impl Into<String>,
        guest_email: impl Into<String>,
        guests: i32,
        check_in: NaiveDate,
        check_out: NaiveDate,
        note: impl Into<String>,
    ) -> Self {
        Self {
            guest_name: guest_name.into(),
            guest_email: guest_email.into(),
            guests,
            check_in,
            check_out,
            note: note.into(),
        }
    }

    pub fn range(&self) -> Result<DateRange, Error> {
        DateRange::new(self.check_in, self.check_out)
    }
}

impl Validator for NewReservation {
    fn validate(&self) -> Result<(), Error> {
        validate_not_empty("guestName", &self.guest_name)?;
        validate_email(&self.guest_email)?;
        if self.guests < 1 {
            return Err(Error::InvalidGuests(self.guests));
        }
        self.range()?;
        Ok(())
    }
}

impl Normalizer for NewReservation {
    fn do_normalize(&mut self) {
        self.guest_name = self.guest_name.trim().to_string();
        self.guest_email = self.guest_email.trim().to_lowercase();
        self.note = self.note.trim().to_string();
    }
}

impl FromRow<'_, PgRow> for Reservation {
    fn from_row(row: &PgRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            homestay_id: row.try_get("homestay_id")?,
            guest_name: row.try_get("guest_name")?,
            guest_email: row.try_get("guest_email")?,
            guests: row.try_get("guests")?,
            check_in: row.try_get("check_in")?,
            check_out: row.try_get("check_out")?,
            note: row.try_get("note")?,
            status: decode_text(row, "status")?,
            created_at: row.try_get("created_at")?,
        })
    }
}
