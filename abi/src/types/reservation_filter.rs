use derive_builder::Builder;

use crate::{Error, Normalizer, ReservationStatus, Validator};

/// Admin listing of reservations, paged by id.
#[derive(Builder, Debug, Clone, PartialEq, Eq)]
#[builder(build_fn(name = "private_build"))]
pub struct ReservationFilter {
    /// homestay slug, empty for all homestays
    #[builder(setter(into), default)]
    pub homestay: String,
    #[builder(setter(into, strip_option), default)]
    pub status: Option<ReservationStatus>,
    #[builder(setter(into, strip_option), default)]
    pub cursor: Option<i64>,
    #[builder(default = "10")]
    pub page_size: i64,
    #[builder(default)]
    pub desc: bool,
}

impl ReservationFilterBuilder {
    pub fn build(&self) -> Result<ReservationFilter, Error> {
        let mut filter = self.private_build().map_err(|_| Error::Unknown)?;
        filter.normalize()?;
        Ok(filter)
    }
}

impl Default for ReservationFilter {
    fn default() -> Self {
        Self {
            homestay: String::new(),
            status: None,
            cursor: None,
            page_size: 10,
            desc: false,
        }
    }
}

impl Validator for ReservationFilter {
    fn validate(&self) -> Result<(), Error> {
        if self.page_size < 10 || self.page_size > 100 {
            return Err(Error::InvalidPageSize(self.page_size));
        }
        if let Some(cursor) = self.cursor {
            if cursor <= 0 {
                return Err(Error::InvalidCursor(cursor));
            }
        }
        Ok(())
    }
}

impl Normalizer for ReservationFilter {
    fn do_normalize(&mut self) {
        self.homestay = self.homestay.trim().to_string();
    }
}

impl ReservationFilter {
    pub fn get_cursor(&self) -> i64 {
        self.cursor.unwrap_or(if self.desc { i64::MAX } else { 0 })
    }

    /// rows to fetch, one more than a page to detect the next one
    pub fn limit(&self) -> i64 {
        self.page_size + 1
    }
}
