use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::Error;

/// A stay as the half-open night range `[check_in, check_out)`: the guest
/// leaves on `check_out`, so that day is free for the next arrival.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DateRange {
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
}

impl DateRange {
    pub fn new(check_in: NaiveDate, check_out: NaiveDate) -> Result<Self, Error> {
        if check_in >= check_out {
            return Err(Error::InvalidDateRange);
        }
        Ok(Self {
            check_in,
            check_out,
        })
    }

    /// Build a range from raw `YYYY-MM-DD` query values, naming the missing
    /// parameter when one is absent.
    pub fn from_params(check_in: Option<&str>, check_out: Option<&str>) -> Result<Self, Error> {
        let check_in = parse_param("checkInDate", check_in)?;
        let check_out = parse_param("checkOutDate", check_out)?;
        Self::new(check_in, check_out)
    }

    pub fn overlaps(&self, other: &DateRange) -> bool {
        self.check_in < other.check_out && self.check_out > other.check_in
    }

    pub fn nights(&self) -> i64 {
        (self.check_out - self.check_in).num_days()
    }
}

fn parse_param(name: &str, value: Option<&str>) -> Result<NaiveDate, Error> {
    let value = value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .ok_or_else(|| Error::MissingParam(name.to_string()))?;
    parse_date(value)
}

fn parse_date(value: &str) -> Result<NaiveDate, Error> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|_| Error::InvalidDate(value.to_string()))
}

/// postgres `daterange` text form, e.g. `[2024-06-10,2024-06-15)`
impl FromStr for DateRange {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let inner = s
            .strip_prefix('[')
            .and_then(|s| s.strip_suffix(')'))
            .ok_or_else(|| Error::InvalidDate(s.to_string()))?;
        let (start, end) = inner
            .split_once(',')
            .ok_or_else(|| Error::InvalidDate(s.to_string()))?;
        Self::new(parse_date(start.trim())?, parse_date(end.trim())?)
    }
}
