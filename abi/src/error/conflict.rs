use std::{convert::Infallible, fmt, str::FromStr};

use crate::DateRange;

/// Details of a rejected reservation, taken from the exclusion constraint
/// violation reported by postgres.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReservationConflictInfo {
    Parsed(ReservationConflict),
    Unparsed(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReservationConflict {
    pub new: ReservationWindow,
    pub old: ReservationWindow,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReservationWindow {
    pub homestay_id: i64,
    pub range: DateRange,
}

impl fmt::Display for ReservationConflictInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parsed(conflict) => write!(
                f,
                "requested {} to {} overlaps existing reservation {} to {}",
                conflict.new.range.check_in,
                conflict.new.range.check_out,
                conflict.old.range.check_in,
                conflict.old.range.check_out
            ),
            Self::Unparsed(detail) => write!(f, "{}", detail),
        }
    }
}

impl FromStr for ReservationConflictInfo {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.parse::<ReservationConflict>() {
            Ok(conflict) => Ok(Self::Parsed(conflict)),
            Err(_) => Ok(Self::Unparsed(s.to_string())),
        }
    }
}

// Key (homestay_id, daterange(check_in, check_out, '[)'::text))=(1, [2024-06-14,2024-06-20))
//   conflicts with existing key (homestay_id, daterange(...))=(1, [2024-06-10,2024-06-15)).
impl FromStr for ReservationConflict {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (new, old) = s.split_once(" conflicts with existing key ").ok_or(())?;
        Ok(Self {
            new: new.parse()?,
            old: old.parse()?,
        })
    }
}

impl FromStr for ReservationWindow {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (_, values) = s.split_once(")=(").ok_or(())?;
        let values = values.trim_end_matches('.');
        let values = values.strip_suffix(')').ok_or(())?;
        let (id, range) = values.split_once(", ").ok_or(())?;
        Ok(Self {
            homestay_id: id.trim().parse().map_err(|_| ())?,
            range: range.trim().parse().map_err(|_| ())?,
        })
    }
}
