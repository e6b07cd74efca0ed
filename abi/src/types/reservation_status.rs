use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReservationStatus {
    Requested,
    Confirmed,
    Cancelled,
    Completed,
}

impl ReservationStatus {
    pub const BLOCKING: [ReservationStatus; 2] = [Self::Requested, Self::Confirmed];

    /// requested and confirmed stays occupy their nights
    pub fn is_blocking(&self) -> bool {
        Self::BLOCKING.contains(self)
    }

    pub fn can_transition_to(&self, to: ReservationStatus) -> bool {
        use ReservationStatus::*;
        matches!(
            (self, to),
            (Requested, Confirmed) | (Requested, Cancelled) | (Confirmed, Completed) | (Confirmed, Cancelled)
        )
    }

    /// statuses a reservation must currently be in to move to `to`
    pub fn sources_of(to: ReservationStatus) -> Vec<ReservationStatus> {
        [Self::Requested, Self::Confirmed, Self::Cancelled, Self::Completed]
            .into_iter()
            .filter(|from| from.can_transition_to(to))
            .collect()
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Requested => "requested",
            Self::Confirmed => "confirmed",
            Self::Cancelled => "cancelled",
            Self::Completed => "completed",
        }
    }
}

impl fmt::Display for ReservationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReservationStatus {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "requested" => Ok(Self::Requested),
            "confirmed" => Ok(Self::Confirmed),
            "cancelled" => Ok(Self::Cancelled),
            "completed" => Ok(Self::Completed),
            _ => Err(Error::InvalidStatus(s.to_string())),
        }
    }
}
