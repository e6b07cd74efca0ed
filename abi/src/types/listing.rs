use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use sqlx::{postgres::PgRow, FromRow, Row};

use super::decode_text;
use crate::Error;

/// Attractions and culinary spots shown next to the homestays.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Listing {
    pub id: i64,
    pub kind: ListingKind,
    pub name: String,
    pub description: String,
    pub location: String,
    pub image_url: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListingKind {
    Attraction,
    Culinary,
}

impl ListingKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Attraction => "attraction",
            Self::Culinary => "culinary",
        }
    }
}

impl fmt::Display for ListingKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ListingKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "attraction" => Ok(Self::Attraction),
            "culinary" => Ok(Self::Culinary),
            _ => Err(Error::InvalidKind(s.to_string())),
        }
    }
}

impl FromRow<'_, PgRow> for Listing {
    fn from_row(row: &PgRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            kind: decode_text(row, "kind")?,
            name: row.try_get("name")?,
            description: row.try_get("description")?,
            location: row.try_get("location")?,
            image_url: row.try_get("image_url")?,
        })
    }
}
