use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::validate_not_empty;
use crate::{Error, Normalizer, Validator};

const MAX_SLUG_LEN: usize = 100;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Homestay {
    pub id: i64,
    pub slug: String,
    pub name: String,
    pub description: String,
    pub location: String,
    pub price_per_night: i64,
    pub max_guests: i32,
    pub facilities: Vec<String>,
    pub images: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Editable fields of a homestay, used for both create and update.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HomestayForm {
    #[serde(default)]
    pub slug: Option<String>,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub location: String,
    pub price_per_night: i64,
    pub max_guests: i32,
    #[serde(default)]
    pub facilities: Vec<String>,
    #[serde(default)]
    pub images: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HomestayFilter {
    /// case-insensitive match on name or location
    pub q: Option<String>,
    pub max_price: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Facility {
    pub name: String,
    pub homestays: i64,
}

impl HomestayForm {
    /// slug to store; only meaningful after `normalize`
    pub fn slug(&self) -> &str {
        self.slug.as_deref().unwrap_or_default()
    }
}

impl Validator for HomestayForm {
    fn validate(&self) -> Result<(), Error> {
        validate_not_empty("name", &self.name)?;
        validate_slug(self.slug())?;
        if self.price_per_night < 0 {
            return Err(Error::InvalidPrice(self.price_per_night));
        }
        if self.max_guests < 1 {
            return Err(Error::InvalidGuests(self.max_guests));
        }
        Ok(())
    }
}

impl Normalizer for HomestayForm {
    fn do_normalize(&mut self) {
        self.name = self.name.trim().to_string();
        self.description = self.description.trim().to_string();
        self.location = self.location.trim().to_string();
        self.slug = match self.slug.as_deref().map(str::trim) {
            Some(slug) if !slug.is_empty() => Some(slug.to_string()),
            _ => Some(slugify(&self.name)),
        };

        let mut facilities: Vec<String> = Vec::with_capacity(self.facilities.len());
        for facility in &self.facilities {
            let facility = facility.trim();
            if !facility.is_empty() && !facilities.iter().any(|f| f.eq_ignore_ascii_case(facility)) {
                facilities.push(facility.to_string());
            }
        }
        self.facilities = facilities;
        self.images.retain(|url| !url.trim().is_empty());
    }
}

impl HomestayFilter {
    pub fn pattern(&self) -> Option<String> {
        self.q
            .as_deref()
            .map(str::trim)
            .filter(|q| !q.is_empty())
            .map(|q| format!("%{}%", q.replace('%', "\\%").replace('_', "\\_")))
    }
}

/// lowercase ascii letters and digits separated by single hyphens
pub fn validate_slug(slug: &str) -> Result<(), Error> {
    let valid = !slug.is_empty()
        && slug.len() <= MAX_SLUG_LEN
        && !slug.starts_with('-')
        && !slug.ends_with('-')
        && !slug.contains("--")
        && slug
            .bytes()
            .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'-');
    if !valid {
        return Err(Error::InvalidSlug(slug.to_string()));
    }
    Ok(())
}

pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    for c in name.chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c.to_ascii_lowercase());
        } else if !slug.is_empty() && !slug.ends_with('-') {
            slug.push('-');
        }
    }
    let mut slug = slug.trim_end_matches('-').to_string();
    slug.truncate(MAX_SLUG_LEN);
    slug.trim_end_matches('-').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(name: &str) -> HomestayForm {
        HomestayForm {
            name: name.into(),
            price_per_night: 350_000,
            max_guests: 4,
            ..Default::default()
        }
    }

    #[test]
    fn slugify_should_collapse_separators() {
        assert_eq!(slugify("Villa Merapi  View!"), "villa-merapi-view");
        assert_eq!(slugify("  Omah Jogja #2 "), "omah-jogja-2");
        assert_eq!(slugify("Rumah Ç"), "rumah");
    }

    #[test]
    fn validate_slug_should_work() {
        assert!(validate_slug("villa-merapi").is_ok());
        assert!(validate_slug("omah2").is_ok());
        for bad in ["", "-villa", "villa-", "vil--la", "Villa", "villa merapi"] {
            assert_eq!(validate_slug(bad).unwrap_err(), Error::InvalidSlug(bad.into()));
        }
        assert!(validate_slug(&"a".repeat(101)).is_err());
    }

    #[test]
    fn normalize_should_derive_slug_and_dedupe_facilities() {
        let mut form = form(" Villa Merapi ");
        form.facilities = vec!["WiFi".into(), " wifi ".into(), "".into(), "Parking".into()];
        form.normalize().unwrap();
        assert_eq!(form.name, "Villa Merapi");
        assert_eq!(form.slug(), "villa-merapi");
        assert_eq!(form.facilities, vec!["WiFi".to_string(), "Parking".to_string()]);
    }

    #[test]
    fn explicit_slug_should_be_kept_and_validated() {
        let mut form = form("Villa Merapi");
        form.slug = Some("Not A Slug".into());
        assert_eq!(
            form.normalize().unwrap_err(),
            Error::InvalidSlug("Not A Slug".into())
        );
    }

    #[test]
    fn invalid_numbers_should_be_rejected() {
        let mut f = form("Villa");
        f.price_per_night = -1;
        assert_eq!(f.normalize().unwrap_err(), Error::InvalidPrice(-1));

        let mut f = form("Villa");
        f.max_guests = 0;
        assert_eq!(f.normalize().unwrap_err(), Error::InvalidGuests(0));
    }

    #[test]
    fn filter_pattern_should_escape_wildcards() {
        let filter = HomestayFilter {
            q: Some(" 50%_off ".into()),
            max_price: None,
        };
        assert_eq!(filter.pattern().unwrap(), "%50\\%\\_off%");
        assert_eq!(HomestayFilter::default().pattern(), None);
    }
}
