use std::{fmt, str::FromStr};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{postgres::PgRow, FromRow, Row};

use super::{decode_text, validate_email, validate_not_empty};
use crate::{Error, Normalizer, Validator};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct ContactInfo {
    pub phone: String,
    pub email: String,
    pub whatsapp: String,
    pub address: String,
    pub instagram: String,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ContactInfoForm {
    pub phone: String,
    pub email: String,
    pub whatsapp: String,
    pub address: String,
    pub instagram: String,
}

impl Validator for ContactInfoForm {
    fn validate(&self) -> Result<(), Error> {
        if !self.email.is_empty() {
            validate_email(&self.email)?;
        }
        Ok(())
    }
}

impl Normalizer for ContactInfoForm {
    fn do_normalize(&mut self) {
        for field in [
            &mut self.phone,
            &mut self.email,
            &mut self.whatsapp,
            &mut self.address,
            &mut self.instagram,
        ] {
            *field = field.trim().to_string();
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactMessage {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
    pub status: MessageStatus,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewContactMessage {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub subject: String,
    pub message: String,
}

impl Validator for NewContactMessage {
    fn validate(&self) -> Result<(), Error> {
        validate_not_empty("name", &self.name)?;
        validate_email(&self.email)?;
        validate_not_empty("message", &self.message)?;
        Ok(())
    }
}

impl Normalizer for NewContactMessage {
    fn do_normalize(&mut self) {
        self.name = self.name.trim().to_string();
        self.email = self.email.trim().to_string();
        self.subject = self.subject.trim().to_string();
        self.message = self.message.trim().to_string();
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageStatus {
    Unread,
    Read,
    Replied,
}

impl MessageStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Unread => "unread",
            Self::Read => "read",
            Self::Replied => "replied",
        }
    }
}

impl fmt::Display for MessageStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MessageStatus {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "unread" => Ok(Self::Unread),
            "read" => Ok(Self::Read),
            "replied" => Ok(Self::Replied),
            _ => Err(Error::InvalidStatus(s.to_string())),
        }
    }
}

impl FromRow<'_, PgRow> for ContactMessage {
    fn from_row(row: &PgRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            name: row.try_get("name")?,
            email: row.try_get("email")?,
            subject: row.try_get("subject")?,
            message: row.try_get("message")?,
            status: decode_text(row, "status")?,
            created_at: row.try_get("created_at")?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contact_message_should_be_validated() {
        let mut msg = NewContactMessage {
            name: " Budi ".into(),
            email: "budi@example.com".into(),
            subject: String::new(),
            message: " Is breakfast included? ".into(),
        };
        msg.normalize().unwrap();
        assert_eq!(msg.name, "Budi");
        assert_eq!(msg.message, "Is breakfast included?");

        msg.message = "   ".into();
        assert_eq!(
            msg.normalize().unwrap_err(),
            Error::EmptyField("message".into())
        );
    }

    #[test]
    fn contact_form_email_is_optional() {
        let mut form = ContactInfoForm {
            phone: " +62 812 ".into(),
            ..Default::default()
        };
        form.normalize().unwrap();
        assert_eq!(form.phone, "+62 812");

        form.email = "not-an-email".into();
        assert_eq!(
            form.normalize().unwrap_err(),
            Error::InvalidEmail("not-an-email".into())
        );
    }

    #[test]
    fn message_status_should_parse() {
        assert_eq!("replied".parse::<MessageStatus>().unwrap(), MessageStatus::Replied);
        assert!("archived".parse::<MessageStatus>().is_err());
    }
}
