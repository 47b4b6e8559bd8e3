//! Form Validation
//!
//! Each validator is a pure function returning `None` on success or a
//! [`ValidationError`] naming the field and a display message. Forms collect
//! the results into a [`FormErrors`] map, keeping only the first failure per
//! field.

use chrono::{DateTime, Local, NaiveDateTime, TimeZone, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::str::FromStr;

use crate::error::{ArdenError, Result};

/// A single failed check
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationError {
    /// Field label the message refers to
    pub field: String,

    /// Message shown next to the input
    pub message: String,
}

impl ValidationError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Non-empty after trimming
pub fn validate_required(value: &str, field: &str) -> Option<ValidationError> {
    if value.trim().is_empty() {
        return Some(ValidationError::new(field, format!("{field} is required")));
    }
    None
}

/// Required, then shaped like `local@domain.tld`
pub fn validate_email(email: &str) -> Option<ValidationError> {
    if email.trim().is_empty() {
        return Some(ValidationError::new("email", "Email is required"));
    }
    if !looks_like_email(email) {
        return Some(ValidationError::new("email", "Please enter a valid email"));
    }
    None
}

/// At least `min_length` characters after trimming
pub fn validate_min_length(value: &str, field: &str, min_length: usize) -> Option<ValidationError> {
    if value.trim().chars().count() < min_length {
        return Some(ValidationError::new(
            field,
            format!("{field} must be at least {min_length} characters"),
        ));
    }
    None
}

/// Digits only and strictly greater than zero
pub fn validate_number(value: &str, field: &str) -> Option<ValidationError> {
    if value.is_empty() || !value.chars().all(|c| c.is_ascii_digit()) {
        return Some(ValidationError::new(field, format!("{field} must be a number")));
    }
    if value.chars().all(|c| c == '0') {
        return Some(ValidationError::new(
            field,
            format!("{field} must be greater than 0"),
        ));
    }
    if Decimal::from_str(value).is_err() {
        return Some(ValidationError::new(field, format!("{field} is too large")));
    }
    None
}

/// Parses as an absolute URL
pub fn validate_url(value: &str, field: &str) -> Option<ValidationError> {
    if url::Url::parse(value.trim()).is_err() {
        return Some(ValidationError::new(
            field,
            format!("{field} must be a valid URL"),
        ));
    }
    None
}

/// Parses as a point in time strictly after `now`
pub fn validate_future_datetime(
    value: &str,
    field: &str,
    now: DateTime<Utc>,
) -> Option<ValidationError> {
    match parse_datetime(value) {
        None => Some(ValidationError::new(
            field,
            format!("{field} must be a valid date and time"),
        )),
        Some(at) if at <= now => Some(ValidationError::new(
            field,
            format!("{field} must be in the future"),
        )),
        Some(_) => None,
    }
}

/// Accepts unix seconds, RFC 3339, or a `datetime-local` input value
/// (`YYYY-MM-DDTHH:MM[:SS]`, read as local time).
pub fn parse_datetime(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }

    if let Ok(secs) = value.parse::<i64>() {
        return Utc.timestamp_opt(secs, 0).single();
    }

    if let Ok(at) = DateTime::parse_from_rfc3339(value) {
        return Some(at.with_timezone(&Utc));
    }

    ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
        .and_then(|naive| Local.from_local_datetime(&naive).earliest())
        .map(|at| at.with_timezone(&Utc))
}

fn looks_like_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let mut parts = email.split('@');
    let (Some(local), Some(domain), None) = (parts.next(), parts.next(), parts.next()) else {
        return false;
    };
    if local.is_empty() {
        return false;
    }
    // some dot with at least one character on each side
    domain
        .char_indices()
        .any(|(i, c)| c == '.' && i > 0 && i + 1 < domain.len())
}

/// Field key → message map collected by a form
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormErrors(BTreeMap<String, String>);

impl FormErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the outcome of a field's validator chain. Only the first
    /// failure for a key is kept.
    pub fn check(&mut self, key: &str, result: Option<ValidationError>) -> &mut Self {
        if let Some(err) = result {
            self.0.entry(key.to_string()).or_insert(err.message);
        }
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    /// Drop a field's message once the user edits it
    pub fn clear_field(&mut self, key: &str) {
        self.0.remove(key);
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// `Ok` when nothing failed, otherwise a validation error carrying the map
    pub fn into_result(self) -> Result<()> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(ArdenError::Validation(self))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_email() {
        let required = validate_email("").unwrap();
        assert_eq!(required.message, "Email is required");

        let format = validate_email("a@b").unwrap();
        assert_eq!(format.message, "Please enter a valid email");

        assert!(validate_email("a@b.com").is_none());
        assert!(validate_email("a b@c.com").is_some());
        assert!(validate_email("a@@b.com").is_some());
        assert!(validate_email("a@.com").is_some());
    }

    #[test]
    fn test_number() {
        assert!(validate_number("-5", "Total Budget").is_some());
        assert!(validate_number("100", "Total Budget").is_none());
        assert!(validate_number("1.5", "Reward").is_some());
        assert!(validate_number("", "Reward").is_some());

        let zero = validate_number("000", "Total Budget").unwrap();
        assert_eq!(zero.message, "Total Budget must be greater than 0");

        let huge = validate_number(&"9".repeat(32), "Total Budget").unwrap();
        assert_eq!(huge.message, "Total Budget is too large");
        assert!(validate_number(&"9".repeat(28), "Reward").is_none());
    }

    #[test]
    fn test_required_and_min_length() {
        assert_eq!(
            validate_required("   ", "Title").unwrap().message,
            "Title is required"
        );
        assert!(validate_required(" x ", "Title").is_none());

        assert!(validate_min_length("  short   ", "Description", 10).is_some());
        assert!(validate_min_length("long enough text", "Description", 10).is_none());
    }

    #[test]
    fn test_url() {
        assert!(validate_url("https://analytics.example.com", "DApp Link").is_none());
        assert!(validate_url("analytics.example.com", "DApp Link").is_some());
        assert!(validate_url("", "DApp Link").is_some());
    }

    #[test]
    fn test_future_datetime() {
        let now = Utc::now();
        let past = (now - Duration::hours(1)).timestamp().to_string();
        let ahead = (now + Duration::hours(1)).timestamp().to_string();

        assert!(validate_future_datetime(&past, "Campaign End Time", now).is_some());
        assert!(validate_future_datetime(&ahead, "Campaign End Time", now).is_none());

        let rfc = (now + Duration::hours(1)).to_rfc3339();
        assert!(validate_future_datetime(&rfc, "Campaign End Time", now).is_none());

        let garbage = validate_future_datetime("next tuesday", "Campaign End Time", now).unwrap();
        assert_eq!(garbage.message, "Campaign End Time must be a valid date and time");
    }

    #[test]
    fn test_datetime_local_input() {
        let parsed = parse_datetime("2001-02-03T04:05").unwrap();
        assert!(parsed < Utc::now());
    }

    #[test]
    fn test_first_failure_wins() {
        let mut errors = FormErrors::new();
        errors.check(
            "dappLink",
            validate_required("", "DApp Link").or_else(|| validate_url("", "DApp Link")),
        );
        errors.check("dappLink", validate_url("", "DApp Link"));

        assert_eq!(errors.len(), 1);
        assert_eq!(errors.get("dappLink"), Some("DApp Link is required"));

        errors.clear_field("dappLink");
        assert!(errors.into_result().is_ok());
    }
}
