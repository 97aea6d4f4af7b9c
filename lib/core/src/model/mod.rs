//! Entity models, one file per record kind.

pub mod machine;
pub mod order;
pub mod stock;
pub mod worker;

use chrono::{DateTime, NaiveDate};

use crate::entity::EntityId;
use crate::error::ValidationError;

/// Names must carry at least two characters.
pub(crate) fn require_name(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.trim().chars().count() < 2 {
        return Err(ValidationError::new(
            field,
            "must be at least 2 characters",
        ));
    }
    Ok(())
}

pub(crate) fn require_text(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new(field, "is required"));
    }
    Ok(())
}

/// Accepts an RFC 3339 timestamp or a bare `YYYY-MM-DD` date.
pub(crate) fn require_date(field: &'static str, value: &str) -> Result<(), ValidationError> {
    let rfc3339 = DateTime::parse_from_rfc3339(value).is_ok();
    let date_only = NaiveDate::parse_from_str(value, "%Y-%m-%d").is_ok();
    if !rfc3339 && !date_only {
        return Err(ValidationError::new(
            field,
            format!("not a valid date: {value:?}"),
        ));
    }
    Ok(())
}

/// Reference ids are server-assigned and start at 1; zero means the form
/// never picked one.
pub(crate) fn require_ref(field: &'static str, id: EntityId) -> Result<(), ValidationError> {
    if id == 0 {
        return Err(ValidationError::new(field, "is required"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn date_formats() {
        assert!(require_date("date", "2024-01-01").is_ok());
        assert!(require_date("date", "2024-01-01T10:30:00.000Z").is_ok());
        assert!(require_date("date", "2024-01-01T10:30:00+02:00").is_ok());
        assert!(require_date("date", "next tuesday").is_err());
        assert!(require_date("date", "").is_err());
    }

    #[test]
    fn name_length() {
        assert!(require_name("name", "ok").is_ok());
        assert!(require_name("name", "x").is_err());
        assert!(require_name("name", "  ").is_err());
    }
}
