//! Declarative validation for the list-query inputs.
//!
//! Page and perPage arrive as strings (query string or form body) and must
//! coerce to positive integers; borough is optional and passes through as-is.
//! Failures are collected per field so a request with two bad inputs reports
//! both, and nothing reaches the repository.

use serde::{Deserialize, Serialize};

use crate::db::ListQuery;

/// A single failed-field message, one per constraint violation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    fn new(field: &str, message: impl Into<String>) -> Self {
        Self {
            field: field.to_string(),
            message: message.into(),
        }
    }
}

/// Raw, unvalidated list-query inputs as they arrive on the wire.
///
/// Used both for `GET /api/restaurants` query parameters and the
/// `POST /api/restaurantForm` form body.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawListQuery {
    pub page: Option<String>,
    #[serde(rename = "perPage")]
    pub per_page: Option<String>,
    pub borough: Option<String>,
}

impl RawListQuery {
    /// Validate into repository query parameters, or report every failed
    /// field at once.
    pub fn validate(&self) -> Result<ListQuery, Vec<FieldError>> {
        let mut errors = Vec::new();

        let page = check_positive_int("page", "Page", self.page.as_deref(), &mut errors);
        let per_page =
            check_positive_int("perPage", "PerPage", self.per_page.as_deref(), &mut errors);

        // Query and form encodings only carry strings, so any present
        // borough value already satisfies the string constraint. Treat an
        // empty value as "no filter" to match a blank form input.
        let borough = self
            .borough
            .as_deref()
            .filter(|b| !b.trim().is_empty())
            .map(str::to_owned);

        match (page, per_page) {
            (Some(page), Some(per_page)) if errors.is_empty() => Ok(ListQuery {
                page,
                per_page,
                borough,
            }),
            _ => Err(errors),
        }
    }
}

fn check_positive_int(
    field: &str,
    label: &str,
    value: Option<&str>,
    errors: &mut Vec<FieldError>,
) -> Option<u64> {
    let Some(raw) = value else {
        errors.push(FieldError::new(field, format!("{} must be a number", label)));
        return None;
    };
    match raw.trim().parse::<i64>() {
        Ok(n) if n >= 1 => Some(n as u64),
        Ok(_) => {
            errors.push(FieldError::new(
                field,
                format!("{} must be a positive number", label),
            ));
            None
        }
        Err(_) => {
            errors.push(FieldError::new(field, format!("{} must be a number", label)));
            None
        }
    }
}
