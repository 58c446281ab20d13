use axum::http::StatusCode;
use chrono::{DateTime, NaiveDate, Utc};
use core::str::FromStr;

use fleetbill_core::DomainError;

use crate::app::errors;

/// Parse a typed id from a path/body string, mapping failure to a 400.
pub fn parse_id<T>(value: &str, what: &'static str) -> Result<T, axum::response::Response>
where
    T: FromStr<Err = DomainError>,
{
    value.parse().map_err(|_| {
        errors::json_error(
            StatusCode::BAD_REQUEST,
            "invalid_id",
            format!("invalid {what}"),
        )
    })
}

pub fn parse_rfc3339(
    value: &str,
    what: &'static str,
) -> Result<DateTime<Utc>, axum::response::Response> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|_| {
            errors::json_error(
                StatusCode::BAD_REQUEST,
                "invalid_date",
                format!("{what} must be RFC3339"),
            )
        })
}

pub fn parse_date(value: &str, what: &'static str) -> Result<NaiveDate, axum::response::Response> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|_| {
        errors::json_error(
            StatusCode::BAD_REQUEST,
            "invalid_date",
            format!("{what} must be YYYY-MM-DD"),
        )
    })
}
