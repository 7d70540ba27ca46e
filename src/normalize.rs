//! Coercion rules for the catalog's string-encoded fields.
//!
//! The upstream feed encodes several values as ad-hoc strings: release dates
//! as `YYYY/MM/DD`, affected products as a comma-separated list, booleans as
//! `"true"` / `"false"`, and download locations as bare URL strings. This
//! module holds the individual coercers plus [`normalize_field`], the ordered
//! rule list that decides which coercion applies to a given field.

use chrono::NaiveDate;
use thiserror::Error;
use tracing::warn;
use url::Url;

/// Error returned when a release-date string does not match `YYYY/MM/DD`.
#[derive(Debug, Error)]
#[error("unable to parse date: {0}")]
pub struct DateParseError(pub String);

/// Parses a catalog date in the `YYYY/MM/DD` format used by the vendor feed.
///
/// The returned [`NaiveDate`] is a plain calendar date; no timezone
/// interpretation is performed.
pub fn parse_date(s: &str) -> Result<NaiveDate, DateParseError> {
    NaiveDate::parse_from_str(s, "%Y/%m/%d").map_err(|_| DateParseError(s.to_string()))
}

/// Maps exactly `"true"` / `"false"` to a boolean.
///
/// The match is case-sensitive and tolerates no surrounding whitespace.
/// `None` means the value is not a boolean literal and the caller keeps it
/// verbatim.
pub fn coerce_bool(s: &str) -> Option<bool> {
    match s {
        "true" => Some(true),
        "false" => Some(false),
        _ => None,
    }
}

/// Splits a comma-separated product list, dropping whitespace after commas.
pub fn split_products(s: &str) -> Vec<String> {
    s.split(',').map(|part| part.trim_start().to_owned()).collect()
}

/// A string field value after coercion.
#[derive(Debug, Clone, PartialEq)]
pub enum Normalized {
    Products(Vec<String>),
    Date(NaiveDate),
    Url(Url),
    Bool(bool),
    Text(String),
}

/// Applies the field-coercion rules to a string value.
///
/// Rules are mutually exclusive and tried in order; the first match wins:
///
/// 1. `Products` values are comma-separated product-name lists;
/// 2. `ReleaseDate` values are `YYYY/MM/DD` dates; an unparseable date is
///    logged and kept verbatim, it never aborts the surrounding parse;
/// 3. values starting with `http://` or `https://` become URLs;
/// 4. exact `true` / `false` strings become booleans.
///
/// Anything else is kept verbatim as [`Normalized::Text`].
pub fn normalize_field(key: &str, value: &str) -> Normalized {
    if key == "Products" {
        return Normalized::Products(split_products(value));
    }

    if key == "ReleaseDate" {
        return match parse_date(value) {
            Ok(date) => Normalized::Date(date),
            Err(err) => {
                warn!("{err}; keeping verbatim release date");
                Normalized::Text(value.to_owned())
            }
        };
    }

    if value.starts_with("http://") || value.starts_with("https://") {
        if let Ok(url) = Url::parse(value) {
            return Normalized::Url(url);
        }
    }

    match coerce_bool(value) {
        Some(flag) => Normalized::Bool(flag),
        None => Normalized::Text(value.to_owned()),
    }
}
