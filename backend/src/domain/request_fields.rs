//! Parsing of raw request fields into validated identifiers.

use serde_json::json;

use super::{BlankValueError, Error};

/// Parse a required field, reporting `"<field> is empty"` for blank input.
pub(crate) fn parse_required<T>(raw: String, field: &'static str) -> Result<T, Error>
where
    T: TryFrom<String, Error = BlankValueError>,
{
    T::try_from(raw).map_err(|_| blank_field_error(field))
}

/// Error for a missing or blank field.
pub(crate) fn blank_field_error(field: &'static str) -> Error {
    Error::invalid_request(format!("{field} is empty")).with_details(json!({
        "field": field,
        "code": "missing_field",
    }))
}
