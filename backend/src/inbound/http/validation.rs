//! Shared validation helpers for inbound HTTP adapters.

use serde_json::json;

use crate::domain::Error;

/// Newtype wrapper for HTTP field names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }

    pub(crate) fn as_str(self) -> &'static str {
        self.0
    }
}

/// `400` for several absent or blank fields, listing them in `details`.
pub(crate) fn missing_fields_error<I>(message: &str, fields: I) -> Error
where
    I: IntoIterator<Item = FieldName>,
{
    let fields: Vec<&str> = fields.into_iter().map(FieldName::as_str).collect();
    Error::invalid_request(message).with_details(json!({
        "fields": fields,
        "code": "missing_field",
    }))
}

/// `400` for a value outside the accepted set.
pub(crate) fn invalid_value_error(message: &str, field: FieldName, value: &str) -> Error {
    Error::invalid_request(message).with_details(json!({
        "field": field.as_str(),
        "value": value,
        "code": "invalid_value",
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;

    const PRODUCT: FieldName = FieldName::new("product");

    #[test]
    fn missing_fields_lists_every_field() {
        let err = missing_fields_error(
            "Please include all fields",
            [FieldName::new("name"), FieldName::new("password")],
        );
        assert_eq!(err.code(), ErrorCode::InvalidRequest);
        assert_eq!(
            err.details(),
            Some(&json!({"fields": ["name", "password"], "code": "missing_field"}))
        );
    }

    #[test]
    fn invalid_value_echoes_the_value() {
        let err = invalid_value_error("Please select a product", PRODUCT, "Pixel");
        assert_eq!(err.message(), "Please select a product");
        assert_eq!(
            err.details(),
            Some(&json!({"field": "product", "value": "Pixel", "code": "invalid_value"}))
        );
    }
}
