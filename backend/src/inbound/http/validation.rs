//! Shared validation helpers for inbound HTTP adapters.

use actix_web::HttpRequest;
use actix_web::error::{InternalError, JsonPayloadError};
use serde_json::json;

use crate::domain::{Error, MenuItemId};

/// Validation error codes for HTTP request failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ValidationCode {
    MissingField,
    InvalidItemId,
    MalformedBody,
}

impl ValidationCode {
    fn as_str(self) -> &'static str {
        match self {
            Self::MissingField => "missing_field",
            Self::InvalidItemId => "invalid_item_id",
            Self::MalformedBody => "malformed_body",
        }
    }
}

pub(crate) fn missing_field_error(field: &str) -> Error {
    Error::invalid_request(format!("missing required field: {field}")).with_details(json!({
        "field": field,
        "code": ValidationCode::MissingField.as_str(),
    }))
}

/// Parse a menu item id taken from a path segment or body field.
pub(crate) fn parse_item_id(raw: &str, field: &str) -> Result<MenuItemId, Error> {
    raw.parse::<MenuItemId>().map_err(|_| {
        Error::invalid_request(format!("{field} must be a non-negative integer")).with_details(
            json!({
                "field": field,
                "value": raw,
                "code": ValidationCode::InvalidItemId.as_str(),
            }),
        )
    })
}

/// Render JSON extractor failures as domain errors so clients always receive
/// the standard error payload.
pub fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    let message = err.to_string();
    let domain = Error::invalid_request("request body is not valid JSON").with_details(json!({
        "code": ValidationCode::MalformedBody.as_str(),
        "reason": message,
    }));
    InternalError::from_response(err, actix_web::ResponseError::error_response(&domain)).into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use rstest::rstest;

    #[rstest]
    #[case("4", 4)]
    #[case("12", 12)]
    fn parses_item_ids(#[case] raw: &str, #[case] expected: u32) {
        let id = parse_item_id(raw, "itemId").expect("valid id");
        assert_eq!(id, MenuItemId::new(expected));
    }

    #[rstest]
    #[case("burger")]
    #[case("-1")]
    #[case("")]
    #[case(" 12 ")]
    #[case("012")]
    fn rejects_non_numeric_ids(#[case] raw: &str) {
        let err = parse_item_id(raw, "itemId").expect_err("invalid id");
        assert_eq!(err.code(), ErrorCode::InvalidRequest);
        assert_eq!(
            err.details().and_then(|details| details.get("code")),
            Some(&json!("invalid_item_id"))
        );
    }

    #[rstest]
    fn missing_field_names_the_field() {
        let err = missing_field_error("code");
        assert_eq!(err.message(), "missing required field: code");
    }
}
