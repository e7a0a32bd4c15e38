//! Status classification and body parsing

use reqwest::StatusCode;
use serde_json::Value;

use crate::error::{ApiErrorKind, HuntedError, HuntedResult, ResponseDetails};

/// A successfully received body
#[derive(Debug, Clone, PartialEq)]
pub enum ResponseBody {
    /// The API sent nothing; some endpoints do this instead of `{}`
    Empty,
    Json(Value),
}

/// Map an HTTP status to the API's error taxonomy
///
/// `None` means success: the body should be parsed. Statuses not listed by
/// the API (including other 4xx/5xx) are passed through as success.
pub fn classify(status: StatusCode) -> Option<ApiErrorKind> {
    match status.as_u16() {
        400 => Some(ApiErrorKind::BadRequest),
        404 => Some(ApiErrorKind::NotFound),
        429 => Some(ApiErrorKind::RateLimitExceeded),
        500 => Some(ApiErrorKind::InformUpstream),
        502..=503 => Some(ApiErrorKind::Unavailable),
        _ => None,
    }
}

/// Turn a classified error status into a [`HuntedError::Api`]
pub fn check_status(status: StatusCode, body: String) -> HuntedResult<String> {
    match classify(status) {
        Some(kind) => Err(HuntedError::Api {
            kind,
            details: ResponseDetails::new(
                status.as_u16(),
                status.canonical_reason().unwrap_or("Unknown"),
                body,
            ),
        }),
        None => Ok(body),
    }
}

/// Parse a success body; an empty body is not a parse error
pub fn parse_body(body: &str) -> HuntedResult<ResponseBody> {
    if body.is_empty() {
        return Ok(ResponseBody::Empty);
    }
    Ok(ResponseBody::Json(serde_json::from_str(body)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn test_classify_documented_statuses() {
        assert_eq!(classify(StatusCode::BAD_REQUEST), Some(ApiErrorKind::BadRequest));
        assert_eq!(classify(StatusCode::NOT_FOUND), Some(ApiErrorKind::NotFound));
        assert_eq!(
            classify(StatusCode::TOO_MANY_REQUESTS),
            Some(ApiErrorKind::RateLimitExceeded)
        );
        assert_eq!(
            classify(StatusCode::INTERNAL_SERVER_ERROR),
            Some(ApiErrorKind::InformUpstream)
        );
        assert_eq!(classify(StatusCode::BAD_GATEWAY), Some(ApiErrorKind::Unavailable));
        assert_eq!(
            classify(StatusCode::SERVICE_UNAVAILABLE),
            Some(ApiErrorKind::Unavailable)
        );
    }

    #[test]
    fn test_classify_everything_else_is_success() {
        assert_eq!(classify(StatusCode::OK), None);
        assert_eq!(classify(StatusCode::NO_CONTENT), None);
        assert_eq!(classify(StatusCode::UNAUTHORIZED), None);
        assert_eq!(classify(StatusCode::GATEWAY_TIMEOUT), None);
    }

    #[test]
    fn test_check_status_carries_details() {
        let err = check_status(StatusCode::SERVICE_UNAVAILABLE, "down".to_string()).unwrap_err();
        assert_matches!(
            err,
            HuntedError::Api {
                kind: ApiErrorKind::Unavailable,
                ref details,
            } if details.status == 503
                && details.message == "Service Unavailable"
                && details.body == "down"
        );
    }

    #[test]
    fn test_empty_body_is_sentinel() {
        assert_eq!(parse_body("").unwrap(), ResponseBody::Empty);
    }

    #[test]
    fn test_json_body() {
        let body = parse_body(r#"{"results": []}"#).unwrap();
        assert_matches!(body, ResponseBody::Json(Value::Object(_)));
    }

    #[test]
    fn test_malformed_body() {
        assert_matches!(parse_body("{not json"), Err(HuntedError::Parse(_)));
    }
}
