//! Response body decoding.

use serde_json::Value;

/// A decoded response body.
#[derive(Debug, Clone, PartialEq)]
pub enum Body {
    /// Body parsed as JSON
    Json(Value),
    /// Raw text body
    Text(String),
}

impl Body {
    pub fn as_json(&self) -> Option<&Value> {
        match self {
            Body::Json(value) => Some(value),
            Body::Text(_) => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Body::Text(text) => Some(text),
            Body::Json(_) => None,
        }
    }
}

/// What the caller expects the endpoint to return.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Expect {
    /// Parse as JSON regardless of the declared content type
    Json,
    /// Decide from the `Content-Type` header
    Auto,
}

/// Result of decoding one successful response.
#[derive(Debug)]
pub(crate) enum Decoded {
    Body(Body),
    /// JSON was expected but the body was blank
    Empty,
    /// JSON was expected but did not parse
    Invalid(serde_json::Error),
}

/// Whether a `Content-Type` header value declares JSON.
pub(crate) fn is_json_content_type(content_type: Option<&str>) -> bool {
    content_type
        .map(|ct| ct.to_ascii_lowercase().contains("application/json"))
        .unwrap_or(false)
}

/// Decodes `text` as JSON when `as_json` is set, otherwise keeps it as text.
pub(crate) fn decode_body(text: String, as_json: bool) -> Decoded {
    if !as_json {
        return Decoded::Body(Body::Text(text));
    }
    if text.trim().is_empty() {
        return Decoded::Empty;
    }
    match serde_json::from_str(&text) {
        Ok(value) => Decoded::Body(Body::Json(value)),
        Err(e) => Decoded::Invalid(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_json_content_type_detection() {
        assert!(is_json_content_type(Some("application/json")));
        assert!(is_json_content_type(Some("application/json; charset=utf-8")));
        assert!(is_json_content_type(Some("Application/JSON")));
        assert!(!is_json_content_type(Some("text/plain")));
        assert!(!is_json_content_type(Some("application/link-format")));
        assert!(!is_json_content_type(None));
    }

    #[test]
    fn test_decode_json() {
        match decode_body(r#"{"a": [1, 2]}"#.to_string(), true) {
            Decoded::Body(Body::Json(value)) => assert_eq!(value, json!({"a": [1, 2]})),
            other => panic!("expected JSON body, got {other:?}"),
        }
    }

    #[test]
    fn test_decode_blank_json_is_empty() {
        assert!(matches!(decode_body("  \n".to_string(), true), Decoded::Empty));
        assert!(matches!(decode_body(String::new(), true), Decoded::Empty));
    }

    #[test]
    fn test_decode_invalid_json() {
        assert!(matches!(
            decode_body("<html>busy</html>".to_string(), true),
            Decoded::Invalid(_)
        ));
    }

    #[test]
    fn test_decode_text_passthrough() {
        match decode_body("<http://web.archive.org/web/2015/x>".to_string(), false) {
            Decoded::Body(Body::Text(text)) => assert!(text.contains("web/")),
            other => panic!("expected text body, got {other:?}"),
        }
        // Blank text is still a (blank) body
        assert!(matches!(
            decode_body(String::new(), false),
            Decoded::Body(Body::Text(_))
        ));
    }

    #[test]
    fn test_body_accessors() {
        let json_body = Body::Json(json!([]));
        assert!(json_body.as_json().is_some());
        assert!(json_body.as_text().is_none());

        let text_body = Body::Text("x".to_string());
        assert_eq!(text_body.as_text(), Some("x"));
        assert!(text_body.as_json().is_none());
    }
}
