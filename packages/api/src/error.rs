use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

/// Errors surfaced by [`ApiClient`](crate::ApiClient).
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request never produced an HTTP response.
    #[error("network error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Non-2xx response; `message` comes from the body's `detail`.
    #[error("{message}")]
    Status { status: u16, message: String },

    /// 422 response.
    #[error("Validation Error: {0}")]
    Validation(String),

    /// 2xx response whose body did not match the expected shape.
    #[error("unexpected response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    /// A call that needs a session was made without a token.
    #[error("Please log in first")]
    NotLoggedIn,
}

impl ApiError {
    /// HTTP status, for errors that came from a response.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            ApiError::Validation(_) => Some(422),
            _ => None,
        }
    }

    /// Build the error for a non-2xx response from its raw body.
    ///
    /// - unparsable body: `Unknown error`
    /// - 422 with a `detail` array: `loc.joined - msg` per entry, `; `-separated
    /// - otherwise `detail` when present, else `HTTP <status>`
    pub fn from_response(status: u16, body: &str) -> Self {
        let Ok(parsed) = serde_json::from_str::<ErrorBody>(body) else {
            return ApiError::Status {
                status,
                message: "Unknown error".to_string(),
            };
        };
        let detail = parsed.detail.filter(|d| !d.is_null());

        if status == 422 {
            match detail {
                Some(Value::Array(items)) => {
                    let joined = items
                        .iter()
                        .map(|item| {
                            serde_json::from_value::<FieldError>(item.clone())
                                .map(|f| f.to_string())
                                .unwrap_or_else(|_| item.to_string())
                        })
                        .collect::<Vec<_>>()
                        .join("; ");
                    return ApiError::Validation(joined);
                }
                Some(other) => return ApiError::Validation(detail_text(&other)),
                None => {}
            }
        }

        let message = match detail {
            Some(d) => detail_text(&d),
            None => format!("HTTP {status}"),
        };
        ApiError::Status { status, message }
    }
}

fn detail_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    detail: Option<Value>,
}

/// One entry of a 422 `detail` array.
#[derive(Debug, Deserialize)]
struct FieldError {
    #[serde(default)]
    loc: Vec<Value>,
    #[serde(default)]
    msg: String,
}

impl std::fmt::Display for FieldError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let loc = self
            .loc
            .iter()
            .map(detail_text)
            .collect::<Vec<_>>()
            .join(".");
        write!(f, "{loc} - {}", self.msg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_detail_array() {
        let body = r#"{"detail": [
            {"loc": ["body", "rating"], "msg": "field required"},
            {"loc": ["body", "tds", 0], "msg": "not a number"}
        ]}"#;
        let err = ApiError::from_response(422, body);
        assert_eq!(
            err.to_string(),
            "Validation Error: body.rating - field required; body.tds.0 - not a number"
        );
        assert_eq!(err.status(), Some(422));
    }

    #[test]
    fn test_validation_detail_string() {
        let err = ApiError::from_response(422, r#"{"detail": "bad email"}"#);
        assert_eq!(err.to_string(), "Validation Error: bad email");
    }

    #[test]
    fn test_detail_message_and_fallbacks() {
        let err = ApiError::from_response(401, r#"{"detail": "Invalid credentials"}"#);
        assert_eq!(err.to_string(), "Invalid credentials");
        assert_eq!(err.status(), Some(401));

        let err = ApiError::from_response(500, r#"{"error": "boom"}"#);
        assert_eq!(err.to_string(), "HTTP 500");

        let err = ApiError::from_response(502, "<html>Bad Gateway</html>");
        assert_eq!(err.to_string(), "Unknown error");
    }
}
