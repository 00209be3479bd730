use serde::{Deserialize, Serialize};

/// Unified error type for all resource client operations.
///
/// Each variant includes a `resource` field identifying which entity
/// resource produced the error, plus variant-specific context. All variants
/// are serializable for structured error reporting.
///
/// Failures are terminal for the attempt that produced them: the client
/// performs no automatic retry or backoff. Callers surface the error inline
/// and wait for an explicit user re-action.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "code")]
pub enum ApiError {
    /// A network-level error occurred (DNS failure, connection refused, etc.).
    NetworkError {
        /// Resource that produced the error.
        resource: String,
        /// Error details.
        detail: String,
    },

    /// The HTTP request timed out.
    Timeout {
        /// Resource that produced the error.
        resource: String,
        /// Error details.
        detail: String,
    },

    /// The backend rejected the request's credentials (HTTP 401/403).
    Unauthorized {
        /// Resource that produced the error.
        resource: String,
        /// Original error message from the backend, if available.
        raw_message: Option<String>,
    },

    /// The requested record was not found (HTTP 404).
    NotFound {
        /// Resource that produced the error.
        resource: String,
        /// ID of the record that was not found.
        id: String,
        /// Original error message from the backend, if available.
        raw_message: Option<String>,
    },

    /// The backend rejected the request payload (HTTP 400/422).
    InvalidRequest {
        /// Resource that produced the error.
        resource: String,
        /// Description of what the backend rejected.
        detail: String,
    },

    /// The backend failed to process the request (HTTP 5xx).
    ServerError {
        /// Resource that produced the error.
        resource: String,
        /// HTTP status code.
        status: u16,
        /// Response body, if any.
        detail: String,
    },

    /// Failed to parse the backend's response body.
    ParseError {
        /// Resource that produced the error.
        resource: String,
        /// Details about the parse failure.
        detail: String,
    },

    /// Failed to serialize a request body.
    SerializationError {
        /// Resource that produced the error.
        resource: String,
        /// Details about the serialization failure.
        detail: String,
    },

    /// File upload was requested on a resource that does not accept uploads.
    ///
    /// Only the documents resource supports multipart upload.
    UploadUnsupported {
        /// Resource that produced the error.
        resource: String,
    },
}

impl ApiError {
    /// Whether this error is expected behavior (user input, missing record,
    /// unsupported operation), used for log level selection.
    ///
    /// Callers should log at `warn` when this returns `true` and `error`
    /// otherwise. Update this method when adding variants.
    #[must_use]
    pub fn is_expected(&self) -> bool {
        matches!(
            self,
            Self::Unauthorized { .. }
                | Self::NotFound { .. }
                | Self::InvalidRequest { .. }
                | Self::UploadUnsupported { .. }
        )
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NetworkError { resource, detail } => {
                write!(f, "[{resource}] Network error: {detail}")
            }
            Self::Timeout { resource, detail } => {
                write!(f, "[{resource}] Request timeout: {detail}")
            }
            Self::Unauthorized {
                resource,
                raw_message,
            } => {
                if let Some(msg) = raw_message {
                    write!(f, "[{resource}] Unauthorized: {msg}")
                } else {
                    write!(f, "[{resource}] Unauthorized")
                }
            }
            Self::NotFound { resource, id, .. } => {
                write!(f, "[{resource}] Record '{id}' not found")
            }
            Self::InvalidRequest { resource, detail } => {
                write!(f, "[{resource}] Invalid request: {detail}")
            }
            Self::ServerError {
                resource,
                status,
                detail,
            } => {
                if detail.is_empty() {
                    write!(f, "[{resource}] Server error (HTTP {status})")
                } else {
                    write!(f, "[{resource}] Server error (HTTP {status}): {detail}")
                }
            }
            Self::ParseError { resource, detail } => {
                write!(f, "[{resource}] Parse error: {detail}")
            }
            Self::SerializationError { resource, detail } => {
                write!(f, "[{resource}] Serialization error: {detail}")
            }
            Self::UploadUnsupported { resource } => {
                write!(f, "[{resource}] Uploads are not supported")
            }
        }
    }
}

impl std::error::Error for ApiError {}

/// Convenience type alias for `Result<T, ApiError>`.
pub type Result<T> = std::result::Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_network_error() {
        let e = ApiError::NetworkError {
            resource: "deals".to_string(),
            detail: "connection refused".to_string(),
        };
        assert_eq!(e.to_string(), "[deals] Network error: connection refused");
    }

    #[test]
    fn display_not_found() {
        let e = ApiError::NotFound {
            resource: "deals".to_string(),
            id: "d1".to_string(),
            raw_message: None,
        };
        assert_eq!(e.to_string(), "[deals] Record 'd1' not found");
    }

    #[test]
    fn display_unauthorized_with_message() {
        let e = ApiError::Unauthorized {
            resource: "prospects".to_string(),
            raw_message: Some("token expired".to_string()),
        };
        assert_eq!(e.to_string(), "[prospects] Unauthorized: token expired");
    }

    #[test]
    fn display_server_error_without_body() {
        let e = ApiError::ServerError {
            resource: "documents".to_string(),
            status: 502,
            detail: String::new(),
        };
        assert_eq!(e.to_string(), "[documents] Server error (HTTP 502)");
    }

    #[test]
    fn display_upload_unsupported() {
        let e = ApiError::UploadUnsupported {
            resource: "deals".to_string(),
        };
        assert_eq!(e.to_string(), "[deals] Uploads are not supported");
    }

    #[test]
    fn expected_variants() {
        assert!(ApiError::NotFound {
            resource: "deals".into(),
            id: "d1".into(),
            raw_message: None,
        }
        .is_expected());
        assert!(ApiError::InvalidRequest {
            resource: "deals".into(),
            detail: "bad".into(),
        }
        .is_expected());
        assert!(!ApiError::NetworkError {
            resource: "deals".into(),
            detail: "x".into(),
        }
        .is_expected());
        assert!(!ApiError::ServerError {
            resource: "deals".into(),
            status: 500,
            detail: String::new(),
        }
        .is_expected());
    }

    #[test]
    fn serialize_json_tagged_by_code() {
        let e = ApiError::Timeout {
            resource: "deals".to_string(),
            detail: "30s elapsed".to_string(),
        };
        let json = serde_json::to_string(&e).unwrap_or_default();
        assert!(json.contains("\"code\":\"Timeout\""));
    }

    #[test]
    fn deserialize_round_trip() {
        let original = ApiError::InvalidRequest {
            resource: "prospects".to_string(),
            detail: "email malformed".to_string(),
        };
        let json = serde_json::to_string(&original).unwrap_or_default();
        let back_res: serde_json::Result<ApiError> = serde_json::from_str(&json);
        assert!(back_res.is_ok(), "deserialize failed: {back_res:?}");
        let Ok(back) = back_res else {
            return;
        };
        assert_eq!(back.to_string(), original.to_string());
    }
}
