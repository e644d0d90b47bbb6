use thiserror::Error;

/// Top-level error type for the `samsara-api` crate.
///
/// Covers every failure mode of the record store surface:
/// authentication, transport, structured API errors and payload decoding.
/// `samsara-core` maps these into domain-tagged errors.
#[derive(Debug, Error)]
pub enum Error {
    // ── Authentication ──────────────────────────────────────────────
    /// Login failed (wrong identity/password, disabled account, etc.)
    #[error("Authentication failed: {message}")]
    Authentication { message: String },

    /// Token rejected or expired (HTTP 401).
    #[error("Session expired -- re-authentication required")]
    SessionExpired,

    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, etc.)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// TLS setup or certificate error.
    #[error("TLS error: {0}")]
    Tls(String),

    // ── Record store ────────────────────────────────────────────────
    /// Structured error from the record store (`{code, message, data}` body).
    #[error("Record store error (HTTP {status}): {message}")]
    Api {
        status: u16,
        message: String,
        /// Per-field details, e.g. `{"codigo": {"code": "validation_not_unique", ...}}`.
        data: Option<serde_json::Value>,
    },

    // ── Data ────────────────────────────────────────────────────────
    /// JSON deserialization failed, with the raw body for debugging.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },

    /// Local file could not be read for upload.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Returns `true` if the token expired and logging in again might help.
    pub fn is_auth_expired(&self) -> bool {
        matches!(self, Self::Authentication { .. } | Self::SessionExpired)
    }

    /// Returns `true` if this is a transient transport error.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Transport(e) => e.is_timeout() || e.is_connect(),
            Self::Api { status, .. } => *status >= 500,
            _ => false,
        }
    }

    /// Returns `true` if the record does not exist.
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::Transport(e) => e.status() == Some(reqwest::StatusCode::NOT_FOUND),
            Self::Api { status: 404, .. } => true,
            _ => false,
        }
    }

    /// HTTP status code, when the failure came from a response.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            Self::SessionExpired => Some(401),
            Self::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Returns `true` if the store refused a delete because other records
    /// still reference this one.
    ///
    /// The store only signals this through its message text, so the match
    /// is on the `"required relation"` substring.
    pub fn is_required_relation(&self) -> bool {
        match self {
            Self::Api { message, .. } => message.contains("required relation"),
            _ => false,
        }
    }

    /// Returns `true` if the store rejected `field` as a duplicate value.
    pub fn is_not_unique(&self, field: &str) -> bool {
        match self {
            Self::Api {
                data: Some(data), ..
            } => data
                .get(field)
                .and_then(|f| f.get("code"))
                .and_then(serde_json::Value::as_str)
                .is_some_and(|code| code == "validation_not_unique"),
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn required_relation_matches_store_message() {
        let err = Error::Api {
            status: 400,
            message: "Failed to delete record. Make sure that the record is not part of a \
                      required relation reference."
                .into(),
            data: None,
        };
        assert!(err.is_required_relation());
        assert!(!err.is_not_found());
    }

    #[test]
    fn not_unique_reads_field_code() {
        let err = Error::Api {
            status: 400,
            message: "Failed to create record.".into(),
            data: Some(json!({
                "codigo": { "code": "validation_not_unique", "message": "Value must be unique." }
            })),
        };
        assert!(err.is_not_unique("codigo"));
        assert!(!err.is_not_unique("nome"));
    }

    #[test]
    fn server_errors_are_transient() {
        let err = Error::Api {
            status: 503,
            message: "unavailable".into(),
            data: None,
        };
        assert!(err.is_transient());
        assert_eq!(err.status(), Some(503));
    }
}
