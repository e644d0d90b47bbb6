// ── Core error types ──
//
// Errors surfaced by samsara-core. Accessor failures are tagged with the
// verb and entity that failed ("An error occurred while updating
// equipamento"), keeping the transport error as the source. The
// `From<samsara_api::Error>` impl covers calls made outside an accessor
// (login, password reset).

use std::fmt;

use thiserror::Error;
use validator::ValidationErrors;

use crate::access::Area;
use crate::model::TipoAcesso;
use crate::revision::RevisionError;
use crate::uniqueness::DuplicateCodigo;

/// What an accessor was doing when it failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub enum Verb {
    Listing,
    Fetching,
    Creating,
    Updating,
    Deleting,
    Uploading,
}

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Connection / session ─────────────────────────────────────────
    #[error("Cannot connect to record store at {url}: {reason}")]
    ConnectionFailed { url: String, reason: String },

    #[error("Authentication failed: {message}")]
    AuthenticationFailed { message: String },

    #[error("Session expired -- log in again")]
    SessionExpired,

    // ── Accessor failures ────────────────────────────────────────────
    #[error("An error occurred while {verb} {entity}")]
    Entity {
        verb: Verb,
        entity: &'static str,
        #[source]
        source: samsara_api::Error,
    },

    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    // ── Business rules ───────────────────────────────────────────────
    #[error("Validation failed: {message}")]
    Validation { message: String },

    #[error(transparent)]
    Revision(#[from] RevisionError),

    #[error("Motivo is required to deactivate {entity}")]
    ReasonRequired { entity: &'static str },

    /// Raised on updates; creates report the conflict as
    /// [`CreateOutcome::Conflict`](crate::uniqueness::CreateOutcome) instead.
    #[error("{0}")]
    Duplicate(DuplicateCodigo),

    #[error("Access denied: {tipo} cannot use {area}")]
    AccessDenied { tipo: TipoAcesso, area: Area },

    #[error("{entity} {id} is still referenced by other records and cannot be deleted")]
    InUse { entity: &'static str, id: String },

    /// The primary write succeeded but a follow-up step did not. The record
    /// exists with stale shadow fields; re-running reconciliation by id
    /// repairs it.
    #[error("{entity} {id} was saved, but reconciliation failed while {step}")]
    Reconciliation {
        entity: &'static str,
        id: String,
        step: String,
        #[source]
        source: Box<CoreError>,
    },

    // ── Wrapped API errors (outside accessors) ───────────────────────
    #[error("Record store error: {message}")]
    Api {
        message: String,
        status: Option<u16>,
    },

    #[error("Configuration error: {message}")]
    Config { message: String },
}

impl CoreError {
    /// Tag a transport failure with the accessor verb and entity label.
    pub(crate) fn entity(verb: Verb, entity: &'static str, source: samsara_api::Error) -> Self {
        if source.is_auth_expired() {
            return Self::SessionExpired;
        }
        Self::Entity {
            verb,
            entity,
            source,
        }
    }

    pub(crate) fn reconciliation(
        entity: &'static str,
        id: impl Into<String>,
        step: impl fmt::Display,
        source: CoreError,
    ) -> Self {
        Self::Reconciliation {
            entity,
            id: id.into(),
            step: step.to_string(),
            source: Box::new(source),
        }
    }

    /// The underlying record store error, if this failure came from one.
    pub fn api_source(&self) -> Option<&samsara_api::Error> {
        match self {
            Self::Entity { source, .. } => Some(source),
            Self::Reconciliation { source, .. } => source.api_source(),
            _ => None,
        }
    }

    /// HTTP status the store answered with, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => *status,
            _ => self.api_source().and_then(samsara_api::Error::status),
        }
    }

    /// `true` when the store could not be reached at all.
    pub fn is_connection(&self) -> bool {
        match self {
            Self::ConnectionFailed { .. } => true,
            _ => self.api_source().is_some_and(samsara_api::Error::is_transient),
        }
    }

    /// `true` for expired or rejected credentials.
    pub fn is_auth(&self) -> bool {
        matches!(
            self,
            Self::SessionExpired | Self::AuthenticationFailed { .. }
        )
    }

    /// `true` when the requested record does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
            || self.api_source().is_some_and(samsara_api::Error::is_not_found)
    }
}

impl From<ValidationErrors> for CoreError {
    fn from(errors: ValidationErrors) -> Self {
        let mut fields: Vec<String> = errors
            .field_errors()
            .into_iter()
            .map(|(field, errs)| {
                let detail = errs
                    .iter()
                    .map(|e| {
                        e.message
                            .as_ref()
                            .map_or_else(|| e.code.to_string(), ToString::to_string)
                    })
                    .collect::<Vec<_>>()
                    .join(", ");
                format!("{field}: {detail}")
            })
            .collect();
        fields.sort();
        CoreError::Validation {
            message: fields.join("; "),
        }
    }
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<samsara_api::Error> for CoreError {
    fn from(err: samsara_api::Error) -> Self {
        match err {
            samsara_api::Error::Authentication { message } => {
                CoreError::AuthenticationFailed { message }
            }
            samsara_api::Error::SessionExpired => CoreError::SessionExpired,
            samsara_api::Error::Transport(ref e) if e.is_connect() || e.is_timeout() => {
                CoreError::ConnectionFailed {
                    url: e
                        .url()
                        .map_or_else(|| "<unknown>".into(), ToString::to_string),
                    reason: e.to_string(),
                }
            }
            samsara_api::Error::Transport(e) => CoreError::Api {
                message: e.to_string(),
                status: e.status().map(|s| s.as_u16()),
            },
            samsara_api::Error::InvalidUrl(e) => CoreError::Config {
                message: format!("Invalid URL: {e}"),
            },
            samsara_api::Error::Tls(msg) => CoreError::ConnectionFailed {
                url: String::new(),
                reason: format!("TLS error: {msg}"),
            },
            samsara_api::Error::Api {
                status, message, ..
            } => CoreError::Api {
                message,
                status: Some(status),
            },
            samsara_api::Error::Deserialization { message, body: _ } => CoreError::Api {
                message: format!("Unexpected response: {message}"),
                status: None,
            },
            samsara_api::Error::Io(e) => CoreError::Api {
                message: format!("I/O error: {e}"),
                status: None,
            },
        }
    }
}
