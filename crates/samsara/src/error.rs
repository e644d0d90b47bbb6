//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` and `ConfigError` variants into user-facing errors with
//! actionable help text and stable exit codes.

use miette::Diagnostic;
use thiserror::Error;

use samsara_config::ConfigError;
use samsara_core::CoreError;

pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const AUTH: i32 = 3;
    pub const NOT_FOUND: i32 = 4;
    pub const PERMISSION: i32 = 5;
    pub const CONFLICT: i32 = 6;
    pub const CONNECTION: i32 = 7;
    pub const PARTIAL: i32 = 8;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Connection ───────────────────────────────────────────────────
    #[error("Could not connect to the record store at {url}")]
    #[diagnostic(
        code(samsara::connection_failed),
        help(
            "Check that the store is running and reachable.\n\
             URL: {url}\n\
             Self-signed certificate? Try --insecure (-k)."
        )
    )]
    ConnectionFailed {
        url: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    // ── Authentication ───────────────────────────────────────────────
    #[error("Authentication failed: {message}")]
    #[diagnostic(
        code(samsara::auth_failed),
        help(
            "Verify your username and password.\n\
             Run: samsara login"
        )
    )]
    AuthFailed { message: String },

    #[error("Session expired")]
    #[diagnostic(code(samsara::session_expired), help("Log in again with: samsara login"))]
    SessionExpired,

    #[error("No credentials configured for profile '{profile}'")]
    #[diagnostic(
        code(samsara::no_credentials),
        help(
            "Configure credentials with: samsara config init\n\
             Or set SAMSARA_IDENTITY and SAMSARA_PASSWORD."
        )
    )]
    NoCredentials { profile: String },

    #[error("Access denied: {tipo} cannot use {area}")]
    #[diagnostic(
        code(samsara::access_denied),
        help("Ask an administrator to change your access profile.")
    )]
    AccessDenied { tipo: String, area: String },

    // ── Records ──────────────────────────────────────────────────────
    #[error("{resource_type} '{identifier}' not found")]
    #[diagnostic(
        code(samsara::not_found),
        help("Run: samsara {list_command} to see available records")
    )]
    NotFound {
        resource_type: String,
        identifier: String,
        list_command: String,
    },

    #[error("{message}")]
    #[diagnostic(
        code(samsara::duplicate),
        help("Another active {resource_type} already uses this code. Pick a different one.")
    )]
    Conflict {
        resource_type: String,
        message: String,
    },

    #[error("{resource_type} '{identifier}' is still in use")]
    #[diagnostic(
        code(samsara::in_use),
        help("Other records reference it. Remove or change those first.")
    )]
    InUse {
        resource_type: String,
        identifier: String,
    },

    #[error("{resource_type} '{identifier}' was saved, but reconciliation failed while {step}")]
    #[diagnostic(
        code(samsara::reconciliation),
        help(
            "The record exists with stale display fields.\n\
             Repair it with: samsara {command} reconcile {identifier}"
        )
    )]
    Reconciliation {
        resource_type: String,
        identifier: String,
        step: String,
        command: String,
        #[source]
        source: Box<CoreError>,
    },

    #[error("Record store error ({code}): {message}")]
    #[diagnostic(code(samsara::api_error))]
    ApiError { code: String, message: String },

    // ── Validation ───────────────────────────────────────────────────
    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(samsara::validation))]
    Validation { field: String, reason: String },

    #[error("A reason is required to deactivate {resource_type}")]
    #[diagnostic(code(samsara::reason_required), help("Pass one with --reason (-r)."))]
    ReasonRequired { resource_type: String },

    // ── Configuration ────────────────────────────────────────────────
    #[error("Profile '{name}' not found in configuration")]
    #[diagnostic(
        code(samsara::profile_not_found),
        help(
            "Available profiles: {available}\n\
             Create one with: samsara config init"
        )
    )]
    ProfileNotFound { name: String, available: String },

    #[error("Configuration file not found")]
    #[diagnostic(
        code(samsara::no_config),
        help(
            "Create one with: samsara config init\n\
             Expected at: {path}\n\
             Or pass --url / SAMSARA_URL."
        )
    )]
    NoConfig { path: String },

    #[error(transparent)]
    #[diagnostic(code(samsara::config))]
    Config(Box<ConfigError>),

    // ── Interactive ──────────────────────────────────────────────────
    #[error("Destructive operation '{action}' requires confirmation")]
    #[diagnostic(
        code(samsara::confirmation_required),
        help("Use --yes (-y) to skip confirmation in non-interactive contexts.")
    )]
    NonInteractiveRequiresYes { action: String },

    // ── IO / Serialization ───────────────────────────────────────────
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Invalid JSON payload: {0}")]
    #[diagnostic(code(samsara::json), help("Check the JSON body and try again."))]
    Json(#[from] serde_json::Error),

    #[error("YAML output failed: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("CSV output failed: {0}")]
    Csv(#[from] csv::Error),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConnectionFailed { .. } => exit_code::CONNECTION,
            Self::AuthFailed { .. } | Self::SessionExpired | Self::NoCredentials { .. } => {
                exit_code::AUTH
            }
            Self::AccessDenied { .. } => exit_code::PERMISSION,
            Self::NotFound { .. } | Self::ProfileNotFound { .. } => exit_code::NOT_FOUND,
            Self::Conflict { .. } | Self::InUse { .. } => exit_code::CONFLICT,
            Self::Reconciliation { .. } => exit_code::PARTIAL,
            Self::Validation { .. }
            | Self::ReasonRequired { .. }
            | Self::NonInteractiveRequiresYes { .. } => exit_code::USAGE,
            _ => exit_code::GENERAL,
        }
    }
}

/// CLI subcommand that manages records with this entity label.
pub fn command_for(entity: &str) -> &'static str {
    match entity {
        "obra" => "obras",
        "usuário" => "usuarios",
        "operador" => "operadores",
        "tipo de equipamento" => "tipos",
        "grupo de equipamento" => "grupos",
        "manutenção" => "manutencoes",
        "boletim" => "boletins",
        "multa" => "multas",
        "operação" => "operacoes",
        "ordem de serviço" => "ordens",
        _ => "equipamentos",
    }
}

// ── CoreError → CliError mapping ─────────────────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        let wrapped = !matches!(
            err,
            CoreError::ConnectionFailed { .. } | CoreError::Reconciliation { .. }
        );
        if wrapped && err.is_connection() {
            return CliError::ConnectionFailed {
                url: "(record store)".into(),
                source: Box::new(err),
            };
        }

        match err {
            CoreError::ConnectionFailed { url, reason } => CliError::ConnectionFailed {
                url,
                source: reason.into(),
            },

            CoreError::AuthenticationFailed { message } => CliError::AuthFailed { message },

            CoreError::SessionExpired => CliError::SessionExpired,

            CoreError::AccessDenied { tipo, area } => CliError::AccessDenied {
                tipo: tipo.to_string(),
                area: area.to_string(),
            },

            CoreError::NotFound { entity, id } => CliError::NotFound {
                resource_type: entity.into(),
                identifier: id,
                list_command: format!("{} list", command_for(entity)),
            },

            err @ CoreError::Entity { .. } => CliError::ApiError {
                code: err
                    .status()
                    .map_or_else(|| "transport".into(), |s| s.to_string()),
                message: match err.api_source() {
                    Some(source) => format!("{err}: {source}"),
                    None => err.to_string(),
                },
            },

            CoreError::Validation { message } => CliError::Validation {
                field: "input".into(),
                reason: message,
            },

            CoreError::Revision(e) => CliError::Validation {
                field: "reading".into(),
                reason: e.to_string(),
            },

            CoreError::ReasonRequired { entity } => CliError::ReasonRequired {
                resource_type: entity.into(),
            },

            CoreError::Duplicate(duplicate) => CliError::Conflict {
                resource_type: "record".into(),
                message: duplicate.to_string(),
            },

            CoreError::InUse { entity, id } => CliError::InUse {
                resource_type: entity.into(),
                identifier: id,
            },

            CoreError::Reconciliation {
                entity,
                id,
                step,
                source,
            } => CliError::Reconciliation {
                resource_type: entity.into(),
                command: command_for(entity).into(),
                identifier: id,
                step,
                source,
            },

            CoreError::Api { message, status } => CliError::ApiError {
                code: status.map_or_else(|| "unknown".into(), |s| s.to_string()),
                message,
            },

            CoreError::Config { message } => CliError::Validation {
                field: "config".into(),
                reason: message,
            },
        }
    }
}

// ── ConfigError → CliError mapping ───────────────────────────────────

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::NoCredentials { profile } => CliError::NoCredentials { profile },
            ConfigError::Validation { field, reason } => CliError::Validation { field, reason },
            ConfigError::UnknownProfile { name } => CliError::ProfileNotFound {
                name,
                available: "(see: samsara config profiles)".into(),
            },
            other => CliError::Config(Box::new(other)),
        }
    }
}
