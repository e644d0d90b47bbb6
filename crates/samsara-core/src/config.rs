// ── Runtime connection configuration ──
//
// Describes how to reach the record store and authenticate. Carries
// credentials and tuning but never touches disk; samsara-config builds it.

use std::path::PathBuf;
use std::time::Duration;

use secrecy::SecretString;
use url::Url;

/// Default request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Default session lifetime after login (8 hours).
pub const DEFAULT_SESSION_LIFETIME: Duration = Duration::from_secs(8 * 60 * 60);

/// Auth collection holding back-office users.
pub const USERS_COLLECTION: &str = "usuarios";

/// How to authenticate with the record store.
#[derive(Debug, Clone)]
pub enum AuthCredentials {
    /// Pre-issued bearer token.
    Token(SecretString),
    /// Username or e-mail plus password, exchanged for a token on connect.
    Password {
        identity: String,
        password: SecretString,
    },
    /// No credentials; only public collections are reachable.
    Anonymous,
}

/// TLS verification strategy.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TlsVerification {
    /// System CA store (strict).
    #[default]
    SystemDefaults,
    /// Custom CA certificate file.
    CustomCa(PathBuf),
    /// Skip verification (self-signed certificates on a LAN store).
    DangerAcceptInvalid,
}

impl From<&TlsVerification> for samsara_api::TlsMode {
    fn from(tls: &TlsVerification) -> Self {
        match tls {
            TlsVerification::SystemDefaults => Self::System,
            TlsVerification::CustomCa(path) => Self::CustomCa(path.clone()),
            TlsVerification::DangerAcceptInvalid => Self::DangerAcceptInvalid,
        }
    }
}

/// Configuration for one record store.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Store base URL (e.g. `https://frota.example.com/api`).
    pub url: Url,
    pub auth: AuthCredentials,
    pub tls: TlsVerification,
    pub timeout: Duration,
    /// How long a login stays valid before the user must log in again.
    pub session_lifetime: Duration,
}

impl StoreConfig {
    pub fn new(url: Url, auth: AuthCredentials) -> Self {
        Self {
            url,
            auth,
            tls: TlsVerification::default(),
            timeout: DEFAULT_TIMEOUT,
            session_lifetime: DEFAULT_SESSION_LIFETIME,
        }
    }

    pub(crate) fn transport(&self) -> samsara_api::TransportConfig {
        samsara_api::TransportConfig {
            tls: (&self.tls).into(),
            timeout: self.timeout,
        }
    }
}
