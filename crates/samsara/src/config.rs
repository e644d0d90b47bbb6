//! CLI configuration: thin wrapper around `samsara_config` shared types.
//!
//! Re-exports the shared types and adds CLI-specific resolution that
//! respects `GlobalOpts` flag overrides (--url, --identity, --token, etc.).

use secrecy::SecretString;

use samsara_core::{AuthCredentials, StoreConfig};

use crate::cli::GlobalOpts;
use crate::error::CliError;

// ── Re-exports from shared crate ────────────────────────────────────

pub use samsara_config::{
    Config, Defaults, Profile, config_path, load_config_or_default, save_config,
};

// ── CLI-specific helpers ────────────────────────────────────────────

/// Resolve the active profile name from CLI flags and config.
pub fn active_profile_name(global: &GlobalOpts, config: &Config) -> String {
    global
        .profile
        .clone()
        .or_else(|| config.default_profile.clone())
        .unwrap_or_else(|| "default".into())
}

/// Build a `StoreConfig` from the config file, profile, and CLI overrides.
///
/// Without a matching profile, `--url` (or `SAMSARA_URL`) plus optional
/// credential flags is enough.
pub fn build_store_config(global: &GlobalOpts) -> Result<StoreConfig, CliError> {
    let cfg = load_config_or_default();
    let profile_name = active_profile_name(global, &cfg);

    if let Some(profile) = cfg.profiles.get(&profile_name) {
        return resolve_profile(profile, &profile_name, &cfg.defaults, global);
    }

    let url = global.url.clone().ok_or_else(|| CliError::NoConfig {
        path: config_path().display().to_string(),
    })?;
    let profile = Profile {
        url,
        auth_mode: "anonymous".into(),
        ..Profile::default()
    };
    resolve_profile(&profile, &profile_name, &cfg.defaults, global)
}

/// Store config for commands that authenticate on their own (`login`,
/// `reset-password`): the profile's URL and transport settings with no
/// credentials attached.
///
/// Returns the config with the active profile name and, when known, the
/// identity to log in as.
pub fn build_unauthenticated_config(
    global: &GlobalOpts,
) -> Result<(StoreConfig, String, Option<String>), CliError> {
    let cfg = load_config_or_default();
    let profile_name = active_profile_name(global, &cfg);

    let mut profile = match cfg.profiles.get(&profile_name) {
        Some(profile) => profile.clone(),
        None => Profile {
            url: global.url.clone().ok_or_else(|| CliError::NoConfig {
                path: config_path().display().to_string(),
            })?,
            ..Profile::default()
        },
    };
    if let Some(ref url) = global.url {
        profile.url.clone_from(url);
    }
    if global.insecure {
        profile.insecure = Some(true);
    }
    if global.timeout.is_some() {
        profile.timeout = global.timeout;
    }
    profile.auth_mode = "anonymous".into();

    let identity = global.identity.clone().or_else(|| profile.identity.clone());
    let config = samsara_config::profile_to_store_config(&profile, &profile_name, &cfg.defaults)?;
    Ok((config, profile_name, identity))
}

/// Translate a `Profile` + global flags into a `StoreConfig`.
///
/// CLI flag overrides take priority over profile values.
pub fn resolve_profile(
    profile: &Profile,
    profile_name: &str,
    defaults: &Defaults,
    global: &GlobalOpts,
) -> Result<StoreConfig, CliError> {
    let mut profile = profile.clone();
    if let Some(ref url) = global.url {
        profile.url.clone_from(url);
    }
    if global.identity.is_some() {
        profile.identity.clone_from(&global.identity);
    }
    if global.insecure {
        profile.insecure = Some(true);
    }
    if global.timeout.is_some() {
        profile.timeout = global.timeout;
    }

    // Flag credentials bypass the keyring and plaintext lookups entirely.
    let flagged = flag_credentials(&profile, profile_name, global)?;
    if flagged.is_some() {
        profile.auth_mode = "anonymous".into();
    }

    let mut config = samsara_config::profile_to_store_config(&profile, profile_name, defaults)?;
    if let Some(auth) = flagged {
        config.auth = auth;
    }
    Ok(config)
}

fn flag_credentials(
    profile: &Profile,
    profile_name: &str,
    global: &GlobalOpts,
) -> Result<Option<AuthCredentials>, CliError> {
    if let Some(ref token) = global.token {
        return Ok(Some(AuthCredentials::Token(SecretString::from(token.clone()))));
    }
    let Some(ref password) = global.password else {
        return Ok(None);
    };
    let identity = profile
        .identity
        .clone()
        .ok_or_else(|| CliError::NoCredentials {
            profile: profile_name.into(),
        })?;
    Ok(Some(AuthCredentials::Password {
        identity,
        password: SecretString::from(password.clone()),
    }))
}

/// Names of all configured profiles, for error help text.
pub fn available_profiles(cfg: &Config) -> String {
    let mut names: Vec<_> = cfg.profiles.keys().cloned().collect();
    if names.is_empty() {
        return "(none)".into();
    }
    names.sort();
    names.join(", ")
}
