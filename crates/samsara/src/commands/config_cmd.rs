//! Config subcommand handlers.

use dialoguer::{Input, Select};

use crate::cli::{ConfigArgs, ConfigCommand, GlobalOpts, OutputFormat};
use crate::config::{self, Config, Profile};
use crate::error::CliError;
use crate::output;

const REDACTED: &str = "****";

// ── Helpers ─────────────────────────────────────────────────────────

/// Mask plaintext secrets in place.
fn redact(cfg: &mut Config) {
    for profile in cfg.profiles.values_mut() {
        if profile.password.is_some() {
            profile.password = Some(REDACTED.into());
        }
        if profile.token.is_some() {
            profile.token = Some(REDACTED.into());
        }
    }
}

/// Format an already redacted config as TOML-like text.
fn format_config(cfg: &Config) -> String {
    use std::fmt::Write;
    let mut out = String::new();

    if let Some(ref default) = cfg.default_profile {
        let _ = writeln!(out, "default_profile = \"{default}\"");
    }
    let _ = writeln!(out);
    let _ = writeln!(out, "[defaults]");
    let _ = writeln!(out, "output = \"{}\"", cfg.defaults.output);
    let _ = writeln!(out, "color = \"{}\"", cfg.defaults.color);
    let _ = writeln!(out, "insecure = {}", cfg.defaults.insecure);
    let _ = writeln!(out, "timeout = {}", cfg.defaults.timeout);
    let _ = writeln!(out, "session_hours = {}", cfg.defaults.session_hours);

    let mut names: Vec<_> = cfg.profiles.keys().collect();
    names.sort();
    for name in names {
        let p = &cfg.profiles[name];
        let _ = writeln!(out);
        let _ = writeln!(out, "[profiles.{name}]");
        let _ = writeln!(out, "url = \"{}\"", p.url);
        let _ = writeln!(out, "auth_mode = \"{}\"", p.auth_mode);
        if let Some(ref identity) = p.identity {
            let _ = writeln!(out, "identity = \"{identity}\"");
        }
        if let Some(ref password) = p.password {
            let _ = writeln!(out, "password = \"{password}\"");
        }
        if let Some(ref env) = p.password_env {
            let _ = writeln!(out, "password_env = \"{env}\"");
        }
        if let Some(ref token) = p.token {
            let _ = writeln!(out, "token = \"{token}\"");
        }
        if let Some(ref ca) = p.ca_cert {
            let _ = writeln!(out, "ca_cert = \"{}\"", ca.display());
        }
        if let Some(insecure) = p.insecure {
            let _ = writeln!(out, "insecure = {insecure}");
        }
        if let Some(timeout) = p.timeout {
            let _ = writeln!(out, "timeout = {timeout}");
        }
        if let Some(hours) = p.session_hours {
            let _ = writeln!(out, "session_hours = {hours}");
        }
    }

    out
}

fn save_config(cfg: &Config) -> Result<(), CliError> {
    config::save_config(cfg)?;
    Ok(())
}

/// Map a dialoguer / interactive I/O failure into CliError.
fn prompt_err(e: impl std::fmt::Display) -> CliError {
    CliError::Validation {
        field: "interactive".into(),
        reason: format!("prompt failed: {e}"),
    }
}

fn prompt_secret(prompt: &str, field: &str) -> Result<String, CliError> {
    let secret = rpassword::prompt_password(prompt).map_err(prompt_err)?;
    if secret.is_empty() {
        return Err(CliError::Validation {
            field: field.into(),
            reason: "value cannot be empty".into(),
        });
    }
    Ok(secret)
}

/// Offer to store a secret in the system keyring or return it for plaintext config.
///
/// Returns `Some(secret)` if the user chose plaintext, `None` if stored in keyring.
fn prompt_keyring_storage(
    secret: &str,
    profile_name: &str,
    kind: SecretKind,
) -> Result<Option<String>, CliError> {
    let choices = &[
        "Store in system keyring (recommended)",
        "Save to config file (plaintext)",
    ];
    let selection = Select::new()
        .with_prompt(format!("Where to store the {}?", kind.label()))
        .items(choices)
        .default(0)
        .interact()
        .map_err(prompt_err)?;

    if selection == 0 {
        kind.store(profile_name, secret)?;
        eprintln!("   ✓ {} stored in system keyring", kind.label());
        Ok(None)
    } else {
        Ok(Some(secret.to_owned()))
    }
}

#[derive(Clone, Copy)]
enum SecretKind {
    Password,
    Token,
}

impl SecretKind {
    fn label(self) -> &'static str {
        match self {
            Self::Password => "password",
            Self::Token => "token",
        }
    }

    fn store(self, profile_name: &str, secret: &str) -> Result<(), CliError> {
        match self {
            Self::Password => samsara_config::store_password(profile_name, secret)?,
            Self::Token => samsara_config::store_token(profile_name, secret)?,
        }
        Ok(())
    }
}

fn parse_flag<T: std::str::FromStr>(field: &str, value: &str, hint: &str) -> Result<T, CliError> {
    value.parse().map_err(|_| CliError::Validation {
        field: field.into(),
        reason: hint.into(),
    })
}

// ── Handler ─────────────────────────────────────────────────────────

#[allow(clippy::too_many_lines)]
pub fn handle(args: ConfigArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        // ── Init: interactive wizard ────────────────────────────────
        ConfigCommand::Init => {
            let config_path = config::config_path();
            eprintln!("samsara: configuration wizard");
            eprintln!("   Config path: {}\n", config_path.display());

            let profile_name: String = Input::new()
                .with_prompt("Profile name")
                .default("default".into())
                .interact_text()
                .map_err(prompt_err)?;

            let url: String = Input::new()
                .with_prompt("Record store URL")
                .default("http://127.0.0.1:8090".into())
                .validate_with(|raw: &String| {
                    samsara_config::parse_url(raw)
                        .map(|_| ())
                        .map_err(|e| e.to_string())
                })
                .interact_text()
                .map_err(prompt_err)?;

            let auth_choices = &[
                "Username/Password (recommended)",
                "Pre-issued token",
                "Anonymous (public collections only)",
            ];
            let auth_selection = Select::new()
                .with_prompt("Authentication method")
                .items(auth_choices)
                .default(0)
                .interact()
                .map_err(prompt_err)?;

            let (auth_mode, identity, password, token) = match auth_selection {
                0 => {
                    let identity: String = Input::new()
                        .with_prompt("Username or e-mail")
                        .interact_text()
                        .map_err(prompt_err)?;
                    let secret = prompt_secret("Password: ", "password")?;
                    let password =
                        prompt_keyring_storage(&secret, &profile_name, SecretKind::Password)?;
                    ("password", Some(identity), password, None)
                }
                1 => {
                    let secret = prompt_secret("Token: ", "token")?;
                    let token = prompt_keyring_storage(&secret, &profile_name, SecretKind::Token)?;
                    ("token", None, None, token)
                }
                _ => ("anonymous", None, None, None),
            };

            let profile = Profile {
                url,
                auth_mode: auth_mode.into(),
                identity,
                password,
                token,
                ..Profile::default()
            };

            // Other profiles in an existing file are kept.
            let mut cfg = config::load_config_or_default();
            cfg.profiles.insert(profile_name.clone(), profile);
            cfg.default_profile = Some(profile_name.clone());

            save_config(&cfg)?;

            eprintln!("\n✓ Configuration written to {}", config_path.display());
            eprintln!("  Active profile: {profile_name}");
            eprintln!("\n  Test it: samsara whoami");

            Ok(())
        }

        // ── Show ────────────────────────────────────────────────────
        ConfigCommand::Show => {
            let mut cfg = config::load_config_or_default();
            redact(&mut cfg);
            let out = match global.output {
                OutputFormat::Table | OutputFormat::Plain => format_config(&cfg),
                format => output::render_single(format, &cfg, |_| "config".into())?,
            };
            output::print_output(&out, global.quiet);
            Ok(())
        }

        // ── Set <key> <value> ───────────────────────────────────────
        ConfigCommand::Set { key, value } => {
            let mut cfg = config::load_config_or_default();
            let profile_name = config::active_profile_name(global, &cfg);
            let profile = cfg
                .profiles
                .entry(profile_name.clone())
                .or_insert_with(|| Profile {
                    auth_mode: "password".into(),
                    ..Profile::default()
                });

            match key.as_str() {
                "url" => {
                    samsara_config::parse_url(&value)?;
                    profile.url = value;
                }
                "auth_mode" | "auth-mode" => {
                    if !matches!(value.as_str(), "password" | "token" | "anonymous") {
                        return Err(CliError::Validation {
                            field: "auth_mode".into(),
                            reason: "must be 'password', 'token', or 'anonymous'".into(),
                        });
                    }
                    profile.auth_mode = value;
                }
                "identity" => profile.identity = Some(value),
                "password_env" | "password-env" => profile.password_env = Some(value),
                "ca_cert" | "ca-cert" => profile.ca_cert = Some(value.into()),
                "insecure" => {
                    profile.insecure =
                        Some(parse_flag("insecure", &value, "must be 'true' or 'false'")?);
                }
                "timeout" => {
                    profile.timeout =
                        Some(parse_flag("timeout", &value, "must be a number (seconds)")?);
                }
                "session_hours" | "session-hours" => {
                    profile.session_hours =
                        Some(parse_flag("session_hours", &value, "must be a number (hours)")?);
                }
                other => {
                    return Err(CliError::Validation {
                        field: other.into(),
                        reason: format!(
                            "unknown config key '{other}'. Valid keys: url, auth_mode, identity, \
                             password_env, ca_cert, insecure, timeout, session_hours"
                        ),
                    });
                }
            }

            save_config(&cfg)?;
            eprintln!("✓ Set {key} on profile '{profile_name}'");
            Ok(())
        }

        // ── Profiles ────────────────────────────────────────────────
        ConfigCommand::Profiles => {
            let cfg = config::load_config_or_default();
            let default = cfg.default_profile.as_deref().unwrap_or("default");
            if cfg.profiles.is_empty() {
                eprintln!("No profiles configured. Run: samsara config init");
            } else {
                let mut names: Vec<_> = cfg.profiles.keys().collect();
                names.sort();
                for name in names {
                    let marker = if name == default { " *" } else { "" };
                    println!("{name}{marker}");
                }
            }
            Ok(())
        }

        // ── Use <name> ─────────────────────────────────────────────
        ConfigCommand::Use { name } => {
            let mut cfg = config::load_config_or_default();

            if !cfg.profiles.contains_key(&name) {
                return Err(CliError::ProfileNotFound {
                    name,
                    available: config::available_profiles(&cfg),
                });
            }

            cfg.default_profile = Some(name.clone());
            save_config(&cfg)?;
            eprintln!("✓ Default profile set to '{name}'");
            Ok(())
        }

        // ── SetPassword ─────────────────────────────────────────────
        ConfigCommand::SetPassword => {
            let cfg = config::load_config_or_default();
            let profile_name = config::active_profile_name(global, &cfg);

            let profile = cfg
                .profiles
                .get(&profile_name)
                .ok_or_else(|| CliError::ProfileNotFound {
                    name: profile_name.clone(),
                    available: config::available_profiles(&cfg),
                })?;

            let kind = match profile.auth_mode.as_str() {
                "token" => SecretKind::Token,
                "anonymous" => {
                    return Err(CliError::Validation {
                        field: "auth_mode".into(),
                        reason: format!("profile '{profile_name}' is anonymous and has no secret"),
                    });
                }
                _ => SecretKind::Password,
            };
            let prompt = match kind {
                SecretKind::Password => "Password: ",
                SecretKind::Token => "Token: ",
            };
            let secret = prompt_secret(prompt, kind.label())?;
            kind.store(&profile_name, &secret)?;

            eprintln!(
                "✓ {} stored in system keyring for profile '{profile_name}'",
                kind.label()
            );
            Ok(())
        }
    }
}
