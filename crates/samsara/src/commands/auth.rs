//! Session commands: login, whoami, reset-password.

use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;

use samsara_core::{Samsara, Session, TipoAcesso};

use crate::cli::GlobalOpts;
use crate::config::{self, Profile};
use crate::error::CliError;
use crate::output;

use super::util;

/// What `whoami` and `login` print about a session. The token stays out.
#[derive(Debug, Serialize)]
struct SessionView {
    user_id: String,
    username: String,
    nome_completo: String,
    tipo_acesso: TipoAcesso,
    expires_at: String,
}

impl From<&Session> for SessionView {
    fn from(session: &Session) -> Self {
        Self {
            user_id: session.user_id.clone(),
            username: session.username.clone(),
            nome_completo: session.nome_completo.clone(),
            tipo_acesso: session.tipo_acesso,
            expires_at: session
                .expires_at()
                .map(|at| at.to_rfc3339())
                .unwrap_or_default(),
        }
    }
}

fn prompt_err(e: impl std::fmt::Display) -> CliError {
    CliError::Validation {
        field: "interactive".into(),
        reason: format!("prompt failed: {e}"),
    }
}

fn print_session(session: &Session, global: &GlobalOpts) -> Result<(), CliError> {
    util::print_record(&SessionView::from(session), global, |s| s.username.clone())
}

/// Log in, then remember the identity on the profile and the password in
/// the keyring unless `no_save`.
pub async fn login(
    user: Option<String>,
    no_save: bool,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let (store_config, profile_name, known_identity) =
        config::build_unauthenticated_config(global)?;
    let identity = user.or(known_identity).ok_or_else(|| CliError::Validation {
        field: "identity".into(),
        reason: "pass a username or e-mail, or set --identity".into(),
    })?;

    let password = match global.password {
        Some(ref password) => SecretString::from(password.clone()),
        None => SecretString::from(rpassword::prompt_password("Password: ").map_err(prompt_err)?),
    };

    let url = store_config.url.to_string();
    let samsara = Samsara::new(store_config)?;
    let session = util::with_spinner("Logging in", global, samsara.login(&identity, &password))
        .await?;

    if !no_save {
        samsara_config::store_password(&profile_name, password.expose_secret())?;

        let mut cfg = config::load_config_or_default();
        let profile = cfg
            .profiles
            .entry(profile_name.clone())
            .or_insert_with(|| Profile {
                url,
                ..Profile::default()
            });
        profile.auth_mode = "password".into();
        profile.identity = Some(identity);
        profile.password = None;
        let path = config::save_config(&cfg)?;
        tracing::debug!(path = %path.display(), profile = %profile_name, "profile saved");
        util::notice(
            global,
            &format!("✓ Password stored in system keyring for profile '{profile_name}'"),
        );
    }

    util::notice(
        global,
        &format!("Logged in as {} ({})", session.username, session.tipo_acesso),
    );
    print_session(&session, global)
}

/// Show the session behind the configured credentials.
pub async fn whoami(samsara: &Samsara, global: &GlobalOpts) -> Result<(), CliError> {
    match samsara.session().await {
        Some(session) => print_session(&session, global),
        None => {
            output::print_output("anonymous", global.quiet);
            Ok(())
        }
    }
}

pub async fn reset_password(email: &str, global: &GlobalOpts) -> Result<(), CliError> {
    let (store_config, _, _) = config::build_unauthenticated_config(global)?;
    let samsara = Samsara::new(store_config)?;
    samsara.request_password_reset(email).await?;
    util::notice(global, &format!("Password reset link sent to {email}"));
    Ok(())
}
