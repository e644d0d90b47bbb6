//! User command handlers.

use samsara_core::Samsara;
use samsara_core::model::{NewUsuario, UsuarioUpdate};

use crate::cli::{GlobalOpts, UsuariosArgs, UsuariosCommand};
use crate::error::CliError;

use super::util;

/// Map an rpassword / interactive I/O failure into CliError.
fn prompt_err(e: impl std::fmt::Display) -> CliError {
    CliError::Validation {
        field: "interactive".into(),
        reason: format!("prompt failed: {e}"),
    }
}

pub async fn handle(
    samsara: &Samsara,
    args: UsuariosArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let usuarios = samsara.usuarios();
    match args.command {
        UsuariosCommand::List(list) => {
            let rows = util::fetch_rows(&list, |q| usuarios.list(q)).await?;
            util::print_rows(&rows, global, |r| r.username.clone())
        }

        UsuariosCommand::Get { id } => {
            let usuario = usuarios.get(&id).await?;
            util::print_record(&usuario, global, |u| u.id.clone())
        }

        UsuariosCommand::Create(body) => {
            let mut body: NewUsuario = util::read_body(&body)?;
            // Keep passwords out of files and shell history when possible.
            if body.password.is_empty() {
                body.password = rpassword::prompt_password("Password: ").map_err(prompt_err)?;
                body.password_confirm =
                    rpassword::prompt_password("Confirm password: ").map_err(prompt_err)?;
            }
            let usuario = usuarios.create(&body).await?;
            util::notice(global, &format!("User '{}' created", usuario.username));
            util::print_record(&usuario, global, |u| u.id.clone())
        }

        UsuariosCommand::Update(args) => {
            let body: UsuarioUpdate = util::read_body(&args.body)?;
            let usuario = usuarios.update(&args.id, &body).await?;
            util::print_record(&usuario, global, |u| u.id.clone())
        }

        UsuariosCommand::Reconcile { id } => {
            let usuario = usuarios.reconcile(&id).await?;
            util::notice(global, &format!("User {id} reconciled"));
            util::print_record(&usuario, global, |u| u.id.clone())
        }
    }
}
