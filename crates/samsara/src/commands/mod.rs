//! Command dispatch: bridges CLI args -> core accessors -> output formatting.

pub mod auth;
pub mod boletins;
pub mod catalogo;
pub mod config_cmd;
pub mod equipamentos;
pub mod files;
pub mod grupos;
pub mod manutencoes;
pub mod multas;
pub mod obras;
pub mod operadores;
pub mod state;
pub mod tipos;
pub mod usuarios;
pub mod util;

use samsara_core::{Area, Samsara};

use crate::cli::{Command, GlobalOpts};
use crate::error::CliError;

/// Back-office area a command belongs to, for the access check.
fn area_of(cmd: &Command) -> Option<Area> {
    Some(match cmd {
        Command::Obras(_) => Area::Obras,
        Command::Usuarios(_) => Area::Usuarios,
        Command::Operadores(_) => Area::Operadores,
        Command::Equipamentos(_) => Area::Equipamentos,
        Command::Tipos(_) | Command::Grupos(_) => Area::Tipos,
        Command::Manutencoes(_) => Area::Manutencoes,
        Command::Boletins(_) => Area::Boletins,
        Command::Multas(_) => Area::Multas,
        Command::Operacoes(_) | Command::OrdensServico(_) => Area::Catalogo,
        Command::Whoami
        | Command::Login { .. }
        | Command::ResetPassword { .. }
        | Command::Config(_)
        | Command::Completions(_) => return None,
    })
}

/// Dispatch a store-bound command to the appropriate handler.
///
/// `samsara` is already connected; the command's area is checked against
/// the session's access profile first.
pub async fn dispatch(
    cmd: Command,
    samsara: &Samsara,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    if let Some(area) = area_of(&cmd) {
        samsara.authorize(area).await?;
    }

    match cmd {
        Command::Obras(args) => obras::handle(samsara, args, global).await,
        Command::Usuarios(args) => usuarios::handle(samsara, args, global).await,
        Command::Operadores(args) => operadores::handle(samsara, args, global).await,
        Command::Equipamentos(args) => equipamentos::handle(samsara, args, global).await,
        Command::Tipos(args) => tipos::handle(samsara, args, global).await,
        Command::Grupos(args) => grupos::handle(samsara, args, global).await,
        Command::Manutencoes(args) => manutencoes::handle(samsara, args, global).await,
        Command::Boletins(args) => boletins::handle(samsara, args, global).await,
        Command::Multas(args) => multas::handle(samsara, args, global).await,
        Command::Operacoes(args) => catalogo::handle(samsara.operacoes(), args, global).await,
        Command::OrdensServico(args) => {
            catalogo::handle(samsara.ordens_servico(), args, global).await
        }
        Command::Whoami => auth::whoami(samsara, global).await,
        // Handled before a connection is opened
        Command::Login { .. }
        | Command::ResetPassword { .. }
        | Command::Config(_)
        | Command::Completions(_) => unreachable!(),
    }
}
