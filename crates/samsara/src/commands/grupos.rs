//! Equipment group command handlers.

use samsara_core::Samsara;
use samsara_core::model::{GrupoUpdate, NewGrupo};

use crate::cli::{GlobalOpts, GruposArgs, GruposCommand};
use crate::error::CliError;

use super::util;

pub async fn handle(
    samsara: &Samsara,
    args: GruposArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let repo = samsara.equipamento_grupos();
    match args.command {
        GruposCommand::List(list) => {
            let rows = util::fetch_rows(&list, |q| repo.list(q)).await?;
            util::print_rows(&rows, global, |r| r.id.clone())
        }

        GruposCommand::Get { id } => {
            let grupo = repo.get(&id).await?;
            util::print_record(&grupo, global, |g| g.id.clone())
        }

        GruposCommand::Create(body) => {
            let body: NewGrupo = util::read_body(&body)?;
            let grupo = repo.create(&body).await?;
            util::notice(global, &format!("Group '{}' created", grupo.grupo_nome));
            util::print_record(&grupo, global, |g| g.id.clone())
        }

        GruposCommand::Update(args) => {
            let body: GrupoUpdate = util::read_body(&args.body)?;
            let grupo = repo.update(&args.id, &body).await?;
            util::print_record(&grupo, global, |g| g.id.clone())
        }
    }
}
