//! Site command handlers.

use samsara_core::Samsara;
use samsara_core::model::{NewObra, ObraUpdate};

use crate::cli::{GlobalOpts, ObrasArgs, ObrasCommand};
use crate::error::CliError;

use super::{state, util};

pub async fn handle(
    samsara: &Samsara,
    args: ObrasArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let repo = samsara.obras();
    match args.command {
        ObrasCommand::List(list) => {
            let rows = util::fetch_rows(&list, |q| repo.list(q)).await?;
            util::print_rows(&rows, global, |r| r.id.clone())
        }

        ObrasCommand::Get { id } => {
            let obra = repo.get(&id).await?;
            util::print_record(&obra, global, |o| o.id.clone())
        }

        ObrasCommand::Create(body) => {
            let body: NewObra = util::read_body(&body)?;
            let obra = repo.create(&body).await?;
            util::notice(global, &format!("Obra '{}' created", obra.nome));
            util::print_record(&obra, global, |o| o.id.clone())
        }

        ObrasCommand::Update(args) => {
            let body: ObraUpdate = util::read_body(&args.body)?;
            let obra = repo.update(&args.id, &body).await?;
            util::print_record(&obra, global, |o| o.id.clone())
        }

        ObrasCommand::State(cmd) => state::handle(repo, cmd, global).await,
    }
}
