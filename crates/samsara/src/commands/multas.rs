//! Traffic fine command handlers.

use samsara_core::Samsara;
use samsara_core::model::{MultaUpdate, NewMulta};

use crate::cli::{GlobalOpts, MultasArgs, MultasCommand};
use crate::error::CliError;

use super::{files, state, util};

pub async fn handle(
    samsara: &Samsara,
    args: MultasArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let multas = samsara.multas();
    match args.command {
        MultasCommand::List(list) => {
            let rows = util::fetch_rows(&list, |q| multas.list(q)).await?;
            util::print_rows(&rows, global, |r| r.id.clone())
        }

        MultasCommand::Get { id } => {
            let multa = multas.get(&id).await?;
            util::print_record(&multa, global, |m| m.id.clone())
        }

        MultasCommand::Create(body) => {
            let body: NewMulta = util::read_body(&body)?;
            let multa = multas.create(&body).await?;
            util::notice(
                global,
                &format!("Fine {} recorded for {}", multa.codigo_infracao, multa.equipamento_x),
            );
            util::print_record(&multa, global, |m| m.id.clone())
        }

        MultasCommand::Update(args) => {
            let body: MultaUpdate = util::read_body(&args.body)?;
            let multa = multas.update(&args.id, &body).await?;
            util::print_record(&multa, global, |m| m.id.clone())
        }

        MultasCommand::Reconcile { id } => {
            let multa = multas.reconcile(&id).await?;
            util::notice(global, &format!("Fine {id} reconciled"));
            util::print_record(&multa, global, |m| m.id.clone())
        }

        MultasCommand::State(cmd) => state::handle(multas.repo(), cmd, global).await,

        MultasCommand::Files(args) => files::handle(multas.repo(), args, global).await,
    }
}
