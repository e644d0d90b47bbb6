//! Work log command handlers.

use samsara_core::Samsara;
use samsara_core::model::{BoletimUpdate, NewBoletim};

use crate::cli::{BoletinsArgs, BoletinsCommand, GlobalOpts};
use crate::error::CliError;

use super::util;

pub async fn handle(
    samsara: &Samsara,
    args: BoletinsArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let boletins = samsara.boletins();
    match args.command {
        BoletinsCommand::List(list) => {
            let rows = util::fetch_rows(&list, |q| boletins.list(q)).await?;
            util::print_rows(&rows, global, |r| r.id.clone())
        }

        BoletinsCommand::Get { id } => {
            let boletim = boletins.get(&id).await?;
            util::print_record(&boletim, global, |b| b.id.clone())
        }

        BoletinsCommand::Create(body) => {
            let body: NewBoletim = util::read_body(&body)?;
            let boletim =
                util::with_spinner("Creating work log", global, boletins.create(&body)).await?;
            util::notice(global, &format!("Work log '{}' created", boletim.codigo));
            util::print_record(&boletim, global, |b| b.id.clone())
        }

        BoletinsCommand::Update(args) => {
            let body: BoletimUpdate = util::read_body(&args.body)?;
            let boletim =
                util::with_spinner("Updating work log", global, boletins.update(&args.id, &body))
                    .await?;
            util::print_record(&boletim, global, |b| b.id.clone())
        }

        BoletinsCommand::Reconcile { id } => {
            let boletim = boletins.reconcile(&id).await?;
            util::notice(global, &format!("Work log {id} reconciled"));
            util::print_record(&boletim, global, |b| b.id.clone())
        }
    }
}
