//! Maintenance command handlers.

use samsara_core::Samsara;
use samsara_core::model::{ManutencaoUpdate, NewManutencao};

use crate::cli::{GlobalOpts, ManutencoesArgs, ManutencoesCommand};
use crate::error::CliError;

use super::util;

pub async fn handle(
    samsara: &Samsara,
    args: ManutencoesArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let manutencoes = samsara.manutencoes();
    match args.command {
        ManutencoesCommand::List(list) => {
            let rows = util::fetch_rows(&list, |q| manutencoes.list(q)).await?;
            util::print_rows(&rows, global, |r| r.id.clone())
        }

        ManutencoesCommand::Get { id } => {
            let manutencao = manutencoes.get(&id).await?;
            util::print_record(&manutencao, global, |m| m.id.clone())
        }

        ManutencoesCommand::Create(body) => {
            let body: NewManutencao = util::read_body(&body)?;
            let manutencao = util::with_spinner(
                "Recording maintenance",
                global,
                manutencoes.create(&body),
            )
            .await?;
            if manutencao.is_revisao() {
                util::notice(
                    global,
                    &format!("Revision window of {} restarted", manutencao.equipamento_x),
                );
            }
            util::print_record(&manutencao, global, |m| m.id.clone())
        }

        ManutencoesCommand::Update(args) => {
            let body: ManutencaoUpdate = util::read_body(&args.body)?;
            let manutencao = manutencoes.update(&args.id, &body).await?;
            util::print_record(&manutencao, global, |m| m.id.clone())
        }

        ManutencoesCommand::Reconcile { id } => {
            let manutencao = manutencoes.reconcile(&id).await?;
            util::notice(global, &format!("Maintenance {id} reconciled"));
            util::print_record(&manutencao, global, |m| m.id.clone())
        }

        ManutencoesCommand::Reapply { id } => {
            let equipamento =
                util::with_spinner("Reapplying reading", global, manutencoes.reapply(&id)).await?;
            util::notice(
                global,
                &format!("Reading of maintenance {id} applied to {}", equipamento.codigo),
            );
            util::print_record(&equipamento, global, |e| e.id.clone())
        }
    }
}
