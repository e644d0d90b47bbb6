//! Equipment type command handlers.

use samsara_core::Samsara;
use samsara_core::model::{EquipamentoTipoUpdate, NewEquipamentoTipo};

use crate::cli::{GlobalOpts, TiposArgs, TiposCommand};
use crate::error::CliError;

use super::{state, util};

pub async fn handle(
    samsara: &Samsara,
    args: TiposArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let tipos = samsara.equipamento_tipos();
    match args.command {
        TiposCommand::List(list) => {
            let rows = util::fetch_rows(&list, |q| tipos.list(q)).await?;
            util::print_rows(&rows, global, |r| r.id.clone())
        }

        TiposCommand::Get { id } => {
            let tipo = tipos.get(&id).await?;
            util::print_record(&tipo, global, |t| t.id.clone())
        }

        TiposCommand::Create(body) => {
            let body: NewEquipamentoTipo = util::read_body(&body)?;
            let tipo = tipos.create(&body).await?;
            util::notice(global, &format!("Type '{}' created", tipo.tipo_nome));
            util::print_record(&tipo, global, |t| t.id.clone())
        }

        TiposCommand::Update(args) => {
            let body: EquipamentoTipoUpdate = util::read_body(&args.body)?;
            let tipo = tipos.update(&args.id, &body).await?;
            util::print_record(&tipo, global, |t| t.id.clone())
        }

        TiposCommand::Reconcile { id } => {
            let tipo = tipos.reconcile(&id).await?;
            util::notice(global, &format!("Type {id} reconciled"));
            util::print_record(&tipo, global, |t| t.id.clone())
        }

        TiposCommand::State(cmd) => state::handle(tipos.repo(), cmd, global).await,
    }
}
