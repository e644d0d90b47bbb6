//! Operator command handlers.

use samsara_core::Samsara;
use samsara_core::model::{NewOperador, OperadorUpdate};

use crate::cli::{GlobalOpts, OperadoresArgs, OperadoresCommand};
use crate::error::CliError;

use super::{state, util};

pub async fn handle(
    samsara: &Samsara,
    args: OperadoresArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let operadores = samsara.operadores();
    match args.command {
        OperadoresCommand::List(list) => {
            let rows = util::fetch_rows(&list, |q| operadores.list(q)).await?;
            util::print_rows(&rows, global, |r| r.id.clone())
        }

        OperadoresCommand::Get { id } => {
            let operador = operadores.get(&id).await?;
            util::print_record(&operador, global, |o| o.id.clone())
        }

        OperadoresCommand::Create(body) => {
            let body: NewOperador = util::read_body(&body)?;
            let operador =
                util::with_spinner("Creating operator", global, operadores.create(&body)).await?;
            util::notice(
                global,
                &format!("Operator '{}' created", operador.nome_completo),
            );
            util::print_record(&operador, global, |o| o.id.clone())
        }

        OperadoresCommand::Update(args) => {
            let body: OperadorUpdate = util::read_body(&args.body)?;
            let operador = util::with_spinner(
                "Updating operator",
                global,
                operadores.update(&args.id, &body),
            )
            .await?;
            util::print_record(&operador, global, |o| o.id.clone())
        }

        OperadoresCommand::Reconcile { id } => {
            let operador = operadores.reconcile(&id).await?;
            util::notice(global, &format!("Operator {id} reconciled"));
            util::print_record(&operador, global, |o| o.id.clone())
        }

        OperadoresCommand::State(cmd) => state::handle(operadores.repo(), cmd, global).await,
    }
}
