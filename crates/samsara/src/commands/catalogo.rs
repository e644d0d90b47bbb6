//! Operation and work order code table handlers.

use serde::Serialize;

use samsara_core::model::{CatalogoEntry, CatalogoRow, CatalogoUpdate};
use samsara_core::service::Catalogo;
use samsara_core::{Coded, CreateOutcome, Deletable, Listed};

use crate::cli::{CatalogoArgs, CatalogoCommand, GlobalOpts};
use crate::error::CliError;

use super::util;

pub async fn handle<E>(
    catalogo: Catalogo<'_, E>,
    args: CatalogoArgs,
    global: &GlobalOpts,
) -> Result<(), CliError>
where
    E: Coded + Deletable + Listed<Row = CatalogoRow> + Serialize,
{
    match args.command {
        CatalogoCommand::List(list) => {
            let rows = util::fetch_rows(&list, |q| catalogo.list(q)).await?;
            util::print_rows(&rows, global, |r| r.id.clone())
        }

        CatalogoCommand::Get { id } => {
            let entry = catalogo.get(&id).await?;
            util::print_record(&entry, global, |e| e.id().to_owned())
        }

        CatalogoCommand::Create { codigo, descricao } => {
            let body = CatalogoEntry { codigo, descricao };
            match catalogo.create(&body).await? {
                CreateOutcome::Created(entry) => {
                    util::notice(global, &format!("Code '{}' created", entry.codigo()));
                    util::print_record(&entry, global, |e| e.id().to_owned())
                }
                CreateOutcome::Conflict(duplicate) => Err(CliError::Conflict {
                    resource_type: E::LABEL.into(),
                    message: duplicate.to_string(),
                }),
            }
        }

        CatalogoCommand::Update { id, descricao } => {
            let body = CatalogoUpdate {
                descricao: Some(descricao),
            };
            let entry = catalogo.update(&id, &body).await?;
            util::print_record(&entry, global, |e| e.id().to_owned())
        }

        CatalogoCommand::Delete { id } => {
            if !util::confirm(&format!("Delete {} {id}?", E::LABEL), global)? {
                return Ok(());
            }
            catalogo.delete(&id).await?;
            util::notice(global, &format!("Deleted {} {id}", E::LABEL));
            Ok(())
        }
    }
}
