//! Deactivate / reactivate / toggle for every soft-deletable collection.

use serde::Serialize;

use samsara_core::{Repo, SoftDeletable};

use crate::cli::{GlobalOpts, StateCommand};
use crate::error::CliError;

use super::util;

pub async fn handle<E>(
    repo: Repo<'_, E>,
    cmd: StateCommand,
    global: &GlobalOpts,
) -> Result<(), CliError>
where
    E: SoftDeletable + Serialize,
{
    let record = match cmd {
        StateCommand::Deactivate(args) => repo.deactivate(&args.id, args.reason.as_deref()).await?,
        StateCommand::Reactivate { id } => repo.reactivate(&id).await?,
        StateCommand::Toggle(args) => repo.toggle(&args.id, args.reason.as_deref()).await?,
    };

    let state = if record.activation().is_active() {
        "active"
    } else {
        "inactive"
    };
    util::notice(global, &format!("{} {} is now {state}", E::LABEL, record.id()));
    util::print_record(&record, global, |r| r.id().to_owned())
}
