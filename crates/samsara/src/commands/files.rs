//! Attachment handlers, shared by equipment and fines.

use samsara_core::{Entity, Repo};

use crate::cli::{FilesArgs, FilesCommand, GlobalOpts};
use crate::error::CliError;

use super::util;

pub async fn handle<E: Entity>(
    repo: Repo<'_, E>,
    args: FilesArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        FilesCommand::List { id } => {
            let files = repo.attachments(&id).await?;
            util::print_rows(&files, global, |f| f.id.clone())
        }

        FilesCommand::Upload { id, path } => {
            let file = util::with_spinner(
                &format!("Uploading {}", path.display()),
                global,
                repo.attach(&id, &path),
            )
            .await?;
            util::notice(global, &format!("Attached {} to {} {id}", file.file, E::LABEL));
            util::print_record(&file, global, |f| f.id.clone())
        }

        FilesCommand::Delete { file_id } => {
            if !util::confirm(&format!("Delete attachment '{file_id}'?"), global)? {
                return Ok(());
            }
            repo.detach(&file_id).await?;
            util::notice(global, "Attachment deleted");
            Ok(())
        }

        FilesCommand::Url { id } => {
            let urls = repo
                .attachments(&id)
                .await?
                .iter()
                .map(|f| repo.attachment_url(f).map(|u| u.to_string()))
                .collect::<Result<Vec<_>, _>>()?;
            crate::output::print_output(&urls.join("\n"), global.quiet);
            Ok(())
        }
    }
}
