//! Shared helpers for command handlers.

use std::future::Future;
use std::io::{IsTerminal, Read};
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use serde::de::DeserializeOwned;

use samsara_core::{Filter, ListQuery, ListResult, Sort};

use crate::cli::{BodyArgs, GlobalOpts, ListArgs};
use crate::error::CliError;
use crate::output;

/// Store's page size ceiling.
const MAX_PER_PAGE: u32 = 500;

/// Translate list flags into a store query.
pub fn list_query(args: &ListArgs) -> Result<ListQuery, CliError> {
    let mut query = ListQuery::new()
        .page(args.page.max(1))
        .per_page(args.limit.clamp(1, MAX_PER_PAGE));
    if let Some(ref raw) = args.sort {
        let sort = Sort::parse(raw).ok_or_else(|| CliError::Validation {
            field: "sort".into(),
            reason: format!("cannot parse '{raw}' (expected e.g. \"-data,+codigo\")"),
        })?;
        query = query.sort(sort);
    }
    if let Some(ref expr) = args.filter {
        query = query.filter(Filter::raw(expr.clone()));
    }
    Ok(query)
}

/// Fetch one page, or every page with `--all`.
pub async fn fetch_rows<R, F, Fut>(args: &ListArgs, fetch: F) -> Result<Vec<R>, CliError>
where
    F: Fn(ListQuery) -> Fut,
    Fut: Future<Output = Result<ListResult<R>, samsara_core::CoreError>>,
{
    let query = list_query(args)?;
    if !args.all {
        return Ok(fetch(query).await?.items);
    }

    let mut rows = Vec::new();
    let mut page = 1;
    loop {
        let result = fetch(query.clone().page(page)).await?;
        let last = result.is_last();
        rows.extend(result.items);
        if last {
            return Ok(rows);
        }
        page += 1;
    }
}

/// Decode a write body from `--from-file` or `--data`.
pub fn read_body<T: DeserializeOwned>(args: &BodyArgs) -> Result<T, CliError> {
    let text = match (&args.from_file, &args.data) {
        (Some(path), _) if path.as_os_str() == "-" => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            buf
        }
        (Some(path), _) => std::fs::read_to_string(path)?,
        (None, Some(inline)) => inline.clone(),
        (None, None) => {
            return Err(CliError::Validation {
                field: "body".into(),
                reason: "pass --from-file or --data".into(),
            });
        }
    };
    Ok(serde_json::from_str(&text)?)
}

/// Prompt for confirmation, auto-approving if `--yes` was passed.
pub fn confirm(message: &str, global: &GlobalOpts) -> Result<bool, CliError> {
    if global.yes {
        return Ok(true);
    }
    if !std::io::stdin().is_terminal() {
        return Err(CliError::NonInteractiveRequiresYes {
            action: message.into(),
        });
    }
    let confirmed = dialoguer::Confirm::new()
        .with_prompt(message)
        .default(false)
        .interact()
        .map_err(|e| CliError::Io(std::io::Error::other(e)))?;
    Ok(confirmed)
}

/// Run a multi-request chain behind a spinner on interactive terminals.
pub async fn with_spinner<T, Fut>(message: &str, global: &GlobalOpts, work: Fut) -> T
where
    Fut: Future<Output = T>,
{
    if global.quiet || !std::io::stderr().is_terminal() {
        return work.await;
    }
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::with_template("{spinner} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.set_message(message.to_owned());
    spinner.enable_steady_tick(Duration::from_millis(100));
    let result = work.await;
    spinner.finish_and_clear();
    result
}

/// Render and print one record.
pub fn print_record<T: Serialize>(
    record: &T,
    global: &GlobalOpts,
    id_fn: impl Fn(&T) -> String,
) -> Result<(), CliError> {
    let out = output::render_single(global.output, record, id_fn)?;
    output::print_output(&out, global.quiet);
    Ok(())
}

/// Render and print list rows with the generic table.
pub fn print_rows<T: Serialize>(
    rows: &[T],
    global: &GlobalOpts,
    id_fn: impl Fn(&T) -> String,
) -> Result<(), CliError> {
    let out = output::render_list(global.output, rows, id_fn)?;
    output::print_output(&out, global.quiet);
    Ok(())
}

/// Status line on stderr, unless `--quiet`.
pub fn notice(global: &GlobalOpts, message: &str) {
    if !global.quiet {
        eprintln!("{message}");
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn list_args(sort: Option<&str>) -> ListArgs {
        ListArgs {
            page: 0,
            limit: 10_000,
            all: false,
            filter: Some("inativo=false".into()),
            sort: sort.map(Into::into),
        }
    }

    #[test]
    fn list_query_clamps_and_parses() {
        let query = list_query(&list_args(Some("-data,+codigo"))).unwrap();
        assert_eq!(query.page, 1);
        assert_eq!(query.per_page, MAX_PER_PAGE);
        assert!(query.sort.is_some());
        assert!(query.filter.is_some());
    }

    #[test]
    fn inline_body_decodes() {
        let args = BodyArgs {
            from_file: None,
            data: Some(r#"{"codigo":"OS-1","descricao":"Troca de óleo"}"#.into()),
        };
        let entry: samsara_core::model::CatalogoEntry = read_body(&args).unwrap();
        assert_eq!(entry.codigo, "OS-1");
    }

    #[test]
    fn body_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("body.json");
        std::fs::write(&path, r#"{"descricao":"Lavagem"}"#).unwrap();
        let args = BodyArgs {
            from_file: Some(path),
            data: None,
        };
        let update: samsara_core::model::CatalogoUpdate = read_body(&args).unwrap();
        assert_eq!(update.descricao.as_deref(), Some("Lavagem"));
    }
}
