//! Output formatting: table, JSON, YAML, CSV, plain.
//!
//! Renders data in the format selected by `--output`. List rows from the
//! core are flat serde structs, so `csv` serializes them in field order and
//! the generic table is built from those records. Commands that want
//! colored cells pass their own `Tabled` rows instead.

use std::io::{self, IsTerminal, Write};

use owo_colors::OwoColorize;
use serde::Serialize;
use serde_json::Value;
use tabled::{Table, Tabled, builder::Builder, settings::Style};

use samsara_core::RevisionLevel;

use crate::cli::{ColorMode, OutputFormat};
use crate::error::CliError;

// ── Color helpers ────────────────────────────────────────────────────

/// Determine whether color output should be enabled.
pub fn should_color(mode: ColorMode) -> bool {
    match mode {
        ColorMode::Always => true,
        ColorMode::Never => false,
        ColorMode::Auto => io::stdout().is_terminal() && std::env::var("NO_COLOR").is_err(),
    }
}

/// Revision urgency label: red when overdue, yellow when due soon.
pub fn paint_level(level: Option<RevisionLevel>, color: bool) -> String {
    let Some(level) = level else {
        return String::new();
    };
    let label = level.to_string();
    if !color {
        return label;
    }
    match level {
        RevisionLevel::Overdue => label.red().bold().to_string(),
        RevisionLevel::DueSoon => label.yellow().to_string(),
        RevisionLevel::Ok => label.green().to_string(),
    }
}

// ── Render dispatchers ───────────────────────────────────────────────

/// Render a list of flat serde rows in the chosen format.
///
/// - `table`: columns in field order, headers from field names
/// - `json` / `json-compact` / `yaml`: the rows as-is
/// - `csv`: header row plus one line per row
/// - `plain`: calls `id_fn` on each item to emit one identifier per line
pub fn render_list<T: Serialize>(
    format: OutputFormat,
    data: &[T],
    id_fn: impl Fn(&T) -> String,
) -> Result<String, CliError> {
    match format {
        OutputFormat::Table => render_table(data),
        _ => render_structured(format, data, id_fn),
    }
}

/// Like [`render_list`], but the table view uses hand-built `Tabled` rows.
pub fn render_list_with<T, R>(
    format: OutputFormat,
    data: &[T],
    to_row: impl Fn(&T) -> R,
    id_fn: impl Fn(&T) -> String,
) -> Result<String, CliError>
where
    T: Serialize,
    R: Tabled,
{
    match format {
        OutputFormat::Table => {
            let rows: Vec<R> = data.iter().map(to_row).collect();
            Ok(Table::new(rows).with(Style::rounded()).to_string())
        }
        _ => render_structured(format, data, id_fn),
    }
}

/// Render a single record.
///
/// Table and CSV show one `field, value` pair per line; nested values are
/// shown as compact JSON.
pub fn render_single<T: Serialize>(
    format: OutputFormat,
    data: &T,
    id_fn: impl Fn(&T) -> String,
) -> Result<String, CliError> {
    match format {
        OutputFormat::Table => {
            let mut builder = Builder::default();
            for (field, value) in fields(data)? {
                builder.push_record([field, value]);
            }
            Ok(builder.build().with(Style::rounded()).to_string())
        }
        OutputFormat::Csv => {
            let mut writer = csv::Writer::from_writer(Vec::new());
            writer.write_record(["field", "value"])?;
            for (field, value) in fields(data)? {
                writer.write_record([field, value])?;
            }
            csv_string(writer)
        }
        OutputFormat::Json => Ok(serde_json::to_string_pretty(data)?),
        OutputFormat::JsonCompact => Ok(serde_json::to_string(data)?),
        OutputFormat::Yaml => Ok(serde_yaml::to_string(data)?),
        OutputFormat::Plain => Ok(id_fn(data)),
    }
}

/// Print the rendered output to stdout, respecting quiet mode.
pub fn print_output(output: &str, quiet: bool) {
    if quiet || output.is_empty() {
        return;
    }
    let mut stdout = io::stdout().lock();
    let _ = writeln!(stdout, "{output}");
}

// ── Format-specific renderers ────────────────────────────────────────

fn render_structured<T: Serialize>(
    format: OutputFormat,
    data: &[T],
    id_fn: impl Fn(&T) -> String,
) -> Result<String, CliError> {
    match format {
        OutputFormat::Table | OutputFormat::Json => Ok(serde_json::to_string_pretty(data)?),
        OutputFormat::JsonCompact => Ok(serde_json::to_string(data)?),
        OutputFormat::Yaml => Ok(serde_yaml::to_string(data)?),
        OutputFormat::Csv => render_csv(data),
        OutputFormat::Plain => Ok(data.iter().map(id_fn).collect::<Vec<_>>().join("\n")),
    }
}

/// Header row from the first record's field names, then one row each.
pub fn render_csv<T: Serialize>(data: &[T]) -> Result<String, CliError> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    for row in data {
        writer.serialize(row)?;
    }
    csv_string(writer)
}

fn csv_string(writer: csv::Writer<Vec<u8>>) -> Result<String, CliError> {
    let bytes = writer
        .into_inner()
        .map_err(|e| CliError::Io(e.into_error()))?;
    String::from_utf8(bytes).map_err(|e| CliError::Validation {
        field: "output".into(),
        reason: e.to_string(),
    })
}

fn render_table<T: Serialize>(data: &[T]) -> Result<String, CliError> {
    if data.is_empty() {
        return Ok(String::new());
    }
    let text = render_csv(data)?;
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .from_reader(text.as_bytes());

    let mut builder = Builder::default();
    for (n, record) in reader.records().enumerate() {
        let record = record?;
        if n == 0 {
            builder.push_record(record.iter().map(header));
        } else {
            builder.push_record(record.iter().map(str::to_owned));
        }
    }
    Ok(builder.build().with(Style::rounded()).to_string())
}

/// `revisao_status` -> `Revisao Status`.
fn header(field: &str) -> String {
    field
        .split('_')
        .filter(|part| !part.is_empty())
        .map(|part| {
            let mut chars = part.chars();
            chars.next().map_or_else(String::new, |first| {
                first.to_uppercase().chain(chars).collect::<String>()
            })
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Top-level `(field, value)` pairs of a serialized record.
fn fields<T: Serialize>(data: &T) -> Result<Vec<(String, String)>, CliError> {
    let Value::Object(map) = serde_json::to_value(data)? else {
        return Ok(Vec::new());
    };
    Ok(map
        .into_iter()
        .map(|(field, value)| {
            let shown = match value {
                Value::String(s) => s,
                Value::Null => String::new(),
                other => other.to_string(),
            };
            (field, shown)
        })
        .collect())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[derive(Serialize)]
    struct Row {
        id: &'static str,
        revisao_status: &'static str,
        situacao: &'static str,
    }

    const ROWS: [Row; 2] = [
        Row {
            id: "e1",
            revisao_status: "40.00",
            situacao: "Ativo",
        },
        Row {
            id: "e2",
            revisao_status: "-5.00",
            situacao: "Inativo",
        },
    ];

    #[test]
    fn csv_keeps_field_order() {
        let out = render_csv(&ROWS).unwrap();
        assert_eq!(
            out,
            "id,revisao_status,situacao\ne1,40.00,Ativo\ne2,-5.00,Inativo\n"
        );
    }

    #[test]
    fn table_uses_readable_headers() {
        let out = render_list(OutputFormat::Table, &ROWS, |r| r.id.into()).unwrap();
        assert!(out.contains("Revisao Status"));
        assert!(out.contains("-5.00"));
    }

    #[test]
    fn plain_lists_ids() {
        let out = render_list(OutputFormat::Plain, &ROWS, |r| r.id.into()).unwrap();
        assert_eq!(out, "e1\ne2");
    }

    #[test]
    fn single_record_as_pairs() {
        let out = render_single(OutputFormat::Csv, &ROWS[0], |r| r.id.into()).unwrap();
        assert!(out.starts_with("field,value\n"));
        assert!(out.contains("revisao_status,40.00\n"));
    }

    #[test]
    fn level_without_color_is_plain_label() {
        assert_eq!(paint_level(Some(RevisionLevel::Overdue), false), "vencida");
        assert_eq!(paint_level(None, true), "");
    }
}
