//! Equipment command handlers.

use tabled::Tabled;

use samsara_core::model::{EquipamentoRow, EquipamentoUpdate, NewEquipamento};
use samsara_core::{CreateOutcome, Samsara};

use crate::cli::{EquipamentosArgs, EquipamentosCommand, GlobalOpts};
use crate::error::CliError;
use crate::output;

use super::{files, state, util};

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct EquipamentoTableRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Código")]
    codigo: String,
    #[tabled(rename = "Tipo")]
    tipo: String,
    #[tabled(rename = "Obra")]
    obra: String,
    #[tabled(rename = "Leitura")]
    leitura: String,
    #[tabled(rename = "Próxima")]
    proxima: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Revisão")]
    nivel: String,
    #[tabled(rename = "Situação")]
    situacao: String,
}

impl EquipamentoTableRow {
    fn new(row: &EquipamentoRow, color: bool) -> Self {
        Self {
            id: row.id.clone(),
            codigo: row.codigo.clone(),
            tipo: row.tipo.clone(),
            obra: row.obra.clone(),
            leitura: format!("{} ({})", row.instrumento_medicao_atual, row.instrumento_medicao),
            proxima: row.proxima_revisao.clone(),
            status: row.revisao_status.clone(),
            nivel: output::paint_level(row.nivel_revisao, color),
            situacao: row.situacao.to_string(),
        }
    }
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    samsara: &Samsara,
    args: EquipamentosArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let equipamentos = samsara.equipamentos();
    match args.command {
        EquipamentosCommand::List(list) => {
            let rows = util::fetch_rows(&list, |q| equipamentos.list(q)).await?;
            let color = output::should_color(global.color);
            let out = output::render_list_with(
                global.output,
                &rows,
                |r| EquipamentoTableRow::new(r, color),
                |r| r.id.clone(),
            )?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        EquipamentosCommand::Get { id } => {
            let equipamento = equipamentos.get(&id).await?;
            if let Some(level) = equipamento.revision_level() {
                let color = output::should_color(global.color);
                util::notice(
                    global,
                    &format!("Revisão: {}", output::paint_level(Some(level), color)),
                );
            }
            util::print_record(&equipamento, global, |e| e.id.clone())
        }

        EquipamentosCommand::Create(body) => {
            let body: NewEquipamento = util::read_body(&body)?;
            let outcome =
                util::with_spinner("Creating equipment", global, equipamentos.create(&body))
                    .await?;
            match outcome {
                CreateOutcome::Created(equipamento) => {
                    util::notice(
                        global,
                        &format!("Equipment '{}' created", equipamento.codigo),
                    );
                    util::print_record(&equipamento, global, |e| e.id.clone())
                }
                CreateOutcome::Conflict(duplicate) => Err(CliError::Conflict {
                    resource_type: "equipamento".into(),
                    message: duplicate.to_string(),
                }),
            }
        }

        EquipamentosCommand::Update(args) => {
            let body: EquipamentoUpdate = util::read_body(&args.body)?;
            let equipamento = util::with_spinner(
                "Updating equipment",
                global,
                equipamentos.update(&args.id, &body),
            )
            .await?;
            util::print_record(&equipamento, global, |e| e.id.clone())
        }

        EquipamentosCommand::Reconcile { id } => {
            let equipamento =
                util::with_spinner("Reconciling equipment", global, equipamentos.reconcile(&id))
                    .await?;
            util::notice(global, &format!("Equipment {id} reconciled"));
            util::print_record(&equipamento, global, |e| e.id.clone())
        }

        EquipamentosCommand::State(cmd) => state::handle(equipamentos.repo(), cmd, global).await,

        EquipamentosCommand::Files(args) => files::handle(equipamentos.repo(), args, global).await,
    }
}
