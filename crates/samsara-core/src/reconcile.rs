// ── Denormalization reconciler ──
//
// After a write, copy the display names of related records into the `*X`
// shadow fields of the written record. Equipment revision fields travel
// with the primary write instead, so a half-done chain never leaves them
// stale.
//
// Each chain is: fetch relations one by one, build the patch, PATCH once.
// Nothing is rolled back. A failure after the primary write surfaces as
// `CoreError::Reconciliation`; calling the matching `reconcile_*` again
// with the same record repairs the shadows.
//
// Patch builders are pure: the same record and the same related names
// always produce the same patch.

use serde::Serialize;
use tracing::{info, warn};

use samsara_api::RecordClient;

use crate::error::CoreError;
use crate::model::boletim::BoletimManutencaoPatch;
use crate::model::common::fixed2;
use crate::model::manutencao::is_revisao;
use crate::model::{
    Boletim, Equipamento, EquipamentoGrupo, EquipamentoTipo, EquipamentoUpdate, Manutencao, Multa,
    NewEquipamento, Obra, Operador, Usuario,
};
use crate::repo::{Entity, Named, Repo};
use crate::revision::{self, Revision, RevisionPatch};

/// Wrap a failed step into a reconciliation error for `E` / `id`.
fn at<'a, E: Entity>(id: &'a str, step: &'static str) -> impl FnOnce(CoreError) -> CoreError + 'a {
    move |err| {
        warn!(entity = E::LABEL, id, step, error = %err, "reconciliation step failed");
        CoreError::reconciliation(E::LABEL, id, step, err)
    }
}

/// Fetch the display name of relation `id` on `R`, tagging failure with `step`.
async fn name_of<R: Named, E: Entity>(
    client: &RecordClient,
    owner_id: &str,
    relation_id: &str,
    step: &'static str,
) -> Result<String, CoreError> {
    Repo::<R>::new(client)
        .display_name_of(relation_id)
        .await
        .map_err(at::<E>(owner_id, step))
}

// ── Equipamento ─────────────────────────────────────────────────────

/// Display names of an equipment's relations.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EquipamentoRelated {
    pub obra: String,
    pub encarregado: String,
    pub tipo: String,
    pub grupo: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EquipamentoPatch {
    #[serde(rename = "obraX")]
    pub obra_x: String,
    #[serde(rename = "encarregadoX")]
    pub encarregado_x: String,
    #[serde(rename = "tipo_equipamentoX")]
    pub tipo_equipamento_x: String,
    #[serde(rename = "grupo_equipamentoX")]
    pub grupo_equipamento_x: String,
}

/// Revision fields of a new record: the window opens at the baseline.
pub fn revision_on_create(body: &NewEquipamento) -> Result<Revision, CoreError> {
    let inicio = revision::reading("instrumento_medicao_inicio", &body.instrumento_medicao_inicio)?;
    let frequencia = revision::reading("frequencia_revisao", &body.frequencia_revisao)?;
    Ok(revision::on_create(inicio, frequencia))
}

/// Revision fields of `previous` once `edit` is applied.
///
/// Fields absent from `edit` keep their stored value. A record that never
/// had a threshold stored falls back to measuring the window from its
/// baseline reading.
pub fn revision_on_edit(
    previous: &Equipamento,
    edit: &EquipamentoUpdate,
) -> Result<Revision, CoreError> {
    let atual = revision::reading(
        "instrumento_medicao_atual",
        edit.instrumento_medicao_atual
            .as_deref()
            .unwrap_or(&previous.instrumento_medicao_atual),
    )?;
    let frequencia = revision::reading(
        "frequencia_revisao",
        edit.frequencia_revisao
            .as_deref()
            .unwrap_or(&previous.frequencia_revisao),
    )?;
    let stored = (
        revision::reading("proxima_revisao", &previous.proxima_revisao),
        revision::reading("frequencia_revisao", &previous.frequencia_revisao),
    );
    match stored {
        (Ok(proxima), Ok(prev_freq)) => Ok(revision::on_update(proxima, prev_freq, atual, frequencia)),
        _ => {
            let inicio = revision::reading(
                "instrumento_medicao_inicio",
                &previous.instrumento_medicao_inicio,
            )?;
            Ok(revision::from_baseline(inicio, atual, frequencia))
        }
    }
}

pub fn equipamento_patch(related: &EquipamentoRelated) -> EquipamentoPatch {
    EquipamentoPatch {
        obra_x: related.obra.clone(),
        encarregado_x: related.encarregado.clone(),
        tipo_equipamento_x: related.tipo.clone(),
        grupo_equipamento_x: related.grupo.clone(),
    }
}

/// Refresh the shadow fields of a stored equipment record.
///
/// Revision fields are written together with the readings they derive
/// from, so this chain never touches them.
pub async fn reconcile_equipamento(
    client: &RecordClient,
    record: &Equipamento,
) -> Result<Equipamento, CoreError> {
    let id = record.id.as_str();
    info!(id, codigo = %record.codigo, "reconciling equipamento");

    let related = EquipamentoRelated {
        obra: name_of::<Obra, Equipamento>(client, id, &record.obra, "fetching obra").await?,
        encarregado: name_of::<Usuario, Equipamento>(
            client,
            id,
            &record.encarregado,
            "fetching encarregado",
        )
        .await?,
        tipo: name_of::<EquipamentoTipo, Equipamento>(
            client,
            id,
            &record.tipo_equipamento,
            "fetching tipo de equipamento",
        )
        .await?,
        grupo: name_of::<EquipamentoGrupo, Equipamento>(
            client,
            id,
            &record.grupo_equipamento,
            "fetching grupo de equipamento",
        )
        .await?,
    };

    Repo::<Equipamento>::new(client)
        .patch(id, &equipamento_patch(&related))
        .await
        .map_err(at::<Equipamento>(id, "patching shadow fields"))
}

// ── Operador ────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OperadorRelated {
    pub obra: String,
    pub encarregado: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OperadorPatch {
    #[serde(rename = "obraX")]
    pub obra_x: String,
    #[serde(rename = "encarregadoX")]
    pub encarregado_x: String,
}

pub fn operador_patch(related: &OperadorRelated) -> OperadorPatch {
    OperadorPatch {
        obra_x: related.obra.clone(),
        encarregado_x: related.encarregado.clone(),
    }
}

pub async fn reconcile_operador(
    client: &RecordClient,
    record: &Operador,
) -> Result<Operador, CoreError> {
    let id = record.id.as_str();
    info!(id, "reconciling operador");

    let related = OperadorRelated {
        obra: name_of::<Obra, Operador>(client, id, &record.obra, "fetching obra").await?,
        encarregado: name_of::<Usuario, Operador>(
            client,
            id,
            &record.encarregado,
            "fetching encarregado",
        )
        .await?,
    };

    Repo::<Operador>::new(client)
        .patch(id, &operador_patch(&related))
        .await
        .map_err(at::<Operador>(id, "patching shadow fields"))
}

// ── Usuario ─────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UsuarioPatch {
    #[serde(rename = "obraX")]
    pub obra_x: String,
}

pub fn usuario_patch(obra: &str) -> UsuarioPatch {
    UsuarioPatch {
        obra_x: obra.to_owned(),
    }
}

pub async fn reconcile_usuario(
    client: &RecordClient,
    record: &Usuario,
) -> Result<Usuario, CoreError> {
    let id = record.id.as_str();
    info!(id, username = %record.username, "reconciling usuario");

    let obra = name_of::<Obra, Usuario>(client, id, &record.obra, "fetching obra").await?;

    Repo::<Usuario>::new(client)
        .patch(id, &usuario_patch(&obra))
        .await
        .map_err(at::<Usuario>(id, "patching shadow fields"))
}

// ── EquipamentoTipo ─────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EquipamentoTipoPatch {
    #[serde(rename = "grupo_nomeX")]
    pub grupo_nome_x: String,
}

pub fn equipamento_tipo_patch(grupo: &str) -> EquipamentoTipoPatch {
    EquipamentoTipoPatch {
        grupo_nome_x: grupo.to_owned(),
    }
}

pub async fn reconcile_equipamento_tipo(
    client: &RecordClient,
    record: &EquipamentoTipo,
) -> Result<EquipamentoTipo, CoreError> {
    let id = record.id.as_str();
    info!(id, tipo = %record.tipo_nome, "reconciling tipo de equipamento");

    let grupo = name_of::<EquipamentoGrupo, EquipamentoTipo>(
        client,
        id,
        &record.grupo_equipamento,
        "fetching grupo de equipamento",
    )
    .await?;

    Repo::<EquipamentoTipo>::new(client)
        .patch(id, &equipamento_tipo_patch(&grupo))
        .await
        .map_err(at::<EquipamentoTipo>(id, "patching shadow fields"))
}

// ── Boletim ─────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BoletimRelated {
    pub equipamento: String,
    pub operador: String,
    pub obra: String,
    pub encarregado: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BoletimPatch {
    #[serde(rename = "equipamentoX")]
    pub equipamento_x: String,
    #[serde(rename = "operadorX")]
    pub operador_x: String,
    #[serde(rename = "obraX")]
    pub obra_x: String,
    #[serde(rename = "encarregadoX")]
    pub encarregado_x: String,
}

pub fn boletim_patch(related: &BoletimRelated) -> BoletimPatch {
    BoletimPatch {
        equipamento_x: related.equipamento.clone(),
        operador_x: related.operador.clone(),
        obra_x: related.obra.clone(),
        encarregado_x: related.encarregado.clone(),
    }
}

pub async fn reconcile_boletim(
    client: &RecordClient,
    record: &Boletim,
) -> Result<Boletim, CoreError> {
    let id = record.id.as_str();
    info!(id, codigo = %record.codigo, "reconciling boletim");

    let related = BoletimRelated {
        equipamento: name_of::<Equipamento, Boletim>(
            client,
            id,
            &record.equipamento,
            "fetching equipamento",
        )
        .await?,
        operador: name_of::<Operador, Boletim>(client, id, &record.operador, "fetching operador")
            .await?,
        obra: name_of::<Obra, Boletim>(client, id, &record.obra, "fetching obra").await?,
        encarregado: name_of::<Usuario, Boletim>(
            client,
            id,
            &record.encarregado,
            "fetching encarregado",
        )
        .await?,
    };

    Repo::<Boletim>::new(client)
        .patch(id, &boletim_patch(&related))
        .await
        .map_err(at::<Boletim>(id, "patching shadow fields"))
}

// ── Multa ───────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MultaPatch {
    #[serde(rename = "condutorX")]
    pub condutor_x: String,
    #[serde(rename = "equipamentoX")]
    pub equipamento_x: String,
}

pub fn multa_patch(condutor: &str, equipamento: &str) -> MultaPatch {
    MultaPatch {
        condutor_x: condutor.to_owned(),
        equipamento_x: equipamento.to_owned(),
    }
}

pub async fn reconcile_multa(client: &RecordClient, record: &Multa) -> Result<Multa, CoreError> {
    let id = record.id.as_str();
    info!(id, "reconciling multa");

    let condutor =
        name_of::<Operador, Multa>(client, id, &record.condutor, "fetching condutor").await?;
    let equipamento =
        name_of::<Equipamento, Multa>(client, id, &record.equipamento, "fetching equipamento")
            .await?;

    Repo::<Multa>::new(client)
        .patch(id, &multa_patch(&condutor, &equipamento))
        .await
        .map_err(at::<Multa>(id, "patching shadow fields"))
}

// ── Manutencao cascade ──────────────────────────────────────────────

/// Shadow fields written onto a maintenance record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ManutencaoShadows {
    #[serde(rename = "equipamentoX")]
    pub equipamento_x: String,
    #[serde(rename = "feito_porX")]
    pub feito_por_x: String,
    /// Copied from the operator's own shadow, not fetched separately.
    #[serde(rename = "encarregadoX")]
    pub encarregado_x: String,
}

pub fn manutencao_shadows(equipamento: &Equipamento, feito_por: &Operador) -> ManutencaoShadows {
    ManutencaoShadows {
        equipamento_x: equipamento.display_name().to_owned(),
        feito_por_x: feito_por.display_name().to_owned(),
        encarregado_x: feito_por.encarregado_x.clone(),
    }
}

/// Refresh the shadow fields of an existing maintenance record.
pub async fn reconcile_manutencao(
    client: &RecordClient,
    record: &Manutencao,
) -> Result<Manutencao, CoreError> {
    let id = record.id.as_str();
    info!(id, "reconciling manutenção");

    let equipamento = Repo::<Equipamento>::new(client)
        .get(&record.equipamento)
        .await
        .map_err(at::<Manutencao>(id, "fetching equipamento"))?;
    let operador = Repo::<Operador>::new(client)
        .get(&record.feito_por)
        .await
        .map_err(at::<Manutencao>(id, "fetching operador"))?;

    Repo::<Manutencao>::new(client)
        .patch(id, &manutencao_shadows(&equipamento, &operador))
        .await
        .map_err(at::<Manutencao>(id, "patching shadow fields"))
}

/// Equipment fields updated by a maintenance event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EquipamentoReadingPatch {
    pub instrumento_medicao_atual: String,
    #[serde(flatten)]
    pub revision: RevisionPatch,
}

/// New reading and revision fields for `equipamento` after a maintenance
/// event of type `tipo` taken at reading `im_atual`.
pub fn equipamento_reading_patch(
    equipamento: &Equipamento,
    tipo: &str,
    im_atual: &str,
) -> Result<EquipamentoReadingPatch, CoreError> {
    let atual = revision::reading("IM_atual", im_atual)?;
    let revision = if is_revisao(tipo) {
        let frequencia =
            revision::reading("frequencia_revisao", &equipamento.frequencia_revisao)?;
        revision::on_revisao(atual, frequencia)?
    } else {
        let moved = EquipamentoUpdate {
            instrumento_medicao_atual: Some(im_atual.to_owned()),
            ..EquipamentoUpdate::default()
        };
        revision_on_edit(equipamento, &moved)?
    };
    Ok(EquipamentoReadingPatch {
        instrumento_medicao_atual: fixed2(atual),
        revision: revision.to_patch(),
    })
}

/// Push a saved maintenance event onto its equipment and boletim.
///
/// Steps, in order: fetch the equipment, PATCH its reading and revision
/// fields, then (when a boletim is linked) PATCH the boletim's maintenance
/// flag and description.
pub async fn apply_manutencao(
    client: &RecordClient,
    manutencao: &Manutencao,
) -> Result<Equipamento, CoreError> {
    let id = manutencao.id.as_str();
    info!(
        id,
        equipamento = %manutencao.equipamento,
        revisao = manutencao.is_revisao(),
        "applying manutenção to equipamento"
    );

    let equipamentos = Repo::<Equipamento>::new(client);
    let equipamento = equipamentos
        .get(&manutencao.equipamento)
        .await
        .map_err(at::<Manutencao>(id, "fetching equipamento"))?;

    let patch = equipamento_reading_patch(
        &equipamento,
        &manutencao.tipo_manutencao,
        &manutencao.im_atual,
    )
    .map_err(at::<Manutencao>(id, "computing revision"))?;

    let updated = equipamentos
        .patch(&equipamento.id, &patch)
        .await
        .map_err(at::<Manutencao>(id, "updating equipamento"))?;

    if !manutencao.boletim.is_empty() {
        let flag = BoletimManutencaoPatch {
            manutencao: true,
            descricao_manutencao: manutencao.descricao.clone(),
        };
        Repo::<Boletim>::new(client)
            .patch(&manutencao.boletim, &flag)
            .await
            .map_err(at::<Manutencao>(id, "updating boletim"))?;
    }

    Ok(updated)
}
