// ── Equipamento (equipment) ──
//
// Readings and revision fields are numeric strings on the wire.
// `proxima_revisao` and `revisao_status` are derived; callers never set
// them directly. They are computed before each write and sent in the same
// body as the readings they depend on.

use serde::{Deserialize, Serialize};
use validator::Validate;

use super::common::{
    InstrumentoMedicao, RecordId, Situacao, numeric_string, parse_decimal,
};
use super::equipamento_tipo::EquipamentoGrupo;
use super::{non_negative_reading, positive_reading};
use crate::display::decimal2;
use crate::repo::{Coded, Entity, Listed, Named, SoftDeletable};
use crate::revision::{RevisionLevel, RevisionPatch};
use crate::soft_delete::{Activation, ReasonPolicy};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Equipamento {
    pub id: RecordId,
    pub codigo: String,
    pub instrumento_medicao: String,
    /// Baseline reading at creation. Never changes afterwards.
    #[serde(deserialize_with = "numeric_string")]
    pub instrumento_medicao_inicio: String,
    #[serde(deserialize_with = "numeric_string")]
    pub instrumento_medicao_atual: String,
    #[serde(deserialize_with = "numeric_string")]
    pub frequencia_revisao: String,
    #[serde(deserialize_with = "numeric_string")]
    pub proxima_revisao: String,
    #[serde(deserialize_with = "numeric_string")]
    pub revisao_status: String,
    pub obra: RecordId,
    #[serde(rename = "obraX")]
    pub obra_x: String,
    pub encarregado: RecordId,
    #[serde(rename = "encarregadoX")]
    pub encarregado_x: String,
    pub tipo_equipamento: RecordId,
    #[serde(rename = "tipo_equipamentoX")]
    pub tipo_equipamento_x: String,
    pub grupo_equipamento: RecordId,
    #[serde(rename = "grupo_equipamentoX")]
    pub grupo_equipamento_x: String,
    pub inativo: bool,
    pub motivo: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expand: Option<EquipamentoExpand>,
}

/// Relations inlined by `expand=grupo_equipamento`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EquipamentoExpand {
    pub grupo_equipamento: Option<EquipamentoGrupo>,
}

impl Equipamento {
    /// Urgency of the next revision, when the status parses.
    pub fn revision_level(&self) -> Option<RevisionLevel> {
        let status = parse_decimal(&self.revisao_status)?;
        let categoria = self
            .expand
            .as_ref()
            .and_then(|e| e.grupo_equipamento.as_ref())
            .and_then(|g| g.categoria.as_ref());
        Some(RevisionLevel::classify(status, categoria))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct NewEquipamento {
    #[validate(length(min = 1, message = "código é obrigatório"))]
    pub codigo: String,
    pub instrumento_medicao: InstrumentoMedicao,
    #[validate(custom = "non_negative_reading")]
    pub instrumento_medicao_inicio: String,
    #[validate(custom = "positive_reading")]
    pub frequencia_revisao: String,
    pub obra: RecordId,
    pub encarregado: RecordId,
    pub tipo_equipamento: RecordId,
    pub grupo_equipamento: RecordId,
}

/// POST body: the current reading starts at the baseline.
#[derive(Debug, Serialize)]
pub(crate) struct EquipamentoInsert<'a> {
    #[serde(flatten)]
    pub body: &'a NewEquipamento,
    pub instrumento_medicao_atual: &'a str,
    pub inativo: bool,
    #[serde(flatten)]
    pub revision: RevisionPatch,
}

/// PATCH body of an edit, with the recomputed revision fields.
#[derive(Debug, Serialize)]
pub(crate) struct EquipamentoEdit<'a> {
    #[serde(flatten)]
    pub body: &'a EquipamentoUpdate,
    #[serde(flatten)]
    pub revision: RevisionPatch,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct EquipamentoUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, message = "código é obrigatório"))]
    pub codigo: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instrumento_medicao: Option<InstrumentoMedicao>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(custom = "non_negative_reading")]
    pub instrumento_medicao_atual: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(custom = "positive_reading")]
    pub frequencia_revisao: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub obra: Option<RecordId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub encarregado: Option<RecordId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tipo_equipamento: Option<RecordId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grupo_equipamento: Option<RecordId>,
}

#[derive(Debug, Clone, Serialize)]
pub struct EquipamentoRow {
    pub id: RecordId,
    pub codigo: String,
    pub instrumento_medicao: String,
    pub instrumento_medicao_atual: String,
    pub frequencia_revisao: String,
    pub proxima_revisao: String,
    pub revisao_status: String,
    pub nivel_revisao: Option<RevisionLevel>,
    pub tipo: String,
    pub grupo: String,
    pub obra: String,
    pub encarregado: String,
    pub situacao: Situacao,
    pub motivo: String,
}

impl Entity for Equipamento {
    const COLLECTION: &'static str = "equipamentos";
    const LABEL: &'static str = "equipamento";

    fn id(&self) -> &str {
        &self.id
    }
}

impl Named for Equipamento {
    fn display_name(&self) -> &str {
        &self.codigo
    }
}

impl Coded for Equipamento {
    const ACTIVE_ONLY: bool = true;

    fn codigo(&self) -> &str {
        &self.codigo
    }
}

impl SoftDeletable for Equipamento {
    const REASON: ReasonPolicy = ReasonPolicy::Optional;
    const GUARDS_CODIGO: bool = true;

    fn active_codigo(&self) -> Option<&str> {
        Some(&self.codigo)
    }

    fn activation(&self) -> Activation {
        Activation::from_fields(self.inativo, &self.motivo)
    }
}

impl Listed for Equipamento {
    type Row = EquipamentoRow;
    const EXPAND: &'static [&'static str] = &["grupo_equipamento"];
    const DEFAULT_SORT: &'static str = "+codigo";

    fn to_row(&self) -> EquipamentoRow {
        EquipamentoRow {
            id: self.id.clone(),
            codigo: self.codigo.clone(),
            instrumento_medicao: self.instrumento_medicao.clone(),
            instrumento_medicao_atual: decimal2(&self.instrumento_medicao_atual),
            frequencia_revisao: decimal2(&self.frequencia_revisao),
            proxima_revisao: decimal2(&self.proxima_revisao),
            revisao_status: decimal2(&self.revisao_status),
            nivel_revisao: self.revision_level(),
            tipo: self.tipo_equipamento_x.clone(),
            grupo: self.grupo_equipamento_x.clone(),
            obra: self.obra_x.clone(),
            encarregado: self.encarregado_x.clone(),
            situacao: self.inativo.into(),
            motivo: self.motivo.clone(),
        }
    }
}
