// ── EquipamentoTipo / EquipamentoGrupo ──
//
// Lookup tables. A tipo belongs to a grupo and lists the operations that
// equipment of that tipo may perform; the grupo carries the category used
// for revision thresholds.

use serde::{Deserialize, Serialize};
use validator::Validate;

use super::common::{Categoria, RecordId, Situacao};
use crate::repo::{Entity, Listed, Named, SoftDeletable};
use crate::soft_delete::{Activation, ReasonPolicy};

// ── Grupo ───────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EquipamentoGrupo {
    pub id: RecordId,
    pub grupo_nome: String,
    pub categoria: Option<Categoria>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct NewGrupo {
    #[validate(length(min = 1, message = "nome do grupo é obrigatório"))]
    pub grupo_nome: String,
    pub categoria: Categoria,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct GrupoUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, message = "nome do grupo é obrigatório"))]
    pub grupo_nome: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub categoria: Option<Categoria>,
}

#[derive(Debug, Clone, Serialize)]
pub struct EquipamentoGrupoRow {
    pub id: RecordId,
    pub grupo_nome: String,
    pub categoria: String,
}

impl Entity for EquipamentoGrupo {
    const COLLECTION: &'static str = "equipamento_grupos";
    const LABEL: &'static str = "grupo de equipamento";

    fn id(&self) -> &str {
        &self.id
    }
}

impl Named for EquipamentoGrupo {
    fn display_name(&self) -> &str {
        &self.grupo_nome
    }
}

impl Listed for EquipamentoGrupo {
    type Row = EquipamentoGrupoRow;
    const DEFAULT_SORT: &'static str = "+grupo_nome";

    fn to_row(&self) -> EquipamentoGrupoRow {
        EquipamentoGrupoRow {
            id: self.id.clone(),
            grupo_nome: self.grupo_nome.clone(),
            categoria: self
                .categoria
                .as_ref()
                .map(ToString::to_string)
                .unwrap_or_default(),
        }
    }
}

// ── Tipo ────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EquipamentoTipo {
    pub id: RecordId,
    pub tipo_nome: String,
    pub grupo_equipamento: RecordId,
    #[serde(rename = "grupo_nomeX")]
    pub grupo_nome_x: String,
    /// Codes of the operations this tipo can perform.
    pub array_operacoes: Vec<String>,
    pub inativo: bool,
    pub motivo: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct NewEquipamentoTipo {
    #[validate(length(min = 1, message = "nome do tipo é obrigatório"))]
    pub tipo_nome: String,
    pub grupo_equipamento: RecordId,
    #[serde(default)]
    pub array_operacoes: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct EquipamentoTipoUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, message = "nome do tipo é obrigatório"))]
    pub tipo_nome: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grupo_equipamento: Option<RecordId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub array_operacoes: Option<Vec<String>>,
}

#[derive(Debug, Clone, Serialize)]
pub struct EquipamentoTipoRow {
    pub id: RecordId,
    pub tipo_nome: String,
    pub grupo: String,
    pub operacoes: String,
    pub situacao: Situacao,
    pub motivo: String,
}

impl Entity for EquipamentoTipo {
    const COLLECTION: &'static str = "equipamento_tipos";
    const LABEL: &'static str = "tipo de equipamento";

    fn id(&self) -> &str {
        &self.id
    }
}

impl Named for EquipamentoTipo {
    fn display_name(&self) -> &str {
        &self.tipo_nome
    }
}

impl SoftDeletable for EquipamentoTipo {
    const REASON: ReasonPolicy = ReasonPolicy::Required;

    fn activation(&self) -> Activation {
        Activation::from_fields(self.inativo, &self.motivo)
    }
}

impl Listed for EquipamentoTipo {
    type Row = EquipamentoTipoRow;
    const DEFAULT_SORT: &'static str = "+tipo_nome";

    fn to_row(&self) -> EquipamentoTipoRow {
        EquipamentoTipoRow {
            id: self.id.clone(),
            tipo_nome: self.tipo_nome.clone(),
            grupo: self.grupo_nome_x.clone(),
            operacoes: self.array_operacoes.join(", "),
            situacao: self.inativo.into(),
            motivo: self.motivo.clone(),
        }
    }
}
