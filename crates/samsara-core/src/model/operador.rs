// ── Operador (equipment operator) ──

use serde::{Deserialize, Serialize};
use validator::Validate;

use super::common::{RecordId, Situacao};
use crate::repo::{Entity, Listed, Named, SoftDeletable};
use crate::soft_delete::{Activation, ReasonPolicy};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Operador {
    pub id: RecordId,
    pub nome_completo: String,
    pub atividade: String,
    /// Supervising user.
    pub encarregado: RecordId,
    #[serde(rename = "encarregadoX")]
    pub encarregado_x: String,
    pub obra: RecordId,
    #[serde(rename = "obraX")]
    pub obra_x: String,
    pub inativo: bool,
    pub motivo: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct NewOperador {
    #[validate(length(min = 1, message = "nome é obrigatório"))]
    pub nome_completo: String,
    #[validate(length(min = 1, message = "atividade é obrigatória"))]
    pub atividade: String,
    #[serde(default)]
    pub encarregado: RecordId,
    #[serde(default)]
    pub obra: RecordId,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct OperadorUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, message = "nome é obrigatório"))]
    pub nome_completo: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, message = "atividade é obrigatória"))]
    pub atividade: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub encarregado: Option<RecordId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub obra: Option<RecordId>,
}

#[derive(Debug, Clone, Serialize)]
pub struct OperadorRow {
    pub id: RecordId,
    pub nome_completo: String,
    pub atividade: String,
    pub encarregado: String,
    pub obra: String,
    pub situacao: Situacao,
    pub motivo: String,
}

impl Entity for Operador {
    const COLLECTION: &'static str = "operadores";
    const LABEL: &'static str = "operador";

    fn id(&self) -> &str {
        &self.id
    }
}

impl Named for Operador {
    fn display_name(&self) -> &str {
        &self.nome_completo
    }
}

impl SoftDeletable for Operador {
    const REASON: ReasonPolicy = ReasonPolicy::Required;

    fn activation(&self) -> Activation {
        Activation::from_fields(self.inativo, &self.motivo)
    }
}

impl Listed for Operador {
    type Row = OperadorRow;
    const DEFAULT_SORT: &'static str = "+nome_completo";

    fn to_row(&self) -> OperadorRow {
        OperadorRow {
            id: self.id.clone(),
            nome_completo: self.nome_completo.clone(),
            atividade: self.atividade.clone(),
            encarregado: self.encarregado_x.clone(),
            obra: self.obra_x.clone(),
            situacao: self.inativo.into(),
            motivo: self.motivo.clone(),
        }
    }
}
