// ── Multa (traffic fine) ──

use serde::{Deserialize, Serialize};
use validator::Validate;

use super::common::{RecordId, Situacao, numeric_string};
use super::{positive_reading, valid_date};
use crate::display::{currency_brl, date_br};
use crate::repo::{Entity, Listed, SoftDeletable};
use crate::soft_delete::{Activation, ReasonPolicy};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Multa {
    pub id: RecordId,
    pub data_infracao: String,
    pub codigo_infracao: String,
    #[serde(deserialize_with = "numeric_string")]
    pub valor_infracao: String,
    /// Operator driving at the time.
    pub condutor: RecordId,
    #[serde(rename = "condutorX")]
    pub condutor_x: String,
    pub equipamento: RecordId,
    #[serde(rename = "equipamentoX")]
    pub equipamento_x: String,
    pub inativo: bool,
    pub motivo: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct NewMulta {
    #[validate(custom = "valid_date")]
    pub data_infracao: String,
    #[validate(length(min = 1, message = "código da infração é obrigatório"))]
    pub codigo_infracao: String,
    #[validate(custom = "positive_reading")]
    pub valor_infracao: String,
    #[serde(default)]
    pub condutor: RecordId,
    #[validate(length(min = 1, message = "equipamento é obrigatório"))]
    pub equipamento: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct MultaUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(custom = "valid_date")]
    pub data_infracao: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, message = "código da infração é obrigatório"))]
    pub codigo_infracao: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(custom = "positive_reading")]
    pub valor_infracao: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub condutor: Option<RecordId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub equipamento: Option<RecordId>,
}

#[derive(Debug, Clone, Serialize)]
pub struct MultaRow {
    pub id: RecordId,
    pub data_infracao: String,
    pub codigo_infracao: String,
    pub valor_infracao: String,
    pub condutor: String,
    pub equipamento: String,
    pub situacao: Situacao,
    pub motivo: String,
}

impl Entity for Multa {
    const COLLECTION: &'static str = "multas";
    const LABEL: &'static str = "multa";

    fn id(&self) -> &str {
        &self.id
    }
}

impl SoftDeletable for Multa {
    const REASON: ReasonPolicy = ReasonPolicy::Required;

    fn activation(&self) -> Activation {
        Activation::from_fields(self.inativo, &self.motivo)
    }
}

impl Listed for Multa {
    type Row = MultaRow;
    const DEFAULT_SORT: &'static str = "-data_infracao";

    fn to_row(&self) -> MultaRow {
        MultaRow {
            id: self.id.clone(),
            data_infracao: date_br(&self.data_infracao),
            codigo_infracao: self.codigo_infracao.clone(),
            valor_infracao: currency_brl(&self.valor_infracao),
            condutor: self.condutor_x.clone(),
            equipamento: self.equipamento_x.clone(),
            situacao: self.inativo.into(),
            motivo: self.motivo.clone(),
        }
    }
}
