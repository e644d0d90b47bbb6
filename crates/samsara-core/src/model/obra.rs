// ── Obra (construction site) ──

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use super::common::{RecordId, Situacao};
use super::valid_date;
use crate::display::date_br;
use crate::repo::{Entity, Listed, Named, SoftDeletable};
use crate::soft_delete::{Activation, ReasonPolicy};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Obra {
    pub id: RecordId,
    pub nome: String,
    pub cidade: String,
    pub data_inicio: String,
    pub data_final_previsto: String,
    pub inativo: bool,
    pub motivo: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[validate(schema(function = "dates_in_order", skip_on_field_errors = true))]
pub struct NewObra {
    #[validate(length(min = 1, message = "nome é obrigatório"))]
    pub nome: String,
    #[validate(length(min = 1, message = "cidade é obrigatória"))]
    pub cidade: String,
    #[validate(custom = "valid_date")]
    pub data_inicio: String,
    #[validate(custom = "valid_date")]
    pub data_final_previsto: String,
}

fn dates_in_order(obra: &NewObra) -> Result<(), ValidationError> {
    if obra.data_final_previsto.get(..10) < obra.data_inicio.get(..10) {
        let mut err = ValidationError::new("date_order");
        err.message = Some("data final prevista antes da data de início".into());
        return Err(err);
    }
    Ok(())
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct ObraUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, message = "nome é obrigatório"))]
    pub nome: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, message = "cidade é obrigatória"))]
    pub cidade: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(custom = "valid_date")]
    pub data_inicio: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(custom = "valid_date")]
    pub data_final_previsto: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ObraRow {
    pub id: RecordId,
    pub nome: String,
    pub cidade: String,
    pub data_inicio: String,
    pub data_final_previsto: String,
    pub situacao: Situacao,
    pub motivo: String,
}

impl Entity for Obra {
    const COLLECTION: &'static str = "obras";
    const LABEL: &'static str = "obra";

    fn id(&self) -> &str {
        &self.id
    }
}

impl Named for Obra {
    fn display_name(&self) -> &str {
        &self.nome
    }
}

impl SoftDeletable for Obra {
    const REASON: ReasonPolicy = ReasonPolicy::Optional;

    fn activation(&self) -> Activation {
        Activation::from_fields(self.inativo, &self.motivo)
    }
}

impl Listed for Obra {
    type Row = ObraRow;
    const DEFAULT_SORT: &'static str = "+nome";

    fn to_row(&self) -> ObraRow {
        ObraRow {
            id: self.id.clone(),
            nome: self.nome.clone(),
            cidade: self.cidade.clone(),
            data_inicio: date_br(&self.data_inicio),
            data_final_previsto: date_br(&self.data_final_previsto),
            situacao: self.inativo.into(),
            motivo: self.motivo.clone(),
        }
    }
}
