// ── Manutencao (maintenance event) ──

use serde::{Deserialize, Serialize};
use validator::Validate;

use super::common::{RecordId, numeric_string};
use super::{non_negative_reading, valid_date};
use crate::display::{date_br, decimal2};
use crate::reconcile::ManutencaoShadows;
use crate::repo::{Entity, Listed};

/// Maintenance type that resets the equipment's revision window.
pub const TIPO_REVISAO: &str = "Revisão";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Manutencao {
    pub id: RecordId,
    pub tipo_manutencao: String,
    pub equipamento: RecordId,
    #[serde(rename = "equipamentoX")]
    pub equipamento_x: String,
    /// Operator who carried out the work.
    pub feito_por: RecordId,
    #[serde(rename = "feito_porX")]
    pub feito_por_x: String,
    /// The operator's supervisor at the time of the event.
    #[serde(rename = "encarregadoX")]
    pub encarregado_x: String,
    /// Instrument reading taken during maintenance.
    #[serde(rename = "IM_atual", deserialize_with = "numeric_string")]
    pub im_atual: String,
    /// Linked boletim id, empty when none.
    pub boletim: RecordId,
    pub descricao: String,
    pub data: String,
    pub inativo: bool,
}

impl Manutencao {
    pub fn is_revisao(&self) -> bool {
        is_revisao(&self.tipo_manutencao)
    }
}

pub(crate) fn is_revisao(tipo: &str) -> bool {
    tipo.trim() == TIPO_REVISAO
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct NewManutencao {
    #[validate(length(min = 1, message = "tipo é obrigatório"))]
    pub tipo_manutencao: String,
    #[validate(length(min = 1, message = "equipamento é obrigatório"))]
    pub equipamento: String,
    #[validate(length(min = 1, message = "responsável é obrigatório"))]
    pub feito_por: String,
    #[serde(rename = "IM_atual")]
    #[validate(custom = "non_negative_reading")]
    pub im_atual: String,
    #[validate(custom = "valid_date")]
    pub data: String,
    #[serde(default)]
    pub descricao: String,
    #[serde(default)]
    pub boletim: RecordId,
}

/// POST body with the shadow fields filled in before the insert.
#[derive(Debug, Serialize)]
pub(crate) struct ManutencaoInsert<'a> {
    #[serde(flatten)]
    pub body: &'a NewManutencao,
    #[serde(flatten)]
    pub shadows: ManutencaoShadows,
    pub inativo: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct ManutencaoUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub feito_por: Option<RecordId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(custom = "valid_date")]
    pub data: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub descricao: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ManutencaoRow {
    pub id: RecordId,
    pub data: String,
    pub tipo_manutencao: String,
    pub equipamento: String,
    pub im_atual: String,
    pub feito_por: String,
    pub encarregado: String,
    pub descricao: String,
}

impl Entity for Manutencao {
    const COLLECTION: &'static str = "manutencoes";
    const LABEL: &'static str = "manutenção";

    fn id(&self) -> &str {
        &self.id
    }
}

impl Listed for Manutencao {
    type Row = ManutencaoRow;
    const DEFAULT_SORT: &'static str = "-data";

    fn to_row(&self) -> ManutencaoRow {
        ManutencaoRow {
            id: self.id.clone(),
            data: date_br(&self.data),
            tipo_manutencao: self.tipo_manutencao.clone(),
            equipamento: self.equipamento_x.clone(),
            im_atual: decimal2(&self.im_atual),
            feito_por: self.feito_por_x.clone(),
            encarregado: self.encarregado_x.clone(),
            descricao: self.descricao.clone(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn revisao_match_ignores_padding() {
        assert!(is_revisao(" Revisão "));
        assert!(!is_revisao("Troca de óleo"));
        assert!(!is_revisao("revisao"));
    }

    #[test]
    fn equipment_and_responsible_are_required() {
        let body = NewManutencao {
            tipo_manutencao: "Troca de óleo".into(),
            equipamento: String::new(),
            feito_por: String::new(),
            im_atual: "1300".into(),
            data: "2024-05-02".into(),
            descricao: String::new(),
            boletim: String::new(),
        };
        let errors = body.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("equipamento"));
        assert!(fields.contains_key("feito_por"));
    }
}
