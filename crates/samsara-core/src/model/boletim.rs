// ── Boletim (daily work log) ──

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use super::common::{RecordId, numeric_string, parse_decimal};
use super::{non_negative_reading, valid_date, valid_time};
use crate::display::{date_br, sim_nao};
use crate::repo::{Entity, Listed};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Boletim {
    pub id: RecordId,
    pub codigo: String,
    pub data: String,
    pub equipamento: RecordId,
    #[serde(rename = "equipamentoX")]
    pub equipamento_x: String,
    pub operador: RecordId,
    #[serde(rename = "operadorX")]
    pub operador_x: String,
    pub obra: RecordId,
    #[serde(rename = "obraX")]
    pub obra_x: String,
    pub encarregado: RecordId,
    #[serde(rename = "encarregadoX")]
    pub encarregado_x: String,
    pub equipamento_logs: Vec<EquipamentoLog>,
    /// Set when a maintenance event is linked to this boletim.
    pub manutencao: bool,
    pub descricao_manutencao: String,
    pub abastecimento: bool,
    pub lubrificacao: bool,
    pub limpeza: bool,
}

/// One work interval on the boletim.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(default)]
#[validate(schema(function = "readings_in_order", skip_on_field_errors = true))]
pub struct EquipamentoLog {
    /// Work order code.
    pub os: String,
    /// Operation code.
    pub operacao: String,
    #[validate(custom = "valid_time")]
    pub hora_inicio: String,
    #[validate(custom = "valid_time")]
    pub hora_final: String,
    #[serde(rename = "IM_inicio", deserialize_with = "numeric_string")]
    #[validate(custom = "non_negative_reading")]
    pub im_inicio: String,
    #[serde(rename = "IM_final", deserialize_with = "numeric_string")]
    #[validate(custom = "non_negative_reading")]
    pub im_final: String,
}

fn readings_in_order(log: &EquipamentoLog) -> Result<(), ValidationError> {
    match (parse_decimal(&log.im_inicio), parse_decimal(&log.im_final)) {
        (Some(inicio), Some(fim)) if fim < inicio => {
            let mut err = ValidationError::new("reading_order");
            err.message = Some("leitura final menor que a inicial".into());
            Err(err)
        }
        _ => Ok(()),
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct NewBoletim {
    #[validate(length(min = 1, message = "código é obrigatório"))]
    pub codigo: String,
    #[validate(custom = "valid_date")]
    pub data: String,
    #[validate(length(min = 1, message = "equipamento é obrigatório"))]
    pub equipamento: String,
    #[validate(length(min = 1, message = "operador é obrigatório"))]
    pub operador: String,
    #[serde(default)]
    pub obra: RecordId,
    #[serde(default)]
    pub encarregado: RecordId,
    #[validate]
    #[serde(default)]
    pub equipamento_logs: Vec<EquipamentoLog>,
    #[serde(default)]
    pub abastecimento: bool,
    #[serde(default)]
    pub lubrificacao: bool,
    #[serde(default)]
    pub limpeza: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[validate(schema(function = "update_logs_valid"))]
pub struct BoletimUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(custom = "valid_date")]
    pub data: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub equipamento: Option<RecordId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub operador: Option<RecordId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub obra: Option<RecordId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub encarregado: Option<RecordId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub equipamento_logs: Option<Vec<EquipamentoLog>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub abastecimento: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lubrificacao: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limpeza: Option<bool>,
}

fn update_logs_valid(body: &BoletimUpdate) -> Result<(), ValidationError> {
    let logs = body.equipamento_logs.as_deref().unwrap_or_default();
    if logs.iter().all(|log| log.validate().is_ok()) {
        Ok(())
    } else {
        let mut err = ValidationError::new("equipamento_logs");
        err.message = Some("apontamento inválido".into());
        Err(err)
    }
}

/// Maintenance fields copied onto a boletim when a manutenção links to it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub(crate) struct BoletimManutencaoPatch {
    pub manutencao: bool,
    pub descricao_manutencao: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct BoletimRow {
    pub id: RecordId,
    pub codigo: String,
    pub data: String,
    pub equipamento: String,
    pub operador: String,
    pub obra: String,
    pub encarregado: String,
    pub apontamentos: usize,
    pub manutencao: &'static str,
    pub abastecimento: &'static str,
    pub lubrificacao: &'static str,
    pub limpeza: &'static str,
}

impl Entity for Boletim {
    const COLLECTION: &'static str = "boletins";
    const LABEL: &'static str = "boletim";

    fn id(&self) -> &str {
        &self.id
    }
}

impl Listed for Boletim {
    type Row = BoletimRow;
    const DEFAULT_SORT: &'static str = "-data,-codigo";

    fn to_row(&self) -> BoletimRow {
        BoletimRow {
            id: self.id.clone(),
            codigo: self.codigo.clone(),
            data: date_br(&self.data),
            equipamento: self.equipamento_x.clone(),
            operador: self.operador_x.clone(),
            obra: self.obra_x.clone(),
            encarregado: self.encarregado_x.clone(),
            apontamentos: self.equipamento_logs.len(),
            manutencao: sim_nao(self.manutencao),
            abastecimento: sim_nao(self.abastecimento),
            lubrificacao: sim_nao(self.lubrificacao),
            limpeza: sim_nao(self.limpeza),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn log(inicio: &str, fim: &str) -> EquipamentoLog {
        EquipamentoLog {
            os: "OS-1".into(),
            operacao: "ESC".into(),
            hora_inicio: "07:00".into(),
            hora_final: "11:30".into(),
            im_inicio: inicio.into(),
            im_final: fim.into(),
        }
    }

    #[test]
    fn log_readings_must_not_go_backwards() {
        assert!(log("100", "104.5").validate().is_ok());
        assert!(log("104.5", "100").validate().is_err());
    }

    #[test]
    fn nested_logs_are_validated() {
        let body = NewBoletim {
            codigo: "B-001".into(),
            data: "2024-05-01".into(),
            equipamento: "e1".into(),
            operador: "op1".into(),
            obra: String::new(),
            encarregado: String::new(),
            equipamento_logs: vec![log("10", "12"), log("20", "15")],
            abastecimento: true,
            lubrificacao: false,
            limpeza: false,
        };
        assert!(body.validate().is_err());
    }

    #[test]
    fn equipment_and_operator_are_required() {
        let body = NewBoletim {
            codigo: "B-002".into(),
            data: "2024-05-01".into(),
            equipamento: String::new(),
            operador: String::new(),
            obra: String::new(),
            encarregado: String::new(),
            equipamento_logs: Vec::new(),
            abastecimento: false,
            lubrificacao: false,
            limpeza: false,
        };
        let errors = body.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("equipamento"));
        assert!(fields.contains_key("operador"));
    }
}
