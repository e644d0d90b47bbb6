// ── Revision status calculator ──
//
// Pure arithmetic over instrument readings. Inputs arrive as the numeric
// strings stored on the equipment record; outputs are rendered with exactly
// two decimal places.

use rust_decimal::Decimal;
use serde::Serialize;
use thiserror::Error;

use crate::model::common::{Categoria, fixed2, parse_decimal};

/// Threshold (in instrument units) below which a machine or motorcycle is
/// due soon.
pub const THRESHOLD_SHORT: i64 = 100;
/// Same, for trucks and cars.
pub const THRESHOLD_LONG: i64 = 1000;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RevisionError {
    #[error("{field} must be a number, got {value:?}")]
    InvalidReading { field: &'static str, value: String },

    #[error("frequencia_revisao must be greater than zero")]
    ZeroFrequency,
}

/// Parse one reading field, naming it in the error.
pub fn reading(field: &'static str, raw: &str) -> Result<Decimal, RevisionError> {
    parse_decimal(raw).ok_or_else(|| RevisionError::InvalidReading {
        field,
        value: raw.to_owned(),
    })
}

/// Derived revision fields of an equipment record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Revision {
    pub proxima_revisao: Decimal,
    pub revisao_status: Decimal,
}

impl Revision {
    pub fn to_patch(self) -> RevisionPatch {
        RevisionPatch {
            proxima_revisao: fixed2(self.proxima_revisao),
            revisao_status: fixed2(self.revisao_status),
        }
    }
}

/// Wire form of [`Revision`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RevisionPatch {
    pub proxima_revisao: String,
    pub revisao_status: String,
}

/// New equipment: the window opens at the baseline reading.
pub fn on_create(inicio: Decimal, frequencia: Decimal) -> Revision {
    let proxima = frequencia + inicio;
    Revision {
        proxima_revisao: proxima,
        revisao_status: proxima - inicio,
    }
}

/// Window measured from the baseline reading, with the remaining distance
/// taken from the current one. Used when no stored threshold exists yet.
pub fn from_baseline(inicio: Decimal, atual: Decimal, frequencia: Decimal) -> Revision {
    let proxima = frequencia + inicio;
    Revision {
        proxima_revisao: proxima,
        revisao_status: proxima - atual,
    }
}

/// Equipment edited with a new reading and/or frequency.
///
/// With the frequency unchanged only the remaining distance shrinks; a new
/// frequency reopens the window from the current reading.
pub fn on_update(
    previous_proxima: Decimal,
    previous_frequencia: Decimal,
    atual: Decimal,
    frequencia: Decimal,
) -> Revision {
    if frequencia == previous_frequencia {
        Revision {
            proxima_revisao: previous_proxima,
            revisao_status: previous_proxima - atual,
        }
    } else {
        let proxima = frequencia + atual;
        Revision {
            proxima_revisao: proxima,
            revisao_status: proxima - atual,
        }
    }
}

/// A "Revisão" maintenance event resets the window at the reading taken
/// during maintenance.
///
/// Unlike the other two paths, the status subtracts `atual × 100 /
/// frequencia` rather than the reading itself.
pub fn on_revisao(atual: Decimal, frequencia: Decimal) -> Result<Revision, RevisionError> {
    if frequencia.is_zero() {
        return Err(RevisionError::ZeroFrequency);
    }
    let proxima = atual + frequencia;
    Ok(Revision {
        proxima_revisao: proxima,
        revisao_status: proxima - (atual * Decimal::ONE_HUNDRED) / frequencia,
    })
}

/// How urgent a revision is, for coloring lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, strum::Display)]
pub enum RevisionLevel {
    #[serde(rename = "vencida")]
    #[strum(to_string = "vencida")]
    Overdue,
    #[serde(rename = "próxima")]
    #[strum(to_string = "próxima")]
    DueSoon,
    #[serde(rename = "em dia")]
    #[strum(to_string = "em dia")]
    Ok,
}

impl RevisionLevel {
    /// `status <= 0` is overdue, `status <= threshold(categoria)` is due
    /// soon, anything above is fine.
    pub fn classify(status: Decimal, categoria: Option<&Categoria>) -> Self {
        if status <= Decimal::ZERO {
            Self::Overdue
        } else if status <= Decimal::from(threshold(categoria)) {
            Self::DueSoon
        } else {
            Self::Ok
        }
    }
}

/// Due-soon threshold for a category. Unknown or missing categories use
/// the short threshold.
pub fn threshold(categoria: Option<&Categoria>) -> i64 {
    match categoria {
        Some(Categoria::Caminhao | Categoria::Automovel) => THRESHOLD_LONG,
        Some(Categoria::Maquina | Categoria::Motocicleta | Categoria::Outra(_)) | None => {
            THRESHOLD_SHORT
        }
    }
}
