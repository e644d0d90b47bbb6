// ── Shared domain vocabulary ──

use std::fmt;
use std::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Deserializer, Serialize};
use strum::{Display, EnumString};

/// Record id as assigned by the store. Empty when a relation is unset.
pub type RecordId = String;

/// Usage instrument fitted to a piece of equipment.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Display, EnumString,
)]
pub enum InstrumentoMedicao {
    #[default]
    #[serde(rename = "Odômetro")]
    #[strum(to_string = "Odômetro", serialize = "odometro")]
    Odometro,
    #[serde(rename = "Horímetro")]
    #[strum(to_string = "Horímetro", serialize = "horimetro")]
    Horimetro,
}

impl InstrumentoMedicao {
    /// Unit label for readings of this instrument.
    pub fn unit(self) -> &'static str {
        match self {
            Self::Odometro => "km",
            Self::Horimetro => "h",
        }
    }
}

/// Page-level access profile of a back-office user.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString,
)]
pub enum TipoAcesso {
    #[strum(to_string = "Administrador", serialize = "administrador")]
    Administrador,
    #[default]
    #[strum(to_string = "Encarregado", serialize = "encarregado")]
    Encarregado,
    #[serde(rename = "Gerente_de_Frota")]
    #[strum(
        to_string = "Gerente de Frota",
        serialize = "Gerente_de_Frota",
        serialize = "gerente"
    )]
    GerenteDeFrota,
}

/// Equipment category, carried by the equipment group.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, EnumString)]
pub enum Categoria {
    #[serde(rename = "Máquina")]
    #[strum(serialize = "Máquina", serialize = "maquina")]
    Maquina,
    #[serde(rename = "Motocicleta")]
    #[strum(serialize = "Motocicleta", serialize = "motocicleta")]
    Motocicleta,
    #[serde(rename = "Caminhão")]
    #[strum(serialize = "Caminhão", serialize = "caminhao")]
    Caminhao,
    #[serde(rename = "Automóvel")]
    #[strum(serialize = "Automóvel", serialize = "automovel")]
    Automovel,
    /// Anything the store holds that is not one of the known categories.
    #[serde(untagged)]
    #[strum(default)]
    Outra(String),
}

impl fmt::Display for Categoria {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Maquina => "Máquina",
            Self::Motocicleta => "Motocicleta",
            Self::Caminhao => "Caminhão",
            Self::Automovel => "Automóvel",
            Self::Outra(other) => other,
        })
    }
}

/// Parse a numeric reading from its wire string.
///
/// Accepts a decimal comma (`"1300,5"`) as typed by Brazilian users.
pub fn parse_decimal(raw: &str) -> Option<Decimal> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    Decimal::from_str(trimmed)
        .or_else(|_| Decimal::from_str(&trimmed.replace(',', ".")))
        .ok()
}

/// Render a decimal as a fixed-point string with exactly two places.
pub fn fixed2(value: Decimal) -> String {
    let rounded = value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    if rounded.is_zero() {
        return "0.00".to_owned();
    }
    format!("{rounded:.2}")
}

/// Deserialize a numeric field that the store may send as a string, a
/// number or `null`.
pub(crate) fn numeric_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Number(serde_json::Number),
        Null,
    }

    Ok(match Option::<Raw>::deserialize(deserializer)? {
        Some(Raw::Text(s)) => s,
        Some(Raw::Number(n)) => n.to_string(),
        Some(Raw::Null) | None => String::new(),
    })
}

/// Active/inactive label used in list rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Situacao {
    Ativo,
    Inativo,
}

impl From<bool> for Situacao {
    fn from(inativo: bool) -> Self {
        if inativo { Self::Inativo } else { Self::Ativo }
    }
}

impl fmt::Display for Situacao {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Ativo => "Ativo",
            Self::Inativo => "Inativo",
        })
    }
}
