// ── Domain model ──
//
// Wire-shaped records for every collection, their create/update bodies and
// their display rows. Relation fields hold record ids; the `*X` fields
// next to them hold the related record's display name.

pub mod boletim;
pub mod catalogo;
pub mod common;
pub mod equipamento;
pub mod equipamento_tipo;
pub mod manutencao;
pub mod multa;
pub mod obra;
pub mod operador;
pub mod usuario;

use std::borrow::Cow;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use validator::ValidationError;

pub use boletim::{Boletim, BoletimRow, BoletimUpdate, EquipamentoLog, NewBoletim};
pub use catalogo::{CatalogoEntry, CatalogoRow, CatalogoUpdate, OrdemServico, Operacao};
pub use common::{Categoria, InstrumentoMedicao, RecordId, Situacao, TipoAcesso};
pub use equipamento::{Equipamento, EquipamentoRow, EquipamentoUpdate, NewEquipamento};
pub use equipamento_tipo::{
    EquipamentoGrupo, EquipamentoGrupoRow, EquipamentoTipo, EquipamentoTipoRow,
    EquipamentoTipoUpdate, GrupoUpdate, NewEquipamentoTipo, NewGrupo,
};
pub use manutencao::{Manutencao, ManutencaoRow, ManutencaoUpdate, NewManutencao};
pub use multa::{Multa, MultaRow, MultaUpdate, NewMulta};
pub use obra::{NewObra, Obra, ObraRow, ObraUpdate};
pub use operador::{NewOperador, Operador, OperadorRow, OperadorUpdate};
pub use usuario::{NewUsuario, Usuario, UsuarioRow, UsuarioUpdate};

// ── Field validators shared by the bodies ───────────────────────────

fn invalid(code: &'static str, message: &'static str) -> ValidationError {
    let mut err = ValidationError::new(code);
    err.message = Some(Cow::Borrowed(message));
    err
}

/// `YYYY-MM-DD`, optionally followed by a time part.
pub(crate) fn valid_date(value: &str) -> Result<(), ValidationError> {
    let day = value.get(..10).unwrap_or(value);
    NaiveDate::parse_from_str(day, "%Y-%m-%d")
        .map(|_| ())
        .map_err(|_| invalid("date", "data inválida (use AAAA-MM-DD)"))
}

/// A reading that parses as a number `>= 0`.
pub(crate) fn non_negative_reading(value: &str) -> Result<(), ValidationError> {
    match common::parse_decimal(value) {
        Some(n) if n >= Decimal::ZERO => Ok(()),
        Some(_) => Err(invalid("range", "não pode ser negativo")),
        None => Err(invalid("number", "deve ser um número")),
    }
}

/// A reading that parses as a number `> 0`.
pub(crate) fn positive_reading(value: &str) -> Result<(), ValidationError> {
    match common::parse_decimal(value) {
        Some(n) if n > Decimal::ZERO => Ok(()),
        Some(_) => Err(invalid("range", "deve ser maior que zero")),
        None => Err(invalid("number", "deve ser um número")),
    }
}

/// `HH:MM` on a 24-hour clock.
pub(crate) fn valid_time(value: &str) -> Result<(), ValidationError> {
    chrono::NaiveTime::parse_from_str(value, "%H:%M")
        .map(|_| ())
        .map_err(|_| invalid("time", "hora inválida (use HH:MM)"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn date_accepts_store_timestamps() {
        assert!(valid_date("2024-05-01").is_ok());
        assert!(valid_date("2024-05-01 00:00:00.000Z").is_ok());
        assert!(valid_date("01/05/2024").is_err());
    }

    #[test]
    fn readings() {
        assert!(non_negative_reading("0").is_ok());
        assert!(non_negative_reading("-1").is_err());
        assert!(positive_reading("0").is_err());
        assert!(positive_reading("250,5").is_ok());
        assert!(positive_reading("x").is_err());
    }

    #[test]
    fn times() {
        assert!(valid_time("07:30").is_ok());
        assert!(valid_time("24:10").is_err());
    }
}
