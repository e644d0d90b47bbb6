// ── Page-level access control ──
//
// Each back-office user carries a `tipo_acesso`; it decides which areas of
// the application the user may open. The store enforces its own collection
// rules on top of this.

use serde::Serialize;
use strum::{Display, EnumIter, EnumString};

use crate::model::TipoAcesso;

/// A functional area of the back office.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Display, EnumString, EnumIter)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum Area {
    Obras,
    Usuarios,
    Operadores,
    Equipamentos,
    Manutencoes,
    Boletins,
    Multas,
    /// Equipment types and groups.
    Tipos,
    /// Operations and work orders.
    Catalogo,
}

impl TipoAcesso {
    /// Whether this profile may open `area`.
    pub fn can_access(self, area: Area) -> bool {
        match self {
            Self::Administrador => true,
            Self::GerenteDeFrota => area != Area::Usuarios,
            Self::Encarregado => matches!(
                area,
                Area::Boletins | Area::Manutencoes | Area::Operadores
            ),
        }
    }
}
