// ── Entity services ──
//
// Write paths that do more than one round trip. Each service wraps the
// plain `Repo` for its collection and runs the reconciler after every
// create or update. Entities with no shadow fields (obras, grupos) are
// served by a bare `Repo` from the facade instead.

mod boletins;
mod catalogo;
mod equipamento_tipos;
mod equipamentos;
mod manutencoes;
mod multas;
mod operadores;
mod usuarios;

pub use boletins::Boletins;
pub use catalogo::Catalogo;
pub use equipamento_tipos::EquipamentoTipos;
pub use equipamentos::Equipamentos;
pub use manutencoes::Manutencoes;
pub use multas::Multas;
pub use operadores::Operadores;
pub use usuarios::Usuarios;
