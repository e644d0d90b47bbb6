//! Business layer between `samsara-api` and the CLI.
//!
//! This crate owns the domain model and every rule that spans more than
//! one record-store call:
//!
//! - **[`Samsara`]**: facade holding the client and login session. Hands
//!   out one accessor per collection ([`Samsara::equipamentos`],
//!   [`Samsara::manutencoes`], ...).
//!
//! - **[`Repo<E>`]**: typed accessor over one collection. Reads, validated
//!   writes, file attachments, the soft-delete toggle and hard delete for
//!   code tables. `list` always returns display rows, never write bodies.
//!
//! - **[`reconcile`]**: after a write, copies the display names of related
//!   records into the `*X` shadow fields, recomputes equipment revision
//!   fields, and cascades maintenance events onto equipment and boletim.
//!   Chains are sequential and not atomic; a failure after the primary
//!   write is reported as [`CoreError::Reconciliation`] and every chain can
//!   be re-run by id.
//!
//! - **[`revision`]**: pure arithmetic for `proxima_revisao` and
//!   `revisao_status`, plus the overdue / due soon / ok classification.
//!
//! - **[`uniqueness`]**: `codigo` checks that report a duplicate as
//!   [`CreateOutcome::Conflict`] instead of writing.

pub mod access;
pub mod config;
pub mod display;
pub mod error;
pub mod model;
pub mod reconcile;
pub mod repo;
pub mod revision;
pub mod samsara;
pub mod service;
pub mod session;
pub mod soft_delete;
pub mod uniqueness;

// ── Primary re-exports ──────────────────────────────────────────────
pub use access::Area;
pub use config::{AuthCredentials, StoreConfig, TlsVerification};
pub use error::{CoreError, Verb};
pub use repo::{Coded, Deletable, Entity, Listed, Named, Repo, SoftDeletable};
pub use revision::{Revision, RevisionLevel};
pub use samsara::Samsara;
pub use session::Session;
pub use soft_delete::{Activation, ReasonPolicy};
pub use uniqueness::{CreateOutcome, DuplicateCodigo};

// Query building and pages come straight from the transport crate.
pub use samsara_api::{FileRecord, Filter, ListQuery, ListResult, Sort};

pub use model::{
    Boletim, Categoria, Equipamento, EquipamentoGrupo, EquipamentoTipo, InstrumentoMedicao,
    Manutencao, Multa, Obra, Operacao, Operador, OrdemServico, RecordId, Situacao, TipoAcesso,
    Usuario,
};
