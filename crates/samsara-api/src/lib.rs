//! Async client for the Samsara record store.
//!
//! The store exposes named collections of JSON records under
//! `collections/<name>/records`, token-authenticated with a bearer header.
//! [`RecordClient`] issues one HTTP call per method and maps failures into
//! [`Error`]. Domain rules (shadow fields, revision tracking, uniqueness)
//! live in `samsara-core`.
//!
//! - [`query`]: `sort` / `filter` / pagination parameters and the filter DSL
//! - [`auth`]: password login, token refresh, password reset
//! - [`files`]: `<collection>_files` attachments

pub mod auth;
pub mod client;
pub mod error;
pub mod files;
pub mod query;
pub mod transport;
pub mod types;

pub use client::RecordClient;
pub use error::Error;
pub use query::{Direction, Filter, FilterValue, ListQuery, Sort};
pub use transport::{TlsMode, TransportConfig};
pub use types::{AuthResponse, FileRecord, ListResult};
