// ── Business-key uniqueness ──
//
// `codigo` must be unique among (active) records of a collection. The
// check is a filtered lookup with a page size of one that already excludes
// the record being edited; the store's own unique index is the backstop,
// and its rejection maps to the same outcome.

use std::fmt;

use samsara_api::{Filter, ListQuery};
use serde::Serialize;
use tracing::debug;

use crate::error::CoreError;
use crate::model::RecordId;
use crate::repo::{Coded, Entity, Repo};

/// Another record already holds this `codigo`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DuplicateCodigo {
    pub codigo: String,
    /// Id of the conflicting record, when the lookup found it.
    pub existing_id: Option<RecordId>,
}

impl fmt::Display for DuplicateCodigo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Código existente: {}", self.codigo)
    }
}

/// Result of a create that may be refused for a duplicate business key.
#[derive(Debug, Clone)]
pub enum CreateOutcome<T> {
    Created(T),
    Conflict(DuplicateCodigo),
}

impl<T> CreateOutcome<T> {
    pub fn created(self) -> Option<T> {
        match self {
            Self::Created(value) => Some(value),
            Self::Conflict(_) => None,
        }
    }

    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::Conflict(_))
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> CreateOutcome<U> {
        match self {
            Self::Created(value) => CreateOutcome::Created(f(value)),
            Self::Conflict(dup) => CreateOutcome::Conflict(dup),
        }
    }
}

fn unique_filter(codigo: &str, active_only: bool, except: Option<&str>) -> Filter {
    let mut filter = Filter::eq("codigo", codigo.trim());
    if active_only {
        filter = filter.and(Filter::eq("inativo", false));
    }
    match except {
        Some(id) => filter.and(Filter::ne("id", id)),
        None => filter,
    }
}

/// Filter matching records other than `except` that would collide with
/// `codigo`.
pub fn codigo_filter<E: Coded>(codigo: &str, except: Option<&str>) -> Filter {
    unique_filter(codigo, E::ACTIVE_ONLY, except)
}

fn duplicate_of<E: Entity>(codigo: &str, record: &E) -> DuplicateCodigo {
    debug!(collection = E::COLLECTION, codigo, "codigo already taken");
    DuplicateCodigo {
        codigo: codigo.trim().to_owned(),
        existing_id: Some(record.id().to_owned()),
    }
}

impl<E: Entity> Repo<'_, E> {
    async fn first_matching(&self, filter: Filter) -> Result<Option<E>, CoreError> {
        let query = ListQuery::new().per_page(1).filter(filter);
        let page = self.list_records(&query).await?;
        Ok(page.items.into_iter().next())
    }

    /// Another active record holding `codigo`, checked before `except` is
    /// reactivated.
    pub(crate) async fn active_duplicate(
        &self,
        codigo: &str,
        except: &str,
    ) -> Result<Option<DuplicateCodigo>, CoreError> {
        let existing = self
            .first_matching(unique_filter(codigo, true, Some(except)))
            .await?;
        Ok(existing.map(|record| duplicate_of(codigo, &record)))
    }
}

impl<E: Coded> Repo<'_, E> {
    /// A record other than `except` currently holding `codigo`, if any.
    pub async fn find_by_codigo(
        &self,
        codigo: &str,
        except: Option<&str>,
    ) -> Result<Option<E>, CoreError> {
        self.first_matching(codigo_filter::<E>(codigo, except)).await
    }

    /// `Some(conflict)` when `codigo` is taken by a record other than
    /// `except`.
    pub async fn check_codigo(
        &self,
        codigo: &str,
        except: Option<&str>,
    ) -> Result<Option<DuplicateCodigo>, CoreError> {
        let existing = self.find_by_codigo(codigo, except).await?;
        Ok(existing
            .filter(|record| Some(record.id()) != except)
            .map(|record| duplicate_of(codigo, &record)))
    }
}

/// Map a store-side unique-index rejection on `codigo` to the conflict
/// outcome; pass any other error through.
pub(crate) fn conflict_from_store<T>(
    codigo: &str,
    result: Result<T, CoreError>,
) -> Result<CreateOutcome<T>, CoreError> {
    match result {
        Ok(value) => Ok(CreateOutcome::Created(value)),
        Err(err)
            if err
                .api_source()
                .is_some_and(|e| e.is_not_unique("codigo")) =>
        {
            Ok(CreateOutcome::Conflict(DuplicateCodigo {
                codigo: codigo.trim().to_owned(),
                existing_id: None,
            }))
        }
        Err(err) => Err(err),
    }
}
