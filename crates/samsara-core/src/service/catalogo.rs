use samsara_api::{ListQuery, ListResult};
use validator::Validate;

use crate::error::CoreError;
use crate::model::{CatalogoEntry, CatalogoUpdate};
use crate::repo::{Coded, Deletable, Listed, Repo};
use crate::uniqueness::{CreateOutcome, conflict_from_store};

/// Operations or work orders: code tables with unique `codigo` and hard
/// delete.
pub struct Catalogo<'a, E> {
    repo: Repo<'a, E>,
}

impl<E> Clone for Catalogo<'_, E> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<E> Copy for Catalogo<'_, E> {}

impl<'a, E> Catalogo<'a, E>
where
    E: Coded + Deletable + Listed,
{
    pub(crate) fn new(repo: Repo<'a, E>) -> Self {
        Self { repo }
    }

    pub fn repo(&self) -> Repo<'a, E> {
        self.repo
    }

    pub async fn list(&self, query: ListQuery) -> Result<ListResult<E::Row>, CoreError> {
        self.repo.list(query).await
    }

    pub async fn get(&self, id: &str) -> Result<E, CoreError> {
        self.repo.get(id).await
    }

    /// Add an entry unless its `codigo` is already used.
    pub async fn create(&self, body: &CatalogoEntry) -> Result<CreateOutcome<E>, CoreError> {
        body.validate()?;
        if let Some(duplicate) = self.repo.check_codigo(&body.codigo, None).await? {
            return Ok(CreateOutcome::Conflict(duplicate));
        }
        conflict_from_store(&body.codigo, self.repo.create_unchecked(body).await)
    }

    pub async fn update(&self, id: &str, body: &CatalogoUpdate) -> Result<E, CoreError> {
        self.repo.update(id, body).await
    }

    /// Hard delete; refused with [`CoreError::InUse`] while boletins or
    /// equipment types still reference the entry.
    pub async fn delete(&self, id: &str) -> Result<(), CoreError> {
        self.repo.delete(id).await
    }
}
