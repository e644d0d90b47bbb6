use samsara_api::{ListQuery, ListResult};

use crate::error::CoreError;
use crate::model::{Multa, MultaRow, MultaUpdate, NewMulta};
use crate::reconcile::reconcile_multa;
use crate::repo::Repo;

#[derive(Clone, Copy)]
pub struct Multas<'a> {
    repo: Repo<'a, Multa>,
}

impl<'a> Multas<'a> {
    pub(crate) fn new(repo: Repo<'a, Multa>) -> Self {
        Self { repo }
    }

    pub fn repo(&self) -> Repo<'a, Multa> {
        self.repo
    }

    pub async fn list(&self, query: ListQuery) -> Result<ListResult<MultaRow>, CoreError> {
        self.repo.list(query).await
    }

    pub async fn get(&self, id: &str) -> Result<Multa, CoreError> {
        self.repo.get(id).await
    }

    pub async fn create(&self, body: &NewMulta) -> Result<Multa, CoreError> {
        let created = self.repo.create(body).await?;
        reconcile_multa(self.repo.client(), &created).await
    }

    pub async fn update(&self, id: &str, body: &MultaUpdate) -> Result<Multa, CoreError> {
        let updated = self.repo.update(id, body).await?;
        reconcile_multa(self.repo.client(), &updated).await
    }

    pub async fn reconcile(&self, id: &str) -> Result<Multa, CoreError> {
        let record = self.repo.get(id).await?;
        reconcile_multa(self.repo.client(), &record).await
    }

    /// Fines need a reason to be cancelled.
    pub async fn deactivate(&self, id: &str, motivo: Option<&str>) -> Result<Multa, CoreError> {
        self.repo.deactivate(id, motivo).await
    }

    pub async fn reactivate(&self, id: &str) -> Result<Multa, CoreError> {
        self.repo.reactivate(id).await
    }
}
