use samsara_api::{ListQuery, ListResult};

use crate::error::CoreError;
use crate::model::{NewOperador, Operador, OperadorRow, OperadorUpdate};
use crate::reconcile::reconcile_operador;
use crate::repo::Repo;

#[derive(Clone, Copy)]
pub struct Operadores<'a> {
    repo: Repo<'a, Operador>,
}

impl<'a> Operadores<'a> {
    pub(crate) fn new(repo: Repo<'a, Operador>) -> Self {
        Self { repo }
    }

    pub fn repo(&self) -> Repo<'a, Operador> {
        self.repo
    }

    pub async fn list(&self, query: ListQuery) -> Result<ListResult<OperadorRow>, CoreError> {
        self.repo.list(query).await
    }

    pub async fn get(&self, id: &str) -> Result<Operador, CoreError> {
        self.repo.get(id).await
    }

    pub async fn create(&self, body: &NewOperador) -> Result<Operador, CoreError> {
        let created = self.repo.create(body).await?;
        reconcile_operador(self.repo.client(), &created).await
    }

    pub async fn update(&self, id: &str, body: &OperadorUpdate) -> Result<Operador, CoreError> {
        let updated = self.repo.update(id, body).await?;
        reconcile_operador(self.repo.client(), &updated).await
    }

    pub async fn reconcile(&self, id: &str) -> Result<Operador, CoreError> {
        let record = self.repo.get(id).await?;
        reconcile_operador(self.repo.client(), &record).await
    }

    /// Operators need a reason to be deactivated.
    pub async fn deactivate(&self, id: &str, motivo: Option<&str>) -> Result<Operador, CoreError> {
        self.repo.deactivate(id, motivo).await
    }

    pub async fn reactivate(&self, id: &str) -> Result<Operador, CoreError> {
        self.repo.reactivate(id).await
    }
}
