use samsara_api::{ListQuery, ListResult};

use crate::error::CoreError;
use crate::model::{
    EquipamentoTipo, EquipamentoTipoRow, EquipamentoTipoUpdate, NewEquipamentoTipo,
};
use crate::reconcile::reconcile_equipamento_tipo;
use crate::repo::Repo;

#[derive(Clone, Copy)]
pub struct EquipamentoTipos<'a> {
    repo: Repo<'a, EquipamentoTipo>,
}

impl<'a> EquipamentoTipos<'a> {
    pub(crate) fn new(repo: Repo<'a, EquipamentoTipo>) -> Self {
        Self { repo }
    }

    pub fn repo(&self) -> Repo<'a, EquipamentoTipo> {
        self.repo
    }

    pub async fn list(
        &self,
        query: ListQuery,
    ) -> Result<ListResult<EquipamentoTipoRow>, CoreError> {
        self.repo.list(query).await
    }

    pub async fn get(&self, id: &str) -> Result<EquipamentoTipo, CoreError> {
        self.repo.get(id).await
    }

    pub async fn create(&self, body: &NewEquipamentoTipo) -> Result<EquipamentoTipo, CoreError> {
        let created = self.repo.create(body).await?;
        reconcile_equipamento_tipo(self.repo.client(), &created).await
    }

    pub async fn update(
        &self,
        id: &str,
        body: &EquipamentoTipoUpdate,
    ) -> Result<EquipamentoTipo, CoreError> {
        let updated = self.repo.update(id, body).await?;
        reconcile_equipamento_tipo(self.repo.client(), &updated).await
    }

    pub async fn reconcile(&self, id: &str) -> Result<EquipamentoTipo, CoreError> {
        let record = self.repo.get(id).await?;
        reconcile_equipamento_tipo(self.repo.client(), &record).await
    }

    pub async fn deactivate(
        &self,
        id: &str,
        motivo: Option<&str>,
    ) -> Result<EquipamentoTipo, CoreError> {
        self.repo.deactivate(id, motivo).await
    }

    pub async fn reactivate(&self, id: &str) -> Result<EquipamentoTipo, CoreError> {
        self.repo.reactivate(id).await
    }
}
