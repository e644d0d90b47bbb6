use samsara_api::{ListQuery, ListResult};

use crate::error::CoreError;
use crate::model::{Boletim, BoletimRow, BoletimUpdate, NewBoletim};
use crate::reconcile::reconcile_boletim;
use crate::repo::Repo;

#[derive(Clone, Copy)]
pub struct Boletins<'a> {
    repo: Repo<'a, Boletim>,
}

impl<'a> Boletins<'a> {
    pub(crate) fn new(repo: Repo<'a, Boletim>) -> Self {
        Self { repo }
    }

    pub fn repo(&self) -> Repo<'a, Boletim> {
        self.repo
    }

    pub async fn list(&self, query: ListQuery) -> Result<ListResult<BoletimRow>, CoreError> {
        self.repo.list(query).await
    }

    pub async fn get(&self, id: &str) -> Result<Boletim, CoreError> {
        self.repo.get(id).await
    }

    pub async fn create(&self, body: &NewBoletim) -> Result<Boletim, CoreError> {
        let created = self.repo.create(body).await?;
        reconcile_boletim(self.repo.client(), &created).await
    }

    pub async fn update(&self, id: &str, body: &BoletimUpdate) -> Result<Boletim, CoreError> {
        let updated = self.repo.update(id, body).await?;
        reconcile_boletim(self.repo.client(), &updated).await
    }

    pub async fn reconcile(&self, id: &str) -> Result<Boletim, CoreError> {
        let record = self.repo.get(id).await?;
        reconcile_boletim(self.repo.client(), &record).await
    }
}
