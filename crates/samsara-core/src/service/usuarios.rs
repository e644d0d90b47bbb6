use samsara_api::{ListQuery, ListResult};
use tracing::info;

use crate::error::CoreError;
use crate::model::{NewUsuario, Usuario, UsuarioRow, UsuarioUpdate};
use crate::reconcile::reconcile_usuario;
use crate::repo::Repo;

/// Back-office users. Records live in the store's auth collection, so a
/// create carries the initial password.
#[derive(Clone, Copy)]
pub struct Usuarios<'a> {
    repo: Repo<'a, Usuario>,
}

impl<'a> Usuarios<'a> {
    pub(crate) fn new(repo: Repo<'a, Usuario>) -> Self {
        Self { repo }
    }

    pub fn repo(&self) -> Repo<'a, Usuario> {
        self.repo
    }

    pub async fn list(&self, query: ListQuery) -> Result<ListResult<UsuarioRow>, CoreError> {
        self.repo.list(query).await
    }

    pub async fn get(&self, id: &str) -> Result<Usuario, CoreError> {
        self.repo.get(id).await
    }

    pub async fn create(&self, body: &NewUsuario) -> Result<Usuario, CoreError> {
        let created = self.repo.create(body).await?;
        info!(id = %created.id, username = %created.username, "usuario created");
        reconcile_usuario(self.repo.client(), &created).await
    }

    pub async fn update(&self, id: &str, body: &UsuarioUpdate) -> Result<Usuario, CoreError> {
        let updated = self.repo.update(id, body).await?;
        reconcile_usuario(self.repo.client(), &updated).await
    }

    pub async fn reconcile(&self, id: &str) -> Result<Usuario, CoreError> {
        let record = self.repo.get(id).await?;
        reconcile_usuario(self.repo.client(), &record).await
    }
}
