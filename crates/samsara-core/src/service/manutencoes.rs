use samsara_api::{ListQuery, ListResult};
use tracing::info;
use validator::Validate;

use crate::error::CoreError;
use crate::model::manutencao::ManutencaoInsert;
use crate::model::{
    Equipamento, Manutencao, ManutencaoRow, ManutencaoUpdate, NewManutencao, Operador,
};
use crate::reconcile::{
    apply_manutencao, equipamento_reading_patch, manutencao_shadows, reconcile_manutencao,
};
use crate::repo::Repo;

/// Maintenance events and their cascade onto equipment and boletim.
#[derive(Clone, Copy)]
pub struct Manutencoes<'a> {
    repo: Repo<'a, Manutencao>,
}

impl<'a> Manutencoes<'a> {
    pub(crate) fn new(repo: Repo<'a, Manutencao>) -> Self {
        Self { repo }
    }

    pub fn repo(&self) -> Repo<'a, Manutencao> {
        self.repo
    }

    pub async fn list(&self, query: ListQuery) -> Result<ListResult<ManutencaoRow>, CoreError> {
        self.repo.list(query).await
    }

    pub async fn get(&self, id: &str) -> Result<Manutencao, CoreError> {
        self.repo.get(id).await
    }

    /// Record a maintenance event.
    ///
    /// The shadows are resolved before the insert, so a missing equipment
    /// or operator fails without writing. The equipment reading and revision
    /// fields are checked up front for the same reason. After the insert the
    /// equipment and (when linked) the boletim are patched in that order.
    pub async fn create(&self, body: &NewManutencao) -> Result<Manutencao, CoreError> {
        body.validate()?;
        let client = self.repo.client();

        let equipamento = Repo::<Equipamento>::new(client).get(&body.equipamento).await?;
        let operador = Repo::<Operador>::new(client).get(&body.feito_por).await?;
        equipamento_reading_patch(&equipamento, &body.tipo_manutencao, &body.im_atual)?;

        let insert = ManutencaoInsert {
            body,
            shadows: manutencao_shadows(&equipamento, &operador),
            inativo: false,
        };
        let created = self.repo.create_unchecked(&insert).await?;
        info!(
            id = %created.id,
            equipamento = %equipamento.codigo,
            tipo = %created.tipo_manutencao,
            "manutenção created"
        );

        apply_manutencao(client, &created).await?;
        Ok(created)
    }

    /// Edit the descriptive fields. The equipment reading recorded by the
    /// event is not replayed; only the shadows are refreshed.
    pub async fn update(
        &self,
        id: &str,
        body: &ManutencaoUpdate,
    ) -> Result<Manutencao, CoreError> {
        let updated = self.repo.update(id, body).await?;
        reconcile_manutencao(self.repo.client(), &updated).await
    }

    /// Refresh the shadows of `id` from its current relations.
    pub async fn reconcile(&self, id: &str) -> Result<Manutencao, CoreError> {
        let record = self.repo.get(id).await?;
        reconcile_manutencao(self.repo.client(), &record).await
    }

    /// Push event `id` onto its equipment and boletim again. Used to finish
    /// a cascade that stopped after the insert.
    pub async fn reapply(&self, id: &str) -> Result<Equipamento, CoreError> {
        let record = self.repo.get(id).await?;
        apply_manutencao(self.repo.client(), &record).await
    }
}
