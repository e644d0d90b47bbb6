use samsara_api::{ListQuery, ListResult};
use tracing::info;
use validator::Validate;

use crate::error::CoreError;
use crate::model::equipamento::{EquipamentoEdit, EquipamentoInsert};
use crate::model::{Equipamento, EquipamentoRow, EquipamentoUpdate, NewEquipamento};
use crate::reconcile::{reconcile_equipamento, revision_on_create, revision_on_edit};
use crate::repo::Repo;
use crate::uniqueness::{CreateOutcome, conflict_from_store};

/// Equipment writes: uniqueness check, insert with the revision fields,
/// then shadow reconciliation.
#[derive(Clone, Copy)]
pub struct Equipamentos<'a> {
    repo: Repo<'a, Equipamento>,
}

impl<'a> Equipamentos<'a> {
    pub(crate) fn new(repo: Repo<'a, Equipamento>) -> Self {
        Self { repo }
    }

    /// The underlying accessor, for reads, attachments and the toggle.
    pub fn repo(&self) -> Repo<'a, Equipamento> {
        self.repo
    }

    pub async fn list(&self, query: ListQuery) -> Result<ListResult<EquipamentoRow>, CoreError> {
        self.repo.list(query).await
    }

    /// Fetch with the group expanded, so the revision level can be read.
    pub async fn get(&self, id: &str) -> Result<Equipamento, CoreError> {
        self.repo.get_expanded(id, &["grupo_equipamento"]).await
    }

    /// Create a piece of equipment.
    ///
    /// The current reading starts at the baseline. Returns
    /// [`CreateOutcome::Conflict`] without writing anything when another
    /// active record holds the same `codigo`.
    pub async fn create(
        &self,
        body: &NewEquipamento,
    ) -> Result<CreateOutcome<Equipamento>, CoreError> {
        body.validate()?;
        if let Some(duplicate) = self.repo.check_codigo(&body.codigo, None).await? {
            return Ok(CreateOutcome::Conflict(duplicate));
        }

        let insert = EquipamentoInsert {
            body,
            instrumento_medicao_atual: &body.instrumento_medicao_inicio,
            inativo: false,
            revision: revision_on_create(body)?.to_patch(),
        };
        let created = match conflict_from_store(
            &body.codigo,
            self.repo.create_unchecked(&insert).await,
        )? {
            CreateOutcome::Created(record) => record,
            CreateOutcome::Conflict(duplicate) => return Ok(CreateOutcome::Conflict(duplicate)),
        };
        info!(id = %created.id, codigo = %created.codigo, "equipamento created");

        let reconciled = reconcile_equipamento(self.repo.client(), &created).await?;
        Ok(CreateOutcome::Created(reconciled))
    }

    /// Apply a partial update.
    ///
    /// Revision fields are recomputed against the values stored before the
    /// edit and written in the same PATCH; shadows follow in a second one.
    pub async fn update(
        &self,
        id: &str,
        body: &EquipamentoUpdate,
    ) -> Result<Equipamento, CoreError> {
        body.validate()?;
        let taken = match body.codigo.as_deref() {
            Some(codigo) => self.repo.check_codigo(codigo, Some(id)).await?,
            None => None,
        };
        if let Some(duplicate) = taken {
            return Err(CoreError::Duplicate(duplicate));
        }

        let previous = self.repo.get(id).await?;
        let edit = EquipamentoEdit {
            body,
            revision: revision_on_edit(&previous, body)?.to_patch(),
        };
        let codigo = body.codigo.as_deref().unwrap_or(&previous.codigo);
        let updated = match conflict_from_store(codigo, self.repo.patch(id, &edit).await)? {
            CreateOutcome::Created(record) => record,
            CreateOutcome::Conflict(duplicate) => return Err(CoreError::Duplicate(duplicate)),
        };

        reconcile_equipamento(self.repo.client(), &updated).await
    }

    /// Re-run reconciliation from the stored record. Repairs shadows left
    /// stale by an interrupted write; running it twice changes nothing.
    pub async fn reconcile(&self, id: &str) -> Result<Equipamento, CoreError> {
        let record = self.repo.get(id).await?;
        reconcile_equipamento(self.repo.client(), &record).await
    }

    pub async fn deactivate(
        &self,
        id: &str,
        motivo: Option<&str>,
    ) -> Result<Equipamento, CoreError> {
        self.repo.deactivate(id, motivo).await
    }

    pub async fn reactivate(&self, id: &str) -> Result<Equipamento, CoreError> {
        self.repo.reactivate(id).await
    }
}
