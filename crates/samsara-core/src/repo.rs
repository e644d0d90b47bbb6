// ── Generic entity accessor ──
//
// One `Repo<E>` per collection. Every transport failure is re-tagged with
// the verb and entity label; bodies are validated before any network call.

use std::marker::PhantomData;
use std::path::Path;

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;
use validator::Validate;

use samsara_api::{FileRecord, ListQuery, ListResult, RecordClient, Sort};

use crate::error::{CoreError, Verb};
use crate::soft_delete::{Activation, ReasonPolicy};

// ── Traits ──────────────────────────────────────────────────────────

/// A record type owned by one store collection.
pub trait Entity: DeserializeOwned + Send + Sync {
    /// Collection name on the store.
    const COLLECTION: &'static str;
    /// Singular label used in error messages.
    const LABEL: &'static str;

    fn id(&self) -> &str;
}

/// An entity with a display-ready list form.
///
/// `Row` is serialize-only: a list row cannot be fed back into `update`.
pub trait Listed: Entity {
    type Row: Serialize + Send;

    /// Relations to inline on list requests.
    const EXPAND: &'static [&'static str] = &[];
    /// Sort used when the caller gives none.
    const DEFAULT_SORT: &'static str = "-created";

    fn to_row(&self) -> Self::Row;
}

/// An entity whose human-readable name is copied into `*X` shadow fields.
pub trait Named: Entity {
    fn display_name(&self) -> &str;
}

/// Hard delete is allowed (lookup tables only).
pub trait Deletable: Entity {}

/// Reversible `inativo` / `motivo` toggle instead of delete.
pub trait SoftDeletable: Entity {
    const REASON: ReasonPolicy;
    /// Reactivation must first check [`active_codigo`](Self::active_codigo)
    /// against the other active records.
    const GUARDS_CODIGO: bool = false;

    fn activation(&self) -> Activation;

    /// Business key that must stay unique among active records.
    fn active_codigo(&self) -> Option<&str> {
        None
    }
}

/// An entity with a unique business `codigo`.
pub trait Coded: Entity {
    /// Uniqueness only counts active records.
    const ACTIVE_ONLY: bool;

    fn codigo(&self) -> &str;
}

// ── Repo ────────────────────────────────────────────────────────────

/// Typed read/write accessor over one collection.
pub struct Repo<'a, E> {
    client: &'a RecordClient,
    _entity: PhantomData<fn() -> E>,
}

impl<E> Clone for Repo<'_, E> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<E> Copy for Repo<'_, E> {}

impl<'a, E: Entity> Repo<'a, E> {
    pub fn new(client: &'a RecordClient) -> Self {
        Self {
            client,
            _entity: PhantomData,
        }
    }

    pub fn client(&self) -> &'a RecordClient {
        self.client
    }

    fn tag(verb: Verb) -> impl FnOnce(samsara_api::Error) -> CoreError {
        move |e| CoreError::entity(verb, E::LABEL, e)
    }

    /// Raw records, one page, without the display transform.
    pub async fn list_records(&self, query: &ListQuery) -> Result<ListResult<E>, CoreError> {
        self.client
            .list(E::COLLECTION, query)
            .await
            .map_err(Self::tag(Verb::Listing))
    }

    /// Every raw record matching `query.filter`, all pages.
    pub async fn list_all(&self, query: &ListQuery) -> Result<Vec<E>, CoreError> {
        self.client
            .list_all(E::COLLECTION, query.sort.clone(), query.filter.clone())
            .await
            .map_err(Self::tag(Verb::Listing))
    }

    pub async fn get(&self, id: &str) -> Result<E, CoreError> {
        self.get_expanded(id, &[]).await
    }

    pub async fn get_expanded(&self, id: &str, expand: &[&str]) -> Result<E, CoreError> {
        match self.client.get(E::COLLECTION, id, expand).await {
            Ok(record) => Ok(record),
            Err(e) if e.is_not_found() => Err(CoreError::NotFound {
                entity: E::LABEL,
                id: id.to_owned(),
            }),
            Err(e) => Err(CoreError::entity(Verb::Fetching, E::LABEL, e)),
        }
    }

    /// Validate `body` and POST it.
    pub async fn create<B>(&self, body: &B) -> Result<E, CoreError>
    where
        B: Serialize + Validate + Sync,
    {
        body.validate()?;
        self.create_unchecked(body).await
    }

    /// POST without running validation (reconciler patches, pre-validated bodies).
    pub(crate) async fn create_unchecked<B>(&self, body: &B) -> Result<E, CoreError>
    where
        B: Serialize + Sync + ?Sized,
    {
        debug!(collection = E::COLLECTION, "creating record");
        self.client
            .create(E::COLLECTION, body)
            .await
            .map_err(Self::tag(Verb::Creating))
    }

    /// Validate `body` and PATCH it onto `id`.
    pub async fn update<B>(&self, id: &str, body: &B) -> Result<E, CoreError>
    where
        B: Serialize + Validate + Sync,
    {
        body.validate()?;
        self.patch(id, body).await
    }

    /// PATCH without validation.
    pub(crate) async fn patch<B>(&self, id: &str, body: &B) -> Result<E, CoreError>
    where
        B: Serialize + Sync + ?Sized,
    {
        debug!(collection = E::COLLECTION, id, "patching record");
        self.client
            .update(E::COLLECTION, id, body)
            .await
            .map_err(Self::tag(Verb::Updating))
    }

    // ── Attachments ──────────────────────────────────────────────────

    pub async fn attach(&self, id: &str, path: &Path) -> Result<FileRecord, CoreError> {
        self.client
            .upload_path(E::COLLECTION, id, path)
            .await
            .map_err(Self::tag(Verb::Uploading))
    }

    pub async fn attachments(&self, id: &str) -> Result<Vec<FileRecord>, CoreError> {
        self.client
            .list_files(E::COLLECTION, id)
            .await
            .map_err(Self::tag(Verb::Listing))
    }

    pub async fn detach(&self, file_id: &str) -> Result<(), CoreError> {
        self.client
            .delete_file(E::COLLECTION, file_id)
            .await
            .map_err(Self::tag(Verb::Deleting))
    }

    /// Download URL of an attachment record.
    pub fn attachment_url(&self, file: &FileRecord) -> Result<Url, CoreError> {
        let collection = samsara_api::files::files_collection(E::COLLECTION);
        self.client
            .file_url(&collection, &file.id, &file.file)
            .map_err(CoreError::from)
    }
}

impl<E: Listed> Repo<'_, E> {
    /// One page in display form.
    ///
    /// Applies the entity's default sort and expansions when the query
    /// does not set them.
    pub async fn list(&self, query: ListQuery) -> Result<ListResult<E::Row>, CoreError> {
        let mut query = query;
        if query.sort.is_none() {
            query.sort = Sort::parse(E::DEFAULT_SORT);
        }
        for relation in E::EXPAND {
            if !query.expand.iter().any(|r| r == relation) {
                query.expand.push((*relation).to_owned());
            }
        }
        let page = self.list_records(&query).await?;
        Ok(page.map(|record| record.to_row()))
    }
}

impl<E: Deletable> Repo<'_, E> {
    /// Hard delete. A store refusal because other records still point at
    /// this one becomes [`CoreError::InUse`].
    pub async fn delete(&self, id: &str) -> Result<(), CoreError> {
        debug!(collection = E::COLLECTION, id, "deleting record");
        match self.client.delete(E::COLLECTION, id).await {
            Ok(()) => Ok(()),
            Err(e) if e.is_required_relation() => Err(CoreError::InUse {
                entity: E::LABEL,
                id: id.to_owned(),
            }),
            Err(e) => Err(CoreError::entity(Verb::Deleting, E::LABEL, e)),
        }
    }
}

impl<E: SoftDeletable> Repo<'_, E> {
    /// Mark `id` inactive. Whether `motivo` may be empty depends on the
    /// entity's [`ReasonPolicy`].
    pub async fn deactivate(&self, id: &str, motivo: Option<&str>) -> Result<E, CoreError> {
        let patch = Activation::Active
            .deactivate(motivo, E::REASON, E::LABEL)?
            .to_patch();
        self.patch(id, &patch).await
    }

    /// Mark `id` active again and clear its `motivo`.
    ///
    /// For entities that guard a `codigo`, refused with
    /// [`CoreError::Duplicate`] while another active record holds it.
    pub async fn reactivate(&self, id: &str) -> Result<E, CoreError> {
        if E::GUARDS_CODIGO {
            let current = self.get(id).await?;
            return self.reactivate_record(&current).await;
        }
        self.patch_active(id).await
    }

    /// Flip the current state: deactivate an active record, reactivate an
    /// inactive one.
    pub async fn toggle(&self, id: &str, motivo: Option<&str>) -> Result<E, CoreError> {
        let current = self.get(id).await?;
        match current.activation() {
            Activation::Active => self.deactivate(id, motivo).await,
            Activation::Inactive { .. } => self.reactivate_record(&current).await,
        }
    }

    async fn reactivate_record(&self, current: &E) -> Result<E, CoreError> {
        if let Some(codigo) = current.active_codigo() {
            if let Some(duplicate) = self.active_duplicate(codigo, current.id()).await? {
                return Err(CoreError::Duplicate(duplicate));
            }
        }
        self.patch_active(current.id()).await
    }

    async fn patch_active(&self, id: &str) -> Result<E, CoreError> {
        let patch = Activation::Inactive {
            motivo: String::new(),
        }
        .reactivate()
        .to_patch();
        self.patch(id, &patch).await
    }
}

impl<E: Named> Repo<'_, E> {
    /// Display name of the related record `id`, or `""` when the relation
    /// is unset.
    pub async fn display_name_of(&self, id: &str) -> Result<String, CoreError> {
        if id.is_empty() {
            return Ok(String::new());
        }
        Ok(self.get(id).await?.display_name().to_owned())
    }
}
