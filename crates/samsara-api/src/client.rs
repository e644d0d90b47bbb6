// Hand-crafted async HTTP client for the record store.
//
// Paths: <base>/collections/<name>/records[/<id>]
// Auth:  Authorization: Bearer <token>

use std::sync::RwLock;

use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, trace};
use url::Url;

use crate::error::Error;
use crate::query::{Filter, ListQuery, MAX_PER_PAGE, Sort};
use crate::transport::TransportConfig;
use crate::types::ListResult;

// ── Error response shape from the record store ───────────────────────

#[derive(serde::Deserialize)]
struct ErrorResponse {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    data: Option<serde_json::Value>,
}

// ── Client ───────────────────────────────────────────────────────────

/// Async client for the record store's collections/records API.
///
/// Every method is one HTTP round trip. Nothing is cached and nothing is
/// retried; chaining calls into larger operations is the caller's job.
pub struct RecordClient {
    http: reqwest::Client,
    base_url: Url,
    /// Bearer token attached to every request once a session exists.
    token: RwLock<Option<SecretString>>,
}

impl RecordClient {
    // ── Constructors ─────────────────────────────────────────────────

    /// Build from the store base URL (e.g. `https://store.example.com/api`).
    pub fn new(base_url: &str, transport: &TransportConfig) -> Result<Self, Error> {
        let http = transport.build_client()?;
        Self::with_client(http, base_url)
    }

    /// Wrap an existing `reqwest::Client`.
    pub fn with_client(http: reqwest::Client, base_url: &str) -> Result<Self, Error> {
        Ok(Self {
            http,
            base_url: Self::normalize_base_url(base_url)?,
            token: RwLock::new(None),
        })
    }

    /// Ensure the base path ends with `/` so relative joins append.
    fn normalize_base_url(raw: &str) -> Result<Url, Error> {
        let mut url = Url::parse(raw)?;
        let path = url.path().trim_end_matches('/').to_owned();
        url.set_path(&format!("{path}/"));
        Ok(url)
    }

    /// The normalized store base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// The underlying HTTP client.
    pub fn http(&self) -> &reqwest::Client {
        &self.http
    }

    // ── Token ────────────────────────────────────────────────────────

    pub fn set_token(&self, token: SecretString) {
        debug!("storing session token");
        *self.token.write().expect("token lock poisoned") = Some(token);
    }

    pub fn clear_token(&self) {
        *self.token.write().expect("token lock poisoned") = None;
    }

    pub fn has_token(&self) -> bool {
        self.token.read().expect("token lock poisoned").is_some()
    }

    fn authorize(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        let guard = self.token.read().expect("token lock poisoned");
        match guard.as_ref() {
            Some(token) => builder.bearer_auth(token.expose_secret()),
            None => builder,
        }
    }

    // ── URL builders ─────────────────────────────────────────────────

    /// Join a relative path onto the base URL.
    pub(crate) fn url(&self, path: &str) -> Result<Url, Error> {
        Ok(self.base_url.join(path)?)
    }

    fn records_path(collection: &str) -> String {
        format!("collections/{collection}/records")
    }

    fn record_path(collection: &str, id: &str) -> String {
        format!("collections/{collection}/records/{id}")
    }

    // ── HTTP verbs ───────────────────────────────────────────────────

    pub(crate) async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, String)],
    ) -> Result<T, Error> {
        let url = self.url(path)?;
        debug!("GET {url} params={params:?}");

        let resp = self.authorize(self.http.get(url)).query(params).send().await?;
        self.handle_response(resp).await
    }

    pub(crate) async fn post_json<T: DeserializeOwned, B: Serialize + Sync + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, Error> {
        let url = self.url(path)?;
        debug!("POST {url}");

        let resp = self.authorize(self.http.post(url)).json(body).send().await?;
        self.handle_response(resp).await
    }

    pub(crate) async fn post_multipart<T: DeserializeOwned>(
        &self,
        path: &str,
        form: reqwest::multipart::Form,
    ) -> Result<T, Error> {
        let url = self.url(path)?;
        debug!("POST {url} (multipart)");

        let resp = self
            .authorize(self.http.post(url))
            .multipart(form)
            .send()
            .await?;
        self.handle_response(resp).await
    }

    async fn patch_json<T: DeserializeOwned, B: Serialize + Sync + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, Error> {
        let url = self.url(path)?;
        debug!("PATCH {url}");

        let resp = self.authorize(self.http.patch(url)).json(body).send().await?;
        self.handle_response(resp).await
    }

    pub(crate) async fn post_empty<B: Serialize + Sync + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<(), Error> {
        let url = self.url(path)?;
        debug!("POST {url}");

        let resp = self.authorize(self.http.post(url)).json(body).send().await?;
        self.handle_empty(resp).await
    }

    async fn delete_path(&self, path: &str) -> Result<(), Error> {
        let url = self.url(path)?;
        debug!("DELETE {url}");

        let resp = self.authorize(self.http.delete(url)).send().await?;
        self.handle_empty(resp).await
    }

    // ── Response handling ────────────────────────────────────────────

    async fn handle_response<T: DeserializeOwned>(
        &self,
        resp: reqwest::Response,
    ) -> Result<T, Error> {
        let status = resp.status();
        if status.is_success() {
            let body = resp.text().await?;
            trace!(len = body.len(), "response body received");
            serde_json::from_str(&body).map_err(|e| {
                let preview: String = body.chars().take(200).collect();
                Error::Deserialization {
                    message: format!("{e} (body preview: {preview:?})"),
                    body,
                }
            })
        } else {
            Err(self.parse_error(status, resp).await)
        }
    }

    async fn handle_empty(&self, resp: reqwest::Response) -> Result<(), Error> {
        let status = resp.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(self.parse_error(status, resp).await)
        }
    }

    async fn parse_error(&self, status: reqwest::StatusCode, resp: reqwest::Response) -> Error {
        if status == reqwest::StatusCode::UNAUTHORIZED {
            return Error::SessionExpired;
        }

        let raw = resp.text().await.unwrap_or_default();

        if let Ok(err) = serde_json::from_str::<ErrorResponse>(&raw) {
            Error::Api {
                status: status.as_u16(),
                message: err.message.unwrap_or_else(|| status.to_string()),
                data: err.data.filter(|d| !d.as_object().is_some_and(serde_json::Map::is_empty)),
            }
        } else {
            Error::Api {
                status: status.as_u16(),
                message: if raw.is_empty() {
                    status.to_string()
                } else {
                    raw
                },
                data: None,
            }
        }
    }

    // ━━ Public API ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

    /// Fetch one page of `collection`.
    pub async fn list<T: DeserializeOwned>(
        &self,
        collection: &str,
        query: &ListQuery,
    ) -> Result<ListResult<T>, Error> {
        self.get_json(&Self::records_path(collection), &query.to_params())
            .await
    }

    /// Collect every page of `collection` into a single `Vec<T>`.
    pub async fn list_all<T: DeserializeOwned>(
        &self,
        collection: &str,
        sort: Option<Sort>,
        filter: Option<Filter>,
    ) -> Result<Vec<T>, Error> {
        let mut query = ListQuery::new().per_page(MAX_PER_PAGE);
        query.sort = sort;
        query.filter = filter;

        let mut all = Vec::new();
        loop {
            let page: ListResult<T> = self.list(collection, &query).await?;
            let last = page.is_last() || page.items.is_empty();
            all.extend(page.items);
            if last {
                break;
            }
            query.page += 1;
        }

        Ok(all)
    }

    /// Fetch a single record by id, optionally inlining relations.
    pub async fn get<T: DeserializeOwned>(
        &self,
        collection: &str,
        id: &str,
        expand: &[&str],
    ) -> Result<T, Error> {
        let params = if expand.is_empty() {
            Vec::new()
        } else {
            vec![("expand", expand.join(","))]
        };
        self.get_json(&Self::record_path(collection, id), &params)
            .await
    }

    /// Create a record and return it as stored.
    pub async fn create<T: DeserializeOwned, B: Serialize + Sync + ?Sized>(
        &self,
        collection: &str,
        body: &B,
    ) -> Result<T, Error> {
        self.post_json(&Self::records_path(collection), body).await
    }

    /// Partially update a record (PATCH) and return it as stored.
    pub async fn update<T: DeserializeOwned, B: Serialize + Sync + ?Sized>(
        &self,
        collection: &str,
        id: &str,
        body: &B,
    ) -> Result<T, Error> {
        self.patch_json(&Self::record_path(collection, id), body)
            .await
    }

    /// Hard-delete a record.
    pub async fn delete(&self, collection: &str, id: &str) -> Result<(), Error> {
        self.delete_path(&Self::record_path(collection, id)).await
    }
}
