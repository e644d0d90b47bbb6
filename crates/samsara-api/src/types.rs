// Wire envelopes returned by the record store.

use serde::{Deserialize, Serialize};

/// One page of a list response.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListResult<T> {
    pub page: u32,
    pub per_page: u32,
    pub total_items: u64,
    pub total_pages: u32,
    pub items: Vec<T>,
}

impl<T> ListResult<T> {
    /// `true` when no page follows this one.
    pub fn is_last(&self) -> bool {
        self.page >= self.total_pages
    }

    /// Transform every item, keeping the page metadata.
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> ListResult<U> {
        ListResult {
            page: self.page,
            per_page: self.per_page,
            total_items: self.total_items,
            total_pages: self.total_pages,
            items: self.items.into_iter().map(f).collect(),
        }
    }
}

/// Successful `auth-with-password` / `auth-refresh` response.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthResponse {
    pub token: String,
    /// The authenticated user record, left untyped here; core decodes it.
    pub record: serde_json::Value,
}

/// Record in a `<collection>_files` sub-collection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileRecord {
    pub id: String,
    #[serde(rename = "collectionName", default)]
    pub collection_name: String,
    /// Parent record id.
    pub record: String,
    /// Stored file name as assigned by the store.
    pub file: String,
    #[serde(default)]
    pub created: String,
}
