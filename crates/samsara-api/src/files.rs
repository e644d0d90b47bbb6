// File attachments
//
// Files live in `<collection>_files` sub-collections. Each file record
// points at its parent through the `record` field; downloads are plain
// URLs built from collection, record id and stored file name.

use std::path::Path;

use reqwest::multipart::{Form, Part};
use tracing::debug;
use url::Url;

use crate::client::RecordClient;
use crate::error::Error;
use crate::query::{Filter, Sort};
use crate::types::FileRecord;

/// Name of the sub-collection holding files for `parent_collection`.
pub fn files_collection(parent_collection: &str) -> String {
    format!("{parent_collection}_files")
}

impl RecordClient {
    /// Upload `bytes` as a file attached to `parent_id`.
    pub async fn upload_file(
        &self,
        parent_collection: &str,
        parent_id: &str,
        file_name: &str,
        bytes: Vec<u8>,
    ) -> Result<FileRecord, Error> {
        let collection = files_collection(parent_collection);
        debug!(collection, parent_id, file_name, "uploading file");

        let form = Form::new()
            .text("record", parent_id.to_owned())
            .part("file", Part::bytes(bytes).file_name(file_name.to_owned()));

        self.post_multipart(&format!("collections/{collection}/records"), form)
            .await
    }

    /// Read a local file and upload it.
    pub async fn upload_path(
        &self,
        parent_collection: &str,
        parent_id: &str,
        path: &Path,
    ) -> Result<FileRecord, Error> {
        let bytes = tokio::fs::read(path).await?;
        let file_name = path
            .file_name()
            .map_or_else(|| "upload".to_owned(), |n| n.to_string_lossy().into_owned());
        self.upload_file(parent_collection, parent_id, &file_name, bytes)
            .await
    }

    /// All files attached to `parent_id`, newest first.
    pub async fn list_files(
        &self,
        parent_collection: &str,
        parent_id: &str,
    ) -> Result<Vec<FileRecord>, Error> {
        self.list_all(
            &files_collection(parent_collection),
            Some(Sort::desc("created")),
            Some(Filter::eq("record", parent_id)),
        )
        .await
    }

    /// Delete one file record (and its blob).
    pub async fn delete_file(&self, parent_collection: &str, file_id: &str) -> Result<(), Error> {
        self.delete(&files_collection(parent_collection), file_id)
            .await
    }

    /// Direct download URL: `<base>/files/<collection>/<record>/<file>`.
    pub fn file_url(&self, collection: &str, record_id: &str, file_name: &str) -> Result<Url, Error> {
        self.url(&format!("files/{collection}/{record_id}/{file_name}"))
    }
}
