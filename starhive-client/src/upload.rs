//! Two-phase content upload.
//!
//! `POST /content` issues a presigned URL and a content key; the bytes are then
//! PUT to the presigned URL without API credentials. The content key is what a
//! media attribute stores.

use crate::client::StarhiveClient;
use crate::error::{ClientError, ClientResult};
use reqwest::Method;
use reqwest::header::{CONTENT_DISPOSITION, CONTENT_LENGTH, CONTENT_TYPE};
use serde::Serialize;
use starhive_model::{ContentMetadata, PresignedUrl, StreamData};
use std::path::Path;
use tracing::info;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct UploadUrlRequest<'a> {
    file_name: &'a str,
    file_size: u64,
    content_type: &'a str,
}

impl StarhiveClient {
    /// Uploads in-memory content and returns its handle.
    ///
    /// `size` must equal `data.len()`; a mismatch is rejected before any
    /// request is sent.
    pub async fn upload_in_memory(
        &self,
        name: &str,
        size: u64,
        content_type: &str,
        data: Vec<u8>,
    ) -> ClientResult<StreamData> {
        if size != data.len() as u64 {
            return Err(ClientError::Config(format!(
                "declared size {size} of {name} does not match {} bytes of content",
                data.len()
            )));
        }
        let metadata = ContentMetadata::new(name, size, content_type);
        self.upload(&metadata, data).await
    }

    /// Uploads a file from disk; the file name becomes the content name.
    pub async fn upload_file(&self, path: &Path, content_type: &str) -> ClientResult<StreamData> {
        let data = tokio::fs::read(path).await?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let metadata = ContentMetadata::new(name, data.len() as u64, content_type);
        self.upload(&metadata, data).await
    }

    async fn upload(&self, metadata: &ContentMetadata, data: Vec<u8>) -> ClientResult<StreamData> {
        let upload_url = self.get_upload_url(metadata).await?;
        self.upload_data(&upload_url, metadata, data).await?;
        info!(
            "Uploaded {} ({} bytes) as {}",
            metadata.file_name, metadata.file_size_in_bytes, upload_url.content_key
        );
        Ok(StreamData {
            content_key: upload_url.content_key,
        })
    }

    async fn get_upload_url(&self, metadata: &ContentMetadata) -> ClientResult<PresignedUrl> {
        let body = UploadUrlRequest {
            file_name: &metadata.file_name,
            file_size: metadata.file_size_in_bytes,
            content_type: &metadata.http_content_type,
        };
        self.send_json(self.request(Method::POST, "/content").json(&body))
            .await
    }

    async fn upload_data(
        &self,
        upload_url: &PresignedUrl,
        metadata: &ContentMetadata,
        data: Vec<u8>,
    ) -> ClientResult<()> {
        let disposition = format!(
            "attachment; filename={}",
            urlencoding::encode(&metadata.file_name)
        );
        let request = self
            .raw_request(Method::PUT, &upload_url.presigned_url)
            .header(CONTENT_DISPOSITION, disposition)
            .header(CONTENT_LENGTH, metadata.file_size_in_bytes)
            .header(CONTENT_TYPE, metadata.http_content_type.as_str())
            .body(data);
        self.send(request).await?;
        Ok(())
    }
}
