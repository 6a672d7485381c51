use serde::{Deserialize, Serialize};

/// Describes content about to be uploaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentMetadata {
    pub file_name: String,
    pub file_size_in_bytes: u64,
    pub http_content_type: String,
}

impl ContentMetadata {
    pub fn new(
        file_name: impl Into<String>,
        file_size_in_bytes: u64,
        http_content_type: impl Into<String>,
    ) -> Self {
        Self {
            file_name: file_name.into(),
            file_size_in_bytes,
            http_content_type: http_content_type.into(),
        }
    }
}

/// Upload target issued by `POST /content`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PresignedUrl {
    pub presigned_url: String,
    pub content_key: String,
}

/// Handle to uploaded content, used as the value of a media attribute.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StreamData {
    pub content_key: String,
}
