//! The typed object client.

use crate::config::StarhiveConfig;
use crate::error::{ClientError, ClientResult};
use crate::registry::DecoderRegistry;
use crate::request::ObjectData;
use crate::response::{ObjectBody, PageEnvelope};
use reqwest::{Client, Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use starhive_model::{Page, Space, StarhiveObject, StarhiveType, StarhiveTypeEnriched};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Header carrying the workspace every request is scoped to.
pub const WORKSPACE_HEADER: &str = "starhive-workspace-id";

/// Offset and page size of a paginated request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub offset: u64,
    pub limit: u64,
}

impl Pagination {
    pub const DEFAULT_LIMIT: u64 = 50;

    pub fn new(offset: u64, limit: u64) -> Self {
        Self { offset, limit }
    }

    /// The page following this one, if `page` was not the last.
    pub fn next<T>(&self, page: &Page<T>) -> Option<Self> {
        page.next_offset(self.offset).map(|offset| Self {
            offset,
            limit: self.limit,
        })
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            offset: 0,
            limit: Self::DEFAULT_LIMIT,
        }
    }
}

/// REST client for a single Starhive workspace.
///
/// Cheap to clone: clones share the HTTP connection pool and the decoder
/// registry. Nothing is retried and no timeout is applied beyond what the
/// supplied `reqwest::Client` does.
#[derive(Debug, Clone)]
pub struct StarhiveClient {
    config: StarhiveConfig,
    registry: Arc<DecoderRegistry>,
    http: Client,
}

impl StarhiveClient {
    /// Creates a client with a default HTTP transport.
    ///
    /// Fails if the API token or workspace id is empty.
    pub fn new(config: StarhiveConfig, registry: DecoderRegistry) -> ClientResult<Self> {
        config.validate()?;
        let http = Client::builder().build()?;
        Ok(Self {
            config,
            registry: Arc::new(registry),
            http,
        })
    }

    /// Creates a client on top of a caller-configured `reqwest::Client`.
    pub fn with_http_client(
        config: StarhiveConfig,
        registry: DecoderRegistry,
        http: Client,
    ) -> ClientResult<Self> {
        config.validate()?;
        Ok(Self {
            config,
            registry: Arc::new(registry),
            http,
        })
    }

    /// Creates a client from `STARHIVE_*` environment variables.
    pub fn from_env(registry: DecoderRegistry) -> ClientResult<Self> {
        Self::new(StarhiveConfig::from_env()?, registry)
    }

    pub fn config(&self) -> &StarhiveConfig {
        &self.config
    }

    pub fn registry(&self) -> &DecoderRegistry {
        &self.registry
    }

    /// Retrieves a single object, decoded with the decoder for `type_id`.
    pub async fn get_object<T: StarhiveObject>(&self, id: &str, type_id: &str) -> ClientResult<T> {
        let path = format!("/object/{}", urlencoding::encode(id));
        let body: ObjectBody = self.send_json(self.request(Method::GET, &path)).await?;
        body.decode(&self.registry, type_id)
    }

    /// Creates an object and returns it as stored by the server.
    ///
    /// Attributes the object does not set are created without a value.
    pub async fn create_object<T: StarhiveObject>(&self, object: &T) -> ClientResult<T> {
        let type_id = object.starhive_type_id().to_string();
        let mut data = ObjectData::from_object(object);
        data.type_id = Some(type_id.clone());

        let body: ObjectBody = self
            .send_json(self.request(Method::POST, "/object").json(&data))
            .await?;
        info!("Created {} object {}", type_id, body.id);
        body.decode(&self.registry, &type_id)
    }

    /// Replaces an existing object.
    ///
    /// Every attribute the object does not set is cleared on the server
    /// (workflow attributes excepted). To change a single attribute, load the
    /// object first and send it back whole.
    pub async fn update_object<T: StarhiveObject>(&self, object: &T) -> ClientResult<T> {
        let id = match object.id() {
            Some(id) if !id.is_empty() => id.to_string(),
            _ => return Err(ClientError::MissingObjectId),
        };
        let data = ObjectData::from_object(object);
        let path = format!("/object/{}", urlencoding::encode(&id));

        let body: ObjectBody = self
            .send_json(self.request(Method::PATCH, &path).json(&data))
            .await?;
        info!("Updated {} object {}", object.starhive_type_id(), id);
        body.decode(&self.registry, object.starhive_type_id())
    }

    /// Searches objects of a type with a starQL query.
    ///
    /// Each result is decoded with the decoder for its own type id. A single
    /// result without a registered decoder fails the whole page.
    pub async fn search<T: StarhiveObject>(
        &self,
        type_id: &str,
        query: &str,
        pagination: Pagination,
    ) -> ClientResult<Page<T>> {
        let path = format!(
            "/search?typeId={}&offset={}&limit={}&query={}",
            urlencoding::encode(type_id),
            pagination.offset,
            pagination.limit,
            urlencoding::encode(query)
        );
        let envelope: PageEnvelope<ObjectBody> =
            self.send_json(self.request(Method::GET, &path)).await?;
        envelope.into_page(|body| {
            let result_type = body.type_id.clone().unwrap_or_else(|| type_id.to_string());
            body.decode(&self.registry, &result_type)
        })
    }

    /// Lists the spaces of the workspace.
    pub async fn get_spaces(&self, pagination: Pagination) -> ClientResult<Page<Space>> {
        self.list("/space", pagination).await
    }

    /// Lists the types of the workspace.
    pub async fn get_types(&self, pagination: Pagination) -> ClientResult<Page<StarhiveType>> {
        self.list("/type", pagination).await
    }

    /// Lists the types of the workspace together with their attributes.
    pub async fn get_types_enriched(
        &self,
        pagination: Pagination,
    ) -> ClientResult<Page<StarhiveTypeEnriched>> {
        self.list("/type/enriched", pagination).await
    }

    async fn list<T: DeserializeOwned>(&self, path: &str, pagination: Pagination) -> ClientResult<Page<T>> {
        let path = format!(
            "{path}?offset={}&limit={}",
            pagination.offset, pagination.limit
        );
        let envelope: PageEnvelope<T> = self.send_json(self.request(Method::GET, &path)).await?;
        envelope.into_page(Ok)
    }

    /// Builds an authorized request against an API path.
    pub(crate) fn request(&self, method: Method, path: &str) -> RequestBuilder {
        debug!("{} {}", method, path);
        self.http
            .request(method, self.config.url(path))
            .bearer_auth(&self.config.api_token)
            .header(WORKSPACE_HEADER, self.config.workspace_id.as_str())
    }

    /// Builds a request without API credentials, for presigned URLs.
    pub(crate) fn raw_request(&self, method: Method, url: &str) -> RequestBuilder {
        debug!("{} <presigned url>", method);
        self.http.request(method, url)
    }

    /// Sends a request, turning network failures and non-2xx statuses into errors.
    pub(crate) async fn send(&self, request: RequestBuilder) -> ClientResult<Response> {
        let response = request.send().await.map_err(|e| {
            warn!("Starhive request failed: {e}");
            ClientError::Http(e)
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!("Starhive request failed with status {status}: {body}");
            return Err(ClientError::Api {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }

    pub(crate) async fn send_json<T: DeserializeOwned>(&self, request: RequestBuilder) -> ClientResult<T> {
        let response = self.send(request).await?;
        let bytes = response.bytes().await.map_err(|e| {
            warn!("Failed to read Starhive response body: {e}");
            ClientError::Http(e)
        })?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}
