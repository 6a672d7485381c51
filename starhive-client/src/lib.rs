//! Typed REST client for the Starhive public API.
//!
//! [`StarhiveClient`] serializes typed objects (anything implementing
//! [`StarhiveObject`](starhive_model::StarhiveObject)) into attribute-value
//! requests and decodes responses back through a [`DecoderRegistry`]
//! populated by generated code.
//!
//! # Example
//!
//! ```no_run
//! use starhive_client::{DecoderRegistry, Pagination, StarhiveClient, StarhiveConfig};
//! use starhive_model::{DynamicDecoder, DynamicObject};
//!
//! # async fn run() -> starhive_client::ClientResult<()> {
//! let registry = DecoderRegistry::new()
//!     .with("shoes", || Box::new(DynamicDecoder::new("shoes")));
//! let client = StarhiveClient::new(StarhiveConfig::new("token", "workspace"), registry)?;
//!
//! let page = client
//!     .search::<DynamicObject>("shoes", "Name = Zoom", Pagination::default())
//!     .await?;
//! println!("{} matching shoes", page.total);
//! # Ok(())
//! # }
//! ```
//!
//! Updates replace the whole object: attributes missing from the object sent
//! to [`StarhiveClient::update_object`] are cleared on the server.

mod bulk;
mod client;
mod config;
mod error;
mod registry;
pub mod request;
mod response;
mod upload;

pub use bulk::BULK_OPERATION_LIMIT;
pub use client::{Pagination, StarhiveClient, WORKSPACE_HEADER};
pub use config::{
    API_TOKEN_ENV, BASE_URL_ENV, DEFAULT_BASE_URL, StarhiveConfig, WORKSPACE_ID_ENV,
};
pub use error::{ClientError, ClientResult};
pub use registry::{DecoderFactory, DecoderRegistry};
