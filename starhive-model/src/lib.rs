//! Data model for the Starhive typed object client.
//!
//! This crate holds the types shared between generated object code and the
//! HTTP client, without doing any I/O:
//! - [`AttributeValue`]: the closed set of attribute kinds an object can carry
//! - [`StarhiveObject`]: the capability every generated domain type implements
//! - [`JsonDecoder`]: per-type builder that turns raw wire records into objects
//! - [`Page`], [`BulkResponse`]: result envelopes returned by the API
//!
//! Generated decoders usually lean on [`parse_values`] to turn raw attribute
//! strings back into typed values. [`DynamicObject`] and [`DynamicDecoder`]
//! cover types for which no code has been generated.

mod attribute;
mod bulk;
mod catalog;
mod content;
mod dynamic;
mod object;
mod page;
mod parse;

pub use attribute::{
    Attribute, AttributeKind, AttributeValue, Location, OptionValue, User, Workflow,
    WorkflowState, WorkflowTransition,
};
pub use bulk::{BulkItemResult, BulkResponse, OperationAction, Violation};
pub use catalog::{Space, StarhiveAttribute, StarhiveType, StarhiveTypeEnriched};
pub use content::{ContentMetadata, PresignedUrl, StreamData};
pub use dynamic::{DynamicDecoder, DynamicObject};
pub use object::{Completeness, JsonAttributeValue, JsonDecoder, StarhiveObject};
pub use page::Page;
pub use parse::parse_values;

/// Result type alias using the crate's error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while interpreting raw attribute values.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid {kind} value: {raw:?}")]
    InvalidValue { kind: AttributeKind, raw: String },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
