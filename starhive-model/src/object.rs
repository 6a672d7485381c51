use crate::attribute::Attribute;
use serde::{Deserialize, Serialize};
use std::any::Any;

/// A typed Starhive object.
///
/// Implemented by generated code, one type per Starhive type. The client only
/// sees objects through this trait; `Any` lets it hand the concrete type back
/// to the caller after decoding.
pub trait StarhiveObject: Any + Send + Sync {
    /// Server-assigned identity, `None` for objects not created yet.
    fn id(&self) -> Option<&str>;

    /// Identifier of the Starhive type this object belongs to.
    fn starhive_type_id(&self) -> &str;

    /// Every attribute the type declares, in declaration order.
    ///
    /// Attributes that are not set must be reported with a `None` value (or
    /// left out). On update the API clears every attribute that is not sent.
    fn attributes(&self) -> Vec<Attribute>;
}

/// A single raw value of an attribute as returned by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JsonAttributeValue {
    pub value_id: String,
    pub value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl JsonAttributeValue {
    pub fn new(value_id: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            value_id: value_id.into(),
            value: value.into(),
            details: None,
        }
    }
}

/// Builds one object of a specific type from raw wire records.
///
/// A fresh decoder is created for every decoded object. The client calls
/// [`set_id`](Self::set_id) once, [`visit_json_attribute`](Self::visit_json_attribute)
/// for each attribute in the response, and finally [`build`](Self::build).
pub trait JsonDecoder: Send {
    fn set_id(&mut self, id: String);

    fn visit_json_attribute(&mut self, attribute_id: &str, values: Vec<JsonAttributeValue>);

    fn build(self: Box<Self>) -> crate::Result<Box<dyn StarhiveObject>>;
}

/// How complete an object is with respect to its type's required attributes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Completeness {
    pub value: f64,
    #[serde(default)]
    pub missing_dependees: Vec<String>,
    #[serde(default)]
    pub completed_dependees: Vec<String>,
}

impl Completeness {
    pub fn is_complete(&self) -> bool {
        self.missing_dependees.is_empty()
    }
}
