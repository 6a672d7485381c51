//! Schema-less objects, for types without generated code.

use crate::attribute::{Attribute, AttributeKind, AttributeValue};
use crate::object::{JsonAttributeValue, JsonDecoder, StarhiveObject};
use crate::parse::parse_values;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// An object whose attributes are held in a map keyed by attribute id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DynamicObject {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub type_id: String,
    #[serde(default)]
    pub attributes: BTreeMap<String, AttributeValue>,
}

impl DynamicObject {
    pub fn new(type_id: impl Into<String>) -> Self {
        Self {
            id: None,
            type_id: type_id.into(),
            attributes: BTreeMap::new(),
        }
    }

    #[must_use]
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    #[must_use]
    pub fn with(mut self, attribute_id: impl Into<String>, value: AttributeValue) -> Self {
        self.set(attribute_id, value);
        self
    }

    pub fn set(&mut self, attribute_id: impl Into<String>, value: AttributeValue) {
        self.attributes.insert(attribute_id.into(), value);
    }

    pub fn get(&self, attribute_id: &str) -> Option<&AttributeValue> {
        self.attributes.get(attribute_id)
    }

    pub fn remove(&mut self, attribute_id: &str) -> Option<AttributeValue> {
        self.attributes.remove(attribute_id)
    }
}

impl StarhiveObject for DynamicObject {
    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn starhive_type_id(&self) -> &str {
        &self.type_id
    }

    fn attributes(&self) -> Vec<Attribute> {
        self.attributes
            .iter()
            .map(|(id, value)| Attribute::new(id.clone(), value.clone()))
            .collect()
    }
}

/// Decodes any response into a [`DynamicObject`].
///
/// Attributes listed in the kind map are parsed as that kind; all others are
/// kept as text.
#[derive(Debug, Clone, Default)]
pub struct DynamicDecoder {
    type_id: String,
    kinds: HashMap<String, AttributeKind>,
    id: Option<String>,
    raw: BTreeMap<String, Vec<JsonAttributeValue>>,
}

impl DynamicDecoder {
    pub fn new(type_id: impl Into<String>) -> Self {
        Self {
            type_id: type_id.into(),
            ..Default::default()
        }
    }

    pub fn with_kinds(type_id: impl Into<String>, kinds: HashMap<String, AttributeKind>) -> Self {
        Self {
            type_id: type_id.into(),
            kinds,
            ..Default::default()
        }
    }
}

impl JsonDecoder for DynamicDecoder {
    fn set_id(&mut self, id: String) {
        self.id = Some(id);
    }

    fn visit_json_attribute(&mut self, attribute_id: &str, values: Vec<JsonAttributeValue>) {
        self.raw.insert(attribute_id.to_string(), values);
    }

    fn build(self: Box<Self>) -> crate::Result<Box<dyn StarhiveObject>> {
        let DynamicDecoder {
            type_id,
            kinds,
            id,
            raw,
        } = *self;
        let mut attributes = BTreeMap::new();
        for (attribute_id, values) in raw {
            let kind = kinds
                .get(&attribute_id)
                .copied()
                .unwrap_or(AttributeKind::Text);
            attributes.insert(attribute_id, parse_values(kind, &values)?);
        }
        Ok(Box::new(DynamicObject {
            id,
            type_id,
            attributes,
        }))
    }
}
