//! Lightweight records returned by the space and type listings.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Space {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StarhiveType {
    pub id: String,
    pub name: String,
}

/// Attribute descriptor of an enriched type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StarhiveAttribute {
    pub id: String,
    pub name: String,
    pub attribute_type_id: String,
}

/// A type together with its attribute descriptors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StarhiveTypeEnriched {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub attributes: Vec<StarhiveAttribute>,
}

impl StarhiveTypeEnriched {
    pub fn attribute(&self, attribute_id: &str) -> Option<&StarhiveAttribute> {
        self.attributes.iter().find(|a| a.id == attribute_id)
    }
}
