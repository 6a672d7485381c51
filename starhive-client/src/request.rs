//! Request bodies and the canonical attribute encoding.
//!
//! Attributes that are absent on the object are left out of the body. The
//! API treats a missing attribute on PATCH as "clear the value", so updates
//! always replace the whole object.

use chrono::SecondsFormat;
use serde::Serialize;
use starhive_model::{AttributeValue, StarhiveObject, Workflow};
use std::collections::BTreeMap;

/// Values of one attribute, encoded as strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AttributeInput {
    pub attribute_id: String,
    pub values: Vec<String>,
}

/// Workflow transition to fire for an attribute.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransitionInput {
    pub transition_id: String,
}

/// Body of `POST /object` and `PATCH /object/{id}`.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectData {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub type_id: Option<String>,
    pub attributes: Vec<AttributeInput>,
    pub transitions: BTreeMap<String, TransitionInput>,
}

impl ObjectData {
    /// Encodes every present attribute of `object`. The type id is not set.
    pub fn from_object(object: &dyn StarhiveObject) -> Self {
        let mut data = ObjectData::default();
        for attribute in object.attributes() {
            let Some(value) = attribute.value else {
                continue;
            };
            if let AttributeValue::Workflow(workflow) = &value {
                data.push_workflow(attribute.attribute_id, workflow);
            } else {
                data.attributes.push(AttributeInput {
                    attribute_id: attribute.attribute_id,
                    values: encode_values(&value),
                });
            }
        }
        data
    }

    fn push_workflow(&mut self, attribute_id: String, workflow: &Workflow) {
        let value = match (&workflow.state, &workflow.transition) {
            (Some(state), _) => state.id.clone(),
            (None, Some(transition)) => transition.to.id.clone(),
            (None, None) => return,
        };
        if let Some(transition) = &workflow.transition {
            self.transitions.insert(
                attribute_id.clone(),
                TransitionInput {
                    transition_id: transition.id.clone(),
                },
            );
        }
        self.attributes.push(AttributeInput {
            attribute_id,
            values: vec![value],
        });
    }
}

/// Canonical string form of a non-workflow attribute value.
pub fn encode_values(value: &AttributeValue) -> Vec<String> {
    match value {
        AttributeValue::Text(v)
        | AttributeValue::Reference(v)
        | AttributeValue::IpAddress(v)
        | AttributeValue::Email(v) => v.clone(),
        AttributeValue::Integer(v) => v.iter().map(i64::to_string).collect(),
        AttributeValue::Decimal(v) => v.iter().map(f64::to_string).collect(),
        AttributeValue::Boolean(v) => v.iter().map(bool::to_string).collect(),
        AttributeValue::Datetime(v) => v
            .iter()
            .map(|dt| dt.to_rfc3339_opts(SecondsFormat::Millis, true))
            .collect(),
        AttributeValue::Date(v) => v.iter().map(|d| d.format("%Y-%m-%d").to_string()).collect(),
        AttributeValue::Option(v) => v.iter().map(|o| o.value().to_string()).collect(),
        AttributeValue::Url(v) => v.iter().map(|u| u.to_string()).collect(),
        AttributeValue::Location(v) => v
            .iter()
            .map(|l| {
                serde_json::json!({
                    "address": l.address,
                    "latitude": l.latitude,
                    "longitude": l.longitude,
                })
                .to_string()
            })
            .collect(),
        AttributeValue::User(v) => v.iter().map(|u| u.id.clone()).collect(),
        AttributeValue::Media(v) => v.iter().map(|m| m.content_key.clone()).collect(),
        AttributeValue::Workflow(w) => w
            .state
            .as_ref()
            .map(|s| s.id.clone())
            .or_else(|| w.transition.as_ref().map(|t| t.to.id.clone()))
            .into_iter()
            .collect(),
    }
}

/// One operation of a bulk request.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "objectOperationType", rename_all = "lowercase")]
pub enum BulkOperation {
    Create {
        #[serde(rename = "typeId")]
        type_id: String,
        attributes: Vec<AttributeInput>,
        transitions: BTreeMap<String, TransitionInput>,
    },
    Patch {
        #[serde(rename = "objectId")]
        object_id: String,
        attributes: Vec<AttributeInput>,
        transitions: BTreeMap<String, TransitionInput>,
    },
    Delete {
        #[serde(rename = "objectId")]
        object_id: String,
    },
}

impl BulkOperation {
    /// Patch when the object has an id, create otherwise.
    pub fn upsert(object: &dyn StarhiveObject) -> Self {
        let ObjectData {
            attributes,
            transitions,
            ..
        } = ObjectData::from_object(object);
        match object.id() {
            Some(id) if !id.is_empty() => BulkOperation::Patch {
                object_id: id.to_string(),
                attributes,
                transitions,
            },
            _ => BulkOperation::Create {
                type_id: object.starhive_type_id().to_string(),
                attributes,
                transitions,
            },
        }
    }

    pub fn delete(object_id: impl Into<String>) -> Self {
        BulkOperation::Delete {
            object_id: object_id.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BulkRequest {
    pub operations: Vec<BulkOperation>,
}
