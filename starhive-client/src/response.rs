//! Response bodies and their decoding.

use crate::error::{ClientError, ClientResult};
use crate::registry::DecoderRegistry;
use serde::Deserialize;
use serde_json::Value;
use starhive_model::{JsonAttributeValue, JsonDecoder, Page, StarhiveObject};
use std::any::Any;

/// An object as returned by the object and search endpoints.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ObjectBody {
    pub id: String,
    #[serde(default)]
    pub type_id: Option<String>,
    #[serde(default)]
    pub attributes: Vec<AttributeBody>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct AttributeBody {
    pub attribute_id: String,
    #[serde(default)]
    pub values: Vec<JsonAttributeValue>,
}

impl ObjectBody {
    /// Feeds this body through `decoder` and builds the object.
    pub fn decode_with(self, mut decoder: Box<dyn JsonDecoder>) -> ClientResult<Box<dyn StarhiveObject>> {
        decoder.set_id(self.id);
        for attribute in self.attributes {
            decoder.visit_json_attribute(&attribute.attribute_id, attribute.values);
        }
        Ok(decoder.build()?)
    }

    /// Decodes with the decoder registered for `type_id` and hands back `T`.
    pub fn decode<T: StarhiveObject>(self, registry: &DecoderRegistry, type_id: &str) -> ClientResult<T> {
        let decoder = registry.decoder_for(type_id)?;
        let object = self.decode_with(decoder)?;
        downcast(object, type_id)
    }
}

fn downcast<T: StarhiveObject>(object: Box<dyn StarhiveObject>, type_id: &str) -> ClientResult<T> {
    let any: Box<dyn Any> = object;
    any.downcast::<T>()
        .map(|object| *object)
        .map_err(|_| ClientError::UnexpectedType(type_id.to_string()))
}

/// Paginated envelope. Counts and the last-page flag arrive as strings.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PageEnvelope<T> {
    pub total: Value,
    pub page_size: Value,
    pub is_last: Value,
    #[serde(default = "Vec::new")]
    pub result: Vec<T>,
}

impl<T> PageEnvelope<T> {
    /// Parses the envelope fields, converting each entry with `f`.
    pub fn into_page<U>(self, f: impl FnMut(T) -> ClientResult<U>) -> ClientResult<Page<U>> {
        let total = parse_count("total", &self.total)?;
        let page_size = parse_count("pageSize", &self.page_size)?;
        let is_last = parse_flag("isLast", &self.is_last)?;
        let result = self.result.into_iter().map(f).collect::<ClientResult<Vec<U>>>()?;
        Ok(Page {
            total,
            page_size,
            is_last,
            result,
        })
    }
}

fn parse_count(field: &str, value: &Value) -> ClientResult<u64> {
    match value {
        Value::String(s) => s.trim().parse().ok(),
        Value::Number(n) => n.as_u64(),
        _ => None,
    }
    .ok_or_else(|| ClientError::Protocol(format!("invalid {field}: {value}")))
}

fn parse_flag(field: &str, value: &Value) -> ClientResult<bool> {
    match value {
        Value::String(s) => s.trim().parse().ok(),
        Value::Bool(b) => Some(*b),
        _ => None,
    }
    .ok_or_else(|| ClientError::Protocol(format!("invalid {field}: {value}")))
}
