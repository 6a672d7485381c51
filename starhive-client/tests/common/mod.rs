//! Shared test helpers: a hand-written `Shoes` type in the shape generated
//! code takes, and wiremock setup.

#![allow(dead_code)]

use chrono::NaiveDate;
use serde_json::{Value, json};
use starhive_client::{DecoderRegistry, StarhiveClient, StarhiveConfig};
use starhive_model::{
    Attribute, AttributeKind, AttributeValue, JsonAttributeValue, JsonDecoder, OptionValue,
    StarhiveObject, Workflow, parse_values,
};
use wiremock::MockServer;

pub const SHOES: &str = "shoes";
pub const TOKEN: &str = "test-token";
pub const WORKSPACE: &str = "ws-123";

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Shoes {
    pub id: Option<String>,
    pub name: Option<String>,
    pub size: Option<OptionValue>,
    pub price: Option<f64>,
    pub released: Option<NaiveDate>,
    pub status: Option<Workflow>,
}

impl StarhiveObject for Shoes {
    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn starhive_type_id(&self) -> &str {
        SHOES
    }

    fn attributes(&self) -> Vec<Attribute> {
        vec![
            Attribute::new("name", self.name.clone().map(AttributeValue::text)),
            Attribute::new(
                "size",
                self.size.clone().map(|s| AttributeValue::Option(vec![s])),
            ),
            Attribute::new("price", self.price.map(|p| AttributeValue::Decimal(vec![p]))),
            Attribute::new(
                "released",
                self.released.map(|d| AttributeValue::Date(vec![d])),
            ),
            Attribute::new("status", self.status.clone().map(AttributeValue::Workflow)),
        ]
    }
}

#[derive(Default)]
pub struct ShoesDecoder {
    shoes: Shoes,
    error: Option<starhive_model::Error>,
}

impl ShoesDecoder {
    fn parse(&mut self, kind: AttributeKind, values: &[JsonAttributeValue]) -> Option<AttributeValue> {
        match parse_values(kind, values) {
            Ok(value) => Some(value),
            Err(e) => {
                self.error.get_or_insert(e);
                None
            }
        }
    }
}

impl JsonDecoder for ShoesDecoder {
    fn set_id(&mut self, id: String) {
        self.shoes.id = Some(id);
    }

    fn visit_json_attribute(&mut self, attribute_id: &str, values: Vec<JsonAttributeValue>) {
        match attribute_id {
            "name" => {
                if let Some(AttributeValue::Text(v)) = self.parse(AttributeKind::Text, &values) {
                    self.shoes.name = v.into_iter().next();
                }
            }
            "size" => {
                if let Some(AttributeValue::Option(v)) = self.parse(AttributeKind::Option, &values) {
                    self.shoes.size = v.into_iter().next();
                }
            }
            "price" => {
                if let Some(AttributeValue::Decimal(v)) = self.parse(AttributeKind::Decimal, &values) {
                    self.shoes.price = v.into_iter().next();
                }
            }
            "released" => {
                if let Some(AttributeValue::Date(v)) = self.parse(AttributeKind::Date, &values) {
                    self.shoes.released = v.into_iter().next();
                }
            }
            "status" => {
                if let Some(AttributeValue::Workflow(w)) = self.parse(AttributeKind::Workflow, &values) {
                    self.shoes.status = Some(w);
                }
            }
            _ => {}
        }
    }

    fn build(self: Box<Self>) -> starhive_model::Result<Box<dyn StarhiveObject>> {
        match self.error {
            Some(e) => Err(e),
            None => Ok(Box::new(self.shoes)),
        }
    }
}

pub fn registry() -> DecoderRegistry {
    DecoderRegistry::new().with(SHOES, || Box::new(ShoesDecoder::default()))
}

pub fn client(server: &MockServer) -> StarhiveClient {
    client_with(server, registry())
}

pub fn client_with(server: &MockServer, registry: DecoderRegistry) -> StarhiveClient {
    let config = StarhiveConfig::new(TOKEN, WORKSPACE).with_base_url(server.uri());
    StarhiveClient::new(config, registry).unwrap()
}

/// Wire representation of a shoes object with a name.
pub fn shoes_json(id: &str, name: &str) -> Value {
    json!({
        "id": id,
        "typeId": SHOES,
        "attributes": [
            {"attributeId": "name", "values": [{"valueId": format!("{id}-name"), "value": name}]}
        ]
    })
}

pub fn named(name: &str) -> Shoes {
    Shoes {
        name: Some(name.to_string()),
        ..Default::default()
    }
}

/// JSON bodies of every request the server received.
pub async fn request_bodies(server: &MockServer) -> Vec<Value> {
    server
        .received_requests()
        .await
        .unwrap_or_default()
        .iter()
        .map(|r| serde_json::from_slice(&r.body).unwrap_or(Value::Null))
        .collect()
}
