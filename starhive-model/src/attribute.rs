//! Attribute values carried by Starhive objects.
//!
//! Every attribute holds an ordered list of values of a single kind. An
//! attribute that is not set at all is represented by `None` on [`Attribute`],
//! never by an empty list: the two mean different things to the API.

use crate::content::StreamData;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use url::Url;

/// One declared attribute of an object, possibly absent.
#[derive(Debug, Clone, PartialEq)]
pub struct Attribute {
    pub attribute_id: String,
    pub value: Option<AttributeValue>,
}

impl Attribute {
    /// Creates an attribute entry. Passing `None` marks the attribute absent.
    pub fn new(attribute_id: impl Into<String>, value: impl Into<Option<AttributeValue>>) -> Self {
        Self {
            attribute_id: attribute_id.into(),
            value: value.into(),
        }
    }

    /// Shorthand for an attribute the object does not set.
    pub fn absent(attribute_id: impl Into<String>) -> Self {
        Self::new(attribute_id, None)
    }
}

/// The values of a single attribute, tagged by kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "values", rename_all = "snake_case")]
pub enum AttributeValue {
    Text(Vec<String>),
    Integer(Vec<i64>),
    Decimal(Vec<f64>),
    Boolean(Vec<bool>),
    Datetime(Vec<DateTime<Utc>>),
    Date(Vec<NaiveDate>),
    Option(Vec<OptionValue>),
    Url(Vec<Url>),
    Reference(Vec<String>),
    Location(Vec<Location>),
    IpAddress(Vec<String>),
    Email(Vec<String>),
    User(Vec<User>),
    Media(Vec<StreamData>),
    /// Workflow attributes are single-valued: a target state, a transition, or both.
    Workflow(Workflow),
}

impl AttributeValue {
    /// Returns the kind of this value.
    pub fn kind(&self) -> AttributeKind {
        match self {
            AttributeValue::Text(_) => AttributeKind::Text,
            AttributeValue::Integer(_) => AttributeKind::Integer,
            AttributeValue::Decimal(_) => AttributeKind::Decimal,
            AttributeValue::Boolean(_) => AttributeKind::Boolean,
            AttributeValue::Datetime(_) => AttributeKind::Datetime,
            AttributeValue::Date(_) => AttributeKind::Date,
            AttributeValue::Option(_) => AttributeKind::Option,
            AttributeValue::Url(_) => AttributeKind::Url,
            AttributeValue::Reference(_) => AttributeKind::Reference,
            AttributeValue::Location(_) => AttributeKind::Location,
            AttributeValue::IpAddress(_) => AttributeKind::IpAddress,
            AttributeValue::Email(_) => AttributeKind::Email,
            AttributeValue::User(_) => AttributeKind::User,
            AttributeValue::Media(_) => AttributeKind::Media,
            AttributeValue::Workflow(_) => AttributeKind::Workflow,
        }
    }

    /// Shorthand for a single-element text value.
    pub fn text(value: impl Into<String>) -> Self {
        AttributeValue::Text(vec![value.into()])
    }

    /// Shorthand for a workflow value that moves to a fixed state.
    pub fn workflow_state(state: WorkflowState) -> Self {
        AttributeValue::Workflow(Workflow {
            state: Some(state),
            transition: None,
        })
    }

    /// Shorthand for a workflow value that fires a transition.
    pub fn workflow_transition(transition: WorkflowTransition) -> Self {
        AttributeValue::Workflow(Workflow {
            state: None,
            transition: Some(transition),
        })
    }
}

/// Fieldless mirror of [`AttributeValue`], used to pick a parser.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttributeKind {
    Text,
    Integer,
    Decimal,
    Boolean,
    Datetime,
    Date,
    Option,
    Url,
    Reference,
    Location,
    IpAddress,
    Email,
    User,
    Media,
    Workflow,
}

impl AttributeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            AttributeKind::Text => "text",
            AttributeKind::Integer => "integer",
            AttributeKind::Decimal => "decimal",
            AttributeKind::Boolean => "boolean",
            AttributeKind::Datetime => "datetime",
            AttributeKind::Date => "date",
            AttributeKind::Option => "option",
            AttributeKind::Url => "url",
            AttributeKind::Reference => "reference",
            AttributeKind::Location => "location",
            AttributeKind::IpAddress => "ip_address",
            AttributeKind::Email => "email",
            AttributeKind::User => "user",
            AttributeKind::Media => "media",
            AttributeKind::Workflow => "workflow",
        }
    }
}

impl fmt::Display for AttributeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A selectable option; only its stored value travels over the wire.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OptionValue(String);

impl OptionValue {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// The canonical stored value of the option.
    pub fn value(&self) -> &str {
        &self.0
    }
}

impl From<&str> for OptionValue {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// A geolocation attribute value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub address: String,
    pub latitude: f64,
    pub longitude: f64,
}

/// A workspace user referenced by a user attribute.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkflowState {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkflowTransition {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from: Option<WorkflowState>,
    pub to: WorkflowState,
}

/// Value of a workflow attribute.
///
/// With only a transition set, the transition's destination state becomes
/// the attribute value and the transition is sent as a separate directive.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Workflow {
    pub state: Option<WorkflowState>,
    pub transition: Option<WorkflowTransition>,
}

impl Workflow {
    /// True when neither a state nor a transition is set.
    pub fn is_empty(&self) -> bool {
        self.state.is_none() && self.transition.is_none()
    }
}
