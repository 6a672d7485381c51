//! Parsing of raw attribute strings back into typed values.
//!
//! This is the inverse of the canonical encoding the client applies when it
//! sends objects. Workflow values only carry a state id on the wire; the state
//! name comes from the value's `details` payload when present.

use crate::attribute::{
    AttributeKind, AttributeValue, Location, OptionValue, User, Workflow, WorkflowState,
};
use crate::content::StreamData;
use crate::object::JsonAttributeValue;
use crate::{Error, Result};
use chrono::{DateTime, NaiveDate, Utc};
use std::str::FromStr;
use url::Url;

/// Parses the raw values of one attribute as the given kind.
pub fn parse_values(kind: AttributeKind, values: &[JsonAttributeValue]) -> Result<AttributeValue> {
    let parsed = match kind {
        AttributeKind::Text => AttributeValue::Text(strings(values)),
        AttributeKind::Reference => AttributeValue::Reference(strings(values)),
        AttributeKind::IpAddress => AttributeValue::IpAddress(strings(values)),
        AttributeKind::Email => AttributeValue::Email(strings(values)),
        AttributeKind::Integer => AttributeValue::Integer(each(kind, values, i64::from_str)?),
        AttributeKind::Decimal => AttributeValue::Decimal(each(kind, values, f64::from_str)?),
        AttributeKind::Boolean => AttributeValue::Boolean(each(kind, values, bool::from_str)?),
        AttributeKind::Datetime => AttributeValue::Datetime(each(kind, values, |raw| {
            DateTime::parse_from_rfc3339(raw).map(|dt| dt.with_timezone(&Utc))
        })?),
        AttributeKind::Date => {
            AttributeValue::Date(each(kind, values, |raw| parse_date(raw).ok_or(()))?)
        }
        AttributeKind::Option => {
            AttributeValue::Option(values.iter().map(|v| OptionValue::new(&v.value)).collect())
        }
        AttributeKind::Url => AttributeValue::Url(each(kind, values, Url::parse)?),
        AttributeKind::Location => AttributeValue::Location(each(kind, values, |raw| {
            serde_json::from_str::<Location>(raw)
        })?),
        AttributeKind::User => AttributeValue::User(values.iter().map(user).collect()),
        AttributeKind::Media => AttributeValue::Media(
            values
                .iter()
                .map(|v| StreamData {
                    content_key: v.value.clone(),
                })
                .collect(),
        ),
        AttributeKind::Workflow => AttributeValue::Workflow(Workflow {
            state: values.first().map(workflow_state),
            transition: None,
        }),
    };
    Ok(parsed)
}

fn strings(values: &[JsonAttributeValue]) -> Vec<String> {
    values.iter().map(|v| v.value.clone()).collect()
}

fn each<T, E>(
    kind: AttributeKind,
    values: &[JsonAttributeValue],
    parse: impl Fn(&str) -> std::result::Result<T, E>,
) -> Result<Vec<T>> {
    values
        .iter()
        .map(|v| {
            parse(&v.value).map_err(|_| Error::InvalidValue {
                kind,
                raw: v.value.clone(),
            })
        })
        .collect()
}

/// Accepts a bare calendar date, or the date part of a full timestamp.
fn parse_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok().or_else(|| {
        DateTime::parse_from_rfc3339(raw)
            .ok()
            .map(|dt| dt.with_timezone(&Utc).date_naive())
    })
}

fn detail_str<'a>(value: &'a JsonAttributeValue, key: &str) -> Option<&'a str> {
    value.details.as_ref()?.get(key)?.as_str()
}

fn user(value: &JsonAttributeValue) -> User {
    User {
        id: value.value.clone(),
        name: detail_str(value, "name").unwrap_or_default().to_string(),
        email: detail_str(value, "email").unwrap_or_default().to_string(),
    }
}

fn workflow_state(value: &JsonAttributeValue) -> WorkflowState {
    WorkflowState {
        id: value.value.clone(),
        name: detail_str(value, "name").unwrap_or_default().to_string(),
        description: detail_str(value, "description").map(str::to_string),
    }
}
