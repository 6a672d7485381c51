//! Results of bulk create/update/delete requests.
//!
//! Bulk requests are processed per item: one failing operation does not abort
//! its siblings, so failures come back as data rather than as errors.

use serde::{Deserialize, Serialize};

/// Which operation a bulk item performed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum OperationAction {
    Create,
    Patch,
    Delete,
}

/// Field-level reason a bulk item was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Violation {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field_identifier: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub domain: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub violation_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub invalid_value: Option<String>,
}

/// Outcome of one operation, `index` pointing into the submitted batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum BulkItemResult {
    Success {
        #[serde(rename = "operationAction")]
        operation_action: OperationAction,
        index: usize,
        #[serde(rename = "objectId")]
        object_id: String,
    },
    Failure {
        #[serde(rename = "operationAction")]
        operation_action: OperationAction,
        index: usize,
        #[serde(default)]
        violations: Vec<Violation>,
    },
}

impl BulkItemResult {
    pub fn index(&self) -> usize {
        match self {
            BulkItemResult::Success { index, .. } | BulkItemResult::Failure { index, .. } => *index,
        }
    }

    pub fn operation_action(&self) -> OperationAction {
        match self {
            BulkItemResult::Success {
                operation_action, ..
            }
            | BulkItemResult::Failure {
                operation_action, ..
            } => *operation_action,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, BulkItemResult::Success { .. })
    }

    /// Shifts the index by `offset`; used when merging chunked responses.
    pub(crate) fn rebase(&mut self, offset: usize) {
        match self {
            BulkItemResult::Success { index, .. } | BulkItemResult::Failure { index, .. } => {
                *index += offset
            }
        }
    }
}

/// Response of `POST /object/bulk`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BulkResponse {
    /// Set when at least one item failed.
    pub failures: bool,
    pub result: Vec<BulkItemResult>,
}

impl BulkResponse {
    /// Items that succeeded, in submission order.
    pub fn successes(&self) -> impl Iterator<Item = &BulkItemResult> {
        self.result.iter().filter(|r| r.is_success())
    }

    /// Items that failed, in submission order.
    pub fn failed_items(&self) -> impl Iterator<Item = &BulkItemResult> {
        self.result.iter().filter(|r| !r.is_success())
    }

    /// Object id per submitted operation, `None` where the operation failed.
    pub fn object_ids(&self) -> Vec<Option<&str>> {
        self.result
            .iter()
            .map(|r| match r {
                BulkItemResult::Success { object_id, .. } => Some(object_id.as_str()),
                BulkItemResult::Failure { .. } => None,
            })
            .collect()
    }

    /// Appends a later chunk's response, rebasing its indices by `offset`.
    pub fn merge(&mut self, mut other: BulkResponse, offset: usize) {
        self.failures |= other.failures;
        for item in &mut other.result {
            item.rebase(offset);
        }
        self.result.extend(other.result);
    }
}
