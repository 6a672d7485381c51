use serde::{Deserialize, Serialize};

/// One page of a paginated listing.
///
/// `result` never holds more than `page_size` entries. When `is_last` is set
/// no larger offset returns further rows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub total: u64,
    pub page_size: u64,
    pub is_last: bool,
    pub result: Vec<T>,
}

impl<T> Page<T> {
    pub fn len(&self) -> usize {
        self.result.len()
    }

    pub fn is_empty(&self) -> bool {
        self.result.is_empty()
    }

    /// Offset of the page following this one, `None` on the last page or
    /// when the page came back empty.
    pub fn next_offset(&self, offset: u64) -> Option<u64> {
        if self.is_last || self.result.is_empty() {
            None
        } else {
            Some(offset + self.result.len() as u64)
        }
    }

    /// Converts every entry, keeping the envelope.
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            total: self.total,
            page_size: self.page_size,
            is_last: self.is_last,
            result: self.result.into_iter().map(f).collect(),
        }
    }
}

impl<T> IntoIterator for Page<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.result.into_iter()
    }
}
