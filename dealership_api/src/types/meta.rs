use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    #[serde(default)]
    pub total_items: i64,
    #[serde(default)]
    pub total_pages: i64,
    #[serde(default = "first_page")]
    pub current_page: i64,
}

fn first_page() -> i64 {
    1
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            total_items: 0,
            total_pages: 0,
            current_page: 1,
        }
    }
}

/// One page of records plus pagination for the whole filtered set.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ListResult<T> {
    #[serde(default = "Vec::new")]
    pub data: Vec<T>,
    #[serde(default)]
    pub pagination: Pagination,
}

impl<T> Default for ListResult<T> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<T> ListResult<T> {
    /// The zeroed result: no records, no pages.
    pub fn empty() -> Self {
        Self {
            data: Vec::new(),
            pagination: Pagination::default(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

/// Outcome of a mutation. Anything other than `success: true` is a failure.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ActionResult<T> {
    #[serde(default)]
    pub success: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default = "none", skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

// Plain `#[serde(default)]` would add a `T: Default` bound.
fn none<T>() -> Option<T> {
    None
}

impl<T> ActionResult<T> {
    pub fn is_success(&self) -> bool {
        self.success == Some(true)
    }

    /// The degraded shape returned when a request could not be completed.
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: Some(false),
            message: Some(message.into()),
            data: None,
        }
    }

    pub fn ok(message: Option<String>, data: Option<T>) -> Self {
        Self {
            success: Some(true),
            message,
            data,
        }
    }
}

/// Body of a bulk delete request.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct BulkDeleteRequest {
    pub ids: Vec<i64>,
}
