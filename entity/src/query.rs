use serde::{Deserialize, Serialize};

use crate::department::Department;

/// User-adjustable filter state. Empty fields match everything; selections
/// are replaced verbatim, never merged.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryFilters {
    #[serde(default)]
    pub search: String,
    #[serde(default)]
    pub departments: Vec<Department>,
    /// Integer performance buckets, 1 through 5.
    #[serde(default)]
    pub ratings: Vec<u8>,
}
