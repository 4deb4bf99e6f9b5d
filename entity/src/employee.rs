use serde::{Deserialize, Serialize};

use crate::department::Department;

/// Highest performance rating an employee can hold.
pub const MAX_PERFORMANCE: f64 = 5.0;

/// Fixed increment applied by a promotion.
pub const PROMOTION_STEP: f64 = 0.5;

/// One employee record. Identifiers are unique across the collection and
/// never change after creation; records are never deleted.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    pub id: u64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub age: u32,
    pub department: Department,
    pub performance: f64,
    pub address: String,
    pub phone: String,
    pub bio: String,
    pub is_bookmarked: bool,
}

impl Employee {
    /// Integer bucket used by the discrete rating filter (floor of the score).
    pub fn rating_bucket(&self) -> u8 {
        self.performance.floor() as u8
    }
}
