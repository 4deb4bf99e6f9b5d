use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The fixed set of departments used for grouping and filtering.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Department {
    Engineering,
    Marketing,
    Sales,
    #[serde(rename = "Human Resources")]
    HumanResources,
    Finance,
    Operations,
    Product,
    Design,
}

impl Department {
    /// Canonical ordering, used by the analytics series and seed generation.
    pub const ALL: [Department; 8] = [
        Department::Engineering,
        Department::Marketing,
        Department::Sales,
        Department::HumanResources,
        Department::Finance,
        Department::Operations,
        Department::Product,
        Department::Design,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Department::Engineering => "Engineering",
            Department::Marketing => "Marketing",
            Department::Sales => "Sales",
            Department::HumanResources => "Human Resources",
            Department::Finance => "Finance",
            Department::Operations => "Operations",
            Department::Product => "Product",
            Department::Design => "Design",
        }
    }
}

impl fmt::Display for Department {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Error)]
#[error("unknown department: {0}")]
pub struct UnknownDepartment(pub String);

impl FromStr for Department {
    type Err = UnknownDepartment;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        Department::ALL
            .into_iter()
            .find(|dept| dept.name() == raw)
            .ok_or_else(|| UnknownDepartment(raw.to_string()))
    }
}
