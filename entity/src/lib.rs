pub mod department;
pub mod employee;
pub mod query;

pub use department::{Department, UnknownDepartment};
pub use employee::{Employee, MAX_PERFORMANCE, PROMOTION_STEP};
pub use query::QueryFilters;
