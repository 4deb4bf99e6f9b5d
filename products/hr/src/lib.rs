//! The HR dashboard core: a roster store with bookmark and promotion
//! mutations, the search/filter/pagination engine, analytics aggregation,
//! and the synthetic performance history used by the detail view.

pub mod history;
pub mod query;
pub mod stats;
pub mod store;
pub mod validate;

pub use history::{HISTORY_MONTHS, HistoryPoint, performance_history, random_rating};
pub use query::{DEFAULT_PAGE_SIZE, EmployeePage, run_query};
pub use stats::{AgeBand, DepartmentStat, Headline, age_histogram, department_stats, headline};
pub use store::HrStore;
pub use validate::{NewEmployee, ValidationErrors};

#[cfg(test)]
pub(crate) mod fixtures {
    use entity::{Department, Employee};

    pub fn employee(id: u64, first: &str, department: Department, performance: f64) -> Employee {
        Employee {
            id,
            first_name: first.to_string(),
            last_name: "Sharma".to_string(),
            email: format!("{}.sharma@company.in", first.to_lowercase()),
            age: 30,
            department,
            performance,
            address: "Andheri East, Mumbai, Maharashtra - 400069".to_string(),
            phone: "+91 9876543210".to_string(),
            bio: String::new(),
            is_bookmarked: false,
        }
    }

    pub fn with_age(mut employee: Employee, age: u32) -> Employee {
        employee.age = age;
        employee
    }
}
