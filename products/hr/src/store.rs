use entity::{Department, Employee, MAX_PERFORMANCE, PROMOTION_STEP, QueryFilters};

use crate::query::{self, EmployeePage};

/// Single source of truth for the employee roster and the user-adjustable
/// query state. Every mutation is a total function: an unknown identifier
/// leaves the state unchanged rather than erroring.
#[derive(Clone, Debug, Default)]
pub struct HrStore {
    employees: Vec<Employee>,
    filters: QueryFilters,
    page: usize,
}

impl HrStore {
    pub fn new(employees: Vec<Employee>, filters: QueryFilters) -> Self {
        Self {
            employees,
            filters,
            page: 1,
        }
    }

    pub fn employees(&self) -> &[Employee] {
        &self.employees
    }

    pub fn filters(&self) -> &QueryFilters {
        &self.filters
    }

    /// Current page cursor, always at least 1. The upper bound is clamped
    /// against the match count when a page is actually produced.
    pub fn page(&self) -> usize {
        self.page.max(1)
    }

    pub fn find(&self, id: u64) -> Option<&Employee> {
        self.employees.iter().find(|emp| emp.id == id)
    }

    /// The bookmarked subset, recomputed from the roster on demand. This is
    /// a projection, never independently stored, so it cannot diverge.
    pub fn bookmarked(&self) -> Vec<Employee> {
        self.employees
            .iter()
            .filter(|emp| emp.is_bookmarked)
            .cloned()
            .collect()
    }

    /// Identifier for the next manually created employee: one past the
    /// current maximum, or 1 for an empty roster.
    pub fn next_id(&self) -> u64 {
        self.employees
            .iter()
            .map(|emp| emp.id)
            .max()
            .map_or(1, |max| max + 1)
    }

    /// Full list swap, used after the seed fetch. No validation.
    pub fn replace_all(&mut self, employees: Vec<Employee>) {
        self.employees = employees;
    }

    pub fn append(&mut self, employee: Employee) {
        self.employees.push(employee);
    }

    pub fn toggle_bookmark(&mut self, id: u64) {
        if let Some(emp) = self.employees.iter_mut().find(|emp| emp.id == id) {
            emp.is_bookmarked = !emp.is_bookmarked;
        }
    }

    /// Raise performance by the fixed step, capped at the maximum. Never
    /// lowers a score, so a record seeded above the cap is left alone.
    pub fn promote(&mut self, id: u64) {
        if let Some(emp) = self.employees.iter_mut().find(|emp| emp.id == id) {
            let raised = (emp.performance + PROMOTION_STEP).min(MAX_PERFORMANCE);
            if raised > emp.performance {
                emp.performance = raised;
            }
        }
    }

    pub fn set_search(&mut self, text: impl Into<String>) {
        self.filters.search = text.into();
        self.page = 1;
    }

    pub fn set_departments(&mut self, departments: Vec<Department>) {
        self.filters.departments = departments;
        self.page = 1;
    }

    pub fn set_ratings(&mut self, ratings: Vec<u8>) {
        self.filters.ratings = ratings;
        self.page = 1;
    }

    pub fn set_page(&mut self, page: usize) {
        self.page = page.max(1);
    }

    /// The filtered, paginated view for the current query state.
    pub fn current_page(&self, page_size: usize) -> EmployeePage {
        query::run_query(&self.employees, &self.filters, self.page(), page_size)
    }
}
