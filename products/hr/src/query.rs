use entity::{Employee, QueryFilters};
use serde::Serialize;

/// Page size of the dashboard grid.
pub const DEFAULT_PAGE_SIZE: usize = 6;

/// One page of filtered results plus the metadata the pager needs.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeePage {
    pub items: Vec<Employee>,
    pub page: usize,
    pub page_size: usize,
    pub total_pages: usize,
    pub total_matching: usize,
}

/// A record matches when every non-empty clause matches (logical AND). An
/// empty clause of any kind matches everything.
fn matches(employee: &Employee, filters: &QueryFilters) -> bool {
    let matches_search = filters.search.is_empty() || {
        let needle = filters.search.to_lowercase();
        employee.first_name.to_lowercase().contains(&needle)
            || employee.last_name.to_lowercase().contains(&needle)
            || employee.email.to_lowercase().contains(&needle)
            || employee.department.name().to_lowercase().contains(&needle)
    };
    let matches_department = filters.departments.is_empty()
        || filters.departments.contains(&employee.department);
    let matches_rating =
        filters.ratings.is_empty() || filters.ratings.contains(&employee.rating_bucket());

    matches_search && matches_department && matches_rating
}

/// Pure function from the roster and query state to a page of results. The
/// requested page is clamped to `[1, total_pages]` so out-of-range requests
/// cannot produce a phantom page.
pub fn run_query(
    employees: &[Employee],
    filters: &QueryFilters,
    page: usize,
    page_size: usize,
) -> EmployeePage {
    let matching: Vec<&Employee> = employees
        .iter()
        .filter(|emp| matches(emp, filters))
        .collect();
    let total_matching = matching.len();
    let total_pages = total_matching.div_ceil(page_size);
    let page = page.clamp(1, total_pages.max(1));
    let items = matching
        .into_iter()
        .skip((page - 1) * page_size)
        .take(page_size)
        .cloned()
        .collect();

    EmployeePage {
        items,
        page,
        page_size,
        total_pages,
        total_matching,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::employee;
    use entity::Department;

    fn roster() -> Vec<Employee> {
        vec![
            employee(1, "Rahul", Department::Engineering, 4.9),
            employee(2, "Priya", Department::Marketing, 5.0),
            employee(3, "Amit", Department::Engineering, 3.2),
            employee(4, "Neha", Department::Finance, 4.0),
        ]
    }

    fn ids(page: &EmployeePage) -> Vec<u64> {
        page.items.iter().map(|emp| emp.id).collect()
    }

    #[test]
    fn empty_filters_match_everything() {
        let page = run_query(&roster(), &QueryFilters::default(), 1, DEFAULT_PAGE_SIZE);
        assert_eq!(page.total_matching, 4);
        assert_eq!(page.total_pages, 1);
    }

    #[test]
    fn search_is_case_insensitive_and_covers_department_names() {
        let filters = QueryFilters {
            search: "ENG".into(),
            ..Default::default()
        };
        let page = run_query(&roster(), &filters, 1, DEFAULT_PAGE_SIZE);
        assert_eq!(ids(&page), vec![1, 3]);
    }

    #[test]
    fn search_covers_name_and_email() {
        let by_name = QueryFilters {
            search: "priya".into(),
            ..Default::default()
        };
        assert_eq!(ids(&run_query(&roster(), &by_name, 1, 6)), vec![2]);

        let by_email = QueryFilters {
            search: "neha.sharma@".into(),
            ..Default::default()
        };
        assert_eq!(ids(&run_query(&roster(), &by_email, 1, 6)), vec![4]);
    }

    #[test]
    fn rating_filter_buckets_by_floor() {
        let filters = QueryFilters {
            ratings: vec![4],
            ..Default::default()
        };
        // 4.9 floors to 4 and matches; 5.0 floors to 5 and does not.
        let page = run_query(&roster(), &filters, 1, DEFAULT_PAGE_SIZE);
        assert_eq!(ids(&page), vec![1, 4]);
    }

    #[test]
    fn clauses_combine_with_and_semantics() {
        let filters = QueryFilters {
            search: "sharma".into(),
            departments: vec![Department::Engineering],
            ratings: vec![3],
        };
        let page = run_query(&roster(), &filters, 1, DEFAULT_PAGE_SIZE);
        assert_eq!(ids(&page), vec![3]);

        // Same search and department, but a rating clause nothing satisfies.
        let filters = QueryFilters {
            ratings: vec![1],
            ..filters
        };
        assert_eq!(run_query(&roster(), &filters, 1, 6).total_matching, 0);
    }

    #[test]
    fn seven_records_split_into_a_full_page_and_a_remainder() {
        let employees: Vec<Employee> = (1..=7)
            .map(|id| employee(id, "Arjun", Department::Sales, 3.5))
            .collect();
        let first = run_query(&employees, &QueryFilters::default(), 1, DEFAULT_PAGE_SIZE);
        assert_eq!(first.items.len(), 6);
        assert_eq!(first.total_pages, 2);
        let second = run_query(&employees, &QueryFilters::default(), 2, DEFAULT_PAGE_SIZE);
        assert_eq!(second.items.len(), 1);
        assert_eq!(ids(&second), vec![7]);
    }

    #[test]
    fn exact_multiple_fills_the_last_page() {
        let employees: Vec<Employee> = (1..=12)
            .map(|id| employee(id, "Pooja", Department::Design, 4.0))
            .collect();
        let last = run_query(&employees, &QueryFilters::default(), 2, DEFAULT_PAGE_SIZE);
        assert_eq!(last.total_pages, 2);
        assert_eq!(last.items.len(), 6);
    }

    #[test]
    fn out_of_range_pages_clamp_to_the_valid_range() {
        let employees = roster();
        let beyond = run_query(&employees, &QueryFilters::default(), 99, DEFAULT_PAGE_SIZE);
        assert_eq!(beyond.page, 1);
        assert_eq!(beyond.items.len(), 4);

        let nothing = QueryFilters {
            search: "zzz".into(),
            ..Default::default()
        };
        let empty = run_query(&employees, &nothing, 5, DEFAULT_PAGE_SIZE);
        assert_eq!(empty.page, 1);
        assert_eq!(empty.total_pages, 0);
        assert!(empty.items.is_empty());
    }
}
