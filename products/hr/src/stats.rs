use entity::{Department, Employee};
use serde::Serialize;

/// Employee count and average performance for one department. Departments
/// with no employees report an average of 0 rather than NaN.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DepartmentStat {
    pub department: Department,
    pub count: usize,
    pub avg_performance: f64,
}

/// Occupancy of one fixed age band.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AgeBand {
    pub label: &'static str,
    pub count: usize,
}

/// Headline figures for the analytics view, derived at point of use.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Headline {
    pub total_employees: usize,
    pub avg_performance: f64,
    pub departments: usize,
}

struct AgeBucket {
    label: &'static str,
    min: u32,
    max: Option<u32>,
}

impl AgeBucket {
    fn contains(&self, age: u32) -> bool {
        age >= self.min && self.max.is_none_or(|max| age <= max)
    }
}

// Inclusive bounds on both ends except the open-ended final band.
const AGE_BUCKETS: [AgeBucket; 5] = [
    AgeBucket { label: "18-25", min: 18, max: Some(25) },
    AgeBucket { label: "26-35", min: 26, max: Some(35) },
    AgeBucket { label: "36-45", min: 36, max: Some(45) },
    AgeBucket { label: "46-55", min: 46, max: Some(55) },
    AgeBucket { label: "56+", min: 56, max: None },
];

/// Per-department counts and averages, in canonical department order.
pub fn department_stats(employees: &[Employee]) -> Vec<DepartmentStat> {
    Department::ALL
        .into_iter()
        .map(|department| {
            let mut count = 0usize;
            let mut sum = 0.0f64;
            for emp in employees.iter().filter(|emp| emp.department == department) {
                count += 1;
                sum += emp.performance;
            }
            DepartmentStat {
                department,
                count,
                // Empty subset divides by 1, yielding 0 instead of NaN.
                avg_performance: sum / count.max(1) as f64,
            }
        })
        .collect()
}

/// Head counts across the five fixed age bands.
pub fn age_histogram(employees: &[Employee]) -> Vec<AgeBand> {
    AGE_BUCKETS
        .iter()
        .map(|bucket| AgeBand {
            label: bucket.label,
            count: employees
                .iter()
                .filter(|emp| bucket.contains(emp.age))
                .count(),
        })
        .collect()
}

pub fn headline(employees: &[Employee]) -> Headline {
    let total = employees.len();
    let avg_performance = if total == 0 {
        0.0
    } else {
        employees.iter().map(|emp| emp.performance).sum::<f64>() / total as f64
    };
    Headline {
        total_employees: total,
        avg_performance,
        departments: Department::ALL.len(),
    }
}
