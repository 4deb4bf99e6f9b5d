use std::collections::BTreeMap;

use entity::{Department, Employee};
use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::history::random_rating;

pub const MIN_AGE: u32 = 18;
pub const MAX_AGE: u32 = 65;

const DEFAULT_BIO: &str =
    "Experienced professional with a strong track record in their field.";

/// Manual-creation form input. The department arrives as a raw string so an
/// unknown value surfaces as a field error rather than a deserialization
/// failure.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewEmployee {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub age: u32,
    pub department: String,
    pub phone: String,
    pub address: String,
    #[serde(default)]
    pub bio: Option<String>,
}

/// Per-field validation failures, keyed by the wire-format field name so the
/// form can surface each message inline.
#[derive(Debug, Error, Serialize)]
#[error("invalid employee input")]
pub struct ValidationErrors {
    pub fields: BTreeMap<&'static str, String>,
}

impl NewEmployee {
    /// Checks every field and collects all failures; returns the parsed
    /// department on success.
    pub fn validate(&self) -> Result<Department, ValidationErrors> {
        let mut fields = BTreeMap::new();

        if self.first_name.trim().is_empty() {
            fields.insert("firstName", "First name is required".to_string());
        }
        if self.last_name.trim().is_empty() {
            fields.insert("lastName", "Last name is required".to_string());
        }
        if self.email.trim().is_empty() {
            fields.insert("email", "Email is required".to_string());
        } else if !looks_like_email(self.email.trim()) {
            fields.insert("email", "Invalid email format".to_string());
        }
        if !(MIN_AGE..=MAX_AGE).contains(&self.age) {
            fields.insert("age", "Age must be between 18 and 65".to_string());
        }
        if self.phone.trim().is_empty() {
            fields.insert("phone", "Phone number is required".to_string());
        }
        if self.address.trim().is_empty() {
            fields.insert("address", "Address is required".to_string());
        }

        let department = match self.department.parse::<Department>() {
            Ok(dept) => Some(dept),
            Err(_) => {
                let message = if self.department.trim().is_empty() {
                    "Department is required"
                } else {
                    "Unknown department"
                };
                fields.insert("department", message.to_string());
                None
            }
        };

        match (fields.is_empty(), department) {
            (true, Some(dept)) => Ok(dept),
            _ => Err(ValidationErrors { fields }),
        }
    }

    /// Validates and builds the record: caller supplies the identifier, the
    /// performance score is drawn fresh in [3, 5], and a blank bio falls back
    /// to the stock one.
    pub fn into_employee<R: Rng>(self, id: u64, rng: &mut R) -> Result<Employee, ValidationErrors> {
        let department = self.validate()?;
        let bio = self
            .bio
            .filter(|bio| !bio.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_BIO.to_string());
        Ok(Employee {
            id,
            first_name: self.first_name.trim().to_string(),
            last_name: self.last_name.trim().to_string(),
            email: self.email.trim().to_string(),
            age: self.age,
            department,
            performance: random_rating(rng),
            address: self.address.trim().to_string(),
            phone: self.phone.trim().to_string(),
            bio,
            is_bookmarked: false,
        })
    }
}

/// local@domain.tld, no whitespace, with a dotted domain. Deliberately as
/// loose as the original form check.
fn looks_like_email(raw: &str) -> bool {
    if raw.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = raw.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.contains('@')
        && domain.split('.').count() >= 2
        && domain.split('.').all(|segment| !segment.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn valid_input() -> NewEmployee {
        NewEmployee {
            first_name: "Anjali".into(),
            last_name: "Joshi".into(),
            email: "anjali.joshi@company.in".into(),
            age: 28,
            department: "Product".into(),
            phone: "+91 9876501234".into(),
            address: "Gomti Nagar, Lucknow, Uttar Pradesh - 226010".into(),
            bio: None,
        }
    }

    #[test]
    fn valid_input_passes_and_parses_the_department() {
        assert_eq!(valid_input().validate().unwrap(), Department::Product);
    }

    #[test]
    fn blank_required_fields_are_all_reported() {
        let input = NewEmployee {
            first_name: "  ".into(),
            last_name: String::new(),
            email: String::new(),
            age: 30,
            department: String::new(),
            phone: String::new(),
            address: String::new(),
            bio: None,
        };
        let errors = input.validate().unwrap_err();
        let keys: Vec<&str> = errors.fields.keys().copied().collect();
        assert_eq!(
            keys,
            vec!["address", "department", "email", "firstName", "lastName", "phone"]
        );
    }

    #[test]
    fn malformed_emails_are_rejected() {
        for bad in ["plainaddress", "no [at] domain.in", "name@domain", "name@.in", "a@b@c.in"] {
            let input = NewEmployee {
                email: bad.into(),
                ..valid_input()
            };
            let errors = input.validate().unwrap_err();
            assert_eq!(errors.fields.get("email").unwrap(), "Invalid email format");
        }
    }

    #[test]
    fn age_must_fall_within_working_range() {
        for age in [17, 66] {
            let input = NewEmployee { age, ..valid_input() };
            assert!(input.validate().unwrap_err().fields.contains_key("age"));
        }
        for age in [18, 65] {
            let input = NewEmployee { age, ..valid_input() };
            assert!(input.validate().is_ok());
        }
    }

    #[test]
    fn unknown_department_is_a_field_error() {
        let input = NewEmployee {
            department: "Legal".into(),
            ..valid_input()
        };
        let errors = input.validate().unwrap_err();
        assert_eq!(errors.fields.get("department").unwrap(), "Unknown department");
    }

    #[test]
    fn built_employee_gets_a_fresh_rating_and_stock_bio() {
        let mut rng = StdRng::seed_from_u64(5);
        let employee = valid_input().into_employee(21, &mut rng).unwrap();
        assert_eq!(employee.id, 21);
        assert!(!employee.is_bookmarked);
        assert!((3.0..=5.0).contains(&employee.performance));
        assert_eq!(employee.bio, DEFAULT_BIO);
    }

    #[test]
    fn provided_bio_is_kept() {
        let input = NewEmployee {
            bio: Some("Ships on time.".into()),
            ..valid_input()
        };
        let mut rng = StdRng::seed_from_u64(5);
        assert_eq!(input.into_employee(1, &mut rng).unwrap().bio, "Ships on time.");
    }
}
