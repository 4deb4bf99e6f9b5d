//! One-shot roster seeding from a public mock-user API. Only `id`, `age`,
//! and `gender` are consumed from the upstream records; every displayed
//! field is synthesized locally, deterministic by list index for names and
//! addresses, random for phone digits, postal codes, and ratings.

use anyhow::{Context, Result};
use entity::{Department, Employee};
use products_hr::random_rating;
use rand::Rng;
use serde::Deserialize;

pub const DEFAULT_SEED_URL: &str = "https://dummyjson.com/users?limit=20";

const MALE_NAMES: [(&str, &str); 10] = [
    ("Rahul", "Sharma"),
    ("Arjun", "Patel"),
    ("Vikram", "Singh"),
    ("Rajesh", "Kumar"),
    ("Amit", "Gupta"),
    ("Suresh", "Verma"),
    ("Deepak", "Yadav"),
    ("Karan", "Mishra"),
    ("Ravi", "Chauhan"),
    ("Nitin", "Joshi"),
];

const FEMALE_NAMES: [(&str, &str); 10] = [
    ("Priya", "Sharma"),
    ("Ananya", "Patel"),
    ("Neha", "Singh"),
    ("Pooja", "Kumar"),
    ("Meera", "Gupta"),
    ("Divya", "Verma"),
    ("Riya", "Yadav"),
    ("Sneha", "Mishra"),
    ("Kavita", "Chauhan"),
    ("Anjali", "Joshi"),
];

const CITIES: [(&str, &str); 10] = [
    ("Mumbai", "Maharashtra"),
    ("Delhi", "Delhi"),
    ("Bangalore", "Karnataka"),
    ("Hyderabad", "Telangana"),
    ("Chennai", "Tamil Nadu"),
    ("Kolkata", "West Bengal"),
    ("Pune", "Maharashtra"),
    ("Ahmedabad", "Gujarat"),
    ("Jaipur", "Rajasthan"),
    ("Lucknow", "Uttar Pradesh"),
];

const LOCALITIES: [&str; 10] = [
    "Andheri East",
    "Koramangala",
    "Bandra West",
    "Salt Lake City",
    "T Nagar",
    "Indiranagar",
    "Powai",
    "Sector 62",
    "Malviya Nagar",
    "Gomti Nagar",
];

const SEED_BIO: &str = "Experienced professional with a strong track record in their field. \
     Demonstrates excellent leadership and technical skills.";

#[derive(Debug, Deserialize)]
pub struct RawUser {
    pub id: u64,
    pub age: u32,
    pub gender: String,
}

#[derive(Debug, Deserialize)]
struct SeedResponse {
    users: Vec<RawUser>,
}

/// Fetch the raw user records and synthesize the roster. No retry and no
/// cancellation; callers treat a failure as "start empty".
pub async fn fetch_employees(url: &str) -> Result<Vec<Employee>> {
    let response = reqwest::get(url).await.context("seed request failed")?;
    let payload: SeedResponse = response
        .error_for_status()
        .context("seed request rejected")?
        .json()
        .await
        .context("seed payload was not valid JSON")?;
    Ok(synthesize(payload.users, &mut rand::thread_rng()))
}

pub fn synthesize<R: Rng>(users: Vec<RawUser>, rng: &mut R) -> Vec<Employee> {
    users
        .into_iter()
        .enumerate()
        .map(|(index, user)| {
            let names = if user.gender.eq_ignore_ascii_case("female") {
                &FEMALE_NAMES
            } else {
                &MALE_NAMES
            };
            let (first, last) = names[index % names.len()];
            let (city, state) = CITIES[index % CITIES.len()];
            let locality = LOCALITIES[index % LOCALITIES.len()];
            let department = Department::ALL[rng.gen_range(0..Department::ALL.len())];
            Employee {
                id: user.id,
                first_name: first.to_string(),
                last_name: last.to_string(),
                email: format!("{}.{}@company.in", first.to_lowercase(), last.to_lowercase()),
                age: user.age,
                department,
                performance: random_rating(rng),
                address: format!(
                    "{locality}, {city}, {state} - {}",
                    rng.gen_range(100_000..1_000_000)
                ),
                phone: format!("+91 {}", rng.gen_range(1_000_000_000u64..10_000_000_000u64)),
                bio: SEED_BIO.to_string(),
                is_bookmarked: false,
            }
        })
        .collect()
}
