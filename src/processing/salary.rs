//! Salary text parsing

use regex::Regex;
use serde::{Deserialize, Deserializer};
use std::sync::OnceLock;

fn salary_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"(?i)(\d[\d,]*(?:\.\d+)?)\s*(k\b)?").expect("salary pattern is valid")
    })
}

/// Parse the first amount out of free-form salary text.
///
/// `"$80,000 - $100,000"` yields `80000`, `"95k"` yields `95000`. Returns
/// `None` when the text holds no digits or the amount is zero.
pub fn parse_salary(text: &str) -> Option<u64> {
    let caps = salary_pattern().captures(text)?;
    let digits: String = caps.get(1)?.as_str().chars().filter(|c| *c != ',').collect();
    let mut amount: f64 = digits.parse().ok()?;

    if caps.get(2).is_some() {
        amount *= 1000.0;
    }

    let amount = amount.round() as u64;
    (amount > 0).then_some(amount)
}

#[derive(Deserialize)]
#[serde(untagged)]
enum SalaryField {
    Amount(u64),
    Fractional(f64),
    Text(String),
}

/// Deserialize an optional salary floor stored either as a number or as
/// salary text such as `"80000"` or `"$95k"`. Text without an amount reads
/// as no floor.
pub fn deserialize_salary_floor<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    let field = Option::<SalaryField>::deserialize(deserializer)?;
    Ok(match field {
        Some(SalaryField::Amount(amount)) => (amount > 0).then_some(amount),
        Some(SalaryField::Fractional(amount)) if amount >= 1.0 => Some(amount.round() as u64),
        Some(SalaryField::Fractional(_)) => None,
        Some(SalaryField::Text(text)) => parse_salary(&text),
        None => None,
    })
}
