//! Submission validation: every rule is checked and every failure message
//! collected, in a fixed order.

use crate::form::MemoryForm;
use crate::record::VALID_YEARS;

/// Outcome of validating a submitted form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Validation {
    /// True iff no rule failed.
    pub is_valid: bool,
    /// Human-readable failure messages, in rule order.
    pub errors: Vec<String>,
}

/// Validate a submitted form. Pure: no side effects, no clock, no storage.
pub fn validate(form: &MemoryForm) -> Validation {
    let mut errors = Vec::new();

    if form.year.is_empty() {
        errors.push("Year is required".to_string());
    }
    if form.department.is_empty() {
        errors.push("Department is required".to_string());
    }
    if form.title().chars().count() < 3 {
        errors.push("Title must be at least 3 characters".to_string());
    }
    if form.description().chars().count() < 10 {
        errors.push("Description must be at least 10 characters".to_string());
    }
    if form.category.is_empty() {
        errors.push("Category is required".to_string());
    }
    // The year dropdown is a closed set; reject anything else even if a
    // tampered form supplies it.
    if !form.year.is_empty() && !VALID_YEARS.contains(&form.year.as_str()) {
        errors.push("Invalid year selected".to_string());
    }

    Validation {
        is_valid: errors.is_empty(),
        errors,
    }
}
