// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use crate::types::{Location, Survey};
use serde::{Deserialize, Serialize};

/// Maximum length, in characters, of either survey comment field.
pub const MAX_COMMENT_LENGTH: usize = 500;

/// A single violated rule, tied to the member it applies to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationFailure {
    /// The member that failed validation (e.g., `GeneralComments`).
    pub member: String,
    /// A human-readable description of the violation.
    pub message: String,
}

impl ValidationFailure {
    /// Creates a new validation failure.
    #[must_use]
    pub fn new(member: &str, message: String) -> Self {
        Self {
            member: member.to_string(),
            message,
        }
    }
}

/// Every rule violated by one validation pass.
///
/// Never empty when returned as an error.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ValidationErrors {
    failures: Vec<ValidationFailure>,
}

impl ValidationErrors {
    /// Creates an empty collection.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            failures: Vec::new(),
        }
    }

    /// Records a failure.
    pub fn push(&mut self, failure: ValidationFailure) {
        self.failures.push(failure);
    }

    /// Returns the recorded failures in the order they were found.
    #[must_use]
    pub fn failures(&self) -> &[ValidationFailure] {
        &self.failures
    }

    /// Returns whether any failure references the given member.
    #[must_use]
    pub fn contains_member(&self, member: &str) -> bool {
        self.failures.iter().any(|f| f.member == member)
    }

    /// Returns whether no failure was recorded.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.failures.is_empty()
    }

    /// Returns the number of recorded failures.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.failures.len()
    }

    /// Converts into `Ok(())` when empty, or `Err(self)` otherwise.
    ///
    /// # Errors
    ///
    /// Returns `self` if at least one failure was recorded.
    pub fn into_result(self) -> Result<(), Self> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

impl std::fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let joined: Vec<String> = self
            .failures
            .iter()
            .map(|failure| format!("{}: {}", failure.member, failure.message))
            .collect();
        write!(f, "{}", joined.join("; "))
    }
}

impl std::error::Error for ValidationErrors {}

/// Checks an optional comment against `MAX_COMMENT_LENGTH`.
fn check_comment_length(member: &str, value: Option<&str>, errors: &mut ValidationErrors) {
    let Some(text) = value else {
        return;
    };

    let length: usize = text.chars().count();
    if length > MAX_COMMENT_LENGTH {
        errors.push(ValidationFailure::new(
            member,
            format!("{member} must be at most {MAX_COMMENT_LENGTH} characters, got {length}"),
        ));
    }
}

/// Validates the field rules shared by every survey representation.
///
/// Rules are applied identically to pending and completed surveys:
/// - `GeneralComments` is at most 500 characters
/// - `DisturbanceComments` is at most 500 characters
///
/// Every rule is evaluated; the error lists all violations, not just the first.
///
/// # Arguments
///
/// * `survey` - The survey to validate
///
/// # Errors
///
/// Returns `ValidationErrors` naming each member that violated a rule.
pub fn validate_survey<S: Survey + ?Sized>(survey: &S) -> Result<(), ValidationErrors> {
    let details = survey.details();
    let mut errors: ValidationErrors = ValidationErrors::new();

    check_comment_length(
        "GeneralComments",
        details.general_comments.as_deref(),
        &mut errors,
    );
    check_comment_length(
        "DisturbanceComments",
        details.disturbance_comments.as_deref(),
        &mut errors,
    );

    errors.into_result()
}

/// Validates a location's name and coordinates.
///
/// # Errors
///
/// Returns an error if:
/// - The name is empty or whitespace
/// - The latitude is outside ±90
/// - The longitude is outside ±180
pub fn validate_location(location: &Location) -> Result<(), DomainError> {
    if location.name.trim().is_empty() {
        return Err(DomainError::InvalidLocationName);
    }

    if !(-90.0..=90.0).contains(&location.latitude) {
        return Err(DomainError::InvalidLatitude(location.latitude));
    }

    if !(-180.0..=180.0).contains(&location.longitude) {
        return Err(DomainError::InvalidLongitude(location.longitude));
    }

    Ok(())
}

/// Validates an hour count such as survey preparation time.
///
/// # Errors
///
/// Returns `DomainError::InvalidHours` unless `0 < hours <= 24`.
pub fn validate_prep_time_hours(hours: f64) -> Result<(), DomainError> {
    if hours > 0.0 && hours <= 24.0 {
        Ok(())
    } else {
        Err(DomainError::InvalidHours(hours))
    }
}
