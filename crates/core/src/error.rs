// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use bird_survey_domain::ValidationErrors;
use thiserror::Error;

/// Errors returned by `SurveyManager` operations.
///
/// `E` is the error type of the backing `SurveyStore`. Store failures are
/// wrapped without translation so the original detail reaches the caller.
/// "Not found" is never an error.
#[derive(Debug, Error, PartialEq)]
pub enum SurveyError<E: std::error::Error + 'static> {
    /// A required argument was missing. Raised before any store access.
    #[error("Invalid input for field '{field}': {message}")]
    InvalidInput {
        /// The argument or field that was missing.
        field: &'static str,
        /// A human-readable description of the problem.
        message: String,
    },
    /// One or more field rules were violated. Nothing was written.
    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationErrors),
    /// The store failed.
    #[error(transparent)]
    Persistence(E),
}

impl<E: std::error::Error + 'static> SurveyError<E> {
    /// Returns the validation failures, if this is a validation error.
    #[must_use]
    pub const fn validation_errors(&self) -> Option<&ValidationErrors> {
        match self {
            Self::Validation(errors) => Some(errors),
            _ => None,
        }
    }
}
