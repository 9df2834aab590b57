// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Domain types for waterbird survey records.
//!
//! A survey is an aggregate: one survey row plus its observation and
//! disturbance children. The aggregate lives in one of two physical stores
//! depending on its lifecycle stage (`PendingSurvey` while it is being
//! composed, `CompletedSurvey` once finalized). The only handle that survives
//! the move between stores is the `SurveyIdentifier`, and children are owned
//! through that identifier rather than through either table's primary key.

#![deny(
    clippy::pedantic,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod error;
mod reference;
mod types;
mod validation;

#[cfg(test)]
mod tests;

pub use error::DomainError;
pub use reference::{
    Activity, DisturbanceType, FeedingSuccess, Habitat, SiteAssessment, SurveyType, Tide, Weather,
};
pub use types::{
    CompletedSurvey, Disturbance, Location, Observation, PendingSurvey, Survey, SurveyDetails,
    SurveyIdentifier, SurveyRecord, SurveyState, format_timestamp, parse_timestamp,
};
pub use validation::{
    MAX_COMMENT_LENGTH, ValidationErrors, ValidationFailure, validate_location,
    validate_prep_time_hours, validate_survey,
};
