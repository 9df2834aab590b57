// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Observation and disturbance queries.

use bird_survey_domain::{Disturbance, Observation, SurveyIdentifier};
use diesel::prelude::*;

use crate::data_models::{DisturbanceRow, ObservationRow};
use crate::diesel_schema::{disturbances, observations};
use crate::error::PersistenceError;

backend_fn! {
/// Returns the observations owned by a survey, in insertion order.
///
/// # Errors
///
/// Returns an error if the query fails or a row cannot be decoded.
pub fn query_observations(
    conn: &mut _,
    survey_identifier: SurveyIdentifier,
) -> Result<Vec<Observation>, PersistenceError> {
    observations::table
        .filter(observations::survey_identifier.eq(survey_identifier.to_string()))
        .order(observations::observation_id.asc())
        .select(ObservationRow::as_select())
        .load::<ObservationRow>(conn)?
        .into_iter()
        .map(Observation::try_from)
        .collect()
}
}

backend_fn! {
/// Returns the disturbances owned by a survey, in insertion order.
///
/// # Errors
///
/// Returns an error if the query fails or a row cannot be decoded.
pub fn query_disturbances(
    conn: &mut _,
    survey_identifier: SurveyIdentifier,
) -> Result<Vec<Disturbance>, PersistenceError> {
    disturbances::table
        .filter(disturbances::survey_identifier.eq(survey_identifier.to_string()))
        .order(disturbances::disturbance_id.asc())
        .select(DisturbanceRow::as_select())
        .load::<DisturbanceRow>(conn)?
        .into_iter()
        .map(Disturbance::try_from)
        .collect()
}
}
