// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Observation and disturbance mutations.

use bird_survey_domain::Disturbance;
use diesel::prelude::*;

use crate::backend::PersistenceBackend;
use crate::data_models::ObservationValues;
use crate::diesel_schema::{disturbances, observations};
use crate::error::PersistenceError;

backend_fn! {
/// Inserts an observation row and returns its key.
///
/// # Errors
///
/// Returns an error if the insert fails.
pub fn insert_observation(
    conn: &mut _,
    values: &ObservationValues,
) -> Result<i64, PersistenceError> {
    diesel::insert_into(observations::table)
        .values((
            observations::survey_identifier.eq(values.survey_identifier.as_str()),
            observations::bird_id.eq(values.bird_id),
            observations::bin1.eq(values.bin1),
            observations::bin2.eq(values.bin2),
            observations::habitat_id.eq(values.habitat_id),
            observations::activity_id.eq(values.activity_id),
            observations::feeding_success_id.eq(values.feeding_success_id),
            observations::nests_present.eq(values.nests_present),
            observations::chicks_present.eq(values.chicks_present),
            observations::fledglings_present.eq(values.fledglings_present),
        ))
        .execute(conn)?;

    conn.last_insert_key()
}
}

backend_fn! {
/// Inserts a disturbance row and returns its key.
///
/// # Errors
///
/// Returns an error if the insert fails.
pub fn insert_disturbance(
    conn: &mut _,
    disturbance: &Disturbance,
) -> Result<i64, PersistenceError> {
    diesel::insert_into(disturbances::table)
        .values((
            disturbances::survey_identifier.eq(disturbance.survey_identifier.to_string()),
            disturbances::disturbance_type_id.eq(disturbance.disturbance_type.id()),
            disturbances::duration_minutes.eq(disturbance.duration_minutes),
            disturbances::quantity.eq(disturbance.quantity),
            disturbances::result.eq(disturbance.result.as_str()),
        ))
        .execute(conn)?;

    conn.last_insert_key()
}
}

backend_fn! {
/// Deletes every observation and disturbance owned by a survey.
///
/// Returns the number of rows deleted; zero is not an error.
///
/// # Errors
///
/// Returns an error if a delete fails.
pub fn delete_children(conn: &mut _, survey_identifier: &str) -> Result<usize, PersistenceError> {
    let observations_deleted: usize = diesel::delete(
        observations::table.filter(observations::survey_identifier.eq(survey_identifier)),
    )
    .execute(conn)?;
    let disturbances_deleted: usize = diesel::delete(
        disturbances::table.filter(disturbances::survey_identifier.eq(survey_identifier)),
    )
    .execute(conn)?;

    Ok(observations_deleted + disturbances_deleted)
}
}
