// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Survey row mutations.

use diesel::prelude::*;
use tracing::debug;

use crate::backend::PersistenceBackend;
use crate::data_models::{SurveyValues, survey_values};
use crate::diesel_schema::{completed_surveys, pending_surveys};
use crate::error::PersistenceError;

backend_fn! {
/// Inserts a pending survey row and returns its key.
///
/// # Errors
///
/// Returns an error if the insert fails, including when the survey
/// identifier is already pending.
pub fn insert_pending(conn: &mut _, values: &SurveyValues) -> Result<i64, PersistenceError> {
    diesel::insert_into(pending_surveys::table)
        .values(survey_values!(pending_surveys, values))
        .execute(conn)?;

    let pending_survey_id: i64 = conn.last_insert_key()?;
    debug!(
        pending_survey_id,
        survey_identifier = %values.survey_identifier,
        "Inserted pending survey"
    );
    Ok(pending_survey_id)
}
}

backend_fn! {
/// Overwrites the scalar columns of a pending survey row.
///
/// The row must match both the key and the survey identifier, so the
/// identifier column is never rewritten.
///
/// # Errors
///
/// Returns `RowNotFound` if no pending row has the key and identifier, or
/// an error if the update fails.
pub fn update_pending(
    conn: &mut _,
    pending_survey_id: i64,
    values: &SurveyValues,
) -> Result<usize, PersistenceError> {
    let rows_affected: usize = diesel::update(pending_surveys::table)
        .filter(pending_surveys::pending_survey_id.eq(pending_survey_id))
        .filter(pending_surveys::survey_identifier.eq(values.survey_identifier.as_str()))
        .set(survey_values!(pending_surveys, values))
        .execute(conn)?;

    if rows_affected == 0 {
        return Err(PersistenceError::RowNotFound {
            table: "pending_surveys",
            key: pending_survey_id,
        });
    }

    debug!(pending_survey_id, "Updated pending survey");
    Ok(rows_affected)
}
}

backend_fn! {
/// Deletes a pending survey row.
///
/// # Errors
///
/// Returns `RowNotFound` if no pending row has the key, or an error if
/// the delete fails.
pub fn delete_pending(conn: &mut _, pending_survey_id: i64) -> Result<usize, PersistenceError> {
    let rows_affected: usize = diesel::delete(
        pending_surveys::table.filter(pending_surveys::pending_survey_id.eq(pending_survey_id)),
    )
    .execute(conn)?;

    if rows_affected == 0 {
        return Err(PersistenceError::RowNotFound {
            table: "pending_surveys",
            key: pending_survey_id,
        });
    }

    debug!(pending_survey_id, "Deleted pending survey");
    Ok(rows_affected)
}
}

backend_fn! {
/// Inserts a completed survey row and returns its key.
///
/// # Errors
///
/// Returns an error if the insert fails, including when the survey
/// identifier is already completed.
pub fn insert_completed(conn: &mut _, values: &SurveyValues) -> Result<i64, PersistenceError> {
    diesel::insert_into(completed_surveys::table)
        .values(survey_values!(completed_surveys, values))
        .execute(conn)?;

    let completed_survey_id: i64 = conn.last_insert_key()?;
    debug!(
        completed_survey_id,
        survey_identifier = %values.survey_identifier,
        "Inserted completed survey"
    );
    Ok(completed_survey_id)
}
}
