// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Survey queries.
//!
//! Both survey tables share one column layout; `filtered_surveys!` builds
//! the same filtered, key-ordered select against either of them.

use bird_survey::SurveyQuery;
use bird_survey_domain::{CompletedSurvey, PendingSurvey, SurveyDetails};
use diesel::prelude::*;
use tracing::debug;

use crate::data_models::{SurveyRow, survey_columns};
use crate::diesel_schema::{completed_surveys, pending_surveys};
use crate::error::PersistenceError;

/// Loads the `SurveyRow`s of `$table` that satisfy a `SurveyQuery`.
macro_rules! filtered_surveys {
    ($conn:expr, $table:ident, $key:ident, $query:expr) => {{
        let mut statement = $table::table
            .select(survey_columns!($table, $key))
            .order($table::$key.asc())
            .into_boxed();
        if let Some(survey_identifier) = $query.survey_identifier {
            statement =
                statement.filter($table::survey_identifier.eq(survey_identifier.to_string()));
        }
        if let Some(survey_type) = $query.survey_type {
            statement = statement.filter($table::survey_type_id.eq(survey_type.id()));
        }
        if let Some(submitted_by) = $query.submitted_by {
            statement = statement.filter($table::submitted_by.eq(submitted_by));
        }
        statement.load::<SurveyRow>($conn)
    }};
}

backend_fn! {
/// Returns the pending surveys matching `query`, ordered by key.
///
/// Children and location names are not loaded.
///
/// # Errors
///
/// Returns an error if the query fails or a row cannot be decoded.
pub fn query_pending_surveys(
    conn: &mut _,
    query: &SurveyQuery,
) -> Result<Vec<PendingSurvey>, PersistenceError> {
    let rows: Vec<SurveyRow> = filtered_surveys!(conn, pending_surveys, pending_survey_id, query)?;
    debug!(count = rows.len(), ?query, "Loaded pending surveys");

    rows.into_iter()
        .map(|row| {
            let (key, details): (i64, SurveyDetails) = row.into_details("pending_surveys")?;
            let mut survey: PendingSurvey = PendingSurvey::new(details);
            survey.pending_survey_id = Some(key);
            Ok(survey)
        })
        .collect()
}
}

backend_fn! {
/// Returns the completed surveys matching `query`, ordered by key.
///
/// Children and location names are not loaded.
///
/// # Errors
///
/// Returns an error if the query fails or a row cannot be decoded.
pub fn query_completed_surveys(
    conn: &mut _,
    query: &SurveyQuery,
) -> Result<Vec<CompletedSurvey>, PersistenceError> {
    let rows: Vec<SurveyRow> =
        filtered_surveys!(conn, completed_surveys, completed_survey_id, query)?;
    debug!(count = rows.len(), ?query, "Loaded completed surveys");

    rows.into_iter()
        .map(|row| {
            let (key, details): (i64, SurveyDetails) = row.into_details("completed_surveys")?;
            let mut survey: CompletedSurvey = CompletedSurvey::new(details);
            survey.completed_survey_id = Some(key);
            Ok(survey)
        })
        .collect()
}
}
