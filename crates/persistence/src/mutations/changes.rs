// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Applies a staged `ChangeSet` atomically.
//!
//! One function per backend, generated by `apply_changes_fn!` so each
//! variant calls the leaf mutations for its own connection type.

use bird_survey::{Change, ChangeSet, SaveOutcome};
use diesel::Connection;
use tracing::info;

use crate::data_models::{ObservationValues, SurveyValues};
use crate::error::PersistenceError;

macro_rules! apply_changes_fn {
    ($(#[$meta:meta])* $name:ident, $conn_ty:ty, $suffix:ident) => {
        pastey::paste! {
            $(#[$meta])*
            /// Runs every staged change, in order, inside one transaction.
            ///
            /// Inserts report their assigned key in `SaveOutcome::assigned_keys`.
            ///
            /// # Errors
            ///
            /// Returns the first failing change's error. The transaction is
            /// rolled back, so no change is applied.
            pub fn $name(
                conn: &mut $conn_ty,
                changes: &ChangeSet,
            ) -> Result<SaveOutcome, PersistenceError> {
                let outcome: SaveOutcome =
                    conn.transaction::<SaveOutcome, PersistenceError, _>(|conn| {
                        let mut outcome: SaveOutcome = SaveOutcome::default();
                        for change in changes.changes() {
                            let assigned: Option<i64> = match change {
                                Change::AddPending(details) => {
                                    let values: SurveyValues = SurveyValues::encode(details)?;
                                    outcome.affected_rows += 1;
                                    Some(super::surveys::[<insert_pending_ $suffix>](
                                        conn, &values,
                                    )?)
                                }
                                Change::UpdatePending {
                                    pending_survey_id,
                                    details,
                                } => {
                                    let values: SurveyValues = SurveyValues::encode(details)?;
                                    outcome.affected_rows +=
                                        super::surveys::[<update_pending_ $suffix>](
                                            conn,
                                            *pending_survey_id,
                                            &values,
                                        )?;
                                    None
                                }
                                Change::RemovePending { pending_survey_id } => {
                                    outcome.affected_rows +=
                                        super::surveys::[<delete_pending_ $suffix>](
                                            conn,
                                            *pending_survey_id,
                                        )?;
                                    None
                                }
                                Change::AddCompleted(details) => {
                                    let values: SurveyValues = SurveyValues::encode(details)?;
                                    outcome.affected_rows += 1;
                                    Some(super::surveys::[<insert_completed_ $suffix>](
                                        conn, &values,
                                    )?)
                                }
                                Change::AddObservation(observation) => {
                                    let values: ObservationValues =
                                        ObservationValues::from(observation);
                                    outcome.affected_rows += 1;
                                    Some(super::children::[<insert_observation_ $suffix>](
                                        conn, &values,
                                    )?)
                                }
                                Change::AddDisturbance(disturbance) => {
                                    outcome.affected_rows += 1;
                                    Some(super::children::[<insert_disturbance_ $suffix>](
                                        conn,
                                        disturbance,
                                    )?)
                                }
                                Change::RemoveChildren { survey_identifier } => {
                                    outcome.affected_rows +=
                                        super::children::[<delete_children_ $suffix>](
                                            conn,
                                            &survey_identifier.to_string(),
                                        )?;
                                    None
                                }
                            };
                            outcome.assigned_keys.push(assigned);
                        }
                        Ok(outcome)
                    })?;

                info!(
                    changes = changes.len(),
                    affected_rows = outcome.affected_rows,
                    "Saved change set"
                );
                Ok(outcome)
            }
        }
    };
}

apply_changes_fn!(apply_changes_sqlite, diesel::SqliteConnection, sqlite);

apply_changes_fn!(
    #[cfg(feature = "mysql")]
    apply_changes_mysql,
    diesel::MysqlConnection,
    mysql
);
