// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use std::collections::HashMap;

use bird_survey_domain::{
    CompletedSurvey, Disturbance, Observation, PendingSurvey, Survey, SurveyIdentifier,
    SurveyRecord, SurveyType, validate_survey,
};
use tracing::{debug, info};

use crate::error::SurveyError;
use crate::marker::{ModificationMarker, StageUpdate};
use crate::store::{ChangeIndex, ChangeSet, SaveOutcome, SurveyQuery, SurveyStore};

/// Which children of an aggregate get staged for insertion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ChildPolicy {
    /// Every child, overwriting any key it carries.
    All,
    /// Only children without a storage key.
    UnsavedOnly,
}

/// A child row owned by a survey through its identifier.
trait SurveyChild {
    fn key(&self) -> Option<i64>;
    fn set_key(&mut self, key: Option<i64>);
    fn set_owner(&mut self, survey_identifier: SurveyIdentifier);
    fn stage(&self, changes: &mut ChangeSet) -> ChangeIndex;
}

impl SurveyChild for Observation {
    fn key(&self) -> Option<i64> {
        self.observation_id
    }

    fn set_key(&mut self, key: Option<i64>) {
        self.observation_id = key;
    }

    fn set_owner(&mut self, survey_identifier: SurveyIdentifier) {
        self.survey_identifier = survey_identifier;
    }

    fn stage(&self, changes: &mut ChangeSet) -> ChangeIndex {
        changes.add_observation(self)
    }
}

impl SurveyChild for Disturbance {
    fn key(&self) -> Option<i64> {
        self.disturbance_id
    }

    fn set_key(&mut self, key: Option<i64>) {
        self.disturbance_id = key;
    }

    fn set_owner(&mut self, survey_identifier: SurveyIdentifier) {
        self.survey_identifier = survey_identifier;
    }

    fn stage(&self, changes: &mut ChangeSet) -> ChangeIndex {
        changes.add_disturbance(self)
    }
}

/// Stages child inserts, stamping each staged child with its owner.
///
/// Returns `(position in children, change index)` pairs so keys can be
/// written back once the save succeeds.
fn stage_children<C: SurveyChild>(
    changes: &mut ChangeSet,
    survey_identifier: SurveyIdentifier,
    children: &mut [C],
    policy: ChildPolicy,
) -> Vec<(usize, ChangeIndex)> {
    children
        .iter_mut()
        .enumerate()
        .filter(|(_, child)| policy == ChildPolicy::All || child.key().is_none())
        .map(|(position, child)| {
            child.set_owner(survey_identifier);
            (position, child.stage(changes))
        })
        .collect()
}

fn assign_child_keys<C: SurveyChild>(
    children: &mut [C],
    staged: &[(usize, ChangeIndex)],
    outcome: &SaveOutcome,
) {
    for &(position, index) in staged {
        if let Some(child) = children.get_mut(position) {
            child.set_key(outcome.key(index));
        }
    }
}

fn require_identifier<E: std::error::Error + 'static>(
    survey_identifier: SurveyIdentifier,
) -> Result<(), SurveyError<E>> {
    if survey_identifier.is_nil() {
        return Err(SurveyError::InvalidInput {
            field: "SurveyIdentifier",
            message: String::from("Survey identifier is required"),
        });
    }
    Ok(())
}

fn require_pending_key<E: std::error::Error + 'static>(
    survey: &PendingSurvey,
) -> Result<i64, SurveyError<E>> {
    survey
        .pending_survey_id
        .ok_or_else(|| SurveyError::InvalidInput {
            field: "PendingSurveyId",
            message: String::from("Pending survey has not been created"),
        })
}

/// Creates, updates, finishes, deletes, and queries survey aggregates.
///
/// Each operation performs at most one validation pass and one
/// `save_changes` call. The manager keeps no state between calls beyond
/// the store and marker it was built with.
pub struct SurveyManager<S: SurveyStore, M: ModificationMarker = StageUpdate> {
    store: S,
    marker: M,
}

impl<S: SurveyStore> SurveyManager<S> {
    /// Creates a manager that marks updates with `StageUpdate`.
    #[must_use]
    pub const fn new(store: S) -> Self {
        Self {
            store,
            marker: StageUpdate,
        }
    }
}

impl<S: SurveyStore, M: ModificationMarker> SurveyManager<S, M> {
    /// Creates a manager with a custom modification marker.
    #[must_use]
    pub const fn with_marker(store: S, marker: M) -> Self {
        Self { store, marker }
    }

    /// Returns the backing store.
    #[must_use]
    pub const fn store(&self) -> &S {
        &self.store
    }

    /// Returns the backing store mutably.
    pub const fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    fn save(&mut self, changes: &ChangeSet) -> Result<SaveOutcome, SurveyError<S::Error>> {
        self.store
            .save_changes(changes)
            .map_err(SurveyError::Persistence)
    }

    /// Creates a pending survey together with all of its children.
    ///
    /// The survey row and every observation and disturbance are inserted in
    /// one save. Each child is stamped with the survey's identifier. On
    /// success the storage-assigned keys are written into `survey`.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The survey identifier is nil
    /// - The survey fails validation (nothing is written)
    /// - The store fails to save
    pub fn create(&mut self, survey: &mut PendingSurvey) -> Result<(), SurveyError<S::Error>> {
        let survey_identifier: SurveyIdentifier = survey.details.survey_identifier;
        require_identifier(survey_identifier)?;
        validate_survey(&*survey)?;

        let mut changes: ChangeSet = ChangeSet::new();
        let survey_index: ChangeIndex = changes.add_pending(&survey.details);
        let observations = stage_children(
            &mut changes,
            survey_identifier,
            &mut survey.observations,
            ChildPolicy::All,
        );
        let disturbances = stage_children(
            &mut changes,
            survey_identifier,
            &mut survey.disturbances,
            ChildPolicy::All,
        );

        let outcome: SaveOutcome = self.save(&changes)?;

        survey.pending_survey_id = outcome.key(survey_index);
        assign_child_keys(&mut survey.observations, &observations, &outcome);
        assign_child_keys(&mut survey.disturbances, &disturbances, &outcome);

        info!(
            %survey_identifier,
            pending_survey_id = survey.pending_survey_id,
            observations = observations.len(),
            disturbances = disturbances.len(),
            "Created pending survey"
        );

        Ok(())
    }

    /// Saves a submission step for an existing pending survey.
    ///
    /// The survey's scalar fields are marked modified through the injected
    /// marker. Children without a key are inserted; children that already
    /// carry a key are left untouched, and no child is removed. `step` only
    /// identifies which submission step was saved and is recorded in logs.
    ///
    /// The identifier is fixed at creation. The stored pending row with
    /// the survey's key must still carry the same identifier.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The survey identifier is nil or the survey has no pending key
    /// - The survey fails validation (nothing is written)
    /// - No stored pending survey has both the key and the identifier
    /// - The store fails to save
    pub fn update(
        &mut self,
        survey: &mut PendingSurvey,
        step: u32,
    ) -> Result<(), SurveyError<S::Error>> {
        let survey_identifier: SurveyIdentifier = survey.details.survey_identifier;
        require_identifier(survey_identifier)?;
        let pending_survey_id: i64 = require_pending_key(survey)?;
        validate_survey(&*survey)?;
        self.require_stored_identifier(survey_identifier, pending_survey_id)?;

        let mut changes: ChangeSet = ChangeSet::new();
        self.marker.mark_modified(&mut changes, survey);
        let observations = stage_children(
            &mut changes,
            survey_identifier,
            &mut survey.observations,
            ChildPolicy::UnsavedOnly,
        );
        let disturbances = stage_children(
            &mut changes,
            survey_identifier,
            &mut survey.disturbances,
            ChildPolicy::UnsavedOnly,
        );

        let outcome: SaveOutcome = self.save(&changes)?;

        assign_child_keys(&mut survey.observations, &observations, &outcome);
        assign_child_keys(&mut survey.disturbances, &disturbances, &outcome);

        info!(
            %survey_identifier,
            pending_survey_id,
            step,
            new_observations = observations.len(),
            new_disturbances = disturbances.len(),
            "Updated pending survey"
        );

        Ok(())
    }

    /// Finalizes a pending survey.
    ///
    /// Every scalar field and every child moves onto a new completed survey
    /// that keeps the original identifier. The completed row is inserted
    /// and the pending row removed in the same save, so either both happen
    /// or neither does. Children that were already saved keep their keys
    /// and rows; unsaved children are inserted in the same save.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The survey identifier is nil or the survey has no pending key
    /// - The completed survey fails validation (nothing is written)
    /// - The store fails to save
    pub fn finish(
        &mut self,
        survey: PendingSurvey,
    ) -> Result<CompletedSurvey, SurveyError<S::Error>> {
        let survey_identifier: SurveyIdentifier = survey.details.survey_identifier;
        require_identifier(survey_identifier)?;
        let pending_survey_id: i64 = require_pending_key(&survey)?;

        let PendingSurvey {
            details,
            observations,
            disturbances,
            location_name,
            ..
        } = survey;
        let mut completed: CompletedSurvey = CompletedSurvey {
            completed_survey_id: None,
            details,
            observations,
            disturbances,
            location_name,
        };
        validate_survey(&completed)?;

        let mut changes: ChangeSet = ChangeSet::new();
        let completed_index: ChangeIndex = changes.add_completed(&completed.details);
        let observations = stage_children(
            &mut changes,
            survey_identifier,
            &mut completed.observations,
            ChildPolicy::UnsavedOnly,
        );
        let disturbances = stage_children(
            &mut changes,
            survey_identifier,
            &mut completed.disturbances,
            ChildPolicy::UnsavedOnly,
        );
        changes.remove_pending(pending_survey_id);

        let outcome: SaveOutcome = self.save(&changes)?;

        completed.completed_survey_id = outcome.key(completed_index);
        assign_child_keys(&mut completed.observations, &observations, &outcome);
        assign_child_keys(&mut completed.disturbances, &disturbances, &outcome);

        info!(
            %survey_identifier,
            pending_survey_id,
            completed_survey_id = completed.completed_survey_id,
            "Finished survey"
        );

        Ok(completed)
    }

    /// Deletes a pending survey and its children.
    ///
    /// Completed surveys are never deleted. Returns `false` without saving
    /// when no pending survey has the identifier.
    ///
    /// # Errors
    ///
    /// Returns an error if the identifier is nil or the store fails.
    pub fn delete(
        &mut self,
        survey_identifier: SurveyIdentifier,
    ) -> Result<bool, SurveyError<S::Error>> {
        require_identifier(survey_identifier)?;

        let found: Vec<PendingSurvey> = self
            .store
            .query_pending(&SurveyQuery::by_identifier(survey_identifier))
            .map_err(SurveyError::Persistence)?;

        let mut changes: ChangeSet = ChangeSet::new();
        for pending_survey_id in found.iter().filter_map(|s| s.pending_survey_id) {
            changes.remove_pending(pending_survey_id);
        }
        if changes.is_empty() {
            debug!(%survey_identifier, "No pending survey to delete");
            return Ok(false);
        }
        changes.remove_children(survey_identifier);

        self.save(&changes)?;

        info!(%survey_identifier, "Deleted pending survey");
        Ok(true)
    }

    /// Finds a survey by identifier and type, with its children attached.
    ///
    /// Pending storage is searched before completed storage. Returns
    /// `Ok(None)` when neither store has a match.
    ///
    /// # Errors
    ///
    /// Returns an error if the identifier is nil or the store fails.
    pub fn find_by_survey_id(
        &mut self,
        survey_identifier: SurveyIdentifier,
        survey_type: SurveyType,
    ) -> Result<Option<SurveyRecord>, SurveyError<S::Error>> {
        require_identifier(survey_identifier)?;
        let query: SurveyQuery =
            SurveyQuery::by_identifier(survey_identifier).with_survey_type(survey_type);

        let pending: Option<PendingSurvey> = self
            .store
            .query_pending(&query)
            .map_err(SurveyError::Persistence)?
            .into_iter()
            .next();
        if let Some(mut survey) = pending {
            self.attach_children(&mut survey)?;
            debug!(%survey_identifier, "Found pending survey");
            return Ok(Some(SurveyRecord::Pending(survey)));
        }

        let completed: Option<CompletedSurvey> = self
            .store
            .query_completed(&query)
            .map_err(SurveyError::Persistence)?
            .into_iter()
            .next();
        if let Some(mut survey) = completed {
            self.attach_children(&mut survey)?;
            debug!(%survey_identifier, "Found completed survey");
            return Ok(Some(SurveyRecord::Completed(survey)));
        }

        debug!(%survey_identifier, "Survey not found");
        Ok(None)
    }

    /// Lists every pending and completed survey a user submitted for a type.
    ///
    /// Pending results come first, then completed ones. Each result has its
    /// location name attached, or `None` if the location does not exist.
    /// Children are not attached.
    ///
    /// # Errors
    ///
    /// Returns an error if the store fails.
    pub fn find_by_submitter_id_and_survey_type(
        &mut self,
        submitted_by: i64,
        survey_type: SurveyType,
    ) -> Result<Vec<SurveyRecord>, SurveyError<S::Error>> {
        let query: SurveyQuery =
            SurveyQuery::by_submitter(submitted_by).with_survey_type(survey_type);

        let mut records: Vec<SurveyRecord> = self
            .store
            .query_pending(&query)
            .map_err(SurveyError::Persistence)?
            .into_iter()
            .map(SurveyRecord::from)
            .collect();
        records.extend(
            self.store
                .query_completed(&query)
                .map_err(SurveyError::Persistence)?
                .into_iter()
                .map(SurveyRecord::from),
        );

        let mut location_names: HashMap<i64, Option<String>> = HashMap::new();
        for record in &mut records {
            let location_id: i64 = record.details().location_id;
            let name: Option<String> = if let Some(cached) = location_names.get(&location_id) {
                cached.clone()
            } else {
                let resolved: Option<String> = self
                    .store
                    .find_location(location_id)
                    .map_err(SurveyError::Persistence)?
                    .map(|location| location.name);
                location_names.insert(location_id, resolved.clone());
                resolved
            };
            record.set_location_name(name);
        }

        debug!(
            submitted_by,
            %survey_type,
            count = records.len(),
            "Listed surveys for submitter"
        );

        Ok(records)
    }

    fn require_stored_identifier(
        &mut self,
        survey_identifier: SurveyIdentifier,
        pending_survey_id: i64,
    ) -> Result<(), SurveyError<S::Error>> {
        let stored: Vec<PendingSurvey> = self
            .store
            .query_pending(&SurveyQuery::by_identifier(survey_identifier))
            .map_err(SurveyError::Persistence)?;
        if stored
            .iter()
            .any(|s| s.pending_survey_id == Some(pending_survey_id))
        {
            return Ok(());
        }

        debug!(
            %survey_identifier,
            pending_survey_id,
            "Identifier does not match stored pending survey"
        );
        Err(SurveyError::InvalidInput {
            field: "SurveyIdentifier",
            message: format!(
                "No pending survey {pending_survey_id} with identifier {survey_identifier}"
            ),
        })
    }

    fn attach_children<T: Survey>(&mut self, survey: &mut T) -> Result<(), SurveyError<S::Error>> {
        let survey_identifier: SurveyIdentifier = survey.survey_identifier();
        let observations: Vec<Observation> = self
            .store
            .query_observations(survey_identifier)
            .map_err(SurveyError::Persistence)?;
        let disturbances: Vec<Disturbance> = self
            .store
            .query_disturbances(survey_identifier)
            .map_err(SurveyError::Persistence)?;
        survey.set_children(observations, disturbances);
        Ok(())
    }
}

impl<S: SurveyStore, M: ModificationMarker> std::fmt::Debug for SurveyManager<S, M> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SurveyManager").finish_non_exhaustive()
    }
}
