// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The persistence port consumed by `SurveyManager`.
//!
//! Stores expose one queryable collection per entity (pending surveys,
//! completed surveys, observations, disturbances, locations) and a single
//! transactional `save_changes` that applies a staged `ChangeSet`.

use bird_survey_domain::{
    CompletedSurvey, Disturbance, Location, Observation, PendingSurvey, SurveyDetails,
    SurveyIdentifier, SurveyType,
};

/// Filter over a survey collection. Unset fields match everything.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SurveyQuery {
    pub survey_identifier: Option<SurveyIdentifier>,
    pub survey_type: Option<SurveyType>,
    pub submitted_by: Option<i64>,
}

impl SurveyQuery {
    /// Matches the survey with the given identifier.
    #[must_use]
    pub const fn by_identifier(survey_identifier: SurveyIdentifier) -> Self {
        Self {
            survey_identifier: Some(survey_identifier),
            survey_type: None,
            submitted_by: None,
        }
    }

    /// Matches every survey submitted by the given user.
    #[must_use]
    pub const fn by_submitter(submitted_by: i64) -> Self {
        Self {
            survey_identifier: None,
            survey_type: None,
            submitted_by: Some(submitted_by),
        }
    }

    /// Narrows the query to one survey type.
    #[must_use]
    pub const fn with_survey_type(mut self, survey_type: SurveyType) -> Self {
        self.survey_type = Some(survey_type);
        self
    }

    /// Returns whether the given survey fields satisfy every set filter.
    #[must_use]
    pub fn matches(&self, details: &SurveyDetails) -> bool {
        self.survey_identifier
            .is_none_or(|id| id == details.survey_identifier)
            && self.survey_type.is_none_or(|t| t == details.survey_type)
            && self.submitted_by.is_none_or(|u| u == details.submitted_by)
    }
}

/// One staged write.
///
/// Survey changes carry only the scalar survey row; children are staged
/// as separate changes.
#[derive(Debug, Clone, PartialEq)]
pub enum Change {
    /// Insert a pending survey row. Assigns a pending key.
    AddPending(SurveyDetails),
    /// Overwrite the scalar fields of an existing pending survey row.
    UpdatePending {
        pending_survey_id: i64,
        details: SurveyDetails,
    },
    /// Delete a pending survey row.
    RemovePending { pending_survey_id: i64 },
    /// Insert a completed survey row. Assigns a completed key.
    AddCompleted(SurveyDetails),
    /// Insert an observation row. Assigns an observation key.
    AddObservation(Observation),
    /// Insert a disturbance row. Assigns a disturbance key.
    AddDisturbance(Disturbance),
    /// Delete every observation and disturbance owned by a survey.
    RemoveChildren { survey_identifier: SurveyIdentifier },
}

/// Position of a change inside its `ChangeSet`.
///
/// Used to read back the key a store assigned to a staged insert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChangeIndex(usize);

impl ChangeIndex {
    /// Returns the zero-based position.
    #[must_use]
    pub const fn position(self) -> usize {
        self.0
    }
}

/// An ordered unit of work submitted to `SurveyStore::save_changes`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ChangeSet {
    changes: Vec<Change>,
}

impl ChangeSet {
    /// Creates an empty change set.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            changes: Vec::new(),
        }
    }

    fn push(&mut self, change: Change) -> ChangeIndex {
        self.changes.push(change);
        ChangeIndex(self.changes.len() - 1)
    }

    /// Stages insertion of a pending survey row.
    pub fn add_pending(&mut self, details: &SurveyDetails) -> ChangeIndex {
        self.push(Change::AddPending(details.clone()))
    }

    /// Stages an update of a pending survey row's scalar fields.
    pub fn update_pending(&mut self, pending_survey_id: i64, details: &SurveyDetails) {
        self.push(Change::UpdatePending {
            pending_survey_id,
            details: details.clone(),
        });
    }

    /// Stages removal of a pending survey row.
    pub fn remove_pending(&mut self, pending_survey_id: i64) {
        self.push(Change::RemovePending { pending_survey_id });
    }

    /// Stages insertion of a completed survey row.
    pub fn add_completed(&mut self, details: &SurveyDetails) -> ChangeIndex {
        self.push(Change::AddCompleted(details.clone()))
    }

    /// Stages insertion of an observation row.
    pub fn add_observation(&mut self, observation: &Observation) -> ChangeIndex {
        self.push(Change::AddObservation(observation.clone()))
    }

    /// Stages insertion of a disturbance row.
    pub fn add_disturbance(&mut self, disturbance: &Disturbance) -> ChangeIndex {
        self.push(Change::AddDisturbance(disturbance.clone()))
    }

    /// Stages removal of every child row owned by a survey.
    pub fn remove_children(&mut self, survey_identifier: SurveyIdentifier) {
        self.push(Change::RemoveChildren { survey_identifier });
    }

    /// Returns the staged changes in submission order.
    #[must_use]
    pub fn changes(&self) -> &[Change] {
        &self.changes
    }

    /// Returns whether nothing is staged.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }

    /// Returns the number of staged changes.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.changes.len()
    }
}

/// Result of a successful `save_changes`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SaveOutcome {
    /// One entry per staged change, in order. Inserts carry the assigned
    /// key; every other change carries `None`.
    pub assigned_keys: Vec<Option<i64>>,
    /// Total number of rows written or deleted.
    pub affected_rows: usize,
}

impl SaveOutcome {
    /// Returns the key assigned to the staged insert at `index`.
    #[must_use]
    pub fn key(&self, index: ChangeIndex) -> Option<i64> {
        self.assigned_keys.get(index.0).copied().flatten()
    }
}

/// Storage consumed by `SurveyManager`.
///
/// Implementations must:
/// - apply a `ChangeSet` atomically (all changes or none)
/// - assign keys to inserted rows and report them in `SaveOutcome`
/// - return their own error type unchanged; the manager never translates it
/// - return rows with their storage keys populated
pub trait SurveyStore {
    /// The store's error type.
    type Error: std::error::Error + 'static;

    /// Returns pending surveys matching the query, without children.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be queried.
    fn query_pending(&mut self, query: &SurveyQuery) -> Result<Vec<PendingSurvey>, Self::Error>;

    /// Returns completed surveys matching the query, without children.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be queried.
    fn query_completed(
        &mut self,
        query: &SurveyQuery,
    ) -> Result<Vec<CompletedSurvey>, Self::Error>;

    /// Returns the observations owned by a survey, in insertion order.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be queried.
    fn query_observations(
        &mut self,
        survey_identifier: SurveyIdentifier,
    ) -> Result<Vec<Observation>, Self::Error>;

    /// Returns the disturbances owned by a survey, in insertion order.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be queried.
    fn query_disturbances(
        &mut self,
        survey_identifier: SurveyIdentifier,
    ) -> Result<Vec<Disturbance>, Self::Error>;

    /// Looks up a location by key.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be queried.
    /// Returns `Ok(None)` if the location does not exist.
    fn find_location(&mut self, location_id: i64) -> Result<Option<Location>, Self::Error>;

    /// Applies every staged change in one transaction.
    ///
    /// # Errors
    ///
    /// Returns an error if any change fails; no change is applied in that case.
    fn save_changes(&mut self, changes: &ChangeSet) -> Result<SaveOutcome, Self::Error>;
}
