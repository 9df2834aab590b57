// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! In-memory `SurveyStore` used to exercise the manager without a database.

use std::cell::RefCell;
use std::rc::Rc;

use bird_survey_domain::{
    CompletedSurvey, Disturbance, DisturbanceType, Location, Observation, PendingSurvey,
    SurveyDetails, SurveyIdentifier, SurveyType,
};

use crate::{Change, ChangeSet, ModificationMarker, SaveOutcome, SurveyQuery, SurveyStore};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemoryStoreError(pub String);

impl std::fmt::Display for MemoryStoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "memory store failure: {}", self.0)
    }
}

impl std::error::Error for MemoryStoreError {}

/// Rows held by the memory store. Cloned wholesale so saves are atomic.
#[derive(Debug, Clone, Default)]
pub struct Tables {
    pub pending: Vec<PendingSurvey>,
    pub completed: Vec<CompletedSurvey>,
    pub observations: Vec<Observation>,
    pub disturbances: Vec<Disturbance>,
    pub locations: Vec<Location>,
    next_key: i64,
}

impl Tables {
    fn allocate_key(&mut self) -> i64 {
        self.next_key += 1;
        self.next_key
    }
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    pub tables: Tables,
    pub save_calls: usize,
    pub query_calls: usize,
    pub fail_saves: bool,
    pub saved_change_sets: Vec<ChangeSet>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_location(mut self, name: &str) -> (Self, i64) {
        let key: i64 = self.tables.allocate_key();
        let mut location: Location = Location::new(String::from(name), 27.7, -82.6);
        location.location_id = Some(key);
        self.tables.locations.push(location);
        (self, key)
    }

    /// Inserts a pending row directly, bypassing the manager.
    pub fn seed_pending(&mut self, details: SurveyDetails) -> i64 {
        let key: i64 = self.tables.allocate_key();
        let mut survey: PendingSurvey = PendingSurvey::new(details);
        survey.pending_survey_id = Some(key);
        self.tables.pending.push(survey);
        key
    }

    /// Inserts a completed row directly, bypassing the manager.
    pub fn seed_completed(&mut self, details: SurveyDetails) -> i64 {
        let key: i64 = self.tables.allocate_key();
        let mut survey: CompletedSurvey = CompletedSurvey::new(details);
        survey.completed_survey_id = Some(key);
        self.tables.completed.push(survey);
        key
    }

    pub fn pending_with(&self, survey_identifier: SurveyIdentifier) -> Vec<&PendingSurvey> {
        self.tables
            .pending
            .iter()
            .filter(|s| s.details.survey_identifier == survey_identifier)
            .collect()
    }

    pub fn completed_with(&self, survey_identifier: SurveyIdentifier) -> Vec<&CompletedSurvey> {
        self.tables
            .completed
            .iter()
            .filter(|s| s.details.survey_identifier == survey_identifier)
            .collect()
    }
}

impl SurveyStore for MemoryStore {
    type Error = MemoryStoreError;

    fn query_pending(&mut self, query: &SurveyQuery) -> Result<Vec<PendingSurvey>, Self::Error> {
        self.query_calls += 1;
        Ok(self
            .tables
            .pending
            .iter()
            .filter(|s| query.matches(&s.details))
            .cloned()
            .collect())
    }

    fn query_completed(
        &mut self,
        query: &SurveyQuery,
    ) -> Result<Vec<CompletedSurvey>, Self::Error> {
        self.query_calls += 1;
        Ok(self
            .tables
            .completed
            .iter()
            .filter(|s| query.matches(&s.details))
            .cloned()
            .collect())
    }

    fn query_observations(
        &mut self,
        survey_identifier: SurveyIdentifier,
    ) -> Result<Vec<Observation>, Self::Error> {
        self.query_calls += 1;
        Ok(self
            .tables
            .observations
            .iter()
            .filter(|o| o.survey_identifier == survey_identifier)
            .cloned()
            .collect())
    }

    fn query_disturbances(
        &mut self,
        survey_identifier: SurveyIdentifier,
    ) -> Result<Vec<Disturbance>, Self::Error> {
        self.query_calls += 1;
        Ok(self
            .tables
            .disturbances
            .iter()
            .filter(|d| d.survey_identifier == survey_identifier)
            .cloned()
            .collect())
    }

    fn find_location(&mut self, location_id: i64) -> Result<Option<Location>, Self::Error> {
        self.query_calls += 1;
        Ok(self
            .tables
            .locations
            .iter()
            .find(|l| l.location_id == Some(location_id))
            .cloned())
    }

    fn save_changes(&mut self, changes: &ChangeSet) -> Result<SaveOutcome, Self::Error> {
        self.save_calls += 1;
        if self.fail_saves {
            return Err(MemoryStoreError(String::from("disk full")));
        }

        let mut staged: Tables = self.tables.clone();
        let mut outcome: SaveOutcome = SaveOutcome::default();

        for change in changes.changes() {
            let mut assigned: Option<i64> = None;
            match change {
                Change::AddPending(details) => {
                    let key: i64 = staged.allocate_key();
                    let mut survey: PendingSurvey = PendingSurvey::new(details.clone());
                    survey.pending_survey_id = Some(key);
                    staged.pending.push(survey);
                    assigned = Some(key);
                    outcome.affected_rows += 1;
                }
                Change::UpdatePending {
                    pending_survey_id,
                    details,
                } => {
                    let row = staged
                        .pending
                        .iter_mut()
                        .find(|s| {
                            s.pending_survey_id == Some(*pending_survey_id)
                                && s.details.survey_identifier == details.survey_identifier
                        })
                        .ok_or_else(|| MemoryStoreError(String::from("no such pending row")))?;
                    row.details = details.clone();
                    outcome.affected_rows += 1;
                }
                Change::RemovePending { pending_survey_id } => {
                    let before: usize = staged.pending.len();
                    staged
                        .pending
                        .retain(|s| s.pending_survey_id != Some(*pending_survey_id));
                    outcome.affected_rows += before - staged.pending.len();
                }
                Change::AddCompleted(details) => {
                    let key: i64 = staged.allocate_key();
                    let mut survey: CompletedSurvey = CompletedSurvey::new(details.clone());
                    survey.completed_survey_id = Some(key);
                    staged.completed.push(survey);
                    assigned = Some(key);
                    outcome.affected_rows += 1;
                }
                Change::AddObservation(observation) => {
                    let key: i64 = staged.allocate_key();
                    let mut row: Observation = observation.clone();
                    row.observation_id = Some(key);
                    staged.observations.push(row);
                    assigned = Some(key);
                    outcome.affected_rows += 1;
                }
                Change::AddDisturbance(disturbance) => {
                    let key: i64 = staged.allocate_key();
                    let mut row: Disturbance = disturbance.clone();
                    row.disturbance_id = Some(key);
                    staged.disturbances.push(row);
                    assigned = Some(key);
                    outcome.affected_rows += 1;
                }
                Change::RemoveChildren { survey_identifier } => {
                    let before: usize = staged.observations.len() + staged.disturbances.len();
                    staged
                        .observations
                        .retain(|o| o.survey_identifier != *survey_identifier);
                    staged
                        .disturbances
                        .retain(|d| d.survey_identifier != *survey_identifier);
                    outcome.affected_rows +=
                        before - staged.observations.len() - staged.disturbances.len();
                }
            }
            outcome.assigned_keys.push(assigned);
        }

        self.tables = staged;
        self.saved_change_sets.push(changes.clone());
        Ok(outcome)
    }
}

/// Marker that records every survey it is asked to mark, then stages
/// the usual update.
#[derive(Debug, Clone, Default)]
pub struct RecordingMarker {
    pub marked: Rc<RefCell<Vec<SurveyIdentifier>>>,
}

impl ModificationMarker for RecordingMarker {
    fn mark_modified(&self, changes: &mut ChangeSet, survey: &PendingSurvey) {
        self.marked
            .borrow_mut()
            .push(survey.details.survey_identifier);
        if let Some(pending_survey_id) = survey.pending_survey_id {
            changes.update_pending(pending_survey_id, &survey.details);
        }
    }
}

pub fn create_test_details(location_id: i64) -> SurveyDetails {
    let mut details: SurveyDetails = SurveyDetails::new(SurveyType::Foraging, location_id, 42);
    details.general_comments = Some(String::from("ok"));
    details.observers = vec![String::from("R. Tern"), String::from("L. Heron")];
    details
}

/// A pending survey with one observation and one disturbance.
pub fn create_test_survey(location_id: i64) -> PendingSurvey {
    let mut survey: PendingSurvey = PendingSurvey::new(create_test_details(location_id));
    let identifier: SurveyIdentifier = survey.details.survey_identifier;
    survey.observations.push(Observation::new(identifier, 101, 12));
    survey.disturbances.push(Disturbance::new(
        identifier,
        DisturbanceType::Kayak,
        5,
        2,
        String::from("Flushed to the far bank"),
    ));
    survey
}
