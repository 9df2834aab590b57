// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use bird_survey_domain::{Observation, PendingSurvey, SurveyIdentifier, SurveyType, Weather};

use super::helpers::{MemoryStore, RecordingMarker, create_test_survey};
use crate::{Change, SurveyError, SurveyManager};

fn created(manager: &mut SurveyManager<MemoryStore>) -> PendingSurvey {
    let mut survey: PendingSurvey = create_test_survey(1);
    manager.create(&mut survey).unwrap();
    survey
}

#[test]
fn test_update_persists_scalar_changes() {
    let mut manager = SurveyManager::new(MemoryStore::new());
    let mut survey: PendingSurvey = created(&mut manager);
    survey.details.weather = Some(Weather::Overcast);
    survey.details.wind_speed = Some(12);

    manager.update(&mut survey, 2).unwrap();

    let stored: &PendingSurvey =
        manager.store().pending_with(survey.details.survey_identifier)[0];
    assert_eq!(stored.details.weather, Some(Weather::Overcast));
    assert_eq!(stored.details.wind_speed, Some(12));
    assert_eq!(manager.store().save_calls, 2);
}

#[test]
fn test_update_inserts_only_unsaved_children() {
    let mut manager = SurveyManager::new(MemoryStore::new());
    let mut survey: PendingSurvey = created(&mut manager);
    let identifier: SurveyIdentifier = survey.details.survey_identifier;
    let existing_key: Option<i64> = survey.observations[0].observation_id;
    survey.observations.push(Observation::new(identifier, 202, 4));

    manager.update(&mut survey, 3).unwrap();

    assert_eq!(survey.observations[0].observation_id, existing_key);
    assert!(survey.observations[1].observation_id.is_some());
    assert_eq!(manager.store().tables.observations.len(), 2);
    assert_eq!(manager.store().tables.disturbances.len(), 1);
}

#[test]
fn test_update_never_removes_children() {
    let mut manager = SurveyManager::new(MemoryStore::new());
    let mut survey: PendingSurvey = created(&mut manager);
    survey.observations.clear();

    manager.update(&mut survey, 4).unwrap();

    assert_eq!(manager.store().tables.observations.len(), 1);
}

#[test]
fn test_update_calls_marker_once() {
    let marker: RecordingMarker = RecordingMarker::default();
    let mut manager = SurveyManager::with_marker(MemoryStore::new(), marker.clone());
    let mut survey: PendingSurvey = create_test_survey(1);
    manager.create(&mut survey).unwrap();
    assert!(marker.marked.borrow().is_empty());

    manager.update(&mut survey, 1).unwrap();

    assert_eq!(
        marker.marked.borrow().as_slice(),
        &[survey.details.survey_identifier]
    );
    let last = manager.store().saved_change_sets.last().unwrap();
    assert!(matches!(last.changes()[0], Change::UpdatePending { .. }));
}

#[test]
fn test_update_validation_failure_writes_nothing() {
    let mut manager = SurveyManager::new(MemoryStore::new());
    let mut survey: PendingSurvey = created(&mut manager);
    survey.details.disturbance_comments = Some("z".repeat(501));
    survey
        .observations
        .push(Observation::new(survey.details.survey_identifier, 5, 1));

    let result = manager.update(&mut survey, 2);

    assert!(matches!(result, Err(SurveyError::Validation(_))));
    assert_eq!(manager.store().save_calls, 1);
    assert!(survey.observations[1].observation_id.is_none());
    let stored: &PendingSurvey =
        manager.store().pending_with(survey.details.survey_identifier)[0];
    assert_eq!(stored.details.disturbance_comments, None);
}

#[test]
fn test_update_requires_pending_key() {
    let mut manager = SurveyManager::new(MemoryStore::new());
    let mut survey: PendingSurvey = create_test_survey(1);

    let result = manager.update(&mut survey, 1);

    assert!(matches!(
        result,
        Err(SurveyError::InvalidInput {
            field: "PendingSurveyId",
            ..
        })
    ));
    assert_eq!(manager.store().save_calls, 0);
}

#[test]
fn test_update_keeps_identifier_stable() {
    let mut manager = SurveyManager::new(MemoryStore::new());
    let mut survey: PendingSurvey = created(&mut manager);
    let identifier: SurveyIdentifier = survey.details.survey_identifier;

    manager.update(&mut survey, 1).unwrap();
    manager.update(&mut survey, 2).unwrap();

    assert_eq!(survey.details.survey_identifier, identifier);
    assert!(
        manager
            .find_by_survey_id(identifier, SurveyType::Foraging)
            .unwrap()
            .is_some()
    );
}

#[test]
fn test_update_rejects_changed_identifier() {
    let mut manager = SurveyManager::new(MemoryStore::new());
    let mut survey: PendingSurvey = created(&mut manager);
    let original: SurveyIdentifier = survey.details.survey_identifier;
    survey.details.survey_identifier = SurveyIdentifier::generate();
    survey
        .observations
        .push(Observation::new(survey.details.survey_identifier, 7, 2));

    let result = manager.update(&mut survey, 2);

    assert!(matches!(
        result,
        Err(SurveyError::InvalidInput {
            field: "SurveyIdentifier",
            ..
        })
    ));
    assert_eq!(manager.store().save_calls, 1);
    assert_eq!(manager.store().pending_with(original).len(), 1);
    assert_eq!(manager.store().tables.observations.len(), 1);
    assert!(
        manager
            .store()
            .tables
            .observations
            .iter()
            .all(|o| o.survey_identifier == original)
    );
}

#[test]
fn test_update_of_deleted_survey_is_rejected() {
    let mut manager = SurveyManager::new(MemoryStore::new());
    let mut survey: PendingSurvey = created(&mut manager);
    assert!(manager.delete(survey.details.survey_identifier).unwrap());

    let result = manager.update(&mut survey, 2);

    assert!(matches!(
        result,
        Err(SurveyError::InvalidInput {
            field: "SurveyIdentifier",
            ..
        })
    ));
    assert_eq!(manager.store().save_calls, 2);
}
