// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use bird_survey_domain::{PendingSurvey, SurveyIdentifier, SurveyType};

use super::helpers::{MemoryStore, create_test_details, create_test_survey};
use crate::{SurveyError, SurveyManager};

#[test]
fn test_delete_removes_pending_survey_and_children() {
    let mut manager = SurveyManager::new(MemoryStore::new());
    let mut survey: PendingSurvey = create_test_survey(1);
    manager.create(&mut survey).unwrap();
    let identifier: SurveyIdentifier = survey.details.survey_identifier;

    let deleted: bool = manager.delete(identifier).unwrap();

    assert!(deleted);
    assert!(manager.store().pending_with(identifier).is_empty());
    assert!(manager.store().tables.observations.is_empty());
    assert!(manager.store().tables.disturbances.is_empty());
    assert!(
        manager
            .find_by_survey_id(identifier, SurveyType::Foraging)
            .unwrap()
            .is_none()
    );
}

#[test]
fn test_delete_unknown_identifier_returns_false_without_saving() {
    let mut manager = SurveyManager::new(MemoryStore::new());

    let deleted: bool = manager.delete(SurveyIdentifier::generate()).unwrap();

    assert!(!deleted);
    assert_eq!(manager.store().save_calls, 0);
}

#[test]
fn test_delete_never_touches_completed_surveys() {
    let mut store: MemoryStore = MemoryStore::new();
    let details = create_test_details(1);
    let identifier: SurveyIdentifier = details.survey_identifier;
    store.seed_completed(details);
    let mut manager = SurveyManager::new(store);

    let deleted: bool = manager.delete(identifier).unwrap();

    assert!(!deleted);
    assert_eq!(manager.store().completed_with(identifier).len(), 1);
}

#[test]
fn test_delete_leaves_other_surveys_alone() {
    let mut manager = SurveyManager::new(MemoryStore::new());
    let mut first: PendingSurvey = create_test_survey(1);
    let mut second: PendingSurvey = create_test_survey(1);
    manager.create(&mut first).unwrap();
    manager.create(&mut second).unwrap();

    manager.delete(first.details.survey_identifier).unwrap();

    assert_eq!(manager.store().tables.pending.len(), 1);
    assert_eq!(manager.store().tables.observations.len(), 1);
    assert_eq!(
        manager.store().tables.observations[0].survey_identifier,
        second.details.survey_identifier
    );
}

#[test]
fn test_delete_nil_identifier_is_invalid_input() {
    let mut manager = SurveyManager::new(MemoryStore::new());

    let result = manager.delete(SurveyIdentifier::nil());

    assert!(matches!(result, Err(SurveyError::InvalidInput { .. })));
    assert_eq!(manager.store().query_calls, 0);
}
