// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{DisturbanceType, DomainError, FeedingSuccess, Habitat, SurveyType, Tide, Weather};
use std::collections::HashSet;

#[test]
fn test_survey_type_ids_are_stable() {
    assert_eq!(SurveyType::Foraging.id(), 1);
    assert_eq!(SurveyType::Rookery.id(), 2);
    assert_eq!(SurveyType::from_id(1).unwrap(), SurveyType::Foraging);
    assert_eq!(SurveyType::from_id(2).unwrap(), SurveyType::Rookery);
}

#[test]
fn test_from_id_rejects_unknown_id() {
    let result: Result<Tide, DomainError> = Tide::from_id(42);
    assert_eq!(
        result,
        Err(DomainError::UnknownReference {
            kind: "Tide",
            id: 42
        })
    );
}

#[test]
fn test_every_value_decodes_from_its_own_id() {
    for value in Habitat::all() {
        assert_eq!(Habitat::from_id(value.id()).unwrap(), *value);
    }
    for value in DisturbanceType::all() {
        assert_eq!(DisturbanceType::from_id(value.id()).unwrap(), *value);
    }
}

#[test]
fn test_ids_are_unique_within_a_table() {
    let ids: HashSet<i32> = Weather::all().iter().map(|w| w.id()).collect();
    assert_eq!(ids.len(), Weather::all().len());
}

#[test]
fn test_from_str_accepts_name_case_insensitively() {
    assert_eq!("rookery".parse::<SurveyType>().unwrap(), SurveyType::Rookery);
    assert_eq!(
        "Seagrass Bed".parse::<Habitat>().unwrap(),
        Habitat::SeagrassBed
    );
}

#[test]
fn test_from_str_accepts_numeric_id() {
    assert_eq!("3".parse::<FeedingSuccess>().unwrap(), FeedingSuccess::Moderate);
}

#[test]
fn test_from_str_rejects_unknown_name() {
    let result: Result<SurveyType, DomainError> = "aerial".parse();
    assert!(matches!(
        result,
        Err(DomainError::UnknownReferenceName { kind: "SurveyType", .. })
    ));
}

#[test]
fn test_display_uses_name() {
    assert_eq!(format!("{}", Weather::PartlyCloudy), "Partly cloudy");
}
