// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use bird_survey::SurveyStore;
use bird_survey_domain::Location;

use crate::{Persistence, PersistenceError};

#[test]
fn test_create_and_get_location() {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();

    let location_id: i64 = persistence
        .create_location(&Location::new(String::from("Honeymoon Island"), 28.07, -82.83))
        .unwrap();

    let location: Location = persistence.get_location(location_id).unwrap().unwrap();
    assert_eq!(location.location_id, Some(location_id));
    assert_eq!(location.name, "Honeymoon Island");
    assert!((location.latitude - 28.07).abs() < f64::EPSILON);
    assert!((location.longitude - -82.83).abs() < f64::EPSILON);
}

#[test]
fn test_missing_location_is_none() {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();

    assert_eq!(persistence.get_location(404).unwrap(), None);
    assert_eq!(persistence.find_location(404).unwrap(), None);
}

#[test]
fn test_list_locations_is_ordered_by_name() {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();
    for name in ["Shell Key", "Anclote Key", "Egmont Key"] {
        persistence
            .create_location(&Location::new(String::from(name), 27.5, -82.5))
            .unwrap();
    }

    let names: Vec<String> = persistence
        .list_locations()
        .unwrap()
        .into_iter()
        .map(|l| l.name)
        .collect();

    assert_eq!(names, vec!["Anclote Key", "Egmont Key", "Shell Key"]);
}

#[test]
fn test_invalid_location_is_rejected_before_insert() {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();

    let bad_latitude =
        persistence.create_location(&Location::new(String::from("North"), 91.0, 0.0));
    let empty_name = persistence.create_location(&Location::new(String::new(), 0.0, 0.0));

    assert!(matches!(bad_latitude, Err(PersistenceError::InvalidData(_))));
    assert!(matches!(empty_name, Err(PersistenceError::InvalidData(_))));
    assert!(persistence.list_locations().unwrap().is_empty());
}

#[test]
fn test_duplicate_location_name_is_rejected() {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();
    let location: Location = Location::new(String::from("Egmont Key"), 27.6, -82.76);
    persistence.create_location(&location).unwrap();

    let result = persistence.create_location(&location);

    assert!(matches!(result, Err(PersistenceError::DatabaseError(_))));
}
