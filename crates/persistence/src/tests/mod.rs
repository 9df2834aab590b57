// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::expect_used, clippy::unwrap_used)]

mod location_tests;

use bird_survey_domain::{
    Activity, Disturbance, DisturbanceType, FeedingSuccess, Habitat, Location, Observation,
    PendingSurvey, SiteAssessment, SurveyDetails, SurveyIdentifier, SurveyType, Tide, Weather,
};
use diesel::SqliteConnection;
use time::macros::datetime;

use crate::{BackendConnection, Persistence};

pub fn sqlite_conn(persistence: &mut Persistence) -> &mut SqliteConnection {
    match &mut persistence.conn {
        BackendConnection::Sqlite(conn) => conn,
        #[cfg(feature = "mysql")]
        BackendConnection::Mysql(_) => panic!("expected a SQLite connection"),
    }
}

/// Creates an in-memory store with one location, returning its key.
pub fn create_test_persistence() -> (Persistence, i64) {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();
    let location_id: i64 = persistence
        .create_location(&Location::new(String::from("Fort De Soto"), 27.6, -82.7))
        .unwrap();
    (persistence, location_id)
}

/// Survey fields with every optional column populated.
pub fn create_full_details(location_id: i64, survey_type: SurveyType) -> SurveyDetails {
    let mut details: SurveyDetails = SurveyDetails::new(survey_type, location_id, 42);
    details.start_date = Some(datetime!(2026-03-14 07:30:00));
    details.end_date = Some(datetime!(2026-03-14 09:05:30));
    details.start_temperature = Some(18);
    details.end_temperature = Some(23);
    details.water_height = Some(0.75);
    details.wind_speed = Some(9);
    details.wind_direction = Some(String::from("NNE"));
    details.prep_time_hours = Some(1.5);
    details.weather = Some(Weather::PartlyCloudy);
    details.tide = Some(Tide::Falling);
    details.habitat = Some(Habitat::Mudflat);
    details.site_assessment = Some(SiteAssessment::Good);
    details.general_comments = Some(String::from("Calm morning"));
    details.disturbance_comments = Some(String::from("One kayak"));
    details.observers = vec![String::from("R. Tern"), String::from("L. Heron")];
    details
}

pub fn create_test_observation(survey_identifier: SurveyIdentifier) -> Observation {
    let mut observation: Observation = Observation::new(survey_identifier, 101, 14);
    observation.bin2 = Some(3);
    observation.habitat = Some(Habitat::Marsh);
    observation.activity = Some(Activity::Foraging);
    observation.feeding_success = Some(FeedingSuccess::Moderate);
    observation.nests_present = Some(false);
    observation.chicks_present = Some(true);
    observation
}

pub fn create_test_disturbance(survey_identifier: SurveyIdentifier) -> Disturbance {
    Disturbance::new(
        survey_identifier,
        DisturbanceType::Kayak,
        6,
        2,
        String::from("Flushed to the far bank"),
    )
}

/// A pending survey with one observation and one disturbance.
pub fn create_test_survey(location_id: i64) -> PendingSurvey {
    let mut survey: PendingSurvey =
        PendingSurvey::new(create_full_details(location_id, SurveyType::Foraging));
    let survey_identifier: SurveyIdentifier = survey.details.survey_identifier;
    survey
        .observations
        .push(create_test_observation(survey_identifier));
    survey
        .disturbances
        .push(create_test_disturbance(survey_identifier));
    survey
}
