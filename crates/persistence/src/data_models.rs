// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Row shapes and their conversions to and from domain values.
//!
//! Reference data is stored by numeric id, timestamps as
//! `YYYY-MM-DD HH:MM:SS[.fraction]` text, survey identifiers as hyphenated
//! UUID text, booleans as 0/1 integers, and the observer list as a JSON array.

use bird_survey_domain::{
    Activity, Disturbance, DisturbanceType, FeedingSuccess, Habitat, Location, Observation,
    SiteAssessment, SurveyDetails, SurveyIdentifier, SurveyType, Tide, Weather, format_timestamp,
    parse_timestamp,
};
use diesel::prelude::*;

use crate::diesel_schema::{disturbances, locations, observations};
use crate::error::PersistenceError;

/// Selects the key column followed by every scalar survey column of `$table`.
///
/// Both survey tables share one layout, so a single `SurveyRow` loads either.
macro_rules! survey_columns {
    ($table:ident, $key:ident) => {
        (
            $table::$key,
            $table::survey_identifier,
            $table::survey_type_id,
            $table::location_id,
            $table::submitted_by,
            $table::start_date,
            $table::end_date,
            $table::start_temperature,
            $table::end_temperature,
            $table::water_height,
            $table::wind_speed,
            $table::wind_direction,
            $table::prep_time_hours,
            $table::weather_id,
            $table::tide_id,
            $table::habitat_id,
            $table::site_assessment_id,
            $table::general_comments,
            $table::disturbance_comments,
            $table::observers,
        )
    };
}

/// Builds the `(column.eq(value), ...)` tuple writing `SurveyValues` into `$table`.
macro_rules! survey_values {
    ($table:ident, $values:expr) => {
        (
            $table::survey_identifier.eq($values.survey_identifier.as_str()),
            $table::survey_type_id.eq($values.survey_type_id),
            $table::location_id.eq($values.location_id),
            $table::submitted_by.eq($values.submitted_by),
            $table::start_date.eq($values.start_date.as_deref()),
            $table::end_date.eq($values.end_date.as_deref()),
            $table::start_temperature.eq($values.start_temperature),
            $table::end_temperature.eq($values.end_temperature),
            $table::water_height.eq($values.water_height),
            $table::wind_speed.eq($values.wind_speed),
            $table::wind_direction.eq($values.wind_direction.as_deref()),
            $table::prep_time_hours.eq($values.prep_time_hours),
            $table::weather_id.eq($values.weather_id),
            $table::tide_id.eq($values.tide_id),
            $table::habitat_id.eq($values.habitat_id),
            $table::site_assessment_id.eq($values.site_assessment_id),
            $table::general_comments.eq($values.general_comments.as_deref()),
            $table::disturbance_comments.eq($values.disturbance_comments.as_deref()),
            $table::observers.eq($values.observers.as_str()),
        )
    };
}

pub(crate) use survey_columns;
pub(crate) use survey_values;

fn corrupt(table: &'static str) -> impl Fn(bird_survey_domain::DomainError) -> PersistenceError {
    move |err| PersistenceError::CorruptRow {
        table,
        message: err.to_string(),
    }
}

const fn encode_flag(value: Option<bool>) -> Option<i32> {
    match value {
        Some(true) => Some(1),
        Some(false) => Some(0),
        None => None,
    }
}

const fn decode_flag(value: Option<i32>) -> Option<bool> {
    match value {
        Some(flag) => Some(flag != 0),
        None => None,
    }
}

/// A survey row as loaded through `survey_columns!`.
#[derive(Debug, Clone, Queryable)]
pub struct SurveyRow {
    pub key: i64,
    pub survey_identifier: String,
    pub survey_type_id: i32,
    pub location_id: i64,
    pub submitted_by: i64,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub start_temperature: Option<i32>,
    pub end_temperature: Option<i32>,
    pub water_height: Option<f64>,
    pub wind_speed: Option<i32>,
    pub wind_direction: Option<String>,
    pub prep_time_hours: Option<f64>,
    pub weather_id: Option<i32>,
    pub tide_id: Option<i32>,
    pub habitat_id: Option<i32>,
    pub site_assessment_id: Option<i32>,
    pub general_comments: Option<String>,
    pub disturbance_comments: Option<String>,
    pub observers: String,
}

impl SurveyRow {
    /// Decodes the row into its key and scalar survey fields.
    ///
    /// # Errors
    ///
    /// Returns `CorruptRow` if a stored value cannot be decoded.
    pub fn into_details(
        self,
        table: &'static str,
    ) -> Result<(i64, SurveyDetails), PersistenceError> {
        let err = corrupt(table);
        let observers: Vec<String> =
            serde_json::from_str(&self.observers).map_err(|e| PersistenceError::CorruptRow {
                table,
                message: format!("observers: {e}"),
            })?;

        let details: SurveyDetails = SurveyDetails {
            survey_identifier: self.survey_identifier.parse().map_err(&err)?,
            survey_type: SurveyType::from_id(self.survey_type_id).map_err(&err)?,
            location_id: self.location_id,
            submitted_by: self.submitted_by,
            start_date: self
                .start_date
                .as_deref()
                .map(parse_timestamp)
                .transpose()
                .map_err(&err)?,
            end_date: self
                .end_date
                .as_deref()
                .map(parse_timestamp)
                .transpose()
                .map_err(&err)?,
            start_temperature: self.start_temperature,
            end_temperature: self.end_temperature,
            water_height: self.water_height,
            wind_speed: self.wind_speed,
            wind_direction: self.wind_direction,
            prep_time_hours: self.prep_time_hours,
            weather: self
                .weather_id
                .map(Weather::from_id)
                .transpose()
                .map_err(&err)?,
            tide: self.tide_id.map(Tide::from_id).transpose().map_err(&err)?,
            habitat: self
                .habitat_id
                .map(Habitat::from_id)
                .transpose()
                .map_err(&err)?,
            site_assessment: self
                .site_assessment_id
                .map(SiteAssessment::from_id)
                .transpose()
                .map_err(&err)?,
            general_comments: self.general_comments,
            disturbance_comments: self.disturbance_comments,
            observers,
        };

        Ok((self.key, details))
    }
}

/// Encoded scalar survey fields, ready for `survey_values!`.
#[derive(Debug, Clone)]
pub struct SurveyValues {
    pub survey_identifier: String,
    pub survey_type_id: i32,
    pub location_id: i64,
    pub submitted_by: i64,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub start_temperature: Option<i32>,
    pub end_temperature: Option<i32>,
    pub water_height: Option<f64>,
    pub wind_speed: Option<i32>,
    pub wind_direction: Option<String>,
    pub prep_time_hours: Option<f64>,
    pub weather_id: Option<i32>,
    pub tide_id: Option<i32>,
    pub habitat_id: Option<i32>,
    pub site_assessment_id: Option<i32>,
    pub general_comments: Option<String>,
    pub disturbance_comments: Option<String>,
    pub observers: String,
}

impl SurveyValues {
    /// Encodes scalar survey fields for storage.
    ///
    /// # Errors
    ///
    /// Returns an error if a timestamp or the observer list cannot be encoded.
    pub fn encode(details: &SurveyDetails) -> Result<Self, PersistenceError> {
        Ok(Self {
            survey_identifier: details.survey_identifier.to_string(),
            survey_type_id: details.survey_type.id(),
            location_id: details.location_id,
            submitted_by: details.submitted_by,
            start_date: details.start_date.as_ref().map(format_timestamp).transpose()?,
            end_date: details.end_date.as_ref().map(format_timestamp).transpose()?,
            start_temperature: details.start_temperature,
            end_temperature: details.end_temperature,
            water_height: details.water_height,
            wind_speed: details.wind_speed,
            wind_direction: details.wind_direction.clone(),
            prep_time_hours: details.prep_time_hours,
            weather_id: details.weather.map(Weather::id),
            tide_id: details.tide.map(Tide::id),
            habitat_id: details.habitat.map(Habitat::id),
            site_assessment_id: details.site_assessment.map(SiteAssessment::id),
            general_comments: details.general_comments.clone(),
            disturbance_comments: details.disturbance_comments.clone(),
            observers: serde_json::to_string(&details.observers)?,
        })
    }
}

/// Diesel Queryable struct for observation rows.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = observations)]
pub struct ObservationRow {
    pub observation_id: i64,
    pub survey_identifier: String,
    pub bird_id: i64,
    pub bin1: i32,
    pub bin2: Option<i32>,
    pub habitat_id: Option<i32>,
    pub activity_id: Option<i32>,
    pub feeding_success_id: Option<i32>,
    pub nests_present: Option<i32>,
    pub chicks_present: Option<i32>,
    pub fledglings_present: Option<i32>,
}

impl TryFrom<ObservationRow> for Observation {
    type Error = PersistenceError;

    fn try_from(row: ObservationRow) -> Result<Self, Self::Error> {
        let err = corrupt("observations");
        let survey_identifier: SurveyIdentifier = row.survey_identifier.parse().map_err(&err)?;
        Ok(Self {
            observation_id: Some(row.observation_id),
            survey_identifier,
            bird_id: row.bird_id,
            bin1: row.bin1,
            bin2: row.bin2,
            habitat: row
                .habitat_id
                .map(Habitat::from_id)
                .transpose()
                .map_err(&err)?,
            activity: row
                .activity_id
                .map(Activity::from_id)
                .transpose()
                .map_err(&err)?,
            feeding_success: row
                .feeding_success_id
                .map(FeedingSuccess::from_id)
                .transpose()
                .map_err(&err)?,
            nests_present: decode_flag(row.nests_present),
            chicks_present: decode_flag(row.chicks_present),
            fledglings_present: decode_flag(row.fledglings_present),
        })
    }
}

/// Encoded observation fields. The key is assigned on insert.
#[derive(Debug, Clone)]
pub struct ObservationValues {
    pub survey_identifier: String,
    pub bird_id: i64,
    pub bin1: i32,
    pub bin2: Option<i32>,
    pub habitat_id: Option<i32>,
    pub activity_id: Option<i32>,
    pub feeding_success_id: Option<i32>,
    pub nests_present: Option<i32>,
    pub chicks_present: Option<i32>,
    pub fledglings_present: Option<i32>,
}

impl From<&Observation> for ObservationValues {
    fn from(observation: &Observation) -> Self {
        Self {
            survey_identifier: observation.survey_identifier.to_string(),
            bird_id: observation.bird_id,
            bin1: observation.bin1,
            bin2: observation.bin2,
            habitat_id: observation.habitat.map(Habitat::id),
            activity_id: observation.activity.map(Activity::id),
            feeding_success_id: observation.feeding_success.map(FeedingSuccess::id),
            nests_present: encode_flag(observation.nests_present),
            chicks_present: encode_flag(observation.chicks_present),
            fledglings_present: encode_flag(observation.fledglings_present),
        }
    }
}

/// Diesel Queryable struct for disturbance rows.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = disturbances)]
pub struct DisturbanceRow {
    pub disturbance_id: i64,
    pub survey_identifier: String,
    pub disturbance_type_id: i32,
    pub duration_minutes: i32,
    pub quantity: i32,
    pub result: String,
}

impl TryFrom<DisturbanceRow> for Disturbance {
    type Error = PersistenceError;

    fn try_from(row: DisturbanceRow) -> Result<Self, Self::Error> {
        let err = corrupt("disturbances");
        Ok(Self {
            disturbance_id: Some(row.disturbance_id),
            survey_identifier: row.survey_identifier.parse().map_err(&err)?,
            disturbance_type: DisturbanceType::from_id(row.disturbance_type_id).map_err(&err)?,
            duration_minutes: row.duration_minutes,
            quantity: row.quantity,
            result: row.result,
        })
    }
}

/// Diesel Queryable struct for location rows.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = locations)]
pub struct LocationRow {
    pub location_id: i64,
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl From<LocationRow> for Location {
    fn from(row: LocationRow) -> Self {
        Self {
            location_id: Some(row.location_id),
            name: row.name,
            latitude: row.latitude,
            longitude: row.longitude,
        }
    }
}
