// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use crate::reference::{
    Activity, DisturbanceType, FeedingSuccess, Habitat, SiteAssessment, SurveyType, Tide, Weather,
};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use time::PrimitiveDateTime;
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;
use uuid::Uuid;

/// Accepts `YYYY-MM-DD HH:MM:SS` with an optional fractional second.
const TIMESTAMP_PARSE_FORMAT: &[BorrowedFormatItem<'static>] = format_description!(
    "[year]-[month]-[day] [hour]:[minute]:[second][optional [.[subsecond]]]"
);

const WHOLE_SECOND_FORMAT: &[BorrowedFormatItem<'static>] =
    format_description!("[year]-[month]-[day] [hour]:[minute]:[second]");

const FRACTIONAL_SECOND_FORMAT: &[BorrowedFormatItem<'static>] =
    format_description!("[year]-[month]-[day] [hour]:[minute]:[second].[subsecond]");

/// Parses a survey timestamp in `YYYY-MM-DD HH:MM:SS[.fraction]` form.
///
/// # Errors
///
/// Returns `DomainError::TimestampParseError` if the string is malformed.
pub fn parse_timestamp(value: &str) -> Result<PrimitiveDateTime, DomainError> {
    PrimitiveDateTime::parse(value, TIMESTAMP_PARSE_FORMAT).map_err(|e| {
        DomainError::TimestampParseError {
            value: value.to_string(),
            error: e.to_string(),
        }
    })
}

/// Formats a survey timestamp as `YYYY-MM-DD HH:MM:SS`.
///
/// A non-zero fraction is appended with as many digits as it needs, so
/// `parse_timestamp` reads back the same instant.
///
/// # Errors
///
/// Returns `DomainError::TimestampFormatError` if formatting fails.
pub fn format_timestamp(value: &PrimitiveDateTime) -> Result<String, DomainError> {
    let format: &[BorrowedFormatItem<'static>] = if value.nanosecond() == 0 {
        WHOLE_SECOND_FORMAT
    } else {
        FRACTIONAL_SECOND_FORMAT
    };
    value
        .format(format)
        .map_err(|e| DomainError::TimestampFormatError(e.to_string()))
}

/// Stable correlation key for a survey aggregate.
///
/// Assigned once when the aggregate is constructed and carried unchanged
/// from the pending store into the completed store. Children reference
/// their survey through this value. The nil UUID is never a valid
/// identifier and is treated as "missing".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SurveyIdentifier(Uuid);

impl SurveyIdentifier {
    /// Generates a new random identifier.
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    /// Returns the nil identifier, used to represent a missing value.
    #[must_use]
    pub const fn nil() -> Self {
        Self(Uuid::nil())
    }

    /// Returns whether this is the nil identifier.
    #[must_use]
    pub const fn is_nil(&self) -> bool {
        self.0.is_nil()
    }
}

impl std::fmt::Display for SurveyIdentifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.hyphenated())
    }
}

impl FromStr for SurveyIdentifier {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s.trim())
            .map(Self)
            .map_err(|_| DomainError::InvalidSurveyIdentifier(s.to_string()))
    }
}

/// Lifecycle stage of a survey aggregate.
///
/// Valid transitions are:
/// - `Pending` → `Pending` (update)
/// - `Pending` → `Completed` (finish)
/// - `Pending` → `Deleted` (delete)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SurveyState {
    /// Being composed across submission steps.
    Pending,
    /// Finalized. Never modified or deleted.
    Completed,
    /// Removed before completion.
    Deleted,
}

impl SurveyState {
    /// Checks if a transition from this state to another is valid.
    #[must_use]
    pub const fn can_transition_to(&self, target: Self) -> bool {
        matches!(
            (self, target),
            (Self::Pending, Self::Pending | Self::Completed | Self::Deleted)
        )
    }

    /// Returns whether no transition leaves this state.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Deleted)
    }
}

impl std::fmt::Display for SurveyState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pending => write!(f, "Pending"),
            Self::Completed => write!(f, "Completed"),
            Self::Deleted => write!(f, "Deleted"),
        }
    }
}

/// Scalar fields shared by pending and completed surveys.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SurveyDetails {
    /// Correlation key shared by the survey and its children.
    pub survey_identifier: SurveyIdentifier,
    /// The kind of survey.
    pub survey_type: SurveyType,
    /// The surveyed location.
    pub location_id: i64,
    /// The user who submitted the survey.
    pub submitted_by: i64,
    pub start_date: Option<PrimitiveDateTime>,
    pub end_date: Option<PrimitiveDateTime>,
    /// Air temperature at the start of the survey, in degrees Fahrenheit.
    pub start_temperature: Option<i32>,
    /// Air temperature at the end of the survey, in degrees Fahrenheit.
    pub end_temperature: Option<i32>,
    /// Water height in feet.
    pub water_height: Option<f64>,
    /// Wind speed in knots.
    pub wind_speed: Option<i32>,
    /// Compass direction the wind blows from (e.g., `NNE`).
    pub wind_direction: Option<String>,
    /// Preparation time in hours.
    pub prep_time_hours: Option<f64>,
    pub weather: Option<Weather>,
    pub tide: Option<Tide>,
    pub habitat: Option<Habitat>,
    pub site_assessment: Option<SiteAssessment>,
    /// Free-text comments (at most 500 characters).
    pub general_comments: Option<String>,
    /// Free-text notes about disturbances (at most 500 characters).
    pub disturbance_comments: Option<String>,
    /// Names of the observers present. Used by foraging surveys.
    pub observers: Vec<String>,
}

impl SurveyDetails {
    /// Creates survey details with a freshly generated identifier.
    ///
    /// # Arguments
    ///
    /// * `survey_type` - The kind of survey
    /// * `location_id` - The surveyed location
    /// * `submitted_by` - The submitting user
    #[must_use]
    pub fn new(survey_type: SurveyType, location_id: i64, submitted_by: i64) -> Self {
        Self {
            survey_identifier: SurveyIdentifier::generate(),
            survey_type,
            location_id,
            submitted_by,
            start_date: None,
            end_date: None,
            start_temperature: None,
            end_temperature: None,
            water_height: None,
            wind_speed: None,
            wind_direction: None,
            prep_time_hours: None,
            weather: None,
            tide: None,
            habitat: None,
            site_assessment: None,
            general_comments: None,
            disturbance_comments: None,
            observers: Vec::new(),
        }
    }
}

/// A bird count recorded during a survey.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Observation {
    /// Storage-assigned key. `None` until the observation is saved.
    pub observation_id: Option<i64>,
    /// The owning survey.
    pub survey_identifier: SurveyIdentifier,
    /// The observed bird species.
    pub bird_id: i64,
    /// First count bin (e.g., adults).
    pub bin1: i32,
    /// Second count bin (e.g., juveniles).
    pub bin2: Option<i32>,
    pub habitat: Option<Habitat>,
    pub activity: Option<Activity>,
    pub feeding_success: Option<FeedingSuccess>,
    pub nests_present: Option<bool>,
    pub chicks_present: Option<bool>,
    pub fledglings_present: Option<bool>,
}

impl Observation {
    /// Creates an unsaved observation.
    #[must_use]
    pub const fn new(survey_identifier: SurveyIdentifier, bird_id: i64, bin1: i32) -> Self {
        Self {
            observation_id: None,
            survey_identifier,
            bird_id,
            bin1,
            bin2: None,
            habitat: None,
            activity: None,
            feeding_success: None,
            nests_present: None,
            chicks_present: None,
            fledglings_present: None,
        }
    }
}

/// A disturbance event recorded during a survey.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Disturbance {
    /// Storage-assigned key. `None` until the disturbance is saved.
    pub disturbance_id: Option<i64>,
    /// The owning survey.
    pub survey_identifier: SurveyIdentifier,
    pub disturbance_type: DisturbanceType,
    pub duration_minutes: i32,
    pub quantity: i32,
    /// How the birds responded.
    pub result: String,
}

impl Disturbance {
    /// Creates an unsaved disturbance.
    #[must_use]
    pub const fn new(
        survey_identifier: SurveyIdentifier,
        disturbance_type: DisturbanceType,
        duration_minutes: i32,
        quantity: i32,
        result: String,
    ) -> Self {
        Self {
            disturbance_id: None,
            survey_identifier,
            disturbance_type,
            duration_minutes,
            quantity,
            result,
        }
    }
}

/// A named survey site.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    /// Storage-assigned key. `None` until the location is saved.
    pub location_id: Option<i64>,
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl Location {
    /// Creates an unsaved location.
    #[must_use]
    pub const fn new(name: String, latitude: f64, longitude: f64) -> Self {
        Self {
            location_id: None,
            name,
            latitude,
            longitude,
        }
    }
}

/// Capability shared by every lifecycle stage of a survey aggregate.
pub trait Survey {
    /// Returns the scalar survey fields.
    fn details(&self) -> &SurveyDetails;

    /// Returns the scalar survey fields mutably.
    fn details_mut(&mut self) -> &mut SurveyDetails;

    /// Returns the observation children in order.
    fn observations(&self) -> &[Observation];

    /// Returns the disturbance children in order.
    fn disturbances(&self) -> &[Disturbance];

    /// Replaces both child collections.
    fn set_children(&mut self, observations: Vec<Observation>, disturbances: Vec<Disturbance>);

    /// Returns the hydrated location name, if any.
    fn location_name(&self) -> Option<&str>;

    /// Sets the hydrated location name.
    fn set_location_name(&mut self, name: Option<String>);

    /// Returns the lifecycle stage this representation belongs to.
    fn state(&self) -> SurveyState;

    /// Returns the primary key in this representation's own table.
    fn record_id(&self) -> Option<i64>;

    /// Returns the stable survey identifier.
    fn survey_identifier(&self) -> SurveyIdentifier {
        self.details().survey_identifier
    }

    /// Returns the survey type.
    fn survey_type(&self) -> SurveyType {
        self.details().survey_type
    }
}

/// A survey still being composed across submission steps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PendingSurvey {
    /// Primary key in the pending table. `None` until saved.
    pub pending_survey_id: Option<i64>,
    pub details: SurveyDetails,
    pub observations: Vec<Observation>,
    pub disturbances: Vec<Disturbance>,
    /// Display-only location name, filled in by queries.
    pub location_name: Option<String>,
}

impl PendingSurvey {
    /// Creates an unsaved pending survey with no children.
    #[must_use]
    pub const fn new(details: SurveyDetails) -> Self {
        Self {
            pending_survey_id: None,
            details,
            observations: Vec::new(),
            disturbances: Vec::new(),
            location_name: None,
        }
    }
}

/// A finalized survey.
///
/// Its primary key is unrelated to the key the survey had while pending;
/// only the `SurveyIdentifier` links the two.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletedSurvey {
    /// Primary key in the completed table. `None` until saved.
    pub completed_survey_id: Option<i64>,
    pub details: SurveyDetails,
    pub observations: Vec<Observation>,
    pub disturbances: Vec<Disturbance>,
    /// Display-only location name, filled in by queries.
    pub location_name: Option<String>,
}

impl CompletedSurvey {
    /// Creates an unsaved completed survey with no children.
    #[must_use]
    pub const fn new(details: SurveyDetails) -> Self {
        Self {
            completed_survey_id: None,
            details,
            observations: Vec::new(),
            disturbances: Vec::new(),
            location_name: None,
        }
    }
}

impl Survey for PendingSurvey {
    fn details(&self) -> &SurveyDetails {
        &self.details
    }

    fn details_mut(&mut self) -> &mut SurveyDetails {
        &mut self.details
    }

    fn observations(&self) -> &[Observation] {
        &self.observations
    }

    fn disturbances(&self) -> &[Disturbance] {
        &self.disturbances
    }

    fn set_children(&mut self, observations: Vec<Observation>, disturbances: Vec<Disturbance>) {
        self.observations = observations;
        self.disturbances = disturbances;
    }

    fn location_name(&self) -> Option<&str> {
        self.location_name.as_deref()
    }

    fn set_location_name(&mut self, name: Option<String>) {
        self.location_name = name;
    }

    fn state(&self) -> SurveyState {
        SurveyState::Pending
    }

    fn record_id(&self) -> Option<i64> {
        self.pending_survey_id
    }
}

impl Survey for CompletedSurvey {
    fn details(&self) -> &SurveyDetails {
        &self.details
    }

    fn details_mut(&mut self) -> &mut SurveyDetails {
        &mut self.details
    }

    fn observations(&self) -> &[Observation] {
        &self.observations
    }

    fn disturbances(&self) -> &[Disturbance] {
        &self.disturbances
    }

    fn set_children(&mut self, observations: Vec<Observation>, disturbances: Vec<Disturbance>) {
        self.observations = observations;
        self.disturbances = disturbances;
    }

    fn location_name(&self) -> Option<&str> {
        self.location_name.as_deref()
    }

    fn set_location_name(&mut self, name: Option<String>) {
        self.location_name = name;
    }

    fn state(&self) -> SurveyState {
        SurveyState::Completed
    }

    fn record_id(&self) -> Option<i64> {
        self.completed_survey_id
    }
}

/// A survey found in either store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "state", content = "survey")]
pub enum SurveyRecord {
    Pending(PendingSurvey),
    Completed(CompletedSurvey),
}

impl SurveyRecord {
    /// Returns the pending survey, if this record is pending.
    #[must_use]
    pub const fn as_pending(&self) -> Option<&PendingSurvey> {
        match self {
            Self::Pending(survey) => Some(survey),
            Self::Completed(_) => None,
        }
    }

    /// Returns the completed survey, if this record is completed.
    #[must_use]
    pub const fn as_completed(&self) -> Option<&CompletedSurvey> {
        match self {
            Self::Completed(survey) => Some(survey),
            Self::Pending(_) => None,
        }
    }

    /// Consumes the record, returning the pending survey if it is one.
    #[must_use]
    pub fn into_pending(self) -> Option<PendingSurvey> {
        match self {
            Self::Pending(survey) => Some(survey),
            Self::Completed(_) => None,
        }
    }

    /// Consumes the record, returning the completed survey if it is one.
    #[must_use]
    pub fn into_completed(self) -> Option<CompletedSurvey> {
        match self {
            Self::Completed(survey) => Some(survey),
            Self::Pending(_) => None,
        }
    }

    fn inner(&self) -> &dyn Survey {
        match self {
            Self::Pending(survey) => survey,
            Self::Completed(survey) => survey,
        }
    }

    fn inner_mut(&mut self) -> &mut dyn Survey {
        match self {
            Self::Pending(survey) => survey,
            Self::Completed(survey) => survey,
        }
    }
}

impl From<PendingSurvey> for SurveyRecord {
    fn from(survey: PendingSurvey) -> Self {
        Self::Pending(survey)
    }
}

impl From<CompletedSurvey> for SurveyRecord {
    fn from(survey: CompletedSurvey) -> Self {
        Self::Completed(survey)
    }
}

impl Survey for SurveyRecord {
    fn details(&self) -> &SurveyDetails {
        self.inner().details()
    }

    fn details_mut(&mut self) -> &mut SurveyDetails {
        self.inner_mut().details_mut()
    }

    fn observations(&self) -> &[Observation] {
        self.inner().observations()
    }

    fn disturbances(&self) -> &[Disturbance] {
        self.inner().disturbances()
    }

    fn set_children(&mut self, observations: Vec<Observation>, disturbances: Vec<Disturbance>) {
        self.inner_mut().set_children(observations, disturbances);
    }

    fn location_name(&self) -> Option<&str> {
        self.inner().location_name()
    }

    fn set_location_name(&mut self, name: Option<String>) {
        self.inner_mut().set_location_name(name);
    }

    fn state(&self) -> SurveyState {
        self.inner().state()
    }

    fn record_id(&self) -> Option<i64> {
        self.inner().record_id()
    }
}
