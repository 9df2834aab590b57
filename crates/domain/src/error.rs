// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

/// Errors raised while constructing or decoding domain values.
///
/// Survey comment rules are not reported here; they produce
/// `ValidationErrors` so callers can map each failure back to a field.
#[derive(Debug, Clone, PartialEq)]
pub enum DomainError {
    /// A stored reference id does not match any known reference value.
    UnknownReference {
        /// The reference table the id was looked up in.
        kind: &'static str,
        /// The unrecognized id.
        id: i32,
    },
    /// A reference name could not be parsed.
    UnknownReferenceName {
        /// The reference table the name was looked up in.
        kind: &'static str,
        /// The unrecognized name.
        name: String,
    },
    /// A survey identifier string is not a valid UUID.
    InvalidSurveyIdentifier(String),
    /// Failed to parse a timestamp from a string.
    TimestampParseError {
        /// The invalid timestamp string.
        value: String,
        /// The parsing error message.
        error: String,
    },
    /// Failed to format a timestamp.
    TimestampFormatError(String),
    /// Location name is empty.
    InvalidLocationName,
    /// Latitude is outside ±90 degrees.
    InvalidLatitude(f64),
    /// Longitude is outside ±180 degrees.
    InvalidLongitude(f64),
    /// An hour value is outside (0, 24].
    InvalidHours(f64),
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownReference { kind, id } => write!(f, "Unknown {kind} id: {id}"),
            Self::UnknownReferenceName { kind, name } => {
                write!(f, "Unknown {kind} name: '{name}'")
            }
            Self::InvalidSurveyIdentifier(value) => {
                write!(f, "Invalid survey identifier: '{value}'")
            }
            Self::TimestampParseError { value, error } => {
                write!(f, "Failed to parse timestamp '{value}': {error}")
            }
            Self::TimestampFormatError(msg) => write!(f, "Failed to format timestamp: {msg}"),
            Self::InvalidLocationName => write!(f, "Location name cannot be empty"),
            Self::InvalidLatitude(value) => {
                write!(f, "Invalid latitude: {value}. Must be between -90 and 90")
            }
            Self::InvalidLongitude(value) => {
                write!(f, "Invalid longitude: {value}. Must be between -180 and 180")
            }
            Self::InvalidHours(value) => {
                write!(
                    f,
                    "Invalid hours: {value}. Must be greater than 0 and at most 24"
                )
            }
        }
    }
}

impl std::error::Error for DomainError {}
