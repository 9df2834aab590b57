// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Static reference data.
//!
//! Each reference table is a closed enumeration with a stable numeric id
//! (the value stored in survey and child rows) and a display name.
//! Ids are part of the storage format and must never be renumbered.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Generates a reference enumeration with id and name lookups.
///
/// Each variant is declared as `Variant = (id, "Display name")`. The macro
/// emits the enum, `id`, `name`, `from_id`, `all`, `Display`, and a `FromStr`
/// that accepts either the numeric id or the display name (case-insensitive).
macro_rules! reference_enum {
    (
        $(#[$meta:meta])*
        $name:ident {
            $(
                $(#[$vmeta:meta])*
                $variant:ident = ($id:literal, $label:literal)
            ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(
                $(#[$vmeta])*
                $variant,
            )+
        }

        impl $name {
            /// Returns the stable numeric id stored in the database.
            #[must_use]
            pub const fn id(self) -> i32 {
                match self {
                    $(Self::$variant => $id,)+
                }
            }

            /// Returns the human-readable display name.
            #[must_use]
            pub const fn name(self) -> &'static str {
                match self {
                    $(Self::$variant => $label,)+
                }
            }

            /// Decodes a stored reference id.
            ///
            /// # Errors
            ///
            /// Returns `DomainError::UnknownReference` if the id is not defined.
            pub fn from_id(id: i32) -> Result<Self, DomainError> {
                match id {
                    $($id => Ok(Self::$variant),)+
                    _ => Err(DomainError::UnknownReference {
                        kind: stringify!($name),
                        id,
                    }),
                }
            }

            /// Returns every value in id order.
            #[must_use]
            pub const fn all() -> &'static [Self] {
                &[$(Self::$variant,)+]
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.name())
            }
        }

        impl FromStr for $name {
            type Err = DomainError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let trimmed: &str = s.trim();
                if let Ok(id) = trimmed.parse::<i32>() {
                    return Self::from_id(id);
                }
                Self::all()
                    .iter()
                    .copied()
                    .find(|value| value.name().eq_ignore_ascii_case(trimmed))
                    .ok_or_else(|| DomainError::UnknownReferenceName {
                        kind: stringify!($name),
                        name: trimmed.to_string(),
                    })
            }
        }
    };
}

reference_enum! {
    /// The kind of survey being recorded.
    ///
    /// Foraging surveys count birds actively feeding and carry an observer
    /// list. Rookery surveys are nesting-colony censuses and use the
    /// nests/chicks/fledglings presence flags on each observation.
    SurveyType {
        Foraging = (1, "Foraging"),
        Rookery = (2, "Rookery"),
    }
}

reference_enum! {
    /// General weather conditions at the survey site.
    Weather {
        Clear = (1, "Clear"),
        PartlyCloudy = (2, "Partly cloudy"),
        Overcast = (3, "Overcast"),
        Fog = (4, "Fog"),
        Drizzle = (5, "Drizzle"),
        Rain = (6, "Rain"),
    }
}

reference_enum! {
    /// Tide stage during the survey.
    Tide {
        Low = (1, "Low"),
        Rising = (2, "Rising"),
        High = (3, "High"),
        Falling = (4, "Falling"),
    }
}

reference_enum! {
    /// Habitat classification, used for both surveys and observations.
    Habitat {
        OpenWater = (1, "Open water"),
        Marsh = (2, "Marsh"),
        Mudflat = (3, "Mudflat"),
        Beach = (4, "Beach"),
        Mangrove = (5, "Mangrove"),
        SeagrassBed = (6, "Seagrass bed"),
    }
}

reference_enum! {
    /// What an observed group of birds was doing.
    Activity {
        Foraging = (1, "Foraging"),
        Resting = (2, "Resting"),
        Flying = (3, "Flying"),
        Nesting = (4, "Nesting"),
        Courtship = (5, "Courtship"),
    }
}

reference_enum! {
    /// Observed feeding success rate for a foraging group.
    FeedingSuccess {
        Unsuccessful = (1, "Unsuccessful"),
        Low = (2, "Low"),
        Moderate = (3, "Moderate"),
        High = (4, "High"),
    }
}

reference_enum! {
    /// Source of a disturbance event.
    DisturbanceType {
        Boat = (1, "Boat"),
        Kayak = (2, "Kayak"),
        Pedestrian = (3, "Pedestrian"),
        Dog = (4, "Dog"),
        Aircraft = (5, "Aircraft"),
        Predator = (6, "Predator"),
        Other = (7, "Other"),
    }
}

reference_enum! {
    /// Surveyor's assessment of site conditions.
    SiteAssessment {
        Good = (1, "Good"),
        Fair = (2, "Fair"),
        Poor = (3, "Poor"),
    }
}
