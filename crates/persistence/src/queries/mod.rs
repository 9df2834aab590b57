// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Read-only queries for the persistence layer.
//!
//! ## Module Organization
//!
//! - `surveys` — pending and completed survey rows
//! - `children` — observations and disturbances owned by a survey
//! - `locations` — survey locations
//!
//! Every query is generated by `backend_fn!` in a `_sqlite` variant and,
//! with the `mysql` feature, a `_mysql` variant. The `Persistence` adapter
//! dispatches on the active connection.

pub mod children;
pub mod locations;
pub mod surveys;

pub use children::{query_disturbances_sqlite, query_observations_sqlite};
pub use locations::{get_location_sqlite, list_locations_sqlite};
pub use surveys::{query_completed_surveys_sqlite, query_pending_surveys_sqlite};

#[cfg(feature = "mysql")]
pub use children::{query_disturbances_mysql, query_observations_mysql};
#[cfg(feature = "mysql")]
pub use locations::{get_location_mysql, list_locations_mysql};
#[cfg(feature = "mysql")]
pub use surveys::{query_completed_surveys_mysql, query_pending_surveys_mysql};
