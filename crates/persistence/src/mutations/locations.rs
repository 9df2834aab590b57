// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Location mutations.

use bird_survey_domain::{Location, validate_location};
use diesel::prelude::*;
use tracing::info;

use crate::backend::PersistenceBackend;
use crate::diesel_schema::locations;
use crate::error::PersistenceError;

backend_fn! {
/// Validates and inserts a location, returning its key.
///
/// # Errors
///
/// Returns `InvalidData` if the name is empty or a coordinate is out of
/// range, or an error if the insert fails (including a duplicate name).
pub fn insert_location(conn: &mut _, location: &Location) -> Result<i64, PersistenceError> {
    validate_location(location)?;

    diesel::insert_into(locations::table)
        .values((
            locations::name.eq(location.name.as_str()),
            locations::latitude.eq(location.latitude),
            locations::longitude.eq(location.longitude),
        ))
        .execute(conn)?;

    let location_id: i64 = conn.last_insert_key()?;
    info!(location_id, name = %location.name, "Created location");
    Ok(location_id)
}
}
