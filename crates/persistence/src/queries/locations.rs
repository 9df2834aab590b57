// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Location queries.

use bird_survey_domain::Location;
use diesel::prelude::*;
use tracing::debug;

use crate::data_models::LocationRow;
use crate::diesel_schema::locations;
use crate::error::PersistenceError;

backend_fn! {
/// Retrieves a location by key.
///
/// # Errors
///
/// Returns an error if the database query fails.
/// Returns `Ok(None)` if the location is not found.
pub fn get_location(
    conn: &mut _,
    location_id: i64,
) -> Result<Option<Location>, PersistenceError> {
    debug!(location_id, "Looking up location");

    let row: Option<LocationRow> = locations::table
        .filter(locations::location_id.eq(location_id))
        .select(LocationRow::as_select())
        .first(conn)
        .optional()?;

    Ok(row.map(Location::from))
}
}

backend_fn! {
/// Lists every location ordered by name.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn list_locations(conn: &mut _) -> Result<Vec<Location>, PersistenceError> {
    let rows: Vec<LocationRow> = locations::table
        .order(locations::name.asc())
        .select(LocationRow::as_select())
        .load(conn)?;

    Ok(rows.into_iter().map(Location::from).collect())
}
}
