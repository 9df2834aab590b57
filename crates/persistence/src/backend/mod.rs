// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Connection setup for each database engine.
//!
//! An engine module opens a connection, applies its own migration set, and
//! then checks the result with `PersistenceBackend::verify_survey_schema`
//! before the connection reaches `Persistence`. Survey queries and
//! mutations never live here; they are written once in `queries/` and
//! `mutations/` and expanded per engine by `backend_fn!`.

#[cfg(feature = "mysql")]
pub mod mysql;
pub mod sqlite;

#[cfg(feature = "mysql")]
use diesel::MysqlConnection;
use diesel::{Connection, SqliteConnection};
use tracing::debug;

use crate::error::PersistenceError;

/// Tables a migrated survey database must contain.
pub const SURVEY_TABLES: [&str; 5] = [
    "locations",
    "pending_surveys",
    "completed_surveys",
    "observations",
    "disturbances",
];

/// Engine-specific statements the Diesel DSL cannot express.
pub trait PersistenceBackend: Connection {
    /// Returns the key the last insert on this connection assigned.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    fn last_insert_key(&mut self) -> Result<i64, PersistenceError>;

    /// Returns whether the engine currently enforces foreign keys.
    ///
    /// # Errors
    ///
    /// Returns an error if the setting cannot be read.
    fn foreign_keys_enforced(&mut self) -> Result<bool, PersistenceError>;

    /// Lists the tables in the connected database.
    ///
    /// # Errors
    ///
    /// Returns an error if the catalog cannot be read.
    fn table_names(&mut self) -> Result<Vec<String>, PersistenceError>;

    /// Fails unless foreign keys are enforced.
    ///
    /// # Errors
    ///
    /// Returns `ForeignKeyEnforcementNotEnabled` if they are not.
    fn verify_foreign_key_enforcement(&mut self) -> Result<(), PersistenceError> {
        if self.foreign_keys_enforced()? {
            Ok(())
        } else {
            Err(PersistenceError::ForeignKeyEnforcementNotEnabled)
        }
    }

    /// Fails unless every table in `SURVEY_TABLES` exists.
    ///
    /// # Errors
    ///
    /// Returns `MissingTables` naming each absent table.
    fn verify_survey_schema(&mut self) -> Result<(), PersistenceError> {
        let present: Vec<String> = self.table_names()?;
        let missing: Vec<&'static str> = SURVEY_TABLES
            .iter()
            .copied()
            .filter(|table| !present.iter().any(|name| name.eq_ignore_ascii_case(table)))
            .collect();

        if !missing.is_empty() {
            return Err(PersistenceError::MissingTables(missing));
        }

        debug!(tables = SURVEY_TABLES.len(), "Survey schema present");
        Ok(())
    }
}

impl PersistenceBackend for SqliteConnection {
    fn last_insert_key(&mut self) -> Result<i64, PersistenceError> {
        sqlite::last_insert_key(self)
    }

    fn foreign_keys_enforced(&mut self) -> Result<bool, PersistenceError> {
        sqlite::foreign_keys_enforced(self)
    }

    fn table_names(&mut self) -> Result<Vec<String>, PersistenceError> {
        sqlite::table_names(self)
    }
}

#[cfg(feature = "mysql")]
impl PersistenceBackend for MysqlConnection {
    fn last_insert_key(&mut self) -> Result<i64, PersistenceError> {
        mysql::last_insert_key(self)
    }

    fn foreign_keys_enforced(&mut self) -> Result<bool, PersistenceError> {
        mysql::foreign_keys_enforced(self)
    }

    fn table_names(&mut self) -> Result<Vec<String>, PersistenceError> {
        mysql::table_names(self)
    }
}
