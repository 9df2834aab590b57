// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! `SQLite` connections: in-memory, for tests and throwaway runs, or file
//! backed, for the CLI.

use std::sync::atomic::{AtomicU64, Ordering};

use diesel::dsl::sql;
use diesel::prelude::*;
use diesel::sql_types::{BigInt, Integer, Text};
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use tracing::info;

use super::PersistenceBackend;
use crate::error::PersistenceError;

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Numbers in-memory databases so each `Persistence` gets its own.
static MEMORY_DB_COUNTER: AtomicU64 = AtomicU64::new(0);

#[derive(QueryableByName)]
struct ForeignKeysPragma {
    #[diesel(sql_type = Integer)]
    foreign_keys: i32,
}

#[derive(QueryableByName)]
struct TableName {
    #[diesel(sql_type = Text)]
    name: String,
}

/// Returns a shared-cache URL for a database no other caller has used.
///
/// Connections opened on the same URL share one database for as long as
/// any of them stays open.
pub fn next_memory_url() -> String {
    let db_id: u64 = MEMORY_DB_COUNTER.fetch_add(1, Ordering::SeqCst);
    format!("file:memdb_survey_{db_id}?mode=memory&cache=shared")
}

/// Opens a fresh, migrated in-memory survey database.
///
/// # Errors
///
/// Returns an error if the connection, migrations, or schema check fail.
pub fn open_in_memory() -> Result<SqliteConnection, PersistenceError> {
    let url: String = next_memory_url();
    info!(%url, "Opening in-memory survey database");
    open(&url)
}

/// Opens a migrated survey database file in WAL mode, creating it if needed.
///
/// # Errors
///
/// Returns an error if the connection, migrations, or schema check fail.
pub fn open_file(path: &str) -> Result<SqliteConnection, PersistenceError> {
    info!(path, "Opening survey database file");
    let mut conn: SqliteConnection = open(path)?;
    diesel::sql_query("PRAGMA journal_mode = WAL")
        .execute(&mut conn)
        .map_err(|e| PersistenceError::QueryFailed(e.to_string()))?;
    Ok(conn)
}

fn open(url: &str) -> Result<SqliteConnection, PersistenceError> {
    let mut conn: SqliteConnection = SqliteConnection::establish(url)
        .map_err(|e| PersistenceError::DatabaseConnectionFailed(e.to_string()))?;

    // Foreign keys are off by default and are set per connection.
    diesel::sql_query("PRAGMA foreign_keys = ON")
        .execute(&mut conn)
        .map_err(|e| PersistenceError::QueryFailed(e.to_string()))?;

    conn.run_pending_migrations(MIGRATIONS)
        .map_err(|e| PersistenceError::MigrationFailed(e.to_string()))?;

    conn.verify_foreign_key_enforcement()?;
    conn.verify_survey_schema()?;
    Ok(conn)
}

pub fn last_insert_key(conn: &mut SqliteConnection) -> Result<i64, PersistenceError> {
    Ok(diesel::select(sql::<BigInt>("last_insert_rowid()")).get_result(conn)?)
}

pub fn foreign_keys_enforced(conn: &mut SqliteConnection) -> Result<bool, PersistenceError> {
    let pragma: ForeignKeysPragma = diesel::sql_query("PRAGMA foreign_keys").get_result(conn)?;
    Ok(pragma.foreign_keys != 0)
}

pub fn table_names(conn: &mut SqliteConnection) -> Result<Vec<String>, PersistenceError> {
    let rows: Vec<TableName> =
        diesel::sql_query("SELECT name FROM sqlite_master WHERE type = 'table'").load(conn)?;
    Ok(rows.into_iter().map(|row| row.name).collect())
}
