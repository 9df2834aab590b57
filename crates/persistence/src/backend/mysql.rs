// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! `MySQL`/`MariaDB` connections, compiled with the `mysql` feature.
//!
//! `migrations_mysql/` mirrors `migrations/` table for table. The shared
//! survey schema check in `open` catches a migration set that drifts.

use diesel::dsl::sql;
use diesel::prelude::*;
use diesel::sql_types::{BigInt, Integer, Text};
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use tracing::info;

use super::PersistenceBackend;
use crate::error::PersistenceError;

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations_mysql");

#[derive(QueryableByName)]
struct ForeignKeyChecks {
    #[diesel(sql_type = Integer)]
    fk_checks: i32,
}

#[derive(QueryableByName)]
struct TableName {
    #[diesel(sql_type = Text)]
    table_name: String,
}

/// Connects to a survey database server and brings its schema up to date.
///
/// # Errors
///
/// Returns an error if the connection, migrations, or schema check fail.
pub fn open(database_url: &str) -> Result<MysqlConnection, PersistenceError> {
    info!("Opening MySQL survey database");

    let mut conn: MysqlConnection = MysqlConnection::establish(database_url)
        .map_err(|e| PersistenceError::DatabaseConnectionFailed(e.to_string()))?;

    conn.run_pending_migrations(MIGRATIONS)
        .map_err(|e| PersistenceError::MigrationFailed(e.to_string()))?;

    conn.verify_foreign_key_enforcement()?;
    conn.verify_survey_schema()?;
    Ok(conn)
}

pub fn last_insert_key(conn: &mut MysqlConnection) -> Result<i64, PersistenceError> {
    Ok(diesel::select(sql::<BigInt>("LAST_INSERT_ID()")).get_result(conn)?)
}

pub fn foreign_keys_enforced(conn: &mut MysqlConnection) -> Result<bool, PersistenceError> {
    let check: ForeignKeyChecks = diesel::sql_query("SELECT @@foreign_key_checks AS fk_checks")
        .get_result(conn)?;
    Ok(check.fk_checks == 1)
}

/// Lists the tables of the schema named in the connection URL.
pub fn table_names(conn: &mut MysqlConnection) -> Result<Vec<String>, PersistenceError> {
    let rows: Vec<TableName> = diesel::sql_query(
        "SELECT CAST(table_name AS CHAR) AS table_name \
         FROM information_schema.tables WHERE table_schema = DATABASE()",
    )
    .load(conn)?;
    Ok(rows.into_iter().map(|row| row.table_name).collect())
}
