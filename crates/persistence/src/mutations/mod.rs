// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Backend-agnostic mutation modules.
//!
//! ## Module Organization
//!
//! - `surveys` — pending and completed survey rows
//! - `children` — observation and disturbance rows
//! - `locations` — location rows
//! - `changes` — applies a whole `ChangeSet` in one transaction
//!
//! Keys of inserted rows are read back through `PersistenceBackend`.

pub mod changes;
pub mod children;
pub mod locations;
pub mod surveys;

pub use changes::apply_changes_sqlite;
pub use locations::insert_location_sqlite;

#[cfg(feature = "mysql")]
pub use changes::apply_changes_mysql;
#[cfg(feature = "mysql")]
pub use locations::insert_location_mysql;
