// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Survey aggregate lifecycle and query manager.
//!
//! `SurveyManager` creates, updates, finishes, deletes, and queries survey
//! aggregates against any storage that implements the `SurveyStore` port.
//! Every write is staged into a `ChangeSet` and submitted with a single
//! `save_changes` call, so each operation is one unit of work.

#![deny(
    clippy::pedantic,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod error;
mod manager;
mod marker;
mod store;

#[cfg(test)]
mod tests;

pub use error::SurveyError;
pub use manager::SurveyManager;
pub use marker::{ModificationMarker, StageUpdate};
pub use store::{Change, ChangeIndex, ChangeSet, SaveOutcome, SurveyQuery, SurveyStore};
