// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use bird_survey_domain::PendingSurvey;

use crate::store::ChangeSet;

/// Signals that a pending survey's scalar fields changed.
///
/// Injected into `SurveyManager` so the "mark modified" step of `update`
/// can be observed or replaced without touching the store.
pub trait ModificationMarker {
    /// Stages whatever the store needs to persist the survey's scalar fields.
    fn mark_modified(&self, changes: &mut ChangeSet, survey: &PendingSurvey);
}

/// Default marker: stages an `UpdatePending` change for saved surveys.
#[derive(Debug, Clone, Copy, Default)]
pub struct StageUpdate;

impl ModificationMarker for StageUpdate {
    fn mark_modified(&self, changes: &mut ChangeSet, survey: &PendingSurvey) {
        if let Some(pending_survey_id) = survey.pending_survey_id {
            changes.update_pending(pending_survey_id, &survey.details);
        }
    }
}
