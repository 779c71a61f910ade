//! Publish run stages.

use std::fmt;

/// Stage of a single publish run.
///
/// Runs move strictly forward:
///
/// ```text
/// Idle -> HashingInstallers -> ComposingManifests -> DryRunReporting -> Done
///                                                 \-> SubmittingPr    -> Done
/// ```
///
/// Any non-terminal stage may drop to [`Stage::Failed`]. Nothing resumes from
/// a terminal stage; a new run starts again at [`Stage::Idle`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    Idle,
    HashingInstallers,
    ComposingManifests,
    DryRunReporting,
    SubmittingPr,
    Done,
    Failed,
}

impl Stage {
    /// Whether the run has finished.
    pub fn is_terminal(self) -> bool {
        matches!(self, Stage::Done | Stage::Failed)
    }

    /// Whether `next` is a legal successor of `self`.
    pub fn can_advance_to(self, next: Stage) -> bool {
        use Stage::*;

        if next == Failed {
            return !self.is_terminal();
        }
        matches!(
            (self, next),
            (Idle, HashingInstallers)
                | (HashingInstallers, ComposingManifests)
                | (ComposingManifests, DryRunReporting)
                | (ComposingManifests, SubmittingPr)
                | (DryRunReporting, Done)
                | (SubmittingPr, Done)
        )
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Stage::Idle => "idle",
            Stage::HashingInstallers => "hashing installers",
            Stage::ComposingManifests => "composing manifests",
            Stage::DryRunReporting => "dry-run reporting",
            Stage::SubmittingPr => "submitting pull request",
            Stage::Done => "done",
            Stage::Failed => "failed",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
