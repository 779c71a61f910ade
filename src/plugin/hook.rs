//! Release lifecycle hooks.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A point in the release lifecycle at which a plugin may be invoked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Hook {
    PreInit,
    PostInit,
    PrePlan,
    PostPlan,
    PreVersion,
    PostVersion,
    PreNotes,
    PostNotes,
    PreApprove,
    PostApprove,
    PrePublish,
    PostPublish,
    OnSuccess,
    OnError,
}

impl Hook {
    pub fn as_str(self) -> &'static str {
        match self {
            Hook::PreInit => "pre-init",
            Hook::PostInit => "post-init",
            Hook::PrePlan => "pre-plan",
            Hook::PostPlan => "post-plan",
            Hook::PreVersion => "pre-version",
            Hook::PostVersion => "post-version",
            Hook::PreNotes => "pre-notes",
            Hook::PostNotes => "post-notes",
            Hook::PreApprove => "pre-approve",
            Hook::PostApprove => "post-approve",
            Hook::PrePublish => "pre-publish",
            Hook::PostPublish => "post-publish",
            Hook::OnSuccess => "on-success",
            Hook::OnError => "on-error",
        }
    }
}

impl fmt::Display for Hook {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
