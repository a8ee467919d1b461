//! Detection, keying, locale synchronization, translation and rewriting.
//!
//! Every stage is a plain function over explicit inputs; [`session`] strings
//! them together for front-ends.

use std::fmt;

use serde::Serialize;

pub mod classify;
pub mod extract;
pub mod file_scanner;
pub mod keygen;
pub mod locale;
pub mod patterns;
pub mod project;
pub mod rewrite;
pub mod session;
pub mod translate;

pub use classify::is_user_facing_text;
pub use extract::{Candidate, DetectResult, SkippedFile, detect};
pub use keygen::{KeyEntry, KeyGenerator, KeyMapping, generate_keys};
pub use locale::{LocaleStore, LocaleTree, PendingMarker};
pub use patterns::{PatternSet, TextContext};
pub use project::{ProjectContext, ProjectError};
pub use session::WorkflowSession;

/// Pipeline stage a progress report belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Stage {
    Detect,
    Generate,
    Write,
    Sync,
    Translate,
    Replace,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Detect => "detect",
            Stage::Generate => "generate",
            Stage::Write => "write",
            Stage::Sync => "sync",
            Stage::Translate => "translate",
            Stage::Replace => "replace",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    pub stage: Stage,
    pub done: usize,
    pub total: usize,
}

impl Progress {
    pub fn new(stage: Stage, done: usize, total: usize) -> Self {
        Self { stage, done, total }
    }

    /// Completed share in `0.0..=1.0`; an empty stage counts as complete.
    pub fn fraction(&self) -> f64 {
        if self.total == 0 {
            1.0
        } else {
            self.done as f64 / self.total as f64
        }
    }
}

/// Progress callback. Detection calls it from worker threads.
pub type ProgressFn<'a> = dyn Fn(Progress) + Sync + 'a;
