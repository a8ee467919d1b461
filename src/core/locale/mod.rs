//! Per-language JSON locale trees and their maintenance.

pub mod duplicates;
pub mod marker;
pub mod store;
pub mod sync;
pub mod tree;
pub mod validate;

pub use duplicates::{DuplicateGroup, find_duplicate_values, remove_duplicates};
pub use marker::{DEFAULT_PENDING_MARKER, PendingMarker};
pub use store::{DedupeSummary, KeyLocator, LanguageWrite, LocaleStore, SyncSummary, with_source};
pub use sync::{LanguageSync, apply_master, build_master, sync_trees};
pub use tree::{KeyAction, LocaleNode, LocaleTree};
pub use validate::{LanguageReport, ValidationReport};
