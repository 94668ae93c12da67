use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::PathBuf;

/// Classification of a traversed entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    File,
    Directory,
}

/// The metadata the sweep engine needs about a single entry.
#[derive(Debug, Clone)]
pub struct EntryMeta {
    pub kind: EntryKind,
    pub modified: Option<DateTime<Utc>>,
}

impl EntryMeta {
    pub fn is_dir(&self) -> bool {
        self.kind == EntryKind::Directory
    }
}

/// A selected entry as it flows out of the deletion pipeline.
///
/// Emitted exactly once per selection, in discovery order. `deleted` is
/// filled in by the deletion stage: `true` on successful removal (and in
/// dry-run mode, where records are marked as if processed), `false` when
/// a removal attempt failed.
#[derive(Debug, Clone, Serialize)]
pub struct SweptEntry {
    pub path: PathBuf,
    #[serde(rename = "type")]
    pub kind: EntryKind,
    pub deleted: bool,
}
