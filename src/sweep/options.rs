//! Filter configuration for a sweep.

/// Marker selecting every directory when used as a `dirs` pattern.
pub const WILDCARD_DIRS: &str = "*";

/// Marker selecting every file when used as a `files` pattern.
pub const WILDCARD_FILES: &str = "*.*";

/// One name or several; the options that accept a single string or a set
/// of strings all take this shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NameList {
    One(String),
    Many(Vec<String>),
}

impl NameList {
    /// Exact membership test, no wildcard handling.
    pub fn contains(&self, name: &str) -> bool {
        match self {
            NameList::One(s) => s == name,
            NameList::Many(set) => set.iter().any(|s| s == name),
        }
    }
}

impl From<&str> for NameList {
    fn from(name: &str) -> Self {
        NameList::One(name.to_string())
    }
}

impl From<String> for NameList {
    fn from(name: String) -> Self {
        NameList::One(name)
    }
}

impl From<Vec<String>> for NameList {
    fn from(names: Vec<String>) -> Self {
        NameList::Many(names)
    }
}

impl From<&[&str]> for NameList {
    fn from(names: &[&str]) -> Self {
        NameList::Many(names.iter().map(|s| s.to_string()).collect())
    }
}

/// What to select for removal, and how.
///
/// Absent filters select nothing for their criterion; a default
/// `SweepOptions` therefore removes nothing at all. The root of the
/// invocation is never itself a candidate.
#[derive(Debug, Clone, Default)]
pub struct SweepOptions {
    /// File basenames to select; [`WILDCARD_FILES`] selects every file.
    pub files: Option<NameList>,
    /// Directory basenames to select; [`WILDCARD_DIRS`] selects every
    /// directory.
    pub dirs: Option<NameList>,
    /// Extensions to select files by, each including the leading dot
    /// (".bak"). Tried only when `files` did not match.
    pub extensions: Option<NameList>,
    /// Select files whose basename starts with this prefix. Tried only
    /// when neither `files` nor `extensions` matched.
    pub prefix: Option<String>,
    /// Basenames excluded from an otherwise-positive file match,
    /// unconditionally.
    pub ignore: Option<NameList>,
    /// Interpret the single-string form of `files`/`dirs` as a regular
    /// expression searched against the basename. Set members stay literal.
    pub regex: bool,
    /// Only select entries whose modification time lies strictly more
    /// than this many seconds before the start of the invocation.
    pub age_seconds: Option<f64>,
    /// Deepest level to consider; the root call is level 0 and children
    /// are only listed while `depth < max_depth`.
    pub max_depth: Option<u32>,
    /// Cap on the number of entries selected, re-checked independently as
    /// a cap on the number of removals performed.
    pub limit: Option<usize>,
    /// Select, count and report without removing anything.
    pub dry_run: bool,
}
