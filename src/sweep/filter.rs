//! Predicate evaluation for sweep candidates.
//!
//! Options are compiled once per invocation into a [`Filters`] value, then
//! matched against every traversed entry. The check order is significant:
//! name/extension/prefix checks are pure string work, the limit and ignore
//! gates run next, and the age check runs last because it is the only one
//! that touches the filesystem.

use chrono::{DateTime, Utc};
use regex::Regex;
use std::path::Path;

use crate::fs::FsBackend;

use super::error::SweepError;
use super::options::{NameList, SweepOptions, WILDCARD_DIRS, WILDCARD_FILES};
use super::walker::WalkContext;

/// Basename matcher for one pattern category (`files` or `dirs`).
#[derive(Debug)]
struct Matcher {
    wildcard: &'static str,
    kind: MatcherKind,
}

#[derive(Debug)]
enum MatcherKind {
    /// Nothing configured; never matches.
    None,
    /// Single literal basename, or the category's wildcard-all marker.
    Literal(String),
    /// Unanchored search against the basename, literal equality as a
    /// fallback.
    Regex { re: Regex, raw: String },
    /// Membership; a contained wildcard-all marker matches everything.
    Set(Vec<String>),
}

impl Matcher {
    fn compile(
        list: Option<&NameList>,
        wildcard: &'static str,
        regex_mode: bool,
    ) -> Result<Self, SweepError> {
        let kind = match list {
            None => MatcherKind::None,
            Some(NameList::One(pattern)) if regex_mode => MatcherKind::Regex {
                re: Regex::new(pattern).map_err(|source| SweepError::Pattern {
                    pattern: pattern.clone(),
                    source,
                })?,
                raw: pattern.clone(),
            },
            Some(NameList::One(pattern)) => MatcherKind::Literal(pattern.clone()),
            Some(NameList::Many(set)) => MatcherKind::Set(set.clone()),
        };
        Ok(Self { wildcard, kind })
    }

    fn is_configured(&self) -> bool {
        !matches!(self.kind, MatcherKind::None)
    }

    fn matches(&self, name: &str) -> bool {
        match &self.kind {
            MatcherKind::None => false,
            MatcherKind::Literal(pattern) => pattern == self.wildcard || pattern == name,
            MatcherKind::Regex { re, raw } => re.is_match(name) || raw == name,
            MatcherKind::Set(set) => set.iter().any(|p| p == self.wildcard || p == name),
        }
    }
}

/// Compiled form of [`SweepOptions`], built once per invocation.
#[derive(Debug)]
pub(crate) struct Filters {
    files: Matcher,
    dirs: Matcher,
    extensions: Option<NameList>,
    prefix: Option<String>,
    ignore: Option<NameList>,
    age_ms: Option<f64>,
    max_depth: Option<u32>,
    pub(crate) limit: Option<usize>,
    pub(crate) dry_run: bool,
}

impl Filters {
    pub(crate) fn compile(options: &SweepOptions) -> Result<Self, SweepError> {
        let age_ms = match options.age_seconds {
            None => None,
            Some(secs) if secs.is_finite() && secs >= 0.0 => Some(secs * 1000.0),
            Some(secs) => return Err(SweepError::Age { value: secs }),
        };

        Ok(Self {
            files: Matcher::compile(options.files.as_ref(), WILDCARD_FILES, options.regex)?,
            dirs: Matcher::compile(options.dirs.as_ref(), WILDCARD_DIRS, options.regex)?,
            extensions: options.extensions.clone(),
            prefix: options.prefix.clone(),
            ignore: options.ignore.clone(),
            age_ms,
            max_depth: options.max_depth,
            limit: options.limit,
            dry_run: options.dry_run,
        })
    }

    /// Whether the selection cap has been reached. New selections are
    /// gated on this; already-selected entries are unaffected.
    pub(crate) fn over_limit(&self, ctx: &WalkContext) -> bool {
        self.limit.is_some_and(|limit| ctx.selected() >= limit)
    }

    /// Claim a selection slot; fails once `limit` selections have been
    /// made, so concurrent siblings can never overshoot the cap.
    pub(crate) fn try_select(&self, ctx: &WalkContext) -> bool {
        ctx.try_select(self.limit)
    }

    /// Children are listed only while the depth budget allows. With no
    /// `max_depth` there is no gate; `max_depth: 0` lists nothing at all.
    pub(crate) fn descend(&self, depth: u32) -> bool {
        self.max_depth.is_none_or(|max| depth < max)
    }

    /// Should this directory itself be removed? Decided before its
    /// contents are touched.
    pub(crate) async fn matches_dir(
        &self,
        fs: &dyn FsBackend,
        path: &Path,
        depth: u32,
        ctx: &WalkContext,
    ) -> bool {
        if !self.dirs.is_configured() {
            return false;
        }
        if !self.dirs.matches(&basename(path)) {
            return false;
        }
        if self.over_limit(ctx) {
            return false;
        }
        if let Some(max) = self.max_depth {
            if depth > 0 && depth > max {
                return false;
            }
        }
        self.old_enough(fs, path, ctx).await
    }

    /// Should this file be removed? Name match wins, extension and prefix
    /// are fallbacks; ignore overrides any positive match.
    pub(crate) async fn matches_file(
        &self,
        fs: &dyn FsBackend,
        path: &Path,
        ctx: &WalkContext,
    ) -> bool {
        let name = basename(path);

        let mut hit = self.files.matches(&name);
        if !hit {
            if let Some(extensions) = &self.extensions {
                hit = extensions.contains(&extension_of(path));
            }
        }
        if !hit {
            if let Some(prefix) = &self.prefix {
                hit = name.starts_with(prefix.as_str());
            }
        }
        if !hit {
            return false;
        }
        if self.over_limit(ctx) {
            return false;
        }
        if let Some(ignore) = &self.ignore {
            if ignore.contains(&name) {
                return false;
            }
        }
        self.old_enough(fs, path, ctx).await
    }

    /// The one check that costs a filesystem access, so it runs last.
    async fn old_enough(&self, fs: &dyn FsBackend, path: &Path, ctx: &WalkContext) -> bool {
        let Some(age_ms) = self.age_ms else {
            return true;
        };
        match fs.metadata(path).await {
            Ok(meta) => match meta.modified {
                Some(mtime) => expired(ctx.started_at, mtime, age_ms),
                None => false,
            },
            Err(_) => false,
        }
    }
}

/// Strict comparison: an entry whose age equals the configured age
/// exactly does not qualify.
fn expired(started_at: DateTime<Utc>, mtime: DateTime<Utc>, age_ms: f64) -> bool {
    started_at.signed_duration_since(mtime).num_milliseconds() as f64 > age_ms
}

fn basename(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Extension including the leading dot (".bak"), or "" when there is none.
fn extension_of(path: &Path) -> String {
    path.extension()
        .map(|ext| format!(".{}", ext.to_string_lossy()))
        .unwrap_or_default()
}
