//! Recursive traversal producing deletion candidates.
//!
//! The walk decides on a directory's own removal *before* listing its
//! children (so the decision, including any age lookup, sees the tree as
//! it was) but emits the directory's record only *after* every child has
//! been processed. One subtree therefore always emits bottom-up, even
//! though decisions are made top-down. Children of a single directory are
//! statted and recursed concurrently; emission order across unrelated
//! sibling subtrees is not guaranteed.

use chrono::{DateTime, Utc};
use futures::future::{join_all, BoxFuture};
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::sync::mpsc::Sender;

use crate::fs::{EntryKind, FsBackend, SweptEntry};

use super::error::SweepError;
use super::filter::Filters;

/// State shared across the whole recursive call tree of one invocation.
pub(crate) struct WalkContext {
    /// Count of entries selected so far, gated against `limit`.
    selected: AtomicUsize,
    /// Captured once at the start; every age comparison of this
    /// invocation uses this single timestamp.
    pub(crate) started_at: DateTime<Utc>,
    /// Captured once; the deletion stage reads it.
    pub(crate) dry_run: bool,
}

impl WalkContext {
    pub(crate) fn new(dry_run: bool) -> Self {
        Self {
            selected: AtomicUsize::new(0),
            started_at: Utc::now(),
            dry_run,
        }
    }

    pub(crate) fn selected(&self) -> usize {
        self.selected.load(Ordering::Relaxed)
    }

    /// Atomically claim a selection slot. Sibling branches may race here,
    /// so the claim and the bound check are one operation.
    pub(crate) fn try_select(&self, limit: Option<usize>) -> bool {
        match limit {
            None => {
                self.selected.fetch_add(1, Ordering::Relaxed);
                true
            }
            Some(limit) => self
                .selected
                .fetch_update(Ordering::Relaxed, Ordering::Relaxed, |n| {
                    (n < limit).then_some(n + 1)
                })
                .is_ok(),
        }
    }
}

/// Candidate records and the terminal error travel the same channel.
pub(crate) type Candidate = Result<SweptEntry, SweepError>;

enum Stop {
    /// Downstream hung up; finish quietly.
    Closed,
    /// Listing failure that must surface on the stream.
    Fatal(SweepError),
}

/// Entry point for the walker task. Fatal errors become the terminal
/// stream item; a closed channel just ends the walk.
pub(crate) async fn walk(
    fs: std::sync::Arc<dyn FsBackend>,
    filters: std::sync::Arc<Filters>,
    ctx: std::sync::Arc<WalkContext>,
    root: PathBuf,
    tx: Sender<Candidate>,
) {
    match walk_dir(&*fs, &filters, &ctx, root, 0, &tx).await {
        Ok(()) | Err(Stop::Closed) => {}
        Err(Stop::Fatal(err)) => {
            let _ = tx.send(Err(err)).await;
        }
    }
}

fn walk_dir<'a>(
    fs: &'a dyn FsBackend,
    filters: &'a Filters,
    ctx: &'a WalkContext,
    dir: PathBuf,
    depth: u32,
    tx: &'a Sender<Candidate>,
) -> BoxFuture<'a, Result<(), Stop>> {
    Box::pin(async move {
        if filters.over_limit(ctx) {
            return Ok(());
        }

        // Existence is re-checked at every level: a concurrent removal
        // elsewhere in the tree can take this path out from under us.
        // Absence is silent; any other access failure is fatal.
        match fs.metadata(&dir).await {
            Ok(_) => {}
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(()),
            Err(source) => {
                return Err(Stop::Fatal(SweepError::Fatal { path: dir, source }));
            }
        }

        // Decide on the directory itself before touching its contents.
        // The root of the invocation is never a candidate.
        let remove_self = depth > 0 && filters.matches_dir(fs, &dir, depth, ctx).await;

        if filters.descend(depth) {
            let children = match fs.read_dir(&dir).await {
                Ok(children) => children,
                Err(source) => {
                    return Err(Stop::Fatal(SweepError::Fatal { path: dir, source }));
                }
            };

            let results = join_all(
                children
                    .into_iter()
                    .map(|child| visit(fs, filters, ctx, child, depth, tx)),
            )
            .await;
            for result in results {
                result?;
            }
        }

        if remove_self {
            push(
                tx,
                SweptEntry {
                    path: dir,
                    kind: EntryKind::Directory,
                    deleted: false,
                },
            )
            .await?;
        }

        Ok(())
    })
}

/// Classify one child of a directory: recurse into subdirectories,
/// evaluate files, skip anything that cannot be statted.
async fn visit(
    fs: &dyn FsBackend,
    filters: &Filters,
    ctx: &WalkContext,
    child: PathBuf,
    depth: u32,
    tx: &Sender<Candidate>,
) -> Result<(), Stop> {
    let meta = match fs.metadata(&child).await {
        Ok(meta) => meta,
        Err(source) => {
            // The skippable channel: not fatal to the sweep.
            log::debug!("{}", SweepError::Skipped { path: child, source });
            return Ok(());
        }
    };

    if meta.is_dir() {
        walk_dir(fs, filters, ctx, child, depth + 1, tx).await
    } else if filters.matches_file(fs, &child, ctx).await && filters.try_select(ctx) {
        push(
            tx,
            SweptEntry {
                path: child,
                kind: EntryKind::File,
                deleted: false,
            },
        )
        .await
    } else {
        Ok(())
    }
}

/// A send is the backpressure point: the walker suspends here until the
/// deletion stage has drained the previous record.
async fn push(tx: &Sender<Candidate>, entry: SweptEntry) -> Result<(), Stop> {
    tx.send(Ok(entry)).await.map_err(|_| Stop::Closed)
}
