//! Sequential deletion stage between discovery and the output stream.

use std::sync::Arc;
use tokio::sync::mpsc::{Receiver, Sender};

use crate::fs::{EntryKind, FsBackend};

use super::walker::{Candidate, WalkContext};

/// Consume candidates one at a time, remove them, and forward the
/// outcome downstream.
///
/// The stage keeps its own count of records handled, checked against the
/// same `limit` that gates selection but independently of it: once the
/// cap is reached the remaining records are drained without action and
/// without being forwarded. Removal failures are logged and reported
/// through the record's `deleted` flag, never as a pipeline error.
/// Removal is strictly sequential; while one is in flight the capacity-1
/// channel upstream keeps discovery paused.
pub(crate) async fn run(
    fs: Arc<dyn FsBackend>,
    limit: Option<usize>,
    ctx: Arc<WalkContext>,
    mut rx: Receiver<Candidate>,
    tx: Sender<Candidate>,
) {
    let mut performed = 0usize;

    while let Some(candidate) = rx.recv().await {
        let mut entry = match candidate {
            Ok(entry) => entry,
            Err(err) => {
                // Terminal: forward the fatal error and stop.
                let _ = tx.send(Err(err)).await;
                return;
            }
        };

        if limit.is_some_and(|limit| performed >= limit) {
            performed += 1;
            continue;
        }
        performed += 1;

        if ctx.dry_run {
            // Records still flow through, marked as if processed.
            entry.deleted = true;
        } else {
            let removed = match entry.kind {
                EntryKind::File => fs.remove_file(&entry.path).await,
                EntryKind::Directory => fs.remove_dir_all(&entry.path).await,
            };
            match removed {
                Ok(()) => entry.deleted = true,
                Err(err) => {
                    log::debug!("failed to remove {}: {}", entry.path.display(), err);
                }
            }
        }

        if tx.send(Ok(entry)).await.is_err() {
            return;
        }
    }
}
