//! The live record stream handed to streaming-mode callers.

use futures::Stream;
use std::path::PathBuf;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};
use tokio::sync::mpsc::{self, Receiver};

use crate::fs::{FsBackend, SweptEntry};

use super::error::SweepError;
use super::filter::Filters;
use super::pipeline;
use super::walker::{self, WalkContext};

/// Single-reader stream of processed records.
///
/// Nothing touches the filesystem until the first poll: the walker and
/// the deletion stage are spawned lazily. The sequence ends after the
/// whole tree has been processed, or with a single terminal `Err` on a
/// fatal traversal failure. Dropping the stream closes the channels,
/// which the tasks observe on their next send; that is the abort path.
pub struct SweepStream {
    launch: Option<Launch>,
    rx: Option<Receiver<Result<SweptEntry, SweepError>>>,
}

struct Launch {
    fs: Arc<dyn FsBackend>,
    filters: Arc<Filters>,
    root: PathBuf,
}

impl SweepStream {
    pub(crate) fn new(fs: Arc<dyn FsBackend>, filters: Arc<Filters>, root: PathBuf) -> Self {
        Self {
            launch: Some(Launch { fs, filters, root }),
            rx: None,
        }
    }
}

impl Launch {
    /// Spawn the walker and the deletion stage, connected by capacity-1
    /// channels: one record buffered between discovery and deletion, one
    /// between deletion and the consumer.
    fn start(self) -> Receiver<Result<SweptEntry, SweepError>> {
        let ctx = Arc::new(WalkContext::new(self.filters.dry_run));
        let (find_tx, find_rx) = mpsc::channel(1);
        let (out_tx, out_rx) = mpsc::channel(1);

        let limit = self.filters.limit;

        tokio::spawn(walker::walk(
            self.fs.clone(),
            self.filters,
            ctx.clone(),
            self.root,
            find_tx,
        ));
        tokio::spawn(pipeline::run(self.fs, limit, ctx, find_rx, out_tx));

        out_rx
    }
}

impl Stream for SweepStream {
    type Item = Result<SweptEntry, SweepError>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = self.get_mut();
        if let Some(launch) = this.launch.take() {
            this.rx = Some(launch.start());
        }
        match this.rx.as_mut() {
            Some(rx) => rx.poll_recv(cx),
            None => Poll::Ready(None),
        }
    }
}
