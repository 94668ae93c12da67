//! Sweep engine: recursive selection and removal of files and directories.
//!
//! The pieces line up as a pipeline: compiled filters drive the recursive
//! walker, candidates flow through a capacity-1 channel into the
//! sequential deletion stage, and the caller consumes the outcome either
//! buffered ([`sweep`]) or live ([`sweep_stream`]).

pub mod error;
mod filter;
pub mod options;
mod pipeline;
pub mod stream;
mod walker;

pub use error::SweepError;
pub use options::{NameList, SweepOptions, WILDCARD_DIRS, WILDCARD_FILES};
pub use stream::SweepStream;

use futures::StreamExt;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::fs::{FsBackend, LocalBackend};

/// Find and remove everything under `root` matching `options`.
///
/// Resolves to a map from path to deletion outcome once the whole tree
/// has been processed. Every selected entry that reached the deletion
/// stage is present, whether or not its removal succeeded; entries
/// suppressed by the deletion-count cap are not. A root that does not
/// exist yields an empty map, never an error.
pub async fn sweep(
    root: impl AsRef<Path>,
    options: SweepOptions,
) -> Result<HashMap<PathBuf, bool>, SweepError> {
    sweep_with(Arc::new(LocalBackend::new()), root, options).await
}

/// Same selection and deletion semantics as [`sweep`], but hands back the
/// live stream of records immediately. Consume it at your own pace, or
/// drop it to abort the walk; nothing starts until the first poll.
pub fn sweep_stream(
    root: impl AsRef<Path>,
    options: SweepOptions,
) -> Result<SweepStream, SweepError> {
    sweep_stream_with(Arc::new(LocalBackend::new()), root, options)
}

/// [`sweep`] over an explicit filesystem backend.
pub async fn sweep_with(
    fs: Arc<dyn FsBackend>,
    root: impl AsRef<Path>,
    options: SweepOptions,
) -> Result<HashMap<PathBuf, bool>, SweepError> {
    let mut stream = sweep_stream_with(fs, root, options)?;
    let mut outcome = HashMap::new();
    while let Some(record) = stream.next().await {
        let entry = record?;
        outcome.insert(entry.path, entry.deleted);
    }
    Ok(outcome)
}

/// [`sweep_stream`] over an explicit filesystem backend.
pub fn sweep_stream_with(
    fs: Arc<dyn FsBackend>,
    root: impl AsRef<Path>,
    options: SweepOptions,
) -> Result<SweepStream, SweepError> {
    let filters = filter::Filters::compile(&options)?;
    Ok(SweepStream::new(
        fs,
        Arc::new(filters),
        root.as_ref().to_path_buf(),
    ))
}
