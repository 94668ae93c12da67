use async_trait::async_trait;
use std::io;
use std::path::{Path, PathBuf};

use crate::fs::types::EntryMeta;

/// Narrow filesystem capability the sweep engine works through.
///
/// Everything the traversal and the deletion pipeline touch on disk goes
/// through this interface, so the engine itself never names a concrete
/// filesystem API.
#[async_trait]
pub trait FsBackend: Send + Sync {
    /// Kind and modification time of a single entry.
    async fn metadata(&self, path: &Path) -> io::Result<EntryMeta>;

    /// Child paths of a directory, in no guaranteed order.
    async fn read_dir(&self, path: &Path) -> io::Result<Vec<PathBuf>>;

    /// Unlink a single file.
    async fn remove_file(&self, path: &Path) -> io::Result<()>;

    /// Remove a directory and everything underneath it.
    async fn remove_dir_all(&self, path: &Path) -> io::Result<()>;
}
