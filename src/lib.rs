// Library crate for scour
// Re-exports the filesystem capability layer and the sweep engine

pub mod fs;
pub mod sweep;

pub use fs::{EntryKind, EntryMeta, FsBackend, LocalBackend, SweptEntry};
pub use sweep::{
    sweep, sweep_stream, sweep_stream_with, sweep_with, NameList, SweepError, SweepOptions,
    SweepStream,
};
