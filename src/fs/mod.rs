pub mod backend;
pub mod local;
pub mod types;

pub use backend::FsBackend;
pub use local::LocalBackend;
pub use types::{EntryKind, EntryMeta, SweptEntry};
