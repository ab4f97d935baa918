//! Filesystem tree operations, one module per operation.

mod atomic;
mod copy;
mod empty;
pub(crate) mod helpers;
mod io_copy;
mod json;
mod metadata;
mod mkdirp;
mod mover;
pub(crate) mod probe;
pub(crate) mod remove;
mod util;
mod walk;

pub use atomic::rename_atomic;
pub use copy::copy;
pub(crate) use empty::children_or_create;
pub use empty::empty_dir;
pub use helpers::hint;
pub use json::{Codec, JsonCodec, read_json, read_structured, write_json, write_structured};
pub use mkdirp::{ensure_dir, ensure_dir_mode, ensure_file, output_file};
pub use mover::move_path;
pub use probe::{PathKind, PathStat, path_exists, probe, probe_follow};
pub use remove::remove;
pub use walk::dive;
