//! Core library for `treekit`.
//!
//! Recursive filesystem tree operations with predictable conflict, overwrite and
//! permission semantics:
//!
//! - [`copy`]: file or directory tree, merging into existing directories.
//! - [`move_path`]: atomic rename, with a copy + remove fallback across filesystems.
//! - [`ensure_dir`] / [`ensure_dir_mode`]: mkdirp.
//! - [`empty_dir`]: leave a directory existing and empty.
//! - [`remove`]: idempotent recursive delete.
//! - [`write_json`] / [`read_json`]: whole-file structured data.
//!
//! Every operation resolves relative paths against the current directory once,
//! at entry, and returns [`Result`] with a typed [`Error`] naming the failing
//! operation and path. With the `async` feature (on by default) the
//! [`nonblocking`] module offers the same operations as futures.
//!
//! The library only emits `tracing` events; installing a subscriber is up to
//! the application.

pub mod config;
pub mod errors;
pub mod fs_ops;
#[cfg(feature = "async")]
pub mod nonblocking;
pub mod platform;

pub use config::{CopyOptions, Indent, JsonWriteOptions, MoveOptions, Replacer};
pub use errors::{BoxError, Error, ErrorKind, Result};
pub use fs_ops::{
    Codec, JsonCodec, PathKind, PathStat, copy, dive, empty_dir, ensure_dir, ensure_dir_mode,
    ensure_file, move_path, output_file, path_exists, probe, probe_follow, read_json,
    read_structured, remove, rename_atomic, write_json, write_structured,
};
