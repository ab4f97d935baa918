//! Typed error definitions for treekit.
//! One variant per failure mode so callers and tests can branch without string matching.

use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::fs_ops::helpers::hint;
use crate::fs_ops::probe::PathKind;

/// Boxed error produced by a pluggable [`Codec`](crate::fs_ops::json::Codec).
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("{op}: path not found: {}", .path.display())]
    NotFound { op: &'static str, path: PathBuf },

    #[error("{op}: destination '{}' already exists and overwrite is off", .path.display())]
    AlreadyExists { op: &'static str, path: PathBuf },

    #[error("{op}: expected a {expected} at '{}' but found a {found}", .path.display())]
    TypeMismatch {
        op: &'static str,
        path: PathBuf,
        expected: PathKind,
        found: PathKind,
    },

    #[error(
        "refusing to copy or move '{}' onto itself or into its own subtree ('{}')",
        .src.display(),
        .dest.display()
    )]
    SelfReferential { src: PathBuf, dest: PathBuf },

    #[error("rename '{}' -> '{}' crosses filesystems", .src.display(), .dest.display())]
    CrossDevice { src: PathBuf, dest: PathBuf },

    #[error("parse '{}': {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: BoxError,
    },

    #[error("serialize value for '{}': {source}", .path.display())]
    Serialize {
        path: PathBuf,
        #[source]
        source: BoxError,
    },

    #[error("{op} '{}': {source}{}", .path.display(), hint(.source))]
    Io {
        op: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("operation interrupted before completion")]
    Interrupted,
}

/// Fieldless discriminant of [`Error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    AlreadyExists,
    TypeMismatch,
    SelfReferential,
    CrossDevice,
    Parse,
    Serialize,
    /// Primitive I/O failure passed through unchanged.
    Underlying,
    Interrupted,
}

impl Error {
    pub(crate) fn io(op: &'static str, path: impl Into<PathBuf>, source: io::Error) -> Self {
        Error::Io {
            op,
            path: path.into(),
            source,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::NotFound { .. } => ErrorKind::NotFound,
            Error::AlreadyExists { .. } => ErrorKind::AlreadyExists,
            Error::TypeMismatch { .. } => ErrorKind::TypeMismatch,
            Error::SelfReferential { .. } => ErrorKind::SelfReferential,
            Error::CrossDevice { .. } => ErrorKind::CrossDevice,
            Error::Parse { .. } => ErrorKind::Parse,
            Error::Serialize { .. } => ErrorKind::Serialize,
            Error::Io { .. } => ErrorKind::Underlying,
            Error::Interrupted => ErrorKind::Interrupted,
        }
    }

    /// The path the failure is attributed to, when there is one.
    pub fn path(&self) -> Option<&Path> {
        match self {
            Error::NotFound { path, .. }
            | Error::AlreadyExists { path, .. }
            | Error::TypeMismatch { path, .. }
            | Error::Parse { path, .. }
            | Error::Serialize { path, .. }
            | Error::Io { path, .. } => Some(path),
            Error::SelfReferential { dest, .. } | Error::CrossDevice { dest, .. } => Some(dest),
            Error::Interrupted => None,
        }
    }

    /// Underlying `io::Error` for [`ErrorKind::Underlying`] failures.
    pub fn io_error(&self) -> Option<&io::Error> {
        match self {
            Error::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn io_variant_names_op_and_path() {
        let e = Error::io(
            "remove file",
            "/tmp/x.txt",
            io::Error::from(io::ErrorKind::NotFound),
        );
        let msg = e.to_string();
        assert!(msg.starts_with("remove file '/tmp/x.txt'"), "msg was: {msg}");
        assert_eq!(e.kind(), ErrorKind::Underlying);
        assert_eq!(e.path(), Some(Path::new("/tmp/x.txt")));
        assert!(e.io_error().is_some());
    }

    #[test]
    fn type_mismatch_message_names_both_kinds() {
        let e = Error::TypeMismatch {
            op: "copy",
            path: PathBuf::from("/a/b"),
            expected: PathKind::File,
            found: PathKind::Dir,
        };
        let msg = e.to_string();
        assert!(msg.contains("expected a file"), "msg was: {msg}");
        assert!(msg.contains("found a directory"), "msg was: {msg}");
    }

    #[test]
    fn interrupted_has_no_path() {
        assert_eq!(Error::Interrupted.path(), None);
        assert_eq!(Error::Interrupted.kind(), ErrorKind::Interrupted);
    }
}
