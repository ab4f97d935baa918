//! Path probing.
//! Answers "does it exist, and what is it" without failing on absence.
//!
//! A `PathStat` is a point-in-time snapshot: callers re-probe before every
//! decision that depends on existence and never cache the result.

use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use crate::errors::Result;
use crate::platform;

use super::helpers::{io_err, is_not_found};

/// Kind of filesystem entry observed by a probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathKind {
    File,
    Dir,
    Symlink,
    /// Sockets, fifos, devices.
    Other,
}

impl fmt::Display for PathKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            PathKind::File => "file",
            PathKind::Dir => "directory",
            PathKind::Symlink => "symlink",
            PathKind::Other => "special file",
        };
        f.write_str(s)
    }
}

/// Snapshot of a path's kind and metadata at the moment of probing.
#[derive(Debug, Clone)]
pub struct PathStat {
    pub kind: PathKind,
    pub len: u64,
    /// Permission bits (approximated on platforms without POSIX modes).
    pub mode: u32,
    pub modified: Option<SystemTime>,
    pub accessed: Option<SystemTime>,
}

impl PathKind {
    pub(crate) fn of(ft: fs::FileType) -> Self {
        if ft.is_symlink() {
            PathKind::Symlink
        } else if ft.is_dir() {
            PathKind::Dir
        } else if ft.is_file() {
            PathKind::File
        } else {
            PathKind::Other
        }
    }
}

impl PathStat {
    fn from_metadata(meta: &fs::Metadata) -> Self {
        Self {
            kind: PathKind::of(meta.file_type()),
            len: meta.len(),
            mode: platform::mode_bits(meta),
            modified: meta.modified().ok(),
            accessed: meta.accessed().ok(),
        }
    }

    pub fn is_dir(&self) -> bool {
        self.kind == PathKind::Dir
    }

    pub fn is_file(&self) -> bool {
        self.kind == PathKind::File
    }

    pub fn is_symlink(&self) -> bool {
        self.kind == PathKind::Symlink
    }
}

fn stat_with(path: &Path, follow: bool) -> io::Result<Option<fs::Metadata>> {
    let res = if follow {
        fs::metadata(path)
    } else {
        fs::symlink_metadata(path)
    };
    match res {
        Ok(meta) => Ok(Some(meta)),
        Err(e) if is_not_found(&e) => Ok(None),
        Err(e) => Err(e),
    }
}

/// Probe `path` without following a final symlink.
/// Returns `Ok(None)` when the path does not exist; other stat failures
/// (permission denied, I/O) are errors.
pub fn probe(path: impl AsRef<Path>) -> Result<Option<PathStat>> {
    let path = path.as_ref();
    let meta = stat_with(path, false).map_err(io_err("stat", path))?;
    Ok(meta.as_ref().map(PathStat::from_metadata))
}

/// Like [`probe`], but follows symlinks. A dangling link reports as absent.
pub fn probe_follow(path: impl AsRef<Path>) -> Result<Option<PathStat>> {
    let path = path.as_ref();
    let meta = stat_with(path, true).map_err(io_err("stat", path))?;
    Ok(meta.as_ref().map(PathStat::from_metadata))
}

/// True when something (including a dangling symlink) exists at `path`.
pub fn path_exists(path: impl AsRef<Path>) -> Result<bool> {
    Ok(probe(path)?.is_some())
}

/// Raw metadata, absent-tolerant, for callers that need more than a `PathStat`.
pub(crate) fn lstat(path: &Path) -> Result<Option<fs::Metadata>> {
    stat_with(path, false).map_err(io_err("stat", path))
}

/// Resolve a possibly relative path against the current directory, once, at a
/// public entry point. Does not touch the filesystem or resolve `..`.
pub(crate) fn absolutize(path: &Path) -> Result<PathBuf> {
    std::path::absolute(path).map_err(io_err("resolve path", path))
}

/// Canonical form of `path` without following its final component.
/// Missing ancestors are kept lexically, so this also works for destinations
/// that do not exist yet.
pub(crate) fn resolve_lenient(path: &Path) -> PathBuf {
    match (path.parent(), path.file_name()) {
        (Some(parent), Some(name)) => {
            let parent = dunce::canonicalize(parent).unwrap_or_else(|_| resolve_lenient(parent));
            parent.join(name)
        }
        _ => path.to_path_buf(),
    }
}
