//! Recursive removal.
//! Idempotent (absent is success), depth-first post-order, fail-fast: the first
//! child that cannot be removed aborts the rest of its directory. Nothing
//! already deleted is restored.

use std::fs;
use std::io;
use std::path::Path;
use tracing::{debug, trace};

use crate::errors::{Error, Result};
use crate::platform;

use super::helpers::is_not_found;
use super::probe::{absolutize, lstat};

/// Delete `path` and everything beneath it. Symlinks are removed, never followed.
pub fn remove(path: impl AsRef<Path>) -> Result<()> {
    let path = absolutize(path.as_ref())?;
    remove_tree(&path)?;
    debug!(path = %path.display(), "removed");
    Ok(())
}

pub(crate) fn remove_tree(path: &Path) -> Result<()> {
    let Some(meta) = lstat(path)? else {
        return Ok(());
    };
    let ft = meta.file_type();

    if ft.is_dir() {
        let entries = match fs::read_dir(path) {
            Ok(rd) => rd,
            Err(e) if is_not_found(&e) => return Ok(()),
            Err(e) => return Err(Error::io("read directory", path, e)),
        };
        for entry in entries {
            let entry = entry.map_err(|e| Error::io("read directory", path, e))?;
            remove_tree(&entry.path())?;
        }
        return delete(path, true, "remove directory");
    }

    delete(path, link_is_dir(&meta), "remove file")
}

/// Windows directory symlinks and junctions are removed with `remove_dir`.
#[cfg(windows)]
fn link_is_dir(meta: &fs::Metadata) -> bool {
    use std::os::windows::fs::FileTypeExt;
    meta.file_type().is_symlink_dir()
}

#[cfg(not(windows))]
fn link_is_dir(_meta: &fs::Metadata) -> bool {
    false
}

fn delete(path: &Path, as_dir: bool, op: &'static str) -> Result<()> {
    let attempt = || {
        if as_dir {
            fs::remove_dir(path)
        } else {
            fs::remove_file(path)
        }
    };
    let res = match attempt() {
        // Read-only entries refuse deletion on Windows; clear the flag and retry once.
        Err(e) if e.kind() == io::ErrorKind::PermissionDenied => {
            match platform::clear_readonly(path) {
                Ok(true) => {
                    trace!(path = %path.display(), "cleared readonly attribute, retrying");
                    attempt()
                }
                _ => Err(e),
            }
        }
        other => other,
    };
    match res {
        Ok(()) => Ok(()),
        // Removed concurrently: the end state is what the caller asked for.
        Err(e) if is_not_found(&e) => Ok(()),
        Err(e) => Err(Error::io(op, path, e)),
    }
}
