//! Recursive directory creation (mkdirp) and the small "make sure this file
//! exists" helpers built on it.
//!
//! Missing ancestors are collected first and created top-down. A requested mode
//! is then applied to every new segment and to nothing that already existed.

use std::fs::{self, OpenOptions};
use std::io;
use std::path::Path;
use tracing::debug;

use crate::errors::{Error, Result};
use crate::platform;

use super::helpers::io_err;
use super::probe::{PathKind, absolutize, probe, probe_follow};

/// Create `path` and any missing ancestors with the platform default mode.
/// A no-op when `path` is already a directory.
pub fn ensure_dir(path: impl AsRef<Path>) -> Result<()> {
    let path = absolutize(path.as_ref())?;
    create_dir_tree(&path, None)
}

/// Like [`ensure_dir`], applying `mode` exactly (the umask does not mask it) to
/// each directory this call creates. Pre-existing directories keep their mode.
/// Without POSIX modes, only the owner-write bit is honoured (readonly attribute).
pub fn ensure_dir_mode(path: impl AsRef<Path>, mode: u32) -> Result<()> {
    let path = absolutize(path.as_ref())?;
    create_dir_tree(&path, Some(mode))
}

/// Create an empty file at `path`, with missing parent directories.
/// Existing files are left untouched.
pub fn ensure_file(path: impl AsRef<Path>) -> Result<()> {
    let path = absolutize(path.as_ref())?;
    if let Some(st) = probe_follow(&path)? {
        return if st.is_file() {
            Ok(())
        } else {
            Err(mismatch("ensure file", &path, PathKind::File, st.kind))
        };
    }
    ensure_parent(&path)?;
    match OpenOptions::new().write(true).create_new(true).open(&path) {
        Ok(_) => {
            debug!(path = %path.display(), "created empty file");
            Ok(())
        }
        // Lost a race with another creator; fine as long as it is a file.
        Err(e) if e.kind() == io::ErrorKind::AlreadyExists => match probe_follow(&path)? {
            Some(st) if st.is_file() => Ok(()),
            Some(st) => Err(mismatch("ensure file", &path, PathKind::File, st.kind)),
            None => Err(Error::io("create file", &path, e)),
        },
        Err(e) => Err(Error::io("create file", &path, e)),
    }
}

/// Write `contents` to `path`, creating missing parent directories first.
pub fn output_file(path: impl AsRef<Path>, contents: impl AsRef<[u8]>) -> Result<()> {
    let path = absolutize(path.as_ref())?;
    ensure_parent(&path)?;
    fs::write(&path, contents).map_err(io_err("write file", &path))
}

pub(crate) fn ensure_parent(path: &Path) -> Result<()> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => create_dir_tree(parent, None),
        _ => Ok(()),
    }
}

pub(crate) fn create_dir_tree(path: &Path, mode: Option<u32>) -> Result<()> {
    // Walk up until something exists; everything below it is missing.
    let mut missing = Vec::new();
    for ancestor in path.ancestors() {
        match fs::metadata(ancestor) {
            Ok(meta) if meta.is_dir() => break,
            Ok(_) => {
                let found = probe(ancestor)?.map_or(PathKind::Other, |st| st.kind);
                return Err(mismatch("create directory", ancestor, PathKind::Dir, found));
            }
            // ENOTDIR: some higher component is a file; keep climbing to report it.
            Err(e)
                if e.kind() == io::ErrorKind::NotFound
                    || e.kind() == io::ErrorKind::NotADirectory =>
            {
                missing.push(ancestor)
            }
            Err(e) => return Err(Error::io("stat", ancestor, e)),
        }
    }

    let mut created = Vec::with_capacity(missing.len());
    for dir in missing.into_iter().rev() {
        match fs::create_dir(dir) {
            Ok(()) => {
                debug!(path = %dir.display(), "created directory");
                created.push(dir);
            }
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
                // Benign race: someone else created it as a directory.
                match probe_follow(dir)? {
                    Some(st) if st.is_dir() => {}
                    _ => {
                        let found = probe(dir)?.map_or(PathKind::Other, |st| st.kind);
                        return Err(mismatch("create directory", dir, PathKind::Dir, found));
                    }
                }
            }
            Err(e) => return Err(Error::io("create directory", dir, e)),
        }
    }

    // Deepest first: a restrictive mode on a parent must not block its children.
    if let Some(mode) = mode {
        for dir in created.into_iter().rev() {
            platform::apply_mode(dir, mode).map_err(io_err("set directory mode", dir))?;
            debug!(path = %dir.display(), mode = format!("{mode:o}"), "applied directory mode");
        }
    }
    Ok(())
}

fn mismatch(op: &'static str, path: &Path, expected: PathKind, found: PathKind) -> Error {
    Error::TypeMismatch {
        op,
        path: path.to_path_buf(),
        expected,
        found,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ErrorKind;
    use tempfile::tempdir;

    #[test]
    fn creates_nested_and_is_idempotent() {
        let td = tempdir().unwrap();
        let p = td.path().join("a/b/c");
        ensure_dir(&p).unwrap();
        ensure_dir(&p).unwrap();
        assert!(p.is_dir());
    }

    #[test]
    fn file_in_the_way_is_type_mismatch() {
        let td = tempdir().unwrap();
        let f = td.path().join("f");
        fs::write(&f, b"x").unwrap();
        let err = ensure_dir(f.join("sub/deeper")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::TypeMismatch);
        assert_eq!(err.path(), Some(f.as_path()));
    }

    #[test]
    fn ensure_file_creates_parents_and_keeps_content() {
        let td = tempdir().unwrap();
        let f = td.path().join("x/y/file.txt");
        ensure_file(&f).unwrap();
        assert_eq!(fs::read(&f).unwrap(), b"");
        fs::write(&f, b"keep").unwrap();
        ensure_file(&f).unwrap();
        assert_eq!(fs::read(&f).unwrap(), b"keep");
    }

    #[test]
    fn ensure_file_on_dir_fails() {
        let td = tempdir().unwrap();
        let err = ensure_file(td.path()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::TypeMismatch);
    }

    #[test]
    fn output_file_writes_through_missing_dirs() {
        let td = tempdir().unwrap();
        let f = td.path().join("deep/er/out.bin");
        output_file(&f, b"payload").unwrap();
        assert_eq!(fs::read(&f).unwrap(), b"payload");
    }

    #[cfg(unix)]
    #[test]
    fn mode_only_touches_new_segments() {
        use std::os::unix::fs::PermissionsExt;
        let td = tempdir().unwrap();
        let existing = td.path().join("pre");
        fs::create_dir(&existing).unwrap();
        fs::set_permissions(&existing, fs::Permissions::from_mode(0o711)).unwrap();

        ensure_dir_mode(existing.join("new"), 0o750).unwrap();
        let mode = |p: &Path| fs::metadata(p).unwrap().permissions().mode() & 0o777;
        assert_eq!(mode(&existing), 0o711);
        assert_eq!(mode(&existing.join("new")), 0o750);
    }
}
