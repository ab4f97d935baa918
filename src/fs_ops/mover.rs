//! Move implementation.
//! Tries an atomic rename first; across filesystems it copies the tree
//! (timestamps preserved) and removes the source. That fallback is not atomic:
//! an interruption can leave both the source and a partial destination.

use std::path::Path;
use tracing::{debug, info, warn};

use crate::config::{CopyOptions, MoveOptions};
use crate::errors::{Error, Result};

use super::atomic::rename_atomic;
use super::copy::{copy_entry, ensure_not_self};
use super::mkdirp::ensure_parent;
use super::probe::{absolutize, lstat, probe};
use super::remove::remove_tree;
use super::util::is_destination_occupied;

/// Relocate `src` to exactly `dest` (no retargeting into an existing directory).
pub fn move_path(src: impl AsRef<Path>, dest: impl AsRef<Path>, opts: &MoveOptions) -> Result<()> {
    let src = absolutize(src.as_ref())?;
    let dest = absolutize(dest.as_ref())?;

    let Some(src_meta) = lstat(&src)? else {
        return Err(Error::NotFound { op: "move", path: src });
    };
    ensure_not_self(&src, &dest, src_meta.is_dir())?;

    if probe(&dest)?.is_some() && !opts.overwrite {
        return Err(Error::AlreadyExists {
            op: "move",
            path: dest,
        });
    }
    ensure_parent(&dest)?;

    let first = match rename_atomic(&src, &dest) {
        Err(e) if opts.overwrite && occupied(&e, &dest) => {
            debug!(dest = %dest.display(), error = %e, "destination occupied; removing and retrying rename");
            remove_tree(&dest)?;
            rename_atomic(&src, &dest)
        }
        other => other,
    };

    match first {
        Ok(()) => {
            info!(src = %src.display(), dest = %dest.display(), "renamed atomically");
            Ok(())
        }
        Err(Error::CrossDevice { .. }) => {
            warn!(src = %src.display(), dest = %dest.display(), "rename crosses filesystems; copying then removing source");
            if opts.overwrite {
                remove_tree(&dest)?;
            }
            let copy_opts = CopyOptions {
                overwrite: opts.overwrite,
                preserve_timestamps: true,
            };
            copy_entry(&src, &src_meta, &dest, &copy_opts)?;
            remove_tree(&src)?;
            info!(src = %src.display(), dest = %dest.display(), "copied across filesystems and removed source");
            Ok(())
        }
        Err(e) => Err(e),
    }
}

fn occupied(e: &Error, dest: &Path) -> bool {
    e.io_error().is_some_and(|io| is_destination_occupied(io, dest))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ErrorKind;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn moves_file_and_creates_parents() {
        let td = tempdir().unwrap();
        let src = td.path().join("a.txt");
        let dst = td.path().join("x/y/b.txt");
        fs::write(&src, b"A").unwrap();
        move_path(&src, &dst, &MoveOptions::default()).unwrap();
        assert!(!src.exists());
        assert_eq!(fs::read(&dst).unwrap(), b"A");
    }

    #[test]
    fn existing_dest_without_overwrite_fails_untouched() {
        let td = tempdir().unwrap();
        let src = td.path().join("a");
        let dst = td.path().join("b");
        fs::write(&src, b"new").unwrap();
        fs::write(&dst, b"old").unwrap();
        let err = move_path(&src, &dst, &MoveOptions::default()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::AlreadyExists);
        assert_eq!(fs::read(&dst).unwrap(), b"old");
        assert!(src.exists());
    }

    #[test]
    fn overwrite_replaces_non_empty_dir() {
        let td = tempdir().unwrap();
        let src = td.path().join("src");
        let dst = td.path().join("dst");
        fs::create_dir(&src).unwrap();
        fs::write(src.join("new"), b"n").unwrap();
        fs::create_dir(&dst).unwrap();
        fs::write(dst.join("old"), b"o").unwrap();

        move_path(&src, &dst, &MoveOptions { overwrite: true }).unwrap();
        assert!(!src.exists());
        assert!(dst.join("new").exists());
        assert!(!dst.join("old").exists());
    }

    #[test]
    fn onto_itself_is_refused() {
        let td = tempdir().unwrap();
        let src = td.path().join("a");
        fs::write(&src, b"A").unwrap();
        let err = move_path(&src, &src, &MoveOptions { overwrite: true }).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::SelfReferential);
        assert_eq!(fs::read(&src).unwrap(), b"A");
    }
}
