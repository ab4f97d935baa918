//! Recursive tree copy.
//!
//! - A file copied onto an existing directory lands inside it, under its own
//!   name (`cp file dir/`).
//! - A directory copied onto an existing directory merges into it: entries the
//!   source does not have are left alone, conflicts are decided per file.
//! - The whole source tree is checked against the destination before the first
//!   write, so a conflict fails the copy with the destination unchanged.
//! - Files are written to a temporary sibling and renamed into place, so a
//!   failed copy never leaves a half-written file under the final name.
//! - A directory is created before any of its children; its permission bits and
//!   (optionally) timestamps are applied after them. Siblings are copied in
//!   parallel and carry no ordering guarantee.
//! - Symlinks are recreated, not followed.

use rayon::prelude::*;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::config::CopyOptions;
use crate::errors::{Error, Result};
use crate::platform;

use super::helpers::io_err;
use super::mkdirp::ensure_parent;
use super::probe::{PathKind, absolutize, lstat, probe, probe_follow, resolve_lenient};
use super::{io_copy, metadata, util};

/// Copy `src` (file, directory tree or symlink) to `dest`.
pub fn copy(src: impl AsRef<Path>, dest: impl AsRef<Path>, opts: &CopyOptions) -> Result<()> {
    let src = absolutize(src.as_ref())?;
    let dest = absolutize(dest.as_ref())?;

    let Some(src_meta) = lstat(&src)? else {
        return Err(Error::NotFound { op: "copy", path: src });
    };

    let target = if !src_meta.is_dir() && probe_follow(&dest)?.is_some_and(|st| st.is_dir()) {
        let name = src.file_name().ok_or_else(|| {
            Error::io(
                "copy",
                &src,
                io::Error::new(io::ErrorKind::InvalidInput, "source has no file name"),
            )
        })?;
        dest.join(name)
    } else {
        dest
    };

    ensure_not_self(&src, &target, src_meta.is_dir())?;
    check_conflicts(&src, &src_meta, &target, opts)?;
    ensure_parent(&target)?;
    copy_entry(&src, &src_meta, &target, opts)?;

    info!(src = %src.display(), dest = %target.display(), "copied");
    Ok(())
}

/// Refuse `src -> dest` when both name the same entry, or when a directory
/// would be copied or moved into its own subtree.
pub(crate) fn ensure_not_self(src: &Path, dest: &Path, src_is_dir: bool) -> Result<()> {
    let s = resolve_lenient(src);
    let d = resolve_lenient(dest);
    if s == d || (src_is_dir && d.starts_with(&s)) {
        return Err(Error::SelfReferential {
            src: src.to_path_buf(),
            dest: dest.to_path_buf(),
        });
    }
    Ok(())
}

/// Copy one entry whose parent directory already exists at `dest`.
pub(crate) fn copy_entry(
    src: &Path,
    src_meta: &fs::Metadata,
    dest: &Path,
    opts: &CopyOptions,
) -> Result<()> {
    match PathKind::of(src_meta.file_type()) {
        PathKind::Dir => copy_dir(src, src_meta, dest, opts),
        PathKind::File => copy_file(src, src_meta, dest, opts),
        PathKind::Symlink => copy_symlink(src, dest, opts),
        PathKind::Other => Err(Error::TypeMismatch {
            op: "copy",
            path: src.to_path_buf(),
            expected: PathKind::File,
            found: PathKind::Other,
        }),
    }
}

fn copy_dir(src: &Path, src_meta: &fs::Metadata, dest: &Path, opts: &CopyOptions) -> Result<()> {
    let created = match probe_follow(dest)? {
        Some(st) if st.is_dir() => false,
        Some(_) => {
            let found = probe(dest)?.map_or(PathKind::Other, |st| st.kind);
            return Err(mismatch(dest, PathKind::Dir, found));
        }
        None => {
            fs::create_dir(dest).map_err(io_err("create directory", dest))?;
            debug!(path = %dest.display(), "created directory");
            true
        }
    };

    let names = fs::read_dir(src)
        .map_err(io_err("read directory", src))?
        .map(|entry| entry.map(|e| e.file_name()))
        .collect::<io::Result<Vec<_>>>()
        .map_err(io_err("read directory", src))?;

    names.par_iter().try_for_each(|name| {
        let child_src = src.join(name);
        let child_meta = lstat(&child_src)?.ok_or_else(|| Error::NotFound {
            op: "copy",
            path: child_src.clone(),
        })?;
        copy_entry(&child_src, &child_meta, &dest.join(name), opts)
    })?;

    // After the children: a read-only source directory must still be populated.
    if created {
        metadata::copy_permissions(dest, src_meta)?;
    }
    if opts.preserve_timestamps {
        metadata::preserve_timestamps(dest, src_meta);
    }
    Ok(())
}

fn copy_file(src: &Path, src_meta: &fs::Metadata, dest: &Path, opts: &CopyOptions) -> Result<()> {
    check_leaf_conflict(dest, opts)?;

    let dir = dest.parent().unwrap_or(dest);
    let tmp = util::unique_temp_path(dir);
    let staged = io_copy::copy_streaming(src, &tmp)
        .map_err(io_err("copy file", src))
        .and_then(|bytes| {
            metadata::copy_permissions(&tmp, src_meta)?;
            fs::rename(&tmp, dest).map_err(io_err("rename temporary file", dest))?;
            Ok(bytes)
        });
    let bytes = match staged {
        Ok(bytes) => bytes,
        Err(e) => {
            let _ = fs::remove_file(&tmp);
            return Err(e);
        }
    };
    debug!(src = %src.display(), dest = %dest.display(), bytes, "copied file");

    if opts.preserve_timestamps {
        metadata::preserve_timestamps(dest, src_meta);
    }
    Ok(())
}

fn copy_symlink(src: &Path, dest: &Path, opts: &CopyOptions) -> Result<()> {
    if check_leaf_conflict(dest, opts)? {
        fs::remove_file(dest).map_err(io_err("remove file", dest))?;
    }
    let target = fs::read_link(src).map_err(io_err("read symlink", src))?;
    let target_is_dir = fs::metadata(src).map(|m| m.is_dir()).unwrap_or(false);
    platform::symlink(&target, dest, target_is_dir).map_err(io_err("create symlink", dest))?;
    debug!(src = %src.display(), dest = %dest.display(), target = %target.display(), "recreated symlink");
    Ok(())
}

/// Walk `src` against the existing `dest` tree and report the first conflict
/// before anything is written. Kind mismatches always conflict; an existing
/// leaf conflicts only when overwrite is off. Absent subtrees are not visited.
fn check_conflicts(src: &Path, src_meta: &fs::Metadata, dest: &Path, opts: &CopyOptions) -> Result<()> {
    match PathKind::of(src_meta.file_type()) {
        PathKind::Dir => match probe_follow(dest)? {
            None => Ok(()),
            Some(st) if st.is_dir() => {
                let entries = fs::read_dir(src).map_err(io_err("read directory", src))?;
                for entry in entries {
                    let entry = entry.map_err(io_err("read directory", src))?;
                    let child_src = entry.path();
                    let Some(child_meta) = lstat(&child_src)? else {
                        continue;
                    };
                    check_conflicts(&child_src, &child_meta, &dest.join(entry.file_name()), opts)?;
                }
                Ok(())
            }
            Some(_) => {
                let found = probe(dest)?.map_or(PathKind::Other, |st| st.kind);
                Err(mismatch(dest, PathKind::Dir, found))
            }
        },
        PathKind::File | PathKind::Symlink => check_leaf_conflict(dest, opts).map(|_| ()),
        PathKind::Other => Err(mismatch(src, PathKind::File, PathKind::Other)),
    }
}

/// Per-file conflict rule. `Ok(true)` when an existing non-directory will be replaced.
fn check_leaf_conflict(dest: &Path, opts: &CopyOptions) -> Result<bool> {
    match probe(dest)? {
        None => Ok(false),
        Some(st) if st.is_dir() => Err(mismatch(dest, PathKind::File, PathKind::Dir)),
        Some(_) if !opts.overwrite => Err(Error::AlreadyExists {
            op: "copy",
            path: dest.to_path_buf(),
        }),
        Some(_) => Ok(true),
    }
}

fn mismatch(path: &Path, expected: PathKind, found: PathKind) -> Error {
    Error::TypeMismatch {
        op: "copy",
        path: PathBuf::from(path),
        expected,
        found,
    }
}
