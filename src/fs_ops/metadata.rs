//! Metadata carried from source to destination by a copy.
//! - Permission bits: always, like `fs::copy`. Failures are errors.
//! - Timestamps (atime, mtime): on request, best-effort. Failures are logged, never returned.

use filetime::{FileTime, set_file_times};
use std::fs;
use std::path::Path;
use tracing::{trace, warn};

use crate::errors::Result;
use crate::platform;

use super::helpers::io_err;

/// Apply the source's permission bits to `dest`.
pub(super) fn copy_permissions(dest: &Path, src_meta: &fs::Metadata) -> Result<()> {
    let mode = platform::mode_bits(src_meta);
    platform::apply_mode(dest, mode).map_err(io_err("set permissions", dest))?;
    trace!(path = %dest.display(), mode = format!("{mode:o}"), "applied source permissions");
    Ok(())
}

/// Set `dest`'s access and modification times to the source's.
/// Unsupported or denied: warn and carry on.
pub(super) fn preserve_timestamps(dest: &Path, src_meta: &fs::Metadata) {
    let Some((at, mt)) = source_times(src_meta) else {
        warn!(path = %dest.display(), "source timestamps unavailable; not preserved");
        return;
    };
    if let Err(e) = set_file_times(dest, at, mt) {
        warn!(path = %dest.display(), error = %e, "failed to set atime/mtime on destination");
    } else {
        trace!(path = %dest.display(), "set atime/mtime on destination");
    }
}

#[cfg(unix)]
fn source_times(meta: &fs::Metadata) -> Option<(FileTime, FileTime)> {
    use std::os::unix::fs::MetadataExt;
    let mt = FileTime::from_unix_time(meta.mtime(), meta.mtime_nsec() as u32);
    let at = FileTime::from_unix_time(meta.atime(), meta.atime_nsec() as u32);
    Some((at, mt))
}

#[cfg(not(unix))]
fn source_times(meta: &fs::Metadata) -> Option<(FileTime, FileTime)> {
    let mt = meta.modified().ok().map(FileTime::from_system_time)?;
    // Some filesystems do not track access time; fall back to mtime.
    let at = meta.accessed().ok().map(FileTime::from_system_time).unwrap_or(mt);
    Some((at, mt))
}
