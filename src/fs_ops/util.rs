use std::io;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

static TEMP_SEQ: AtomicU64 = AtomicU64::new(0);

/// Hidden sibling name for a file being written in `dst_dir`.
/// Unique per process and per call, so concurrent sibling copies never collide.
pub(super) fn unique_temp_path(dst_dir: &Path) -> PathBuf {
    let pid = std::process::id();
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or(0);
    let seq = TEMP_SEQ.fetch_add(1, Ordering::Relaxed);
    dst_dir.join(format!(".treekit.{pid}.{nanos}.{seq}.tmp"))
}

pub(super) fn is_cross_device(e: &io::Error) -> bool {
    if e.kind() == io::ErrorKind::CrossesDevices {
        return true;
    }
    // Older kernels / targets report only the raw code.
    if let Some(code) = e.raw_os_error() {
        #[cfg(unix)]
        {
            if code == libc::EXDEV {
                return true;
            }
        }
        #[cfg(windows)]
        {
            // ERROR_NOT_SAME_DEVICE
            if code == 17 {
                return true;
            }
        }
    }
    false
}

/// Rename refused because something already sits at the destination
/// (non-empty directory, or a kind the rename cannot replace).
pub(super) fn is_destination_occupied(e: &io::Error, dest: &Path) -> bool {
    match e.kind() {
        io::ErrorKind::DirectoryNotEmpty
        | io::ErrorKind::AlreadyExists
        | io::ErrorKind::IsADirectory
        | io::ErrorKind::NotADirectory => return true,
        _ => {}
    }
    if let Some(code) = e.raw_os_error() {
        #[cfg(unix)]
        {
            return matches!(
                code,
                libc::ENOTEMPTY | libc::EEXIST | libc::EISDIR | libc::ENOTDIR
            );
        }
        #[cfg(windows)]
        {
            return match code {
                // ERROR_DIR_NOT_EMPTY, ERROR_ALREADY_EXISTS
                145 | 183 => dest.exists(),
                // ERROR_ACCESS_DENIED is also what a locked source produces; only a
                // directory target makes it an occupied destination.
                5 => std::fs::symlink_metadata(dest).is_ok_and(|m| m.is_dir()),
                _ => false,
            };
        }
    }
    let _ = dest;
    false
}
