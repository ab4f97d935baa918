//! Windows implementations of platform helpers (best-effort, no ACL management).
//!
//! Notes:
//! - Windows lacks POSIX mode semantics. A requested mode is coerced to the
//!   readonly attribute: no owner-write bit means readonly.
//! - Reported modes follow the common convention: 0o444 readonly, 0o666 writable.

use std::fs::{self, File, OpenOptions};
use std::io;
use std::path::Path;

/// Best-effort mode: only the owner-write bit is meaningful.
pub fn apply_mode(path: &Path, mode: u32) -> io::Result<()> {
    let mut perms = fs::metadata(path)?.permissions();
    let readonly = mode & 0o200 == 0;
    if perms.readonly() != readonly {
        perms.set_readonly(readonly);
        fs::set_permissions(path, perms)?;
    }
    Ok(())
}

/// Approximate POSIX permission bits from the readonly attribute.
pub fn mode_bits(meta: &fs::Metadata) -> u32 {
    if meta.permissions().readonly() { 0o444 } else { 0o666 }
}

/// Clear the readonly attribute so the entry can be deleted. Returns true if it was set.
pub fn clear_readonly(path: &Path) -> io::Result<bool> {
    let mut perms = fs::symlink_metadata(path)?.permissions();
    if !perms.readonly() {
        return Ok(false);
    }
    perms.set_readonly(false);
    fs::set_permissions(path, perms)?;
    Ok(true)
}

/// Create a symbolic link; Windows needs to know whether the target is a directory.
pub fn symlink(target: &Path, link: &Path, target_is_dir: bool) -> io::Result<()> {
    if target_is_dir {
        std::os::windows::fs::symlink_dir(target, link)
    } else {
        std::os::windows::fs::symlink_file(target, link)
    }
}

/// Open log file for appending (no symlink defense available via std on Windows).
pub fn open_log_file_secure_append(path: &Path) -> io::Result<File> {
    if let Some(parent) = path.parent() {
        let _ = fs::create_dir_all(parent);
    }
    OpenOptions::new().create(true).append(true).open(path)
}
