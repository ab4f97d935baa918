//! Unix implementations of platform helpers.

use std::fs::{self, File, OpenOptions};
use std::io;
use std::os::unix::fs::{MetadataExt, OpenOptionsExt, PermissionsExt};
use std::path::Path;

/// chmod `path` to exactly `mode` (permission and setuid/setgid/sticky bits only).
pub fn apply_mode(path: &Path, mode: u32) -> io::Result<()> {
    fs::set_permissions(path, fs::Permissions::from_mode(mode & 0o7777))
}

/// Permission bits of an already-fetched metadata record.
pub fn mode_bits(meta: &fs::Metadata) -> u32 {
    meta.mode() & 0o7777
}

/// Unlinking on Unix depends on the parent directory's permissions, not the
/// entry's own, so there is never a readonly flag to clear.
pub fn clear_readonly(_path: &Path) -> io::Result<bool> {
    Ok(false)
}

/// Create a symbolic link at `link` pointing to `target`. The link flavour is irrelevant on Unix.
pub fn symlink(target: &Path, link: &Path, _target_is_dir: bool) -> io::Result<()> {
    std::os::unix::fs::symlink(target, link)
}

/// Open log file for appending; set 0600 only when creating a new file.
/// If the file already exists its permissions are left alone.
pub fn open_log_file_secure_append(path: &Path) -> io::Result<File> {
    if let Some(parent) = path.parent() {
        let _ = fs::create_dir_all(parent);
    }
    let existed = path.exists();
    let f = OpenOptions::new()
        .create(true)
        .append(true)
        .mode(0o600) // applies on create
        .open(path)?;
    if !existed {
        let _ = fs::set_permissions(path, fs::Permissions::from_mode(0o600));
    }
    Ok(f)
}
