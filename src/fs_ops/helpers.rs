//! I/O helper utilities.
//!
//! Provides a small adapter that wraps io::Error into the crate's `Error::Io`
//! (op + path), and the platform-aware hint appended to its message.
//!
//! Usage:
//!   fs::create_dir(dir).map_err(io_err("create directory", dir))?;

use std::io;
use std::path::Path;

use crate::errors::Error;

/// Short, platform-aware hint for a primitive failure. Empty when nothing useful applies.
pub fn hint(e: &io::Error) -> String {
    let mut msg = String::new();

    if let Some(code) = e.raw_os_error() {
        #[cfg(unix)]
        {
            let text = match code {
                libc::EACCES | libc::EPERM => "permission denied; check ownership and write permissions",
                libc::EXDEV => "cross-filesystem; atomic rename not possible",
                libc::EBUSY => "resource busy; ensure no other process is using it",
                libc::ENOENT => "path not found; verify it exists",
                libc::EEXIST => "already exists; remove the target or enable overwrite",
                libc::ENOTEMPTY => "directory not empty",
                libc::ENOTDIR => "a path component is not a directory",
                libc::EISDIR => "is a directory",
                libc::ENOSPC => "insufficient space on device",
                libc::EROFS => "read-only filesystem; cannot write here",
                libc::ELOOP => "too many symbolic link levels (ELOOP); possible symlink cycle",
                libc::ENAMETOOLONG => "filename or path too long; shorten path segments",
                libc::EMFILE => "process file descriptor limit reached; close files or raise limits",
                libc::ENFILE => "system-wide file table overflow; reduce open files",
                _ => "",
            };
            if !text.is_empty() {
                msg.push_str(" (");
                msg.push_str(text);
                msg.push(')');
            }
        }
        #[cfg(windows)]
        {
            let text = match code {
                5 => "access denied; check permissions",          // ERROR_ACCESS_DENIED
                17 => "not same device; cross-filesystem move",   // ERROR_NOT_SAME_DEVICE
                32 => "sharing violation; file is in use",        // ERROR_SHARING_VIOLATION
                2 | 3 => "path not found; verify it exists",      // FILE / PATH NOT FOUND
                80 | 183 => "already exists",                     // ERROR_FILE_EXISTS / ALREADY_EXISTS
                112 => "insufficient disk space",                 // ERROR_DISK_FULL
                145 => "directory not empty",                     // ERROR_DIR_NOT_EMPTY
                19 => "write protected / read-only media",        // ERROR_WRITE_PROTECT
                206 => "filename or path too long (MAX_PATH exceeded)",
                4 => "too many open files; close handles or increase limit",
                _ => "",
            };
            if !text.is_empty() {
                msg.push_str(" (");
                msg.push_str(text);
                msg.push(')');
            }
        }
        msg.push_str(&format!(" [os code: {}]", code));
    } else {
        let text = match e.kind() {
            io::ErrorKind::PermissionDenied => "permission denied; check ownership and write permissions",
            io::ErrorKind::NotFound => "path not found; verify it exists",
            io::ErrorKind::AlreadyExists => "already exists; remove the target or enable overwrite",
            io::ErrorKind::WouldBlock | io::ErrorKind::TimedOut => "busy/timed out; retry later",
            _ => "",
        };
        if !text.is_empty() {
            msg.push_str(" (");
            msg.push_str(text);
            msg.push(')');
        }
    }

    msg
}

/// Returns a closure suitable for `.map_err(...)` that converts io::Error -> Error::Io.
pub(crate) fn io_err<'a>(op: &'static str, path: &'a Path) -> impl FnOnce(io::Error) -> Error + 'a {
    move |e: io::Error| Error::io(op, path, e)
}

/// True for "not found" from any primitive (ENOENT / ERROR_FILE_NOT_FOUND / ERROR_PATH_NOT_FOUND).
pub(crate) fn is_not_found(e: &io::Error) -> bool {
    e.kind() == io::ErrorKind::NotFound
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_fallback_hint() {
        let h = hint(&io::Error::from(io::ErrorKind::PermissionDenied));
        assert!(h.contains("permission denied"), "hint was: {h}");
    }

    #[test]
    fn unknown_kind_has_empty_hint() {
        assert_eq!(hint(&io::Error::other("boom")), "");
    }

    #[cfg(unix)]
    #[test]
    fn raw_code_hint_includes_os_code() {
        let h = hint(&io::Error::from_raw_os_error(libc::ENOSPC));
        assert!(h.contains("insufficient space"), "hint was: {h}");
        assert!(h.contains("os code"), "hint was: {h}");
    }
}
