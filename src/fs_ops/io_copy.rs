//! Byte copy for a single regular file.
//!
//! - Writes to a newly created destination (O_EXCL semantics; never clobbers).
//!   Callers pass a unique temporary sibling and rename it into place.
//! - Same-volume fast paths: APFS `clonefile` on macOS, `copy_file_range` on Linux.
//! - Otherwise buffered I/O with large (1 MiB) buffers.
//!
//! Snapshot semantics: the source is read once from start to EOF; bytes appended
//! concurrently are not included.

use std::fs::{File, OpenOptions};
use std::io::{self, BufReader, BufWriter, Write};
use std::path::Path;

const BUF_SIZE: usize = 1024 * 1024;

/// Copy `src` -> `dst`, returning the number of bytes written.
/// `dst` is created with `create_new(true)`.
pub(super) fn copy_streaming(src: &Path, dst: &Path) -> io::Result<u64> {
    #[cfg(target_os = "macos")]
    {
        if let Some(bytes) = try_clonefile(src, dst)? {
            return Ok(bytes);
        }
    }

    let src_f = File::open(src)?;
    let dst_f = OpenOptions::new().write(true).create_new(true).open(dst)?;

    #[cfg(target_os = "linux")]
    let (src_f, dst_f) = match try_copy_file_range(&src_f, &dst_f)? {
        Some(bytes) => return Ok(bytes),
        None => (src_f, dst_f),
    };

    let mut reader = BufReader::with_capacity(BUF_SIZE, src_f);
    let mut writer = BufWriter::with_capacity(BUF_SIZE, dst_f);
    let bytes = io::copy(&mut reader, &mut writer)?;
    writer.flush()?;
    Ok(bytes)
}

/// `Ok(None)` means "not supported here, fall back to streaming".
#[cfg(target_os = "macos")]
fn try_clonefile(src: &Path, dst: &Path) -> io::Result<Option<u64>> {
    use std::ffi::CString;
    use std::os::unix::ffi::OsStrExt;

    let to_c = |p: &Path| {
        CString::new(p.as_os_str().as_bytes())
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))
    };
    let (src_c, dst_c) = (to_c(src)?, to_c(dst)?);
    // clonefile returns 0 on success, -1 with errno set (EXDEV, ENOTSUP, ...) otherwise.
    let rc = unsafe { libc::clonefile(src_c.as_ptr(), dst_c.as_ptr(), 0) };
    if rc == 0 {
        Ok(Some(std::fs::metadata(dst)?.len()))
    } else {
        Ok(None)
    }
}

/// In-kernel copy. `Ok(None)` when the filesystem pair does not support it and
/// nothing has been written yet.
#[cfg(target_os = "linux")]
fn try_copy_file_range(src_f: &File, dst_f: &File) -> io::Result<Option<u64>> {
    use std::os::unix::io::AsRawFd;

    const CHUNK: usize = 16 * 1024 * 1024;
    let mut total: u64 = 0;
    loop {
        let rc = unsafe {
            libc::copy_file_range(
                src_f.as_raw_fd(),
                std::ptr::null_mut(),
                dst_f.as_raw_fd(),
                std::ptr::null_mut(),
                CHUNK,
                0,
            )
        };
        if rc > 0 {
            total += rc as u64;
            continue;
        }
        if rc == 0 {
            return Ok(Some(total));
        }
        let err = io::Error::last_os_error();
        let unsupported = matches!(
            err.raw_os_error(),
            Some(libc::EXDEV | libc::ENOSYS | libc::EINVAL | libc::EPERM | libc::EOPNOTSUPP)
        );
        // Partial copy then error: surface it, the caller removes the temp file.
        return if total == 0 && unsupported {
            Ok(None)
        } else {
            Err(err)
        };
    }
}
