//! Platform-specific helpers.
//! Hides OS differences (POSIX mode bits vs. the Windows readonly attribute,
//! symlink flavours, log file creation) behind a uniform API so the tree
//! operations stay platform-agnostic.

#[cfg(unix)]
mod unix;
#[cfg(not(unix))]
mod windows;

#[cfg(unix)]
pub use unix::{
    apply_mode, clear_readonly, mode_bits, open_log_file_secure_append, symlink,
};

#[cfg(not(unix))]
pub use windows::{
    apply_mode, clear_readonly, mode_bits, open_log_file_secure_append, symlink,
};
