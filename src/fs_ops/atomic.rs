//! Atomic rename primitive.
//! Classifies the failure so the mover can branch on it: a cross-device rename
//! becomes `Error::CrossDevice`; everything else stays `Error::Io` with the
//! primitive's detail attached.
//!
//! Setting `TREEKIT_FORCE_COPY_FALLBACK` makes every rename report
//! `CrossDevice`, which drives the mover down its copy + remove path on a
//! single filesystem.

use std::env;
use std::fs;
use std::path::Path;
use tracing::{debug, trace};

use crate::errors::{Error, Result};

use super::util::is_cross_device;

const FORCE_COPY_ENV: &str = "TREEKIT_FORCE_COPY_FALLBACK";

fn copy_fallback_forced() -> bool {
    env::var_os(FORCE_COPY_ENV).is_some_and(|v| !v.is_empty() && v != "0")
}

pub fn rename_atomic(src: &Path, dest: &Path) -> Result<()> {
    if copy_fallback_forced() {
        debug!(src = %src.display(), dest = %dest.display(), env = FORCE_COPY_ENV, "forcing cross-device result");
        return Err(Error::CrossDevice {
            src: src.to_path_buf(),
            dest: dest.to_path_buf(),
        });
    }
    match fs::rename(src, dest) {
        Ok(()) => {
            trace!(src = %src.display(), dest = %dest.display(), "renamed");
            Ok(())
        }
        Err(e) if is_cross_device(&e) => Err(Error::CrossDevice {
            src: src.to_path_buf(),
            dest: dest.to_path_buf(),
        }),
        Err(e) => Err(Error::io("rename", dest, e)),
    }
}
