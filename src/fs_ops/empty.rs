//! Directory emptying: leave the directory in place with nothing in it.

use rayon::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::errors::{Error, Result};

use super::mkdirp::create_dir_tree;
use super::probe::{PathKind, absolutize, probe, probe_follow};
use super::remove::remove_tree;

/// Make sure `dir` exists and is empty. A missing `dir` is created with default
/// permissions. Children are removed concurrently; the first failure wins.
pub fn empty_dir(dir: impl AsRef<Path>) -> Result<()> {
    let dir = absolutize(dir.as_ref())?;
    let Some(children) = children_or_create(&dir)? else {
        return Ok(());
    };
    let count = children.len();
    children.par_iter().try_for_each(|child| remove_tree(child))?;
    debug!(path = %dir.display(), removed = count, "emptied directory");
    Ok(())
}

/// Direct children of `dir`, or `None` once a missing `dir` has been created.
pub(crate) fn children_or_create(dir: &Path) -> Result<Option<Vec<PathBuf>>> {
    match probe_follow(dir)? {
        None => {
            create_dir_tree(dir, None)?;
            debug!(path = %dir.display(), "created missing directory");
            Ok(None)
        }
        Some(st) if st.is_dir() => {
            let rd = fs::read_dir(dir).map_err(|e| Error::io("read directory", dir, e))?;
            let children = rd
                .map(|entry| {
                    entry
                        .map(|e| e.path())
                        .map_err(|e| Error::io("read directory", dir, e))
                })
                .collect::<Result<Vec<_>>>()?;
            Ok(Some(children))
        }
        Some(_) => {
            let found = probe(dir)?.map_or(PathKind::Other, |st| st.kind);
            Err(Error::TypeMismatch {
                op: "empty directory",
                path: dir.to_path_buf(),
                expected: PathKind::Dir,
                found,
            })
        }
    }
}
