//! Directory-walk producer.
//! Yields every regular file and symlink under a root, lazily, in file-name
//! order per directory. Links are listed, not followed. Calling [`dive`] again
//! restarts the walk. The tree operations never use it.

use std::io;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::errors::{Error, Result};

use super::probe::absolutize;

pub fn dive(root: impl AsRef<Path>) -> Result<impl Iterator<Item = Result<PathBuf>>> {
    let root = absolutize(root.as_ref())?;
    let walker = WalkDir::new(&root)
        .min_depth(1)
        .follow_links(false)
        .sort_by_file_name();
    Ok(walker.into_iter().filter_map(move |entry| match entry {
        Ok(e) if e.file_type().is_dir() => None,
        Ok(e) if e.file_type().is_file() || e.path_is_symlink() => Some(Ok(e.into_path())),
        Ok(_) => None,
        Err(err) => {
            let path = err.path().map_or_else(|| root.clone(), Path::to_path_buf);
            let source = err
                .into_io_error()
                .unwrap_or_else(|| io::Error::other("filesystem loop detected"));
            Some(Err(Error::io("walk directory", path, source)))
        }
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn lists_files_depth_first_sorted() {
        let td = tempdir().unwrap();
        fs::create_dir_all(td.path().join("b/c")).unwrap();
        fs::write(td.path().join("a.txt"), b"").unwrap();
        fs::write(td.path().join("b/c/d.txt"), b"").unwrap();
        fs::write(td.path().join("b/z.txt"), b"").unwrap();

        let got: Vec<_> = dive(td.path())
            .unwrap()
            .map(|p| p.unwrap().strip_prefix(td.path()).unwrap().to_path_buf())
            .collect();
        assert_eq!(
            got,
            vec![
                PathBuf::from("a.txt"),
                PathBuf::from("b/c/d.txt"),
                PathBuf::from("b/z.txt"),
            ]
        );
    }

    #[test]
    fn missing_root_yields_error() {
        let td = tempdir().unwrap();
        let mut it = dive(td.path().join("nope")).unwrap();
        assert!(it.next().unwrap().is_err());
    }
}
