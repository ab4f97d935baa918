use std::fs;
use std::path::Path;
use tempfile::tempdir;
use treekit::{CopyOptions, copy};
use walkdir::WalkDir;

fn files_under(root: &Path) -> Vec<(std::path::PathBuf, Vec<u8>)> {
    let mut out: Vec<_> = WalkDir::new(root)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|e| e.file_type().is_file())
        .map(|e| {
            let rel = e.path().strip_prefix(root).unwrap().to_path_buf();
            (rel, fs::read(e.path()).unwrap())
        })
        .collect();
    out.sort();
    out
}

#[test]
fn copy_two_dirs_into_same_dest_unions_contents() -> Result<(), Box<dyn std::error::Error>> {
    let td = tempdir()?;
    let a = td.path().join("A");
    let b = td.path().join("B");
    let c = td.path().join("C");
    fs::create_dir_all(&a)?;
    fs::create_dir_all(&b)?;
    fs::write(a.join("one.txt"), "one")?;
    fs::write(a.join("two.txt"), "two")?;
    fs::write(b.join("three.txt"), "three")?;
    fs::write(b.join("four.txt"), "four")?;

    copy(&a, &c, &CopyOptions::default())?;
    copy(&b, &c, &CopyOptions::default())?;

    let mut names: Vec<_> = fs::read_dir(&c)?
        .map(|e| e.map(|e| e.file_name().to_string_lossy().into_owned()))
        .collect::<Result<_, _>>()?;
    names.sort();
    assert_eq!(names, vec!["four.txt", "one.txt", "three.txt", "two.txt"]);
    assert_eq!(fs::read_to_string(c.join("three.txt"))?, "three");
    Ok(())
}

#[test]
fn copy_tree_reproduces_every_file() -> Result<(), Box<dyn std::error::Error>> {
    let td = tempdir()?;
    let src = td.path().join("src");
    fs::create_dir_all(src.join("deep/er/still"))?;
    fs::create_dir_all(src.join("empty_dir"))?;
    fs::write(src.join("root.bin"), [0u8, 1, 2, 255])?;
    fs::write(src.join("deep/a.txt"), "a")?;
    fs::write(src.join("deep/er/b.txt"), "")?;
    for i in 0..50 {
        fs::write(src.join(format!("deep/er/still/n{i}.txt")), format!("n{i}"))?;
    }

    let dest = td.path().join("out/dest");
    copy(&src, &dest, &CopyOptions::default())?;

    assert_eq!(files_under(&src), files_under(&dest));
    assert!(dest.join("empty_dir").is_dir());
    Ok(())
}

#[test]
fn merge_keeps_unrelated_destination_files() -> Result<(), Box<dyn std::error::Error>> {
    let td = tempdir()?;
    let src = td.path().join("src");
    let dest = td.path().join("dest");
    fs::create_dir_all(src.join("sub"))?;
    fs::create_dir_all(dest.join("sub"))?;
    fs::write(src.join("sub/new.txt"), "new")?;
    fs::write(dest.join("sub/old.txt"), "old")?;
    fs::write(dest.join("unrelated.txt"), "keep")?;

    copy(&src, &dest, &CopyOptions::default())?;

    assert_eq!(fs::read_to_string(dest.join("sub/new.txt"))?, "new");
    assert_eq!(fs::read_to_string(dest.join("sub/old.txt"))?, "old");
    assert_eq!(fs::read_to_string(dest.join("unrelated.txt"))?, "keep");
    Ok(())
}

#[test]
fn overwrite_replaces_conflicting_files_only() -> Result<(), Box<dyn std::error::Error>> {
    let td = tempdir()?;
    let src = td.path().join("src");
    let dest = td.path().join("dest");
    fs::create_dir_all(&src)?;
    fs::create_dir_all(&dest)?;
    fs::write(src.join("same.txt"), "fresh")?;
    fs::write(dest.join("same.txt"), "stale")?;
    fs::write(dest.join("other.txt"), "other")?;

    copy(&src, &dest, &CopyOptions::default().with_overwrite(true))?;

    assert_eq!(fs::read_to_string(dest.join("same.txt"))?, "fresh");
    assert_eq!(fs::read_to_string(dest.join("other.txt"))?, "other");
    Ok(())
}
