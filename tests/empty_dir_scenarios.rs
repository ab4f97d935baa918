use std::fs;
use tempfile::tempdir;
use treekit::{ErrorKind, empty_dir};

#[test]
fn removes_every_child_keeps_dir() -> Result<(), Box<dyn std::error::Error>> {
    let td = tempdir()?;
    let d = td.path().join("cache");
    fs::create_dir_all(d.join("a/b/c"))?;
    fs::write(d.join("top.txt"), "x")?;
    fs::write(d.join("a/b/c/leaf"), "y")?;
    for i in 0..32 {
        fs::write(d.join(format!("f{i}")), "z")?;
    }

    empty_dir(&d)?;
    assert!(d.is_dir());
    assert_eq!(fs::read_dir(&d)?.count(), 0);
    Ok(())
}

#[test]
fn missing_dir_is_created() -> Result<(), Box<dyn std::error::Error>> {
    let td = tempdir()?;
    let d = td.path().join("x/y/z");
    empty_dir(&d)?;
    assert!(d.is_dir());
    Ok(())
}

#[test]
fn already_empty_is_noop() -> Result<(), Box<dyn std::error::Error>> {
    let td = tempdir()?;
    empty_dir(td.path())?;
    empty_dir(td.path())?;
    assert!(td.path().is_dir());
    Ok(())
}

#[test]
fn file_is_type_mismatch_and_untouched() {
    let td = tempdir().unwrap();
    let f = td.path().join("f.txt");
    fs::write(&f, "keep").unwrap();
    let err = empty_dir(&f).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::TypeMismatch);
    assert_eq!(fs::read_to_string(&f).unwrap(), "keep");
}

#[cfg(unix)]
#[test]
fn symlinked_child_is_unlinked_not_followed() -> Result<(), Box<dyn std::error::Error>> {
    let td = tempdir()?;
    let outside = td.path().join("outside");
    fs::create_dir(&outside)?;
    fs::write(outside.join("precious"), "p")?;
    let d = td.path().join("d");
    fs::create_dir(&d)?;
    std::os::unix::fs::symlink(&outside, d.join("link"))?;

    empty_dir(&d)?;
    assert_eq!(fs::read_dir(&d)?.count(), 0);
    assert_eq!(fs::read_to_string(outside.join("precious"))?, "p");
    Ok(())
}
