use std::io;

use treekit::fs_ops::hint;

#[test]
fn notfound_kind_hint() {
    let h = hint(&io::Error::from(io::ErrorKind::NotFound));
    assert!(h.contains("path not found"), "hint was: {h}");
}

#[cfg(unix)]
#[test]
fn erofs_hint_present() {
    let h = hint(&io::Error::from_raw_os_error(libc::EROFS));
    assert!(h.contains("read-only filesystem"), "hint was: {h}");
}

#[cfg(unix)]
#[test]
fn loop_and_name_too_long_hints() {
    let m1 = hint(&io::Error::from_raw_os_error(libc::ELOOP));
    let m2 = hint(&io::Error::from_raw_os_error(libc::ENAMETOOLONG));
    assert!(m1.contains("symlink cycle"));
    assert!(m2.contains("too long"));
}

#[cfg(unix)]
#[test]
fn cross_device_hint() {
    let h = hint(&io::Error::from_raw_os_error(libc::EXDEV));
    assert!(h.contains("cross-filesystem"), "hint was: {h}");
    assert!(h.contains(&format!("os code: {}", libc::EXDEV)));
}

#[test]
fn error_display_includes_hint() {
    let td = tempfile::tempdir().unwrap();
    let missing = td.path().join("missing.json");
    let err = treekit::read_structured(&missing, &treekit::JsonCodec).unwrap_err();
    let msg = err.to_string();
    assert!(msg.starts_with("read file"), "msg was: {msg}");
    assert!(msg.contains("missing.json"));
    assert!(msg.contains("path not found"), "msg was: {msg}");
}
