use serial_test::serial;
use std::env;
use std::fs;
use tempfile::tempdir;
use treekit::Indent;
use treekit::config::{CONFIG_ENV, LogLevel, load_config};

struct EnvGuard(Option<std::ffi::OsString>);

impl EnvGuard {
    fn set(value: &std::path::Path) -> Self {
        let prev = env::var_os(CONFIG_ENV);
        unsafe { env::set_var(CONFIG_ENV, value) };
        EnvGuard(prev)
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        match self.0.take() {
            Some(v) => unsafe { env::set_var(CONFIG_ENV, v) },
            None => unsafe { env::remove_var(CONFIG_ENV) },
        }
    }
}

#[test]
#[serial]
fn env_var_config_is_loaded() -> Result<(), Box<dyn std::error::Error>> {
    let td = tempdir()?;
    let p = td.path().join("cfg.xml");
    fs::write(
        &p,
        "<config><clobber>yes</clobber><json_indent>tab</json_indent><log_level>quiet</log_level></config>",
    )?;
    let _g = EnvGuard::set(&p);

    let (cfg, used) = load_config(None)?;
    assert_eq!(used.as_deref(), Some(p.as_path()));
    assert!(cfg.overwrite);
    assert_eq!(cfg.json_indent, Indent::Text("\t".into()));
    assert_eq!(cfg.log_level, LogLevel::Quiet);
    Ok(())
}

#[test]
#[serial]
fn explicit_path_beats_env() -> Result<(), Box<dyn std::error::Error>> {
    let td = tempdir()?;
    let env_cfg = td.path().join("env.xml");
    let flag_cfg = td.path().join("flag.xml");
    fs::write(&env_cfg, "<config><overwrite>true</overwrite></config>")?;
    fs::write(&flag_cfg, "<config><overwrite>false</overwrite></config>")?;
    let _g = EnvGuard::set(&env_cfg);

    let (cfg, used) = load_config(Some(&flag_cfg))?;
    assert_eq!(used.as_deref(), Some(flag_cfg.as_path()));
    assert!(!cfg.overwrite);
    Ok(())
}

#[test]
#[serial]
fn missing_explicit_file_is_an_error() {
    let td = tempdir().unwrap();
    let _g = EnvGuard::set(&td.path().join("nope.xml"));
    assert!(load_config(None).is_err());
}

#[test]
#[serial]
fn unknown_element_is_rejected() {
    let td = tempdir().unwrap();
    let p = td.path().join("cfg.xml");
    fs::write(&p, "<config><overwirte>true</overwirte></config>").unwrap();
    let _g = EnvGuard::set(&p);
    let err = load_config(None).unwrap_err();
    assert!(format!("{err:#}").contains("cfg.xml"), "err was: {err:#}");
}
