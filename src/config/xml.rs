//! XML configuration support.
//! Loads defaults for the command line from a `config.xml` (quick_xml + serde).
//!
//! ```xml
//! <config>
//!   <overwrite>false</overwrite>
//!   <preserve_timestamps>true</preserve_timestamps>
//!   <dir_mode>755</dir_mode>
//!   <json_indent>2</json_indent>
//!   <log_level>info</log_level>
//!   <log_file>/var/log/treekit.log</log_file>
//! </config>
//! ```
//!
//! Unknown elements are rejected so typos surface instead of being ignored.

use anyhow::{Context, Result, anyhow};
use quick_xml::de::from_str as from_xml_str;
use serde::{Deserialize, Deserializer};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use super::options::Indent;
use super::paths::resolve_config_path;
use super::types::{Config, LogLevel};

/// Struct mirroring the XML config for deserialization.
#[derive(Debug, Default, Deserialize)]
#[serde(rename = "config", default, deny_unknown_fields)]
struct XmlConfig {
    #[serde(deserialize_with = "de_bool_trimmed_opt")]
    overwrite: Option<bool>,
    /// Legacy spelling of `overwrite`.
    #[serde(deserialize_with = "de_bool_trimmed_opt")]
    clobber: Option<bool>,
    #[serde(deserialize_with = "de_bool_trimmed_opt")]
    preserve_timestamps: Option<bool>,
    dir_mode: Option<String>,
    json_indent: Option<String>,
    log_level: Option<String>,
    log_file: Option<String>,
}

fn de_bool_trimmed_opt<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt: Option<String> = Option::deserialize(deserializer)?;
    match opt.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(s) => match s.to_ascii_lowercase().as_str() {
            "true" | "1" | "yes" => Ok(Some(true)),
            "false" | "0" | "no" => Ok(Some(false)),
            other => Err(serde::de::Error::custom(format!("invalid boolean: '{other}'"))),
        },
    }
}

/// Parse an octal mode such as `755`, `0755` or `0o755`.
pub fn parse_mode(s: &str) -> Result<u32> {
    let t = s.trim();
    let digits = t.strip_prefix("0o").unwrap_or(t);
    let mode = u32::from_str_radix(digits, 8).map_err(|_| anyhow!("invalid octal mode: '{s}'"))?;
    if mode > 0o7777 {
        return Err(anyhow!("mode out of range: '{s}'"));
    }
    Ok(mode)
}

fn trimmed(s: Option<String>) -> Option<String> {
    s.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

// Map XmlConfig -> Config
fn xml_to_config(parsed: XmlConfig) -> Result<Config> {
    let mut cfg = Config::default();

    // `overwrite` wins over the legacy spelling when both are present.
    cfg.overwrite = parsed.overwrite.or(parsed.clobber).unwrap_or(false);
    cfg.preserve_timestamps = parsed.preserve_timestamps.unwrap_or(false);
    cfg.dir_mode = trimmed(parsed.dir_mode).map(|s| parse_mode(&s)).transpose()?;
    if let Some(s) = trimmed(parsed.json_indent) {
        cfg.json_indent = s.parse::<Indent>().unwrap_or_default();
    }
    if let Some(s) = trimmed(parsed.log_level) {
        cfg.log_level = s.parse::<LogLevel>().map_err(|e| anyhow!(e))?;
    }
    cfg.log_file = trimmed(parsed.log_file).map(PathBuf::from);

    Ok(cfg)
}

/// Load a Config from a specific XML file path.
pub fn load_config_from_xml_path(path: &Path) -> Result<Config> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("read config xml '{}'", path.display()))?;
    if contents.trim().is_empty() {
        return Ok(Config::default());
    }
    let parsed: XmlConfig = from_xml_str(&contents)
        .with_context(|| format!("parse config xml '{}'", path.display()))?;
    xml_to_config(parsed).with_context(|| format!("invalid value in '{}'", path.display()))
}

/// Resolve and load the config file, if any. Returns the defaults and `None`
/// when no file applies.
pub fn load_config(explicit: Option<&Path>) -> Result<(Config, Option<PathBuf>)> {
    match resolve_config_path(explicit) {
        Some(path) => {
            debug!(path = %path.display(), "loading config");
            let cfg = load_config_from_xml_path(&path)?;
            Ok((cfg, Some(path)))
        }
        None => Ok((Config::default(), None)),
    }
}
