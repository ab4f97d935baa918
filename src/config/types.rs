//! Resolved command-line configuration.
//! - Config holds the defaults a `config.xml` can set for every subcommand.
//! - LogLevel represents verbosity with simple parsing helpers.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use super::options::{CopyOptions, Indent, JsonWriteOptions, MoveOptions};

/// Program-defined verbosity levels exposed to users/config.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogLevel {
    /// Only errors
    Quiet,
    /// Informational output (default)
    #[default]
    Normal,
    /// More info (like verbose)
    Info,
    /// Debug/trace
    Debug,
}

impl LogLevel {
    /// Parse common string names into our LogLevel (case-insensitive).
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "quiet" | "error" | "none" => Some(LogLevel::Quiet),
            "normal" => Some(LogLevel::Normal),
            "info" | "verbose" | "detailed" => Some(LogLevel::Info),
            "debug" | "trace" => Some(LogLevel::Debug),
            _ => None,
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            LogLevel::Quiet => "quiet",
            LogLevel::Normal => "normal",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
        };
        f.write_str(s)
    }
}

impl FromStr for LogLevel {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("invalid log level: '{s}'"))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Config {
    /// Replace existing destinations on copy/move.
    pub overwrite: bool,
    pub preserve_timestamps: bool,
    /// Mode for directories created by `mkdirp`; platform default when unset.
    pub dir_mode: Option<u32>,
    pub json_indent: Indent,
    /// Console verbosity
    pub log_level: LogLevel,
    /// Optional path to a log file
    pub log_file: Option<PathBuf>,
}

impl Config {
    pub fn copy_options(&self) -> CopyOptions {
        CopyOptions {
            overwrite: self.overwrite,
            preserve_timestamps: self.preserve_timestamps,
        }
    }

    pub fn move_options(&self) -> MoveOptions {
        MoveOptions {
            overwrite: self.overwrite,
        }
    }

    pub fn json_options(&self) -> JsonWriteOptions {
        JsonWriteOptions {
            indent: self.json_indent.clone(),
            ..JsonWriteOptions::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loglevel_parse_aliases() {
        assert_eq!(LogLevel::parse("ERROR"), Some(LogLevel::Quiet));
        assert_eq!(LogLevel::parse("verbose"), Some(LogLevel::Info));
        assert_eq!(LogLevel::parse("trace"), Some(LogLevel::Debug));
        assert_eq!(LogLevel::parse("loud"), None);
        assert!("loud".parse::<LogLevel>().unwrap_err().contains("loud"));
    }

    #[test]
    fn options_follow_config() {
        let cfg = Config {
            overwrite: true,
            ..Config::default()
        };
        assert!(cfg.copy_options().overwrite);
        assert!(!cfg.copy_options().preserve_timestamps);
        assert!(cfg.move_options().overwrite);
    }
}
