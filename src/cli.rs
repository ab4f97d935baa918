//! CLI definition and parsing.
//! Defines Args and provides parse() for command-line handling.
//!
//! Notes:
//! - `--debug` is a shorthand for `--log-level debug`.
//! - `--clobber` is accepted as a legacy alias of `--overwrite`.
//! - Flags override values from config.xml.

use clap::{Args as ClapArgs, Parser, Subcommand, ValueHint};
use std::path::PathBuf;

use treekit::config::{Config, Indent, LogLevel, parse_mode};

/// Recursive filesystem tree operations.
#[derive(Parser, Debug, Clone)]
#[command(author, version, about = "Copy, move, create, empty and remove directory trees")]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Config file to read (otherwise $TREEKIT_CONFIG, then the platform default).
    #[arg(long, global = true, value_name = "FILE", value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    /// Enable debug logging (equivalent to `--log-level debug`).
    #[arg(short = 'd', long, global = true)]
    pub debug: bool,

    /// Set log level. One of: quiet, normal, info, debug.
    #[arg(long, global = true, value_name = "LEVEL")]
    pub log_level: Option<String>,

    /// Also append logs to this file.
    #[arg(long, global = true, value_name = "FILE", value_hint = ValueHint::FilePath)]
    pub log_file: Option<PathBuf>,

    /// Emit logs in structured JSON.
    #[arg(long, global = true)]
    pub json: bool,

    /// Print the config file location treekit would use, then exit.
    #[arg(long)]
    pub print_config: bool,
}

#[derive(ClapArgs, Debug, Clone, Default)]
pub struct OverwriteFlag {
    /// Replace existing destination entries.
    #[arg(long, visible_alias = "clobber")]
    pub overwrite: bool,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Copy a file or directory tree (merges into existing directories).
    Copy {
        #[arg(value_hint = ValueHint::AnyPath)]
        src: PathBuf,
        #[arg(value_hint = ValueHint::AnyPath)]
        dest: PathBuf,
        #[command(flatten)]
        overwrite: OverwriteFlag,
        /// Carry access/modification times over from the source.
        #[arg(long)]
        preserve_timestamps: bool,
    },
    /// Move a file or directory tree.
    Move {
        #[arg(value_hint = ValueHint::AnyPath)]
        src: PathBuf,
        #[arg(value_hint = ValueHint::AnyPath)]
        dest: PathBuf,
        #[command(flatten)]
        overwrite: OverwriteFlag,
    },
    /// Remove a path and everything beneath it. Missing paths are not an error.
    Remove {
        #[arg(value_hint = ValueHint::AnyPath)]
        path: PathBuf,
    },
    /// Create a directory and any missing parents.
    Mkdirp {
        #[arg(value_hint = ValueHint::DirPath)]
        path: PathBuf,
        /// Octal mode for created directories, e.g. 755.
        #[arg(long, value_parser = parse_mode_arg)]
        mode: Option<u32>,
    },
    /// Ensure a directory exists and is empty.
    Empty {
        #[arg(value_hint = ValueHint::DirPath)]
        path: PathBuf,
    },
    /// Create an empty file (and parents) if it does not exist.
    EnsureFile {
        #[arg(value_hint = ValueHint::FilePath)]
        path: PathBuf,
    },
    /// Print a JSON file, re-encoded with the configured indentation.
    ReadJson {
        #[arg(value_hint = ValueHint::FilePath)]
        path: PathBuf,
    },
    /// Write JSON text (argument or stdin) to a file, creating parents.
    WriteJson {
        #[arg(value_hint = ValueHint::FilePath)]
        path: PathBuf,
        /// JSON text; read from stdin when omitted.
        value: Option<String>,
        /// Spaces per level, or literal text such as "tab".
        #[arg(long)]
        indent: Option<Indent>,
        /// Octal mode for a newly created file.
        #[arg(long, value_parser = parse_mode_arg)]
        mode: Option<u32>,
    },
    /// List files and symlinks beneath a directory.
    Dive {
        #[arg(value_hint = ValueHint::DirPath)]
        root: PathBuf,
    },
    /// Exit 0 when the path exists, 1 otherwise.
    Exists {
        #[arg(value_hint = ValueHint::AnyPath)]
        path: PathBuf,
    },
}

fn parse_mode_arg(s: &str) -> Result<u32, String> {
    parse_mode(s).map_err(|e| e.to_string())
}

impl Args {
    /// Effective log level derived from flags.
    /// Precedence: --debug > --log-level value > None (use config default).
    pub fn effective_log_level(&self) -> Option<LogLevel> {
        if self.debug {
            return Some(LogLevel::Debug);
        }
        self.log_level.as_deref().and_then(LogLevel::parse)
    }

    /// Apply CLI overrides to a loaded Config (in-place). No-ops for unset flags.
    pub fn apply_overrides(&self, cfg: &mut Config) {
        if let Some(level) = self.effective_log_level() {
            cfg.log_level = level;
        }
        if let Some(file) = &self.log_file {
            cfg.log_file = Some(file.clone());
        }
        match &self.command {
            Some(Command::Copy {
                overwrite,
                preserve_timestamps,
                ..
            }) => {
                cfg.overwrite |= overwrite.overwrite;
                cfg.preserve_timestamps |= *preserve_timestamps;
            }
            Some(Command::Move { overwrite, .. }) => cfg.overwrite |= overwrite.overwrite,
            Some(Command::Mkdirp { mode: Some(m), .. }) => cfg.dir_mode = Some(*m),
            Some(Command::WriteJson {
                indent: Some(i), ..
            }) => cfg.json_indent = i.clone(),
            _ => {}
        }
    }
}

pub fn parse() -> Args {
    Args::parse()
}
