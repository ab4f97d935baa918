//! Application orchestrator.
//! Loads/merges config, initializes logging and runs the requested subcommand.

use anyhow::{Result, bail};
use std::io::Read;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{debug, error};

use treekit::config::{CONFIG_ENV, Config, default_config_path, load_config};
use treekit::{Error, ErrorKind, JsonWriteOptions};

use crate::cli::{Args, Command};
use crate::logging::init_tracing;
use crate::output as out;

/// Run the CLI application.
pub fn run(args: Args) -> Result<ExitCode> {
    // Handle --print-config before logging init
    if args.print_config {
        print_config_location(&args);
        return Ok(ExitCode::SUCCESS);
    }
    let Some(command) = args.command.clone() else {
        bail!("no subcommand given; run `treekit --help` for usage");
    };

    // Build config (may read XML). CLI args override config values.
    let (mut cfg, cfg_path) = load_config(args.config.as_deref())?;
    args.apply_overrides(&mut cfg);

    // Held until return so the file appender flushes.
    let _guard = init_tracing(&cfg.log_level, cfg.log_file.as_deref(), args.json).inspect_err(|e| {
        out::print_error(&format!("Failed to initialize logging: {e}"));
    })?;
    if let Some(p) = &cfg_path {
        debug!(path = %p.display(), "using config file");
    }
    debug!(?command, ?cfg, "starting treekit");

    match execute(&command, &cfg) {
        Ok(code) => Ok(code),
        Err(e) => {
            log_failure(&e);
            Err(e.into())
        }
    }
}

fn execute(command: &Command, cfg: &Config) -> treekit::Result<ExitCode> {
    match command {
        Command::Copy { src, dest, .. } => {
            treekit::copy(src, dest, &cfg.copy_options())?;
            out::print_user(&format!("Copied {} -> {}", src.display(), dest.display()));
        }
        Command::Move { src, dest, .. } => {
            treekit::move_path(src, dest, &cfg.move_options())?;
            out::print_user(&format!("Moved {} -> {}", src.display(), dest.display()));
        }
        Command::Remove { path } => {
            treekit::remove(path)?;
            out::print_user(&format!("Removed {}", path.display()));
        }
        Command::Mkdirp { path, .. } => {
            match cfg.dir_mode {
                Some(mode) => treekit::ensure_dir_mode(path, mode)?,
                None => treekit::ensure_dir(path)?,
            }
            out::print_user(&format!("Directory ready: {}", path.display()));
        }
        Command::Empty { path } => {
            treekit::empty_dir(path)?;
            out::print_user(&format!("Emptied {}", path.display()));
        }
        Command::EnsureFile { path } => {
            treekit::ensure_file(path)?;
            out::print_user(&format!("File ready: {}", path.display()));
        }
        Command::ReadJson { path } => {
            let value: serde_json::Value = treekit::read_json(path)?;
            let text = treekit::Codec::encode(&treekit::JsonCodec, &value, &cfg.json_indent)
                .map_err(|source| Error::Serialize {
                    path: path.clone(),
                    source,
                })?;
            print!("{text}");
        }
        Command::WriteJson {
            path, value, mode, ..
        } => {
            let text = match value {
                Some(v) => v.clone(),
                None => read_stdin()?,
            };
            let parsed: serde_json::Value =
                serde_json::from_str(&text).map_err(|e| Error::Parse {
                    path: PathBuf::from("<input>"),
                    source: Box::new(e),
                })?;
            let opts = JsonWriteOptions {
                mode: *mode,
                ..cfg.json_options()
            };
            treekit::write_json(path, &parsed, &opts)?;
            out::print_user(&format!("Wrote {}", path.display()));
        }
        Command::Dive { root } => {
            for entry in treekit::dive(root)? {
                out::print_user(&entry?.display().to_string());
            }
        }
        Command::Exists { path } => {
            let exists = treekit::path_exists(path)?;
            out::print_user(if exists { "true" } else { "false" });
            if !exists {
                return Ok(ExitCode::from(1));
            }
        }
    }
    Ok(ExitCode::SUCCESS)
}

fn read_stdin() -> treekit::Result<String> {
    let mut buf = String::new();
    std::io::stdin()
        .read_to_string(&mut buf)
        .map_err(|e| Error::Io {
            op: "read",
            path: PathBuf::from("<stdin>"),
            source: e,
        })?;
    Ok(buf)
}

fn log_failure(e: &Error) {
    let path = e.path().map(|p| p.display().to_string()).unwrap_or_default();
    match e.kind() {
        ErrorKind::NotFound => error!(kind = "not_found", %path, "Operation failed"),
        ErrorKind::AlreadyExists => {
            error!(kind = "already_exists", %path, "Operation failed; pass --overwrite to replace")
        }
        ErrorKind::TypeMismatch => error!(kind = "type_mismatch", %path, error = %e, "Operation failed"),
        ErrorKind::SelfReferential => error!(kind = "self_referential", %path, "Operation failed"),
        ErrorKind::CrossDevice => error!(kind = "cross_device", %path, "Operation failed"),
        ErrorKind::Parse => error!(kind = "parse", %path, error = %e, "Operation failed"),
        ErrorKind::Serialize => error!(kind = "serialize", %path, error = %e, "Operation failed"),
        ErrorKind::Underlying => error!(kind = "io", %path, error = %e, "Operation failed"),
        ErrorKind::Interrupted => error!(kind = "interrupted", "Operation aborted"),
    }
}

fn print_config_location(args: &Args) {
    if let Some(p) = &args.config {
        out::print_info(&format!("Using --config (explicit):\n  {}\n", p.display()));
        return;
    }
    if let Ok(cfg_env) = std::env::var(CONFIG_ENV) {
        out::print_info(&format!("Using {CONFIG_ENV} (explicit):\n  {cfg_env}\n"));
        out::print_info(&format!("To override, unset {CONFIG_ENV} or pass --config."));
        return;
    }
    match default_config_path() {
        Some(p) => {
            out::print_info(&format!("Default treekit config path:\n  {}\n", p.display()));
            if p.exists() {
                out::print_info("A config file exists at that location.");
            } else {
                out::print_info("No config file exists there; built-in defaults apply.");
            }
        }
        None => out::print_error("Could not determine a default config path"),
    }
}
