//! Config module.
//! Per-call option records for the library, plus the XML-backed defaults the
//! command line reads.

pub mod options;
pub mod paths;
pub mod types;
pub mod xml;

pub use options::{CopyOptions, Indent, JsonWriteOptions, MoveOptions, Replacer};
pub use paths::{CONFIG_ENV, default_config_path, path_has_symlink_ancestor, resolve_config_path};
pub use types::{Config, LogLevel};
pub use xml::{load_config, load_config_from_xml_path, parse_mode};
