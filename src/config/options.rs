//! Per-call option records.
//! Legacy spellings (`clobber`, `preserveTimestamps`) are accepted at the serde
//! boundary and folded into the canonical fields, so the engine only ever sees
//! `overwrite` / `preserve_timestamps`.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CopyOptions {
    /// Replace existing destination files.
    #[serde(alias = "clobber")]
    pub overwrite: bool,
    /// Copy atime/mtime from source entries (best-effort).
    #[serde(alias = "preserveTimestamps")]
    pub preserve_timestamps: bool,
}

impl CopyOptions {
    /// Builder for callers still passing the legacy `clobber` flag.
    pub fn with_clobber(mut self, clobber: bool) -> Self {
        self.overwrite = clobber;
        self
    }

    pub fn with_overwrite(mut self, overwrite: bool) -> Self {
        self.overwrite = overwrite;
        self
    }

    pub fn with_preserve_timestamps(mut self, preserve: bool) -> Self {
        self.preserve_timestamps = preserve;
        self
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MoveOptions {
    #[serde(alias = "clobber")]
    pub overwrite: bool,
}

/// Indentation unit for structured output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Indent {
    /// That many spaces per level, at most 10. Zero means compact output.
    Spaces(usize),
    /// A literal unit such as `"\t"`, truncated to 10 characters. Empty means compact.
    Text(String),
}

const MAX_INDENT: usize = 10;

impl Indent {
    /// The per-level indentation string; empty for compact output.
    pub fn unit(&self) -> String {
        match self {
            Indent::Spaces(n) => " ".repeat((*n).min(MAX_INDENT)),
            Indent::Text(s) => s.chars().take(MAX_INDENT).collect(),
        }
    }
}

impl Default for Indent {
    fn default() -> Self {
        Indent::Spaces(2)
    }
}

impl FromStr for Indent {
    type Err = std::convert::Infallible;

    /// `"4"` -> four spaces, `"tab"` -> a tab, anything else is taken literally.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Ok(n) = s.trim().parse::<usize>() {
            return Ok(Indent::Spaces(n));
        }
        Ok(match s {
            "tab" | "\\t" => Indent::Text("\t".into()),
            other => Indent::Text(other.to_string()),
        })
    }
}

impl fmt::Display for Indent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Indent::Spaces(n) => write!(f, "{n}"),
            Indent::Text(s) if s == "\t" => f.write_str("tab"),
            Indent::Text(s) => write!(f, "{s:?}"),
        }
    }
}

/// Per-key value transform applied before encoding. See
/// [`write_structured`](crate::fs_ops::write_structured) for the call order.
pub type Replacer = Arc<dyn Fn(&str, Value) -> Option<Value> + Send + Sync>;

#[derive(Clone, Default)]
pub struct JsonWriteOptions {
    pub indent: Indent,
    /// Permission bits for a newly created file.
    pub mode: Option<u32>,
    pub replacer: Option<Replacer>,
}

impl fmt::Debug for JsonWriteOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JsonWriteOptions")
            .field("indent", &self.indent)
            .field("mode", &self.mode.map(|m| format!("{m:o}")))
            .field("replacer", &self.replacer.as_ref().map(|_| "<fn>"))
            .finish()
    }
}
