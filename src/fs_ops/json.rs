//! Whole-file structured persistence.
//!
//! Text encoding is pluggable through [`Codec`]; [`JsonCodec`] is the default.
//! Values travel as `serde_json::Value` (object key order preserved), so any
//! codec sees strings, numbers, booleans, null, ordered maps and sequences.

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::ser::PrettyFormatter;
use serde_json::{Map, Value};
use std::fs;
use std::path::Path;
use tracing::debug;

use crate::config::{Indent, JsonWriteOptions, Replacer};
use crate::errors::{BoxError, Error, Result};
use crate::platform;

use super::helpers::io_err;
use super::mkdirp::ensure_parent;
use super::probe::{absolutize, lstat};

/// Value <-> text conversion used by [`write_structured`] / [`read_structured`].
pub trait Codec: Send + Sync {
    fn encode(&self, value: &Value, indent: &Indent) -> std::result::Result<String, BoxError>;
    fn decode(&self, text: &str) -> std::result::Result<Value, BoxError>;
}

/// JSON text with configurable indentation and a trailing newline.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonCodec;

impl Codec for JsonCodec {
    fn encode(&self, value: &Value, indent: &Indent) -> std::result::Result<String, BoxError> {
        let unit = indent.unit();
        let mut out = if unit.is_empty() {
            serde_json::to_vec(value)?
        } else {
            let mut buf = Vec::new();
            let fmt = PrettyFormatter::with_indent(unit.as_bytes());
            let mut ser = serde_json::Serializer::with_formatter(&mut buf, fmt);
            value.serialize(&mut ser)?;
            buf
        };
        out.push(b'\n');
        Ok(String::from_utf8(out)?)
    }

    fn decode(&self, text: &str) -> std::result::Result<Value, BoxError> {
        // Tolerate a UTF-8 byte order mark written by some editors.
        let text = text.strip_prefix('\u{feff}').unwrap_or(text);
        Ok(serde_json::from_str(text)?)
    }
}

/// Encode `value` with `codec` and write it to `path`, replacing prior content.
/// Missing parent directories are created. `opts.mode` applies only when the
/// file did not exist before.
pub fn write_structured<C: Codec + ?Sized>(
    path: impl AsRef<Path>,
    value: &Value,
    opts: &JsonWriteOptions,
    codec: &C,
) -> Result<()> {
    let path = absolutize(path.as_ref())?;

    let replaced;
    let value = match &opts.replacer {
        Some(r) => {
            replaced = apply_replacer(r, "", value.clone()).unwrap_or(Value::Null);
            &replaced
        }
        None => value,
    };
    let text = codec.encode(value, &opts.indent).map_err(|source| Error::Serialize {
        path: path.clone(),
        source,
    })?;

    ensure_parent(&path)?;
    let existed = lstat(&path)?.is_some();
    fs::write(&path, text.as_bytes()).map_err(io_err("write file", &path))?;
    if let (false, Some(mode)) = (existed, opts.mode) {
        platform::apply_mode(&path, mode).map_err(io_err("set file mode", &path))?;
    }
    debug!(path = %path.display(), bytes = text.len(), "wrote structured file");
    Ok(())
}

/// Read `path` and decode it with `codec`.
/// Read failures (including absence) pass through as `Error::Io`; malformed
/// content is `Error::Parse`.
pub fn read_structured<C: Codec + ?Sized>(path: impl AsRef<Path>, codec: &C) -> Result<Value> {
    let path = absolutize(path.as_ref())?;
    let bytes = fs::read(&path).map_err(io_err("read file", &path))?;
    let text = match String::from_utf8(bytes) {
        Ok(text) => text,
        Err(e) => {
            return Err(Error::Parse {
                path,
                source: Box::new(e),
            });
        }
    };
    codec
        .decode(&text)
        .map_err(|source| Error::Parse { path, source })
}

/// Serialize any `T` as JSON into `path`.
pub fn write_json<T: Serialize + ?Sized>(
    path: impl AsRef<Path>,
    value: &T,
    opts: &JsonWriteOptions,
) -> Result<()> {
    let path = absolutize(path.as_ref())?;
    let value = serde_json::to_value(value).map_err(|e| Error::Serialize {
        path: path.clone(),
        source: Box::new(e),
    })?;
    write_structured(&path, &value, opts, &JsonCodec)
}

/// Read a JSON file into any `T`. A shape that does not fit `T` is a parse error.
pub fn read_json<T: DeserializeOwned>(path: impl AsRef<Path>) -> Result<T> {
    let path = absolutize(path.as_ref())?;
    let value = read_structured(&path, &JsonCodec)?;
    serde_json::from_value(value).map_err(|e| Error::Parse {
        path,
        source: Box::new(e),
    })
}

/// JSON.stringify-style transform: called with `""` for the root, then with
/// each property name or array index. `None` drops an object member and turns
/// an array element into `null`. The returned value is walked in turn.
fn apply_replacer(replacer: &Replacer, key: &str, value: Value) -> Option<Value> {
    let value = replacer(key, value)?;
    Some(match value {
        Value::Object(map) => Value::Object(
            map.into_iter()
                .filter_map(|(k, v)| apply_replacer(replacer, &k, v).map(|v| (k, v)))
                .collect::<Map<_, _>>(),
        ),
        Value::Array(items) => Value::Array(
            items
                .into_iter()
                .enumerate()
                .map(|(i, v)| apply_replacer(replacer, &i.to_string(), v).unwrap_or(Value::Null))
                .collect(),
        ),
        other => other,
    })
}
