//! Non-blocking variants of every tree operation.
//!
//! Each one runs the blocking implementation on tokio's blocking pool, so both
//! entry points share one algorithm and produce identical trees.
//! `empty_dir` dispatches each child removal as its own task.
//!
//! Dropping a returned future does not stop work already handed to the pool.

use futures::future::try_join_all;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::path::{Path, PathBuf};
use tokio::task;

use crate::config::{CopyOptions, JsonWriteOptions, MoveOptions};
use crate::errors::{Error, Result};
use crate::fs_ops::{self, PathStat, children_or_create, probe::absolutize, remove::remove_tree};

async fn run_blocking<T, F>(f: F) -> Result<T>
where
    F: FnOnce() -> Result<T> + Send + 'static,
    T: Send + 'static,
{
    match task::spawn_blocking(f).await {
        Ok(res) => res,
        Err(e) if e.is_panic() => std::panic::resume_unwind(e.into_panic()),
        Err(_) => Err(Error::Interrupted),
    }
}

fn owned(p: impl AsRef<Path>) -> PathBuf {
    p.as_ref().to_path_buf()
}

pub async fn probe(path: impl AsRef<Path>) -> Result<Option<PathStat>> {
    let path = owned(path);
    run_blocking(move || fs_ops::probe(&path)).await
}

pub async fn path_exists(path: impl AsRef<Path>) -> Result<bool> {
    let path = owned(path);
    run_blocking(move || fs_ops::path_exists(&path)).await
}

pub async fn ensure_dir(path: impl AsRef<Path>) -> Result<()> {
    let path = owned(path);
    run_blocking(move || fs_ops::ensure_dir(&path)).await
}

pub async fn ensure_dir_mode(path: impl AsRef<Path>, mode: u32) -> Result<()> {
    let path = owned(path);
    run_blocking(move || fs_ops::ensure_dir_mode(&path, mode)).await
}

pub async fn ensure_file(path: impl AsRef<Path>) -> Result<()> {
    let path = owned(path);
    run_blocking(move || fs_ops::ensure_file(&path)).await
}

pub async fn output_file(path: impl AsRef<Path>, contents: impl Into<Vec<u8>>) -> Result<()> {
    let (path, contents) = (owned(path), contents.into());
    run_blocking(move || fs_ops::output_file(&path, contents)).await
}

pub async fn copy(src: impl AsRef<Path>, dest: impl AsRef<Path>, opts: &CopyOptions) -> Result<()> {
    let (src, dest, opts) = (owned(src), owned(dest), *opts);
    run_blocking(move || fs_ops::copy(&src, &dest, &opts)).await
}

pub async fn move_path(
    src: impl AsRef<Path>,
    dest: impl AsRef<Path>,
    opts: &MoveOptions,
) -> Result<()> {
    let (src, dest, opts) = (owned(src), owned(dest), *opts);
    run_blocking(move || fs_ops::move_path(&src, &dest, &opts)).await
}

pub async fn remove(path: impl AsRef<Path>) -> Result<()> {
    let path = owned(path);
    run_blocking(move || fs_ops::remove(&path)).await
}

pub async fn empty_dir(dir: impl AsRef<Path>) -> Result<()> {
    let dir = absolutize(dir.as_ref())?;
    let Some(children) = run_blocking(move || children_or_create(&dir)).await? else {
        return Ok(());
    };
    try_join_all(
        children
            .into_iter()
            .map(|child| run_blocking(move || remove_tree(&child))),
    )
    .await?;
    Ok(())
}

pub async fn write_structured(
    path: impl AsRef<Path>,
    value: Value,
    opts: &JsonWriteOptions,
) -> Result<()> {
    let (path, opts) = (owned(path), opts.clone());
    run_blocking(move || fs_ops::write_structured(&path, &value, &opts, &fs_ops::JsonCodec)).await
}

pub async fn read_structured(path: impl AsRef<Path>) -> Result<Value> {
    let path = owned(path);
    run_blocking(move || fs_ops::read_structured(&path, &fs_ops::JsonCodec)).await
}

pub async fn write_json<T: Serialize + ?Sized>(
    path: impl AsRef<Path>,
    value: &T,
    opts: &JsonWriteOptions,
) -> Result<()> {
    // Serialize on the caller's side; `T` need not be `Send`.
    let path = absolutize(path.as_ref())?;
    let value = serde_json::to_value(value).map_err(|e| Error::Serialize {
        path: path.clone(),
        source: Box::new(e),
    })?;
    write_structured(path, value, opts).await
}

pub async fn read_json<T: DeserializeOwned + Send + 'static>(path: impl AsRef<Path>) -> Result<T> {
    let path = owned(path);
    run_blocking(move || fs_ops::read_json(&path)).await
}
