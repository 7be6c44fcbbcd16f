//! Atomic replacement of the patient document.
//!
//! The new document is written to a hidden temporary file beside the target
//! and renamed over it, so readers never observe a partial write.

use std::io::{self, Write};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use camino::{Utf8Component, Utf8Path};
use cap_std::fs::{Dir, OpenOptions};

use crate::domain::ports::PatientRepositoryError;

static TEMP_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Replace `file_name` inside `dir` with `contents`.
///
/// `file_name` must be a single normal path component.
pub(crate) fn write_atomic(
    dir: &Dir,
    file_name: &Utf8Path,
    contents: &str,
) -> Result<(), PatientRepositoryError> {
    let mut components = file_name.components();
    let (Some(Utf8Component::Normal(target)), None) = (components.next(), components.next())
    else {
        return Err(PatientRepositoryError::io(format!(
            "{file_name}: store path must name a file"
        )));
    };
    let counter = TEMP_COUNTER.fetch_add(1, Ordering::Relaxed);
    let suffix = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |elapsed| elapsed.as_nanos());
    let tmp_name = format!(
        ".{target}.tmp.{}.{suffix}.{counter}",
        std::process::id()
    );

    write_temp_file(dir, &tmp_name, contents)
        .map_err(|err| PatientRepositoryError::io(format!("{tmp_name}: {err}")))?;
    if let Err(err) = replace_target(dir, &tmp_name, target) {
        // Best-effort cleanup; the rename error is what matters.
        drop(dir.remove_file(&tmp_name));
        return Err(PatientRepositoryError::io(format!("{target}: {err}")));
    }
    sync_directory(dir);

    Ok(())
}

fn write_temp_file(dir: &Dir, tmp_name: &str, contents: &str) -> io::Result<()> {
    let mut options = OpenOptions::new();
    options.write(true).create_new(true);
    let mut file = dir.open_with(tmp_name, &options)?;

    let written = file
        .write_all(contents.as_bytes())
        .and_then(|()| file.sync_all());
    if written.is_err() {
        drop(file);
        drop(dir.remove_file(tmp_name));
    }
    written
}

#[cfg(windows)]
fn replace_target(dir: &Dir, tmp_name: &str, target: &str) -> io::Result<()> {
    // Windows rename fails if the target exists.
    match dir.remove_file(target) {
        Ok(()) => {}
        Err(err) if err.kind() == io::ErrorKind::NotFound => {}
        Err(err) => return Err(err),
    }
    dir.rename(tmp_name, dir, target)
}

#[cfg(not(windows))]
fn replace_target(dir: &Dir, tmp_name: &str, target: &str) -> io::Result<()> {
    dir.rename(tmp_name, dir, target)
}

fn sync_directory(dir: &Dir) {
    // Best-effort; not every platform can sync a directory handle.
    if dir.open(".").and_then(|handle| handle.sync_all()).is_err() {
        tracing::debug!("patient store directory sync skipped");
    }
}
