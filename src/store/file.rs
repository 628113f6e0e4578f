//! Whole-file reads and atomic writes of the store blob.

use std::fs::{self, OpenOptions};
use std::io::{self, ErrorKind, Write};
use std::path::{Path, PathBuf};

use crate::crypto::MIN_BLOB_LEN;
use crate::errors::Result;

/// Returns `true` when `path` is missing or too small to hold any blob,
/// i.e. when it must be initialized before use.
pub fn needs_initialization(path: &Path) -> Result<bool> {
    match fs::metadata(path) {
        Ok(meta) => Ok(meta.len() < MIN_BLOB_LEN as u64),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(true),
        Err(e) => Err(e.into()),
    }
}

/// Read the full blob from disk.
pub fn read_blob(path: &Path) -> Result<Vec<u8>> {
    Ok(fs::read(path)?)
}

/// Replace the contents of `path` with `blob` **atomically**.
///
/// 1. Write the blob to a temp file in the same directory.
/// 2. Flush it to disk.
/// 3. Rename the temp file over the target path.
/// 4. Flush the directory so the rename itself is durable (Unix).
///
/// Readers see either the old file or the new one, never a mix. If any
/// step fails the temp file is removed and the target is left untouched.
///
/// A symlinked store is followed: the file it points to is replaced and
/// the link stays. A dangling link is replaced by a regular file.
pub fn write_blob(path: &Path, blob: &[u8]) -> Result<()> {
    let target = resolve_target(path)?;
    let parent = match target.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };
    let tmp_path = parent.join(format!(
        ".{}.tmp",
        target.file_name().unwrap_or_default().to_string_lossy()
    ));

    let result = write_synced(&tmp_path, blob).and_then(|()| fs::rename(&tmp_path, &target));
    if result.is_err() {
        let _ = fs::remove_file(&tmp_path);
    }
    result?;

    sync_dir(parent)?;
    Ok(())
}

fn resolve_target(path: &Path) -> io::Result<PathBuf> {
    match fs::canonicalize(path) {
        Ok(real) => Ok(real),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(path.to_path_buf()),
        Err(e) => Err(e),
    }
}

#[cfg(unix)]
fn sync_dir(dir: &Path) -> io::Result<()> {
    fs::File::open(dir)?.sync_all()
}

#[cfg(not(unix))]
fn sync_dir(_dir: &Path) -> io::Result<()> {
    Ok(())
}

fn write_synced(path: &Path, bytes: &[u8]) -> io::Result<()> {
    let mut options = OpenOptions::new();
    options.write(true).create(true).truncate(true);

    // Owner-only read/write.
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }

    let mut file = options.open(path)?;
    file.write_all(bytes)?;
    file.sync_all()
}
