//! JSON file access for the ledger slot and `config.json`
//!
//! Both files are always rewritten in full, so a write goes to a sibling
//! temp file that is synced and renamed over the target. A crash leaves
//! either the old or the new contents, never a torn file.

use std::fs::{self, File};
use std::io::{self, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::{de::DeserializeOwned, Serialize};

use crate::error::{LedgerError, LedgerResult};

/// Read and parse a JSON file; `Ok(None)` when the file does not exist
///
/// Open failures are [`LedgerError::Io`], parse failures [`LedgerError::Json`].
pub fn read_json<T: DeserializeOwned>(path: &Path) -> LedgerResult<Option<T>> {
    let file = match File::open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(e) => {
            return Err(LedgerError::Io(format!(
                "Failed to open {}: {}",
                path.display(),
                e
            )))
        }
    };

    serde_json::from_reader(BufReader::new(file))
        .map(Some)
        .map_err(|e| LedgerError::Json(format!("Failed to parse {}: {}", path.display(), e)))
}

/// Replace `path` with the pretty-printed JSON of `data`
///
/// Every failure is reported as [`LedgerError::Persistence`]; the previous
/// contents of `path` are untouched in that case.
pub fn write_json_atomic<T: Serialize + ?Sized>(path: &Path, data: &T) -> LedgerResult<()> {
    let staged = staging_path(path);

    let result = stage(&staged, data).and_then(|()| {
        fs::rename(&staged, path).map_err(|e| persistence("replace", path, e))
    });
    if result.is_err() {
        let _ = fs::remove_file(&staged);
    }
    result
}

fn stage<T: Serialize + ?Sized>(staged: &Path, data: &T) -> LedgerResult<()> {
    if let Some(parent) = staged.parent() {
        fs::create_dir_all(parent).map_err(|e| persistence("create directory", parent, e))?;
    }

    let mut writer =
        BufWriter::new(File::create(staged).map_err(|e| persistence("create", staged, e))?);
    serde_json::to_writer_pretty(&mut writer, data)
        .map_err(|e| persistence("serialize into", staged, e))?;
    writer
        .flush()
        .map_err(|e| persistence("flush", staged, e))?;
    writer
        .get_ref()
        .sync_all()
        .map_err(|e| persistence("sync", staged, e))
}

// Same directory as the target, so the rename cannot cross filesystems
fn staging_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".tmp");
    path.with_file_name(name)
}

fn persistence(action: &str, path: &Path, err: impl std::fmt::Display) -> LedgerError {
    LedgerError::Persistence(format!("Failed to {} {}: {}", action, path.display(), err))
}
