//! Persisting rendered artifacts.

use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use log::{debug, info, warn};

use crate::error::{Error, Result};

use super::ExportFormat;

/// Attempts at finding a free file name before giving up.
const MAX_NAME_ATTEMPTS: u32 = 1000;

/// Write `bytes` to a new timestamped file under `target_dir`.
///
/// The file is named `{document_id}_{unix_secs}.{micros}.{ext}` and is
/// never overwritten: if the name is taken, `_{n}` is appended before the
/// extension. After writing, the on-disk length is compared with
/// `bytes.len()`. On any failure the partial file is removed.
pub fn save_export(
    bytes: &[u8],
    document_id: &str,
    format: ExportFormat,
    target_dir: impl AsRef<Path>,
) -> Result<PathBuf> {
    save_export_at(bytes, document_id, format, target_dir.as_ref(), Utc::now())
}

pub(crate) fn save_export_at(
    bytes: &[u8],
    document_id: &str,
    format: ExportFormat,
    target_dir: &Path,
    now: DateTime<Utc>,
) -> Result<PathBuf> {
    fs::create_dir_all(target_dir)?;

    let stem = file_stem(document_id, now);
    let (path, mut file) = create_unique(target_dir, &stem, format.extension())?;
    debug!("writing {} bytes to {}", bytes.len(), path.display());

    if let Err(e) = write_and_verify(&mut file, &path, bytes) {
        drop(file);
        if let Err(rm) = fs::remove_file(&path) {
            warn!("could not remove partial export {}: {}", path.display(), rm);
        }
        return Err(e);
    }

    info!("saved {} export to {}", format, path.display());
    Ok(path)
}

/// `{document_id}_{unix_secs}.{micros:06}`, with unsafe characters in the id replaced.
pub(crate) fn file_stem(document_id: &str, now: DateTime<Utc>) -> String {
    format!(
        "{}_{}.{:06}",
        sanitize_id(document_id),
        now.timestamp(),
        now.timestamp_subsec_micros()
    )
}

fn sanitize_id(id: &str) -> String {
    let cleaned: String = id
        .trim()
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect();
    if cleaned.is_empty() {
        "document".to_string()
    } else {
        cleaned
    }
}

fn create_unique(dir: &Path, stem: &str, ext: &str) -> Result<(PathBuf, File)> {
    for attempt in 0..MAX_NAME_ATTEMPTS {
        let name = match attempt {
            0 => format!("{}.{}", stem, ext),
            n => format!("{}_{}.{}", stem, n, ext),
        };
        let path = dir.join(name);
        match OpenOptions::new().write(true).create_new(true).open(&path) {
            Ok(file) => return Ok((path, file)),
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists => continue,
            Err(e) => return Err(e.into()),
        }
    }
    Err(Error::Io(io::Error::new(
        io::ErrorKind::AlreadyExists,
        format!("no free file name for {} in {}", stem, dir.display()),
    )))
}

fn write_and_verify(file: &mut File, path: &Path, bytes: &[u8]) -> Result<()> {
    file.write_all(bytes)?;
    file.sync_all()?;

    let expected = bytes.len() as u64;
    let actual = fs::metadata(path)?.len();
    if actual != expected {
        return Err(Error::IncompleteWrite { expected, actual });
    }
    Ok(())
}
