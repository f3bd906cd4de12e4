// RoleLens - platform/fs.rs
//
// Filesystem helpers: bounded report reads and atomic export writes.

use crate::util::constants::{MAX_INPUT_FILE_SIZE, REPORT_EXTENSION};
use crate::util::error::{ExportError, LoadError};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Read a report file as text.
///
/// Files above `MAX_INPUT_FILE_SIZE` are refused. Invalid UTF-8 is replaced
/// rather than rejected, since reports exported by spreadsheet tools are
/// occasionally Latin-1. A missing `.csv` extension only warns.
pub fn read_report(path: &Path) -> Result<String, LoadError> {
    let metadata = std::fs::metadata(path).map_err(|e| LoadError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;

    if metadata.len() > MAX_INPUT_FILE_SIZE {
        return Err(LoadError::FileTooLarge {
            path: path.to_path_buf(),
            size: metadata.len(),
            max_size: MAX_INPUT_FILE_SIZE,
        });
    }

    let is_csv = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case(REPORT_EXTENSION));
    if !is_csv {
        tracing::warn!(path = %path.display(), "Report does not have a .csv extension; loading anyway");
    }

    let bytes = std::fs::read(path).map_err(|e| LoadError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;
    let text = match String::from_utf8(bytes) {
        Ok(text) => text,
        Err(e) => {
            tracing::warn!(path = %path.display(), "Report is not valid UTF-8; invalid bytes replaced");
            String::from_utf8_lossy(e.as_bytes()).into_owned()
        }
    };

    tracing::debug!(path = %path.display(), bytes = text.len(), "Report read");
    Ok(text)
}

/// Write `path` atomically: `write` fills a sibling temp file which is then
/// renamed over the target. A failure at any point leaves any previous file
/// at `path` untouched.
pub fn write_atomic<F>(path: &Path, write: F) -> Result<usize, ExportError>
where
    F: FnOnce(&mut BufWriter<File>) -> Result<usize, ExportError>,
{
    let io_err = |path: &Path, source| ExportError::Io {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| io_err(parent, e))?;
    }

    let tmp = temp_path(path);
    let result = File::create(&tmp)
        .map_err(|e| io_err(&tmp, e))
        .and_then(|file| {
            let mut writer = BufWriter::new(file);
            let count = write(&mut writer)?;
            writer.flush().map_err(|e| io_err(&tmp, e))?;
            Ok(count)
        })
        .and_then(|count| {
            std::fs::rename(&tmp, path).map_err(|e| io_err(path, e))?;
            Ok(count)
        });

    if result.is_err() {
        // Ignore any secondary error; the first one is what matters.
        let _ = std::fs::remove_file(&tmp);
    }
    result
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".tmp");
    path.with_file_name(name)
}
