use std::io;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::types::{Result, TextosError};

pub const DOCUMENT_EXTENSION: &str = "txt";

/// Represents a document file found in a collection folder
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirEntryInfo {
    pub path: PathBuf,
    pub name: String,
    pub size: u64,
    pub relative_path: String,
}

fn is_document_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case(DOCUMENT_EXTENSION))
}

/// List the `.txt` files under `root_path`, sorted by relative path.
///
/// A `max_depth` of 1 only looks at the folder itself.
pub fn list_document_files(root_path: &Path, max_depth: usize) -> Result<Vec<DirEntryInfo>> {
    if !root_path.is_dir() {
        return Err(TextosError::UnreadableSource {
            path: root_path.to_path_buf(),
            source: io::Error::new(io::ErrorKind::NotFound, "not a directory"),
        });
    }

    let mut entries: Vec<DirEntryInfo> = WalkDir::new(root_path)
        .max_depth(max_depth)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file() && is_document_file(e.path()))
        .map(|entry| {
            let size = entry.metadata().map(|m| m.len()).unwrap_or(0);
            let relative_path = entry.path().strip_prefix(root_path)
                .unwrap_or_else(|_| entry.path())
                .to_string_lossy()
                .into_owned();

            DirEntryInfo {
                path: entry.path().to_path_buf(),
                name: entry.file_name().to_string_lossy().into_owned(),
                size,
                relative_path,
            }
        })
        .collect();

    entries.sort_by(|a, b| a.relative_path.cmp(&b.relative_path));

    Ok(entries)
}

/// Helper function to format file size in human-readable units
pub fn format_size(size: u64) -> String {
    match size {
        0 => "0 bytes".to_string(),
        1..=1024 => format!("{} bytes", size),
        // 1024*1024
        1025..=1048576 => format!("{:.1} KB", size as f64 / 1024.0),
        _ => format!("{:.1} MB", size as f64 / (1024.0 * 1024.0)),
    }
}
