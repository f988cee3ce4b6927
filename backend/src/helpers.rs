use std::fs;
use std::path::Path;

use lazy_static::lazy_static;
use regex::Regex;

use crate::document::Document;
use crate::types::{Result, TextosError};

lazy_static! {
    static ref RE_FILE_UNSAFE: Regex = Regex::new(r#"[/\\:*?"<>|]"#).unwrap();
    static ref RE_MANY_UNDERSCORES: Regex = Regex::new(r"__+").unwrap();
}

/// Read a file as lines. Invalid UTF-8 is replaced, not an error.
pub fn read_text_lines(path: &Path) -> Result<Vec<String>> {
    let bytes = fs::read(path).map_err(|e| TextosError::UnreadableSource {
        path: path.to_path_buf(),
        source: e,
    })?;

    let decoded = String::from_utf8_lossy(&bytes);
    // A byte order mark would end up in the title.
    let text = decoded.strip_prefix('\u{FEFF}').unwrap_or(&decoded);

    Ok(text.lines().map(|l| l.to_string()).collect())
}

/// Read and parse a document file, recording its file name.
pub fn load_document(path: &Path) -> Result<Document> {
    let lines = read_text_lines(path)?;
    let doc = Document::parse(&lines)?;

    match path.file_name() {
        Some(name) => Ok(doc.with_file_name(name.to_string_lossy())),
        None => Ok(doc),
    }
}

/// Write lines to a file, each terminated by a newline.
pub fn write_text_lines<S: AsRef<str>>(path: &Path, lines: &[S]) -> Result<()> {
    let mut content = String::new();
    for line in lines {
        content.push_str(line.as_ref());
        content.push('\n');
    }

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|e| TextosError::WriteFailed {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }
    }

    fs::write(path, content).map_err(|e| TextosError::WriteFailed {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Turn a title into a file stem: spaces become underscores, characters
/// which are not allowed in file names are removed.
pub fn sanitize_file_stem(title: &str) -> String {
    let s = RE_FILE_UNSAFE.replace_all(title.trim(), "").into_owned();
    let s = s.replace(' ', "_");
    RE_MANY_UNDERSCORES.replace_all(&s, "_").into_owned()
}
