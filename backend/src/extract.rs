use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::document::{Document, Text};
use crate::document_metadata::{DocumentMetadata, format_marked_field, GENRE_MARKER, TEXT_TYPE_MARKER};
use crate::helpers::{sanitize_file_stem, write_text_lines};
use crate::types::{Result, TextosError};

pub const DEFAULT_EXTRACT_LABEL: &str = "Extract from";

/// A contiguous range of a document's paragraphs, with the document's
/// metadata copied at creation time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Extract {
    metadata: DocumentMetadata,
    parent_title: String,
    body: Vec<String>,
}

impl Text for Extract {
    fn metadata(&self) -> &DocumentMetadata {
        &self.metadata
    }

    fn body(&self) -> &[String] {
        &self.body
    }
}

impl Extract {
    /// Take paragraphs `begin..end` of `parent`.
    pub fn new(parent: &Document, begin: usize, end: usize) -> Result<Extract> {
        Extract::with_label(parent, begin, end, DEFAULT_EXTRACT_LABEL)
    }

    /// Like `new()`, the synthesized title is `"<label> <parent title>"`.
    pub fn with_label(parent: &Document, begin: usize, end: usize, label: &str) -> Result<Extract> {
        let len = parent.body().len();
        if begin >= end || end > len {
            return Err(TextosError::RangeError { begin, end, len });
        }

        let mut metadata = parent.metadata().clone();
        metadata.title = format!("{} {}", label, parent.title()).trim().to_string();

        Ok(Extract {
            metadata,
            parent_title: parent.title().to_string(),
            body: parent.body()[begin..end].to_vec(),
        })
    }

    pub fn parent_title(&self) -> &str {
        &self.parent_title
    }

    /// The extract in the line layout `Document::parse()` reads.
    ///
    /// A blank line follows the date so that no body paragraph is read as a
    /// subtitle, and both metadata slots are always written.
    pub fn to_lines(&self) -> Vec<String> {
        let mut lines = vec![
            self.metadata.title.clone(),
            self.metadata.author.clone(),
            self.metadata.date.clone(),
            String::new(),
        ];
        lines.extend(self.body.iter().cloned());
        lines.push(format_marked_field(self.metadata.text_type.as_deref(), TEXT_TYPE_MARKER));
        lines.push(format_marked_field(self.metadata.genre.as_deref(), GENRE_MARKER));
        lines.push(self.metadata.source.clone());
        lines
    }

    /// Suggested file name, the title with spaces replaced.
    pub fn file_name(&self) -> String {
        format!("{}.txt", sanitize_file_stem(&self.metadata.title))
    }

    /// Write the extract to `dir` and return the path of the new file.
    pub fn save_to_txt(&self, dir: &Path) -> Result<PathBuf> {
        let path = dir.join(self.file_name());
        write_text_lines(&path, &self.to_lines())?;
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parent() -> Document {
        Document::from_text(
            "Walden\nHenry David Thoreau\n1854\n*Life in the Woods*\nOne.\nTwo.\nThree.\n+Essay\n-Memoir\nhttps://example.org/walden",
        ).unwrap()
    }

    #[test]
    fn test_new_copies_metadata() {
        let doc = parent();
        let extract = Extract::new(&doc, 1, 3).unwrap();
        assert_eq!(extract.title(), "Extract from Walden");
        assert_eq!(extract.parent_title(), "Walden");
        assert_eq!(extract.author(), "Henry David Thoreau");
        assert_eq!(extract.date(), "1854");
        assert_eq!(extract.text_type(), Some("Essay"));
        assert_eq!(extract.genre(), Some("Memoir"));
        assert_eq!(extract.source(), "https://example.org/walden");
        assert_eq!(extract.body(), &["Two.", "Three."]);
    }

    #[test]
    fn test_custom_label() {
        let doc = parent();
        let extract = Extract::with_label(&doc, 0, 1, "Excerpt of").unwrap();
        assert_eq!(extract.title(), "Excerpt of Walden");
        assert_eq!(extract.file_name(), "Excerpt_of_Walden.txt");
    }

    #[test]
    fn test_invalid_ranges() {
        let doc = parent();
        assert!(matches!(Extract::new(&doc, 1, 1), Err(TextosError::RangeError { .. })));
        assert!(matches!(Extract::new(&doc, 2, 1), Err(TextosError::RangeError { .. })));
        assert!(matches!(Extract::new(&doc, 0, 4), Err(TextosError::RangeError { begin: 0, end: 4, len: 3 })));
        assert!(Extract::new(&doc, 0, 3).is_ok());
    }

    #[test]
    fn test_to_lines_layout() {
        let doc = Document::from_text("T\nA\nD\nOne.\nTwo.\n\n\nSource").unwrap();
        let extract = Extract::new(&doc, 0, 1).unwrap();
        assert_eq!(
            extract.to_lines(),
            vec!["Extract from T", "A", "D", "", "One.", "", "", "Source"]
        );
    }
}
