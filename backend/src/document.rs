//! Line-oriented document parsing.
//!
//! A source file looks like this:
//!
//! ```text
//! <title>
//! <author>
//! <date>
//! [*<subtitle>*]
//! <body paragraph 1>
//! ...
//! <body paragraph N>
//! [+<text type>]
//! [-<genre>]
//! <source citation or URL>
//! ```
//!
//! The header and the source are read by position before blank lines are
//! filtered. The two lines before the source are always reserved for
//! metadata, whether or not they carry a marker. Blank lines are only
//! dropped from the body.

use serde::Serialize;

use crate::document_metadata::{
    DocumentMetadata, marked_field, subtitle_field, GENRE_MARKER, SUBTITLE_MARKER, TEXT_TYPE_MARKER,
};
use crate::types::{Result, TextosError};

pub const MIN_DOCUMENT_LINES: usize = 4;
pub const HEADER_LINES: usize = 3;
pub const RESERVED_TAIL_LINES: usize = 2;

/// Common view of a parsed document and of an extract taken from one.
pub trait Text {
    fn metadata(&self) -> &DocumentMetadata;
    fn body(&self) -> &[String];

    fn title(&self) -> &str {
        &self.metadata().title
    }

    fn author(&self) -> &str {
        &self.metadata().author
    }

    fn date(&self) -> &str {
        &self.metadata().date
    }

    fn text_type(&self) -> Option<&str> {
        self.metadata().text_type.as_deref()
    }

    fn genre(&self) -> Option<&str> {
        self.metadata().genre.as_deref()
    }

    fn source(&self) -> &str {
        &self.metadata().source
    }

    fn paragraph_count(&self) -> usize {
        self.body().len()
    }
}

/// A parsed document. Immutable once constructed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Document {
    metadata: DocumentMetadata,
    subtitle: Option<String>,
    body: Vec<String>,
    file_name: Option<String>,
}

impl Text for Document {
    fn metadata(&self) -> &DocumentMetadata {
        &self.metadata
    }

    fn body(&self) -> &[String] {
        &self.body
    }
}

impl Document {
    /// Parse already-read lines into a document.
    pub fn parse<S: AsRef<str>>(raw_lines: &[S]) -> Result<Document> {
        DocumentParser::new(raw_lines).run()
    }

    /// Parse a whole text blob, splitting it into lines first.
    pub fn from_text(text: &str) -> Result<Document> {
        let lines: Vec<&str> = text.lines().collect();
        Document::parse(&lines)
    }

    /// Attach the name of the file the document was read from.
    pub fn with_file_name(mut self, file_name: impl Into<String>) -> Document {
        self.file_name = Some(file_name.into());
        self
    }

    pub fn subtitle(&self) -> Option<&str> {
        self.subtitle.as_deref()
    }

    pub fn file_name(&self) -> Option<&str> {
        self.file_name.as_deref()
    }

    pub fn paragraph(&self, index: usize) -> Option<&str> {
        self.body.get(index).map(|p| p.as_str())
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ParseState {
    Header,
    SubtitleCheck,
    Body,
    MetadataTail,
    Source,
}

struct DocumentParser<'a> {
    lines: Vec<&'a str>,
    state: ParseState,
    header: Vec<String>,
    subtitle: Option<String>,
    body: Vec<String>,
    text_type: Option<String>,
    genre: Option<String>,
    source: Option<String>,
    body_start: usize,
}

impl<'a> DocumentParser<'a> {
    fn new<S: AsRef<str>>(raw_lines: &'a [S]) -> Self {
        let mut lines: Vec<&str> = raw_lines.iter().map(|l| l.as_ref().trim()).collect();
        // Newlines at the end of the file are not part of the layout.
        while lines.last().is_some_and(|l| l.is_empty()) {
            lines.pop();
        }

        DocumentParser {
            lines,
            state: ParseState::Header,
            header: Vec::with_capacity(HEADER_LINES),
            subtitle: None,
            body: Vec::new(),
            text_type: None,
            genre: None,
            source: None,
            body_start: HEADER_LINES,
        }
    }

    fn source_index(&self) -> usize {
        self.lines.len() - 1
    }

    /// First line of the reserved metadata block. It never reaches back
    /// into the header or the subtitle.
    fn tail_start(&self) -> usize {
        self.source_index()
            .saturating_sub(RESERVED_TAIL_LINES)
            .max(self.body_start)
    }

    fn run(mut self) -> Result<Document> {
        if self.lines.len() < MIN_DOCUMENT_LINES {
            return Err(TextosError::MalformedDocument(format!(
                "expected at least {} lines, found {}",
                MIN_DOCUMENT_LINES,
                self.lines.len()
            )));
        }

        let mut idx = 0;
        while idx < self.lines.len() {
            let line = self.lines[idx];
            // A state either consumes the line or hands it over to the next
            // state without advancing.
            let consumed = self.step(idx, line);
            if consumed {
                idx += 1;
            }
        }

        self.finish()
    }

    fn step(&mut self, idx: usize, line: &str) -> bool {
        match self.state {
            ParseState::Header => {
                self.header.push(line.to_string());
                if self.header.len() == HEADER_LINES {
                    self.state = ParseState::SubtitleCheck;
                }
                true
            }

            ParseState::SubtitleCheck => {
                if idx == self.source_index() {
                    self.state = ParseState::Source;
                    return false;
                }
                if line.starts_with(SUBTITLE_MARKER) {
                    self.subtitle = subtitle_field(line);
                    self.body_start = idx + 1;
                    self.state = ParseState::Body;
                    true
                } else {
                    self.body_start = idx;
                    self.state = ParseState::Body;
                    false
                }
            }

            ParseState::Body => {
                if idx >= self.tail_start() {
                    self.state = ParseState::MetadataTail;
                    return false;
                }
                if !line.is_empty() {
                    self.body.push(line.to_string());
                }
                true
            }

            ParseState::MetadataTail => {
                if idx == self.source_index() {
                    self.state = ParseState::Source;
                    return false;
                }
                if self.text_type.is_none() {
                    if let Some(text_type) = marked_field(line, TEXT_TYPE_MARKER) {
                        self.text_type = Some(text_type);
                        return true;
                    }
                }
                if self.genre.is_none() {
                    if let Some(genre) = marked_field(line, GENRE_MARKER) {
                        self.genre = Some(genre);
                    }
                }
                true
            }

            ParseState::Source => {
                self.source = Some(line.to_string());
                true
            }
        }
    }

    fn finish(self) -> Result<Document> {
        let mut header = self.header.into_iter();
        let (title, author, date) = match (header.next(), header.next(), header.next()) {
            (Some(t), Some(a), Some(d)) => (t, a, d),
            _ => return Err(TextosError::MalformedDocument("incomplete header".to_string())),
        };

        if title.is_empty() {
            return Err(TextosError::MalformedDocument("the title line is blank".to_string()));
        }

        let source = self.source
            .ok_or_else(|| TextosError::MalformedDocument("missing source line".to_string()))?;

        tracing::debug!(
            "Parsed '{}': {} paragraphs, subtitle: {}, type: {:?}, genre: {:?}",
            title,
            self.body.len(),
            self.subtitle.is_some(),
            self.text_type,
            self.genre
        );

        Ok(Document {
            metadata: DocumentMetadata {
                title,
                author,
                date,
                text_type: self.text_type,
                genre: self.genre,
                source,
            },
            subtitle: self.subtitle,
            body: self.body,
            file_name: None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(text: &str) -> Vec<&str> {
        text.lines().collect()
    }

    #[test]
    fn test_full_layout() {
        let doc = Document::parse(&lines(
            "The Title\nJane Doe\n2020-01-02\n*A subtitle*\nFirst paragraph.\n\nSecond paragraph.\n+Essay\n-Science\nhttps://example.org/a",
        )).unwrap();

        assert_eq!(doc.title(), "The Title");
        assert_eq!(doc.author(), "Jane Doe");
        assert_eq!(doc.date(), "2020-01-02");
        assert_eq!(doc.subtitle(), Some("A subtitle"));
        assert_eq!(doc.body(), &["First paragraph.", "Second paragraph."]);
        assert_eq!(doc.text_type(), Some("Essay"));
        assert_eq!(doc.genre(), Some("Science"));
        assert_eq!(doc.source(), "https://example.org/a");
        assert_eq!(doc.file_name(), None);
    }

    #[test]
    fn test_no_subtitle_no_markers() {
        let doc = Document::parse(&lines(
            "T\nA\nD\nBody one.\nBody two.\nReserved one\nReserved two\nSource",
        )).unwrap();

        assert_eq!(doc.subtitle(), None);
        // unmarked reserved lines are neither body nor metadata
        assert_eq!(doc.body(), &["Body one.", "Body two."]);
        assert_eq!(doc.text_type(), None);
        assert_eq!(doc.genre(), None);
        assert_eq!(doc.source(), "Source");
    }

    #[test]
    fn test_markers_in_either_slot() {
        let doc = Document::parse(&lines("T\nA\nD\nBody.\n-Poetry\n+Poem\nSource")).unwrap();
        assert_eq!(doc.text_type(), Some("Poem"));
        assert_eq!(doc.genre(), Some("Poetry"));
        assert_eq!(doc.body(), &["Body."]);
    }

    #[test]
    fn test_only_one_marker() {
        let doc = Document::parse(&lines("T\nA\nD\nBody.\n\n+News\nSource")).unwrap();
        assert_eq!(doc.text_type(), Some("News"));
        assert_eq!(doc.genre(), None);
    }

    #[test]
    fn test_blank_lines_only_dropped_from_body() {
        let doc = Document::parse(&lines(
            "T\nA\nD\n\n  First.  \n\n\nSecond.\n\n\nSource\n\n",
        )).unwrap();
        assert_eq!(doc.body(), &["First.", "Second."]);
        assert_eq!(doc.source(), "Source");
    }

    #[test]
    fn test_blank_line_hides_subtitle_marker_from_body() {
        let doc = Document::parse(&lines("T\nA\nD\n\n*Not a subtitle\nBody.\n\n\nSource")).unwrap();
        assert_eq!(doc.subtitle(), None);
        assert_eq!(doc.body(), &["*Not a subtitle", "Body."]);
    }

    #[test]
    fn test_minimum_document() {
        let doc = Document::parse(&lines("T\nA\nD\nSource")).unwrap();
        assert!(doc.is_empty());
        assert_eq!(doc.subtitle(), None);
        assert_eq!(doc.source(), "Source");
    }

    #[test]
    fn test_short_document_does_not_reserve_header() {
        // the tail block shrinks instead of overlapping the subtitle
        let doc = Document::parse(&lines("T\nA\nD\n*Sub*\n+Essay\nSource")).unwrap();
        assert_eq!(doc.subtitle(), Some("Sub"));
        assert_eq!(doc.text_type(), Some("Essay"));
        assert!(doc.body().is_empty());
    }

    #[test]
    fn test_too_few_lines() {
        let err = Document::parse(&lines("T\nA\nD")).unwrap_err();
        assert!(matches!(err, TextosError::MalformedDocument(_)));

        let err = Document::parse(&lines("T\nA\nD\n\n\n")).unwrap_err();
        assert!(matches!(err, TextosError::MalformedDocument(_)));

        let empty: Vec<String> = Vec::new();
        assert!(matches!(Document::parse(&empty), Err(TextosError::MalformedDocument(_))));
    }

    #[test]
    fn test_blank_title() {
        let err = Document::parse(&lines("\nA\nD\nBody\n\n\nSource")).unwrap_err();
        assert!(matches!(err, TextosError::MalformedDocument(_)));
    }

    #[test]
    fn test_paragraph_access() {
        let doc = Document::from_text("T\nA\nD\nOne.\nTwo.\n\n\nSource\n")
            .unwrap()
            .with_file_name("t.txt");
        assert_eq!(doc.len(), 2);
        assert_eq!(doc.paragraph_count(), 2);
        assert_eq!(doc.paragraph(1), Some("Two."));
        assert_eq!(doc.paragraph(2), None);
        assert_eq!(doc.file_name(), Some("t.txt"));
    }
}
