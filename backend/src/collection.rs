use std::path::{Path, PathBuf};

use serde::{Serialize, Deserialize};

use crate::analyzer::{LexicalAnalyzer, TextStats};
use crate::app_settings::AppSettings;
use crate::dir_list::list_document_files;
use crate::document::{Document, Text};
use crate::export_helpers::export_collection_csv;
use crate::helpers::load_document;
use crate::lexicon::Lexicon;
use crate::logger::{info, warn};
use crate::tokenizer::tokenize;
use crate::types::{Result, SkippedFile, SortKey};

pub const DEFAULT_COLLECTION_TITLE: &str = "Unnamed Collection";

/// One exported row per document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollectionRow {
    pub file: String,
    pub author: String,
    pub date: String,
    pub text_type: Option<String>,
    pub genre: Option<String>,
    pub stats: TextStats,
}

/// A group of documents read from one folder.
///
/// Files which fail to read or parse are recorded in `skipped` and do not
/// stop the rest of the folder from loading.
#[derive(Debug, Clone)]
pub struct Collection {
    pub title: String,
    pub folder: Option<PathBuf>,
    members: Vec<Document>,
    skipped: Vec<SkippedFile>,
}

impl Collection {
    pub fn new(title: &str) -> Self {
        Collection {
            title: title.to_string(),
            folder: None,
            members: Vec::new(),
            skipped: Vec::new(),
        }
    }

    pub fn from_documents(title: &str, documents: Vec<Document>) -> Self {
        let mut c = Collection::new(title);
        c.members = documents;
        c
    }

    /// Load every `.txt` file directly inside `folder`.
    pub fn load(folder: &Path, title: Option<&str>) -> Result<Self> {
        let files = list_document_files(folder, 1)?;

        let mut c = Collection::new(title.unwrap_or(DEFAULT_COLLECTION_TITLE));
        c.folder = Some(folder.to_path_buf());

        for entry in files {
            match load_document(&entry.path) {
                Ok(doc) => c.members.push(doc),
                Err(e) => {
                    warn(&format!("Skipping {}: {}", entry.relative_path, e));
                    c.skipped.push(SkippedFile {
                        path: entry.path,
                        reason: e.to_string(),
                    });
                }
            }
        }

        info(&format!(
            "Loaded collection '{}': {} documents, {} skipped",
            c.title,
            c.members.len(),
            c.skipped.len()
        ));

        Ok(c)
    }

    pub fn push(&mut self, doc: Document) {
        self.members.push(doc);
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Document> {
        self.members.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Document> {
        self.members.iter()
    }

    pub fn members(&self) -> &[Document] {
        &self.members
    }

    pub fn skipped(&self) -> &[SkippedFile] {
        &self.skipped
    }

    pub fn find_by_title(&self, title: &str) -> Option<&Document> {
        self.members.iter().find(|d| d.title().eq_ignore_ascii_case(title))
    }

    /// Stable sort of the members.
    pub fn sort_by(&mut self, key: SortKey) {
        match key {
            SortKey::Title => self.members.sort_by(|a, b| a.title().cmp(b.title())),
            SortKey::Author => self.members.sort_by(|a, b| a.author().cmp(b.author())),
            SortKey::Date => self.members.sort_by(|a, b| a.date().cmp(b.date())),
            SortKey::WordCount => self.members.sort_by_cached_key(|d| tokenize(d.body()).len()),
            SortKey::FileName => self.members.sort_by(|a, b| a.file_name().cmp(&b.file_name())),
        }
    }

    pub fn rows(&self, lexicon: &Lexicon, settings: &AppSettings) -> Vec<CollectionRow> {
        self.members
            .iter()
            .map(|doc| {
                let stats = LexicalAnalyzer::new(doc, lexicon)
                    .with_keyword_count(settings.keyword_count)
                    .with_words_per_minute(settings.words_per_minute)
                    .stats();

                CollectionRow {
                    file: doc.file_name().unwrap_or(doc.title()).to_string(),
                    author: doc.author().to_string(),
                    date: doc.date().to_string(),
                    text_type: doc.text_type().map(|s| s.to_string()),
                    genre: doc.genre().map(|s| s.to_string()),
                    stats,
                }
            })
            .collect()
    }

    pub fn export_csv(&self, path: &Path, lexicon: &Lexicon, settings: &AppSettings) -> Result<()> {
        export_collection_csv(&self.rows(lexicon, settings), path)?;
        info(&format!("Exported {} rows to {}", self.len(), path.display()));
        Ok(())
    }
}

impl std::fmt::Display for Collection {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "<Collection: {}>", self.title)
    }
}

impl<'a> IntoIterator for &'a Collection {
    type Item = &'a Document;
    type IntoIter = std::slice::Iter<'a, Document>;

    fn into_iter(self) -> Self::IntoIter {
        self.members.iter()
    }
}
