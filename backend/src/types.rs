use std::path::PathBuf;
use std::str::FromStr;
use serde::{Serialize, Deserialize};
use thiserror::Error;

/// Failures of the document core.
///
/// Parsing and metric computation never substitute a default for an
/// undefined value. Callers decide the fallback (the CLI prints "N/A").
#[derive(Error, Debug)]
pub enum TextosError {
    #[error("Malformed document: {0}")]
    MalformedDocument(String),

    #[error("Can't read {path:?}: {source}")]
    UnreadableSource {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Can't write {path:?}: {source}")]
    WriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{metric} is undefined for a text without (content) tokens")]
    DivisionUndefined { metric: &'static str },

    #[error("{metric} is undefined: {reason}")]
    DomainError { metric: &'static str, reason: String },

    #[error("Invalid paragraph range {begin}..{end} for a body of {len} paragraphs")]
    RangeError { begin: usize, end: usize, len: usize },

    #[error(transparent)]
    InvalidVariant(#[from] ParseLexDivVariantError),
}

pub type Result<T> = std::result::Result<T, TextosError>;

/// Lexical diversity formulas over (token_count, type_count).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum LexDivVariant {
    #[serde(rename = "ttr")]
    Ttr,
    #[serde(rename = "summer")]
    Summer,
    #[default]
    #[serde(rename = "maas")]
    Maas,
}

impl LexDivVariant {
    pub fn as_str(&self) -> &'static str {
        match self {
            LexDivVariant::Ttr => "ttr",
            LexDivVariant::Summer => "summer",
            LexDivVariant::Maas => "maas",
        }
    }
}

#[derive(Error, Debug, PartialEq, Eq)]
#[error("Invalid lexical diversity variant: {0}")]
pub struct ParseLexDivVariantError(String);

impl FromStr for LexDivVariant {
    type Err = ParseLexDivVariantError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "ttr" => Ok(LexDivVariant::Ttr),
            "summer" => Ok(LexDivVariant::Summer),
            "maas" => Ok(LexDivVariant::Maas),
            _ => Err(ParseLexDivVariantError(s.to_string())),
        }
    }
}

/// Sort keys for the members of a collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortKey {
    #[serde(rename = "title")]
    Title,
    #[serde(rename = "author")]
    Author,
    #[serde(rename = "date")]
    Date,
    #[serde(rename = "word_count")]
    WordCount,
    #[serde(rename = "file_name")]
    FileName,
}

#[derive(Error, Debug, PartialEq, Eq)]
#[error("Invalid sort key: {0}")]
pub struct ParseSortKeyError(String);

impl FromStr for SortKey {
    type Err = ParseSortKeyError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "title" => Ok(SortKey::Title),
            "author" => Ok(SortKey::Author),
            "date" => Ok(SortKey::Date),
            "word_count" => Ok(SortKey::WordCount),
            "file_name" => Ok(SortKey::FileName),
            _ => Err(ParseSortKeyError(s.to_string())),
        }
    }
}

/// A file of a collection folder that could not be turned into a document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkippedFile {
    pub path: PathBuf,
    pub reason: String,
}
