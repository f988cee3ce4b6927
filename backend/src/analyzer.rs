use std::collections::{BTreeSet, HashSet};

use indexmap::IndexMap;
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Serialize, Deserialize};

use crate::document::Text;
use crate::lexicon::Lexicon;
use crate::tokenizer::tokenize;
use crate::types::{LexDivVariant, Result, TextosError};

pub const KEYWORD_COUNT: usize = 10;
pub const WORDS_PER_MINUTE: u32 = 265;

lazy_static! {
    static ref RE_SENTENCE_END: Regex = Regex::new(r"[.!?\u{2026}]+").unwrap();
}

/// Round half away from zero to the given number of decimal digits.
pub fn round_to(value: f64, digits: i32) -> f64 {
    let factor = 10_f64.powi(digits);
    (value * factor).round() / factor
}

/// Occurrence counts of the non-stopword tokens of a text.
///
/// Iteration follows the order in which each word was first seen.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrequencyTable {
    counts: IndexMap<String, usize>,
}

impl FrequencyTable {
    pub fn from_tokens(tokens: &[String], lexicon: &Lexicon) -> Self {
        let mut counts: IndexMap<String, usize> = IndexMap::new();
        for token in tokens {
            if lexicon.is_stopword(token) {
                continue;
            }
            *counts.entry(token.to_uppercase()).or_insert(0) += 1;
        }
        FrequencyTable { counts }
    }

    pub fn get(&self, word: &str) -> usize {
        self.counts.get(&word.to_uppercase()).copied().unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.counts.iter().map(|(w, c)| (w.as_str(), *c))
    }

    /// Words occurring exactly once.
    pub fn hapax_count(&self) -> usize {
        self.counts.values().filter(|c| **c == 1).count()
    }

    /// The `n` most frequent words, highest count first.
    ///
    /// Ties keep first-occurrence order (the sort is stable over the
    /// insertion-ordered table), so the result is the same on every call.
    pub fn most_common(&self, n: usize) -> Vec<(&str, usize)> {
        let mut entries: Vec<(&str, usize)> = self.iter().collect();
        entries.sort_by(|a, b| b.1.cmp(&a.1));
        entries.truncate(n);
        entries
    }
}

/// Summary of every metric, with undefined values left empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextStats {
    pub word_count: usize,
    pub type_count: usize,
    pub lex_div: Option<f64>,
    pub hapax_richness: Option<f64>,
    pub avg_word_len: Option<f64>,
    pub avg_sent_len: Option<f64>,
    pub reading_time: Option<u64>,
    pub keywords: String,
}

/// Lexical metrics of a document or extract.
///
/// Tokens and the frequency table are computed once when the analyzer is
/// created. The body of a text never changes after parsing.
pub struct LexicalAnalyzer<'a> {
    body: &'a [String],
    lexicon: &'a Lexicon,
    tokens: Vec<String>,
    freq: FrequencyTable,
    keyword_count: usize,
    words_per_minute: u32,
}

impl<'a> LexicalAnalyzer<'a> {
    pub fn new<T: Text + ?Sized>(text: &'a T, lexicon: &'a Lexicon) -> Self {
        let body = text.body();
        let tokens = tokenize(body);
        let freq = FrequencyTable::from_tokens(&tokens, lexicon);

        LexicalAnalyzer {
            body,
            lexicon,
            tokens,
            freq,
            keyword_count: KEYWORD_COUNT,
            words_per_minute: WORDS_PER_MINUTE,
        }
    }

    pub fn with_keyword_count(mut self, keyword_count: usize) -> Self {
        self.keyword_count = keyword_count;
        self
    }

    /// A rate of 0 is raised to 1 word per minute. `AppSettings::load()`
    /// rejects 0 before it gets here.
    pub fn with_words_per_minute(mut self, words_per_minute: u32) -> Self {
        self.words_per_minute = words_per_minute.max(1);
        self
    }

    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    pub fn token_count(&self) -> usize {
        self.tokens.len()
    }

    pub fn type_count(&self) -> usize {
        self.tokens.iter().collect::<HashSet<_>>().len()
    }

    fn require_tokens(&self, metric: &'static str) -> Result<()> {
        if self.tokens.is_empty() {
            Err(TextosError::DivisionUndefined { metric })
        } else {
            Ok(())
        }
    }

    /// Ratios over the content words also need a non-empty frequency table.
    fn require_content(&self, metric: &'static str) -> Result<()> {
        self.require_tokens(metric)?;
        if self.freq.is_empty() {
            Err(TextosError::DivisionUndefined { metric })
        } else {
            Ok(())
        }
    }

    /// Reading time in whole minutes.
    pub fn reading_time(&self) -> Result<u64> {
        self.require_tokens("reading_time")?;
        let minutes = self.token_count() as f64 / self.words_per_minute as f64;
        Ok(minutes.round() as u64)
    }

    /// Mean token length in characters, over all tokens including stopwords.
    pub fn avg_word_len(&self) -> Result<f64> {
        self.require_tokens("avg_word_len")?;
        let total: usize = self.tokens.iter().map(|t| t.chars().count()).sum();
        Ok(round_to(total as f64 / self.token_count() as f64, 2))
    }

    /// Number of body segments ending in terminal punctuation (or the end of
    /// a paragraph) which contain at least one token.
    pub fn sentence_count(&self) -> usize {
        self.body
            .iter()
            .flat_map(|p| RE_SENTENCE_END.split(p))
            .filter(|s| !tokenize(&[*s]).is_empty())
            .count()
    }

    pub fn avg_sent_len(&self) -> Result<f64> {
        self.require_tokens("avg_sent_len")?;
        let sentences = self.sentence_count();
        if sentences == 0 {
            return Err(TextosError::DivisionUndefined { metric: "avg_sent_len" });
        }
        Ok(round_to(self.token_count() as f64 / sentences as f64, 2))
    }

    pub fn lex_div(&self, variant: LexDivVariant) -> Result<f64> {
        self.require_content("lex_div")?;

        let tokens = self.token_count() as f64;
        let types = self.type_count() as f64;

        match variant {
            LexDivVariant::Ttr => Ok(round_to(types / tokens, 4)),

            LexDivVariant::Summer => {
                if self.type_count() <= 1 || self.token_count() <= 1 {
                    return Err(TextosError::DomainError {
                        metric: "lex_div(summer)",
                        reason: format!(
                            "needs more than one token and type, got {} tokens and {} types",
                            self.token_count(),
                            self.type_count()
                        ),
                    });
                }
                Ok(round_to(types.ln().ln() / tokens.ln().ln(), 4))
            }

            LexDivVariant::Maas => {
                if self.token_count() <= 1 {
                    return Err(TextosError::DomainError {
                        metric: "lex_div(maas)",
                        reason: format!("needs more than one token, got {}", self.token_count()),
                    });
                }
                Ok((tokens.ln() - types.ln()) / tokens.ln().powi(2))
            }
        }
    }

    pub fn lex_div_maas(&self) -> Result<f64> {
        self.lex_div(LexDivVariant::Maas)
    }

    pub fn freq_dist(&self) -> &FrequencyTable {
        &self.freq
    }

    /// Percentage of tokens which are hapaxes of the frequency table.
    pub fn hapax_richness(&self) -> Result<f64> {
        self.require_content("hapax_richness")?;
        Ok(self.freq.hapax_count() as f64 / self.token_count() as f64 * 100.0)
    }

    /// The most frequent content words, separated by a space.
    pub fn keywords(&self) -> String {
        self.freq
            .most_common(self.keyword_count)
            .into_iter()
            .map(|(w, _)| w)
            .collect::<Vec<&str>>()
            .join(" ")
    }

    /// Occurrences of `word` among the content words. Stopwords and unused
    /// words return 0.
    pub fn word_freq(&self, word: &str) -> usize {
        self.freq.get(word)
    }

    /// Alphabetic content words not in the known vocabulary, sorted.
    pub fn vocabulary(&self) -> Vec<String> {
        let words: BTreeSet<String> = self.tokens
            .iter()
            .filter(|t| !self.lexicon.is_stopword(t))
            .map(|t| t.to_uppercase())
            .filter(|t| t.chars().all(char::is_alphabetic))
            .filter(|t| !self.lexicon.is_known(t))
            .collect();
        words.into_iter().collect()
    }

    pub fn stats(&self) -> TextStats {
        TextStats {
            word_count: self.token_count(),
            type_count: self.type_count(),
            lex_div: self.lex_div_maas().ok(),
            hapax_richness: self.hapax_richness().ok(),
            avg_word_len: self.avg_word_len().ok(),
            avg_sent_len: self.avg_sent_len().ok(),
            reading_time: self.reading_time().ok(),
            keywords: self.keywords(),
        }
    }
}
