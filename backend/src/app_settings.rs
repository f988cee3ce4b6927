use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use serde::{Serialize, Deserialize};

use crate::analyzer::{KEYWORD_COUNT, WORDS_PER_MINUTE};
use crate::extract::DEFAULT_EXTRACT_LABEL;
use crate::lexicon::{append_word_list, read_word_list, Lexicon};

pub const SETTINGS_FILE_NAME: &str = "settings.json";
pub const LEARNED_WORDS_FILE_NAME: &str = "learned_words.txt";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppSettings {
    pub keyword_count: usize,
    pub words_per_minute: u32,
    pub extract_label: String,
    // newline-delimited word lists replacing the built-in ones
    pub stopwords_path: Option<PathBuf>,
    pub vocabulary_path: Option<PathBuf>,
}

impl Default for AppSettings {
    fn default() -> Self {
        AppSettings {
            keyword_count: KEYWORD_COUNT,
            words_per_minute: WORDS_PER_MINUTE,
            extract_label: DEFAULT_EXTRACT_LABEL.to_string(),
            stopwords_path: None,
            vocabulary_path: None,
        }
    }
}

impl AppSettings {
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings from {:?}", path))?;
        let settings: AppSettings = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse settings JSON in {:?}", path))?;
        if settings.words_per_minute == 0 {
            bail!("words_per_minute must be greater than 0 in {:?}", path);
        }
        Ok(settings)
    }

    /// Load `settings.json` from the data directory, or the defaults when
    /// there is no such file.
    pub fn load_from_dir(textos_dir: &Path) -> Result<Self> {
        let path = textos_dir.join(SETTINGS_FILE_NAME);
        if path.is_file() {
            AppSettings::load(&path)
        } else {
            Ok(AppSettings::default())
        }
    }

    pub fn lexicon(&self) -> Result<Lexicon> {
        let lexicon = Lexicon::from_files(self.stopwords_path.as_deref(), self.vocabulary_path.as_deref())
            .context("Failed to load word lists")?;
        Ok(lexicon)
    }

    /// Where learned words are written: the custom vocabulary file when one
    /// is set, otherwise a list in the data directory which extends the
    /// built-in vocabulary.
    pub fn learned_words_path(&self, textos_dir: &Path) -> PathBuf {
        match &self.vocabulary_path {
            Some(p) => p.clone(),
            None => textos_dir.join(LEARNED_WORDS_FILE_NAME),
        }
    }

    /// The lexicon including the words learned so far.
    pub fn load_lexicon(&self, textos_dir: &Path) -> Result<Lexicon> {
        let mut lexicon = self.lexicon()?;
        if self.vocabulary_path.is_none() {
            let learned = textos_dir.join(LEARNED_WORDS_FILE_NAME);
            if learned.is_file() {
                let words = read_word_list(&learned)
                    .with_context(|| format!("Failed to read learned words from {:?}", learned))?;
                lexicon.add_known(words);
            }
        }
        Ok(lexicon)
    }

    /// Persist words as known, returns how many were new to the list.
    pub fn learn_words<S: AsRef<str>>(&self, textos_dir: &Path, words: &[S]) -> Result<usize> {
        let path = self.learned_words_path(textos_dir);
        let added = append_word_list(&path, words)
            .with_context(|| format!("Failed to add words to {:?}", path))?;
        Ok(added)
    }
}
