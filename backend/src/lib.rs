pub mod types;
pub mod tokenizer;
pub mod document_metadata;
pub mod document;
pub mod lexicon;
pub mod analyzer;
pub mod extract;
pub mod collection;
pub mod helpers;
pub mod export_helpers;
pub mod dir_list;
pub mod app_settings;
pub mod logger;

use std::env;
use std::fs::create_dir_all;
use std::path::PathBuf;
use std::error::Error;
use app_dirs::{get_app_root, AppDataType, AppInfo};

pub use analyzer::{FrequencyTable, LexicalAnalyzer, TextStats};
pub use collection::{Collection, CollectionRow};
pub use document::{Document, Text};
pub use extract::Extract;
pub use lexicon::Lexicon;
pub use tokenizer::tokenize;
pub use types::{LexDivVariant, Result, SortKey, TextosError};

pub const APP_INFO: AppInfo = AppInfo{name: "textos", author: "textos"};

/// The data directory for settings and logs.
///
/// Precedence:
/// - the TEXTOS_DIR environment variable (a .env file is read first)
/// - the platform's user data directory
pub fn get_create_textos_dir() -> std::result::Result<PathBuf, Box<dyn Error>> {
    dotenvy::dotenv().ok();

    let p = match env::var("TEXTOS_DIR") {
        Ok(s) if !s.is_empty() => PathBuf::from(s),
        _ => get_app_root(AppDataType::UserData, &APP_INFO)?,
    };

    if !p.exists() {
        create_dir_all(&p)?;
    }
    Ok(p)
}
