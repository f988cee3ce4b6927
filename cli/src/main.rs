use std::path::{Path, PathBuf};
use std::process::exit;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use dotenvy::dotenv;

use textos_backend::app_settings::AppSettings;
use textos_backend::dir_list::{format_size, list_document_files};
use textos_backend::helpers::{load_document, sanitize_file_stem};
use textos_backend::{get_create_textos_dir, logger};
use textos_backend::{Collection, Extract, LexDivVariant, LexicalAnalyzer, Lexicon, SortKey, Text};

fn na<T: std::fmt::Display>(value: textos_backend::Result<T>) -> String {
    match value {
        Ok(v) => v.to_string(),
        Err(e) => {
            logger::debug(&format!("{}", e));
            "N/A".to_string()
        }
    }
}

fn analyze(path: &Path, variant: LexDivVariant, lexicon: &Lexicon, settings: &AppSettings) -> Result<()> {
    let doc = load_document(path)?;
    let a = LexicalAnalyzer::new(&doc, lexicon)
        .with_keyword_count(settings.keyword_count)
        .with_words_per_minute(settings.words_per_minute);

    println!("{}", doc.title().bold());
    if let Some(subtitle) = doc.subtitle() {
        println!("{}", subtitle.italic());
    }
    println!("{} {}", "Author:".dimmed(), doc.author());
    println!("{} {}", "Date:".dimmed(), doc.date());
    println!("{} {}", "Type:".dimmed(), doc.text_type().unwrap_or(""));
    println!("{} {}", "Genre:".dimmed(), doc.genre().unwrap_or(""));
    println!("{} {}", "Source:".dimmed(), doc.source());
    println!();
    println!("{} {}", "Paragraphs:".dimmed(), doc.paragraph_count());
    println!("{} {}", "Word count:".dimmed(), a.token_count());
    println!("{} {}", "Types:".dimmed(), a.type_count());
    println!("{} {}", format!("LexDiv ({}):", variant.as_str()).dimmed(), na(a.lex_div(variant)));
    println!("{} {}", "Hapax richness:".dimmed(), na(a.hapax_richness().map(|v| format!("{:.2}", v))));
    println!("{} {}", "Avg word length:".dimmed(), na(a.avg_word_len()));
    println!("{} {}", "Avg sentence length:".dimmed(), na(a.avg_sent_len()));
    println!("{} {}", "Reading time (min):".dimmed(), na(a.reading_time()));
    println!("{} {}", "Keywords:".dimmed(), a.keywords().green());

    Ok(())
}

fn print_tokens(path: &Path, lexicon: &Lexicon) -> Result<()> {
    let doc = load_document(path)?;
    for token in LexicalAnalyzer::new(&doc, lexicon).tokens() {
        println!("{}", token);
    }
    Ok(())
}

fn print_vocabulary(path: &Path, lexicon: &Lexicon) -> Result<()> {
    let doc = load_document(path)?;
    for word in LexicalAnalyzer::new(&doc, lexicon).vocabulary() {
        println!("{}", word);
    }
    Ok(())
}

fn word_freq(path: &Path, word: &str, lexicon: &Lexicon) -> Result<()> {
    let doc = load_document(path)?;
    println!("{}", LexicalAnalyzer::new(&doc, lexicon).word_freq(word));
    Ok(())
}

fn save_extract(
    path: &Path,
    begin: usize,
    end: usize,
    label: Option<String>,
    out_dir: Option<PathBuf>,
    settings: &AppSettings,
) -> Result<()> {
    let doc = load_document(path)?;
    let label = label.unwrap_or_else(|| settings.extract_label.clone());
    let extract = Extract::with_label(&doc, begin, end, &label)?;

    let out_dir = match out_dir {
        Some(d) => d,
        None => path.parent().map(|p| p.to_path_buf()).unwrap_or_default(),
    };

    let saved = extract.save_to_txt(&out_dir)?;
    logger::info(&format!("Saved extract of '{}' to {}", extract.parent_title(), saved.display()));
    println!("{}", saved.display());
    Ok(())
}

fn export_collection(
    folder: &Path,
    output: Option<PathBuf>,
    sort_by: Option<SortBy>,
    title: Option<String>,
    lexicon: &Lexicon,
    settings: &AppSettings,
) -> Result<()> {
    let mut collection = Collection::load(folder, title.as_deref())?;
    if let Some(key) = sort_by {
        collection.sort_by(key.into());
    }

    let output = output.unwrap_or_else(|| {
        folder.join(format!("{}.csv", sanitize_file_stem(&collection.title)))
    });

    collection.export_csv(&output, lexicon, settings)?;

    for skipped in collection.skipped() {
        eprintln!("{} {}: {}", "Skipped".yellow(), skipped.path.display(), skipped.reason);
    }
    println!(
        "{} {} documents to {}",
        "Exported".green(),
        collection.len(),
        output.display()
    );
    Ok(())
}

fn list_documents(folder: &Path, max_depth: usize) -> Result<()> {
    for entry in list_document_files(folder, max_depth)? {
        println!("{:>10}  {}", format_size(entry.size), entry.relative_path);
    }
    Ok(())
}

fn learn_words(textos_dir: &Path, words: &[String], settings: &AppSettings) -> Result<()> {
    let added = settings.learn_words(textos_dir, words)?;
    let path = settings.learned_words_path(textos_dir);
    logger::info(&format!("Learned {} new words into {}", added, path.display()));
    println!("{} {} new words to {}", "Added".green(), added, path.display());
    Ok(())
}

#[derive(Parser, Debug)]
#[command(author, version, about = "Textos CLI", long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Optional path to the Textos data directory.
    /// If not provided, the TEXTOS_DIR environment variable will be used.
    #[arg(long, global = true, value_name = "DIRECTORY_PATH", env = "TEXTOS_DIR")]
    textos_dir: Option<PathBuf>,

    /// Stopword list replacing the built-in English one, one word per line
    #[arg(long, global = true, value_name = "FILE_PATH")]
    stopwords: Option<PathBuf>,

    /// Known vocabulary replacing the built-in one, one word per line
    #[arg(long, global = true, value_name = "FILE_PATH")]
    vocabulary: Option<PathBuf>,

    /// Log file verbosity: silent, error, warn, info or debug
    #[arg(long, global = true, env = "LOG_LEVEL")]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print the metadata and metrics of a document
    #[command(arg_required_else_help = true)]
    Analyze {
        #[arg(value_name = "FILE_PATH")]
        path: PathBuf,

        /// Lexical diversity formula
        #[arg(long, value_enum, default_value_t = Variant::Maas)]
        variant: Variant,
    },

    /// Print the tokens of a document, one per line
    #[command(arg_required_else_help = true)]
    Tokens {
        #[arg(value_name = "FILE_PATH")]
        path: PathBuf,
    },

    /// Print the content words which are not in the known vocabulary
    #[command(arg_required_else_help = true)]
    Vocabulary {
        #[arg(value_name = "FILE_PATH")]
        path: PathBuf,
    },

    /// Print how often a word occurs (0 for stopwords)
    #[command(arg_required_else_help = true)]
    WordFreq {
        #[arg(value_name = "FILE_PATH")]
        path: PathBuf,

        word: String,
    },

    /// Save paragraphs BEGIN..END of a document as a new document
    #[command(arg_required_else_help = true)]
    Extract {
        #[arg(value_name = "FILE_PATH")]
        path: PathBuf,

        /// First paragraph, counting from 0
        begin: usize,

        /// One past the last paragraph
        end: usize,

        /// Prefix of the extract title, "Extract from" by default
        #[arg(long)]
        label: Option<String>,

        /// Folder to save to, the document's folder by default
        #[arg(long, value_name = "DIRECTORY_PATH")]
        out_dir: Option<PathBuf>,
    },

    /// Write one CSV row of metrics per document in a folder
    #[command(arg_required_else_help = true)]
    Export {
        #[arg(value_name = "DIRECTORY_PATH")]
        folder: PathBuf,

        /// CSV file to write, <folder>/<title>.csv by default
        #[arg(long, value_name = "FILE_PATH")]
        output: Option<PathBuf>,

        #[arg(long, value_enum)]
        sort_by: Option<SortBy>,

        /// Collection title
        #[arg(long)]
        title: Option<String>,
    },

    /// Add words to the known vocabulary, so they are no longer listed as unfamiliar
    #[command(arg_required_else_help = true)]
    Learn {
        #[arg(required = true)]
        words: Vec<String>,
    },

    /// List the document files in a folder
    #[command(arg_required_else_help = true)]
    List {
        #[arg(value_name = "DIRECTORY_PATH")]
        folder: PathBuf,

        #[arg(long, default_value_t = 1)]
        max_depth: usize,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum Variant {
    Ttr,
    Summer,
    Maas,
}

impl From<Variant> for LexDivVariant {
    fn from(v: Variant) -> Self {
        match v {
            Variant::Ttr => LexDivVariant::Ttr,
            Variant::Summer => LexDivVariant::Summer,
            Variant::Maas => LexDivVariant::Maas,
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum SortBy {
    Title,
    Author,
    Date,
    WordCount,
    FileName,
}

impl From<SortBy> for SortKey {
    fn from(s: SortBy) -> Self {
        match s {
            SortBy::Title => SortKey::Title,
            SortBy::Author => SortKey::Author,
            SortBy::Date => SortKey::Date,
            SortBy::WordCount => SortKey::WordCount,
            SortBy::FileName => SortKey::FileName,
        }
    }
}

fn load_settings(textos_dir: &Path, stopwords: Option<PathBuf>, vocabulary: Option<PathBuf>) -> Result<(AppSettings, Lexicon)> {
    let mut settings = AppSettings::load_from_dir(textos_dir)?;
    if stopwords.is_some() {
        settings.stopwords_path = stopwords;
    }
    if vocabulary.is_some() {
        settings.vocabulary_path = vocabulary;
    }
    let lexicon = settings.load_lexicon(textos_dir).context("Failed to load the lexicon")?;
    Ok((settings, lexicon))
}

fn main() {
    // A .env file may define TEXTOS_DIR, clap picks it up via `env = "TEXTOS_DIR"`.
    dotenv().ok();

    let cli = Cli::parse();

    // Precedence:
    // - given with --textos-dir
    // - set with env var TEXTOS_DIR
    // - get_create_textos_dir()
    let textos_dir = match cli.textos_dir {
        Some(path) => path,
        None => match get_create_textos_dir() {
            Ok(p) => p,
            Err(e) => {
                eprintln!("Failed to get Textos directory: {}", e);
                eprintln!("Use the --textos-dir option or set the TEXTOS_DIR environment variable.");
                exit(1);
            }
        },
    };

    if !textos_dir.is_dir() {
        eprintln!("Error: Directory does not exist or is not a directory: {:?}", textos_dir);
        exit(1);
    }

    logger::init(&textos_dir);

    if let Some(level) = &cli.log_level {
        if !logger::set_log_level_str(level) {
            eprintln!("Unknown log level '{}', using {}", level, logger::get_log_level().as_str());
        }
    }

    let (settings, lexicon) = match load_settings(&textos_dir, cli.stopwords, cli.vocabulary) {
        Ok(x) => x,
        Err(e) => {
            eprintln!("{} {:#}", "Error:".red(), e);
            exit(1);
        }
    };

    let command_result = match cli.command {
        Commands::Analyze { path, variant } => analyze(&path, variant.into(), &lexicon, &settings),
        Commands::Tokens { path } => print_tokens(&path, &lexicon),
        Commands::Vocabulary { path } => print_vocabulary(&path, &lexicon),
        Commands::WordFreq { path, word } => word_freq(&path, &word, &lexicon),
        Commands::Extract { path, begin, end, label, out_dir } => {
            save_extract(&path, begin, end, label, out_dir, &settings)
        }
        Commands::Export { folder, output, sort_by, title } => {
            export_collection(&folder, output, sort_by, title, &lexicon, &settings)
        }
        Commands::List { folder, max_depth } => list_documents(&folder, max_depth),
        Commands::Learn { words } => learn_words(&textos_dir, &words, &settings),
    };

    if let Err(e) = command_result {
        logger::error(&format!("{:#}", e));
        eprintln!("{} {:#}", "Error executing command:".red(), e);
        exit(1);
    }
}
