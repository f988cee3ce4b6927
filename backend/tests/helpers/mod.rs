use std::fs;
use std::path::PathBuf;

use textos_backend::Lexicon;

pub const WALDEN: &str = "Walden
Henry David Thoreau
1854
*Life in the Woods*
I went to the woods because I wished to live deliberately, to front only the essential facts of life.

I wanted to live deep and suck out all the marrow of life.
Our life is frittered away by detail. Simplify, simplify.
+Essay
-Memoir
https://www.gutenberg.org/ebooks/205
";

#[allow(dead_code)]
pub const NEWS: &str = "Local Pond Freezes Early
Staff Reporter
2023-11-30
The pond froze overnight. Skaters gathered at dawn; the ice held.


https://example.org/news/pond
";

/// A fresh, empty directory under the system temp dir.
#[allow(dead_code)]
pub fn temp_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("textos_it_{}", name));
    fs::remove_dir_all(&dir).ok();
    fs::create_dir_all(&dir).unwrap();
    dir
}

#[allow(dead_code)]
pub fn empty_lexicon() -> Lexicon {
    Lexicon::new(Vec::<String>::new(), Vec::<String>::new())
}

/// A document with exactly `count` body tokens.
#[allow(dead_code)]
pub fn document_with_tokens(count: usize) -> String {
    const WORDS: [&str; 7] = ["alpha", "beta", "gamma", "delta", "epsilon", "zeta", "eta"];
    let words: Vec<&str> = (0..count).map(|i| WORDS[i % WORDS.len()]).collect();
    format!("Counted\nNobody\n2024\n{}\n\n\nSource", words.join(" "))
}
