use std::collections::HashMap;
use lazy_static::lazy_static;

lazy_static! {
    /// Character substitutions applied to a paragraph before splitting it
    /// into words. `None` deletes the character.
    static ref SUBSTITUTIONS: HashMap<char, Option<char>> = {
        let mut m = HashMap::new();

        // Quote marks. The closing curly single quote is the typographic
        // apostrophe, it is kept as a straight one for contractions.
        for c in ['"', '\u{201C}', '\u{201D}', '\u{2018}'] {
            m.insert(c, None);
        }
        m.insert('\u{2019}', Some('\''));

        // Dashes become a space, removing them would fuse the two words.
        for c in ['-', '\u{2012}', '\u{2013}', '\u{2014}', '\u{2015}'] {
            m.insert(c, Some(' '));
        }

        for c in "!?#$%&\\()*+,./:;<=>@[]~_`{}0123456789".chars() {
            m.insert(c, None);
        }

        m
    };
}

/// Apply the substitution table to a single paragraph.
pub fn normalize_paragraph(paragraph: &str) -> String {
    paragraph
        .trim()
        .chars()
        .filter_map(|c| match SUBSTITUTIONS.get(&c) {
            Some(replacement) => *replacement,
            None => Some(c),
        })
        .collect()
}

/// Strip quote marks at the edges of a word and uppercase it.
///
/// Interior apostrophes survive, so DON'T stays one token.
pub fn clean_token(word: &str) -> String {
    word.trim_matches(|c| c == '\'' || c == ' ').to_uppercase()
}

/// Turn body paragraphs into a flat sequence of uppercase word tokens.
///
/// Order is preserved and duplicates are kept. Words which are empty
/// after cleaning (e.g. `$5`) are dropped.
pub fn tokenize<S: AsRef<str>>(body: &[S]) -> Vec<String> {
    let mut words = Vec::new();
    for paragraph in body {
        let clean = normalize_paragraph(paragraph.as_ref());
        words.extend(
            clean
                .split_whitespace()
                .map(clean_token)
                .filter(|w| !w.is_empty()),
        );
    }
    words
}
