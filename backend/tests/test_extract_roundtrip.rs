mod helpers;

use textos_backend::helpers::load_document;
use textos_backend::{Document, Extract, Text, TextosError};

use helpers::{temp_dir, NEWS, WALDEN};

fn assert_same_text<A: Text, B: Text>(a: &A, b: &B) {
    assert_eq!(a.title(), b.title());
    assert_eq!(a.author(), b.author());
    assert_eq!(a.date(), b.date());
    assert_eq!(a.text_type(), b.text_type());
    assert_eq!(a.genre(), b.genre());
    assert_eq!(a.source(), b.source());
    assert_eq!(a.body(), b.body());
}

#[test]
fn test_parse_walden() {
    let doc = Document::from_text(WALDEN).unwrap();
    assert_eq!(doc.title(), "Walden");
    assert_eq!(doc.author(), "Henry David Thoreau");
    assert_eq!(doc.date(), "1854");
    assert_eq!(doc.subtitle(), Some("Life in the Woods"));
    assert_eq!(doc.text_type(), Some("Essay"));
    assert_eq!(doc.genre(), Some("Memoir"));
    assert_eq!(doc.source(), "https://www.gutenberg.org/ebooks/205");
    assert_eq!(doc.len(), 3);
    assert!(doc.body().iter().all(|p| !p.trim().is_empty()));
}

#[test]
fn test_parse_news_without_markers() {
    let doc = Document::from_text(NEWS).unwrap();
    assert_eq!(doc.subtitle(), None);
    assert_eq!(doc.text_type(), None);
    assert_eq!(doc.genre(), None);
    assert_eq!(doc.source(), "https://example.org/news/pond");
    assert_eq!(doc.body(), &["The pond froze overnight. Skaters gathered at dawn; the ice held."]);
}

#[test]
fn test_extract_lines_parse_back() {
    for text in [WALDEN, NEWS] {
        let doc = Document::from_text(text).unwrap();
        for begin in 0..doc.len() {
            for end in (begin + 1)..=doc.len() {
                let extract = Extract::new(&doc, begin, end).unwrap();
                let parsed = Document::parse(&extract.to_lines()).unwrap();
                assert_same_text(&extract, &parsed);
                assert_eq!(parsed.subtitle(), None);
            }
        }
    }
}

#[test]
fn test_extract_saved_and_loaded() {
    let dir = temp_dir("extract_saved");
    let doc = Document::from_text(WALDEN).unwrap();
    let extract = Extract::with_label(&doc, 1, 3, "Part of").unwrap();

    let path = extract.save_to_txt(&dir).unwrap();
    assert_eq!(path.file_name().and_then(|n| n.to_str()), Some("Part_of_Walden.txt"));

    let loaded = load_document(&path).unwrap();
    assert_same_text(&extract, &loaded);
    assert_eq!(loaded.file_name(), Some("Part_of_Walden.txt"));

    std::fs::remove_dir_all(dir).ok();
}

#[test]
fn test_extract_range_errors() {
    let doc = Document::from_text(WALDEN).unwrap();
    for (begin, end) in [(2, 2), (2, 1), (0, 4), (3, 5)] {
        match Extract::new(&doc, begin, end) {
            Err(TextosError::RangeError { len, .. }) => assert_eq!(len, 3),
            other => panic!("expected RangeError for {}..{}, got {:?}", begin, end, other),
        }
    }
}
