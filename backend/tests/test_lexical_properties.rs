mod helpers;

use textos_backend::{tokenize, Document, LexDivVariant, LexicalAnalyzer, Lexicon, Text, TextosError};

use helpers::{document_with_tokens, NEWS, WALDEN};

#[test]
fn test_type_count_never_exceeds_token_count() {
    let lexicon = Lexicon::english();
    for text in [WALDEN, NEWS] {
        let doc = Document::from_text(text).unwrap();
        let a = LexicalAnalyzer::new(&doc, &lexicon);
        assert!(a.token_count() > 0);
        assert!(a.type_count() <= a.token_count());
    }
}

#[test]
fn test_ttr_in_unit_interval() {
    let lexicon = Lexicon::english();
    for text in [WALDEN, NEWS] {
        let doc = Document::from_text(text).unwrap();
        let ttr = LexicalAnalyzer::new(&doc, &lexicon).lex_div(LexDivVariant::Ttr).unwrap();
        assert!(ttr > 0.0 && ttr <= 1.0, "ttr out of range: {}", ttr);
    }
}

#[test]
fn test_tokenize_contraction_and_em_dash() {
    assert_eq!(
        tokenize(&["Don't stop\u{2014}believe!"]),
        vec!["DON'T", "STOP", "BELIEVE"]
    );
    assert_eq!(
        tokenize(&["Don\u{2019}t stop-believe!"]),
        vec!["DON'T", "STOP", "BELIEVE"]
    );
}

#[test]
fn test_word_freq_of_stopword_is_zero() {
    let doc = Document::from_text(
        "T\nA\nD\nThe the THE the. The end of the story.\n\n\nSource",
    ).unwrap();
    let lexicon = Lexicon::english();
    let a = LexicalAnalyzer::new(&doc, &lexicon);
    assert_eq!(a.tokens().iter().filter(|t| *t == "THE").count(), 6);
    assert_eq!(a.word_freq("the"), 0);
    assert_eq!(a.word_freq("THE"), 0);
    assert_eq!(a.word_freq("story"), 1);
}

#[test]
fn test_only_stopwords_is_division_undefined() {
    let doc = Document::from_text("T\nA\nD\nAnd then it was there.\n\n\nSource").unwrap();
    let lexicon = Lexicon::english();
    let a = LexicalAnalyzer::new(&doc, &lexicon);

    assert!(a.token_count() > 0);
    assert!(a.freq_dist().is_empty());
    assert!(matches!(a.hapax_richness(), Err(TextosError::DivisionUndefined { .. })));
    assert!(matches!(a.lex_div(LexDivVariant::Maas), Err(TextosError::DivisionUndefined { .. })));
    assert!(matches!(a.lex_div(LexDivVariant::Ttr), Err(TextosError::DivisionUndefined { .. })));
}

#[test]
fn test_empty_body_is_division_undefined() {
    let doc = Document::from_text("T\nA\nD\nSource").unwrap();
    let lexicon = Lexicon::english();
    let a = LexicalAnalyzer::new(&doc, &lexicon);

    assert_eq!(a.token_count(), 0);
    assert!(matches!(a.hapax_richness(), Err(TextosError::DivisionUndefined { .. })));
    assert!(matches!(a.lex_div_maas(), Err(TextosError::DivisionUndefined { .. })));
    assert!(matches!(a.reading_time(), Err(TextosError::DivisionUndefined { .. })));
}

#[test]
fn test_reading_time() {
    let lexicon = Lexicon::english();

    let doc = Document::from_text(&document_with_tokens(265)).unwrap();
    let a = LexicalAnalyzer::new(&doc, &lexicon);
    assert_eq!(a.token_count(), 265);
    assert_eq!(a.reading_time().unwrap(), 1);

    // 397 / 265 = 1.498
    let doc = Document::from_text(&document_with_tokens(397)).unwrap();
    assert_eq!(LexicalAnalyzer::new(&doc, &lexicon).reading_time().unwrap(), 1);

    // 398 / 265 = 1.502
    let doc = Document::from_text(&document_with_tokens(398)).unwrap();
    assert_eq!(LexicalAnalyzer::new(&doc, &lexicon).reading_time().unwrap(), 2);

    let doc = Document::from_text(&document_with_tokens(100)).unwrap();
    assert_eq!(LexicalAnalyzer::new(&doc, &lexicon).reading_time().unwrap(), 0);

    let doc = Document::from_text(&document_with_tokens(0)).unwrap();
    assert!(matches!(
        LexicalAnalyzer::new(&doc, &lexicon).reading_time(),
        Err(TextosError::DivisionUndefined { .. })
    ));
}

#[test]
fn test_keywords_are_stable() {
    let doc = Document::from_text(WALDEN).unwrap();
    let lexicon = Lexicon::english();
    let a = LexicalAnalyzer::new(&doc, &lexicon);

    let first = a.keywords();
    assert_eq!(first, a.keywords());
    assert_eq!(first, LexicalAnalyzer::new(&doc, &lexicon).keywords());
    assert!(first.starts_with("LIFE LIVE SIMPLIFY"), "keywords: {}", first);
}

#[test]
fn test_walden_metrics() {
    let doc = Document::from_text(WALDEN).unwrap();
    let lexicon = Lexicon::english();
    let a = LexicalAnalyzer::new(&doc, &lexicon);

    assert_eq!(doc.paragraph_count(), 3);
    assert_eq!(a.freq_dist().get("life"), 3);
    assert_eq!(a.word_freq("Simplify"), 2);
    assert!(a.vocabulary().contains(&"MARROW".to_string()));
    assert!(!a.vocabulary().contains(&"LIFE".to_string()));
    assert_eq!(a.reading_time().unwrap(), 0);
    assert!(a.hapax_richness().unwrap() > 0.0);
    assert!(a.lex_div(LexDivVariant::Summer).is_ok());
}

#[test]
fn test_learned_word_leaves_vocabulary() {
    let doc = Document::from_text(WALDEN).unwrap();
    let mut lexicon = Lexicon::english();

    let before = LexicalAnalyzer::new(&doc, &lexicon).vocabulary();
    assert!(before.contains(&"MARROW".to_string()));

    assert_eq!(lexicon.add_known(["marrow"]), 1);
    let after = LexicalAnalyzer::new(&doc, &lexicon).vocabulary();
    assert!(!after.contains(&"MARROW".to_string()));
    assert_eq!(after.len(), before.len() - 1);
}
