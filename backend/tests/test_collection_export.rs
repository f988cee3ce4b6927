mod helpers;

use std::fs;

use textos_backend::app_settings::AppSettings;
use textos_backend::export_helpers::CSV_HEADER;
use textos_backend::{Collection, Lexicon, SortKey, TextosError};

use helpers::{temp_dir, NEWS, WALDEN};

#[test]
fn test_load_skips_malformed_files() {
    let dir = temp_dir("collection_skips");
    fs::write(dir.join("walden.txt"), WALDEN).unwrap();
    fs::write(dir.join("news.TXT"), NEWS).unwrap();
    fs::write(dir.join("broken.txt"), "Only a title\nand an author\n").unwrap();
    fs::write(dir.join("notes.md"), WALDEN).unwrap();
    fs::create_dir_all(dir.join("nested")).unwrap();
    fs::write(dir.join("nested").join("deep.txt"), WALDEN).unwrap();

    let c = Collection::load(&dir, Some("Ponds")).unwrap();
    assert_eq!(c.title, "Ponds");
    assert_eq!(c.len(), 2);
    assert_eq!(c.skipped().len(), 1);
    assert!(c.skipped()[0].path.ends_with("broken.txt"));
    assert!(c.find_by_title("walden").is_some());

    fs::remove_dir_all(dir).ok();
}

#[test]
fn test_load_missing_folder() {
    let dir = temp_dir("collection_missing").join("not_here");
    assert!(matches!(
        Collection::load(&dir, None),
        Err(TextosError::UnreadableSource { .. })
    ));
}

#[test]
fn test_export_csv() {
    let dir = temp_dir("collection_export");
    fs::write(dir.join("walden.txt"), WALDEN).unwrap();
    fs::write(dir.join("news.txt"), NEWS).unwrap();

    let mut c = Collection::load(&dir, None).unwrap();
    c.sort_by(SortKey::Title);

    let out = dir.join("out").join("report.csv");
    c.export_csv(&out, &Lexicon::english(), &AppSettings::default()).unwrap();

    let csv = fs::read_to_string(&out).unwrap();
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(lines.len(), 3);
    assert_eq!(lines[0], CSV_HEADER.join(","));
    assert!(lines[1].starts_with("news.txt,Staff Reporter,2023-11-30,,,"));
    assert!(lines[2].starts_with("walden.txt,Henry David Thoreau,1854,Essay,Memoir,"));
    assert!(lines[2].ends_with(",0,LIFE LIVE SIMPLIFY WENT WOODS WISHED DELIBERATELY FRONT ESSENTIAL FACTS"));

    fs::remove_dir_all(dir).ok();
}

#[test]
fn test_export_empty_collection_writes_header() {
    let dir = temp_dir("collection_empty");
    let c = Collection::load(&dir, None).unwrap();
    assert!(c.is_empty());

    let out = dir.join("empty.csv");
    c.export_csv(&out, &Lexicon::english(), &AppSettings::default()).unwrap();
    assert_eq!(fs::read_to_string(&out).unwrap().trim_end(), CSV_HEADER.join(","));

    fs::remove_dir_all(dir).ok();
}
