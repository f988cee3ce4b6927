use std::path::Path;

use crate::collection::CollectionRow;
use crate::helpers::write_text_lines;
use crate::types::Result;

/// Column set of the collection export.
pub const CSV_HEADER: [&str; 12] = [
    "File",
    "Author",
    "Date",
    "Text_Type",
    "Genre",
    "Wordcount",
    "LexDiv",
    "Hapax_Richness",
    "Avg_Word_Len",
    "Avg_Sent_Len",
    "Read_Time",
    "Keywords",
];

pub const NOT_AVAILABLE: &str = "N/A";

pub fn escape_csv_field(field: &str) -> String {
    let escaped = field.replace('"', "\"\"");
    if escaped.contains([',', '\n', '\r', '"']) {
        format!("\"{}\"", escaped)
    } else {
        escaped
    }
}

pub fn format_csv_row<S: AsRef<str>>(fields: &[S]) -> String {
    fields
        .iter()
        .map(|f| escape_csv_field(f.as_ref()))
        .collect::<Vec<String>>()
        .join(",")
}

fn format_metric(value: Option<f64>, decimals: usize) -> String {
    value.map_or(NOT_AVAILABLE.to_string(), |v| format!("{:.*}", decimals, v))
}

/// The fields of one row, in `CSV_HEADER` order.
pub fn row_fields(row: &CollectionRow) -> Vec<String> {
    vec![
        row.file.clone(),
        row.author.clone(),
        row.date.clone(),
        row.text_type.clone().unwrap_or_default(),
        row.genre.clone().unwrap_or_default(),
        row.stats.word_count.to_string(),
        format_metric(row.stats.lex_div, 4),
        format_metric(row.stats.hapax_richness, 2),
        format_metric(row.stats.avg_word_len, 2),
        format_metric(row.stats.avg_sent_len, 2),
        row.stats.reading_time.map_or(NOT_AVAILABLE.to_string(), |m| m.to_string()),
        row.stats.keywords.clone(),
    ]
}

pub fn generate_collection_csv(rows: &[CollectionRow]) -> String {
    let mut csv_lines = Vec::with_capacity(rows.len() + 1);
    csv_lines.push(format_csv_row(&CSV_HEADER));
    for row in rows {
        csv_lines.push(format_csv_row(&row_fields(row)));
    }
    csv_lines.join("\n")
}

pub fn export_collection_csv(rows: &[CollectionRow], path: &Path) -> Result<()> {
    write_text_lines(path, &[generate_collection_csv(rows)])
}
