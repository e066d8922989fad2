/// Course titles are rendered twice in the title cell (display + hidden
/// copy), one per line. Keep the first non-empty line.
pub fn normalize_title(raw: &str) -> String {
    raw.split('\n')
        .map(str::trim)
        .find(|segment| !segment.is_empty())
        .unwrap_or_else(|| raw.trim())
        .to_string()
}

/// Joins a multi-line lecturer cell and switches separators to their
/// full-width forms so listed names stay readable.
pub fn normalize_lecturer(raw: &str) -> String {
    raw.trim()
        .replace('\n', "")
        .replace(' ', "\u{3000}")
        .replace(',', "、")
}
