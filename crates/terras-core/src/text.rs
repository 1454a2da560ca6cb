use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Fold text for label matching: decompose, drop combining marks, lowercase, trim.
///
/// "Município" and "MUNICIPIO" both fold to "municipio".
pub fn fold(s: &str) -> String {
    s.nfkd()
        .filter(|c| !is_combining_mark(*c))
        .collect::<String>()
        .to_lowercase()
        .trim()
        .to_string()
}

/// Collapse runs of whitespace into single spaces.
pub fn collapse_ws(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

pub fn has_digit(s: &str) -> bool {
    s.chars().any(char::is_numeric)
}
