use crate::text::fold;
use regex::Regex;
use std::sync::LazyLock;

static RE_YEAR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(19\d{2}|20\d{2})\b").expect("valid year regex"));

static RE_CLASS_CODE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([A-Z])-\s*([IVX]+)").expect("valid class code regex"));

static RE_NUMBER_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d+(?:[.,]\d+)*|[-—]").expect("valid number token regex"));

static RE_FILENAME_YEAR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"_(\d{2})(?:_|\.|$)").expect("valid filename year regex"));

/// Line prefixes of source citations and table titles.
const BOILERPLATE_PREFIXES: &[&str] = &["Fonte:", "PREÇOS", "Preços"];

/// Two-digit years up to this value belong to the 2000s.
const CENTURY_PIVOT: i32 = 30;

pub fn is_boilerplate(line: &str) -> bool {
    BOILERPLATE_PREFIXES.iter().any(|p| line.starts_with(p))
}

/// Header lines of both layouts name the municipality column.
pub fn is_header_line(line: &str) -> bool {
    fold(line).contains("municipio")
}

/// All years between 1900 and 2099 in a header line, left to right.
pub fn extract_years(line: &str) -> Vec<i32> {
    RE_YEAR
        .captures_iter(line)
        .filter_map(|c| c[1].parse().ok())
        .collect()
}

/// All `letter-roman` pairs in a header line, e.g. "A- I" -> "A-I".
pub fn extract_class_codes(line: &str) -> Vec<String> {
    RE_CLASS_CODE
        .captures_iter(line)
        .map(|c| format!("{}-{}", &c[1], &c[2]))
        .collect()
}

/// Numeric tokens of a data line, left to right.
///
/// A token is a run of digit groups joined by `.` or `,` ("1.234,56"),
/// or a bare dash placeholder for an empty cell.
pub fn number_tokens(s: &str) -> Vec<&str> {
    RE_NUMBER_TOKEN.find_iter(s).map(|m| m.as_str()).collect()
}

/// Year hint from a report filename's two-digit suffix, e.g. "precos_terras_10.pdf" -> 2010.
pub fn year_from_filename(filename: &str) -> Option<i32> {
    let caps = RE_FILENAME_YEAR.captures(filename)?;
    let year: i32 = caps[1].parse().ok()?;
    if year <= CENTURY_PIVOT {
        Some(2000 + year)
    } else {
        Some(1900 + year)
    }
}
