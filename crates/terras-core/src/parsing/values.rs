/// Parse a Brazilian-formatted number token into a float.
///
/// Handles formats like:
/// - "1.234,56" -> 1234.56 (dot thousands, comma decimal)
/// - "R$ 2.000,50" -> 2000.50
/// - "987" -> 987.0
/// - "", "-" or "—" -> None
///
/// Anything that still fails to parse after cleanup is also None.
pub fn parse_number(token: &str) -> Option<f64> {
    let s = token.trim();

    if s.is_empty() || s == "-" || s == "—" {
        return None;
    }

    let cleaned: String = s
        .replace('.', "")
        .replace("R$", "")
        .chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| if c == ',' { '.' } else { c })
        .collect();

    cleaned.parse::<f64>().ok()
}

/// Format a float in the canonical form read back by [`parse_number`]:
/// no thousands separator, comma decimal, shortest round-trip digits.
pub fn format_number(value: f64) -> String {
    value.to_string().replace('.', ",")
}
