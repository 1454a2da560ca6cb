//! Land-class nomenclature: canonical class codes and the mapping from the
//! legacy soil-type x mechanization labels.

use crate::text::fold;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

/// Category labels that already denote a class-code column.
pub const CANONICAL_CATEGORIES: &[&str] = &["Classe de Capacidade de Uso", "Classe de Terra"];

/// Capability group of a land class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ClassGroup {
    A,
    B,
    C,
}

impl ClassGroup {
    fn from_letter(c: char) -> Option<ClassGroup> {
        match c {
            'A' => Some(ClassGroup::A),
            'B' => Some(ClassGroup::B),
            'C' => Some(ClassGroup::C),
            _ => None,
        }
    }

    pub fn letter(&self) -> char {
        match self {
            ClassGroup::A => 'A',
            ClassGroup::B => 'B',
            ClassGroup::C => 'C',
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ClassGroup::A => "Grupo A - Terras Cultiváveis",
            ClassGroup::B => "Grupo B - Pastagens e Reflorestamento",
            ClassGroup::C => "Grupo C - Preservação",
        }
    }
}

impl fmt::Display for ClassGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

/// Canonical land-use capability class, e.g. `A-II` or `C-VIII`.
///
/// Ordered by group, then numeral.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ClassCode {
    group: ClassGroup,
    numeral: u8,
}

impl ClassCode {
    pub fn group(&self) -> ClassGroup {
        self.group
    }

    pub fn numeral(&self) -> u8 {
        self.numeral
    }

    /// SIPT label, e.g. "Lavoura - Aptidão Boa (Classe I)". None outside I-VIII.
    pub fn label(&self) -> Option<&'static str> {
        match self.numeral {
            1 => Some("Lavoura - Aptidão Boa (Classe I)"),
            2 => Some("Lavoura - Aptidão Boa (Classe II)"),
            3 => Some("Lavoura - Aptidão Regular (Classe III)"),
            4 => Some("Lavoura - Aptidão Restrita (Classe IV)"),
            5 => Some("Pastagem Plantada (Classe V)"),
            6 => Some("Pastagem Plantada (Classe VI)"),
            7 => Some("Silvicultura - Pastagem Natural (Classe VII)"),
            8 => Some("Preservação da Flora (Classe VIII)"),
            _ => None,
        }
    }
}

impl fmt::Display for ClassCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.group, to_roman(self.numeral))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidClassCode(pub String);

impl fmt::Display for InvalidClassCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid class code '{}'", self.0)
    }
}

impl std::error::Error for InvalidClassCode {}

impl FromStr for ClassCode {
    type Err = InvalidClassCode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || InvalidClassCode(s.to_string());
        let (letter, roman) = s.split_once('-').ok_or_else(invalid)?;
        let mut letters = letter.chars();
        let group = match (letters.next(), letters.next()) {
            (Some(c), None) => ClassGroup::from_letter(c).ok_or_else(invalid)?,
            _ => return Err(invalid()),
        };
        let numeral = from_roman(roman).ok_or_else(invalid)?;
        Ok(ClassCode { group, numeral })
    }
}

impl Serialize for ClassCode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ClassCode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Roman numerals from I..XXXIX written with I, V and X.
fn to_roman(mut n: u8) -> String {
    let mut out = String::new();
    for (value, digits) in [(10, "X"), (9, "IX"), (5, "V"), (4, "IV"), (1, "I")] {
        while n >= value {
            out.push_str(digits);
            n -= value;
        }
    }
    out
}

/// Parse a canonical I/V/X numeral; non-canonical spellings ("IIII") are rejected.
fn from_roman(s: &str) -> Option<u8> {
    if s.is_empty() || s.len() > 8 {
        return None;
    }
    let mut total: i32 = 0;
    let mut prev = 0;
    for c in s.chars().rev() {
        let v = match c {
            'I' => 1,
            'V' => 5,
            'X' => 10,
            _ => return None,
        };
        if v < prev {
            total -= v;
        } else {
            total += v;
            prev = v;
        }
    }
    let n = u8::try_from(total).ok().filter(|n| *n > 0)?;
    (to_roman(n) == s).then_some(n)
}

/// Legacy (soil type, mechanization) pairs and the class they map to.
const LEGACY_PAIRS: &[(&str, &str, &str)] = &[
    ("Roxa", "Mecanizada", "A-I"),
    ("Roxa", "Mecanizável", "A-II"),
    ("Roxa", "Não Mecanizável", "B-VI"),
    ("Roxa", "Inaproveitáveis", "C-VIII"),
    ("Mista", "Mecanizada", "A-II"),
    ("Mista", "Mecanizável", "A-III"),
    ("Mista", "Não Mecanizável", "B-VII"),
    ("Mista", "Inaproveitáveis", "C-VIII"),
    ("Arenosa", "Mecanizada", "A-III"),
    ("Arenosa", "Mecanizável", "A-IV"),
    ("Arenosa", "Não Mecanizável", "B-VII"),
    ("Arenosa", "Inaproveitáveis", "C-VIII"),
];

fn legacy_key(categoria: &str, subcategoria: &str) -> String {
    format!("{}|{}", fold(categoria), fold(subcategoria))
}

static LEGACY_MAP: LazyLock<HashMap<String, ClassCode>> = LazyLock::new(|| {
    LEGACY_PAIRS
        .iter()
        .filter_map(|(cat, sub, code)| Some((legacy_key(cat, sub), code.parse().ok()?)))
        .collect()
});

/// Resolve a (categoria, subcategoria) pair to its canonical class, if any.
///
/// Lookup order: canonical category with a class code, the legacy table,
/// then a subcategory that is a class code on its own.
pub fn resolve_class(categoria: &str, subcategoria: &str) -> Option<ClassCode> {
    let code = subcategoria.trim().parse::<ClassCode>().ok();
    if code.is_some() && CANONICAL_CATEGORIES.contains(&categoria.trim()) {
        return code;
    }
    if let Some(mapped) = LEGACY_MAP.get(&legacy_key(categoria, subcategoria)) {
        return Some(*mapped);
    }
    code
}

/// Normalize a pair to (group letter, class code).
///
/// Unmapped pairs are returned unchanged.
pub fn normalize_nomenclature(categoria: &str, subcategoria: &str) -> (String, String) {
    match resolve_class(categoria, subcategoria) {
        Some(code) => (code.group().to_string(), code.to_string()),
        None => (categoria.to_string(), subcategoria.to_string()),
    }
}
