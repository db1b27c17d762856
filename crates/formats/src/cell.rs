//! Cell value representation for tabular datasets

use std::fmt;
use std::hash::{Hash, Hasher};

/// A single cell value, typed once at load time
#[derive(Debug, Clone)]
pub enum Cell {
    /// A numeric value (canonical f64 representation)
    Numeric(f64),
    /// A text value
    Text(String),
    /// An absent or null-marked value
    Missing,
}

impl Cell {
    /// True if this cell holds no value
    pub fn is_missing(&self) -> bool {
        matches!(self, Cell::Missing)
    }

    /// True if this cell holds a numeric value
    pub fn is_numeric(&self) -> bool {
        matches!(self, Cell::Numeric(_))
    }

    /// Get the numeric value if present
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Cell::Numeric(v) => Some(*v),
            _ => None,
        }
    }

    /// Get the text value if present
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Cell::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Canonical string form, as written to delimited output
    ///
    /// Numeric cells use f64 `Display` (`25`, not `25.0`); missing cells
    /// serialize as the empty string.
    pub fn canonical(&self) -> String {
        match self {
            Cell::Numeric(v) => format!("{v}"),
            Cell::Text(s) => s.clone(),
            Cell::Missing => String::new(),
        }
    }
}

/// Parse a raw field into a typed cell
///
/// A field is missing when it is empty or case-insensitively equal (after
/// trimming) to one of `null_markers`. Otherwise it is numeric when the
/// trimmed field parses fully as f64, else text. The original text is kept
/// untrimmed; whitespace handling belongs to standardization.
pub fn parse_cell(raw: &str, null_markers: &[String]) -> Cell {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Cell::Missing;
    }
    if null_markers
        .iter()
        .any(|m| m.eq_ignore_ascii_case(trimmed))
    {
        return Cell::Missing;
    }
    match trimmed.parse::<f64>() {
        Ok(v) => Cell::Numeric(v),
        Err(_) => Cell::Text(raw.to_string()),
    }
}

/// Default null markers recognized on read
pub fn default_null_markers() -> Vec<String> {
    ["na", "n/a", "null", "none", "nan"]
        .iter()
        .map(|s| (*s).to_string())
        .collect()
}

impl PartialEq for Cell {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            // Bitwise comparison keeps NaN == NaN and equality consistent
            // with the Hash impl.
            (Cell::Numeric(a), Cell::Numeric(b)) => a.to_bits() == b.to_bits(),
            (Cell::Text(a), Cell::Text(b)) => a == b,
            (Cell::Missing, Cell::Missing) => true,
            _ => false,
        }
    }
}

impl Eq for Cell {}

impl Hash for Cell {
    fn hash<H: Hasher>(&self, state: &mut H) {
        match self {
            Cell::Numeric(v) => {
                state.write_u8(0);
                state.write_u64(v.to_bits());
            }
            Cell::Text(s) => {
                state.write_u8(1);
                s.hash(state);
            }
            Cell::Missing => state.write_u8(2),
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.canonical())
    }
}
