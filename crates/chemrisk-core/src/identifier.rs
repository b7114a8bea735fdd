use serde::{Deserialize, Serialize};
use std::fmt;

/// Lexical category of a user-supplied compound query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IdentifierKind {
    /// PubChem compound ID (all digits).
    Cid,
    /// Molecular formula such as "C6H12O6" or "NaCl".
    Formula,
    /// Full InChI string ("InChI=...").
    Inchi,
    /// Hashed InChIKey (14-10-1 uppercase letters).
    InchiKey,
    /// Free-text compound name (catch-all).
    Name,
}

impl fmt::Display for IdentifierKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IdentifierKind::Cid => write!(f, "cid"),
            IdentifierKind::Formula => write!(f, "formula"),
            IdentifierKind::Inchi => write!(f, "inchi"),
            IdentifierKind::InchiKey => write!(f, "inchikey"),
            IdentifierKind::Name => write!(f, "name"),
        }
    }
}

/// A raw query string together with its inferred kind. Immutable once built.
#[derive(Debug, Clone)]
pub struct Identifier {
    pub raw: String,
    pub kind: IdentifierKind,
}

impl Identifier {
    /// Classify a raw query. Total: never fails, defaults to `Name`.
    ///
    /// Rules are checked in order, first match wins:
    /// 1. all digits -> Cid
    /// 2. formula-shaped, < 50 chars, with a digit or two uppercase letters
    ///    or a bare element symbol -> Formula
    /// 3. "InChI=" prefix -> Inchi
    /// 4. 14-10-1 uppercase letter groups -> InchiKey
    /// 5. anything else -> Name
    pub fn classify(query: &str) -> Identifier {
        let trimmed = query.trim();
        Identifier {
            raw: trimmed.to_string(),
            kind: classify_kind(trimmed),
        }
    }
}

/// Single- and double-letter element symbols accepted as bare formulas.
const BARE_ELEMENTS: [&str; 10] = ["H", "O", "N", "C", "S", "P", "F", "Cl", "Br", "I"];

fn classify_kind(query: &str) -> IdentifierKind {
    if !query.is_empty() && query.chars().all(|c| c.is_ascii_digit()) {
        return IdentifierKind::Cid;
    }
    if looks_like_formula(query) {
        return IdentifierKind::Formula;
    }
    if query.starts_with("InChI=") {
        return IdentifierKind::Inchi;
    }
    if looks_like_inchikey(query) {
        return IdentifierKind::InchiKey;
    }
    IdentifierKind::Name
}

/// Matches `([A-Z][a-z]?\d*)+` with length < 50, requiring at least one
/// digit, two uppercase letters, or a known bare element symbol.
fn looks_like_formula(query: &str) -> bool {
    if query.is_empty() || query.len() >= 50 {
        return false;
    }
    if !has_formula_shape(query) {
        return false;
    }
    let has_digit = query.chars().any(|c| c.is_ascii_digit());
    let uppercase_count = query.chars().filter(|c| c.is_ascii_uppercase()).count();
    has_digit || uppercase_count >= 2 || BARE_ELEMENTS.contains(&query)
}

/// One or more element groups: an uppercase letter, an optional lowercase
/// letter, then optional digits.
fn has_formula_shape(query: &str) -> bool {
    let mut chars = query.chars().peekable();
    while let Some(c) = chars.next() {
        if !c.is_ascii_uppercase() {
            return false;
        }
        if chars.peek().is_some_and(|c| c.is_ascii_lowercase()) {
            chars.next();
        }
        while chars.peek().is_some_and(|c| c.is_ascii_digit()) {
            chars.next();
        }
    }
    true
}

/// Matches `[A-Z]{14}-[A-Z]{10}-[A-Z]`.
fn looks_like_inchikey(query: &str) -> bool {
    let parts: Vec<&str> = query.split('-').collect();
    let [block, hash, flag] = parts.as_slice() else {
        return false;
    };
    block.len() == 14
        && hash.len() == 10
        && flag.len() == 1
        && [block, hash, flag]
            .iter()
            .all(|p| p.chars().all(|c| c.is_ascii_uppercase()))
}
