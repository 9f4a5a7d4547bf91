//! Line classification for decompiled stub files.
//!
//! Each non-blank line falls into exactly one category, checked in order:
//!
//! 1. declaration start — first token is a member/modifier keyword
//! 2. accessor — the whole line is `get` or `set`
//! 3. address — the line carries an `[Address(RVA = "...")]` attribute
//! 4. other

use crate::model::Accessor;

/// Keywords that open a member declaration.
pub const DECLARATION_KEYWORDS: &[&str] =
    &["public", "private", "protected", "override", "virtual"];

/// Return types recognized while scanning a declaration.
pub const RETURN_TYPES: &[&str] = &["void", "int", "string"];

/// Token that starts an address attribute, e.g.
/// `[Address(RVA = "0x1222208", Offset = "0x1221208", VA = "0x1222208")]`.
pub const ADDRESS_MARKER: &str = "[Address(RVA";

/// Distance from the marker token to the value token (`[Address(RVA`, `=`, value).
const ADDRESS_VALUE_OFFSET: usize = 2;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineKind {
    Declaration,
    Accessor(Accessor),
    /// Raw address literal with quotes, commas, and the closing `)]` stripped.
    /// Empty when the attribute has no value token.
    Address(String),
    Other,
}

/// Classify a tokenized, non-empty line.
pub fn classify(tokens: &[&str]) -> LineKind {
    let Some(first) = tokens.first() else {
        return LineKind::Other;
    };

    if DECLARATION_KEYWORDS.contains(first) {
        return LineKind::Declaration;
    }

    if let Some(accessor) = Accessor::from_keyword(&tokens.concat()) {
        return LineKind::Accessor(accessor);
    }

    if let Some(pos) = tokens.iter().position(|t| *t == ADDRESS_MARKER) {
        let raw = tokens
            .get(pos + ADDRESS_VALUE_OFFSET)
            .map(|t| strip_literal(t))
            .unwrap_or_default();
        return LineKind::Address(raw);
    }

    LineKind::Other
}

fn strip_literal(token: &str) -> String {
    let literal: String = token
        .chars()
        .filter(|c| !matches!(c, '\'' | '"' | ','))
        .collect();
    // `RVA` as the only argument leaves the attribute's `)]` on the value
    literal.trim_end_matches([')', ']']).to_string()
}

/// Parse an address literal: `0x`-prefixed hex, otherwise decimal.
pub fn parse_address(raw: &str) -> Option<u64> {
    match raw.strip_prefix("0x").or_else(|| raw.strip_prefix("0X")) {
        Some(hex) => u64::from_str_radix(hex, 16).ok(),
        None => raw.parse().ok(),
    }
}
