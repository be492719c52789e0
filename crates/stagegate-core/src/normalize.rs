//! # Normalizer
//!
//! Canonical form for free-text answers.
//!
//! Secrets are everyday words typed on phones and keyboards. The canonical
//! form forgives casing, accents and surrounding whitespace, and nothing else:
//! a misspelled word stays misspelled.
//!
//! ## Pipeline
//!
//! 1. Canonical decomposition (NFD), so `é` becomes `e` + U+0301
//! 2. Drop the Combining Diacritical Marks block (U+0300..=U+036F)
//! 3. Lowercase, then decompose and strip again (lowercasing can emit marks,
//!    e.g. `İ` → `i` + U+0307)
//! 4. Trim leading and trailing whitespace
//!
//! Trimming runs last so that a mark stranded next to a space cannot leave
//! whitespace at the edge; this keeps `normalize` idempotent.
//!
//! Marks outside that block are kept. Japanese dakuten (U+3099) or Devanagari
//! vowel signs change the word, not its accent.

use std::ops::RangeInclusive;
use unicode_normalization::UnicodeNormalization;

/// Combining Diacritical Marks: accents, cedilla, tilde and friends.
const DIACRITICS: RangeInclusive<char> = '\u{300}'..='\u{36f}';

/// Canonicalize `text` for comparison.
///
/// Pure and total: every input has a canonical form.
#[must_use]
pub fn normalize(text: &str) -> String {
    let stripped = strip_marks(text);
    let lowered = stripped.to_lowercase();
    strip_marks(&lowered).trim().to_string()
}

/// Compare a raw answer against an expected phrase under normalization.
#[must_use]
pub fn matches(input: &str, expected: &str) -> bool {
    normalize(input) == normalize(expected)
}

fn strip_marks(text: &str) -> String {
    text.nfd().filter(|c| !DIACRITICS.contains(c)).collect()
}

// =============================================================================
// TESTS
// =============================================================================
