// Copyright 2026 the Veneer Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Background derivation for card-like elements.
//!
//! A card exposes its representative image and a small stable tilt as style
//! variables, so the presentation layer can render a "scattered photos"
//! preview without any randomness of its own. The tilt hangs off a rolling
//! hash of the image URL mixed with the card's position among its siblings:
//! the same card with the same image always leans the same way, two adjacent
//! cards sharing one image do not.

use alloc::string::String;

/// Half-width of the tilt range; tilts land in `[-TILT_SPAN, TILT_SPAN)`.
pub const TILT_SPAN: f64 = 4.5;

// Tilt resolution in hundredths of a degree across the full span.
const TILT_STEPS: u32 = 900;

/// Polynomial rolling hash over a string, reduced to a positive integer.
#[must_use]
pub fn rolling_hash(input: &str) -> u32 {
    let mut hash: u32 = 0;
    for byte in input.bytes() {
        hash = hash.wrapping_mul(31).wrapping_add(u32::from(byte));
    }
    hash
}

/// Derives the tilt angle in degrees for a card.
///
/// Deterministic in `(url, sibling_index)`; the sibling index decorrelates
/// neighboring cards that share an image.
#[must_use]
pub fn tilt_degrees(url: &str, sibling_index: u32) -> f64 {
    let mixed = rolling_hash(url).wrapping_add(sibling_index.wrapping_mul(131));
    f64::from(mixed % TILT_STEPS) / 100.0 - TILT_SPAN
}

/// Escapes a URL for embedding inside a quoted CSS `url("…")` value.
///
/// Backslashes and both quote characters are escaped; everything else in an
/// already-resolved URL is safe inside double quotes.
#[must_use]
pub fn escape_css_url(url: &str) -> String {
    let mut escaped = String::with_capacity(url.len());
    for ch in url.chars() {
        if matches!(ch, '"' | '\'' | '\\') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_is_deterministic_and_spreads() {
        assert_eq!(rolling_hash("cdn/a.jpg"), rolling_hash("cdn/a.jpg"));
        assert_ne!(rolling_hash("cdn/a.jpg"), rolling_hash("cdn/b.jpg"));
        assert_eq!(rolling_hash(""), 0);
    }

    #[test]
    fn tilt_is_stable_and_bounded() {
        let tilt = tilt_degrees("cdn/hero.jpg", 2);
        assert_eq!(tilt, tilt_degrees("cdn/hero.jpg", 2));
        assert!((-TILT_SPAN..TILT_SPAN).contains(&tilt));
    }

    #[test]
    fn sibling_index_decorrelates_shared_images() {
        assert_ne!(tilt_degrees("cdn/hero.jpg", 0), tilt_degrees("cdn/hero.jpg", 1));
    }

    #[test]
    fn quotes_are_escaped_for_css_embedding() {
        assert_eq!(escape_css_url("plain/path.jpg"), "plain/path.jpg");
        assert_eq!(escape_css_url(r#"we"ird.jpg"#), r#"we\"ird.jpg"#);
        assert_eq!(escape_css_url("it's.jpg"), r"it\'s.jpg");
        assert_eq!(escape_css_url(r"back\slash.jpg"), r"back\\slash.jpg");
    }
}
