// Copyright 2026 the Veneer Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Source collection and change detection for the floating gallery.
//!
//! The gallery mirrors the images currently present in the document. Because
//! it is rebuilt on every lifecycle signal *and* on every qualifying DOM
//! mutation, the cheap path has to be the common one: the scan reduces to a
//! [`signature`] string, and a rebuild whose signature matches the last
//! applied one is a guaranteed no-op with zero DOM churn.
//!
//! Collection rules, in document order:
//!
//! 1. resolve each image to its currently-rendered source, falling back to
//!    the declared source and then to a deferred-load attribute;
//! 2. drop images whose explicit width attribute parses below
//!    [`MIN_SOURCE_WIDTH`] — icon-sized art is not gallery-worthy;
//! 3. strip the query string so CDN cache-busting does not defeat
//!    deduplication;
//! 4. dedupe keeping the first occurrence, cap at [`MAX_ITEMS`].

use alloc::string::String;
use alloc::vec::Vec;

/// Images narrower than this (per their explicit `width` attribute) are
/// treated as icons and excluded.
pub const MIN_SOURCE_WIDTH: u32 = 80;

/// Upper bound on gallery entries; the layer is decoration, not an index.
pub const MAX_ITEMS: usize = 14;

/// Separator used when joining sources into a [`signature`].
const SIGNATURE_SEPARATOR: &str = "|";

/// One image node's candidate sources and size hint, as read off the DOM.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SourceCandidate {
    /// The resolved, currently-rendered source (`currentSrc`).
    pub current_src: Option<String>,
    /// The declared source (`src`).
    pub src: Option<String>,
    /// A deferred-load source (`data-src`), for images a lazy-loader has
    /// not promoted yet.
    pub data_src: Option<String>,
    /// The explicit `width` attribute, when present and parsable.
    pub width_attr: Option<u32>,
}

impl SourceCandidate {
    /// Picks the first non-empty source in resolution order: rendered,
    /// declared, deferred.
    #[must_use]
    pub fn resolve(&self) -> Option<&str> {
        [&self.current_src, &self.src, &self.data_src]
            .into_iter()
            .flatten()
            .map(String::as_str)
            .find(|s| !s.is_empty())
    }
}

/// Strips the query string from a URL for deduplication.
#[must_use]
pub fn normalize_source(url: &str) -> &str {
    match url.split_once('?') {
        Some((path, _)) => path,
        None => url,
    }
}

/// Collects the ordered, deduplicated gallery source list from the
/// document's image candidates.
#[must_use]
pub fn collect_sources(candidates: &[SourceCandidate]) -> Vec<String> {
    let mut sources: Vec<String> = Vec::new();
    for candidate in candidates {
        if sources.len() == MAX_ITEMS {
            break;
        }
        if let Some(width) = candidate.width_attr
            && width < MIN_SOURCE_WIDTH
        {
            continue;
        }
        let Some(raw) = candidate.resolve() else {
            continue;
        };
        let normalized = normalize_source(raw);
        if sources.iter().all(|seen| seen != normalized) {
            sources.push(String::from(normalized));
        }
    }
    sources
}

/// Joins a source list into the rebuild signature.
///
/// Two scans with equal signatures describe the same gallery; the builder
/// commits a rebuild if and only if the signature changed.
#[must_use]
pub fn signature(sources: &[String]) -> String {
    sources.join(SIGNATURE_SEPARATOR)
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString as _;
    use alloc::vec;

    fn with_src(src: &str) -> SourceCandidate {
        SourceCandidate {
            src: Some(src.to_string()),
            ..SourceCandidate::default()
        }
    }

    #[test]
    fn resolution_prefers_current_then_declared_then_deferred() {
        let candidate = SourceCandidate {
            current_src: Some("a.webp".to_string()),
            src: Some("b.jpg".to_string()),
            data_src: Some("c.jpg".to_string()),
            width_attr: None,
        };
        assert_eq!(collect_sources(&[candidate]), ["a.webp"]);

        let deferred = SourceCandidate {
            current_src: Some(String::new()),
            src: None,
            data_src: Some("c.jpg".to_string()),
            width_attr: None,
        };
        assert_eq!(collect_sources(&[deferred]), ["c.jpg"]);
    }

    #[test]
    fn query_strings_do_not_defeat_deduplication() {
        let candidates = vec![
            with_src("cdn/hero.jpg?v=1"),
            with_src("cdn/hero.jpg?v=2"),
            with_src("cdn/hero.jpg"),
        ];
        assert_eq!(collect_sources(&candidates), ["cdn/hero.jpg"]);
    }

    #[test]
    fn icon_sized_images_are_excluded() {
        let mut icon = with_src("icons/cart.svg");
        icon.width_attr = Some(40);
        let mut wide = with_src("hero.jpg");
        wide.width_attr = Some(1200);
        // No width attribute means no exclusion.
        let r#unsized = with_src("banner.jpg");

        assert_eq!(
            collect_sources(&[icon, wide, r#unsized]),
            ["hero.jpg", "banner.jpg"]
        );
    }

    #[test]
    fn order_is_document_order_first_occurrence_wins() {
        let candidates = vec![with_src("b.jpg"), with_src("a.jpg"), with_src("b.jpg")];
        assert_eq!(collect_sources(&candidates), ["b.jpg", "a.jpg"]);
    }

    #[test]
    fn result_is_capped() {
        let candidates: Vec<_> = (0..40)
            .map(|i| with_src(&alloc::format!("img-{i}.jpg")))
            .collect();
        assert_eq!(collect_sources(&candidates).len(), MAX_ITEMS);
    }

    #[test]
    fn empty_and_missing_sources_are_skipped() {
        let empty = SourceCandidate::default();
        let blank = with_src("");
        assert!(collect_sources(&[empty, blank]).is_empty());
    }

    #[test]
    fn signature_changes_exactly_when_the_list_does() {
        let a = vec!["x.jpg".to_string(), "y.jpg".to_string()];
        let b = vec!["x.jpg".to_string(), "y.jpg".to_string()];
        let c = vec!["y.jpg".to_string(), "x.jpg".to_string()];
        assert_eq!(signature(&a), signature(&b));
        assert_ne!(signature(&a), signature(&c));
        assert_eq!(signature(&[]), "");
    }

    #[test]
    fn dedupe_scenario_from_mixed_query_strings() {
        // Three images sharing one normalized source plus one icon: the
        // signature carries exactly one entry.
        let mut icon = with_src("icon.png");
        icon.width_attr = Some(40);
        let candidates = vec![
            with_src("shared.jpg?crop=a"),
            with_src("shared.jpg?crop=b"),
            with_src("shared.jpg"),
            icon,
        ];
        let sources = collect_sources(&candidates);
        assert_eq!(signature(&sources), "shared.jpg");
    }
}
