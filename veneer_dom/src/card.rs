// Copyright 2026 the Veneer Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Card background applier.
//!
//! Lifts each card's representative image into style variables so the
//! presentation layer can paint an animated preview. Idempotent per element:
//! the applied URL is recorded on the card, and a pass that resolves the
//! same URL leaves the element untouched.

use alloc::format;

use veneer_core::card::{escape_css_url, tilt_degrees};
use veneer_core::gallery::normalize_source;
use wasm_bindgen::JsCast as _;
use web_sys::{HtmlElement, Node};

use crate::dom;

/// Card-like elements that receive a background preview.
pub(crate) const CARD_SELECTORS: &str = ".product-card, .collection-card, .article-card";

const RECORDED_ATTR: &str = "data-card-bg";
const PREVIEW_CLASS: &str = "has-animated-preview";
const IMAGE_VAR: &str = "--card-bg-image";
const TILT_VAR: &str = "--card-bg-tilt";

/// Applies backgrounds to every card in `scope`. Returns the number of
/// cards whose recorded source actually changed.
pub(crate) fn apply(scope: &Node) -> usize {
    let mut updated = 0;
    for card in dom::query_all_in_scope(scope, CARD_SELECTORS) {
        let Some(image) = card.query_selector("img").ok().flatten() else {
            continue;
        };
        let candidate = dom::source_candidate(&image);
        let Some(resolved) = candidate.resolve() else {
            continue;
        };
        let normalized = normalize_source(resolved);
        if card.get_attribute(RECORDED_ATTR).as_deref() == Some(normalized) {
            continue;
        }
        let _ = card.set_attribute(RECORDED_ATTR, normalized);

        let tilt = tilt_degrees(normalized, dom::sibling_index(&card));
        if let Some(styled) = card.dyn_ref::<HtmlElement>() {
            let style = styled.style();
            let _ = style.set_property(
                IMAGE_VAR,
                &format!("url(\"{}\")", escape_css_url(normalized)),
            );
            let _ = style.set_property(TILT_VAR, &format!("{tilt:.2}deg"));
        }
        let _ = card.class_list().add_1(PREVIEW_CLASS);
        updated += 1;
    }
    updated
}
