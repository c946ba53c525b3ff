// Copyright 2026 the Veneer Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Mutation-driven rescan scheduling.
//!
//! Content can appear without any host lifecycle signal — third-party
//! scripts, late hydration, lazy loaders promoting images. A single
//! document-wide mutation watch catches those insertions and re-fires the
//! decorator passes. It is created at most once per page and never torn
//! down; its downstream effects are frame-coalesced by the gallery builder,
//! so a burst of mutations costs one rebuild.

use alloc::boxed::Box;

use wasm_bindgen::JsCast as _;
use wasm_bindgen::JsValue;
use wasm_bindgen::closure::Closure;
use web_sys::{Document, Element, MutationObserver, MutationObserverInit, MutationRecord};

/// Added nodes that warrant a rescan: images (in any wrapper) and cards.
/// Keep the card classes in sync with [`crate::card::CARD_SELECTORS`].
pub(crate) const QUALIFYING_SELECTOR: &str =
    "img, picture, .product-card, .collection-card, .article-card";

type WatchCallback = Closure<dyn FnMut(js_sys::Array, MutationObserver)>;

/// The process-wide mutation watch. Holding the value keeps the observer
/// and its closure alive; by design nothing ever disconnects it.
pub(crate) struct MutationWatch {
    _observer: MutationObserver,
    _closure: WatchCallback,
}

impl core::fmt::Debug for MutationWatch {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str("MutationWatch")
    }
}

impl MutationWatch {
    /// Starts watching `document.body` for structural changes, invoking
    /// `on_qualifying` whenever an added node matches or contains a
    /// qualifying selector.
    ///
    /// Returns `None` when the document has no body yet or the host lacks
    /// the observer API — the decorators still work, they just rely on
    /// explicit lifecycle signals alone.
    pub(crate) fn start(document: &Document, on_qualifying: impl Fn() + 'static) -> Option<Self> {
        let body = document.body()?;
        let closure: WatchCallback = Closure::wrap(Box::new(
            move |records: js_sys::Array, _observer: MutationObserver| {
                if records.iter().any(|record| record_qualifies(&record)) {
                    on_qualifying();
                }
            },
        ));
        let observer = MutationObserver::new(closure.as_ref().unchecked_ref()).ok()?;
        let options = MutationObserverInit::new();
        options.set_child_list(true);
        options.set_subtree(true);
        observer.observe_with_options(&body, &options).ok()?;
        Some(Self {
            _observer: observer,
            _closure: closure,
        })
    }
}

fn record_qualifies(record: &JsValue) -> bool {
    let Some(record) = record.dyn_ref::<MutationRecord>() else {
        return false;
    };
    let added = record.added_nodes();
    for i in 0..added.length() {
        let Some(node) = added.item(i) else { continue };
        let Some(element) = node.dyn_ref::<Element>() else {
            continue;
        };
        if element.matches(QUALIFYING_SELECTOR).unwrap_or(false) {
            return true;
        }
        if element
            .query_selector(QUALIFYING_SELECTOR)
            .ok()
            .flatten()
            .is_some()
        {
            return true;
        }
    }
    false
}
