// Copyright 2026 the Veneer Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Small DOM utilities shared by the decorators.
//!
//! Scopes arrive from lifecycle events as plain nodes that may be the
//! document itself or a section subtree; [`query_all_in_scope`] papers over
//! that split and includes the scope element itself when it matches.
//! [`Listener`] pairs `addEventListener` with removal on drop, which is what
//! lets a decorator's cleanup handle be a plain value.

use alloc::boxed::Box;
use alloc::vec::Vec;

use veneer_core::gallery::SourceCandidate;
use wasm_bindgen::JsCast as _;
use wasm_bindgen::JsValue;
use wasm_bindgen::closure::Closure;
use web_sys::{Document, Element, Event, EventTarget, HtmlImageElement, Node};

/// Runs a selector over a scope node (document or element).
pub(crate) fn query_all(scope: &Node, selector: &str) -> Vec<Element> {
    let list = if let Some(document) = scope.dyn_ref::<Document>() {
        document.query_selector_all(selector).ok()
    } else if let Some(element) = scope.dyn_ref::<Element>() {
        element.query_selector_all(selector).ok()
    } else {
        None
    };

    let mut matches = Vec::new();
    if let Some(list) = list {
        for i in 0..list.length() {
            if let Some(node) = list.item(i)
                && let Ok(element) = node.dyn_into::<Element>()
            {
                matches.push(element);
            }
        }
    }
    matches
}

/// Like [`query_all`], but also yields the scope element itself when it
/// matches the selector — lifecycle events can target the decorated element
/// directly.
pub(crate) fn query_all_in_scope(scope: &Node, selector: &str) -> Vec<Element> {
    let mut matches = Vec::new();
    if let Some(element) = scope.dyn_ref::<Element>()
        && element.matches(selector).unwrap_or(false)
    {
        matches.push(element.clone());
    }
    matches.extend(query_all(scope, selector));
    matches
}

/// An event listener that unregisters itself when dropped.
pub(crate) struct Listener {
    target: EventTarget,
    kind: &'static str,
    closure: Closure<dyn FnMut(Event)>,
}

impl Listener {
    pub(crate) fn add(
        target: &EventTarget,
        kind: &'static str,
        handler: impl FnMut(Event) + 'static,
    ) -> Result<Self, JsValue> {
        let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(Event)>);
        target.add_event_listener_with_callback(kind, closure.as_ref().unchecked_ref())?;
        Ok(Self {
            target: target.clone(),
            kind,
            closure,
        })
    }
}

impl Drop for Listener {
    fn drop(&mut self) {
        let _ = self
            .target
            .remove_event_listener_with_callback(self.kind, self.closure.as_ref().unchecked_ref());
    }
}

impl core::fmt::Debug for Listener {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Listener").field("kind", &self.kind).finish()
    }
}

/// Reads an image element's candidate sources and size hint.
pub(crate) fn source_candidate(image: &Element) -> SourceCandidate {
    let resolved = image.dyn_ref::<HtmlImageElement>();
    SourceCandidate {
        current_src: resolved.map(HtmlImageElement::current_src),
        src: resolved
            .map(HtmlImageElement::src)
            .or_else(|| image.get_attribute("src")),
        data_src: image.get_attribute("data-src"),
        width_attr: image
            .get_attribute("width")
            .and_then(|w| w.trim().parse().ok()),
    }
}

/// Position of an element among its element siblings.
pub(crate) fn sibling_index(element: &Element) -> u32 {
    let mut index = 0;
    let mut cursor = element.previous_element_sibling();
    while let Some(previous) = cursor {
        index += 1;
        cursor = previous.previous_element_sibling();
    }
    index
}

/// Reads the reduced-motion media query. Hosts without `matchMedia` count
/// as full motion.
pub(crate) fn prefers_reduced_motion() -> bool {
    web_sys::window()
        .and_then(|w| w.match_media("(prefers-reduced-motion: reduce)").ok())
        .flatten()
        .is_some_and(|query| query.matches())
}
