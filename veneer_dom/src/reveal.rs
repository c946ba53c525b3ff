// Copyright 2026 the Veneer Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Shared scroll-reveal observer.
//!
//! One service instance covers every reveal target on the page. It is
//! created lazily on the first pass and cached for the page lifetime: either
//! a real intersection observer, or a disabled sentinel (reduced motion, or
//! a host without the API) that marks elements revealed immediately and
//! never observes.
//!
//! Elements are tagged on first encounter with a stable order index used
//! only for stagger timing via `--reveal-order`; re-running the pass over an
//! already-tagged element keeps its index and re-observation is a no-op, so
//! passes can overlap freely.

use alloc::boxed::Box;
use alloc::format;

use veneer_core::reveal::{OrderDispenser, RevealAction, RevealBehavior, on_intersection};
use wasm_bindgen::JsCast as _;
use wasm_bindgen::JsValue;
use wasm_bindgen::closure::Closure;
use web_sys::{Element, HtmlElement, IntersectionObserver, IntersectionObserverEntry,
    IntersectionObserverInit, Node};

use crate::dom;
use crate::engine::EngineConfig;

/// Generic opt-in marker plus the storefront's structural reveal targets.
pub(crate) const TARGET_SELECTORS: &str =
    "[data-scroll-reveal], .product-card, .collection-card, .article-card, .section-heading";

const ORDER_ATTR: &str = "data-reveal-order";
const REPEAT_ATTR: &str = "data-reveal-repeat";
const REVEALED_CLASS: &str = "is-revealed";
const ORDER_VAR: &str = "--reveal-order";

type ObserverCallback = Closure<dyn FnMut(js_sys::Array, IntersectionObserver)>;

/// The page-wide reveal service.
pub(crate) enum RevealService {
    /// Reduced motion or no observer API: reveal immediately, never observe.
    Disabled,
    /// Live observer; the closure must outlive it.
    Observing {
        observer: IntersectionObserver,
        _closure: ObserverCallback,
    },
}

impl core::fmt::Debug for RevealService {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Disabled => f.write_str("RevealService::Disabled"),
            Self::Observing { .. } => f.write_str("RevealService::Observing"),
        }
    }
}

fn handle_entry(entry: &IntersectionObserverEntry, observer: &IntersectionObserver) {
    let target = entry.target();
    let behavior = RevealBehavior::from_repeat_attr(target.get_attribute(REPEAT_ATTR).as_deref());
    match on_intersection(behavior, entry.is_intersecting()) {
        RevealAction::Reveal => {
            let _ = target.class_list().add_1(REVEALED_CLASS);
        }
        RevealAction::RevealAndUnobserve => {
            let _ = target.class_list().add_1(REVEALED_CLASS);
            observer.unobserve(&target);
        }
        RevealAction::Unreveal => {
            let _ = target.class_list().remove_1(REVEALED_CLASS);
        }
        RevealAction::None => {}
    }
}

impl RevealService {
    /// Builds the service. The motion preference is sampled here, once per
    /// page lifetime — flipping it later does not resurrect the observer.
    pub(crate) fn create(config: &EngineConfig, reduced_motion: bool) -> Self {
        if reduced_motion {
            return Self::Disabled;
        }
        let closure: ObserverCallback = Closure::wrap(Box::new(
            |entries: js_sys::Array, observer: IntersectionObserver| {
                for entry in entries.iter() {
                    if let Some(entry) = entry.dyn_ref::<IntersectionObserverEntry>() {
                        handle_entry(entry, &observer);
                    }
                }
            },
        ));
        let options = IntersectionObserverInit::new();
        options.set_threshold(&JsValue::from_f64(config.reveal_threshold));
        options.set_root_margin(config.reveal_root_margin);
        match IntersectionObserver::new_with_options(closure.as_ref().unchecked_ref(), &options) {
            Ok(observer) => Self::Observing {
                observer,
                _closure: closure,
            },
            Err(_) => Self::Disabled,
        }
    }

    /// Tags and (if live) observes every reveal target in `scope`. Returns
    /// how many targets the pass touched.
    pub(crate) fn apply(&self, scope: &Node, dispenser: &mut OrderDispenser) -> usize {
        let targets = dom::query_all_in_scope(scope, TARGET_SELECTORS);
        for target in &targets {
            tag_order(target, dispenser);
            match self {
                Self::Disabled => {
                    let _ = target.class_list().add_1(REVEALED_CLASS);
                }
                // Observing an already-observed element is a no-op per the
                // IntersectionObserver contract, so no tracking is needed.
                Self::Observing { observer, .. } => observer.observe(target),
            }
        }
        targets.len()
    }
}

/// Assigns the stagger slot on first encounter; never reassigns.
fn tag_order(target: &Element, dispenser: &mut OrderDispenser) {
    if target.get_attribute(ORDER_ATTR).is_some() {
        return;
    }
    let index = dispenser.next_index();
    let _ = target.set_attribute(ORDER_ATTR, &format!("{index}"));
    if let Some(target) = target.dyn_ref::<HtmlElement>() {
        let _ = target.style().set_property(ORDER_VAR, &format!("{index}"));
    }
}
