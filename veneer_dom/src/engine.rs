// Copyright 2026 the Veneer Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The orchestrator: maps host lifecycle signals to scoped decorator passes.
//!
//! The engine owns everything with page-lifetime state: the slider and
//! timeline instance registries, the lazily-created reveal service, the
//! gallery builder, the reveal-order dispenser, and the mutation watch. Host
//! signals may arrive in any order, any number of times, before or after
//! content exists; every pass is idempotent, and ephemeral instances are
//! torn down before re-initialization so overlapping passes cannot leak.
//!
//! Scopes are plain nodes — the whole document on ready, a section subtree
//! on section signals, a block subtree on block signals.

use alloc::boxed::Box;
use alloc::rc::Rc;
use core::cell::RefCell;

use veneer_core::motion::Motion;
use veneer_core::reveal::OrderDispenser;
use wasm_bindgen::JsCast as _;
use wasm_bindgen::JsValue;
use wasm_bindgen::closure::Closure;
use web_sys::{Document, Event, EventTarget, Node};

use crate::dom;
use crate::gallery::GalleryBuilder;
use crate::handle::InstanceRegistry;
use crate::rescan::MutationWatch;
use crate::reveal::RevealService;
use crate::{card, diag, slider, timeline};

/// Tunable timing and threshold knobs for one engine instance.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EngineConfig {
    /// Delay before the slider's transient saturation emphasis reverts.
    pub emphasis_revert_ms: i32,
    /// Intersection threshold that triggers a timeline's staggered reveal.
    pub timeline_threshold: f64,
    /// Intersection threshold for the shared scroll-reveal observer.
    pub reveal_threshold: f64,
    /// Root margin for the shared scroll-reveal observer.
    pub reveal_root_margin: &'static str,
}

impl EngineConfig {
    /// The storefront defaults.
    #[must_use]
    pub const fn storefront() -> Self {
        Self {
            emphasis_revert_ms: 280,
            timeline_threshold: 0.35,
            reveal_threshold: 0.18,
            reveal_root_margin: "0px 0px -12% 0px",
        }
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::storefront()
    }
}

/// The enhancement engine for one document.
#[derive(Debug)]
pub struct Engine {
    inner: Rc<Inner>,
}

#[derive(Debug)]
struct Inner {
    document: Document,
    config: EngineConfig,
    sliders: RefCell<InstanceRegistry>,
    timelines: RefCell<InstanceRegistry>,
    // Created once, on the first pass that needs it; the creation-time
    // motion preference decides real observer vs disabled sentinel for the
    // rest of the page's life.
    reveal: RefCell<Option<Rc<RevealService>>>,
    dispenser: RefCell<OrderDispenser>,
    gallery: GalleryBuilder,
    watch: RefCell<Option<MutationWatch>>,
}

impl Engine {
    /// Creates an engine for `document`. Nothing is decorated until a pass
    /// runs.
    #[must_use]
    pub fn new(document: Document, config: EngineConfig) -> Self {
        Self {
            inner: Rc::new(Inner {
                gallery: GalleryBuilder::new(document.clone()),
                document,
                config,
                sliders: RefCell::new(InstanceRegistry::new()),
                timelines: RefCell::new(InstanceRegistry::new()),
                reveal: RefCell::new(None),
                dispenser: RefCell::new(OrderDispenser::new()),
                watch: RefCell::new(None),
            }),
        }
    }

    /// Full pass over the whole document, plus starting the mutation watch.
    pub fn apply_document(&self) {
        apply_document_pass(&self.inner);
    }

    /// Full pass over a subtree: sliders and timelines are torn down and
    /// re-attached, then cards, reveals, and a gallery rebuild request.
    pub fn apply(&self, scope: &Node) {
        full_pass(&self.inner, scope);
    }

    /// Card and reveal passes over a subtree plus a gallery rebuild
    /// request; slider/timeline instances are left alone.
    pub fn refresh_blocks(&self, scope: &Node) {
        block_pass(&self.inner, scope);
    }

    /// Requests one frame-coalesced gallery rebuild.
    pub fn refresh_gallery(&self) {
        self.inner.gallery.request_rebuild();
    }

    /// Registers the host lifecycle listeners for the page lifetime and
    /// runs (or schedules) the initial document pass.
    pub fn install_lifecycle_hooks(&self) -> Result<(), JsValue> {
        let document = self.inner.document.clone();
        let target: &EventTarget = document.as_ref();

        if document.ready_state() == "loading" {
            let engine = Rc::clone(&self.inner);
            add_forgotten(target, "DOMContentLoaded", move |_event| {
                apply_document_pass(&engine);
            })?;
        } else {
            self.apply_document();
        }

        for kind in ["shopify:section:load", "shopify:section:select"] {
            let engine = Rc::clone(&self.inner);
            add_forgotten(target, kind, move |event| {
                if let Some(scope) = event_scope(&event) {
                    full_pass(&engine, &scope);
                }
            })?;
        }

        let engine = Rc::clone(&self.inner);
        add_forgotten(target, "shopify:block:select", move |event| {
            if let Some(scope) = event_scope(&event) {
                block_pass(&engine, &scope);
            }
        })?;

        // Deselect only moves images out; the coalesced rebuild picks that
        // up without a full decorator pass.
        let engine = Rc::clone(&self.inner);
        add_forgotten(target, "shopify:block:deselect", move |_event| {
            engine.gallery.request_rebuild();
        })?;

        Ok(())
    }
}

fn apply_document_pass(inner: &Rc<Inner>) {
    let scope: Node = inner.document.clone().into();
    full_pass(inner, &scope);
    ensure_watch(inner);
}

fn full_pass(inner: &Rc<Inner>, scope: &Node) {
    let motion = Motion::from_reduced_flag(dom::prefers_reduced_motion());

    let mut attached = 0;
    for element in dom::query_all_in_scope(scope, slider::SELECTOR) {
        let mut registry = inner.sliders.borrow_mut();
        registry.dismiss(&element);
        // A decoration failure must not block the rest of the pass.
        if let Ok(Some(teardown)) = slider::attach(&element, motion, &inner.config) {
            registry.store(element, teardown);
            attached += 1;
        }
    }
    diag::pass("slider", attached);

    let mut attached = 0;
    for element in dom::query_all_in_scope(scope, timeline::SELECTOR) {
        let mut registry = inner.timelines.borrow_mut();
        registry.dismiss(&element);
        if let Ok(Some(teardown)) = timeline::attach(&element, motion, &inner.config) {
            registry.store(element, teardown);
            attached += 1;
        }
    }
    diag::pass("timeline", attached);

    block_pass_with(inner, scope, motion);
}

fn block_pass(inner: &Rc<Inner>, scope: &Node) {
    let motion = Motion::from_reduced_flag(dom::prefers_reduced_motion());
    block_pass_with(inner, scope, motion);
}

fn block_pass_with(inner: &Rc<Inner>, scope: &Node, motion: Motion) {
    diag::pass("card", card::apply(scope));
    let service = reveal_service(inner, motion);
    let touched = service.apply(scope, &mut inner.dispenser.borrow_mut());
    diag::pass("reveal", touched);
    inner.gallery.request_rebuild();
}

fn reveal_service(inner: &Inner, motion: Motion) -> Rc<RevealService> {
    let mut slot = inner.reveal.borrow_mut();
    if let Some(service) = slot.as_ref() {
        return Rc::clone(service);
    }
    let service = Rc::new(RevealService::create(&inner.config, motion.is_reduced()));
    *slot = Some(Rc::clone(&service));
    service
}

fn ensure_watch(inner: &Rc<Inner>) {
    if inner.watch.borrow().is_some() {
        return;
    }
    // The watch closure keeps the engine alive for the page lifetime; the
    // reference cycle is intentional, the watch is never torn down.
    let engine = Rc::clone(inner);
    let started = MutationWatch::start(&inner.document, move || {
        let scope: Node = engine.document.clone().into();
        block_pass(&engine, &scope);
    });
    *inner.watch.borrow_mut() = started;
}

fn event_scope(event: &Event) -> Option<Node> {
    event.target().and_then(|target| target.dyn_into::<Node>().ok())
}

fn add_forgotten(
    target: &EventTarget,
    kind: &str,
    handler: impl FnMut(Event) + 'static,
) -> Result<(), JsValue> {
    let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(Event)>);
    target.add_event_listener_with_callback(kind, closure.as_ref().unchecked_ref())?;
    // Page-lifetime listener; the closure is intentionally leaked.
    closure.forget();
    Ok(())
}
