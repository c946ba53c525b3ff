// Copyright 2026 the Veneer Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Browser decorators and orchestration for Veneer.
//!
//! This crate is the DOM half of the enhancement engine. It wires the pure
//! logic from [`veneer_core`] to browser APIs and keeps the decorated tree
//! correct while the host platform swaps sections in and out:
//!
//! - [`Engine`]: the orchestrator — owns the instance registries, the shared
//!   observers, and the gallery builder, and maps host lifecycle events to
//!   scoped re-initialization passes.
//! - [`slider`]: the before/after comparison slider controller.
//! - [`timeline`]: the staggered feature-timeline stepper.
//! - [`reveal`]: the shared scroll-reveal observer.
//! - [`gallery`]: the procedural floating-image gallery builder.
//! - [`card`]: the card background applier.
//! - [`rescan`]: the document-wide mutation watch.
//!
//! Everything runs on the UI thread; shared state lives in `Rc` +
//! `Cell`/`RefCell`. Every ephemeral decorator instance hands the engine a
//! [`Teardown`](handle::Teardown) that synchronously releases its listeners,
//! observers, and timers, and the engine always runs it before re-attaching
//! to the same element, so repeated and overlapping initialization calls
//! never leak or double-decorate.
//!
//! The module is booted from [`start`] (the `wasm_bindgen` entry point); the
//! host needs no further API, since re-application is driven entirely by
//! lifecycle events and DOM mutations.

#![no_std]
#![cfg_attr(
    not(target_arch = "wasm32"),
    allow(
        dead_code,
        unused_imports,
        reason = "this crate only runs in the browser"
    )
)]

extern crate alloc;

mod card;
mod diag;
mod dom;
mod engine;
mod gallery;
mod handle;
mod rescan;
mod reveal;
mod sched;
mod slider;
mod timeline;

pub use engine::{Engine, EngineConfig};

use wasm_bindgen::prelude::*;

/// Entry point: boots the engine against the window document and installs
/// the host lifecycle hooks for the page lifetime.
///
/// A missing window or document (non-browser host) is a silent no-op.
#[cfg_attr(all(target_arch = "wasm32", not(test)), wasm_bindgen(start))]
pub fn start() -> Result<(), JsValue> {
    #[cfg(feature = "panic-hook")]
    console_error_panic_hook::set_once();

    let Some(document) = web_sys::window().and_then(|w| w.document()) else {
        return Ok(());
    };
    let engine = Engine::new(document, EngineConfig::storefront());
    engine.install_lifecycle_hooks()
}
