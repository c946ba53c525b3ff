// Copyright 2026 the Veneer Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Demo: a synthetic storefront section enhanced by Veneer.
//!
//! The engine boots itself when the module loads (see `veneer_dom::start`).
//! This crate plays the host platform: [`build_demo`] injects a section —
//! comparison slider, feature timeline, product cards, floating gallery —
//! and then fires the same `shopify:section:load` signal a real storefront
//! editor would, so every decorator path runs against live markup.
//!
//! Build with: `wasm-pack build --target web demos/section_demo`
//!
//! Then serve `demos/section_demo/` and open `index.html` in a browser.

#![no_std]
#![cfg_attr(
    not(target_arch = "wasm32"),
    allow(dead_code, reason = "this crate only runs in the browser")
)]

use wasm_bindgen::prelude::*;
use web_sys::{Element, Event, EventInit};

const SECTION_MARKUP: &str = r#"
<h2 class="section-heading">Before &amp; after</h2>
<div data-before-after data-initial="35">
  <div class="before-after-media">
    <img src="https://picsum.photos/id/1015/640/360" alt="" width="640">
    <div class="before-after-after">
      <img src="https://picsum.photos/id/1016/640/360" alt="" width="640">
    </div>
  </div>
  <input class="before-after-range" type="range" min="0" max="100" value="35" aria-label="Comparison position">
</div>

<ol data-feature-timeline data-animate="true" data-delay="220">
  <li class="feature-timeline-step">Pick a base photo</li>
  <li class="feature-timeline-step">Drag the divider</li>
  <li class="feature-timeline-step">Publish the section</li>
</ol>

<div class="card-row">
  <div class="product-card" data-scroll-reveal>
    <img src="https://picsum.photos/id/1025/320/240?v=1" alt="" width="320">
    <p>Terracotta planter</p>
  </div>
  <div class="product-card" data-scroll-reveal data-reveal-repeat="true">
    <img src="https://picsum.photos/id/1035/320/240" alt="" width="320">
    <p>Linen throw</p>
  </div>
  <div class="article-card" data-scroll-reveal>
    <img src="https://picsum.photos/id/1045/320/240" alt="" width="320">
    <p>Care guide</p>
  </div>
</div>

<div data-floating-gallery aria-hidden="true"></div>
"#;

/// Injects the demo section and announces it the way the host platform
/// would, letting the already-booted engine decorate it.
#[wasm_bindgen]
pub fn build_demo() -> Result<(), JsValue> {
    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| JsValue::from_str("no document"))?;
    let body = document
        .body()
        .ok_or_else(|| JsValue::from_str("no body"))?;

    let section: Element = document.create_element("section")?;
    section.set_class_name("demo-section");
    section.set_inner_html(SECTION_MARKUP);
    body.append_child(&section)?;

    // The same signal the storefront editor emits after swapping a section
    // in; it bubbles up to the engine's document-level listener.
    let init = EventInit::new();
    init.set_bubbles(true);
    let load = Event::new_with_event_init_dict("shopify:section:load", &init)?;
    section.dispatch_event(&load)?;
    Ok(())
}
