// Copyright 2026 the Veneer Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Browser smoke tests for the decorator passes.
//!
//! Run with: `wasm-pack test --chrome --headless veneer_dom`
//!
//! Each test mounts its own fixture under `<body>` and removes it before
//! finishing, since the gallery pass scans the whole document.

#![cfg(target_arch = "wasm32")]

use veneer_dom::{Engine, EngineConfig};
use wasm_bindgen::JsCast as _;
use wasm_bindgen_test::wasm_bindgen_test;
use web_sys::{Document, Element, HtmlElement};

wasm_bindgen_test::wasm_bindgen_test_configure!(run_in_browser);

fn document() -> Document {
    web_sys::window().expect("window").document().expect("document")
}

fn mount(html: &str) -> Element {
    let doc = document();
    let host = doc.create_element("div").expect("create host");
    host.set_inner_html(html);
    doc.body()
        .expect("body")
        .append_child(&host)
        .expect("append host");
    host
}

fn engine() -> Engine {
    Engine::new(document(), EngineConfig::storefront())
}

fn style_var(element: &Element, name: &str) -> String {
    element
        .dyn_ref::<HtmlElement>()
        .expect("html element")
        .style()
        .get_property_value(name)
        .expect("style var")
}

async fn next_frame() {
    let promise = js_sys::Promise::new(&mut |resolve, _reject| {
        web_sys::window()
            .expect("window")
            .request_animation_frame(&resolve)
            .expect("raf");
    });
    wasm_bindgen_futures::JsFuture::from(promise)
        .await
        .expect("frame");
}

const SLIDER_MARKUP: &str = r#"
<div data-before-after>
  <div class="before-after-media"></div>
  <div class="before-after-after"></div>
  <input class="before-after-range" type="range" min="0" max="100" value="50">
</div>
"#;

#[wasm_bindgen_test]
fn slider_initializes_centered() {
    let host = mount(SLIDER_MARKUP);
    engine().apply(host.as_ref());

    let container = host
        .query_selector("[data-before-after]")
        .expect("query")
        .expect("container");
    assert_eq!(
        container.get_attribute("data-before-after-ready").as_deref(),
        Some("true")
    );
    assert_eq!(style_var(&container, "--before-after-position"), "50");
    host.remove();
}

#[wasm_bindgen_test]
fn slider_honors_initial_attribute_and_reattaches_on_reapply() {
    let host = mount(SLIDER_MARKUP);
    let container = host
        .query_selector("[data-before-after]")
        .expect("query")
        .expect("container");
    container
        .set_attribute("data-initial", "37")
        .expect("set attribute");

    let engine = engine();
    engine.apply(host.as_ref());
    assert_eq!(style_var(&container, "--before-after-position"), "37");

    // A later pass tears down and re-reads configuration.
    container
        .set_attribute("data-initial", "80")
        .expect("set attribute");
    engine.apply(host.as_ref());
    assert_eq!(style_var(&container, "--before-after-position"), "80");
    assert_eq!(
        container.get_attribute("data-before-after-ready").as_deref(),
        Some("true")
    );
    host.remove();
}

#[wasm_bindgen_test]
fn slider_without_required_children_is_a_silent_no_op() {
    let host = mount("<div data-before-after><p>empty</p></div>");
    engine().apply(host.as_ref());
    let container = host
        .query_selector("[data-before-after]")
        .expect("query")
        .expect("container");
    assert_eq!(container.get_attribute("data-before-after-ready"), None);
    host.remove();
}

#[wasm_bindgen_test]
fn timeline_without_opt_in_reveals_every_step_immediately() {
    let host = mount(
        r#"
        <ol data-feature-timeline>
          <li class="feature-timeline-step">a</li>
          <li class="feature-timeline-step">b</li>
          <li class="feature-timeline-step">c</li>
        </ol>
        "#,
    );
    engine().apply(host.as_ref());

    let steps = host
        .query_selector_all(".feature-timeline-step")
        .expect("steps");
    assert_eq!(steps.length(), 3);
    for i in 0..steps.length() {
        let step = steps
            .item(i)
            .and_then(|n| n.dyn_into::<Element>().ok())
            .expect("step element");
        assert!(
            step.class_list().contains("is-visible"),
            "step {i} not revealed"
        );
    }
    host.remove();
}

#[wasm_bindgen_test]
fn card_pass_records_normalized_source_and_tilt() {
    let host = mount(
        r#"
        <div class="product-card">
          <img src="hero.jpg?v=1" width="400">
        </div>
        "#,
    );
    let engine = engine();
    engine.refresh_blocks(host.as_ref());

    let card = host
        .query_selector(".product-card")
        .expect("query")
        .expect("card");
    let recorded = card.get_attribute("data-card-bg").expect("recorded source");
    assert!(recorded.ends_with("hero.jpg"), "query string kept: {recorded}");
    assert!(card.class_list().contains("has-animated-preview"));
    assert!(style_var(&card, "--card-bg-tilt").ends_with("deg"));

    // Same source on a second pass: recorded value is unchanged.
    engine.refresh_blocks(host.as_ref());
    assert_eq!(card.get_attribute("data-card-bg").as_deref(), Some(recorded.as_str()));
    host.remove();
}

#[wasm_bindgen_test]
fn reveal_order_is_assigned_once_and_kept() {
    let host = mount(r#"<section data-scroll-reveal>content</section>"#);
    let engine = engine();
    engine.refresh_blocks(host.as_ref());

    let target = host
        .query_selector("[data-scroll-reveal]")
        .expect("query")
        .expect("target");
    let order = target.get_attribute("data-reveal-order").expect("order index");
    let slot: u32 = order.parse().expect("numeric order");
    assert!(slot < 8, "order {slot} out of range");

    engine.refresh_blocks(host.as_ref());
    assert_eq!(target.get_attribute("data-reveal-order").as_deref(), Some(order.as_str()));
    host.remove();
}

#[wasm_bindgen_test]
async fn gallery_rebuild_dedupes_and_is_signature_gated() {
    let host = mount(
        r#"
        <div data-floating-gallery></div>
        <img src="shared.jpg?crop=a">
        <img src="shared.jpg?crop=b">
        <img src="shared.jpg">
        <img src="icon.png" width="40">
        "#,
    );
    let engine = engine();
    engine.refresh_gallery();
    next_frame().await;
    next_frame().await;
    next_frame().await;

    let container = host
        .query_selector("[data-floating-gallery]")
        .expect("query")
        .expect("container");
    assert_eq!(container.child_element_count(), 1, "duplicates or icon leaked in");
    assert!(container.class_list().contains("is-populated"));
    let first_build = container.first_element_child().expect("gallery item");

    // Identical scan: the rebuild is a no-op and the DOM is untouched.
    engine.refresh_gallery();
    next_frame().await;
    next_frame().await;
    let after_second = container.first_element_child().expect("gallery item");
    assert!(
        js_sys::Object::is(first_build.as_ref(), after_second.as_ref()),
        "matching signature still rebuilt the gallery"
    );
    host.remove();
}
