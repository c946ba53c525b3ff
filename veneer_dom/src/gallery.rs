// Copyright 2026 the Veneer Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Procedural floating-image gallery builder.
//!
//! Rebuilds the `[data-floating-gallery]` layer from the images currently in
//! the document. Requests are frame-coalesced — any number of callers may
//! ask for a rebuild in the same animation frame and exactly one scan runs,
//! the latest request winning. The scan reduces to a signature; when it
//! matches the last applied one the rebuild is a guaranteed no-op, which is
//! what makes it safe to request from every lifecycle signal and every
//! qualifying mutation.

use alloc::format;
use alloc::rc::Rc;
use alloc::string::String;
use alloc::vec::Vec;
use core::cell::RefCell;

use veneer_core::gallery::{SourceCandidate, collect_sources, signature};
use veneer_core::seed::GalleryLayout;
use wasm_bindgen::JsCast as _;
use wasm_bindgen::JsValue;
use web_sys::{Document, Element, HtmlElement};

use crate::dom;
use crate::sched::FrameSlot;

pub(crate) const CONTAINER_SELECTOR: &str = "[data-floating-gallery]";

const ITEM_CLASS: &str = "floating-gallery-item";
const POPULATED_CLASS: &str = "is-populated";

/// Frame-coalesced rebuilder for the floating gallery layer.
#[derive(Debug)]
pub(crate) struct GalleryBuilder {
    inner: Rc<Inner>,
}

#[derive(Debug)]
struct Inner {
    document: Document,
    rebuild_slot: FrameSlot,
    // Separate slot for the visibility flip: it is scheduled from inside
    // the rebuild callback and a slot must not replace itself mid-run.
    populate_slot: FrameSlot,
    last_signature: RefCell<Option<String>>,
}

impl GalleryBuilder {
    pub(crate) fn new(document: Document) -> Self {
        Self {
            inner: Rc::new(Inner {
                document,
                rebuild_slot: FrameSlot::new(),
                populate_slot: FrameSlot::new(),
                last_signature: RefCell::new(None),
            }),
        }
    }

    /// Requests a rebuild on the next animation frame. Requests within one
    /// frame collapse into a single run.
    pub(crate) fn request_rebuild(&self) {
        let inner = Rc::clone(&self.inner);
        self.inner.rebuild_slot.schedule(move || rebuild(&inner));
    }
}

fn rebuild(inner: &Rc<Inner>) {
    let Some(container) = inner
        .document
        .query_selector(CONTAINER_SELECTOR)
        .ok()
        .flatten()
    else {
        return;
    };

    let candidates: Vec<SourceCandidate> = dom::query_all(inner.document.as_ref(), "img")
        .iter()
        .map(dom::source_candidate)
        .collect();
    let sources = collect_sources(&candidates);
    let scanned = signature(&sources);
    if inner.last_signature.borrow().as_deref() == Some(scanned.as_str()) {
        return;
    }

    let _ = container.class_list().remove_1(POPULATED_CLASS);
    container.set_inner_html("");
    for (index, source) in sources.iter().enumerate() {
        if let Ok(item) = build_item(&inner.document, index, source) {
            let _ = container.append_child(&item);
        }
    }
    *inner.last_signature.borrow_mut() = Some(scanned);

    // Flip visibility on the next paint so the fresh items never flash in
    // unstyled.
    inner.populate_slot.schedule(move || {
        let _ = container.class_list().add_1(POPULATED_CLASS);
    });
}

fn build_item(document: &Document, index: usize, source: &str) -> Result<Element, JsValue> {
    let item = document.create_element("div")?;
    item.set_class_name(ITEM_CLASS);
    let layout = GalleryLayout::for_index(index);
    if let Some(styled) = item.dyn_ref::<HtmlElement>() {
        let style = styled.style();
        let _ = style.set_property("--float-left", &format!("{:.3}%", layout.left_pct));
        let _ = style.set_property("--float-top", &format!("{:.3}%", layout.top_pct));
        let _ = style.set_property("--float-scale", &format!("{:.3}", layout.scale));
        let _ = style.set_property("--float-drift", &format!("{:.2}px", layout.drift_px));
        let _ = style.set_property("--float-duration", &format!("{:.2}s", layout.duration_s));
        let _ = style.set_property("--float-delay", &format!("{:.2}s", layout.delay_s));
        let _ = style.set_property("--float-opacity", &format!("{:.3}", layout.opacity));
        let _ = style.set_property("--float-rotation", &format!("{:.2}deg", layout.rotation_deg));
    }

    let image = document.create_element("img")?;
    image.set_attribute("src", source)?;
    image.set_attribute("alt", "")?;
    image.set_attribute("loading", "lazy")?;
    item.append_child(&image)?;
    Ok(item)
}
