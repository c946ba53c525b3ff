// Copyright 2026 the Veneer Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Before/after comparison slider controller.
//!
//! A `[data-before-after]` block wraps a media surface, an "after" layer,
//! and a range input. Pointer drags, bare clicks, and range input all funnel
//! into one position setter that writes the `--before-after-position` style
//! variable, mirrors the value into the range input, and (with full motion)
//! pulses a saturation emphasis on the after layer that reverts on a
//! debounced timer. A resize observer re-applies the current value so layout
//! shifts don't strand the divider.
//!
//! Drags are gated per pointer id: only the pointer that started the drag
//! may move or end it. Attach is idempotent via the readiness attribute; the
//! engine tears an element down before asking for a fresh instance.

use alloc::boxed::Box;
use alloc::format;
use alloc::rc::Rc;
use alloc::vec::Vec;
use core::cell::Cell;

use veneer_core::motion::Motion;
use veneer_core::slider::{PointerGate, clamp_position, initial_position, position_from_pointer};
use wasm_bindgen::JsCast as _;
use wasm_bindgen::JsValue;
use wasm_bindgen::closure::Closure;
use web_sys::{Element, Event, HtmlElement, HtmlInputElement, MouseEvent, PointerEvent,
    ResizeObserver};

use crate::dom::Listener;
use crate::engine::EngineConfig;
use crate::handle::Teardown;
use crate::sched::TimerSlot;

pub(crate) const SELECTOR: &str = "[data-before-after]";

const READY_ATTR: &str = "data-before-after-ready";
const INITIAL_ATTR: &str = "data-initial";
const MEDIA_SELECTOR: &str = ".before-after-media";
const AFTER_SELECTOR: &str = ".before-after-after";
const RANGE_SELECTOR: &str = ".before-after-range";
const POSITION_VAR: &str = "--before-after-position";
const DRAGGING_CLASS: &str = "is-dragging";
const EMPHASIS_FILTER: &str = "saturate(110%)";

struct Parts {
    container: Element,
    media: Element,
    after: HtmlElement,
    range: HtmlInputElement,
    gate: Cell<PointerGate>,
    emphasis: TimerSlot,
    motion: Motion,
    revert_ms: i32,
}

fn apply_position(parts: &Parts, raw: f64) {
    let value = clamp_position(raw);
    if let Some(container) = parts.container.dyn_ref::<HtmlElement>() {
        let _ = container
            .style()
            .set_property(POSITION_VAR, &format!("{value}"));
    }
    parts.range.set_value(&format!("{value}"));
    if parts.motion.is_reduced() {
        return;
    }
    let _ = parts.after.style().set_property("filter", EMPHASIS_FILTER);
    let after = parts.after.clone();
    parts.emphasis.debounce(parts.revert_ms, move || {
        let _ = after.style().remove_property("filter");
    });
}

fn pointer_value(parts: &Parts, client_x: f64) -> f64 {
    let rect = parts.media.get_bounding_client_rect();
    let current = parts.range.value_as_number();
    let current = if current.is_finite() { current } else { 50.0 };
    position_from_pointer(client_x, rect.left(), rect.width(), current)
}

fn finish_drag(parts: &Parts, event: &Event) {
    let Some(event) = event.dyn_ref::<PointerEvent>() else {
        return;
    };
    let id = event.pointer_id();
    let mut gate = parts.gate.get();
    let ended = gate.end(id);
    parts.gate.set(gate);
    if !ended {
        return;
    }
    let _ = parts.media.release_pointer_capture(id);
    let _ = parts.media.class_list().remove_1(DRAGGING_CLASS);
}

/// Attaches the slider to `container`.
///
/// Returns `Ok(None)` when the element is already decorated or the required
/// children are missing (silent no-op); otherwise the cleanup handle.
pub(crate) fn attach(
    container: &Element,
    motion: Motion,
    config: &EngineConfig,
) -> Result<Option<Teardown>, JsValue> {
    if container.get_attribute(READY_ATTR).as_deref() == Some("true") {
        return Ok(None);
    }
    let Some(media) = container.query_selector(MEDIA_SELECTOR)? else {
        return Ok(None);
    };
    let Some(after) = container
        .query_selector(AFTER_SELECTOR)?
        .and_then(|el| el.dyn_into::<HtmlElement>().ok())
    else {
        return Ok(None);
    };
    let Some(range) = container
        .query_selector(RANGE_SELECTOR)?
        .and_then(|el| el.dyn_into::<HtmlInputElement>().ok())
    else {
        return Ok(None);
    };

    let parts = Rc::new(Parts {
        container: container.clone(),
        media,
        after,
        range,
        gate: Cell::new(PointerGate::new()),
        emphasis: TimerSlot::new(),
        motion,
        revert_ms: config.emphasis_revert_ms,
    });

    let mut listeners = Vec::new();

    let down_parts = Rc::clone(&parts);
    listeners.push(Listener::add(
        parts.media.as_ref(),
        "pointerdown",
        move |event| {
            let Some(event) = event.dyn_ref::<PointerEvent>() else {
                return;
            };
            let id = event.pointer_id();
            let mut gate = down_parts.gate.get();
            gate.begin(id);
            down_parts.gate.set(gate);
            let _ = down_parts.media.set_pointer_capture(id);
            let _ = down_parts.media.class_list().add_1(DRAGGING_CLASS);
            apply_position(&down_parts, pointer_value(&down_parts, f64::from(event.client_x())));
        },
    )?);

    let move_parts = Rc::clone(&parts);
    listeners.push(Listener::add(
        parts.media.as_ref(),
        "pointermove",
        move |event| {
            let Some(pointer) = event.dyn_ref::<PointerEvent>() else {
                return;
            };
            if !move_parts.gate.get().accepts(pointer.pointer_id()) {
                return;
            }
            event.prevent_default();
            apply_position(&move_parts, pointer_value(&move_parts, f64::from(pointer.client_x())));
        },
    )?);

    for kind in ["pointerup", "pointercancel"] {
        let up_parts = Rc::clone(&parts);
        listeners.push(Listener::add(parts.media.as_ref(), kind, move |event| {
            finish_drag(&up_parts, &event);
        })?);
    }

    let click_parts = Rc::clone(&parts);
    listeners.push(Listener::add(parts.media.as_ref(), "click", move |event| {
        let Some(event) = event.dyn_ref::<MouseEvent>() else {
            return;
        };
        apply_position(&click_parts, pointer_value(&click_parts, f64::from(event.client_x())));
    })?);

    let input_parts = Rc::clone(&parts);
    listeners.push(Listener::add(parts.range.as_ref(), "input", move |_event| {
        apply_position(&input_parts, input_parts.range.value_as_number());
    })?);

    // Layout shifts change the media rect; re-apply so the divider tracks
    // the stored value. Without the observer the feature degrades to
    // manual-only updates.
    let resize_parts = Rc::clone(&parts);
    let resize_closure = Closure::wrap(Box::new(
        move |_entries: js_sys::Array, _observer: ResizeObserver| {
            apply_position(&resize_parts, resize_parts.range.value_as_number());
        },
    )
        as Box<dyn FnMut(js_sys::Array, ResizeObserver)>);
    let resize_observer = ResizeObserver::new(resize_closure.as_ref().unchecked_ref()).ok();
    if let Some(observer) = &resize_observer {
        observer.observe(&parts.media);
    }

    let range_value = {
        let value = parts.range.value_as_number();
        value.is_finite().then_some(value)
    };
    apply_position(
        &parts,
        initial_position(container.get_attribute(INITIAL_ATTR).as_deref(), range_value),
    );
    container.set_attribute(READY_ATTR, "true")?;

    let mut teardown = Teardown::new();
    let cleanup_parts = Rc::clone(&parts);
    teardown.defer(move || {
        if let Some(observer) = resize_observer {
            observer.disconnect();
        }
        drop(resize_closure);
        drop(listeners);
        cleanup_parts.emphasis.cancel();
        let _ = cleanup_parts.after.style().remove_property("filter");
        let _ = cleanup_parts.media.class_list().remove_1(DRAGGING_CLASS);
        let _ = cleanup_parts.container.remove_attribute(READY_ATTR);
    });
    Ok(Some(teardown))
}
