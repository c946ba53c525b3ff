// Copyright 2026 the Veneer Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Staggered reveal stepper for feature timelines.
//!
//! Steps start hidden and reveal exactly once per instance: immediately when
//! animation is off or reduced motion is requested, otherwise in index order
//! once the timeline first intersects the viewport. The intersection
//! observer is single-shot — it disconnects after the first trigger and the
//! instance never re-fires, unlike the generic scroll-reveal observer.

use alloc::boxed::Box;
use alloc::rc::Rc;
use alloc::vec::Vec;
use core::cell::RefCell;

use veneer_core::motion::Motion;
use veneer_core::timeline::{RevealMode, step_offset_ms};
use wasm_bindgen::JsCast as _;
use wasm_bindgen::JsValue;
use wasm_bindgen::closure::Closure;
use web_sys::{Element, IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit};

use crate::dom;
use crate::engine::EngineConfig;
use crate::handle::Teardown;
use crate::sched::TimerSlot;

pub(crate) const SELECTOR: &str = "[data-feature-timeline]";

const READY_ATTR: &str = "data-timeline-ready";
const ANIMATE_ATTR: &str = "data-animate";
const DELAY_ATTR: &str = "data-delay";
const STEP_SELECTOR: &str = ".feature-timeline-step";
const VISIBLE_CLASS: &str = "is-visible";

/// Attaches the stepper to `element`.
///
/// `Ok(None)` when already decorated or no steps exist.
pub(crate) fn attach(
    element: &Element,
    motion: Motion,
    config: &EngineConfig,
) -> Result<Option<Teardown>, JsValue> {
    if element.get_attribute(READY_ATTR).as_deref() == Some("true") {
        return Ok(None);
    }
    let steps = dom::query_all(element.as_ref(), STEP_SELECTOR);
    if steps.is_empty() {
        return Ok(None);
    }
    for step in &steps {
        let _ = step.class_list().remove_1(VISIBLE_CLASS);
    }

    let mode = RevealMode::decide(
        element.get_attribute(ANIMATE_ATTR).as_deref(),
        element.get_attribute(DELAY_ATTR).as_deref(),
        motion,
    );

    let RevealMode::Staggered { step_delay_ms } = mode else {
        for step in &steps {
            let _ = step.class_list().add_1(VISIBLE_CLASS);
        }
        element.set_attribute(READY_ATTR, "true")?;
        let cleared = element.clone();
        let mut teardown = Teardown::new();
        teardown.defer(move || {
            let _ = cleared.remove_attribute(READY_ATTR);
        });
        return Ok(Some(teardown));
    };

    // Pending step timers, shared with the cleanup handle so teardown can
    // cancel reveals that have not fired yet.
    let timers: Rc<RefCell<Vec<TimerSlot>>> = Rc::new(RefCell::new(Vec::new()));

    let observed_steps = steps;
    let timer_store = Rc::clone(&timers);
    let observer_closure = Closure::wrap(Box::new(
        move |entries: js_sys::Array, observer: IntersectionObserver| {
            let intersecting = entries.iter().any(|entry| {
                entry
                    .dyn_ref::<IntersectionObserverEntry>()
                    .is_some_and(IntersectionObserverEntry::is_intersecting)
            });
            if !intersecting {
                return;
            }
            for (index, step) in observed_steps.iter().enumerate() {
                let offset = step_offset_ms(u32::try_from(index).unwrap_or(u32::MAX), step_delay_ms);
                let slot = TimerSlot::new();
                let step = step.clone();
                slot.debounce(i32::try_from(offset).unwrap_or(i32::MAX), move || {
                    let _ = step.class_list().add_1(VISIBLE_CLASS);
                });
                timer_store.borrow_mut().push(slot);
            }
            // Single-shot: the instance never re-triggers.
            observer.disconnect();
        },
    )
        as Box<dyn FnMut(js_sys::Array, IntersectionObserver)>);

    let options = IntersectionObserverInit::new();
    options.set_threshold(&JsValue::from_f64(config.timeline_threshold));
    let Ok(observer) =
        IntersectionObserver::new_with_options(observer_closure.as_ref().unchecked_ref(), &options)
    else {
        // Host without the observer API: reveal immediately rather than
        // leaving content hidden forever.
        for step in dom::query_all(element.as_ref(), STEP_SELECTOR) {
            let _ = step.class_list().add_1(VISIBLE_CLASS);
        }
        element.set_attribute(READY_ATTR, "true")?;
        let cleared = element.clone();
        let mut teardown = Teardown::new();
        teardown.defer(move || {
            let _ = cleared.remove_attribute(READY_ATTR);
        });
        return Ok(Some(teardown));
    };
    observer.observe(element);
    element.set_attribute(READY_ATTR, "true")?;

    let mut teardown = Teardown::new();
    let cleared = element.clone();
    teardown.defer(move || {
        observer.disconnect();
        drop(observer_closure);
        for slot in timers.borrow_mut().drain(..) {
            slot.cancel();
        }
        let _ = cleared.remove_attribute(READY_ATTR);
    });
    Ok(Some(teardown))
}
