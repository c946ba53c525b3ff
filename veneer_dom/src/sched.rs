// Copyright 2026 the Veneer Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Frame and timer scheduling slots.
//!
//! Thin wrappers over `requestAnimationFrame` and `setTimeout` with the
//! coalescing semantics the decorators need: a slot holds at most one
//! pending callback, and scheduling into an occupied slot cancels the
//! previous request first, so the latest request always wins. Dropping a
//! slot cancels whatever is pending.

use alloc::boxed::Box;
use alloc::rc::Rc;
use core::cell::{Cell, RefCell};

use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;

// Direct global bindings instead of `web_sys::Window` methods — avoids
// fetching (and unwrapping) the Window object on every call.
#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_name = "requestAnimationFrame")]
    fn request_animation_frame(callback: &JsValue) -> i32;

    #[wasm_bindgen(js_name = "cancelAnimationFrame")]
    fn cancel_animation_frame(id: i32);

    #[wasm_bindgen(js_name = "setTimeout")]
    fn set_timeout(callback: &JsValue, delay_ms: i32) -> i32;

    #[wasm_bindgen(js_name = "clearTimeout")]
    fn clear_timeout(id: i32);
}

/// A single-occupancy `requestAnimationFrame` slot.
///
/// Used to collapse bursts of rebuild requests into one run per frame: each
/// [`schedule`](Self::schedule) cancels any not-yet-run predecessor.
pub(crate) struct FrameSlot {
    inner: Rc<SlotInner<dyn FnMut(f64)>>,
}

/// A single-occupancy `setTimeout` slot; re-scheduling debounces.
pub(crate) struct TimerSlot {
    inner: Rc<SlotInner<dyn FnMut()>>,
}

struct SlotInner<F: ?Sized> {
    pending: Cell<Option<i32>>,
    // The live JS closure. Kept here so it outlives the browser callback and
    // is released once replaced or the slot is dropped.
    closure: RefCell<Option<Closure<F>>>,
}

impl FrameSlot {
    pub(crate) fn new() -> Self {
        Self {
            inner: Rc::new(SlotInner {
                pending: Cell::new(None),
                closure: RefCell::new(None),
            }),
        }
    }

    /// Schedules `task` for the next animation frame, replacing any pending
    /// one. The task must not re-schedule into the *same* slot from inside
    /// its own callback; chain through a second slot instead.
    pub(crate) fn schedule(&self, task: impl FnOnce() + 'static) {
        if let Some(id) = self.inner.pending.take() {
            cancel_animation_frame(id);
        }
        let inner = Rc::clone(&self.inner);
        let mut task = Some(task);
        let closure = Closure::wrap(Box::new(move |_timestamp_ms: f64| {
            inner.pending.set(None);
            if let Some(task) = task.take() {
                task();
            }
        }) as Box<dyn FnMut(f64)>);
        let id = request_animation_frame(closure.as_ref().unchecked_ref());
        self.inner.pending.set(Some(id));
        *self.inner.closure.borrow_mut() = Some(closure);
    }

    pub(crate) fn cancel(&self) {
        if let Some(id) = self.inner.pending.take() {
            cancel_animation_frame(id);
        }
    }
}

impl Drop for FrameSlot {
    fn drop(&mut self) {
        self.cancel();
    }
}

impl core::fmt::Debug for FrameSlot {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("FrameSlot")
            .field("pending", &self.inner.pending.get())
            .finish()
    }
}

impl TimerSlot {
    pub(crate) fn new() -> Self {
        Self {
            inner: Rc::new(SlotInner {
                pending: Cell::new(None),
                closure: RefCell::new(None),
            }),
        }
    }

    /// Schedules `task` after `delay_ms`, cancelling and replacing any
    /// pending one (debounce, not queue).
    pub(crate) fn debounce(&self, delay_ms: i32, task: impl FnOnce() + 'static) {
        self.cancel();
        let inner = Rc::clone(&self.inner);
        let mut task = Some(task);
        let closure = Closure::wrap(Box::new(move || {
            inner.pending.set(None);
            if let Some(task) = task.take() {
                task();
            }
        }) as Box<dyn FnMut()>);
        let id = set_timeout(closure.as_ref().unchecked_ref(), delay_ms);
        self.inner.pending.set(Some(id));
        *self.inner.closure.borrow_mut() = Some(closure);
    }

    pub(crate) fn cancel(&self) {
        if let Some(id) = self.inner.pending.take() {
            clear_timeout(id);
        }
    }
}

impl Drop for TimerSlot {
    fn drop(&mut self) {
        self.cancel();
    }
}

impl core::fmt::Debug for TimerSlot {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("TimerSlot")
            .field("pending", &self.inner.pending.get())
            .finish()
    }
}
