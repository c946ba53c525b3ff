// Copyright 2026 the Veneer Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Cleanup handles and the per-decorator instance registry.
//!
//! Every ephemeral decorator instance (slider, timeline) returns a
//! [`Teardown`] from its attach call. The engine stores it keyed by element
//! identity and invokes it before the next attach to the same element —
//! cleanup runs-before re-initialization, which is the invariant that keeps
//! repeated lifecycle signals from leaking listeners, observers, or timers.
//! Invoking a handle twice is safe; tasks run at most once.

use alloc::boxed::Box;
use alloc::vec::Vec;

use web_sys::Element;

/// A one-shot bundle of cleanup tasks.
#[derive(Default)]
pub(crate) struct Teardown {
    tasks: Vec<Box<dyn FnOnce()>>,
}

impl Teardown {
    pub(crate) fn new() -> Self {
        Self { tasks: Vec::new() }
    }

    /// Registers a task. Values a decorator must keep alive until cleanup
    /// (listeners, observer closures) are moved into their task and dropped
    /// by it.
    pub(crate) fn defer(&mut self, task: impl FnOnce() + 'static) {
        self.tasks.push(Box::new(task));
    }

    /// Runs all tasks, synchronously. Idempotent.
    pub(crate) fn invoke(&mut self) {
        for task in self.tasks.drain(..) {
            task();
        }
    }
}

impl core::fmt::Debug for Teardown {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Teardown")
            .field("tasks", &self.tasks.len())
            .finish()
    }
}

/// Live instances of one decorator kind, keyed by element identity.
///
/// Element identity is JS object identity (`Object.is`); the registry stays
/// small (one entry per decorated element on the page) so a linear scan is
/// fine.
#[derive(Debug, Default)]
pub(crate) struct InstanceRegistry {
    entries: Vec<(Element, Teardown)>,
}

impl InstanceRegistry {
    pub(crate) fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Invokes and removes the stored handle for `element`, if any.
    pub(crate) fn dismiss(&mut self, element: &Element) {
        if let Some(at) = self.position(element) {
            let (_, mut teardown) = self.entries.swap_remove(at);
            teardown.invoke();
        }
    }

    /// Stores the handle for a freshly attached instance. Any previous
    /// handle for the same element is invoked first (last writer wins).
    pub(crate) fn store(&mut self, element: Element, teardown: Teardown) {
        self.dismiss(&element);
        self.entries.push((element, teardown));
    }

    fn position(&self, element: &Element) -> Option<usize> {
        self.entries
            .iter()
            .position(|(stored, _)| js_sys::Object::is(stored.as_ref(), element.as_ref()))
    }
}
