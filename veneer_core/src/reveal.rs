// Copyright 2026 the Veneer Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Bookkeeping for the shared scroll-reveal observer.
//!
//! Two concerns live here. The order index staggers reveal transitions via
//! a style variable: each element gets a stable slot in `[0, ORDER_SLOTS)`
//! on first encounter and keeps it for the rest of the page's life, no
//! matter how many times the pass re-runs. The transition table decides what
//! an intersection callback does to an element, the only place where
//! one-shot and repeatable reveals differ.

/// Number of stagger slots; order indices cycle through `0..ORDER_SLOTS`.
pub const ORDER_SLOTS: u32 = 8;

/// Round-robin dispenser for reveal order indices.
///
/// Owned by the orchestrator so the cycle continues across passes instead of
/// restarting at zero for every subtree.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct OrderDispenser {
    issued: u32,
}

impl OrderDispenser {
    /// Creates a dispenser starting at slot 0.
    #[must_use]
    pub const fn new() -> Self {
        Self { issued: 0 }
    }

    /// Issues the next order index.
    pub fn next_index(&mut self) -> u32 {
        let index = self.issued % ORDER_SLOTS;
        self.issued = self.issued.wrapping_add(1);
        index
    }
}

/// Whether an element re-hides when it leaves the viewport.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RevealBehavior {
    /// Reveal once, then stop observing.
    OneShot,
    /// Toggle with viewport intersection, observe forever.
    Repeatable,
}

impl RevealBehavior {
    /// Reads the behavior off the repeat-marker attribute value.
    #[must_use]
    pub fn from_repeat_attr(attr: Option<&str>) -> Self {
        if attr == Some("true") {
            Self::Repeatable
        } else {
            Self::OneShot
        }
    }
}

/// What the observer callback should do to one element.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RevealAction {
    /// Mark revealed and keep observing.
    Reveal,
    /// Mark revealed and stop observing this element.
    RevealAndUnobserve,
    /// Remove the revealed mark, keep observing.
    Unreveal,
    /// Nothing to do.
    None,
}

/// Decides the action for one intersection callback.
#[must_use]
pub fn on_intersection(behavior: RevealBehavior, is_intersecting: bool) -> RevealAction {
    match (behavior, is_intersecting) {
        (RevealBehavior::OneShot, true) => RevealAction::RevealAndUnobserve,
        (RevealBehavior::Repeatable, true) => RevealAction::Reveal,
        (RevealBehavior::Repeatable, false) => RevealAction::Unreveal,
        // A one-shot element leaving the viewport stays as it is: either
        // not yet revealed, or already revealed and unobserved.
        (RevealBehavior::OneShot, false) => RevealAction::None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dispenser_cycles_through_slots() {
        let mut dispenser = OrderDispenser::new();
        let issued: alloc::vec::Vec<_> = (0..10).map(|_| dispenser.next_index()).collect();
        assert_eq!(issued, [0, 1, 2, 3, 4, 5, 6, 7, 0, 1]);
        assert!(issued.iter().all(|&i| i < ORDER_SLOTS));
    }

    #[test]
    fn behavior_requires_the_literal_true() {
        assert_eq!(
            RevealBehavior::from_repeat_attr(Some("true")),
            RevealBehavior::Repeatable
        );
        assert_eq!(
            RevealBehavior::from_repeat_attr(Some("yes")),
            RevealBehavior::OneShot
        );
        assert_eq!(
            RevealBehavior::from_repeat_attr(None),
            RevealBehavior::OneShot
        );
    }

    #[test]
    fn one_shot_reveals_once_and_stays_revealed() {
        assert_eq!(
            on_intersection(RevealBehavior::OneShot, true),
            RevealAction::RevealAndUnobserve
        );
        // A later "not intersecting" callback must not un-reveal.
        assert_eq!(
            on_intersection(RevealBehavior::OneShot, false),
            RevealAction::None
        );
    }

    #[test]
    fn repeatable_toggles_with_the_viewport() {
        assert_eq!(
            on_intersection(RevealBehavior::Repeatable, true),
            RevealAction::Reveal
        );
        assert_eq!(
            on_intersection(RevealBehavior::Repeatable, false),
            RevealAction::Unreveal
        );
        assert_eq!(
            on_intersection(RevealBehavior::Repeatable, true),
            RevealAction::Reveal
        );
    }
}
