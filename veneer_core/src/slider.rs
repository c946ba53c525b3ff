// Copyright 2026 the Veneer Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Position math and pointer gating for the comparison slider.
//!
//! The slider's position is a percentage in `[0, 100]` describing how much
//! of the "after" layer is uncovered. All inputs funnel through
//! [`clamp_position`], so out-of-range clicks (left of the surface, right of
//! the surface) pin to the ends instead of escaping the range.
//!
//! [`PointerGate`] is the drag state machine: a drag belongs to the pointer
//! that started it, and events carrying any other pointer id are ignored
//! until that pointer releases. This is what keeps a stray second finger
//! from teleporting the divider mid-drag.

/// Clamps a raw position value to the valid `[0, 100]` range.
///
/// Non-finite input collapses to the lower bound rather than propagating.
#[must_use]
pub fn clamp_position(value: f64) -> f64 {
    if value.is_finite() {
        value.clamp(0.0, 100.0)
    } else {
        0.0
    }
}

/// Computes the position for a pointer at `client_x` over a surface spanning
/// `[rect_left, rect_left + rect_width)`.
///
/// A zero-width surface (display: none, mid-layout) cannot produce a
/// meaningful ratio, so the caller's current value is reused instead.
#[must_use]
pub fn position_from_pointer(client_x: f64, rect_left: f64, rect_width: f64, current: f64) -> f64 {
    if rect_width <= 0.0 {
        return clamp_position(current);
    }
    clamp_position((client_x - rect_left) / rect_width * 100.0)
}

/// Resolves the position to apply at attach time.
///
/// Precedence: the explicit initial-value attribute when it parses, then the
/// range input's current value, then the centered default of 50. An
/// unparsable attribute is treated as absent, not as an error.
#[must_use]
pub fn initial_position(attr: Option<&str>, range_value: Option<f64>) -> f64 {
    if let Some(raw) = attr
        && let Ok(parsed) = raw.trim().parse::<f64>()
    {
        return clamp_position(parsed);
    }
    match range_value {
        Some(value) => clamp_position(value),
        None => 50.0,
    }
}

/// Tracks which pointer, if any, owns the current drag.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PointerGate {
    active: Option<i32>,
}

impl PointerGate {
    /// Creates a gate with no active drag.
    #[must_use]
    pub const fn new() -> Self {
        Self { active: None }
    }

    /// Starts a drag owned by `pointer_id`.
    ///
    /// A new pointer-down takes over unconditionally: the browser delivers
    /// pointerup/pointercancel for the old pointer to us anyway, and last
    /// writer wins.
    pub fn begin(&mut self, pointer_id: i32) {
        self.active = Some(pointer_id);
    }

    /// Returns `true` when a move event for `pointer_id` should update the
    /// position.
    #[must_use]
    pub fn accepts(&self, pointer_id: i32) -> bool {
        self.active == Some(pointer_id)
    }

    /// Ends the drag if `pointer_id` owns it. Returns `true` when the drag
    /// actually ended, so the caller knows to release capture.
    pub fn end(&mut self, pointer_id: i32) -> bool {
        if self.active == Some(pointer_id) {
            self.active = None;
            true
        } else {
            false
        }
    }

    /// Returns `true` while a drag is in progress.
    #[must_use]
    pub const fn dragging(&self) -> bool {
        self.active.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamp_pins_out_of_range_values() {
        assert_eq!(clamp_position(-4.0), 0.0);
        assert_eq!(clamp_position(104.0), 100.0);
        assert_eq!(clamp_position(33.3), 33.3);
        assert_eq!(clamp_position(f64::NAN), 0.0);
    }

    #[test]
    fn pointer_position_is_a_ratio_of_the_surface() {
        // 300px surface: dead center and quarter clicks.
        assert_eq!(position_from_pointer(150.0, 0.0, 300.0, 50.0), 50.0);
        assert_eq!(position_from_pointer(75.0, 0.0, 300.0, 50.0), 25.0);
        // Offset surface.
        assert_eq!(position_from_pointer(250.0, 100.0, 300.0, 50.0), 50.0);
    }

    #[test]
    fn pointer_position_clamps_outside_the_surface() {
        assert_eq!(position_from_pointer(-40.0, 0.0, 300.0, 50.0), 0.0);
        assert_eq!(position_from_pointer(900.0, 0.0, 300.0, 50.0), 100.0);
    }

    #[test]
    fn zero_width_surface_keeps_the_current_value() {
        assert_eq!(position_from_pointer(150.0, 0.0, 0.0, 62.0), 62.0);
        assert_eq!(position_from_pointer(150.0, 0.0, -1.0, 130.0), 100.0);
    }

    #[test]
    fn initial_position_precedence() {
        assert_eq!(initial_position(Some("37"), Some(80.0)), 37.0);
        assert_eq!(initial_position(Some("120"), Some(80.0)), 100.0);
        assert_eq!(initial_position(None, Some(80.0)), 80.0);
        assert_eq!(initial_position(None, None), 50.0);
        // Unparsable attribute falls through instead of poisoning the clamp.
        assert_eq!(initial_position(Some("wide"), Some(80.0)), 80.0);
        assert_eq!(initial_position(Some(""), None), 50.0);
    }

    #[test]
    fn gate_ignores_foreign_pointers() {
        let mut gate = PointerGate::new();
        gate.begin(7);
        assert!(gate.accepts(7));
        assert!(!gate.accepts(8));
        // Foreign release does not end the drag.
        assert!(!gate.end(8));
        assert!(gate.dragging());
        assert!(gate.end(7));
        assert!(!gate.dragging());
        assert!(!gate.accepts(7));
    }

    #[test]
    fn drag_sequence_lands_on_last_move() {
        let mut gate = PointerGate::new();
        let mut position = 50.0;
        gate.begin(3);
        for x in [10.0, 120.0, 255.0] {
            if gate.accepts(3) {
                position = position_from_pointer(x, 0.0, 300.0, position);
            }
        }
        // A concurrent pointer tries to interfere.
        if gate.accepts(9) {
            position = position_from_pointer(0.0, 0.0, 300.0, position);
        }
        gate.end(3);
        assert_eq!(position, 85.0);
    }
}
