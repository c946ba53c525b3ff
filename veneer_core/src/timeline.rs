// Copyright 2026 the Veneer Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Reveal-mode decision and step scheduling for feature timelines.
//!
//! A timeline reveals its steps exactly once per instance lifetime: either
//! immediately (animation disabled, or reduced motion requested) or
//! staggered in index order after the element first scrolls into view. The
//! schedule is computed here; firing the timers and watching visibility is
//! the DOM layer's job.

use crate::motion::Motion;

/// Milliseconds between consecutive step reveals when none is configured.
pub const DEFAULT_STEP_DELAY_MS: u32 = 160;

/// How a timeline instance reveals its steps.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RevealMode {
    /// All steps become visible at init time, no observer, no timers.
    Immediate,
    /// Steps become visible in index order once the element intersects the
    /// viewport, spaced by the configured delay.
    Staggered {
        /// Milliseconds between consecutive steps.
        step_delay_ms: u32,
    },
}

impl RevealMode {
    /// Decides the mode from the element's animate flag, its delay
    /// attribute, and the pass-wide motion preference.
    ///
    /// `animate_attr` is the raw attribute value; only the literal `"true"`
    /// opts in. `delay_attr` falls back to [`DEFAULT_STEP_DELAY_MS`] when
    /// missing or unparsable.
    #[must_use]
    pub fn decide(animate_attr: Option<&str>, delay_attr: Option<&str>, motion: Motion) -> Self {
        let animate = animate_attr == Some("true");
        if !animate || motion.is_reduced() {
            return Self::Immediate;
        }
        let step_delay_ms = delay_attr
            .and_then(|raw| raw.trim().parse::<u32>().ok())
            .unwrap_or(DEFAULT_STEP_DELAY_MS);
        Self::Staggered { step_delay_ms }
    }
}

/// Returns the reveal offset in milliseconds for the step at `index`.
///
/// Saturates rather than wrapping on absurd configurations.
#[must_use]
pub fn step_offset_ms(index: u32, step_delay_ms: u32) -> u32 {
    index.saturating_mul(step_delay_ms)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn animation_requires_explicit_opt_in() {
        assert_eq!(
            RevealMode::decide(None, None, Motion::Full),
            RevealMode::Immediate
        );
        assert_eq!(
            RevealMode::decide(Some("false"), None, Motion::Full),
            RevealMode::Immediate
        );
        assert_eq!(
            RevealMode::decide(Some("TRUE"), None, Motion::Full),
            RevealMode::Immediate
        );
        assert_eq!(
            RevealMode::decide(Some("true"), None, Motion::Full),
            RevealMode::Staggered { step_delay_ms: 160 }
        );
    }

    #[test]
    fn reduced_motion_wins_over_opt_in() {
        assert_eq!(
            RevealMode::decide(Some("true"), Some("90"), Motion::Reduced),
            RevealMode::Immediate
        );
    }

    #[test]
    fn delay_parses_with_fallback() {
        assert_eq!(
            RevealMode::decide(Some("true"), Some("240"), Motion::Full),
            RevealMode::Staggered { step_delay_ms: 240 }
        );
        assert_eq!(
            RevealMode::decide(Some("true"), Some("fast"), Motion::Full),
            RevealMode::Staggered { step_delay_ms: 160 }
        );
    }

    #[test]
    fn schedule_is_strictly_increasing_in_index_order() {
        let offsets: alloc::vec::Vec<_> = (0..3).map(|i| step_offset_ms(i, 160)).collect();
        assert_eq!(offsets, [0, 160, 320]);
        assert!(offsets.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn schedule_saturates() {
        assert_eq!(step_offset_ms(u32::MAX, 2), u32::MAX);
    }
}
