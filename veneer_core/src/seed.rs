// Copyright 2026 the Veneer Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Deterministic pseudo-random layout generation.
//!
//! The floating gallery places every item from nothing but its index, so a
//! rebuild that observes the same image list reproduces the exact same
//! composition. [`unit`] is the classic sine-fract hash: visually plausible
//! scatter, stable across re-application. It is a *reproducibility*
//! contract, not a statistical one — do not expect uniformity, only that the
//! same seed always yields the same value.
//!
//! Each gallery attribute derives its seed from a shared per-item base
//! multiplied by a distinct constant, decorrelating attributes from one
//! another while keeping the whole tuple a pure function of the index.

use core::f64::consts::PI;

/// Returns a reproducible value in `[0, 1)` for the given seed.
#[must_use]
pub fn unit(seed: f64) -> f64 {
    let x = libm::sin(seed) * 43758.545_312_3;
    x - libm::floor(x)
}

/// Maps [`unit`] into `[min, max)`.
#[must_use]
pub fn between(seed: f64, min: f64, max: f64) -> f64 {
    min + unit(seed) * (max - min)
}

// Per-attribute seed multipliers. Distinct primes-ish constants keep the
// derived seeds decorrelated for the same item.
const LEFT: f64 = 1.3;
const TOP: f64 = 2.1;
const SCALE: f64 = 3.7;
const DURATION: f64 = 4.9;
const DELAY: f64 = 5.3;
const OPACITY: f64 = 6.7;
const ROTATION: f64 = 7.1;
const DRIFT: f64 = 8.3;

/// The full layout/animation parameter tuple for one gallery item.
///
/// Produced by [`GalleryLayout::for_index`]; every field is a pure function
/// of the item index. The numeric ranges are visually tuned for a sparse
/// decorative layer and are not part of the reproducibility contract — the
/// determinism is.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GalleryLayout {
    /// Horizontal placement as a percentage of the container width.
    pub left_pct: f64,
    /// Vertical placement as a percentage of the container height.
    pub top_pct: f64,
    /// Uniform scale factor.
    pub scale: f64,
    /// Vertical float-drift amplitude in pixels.
    pub drift_px: f64,
    /// Float animation duration in seconds.
    pub duration_s: f64,
    /// Float animation delay in seconds. Negative, so items start mid-cycle
    /// and the layer never breathes in unison.
    pub delay_s: f64,
    /// Resting opacity.
    pub opacity: f64,
    /// Resting rotation in degrees.
    pub rotation_deg: f64,
}

impl GalleryLayout {
    /// Derives the parameter tuple for the gallery item at `index`.
    #[must_use]
    pub fn for_index(index: usize) -> Self {
        // Integer indices hash poorly through sin(); scaling by π keeps
        // successive base seeds off any obvious lattice.
        #[allow(
            clippy::cast_precision_loss,
            reason = "gallery indices are capped far below f64 precision limits"
        )]
        let base = (index + 1) as f64 * PI;
        Self {
            left_pct: between(base * LEFT, 2.0, 88.0),
            top_pct: between(base * TOP, 6.0, 78.0),
            scale: between(base * SCALE, 0.55, 1.25),
            drift_px: between(base * DRIFT, 12.0, 46.0),
            duration_s: between(base * DURATION, 14.0, 30.0),
            delay_s: between(base * DELAY, -18.0, 0.0),
            opacity: between(base * OPACITY, 0.25, 0.7),
            rotation_deg: between(base * ROTATION, -14.0, 14.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unit_stays_in_half_open_range() {
        for i in 0..200 {
            let v = unit(f64::from(i) * 0.73 + 0.1);
            assert!((0.0..1.0).contains(&v), "unit({i}) out of range: {v}");
        }
    }

    #[test]
    fn unit_is_deterministic() {
        assert_eq!(unit(12.5), unit(12.5));
        assert_eq!(unit(-3.1), unit(-3.1));
    }

    #[test]
    fn between_respects_bounds() {
        for i in 0..50 {
            let v = between(f64::from(i) * 1.9, 2.0, 88.0);
            assert!((2.0..88.0).contains(&v), "between out of range: {v}");
        }
    }

    #[test]
    fn layout_is_reproducible_per_index() {
        for index in 0..14 {
            assert_eq!(
                GalleryLayout::for_index(index),
                GalleryLayout::for_index(index)
            );
        }
    }

    #[test]
    fn layouts_are_pairwise_distinct_across_the_gallery_cap() {
        let layouts: alloc::vec::Vec<_> = (0..14).map(GalleryLayout::for_index).collect();
        for a in 0..layouts.len() {
            for b in (a + 1)..layouts.len() {
                assert_ne!(
                    layouts[a], layouts[b],
                    "items {a} and {b} received identical parameter tuples"
                );
            }
        }
    }

    #[test]
    fn attributes_are_decorrelated_within_one_item() {
        // Same base seed, different multipliers: the derived unit values
        // must not collapse onto each other.
        let base = PI;
        let left = unit(base * LEFT);
        let top = unit(base * TOP);
        let scale = unit(base * SCALE);
        assert_ne!(left, top);
        assert_ne!(top, scale);
        assert_ne!(left, scale);
    }
}
