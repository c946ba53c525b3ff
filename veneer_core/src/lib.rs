// Copyright 2026 the Veneer Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Platform-independent logic for the Veneer enhancement engine.
//!
//! `veneer_core` holds everything about the decorators that does not touch a
//! DOM: deterministic layout generation, slider position math and pointer
//! gating, gallery source normalization and change detection, timeline
//! scheduling, reveal bookkeeping, and card background hashing. It is
//! `no_std` compatible (with `alloc`) so the same code runs unchanged in the
//! browser module and in native unit tests.
//!
//! # Architecture
//!
//! Each decorator splits into a pure half here and a DOM half in
//! `veneer_dom`. The DOM half reads element state, calls into this crate for
//! every decision, and writes the result back as style variables, classes,
//! and attributes:
//!
//! ```text
//!   marker attributes ──► veneer_core (decide) ──► style vars / classes
//!         ▲                                              │
//!         └────────────── veneer_dom (observe) ◄─────────┘
//! ```
//!
//! **[`seed`]** — Sine-fract pseudo-random generator and the per-index
//! [`GalleryLayout`](seed::GalleryLayout) parameter family. Reproducible by
//! contract: the same index always yields the same tuple.
//!
//! **[`slider`]** — Position clamping and computation for the comparison
//! slider, plus the [`PointerGate`](slider::PointerGate) that restricts a
//! drag to the pointer that started it.
//!
//! **[`timeline`]** — Reveal-mode decision and the staggered step schedule.
//!
//! **[`gallery`]** — Source resolution, URL normalization, deduplication,
//! and the rebuild [`signature`](gallery::signature).
//!
//! **[`reveal`]** — Stable order-index assignment and the one-shot vs
//! repeatable intersection transition table.
//!
//! **[`card`]** — Rolling hash, tilt derivation, and CSS URL escaping for
//! card background previews.
//!
//! **[`motion`]** — The [`Motion`](motion::Motion) preference read once per
//! orchestration pass and threaded through every decorator.

#![no_std]

extern crate alloc;

pub mod card;
pub mod gallery;
pub mod motion;
pub mod reveal;
pub mod seed;
pub mod slider;
pub mod timeline;
