// Copyright 2026 the Veneer Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Feature-gated console diagnostics.
//!
//! With the `diag` feature off (the default) every call site compiles to
//! nothing. With it on, each pass logs one debug line to the browser
//! console — enough to see what a lifecycle signal or mutation actually
//! touched, cheap enough to leave in a preview build.

/// Logs one pass summary line.
#[cfg(feature = "diag")]
pub(crate) fn pass(label: &str, touched: usize) {
    web_sys::console::debug_1(&alloc::format!("veneer: {label} pass touched {touched}").into());
}

#[cfg(not(feature = "diag"))]
#[inline]
pub(crate) fn pass(_label: &str, _touched: usize) {}
