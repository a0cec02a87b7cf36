// Copyright 2026 the Folia Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Fontlet backs Folia's font-query capability with real OpenType data.
//!
//! [`FontFile`] wraps a parsed face and implements [`folia::FontQuery`]:
//! character-to-glyph mapping with a not-found fallback, advance and
//! vertical-extent metrics, `kern`-table pair adjustments, and glyph
//! outlines emitted as `kurbo` paths in device space.

// LINEBENDER LINT SET - lib.rs - v3
// See https://linebender.org/wiki/canonical-lints/
// These lints shouldn't apply to examples or tests.
#![cfg_attr(not(test), warn(unused_crate_dependencies))]
// These lints shouldn't apply to examples.
#![warn(clippy::print_stdout, clippy::print_stderr)]
// Targeting e.g. 32-bit means structs containing usize can give false positives for 64-bit.
#![cfg_attr(target_pointer_width = "64", warn(clippy::trivially_copy_pass_by_ref))]
// END LINEBENDER LINT SET

mod error;
mod font;

pub use crate::error::FontError;
pub use crate::font::FontFile;
