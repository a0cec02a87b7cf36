// Copyright 2026 the Folia Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! This crate contains the integration test suite for `folia`.
//!
//! - The `util` module holds the shared mock font, recording draw
//!   target, and manually-pumped stub image loader that the topic
//!   modules build on.
//! - We do not use the default Rust test harness, but instead use this
//!   `mod.rs` file as the entry point to run all other tests; that makes
//!   it easy to share utilities between tests.
//! - If you want to add new tests, put them into the module matching
//!   their topic (classification, kerning, positioning, paths, images),
//!   or create a new module if none fits.

#![allow(missing_docs, reason = "we don't need docs for testing")]

mod util;
