// Copyright 2026 the Folia Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Folia turns a stream of text and markup tokens into a positioned tree
//! of renderable leaves — words, individual glyphs, whitespace, inline
//! images — and derives vector outlines suitable for drawing.
//!
//! The core entity is the layout leaf. A token's text is classified into
//! a semantic [`LeafKind`]; multi-character runs decompose into one glyph
//! leaf per character; positions cascade from parent to child and are
//! resolved at read time; kerning tightens the advance of adjacent glyph
//! pairs; and a leaf's vector path aggregates lazily from its children.
//!
//! Line breaking, font-file parsing, and rasterization are collaborators
//! behind seams: the layout driver assigns local offsets, a [`FontQuery`]
//! supplies glyph metrics and outlines, an [`ImageLoader`] fetches raster
//! resources, and a [`DrawTarget`] consumes path commands and blits.

// LINEBENDER LINT SET - lib.rs - v3
// See https://linebender.org/wiki/canonical-lints/
// These lints shouldn't apply to examples or tests.
#![cfg_attr(not(test), warn(unused_crate_dependencies))]
// These lints shouldn't apply to examples.
#![warn(clippy::print_stdout, clippy::print_stderr)]
// Targeting e.g. 32-bit means structs containing usize can give false positives for 64-bit.
#![cfg_attr(target_pointer_width = "64", warn(clippy::trivially_copy_pass_by_ref))]
// END LINEBENDER LINT SET

mod draw;
mod error;
mod font;
mod image;
mod style;
mod token;
mod tree;


pub use peniko::kurbo;

pub use crate::draw::DrawTarget;
pub use crate::error::Error;
pub use crate::font::{FontQuery, Glyph, GlyphId};
pub use crate::image::{ImageData, ImageHandle, ImageLoader, LoadCallback};
pub use crate::style::{RenderOptions, TextStyle};
pub use crate::token::{Attributes, Token, IMAGE_TOKEN};
pub use crate::tree::{LayoutTree, Leaf, LeafId, LeafKind};
