// Copyright 2026 the Folia Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Style and renderer configuration shared across leaves.

use core::fmt;
use std::sync::Arc;

use crate::font::FontQuery;

/// Font and size for a run of content.
///
/// Styles are shared, not owned: every leaf of a run holds the same
/// `Arc<TextStyle>`, and a style is never mutated after construction, so
/// sharing across the whole tree is safe.
pub struct TextStyle {
    /// The font-query capability backing this style.
    pub font: Arc<dyn FontQuery>,
    /// Font size in pixels per em.
    pub font_size: f32,
}

impl TextStyle {
    /// Creates a style from a font capability and a pixel size.
    pub fn new(font: Arc<dyn FontQuery>, font_size: f32) -> Self {
        Self { font, font_size }
    }

    /// Scale factor from font design units to rendered pixels.
    pub fn font_ratio(&self) -> f32 {
        self.font_size / f32::from(self.font.units_per_em())
    }

    /// Vertical offset from a leaf's top to the text baseline.
    pub fn baseline(&self) -> f32 {
        f32::from(self.font.ascender()) * self.font_ratio()
    }
}

impl fmt::Debug for TextStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TextStyle")
            .field("font_size", &self.font_size)
            .field("units_per_em", &self.font.units_per_em())
            .finish_non_exhaustive()
    }
}

/// Renderer-level configuration applied across a layout tree.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct RenderOptions {
    /// Whether kerning adjustments between adjacent glyphs are applied.
    pub kerning: bool,
    /// Whether glyph outlines should be hinted, for backends that can.
    pub hinting: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            kerning: true,
            hinting: false,
        }
    }
}
