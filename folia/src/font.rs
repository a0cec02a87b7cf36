// Copyright 2026 the Folia Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The font-query capability consumed by the layout tree.

use peniko::kurbo::BezPath;

use crate::style::RenderOptions;

/// A font-internal glyph index.
///
/// This is specific to the font being used and is *not* a Unicode code
/// point.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct GlyphId(pub u16);

/// Resolved metrics for a single glyph, in font design units.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Glyph {
    /// The font-specific identifier for this glyph.
    pub id: GlyphId,
    /// Horizontal advance width.
    ///
    /// Revised in place, at most once, when a kerning adjustment against
    /// the following glyph is applied.
    pub advance: f32,
    /// Lowest extent of the outline, or 0 when the glyph has none
    /// (whitespace, typically).
    pub y_min: f32,
    /// Highest extent of the outline, or 0 when the glyph has none.
    pub y_max: f32,
}

impl Glyph {
    /// The vertical extent of the outline in font units.
    pub fn extent(&self) -> f32 {
        self.y_max - self.y_min
    }
}

/// Capability trait supplying glyph data for a single font face.
///
/// Implementations own the font-file parsing; the layout tree only ever
/// talks to this interface. The `fontlet` crate provides a backend over
/// OpenType data.
pub trait FontQuery {
    /// Design units per em square.
    fn units_per_em(&self) -> u16;

    /// Typographic ascender, in font units.
    fn ascender(&self) -> i16;

    /// Resolves a character to a glyph with metrics.
    ///
    /// This is infallible: a character the font does not map resolves to
    /// the font's not-found glyph, whose metrics are then authoritative.
    fn glyph(&self, ch: char) -> Glyph;

    /// The kerning adjustment between two adjacent glyphs, in font units.
    ///
    /// Returns 0 when the font defines no adjustment for the pair.
    fn kerning(&self, left: GlyphId, right: GlyphId) -> f32;

    /// The outline of a glyph positioned at `(x, y)` in device space.
    ///
    /// `y` is the baseline; callers pass coordinates already rounded to
    /// whole device pixels. The outline is scaled to `font_size` pixels
    /// per em and flipped from y-up font space to y-down device space.
    fn outline(
        &self,
        id: GlyphId,
        x: f32,
        y: f32,
        font_size: f32,
        options: &RenderOptions,
    ) -> BezPath;
}
