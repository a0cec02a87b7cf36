// Copyright 2026 the Folia Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! OpenType font files as a [`FontQuery`] capability.

use std::sync::Arc;

use folia::{FontQuery, Glyph, GlyphId, RenderOptions};
use peniko::kurbo::BezPath;
use ttf_parser::{Face, OutlineBuilder};

use crate::error::FontError;

/// A parsed OpenType font face.
///
/// The raw file bytes are shared and immutable. Parsing is validated
/// once at construction; per-query faces are re-derived from the same
/// bytes, so queries degrade to empty results rather than failing.
pub struct FontFile {
    data: Arc<Vec<u8>>,
    index: u32,
    units_per_em: u16,
    ascender: i16,
}

impl FontFile {
    /// Parses a face from raw font-file bytes.
    ///
    /// `index` selects a face within a collection; pass 0 for a plain
    /// font file.
    pub fn from_bytes(data: Vec<u8>, index: u32) -> Result<Self, FontError> {
        let (units_per_em, ascender) = {
            let face = Face::parse(&data, index)?;
            (face.units_per_em(), face.ascender())
        };
        Ok(Self {
            data: Arc::new(data),
            index,
            units_per_em,
            ascender,
        })
    }

    fn face(&self) -> Option<Face<'_>> {
        // The bytes were validated at construction and never change.
        Face::parse(&self.data, self.index).ok()
    }
}

impl core::fmt::Debug for FontFile {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("FontFile")
            .field("index", &self.index)
            .field("units_per_em", &self.units_per_em)
            .field("len", &self.data.len())
            .finish_non_exhaustive()
    }
}

impl FontQuery for FontFile {
    fn units_per_em(&self) -> u16 {
        self.units_per_em
    }

    fn ascender(&self) -> i16 {
        self.ascender
    }

    fn glyph(&self, ch: char) -> Glyph {
        let Some(face) = self.face() else {
            return Glyph::default();
        };
        let id = face.glyph_index(ch).unwrap_or_else(|| {
            log::debug!("no glyph for {ch:?}, falling back to the not-found glyph");
            ttf_parser::GlyphId(0)
        });
        let advance = face.glyph_hor_advance(id).map_or(0.0, f32::from);
        let (y_min, y_max) = face
            .glyph_bounding_box(id)
            .map_or((0.0, 0.0), |bbox| (f32::from(bbox.y_min), f32::from(bbox.y_max)));
        Glyph {
            id: GlyphId(id.0),
            advance,
            y_min,
            y_max,
        }
    }

    fn kerning(&self, left: GlyphId, right: GlyphId) -> f32 {
        let Some(face) = self.face() else {
            return 0.0;
        };
        let Some(kern) = face.tables().kern else {
            return 0.0;
        };
        let left = ttf_parser::GlyphId(left.0);
        let right = ttf_parser::GlyphId(right.0);
        for subtable in kern.subtables {
            if !subtable.horizontal || subtable.variable {
                continue;
            }
            if let Some(value) = subtable.glyphs_kerning(left, right) {
                return f32::from(value);
            }
        }
        0.0
    }

    fn outline(
        &self,
        id: GlyphId,
        x: f32,
        y: f32,
        font_size: f32,
        _options: &RenderOptions,
    ) -> BezPath {
        let Some(face) = self.face() else {
            return BezPath::new();
        };
        let scale = font_size / f32::from(self.units_per_em);
        let mut pen = OutlinePath::new(x, y, scale);
        face.outline_glyph(ttf_parser::GlyphId(id.0), &mut pen);
        pen.path
    }
}

/// Builds a `BezPath` from `ttf-parser` outline callbacks, translating
/// font design units to device space.
struct OutlinePath {
    path: BezPath,
    x: f32,
    y: f32,
    scale: f32,
}

impl OutlinePath {
    fn new(x: f32, y: f32, scale: f32) -> Self {
        Self {
            path: BezPath::new(),
            x,
            y,
            scale,
        }
    }

    // Font space is y-up with the origin on the baseline; device space
    // is y-down with `y` at the baseline.
    fn dx(&self, u: f32) -> f32 {
        self.x + u * self.scale
    }

    fn dy(&self, v: f32) -> f32 {
        self.y - v * self.scale
    }
}

impl OutlineBuilder for OutlinePath {
    fn move_to(&mut self, x: f32, y: f32) {
        self.path.move_to((self.dx(x), self.dy(y)));
    }

    fn line_to(&mut self, x: f32, y: f32) {
        self.path.line_to((self.dx(x), self.dy(y)));
    }

    fn quad_to(&mut self, x1: f32, y1: f32, x: f32, y: f32) {
        self.path
            .quad_to((self.dx(x1), self.dy(y1)), (self.dx(x), self.dy(y)));
    }

    fn curve_to(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, x: f32, y: f32) {
        self.path.curve_to(
            (self.dx(x1), self.dy(y1)),
            (self.dx(x2), self.dy(y2)),
            (self.dx(x), self.dy(y)),
        );
    }

    fn close(&mut self) {
        self.path.close_path();
    }
}
