// Copyright 2026 the Folia Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Utilities shared across the integration suite: a configurable mock
//! font, a recording draw target, and a stub image loader whose
//! completions are pumped manually.

use std::cell::RefCell;
use std::collections::HashMap;
use std::sync::Arc;

use folia::kurbo::BezPath;
use folia::{
    Attributes, DrawTarget, FontQuery, Glyph, GlyphId, ImageData, ImageHandle, ImageLoader,
    LoadCallback, RenderOptions, TextStyle, Token,
};

/// The glyph id the mock font assigns to a character.
pub(crate) fn gid(ch: char) -> u16 {
    ch as u16
}

/// A deterministic, programmatic font.
///
/// Advances, vertical extents, and kerning pairs are configurable per
/// test; every kerning query is recorded so at-most-once behavior is
/// observable.
pub(crate) struct TestFont {
    pub units_per_em: u16,
    pub ascender: i16,
    pub default_advance: f32,
    advances: HashMap<char, f32>,
    extents: HashMap<char, (f32, f32)>,
    kern_pairs: HashMap<(u16, u16), f32>,
    kern_queries: RefCell<Vec<(u16, u16)>>,
}

impl TestFont {
    pub fn new() -> Self {
        Self {
            units_per_em: 1000,
            ascender: 800,
            default_advance: 500.0,
            advances: HashMap::new(),
            extents: HashMap::new(),
            kern_pairs: HashMap::new(),
            kern_queries: RefCell::new(Vec::new()),
        }
    }

    pub fn with_advance(mut self, ch: char, advance: f32) -> Self {
        self.advances.insert(ch, advance);
        self
    }

    pub fn with_extent(mut self, ch: char, y_min: f32, y_max: f32) -> Self {
        self.extents.insert(ch, (y_min, y_max));
        self
    }

    pub fn with_kerning(mut self, left: char, right: char, value: f32) -> Self {
        self.kern_pairs.insert((gid(left), gid(right)), value);
        self
    }

    /// Every kerning pair queried so far, in order.
    pub fn kern_queries(&self) -> Vec<(u16, u16)> {
        self.kern_queries.borrow().clone()
    }
}

impl FontQuery for TestFont {
    fn units_per_em(&self) -> u16 {
        self.units_per_em
    }

    fn ascender(&self) -> i16 {
        self.ascender
    }

    fn glyph(&self, ch: char) -> Glyph {
        let advance = self
            .advances
            .get(&ch)
            .copied()
            .unwrap_or(self.default_advance);
        let (y_min, y_max) = self.extents.get(&ch).copied().unwrap_or_else(|| {
            if ch.is_whitespace() {
                (0.0, 0.0)
            } else {
                (0.0, 700.0)
            }
        });
        Glyph {
            id: GlyphId(gid(ch)),
            advance,
            y_min,
            y_max,
        }
    }

    fn kerning(&self, left: GlyphId, right: GlyphId) -> f32 {
        self.kern_queries.borrow_mut().push((left.0, right.0));
        self.kern_pairs
            .get(&(left.0, right.0))
            .copied()
            .unwrap_or(0.0)
    }

    fn outline(
        &self,
        id: GlyphId,
        x: f32,
        y: f32,
        font_size: f32,
        _options: &RenderOptions,
    ) -> BezPath {
        // A wedge tagged by glyph id; enough to observe identity,
        // ordering, and placement.
        let (x, y) = (f64::from(x), f64::from(y));
        let size = f64::from(font_size);
        let tag = f64::from(id.0);
        let mut path = BezPath::new();
        path.move_to((x, y));
        path.line_to((x + size, y - tag));
        path.close_path();
        path
    }
}

/// Wraps a [`TestFont`] into a shared style.
pub(crate) fn style_over(font: TestFont, font_size: f32) -> Arc<TextStyle> {
    Arc::new(TextStyle::new(Arc::new(font), font_size))
}

/// Like [`style_over`], but also hands back the concrete mock so tests
/// can inspect the queries it served.
pub(crate) fn style_and_font(font: TestFont, font_size: f32) -> (Arc<TextStyle>, Arc<TestFont>) {
    let font = Arc::new(font);
    let style = Arc::new(TextStyle::new(font.clone(), font_size));
    (style, font)
}

/// A plain text token over the given style.
pub(crate) fn text_token(style: &Arc<TextStyle>) -> Token {
    Token::new("span", style.clone())
}

/// An image token with declared source and dimensions.
pub(crate) fn image_token(style: &Arc<TextStyle>, src: &str, width: u32, height: u32) -> Token {
    let mut attributes = Attributes::new();
    attributes.set("src", src);
    attributes.set("width", width.to_string());
    attributes.set("height", height.to_string());
    Token::with_attributes("img", style.clone(), attributes)
}

/// A loaded raster resource with the given intrinsic size.
pub(crate) fn test_image(width: u32, height: u32) -> ImageHandle {
    Arc::new(ImageData {
        width,
        height,
        pixels: vec![0; (width * height * 4) as usize],
    })
}

/// One recorded drawing command.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Command {
    MoveTo(f64, f64),
    LineTo(f64, f64),
    QuadTo(f64, f64, f64, f64),
    CurveTo(f64, f64, f64, f64, f64, f64),
    Close,
    Image {
        x: i32,
        y: i32,
        width: u32,
        height: u32,
        intrinsic: (u32, u32),
    },
}

/// A surface that records every command it receives.
#[derive(Debug, Default)]
pub(crate) struct RecordingTarget {
    pub commands: Vec<Command>,
}

impl DrawTarget for RecordingTarget {
    fn move_to(&mut self, x: f64, y: f64) {
        self.commands.push(Command::MoveTo(x, y));
    }

    fn line_to(&mut self, x: f64, y: f64) {
        self.commands.push(Command::LineTo(x, y));
    }

    fn quad_to(&mut self, cx: f64, cy: f64, x: f64, y: f64) {
        self.commands.push(Command::QuadTo(cx, cy, x, y));
    }

    fn curve_to(&mut self, cx0: f64, cy0: f64, cx1: f64, cy1: f64, x: f64, y: f64) {
        self.commands.push(Command::CurveTo(cx0, cy0, cx1, cy1, x, y));
    }

    fn close(&mut self) {
        self.commands.push(Command::Close);
    }

    fn draw_image(&mut self, image: &ImageData, x: i32, y: i32, width: u32, height: u32) {
        self.commands.push(Command::Image {
            x,
            y,
            width,
            height,
            intrinsic: (image.width, image.height),
        });
    }
}

/// An image loader modeling the event loop: requests queue up and are
/// completed (or dropped) by the test.
#[derive(Default)]
pub(crate) struct StubLoader {
    requests: RefCell<Vec<String>>,
    pending: RefCell<Vec<(String, LoadCallback)>>,
}

impl StubLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// How many load requests have been issued so far.
    pub fn request_count(&self) -> usize {
        self.requests.borrow().len()
    }

    /// Sources requested so far, in order.
    pub fn requests(&self) -> Vec<String> {
        self.requests.borrow().clone()
    }

    /// Completes every pending request for `src` with `image`.
    pub fn complete(&self, src: &str, image: &ImageHandle) {
        let mut done = Vec::new();
        {
            let mut pending = self.pending.borrow_mut();
            let mut remaining = Vec::new();
            for (requested, callback) in pending.drain(..) {
                if requested == src {
                    done.push(callback);
                } else {
                    remaining.push((requested, callback));
                }
            }
            *pending = remaining;
        }
        // Callbacks run outside the borrow: a completion may draw, and a
        // draw may issue another load.
        for callback in done {
            callback(image.clone());
        }
    }

    /// Drops every pending request, modeling failed loads.
    pub fn fail_all(&self) {
        self.pending.borrow_mut().clear();
    }
}

impl ImageLoader for StubLoader {
    fn load(&self, src: &str, on_load: LoadCallback) {
        self.requests.borrow_mut().push(src.to_owned());
        self.pending.borrow_mut().push((src.to_owned(), on_load));
    }
}
