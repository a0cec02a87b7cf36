// Copyright 2026 the Folia Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The drawing-surface capability and path replay.

use peniko::kurbo::PathEl;

use crate::image::ImageData;

/// Capability trait for a 2D drawing surface.
///
/// Vector content arrives as an ordered replay of path commands; raster
/// content arrives as whole-image blits at integer device positions.
pub trait DrawTarget {
    /// Starts a new subpath at the given point.
    fn move_to(&mut self, x: f64, y: f64);

    /// Appends a straight line segment.
    fn line_to(&mut self, x: f64, y: f64);

    /// Appends a quadratic Bezier with control point `(cx, cy)`.
    fn quad_to(&mut self, cx: f64, cy: f64, x: f64, y: f64);

    /// Appends a cubic Bezier with control points `(cx0, cy0)` and
    /// `(cx1, cy1)`.
    fn curve_to(&mut self, cx0: f64, cy0: f64, cx1: f64, cy1: f64, x: f64, y: f64);

    /// Closes the current subpath.
    fn close(&mut self);

    /// Blits `image` scaled to `width` by `height` pixels at `(x, y)`.
    ///
    /// The declared size is authoritative; it may disagree with the
    /// image's intrinsic dimensions.
    fn draw_image(&mut self, image: &ImageData, x: i32, y: i32, width: u32, height: u32);
}

/// Replays path elements into a target verbatim, one command per element.
pub(crate) fn replay_into<T: DrawTarget + ?Sized>(elements: &[PathEl], target: &mut T) {
    for el in elements {
        match *el {
            PathEl::MoveTo(p) => target.move_to(p.x, p.y),
            PathEl::LineTo(p) => target.line_to(p.x, p.y),
            PathEl::QuadTo(c, p) => target.quad_to(c.x, c.y, p.x, p.y),
            PathEl::CurveTo(c0, c1, p) => target.curve_to(c0.x, c0.y, c1.x, c1.y, p.x, p.y),
            PathEl::ClosePath => target.close(),
        }
    }
}
