// Copyright 2026 the Folia Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The layout tree: classification, decomposition, linkage, kerning,
//! cascading coordinates, and path aggregation.

use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;

use peniko::kurbo::BezPath;

use crate::draw::{replay_into, DrawTarget};
use crate::error::Error;
use crate::font::Glyph;
use crate::image::{ImageHandle, ImageLoader};
use crate::style::{RenderOptions, TextStyle};
use crate::token::Token;

/// The kind of content a leaf represents.
///
/// Assigned once at construction and immutable thereafter.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum LeafKind {
    /// A multi-character run, decomposed into one child per character.
    Word,
    /// A single space character.
    Space,
    /// A single tab character.
    Tabulation,
    /// A carriage return or line feed.
    Newline,
    /// Any other single character.
    Glyph,
    /// Embedded raster content with author-declared dimensions.
    Image,
}

/// Identifier of a leaf within its [`LayoutTree`].
///
/// Ids are only meaningful for the tree that produced them.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct LeafId(u32);

impl LeafId {
    fn index(self) -> usize {
        self.0 as usize
    }
}

/// Declared raster content of an image leaf.
#[derive(Debug)]
struct ImageContent {
    src: String,
    width: u32,
    height: u32,
    /// Populated by the first completed load; shared with in-flight
    /// completion callbacks.
    handle: Rc<RefCell<Option<ImageHandle>>>,
}

#[derive(Debug)]
struct LeafData {
    text: String,
    kind: LeafKind,
    style: Arc<TextStyle>,
    font_ratio: f32,
    baseline: f32,
    glyph: Option<Glyph>,
    kern_applied: bool,
    width: f32,
    height: f32,
    x: f32,
    y: f32,
    parent: Option<LeafId>,
    previous: Option<LeafId>,
    next: Option<LeafId>,
    children: Vec<LeafId>,
    path: Option<BezPath>,
    image: Option<ImageContent>,
}

impl LeafData {
    fn new(text: String, kind: LeafKind, style: Arc<TextStyle>) -> Self {
        let font_ratio = style.font_ratio();
        let baseline = style.baseline();
        Self {
            text,
            kind,
            style,
            font_ratio,
            baseline,
            glyph: None,
            kern_applied: false,
            width: 0.0,
            height: 0.0,
            x: 0.0,
            y: 0.0,
            parent: None,
            previous: None,
            next: None,
            children: Vec::new(),
            path: None,
            image: None,
        }
    }
}

/// A tree of layout leaves.
///
/// The tree is an arena: it owns every leaf and a leaf never outlives
/// it. Leaves are appended in left-to-right document order; the driver
/// then assigns local offsets during line layout and finally requests
/// paths or draws. Two relations coexist on the same nodes: the
/// ownership tree (parent and children) and the temporal
/// previous/next chain, which threads through a decomposed word's
/// glyphs rather than stopping at the word.
#[derive(Debug)]
pub struct LayoutTree {
    options: RenderOptions,
    leaves: Vec<LeafData>,
}

impl LayoutTree {
    /// Creates an empty tree with the given renderer configuration.
    pub fn new(options: RenderOptions) -> Self {
        Self {
            options,
            leaves: Vec::new(),
        }
    }

    /// The renderer configuration this tree was built with.
    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    /// Number of leaves in the tree, across all depths.
    pub fn len(&self) -> usize {
        self.leaves.len()
    }

    /// Returns `true` if the tree holds no leaves.
    pub fn is_empty(&self) -> bool {
        self.leaves.is_empty()
    }

    /// Returns a read handle for a leaf.
    pub fn get(&self, id: LeafId) -> Option<Leaf<'_>> {
        Some(Leaf {
            tree: self,
            id,
            data: self.leaves.get(id.index())?,
        })
    }

    /// Appends a leaf for `text`, classifying it and, for words,
    /// decomposing it into one child per character.
    ///
    /// `previous` is the leaf preceding this one in document order; pass
    /// `None` at the start of content. A leaf with no provided previous
    /// inherits its parent's previous. `parent` is the owning leaf, if
    /// any; the new leaf is placed at the parent's current running width
    /// and accumulated into its box.
    ///
    /// Leaves must be appended in document order for kerning to see its
    /// correct predecessor. Errors surface only from image tokens with
    /// missing or malformed attributes and abort the layout pass.
    pub fn append(
        &mut self,
        token: &Token,
        text: &str,
        parent: Option<LeafId>,
        previous: Option<LeafId>,
    ) -> Result<LeafId, Error> {
        let previous =
            previous.or_else(|| parent.and_then(|p| self.leaves[p.index()].previous));

        let mut chars = text.chars();
        let first = chars.next();
        let id = if first.is_some() && chars.next().is_some() {
            self.append_word(token, text, previous)?
        } else if token.is_image() {
            self.append_image(token, text, previous)?
        } else if let Some(ch) = first {
            self.append_char(token, ch, previous)
        } else {
            // Empty text: an inert word with no children.
            self.append_word(token, text, previous)?
        };

        if let Some(parent) = parent {
            self.adopt(parent, id);
        }
        Ok(id)
    }

    /// The last leaf, in document order, of the subtree rooted at `id`.
    ///
    /// Drivers use this to continue the `previous` chain across tokens,
    /// so that kerning context survives a word boundary.
    pub fn tail(&self, id: LeafId) -> LeafId {
        let mut current = id;
        while let Some(&last) = self.leaves[current.index()].children.last() {
            current = last;
        }
        current
    }

    /// Assigns a leaf's local offset, relative to its parent's origin.
    ///
    /// Offsets are assigned by the driver during line layout. Moving a
    /// word transparently relocates all of its descendants, because
    /// absolute positions resolve through the parent chain on every read.
    pub fn set_offset(&mut self, id: LeafId, x: f32, y: f32) {
        let data = &mut self.leaves[id.index()];
        data.x = x;
        data.y = y;
    }

    /// The absolute position of a leaf: its local offset plus its
    /// parent's absolute position, recursively to the root.
    ///
    /// Resolved on every read rather than cached, at O(depth) cost, so a
    /// parent's offset may be reassigned after children exist. No
    /// rounding happens here; device-pixel rounding is applied only at
    /// consumption points.
    pub fn absolute_position(&self, id: LeafId) -> (f32, f32) {
        let data = &self.leaves[id.index()];
        match data.parent {
            Some(parent) => {
                let (px, py) = self.absolute_position(parent);
                (data.x + px, data.y + py)
            }
            None => (data.x, data.y),
        }
    }

    /// The vector outline of a leaf, computed on first access and
    /// retained.
    ///
    /// Composite leaves concatenate their children's paths in child
    /// order. Single-glyph leaves (whitespace included) request their
    /// outline from the font at the rounded absolute position. Image
    /// leaves have no vector form and yield an empty path; they render
    /// through [`Self::draw_image`] instead.
    pub fn path(&mut self, id: LeafId) -> &BezPath {
        self.ensure_path(id);
        self.leaves[id.index()].path.get_or_insert_with(BezPath::new)
    }

    /// Replays a leaf's aggregated outline into a draw target, one
    /// command per path element, in order.
    pub fn replay<T: DrawTarget + ?Sized>(&mut self, id: LeafId, target: &mut T) {
        self.ensure_path(id);
        if let Some(path) = &self.leaves[id.index()].path {
            replay_into(path.elements(), target);
        }
    }

    /// Draws a leaf and its descendants.
    ///
    /// A word is never drawn as a unit: the walk recurses into its
    /// children, so each glyph replays its own outline and each image
    /// goes through the raster path. The surface is shared because image
    /// draws may be deferred to a load-completion callback.
    pub fn draw<S>(&mut self, id: LeafId, surface: &Rc<RefCell<S>>, loader: &dyn ImageLoader)
    where
        S: DrawTarget + 'static,
    {
        match self.leaves[id.index()].kind {
            LeafKind::Word => {
                let children = self.leaves[id.index()].children.clone();
                for child in children {
                    self.draw(child, surface, loader);
                }
            }
            LeafKind::Image => self.draw_image(id, surface, loader),
            _ => {
                self.ensure_path(id);
                if let Some(path) = &self.leaves[id.index()].path {
                    replay_into(path.elements(), &mut *surface.borrow_mut());
                }
            }
        }
    }

    /// Draws an image leaf at its rounded absolute position, with its
    /// declared (not intrinsic) size.
    ///
    /// The first draw begins an asynchronous load and issues the actual
    /// blit inside the completion callback; later draws reuse the cached
    /// handle synchronously. A load that fails never invokes the
    /// callback, so the leaf silently never draws. A draw requested
    /// while a load is still in flight issues another request.
    pub fn draw_image<S>(&self, id: LeafId, surface: &Rc<RefCell<S>>, loader: &dyn ImageLoader)
    where
        S: DrawTarget + 'static,
    {
        let (ax, ay) = self.absolute_position(id);
        let data = &self.leaves[id.index()];
        let Some(image) = &data.image else {
            return;
        };
        let x = ax.round() as i32;
        let y = (ay - data.baseline).round() as i32;
        let (width, height) = (image.width, image.height);

        if let Some(handle) = image.handle.borrow().as_ref() {
            surface.borrow_mut().draw_image(handle, x, y, width, height);
            return;
        }

        let slot = Rc::clone(&image.handle);
        let surface = Rc::clone(surface);
        loader.load(
            &image.src,
            Box::new(move |handle| {
                surface.borrow_mut().draw_image(&handle, x, y, width, height);
                *slot.borrow_mut() = Some(handle);
            }),
        );
    }

    fn append_word(
        &mut self,
        token: &Token,
        text: &str,
        previous: Option<LeafId>,
    ) -> Result<LeafId, Error> {
        let id = self.push_leaf(LeafData::new(
            text.to_owned(),
            LeafKind::Word,
            token.style.clone(),
        ));
        if let Some(prev) = previous {
            self.link(prev, id);
        }

        // One child per character, linked through the word's own
        // predecessor so kerning context survives the boundary. The
        // word's width doubles as the running offset accumulator, so a
        // kerning adjustment applied mid-decomposition is reflected in
        // later placements.
        let mut prev = previous;
        let mut buf = [0_u8; 4];
        for ch in text.chars() {
            let child = self.append(token, ch.encode_utf8(&mut buf), Some(id), prev)?;
            prev = Some(child);
        }
        Ok(id)
    }

    fn append_image(
        &mut self,
        token: &Token,
        text: &str,
        previous: Option<LeafId>,
    ) -> Result<LeafId, Error> {
        let width = required_u32(token, "width")?;
        let height = required_u32(token, "height")?;
        let src = token
            .attributes
            .raw("src")
            .ok_or_else(|| Error::missing_attribute(&token.name, "src"))?
            .to_owned();

        let mut data = LeafData::new(text.to_owned(), LeafKind::Image, token.style.clone());
        // Declared dimensions are authoritative; the loaded resource is
        // scaled to them, mismatch included.
        data.width = width as f32;
        data.height = height as f32;
        data.image = Some(ImageContent {
            src,
            width,
            height,
            handle: Rc::new(RefCell::new(None)),
        });

        let id = self.push_leaf(data);
        if let Some(prev) = previous {
            self.link(prev, id);
        }
        Ok(id)
    }

    fn append_char(&mut self, token: &Token, ch: char, previous: Option<LeafId>) -> LeafId {
        let kind = match ch {
            ' ' => LeafKind::Space,
            '\t' => LeafKind::Tabulation,
            '\r' | '\n' => LeafKind::Newline,
            _ => LeafKind::Glyph,
        };

        let mut data = LeafData::new(ch.to_string(), kind, token.style.clone());
        // Whitespace resolves a real glyph too: spaces and tabs occupy
        // genuine, font-derived advance width.
        let glyph = data.style.font.glyph(ch);
        data.width = glyph.advance * data.font_ratio;
        data.height = glyph.extent() * data.font_ratio;
        data.glyph = Some(glyph);

        let id = self.push_leaf(data);
        if let Some(prev) = previous {
            self.link(prev, id);
            if self.options.kerning {
                self.apply_kerning(prev, id);
            }
        }
        id
    }

    /// Applies the one-time kerning adjustment between `prev` and `next`.
    ///
    /// The adjustment revises the predecessor's already-computed advance
    /// and box width; the same delta is propagated to each ancestor word
    /// so a word's width remains the exact sum of its children.
    fn apply_kerning(&mut self, prev: LeafId, next: LeafId) {
        let prev_data = &self.leaves[prev.index()];
        // Only a glyph-kind predecessor kerns: whitespace and words carry
        // no kernable glyph.
        if prev_data.kind != LeafKind::Glyph || prev_data.kern_applied {
            return;
        }
        let Some(prev_glyph) = prev_data.glyph else {
            return;
        };
        let Some(next_glyph) = self.leaves[next.index()].glyph else {
            return;
        };

        let kern = self.leaves[prev.index()]
            .style
            .font
            .kerning(prev_glyph.id, next_glyph.id);

        let prev_data = &mut self.leaves[prev.index()];
        prev_data.kern_applied = true;
        if kern == 0.0 {
            return;
        }
        if let Some(glyph) = &mut prev_data.glyph {
            glyph.advance += kern;
        }
        let delta = kern * prev_data.font_ratio;
        prev_data.width += delta;

        let mut ancestor = prev_data.parent;
        while let Some(a) = ancestor {
            let data = &mut self.leaves[a.index()];
            data.width += delta;
            ancestor = data.parent;
        }
    }

    /// Registers `child` under `parent`: sets the back-reference, places
    /// the child at the parent's current running width, and accumulates
    /// the parent's box.
    fn adopt(&mut self, parent: LeafId, child: LeafId) {
        let (width, height) = {
            let data = &self.leaves[child.index()];
            (data.width, data.height)
        };
        let offset = self.leaves[parent.index()].width;
        {
            let data = &mut self.leaves[child.index()];
            data.parent = Some(parent);
            data.x = offset;
        }
        let data = &mut self.leaves[parent.index()];
        data.children.push(child);
        data.width += width;
        data.height = data.height.max(height);
    }

    /// Links two leaves in temporal order, setting both ends.
    ///
    /// Later links win: when a word decomposes, its first child takes
    /// over the predecessor's `next` pointer, so the chain threads
    /// through glyphs rather than stopping at the word.
    fn link(&mut self, prev: LeafId, next: LeafId) {
        self.leaves[prev.index()].next = Some(next);
        self.leaves[next.index()].previous = Some(prev);
    }

    fn ensure_path(&mut self, id: LeafId) {
        if self.leaves[id.index()].path.is_some() {
            return;
        }

        let path = if self.leaves[id.index()].children.is_empty() {
            let (ax, ay) = self.absolute_position(id);
            let data = &self.leaves[id.index()];
            match data.glyph {
                Some(glyph) => {
                    let style = data.style.clone();
                    style.font.outline(
                        glyph.id,
                        ax.round(),
                        ay.round(),
                        style.font_size,
                        &self.options,
                    )
                }
                // Images and empty words have no vector form.
                None => BezPath::new(),
            }
        } else {
            let children = self.leaves[id.index()].children.clone();
            let mut aggregate = BezPath::new();
            for &child in &children {
                self.ensure_path(child);
                if let Some(path) = &self.leaves[child.index()].path {
                    for el in path.elements() {
                        aggregate.push(*el);
                    }
                }
            }
            aggregate
        };

        self.leaves[id.index()].path = Some(path);
    }

    fn push_leaf(&mut self, data: LeafData) -> LeafId {
        let id = LeafId(self.leaves.len() as u32);
        self.leaves.push(data);
        id
    }
}

/// A read handle for one leaf of a [`LayoutTree`].
#[derive(Copy, Clone, Debug)]
pub struct Leaf<'a> {
    tree: &'a LayoutTree,
    id: LeafId,
    data: &'a LeafData,
}

impl<'a> Leaf<'a> {
    /// This leaf's identifier.
    pub fn id(&self) -> LeafId {
        self.id
    }

    /// The kind assigned at construction.
    pub fn kind(&self) -> LeafKind {
        self.data.kind
    }

    /// The literal content this leaf represents.
    pub fn text(&self) -> &'a str {
        &self.data.text
    }

    /// The shared style this leaf was built with.
    pub fn style(&self) -> &'a TextStyle {
        self.data.style.as_ref()
    }

    /// Scale factor from font design units to rendered pixels.
    pub fn font_ratio(&self) -> f32 {
        self.data.font_ratio
    }

    /// Vertical offset from this leaf's top to the text baseline.
    pub fn baseline(&self) -> f32 {
        self.data.baseline
    }

    /// The resolved glyph, for single-character non-image leaves.
    pub fn glyph(&self) -> Option<&'a Glyph> {
        self.data.glyph.as_ref()
    }

    /// Whether the one-time kerning adjustment has been applied to this
    /// leaf's advance.
    pub fn kern_applied(&self) -> bool {
        self.data.kern_applied
    }

    /// Local box width. For words this is the exact sum of the
    /// children's widths.
    pub fn width(&self) -> f32 {
        self.data.width
    }

    /// Local box height. For words this is the maximum of the
    /// children's heights.
    pub fn height(&self) -> f32 {
        self.data.height
    }

    /// Local offset relative to the parent's origin.
    pub fn offset(&self) -> (f32, f32) {
        (self.data.x, self.data.y)
    }

    /// Absolute position, resolved through the parent chain.
    pub fn absolute_position(&self) -> (f32, f32) {
        self.tree.absolute_position(self.id)
    }

    /// The owning parent, if any.
    pub fn parent(&self) -> Option<Leaf<'a>> {
        self.data.parent.and_then(|id| self.tree.get(id))
    }

    /// The leaf preceding this one in document order.
    pub fn previous(&self) -> Option<Leaf<'a>> {
        self.data.previous.and_then(|id| self.tree.get(id))
    }

    /// The leaf following this one in document order.
    pub fn next(&self) -> Option<Leaf<'a>> {
        self.data.next.and_then(|id| self.tree.get(id))
    }

    /// Owned children, in decomposition order.
    pub fn children(&self) -> impl Iterator<Item = Leaf<'a>> + '_ {
        let tree = self.tree;
        self.data.children.iter().filter_map(move |&id| tree.get(id))
    }

    /// Number of owned children.
    pub fn child_count(&self) -> usize {
        self.data.children.len()
    }

    /// The declared source of an image leaf.
    pub fn image_src(&self) -> Option<&'a str> {
        self.data.image.as_ref().map(|image| image.src.as_str())
    }

    /// Whether an image leaf's raster resource has finished loading.
    pub fn image_loaded(&self) -> bool {
        self.data
            .image
            .as_ref()
            .is_some_and(|image| image.handle.borrow().is_some())
    }
}

fn required_u32(token: &Token, attribute: &'static str) -> Result<u32, Error> {
    let raw = token
        .attributes
        .raw(attribute)
        .ok_or_else(|| Error::missing_attribute(&token.name, attribute))?;
    raw.parse()
        .map_err(|_| Error::invalid_attribute(&token.name, attribute, raw))
}
