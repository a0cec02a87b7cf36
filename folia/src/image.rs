// Copyright 2026 the Folia Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Raster image resources and their asynchronous loading.

use std::sync::Arc;

/// A decoded raster image.
///
/// Pixel data is tightly packed RGBA8, row-major.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ImageData {
    /// Intrinsic width in pixels.
    pub width: u32,
    /// Intrinsic height in pixels.
    pub height: u32,
    /// The pixel bytes, `width * height * 4` of them.
    pub pixels: Vec<u8>,
}

/// Shared handle to a loaded raster resource.
pub type ImageHandle = Arc<ImageData>;

/// Completion callback for an image load.
pub type LoadCallback = Box<dyn FnOnce(ImageHandle)>;

/// Callback-driven asynchronous resource loading.
///
/// A load request returns immediately; the loader invokes the callback
/// once the resource is decoded, either synchronously or on a later turn
/// of the event loop. There is deliberately no failure callback: a
/// resource that never loads is silently never drawn, and callers that
/// need failure visibility must observe it at the loader.
pub trait ImageLoader {
    /// Begins loading `src`, invoking `on_load` when the bytes are ready.
    fn load(&self, src: &str, on_load: LoadCallback);
}
