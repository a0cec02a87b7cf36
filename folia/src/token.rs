// Copyright 2026 the Folia Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tokens: the external description of the content runs being laid out.

use std::sync::Arc;

use hashbrown::HashMap;

use crate::style::TextStyle;

/// Element name that marks embedded image content.
pub const IMAGE_TOKEN: &str = "img";

/// Keyed attributes attached to a token.
///
/// Values are stored raw; typed access happens at the use site so that a
/// failure can carry token context.
#[derive(Clone, Debug, Default)]
pub struct Attributes {
    map: HashMap<String, String>,
}

impl Attributes {
    /// Creates an empty attribute set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets an attribute, replacing any existing value.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.map.insert(name.into(), value.into());
    }

    /// The raw value of an attribute, if present.
    pub fn raw(&self, name: &str) -> Option<&str> {
        self.map.get(name).map(String::as_str)
    }

    /// The value of an attribute parsed as an unsigned integer, if
    /// present and well-formed.
    ///
    /// Layout construction distinguishes missing from malformed values
    /// itself; this accessor is for drivers that don't need to.
    pub fn u32(&self, name: &str) -> Option<u32> {
        self.raw(name).and_then(|raw| raw.parse().ok())
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Attributes {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            map: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// A text or content run as supplied by the layout driver.
#[derive(Clone, Debug)]
pub struct Token {
    /// The element kind this run came from.
    pub name: String,
    /// Shared font and size for the run.
    pub style: Arc<TextStyle>,
    /// Keyed attributes; image sizing and source live here.
    pub attributes: Attributes,
}

impl Token {
    /// Creates a token with no attributes.
    pub fn new(name: impl Into<String>, style: Arc<TextStyle>) -> Self {
        Self {
            name: name.into(),
            style,
            attributes: Attributes::new(),
        }
    }

    /// Creates a token carrying attributes.
    pub fn with_attributes(
        name: impl Into<String>,
        style: Arc<TextStyle>,
        attributes: Attributes,
    ) -> Self {
        Self {
            name: name.into(),
            style,
            attributes,
        }
    }

    /// Whether this token marks embedded image content.
    pub fn is_image(&self) -> bool {
        self.name == IMAGE_TOKEN
    }
}
