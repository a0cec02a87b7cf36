// Copyright 2026 the Folia Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Error type for font loading.

/// Errors produced while loading a font file.
#[derive(Debug)]
#[non_exhaustive]
pub enum FontError {
    /// The data could not be parsed as an OpenType face.
    Parse(ttf_parser::FaceParsingError),
}

impl core::fmt::Display for FontError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Parse(err) => write!(f, "unreadable font data: {err}"),
        }
    }
}

impl core::error::Error for FontError {
    fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
        match self {
            Self::Parse(err) => Some(err),
        }
    }
}

impl From<ttf_parser::FaceParsingError> for FontError {
    fn from(err: ttf_parser::FaceParsingError) -> Self {
        Self::Parse(err)
    }
}
