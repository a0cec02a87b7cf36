// Copyright 2026 the Folia Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Error type for layout construction.

/// Errors produced while classifying and measuring tokens.
///
/// These are fatal to the enclosing layout pass and are propagated, not
/// recovered locally. Glyph-level degradation (a character the font does
/// not map) is deliberately *not* an error: the font's not-found glyph is
/// used instead.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum Error {
    /// An image token lacked a required sizing or source attribute.
    MissingAttribute {
        /// The token's element name.
        token: String,
        /// The attribute that was required.
        attribute: &'static str,
    },
    /// An attribute was present but not of the required type.
    InvalidAttribute {
        /// The token's element name.
        token: String,
        /// The attribute that failed to parse.
        attribute: &'static str,
        /// The raw value as supplied.
        value: String,
    },
}

impl Error {
    pub(crate) fn missing_attribute(token: &str, attribute: &'static str) -> Self {
        Self::MissingAttribute {
            token: token.to_owned(),
            attribute,
        }
    }

    pub(crate) fn invalid_attribute(token: &str, attribute: &'static str, value: &str) -> Self {
        Self::InvalidAttribute {
            token: token.to_owned(),
            attribute,
            value: value.to_owned(),
        }
    }
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::MissingAttribute { token, attribute } => {
                write!(f, "token <{token}> is missing required attribute `{attribute}`")
            }
            Self::InvalidAttribute {
                token,
                attribute,
                value,
            } => {
                write!(
                    f,
                    "token <{token}> attribute `{attribute}` has non-integer value {value:?}"
                )
            }
        }
    }
}

impl core::error::Error for Error {}
