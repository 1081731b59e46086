// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use std::path::PathBuf;
use thiserror::Error;

/// Everything that can go wrong reading or writing a plain-text PPM.
#[derive(Debug, Error)]
pub enum PpmError {
    #[error("failed to access {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("type is {0} instead of P3")]
    WrongType(String),

    #[error("input width ({expected}) does not match value in file ({found})")]
    WidthMismatch { expected: u32, found: i64 },

    #[error("input height ({expected}) does not match value in file ({found})")]
    HeightMismatch { expected: u32, found: i64 },

    #[error("maximum color value is {0}, not 255")]
    MaxValue(i64),

    #[error("read non-integer value {0:?}")]
    NonInteger(String),

    #[error("not enough color values")]
    NotEnoughValues,

    #[error("invalid color value {0}")]
    InvalidColor(i64),

    #[error("too many color values")]
    TooManyValues,

    #[error("failed to encode energy map: {0}")]
    Encode(#[from] image::ImageError),
}

/// Reasons a carve request is refused before any seam is removed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CarveError {
    #[error("target size {width}x{height} must be at least 1x1")]
    ZeroTarget { width: u32, height: u32 },

    #[error("seam carving cannot upscale: {from:?} to {to:?}")]
    Upscale { from: (u32, u32), to: (u32, u32) },
}
