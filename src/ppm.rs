// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Plain-text PPM (P3) input and output
//!
//! The reader is strict: the caller states the dimensions it expects,
//! the maximum color value must be 255, and there must be exactly
//! three channel values per pixel with nothing after them.  The writer
//! emits one channel value per line.

use crate::error::PpmError;
use crate::twodmap::{pixel_grid, PixelGrid, TwoDimensionalMap};
use image::codecs::pnm::{PnmEncoder, PnmSubtype, SampleEncoding};
use image::{ExtendedColorType, ImageEncoder};
use itertools::iproduct;
use log::{debug, info};
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

const MAX_COLOR: i64 = 255;

fn is_plain_rgb(tag: &str) -> bool {
    let mut c = tag.chars();
    matches!(
        (c.next(), c.next(), c.next()),
        (Some('P' | 'p'), Some('3'), None)
    )
}

fn integer(token: Option<&str>) -> Result<i64, PpmError> {
    let token = token.ok_or(PpmError::NotEnoughValues)?;
    token
        .parse()
        .map_err(|_| PpmError::NonInteger(token.to_string()))
}

fn channel(token: Option<&str>) -> Result<u8, PpmError> {
    let value = integer(token)?;
    u8::try_from(value).map_err(|_| PpmError::InvalidColor(value))
}

/// Parse P3 text that must describe a `width` x `height` image.
pub fn parse_image(text: &str, width: u32, height: u32) -> Result<PixelGrid, PpmError> {
    let mut tokens = text.split_ascii_whitespace();

    let tag = tokens.next().ok_or(PpmError::NotEnoughValues)?;
    if !is_plain_rgb(tag) {
        return Err(PpmError::WrongType(tag.to_string()));
    }

    let found = integer(tokens.next())?;
    if found != i64::from(width) {
        return Err(PpmError::WidthMismatch {
            expected: width,
            found,
        });
    }
    let found = integer(tokens.next())?;
    if found != i64::from(height) {
        return Err(PpmError::HeightMismatch {
            expected: height,
            found,
        });
    }
    let max = integer(tokens.next())?;
    if max != MAX_COLOR {
        return Err(PpmError::MaxValue(max));
    }
    debug!("P3 header ok: {}x{}, max {}", width, height, max);

    let mut grid = pixel_grid(width, height);
    for (y, x) in iproduct!(0..height, 0..width) {
        let (r, g, b) = (
            channel(tokens.next())?,
            channel(tokens.next())?,
            channel(tokens.next())?,
        );
        grid[(x, y)] = image::Rgb([r, g, b]);
    }

    if tokens.next().is_some() {
        return Err(PpmError::TooManyValues);
    }
    Ok(grid)
}

/// Load a P3 file that must describe a `width` x `height` image.
pub fn load_image<P: AsRef<Path>>(path: P, width: u32, height: u32) -> Result<PixelGrid, PpmError> {
    let path = path.as_ref();
    info!("Loading image {:?}", path);
    let text = fs::read_to_string(path).map_err(|source| PpmError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_image(&text, width, height)
}

/// Write the logical `width` x `height` region of `grid` as P3, one
/// channel value per line, rows outermost.
pub fn write_image<W: Write>(
    writer: &mut W,
    grid: &PixelGrid,
    width: u32,
    height: u32,
) -> std::io::Result<()> {
    writeln!(writer, "P3")?;
    writeln!(writer, "{} {}", width, height)?;
    writeln!(writer, "{}", MAX_COLOR)?;
    for (y, x) in iproduct!(0..height, 0..width) {
        for c in grid[(x, y)].0.iter() {
            writeln!(writer, "{}", c)?;
        }
    }
    writer.flush()
}

/// Save the logical `width` x `height` region of `grid` to `path`.
pub fn save_image<P: AsRef<Path>>(
    path: P,
    grid: &PixelGrid,
    width: u32,
    height: u32,
) -> Result<(), PpmError> {
    let path = path.as_ref();
    info!("Writing {}x{} image to {:?}", width, height, path);
    let io_error = |source| PpmError::Io {
        path: path.to_path_buf(),
        source,
    };
    let mut writer = BufWriter::new(File::create(path).map_err(io_error)?);
    write_image(&mut writer, grid, width, height).map_err(io_error)
}

/// Save an energy map as an ASCII greymap, scaled so the hottest pixel
/// is white.
pub fn save_energy_map<P: AsRef<Path>>(
    path: P,
    emap: &TwoDimensionalMap<u32>,
) -> Result<(), PpmError> {
    let path = path.as_ref();
    info!("Writing energy map to {:?}", path);
    let gray = crate::energy::energy_to_image(emap);
    let file = File::create(path).map_err(|source| PpmError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    PnmEncoder::new(BufWriter::new(file))
        .with_subtype(PnmSubtype::Graymap(SampleEncoding::Ascii))
        .write_image(
            gray.as_raw(),
            gray.width(),
            gray.height(),
            ExtendedColorType::L8,
        )?;
    Ok(())
}
