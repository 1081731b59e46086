// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Two dimensional storage
//!
//! An addressable two-dimensional field, used both for the pixels
//! being carved and for precomputed energy maps.  The allocated
//! stride never changes; the carver tracks the logical width and
//! height separately, and everything beyond the logical boundary is
//! simply never read again.

use image::{Rgb, RgbImage};
use itertools::iproduct;
use std::ops::{Index, IndexMut};

/// The pixel grid being carved: one RGB triple per cell.
pub type PixelGrid = TwoDimensionalMap<Rgb<u8>>;

/// A flat, row-major, bounds-checked two-dimensional map.
#[derive(Debug, Clone, PartialEq)]
pub struct TwoDimensionalMap<P: Copy> {
    width: u32,
    height: u32,
    data: Vec<P>,
}

impl<P: Default + Copy> TwoDimensionalMap<P> {
    /// Define a new map.  Every cell starts as the content type's
    /// default.
    pub fn new(width: u32, height: u32) -> Self {
        Self::filled(width, height, P::default())
    }
}

impl<P: Copy> TwoDimensionalMap<P> {
    /// Define a new map with every cell set to `value`.
    pub fn filled(width: u32, height: u32, value: P) -> Self {
        TwoDimensionalMap {
            width,
            height,
            data: vec![value; width as usize * height as usize],
        }
    }

    /// Allocated width; not necessarily the logical width of the image.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Allocated height; not necessarily the logical height of the image.
    pub fn height(&self) -> u32 {
        self.height
    }

    // Keep the index math in a single location and never mess with
    // it.  Same layout as image.rs: row-major, x within y.
    fn get_index(&self, x: u32, y: u32) -> usize {
        assert!(
            x < self.width && y < self.height,
            "({}, {}) is outside a {}x{} map",
            x,
            y,
            self.width,
            self.height
        );
        (y as usize) * (self.width as usize) + (x as usize)
    }

    /// Get the value at a single address
    pub fn get_pt(&self, x: u32, y: u32) -> P {
        self.data[self.get_index(x, y)]
    }

    /// Set a value at a single address
    pub fn put_pt(&mut self, x: u32, y: u32, value: P) {
        let index = self.get_index(x, y);
        self.data[index] = value;
    }

    /// Raw row-major contents, including anything beyond a logical
    /// boundary.
    pub fn as_slice(&self) -> &[P] {
        &self.data
    }
}

impl<P: Copy> Index<(u32, u32)> for TwoDimensionalMap<P> {
    type Output = P;

    fn index(&self, (x, y): (u32, u32)) -> &P {
        let index = self.get_index(x, y);
        &self.data[index]
    }
}

impl<P: Copy> IndexMut<(u32, u32)> for TwoDimensionalMap<P> {
    fn index_mut(&mut self, (x, y): (u32, u32)) -> &mut P {
        let index = self.get_index(x, y);
        &mut self.data[index]
    }
}

/// An all-black grid of the given size.
pub fn pixel_grid(width: u32, height: u32) -> PixelGrid {
    PixelGrid::filled(width, height, Rgb([0, 0, 0]))
}

impl PixelGrid {
    /// Copy an `image` buffer into a fresh grid.
    pub fn from_image(image: &RgbImage) -> Self {
        let (width, height) = image.dimensions();
        let mut grid = pixel_grid(width, height);
        for (y, x) in iproduct!(0..height, 0..width) {
            grid[(x, y)] = *image.get_pixel(x, y);
        }
        grid
    }

    /// Copy the logical `width` x `height` region out into an `image`
    /// buffer.
    pub fn to_image(&self, width: u32, height: u32) -> RgbImage {
        RgbImage::from_fn(width, height, |x, y| self[(x, y)])
    }
}
