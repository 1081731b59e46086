// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Calculate the energy of an image
//!
//! The energy of a pixel is the squared magnitude of the color
//! gradient across it, taken over its immediate horizontal and
//! vertical neighbors.  The grid is treated as a torus: the pixel
//! above the top row is in the bottom row, the pixel left of the
//! first column is in the last column, and so on.

use crate::twodmap::{PixelGrid, TwoDimensionalMap};
use image::{GrayImage, Luma, Rgb};
use itertools::iproduct;

// Takes the channels (R,G,B) from two pixels, squares the signed
// difference of each channel, and sums them up:
//
//        |Δx|² = (Δrx)²+(Δgx)²+(Δbx)²
//        |Δy|² = (Δry)²+(Δgy)²+(Δby)²
//       e(x,y) = |Δx|²+|Δy|²
//
// Each call computes one of the two |Δ|² terms.
#[inline]
fn energy_of_pair(p1: &Rgb<u8>, p2: &Rgb<u8>) -> u32 {
    p1.0.iter()
        .zip(p2.0.iter())
        .map(|(&c1, &c2)| {
            let d = i32::from(c1) - i32::from(c2);
            (d * d) as u32
        })
        .sum()
}

// Toroidal neighbors of `i` along an axis of length `len`.  At the
// edges these are (len-1, 1) and (len-2, 0); swapping a pair only
// flips the sign of the difference, which squaring discards.
#[inline]
fn wrapped(i: u32, len: u32) -> (u32, u32) {
    ((i + len - 1) % len, (i + 1) % len)
}

/// The energy of the pixel at `(x, y)` in the logical `width` x
/// `height` region of `grid`.  Both dimensions must be at least one.
pub fn energy(grid: &PixelGrid, x: u32, y: u32, width: u32, height: u32) -> u32 {
    let (left, right) = wrapped(x, width);
    let (above, below) = wrapped(y, height);
    energy_of_pair(&grid[(right, y)], &grid[(left, y)])
        + energy_of_pair(&grid[(x, below)], &grid[(x, above)])
}

/// Compute the energy of every pixel in the logical region of an
/// image.
pub fn calculate_energy(grid: &PixelGrid, width: u32, height: u32) -> TwoDimensionalMap<u32> {
    let mut emap = TwoDimensionalMap::new(width, height);
    for (y, x) in iproduct!(0..height, 0..width) {
        emap[(x, y)] = energy(grid, x, y, width, height);
    }
    emap
}

/// Render an energy map as a greyscale image, scaled so that the
/// hottest pixel is white.
pub fn energy_to_image(emap: &TwoDimensionalMap<u32>) -> GrayImage {
    let factor = u64::from(emap.as_slice().iter().copied().max().unwrap_or(0));
    GrayImage::from_fn(emap.width(), emap.height(), |x, y| {
        if factor == 0 {
            Luma([0])
        } else {
            Luma([(u64::from(emap[(x, y)]) * 255 / factor) as u8])
        }
    })
}
