// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! How seams are requested, and where their energies come from.

use crate::energy::energy;
use crate::twodmap::{PixelGrid, TwoDimensionalMap};

/// This trait defines how we will return seams from an image.  It's a
/// primitive interface, just enough to make room for multiple seam
/// finders as well as caching.
pub trait SeamFinder {
    /// Request a top-to-bottom seam: one column offset per row.
    fn find_vertical_seam(&self) -> Vec<u32>;

    /// Request a left-to-right seam: one row offset per column.
    fn find_horizontal_seam(&self) -> Vec<u32>;
}

/// Anything that can answer "what is the energy at (x, y)" for a
/// logical `width` x `height` image.
pub trait EnergySource {
    /// Logical (width, height).
    fn dimensions(&self) -> (u32, u32);

    fn energy_at(&self, x: u32, y: u32) -> u32;
}

/// Recomputes the energy from the pixels on every query.  Nothing is
/// cached, so the same pixel may be evaluated many times during a
/// single search.
#[derive(Debug, Clone, Copy)]
pub struct LiveEnergy<'a> {
    grid: &'a PixelGrid,
    width: u32,
    height: u32,
}

impl<'a> LiveEnergy<'a> {
    pub fn new(grid: &'a PixelGrid, width: u32, height: u32) -> Self {
        debug_assert!(width >= 1 && height >= 1);
        debug_assert!(width <= grid.width() && height <= grid.height());
        LiveEnergy {
            grid,
            width,
            height,
        }
    }
}

impl EnergySource for LiveEnergy<'_> {
    fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    #[inline]
    fn energy_at(&self, x: u32, y: u32) -> u32 {
        energy(self.grid, x, y, self.width, self.height)
    }
}

// A precomputed map, as produced by `calculate_energy`, covers exactly
// the logical region it was computed for.
impl EnergySource for TwoDimensionalMap<u32> {
    fn dimensions(&self) -> (u32, u32) {
        (self.width(), self.height())
    }

    #[inline]
    fn energy_at(&self, x: u32, y: u32) -> u32 {
        self[(x, y)]
    }
}
