// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Seamcarve - The main function
//!
//! Seam removal, and the carver that alternates finding and removing
//! seams until the image reaches its target size.

use crate::energy::calculate_energy;
use crate::error::CarveError;
use crate::greedy::GreedyWalk;
use crate::seamfinder::{LiveEnergy, SeamFinder};
use crate::twodmap::PixelGrid;
use log::{debug, info};

/// Remove a top-to-bottom seam in place.  Every pixel to the right of
/// the seam slides one column left; column `width - 1` is left stale
/// and the caller now owns a `width - 1` wide image.
pub fn remove_vertical_seam(grid: &mut PixelGrid, width: u32, height: u32, seam: &[u32]) {
    debug_assert_eq!(seam.len(), height as usize);
    for (y, &col) in (0..height).zip(seam.iter()) {
        for x in col..width - 1 {
            grid[(x, y)] = grid[(x + 1, y)];
        }
    }
}

/// Remove a left-to-right seam in place.  Every pixel below the seam
/// slides one row up; row `height - 1` is left stale and the caller
/// now owns a `height - 1` tall image.
pub fn remove_horizontal_seam(grid: &mut PixelGrid, width: u32, height: u32, seam: &[u32]) {
    debug_assert_eq!(seam.len(), width as usize);
    for (x, &row) in (0..width).zip(seam.iter()) {
        for y in row..height - 1 {
            grid[(x, y)] = grid[(x, y + 1)];
        }
    }
}

/// Which dimension a seam shrinks.
#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub enum Carve {
    /// A vertical seam; the image loses a column.
    Width,
    /// A horizontal seam; the image loses a row.
    Height,
}

/// Holds the image being carved and its current logical size.
pub struct SeamCarver<'a> {
    grid: &'a mut PixelGrid,
    width: u32,
    height: u32,
    cached_energy: bool,
}

impl<'a> SeamCarver<'a> {
    /// Creates a new SeamCarver over the logical `width` x `height`
    /// region of `grid`.
    pub fn new(grid: &'a mut PixelGrid, width: u32, height: u32) -> Self {
        SeamCarver {
            grid,
            width,
            height,
            cached_energy: false,
        }
    }

    /// Compute a full energy map before each search instead of
    /// recomputing energies as the walks ask for them.  The seams
    /// found are the same either way.
    pub fn with_cached_energy(mut self, cached: bool) -> Self {
        self.cached_energy = cached;
        self
    }

    /// Current logical (width, height).
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn find_seam(&self, direction: Carve) -> Vec<u32> {
        let (width, height) = (self.width, self.height);
        let grid: &PixelGrid = &*self.grid;
        match (direction, self.cached_energy) {
            (Carve::Width, false) => {
                GreedyWalk::new(LiveEnergy::new(grid, width, height)).find_vertical_seam()
            }
            (Carve::Height, false) => {
                GreedyWalk::new(LiveEnergy::new(grid, width, height)).find_horizontal_seam()
            }
            (Carve::Width, true) => {
                GreedyWalk::new(calculate_energy(grid, width, height)).find_vertical_seam()
            }
            (Carve::Height, true) => {
                GreedyWalk::new(calculate_energy(grid, width, height)).find_horizontal_seam()
            }
        }
    }

    /// Find and remove one seam, shrinking the logical image by one
    /// column or row.
    pub fn carve_once(&mut self, direction: Carve) {
        let seam = self.find_seam(direction);
        debug!("{:?} seam at {}x{}: {:?}", direction, self.width, self.height, seam);
        match direction {
            Carve::Width => {
                remove_vertical_seam(self.grid, self.width, self.height, &seam);
                self.width -= 1;
            }
            Carve::Height => {
                remove_horizontal_seam(self.grid, self.width, self.height, &seam);
                self.height -= 1;
            }
        }
    }

    /// Carve the image down to `target_width` x `target_height`.  Each
    /// pass removes one vertical seam and then one horizontal seam, for
    /// as long as either dimension is still too large.  Returns the
    /// final logical size.
    pub fn carve(&mut self, target_width: u32, target_height: u32) -> Result<(u32, u32), CarveError> {
        if target_width == 0 || target_height == 0 {
            return Err(CarveError::ZeroTarget {
                width: target_width,
                height: target_height,
            });
        }
        if target_width > self.width || target_height > self.height {
            return Err(CarveError::Upscale {
                from: (self.width, self.height),
                to: (target_width, target_height),
            });
        }

        let (start_width, start_height) = (self.width, self.height);
        while self.width > target_width || self.height > target_height {
            if self.width > target_width {
                self.carve_once(Carve::Width);
            }
            if self.height > target_height {
                self.carve_once(Carve::Height);
            }
        }
        info!(
            "Carved {}x{} down to {}x{}",
            start_width, start_height, self.width, self.height
        );
        Ok((self.width, self.height))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::greedy::find_min_vertical_seam;
    use crate::twodmap::pixel_grid;
    use image::Rgb;
    use itertools::iproduct;

    fn numbered(width: u32, height: u32) -> PixelGrid {
        let mut grid = pixel_grid(width, height);
        for (y, x) in iproduct!(0..height, 0..width) {
            grid[(x, y)] = Rgb([x as u8, y as u8, (x * 10 + y) as u8]);
        }
        grid
    }

    #[test]
    fn vertical_removal_shifts_left_of_seam() {
        let original = numbered(4, 3);
        let mut grid = original.clone();
        let seam = [1, 2, 3];
        remove_vertical_seam(&mut grid, 4, 3, &seam);
        for (y, x) in iproduct!(0..3u32, 0..3u32) {
            let expected = if x < seam[y as usize] {
                original[(x, y)]
            } else {
                original[(x + 1, y)]
            };
            assert_eq!(grid[(x, y)], expected, "at ({}, {})", x, y);
        }
    }

    #[test]
    fn horizontal_removal_shifts_up_below_seam() {
        let original = numbered(3, 4);
        let mut grid = original.clone();
        let seam = [0, 1, 3];
        remove_horizontal_seam(&mut grid, 3, 4, &seam);
        for (y, x) in iproduct!(0..3u32, 0..3u32) {
            let expected = if y < seam[x as usize] {
                original[(x, y)]
            } else {
                original[(x, y + 1)]
            };
            assert_eq!(grid[(x, y)], expected, "at ({}, {})", x, y);
        }
    }

    #[test]
    fn removing_the_last_column_changes_nothing_visible() {
        let original = numbered(3, 2);
        let mut grid = original.clone();
        remove_vertical_seam(&mut grid, 3, 2, &[2, 2]);
        assert_eq!(grid.to_image(2, 2), original.to_image(2, 2));
    }

    #[test]
    fn carve_tracks_logical_size() {
        let mut grid = numbered(6, 5);
        let mut carver = SeamCarver::new(&mut grid, 6, 5);
        assert_eq!(carver.carve(4, 2), Ok((4, 2)));
        assert_eq!(carver.dimensions(), (4, 2));
    }

    #[test]
    fn carve_refuses_to_upscale_or_vanish() {
        let mut grid = numbered(3, 3);
        let mut carver = SeamCarver::new(&mut grid, 3, 3);
        assert_eq!(
            carver.carve(4, 3),
            Err(CarveError::Upscale {
                from: (3, 3),
                to: (4, 3)
            })
        );
        assert_eq!(
            carver.carve(0, 3),
            Err(CarveError::ZeroTarget {
                width: 0,
                height: 3
            })
        );
        assert_eq!(carver.carve(3, 3), Ok((3, 3)));
    }

    #[test]
    fn carve_once_matches_find_then_remove() {
        let original = numbered(5, 4);
        let mut expected = original.clone();
        let seam = find_min_vertical_seam(&expected, 5, 4);
        remove_vertical_seam(&mut expected, 5, 4, &seam);

        let mut grid = original;
        SeamCarver::new(&mut grid, 5, 4).carve_once(Carve::Width);
        assert_eq!(grid.to_image(4, 4), expected.to_image(4, 4));
    }

    #[test]
    fn cached_energy_carves_identically() {
        let mut live = numbered(7, 6);
        let mut cached = live.clone();
        SeamCarver::new(&mut live, 7, 6).carve(4, 3).unwrap();
        SeamCarver::new(&mut cached, 7, 6)
            .with_cached_energy(true)
            .carve(4, 3)
            .unwrap();
        assert_eq!(live.to_image(4, 3), cached.to_image(4, 3));
    }

    #[test]
    fn carving_never_invents_colors() {
        let original = numbered(5, 5);
        let mut grid = original.clone();
        SeamCarver::new(&mut grid, 5, 5).carve(2, 3).unwrap();
        let before = original.as_slice();
        for (y, x) in iproduct!(0..3u32, 0..2u32) {
            assert!(before.contains(&grid[(x, y)]));
        }
    }
}
