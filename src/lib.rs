// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Greedy seam carving for plain-text PPM images.

// I'm fond of the ternary operator.  Rust's ifs are already
// expressions, but `cargo fmt` spreads them over five lines and the
// edge-of-image rules read much better on one.
macro_rules! cq {
    ($condition: expr, $_true: expr, $_false: expr) => {
        if $condition {
            $_true
        } else {
            $_false
        }
    };
}

pub mod energy;
pub mod error;
pub mod greedy;
pub mod ppm;
pub mod seamcarver;
pub mod seamfinder;
pub mod twodmap;

pub use energy::{calculate_energy, energy, energy_to_image};
pub use error::{CarveError, PpmError};
pub use greedy::{
    find_min_horizontal_seam, find_min_vertical_seam, trace_horizontal_seam, trace_vertical_seam,
    GreedyWalk,
};
pub use ppm::{load_image, parse_image, save_energy_map, save_image, write_image};
pub use seamcarver::{remove_horizontal_seam, remove_vertical_seam, Carve, SeamCarver};
pub use seamfinder::{EnergySource, LiveEnergy, SeamFinder};
pub use twodmap::{pixel_grid, PixelGrid, TwoDimensionalMap};
