// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Invariants every seam and every carve must satisfy, whatever the
//! pixels.

use image::Rgb;
use itertools::iproduct;
use ppmseam::{
    calculate_energy, find_min_horizontal_seam, find_min_vertical_seam, parse_image,
    remove_vertical_seam, trace_vertical_seam, write_image, GreedyWalk, LiveEnergy, PixelGrid,
    SeamCarver,
};
use proptest::prelude::*;

fn grid_strategy() -> impl Strategy<Value = (u32, u32, PixelGrid)> {
    (1u32..=12, 1u32..=12).prop_flat_map(|(width, height)| {
        proptest::collection::vec(any::<[u8; 3]>(), (width * height) as usize).prop_map(
            move |pixels| {
                let mut grid = ppmseam::pixel_grid(width, height);
                for (i, p) in pixels.into_iter().enumerate() {
                    let i = i as u32;
                    grid[(i % width, i / width)] = Rgb(p);
                }
                (width, height, grid)
            },
        )
    })
}

fn is_connected(seam: &[u32]) -> bool {
    seam.windows(2).all(|w| w[0].abs_diff(w[1]) <= 1)
}

proptest! {
    #[test]
    fn vertical_seams_span_the_height((width, height, grid) in grid_strategy()) {
        let seam = find_min_vertical_seam(&grid, width, height);
        prop_assert_eq!(seam.len(), height as usize);
        prop_assert!(seam.iter().all(|x| *x < width));
        prop_assert!(is_connected(&seam));
    }

    #[test]
    fn horizontal_seams_span_the_width((width, height, grid) in grid_strategy()) {
        let seam = find_min_horizontal_seam(&grid, width, height);
        prop_assert_eq!(seam.len(), width as usize);
        prop_assert!(seam.iter().all(|y| *y < height));
        prop_assert!(is_connected(&seam));
    }

    #[test]
    fn chosen_seam_is_the_cheapest_walk((width, height, grid) in grid_strategy()) {
        let source = LiveEnergy::new(&grid, width, height);
        let (total, seam) = GreedyWalk::new(source).cheapest_vertical_seam().unwrap();
        let first_cheapest = (0..width)
            .map(|start| trace_vertical_seam(&source, start))
            .find(|(e, _)| *e == total)
            .unwrap();
        prop_assert!((0..width).all(|s| trace_vertical_seam(&source, s).0 >= total));
        prop_assert_eq!(first_cheapest.1, seam);
    }

    #[test]
    fn seam_energy_is_the_sum_of_its_pixels((width, height, grid) in grid_strategy()) {
        let energies = calculate_energy(&grid, width, height);
        let (total, seam) = GreedyWalk::new(LiveEnergy::new(&grid, width, height))
            .cheapest_vertical_seam()
            .unwrap();
        let summed: u64 = seam
            .iter()
            .enumerate()
            .map(|(y, x)| u64::from(energies[(*x, y as u32)]))
            .sum();
        prop_assert_eq!(total, summed);
    }

    #[test]
    fn vertical_removal_keeps_left_and_shifts_right((width, height, grid) in grid_strategy()) {
        prop_assume!(width > 1);
        let seam = find_min_vertical_seam(&grid, width, height);
        let mut carved = grid.clone();
        remove_vertical_seam(&mut carved, width, height, &seam);
        for (y, x) in iproduct!(0..height, 0..width - 1) {
            let from = if x < seam[y as usize] { x } else { x + 1 };
            prop_assert_eq!(carved[(x, y)], grid[(from, y)]);
        }
    }

    #[test]
    fn carved_images_round_trip((width, height, grid) in grid_strategy()) {
        let mut carved = grid.clone();
        let target = ((width + 1) / 2, (height + 1) / 2);
        let (w, h) = SeamCarver::new(&mut carved, width, height)
            .carve(target.0, target.1)
            .unwrap();
        prop_assert_eq!((w, h), target);

        let mut first = Vec::new();
        write_image(&mut first, &carved, w, h).unwrap();
        let reread = parse_image(std::str::from_utf8(&first).unwrap(), w, h).unwrap();
        let mut second = Vec::new();
        write_image(&mut second, &reread, w, h).unwrap();
        prop_assert_eq!(first, second);
    }
}

#[test]
fn uniform_images_carve_for_free() {
    let grid = PixelGrid::filled(6, 4, Rgb([3, 1, 4]));
    let finder = GreedyWalk::new(LiveEnergy::new(&grid, 6, 4));
    assert_eq!(finder.cheapest_vertical_seam().unwrap().0, 0);
    assert_eq!(finder.cheapest_horizontal_seam().unwrap().0, 0);
    assert!(calculate_energy(&grid, 6, 4)
        .as_slice()
        .iter()
        .all(|e| *e == 0));
}
