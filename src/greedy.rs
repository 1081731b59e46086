// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The greedy seam walk
//!
//! Every possible starting offset along the first row (or column) is
//! walked forward one step at a time.  At each step the walker looks at
//! the three cells it could move to, picks one by a fixed set of rules,
//! and never reconsiders.  Of all the walks, the one with the lowest
//! total energy wins; earlier starts win ties.
//!
//! This is *not* the dynamic-programming seam of Avidan & Shamir.  A
//! walk can be lured down an expensive path by one cheap step, and
//! nothing is shared between walks with different starting points.

use crate::seamfinder::{EnergySource, LiveEnergy, SeamFinder};
use crate::twodmap::PixelGrid;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    Low,
    Stay,
    High,
}

// Which neighbor wins a tie when the middle is not the minimum.
// Vertical walks lean right; horizontal walks lean up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Lean {
    Low,
    High,
}

// `low` and `high` are u32::MAX when the neighbor is off the edge, so
// no real energy ever loses to them.
fn step(low: u32, middle: u32, high: u32, lean: Lean) -> Step {
    if middle < low {
        cq!(middle <= high, Step::Stay, Step::High)
    } else if middle < high {
        cq!(middle <= low, Step::Stay, Step::Low)
    } else if middle > low || middle > high {
        match lean {
            Lean::High => cq!(high <= low, Step::High, Step::Low),
            Lean::Low => cq!(low <= high, Step::Low, Step::High),
        }
    } else {
        Step::Stay
    }
}

// Walk `length` steps from `start`, with `breadth` possible offsets per
// step.  `erg(along, across)` is the energy at step `along`, offset
// `across`.
fn walk<F>(start: u32, length: u32, breadth: u32, lean: Lean, erg: F) -> (u64, Vec<u32>)
where
    F: Fn(u32, u32) -> u32,
{
    let mut seam = Vec::with_capacity(length as usize);
    let mut curr = start;
    let mut total = u64::from(erg(0, start));
    seam.push(start);

    for along in 1..length {
        let middle = erg(along, curr);
        let low = cq!(curr == 0, u32::MAX, erg(along, curr - 1));
        let high = cq!(curr == breadth - 1, u32::MAX, erg(along, curr + 1));
        let (next, cost) = match step(low, middle, high, lean) {
            Step::Low => (curr - 1, low),
            Step::Stay => (curr, middle),
            Step::High => (curr + 1, high),
        };
        total += u64::from(cost);
        seam.push(next);
        curr = next;
    }
    (total, seam)
}

/// Walk a vertical seam down from column `start` of the first row.
/// Returns the seam's total energy and its column offsets, one per row.
pub fn trace_vertical_seam<E: EnergySource>(source: &E, start: u32) -> (u64, Vec<u32>) {
    let (width, height) = source.dimensions();
    walk(start, height, width, Lean::High, |y, x| source.energy_at(x, y))
}

/// Walk a horizontal seam rightward from row `start` of the first
/// column.  Returns the seam's total energy and its row offsets, one
/// per column.
pub fn trace_horizontal_seam<E: EnergySource>(source: &E, start: u32) -> (u64, Vec<u32>) {
    let (width, height) = source.dimensions();
    walk(start, width, height, Lean::Low, |x, y| source.energy_at(x, y))
}

// Later candidates replace the best only when strictly cheaper.
fn cheapest<I>(candidates: I) -> Option<(u64, Vec<u32>)>
where
    I: Iterator<Item = (u64, Vec<u32>)>,
{
    candidates.reduce(|best, candidate| cq!(candidate.0 < best.0, candidate, best))
}

#[cfg(not(feature = "threaded"))]
fn search<F>(breadth: u32, trace: F) -> Option<(u64, Vec<u32>)>
where
    F: Fn(u32) -> (u64, Vec<u32>) + Sync,
{
    cheapest((0..breadth).map(trace))
}

// The starts are split into contiguous chunks, in order, and each
// worker keeps its own first-found minimum.  Reducing the chunk
// winners in chunk order with the same strict comparison gives exactly
// the sequential answer.
#[cfg(feature = "threaded")]
fn search<F>(breadth: u32, trace: F) -> Option<(u64, Vec<u32>)>
where
    F: Fn(u32) -> (u64, Vec<u32>) + Sync,
{
    let workers = num_cpus::get().max(1) as u32;
    if workers == 1 || breadth < 2 * workers {
        return cheapest((0..breadth).map(trace));
    }
    let chunk = (breadth + workers - 1) / workers;
    let trace = &trace;

    let outcome = crossbeam::thread::scope(|s| {
        let handles: Vec<_> = (0..breadth)
            .step_by(chunk as usize)
            .map(|lo| {
                let hi = (lo + chunk).min(breadth);
                s.spawn(move |_| cheapest((lo..hi).map(trace)))
            })
            .collect();
        handles
            .into_iter()
            .map(|handle| handle.join())
            .collect::<Result<Vec<_>, _>>()
    });

    match outcome {
        Ok(Ok(winners)) => cheapest(winners.into_iter().flatten()),
        Ok(Err(panic)) | Err(panic) => std::panic::resume_unwind(panic),
    }
}

/// The greedy seam finder, generic over where its energies come from.
#[derive(Debug, Clone)]
pub struct GreedyWalk<E: EnergySource> {
    source: E,
}

impl<E: EnergySource + Sync> GreedyWalk<E> {
    pub fn new(source: E) -> Self {
        GreedyWalk { source }
    }

    /// The cheapest vertical seam along with its total energy.
    pub fn cheapest_vertical_seam(&self) -> Option<(u64, Vec<u32>)> {
        let (width, _) = self.source.dimensions();
        search(width, |start| trace_vertical_seam(&self.source, start))
    }

    /// The cheapest horizontal seam along with its total energy.
    pub fn cheapest_horizontal_seam(&self) -> Option<(u64, Vec<u32>)> {
        let (_, height) = self.source.dimensions();
        search(height, |start| trace_horizontal_seam(&self.source, start))
    }
}

impl<E: EnergySource + Sync> SeamFinder for GreedyWalk<E> {
    fn find_vertical_seam(&self) -> Vec<u32> {
        self.cheapest_vertical_seam()
            .map(|(_, seam)| seam)
            .unwrap_or_default()
    }

    fn find_horizontal_seam(&self) -> Vec<u32> {
        self.cheapest_horizontal_seam()
            .map(|(_, seam)| seam)
            .unwrap_or_default()
    }
}

/// A convenience wrapper: the cheapest top-to-bottom seam of the
/// logical `width` x `height` region, recomputing energies as it goes.
pub fn find_min_vertical_seam(grid: &PixelGrid, width: u32, height: u32) -> Vec<u32> {
    GreedyWalk::new(LiveEnergy::new(grid, width, height)).find_vertical_seam()
}

/// A convenience wrapper: the cheapest left-to-right seam of the
/// logical `width` x `height` region, recomputing energies as it goes.
pub fn find_min_horizontal_seam(grid: &PixelGrid, width: u32, height: u32) -> Vec<u32> {
    GreedyWalk::new(LiveEnergy::new(grid, width, height)).find_horizontal_seam()
}
