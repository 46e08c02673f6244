//! The segmentation graph constructor: maps `(pixels, seedObj, seedBkg)` to a
//! flow network (boundary n-links, regional/seed t-links) and extracts the
//! object mask from its minimum cut.

use std::collections::HashSet;

use error_stack::{Report, Result};

use crate::error::Error;
use crate::flow::{FlowNetwork, MaxFlowSolver, Vertex};
use crate::segmentation::histogram::IntensityHistogram;
use crate::segmentation::pixel::{Index, Pixel};

/// Boundary smoothness scale, `σ` in the boundary term
/// `B(p,q) = DIST * exp(-(I(p)-I(q))^2 / (2*σ^2))`.
pub const BOUNDARY_SIGMA: f64 = 60.0;

/// Balance between the regional and boundary terms.
pub const LAMBDA: f64 = 1.0;

/// Boundary capacity scale factor. Calibrated against `50`; a related
/// project's README names the scale `10`, but test fixtures and visual
/// results for this engine were produced with `50`, so that is what this
/// crate uses.
pub const DIST: f64 = 50.0;

/// Partitions `pixels` into object and background given two non-empty,
/// disjoint seed sets, by building a segmentation flow network and taking
/// its minimum s-t cut.
///
/// `pixels` is row-major: `pixels[row][col]`. Returns the set of indices on
/// the source (object) side of the cut.
///
/// # Errors
/// [`Error::InvalidRaster`] if `pixels` is empty, its first row is empty, or
/// a seed index lies outside the raster. [`Error::EmptySeeds`] if either
/// seed set has no elements.
pub fn segment(
    pixels: &[Vec<Pixel>],
    seed_obj: &HashSet<Index>,
    seed_bkg: &HashSet<Index>,
) -> Result<HashSet<Index>, Error> {
    let height = pixels.len();
    if height == 0 {
        return Err(Report::new(Error::InvalidRaster));
    }
    let width = pixels[0].len();
    if width == 0 {
        return Err(Report::new(Error::InvalidRaster));
    }
    if seed_obj.is_empty() || seed_bkg.is_empty() {
        return Err(Report::new(Error::EmptySeeds));
    }
    for idx in seed_obj.iter().chain(seed_bkg.iter()) {
        if idx.row >= height || idx.col >= width {
            return Err(Report::new(Error::InvalidRaster));
        }
    }

    let mut network = FlowNetwork::new();

    let max_boundary_sum = add_n_links(&mut network, pixels, height, width);
    let anchor_capacity = 1 + max_boundary_sum;

    let obj_hist = IntensityHistogram::build(&seed_intensities(pixels, seed_obj))?;
    let bkg_hist = IntensityHistogram::build(&seed_intensities(pixels, seed_bkg))?;
    add_t_links(
        &mut network,
        pixels,
        height,
        width,
        seed_obj,
        seed_bkg,
        anchor_capacity,
        &obj_hist,
        &bkg_hist,
    );

    let solver = MaxFlowSolver::solve(&mut network, Vertex::Source, Vertex::Sink)?;

    let mut object = HashSet::new();
    for row in 0..height {
        for col in 0..width {
            let p = Index::new(row, col);
            if solver.in_cut(Vertex::Voxel(p.id(width))) {
                object.insert(p);
            }
        }
    }
    Ok(object)
}

/// Adds the boundary n-links and returns `K = 1 + floor(max_p sum_q B(p,q))`'s
/// operand, the maximum per-pixel boundary sum.
///
/// Each pixel adds a directed edge to every 4-neighbor that exists (left,
/// right, up, down, in that order); since every adjacent pair is visited
/// once from each side, the pair ends up with directed edges in both
/// directions, matching the reference engine's behavior.
fn add_n_links(network: &mut FlowNetwork, pixels: &[Vec<Pixel>], height: usize, width: usize) -> i64 {
    let mut max_sum = 0i64;
    for row in 0..height {
        for col in 0..width {
            let p = Index::new(row, col);
            let mut sum = 0i64;
            for q in four_neighbors(p, height, width) {
                let capacity = boundary_capacity(pixels[p.row][p.col], pixels[q.row][q.col]);
                network.add_edge(Vertex::Voxel(p.id(width)), Vertex::Voxel(q.id(width)), capacity);
                sum += capacity;
            }
            max_sum = max_sum.max(sum);
        }
    }
    max_sum
}

#[allow(clippy::too_many_arguments)]
fn add_t_links(
    network: &mut FlowNetwork,
    pixels: &[Vec<Pixel>],
    height: usize,
    width: usize,
    seed_obj: &HashSet<Index>,
    seed_bkg: &HashSet<Index>,
    anchor_capacity: i64,
    obj_hist: &IntensityHistogram,
    bkg_hist: &IntensityHistogram,
) {
    for row in 0..height {
        for col in 0..width {
            let p = Index::new(row, col);
            let voxel = Vertex::Voxel(p.id(width));
            if seed_obj.contains(&p) {
                network.add_edge(Vertex::Source, voxel, anchor_capacity);
            } else if seed_bkg.contains(&p) {
                network.add_edge(voxel, Vertex::Sink, anchor_capacity);
            } else {
                // Always finite: IntensityHistogram guarantees every bin is
                // strictly positive, so neither log-likelihood can diverge
                // and dominate the network regardless of the boundary term.
                let intensity = pixels[p.row][p.col].intensity();
                let obj_cost = (LAMBDA * obj_hist.neg_log_likelihood(intensity)) as i64;
                let bkg_cost = (LAMBDA * bkg_hist.neg_log_likelihood(intensity)) as i64;
                network.add_edge(Vertex::Source, voxel, obj_cost);
                network.add_edge(voxel, Vertex::Sink, bkg_cost);
            }
        }
    }
}

/// The existing 4-neighbors of `p`, in left, right, up, down order.
fn four_neighbors(p: Index, height: usize, width: usize) -> Vec<Index> {
    let mut neighbors = Vec::with_capacity(4);
    if p.col > 0 {
        neighbors.push(Index::new(p.row, p.col - 1));
    }
    if p.col + 1 < width {
        neighbors.push(Index::new(p.row, p.col + 1));
    }
    if p.row > 0 {
        neighbors.push(Index::new(p.row - 1, p.col));
    }
    if p.row + 1 < height {
        neighbors.push(Index::new(p.row + 1, p.col));
    }
    neighbors
}

fn boundary_capacity(p: Pixel, q: Pixel) -> i64 {
    let diff = f64::from(p.intensity()) - f64::from(q.intensity());
    (DIST * (-(diff * diff) / (2.0 * BOUNDARY_SIGMA * BOUNDARY_SIGMA)).exp()) as i64
}

fn seed_intensities(pixels: &[Vec<Pixel>], seeds: &HashSet<Index>) -> Vec<u8> {
    seeds
        .iter()
        .map(|idx| pixels[idx.row][idx.col].intensity())
        .collect()
}
