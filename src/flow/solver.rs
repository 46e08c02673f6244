//! The max-flow / min-cut solver: shortest augmenting paths on the residual
//! graph (Edmonds–Karp), grounded on the same `has_augmented_path` /
//! `residual_capacity` / "walk back from the sink through recorded
//! predecessor edges" shape as this crate's `ford_fulkerson` lineage, but
//! driven by [`FlowNetwork::neighbors`] so the out-edges-then-in-edges tie
//! break lives in one place.

use std::collections::{HashMap, VecDeque};

use error_stack::{Report, Result};
use indexmap::IndexSet;

use crate::error::Error;
use crate::flow::network::{EdgeRef, FlowNetwork, Vertex};

/// The result of running the max-flow solver on a [`FlowNetwork`]: the
/// max-flow value and the source-side reachable set of the final residual
/// graph (the minimum cut).
#[derive(Debug, Clone)]
pub struct MaxFlowSolver {
    max_flow: i64,
    marked: IndexSet<Vertex>,
}

impl MaxFlowSolver {
    /// Computes the maximum flow from `source` to `sink` in `network` by
    /// repeated breadth-first shortest augmenting paths, mutating `network`'s
    /// edge flows in place.
    ///
    /// Fails with [`Error::SourceEqualsSink`] if `source == sink`,
    /// [`Error::UnknownVertex`] if either terminal is absent from the
    /// network, or [`Error::InitialFlowInfeasible`] if the network's
    /// starting flow already violates capacity bounds or conservation at a
    /// non-terminal vertex.
    pub fn solve(network: &mut FlowNetwork, source: Vertex, sink: Vertex) -> Result<Self, Error> {
        if source == sink {
            return Err(Report::new(Error::SourceEqualsSink));
        }
        if !network.contains(source) || !network.contains(sink) {
            return Err(Report::new(Error::UnknownVertex));
        }
        check_initial_feasibility(network, source, sink)?;

        let mut max_flow = network.excess(sink)?;
        while let Some(path) = shortest_augmenting_path(network, source, sink)? {
            let bottleneck = path
                .iter()
                .try_fold(i64::MAX, |acc, &(edge, towards)| {
                    network.residual_capacity(edge, towards).map(|r| acc.min(r))
                })?;
            for (edge, towards) in &path {
                network.add_residual_flow(*edge, *towards, bottleneck)?;
            }
            max_flow += bottleneck;
        }

        let marked = residual_reachable_set(network, source)?;
        debug_assert!(marked.contains(&source));
        debug_assert!(!marked.contains(&sink));
        debug_assert_eq!(max_flow, cut_capacity(network, &marked)?);

        Ok(Self { max_flow, marked })
    }

    /// The computed maximum flow value.
    pub fn max_flow(&self) -> i64 {
        self.max_flow
    }

    /// The source-side reachable set of the final residual graph: the
    /// minimum cut, including `source` and excluding `sink`.
    pub fn min_cut(&self) -> &IndexSet<Vertex> {
        &self.marked
    }

    /// True iff `v` is on the source side of the minimum cut.
    pub fn in_cut(&self, v: Vertex) -> bool {
        self.marked.contains(&v)
    }
}

/// Checks that every edge's flow lies within `[0, capacity]` and that net
/// flow at every non-terminal vertex is zero.
fn check_initial_feasibility(
    network: &FlowNetwork,
    source: Vertex,
    sink: Vertex,
) -> Result<(), Error> {
    for v in network.vertices() {
        for edge in network.out_edges(v)? {
            let flow = network.flow(edge);
            if flow < 0 || flow > edge.capacity() {
                return Err(Report::new(Error::InitialFlowInfeasible));
            }
        }
        if v != source && v != sink && network.excess(v)? != 0 {
            return Err(Report::new(Error::InitialFlowInfeasible));
        }
    }
    Ok(())
}

/// Breadth-first search over the residual graph from `source`. Returns the
/// path to `sink` as a list of `(edge, vertex reached through it)` pairs in
/// traversal order, or `None` if `sink` is unreachable.
///
/// Neighbors are visited in [`FlowNetwork::neighbors`] order (out-edges then
/// in-edges, each in insertion order); the first discovery of a vertex wins,
/// which is what makes the chosen augmenting path deterministic when several
/// shortest paths exist.
fn shortest_augmenting_path(
    network: &FlowNetwork,
    source: Vertex,
    sink: Vertex,
) -> Result<Option<Vec<(EdgeRef, Vertex)>>, Error> {
    let mut predecessor: HashMap<Vertex, (EdgeRef, Vertex)> = HashMap::new();
    let mut visited: IndexSet<Vertex> = IndexSet::new();
    let mut queue: VecDeque<Vertex> = VecDeque::new();

    visited.insert(source);
    queue.push_back(source);

    'bfs: while let Some(vertex) = queue.pop_front() {
        for edge in network.neighbors(vertex)? {
            let next = network.other(edge, vertex)?;
            if visited.contains(&next) {
                continue;
            }
            if network.residual_capacity(edge, next)? <= 0 {
                continue;
            }
            visited.insert(next);
            predecessor.insert(next, (edge, vertex));
            if next == sink {
                break 'bfs;
            }
            queue.push_back(next);
        }
    }

    if !visited.contains(&sink) {
        return Ok(None);
    }

    let mut path = Vec::new();
    let mut vertex = sink;
    while vertex != source {
        let (edge, prev) = predecessor[&vertex];
        path.push((edge, vertex));
        vertex = prev;
    }
    path.reverse();
    Ok(Some(path))
}

/// Reachable set from `source` in the final residual graph: the minimum
/// cut's source side.
fn residual_reachable_set(network: &FlowNetwork, source: Vertex) -> Result<IndexSet<Vertex>, Error> {
    let mut visited: IndexSet<Vertex> = IndexSet::new();
    let mut queue: VecDeque<Vertex> = VecDeque::new();
    visited.insert(source);
    queue.push_back(source);
    while let Some(vertex) = queue.pop_front() {
        for edge in network.neighbors(vertex)? {
            let next = network.other(edge, vertex)?;
            if visited.contains(&next) {
                continue;
            }
            if network.residual_capacity(edge, next)? > 0 {
                visited.insert(next);
                queue.push_back(next);
            }
        }
    }
    Ok(visited)
}

/// Sums the capacities of edges crossing from `marked` to its complement.
/// Saturates rather than panics on overflow: an edge capacity derived from
/// an unbounded regional cost should never occur (see
/// [`crate::segmentation`]'s clamping), but this is a generic solver routine
/// with no control over what capacities callers add, so it must not crash on
/// a pathological network per this crate's no-panics error policy.
fn cut_capacity(network: &FlowNetwork, marked: &IndexSet<Vertex>) -> Result<i64, Error> {
    let mut total = 0i64;
    for &v in marked {
        for edge in network.out_edges(v)? {
            if !marked.contains(&edge.destination()) {
                total = total.saturating_add(edge.capacity());
            }
        }
    }
    Ok(total)
}
