//! The flow-network data structure: a directed multigraph with per-edge
//! flow/capacity bookkeeping and residual-capacity semantics.
//!
//! Mirrors the incidence-list shape of a concrete adjacency graph (as opposed
//! to the trait-abstracted graphs the rest of this crate's lineage builds
//! algorithms over): each vertex owns an ordered list of outgoing and
//! incoming edge ids, and every edge's mutable `flow` lives in one place —
//! an arena indexed by [`EdgeId`] — so the two incidence lists that reference
//! an edge never disagree about its flow. This is the "arena plus index"
//! pattern for sharing a node from two collections without reference
//! counting or raw pointers.

use error_stack::{Report, Result};
use indexmap::IndexMap;

use crate::error::Error;

/// A vertex identity in the network.
///
/// The two terminal sentinels are distinguished from ordinary vertices by
/// construction rather than by id range, so they can never collide with a
/// pixel voxel's id. Non-terminal identity is carried purely by the `u64`
/// payload; any data a caller wants to associate with that id (such as a
/// pixel's color) is kept in a sibling collection indexed by the same id,
/// not inside `Vertex` itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Vertex {
    /// The flow source, `s`.
    Source,
    /// The flow sink, `t`.
    Sink,
    /// A non-terminal vertex, identified by an id that must be injective
    /// among non-terminals. [`crate::segmentation::Index::id`] is the
    /// canonical way to produce one for a pixel.
    Voxel(u64),
}

type EdgeId = usize;

#[derive(Debug, Clone, Copy)]
struct EdgeRecord {
    source: Vertex,
    destination: Vertex,
    capacity: i64,
    flow: i64,
}

/// A handle to one directed edge in a [`FlowNetwork`].
///
/// Carries copies of the edge's immutable fields (source, destination,
/// capacity) so callers can inspect them without borrowing the network;
/// `flow` is not among them because it is the one field the solver mutates,
/// and is always read through the network that owns it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EdgeRef {
    id: EdgeId,
    source: Vertex,
    destination: Vertex,
    capacity: i64,
}

impl EdgeRef {
    /// The edge's tail.
    pub fn source(&self) -> Vertex {
        self.source
    }

    /// The edge's head.
    pub fn destination(&self) -> Vertex {
        self.destination
    }

    /// The edge's capacity. Immutable for the edge's lifetime.
    pub fn capacity(&self) -> i64 {
        self.capacity
    }
}

/// A directed multigraph of [`Vertex`] connected by capacitated, flow-bearing
/// edges.
///
/// Vertices and edges are created only while building the network; nothing
/// is ever removed. The solver mutates only edge flow.
#[derive(Debug, Default)]
pub struct FlowNetwork {
    edges: Vec<EdgeRecord>,
    out_edges: IndexMap<Vertex, Vec<EdgeId>>,
    in_edges: IndexMap<Vertex, Vec<EdgeId>>,
}

impl FlowNetwork {
    /// Creates an empty network.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a directed edge `source -> destination` with the given
    /// capacity and zero initial flow. Creates empty incidence lists for
    /// either endpoint the first time it is seen. Permits self-loops and
    /// parallel edges; never deduplicates.
    pub fn add_edge(&mut self, source: Vertex, destination: Vertex, capacity: i64) -> EdgeRef {
        let id = self.edges.len();
        self.edges.push(EdgeRecord {
            source,
            destination,
            capacity,
            flow: 0,
        });
        self.out_edges.entry(source).or_default().push(id);
        self.out_edges.entry(destination).or_default();
        self.in_edges.entry(destination).or_default().push(id);
        self.in_edges.entry(source).or_default();
        EdgeRef {
            id,
            source,
            destination,
            capacity,
        }
    }

    fn edge_ref(&self, id: EdgeId) -> EdgeRef {
        let record = &self.edges[id];
        EdgeRef {
            id,
            source: record.source,
            destination: record.destination,
            capacity: record.capacity,
        }
    }

    /// Returns an independently mutable copy of `v`'s outgoing edges, in
    /// insertion order.
    pub fn out_edges(&self, v: Vertex) -> Result<Vec<EdgeRef>, Error> {
        let ids = self
            .out_edges
            .get(&v)
            .ok_or_else(|| Report::new(Error::UnknownVertex))?;
        Ok(ids.iter().map(|&id| self.edge_ref(id)).collect())
    }

    /// Returns an independently mutable copy of `v`'s incoming edges, in
    /// insertion order.
    pub fn in_edges(&self, v: Vertex) -> Result<Vec<EdgeRef>, Error> {
        let ids = self
            .in_edges
            .get(&v)
            .ok_or_else(|| Report::new(Error::UnknownVertex))?;
        Ok(ids.iter().map(|&id| self.edge_ref(id)).collect())
    }

    /// `out_edges(v)` concatenated with `in_edges(v)`, in that order. The
    /// solver relies on this exact order for deterministic BFS tie-breaks.
    pub fn neighbors(&self, v: Vertex) -> Result<Vec<EdgeRef>, Error> {
        let mut edges = self.out_edges(v)?;
        edges.extend(self.in_edges(v)?);
        Ok(edges)
    }

    /// True iff `v` has appeared as the source or destination of any added
    /// edge.
    pub fn contains(&self, v: Vertex) -> bool {
        self.out_edges.contains_key(&v)
    }

    /// The set of known vertices, in first-seen order.
    pub fn vertices(&self) -> impl Iterator<Item = Vertex> + '_ {
        self.out_edges.keys().copied()
    }

    /// Number of distinct vertices known to the network.
    pub fn vertex_count(&self) -> usize {
        self.out_edges.len()
    }

    /// Number of edges added to the network.
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Residual capacity of `e` toward `v`: `capacity - flow` if `v` is the
    /// destination (forward residual), `flow` if `v` is the source
    /// (reverse residual). For a self-loop the forward branch is checked
    /// first.
    pub fn residual_capacity(&self, e: EdgeRef, v: Vertex) -> Result<i64, Error> {
        let record = &self.edges[e.id];
        if v == record.destination {
            Ok(record.capacity - record.flow)
        } else if v == record.source {
            Ok(record.flow)
        } else {
            Err(Report::new(Error::EndpointMismatch))
        }
    }

    /// Adjusts `e`'s flow by `delta >= 0` toward `v`: increases flow if `v`
    /// is the destination, decreases it if `v` is the source. Fails if `v`
    /// is neither endpoint, or if the adjustment would leave flow outside
    /// `[0, capacity]`.
    pub fn add_residual_flow(&mut self, e: EdgeRef, v: Vertex, delta: i64) -> Result<(), Error> {
        debug_assert!(delta >= 0, "residual flow adjustments are non-negative");
        let record = &mut self.edges[e.id];
        let new_flow = if v == record.destination {
            record.flow + delta
        } else if v == record.source {
            record.flow - delta
        } else {
            return Err(Report::new(Error::EndpointMismatch));
        };
        if new_flow < 0 || new_flow > record.capacity {
            return Err(Report::new(Error::InfeasibleDelta));
        }
        record.flow = new_flow;
        Ok(())
    }

    /// Current flow on `e`.
    pub fn flow(&self, e: EdgeRef) -> i64 {
        self.edges[e.id].flow
    }

    /// The endpoint of `e` opposite to `v`. Returns `v` itself for a
    /// self-loop. Fails if `v` is neither endpoint.
    pub fn other(&self, e: EdgeRef, v: Vertex) -> Result<Vertex, Error> {
        let record = &self.edges[e.id];
        if v == record.source {
            Ok(record.destination)
        } else if v == record.destination {
            Ok(record.source)
        } else {
            Err(Report::new(Error::EndpointMismatch))
        }
    }

    /// Net in-flow minus out-flow at `v`: positive means `v` is a net sink
    /// of flow. Used to validate feasibility before the solver runs and to
    /// check conservation afterwards.
    pub fn excess(&self, v: Vertex) -> Result<i64, Error> {
        let out: i64 = self
            .out_edges(v)?
            .iter()
            .map(|e| self.flow(*e))
            .sum();
        let inflow: i64 = self.in_edges(v)?.iter().map(|e| self.flow(*e)).sum();
        Ok(inflow - out)
    }
}
