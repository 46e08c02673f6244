//! Error kinds surfaced by the flow network, the solver and the segmentation
//! builder.
//!
//! Follows the shape used throughout the algorithms in this crate's lineage:
//! a plain enum, a hand-written [`Display`] impl, and an [`error_stack::Context`]
//! impl so call sites can return `error_stack::Result<T, Error>` and attach
//! context as errors propagate.

use core::fmt::{self, Display, Formatter};

use error_stack::Context;

/// Everything that can go wrong while building or solving a flow network.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// The raster passed to [`segment`](crate::segmentation::segment) has zero
    /// rows or zero columns.
    InvalidRaster,
    /// One of the two seed sets passed to
    /// [`segment`](crate::segmentation::segment) is empty.
    EmptySeeds,
    /// A vertex was asked about that the network has never seen.
    UnknownVertex,
    /// An edge operation was given a vertex that is neither its source nor
    /// its destination.
    EndpointMismatch,
    /// Adjusting an edge's flow by the requested amount would drive it
    /// outside `[0, capacity]`.
    InfeasibleDelta,
    /// The solver was asked to run with `source == destination`.
    SourceEqualsSink,
    /// The network's starting flow does not satisfy the solver's
    /// feasibility preconditions (capacity bounds, conservation at
    /// non-terminal vertices).
    InitialFlowInfeasible,
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidRaster => f.write_str("raster has empty rows or columns"),
            Self::EmptySeeds => f.write_str("object or background seed set is empty"),
            Self::UnknownVertex => f.write_str("vertex is not present in the flow network"),
            Self::EndpointMismatch => {
                f.write_str("vertex is neither the source nor the destination of the edge")
            }
            Self::InfeasibleDelta => {
                f.write_str("flow adjustment would violate 0 <= flow <= capacity")
            }
            Self::SourceEqualsSink => f.write_str("solver source and sink must differ"),
            Self::InitialFlowInfeasible => {
                f.write_str("initial flow is infeasible: capacity or conservation violated")
            }
        }
    }
}

impl Context for Error {}
