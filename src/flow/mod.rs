//! The flow-network data structure and the max-flow / min-cut solver.
//!
//! These two pieces only know about directed capacitated graphs — nothing
//! here is aware of pixels, seeds, or intensities. [`crate::segmentation`]
//! is the only caller that gives them segmentation-specific meaning.

mod network;
mod solver;

pub use network::{EdgeRef, FlowNetwork, Vertex};
pub use solver::MaxFlowSolver;
