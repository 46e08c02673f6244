//! **imcut** partitions a color raster into object and background regions
//! from two operator-supplied seed sets, by minimizing a regional +
//! boundary energy with an exact minimum s-t cut.
//!
//! The crate is organized the way the underlying algorithm is layered:
//!
//! * [`flow`] — a directed, capacitated flow network with residual-capacity
//!   semantics ([`flow::FlowNetwork`]), and a shortest-augmenting-path
//!   max-flow / min-cut solver ([`flow::MaxFlowSolver`]). Neither knows
//!   anything about pixels.
//! * [`segmentation`] — maps a pixel grid and two seed sets onto a
//!   [`flow::FlowNetwork`] (boundary n-links, regional t-links, seed
//!   anchors) and reads the object mask back out of its minimum cut. See
//!   [`segmentation::segment`].
//!
//! ```
//! use std::collections::HashSet;
//! use imcut::segmentation::{segment, Index, Pixel};
//!
//! let white = Pixel::new(255, 255, 255);
//! let black = Pixel::new(0, 0, 0);
//! let pixels = vec![
//!     vec![black, white],
//!     vec![white, white],
//! ];
//! let seed_obj: HashSet<Index> = [Index::new(0, 0)].into_iter().collect();
//! let seed_bkg: HashSet<Index> = [Index::new(1, 1)].into_iter().collect();
//! let object = segment(&pixels, &seed_obj, &seed_bkg).unwrap();
//! assert!(object.contains(&Index::new(0, 0)));
//! ```

pub mod error;
pub mod flow;
pub mod segmentation;

pub use error::Error;
