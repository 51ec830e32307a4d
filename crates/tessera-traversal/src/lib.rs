//! Fork-join element traversal and synchronized state aggregation.
//!
//! [`TraversalEngine`] splits an ordered element range into a binary
//! task tree over a fixed worker pool, drives the [`ElementWalker`]
//! lifecycle hooks on each leaf, and joins sibling results bottom-up.
//! [`KernelDispatch`] is the walker that resolves active kernels per
//! `(worker, region)` and commits their contributions through the
//! [`SharedSolution`] aggregator.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

mod dispatch;
mod engine;
mod range;
mod solution;
mod walker;

pub use dispatch::{execute_phase, KernelDispatch};
pub use engine::{EngineConfig, TraversalEngine};
pub use range::ElementRange;
pub use solution::SharedSolution;
pub use walker::ElementWalker;
