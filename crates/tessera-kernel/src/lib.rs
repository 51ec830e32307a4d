//! Kernel trait and element evaluation context for Tessera.
//!
//! A [`Kernel`] is a pluggable computational unit contributing values
//! to the global solution at each element it is active on. Kernels are
//! evaluated with an [`ElementContext`] and write into a thread-local
//! [`ElementScratch`] buffer; the traversal engine commits the scratch
//! into shared state afterwards.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

mod context;
mod kernel;
mod scratch;

pub use context::ElementContext;
pub use kernel::{Kernel, KernelBuild, KernelCtor, KernelDefaults};
pub use scratch::ElementScratch;
