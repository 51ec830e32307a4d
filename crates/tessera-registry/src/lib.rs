//! Kernel type registry and per-worker active-set index for Tessera.
//!
//! [`KernelRegistry`] turns a registered type name and a parameter bag
//! into a runnable kernel instance, and maintains the derived
//! per-(worker, region) view of which instances apply where.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

mod active_set;
mod registry;

pub use active_set::ActiveSetView;
pub use registry::KernelRegistry;
