//! Core types and traits for the Tessera dispatch engine.
//!
//! This is the leaf crate with zero internal dependencies. It defines
//! the fundamental abstractions used throughout the Tessera workspace:
//! strongly-typed ids, the typed parameter bag, error types, and the
//! external-collaborator traits.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

mod error;
mod id;
mod params;
mod traits;

pub use error::{EngineError, KernelError, RegistryError, TraversalError};
pub use id::{ElementId, RegionId, WorkerId};
pub use params::{ParamValue, ParameterSet};
pub use traits::{Domain, MaterialStore, NoMaterials};
