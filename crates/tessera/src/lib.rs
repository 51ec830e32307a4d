//! Tessera: a plugin-based numerical kernel dispatch engine for
//! domain-decomposed computation.
//!
//! This is the top-level facade crate that re-exports the public API
//! from all Tessera sub-crates. For most users, adding `tessera` as a
//! single dependency is sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use std::sync::Arc;
//! use tessera::prelude::*;
//!
//! // An 8-element, single-region domain.
//! struct Bar;
//! impl Domain for Bar {
//!     fn element_count(&self) -> u64 { 8 }
//!     fn region_of(&self, _element: ElementId) -> RegionId { RegionId(0) }
//!     fn regions(&self) -> Vec<RegionId> { vec![RegionId(0)] }
//!     fn elements_in(&self, region: RegionId) -> u64 {
//!         if region == RegionId(0) { 8 } else { 0 }
//!     }
//!     fn reinitialize(&self, _element: ElementId, _worker: WorkerId) {}
//!     fn dof(&self, element: ElementId) -> usize { element.0 as usize }
//!     fn measure(&self, _element: ElementId) -> f64 { 1.0 }
//! }
//!
//! // Register the built-in kernel types and attach a unit-diffusivity
//! // instance to each worker.
//! let mut registry = KernelRegistry::new(2, Arc::new(Bar));
//! tessera::kernels::register_builtins(&mut registry);
//! for worker in 0..2 {
//!     let diffusion = registry
//!         .build("Diffusion", "diffusion", ParameterSet::new())
//!         .unwrap();
//!     registry.attach(WorkerId(worker), diffusion, None);
//! }
//!
//! // Run one compute phase over the whole domain.
//! let engine = TraversalEngine::new(EngineConfig { workers: 2, grain: 2 }).unwrap();
//! let solution = SharedSolution::zeroed(8);
//! execute_phase(
//!     &engine,
//!     &mut registry,
//!     &NoMaterials,
//!     &solution,
//!     ElementRange::new(0, 8),
//! )
//! .unwrap();
//! assert_eq!(solution.into_values(), vec![1.0; 8]);
//! ```
//!
//! # Modules
//!
//! Each module corresponds to a sub-crate. Use them for types not in
//! the prelude:
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `tessera-core` | Ids, parameter bags, errors, collaborator traits |
//! | [`kernel`] | `tessera-kernel` | The `Kernel` trait, evaluation context, scratch buffer |
//! | [`registry`] | `tessera-registry` | Type registry and per-worker active-set index |
//! | [`traversal`] | `tessera-traversal` | Fork-join traversal engine and shared aggregator |
//! | [`kernels`] | `tessera-kernels` | Reference kernels (diffusion, source, reaction) |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Core ids, parameter bags, errors, and collaborator traits
/// (`tessera-core`).
pub use tessera_core as types;

/// The `Kernel` trait, element context, and scratch buffer
/// (`tessera-kernel`).
pub use tessera_kernel as kernel;

/// Kernel type registry and per-worker active-set index
/// (`tessera-registry`).
pub use tessera_registry as registry;

/// Fork-join element traversal and the synchronized aggregator
/// (`tessera-traversal`).
pub use tessera_traversal as traversal;

/// Reference kernel types and their registration functions
/// (`tessera-kernels`).
pub use tessera_kernels as kernels;

/// The most commonly used types, re-exported flat.
///
/// ```rust
/// use tessera::prelude::*;
/// ```
pub mod prelude {
    pub use tessera_core::{
        Domain, ElementId, EngineError, KernelError, MaterialStore, NoMaterials, ParamValue,
        ParameterSet, RegionId, RegistryError, TraversalError, WorkerId,
    };
    pub use tessera_kernel::{ElementContext, ElementScratch, Kernel, KernelBuild};
    pub use tessera_registry::{ActiveSetView, KernelRegistry};
    pub use tessera_traversal::{
        execute_phase, ElementRange, ElementWalker, EngineConfig, KernelDispatch, SharedSolution,
        TraversalEngine,
    };
}
