//! Reference kernel types: a lumped diffusion operator, a volumetric
//! source, and a quantity-gated reaction term.
//!
//! Each module exposes its kernel struct plus a `register` function
//! that installs the type's constructor and canonical defaults into a
//! [`KernelRegistry`](tessera_registry::KernelRegistry).
//! [`register_builtins`] installs all three.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

mod diffusion;
mod reaction;
mod source;

pub use diffusion::DiffusionKernel;
pub use reaction::ReactionKernel;
pub use source::SourceKernel;

use tessera_registry::KernelRegistry;

/// Register every built-in kernel type: `"Diffusion"`, `"Source"`, and
/// `"Reaction"`.
pub fn register_builtins(registry: &mut KernelRegistry) {
    diffusion::register(registry);
    source::register(registry);
    reaction::register(registry);
}
