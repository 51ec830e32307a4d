//! The kernel-dispatch walker and the compute-phase entry point.

use std::sync::Arc;

use tessera_core::{
    Domain, ElementId, MaterialStore, RegionId, TraversalError, WorkerId,
};
use tessera_kernel::{ElementContext, ElementScratch};
use tessera_registry::KernelRegistry;

use crate::engine::TraversalEngine;
use crate::range::ElementRange;
use crate::solution::SharedSolution;
use crate::walker::ElementWalker;

/// Walker that executes the active kernel set on each element and
/// commits the results through the shared aggregator.
///
/// Per element: resolve the `(worker, region)` kernel list (no-op when
/// empty), reinitialize the domain's local element state, bracket the
/// kernel loop with material reinit/swap-back, evaluate each kernel
/// into thread-local scratch, then commit the scratch under the
/// aggregator's lock. The critical section covers only the commit,
/// never the compute step.
pub struct KernelDispatch<'a> {
    registry: &'a KernelRegistry,
    domain: &'a dyn Domain,
    materials: &'a dyn MaterialStore,
    solution: &'a SharedSolution,
    scratch: ElementScratch,
    worker: WorkerId,
}

impl<'a> KernelDispatch<'a> {
    /// Construct a dispatch walker over an already-recomputed registry.
    pub fn new(
        registry: &'a KernelRegistry,
        domain: &'a dyn Domain,
        materials: &'a dyn MaterialStore,
        solution: &'a SharedSolution,
    ) -> Self {
        Self {
            registry,
            domain,
            materials,
            solution,
            scratch: ElementScratch::new(),
            worker: WorkerId(0),
        }
    }
}

impl ElementWalker for KernelDispatch<'_> {
    fn fork(&self) -> Self {
        Self {
            registry: self.registry,
            domain: self.domain,
            materials: self.materials,
            solution: self.solution,
            scratch: ElementScratch::new(),
            worker: self.worker,
        }
    }

    fn on_leaf_begin(&mut self, worker: WorkerId) {
        self.worker = worker;
    }

    fn on_region_changed(&mut self, region: RegionId) -> Result<(), TraversalError> {
        // Once per region, not per element: kernel region setup and the
        // material prefetch for the quantities the active set requires.
        for kernel in self.registry.region_kernels(self.worker, region) {
            kernel.prepare(region);
        }
        self.materials.prepare_region(region, self.worker);
        Ok(())
    }

    fn on_element(&mut self, element: ElementId) -> Result<(), TraversalError> {
        let registry = self.registry;
        let domain = self.domain;
        let materials = self.materials;
        let worker = self.worker;

        let region = domain.region_of(element);
        let kernels = registry.region_kernels(worker, region);
        if kernels.is_empty() {
            return Ok(());
        }

        domain.reinitialize(element, worker);
        materials.reinit(element, worker);

        self.scratch.clear();
        let mut ctx = ElementContext::new(element, region, worker, domain, &mut self.scratch);
        for kernel in kernels {
            if let Err(reason) = kernel.evaluate(&mut ctx) {
                materials.swap_back(worker);
                return Err(TraversalError::KernelFailed {
                    kernel: kernel.name().to_string(),
                    element,
                    reason,
                });
            }
        }
        materials.swap_back(worker);

        self.solution.commit(&self.scratch);
        Ok(())
    }

    fn post_traversal(&mut self) {
        self.scratch.clear();
    }
}

/// Run one compute phase: refresh stale active-set views, then traverse
/// `range` with a [`KernelDispatch`] walker.
///
/// Takes the registry exclusively, so no recompute can race an
/// in-flight traversal; the parallel section borrows it shared.
pub fn execute_phase(
    engine: &TraversalEngine,
    registry: &mut KernelRegistry,
    materials: &dyn MaterialStore,
    solution: &SharedSolution,
    range: ElementRange,
) -> Result<(), TraversalError> {
    debug_assert_eq!(
        engine.worker_count(),
        registry.worker_count(),
        "registry must be sized for the engine's pool"
    );
    registry.recompute_stale();

    let domain = Arc::clone(registry.domain());
    let walker = KernelDispatch::new(registry, domain.as_ref(), materials, solution);
    engine.run(domain.as_ref(), range, walker)?;
    Ok(())
}
