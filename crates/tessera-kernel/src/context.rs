//! Evaluation context passed to kernels during traversal.

use crate::scratch::ElementScratch;
use tessera_core::{Domain, ElementId, RegionId, WorkerId};

/// Execution context for one `Kernel::evaluate()` call.
///
/// Identifies the element under evaluation, exposes the domain
/// collaborator for geometric lookups, and hands out the worker's
/// scratch buffer for contribution writes. Uses dynamic dispatch
/// (`&dyn Domain`) to keep the kernel trait object-safe and to allow
/// mock-based testing.
pub struct ElementContext<'a> {
    element: ElementId,
    region: RegionId,
    worker: WorkerId,
    domain: &'a dyn Domain,
    scratch: &'a mut ElementScratch,
}

impl<'a> ElementContext<'a> {
    /// Construct a new element context.
    ///
    /// Typically called by the traversal engine, not by kernels. For
    /// testing, construct with a mock domain from `tessera-test-utils`.
    pub fn new(
        element: ElementId,
        region: RegionId,
        worker: WorkerId,
        domain: &'a dyn Domain,
        scratch: &'a mut ElementScratch,
    ) -> Self {
        Self {
            element,
            region,
            worker,
            domain,
            scratch,
        }
    }

    /// The element under evaluation.
    pub fn element(&self) -> ElementId {
        self.element
    }

    /// Region containing the current element.
    pub fn region(&self) -> RegionId {
        self.region
    }

    /// Worker executing this evaluation.
    pub fn worker(&self) -> WorkerId {
        self.worker
    }

    /// The domain collaborator, already reinitialized for this element.
    pub fn domain(&self) -> &dyn Domain {
        self.domain
    }

    /// Global solution slot for the current element.
    pub fn dof(&self) -> usize {
        self.domain.dof(self.element)
    }

    /// Geometric measure of the current element.
    pub fn measure(&self) -> f64 {
        self.domain.measure(self.element)
    }

    /// Thread-local scratch buffer for contribution writes.
    pub fn scratch(&mut self) -> &mut ElementScratch {
        self.scratch
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tessera_core::WorkerId;

    struct TwoRegionLine;

    impl Domain for TwoRegionLine {
        fn element_count(&self) -> u64 {
            4
        }
        fn region_of(&self, element: ElementId) -> RegionId {
            RegionId((element.0 / 2) as u32)
        }
        fn regions(&self) -> Vec<RegionId> {
            vec![RegionId(0), RegionId(1)]
        }
        fn elements_in(&self, region: RegionId) -> u64 {
            if region.0 < 2 {
                2
            } else {
                0
            }
        }
        fn reinitialize(&self, _element: ElementId, _worker: WorkerId) {}
        fn dof(&self, element: ElementId) -> usize {
            element.0 as usize
        }
        fn measure(&self, _element: ElementId) -> f64 {
            0.5
        }
    }

    #[test]
    fn context_exposes_element_state_and_scratch() {
        let domain = TwoRegionLine;
        let mut scratch = ElementScratch::new();
        let mut ctx = ElementContext::new(
            ElementId(3),
            RegionId(1),
            WorkerId(0),
            &domain,
            &mut scratch,
        );

        assert_eq!(ctx.element(), ElementId(3));
        assert_eq!(ctx.region(), RegionId(1));
        assert_eq!(ctx.dof(), 3);
        assert_eq!(ctx.measure(), 0.5);

        let slot = ctx.dof();
        ctx.scratch().accumulate(slot, 2.0);
        assert_eq!(scratch.entries(), &[(3, 2.0)]);
    }
}
