//! Test utilities and mock collaborators for Tessera development.
//!
//! Provides a configurable [`MockDomain`], an event-recording
//! [`MockMaterials`] store, and kernels for instrumented
//! ([`RecordingKernel`]) and fault-injection ([`FailingKernel`]) tests.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

use std::sync::Arc;

use parking_lot::Mutex;
use tessera_core::{Domain, ElementId, KernelError, MaterialStore, RegionId, WorkerId};
use tessera_kernel::{ElementContext, Kernel};

/// Mock domain built from contiguous region spans.
///
/// `MockDomain::with_spans(&[(0, 10), (1, 10), (2, 10)])` produces a
/// 30-element domain where elements `0..10` lie in region 0, `10..20`
/// in region 1, and `20..30` in region 2. Records every `reinitialize`
/// call for test assertions.
pub struct MockDomain {
    spans: Vec<(RegionId, u64)>,
    total: u64,
    undefined: Vec<(RegionId, String)>,
    reinit_log: Mutex<Vec<(ElementId, WorkerId)>>,
}

impl MockDomain {
    /// Build a domain from `(region, element_count)` spans in element
    /// order. A zero-count span declares a region with no elements.
    pub fn with_spans(spans: &[(u32, u64)]) -> Self {
        let spans: Vec<(RegionId, u64)> = spans.iter().map(|&(r, n)| (RegionId(r), n)).collect();
        let total = spans.iter().map(|&(_, n)| n).sum();
        Self {
            spans,
            total,
            undefined: Vec::new(),
            reinit_log: Mutex::new(Vec::new()),
        }
    }

    /// Build a domain of `regions` regions with `per_region` elements each.
    pub fn uniform(regions: u32, per_region: u64) -> Self {
        let spans: Vec<(u32, u64)> = (0..regions).map(|r| (r, per_region)).collect();
        Self::with_spans(&spans)
    }

    /// Declare a quantity undefined on a region, for exercising the
    /// region-bucket requirement check.
    #[must_use]
    pub fn undefine_quantity(mut self, region: u32, quantity: &str) -> Self {
        self.undefined.push((RegionId(region), quantity.to_string()));
        self
    }

    /// Number of `reinitialize` calls recorded so far.
    pub fn reinit_count(&self) -> usize {
        self.reinit_log.lock().len()
    }

    /// All `(element, worker)` pairs passed to `reinitialize`, in call
    /// order per worker (cross-worker interleaving is unspecified).
    pub fn reinitialized(&self) -> Vec<(ElementId, WorkerId)> {
        self.reinit_log.lock().clone()
    }
}

impl Domain for MockDomain {
    fn element_count(&self) -> u64 {
        self.total
    }

    fn region_of(&self, element: ElementId) -> RegionId {
        let mut offset = 0;
        for &(region, count) in &self.spans {
            if element.0 < offset + count {
                return region;
            }
            offset += count;
        }
        // Past the last span: clamp to the final region.
        self.spans.last().map(|&(r, _)| r).unwrap_or(RegionId(0))
    }

    fn regions(&self) -> Vec<RegionId> {
        let mut regions: Vec<RegionId> = self.spans.iter().map(|&(r, _)| r).collect();
        regions.sort_unstable();
        regions.dedup();
        regions
    }

    fn elements_in(&self, region: RegionId) -> u64 {
        self.spans
            .iter()
            .filter(|&&(r, _)| r == region)
            .map(|&(_, n)| n)
            .sum()
    }

    fn quantity_defined(&self, region: RegionId, quantity: &str) -> bool {
        !self
            .undefined
            .iter()
            .any(|(r, q)| *r == region && q == quantity)
    }

    fn reinitialize(&self, element: ElementId, worker: WorkerId) {
        self.reinit_log.lock().push((element, worker));
    }

    fn dof(&self, element: ElementId) -> usize {
        element.0 as usize
    }

    fn measure(&self, _element: ElementId) -> f64 {
        1.0
    }
}

/// A single recorded material-store event.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MaterialEvent {
    PrepareRegion(RegionId, WorkerId),
    Reinit(ElementId, WorkerId),
    SwapBack(WorkerId),
}

/// Mock material store recording every call for ordering assertions.
#[derive(Default)]
pub struct MockMaterials {
    events: Mutex<Vec<MaterialEvent>>,
}

impl MockMaterials {
    pub fn new() -> Self {
        Self::default()
    }

    /// All recorded events in call order (per worker).
    pub fn events(&self) -> Vec<MaterialEvent> {
        self.events.lock().clone()
    }

    /// Recorded events for one worker only, preserving order.
    pub fn events_for(&self, worker: WorkerId) -> Vec<MaterialEvent> {
        self.events
            .lock()
            .iter()
            .filter(|e| match e {
                MaterialEvent::PrepareRegion(_, w)
                | MaterialEvent::Reinit(_, w)
                | MaterialEvent::SwapBack(w) => *w == worker,
            })
            .cloned()
            .collect()
    }
}

impl MaterialStore for MockMaterials {
    fn prepare_region(&self, region: RegionId, worker: WorkerId) {
        self.events
            .lock()
            .push(MaterialEvent::PrepareRegion(region, worker));
    }

    fn reinit(&self, element: ElementId, worker: WorkerId) {
        self.events.lock().push(MaterialEvent::Reinit(element, worker));
    }

    fn swap_back(&self, worker: WorkerId) {
        self.events.lock().push(MaterialEvent::SwapBack(worker));
    }
}

/// Kernel that records every element it visits and deposits a fixed
/// weight into the element's solution slot.
pub struct RecordingKernel {
    name: String,
    weight: f64,
    required: Option<String>,
    visited: Arc<Mutex<Vec<ElementId>>>,
    prepared: Arc<Mutex<Vec<RegionId>>>,
}

impl RecordingKernel {
    pub fn new(name: &str, weight: f64) -> Self {
        Self {
            name: name.to_string(),
            weight,
            required: None,
            visited: Arc::new(Mutex::new(Vec::new())),
            prepared: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Declare a required quantity, for region-bucket exclusion tests.
    #[must_use]
    pub fn requiring(mut self, quantity: &str) -> Self {
        self.required = Some(quantity.to_string());
        self
    }

    /// Elements visited so far, in visitation order (per worker).
    pub fn visited(&self) -> Vec<ElementId> {
        self.visited.lock().clone()
    }

    /// Regions for which `prepare` fired, in call order.
    pub fn prepared(&self) -> Vec<RegionId> {
        self.prepared.lock().clone()
    }

    /// Shared handle to the visit log, surviving a move into the registry.
    pub fn visit_log(&self) -> Arc<Mutex<Vec<ElementId>>> {
        Arc::clone(&self.visited)
    }
}

impl Kernel for RecordingKernel {
    fn name(&self) -> &str {
        &self.name
    }

    fn required_quantity(&self) -> Option<&str> {
        self.required.as_deref()
    }

    fn prepare(&self, region: RegionId) {
        self.prepared.lock().push(region);
    }

    fn evaluate(&self, ctx: &mut ElementContext<'_>) -> Result<(), KernelError> {
        self.visited.lock().push(ctx.element());
        let slot = ctx.dof();
        let weight = self.weight * ctx.measure();
        ctx.scratch().accumulate(slot, weight);
        Ok(())
    }
}

/// Kernel that succeeds everywhere except one element, where it raises
/// an evaluation failure. Elements before the failure still deposit.
pub struct FailingKernel {
    name: String,
    fail_on: ElementId,
}

impl FailingKernel {
    pub fn new(name: &str, fail_on: ElementId) -> Self {
        Self {
            name: name.to_string(),
            fail_on,
        }
    }
}

impl Kernel for FailingKernel {
    fn name(&self) -> &str {
        &self.name
    }

    fn evaluate(&self, ctx: &mut ElementContext<'_>) -> Result<(), KernelError> {
        if ctx.element() == self.fail_on {
            return Err(KernelError::EvaluationFailed {
                reason: "injected failure".to_string(),
            });
        }
        let slot = ctx.dof();
        ctx.scratch().accumulate(slot, 1.0);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spans_map_elements_to_regions() {
        let domain = MockDomain::with_spans(&[(0, 10), (1, 10), (2, 10)]);
        assert_eq!(domain.element_count(), 30);
        assert_eq!(domain.region_of(ElementId(0)), RegionId(0));
        assert_eq!(domain.region_of(ElementId(9)), RegionId(0));
        assert_eq!(domain.region_of(ElementId(10)), RegionId(1));
        assert_eq!(domain.region_of(ElementId(29)), RegionId(2));
        assert_eq!(domain.elements_in(RegionId(1)), 10);
        assert_eq!(
            domain.regions(),
            vec![RegionId(0), RegionId(1), RegionId(2)]
        );
    }

    #[test]
    fn undefined_quantities_are_region_scoped() {
        let domain = MockDomain::uniform(2, 4).undefine_quantity(1, "temperature");
        assert!(domain.quantity_defined(RegionId(0), "temperature"));
        assert!(!domain.quantity_defined(RegionId(1), "temperature"));
        assert!(domain.quantity_defined(RegionId(1), "pressure"));
    }
}
