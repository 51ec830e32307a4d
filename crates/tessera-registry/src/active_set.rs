//! The per-worker derived view of applicable kernels.
//!
//! An [`ActiveSetView`] is a cache rebuilt on demand from one worker's
//! authoritative instance list. It is consistent with the instance list
//! and region restrictions as of the last recompute, becomes stale on
//! any attach, and must not be trusted until recomputed.

use indexmap::IndexMap;
use std::sync::Arc;
use tessera_core::{Domain, RegionId};
use tessera_kernel::Kernel;

const EMPTY: &[Arc<dyn Kernel>] = &[];

/// One worker's attached instance with its optional region restriction.
pub(crate) struct Attached {
    pub(crate) kernel: Arc<dyn Kernel>,
    pub(crate) restriction: Option<RegionId>,
}

/// Derived per-(worker, region) kernel buckets.
///
/// A region's bucket holds every unrestricted instance plus the
/// instances restricted to that region, minus any instance whose
/// required quantity is undefined on the region. The union of all
/// region buckets plus the unrestricted bucket is exactly the worker's
/// full instance list — no duplicates, no omissions.
pub struct ActiveSetView {
    all: Vec<Arc<dyn Kernel>>,
    unrestricted: Vec<Arc<dyn Kernel>>,
    by_region: IndexMap<RegionId, Vec<Arc<dyn Kernel>>>,
    stale: bool,
}

impl ActiveSetView {
    pub(crate) fn new() -> Self {
        Self {
            all: Vec::new(),
            unrestricted: Vec::new(),
            by_region: IndexMap::new(),
            stale: false,
        }
    }

    /// Every instance attached to this worker, in attach order.
    pub fn all(&self) -> &[Arc<dyn Kernel>] {
        &self.all
    }

    /// Instances with no region restriction, in attach order.
    pub fn unrestricted(&self) -> &[Arc<dyn Kernel>] {
        &self.unrestricted
    }

    /// Instances applicable to `region`: unrestricted ones plus those
    /// restricted to it. Empty when no instance applies.
    pub fn region(&self, region: RegionId) -> &[Arc<dyn Kernel>] {
        self.by_region
            .get(&region)
            .map(Vec::as_slice)
            .unwrap_or(EMPTY)
    }

    /// Whether the view has been invalidated since its last rebuild.
    pub fn is_stale(&self) -> bool {
        self.stale
    }

    pub(crate) fn mark_stale(&mut self) {
        self.stale = true;
    }

    /// Rebuild every bucket from the authoritative instance list.
    ///
    /// Cost is linear in the instance count per region. A kernel whose
    /// required quantity is undefined on a region is left out of that
    /// region's bucket, unrestricted or not.
    pub(crate) fn rebuild(&mut self, instances: &[Attached], domain: &dyn Domain) {
        self.all.clear();
        self.unrestricted.clear();
        self.by_region.clear();

        for attached in instances {
            self.all.push(Arc::clone(&attached.kernel));
            if attached.restriction.is_none() {
                self.unrestricted.push(Arc::clone(&attached.kernel));
            }
        }

        for region in domain.regions() {
            let mut bucket: Vec<Arc<dyn Kernel>> = Vec::new();
            for attached in instances {
                let applies = match attached.restriction {
                    None => true,
                    Some(restricted_to) => restricted_to == region,
                };
                if !applies {
                    continue;
                }
                if let Some(quantity) = attached.kernel.required_quantity() {
                    if !domain.quantity_defined(region, quantity) {
                        continue;
                    }
                }
                bucket.push(Arc::clone(&attached.kernel));
            }
            if !bucket.is_empty() {
                self.by_region.insert(region, bucket);
            }
        }

        self.stale = false;
    }
}
