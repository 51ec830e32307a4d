//! Collaborator traits at the engine's boundaries.
//!
//! The mesh/geometry structure and material evaluation live outside
//! this workspace; the engine sees them only through [`Domain`] and
//! [`MaterialStore`]. Both are used as trait objects and must be safe
//! to share across the worker pool.

use crate::id::{ElementId, RegionId, WorkerId};

/// The partitioned spatial domain, treated as a black box.
///
/// Supplies each element's region id, the set of regions, and the
/// per-element reinitialization hook invoked before kernel evaluation.
/// Implementations must be side-effect-isolated per `(element, worker)`:
/// concurrent calls with distinct worker ids may not interfere.
pub trait Domain: Send + Sync {
    /// Total number of elements in the domain. Element ids are dense:
    /// `0..element_count()`.
    fn element_count(&self) -> u64;

    /// The region containing `element`. Every element belongs to
    /// exactly one region.
    fn region_of(&self, element: ElementId) -> RegionId;

    /// All region ids of the decomposition, ascending.
    fn regions(&self) -> Vec<RegionId>;

    /// Number of elements in `region`. Zero means a restriction naming
    /// this region is vacuous.
    fn elements_in(&self, region: RegionId) -> u64;

    /// Whether a named physical quantity is defined on `region`.
    ///
    /// Consulted when rebuilding region buckets: a kernel whose
    /// required quantity is undefined on a region is excluded from that
    /// region's bucket. Defaults to everything-defined-everywhere.
    fn quantity_defined(&self, _region: RegionId, _quantity: &str) -> bool {
        true
    }

    /// Prepare per-element local state (geometry, shape data) for the
    /// given worker. Called once per element before the kernel loop.
    fn reinitialize(&self, element: ElementId, worker: WorkerId);

    /// Global solution slot for `element`'s contribution.
    fn dof(&self, element: ElementId) -> usize;

    /// Geometric measure (length/area/volume) of `element`.
    fn measure(&self, element: ElementId) -> f64;
}

/// Material and auxiliary-variable state, prepared per region and
/// swapped in and out around each element's kernel loop.
///
/// All methods default to no-ops so domains without material state can
/// pass a unit implementation.
pub trait MaterialStore: Send + Sync {
    /// Pre-fetch material properties for a region, once per region
    /// crossing rather than once per element.
    fn prepare_region(&self, _region: RegionId, _worker: WorkerId) {}

    /// Bring material state up to date for one element, before its
    /// kernel loop runs.
    fn reinit(&self, _element: ElementId, _worker: WorkerId) {}

    /// Restore material state after an element's kernel loop.
    fn swap_back(&self, _worker: WorkerId) {}
}

/// A material store with no state. Useful when kernels do not consume
/// material properties.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoMaterials;

impl MaterialStore for NoMaterials {}
