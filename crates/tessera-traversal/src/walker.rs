//! The traversal lifecycle trait.

use tessera_core::{ElementId, RegionId, TraversalError, WorkerId};

/// Lifecycle hooks driven by the traversal engine over one leaf task.
///
/// A walker is forked when a task splits (the splitting constructor
/// pattern: the parent keeps itself, the new sibling gets the fork) and
/// siblings are merged through [`join`](Self::join) when both complete.
///
/// # Hook ordering within one leaf
///
/// `on_leaf_begin` → (`on_region_changed` before the first element of
/// each region crossing) → `on_element` per element in range order →
/// `post_traversal`. Cross-leaf interleaving is unspecified.
///
/// # Joining
///
/// For walkers whose contributions are committed as they go (e.g.
/// [`KernelDispatch`](crate::KernelDispatch)), `join` is structurally a
/// no-op — the default body. Accumulating walkers (norms, reductions)
/// override it to merge the sibling's partial result; the engine calls
/// it uniformly either way.
pub trait ElementWalker: Send {
    /// Splitting constructor: produce the sibling walker for the other
    /// half of a split task. Shared references are copied; per-task
    /// mutable state starts fresh.
    fn fork(&self) -> Self
    where
        Self: Sized;

    /// Fired once when a leaf task starts executing, with the id of
    /// the worker that owns it for the leaf's lifetime.
    fn on_leaf_begin(&mut self, _worker: WorkerId) {}

    /// Fired whenever the leaf crosses into a new region, before that
    /// region's first element.
    fn on_region_changed(&mut self, _region: RegionId) -> Result<(), TraversalError> {
        Ok(())
    }

    /// Fired once per element in traversal order.
    fn on_element(&mut self, element: ElementId) -> Result<(), TraversalError>;

    /// Fired once per leaf after its last element (also on the abort
    /// path), releasing thread-local bindings so they do not leak into
    /// the next phase.
    fn post_traversal(&mut self) {}

    /// Merge a completed sibling into `self`. Default: no-op.
    fn join(&mut self, _sibling: Self)
    where
        Self: Sized,
    {
    }
}
