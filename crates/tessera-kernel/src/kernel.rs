//! The [`Kernel`] trait and the registry-facing constructor aliases.

use crate::context::ElementContext;
use std::sync::Arc;
use tessera_core::{Domain, KernelError, ParameterSet, RegionId};

/// A pluggable computational unit active on some or all of the domain.
///
/// # Contract
///
/// - `evaluate()` MUST be deterministic for fixed element state: the
///   split-invariance of a traversal depends on it.
/// - `&self` — kernel instances are stateless across elements; mutable
///   per-element results go through the context's scratch buffer.
/// - One instance is built per worker; the engine never shares a call
///   across workers, but instances live in `Arc`s because a worker's
///   "all" bucket and region buckets alias the same instance.
///
/// # Object safety
///
/// This trait is object-safe; the registry stores kernels as
/// `Arc<dyn Kernel>`.
///
/// # Examples
///
/// A kernel that deposits a constant per unit measure:
///
/// ```
/// use tessera_kernel::{ElementContext, Kernel};
/// use tessera_core::KernelError;
///
/// struct ConstantLoad {
///     name: String,
///     rate: f64,
/// }
///
/// impl Kernel for ConstantLoad {
///     fn name(&self) -> &str { &self.name }
///
///     fn evaluate(&self, ctx: &mut ElementContext<'_>) -> Result<(), KernelError> {
///         let slot = ctx.dof();
///         let weight = ctx.measure();
///         ctx.scratch().accumulate(slot, self.rate * weight);
///         Ok(())
///     }
/// }
/// ```
pub trait Kernel: Send + Sync + 'static {
    /// Instance name, used in failure attribution and logging.
    fn name(&self) -> &str;

    /// Physical quantity this kernel requires, if any.
    ///
    /// A kernel is excluded from a region's bucket when its required
    /// quantity is undefined on that region. Default: no requirement.
    fn required_quantity(&self) -> Option<&str> {
        None
    }

    /// Region-setup hook, fired once per region crossing per leaf task
    /// before the region's first element. Default: no-op.
    fn prepare(&self, _region: RegionId) {}

    /// Compute this kernel's contribution for one element.
    ///
    /// Writes go into the context's thread-local scratch; the engine
    /// commits them under the aggregator lock after every active kernel
    /// has run. Returning an error aborts the traversal cooperatively.
    fn evaluate(&self, ctx: &mut ElementContext<'_>) -> Result<(), KernelError>;
}

impl std::fmt::Debug for dyn Kernel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Kernel").field("name", &self.name()).finish()
    }
}

/// Everything a kernel constructor receives: the resolved instance
/// name, the domain collaborator, and the finished parameter bag.
pub struct KernelBuild {
    /// Instance name chosen by the caller (distinct from the type name).
    pub instance_name: String,
    /// The domain the kernel will run over.
    pub domain: Arc<dyn Domain>,
    /// Resolved parameters, defaults already applied.
    pub parameters: ParameterSet,
}

/// Constructor closure registered for a kernel type.
pub type KernelCtor = Box<dyn Fn(KernelBuild) -> Arc<dyn Kernel> + Send + Sync>;

/// Default-parameter provider registered for a kernel type. Returns a
/// fresh canonical defaults object on every call.
pub type KernelDefaults = Box<dyn Fn() -> ParameterSet + Send + Sync>;
