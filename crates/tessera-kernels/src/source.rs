//! Volumetric source kernel.

use std::sync::Arc;

use tessera_core::{KernelError, ParamValue, ParameterSet};
use tessera_kernel::{ElementContext, Kernel, KernelBuild};
use tessera_registry::KernelRegistry;

/// Constant volumetric source term.
///
/// Deposits `rate * measure(element)` into the element's solution slot.
/// Typically attached with a region restriction so the forcing applies
/// only where the physics says it should.
pub struct SourceKernel {
    name: String,
    rate: f64,
}

impl SourceKernel {
    /// Create a source kernel with the given volumetric rate.
    pub fn new(name: impl Into<String>, rate: f64) -> Self {
        Self {
            name: name.into(),
            rate,
        }
    }
}

impl Kernel for SourceKernel {
    fn name(&self) -> &str {
        &self.name
    }

    fn evaluate(&self, ctx: &mut ElementContext<'_>) -> Result<(), KernelError> {
        let contribution = self.rate * ctx.measure();
        if !contribution.is_finite() {
            return Err(KernelError::EvaluationFailed {
                reason: format!(
                    "non-finite source contribution on element {}",
                    ctx.element()
                ),
            });
        }
        let slot = ctx.dof();
        ctx.scratch().accumulate(slot, contribution);
        Ok(())
    }
}

/// Register the `"Source"` type. Default `rate` is `1.0`.
pub fn register(registry: &mut KernelRegistry) {
    registry.register(
        "Source",
        Box::new(|build: KernelBuild| {
            Arc::new(SourceKernel {
                name: build.instance_name,
                rate: build.parameters.real("rate").unwrap_or(1.0),
            }) as Arc<dyn Kernel>
        }),
        Box::new(|| ParameterSet::new().with("rate", ParamValue::Real(1.0))),
    );
}
