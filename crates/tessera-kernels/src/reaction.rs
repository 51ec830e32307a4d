//! First-order reaction kernel, gated on a named quantity.

use std::sync::Arc;

use tessera_core::{KernelError, ParamValue, ParameterSet};
use tessera_kernel::{ElementContext, Kernel, KernelBuild};
use tessera_registry::KernelRegistry;

/// Lumped first-order reaction (decay) term.
///
/// Deposits `-coefficient * measure(element)` into the element's slot.
/// Declares a required quantity, so the active-set rebuild drops it
/// from any region where that quantity is undefined instead of letting
/// it evaluate against missing state.
pub struct ReactionKernel {
    name: String,
    coefficient: f64,
    quantity: String,
}

impl ReactionKernel {
    /// Create a reaction kernel consuming the named quantity.
    pub fn new(name: impl Into<String>, coefficient: f64, quantity: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            coefficient,
            quantity: quantity.into(),
        }
    }
}

impl Kernel for ReactionKernel {
    fn name(&self) -> &str {
        &self.name
    }

    fn required_quantity(&self) -> Option<&str> {
        Some(&self.quantity)
    }

    fn evaluate(&self, ctx: &mut ElementContext<'_>) -> Result<(), KernelError> {
        // The rebuild keeps this kernel out of regions lacking the
        // quantity; seeing one here means the view is out of date.
        if !ctx.domain().quantity_defined(ctx.region(), &self.quantity) {
            return Err(KernelError::UndefinedQuantity {
                quantity: self.quantity.clone(),
            });
        }
        let slot = ctx.dof();
        let contribution = -self.coefficient * ctx.measure();
        ctx.scratch().accumulate(slot, contribution);
        Ok(())
    }
}

/// Register the `"Reaction"` type. Defaults: `coefficient` `1.0`,
/// `quantity` `"concentration"`.
pub fn register(registry: &mut KernelRegistry) {
    registry.register(
        "Reaction",
        Box::new(|build: KernelBuild| {
            Arc::new(ReactionKernel {
                name: build.instance_name,
                coefficient: build.parameters.real("coefficient").unwrap_or(1.0),
                quantity: build
                    .parameters
                    .text("quantity")
                    .unwrap_or("concentration")
                    .to_string(),
            }) as Arc<dyn Kernel>
        }),
        Box::new(|| {
            ParameterSet::new()
                .with("coefficient", ParamValue::Real(1.0))
                .with("quantity", ParamValue::Text("concentration".into()))
        }),
    );
}
