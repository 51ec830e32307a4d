//! Lumped diffusion kernel.

use std::sync::Arc;

use tessera_core::{KernelError, ParamValue, ParameterSet};
use tessera_kernel::{ElementContext, Kernel, KernelBuild};
use tessera_registry::KernelRegistry;

/// Diagonal-lumped diffusion operator.
///
/// Deposits `diffusivity * measure(element)` into the element's
/// solution slot: the row-sum-lumped stiffness contribution of an
/// isotropic diffusion term. Rejects non-finite coefficients at
/// evaluation time rather than silently poisoning the buffer.
pub struct DiffusionKernel {
    name: String,
    diffusivity: f64,
}

impl DiffusionKernel {
    /// Create a diffusion kernel with the given coefficient.
    pub fn new(name: impl Into<String>, diffusivity: f64) -> Self {
        Self {
            name: name.into(),
            diffusivity,
        }
    }
}

impl Kernel for DiffusionKernel {
    fn name(&self) -> &str {
        &self.name
    }

    fn evaluate(&self, ctx: &mut ElementContext<'_>) -> Result<(), KernelError> {
        let contribution = self.diffusivity * ctx.measure();
        if !contribution.is_finite() {
            return Err(KernelError::EvaluationFailed {
                reason: format!(
                    "non-finite diffusion contribution on element {}",
                    ctx.element()
                ),
            });
        }
        let slot = ctx.dof();
        ctx.scratch().accumulate(slot, contribution);
        Ok(())
    }
}

/// Register the `"Diffusion"` type. Default `diffusivity` is `1.0`.
pub fn register(registry: &mut KernelRegistry) {
    registry.register(
        "Diffusion",
        Box::new(|build: KernelBuild| {
            Arc::new(DiffusionKernel {
                name: build.instance_name,
                diffusivity: build.parameters.real("diffusivity").unwrap_or(1.0),
            }) as Arc<dyn Kernel>
        }),
        Box::new(|| ParameterSet::new().with("diffusivity", ParamValue::Real(1.0))),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use tessera_core::{ElementId, RegionId, WorkerId};
    use tessera_kernel::ElementScratch;
    use tessera_test_utils::MockDomain;

    #[test]
    fn deposits_coefficient_times_measure() {
        let domain = MockDomain::uniform(1, 4);
        let kernel = DiffusionKernel::new("diff0", 2.5);
        let mut scratch = ElementScratch::new();
        let mut ctx = ElementContext::new(
            ElementId(3),
            RegionId(0),
            WorkerId(0),
            &domain,
            &mut scratch,
        );

        kernel.evaluate(&mut ctx).unwrap();
        // MockDomain: dof = element id, measure = 1.0.
        assert_eq!(scratch.entries(), &[(3, 2.5)]);
    }

    #[test]
    fn non_finite_coefficient_fails_evaluation() {
        let domain = MockDomain::uniform(1, 1);
        let kernel = DiffusionKernel::new("diff0", f64::NAN);
        let mut scratch = ElementScratch::new();
        let mut ctx = ElementContext::new(
            ElementId(0),
            RegionId(0),
            WorkerId(0),
            &domain,
            &mut scratch,
        );

        let err = kernel.evaluate(&mut ctx).unwrap_err();
        assert!(matches!(err, KernelError::EvaluationFailed { .. }));
        assert!(scratch.is_empty());
    }

    #[test]
    fn registration_builds_from_defaults() {
        let domain = std::sync::Arc::new(MockDomain::uniform(1, 4));
        let mut registry = KernelRegistry::new(1, domain as _);
        register(&mut registry);

        let kernel = registry
            .build("Diffusion", "diff0", ParameterSet::new())
            .unwrap();
        assert_eq!(kernel.name(), "diff0");
        assert_eq!(
            registry
                .default_parameters("Diffusion")
                .unwrap()
                .real("diffusivity"),
            Some(1.0)
        );
    }
}
