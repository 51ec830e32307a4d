//! The kernel type registry and per-worker instance slots.

use std::collections::BTreeSet;
use std::sync::Arc;

use indexmap::IndexMap;
use tessera_core::{Domain, ParameterSet, RegionId, RegistryError, WorkerId};
use tessera_kernel::{Kernel, KernelBuild, KernelCtor, KernelDefaults};

use crate::active_set::{ActiveSetView, Attached};

struct RegisteredType {
    ctor: KernelCtor,
    defaults: KernelDefaults,
}

struct WorkerSlot {
    instances: Vec<Attached>,
    view: ActiveSetView,
}

impl WorkerSlot {
    fn new() -> Self {
        Self {
            instances: Vec::new(),
            view: ActiveSetView::new(),
        }
    }
}

/// Name-indexed table of kernel types plus per-worker instance slots.
///
/// Types are registered once before any run starts; instances are built
/// from resolved parameters during problem setup, attached per worker
/// with an optional region restriction, and live until the end of the
/// run. The derived [`ActiveSetView`] per worker is rebuilt on demand
/// and cached between rebuilds.
///
/// Recomputation takes `&mut self` while traversal borrows the registry
/// shared, so the no-recompute-during-traversal rule is enforced by the
/// borrow checker rather than internal locking.
pub struct KernelRegistry {
    domain: Arc<dyn Domain>,
    types: IndexMap<String, RegisteredType>,
    slots: Vec<WorkerSlot>,
}

impl KernelRegistry {
    /// Create a registry for a pool of `worker_count` workers over the
    /// given domain. Slots are sized once and never resized.
    pub fn new(worker_count: usize, domain: Arc<dyn Domain>) -> Self {
        let slots = (0..worker_count).map(|_| WorkerSlot::new()).collect();
        Self {
            domain,
            types: IndexMap::new(),
            slots,
        }
    }

    /// Number of worker slots.
    pub fn worker_count(&self) -> usize {
        self.slots.len()
    }

    /// The domain this registry builds kernels over.
    pub fn domain(&self) -> &Arc<dyn Domain> {
        &self.domain
    }

    /// Associate a type name with its constructor and defaults provider.
    ///
    /// Re-registering an existing name overwrites the prior entry —
    /// last registration wins — and warns. The original position in the
    /// registration order is kept.
    pub fn register(
        &mut self,
        type_name: impl Into<String>,
        ctor: KernelCtor,
        defaults: KernelDefaults,
    ) {
        let type_name = type_name.into();
        let previous = self
            .types
            .insert(type_name.clone(), RegisteredType { ctor, defaults });
        if previous.is_some() {
            log::warn!("kernel type '{type_name}' re-registered; last registration wins");
        }
    }

    /// Registered type names, stable in registration order.
    pub fn registered_names(&self) -> impl Iterator<Item = &str> {
        self.types.keys().map(String::as_str)
    }

    /// Build an instance of a registered type.
    ///
    /// Fails with [`RegistryError::UnknownType`] if `type_name` was
    /// never registered. Missing parameters are filled from the type's
    /// defaults before construction. The instance is returned but not
    /// attached; insertion into a worker's active set is a separate
    /// explicit step ([`attach`](Self::attach)).
    pub fn build(
        &self,
        type_name: &str,
        instance_name: &str,
        mut parameters: ParameterSet,
    ) -> Result<Arc<dyn Kernel>, RegistryError> {
        let registered = self.types.get(type_name).ok_or_else(|| {
            RegistryError::UnknownType {
                name: type_name.to_string(),
            }
        })?;
        parameters.apply_defaults(&(registered.defaults)());
        Ok((registered.ctor)(KernelBuild {
            instance_name: instance_name.to_string(),
            domain: Arc::clone(&self.domain),
            parameters,
        }))
    }

    /// A fresh canonical defaults object for a registered type.
    ///
    /// Fails with [`RegistryError::UnknownType`] if unregistered.
    pub fn default_parameters(&self, type_name: &str) -> Result<ParameterSet, RegistryError> {
        let registered = self.types.get(type_name).ok_or_else(|| {
            RegistryError::UnknownType {
                name: type_name.to_string(),
            }
        })?;
        Ok((registered.defaults)())
    }

    /// Attach an instance to one worker's active set, with an optional
    /// region restriction.
    ///
    /// A restriction naming a region with no elements is vacuous; it is
    /// kept (the instance simply never runs) but warned about. The
    /// worker's derived view becomes stale until the next recompute.
    pub fn attach(
        &mut self,
        worker: WorkerId,
        kernel: Arc<dyn Kernel>,
        restriction: Option<RegionId>,
    ) {
        if let Some(region) = restriction {
            if self.domain.elements_in(region) == 0 {
                log::warn!(
                    "kernel '{}' restricted to region {region} which has no elements",
                    kernel.name()
                );
            }
        }
        let slot = &mut self.slots[worker.0];
        slot.instances.push(Attached {
            kernel,
            restriction,
        });
        slot.view.mark_stale();
    }

    /// Rebuild one worker's region buckets from its authoritative
    /// instance list. Idempotent absent intervening attaches.
    pub fn recompute_active_set(&mut self, worker: WorkerId) {
        let slot = &mut self.slots[worker.0];
        slot.view.rebuild(&slot.instances, self.domain.as_ref());
    }

    /// Recompute every worker view that is stale. Called at the start
    /// of a compute phase, before the traversal borrows the registry.
    pub fn recompute_stale(&mut self) {
        for worker in 0..self.slots.len() {
            if self.slots[worker].view.is_stale() {
                self.recompute_active_set(WorkerId(worker));
            }
        }
    }

    /// The derived view for one worker, as of its last recompute.
    /// Never triggers a recompute.
    pub fn active_set(&self, worker: WorkerId) -> &ActiveSetView {
        &self.slots[worker.0].view
    }

    /// All instances attached to `worker`, as of the last recompute.
    pub fn active_kernels(&self, worker: WorkerId) -> &[Arc<dyn Kernel>] {
        self.slots[worker.0].view.all()
    }

    /// Instances applicable to `(worker, region)`, as of the last
    /// recompute: unrestricted instances plus those restricted to the
    /// region.
    pub fn region_kernels(&self, worker: WorkerId, region: RegionId) -> &[Arc<dyn Kernel>] {
        self.slots[worker.0].view.region(region)
    }

    /// Union, across all workers, of the distinct regions that have at
    /// least one region-restricted instance. Returns whether any such
    /// region exists.
    pub fn collect_active_blocks(&self, out: &mut BTreeSet<RegionId>) -> bool {
        for slot in &self.slots {
            for attached in &slot.instances {
                if let Some(region) = attached.restriction {
                    out.insert(region);
                }
            }
        }
        !out.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tessera_core::{KernelError, ParamValue};
    use tessera_kernel::ElementContext;
    use tessera_test_utils::MockDomain;

    struct NamedKernel {
        name: String,
        weight: f64,
        required: Option<String>,
    }

    impl Kernel for NamedKernel {
        fn name(&self) -> &str {
            &self.name
        }
        fn required_quantity(&self) -> Option<&str> {
            self.required.as_deref()
        }
        fn evaluate(&self, ctx: &mut ElementContext<'_>) -> Result<(), KernelError> {
            let slot = ctx.dof();
            ctx.scratch().accumulate(slot, self.weight);
            Ok(())
        }
    }

    fn register_named(registry: &mut KernelRegistry, type_name: &str, default_weight: f64) {
        registry.register(
            type_name,
            Box::new(|build: KernelBuild| {
                Arc::new(NamedKernel {
                    name: build.instance_name,
                    weight: build.parameters.real("weight").unwrap_or(0.0),
                    required: build.parameters.text("requires").map(str::to_string),
                }) as Arc<dyn Kernel>
            }),
            Box::new(move || {
                ParameterSet::new().with("weight", ParamValue::Real(default_weight))
            }),
        );
    }

    fn three_region_registry() -> KernelRegistry {
        let domain = Arc::new(MockDomain::with_spans(&[(0, 10), (1, 10), (2, 10)]));
        KernelRegistry::new(2, domain)
    }

    #[test]
    fn unknown_type_fails_build_and_defaults() {
        let registry = three_region_registry();
        let err = registry
            .build("Diffusion", "diff0", ParameterSet::new())
            .unwrap_err();
        assert_eq!(
            err,
            RegistryError::UnknownType {
                name: "Diffusion".into()
            }
        );
        assert!(registry.default_parameters("Diffusion").is_err());
    }

    #[test]
    fn unknown_type_lookup_is_case_sensitive() {
        let mut registry = three_region_registry();
        register_named(&mut registry, "Diffusion", 1.0);
        // Case variants fail exactly like never-registered names.
        let lower = registry
            .build("diffusion", "d", ParameterSet::new())
            .unwrap_err();
        let upper = registry
            .build("DIFFUSION", "d", ParameterSet::new())
            .unwrap_err();
        assert!(matches!(lower, RegistryError::UnknownType { .. }));
        assert!(matches!(upper, RegistryError::UnknownType { .. }));
    }

    #[test]
    fn defaults_are_fresh_per_call() {
        let mut registry = three_region_registry();
        register_named(&mut registry, "Diffusion", 2.0);

        let mut first = registry.default_parameters("Diffusion").unwrap();
        let second = registry.default_parameters("Diffusion").unwrap();
        assert_eq!(first, second);

        first.set("weight", ParamValue::Real(99.0));
        let third = registry.default_parameters("Diffusion").unwrap();
        assert_eq!(third.real("weight"), Some(2.0));
    }

    #[test]
    fn build_applies_defaults_for_missing_parameters() {
        let mut registry = three_region_registry();
        register_named(&mut registry, "Diffusion", 2.0);

        let kernel = registry
            .build("Diffusion", "diff0", ParameterSet::new())
            .unwrap();
        assert_eq!(kernel.name(), "diff0");

        // The defaults' keys are a superset of what the constructor
        // consumed, so an explicit value must still win.
        let explicit = registry
            .build(
                "Diffusion",
                "diff1",
                ParameterSet::new().with("weight", ParamValue::Real(7.0)),
            )
            .unwrap();
        assert_eq!(explicit.name(), "diff1");
    }

    #[test]
    fn registered_names_keep_registration_order() {
        let mut registry = three_region_registry();
        register_named(&mut registry, "Source", 1.0);
        register_named(&mut registry, "Diffusion", 1.0);
        register_named(&mut registry, "Reaction", 1.0);

        let names: Vec<&str> = registry.registered_names().collect();
        assert_eq!(names, vec!["Source", "Diffusion", "Reaction"]);
    }

    #[test]
    fn duplicate_registration_overwrites_last_wins() {
        let mut registry = three_region_registry();
        register_named(&mut registry, "Diffusion", 1.0);
        register_named(&mut registry, "Diffusion", 5.0);

        let defaults = registry.default_parameters("Diffusion").unwrap();
        assert_eq!(defaults.real("weight"), Some(5.0));
        assert_eq!(registry.registered_names().count(), 1);
    }

    #[test]
    fn attach_marks_stale_and_accessors_lag_until_recompute() {
        let mut registry = three_region_registry();
        register_named(&mut registry, "Diffusion", 1.0);
        let kernel = registry
            .build("Diffusion", "diff0", ParameterSet::new())
            .unwrap();

        registry.attach(WorkerId(0), kernel, None);
        assert!(registry.active_set(WorkerId(0)).is_stale());
        // The view still reflects the last recompute (empty).
        assert!(registry.active_kernels(WorkerId(0)).is_empty());

        registry.recompute_active_set(WorkerId(0));
        assert!(!registry.active_set(WorkerId(0)).is_stale());
        assert_eq!(registry.active_kernels(WorkerId(0)).len(), 1);
    }

    #[test]
    fn recompute_is_idempotent_absent_changes() {
        let mut registry = three_region_registry();
        register_named(&mut registry, "Diffusion", 1.0);
        let kernel = registry
            .build("Diffusion", "diff0", ParameterSet::new())
            .unwrap();
        registry.attach(WorkerId(0), kernel, Some(RegionId(1)));

        registry.recompute_active_set(WorkerId(0));
        let names_once: Vec<String> = registry
            .region_kernels(WorkerId(0), RegionId(1))
            .iter()
            .map(|k| k.name().to_string())
            .collect();

        registry.recompute_active_set(WorkerId(0));
        let names_twice: Vec<String> = registry
            .region_kernels(WorkerId(0), RegionId(1))
            .iter()
            .map(|k| k.name().to_string())
            .collect();

        assert_eq!(names_once, names_twice);
        assert_eq!(
            registry.active_kernels(WorkerId(0)).len(),
            1
        );
    }

    #[test]
    fn required_quantity_excludes_kernel_from_region_bucket() {
        let domain = Arc::new(
            MockDomain::with_spans(&[(0, 5), (1, 5)]).undefine_quantity(1, "temperature"),
        );
        let mut registry = KernelRegistry::new(1, domain);
        register_named(&mut registry, "Diffusion", 1.0);

        let kernel = registry
            .build(
                "Diffusion",
                "diff0",
                ParameterSet::new().with("requires", ParamValue::Text("temperature".into())),
            )
            .unwrap();
        registry.attach(WorkerId(0), kernel, None);
        registry.recompute_active_set(WorkerId(0));

        assert_eq!(registry.region_kernels(WorkerId(0), RegionId(0)).len(), 1);
        assert!(registry.region_kernels(WorkerId(0), RegionId(1)).is_empty());
        // Still present in the worker's full instance list.
        assert_eq!(registry.active_kernels(WorkerId(0)).len(), 1);
    }

    #[test]
    fn scenario_diffusion_everywhere_source_on_region_two() {
        // Registry holds "Diffusion" (unrestricted) and "Source"
        // (restricted to region 2) over a 3-region domain with 10
        // elements per region.
        let mut registry = three_region_registry();
        register_named(&mut registry, "Diffusion", 1.0);
        register_named(&mut registry, "Source", 3.0);

        let diffusion = registry
            .build("Diffusion", "diffusion", ParameterSet::new())
            .unwrap();
        let source = registry
            .build("Source", "source", ParameterSet::new())
            .unwrap();

        registry.attach(WorkerId(0), diffusion, None);
        registry.attach(WorkerId(0), source, Some(RegionId(2)));
        registry.recompute_active_set(WorkerId(0));

        let names = |region: u32| -> Vec<&str> {
            registry
                .region_kernels(WorkerId(0), RegionId(region))
                .iter()
                .map(|k| k.name())
                .collect()
        };
        assert_eq!(names(0), vec!["diffusion"]);
        assert_eq!(names(1), vec!["diffusion"]);
        assert_eq!(names(2), vec!["diffusion", "source"]);

        let mut blocks = BTreeSet::new();
        assert!(registry.collect_active_blocks(&mut blocks));
        assert_eq!(blocks.into_iter().collect::<Vec<_>>(), vec![RegionId(2)]);
    }

    #[test]
    fn collect_active_blocks_false_without_restrictions() {
        let mut registry = three_region_registry();
        register_named(&mut registry, "Diffusion", 1.0);
        let kernel = registry
            .build("Diffusion", "diff0", ParameterSet::new())
            .unwrap();
        registry.attach(WorkerId(0), kernel, None);

        let mut blocks = BTreeSet::new();
        assert!(!registry.collect_active_blocks(&mut blocks));
        assert!(blocks.is_empty());
    }

    #[test]
    fn vacuous_restriction_is_kept_but_never_runs() {
        // Region 7 exists nowhere in the domain.
        let mut registry = three_region_registry();
        register_named(&mut registry, "Source", 1.0);
        let kernel = registry
            .build("Source", "source", ParameterSet::new())
            .unwrap();
        registry.attach(WorkerId(0), kernel, Some(RegionId(7)));
        registry.recompute_active_set(WorkerId(0));

        // Attached, but no domain region bucket contains it.
        assert_eq!(registry.active_kernels(WorkerId(0)).len(), 1);
        for region in registry.domain().regions() {
            assert!(registry.region_kernels(WorkerId(0), region).is_empty());
        }
        assert!(registry.region_kernels(WorkerId(0), RegionId(7)).is_empty());
    }
}
