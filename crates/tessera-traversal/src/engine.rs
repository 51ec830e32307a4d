//! The fork-join traversal engine.
//!
//! [`TraversalEngine`] owns a fixed-size worker pool and executes one
//! fork-join task tree per [`run`](TraversalEngine::run) call: ranges
//! above the grain threshold split into two sibling tasks, leaves visit
//! their elements in range order, and sibling walkers are merged
//! bottom-up through [`ElementWalker::join`].
//!
//! A compute failure sets a shared abort flag checked at every element
//! boundary; sibling tasks stop visiting and the originating error
//! propagates up through the join tree. There is no rollback of
//! already-committed contributions.

use std::sync::atomic::{AtomicBool, Ordering};

use tessera_core::{Domain, EngineError, TraversalError, WorkerId};

use crate::range::ElementRange;
use crate::walker::ElementWalker;

/// Traversal pool configuration, validated at engine construction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EngineConfig {
    /// Number of worker threads in the fixed pool.
    pub workers: usize,
    /// Maximum leaf size: a task splits while it covers more elements
    /// than this.
    pub grain: u64,
}

impl EngineConfig {
    /// Config with the given worker count and the default grain.
    pub fn with_workers(workers: usize) -> Self {
        Self {
            workers,
            ..Self::default()
        }
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            workers: 4,
            grain: 64,
        }
    }
}

/// Fixed-pool fork-join traversal engine.
///
/// Workers only block at the aggregator's lock and at join barriers (a
/// parent task waits for both children). There is no suspension or
/// cooperative scheduling, and no timeouts — callers impose wall-clock
/// limits externally.
#[derive(Debug)]
pub struct TraversalEngine {
    pool: rayon::ThreadPool,
    workers: usize,
    grain: u64,
}

impl TraversalEngine {
    /// Build an engine and its worker pool from a validated config.
    pub fn new(config: EngineConfig) -> Result<Self, EngineError> {
        if config.workers == 0 {
            return Err(EngineError::InvalidWorkerCount { workers: 0 });
        }
        if config.grain == 0 {
            return Err(EngineError::InvalidGrain { grain: 0 });
        }
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(config.workers)
            .build()
            .map_err(|e| EngineError::PoolBuild {
                reason: e.to_string(),
            })?;
        Ok(Self {
            pool,
            workers: config.workers,
            grain: config.grain,
        })
    }

    /// Number of workers in the pool. Worker ids are `0..worker_count()`.
    pub fn worker_count(&self) -> usize {
        self.workers
    }

    /// Execute one traversal over `range`, returning the fully joined
    /// walker on success or the originating failure on abort.
    ///
    /// Global element-visitation order across leaves is unspecified;
    /// within one leaf, elements are visited in range order and
    /// `on_region_changed` happens-before the region's first
    /// `on_element`.
    pub fn run<W: ElementWalker>(
        &self,
        domain: &dyn Domain,
        range: ElementRange,
        walker: W,
    ) -> Result<W, TraversalError> {
        let abort = AtomicBool::new(false);
        self.pool
            .install(|| run_task(domain, range, walker, self.grain, &abort))
    }
}

/// Recursive task body: split above the grain, else run the leaf.
fn run_task<W: ElementWalker>(
    domain: &dyn Domain,
    range: ElementRange,
    walker: W,
    grain: u64,
    abort: &AtomicBool,
) -> Result<W, TraversalError> {
    if range.len() <= grain {
        return run_leaf(domain, range, walker, abort);
    }

    let (lo, hi) = range.halves();
    let sibling = walker.fork();
    let (left, right) = rayon::join(
        || run_task(domain, lo, walker, grain, abort),
        || run_task(domain, hi, sibling, grain, abort),
    );
    // Either side's failure wins; an aborted-but-clean sibling folds in
    // silently.
    let mut left = left?;
    let right = right?;
    left.join(right);
    Ok(left)
}

/// Leaf body: visit elements in range order, firing region-change
/// hooks and checking the abort flag at every element boundary.
fn run_leaf<W: ElementWalker>(
    domain: &dyn Domain,
    range: ElementRange,
    mut walker: W,
    abort: &AtomicBool,
) -> Result<W, TraversalError> {
    let worker = WorkerId(rayon::current_thread_index().unwrap_or(0));
    walker.on_leaf_begin(worker);

    let mut current_region = None;
    for element in range.iter() {
        if abort.load(Ordering::Relaxed) {
            break;
        }
        let region = domain.region_of(element);
        if current_region != Some(region) {
            if let Err(err) = walker.on_region_changed(region) {
                abort.store(true, Ordering::Relaxed);
                walker.post_traversal();
                return Err(err);
            }
            current_region = Some(region);
        }
        if let Err(err) = walker.on_element(element) {
            abort.store(true, Ordering::Relaxed);
            walker.post_traversal();
            return Err(err);
        }
    }

    walker.post_traversal();
    Ok(walker)
}
