//! Error types for the Tessera dispatch engine, organized by subsystem:
//! registry, kernel evaluation, traversal, and engine configuration.

use crate::id::ElementId;
use std::error::Error;
use std::fmt;

/// Errors from the kernel registry.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RegistryError {
    /// The requested kernel type name was never registered.
    ///
    /// Lookup is exact and case-sensitive; an unregistered name fails
    /// identically regardless of case.
    UnknownType {
        /// The name that failed to resolve.
        name: String,
    },
}

impl fmt::Display for RegistryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownType { name } => write!(f, "unknown kernel type '{name}'"),
        }
    }
}

impl Error for RegistryError {}

/// Errors from an individual kernel's per-element evaluation.
///
/// Returned by `Kernel::evaluate()` and wrapped in
/// [`TraversalError::KernelFailed`] by the traversal engine.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum KernelError {
    /// The kernel's compute step failed.
    EvaluationFailed {
        /// Human-readable description of the failure.
        reason: String,
    },
    /// A physical quantity the kernel depends on is ill-defined at the
    /// current element (e.g., NaN, or a variable missing on the region).
    UndefinedQuantity {
        /// Name of the offending quantity.
        quantity: String,
    },
}

impl fmt::Display for KernelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EvaluationFailed { reason } => write!(f, "evaluation failed: {reason}"),
            Self::UndefinedQuantity { quantity } => {
                write!(f, "quantity '{quantity}' is undefined")
            }
        }
    }
}

impl Error for KernelError {}

/// Error returned from a traversal run.
///
/// A compute failure aborts the traversal cooperatively: sibling tasks
/// stop at the next element boundary and the originating failure is the
/// single error surfaced to the caller. Contributions committed before
/// the abort remain in the shared buffer; there is no rollback, and the
/// partial state is unusable for anything but diagnostics.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TraversalError {
    /// A kernel's per-element evaluation failed.
    KernelFailed {
        /// Instance name of the failing kernel.
        kernel: String,
        /// Element on which the failure occurred.
        element: ElementId,
        /// The underlying kernel error.
        reason: KernelError,
    },
}

impl TraversalError {
    /// Instance name of the kernel that caused the abort.
    pub fn kernel(&self) -> &str {
        match self {
            Self::KernelFailed { kernel, .. } => kernel,
        }
    }

    /// Element on which the failure occurred.
    pub fn element(&self) -> ElementId {
        match self {
            Self::KernelFailed { element, .. } => *element,
        }
    }
}

impl fmt::Display for TraversalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::KernelFailed {
                kernel,
                element,
                reason,
            } => write!(f, "kernel '{kernel}' failed on element {element}: {reason}"),
        }
    }
}

impl Error for TraversalError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::KernelFailed { reason, .. } => Some(reason),
        }
    }
}

/// Errors from traversal engine construction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EngineError {
    /// The configured worker count is zero.
    InvalidWorkerCount {
        /// The rejected count.
        workers: usize,
    },
    /// The configured split grain is zero.
    InvalidGrain {
        /// The rejected grain.
        grain: u64,
    },
    /// The underlying thread pool could not be built.
    PoolBuild {
        /// Description from the pool builder.
        reason: String,
    },
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidWorkerCount { workers } => {
                write!(f, "worker count must be positive, got {workers}")
            }
            Self::InvalidGrain { grain } => {
                write!(f, "split grain must be positive, got {grain}")
            }
            Self::PoolBuild { reason } => write!(f, "thread pool build failed: {reason}"),
        }
    }
}

impl Error for EngineError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn traversal_error_carries_kernel_and_element() {
        let err = TraversalError::KernelFailed {
            kernel: "Diffusion".into(),
            element: ElementId(17),
            reason: KernelError::UndefinedQuantity {
                quantity: "temperature".into(),
            },
        };
        assert_eq!(err.kernel(), "Diffusion");
        assert_eq!(err.element(), ElementId(17));
        let msg = err.to_string();
        assert!(msg.contains("Diffusion"));
        assert!(msg.contains("17"));
        assert!(err.source().is_some());
    }
}
