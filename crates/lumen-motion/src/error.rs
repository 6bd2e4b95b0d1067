//! Error types for reveal registration.

use thiserror::Error;

use crate::geometry::ElementId;
use crate::registry::RegistrationHandle;

/// Result type for registry operations.
pub type Result<T> = std::result::Result<T, RevealError>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RevealError {
    /// The watched element (or a group member) is not mounted yet.
    /// Callers retry after mount; the registry never waits for it.
    #[error("{0} is not mounted")]
    TargetNotFound(ElementId),

    /// The host has no intersection detection.
    #[error("intersection detection is unavailable")]
    ObserverUnavailable,

    #[error("unknown registration {0}")]
    UnknownRegistration(RegistrationHandle),
}
