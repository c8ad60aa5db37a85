//! Error types for the presentation coordinator
//!
//! This module provides structured error types for all fallible operations
//! in the crate: registry construction, surface transitions and host calls.

use crate::types::SurfaceId;

/// Failure reported by a presentation host
///
/// Hosts describe why the platform refused to show or hide a surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostError(String);

impl HostError {
    /// Create a host error with message
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }

    /// The host's description of the failure
    pub fn message(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for HostError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for HostError {}

/// Errors that can occur in surface registry and lifecycle operations
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SurfaceError {
    /// A descriptor with this id is already registered
    DuplicateId(SurfaceId),

    /// A second primary surface was registered
    DuplicatePrimary {
        /// The primary already in the registry
        existing: SurfaceId,
        /// The descriptor that was refused
        rejected: SurfaceId,
    },

    /// No surface with this id is registered
    UnknownSurface(SurfaceId),

    /// The surface is already open (or about to be)
    AlreadyOpen(SurfaceId),

    /// The surface is already closed (or about to be)
    AlreadyClosed(SurfaceId),

    /// The host refused to show or hide the surface
    HostRejected {
        /// Surface the host call was made for
        id: SurfaceId,
        /// The host's reason
        reason: HostError,
    },

    /// A surface manifest could not be parsed
    InvalidManifest(String),
}

impl SurfaceError {
    /// Create an unknown-surface error from a raw id
    pub fn unknown(id: &str) -> Self {
        Self::UnknownSurface(SurfaceId::from(id))
    }

    /// Create a host rejection for a surface
    pub fn host_rejected(id: &SurfaceId, reason: HostError) -> Self {
        Self::HostRejected {
            id: id.clone(),
            reason,
        }
    }

    /// Whether this error is a redundant request rather than a failure
    pub fn is_redundant(&self) -> bool {
        matches!(self, Self::AlreadyOpen(_) | Self::AlreadyClosed(_))
    }
}

impl std::fmt::Display for SurfaceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DuplicateId(id) => write!(f, "duplicate surface id: {}", id),
            Self::DuplicatePrimary { existing, rejected } => write!(
                f,
                "surface {} cannot be primary: {} is already primary",
                rejected, existing
            ),
            Self::UnknownSurface(id) => write!(f, "unknown surface: {}", id),
            Self::AlreadyOpen(id) => write!(f, "surface already open: {}", id),
            Self::AlreadyClosed(id) => write!(f, "surface already closed: {}", id),
            Self::HostRejected { id, reason } => {
                write!(f, "host rejected surface {}: {}", id, reason)
            }
            Self::InvalidManifest(msg) => write!(f, "invalid surface manifest: {}", msg),
        }
    }
}

impl std::error::Error for SurfaceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::HostRejected { reason, .. } => Some(reason),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for SurfaceError {
    fn from(e: serde_json::Error) -> Self {
        Self::InvalidManifest(e.to_string())
    }
}

/// Result type alias for surface operations
pub type SurfaceResult<T> = Result<T, SurfaceError>;
