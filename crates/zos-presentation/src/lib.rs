//! Presentation Lifecycle Coordinator for Zero OS
//!
//! This crate tracks which presentation surfaces of an app are open and keeps
//! their open/close transitions consistent:
//! - Standard windows, volumetric windows and immersive spaces
//! - Serialized show/hide for immersive spaces (one host call in flight)
//! - Automatic dismissal of secondary surfaces when the app backgrounds
//!
//! ## Architecture
//!
//! - [`registry`]: Surface descriptors, the registry and JSON manifests
//! - [`lifecycle`]: The coordinator and per-surface state machine
//! - [`host`]: The [`PresentationHost`] boundary and an in-memory host
//! - [`snapshot`]: Serializable views of coordinator state
//!
//! ## Example
//!
//! ```rust
//! use std::sync::Arc;
//! use zos_presentation::{AppPhase, LifecycleCoordinator, RecordingHost, SurfaceManifest};
//!
//! # async fn run() -> zos_presentation::SurfaceResult<()> {
//! let host = Arc::new(RecordingHost::new());
//! let registry = SurfaceManifest::demo().into_registry()?;
//! let coordinator = LifecycleCoordinator::new(registry, host.clone());
//!
//! coordinator.request_open("id.volumetric").await?;
//! coordinator.request_open("id.immersive").await?;
//!
//! let report = coordinator
//!     .on_app_phase_changed(AppPhase::Active, AppPhase::Background)
//!     .await;
//! assert_eq!(report.dismissed.len(), 2);
//! assert!(coordinator.is_open("id-main")?);
//! # Ok(())
//! # }
//! ```
//!
//! ## Design Principles
//!
//! 1. **Host Abstraction**: No windowing framework dependency; everything
//!    presentable goes through [`PresentationHost`]
//! 2. **Single Writer**: Surface state is only mutated by the coordinator
//! 3. **Explicit Results**: Every request reports redundancy and host
//!    rejection to the caller

pub mod error;
pub mod host;
pub mod lifecycle;
pub mod registry;
pub mod snapshot;
pub mod types;

pub use error::{HostError, SurfaceError, SurfaceResult};
pub use host::{HostCall, PresentationHost, RecordingHost};
pub use lifecycle::{
    enters_background, DismissalReport, Disposition, LifecycleCoordinator, SurfacePhase,
};
pub use registry::{SurfaceDescriptor, SurfaceManifest, SurfaceRegistry};
pub use snapshot::{Snapshot, SurfaceSnapshot};
pub use types::{AppPhase, Direction, SurfaceId, SurfaceKind};
