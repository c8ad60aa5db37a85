//! Presentation host boundary
//!
//! The coordinator never talks to a windowing framework directly. It calls
//! into a [`PresentationHost`], which is whatever actually puts windows and
//! immersive spaces on screen.

mod recording;

pub use recording::{HostCall, RecordingHost};

use async_trait::async_trait;
use serde_json::Value;

use crate::error::HostError;
use crate::types::SurfaceId;

/// Capabilities the coordinator needs from a presentation framework
///
/// Window calls complete synchronously. Immersive calls suspend until the
/// platform has finished presenting or dismissing the space; they cannot be
/// cancelled once started.
///
/// Implementations must not call back into the coordinator from these
/// methods.
#[async_trait]
pub trait PresentationHost: Send + Sync {
    /// Show a standard window
    fn show_standard(&self, id: &SurfaceId) -> Result<(), HostError>;

    /// Hide a standard window
    fn hide_standard(&self, id: &SurfaceId) -> Result<(), HostError>;

    /// Show a volumetric window for the given value
    fn show_volumetric(&self, id: &SurfaceId, value: &Value) -> Result<(), HostError>;

    /// Hide the volumetric window for the given value
    fn hide_volumetric(&self, id: &SurfaceId, value: &Value) -> Result<(), HostError>;

    /// Present an immersive space
    async fn show_immersive(&self, id: &SurfaceId) -> Result<(), HostError>;

    /// Dismiss an immersive space
    async fn hide_immersive(&self, id: &SurfaceId) -> Result<(), HostError>;
}
