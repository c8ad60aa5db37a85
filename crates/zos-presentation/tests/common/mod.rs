//! Shared fixtures for coordinator integration tests

#![allow(dead_code)]

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::Semaphore;
use zos_presentation::{
    HostError, LifecycleCoordinator, PresentationHost, RecordingHost, SurfaceId,
    SurfaceManifest, SurfacePhase,
};

pub const MAIN: &str = "id-main";
pub const VOLUMETRIC: &str = "id.volumetric";
pub const IMMERSIVE: &str = "id.immersive";

/// Host whose immersive calls wait for explicit release
///
/// Window calls pass straight through to the recorder.
pub struct GatedHost {
    pub recorder: RecordingHost,
    gate: Semaphore,
}

impl GatedHost {
    pub fn new() -> Self {
        Self {
            recorder: RecordingHost::new(),
            gate: Semaphore::new(0),
        }
    }

    /// Let `n` immersive calls complete
    pub fn release(&self, n: usize) {
        self.gate.add_permits(n);
    }

    async fn pass(&self) {
        self.gate
            .acquire()
            .await
            .expect("gate semaphore closed")
            .forget();
    }
}

#[async_trait]
impl PresentationHost for GatedHost {
    fn show_standard(&self, id: &SurfaceId) -> Result<(), HostError> {
        self.recorder.show_standard(id)
    }

    fn hide_standard(&self, id: &SurfaceId) -> Result<(), HostError> {
        self.recorder.hide_standard(id)
    }

    fn show_volumetric(&self, id: &SurfaceId, value: &Value) -> Result<(), HostError> {
        self.recorder.show_volumetric(id, value)
    }

    fn hide_volumetric(&self, id: &SurfaceId, value: &Value) -> Result<(), HostError> {
        self.recorder.hide_volumetric(id, value)
    }

    async fn show_immersive(&self, id: &SurfaceId) -> Result<(), HostError> {
        self.pass().await;
        self.recorder.show_immersive(id).await
    }

    async fn hide_immersive(&self, id: &SurfaceId) -> Result<(), HostError> {
        self.pass().await;
        self.recorder.hide_immersive(id).await
    }
}

pub fn recording_demo() -> (LifecycleCoordinator, Arc<RecordingHost>) {
    let host = Arc::new(RecordingHost::new());
    let registry = SurfaceManifest::demo().into_registry().unwrap();
    (LifecycleCoordinator::new(registry, host.clone()), host)
}

pub fn gated_demo() -> (LifecycleCoordinator, Arc<GatedHost>) {
    let host = Arc::new(GatedHost::new());
    let registry = SurfaceManifest::demo().into_registry().unwrap();
    (LifecycleCoordinator::new(registry, host.clone()), host)
}

/// Yield until the surface reaches `phase`
pub async fn wait_for_phase(coordinator: &LifecycleCoordinator, id: &str, phase: SurfacePhase) {
    while coordinator.phase(id).unwrap() != phase {
        tokio::task::yield_now().await;
    }
}
