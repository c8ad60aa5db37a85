//! In-memory presentation host
//!
//! Records every call it receives and can be told to refuse specific
//! surfaces. Used headless, in tests, and by the demo application.

use std::collections::HashSet;
use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;
use tracing::trace;

use super::PresentationHost;
use crate::error::HostError;
use crate::types::{Direction, SurfaceId, SurfaceKind};

/// A single call received by a [`RecordingHost`]
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct HostCall {
    pub id: SurfaceId,
    pub kind: SurfaceKind,
    pub direction: Direction,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
}

impl HostCall {
    fn new(id: &SurfaceId, kind: SurfaceKind, direction: Direction) -> Self {
        Self {
            id: id.clone(),
            kind,
            direction,
            value: None,
        }
    }
}

/// Host that records calls instead of presenting anything
#[derive(Debug, Default)]
pub struct RecordingHost {
    calls: Mutex<Vec<HostCall>>,
    refused: Mutex<HashSet<SurfaceId>>,
}

impl RecordingHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Refuse every subsequent show/hide for this surface
    pub fn refuse(&self, id: impl Into<SurfaceId>) {
        lock(&self.refused).insert(id.into());
    }

    /// Accept calls for a previously refused surface again
    pub fn accept(&self, id: &str) {
        lock(&self.refused).remove(id);
    }

    /// All calls received so far, in order
    pub fn calls(&self) -> Vec<HostCall> {
        lock(&self.calls).clone()
    }

    /// Calls received for one surface
    pub fn calls_for(&self, id: &str) -> Vec<HostCall> {
        lock(&self.calls)
            .iter()
            .filter(|call| call.id.as_str() == id)
            .cloned()
            .collect()
    }

    pub fn call_count(&self) -> usize {
        lock(&self.calls).len()
    }

    fn record(&self, call: HostCall) -> Result<(), HostError> {
        trace!(surface = %call.id, direction = ?call.direction, "host call");
        let refused = lock(&self.refused).contains(&call.id);
        let id = call.id.clone();
        lock(&self.calls).push(call);
        if refused {
            Err(HostError::new(format!("host refused {}", id)))
        } else {
            Ok(())
        }
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

#[async_trait]
impl PresentationHost for RecordingHost {
    fn show_standard(&self, id: &SurfaceId) -> Result<(), HostError> {
        self.record(HostCall::new(id, SurfaceKind::Standard, Direction::Open))
    }

    fn hide_standard(&self, id: &SurfaceId) -> Result<(), HostError> {
        self.record(HostCall::new(id, SurfaceKind::Standard, Direction::Close))
    }

    fn show_volumetric(&self, id: &SurfaceId, value: &Value) -> Result<(), HostError> {
        self.record(HostCall {
            value: Some(value.clone()),
            ..HostCall::new(id, SurfaceKind::Volumetric, Direction::Open)
        })
    }

    fn hide_volumetric(&self, id: &SurfaceId, value: &Value) -> Result<(), HostError> {
        self.record(HostCall {
            value: Some(value.clone()),
            ..HostCall::new(id, SurfaceKind::Volumetric, Direction::Close)
        })
    }

    async fn show_immersive(&self, id: &SurfaceId) -> Result<(), HostError> {
        self.record(HostCall::new(id, SurfaceKind::Immersive, Direction::Open))
    }

    async fn hide_immersive(&self, id: &SurfaceId) -> Result<(), HostError> {
        self.record(HostCall::new(id, SurfaceKind::Immersive, Direction::Close))
    }
}
