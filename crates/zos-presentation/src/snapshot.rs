//! Diagnostic snapshots of coordinator state
//!
//! Snapshots are read-only views for logging and debugging; the coordinator
//! never restores from one.

use serde::{Deserialize, Serialize};

use crate::error::SurfaceResult;
use crate::lifecycle::SurfacePhase;
use crate::types::{Direction, SurfaceId, SurfaceKind};

/// State of one surface at snapshot time
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SurfaceSnapshot {
    pub id: SurfaceId,
    pub kind: SurfaceKind,
    pub primary: bool,
    pub phase: SurfacePhase,
    /// Request buffered behind an in-flight host call
    pub pending: Option<Direction>,
}

/// State of every surface, in registration order
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub surfaces: Vec<SurfaceSnapshot>,
}

impl Snapshot {
    /// Ids of surfaces that are settled open
    pub fn open_surfaces(&self) -> Vec<&SurfaceId> {
        self.surfaces
            .iter()
            .filter(|s| s.phase == SurfacePhase::Open)
            .map(|s| &s.id)
            .collect()
    }

    pub fn to_json(&self) -> SurfaceResult<String> {
        Ok(serde_json::to_string(self)?)
    }
}
