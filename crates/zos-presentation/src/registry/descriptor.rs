//! Surface descriptors

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::types::{SurfaceId, SurfaceKind};

/// Static description of a presentable surface
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SurfaceDescriptor {
    /// Unique id within the registry
    pub id: SurfaceId,
    /// Which host calls present this surface
    pub kind: SurfaceKind,
    /// Primary surfaces are opened by the host at startup and are never
    /// dismissed when the app moves to the background
    #[serde(default)]
    pub primary: bool,
    /// Payload handed to the host when the window is opened
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
}

impl SurfaceDescriptor {
    /// Describe a non-primary surface
    pub fn new(id: impl Into<SurfaceId>, kind: SurfaceKind) -> Self {
        Self {
            id: id.into(),
            kind,
            primary: false,
            value: None,
        }
    }

    /// Describe the primary standard window
    pub fn primary(id: impl Into<SurfaceId>) -> Self {
        Self {
            primary: true,
            ..Self::new(id, SurfaceKind::Standard)
        }
    }

    /// Attach the value passed to the host on open
    pub fn with_value(mut self, value: Value) -> Self {
        self.value = Some(value);
        self
    }

    /// Value for host calls, `null` when none was configured
    pub(crate) fn host_value(&self) -> Value {
        self.value.clone().unwrap_or(Value::Null)
    }
}
