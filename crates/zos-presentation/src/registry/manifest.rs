//! Surface manifest
//!
//! A manifest is the JSON form of a registry: an ordered list of surface
//! descriptors.
//!
//! ```json
//! {
//!   "surfaces": [
//!     { "id": "id-main", "kind": "standard", "primary": true },
//!     { "id": "id.volumetric", "kind": "volumetric", "value": {} },
//!     { "id": "id.immersive", "kind": "immersive" }
//!   ]
//! }
//! ```

use serde::{Deserialize, Serialize};
use serde_json::json;

use super::{SurfaceDescriptor, SurfaceRegistry};
use crate::error::SurfaceResult;
use crate::types::SurfaceKind;

/// Serializable list of surfaces to register
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SurfaceManifest {
    pub surfaces: Vec<SurfaceDescriptor>,
}

impl SurfaceManifest {
    /// Parse a manifest from JSON
    pub fn from_json(json: &str) -> SurfaceResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serialize the manifest to pretty JSON
    pub fn to_json(&self) -> SurfaceResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// The three surfaces of the multi-window demo
    pub fn demo() -> Self {
        Self {
            surfaces: vec![
                SurfaceDescriptor::primary("id-main"),
                SurfaceDescriptor::new("id.volumetric", SurfaceKind::Volumetric)
                    .with_value(json!({})),
                SurfaceDescriptor::new("id.immersive", SurfaceKind::Immersive),
            ],
        }
    }

    /// Validate and build a registry
    pub fn into_registry(self) -> SurfaceResult<SurfaceRegistry> {
        SurfaceRegistry::from_descriptors(self.surfaces)
    }
}
