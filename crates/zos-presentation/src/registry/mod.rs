//! Surface registry module
//!
//! Provides surface descriptors, the id → descriptor registry, and the
//! JSON manifest used to populate it.

mod descriptor;
mod manifest;
#[allow(clippy::module_inception)]
mod registry;

pub use descriptor::SurfaceDescriptor;
pub use manifest::SurfaceManifest;
pub use registry::SurfaceRegistry;
