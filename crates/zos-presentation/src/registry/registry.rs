//! Surface registry
//!
//! Ordered, append-only map from surface id to descriptor. Registration
//! rejects duplicate ids and a second primary surface.

use std::collections::HashMap;

use tracing::debug;

use super::SurfaceDescriptor;
use crate::error::{SurfaceError, SurfaceResult};
use crate::types::SurfaceId;

/// Registry of surface descriptors
///
/// Descriptors are kept in registration order; that order drives background
/// dismissal and snapshots.
#[derive(Clone, Debug, Default)]
pub struct SurfaceRegistry {
    descriptors: Vec<SurfaceDescriptor>,
    index: HashMap<SurfaceId, usize>,
    primary: Option<usize>,
}

impl SurfaceRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry from descriptors in order
    ///
    /// Fails on the first duplicate id or second primary.
    pub fn from_descriptors<I>(descriptors: I) -> SurfaceResult<Self>
    where
        I: IntoIterator<Item = SurfaceDescriptor>,
    {
        let mut registry = Self::new();
        for descriptor in descriptors {
            registry.register(descriptor)?;
        }
        Ok(registry)
    }

    /// Register a descriptor
    pub fn register(&mut self, descriptor: SurfaceDescriptor) -> SurfaceResult<()> {
        if self.index.contains_key(&descriptor.id) {
            return Err(SurfaceError::DuplicateId(descriptor.id));
        }
        if descriptor.primary {
            if let Some(existing) = self.primary() {
                return Err(SurfaceError::DuplicatePrimary {
                    existing: existing.id.clone(),
                    rejected: descriptor.id,
                });
            }
        }

        debug!(
            surface = %descriptor.id,
            kind = ?descriptor.kind,
            primary = descriptor.primary,
            "registered surface"
        );

        let slot = self.descriptors.len();
        if descriptor.primary {
            self.primary = Some(slot);
        }
        self.index.insert(descriptor.id.clone(), slot);
        self.descriptors.push(descriptor);
        Ok(())
    }

    /// Look up a descriptor by id
    pub fn lookup(&self, id: &str) -> Option<&SurfaceDescriptor> {
        self.index.get(id).map(|&slot| &self.descriptors[slot])
    }

    /// Registration index of a surface
    pub(crate) fn position(&self, id: &str) -> Option<usize> {
        self.index.get(id).copied()
    }

    /// Descriptor at a registration index
    pub(crate) fn at(&self, slot: usize) -> &SurfaceDescriptor {
        &self.descriptors[slot]
    }

    /// The primary surface, if one was registered
    pub fn primary(&self) -> Option<&SurfaceDescriptor> {
        self.primary.map(|slot| &self.descriptors[slot])
    }

    /// Descriptors in registration order
    pub fn iter(&self) -> impl Iterator<Item = &SurfaceDescriptor> {
        self.descriptors.iter()
    }

    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }
}
