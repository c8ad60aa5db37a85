//! Core type definitions for the presentation coordinator
//!
//! This module centralizes the identifiers and enumerations shared by the
//! registry, the lifecycle coordinator and host adapters.

use std::borrow::Borrow;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Unique surface identifier
///
/// Surface ids are opaque strings chosen by the application (e.g.
/// `"id.volumetric"`). They are unique within a registry and never change
/// once registered.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SurfaceId(String);

impl SurfaceId {
    /// Create a surface id from any string-like value
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the id as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SurfaceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for SurfaceId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for SurfaceId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for SurfaceId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Kind of presentation surface
///
/// The kind decides which host call shows or hides the surface, and whether
/// that call completes synchronously.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SurfaceKind {
    /// Ordinary flat window
    Standard,
    /// Bounded 3D window
    Volumetric,
    /// Full-space immersive view (always asynchronous)
    Immersive,
}

impl SurfaceKind {
    /// Whether show/hide for this kind suspends on the host
    pub fn is_async(&self) -> bool {
        matches!(self, SurfaceKind::Immersive)
    }

    /// Get the string ID for this kind
    pub fn id(&self) -> &'static str {
        match self {
            SurfaceKind::Standard => "standard",
            SurfaceKind::Volumetric => "volumetric",
            SurfaceKind::Immersive => "immersive",
        }
    }
}

/// Application-level phase reported by the host environment
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AppPhase {
    /// In the foreground and receiving input
    Active,
    /// Visible but not receiving input
    Inactive,
    /// Not visible to the user
    Background,
}

/// Direction of a show/hide request
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Open,
    Close,
}

impl Direction {
    /// The opposite direction
    pub fn reversed(self) -> Self {
        match self {
            Direction::Open => Direction::Close,
            Direction::Close => Direction::Open,
        }
    }
}
