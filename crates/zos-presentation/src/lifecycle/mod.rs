//! Surface lifecycle module
//!
//! Provides the coordinator, the per-surface state machine and app phase
//! handling.

mod coordinator;
mod phase;
mod state;

pub use coordinator::LifecycleCoordinator;
pub use phase::{enters_background, DismissalReport};
pub use state::{Disposition, SurfacePhase};
