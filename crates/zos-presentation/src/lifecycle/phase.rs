//! App phase handling
//!
//! When the app moves into the background every non-primary surface that is
//! open or heading open is closed, in registration order. A surface heading
//! open includes an immersive space whose close is in flight with a reopen
//! buffered behind it; the close request cancels that reopen.

use tracing::{debug, info};

use super::coordinator::LifecycleCoordinator;
use super::state::Disposition;
use crate::error::SurfaceError;
use crate::types::{AppPhase, Direction, SurfaceId};

/// Outcome of a phase change
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DismissalReport {
    /// Whether the change was a background entry
    pub triggered: bool,
    /// Surfaces a close was issued for, with how it was taken in
    pub dismissed: Vec<(SurfaceId, Disposition)>,
    /// Close requests that failed
    pub failures: Vec<SurfaceError>,
}

impl DismissalReport {
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Whether a phase change enters the background
///
/// Only the immediate old/new pair is compared; a repeated `Background`
/// notification is not an entry.
pub fn enters_background(old: AppPhase, new: AppPhase) -> bool {
    new == AppPhase::Background && old != AppPhase::Background
}

impl LifecycleCoordinator {
    /// React to an app phase change reported by the host environment
    pub async fn on_app_phase_changed(&self, old: AppPhase, new: AppPhase) -> DismissalReport {
        if !enters_background(old, new) {
            debug!(?old, ?new, "app phase changed");
            return DismissalReport::default();
        }

        let targets: Vec<SurfaceId> = {
            let states = self.lock();
            self.registry()
                .iter()
                .zip(states.iter())
                .filter(|(descriptor, state)| {
                    !descriptor.primary && state.target() == Direction::Open
                })
                .map(|(descriptor, _)| descriptor.id.clone())
                .collect()
        };

        info!(?old, count = targets.len(), "app entered background, dismissing surfaces");

        let mut report = DismissalReport {
            triggered: true,
            ..Default::default()
        };
        for id in targets {
            match self.request_close(id.as_str()).await {
                Ok(disposition) => report.dismissed.push((id, disposition)),
                Err(err) => report.failures.push(err),
            }
        }
        report
    }
}
