use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing::{debug, warn};

use super::state::{
    Admission, AfterSettle, Disposition, Intent, Redundant, SurfacePhase, SurfaceState,
};
use crate::error::{SurfaceError, SurfaceResult};
use crate::host::PresentationHost;
use crate::registry::{SurfaceDescriptor, SurfaceRegistry};
use crate::snapshot::{Snapshot, SurfaceSnapshot};
use crate::types::{Direction, SurfaceKind};

/// Single source of truth for which surfaces are open
///
/// All state changes go through this type. The state table is guarded by a
/// mutex that is never held across a host `.await`, so an immersive call in
/// flight does not block requests for other surfaces.
pub struct LifecycleCoordinator {
    registry: SurfaceRegistry,
    host: Arc<dyn PresentationHost>,
    /// Indexed by registry position
    states: Mutex<Vec<SurfaceState>>,
}

impl LifecycleCoordinator {
    /// Create a coordinator over a populated registry
    ///
    /// The primary surface starts open; the host presents it at launch.
    pub fn new(registry: SurfaceRegistry, host: Arc<dyn PresentationHost>) -> Self {
        let states = registry
            .iter()
            .map(|descriptor| {
                if descriptor.primary {
                    SurfaceState::open()
                } else {
                    SurfaceState::default()
                }
            })
            .collect();

        Self {
            registry,
            host,
            states: Mutex::new(states),
        }
    }

    pub fn registry(&self) -> &SurfaceRegistry {
        &self.registry
    }

    /// Open a surface
    ///
    /// Window kinds settle before this returns. Immersive surfaces settle
    /// when the host call resolves; if the surface already has a call in
    /// flight the request is buffered and `Disposition::Queued` or
    /// `Disposition::Superseded` is returned immediately.
    ///
    /// Dropping the returned future while an immersive host call is pending
    /// abandons that call: the surface returns to its phase before the
    /// request and any buffered request is discarded.
    pub async fn request_open(&self, id: &str) -> SurfaceResult<Disposition> {
        self.request(id, Intent::Toward(Direction::Open)).await
    }

    /// Close a surface
    ///
    /// Mirror of [`request_open`](Self::request_open), including its drop
    /// behaviour. The primary surface may be closed explicitly.
    pub async fn request_close(&self, id: &str) -> SurfaceResult<Disposition> {
        self.request(id, Intent::Toward(Direction::Close)).await
    }

    /// Flip a surface toward the opposite of where it is heading
    ///
    /// The direction is chosen under the same lock that admits the request,
    /// so a concurrent request cannot turn a toggle into a redundant one.
    pub async fn toggle(&self, id: &str) -> SurfaceResult<Disposition> {
        self.request(id, Intent::Toggle).await
    }

    /// Whether the surface is settled open
    pub fn is_open(&self, id: &str) -> SurfaceResult<bool> {
        Ok(self.phase(id)? == SurfacePhase::Open)
    }

    /// Current phase of a surface
    pub fn phase(&self, id: &str) -> SurfaceResult<SurfacePhase> {
        let slot = self.slot(id)?;
        Ok(self.lock()[slot].phase)
    }

    /// Point-in-time view of every surface in registration order
    pub fn snapshot(&self) -> Snapshot {
        let states = self.lock();
        let surfaces = self
            .registry
            .iter()
            .zip(states.iter())
            .map(|(descriptor, state)| SurfaceSnapshot {
                id: descriptor.id.clone(),
                kind: descriptor.kind,
                primary: descriptor.primary,
                phase: state.phase,
                pending: state.pending,
            })
            .collect();
        Snapshot { surfaces }
    }

    async fn request(&self, id: &str, intent: Intent) -> SurfaceResult<Disposition> {
        let slot = self.slot(id)?;
        let descriptor = self.registry.at(slot);

        if !descriptor.kind.is_async() {
            return self.apply_window(slot, descriptor, intent);
        }

        let (direction, admission) = {
            let mut states = self.lock();
            let state = &mut states[slot];
            let direction = state.resolve(intent);
            (direction, state.admit(descriptor.kind, direction))
        };
        match admission.map_err(|redundant| redundant_error(descriptor, redundant))? {
            Admission::Begin(direction) => self.drive_immersive(slot, descriptor, direction).await,
            Admission::Buffered(disposition) => {
                debug!(
                    surface = %descriptor.id,
                    ?direction,
                    ?disposition,
                    "immersive call in flight, request buffered"
                );
                Ok(disposition)
            }
        }
    }

    /// Synchronous path for standard and volumetric windows
    fn apply_window(
        &self,
        slot: usize,
        descriptor: &SurfaceDescriptor,
        intent: Intent,
    ) -> SurfaceResult<Disposition> {
        let mut states = self.lock();
        let state = &mut states[slot];
        let direction = state.resolve(intent);
        state
            .admit(descriptor.kind, direction)
            .map_err(|redundant| redundant_error(descriptor, redundant))?;

        let id = &descriptor.id;
        let result = match (descriptor.kind, direction) {
            (SurfaceKind::Volumetric, Direction::Open) => {
                self.host.show_volumetric(id, &descriptor.host_value())
            }
            (SurfaceKind::Volumetric, Direction::Close) => {
                self.host.hide_volumetric(id, &descriptor.host_value())
            }
            (_, Direction::Open) => self.host.show_standard(id),
            (_, Direction::Close) => self.host.hide_standard(id),
        };

        state.settle(direction, result.is_ok());
        match result {
            Ok(()) => {
                debug!(surface = %id, phase = ?state.phase, "surface settled");
                Ok(Disposition::Settled)
            }
            Err(reason) => {
                warn!(surface = %id, ?direction, %reason, "host rejected window");
                Err(SurfaceError::host_rejected(id, reason))
            }
        }
    }

    /// Run host calls for an immersive surface until nothing is buffered
    ///
    /// Returns the first host rejection encountered, including one for a
    /// buffered request this call went on to apply.
    async fn drive_immersive(
        &self,
        slot: usize,
        descriptor: &SurfaceDescriptor,
        direction: Direction,
    ) -> SurfaceResult<Disposition> {
        let id = &descriptor.id;
        let mut outcome = Ok(Disposition::Settled);
        let mut in_flight = InFlight {
            coordinator: self,
            slot,
            direction: Some(direction),
        };

        while let Some(direction) = in_flight.direction {
            debug!(surface = %id, ?direction, "immersive host call started");
            let result = match direction {
                Direction::Open => self.host.show_immersive(id).await,
                Direction::Close => self.host.hide_immersive(id).await,
            };

            let after = {
                let mut states = self.lock();
                states[slot].settle(direction, result.is_ok())
            };

            if let Err(reason) = result {
                warn!(surface = %id, ?direction, %reason, "host rejected immersive space");
                if outcome.is_ok() {
                    outcome = Err(SurfaceError::host_rejected(id, reason));
                }
            }

            in_flight.direction = match after {
                AfterSettle::Idle => None,
                AfterSettle::Discarded(next) => {
                    debug!(surface = %id, direction = ?next, "buffered request no longer applies");
                    None
                }
                AfterSettle::Continue(next) => {
                    debug!(surface = %id, direction = ?next, "applying buffered request");
                    Some(next)
                }
            };
        }

        debug!(surface = %id, phase = ?self.lock()[slot].phase, "immersive space settled");
        outcome
    }

    pub(crate) fn slot(&self, id: &str) -> SurfaceResult<usize> {
        self.registry
            .position(id)
            .ok_or_else(|| SurfaceError::unknown(id))
    }

    pub(crate) fn lock(&self) -> MutexGuard<'_, Vec<SurfaceState>> {
        self.states.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Host call owned by a driving future
///
/// If the future is dropped before the call settles, the surface is reverted
/// so later requests are not buffered behind a call nobody will finish.
struct InFlight<'a> {
    coordinator: &'a LifecycleCoordinator,
    slot: usize,
    direction: Option<Direction>,
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        let Some(direction) = self.direction else {
            return;
        };
        let discarded = self.coordinator.lock()[self.slot].abandon(direction);
        warn!(
            surface = %self.coordinator.registry.at(self.slot).id,
            ?direction,
            ?discarded,
            "immersive host call abandoned"
        );
    }
}

fn redundant_error(descriptor: &SurfaceDescriptor, redundant: Redundant) -> SurfaceError {
    match redundant.0 {
        Direction::Open => SurfaceError::AlreadyOpen(descriptor.id.clone()),
        Direction::Close => SurfaceError::AlreadyClosed(descriptor.id.clone()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::RecordingHost;
    use crate::registry::SurfaceManifest;

    fn demo() -> (LifecycleCoordinator, Arc<RecordingHost>) {
        let host = Arc::new(RecordingHost::new());
        let registry = SurfaceManifest::demo().into_registry().unwrap();
        (LifecycleCoordinator::new(registry, host.clone()), host)
    }

    #[tokio::test]
    async fn test_primary_starts_open() {
        let (coordinator, host) = demo();
        assert!(coordinator.is_open("id-main").unwrap());
        assert!(!coordinator.is_open("id.volumetric").unwrap());
        assert!(!coordinator.is_open("id.immersive").unwrap());
        assert_eq!(host.call_count(), 0);
    }

    #[tokio::test]
    async fn test_open_volumetric_passes_value() {
        let (coordinator, host) = demo();
        let disposition = coordinator.request_open("id.volumetric").await.unwrap();
        assert_eq!(disposition, Disposition::Settled);
        assert!(coordinator.is_open("id.volumetric").unwrap());

        let calls = host.calls_for("id.volumetric");
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].value, Some(serde_json::json!({})));
    }

    #[tokio::test]
    async fn test_double_open_is_already_open() {
        let (coordinator, host) = demo();
        coordinator.request_open("id.volumetric").await.unwrap();
        let err = coordinator.request_open("id.volumetric").await.unwrap_err();
        assert!(matches!(err, SurfaceError::AlreadyOpen(_)));
        assert_eq!(host.call_count(), 1);
    }

    #[tokio::test]
    async fn test_close_closed_is_already_closed() {
        let (coordinator, host) = demo();
        let err = coordinator.request_close("id.immersive").await.unwrap_err();
        assert!(matches!(err, SurfaceError::AlreadyClosed(_)));
        assert_eq!(host.call_count(), 0);
    }

    #[tokio::test]
    async fn test_host_rejection_reverts_window() {
        let (coordinator, host) = demo();
        host.refuse("id.volumetric");

        let err = coordinator.request_open("id.volumetric").await.unwrap_err();
        assert!(matches!(err, SurfaceError::HostRejected { .. }));
        assert!(!coordinator.is_open("id.volumetric").unwrap());

        host.accept("id.volumetric");
        coordinator.request_open("id.volumetric").await.unwrap();
        assert!(coordinator.is_open("id.volumetric").unwrap());
    }

    #[tokio::test]
    async fn test_host_rejection_reverts_immersive_close() {
        let (coordinator, host) = demo();
        coordinator.request_open("id.immersive").await.unwrap();
        host.refuse("id.immersive");

        let err = coordinator.request_close("id.immersive").await.unwrap_err();
        assert!(matches!(err, SurfaceError::HostRejected { .. }));
        assert_eq!(
            coordinator.phase("id.immersive").unwrap(),
            SurfacePhase::Open
        );
    }

    #[tokio::test]
    async fn test_toggle_flips_state() {
        let (coordinator, _host) = demo();
        coordinator.toggle("id.immersive").await.unwrap();
        assert!(coordinator.is_open("id.immersive").unwrap());
        coordinator.toggle("id.immersive").await.unwrap();
        assert!(!coordinator.is_open("id.immersive").unwrap());
    }

    #[tokio::test]
    async fn test_primary_can_be_closed_explicitly() {
        let (coordinator, host) = demo();
        coordinator.request_close("id-main").await.unwrap();
        assert!(!coordinator.is_open("id-main").unwrap());
        assert_eq!(host.calls_for("id-main").len(), 1);
    }

    #[tokio::test]
    async fn test_unknown_surface() {
        let (coordinator, host) = demo();
        coordinator.request_open("id.volumetric").await.unwrap();

        for result in [
            coordinator.request_open("id.nope").await,
            coordinator.request_close("id.nope").await,
            coordinator.toggle("id.nope").await,
        ] {
            assert_eq!(result.unwrap_err(), SurfaceError::unknown("id.nope"));
        }
        assert!(coordinator.is_open("id.nope").is_err());

        assert!(coordinator.is_open("id-main").unwrap());
        assert!(coordinator.is_open("id.volumetric").unwrap());
        assert!(!coordinator.is_open("id.immersive").unwrap());
        assert_eq!(host.call_count(), 1);
    }
}
