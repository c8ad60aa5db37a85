//! Per-surface state machine
//!
//! Standard and volumetric surfaces move directly between `Closed` and
//! `Open`. Immersive surfaces pass through `Opening`/`Closing` while the
//! host call is in flight, and buffer at most one request during that time.

use serde::{Deserialize, Serialize};

use crate::types::{Direction, SurfaceKind};

/// Presentation state of a single surface
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SurfacePhase {
    #[default]
    Closed,
    /// Host show call in flight (immersive only)
    Opening,
    Open,
    /// Host hide call in flight (immersive only)
    Closing,
}

impl SurfacePhase {
    /// Direction of the host call in flight, if any
    pub fn in_flight(&self) -> Option<Direction> {
        match self {
            SurfacePhase::Opening => Some(Direction::Open),
            SurfacePhase::Closing => Some(Direction::Close),
            SurfacePhase::Closed | SurfacePhase::Open => None,
        }
    }

    fn settled(direction: Direction) -> Self {
        match direction {
            Direction::Open => SurfacePhase::Open,
            Direction::Close => SurfacePhase::Closed,
        }
    }

    fn transitioning(direction: Direction) -> Self {
        match direction {
            Direction::Open => SurfacePhase::Opening,
            Direction::Close => SurfacePhase::Closing,
        }
    }
}

/// How a request was taken in by the coordinator
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Disposition {
    /// The host call was made and the surface settled
    Settled,
    /// Buffered behind an in-flight host call
    Queued,
    /// Cancelled a buffered request in the opposite direction
    Superseded,
}

/// Result of admitting a request
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Admission {
    /// Caller must make the host call in this direction
    Begin(Direction),
    /// Nothing to call now
    Buffered(Disposition),
}

/// What the driver of an in-flight call does once it settles
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum AfterSettle {
    Idle,
    /// A buffered request was started and needs its host call
    Continue(Direction),
    /// A buffered request no longer applies and was dropped
    Discarded(Direction),
}

/// What a caller asked a surface to do
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Intent {
    Toward(Direction),
    /// Opposite of where the surface is heading
    Toggle,
}

/// Request that is already satisfied by the surface's target state
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Redundant(pub Direction);

/// Mutable state for one registered surface
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct SurfaceState {
    pub phase: SurfacePhase,
    pub pending: Option<Direction>,
}

impl SurfaceState {
    pub fn open() -> Self {
        Self {
            phase: SurfacePhase::Open,
            pending: None,
        }
    }

    /// Direction the surface is heading once everything buffered settles
    pub fn target(&self) -> Direction {
        if let Some(pending) = self.pending {
            return pending;
        }
        match self.phase {
            SurfacePhase::Open | SurfacePhase::Opening => Direction::Open,
            SurfacePhase::Closed | SurfacePhase::Closing => Direction::Close,
        }
    }

    /// Direction an intent asks for given the current target
    pub fn resolve(&self, intent: Intent) -> Direction {
        match intent {
            Intent::Toward(direction) => direction,
            Intent::Toggle => self.target().reversed(),
        }
    }

    /// Admit a request, moving async kinds into their transitional phase
    pub fn admit(
        &mut self,
        kind: SurfaceKind,
        direction: Direction,
    ) -> Result<Admission, Redundant> {
        let Some(in_flight) = self.phase.in_flight() else {
            if self.phase == SurfacePhase::settled(direction) {
                return Err(Redundant(direction));
            }
            if kind.is_async() {
                self.phase = SurfacePhase::transitioning(direction);
            }
            return Ok(Admission::Begin(direction));
        };

        match self.pending {
            None if direction == in_flight => Err(Redundant(direction)),
            None => {
                self.pending = Some(direction);
                Ok(Admission::Buffered(Disposition::Queued))
            }
            Some(pending) if pending == direction => {
                Ok(Admission::Buffered(Disposition::Queued))
            }
            Some(_) => {
                // Pending is always opposite to the in-flight call, so an
                // opposite request cancels the reversal.
                self.pending = None;
                Ok(Admission::Buffered(Disposition::Superseded))
            }
        }
    }

    /// Record the outcome of the host call made for `direction`
    pub fn settle(&mut self, direction: Direction, succeeded: bool) -> AfterSettle {
        self.phase = if succeeded {
            SurfacePhase::settled(direction)
        } else {
            SurfacePhase::settled(direction.reversed())
        };

        match self.pending.take() {
            None => AfterSettle::Idle,
            Some(next) if self.phase != SurfacePhase::settled(next) => {
                self.phase = SurfacePhase::transitioning(next);
                AfterSettle::Continue(next)
            }
            Some(next) => AfterSettle::Discarded(next),
        }
    }

    /// Forget a host call whose outcome will never be reported
    ///
    /// The surface returns to where it was before the call started and any
    /// buffered request is dropped.
    pub fn abandon(&mut self, direction: Direction) -> Option<Direction> {
        self.phase = SurfacePhase::settled(direction.reversed());
        self.pending.take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const IMM: SurfaceKind = SurfaceKind::Immersive;

    #[test]
    fn test_sync_kinds_never_transition() {
        let mut state = SurfaceState::default();
        let admission = state.admit(SurfaceKind::Volumetric, Direction::Open).unwrap();
        assert_eq!(admission, Admission::Begin(Direction::Open));
        assert_eq!(state.phase, SurfacePhase::Closed);

        assert_eq!(state.settle(Direction::Open, true), AfterSettle::Idle);
        assert_eq!(state.phase, SurfacePhase::Open);
        assert_eq!(
            state.admit(SurfaceKind::Volumetric, Direction::Open),
            Err(Redundant(Direction::Open))
        );
    }

    #[test]
    fn test_immersive_open_passes_through_opening() {
        let mut state = SurfaceState::default();
        state.admit(IMM, Direction::Open).unwrap();
        assert_eq!(state.phase, SurfacePhase::Opening);

        state.settle(Direction::Open, true);
        assert_eq!(state.phase, SurfacePhase::Open);
    }

    #[test]
    fn test_close_while_opening_is_queued_then_continued() {
        let mut state = SurfaceState::default();
        state.admit(IMM, Direction::Open).unwrap();

        let admission = state.admit(IMM, Direction::Close).unwrap();
        assert_eq!(admission, Admission::Buffered(Disposition::Queued));
        assert_eq!(state.target(), Direction::Close);

        assert_eq!(
            state.settle(Direction::Open, true),
            AfterSettle::Continue(Direction::Close)
        );
        assert_eq!(state.phase, SurfacePhase::Closing);

        assert_eq!(state.settle(Direction::Close, true), AfterSettle::Idle);
        assert_eq!(state.phase, SurfacePhase::Closed);
    }

    #[test]
    fn test_same_direction_while_in_flight_is_redundant() {
        let mut state = SurfaceState::default();
        state.admit(IMM, Direction::Open).unwrap();
        assert_eq!(
            state.admit(IMM, Direction::Open),
            Err(Redundant(Direction::Open))
        );
    }

    #[test]
    fn test_repeat_of_pending_overwrites() {
        let mut state = SurfaceState::default();
        state.admit(IMM, Direction::Open).unwrap();
        state.admit(IMM, Direction::Close).unwrap();

        let admission = state.admit(IMM, Direction::Close).unwrap();
        assert_eq!(admission, Admission::Buffered(Disposition::Queued));
        assert_eq!(state.pending, Some(Direction::Close));
    }

    #[test]
    fn test_opposite_of_pending_supersedes() {
        let mut state = SurfaceState::default();
        state.admit(IMM, Direction::Open).unwrap();
        state.admit(IMM, Direction::Close).unwrap();

        let admission = state.admit(IMM, Direction::Open).unwrap();
        assert_eq!(admission, Admission::Buffered(Disposition::Superseded));
        assert_eq!(state.pending, None);

        assert_eq!(state.settle(Direction::Open, true), AfterSettle::Idle);
        assert_eq!(state.phase, SurfacePhase::Open);
    }

    #[test]
    fn test_failed_open_reverts_and_discards_pending_close() {
        let mut state = SurfaceState::default();
        state.admit(IMM, Direction::Open).unwrap();
        state.admit(IMM, Direction::Close).unwrap();

        assert_eq!(
            state.settle(Direction::Open, false),
            AfterSettle::Discarded(Direction::Close)
        );
        assert_eq!(state.phase, SurfacePhase::Closed);
        assert_eq!(state.pending, None);
    }

    #[test]
    fn test_toggle_resolves_against_target() {
        let mut state = SurfaceState::default();
        assert_eq!(state.resolve(Intent::Toggle), Direction::Open);

        state.admit(IMM, Direction::Open).unwrap();
        assert_eq!(state.resolve(Intent::Toggle), Direction::Close);
        state.admit(IMM, Direction::Close).unwrap();
        assert_eq!(state.resolve(Intent::Toggle), Direction::Open);
        assert_eq!(
            state.resolve(Intent::Toward(Direction::Close)),
            Direction::Close
        );
    }

    #[test]
    fn test_abandon_reverts_and_drops_pending() {
        let mut state = SurfaceState::default();
        state.admit(IMM, Direction::Open).unwrap();
        state.admit(IMM, Direction::Close).unwrap();

        assert_eq!(state.abandon(Direction::Open), Some(Direction::Close));
        assert_eq!(state, SurfaceState::default());
        assert_eq!(
            state.admit(IMM, Direction::Open),
            Ok(Admission::Begin(Direction::Open))
        );
    }

    #[test]
    fn test_failed_close_reverts_to_open() {
        let mut state = SurfaceState::open();
        state.admit(IMM, Direction::Close).unwrap();
        assert_eq!(state.phase, SurfacePhase::Closing);

        state.settle(Direction::Close, false);
        assert_eq!(state.phase, SurfacePhase::Open);
    }
}
