//! Loading-indicator state machine
//!
//! The busy overlay shown while a view loads. Visibility is a single
//! reference-counted state owned here: every show path calls [`IndicatorState::acquire`],
//! every hide path ([`IndicatorState::release`], the safety deadline, the
//! container mutation observer, the global error hooks) funnels through the
//! same machine instead of issuing scattered idempotent hide calls.
//!
//! Timed behavior uses an injectable millisecond clock: callers pass `now`
//! into [`IndicatorState::release`] and [`IndicatorState::tick`], which makes
//! the fade grace and safety deadline deterministic under test. The DOM side
//! (overlay element, classes, inline styles) lives in the browser crate and
//! merely applies the phases reported here.

use tracing::debug;

/// Grace period between the fade-out and the hard hide, in milliseconds
pub const HIDE_GRACE_MS: f64 = 220.0;

/// Deadline after which a load force-hides the indicator regardless of
/// outcome, in milliseconds
pub const SAFETY_HIDE_MS: f64 = 6000.0;

/// Observable phase of the overlay
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum IndicatorPhase {
    /// Fully hidden (`display: none`)
    Hidden,
    /// Visible and intercepting pointer events
    Showing,
    /// Fading out; becomes [`IndicatorPhase::Hidden`] once the grace elapses
    Hiding {
        /// Clock reading when the fade began
        since: f64,
    },
}

/// Reference-counted visibility state for the busy overlay
#[derive(Debug)]
pub struct IndicatorState {
    /// Number of outstanding show requests
    refcount: u32,
    /// Current phase
    phase: IndicatorPhase,
    /// Absolute deadline for the forced hide, if armed
    safety_deadline: Option<f64>,
}

impl Default for IndicatorState {
    fn default() -> Self {
        Self::new()
    }
}

impl IndicatorState {
    /// Create a new, hidden indicator
    pub fn new() -> Self {
        Self {
            refcount: 0,
            phase: IndicatorPhase::Hidden,
            safety_deadline: None,
        }
    }

    /// Get the current phase
    pub fn phase(&self) -> IndicatorPhase {
        self.phase
    }

    /// Check whether the overlay is currently shown (not hiding or hidden)
    pub fn is_visible(&self) -> bool {
        matches!(self.phase, IndicatorPhase::Showing)
    }

    /// Get the armed safety deadline, if any
    pub fn safety_deadline(&self) -> Option<f64> {
        self.safety_deadline
    }

    /// Request the overlay shown. Returns `true` if the phase changed and
    /// the caller should re-apply it to the DOM.
    ///
    /// Acquiring while the overlay is fading cancels the fade.
    pub fn acquire(&mut self) -> bool {
        self.refcount += 1;
        if self.phase == IndicatorPhase::Showing {
            return false;
        }
        self.phase = IndicatorPhase::Showing;
        debug!(refcount = self.refcount, "indicator showing");
        true
    }

    /// Drop one show request. Once the count reaches zero the overlay starts
    /// fading at `now`. Returns `true` if the phase changed.
    ///
    /// Safe to call more times than [`IndicatorState::acquire`]; the count
    /// saturates at zero.
    pub fn release(&mut self, now: f64) -> bool {
        self.refcount = self.refcount.saturating_sub(1);
        if self.refcount == 0 && self.phase == IndicatorPhase::Showing {
            self.phase = IndicatorPhase::Hiding { since: now };
            debug!("indicator hiding");
            return true;
        }
        false
    }

    /// Zero the refcount and start the fade immediately, no matter how many
    /// show requests are outstanding. Used by the safety deadline, the
    /// container mutation observer, and the global error hooks.
    pub fn force_hide(&mut self, now: f64) -> bool {
        self.refcount = 0;
        if self.phase == IndicatorPhase::Showing {
            self.phase = IndicatorPhase::Hiding { since: now };
            debug!("indicator force-hidden");
            return true;
        }
        false
    }

    /// Arm the safety deadline at `now + SAFETY_HIDE_MS`
    pub fn arm_safety(&mut self, now: f64) {
        self.safety_deadline = Some(now + SAFETY_HIDE_MS);
    }

    /// Disarm the safety deadline
    pub fn disarm_safety(&mut self) {
        self.safety_deadline = None;
    }

    /// Advance timed transitions. Returns the new phase if it changed.
    ///
    /// Fires the safety deadline if it has passed, and completes a fade whose
    /// grace period has elapsed.
    pub fn tick(&mut self, now: f64) -> Option<IndicatorPhase> {
        if let Some(deadline) = self.safety_deadline {
            if now >= deadline {
                self.safety_deadline = None;
                if self.force_hide(now) {
                    return Some(self.phase);
                }
            }
        }

        if let IndicatorPhase::Hiding { since } = self.phase {
            if now - since >= HIDE_GRACE_MS {
                self.phase = IndicatorPhase::Hidden;
                debug!("indicator hidden");
                return Some(IndicatorPhase::Hidden);
            }
        }

        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_hidden() {
        let state = IndicatorState::new();
        assert_eq!(state.phase(), IndicatorPhase::Hidden);
        assert!(!state.is_visible());
        assert!(state.safety_deadline().is_none());
    }

    #[test]
    fn test_acquire_release_round_trip() {
        let mut state = IndicatorState::new();

        assert!(state.acquire());
        assert!(state.is_visible());
        // Second acquire keeps showing, no re-apply needed
        assert!(!state.acquire());

        // One release of two outstanding: still showing
        assert!(!state.release(100.0));
        assert!(state.is_visible());

        // Last release starts the fade
        assert!(state.release(150.0));
        assert_eq!(state.phase(), IndicatorPhase::Hiding { since: 150.0 });
    }

    #[test]
    fn test_fade_completes_after_grace() {
        let mut state = IndicatorState::new();
        state.acquire();
        state.release(1000.0);

        // Grace not yet elapsed
        assert_eq!(state.tick(1000.0 + HIDE_GRACE_MS - 1.0), None);
        assert_eq!(
            state.tick(1000.0 + HIDE_GRACE_MS),
            Some(IndicatorPhase::Hidden)
        );
        // Further ticks are no-ops
        assert_eq!(state.tick(9999.0), None);
    }

    #[test]
    fn test_acquire_cancels_fade() {
        let mut state = IndicatorState::new();
        state.acquire();
        state.release(100.0);
        assert!(matches!(state.phase(), IndicatorPhase::Hiding { .. }));

        // A new load starts before the grace elapsed
        assert!(state.acquire());
        assert!(state.is_visible());
        assert_eq!(state.tick(100.0 + HIDE_GRACE_MS), None);
        assert!(state.is_visible());
    }

    #[test]
    fn test_release_saturates() {
        let mut state = IndicatorState::new();
        assert!(!state.release(0.0));
        assert!(!state.release(0.0));
        assert_eq!(state.phase(), IndicatorPhase::Hidden);

        // A later acquire still works after over-releasing
        assert!(state.acquire());
        assert!(state.release(10.0));
    }

    #[test]
    fn test_force_hide_overrides_refcount() {
        let mut state = IndicatorState::new();
        state.acquire();
        state.acquire();
        state.acquire();

        assert!(state.force_hide(500.0));
        assert_eq!(state.phase(), IndicatorPhase::Hiding { since: 500.0 });
        assert_eq!(state.tick(500.0 + HIDE_GRACE_MS), Some(IndicatorPhase::Hidden));
    }

    #[test]
    fn test_safety_deadline_fires() {
        let mut state = IndicatorState::new();
        state.acquire();
        state.arm_safety(0.0);

        // Before the deadline nothing happens
        assert_eq!(state.tick(SAFETY_HIDE_MS - 1.0), None);
        assert!(state.is_visible());

        // At the deadline the overlay is forced into its fade
        let phase = state.tick(SAFETY_HIDE_MS).expect("deadline fires");
        assert_eq!(phase, IndicatorPhase::Hiding { since: SAFETY_HIDE_MS });
        assert!(state.safety_deadline().is_none());
    }

    #[test]
    fn test_disarm_prevents_safety_fire() {
        let mut state = IndicatorState::new();
        state.acquire();
        state.arm_safety(0.0);
        state.disarm_safety();

        assert_eq!(state.tick(SAFETY_HIDE_MS * 2.0), None);
        assert!(state.is_visible());
    }

    #[test]
    fn test_settled_load_leaves_indicator_hidden() {
        // The lifecycle contract: a load that settles (however it settles)
        // releases its acquire and disarms its deadline, and the overlay is
        // fully hidden within the grace period.
        let mut state = IndicatorState::new();

        state.acquire();
        state.arm_safety(0.0);

        // ... load settles at t = 1200 ...
        state.disarm_safety();
        state.release(1200.0);

        assert_eq!(
            state.tick(1200.0 + HIDE_GRACE_MS),
            Some(IndicatorPhase::Hidden)
        );
        // The redundant late hide observes an already-hidden overlay
        assert!(!state.force_hide(1500.0));
        assert_eq!(state.phase(), IndicatorPhase::Hidden);
    }
}
