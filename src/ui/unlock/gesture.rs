// SPDX-License-Identifier: MPL-2.0
//! Drag-to-threshold gesture state.
//!
//! Tracks a one-dimensional drag along the unlock track, normalized to
//! `[0.0, 1.0]`. Crossing the configured threshold commits the unlock;
//! releasing below it springs the knob back to rest.

use crate::app::config::{
    DEFAULT_UNLOCK_THRESHOLD, MAX_UNLOCK_THRESHOLD, MIN_UNLOCK_THRESHOLD,
};
use serde::{Deserialize, Serialize};

/// Per-tick decay factor for the spring-back animation.
const SPRING_DECAY: f32 = 0.55;

/// Positions below this are snapped to rest.
const SPRING_EPSILON: f32 = 0.01;

/// Fraction of the track the knob must reach to unlock.
///
/// This newtype enforces validity at the type level, ensuring the value
/// is always within the supported range.
///
/// # Example
///
/// ```
/// use iced_gate::ui::unlock::UnlockThreshold;
///
/// let threshold = UnlockThreshold::new(0.7);
/// assert_eq!(threshold.value(), 0.7);
///
/// // Values outside range are clamped
/// let too_high = UnlockThreshold::new(1.5);
/// assert_eq!(too_high.value(), 1.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UnlockThreshold(f32);

impl UnlockThreshold {
    /// Creates a new threshold value, clamping to the valid range.
    #[must_use]
    pub fn new(value: f32) -> Self {
        Self(value.clamp(MIN_UNLOCK_THRESHOLD, MAX_UNLOCK_THRESHOLD))
    }

    /// Returns the threshold as a fraction of the track.
    #[must_use]
    pub fn value(self) -> f32 {
        self.0
    }
}

impl Default for UnlockThreshold {
    fn default() -> Self {
        Self(DEFAULT_UNLOCK_THRESHOLD)
    }
}

/// When a threshold crossing commits the unlock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum UnlockPolicy {
    /// Commit only when the drag is released at or past the threshold.
    /// A flick through the threshold that settles below it does not unlock.
    #[default]
    OnRelease,
    /// Commit the moment the knob crosses the threshold mid-drag.
    WhileDragging,
}

/// Outcome of feeding one gesture event into [`UnlockGesture`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GestureEvent {
    /// Nothing to report (stray event, or cancel at rest).
    None,
    /// The knob moved; carries the normalized position for rendering.
    Moved(f32),
    /// Threshold commit. Reported at most once per drag session.
    Unlocked,
    /// Released or cancelled below the threshold; spring-back started.
    SpringBack,
}

/// State machine for the slide-to-unlock drag.
///
/// Position is normalized to the track length and clamped to `[0.0, 1.0]`
/// after every input. `tracking` is true only between a begin and the
/// matching end/cancel; events arriving outside a session are dropped with
/// a soft warning.
#[derive(Debug, Clone)]
pub struct UnlockGesture {
    position: f32,
    tracking: bool,
    springing: bool,
    threshold: UnlockThreshold,
    policy: UnlockPolicy,
    track_length: f32,
}

impl UnlockGesture {
    /// Creates a gesture tracker for a track of `track_length` pixels of
    /// knob travel.
    #[must_use]
    pub fn new(threshold: UnlockThreshold, policy: UnlockPolicy, track_length: f32) -> Self {
        Self {
            position: 0.0,
            tracking: false,
            springing: false,
            threshold,
            policy,
            track_length: track_length.max(1.0),
        }
    }

    /// Normalized knob position in `[0.0, 1.0]`.
    #[must_use]
    pub fn position(&self) -> f32 {
        self.position
    }

    /// True between a begin and the matching end/cancel.
    #[must_use]
    pub fn is_tracking(&self) -> bool {
        self.tracking
    }

    /// True while the knob is animating back to rest.
    #[must_use]
    pub fn is_springing(&self) -> bool {
        self.springing
    }

    #[must_use]
    pub fn threshold(&self) -> UnlockThreshold {
        self.threshold
    }

    /// Starts a drag session. Grabbing the knob mid-spring-back picks the
    /// drag up from the current position.
    pub fn begin(&mut self) {
        if self.tracking {
            eprintln!("Ignoring drag begin while a drag session is already active");
            return;
        }
        self.springing = false;
        self.tracking = true;
    }

    /// Applies a signed pixel displacement to the knob.
    ///
    /// Events arriving while no session is active are dropped. Under the
    /// `WhileDragging` policy a threshold crossing commits immediately.
    pub fn drag_changed(&mut self, delta: f32) -> GestureEvent {
        if !self.tracking {
            eprintln!("Ignoring stray drag-changed event while not tracking");
            return GestureEvent::None;
        }

        self.position = (self.position + delta / self.track_length).clamp(0.0, 1.0);

        if self.policy == UnlockPolicy::WhileDragging && self.position >= self.threshold.value() {
            return self.commit();
        }

        GestureEvent::Moved(self.position)
    }

    /// Ends the drag session, committing the unlock when the knob rests at
    /// or past the threshold.
    pub fn drag_ended(&mut self) -> GestureEvent {
        if !self.tracking {
            eprintln!("Ignoring stray drag-ended event while not tracking");
            return GestureEvent::None;
        }
        self.tracking = false;

        if self.position >= self.threshold.value() {
            return self.commit();
        }

        self.start_spring_back()
    }

    /// Cancels the drag session. Never commits, regardless of position.
    pub fn drag_cancelled(&mut self) -> GestureEvent {
        if !self.tracking {
            eprintln!("Ignoring stray drag-cancelled event while not tracking");
            return GestureEvent::None;
        }
        self.tracking = false;
        self.start_spring_back()
    }

    /// Advances the spring-back animation by one tick.
    ///
    /// Returns the new position; callers stop ticking once
    /// [`is_springing`](Self::is_springing) turns false.
    pub fn animate(&mut self) -> f32 {
        if self.springing {
            self.position *= SPRING_DECAY;
            if self.position < SPRING_EPSILON {
                self.position = 0.0;
                self.springing = false;
            }
        }
        self.position
    }

    /// Commits the unlock: resets to rest so the session cannot fire twice.
    /// The tracking flag is cleared before the event is reported.
    fn commit(&mut self) -> GestureEvent {
        self.tracking = false;
        self.springing = false;
        self.position = 0.0;
        GestureEvent::Unlocked
    }

    fn start_spring_back(&mut self) -> GestureEvent {
        if self.position < SPRING_EPSILON {
            self.position = 0.0;
            return GestureEvent::None;
        }
        self.springing = true;
        GestureEvent::SpringBack
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gesture(threshold: f32) -> UnlockGesture {
        UnlockGesture::new(
            UnlockThreshold::new(threshold),
            UnlockPolicy::OnRelease,
            100.0,
        )
    }

    fn settle(g: &mut UnlockGesture) {
        let mut guard = 0;
        while g.is_springing() {
            g.animate();
            guard += 1;
            assert!(guard < 100, "spring-back did not settle");
        }
    }

    #[test]
    fn threshold_clamps_to_valid_range() {
        assert_eq!(UnlockThreshold::new(0.0).value(), MIN_UNLOCK_THRESHOLD);
        assert_eq!(UnlockThreshold::new(2.0).value(), MAX_UNLOCK_THRESHOLD);
        assert_eq!(UnlockThreshold::new(0.5).value(), 0.5);
    }

    #[test]
    fn position_stays_clamped_for_any_delta_sequence() {
        let mut g = gesture(0.7);
        g.begin();
        for delta in [500.0, -2000.0, 37.5, -1.0, 9999.0, -9999.0] {
            g.drag_changed(delta);
            assert!((0.0..=1.0).contains(&g.position()));
        }
    }

    #[test]
    fn release_at_threshold_unlocks_exactly_once() {
        let mut g = gesture(0.7);
        g.begin();
        g.drag_changed(75.0);
        assert_eq!(g.drag_ended(), GestureEvent::Unlocked);
        assert_eq!(g.position(), 0.0);
        assert!(!g.is_tracking());

        // A second release without a new session is a stray event
        assert_eq!(g.drag_ended(), GestureEvent::None);
    }

    #[test]
    fn release_below_threshold_springs_back_to_rest() {
        let mut g = gesture(0.7);
        g.begin();
        g.drag_changed(50.0);
        assert_eq!(g.drag_ended(), GestureEvent::SpringBack);
        assert!(g.is_springing());
        settle(&mut g);
        assert_eq!(g.position(), 0.0);
    }

    #[test]
    fn cancel_never_commits_even_past_threshold() {
        let mut g = gesture(0.7);
        g.begin();
        g.drag_changed(90.0);
        let event = g.drag_cancelled();
        assert_eq!(event, GestureEvent::SpringBack);
        settle(&mut g);
        assert_eq!(g.position(), 0.0);
    }

    #[test]
    fn cancel_at_rest_reports_nothing() {
        let mut g = gesture(0.7);
        g.begin();
        assert_eq!(g.drag_cancelled(), GestureEvent::None);
        assert!(!g.is_springing());
    }

    #[test]
    fn stray_events_are_ignored() {
        let mut g = gesture(0.7);
        assert_eq!(g.drag_changed(50.0), GestureEvent::None);
        assert_eq!(g.position(), 0.0);
        assert_eq!(g.drag_ended(), GestureEvent::None);
        assert_eq!(g.drag_cancelled(), GestureEvent::None);
    }

    #[test]
    fn flick_through_threshold_that_settles_below_does_not_unlock() {
        let mut g = gesture(0.7);
        g.begin();
        g.drag_changed(90.0); // past the threshold...
        g.drag_changed(-50.0); // ...but pulled back before release
        assert_eq!(g.drag_ended(), GestureEvent::SpringBack);
    }

    #[test]
    fn while_dragging_policy_commits_on_crossing() {
        let mut g = UnlockGesture::new(
            UnlockThreshold::new(0.7),
            UnlockPolicy::WhileDragging,
            100.0,
        );
        g.begin();
        assert_eq!(g.drag_changed(30.0), GestureEvent::Moved(0.3));
        assert_eq!(g.drag_changed(45.0), GestureEvent::Unlocked);
        assert!(!g.is_tracking());

        // The physical release that follows is a stray event; no second commit
        assert_eq!(g.drag_ended(), GestureEvent::None);
    }

    #[test]
    fn begin_during_spring_back_resumes_from_current_position() {
        let mut g = gesture(0.7);
        g.begin();
        g.drag_changed(50.0);
        g.drag_ended();
        g.animate();
        let mid_flight = g.position();
        assert!(mid_flight > 0.0);

        g.begin();
        assert!(!g.is_springing());
        assert_eq!(g.position(), mid_flight);
    }

    #[test]
    fn scenario_threshold_0_7() {
        let mut g = gesture(0.7);
        assert_eq!(g.threshold().value(), 0.7);

        g.begin();
        g.drag_changed(75.0);
        assert_eq!(g.drag_ended(), GestureEvent::Unlocked);

        g.begin();
        g.drag_changed(50.0);
        assert_eq!(g.drag_ended(), GestureEvent::SpringBack);
        settle(&mut g);
        assert_eq!(g.position(), 0.0);
    }
}
