// SPDX-License-Identifier: MPL-2.0
//! Transient status banner with timed decay.
//!
//! A posted message stays visible for its ttl, then fades out and clears.
//! Each post or clear bumps a generation counter; the expiry callback
//! carries the generation it was armed for, and callbacks whose generation
//! no longer matches are discarded. A superseded message can therefore
//! never hide its replacement, no matter when its timer lands.
//!
//! State machine: Hidden → post → Visible (timer armed) → expiry(match) →
//! Fading → Hidden. A new post re-arms; clear cancels from any state.

use crate::app::config::{
    DEFAULT_STATUS_TTL_SECS, MAX_STATUS_TTL_SECS, MIN_STATUS_TTL_SECS, STATUS_FADE_DURATION_MS,
};
use crate::ui::design_tokens::{opacity, spacing, typography};
use iced::widget::{text, Container};
use iced::{alignment, Element, Length, Theme};
use std::time::{Duration, Instant};

/// Time a status message stays fully visible, in seconds.
///
/// Clamped to the supported range on construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusTtl(u32);

impl StatusTtl {
    /// Creates a new ttl value, clamping to the valid range.
    #[must_use]
    pub fn new(value: u32) -> Self {
        Self(value.clamp(MIN_STATUS_TTL_SECS, MAX_STATUS_TTL_SECS))
    }

    /// Returns the value in seconds.
    #[must_use]
    pub fn value(self) -> u32 {
        self.0
    }

    /// Returns the ttl as a Duration.
    #[must_use]
    pub fn as_duration(self) -> Duration {
        Duration::from_secs(u64::from(self.0))
    }
}

impl Default for StatusTtl {
    fn default() -> Self {
        Self(DEFAULT_STATUS_TTL_SECS)
    }
}

/// Messages consumed by the status banner.
#[derive(Debug, Clone)]
pub enum Message {
    /// The expiry timer armed for `generation` fired.
    Expired { generation: u64 },
}

/// A message currently owned by the banner.
#[derive(Debug, Clone)]
struct StatusMessage {
    text: String,
    posted_at: Instant,
    ttl: Duration,
}

/// Banner lifecycle phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Hidden,
    Visible,
    Fading { started_at: Instant },
}

/// Transient status banner state.
#[derive(Debug, Clone)]
pub struct StatusBanner {
    message: Option<StatusMessage>,
    phase: Phase,
    /// Bumped on every post/clear; expiry callbacks for older generations
    /// are stale and must be discarded.
    generation: u64,
}

impl Default for StatusBanner {
    fn default() -> Self {
        Self {
            message: None,
            phase: Phase::Hidden,
            generation: 0,
        }
    }
}

impl StatusBanner {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Posts a message, replacing any current one.
    ///
    /// Returns the generation to arm the expiry timer with. Any timer armed
    /// for an earlier post is invalidated by the bump.
    pub fn post(&mut self, text: impl Into<String>, ttl: StatusTtl, now: Instant) -> u64 {
        self.generation += 1;
        self.message = Some(StatusMessage {
            text: text.into(),
            posted_at: now,
            ttl: ttl.as_duration(),
        });
        self.phase = Phase::Visible;
        self.generation
    }

    /// Immediately hides the banner and invalidates any armed timer.
    /// Idempotent; calling with nothing visible is a no-op.
    pub fn clear(&mut self) {
        if self.message.is_none() && self.phase == Phase::Hidden {
            return;
        }
        self.generation += 1;
        self.message = None;
        self.phase = Phase::Hidden;
    }

    /// Handles an expiry callback.
    ///
    /// A stale generation means the message it was armed for has already
    /// been superseded or cleared; the callback is discarded. A matching
    /// generation starts the fade-out.
    pub fn expire(&mut self, generation: u64, now: Instant) {
        if generation != self.generation {
            return;
        }
        if self.phase == Phase::Visible {
            self.phase = Phase::Fading { started_at: now };
        }
    }

    /// Advances the fade-out; clears the banner once the fade completes.
    pub fn tick(&mut self, now: Instant) {
        if let Phase::Fading { started_at } = self.phase {
            if now.duration_since(started_at) >= fade_duration() {
                self.message = None;
                self.phase = Phase::Hidden;
            }
        }
    }

    /// Handles a status message.
    pub fn handle_message(&mut self, message: &Message, now: Instant) {
        match message {
            Message::Expired { generation } => self.expire(*generation, now),
        }
    }

    /// The text to render, if any.
    #[must_use]
    pub fn visible_text(&self) -> Option<&str> {
        self.message.as_ref().map(|m| m.text.as_str())
    }

    /// True while the fade animation needs ticks.
    #[must_use]
    pub fn is_fading(&self) -> bool {
        matches!(self.phase, Phase::Fading { .. })
    }

    /// True while anything is on screen.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.phase != Phase::Hidden
    }

    /// Current opacity for rendering.
    #[must_use]
    pub fn opacity(&self, now: Instant) -> f32 {
        match self.phase {
            Phase::Hidden => opacity::TRANSPARENT,
            Phase::Visible => opacity::OPAQUE,
            Phase::Fading { started_at } => {
                let elapsed = now.duration_since(started_at).as_secs_f32();
                (1.0 - elapsed / fade_duration().as_secs_f32()).clamp(0.0, 1.0)
            }
        }
    }

    /// Age of the visible message, used by tests and diagnostics.
    #[must_use]
    pub fn message_age(&self, now: Instant) -> Option<Duration> {
        self.message.as_ref().map(|m| now.duration_since(m.posted_at))
    }

    #[must_use]
    pub fn current_generation(&self) -> u64 {
        self.generation
    }

    /// The ttl the visible message was posted with.
    #[must_use]
    pub fn message_ttl(&self) -> Option<Duration> {
        self.message.as_ref().map(|m| m.ttl)
    }
}

fn fade_duration() -> Duration {
    Duration::from_millis(STATUS_FADE_DURATION_MS)
}

/// Render the status banner; an empty shrink container when hidden.
pub fn view<'a, M: 'a>(banner: &StatusBanner, now: Instant) -> Element<'a, M> {
    let Some(message) = banner.visible_text() else {
        return Container::new(text(""))
            .width(Length::Shrink)
            .height(Length::Shrink)
            .into();
    };

    let alpha = banner.opacity(now);
    let label = text(message.to_string())
        .size(typography::BODY_SM)
        .style(move |theme: &Theme| iced::widget::text::Style {
            color: Some(iced::Color {
                a: alpha,
                ..theme.palette().text
            }),
        });

    Container::new(label)
        .width(Length::Fill)
        .align_x(alignment::Horizontal::Center)
        .padding(spacing::SM)
        .into()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ttl(secs: u32) -> StatusTtl {
        StatusTtl::new(secs)
    }

    #[test]
    fn ttl_clamps_to_valid_range() {
        assert_eq!(StatusTtl::new(0).value(), MIN_STATUS_TTL_SECS);
        assert_eq!(StatusTtl::new(100).value(), MAX_STATUS_TTL_SECS);
        assert_eq!(StatusTtl::new(5).value(), 5);
    }

    #[test]
    fn new_banner_is_hidden() {
        let banner = StatusBanner::new();
        assert!(!banner.is_active());
        assert!(banner.visible_text().is_none());
    }

    #[test]
    fn post_makes_the_message_visible() {
        let mut banner = StatusBanner::new();
        let now = Instant::now();
        banner.post("unlocking", ttl(2), now);
        assert_eq!(banner.visible_text(), Some("unlocking"));
        assert_eq!(banner.opacity(now), 1.0);
        assert_eq!(banner.message_ttl(), Some(Duration::from_secs(2)));
    }

    #[test]
    fn matching_expiry_fades_then_hides() {
        let mut banner = StatusBanner::new();
        let now = Instant::now();
        let generation = banner.post("unlocking", ttl(2), now);

        let expiry = now + Duration::from_secs(2);
        banner.expire(generation, expiry);
        assert!(banner.is_fading());
        assert!(banner.opacity(expiry) >= 0.99);

        let mid_fade = expiry + Duration::from_millis(STATUS_FADE_DURATION_MS / 2);
        let alpha = banner.opacity(mid_fade);
        assert!(alpha > 0.0 && alpha < 1.0);

        let after_fade = expiry + Duration::from_millis(STATUS_FADE_DURATION_MS);
        banner.tick(after_fade);
        assert!(!banner.is_active());
        assert!(banner.visible_text().is_none());
    }

    #[test]
    fn superseded_timer_is_discarded() {
        let mut banner = StatusBanner::new();
        let t0 = Instant::now();
        let first = banner.post("a", ttl(2), t0);

        let t1 = t0 + Duration::from_millis(500);
        let second = banner.post("b", ttl(2), t1);
        assert_ne!(first, second);

        // "a"'s timer lands at t0+2s; its generation is stale by then
        let a_expiry = t0 + Duration::from_secs(2);
        banner.expire(first, a_expiry);
        assert!(!banner.is_fading());
        assert_eq!(banner.visible_text(), Some("b"));
        assert_eq!(banner.opacity(a_expiry), 1.0);

        // "b"'s own timer still works
        banner.expire(second, t1 + Duration::from_secs(2));
        assert!(banner.is_fading());
    }

    #[test]
    fn expiry_after_clear_is_discarded() {
        let mut banner = StatusBanner::new();
        let now = Instant::now();
        let generation = banner.post("a", ttl(2), now);
        banner.clear();
        banner.expire(generation, now + Duration::from_secs(2));
        assert!(!banner.is_active());
    }

    #[test]
    fn clear_with_no_message_is_a_no_op() {
        let mut banner = StatusBanner::new();
        let generation_before = banner.current_generation();
        banner.clear();
        assert_eq!(banner.current_generation(), generation_before);
        assert!(!banner.is_active());
    }

    #[test]
    fn clear_hides_immediately() {
        let mut banner = StatusBanner::new();
        let now = Instant::now();
        banner.post("a", ttl(2), now);
        banner.clear();
        assert!(!banner.is_active());
        assert_eq!(banner.opacity(now), 0.0);
    }

    #[test]
    fn duplicate_expiry_during_fade_does_not_restart_it() {
        let mut banner = StatusBanner::new();
        let now = Instant::now();
        let generation = banner.post("a", ttl(2), now);

        let expiry = now + Duration::from_secs(2);
        banner.expire(generation, expiry);
        let Phase::Fading { started_at } = banner.phase else {
            panic!("expected fading phase");
        };

        banner.expire(generation, expiry + Duration::from_millis(100));
        let Phase::Fading {
            started_at: after_second,
        } = banner.phase
        else {
            panic!("expected fading phase");
        };
        assert_eq!(started_at, after_second);
    }

    #[test]
    fn message_age_tracks_posted_at() {
        let mut banner = StatusBanner::new();
        let now = Instant::now();
        banner.post("a", ttl(2), now);
        let age = banner.message_age(now + Duration::from_millis(300)).unwrap();
        assert_eq!(age, Duration::from_millis(300));
    }
}
