// SPDX-License-Identifier: MPL-2.0
//! Event subscriptions for the application.
//!
//! This module routes native events to the unlock component and provides
//! the periodic tick that drives the spring-back and fade animations.

use super::Message;
use crate::ui::unlock;
use iced::{event, time, window, Subscription};
use std::time::Duration;

/// Creates the raw-event subscription.
///
/// While the screen is locked, mouse events and window resizes are routed
/// to the unlock component so it can track the drag and keep its knob
/// hit-test in sync with the window geometry. Once unlocked, the forms
/// receive input through their widgets and no raw routing is needed.
pub fn create_event_subscription(locked: bool) -> Subscription<Message> {
    if !locked {
        return Subscription::none();
    }

    event::listen_with(|event, _status, window_id| match &event {
        event::Event::Mouse(_) | event::Event::Window(window::Event::Resized(_)) => {
            Some(Message::Unlock(unlock::Message::RawEvent {
                window: window_id,
                event: event.clone(),
            }))
        }
        _ => None,
    })
}

/// Creates a periodic tick subscription for the spring-back and fade
/// animations. Idle screens produce no ticks.
pub fn create_tick_subscription(
    gesture_animating: bool,
    banner_fading: bool,
) -> Subscription<Message> {
    if gesture_animating || banner_fading {
        time::every(Duration::from_millis(100)).map(Message::Tick)
    } else {
        Subscription::none()
    }
}
