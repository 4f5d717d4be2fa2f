// SPDX-License-Identifier: MPL-2.0
//! Application root state and orchestration between the lock screen and
//! the two forms.
//!
//! The `App` struct wires together the unlock gesture, the form
//! coordinator, and the status banner, and translates component events
//! into side effects like config persistence or expiry timers. Policy
//! decisions (threshold, unlock policy, banner ttl) are resolved here from
//! the loaded config so user-facing behavior is easy to audit in one
//! place.

pub mod config;
mod message;
pub mod paths;
mod subscription;
mod update;
mod view;

pub use message::{Flags, Message};

use crate::ui::forms::{configure, login, Coordinator, VisibleForm};
use crate::ui::status::{self, StatusBanner, StatusTtl};
use crate::ui::theming::ThemeMode;
use crate::ui::unlock::{self, UnlockThreshold};
use iced::{window, Element, Subscription, Task, Theme};
use std::fmt;
use std::time::Instant;

/// Root Iced application state bridging the lock screen, the forms, and
/// the status banner.
pub struct App {
    config: config::Config,
    /// True until the slide-to-unlock gesture commits.
    locked: bool,
    unlock: unlock::State,
    forms: Coordinator,
    login: login::State,
    configure: configure::State,
    status: StatusBanner,
    status_ttl: StatusTtl,
    theme_mode: ThemeMode,
}

impl fmt::Debug for App {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("App")
            .field("locked", &self.locked)
            .field("current_form", &self.forms.current())
            .finish()
    }
}

pub const WINDOW_DEFAULT_WIDTH: u32 = 420;
pub const WINDOW_DEFAULT_HEIGHT: u32 = 680;
pub const MIN_WINDOW_WIDTH: u32 = 380;
pub const MIN_WINDOW_HEIGHT: u32 = 560;

/// Builds the window settings
pub fn window_settings() -> window::Settings {
    window::Settings {
        size: iced::Size::new(WINDOW_DEFAULT_WIDTH as f32, WINDOW_DEFAULT_HEIGHT as f32),
        min_size: Some(iced::Size::new(
            MIN_WINDOW_WIDTH as f32,
            MIN_WINDOW_HEIGHT as f32,
        )),
        ..window::Settings::default()
    }
}

/// Entry point used by `main.rs` to launch the Iced application loop.
pub fn run(flags: Flags) -> iced::Result {
    paths::init_cli_overrides(flags.config_dir);

    iced::application(App::new, App::update, App::view)
        .title(App::title)
        .theme(App::theme)
        .window(window_settings())
        .subscription(App::subscription)
        .run()
}

impl Default for App {
    fn default() -> Self {
        Self {
            config: config::Config::default(),
            locked: true,
            unlock: unlock::State::new(
                UnlockThreshold::default(),
                unlock::UnlockPolicy::default(),
            ),
            forms: Coordinator::new(),
            login: login::State::new(),
            configure: configure::State::default(),
            status: StatusBanner::new(),
            status_ttl: StatusTtl::default(),
            theme_mode: ThemeMode::System,
        }
    }
}

impl App {
    /// Initializes application state from the loaded configuration.
    fn new() -> (Self, Task<Message>) {
        let (config, config_warning) = config::load();

        let threshold = UnlockThreshold::new(
            config
                .unlock
                .threshold
                .unwrap_or(config::DEFAULT_UNLOCK_THRESHOLD),
        );
        let policy = config.unlock.policy.unwrap_or_default();
        let status_ttl = StatusTtl::new(
            config
                .status
                .ttl_secs
                .unwrap_or(config::DEFAULT_STATUS_TTL_SECS),
        );

        let configure = configure::State::new(
            config.account.server.clone().unwrap_or_default(),
            config.account.account.clone().unwrap_or_default(),
        );

        let mut app = App {
            unlock: unlock::State::new(threshold, policy),
            configure,
            status_ttl,
            theme_mode: config.general.theme_mode,
            config,
            ..Self::default()
        };

        // Surface config loading problems on the banner once the window is up
        let task = if let Some(warning) = config_warning {
            let generation = app.status.post(warning, app.status_ttl, Instant::now());
            let ttl = app.status_ttl.as_duration();
            Task::perform(
                async move { tokio::time::sleep(ttl).await },
                move |()| Message::Status(status::Message::Expired { generation }),
            )
        } else {
            Task::none()
        };

        (app, task)
    }

    fn title(&self) -> String {
        if self.locked {
            return "IcedGate".to_string();
        }
        match self.forms.current() {
            VisibleForm::Login => "Sign in - IcedGate".to_string(),
            VisibleForm::Configure => "Configure - IcedGate".to_string(),
        }
    }

    fn theme(&self) -> Theme {
        if self.theme_mode.is_dark() {
            Theme::Dark
        } else {
            Theme::Light
        }
    }

    fn subscription(&self) -> Subscription<Message> {
        let event_sub = subscription::create_event_subscription(self.locked);
        let tick_sub = subscription::create_tick_subscription(
            self.unlock.is_animating(),
            self.status.is_fading(),
        );

        Subscription::batch([event_sub, tick_sub])
    }

    fn update(&mut self, message: Message) -> Task<Message> {
        let mut ctx = update::UpdateContext {
            config: &mut self.config,
            locked: &mut self.locked,
            unlock: &mut self.unlock,
            forms: &mut self.forms,
            login: &mut self.login,
            configure: &mut self.configure,
            status: &mut self.status,
            status_ttl: self.status_ttl,
        };

        match message {
            Message::Unlock(unlock_message) => {
                update::handle_unlock_message(&mut ctx, unlock_message)
            }
            Message::Login(login_message) => update::handle_login_message(&mut ctx, login_message),
            Message::Configure(configure_message) => {
                update::handle_configure_message(&mut ctx, configure_message)
            }
            Message::Status(status_message) => {
                update::handle_status_message(&mut ctx, &status_message)
            }
            Message::Tick(now) => update::handle_tick(&mut ctx, now),
        }
    }

    fn view(&self) -> Element<'_, Message> {
        view::view(view::ViewContext {
            locked: self.locked,
            unlock: &self.unlock,
            forms: &self.forms,
            login: &self.login,
            configure: &self.configure,
            status: &self.status,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use iced::{event, mouse, Point};

    fn cursor_moved(app: &mut App, position: Point) {
        app.update(Message::Unlock(unlock::Message::RawEvent {
            window: window::Id::unique(),
            event: event::Event::Mouse(mouse::Event::CursorMoved { position }),
        }));
    }

    fn mouse_button(app: &mut App, event: mouse::Event) {
        app.update(Message::Unlock(unlock::Message::RawEvent {
            window: window::Id::unique(),
            event: event::Event::Mouse(event),
        }));
    }

    /// Drives a full drag from the knob to the given fraction of the track.
    fn drag_to(app: &mut App, fraction: f32) {
        // Knob rests at the left end of the track in the default window
        let track_left = (WINDOW_DEFAULT_WIDTH as f32 - 280.0) / 2.0;
        let knob_center = Point::new(
            track_left + 24.0,
            WINDOW_DEFAULT_HEIGHT as f32 - 120.0,
        );
        cursor_moved(app, knob_center);
        mouse_button(app, mouse::Event::ButtonPressed(mouse::Button::Left));
        cursor_moved(
            app,
            Point::new(knob_center.x + 232.0 * fraction, knob_center.y),
        );
        mouse_button(app, mouse::Event::ButtonReleased(mouse::Button::Left));
    }

    #[test]
    fn default_app_starts_locked_on_login_form() {
        let app = App::default();
        assert!(app.locked);
        assert_eq!(app.forms.current(), VisibleForm::Login);
        assert!(!app.login.is_active());
        assert!(!app.configure.is_active());
    }

    #[test]
    fn full_drag_unlocks_and_activates_login() {
        let mut app = App::default();
        drag_to(&mut app, 0.9);

        assert!(!app.locked);
        assert_eq!(app.forms.current(), VisibleForm::Login);
        assert!(app.login.is_active());
        assert!(!app.configure.is_active());
        assert_eq!(app.status.visible_text(), Some("Unlocked"));
    }

    #[test]
    fn short_drag_keeps_the_screen_locked() {
        let mut app = App::default();
        drag_to(&mut app, 0.4);

        assert!(app.locked);
        assert!(!app.login.is_active());
        assert!(app.status.visible_text().is_none());
    }

    #[test]
    fn spring_back_settles_through_ticks() {
        let mut app = App::default();
        drag_to(&mut app, 0.4);
        assert!(app.unlock.is_animating());

        let mut guard = 0;
        while app.unlock.is_animating() {
            app.update(Message::Tick(Instant::now()));
            guard += 1;
            assert!(guard < 100, "spring-back did not settle");
        }
        assert_eq!(app.unlock.position(), 0.0);
    }

    #[test]
    fn login_feedback_lands_on_the_banner() {
        let mut app = App::default();
        drag_to(&mut app, 0.9);

        app.update(Message::Login(login::Message::SubmitPressed));
        assert_eq!(
            app.status.visible_text(),
            Some("Enter a username and password")
        );
    }

    #[test]
    fn configure_round_trip_switches_forms() {
        let mut app = App::default();
        drag_to(&mut app, 0.9);

        app.update(Message::Login(login::Message::ConfigurePressed));
        assert_eq!(app.forms.current(), VisibleForm::Configure);
        assert!(app.configure.is_active());
        assert!(!app.login.is_active());

        app.update(Message::Configure(configure::Message::BackPressed));
        assert_eq!(app.forms.current(), VisibleForm::Login);
        assert!(app.login.is_active());
        assert!(!app.configure.is_active());
    }

    #[test]
    fn form_switch_clears_stale_feedback() {
        let mut app = App::default();
        drag_to(&mut app, 0.9);

        app.update(Message::Login(login::Message::SubmitPressed));
        assert!(app.status.visible_text().is_some());

        app.update(Message::Login(login::Message::ConfigurePressed));
        assert!(app.status.visible_text().is_none());
    }

    #[test]
    fn stale_expiry_does_not_hide_a_newer_message() {
        let mut app = App::default();
        drag_to(&mut app, 0.9);
        let stale_generation = app.status.current_generation();

        // A newer post supersedes the "Unlocked" message
        app.update(Message::Login(login::Message::SubmitPressed));

        app.update(Message::Status(status::Message::Expired {
            generation: stale_generation,
        }));
        assert_eq!(
            app.status.visible_text(),
            Some("Enter a username and password")
        );
        assert!(!app.status.is_fading());
    }

    #[test]
    fn matching_expiry_starts_the_fade() {
        let mut app = App::default();
        drag_to(&mut app, 0.9);
        let generation = app.status.current_generation();

        app.update(Message::Status(status::Message::Expired { generation }));
        assert!(app.status.is_fading());
    }

    #[test]
    fn title_reflects_lock_state_and_form() {
        let mut app = App::default();
        assert_eq!(app.title(), "IcedGate");

        drag_to(&mut app, 0.9);
        assert_eq!(app.title(), "Sign in - IcedGate");

        app.update(Message::Login(login::Message::ConfigurePressed));
        assert_eq!(app.title(), "Configure - IcedGate");
    }

    #[test]
    fn subscription_is_idle_when_nothing_animates() {
        let mut app = App::default();
        drag_to(&mut app, 0.9);
        // Unlock resets the knob and nothing fades yet; only correctness of
        // state is asserted here since subscriptions are opaque.
        assert!(!app.unlock.is_animating());
        assert!(!app.status.is_fading());
    }
}
