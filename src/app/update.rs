// SPDX-License-Identifier: MPL-2.0
//! Update logic and message handlers for the application.
//!
//! This module contains the specialized message handlers for each part of
//! the screen. All state mutation happens here, on the event loop; the
//! only scheduled work is the status banner's expiry timer, armed as an
//! async task carrying the generation it was created for.

use super::{config, Message};
use crate::ui::forms::{configure, login, Coordinator, VisibleForm};
use crate::ui::status::{self, StatusBanner, StatusTtl};
use crate::ui::unlock;
use iced::Task;
use std::time::Instant;

/// Context for update operations containing mutable references to app state.
pub struct UpdateContext<'a> {
    pub config: &'a mut config::Config,
    pub locked: &'a mut bool,
    pub unlock: &'a mut unlock::State,
    pub forms: &'a mut Coordinator,
    pub login: &'a mut login::State,
    pub configure: &'a mut configure::State,
    pub status: &'a mut StatusBanner,
    pub status_ttl: StatusTtl,
}

/// Posts a status message and arms its expiry timer.
///
/// The returned task sleeps for the ttl and reports back with the
/// generation the message was posted under; the banner discards the
/// callback if a newer post or clear has bumped the generation since.
pub fn post_status(ctx: &mut UpdateContext<'_>, text: impl Into<String>) -> Task<Message> {
    let ttl = ctx.status_ttl;
    let generation = ctx.status.post(text, ttl, Instant::now());
    Task::perform(
        async move { tokio::time::sleep(ttl.as_duration()).await },
        move |()| Message::Status(status::Message::Expired { generation }),
    )
}

/// Makes exactly the coordinator's current form interactive.
///
/// Applied in one step after every visibility decision, so there is no
/// frame where both forms accept input, and none where neither does while
/// the screen is unlocked.
fn sync_active_form(ctx: &mut UpdateContext<'_>) {
    let current = ctx.forms.current();
    let unlocked = !*ctx.locked;
    ctx.login
        .set_active(unlocked && current == VisibleForm::Login);
    ctx.configure
        .set_active(unlocked && current == VisibleForm::Configure);
}

/// Switches to the requested form. Redundant requests are no-ops.
///
/// A real switch also clears the banner: feedback belonging to the
/// hidden form must not linger over the revealed one.
fn show_form(ctx: &mut UpdateContext<'_>, form: VisibleForm) {
    if ctx.forms.show(form).is_some() {
        sync_active_form(ctx);
        ctx.status.clear();
    }
}

/// Handles raw gesture input routed to the unlock component.
pub fn handle_unlock_message(
    ctx: &mut UpdateContext<'_>,
    message: unlock::Message,
) -> Task<Message> {
    match unlock::update(ctx.unlock, message) {
        unlock::Event::Unlocked => {
            *ctx.locked = false;
            // Reveal the login form; the request is idempotent if it is
            // already the coordinator's current form.
            ctx.forms.show(VisibleForm::Login);
            sync_active_form(ctx);
            post_status(ctx, "Unlocked")
        }
        unlock::Event::None => Task::none(),
    }
}

/// Handles login form input and its feedback events.
pub fn handle_login_message(
    ctx: &mut UpdateContext<'_>,
    message: login::Message,
) -> Task<Message> {
    match login::update(ctx.login, message) {
        login::Event::Feedback(text) => post_status(ctx, text),
        login::Event::OpenConfigure => {
            show_form(ctx, VisibleForm::Configure);
            Task::none()
        }
        login::Event::None => Task::none(),
    }
}

/// Handles configure form input; saving persists the account settings.
pub fn handle_configure_message(
    ctx: &mut UpdateContext<'_>,
    message: configure::Message,
) -> Task<Message> {
    match configure::update(ctx.configure, message) {
        configure::Event::Saved { server, account } => {
            ctx.config.account.server = Some(server);
            ctx.config.account.account = if account.is_empty() {
                None
            } else {
                Some(account)
            };
            let feedback = match config::save(ctx.config) {
                Ok(()) => "Settings saved".to_string(),
                Err(err) => {
                    eprintln!("Failed to save settings: {err}");
                    "Settings could not be saved".to_string()
                }
            };
            show_form(ctx, VisibleForm::Login);
            post_status(ctx, feedback)
        }
        configure::Event::Feedback(text) => post_status(ctx, text),
        configure::Event::Back => {
            show_form(ctx, VisibleForm::Login);
            Task::none()
        }
        configure::Event::None => Task::none(),
    }
}

/// Handles status banner callbacks (expiry timers).
pub fn handle_status_message(
    ctx: &mut UpdateContext<'_>,
    message: &status::Message,
) -> Task<Message> {
    ctx.status.handle_message(message, Instant::now());
    Task::none()
}

/// Advances the spring-back and fade animations.
pub fn handle_tick(ctx: &mut UpdateContext<'_>, now: Instant) -> Task<Message> {
    ctx.unlock.tick();
    ctx.status.tick(now);
    Task::none()
}
