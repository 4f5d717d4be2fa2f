// SPDX-License-Identifier: MPL-2.0
//! View rendering for the application.
//!
//! Renders the wordmark header, the status banner, and either the lock
//! screen (slide-to-unlock track) or the current form, based on state
//! owned by the update loop.

use super::Message;
use crate::ui::design_tokens::{sizing, spacing, typography};
use crate::ui::forms::{configure, login, Coordinator, VisibleForm};
use crate::ui::status::{self, StatusBanner};
use crate::ui::unlock;
use iced::widget::{Column, Container, Space, Text};
use iced::{alignment, Element, Length, Padding};
use std::time::Instant;

/// Context required to render the application view.
pub struct ViewContext<'a> {
    pub locked: bool,
    pub unlock: &'a unlock::State,
    pub forms: &'a Coordinator,
    pub login: &'a login::State,
    pub configure: &'a configure::State,
    pub status: &'a StatusBanner,
}

/// Renders the screen based on the lock state and the current form.
pub fn view(ctx: ViewContext<'_>) -> Element<'_, Message> {
    let wordmark = Container::new(Text::new("IcedGate").size(typography::TITLE_LG))
        .width(Length::Fill)
        .align_x(alignment::Horizontal::Center)
        .padding(spacing::LG);

    let banner = status::view::<Message>(ctx.status, Instant::now());

    let body: Element<'_, Message> = if ctx.locked {
        view_lock_screen(ctx.unlock)
    } else {
        view_current_form(ctx)
    };

    Column::new()
        .push(wordmark)
        .push(banner)
        .push(body)
        .width(Length::Fill)
        .height(Length::Fill)
        .into()
}

/// Lock screen: the track sits near the bottom of the window, at the
/// same offset the unlock component uses for knob hit-testing.
fn view_lock_screen(state: &unlock::State) -> Element<'_, Message> {
    let track = unlock::view(state).map(Message::Unlock);

    Column::new()
        .push(Space::new().width(Length::Fill).height(Length::Fill))
        .push(
            Container::new(track)
                .width(Length::Fill)
                .align_x(alignment::Horizontal::Center)
                .padding(Padding {
                    top: 0.0,
                    right: 0.0,
                    bottom: sizing::TRACK_BOTTOM_OFFSET - sizing::TRACK_HEIGHT / 2.0,
                    left: 0.0,
                }),
        )
        .height(Length::Fill)
        .into()
}

fn view_current_form(ctx: ViewContext<'_>) -> Element<'_, Message> {
    let form: Element<'_, Message> = match ctx.forms.current() {
        VisibleForm::Login => login::view(ctx.login).map(Message::Login),
        VisibleForm::Configure => configure::view(ctx.configure).map(Message::Configure),
    };

    Container::new(form)
        .width(Length::Fill)
        .height(Length::Fill)
        .align_x(alignment::Horizontal::Center)
        .align_y(alignment::Vertical::Center)
        .into()
}
