// SPDX-License-Identifier: MPL-2.0
//! Login form component.
//!
//! Username and password inputs with a sign-in button. The form validates
//! locally (empty-field check) and reports outcomes as feedback events;
//! actual authentication is outside this component.

use crate::ui::design_tokens::{sizing, spacing, typography};
use iced::widget::{button, text, text_input, Column, Container, Row, Text};
use iced::{alignment, Element, Length};

/// Messages consumed by the login form.
#[derive(Debug, Clone)]
pub enum Message {
    UsernameChanged(String),
    PasswordChanged(String),
    SubmitPressed,
    ConfigurePressed,
}

/// Events propagated to the parent application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    None,
    /// Transient feedback text for the status banner.
    Feedback(String),
    /// The user asked for the configure form.
    OpenConfigure,
}

/// Login form state.
#[derive(Debug, Clone, Default)]
pub struct State {
    username: String,
    password: String,
    /// False while the form is hidden; input is not accepted.
    active: bool,
}

impl State {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn username(&self) -> &str {
        &self.username
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Visibility toggle applied by the coordinator's transition.
    ///
    /// Hiding the form drops the typed password; credentials are never
    /// retained beyond the visible session.
    pub fn set_active(&mut self, active: bool) {
        self.active = active;
        if !active {
            self.password.clear();
        }
    }
}

/// Process a login form message and return the corresponding event.
pub fn update(state: &mut State, message: Message) -> Event {
    if !state.active {
        eprintln!("Ignoring login form message while the form is hidden");
        return Event::None;
    }

    match message {
        Message::UsernameChanged(username) => {
            state.username = username;
            Event::None
        }
        Message::PasswordChanged(password) => {
            state.password = password;
            Event::None
        }
        Message::SubmitPressed => {
            if state.username.trim().is_empty() || state.password.is_empty() {
                Event::Feedback("Enter a username and password".to_string())
            } else {
                Event::Feedback(format!("Signing in as {}...", state.username.trim()))
            }
        }
        Message::ConfigurePressed => Event::OpenConfigure,
    }
}

/// Render the login form.
pub fn view<'a>(state: &'a State) -> Element<'a, Message> {
    let title = Text::new("Sign in").size(typography::TITLE_MD);

    let username = text_input("Username", &state.username)
        .on_input(Message::UsernameChanged)
        .padding(spacing::XS)
        .width(Length::Fixed(sizing::FORM_WIDTH));

    let password = text_input("Password", &state.password)
        .secure(true)
        .on_input(Message::PasswordChanged)
        .on_submit(Message::SubmitPressed)
        .padding(spacing::XS)
        .width(Length::Fixed(sizing::FORM_WIDTH));

    let submit = button(text("Sign in").size(typography::BODY))
        .on_press(Message::SubmitPressed)
        .padding(spacing::XS);

    let configure = button(text("Configure").size(typography::BODY))
        .on_press(Message::ConfigurePressed)
        .padding(spacing::XS);

    let actions = Row::new()
        .push(configure)
        .push(submit)
        .spacing(spacing::SM);

    let form = Column::new()
        .push(title)
        .push(username)
        .push(password)
        .push(actions)
        .spacing(spacing::MD)
        .align_x(alignment::Horizontal::Center);

    Container::new(form)
        .width(Length::Fill)
        .align_x(alignment::Horizontal::Center)
        .into()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn active_state() -> State {
        let mut state = State::new();
        state.set_active(true);
        state
    }

    #[test]
    fn submit_with_empty_fields_reports_feedback() {
        let mut state = active_state();
        let event = update(&mut state, Message::SubmitPressed);
        assert_eq!(
            event,
            Event::Feedback("Enter a username and password".to_string())
        );
    }

    #[test]
    fn submit_with_credentials_reports_signing_in() {
        let mut state = active_state();
        update(&mut state, Message::UsernameChanged("alice".to_string()));
        update(&mut state, Message::PasswordChanged("hunter2".to_string()));
        let event = update(&mut state, Message::SubmitPressed);
        assert_eq!(event, Event::Feedback("Signing in as alice...".to_string()));
    }

    #[test]
    fn configure_button_requests_the_configure_form() {
        let mut state = active_state();
        let event = update(&mut state, Message::ConfigurePressed);
        assert_eq!(event, Event::OpenConfigure);
    }

    #[test]
    fn hiding_the_form_clears_the_password() {
        let mut state = active_state();
        update(&mut state, Message::PasswordChanged("hunter2".to_string()));
        state.set_active(false);
        state.set_active(true);
        let event = update(&mut state, Message::SubmitPressed);
        // Password is gone, so submit falls back to the empty-field path
        assert_eq!(
            event,
            Event::Feedback("Enter a username and password".to_string())
        );
    }

    #[test]
    fn messages_while_hidden_are_ignored() {
        let mut state = State::new();
        let event = update(&mut state, Message::UsernameChanged("alice".to_string()));
        assert_eq!(event, Event::None);
        assert_eq!(state.username(), "");
    }
}
