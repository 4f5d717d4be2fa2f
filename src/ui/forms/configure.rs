// SPDX-License-Identifier: MPL-2.0
//! Configure form component.
//!
//! Edits the account settings (server address and account name) that the
//! login form signs in against. Saving hands the values back to the
//! application, which persists them to the settings file.

use crate::ui::design_tokens::{sizing, spacing, typography};
use iced::widget::{button, text, text_input, Column, Container, Row, Text};
use iced::{alignment, Element, Length};

/// Messages consumed by the configure form.
#[derive(Debug, Clone)]
pub enum Message {
    ServerChanged(String),
    AccountChanged(String),
    SavePressed,
    BackPressed,
}

/// Events propagated to the parent application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    None,
    /// Persist the edited settings and return to the login form.
    Saved { server: String, account: String },
    /// Transient feedback text for the status banner.
    Feedback(String),
    /// Return to the login form without saving.
    Back,
}

/// Configure form state.
#[derive(Debug, Clone, Default)]
pub struct State {
    server: String,
    account: String,
    /// False while the form is hidden; input is not accepted.
    active: bool,
}

impl State {
    /// Creates the form prefilled from persisted settings.
    #[must_use]
    pub fn new(server: String, account: String) -> Self {
        Self {
            server,
            account,
            active: false,
        }
    }

    #[must_use]
    pub fn server(&self) -> &str {
        &self.server
    }

    #[must_use]
    pub fn account(&self) -> &str {
        &self.account
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Visibility toggle applied by the coordinator's transition.
    pub fn set_active(&mut self, active: bool) {
        self.active = active;
    }
}

/// Process a configure form message and return the corresponding event.
pub fn update(state: &mut State, message: Message) -> Event {
    if !state.active {
        eprintln!("Ignoring configure form message while the form is hidden");
        return Event::None;
    }

    match message {
        Message::ServerChanged(server) => {
            state.server = server;
            Event::None
        }
        Message::AccountChanged(account) => {
            state.account = account;
            Event::None
        }
        Message::SavePressed => {
            if state.server.trim().is_empty() {
                Event::Feedback("Enter a server address".to_string())
            } else {
                Event::Saved {
                    server: state.server.trim().to_string(),
                    account: state.account.trim().to_string(),
                }
            }
        }
        Message::BackPressed => Event::Back,
    }
}

/// Render the configure form.
pub fn view<'a>(state: &'a State) -> Element<'a, Message> {
    let title = Text::new("Configure").size(typography::TITLE_MD);

    let server = text_input("Server address", &state.server)
        .on_input(Message::ServerChanged)
        .padding(spacing::XS)
        .width(Length::Fixed(sizing::FORM_WIDTH));

    let account = text_input("Account name", &state.account)
        .on_input(Message::AccountChanged)
        .on_submit(Message::SavePressed)
        .padding(spacing::XS)
        .width(Length::Fixed(sizing::FORM_WIDTH));

    let save = button(text("Save").size(typography::BODY))
        .on_press(Message::SavePressed)
        .padding(spacing::XS);

    let back = button(text("Back").size(typography::BODY))
        .on_press(Message::BackPressed)
        .padding(spacing::XS);

    let actions = Row::new().push(back).push(save).spacing(spacing::SM);

    let form = Column::new()
        .push(title)
        .push(server)
        .push(account)
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
        let mut state = State::new("sip.example.com".to_string(), "alice".to_string());
        state.set_active(true);
        state
    }

    #[test]
    fn save_emits_trimmed_values() {
        let mut state = active_state();
        update(&mut state, Message::ServerChanged("  pbx.example.org ".to_string()));
        update(&mut state, Message::AccountChanged(" bob ".to_string()));
        let event = update(&mut state, Message::SavePressed);
        assert_eq!(
            event,
            Event::Saved {
                server: "pbx.example.org".to_string(),
                account: "bob".to_string(),
            }
        );
    }

    #[test]
    fn save_with_empty_server_reports_feedback() {
        let mut state = active_state();
        update(&mut state, Message::ServerChanged("   ".to_string()));
        let event = update(&mut state, Message::SavePressed);
        assert_eq!(event, Event::Feedback("Enter a server address".to_string()));
    }

    #[test]
    fn back_requests_the_login_form() {
        let mut state = active_state();
        assert_eq!(update(&mut state, Message::BackPressed), Event::Back);
    }

    #[test]
    fn messages_while_hidden_are_ignored() {
        let mut state = State::new(String::new(), String::new());
        let event = update(&mut state, Message::ServerChanged("x".to_string()));
        assert_eq!(event, Event::None);
        assert_eq!(state.server(), "");
    }
}
