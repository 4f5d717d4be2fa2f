// SPDX-License-Identifier: MPL-2.0
//! Slide-to-unlock component.
//!
//! Translates raw mouse events routed in by the subscription layer into
//! gesture state changes, and renders the unlock track with its knob.
//! The gesture itself lives in [`gesture`]; this module owns the glue:
//! cursor bookkeeping, knob hit-testing, and the view.

pub mod gesture;

pub use gesture::{GestureEvent, UnlockGesture, UnlockPolicy, UnlockThreshold};

use crate::ui::design_tokens::{opacity, palette, radius, sizing, spacing, typography};
use iced::widget::{container, text, Column, Container, Row, Space};
use iced::{event, mouse, window, Border, Element, Length, Point, Rectangle, Size, Theme};

/// Extra pixels around the knob that still count as grabbing it.
const KNOB_HIT_PADDING: f32 = 8.0;

/// Messages consumed by the unlock component.
#[derive(Debug, Clone)]
pub enum Message {
    RawEvent {
        window: window::Id,
        event: event::Event,
    },
}

/// Events propagated to the parent application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    None,
    /// The drag committed past the threshold.
    Unlocked,
}

/// Slide-to-unlock component state.
#[derive(Debug, Clone)]
pub struct State {
    gesture: UnlockGesture,
    /// Last known cursor position (window coordinates).
    cursor_position: Option<Point>,
    /// Current window size, updated from resize events.
    window_size: Option<Size>,
}

impl State {
    #[must_use]
    pub fn new(threshold: UnlockThreshold, policy: UnlockPolicy) -> Self {
        Self {
            gesture: UnlockGesture::new(threshold, policy, knob_travel()),
            cursor_position: None,
            window_size: None,
        }
    }

    /// Normalized knob position for rendering.
    #[must_use]
    pub fn position(&self) -> f32 {
        self.gesture.position()
    }

    /// True while the spring-back animation needs ticks.
    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.gesture.is_springing()
    }

    #[must_use]
    pub fn is_tracking(&self) -> bool {
        self.gesture.is_tracking()
    }

    /// Advances the spring-back animation by one tick.
    pub fn tick(&mut self) {
        self.gesture.animate();
    }

    /// Handles a raw window/mouse event routed in by the subscription layer.
    fn handle_raw_event(&mut self, raw: &event::Event) -> Event {
        match raw {
            event::Event::Window(window::Event::Resized(size)) => {
                self.window_size = Some(*size);
                Event::None
            }
            event::Event::Mouse(mouse_event) => match mouse_event {
                mouse::Event::ButtonPressed(mouse::Button::Left) => {
                    if let Some(position) = self.cursor_position {
                        if self.knob_bounds().contains(position) {
                            self.gesture.begin();
                        }
                    }
                    Event::None
                }
                mouse::Event::CursorMoved { position } => {
                    let previous = self.cursor_position.replace(*position);
                    if self.gesture.is_tracking() {
                        if let Some(last) = previous {
                            let delta = position.x - last.x;
                            return map_gesture_event(self.gesture.drag_changed(delta));
                        }
                    }
                    Event::None
                }
                mouse::Event::ButtonReleased(mouse::Button::Left) => {
                    if self.gesture.is_tracking() {
                        return map_gesture_event(self.gesture.drag_ended());
                    }
                    Event::None
                }
                mouse::Event::CursorLeft => {
                    self.cursor_position = None;
                    if self.gesture.is_tracking() {
                        return map_gesture_event(self.gesture.drag_cancelled());
                    }
                    Event::None
                }
                _ => Event::None,
            },
            _ => Event::None,
        }
    }

    /// Knob hit area in window coordinates, grown by [`KNOB_HIT_PADDING`].
    fn knob_bounds(&self) -> Rectangle {
        let size = self.window_size.unwrap_or(Size::new(
            crate::app::WINDOW_DEFAULT_WIDTH as f32,
            crate::app::WINDOW_DEFAULT_HEIGHT as f32,
        ));

        let track_left = (size.width - sizing::TRACK_WIDTH) / 2.0;
        let track_center_y = size.height - sizing::TRACK_BOTTOM_OFFSET;
        let inset = (sizing::TRACK_HEIGHT - sizing::KNOB_SIZE) / 2.0;
        let knob_x = track_left + inset + self.gesture.position() * knob_travel();
        let knob_y = track_center_y - sizing::KNOB_SIZE / 2.0;

        Rectangle {
            x: knob_x - KNOB_HIT_PADDING,
            y: knob_y - KNOB_HIT_PADDING,
            width: sizing::KNOB_SIZE + 2.0 * KNOB_HIT_PADDING,
            height: sizing::KNOB_SIZE + 2.0 * KNOB_HIT_PADDING,
        }
    }
}

/// Pixels of travel available to the knob inside the track.
fn knob_travel() -> f32 {
    sizing::TRACK_WIDTH - sizing::KNOB_SIZE - (sizing::TRACK_HEIGHT - sizing::KNOB_SIZE)
}

/// Process an unlock message and return the corresponding event.
pub fn update(state: &mut State, message: Message) -> Event {
    match message {
        Message::RawEvent { event, .. } => state.handle_raw_event(&event),
    }
}

fn map_gesture_event(event: GestureEvent) -> Event {
    match event {
        GestureEvent::Unlocked => Event::Unlocked,
        GestureEvent::None | GestureEvent::Moved(_) | GestureEvent::SpringBack => Event::None,
    }
}

/// Render the unlock track, knob, and hint text.
pub fn view<'a>(state: &State) -> Element<'a, Message> {
    let position = state.position();
    let inset = (sizing::TRACK_HEIGHT - sizing::KNOB_SIZE) / 2.0;

    let knob = Container::new(Space::new().width(Length::Shrink).height(Length::Shrink))
        .width(Length::Fixed(sizing::KNOB_SIZE))
        .height(Length::Fixed(sizing::KNOB_SIZE))
        .style(knob_style);

    let track_content = Row::new()
        .push(Space::new()
            .width(Length::Fixed(inset + position * knob_travel()))
            .height(Length::Shrink))
        .push(knob)
        .align_y(iced::alignment::Vertical::Center)
        .height(Length::Fill);

    let track = Container::new(track_content)
        .width(Length::Fixed(sizing::TRACK_WIDTH))
        .height(Length::Fixed(sizing::TRACK_HEIGHT))
        .style(track_style);

    // The hint fades out as the knob approaches the threshold
    let hint_alpha = (1.0 - 2.0 * position).max(opacity::TRANSPARENT);
    let hint = text("Slide to unlock")
        .size(typography::BODY_SM)
        .style(move |theme: &Theme| iced::widget::text::Style {
            color: Some(iced::Color {
                a: hint_alpha,
                ..theme.palette().text
            }),
        });

    // Hint above, track below: the track stays the bottom element so the
    // knob hit-test offset matches the rendered position.
    Column::new()
        .push(hint)
        .push(track)
        .spacing(spacing::XS)
        .align_x(iced::alignment::Horizontal::Center)
        .into()
}

fn track_style(_theme: &Theme) -> container::Style {
    container::Style {
        background: Some(iced::Background::Color(iced::Color {
            a: opacity::OVERLAY_SUBTLE,
            ..palette::GRAY_400
        })),
        border: Border {
            color: palette::GRAY_700,
            width: 1.0,
            radius: radius::PILL.into(),
        },
        ..container::Style::default()
    }
}

fn knob_style(_theme: &Theme) -> container::Style {
    container::Style {
        background: Some(iced::Background::Color(palette::PRIMARY_500)),
        border: Border {
            color: palette::PRIMARY_600,
            width: 1.0,
            radius: radius::PILL.into(),
        },
        ..container::Style::default()
    }
}
