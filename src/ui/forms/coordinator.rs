// SPDX-License-Identifier: MPL-2.0
//! Single mutation point for form visibility.
//!
//! Exactly one of the two forms is current at any time. Switching yields a
//! [`Transition`] value that the update loop applies in one step, so there
//! is no frame where both forms (or neither) are interactive.

/// Forms the screen can present.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VisibleForm {
    #[default]
    Login,
    Configure,
}

/// An atomic visibility switch: hide one form, show the other.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub hide: VisibleForm,
    pub show: VisibleForm,
}

/// Owns which form is current. All visibility decisions flow through
/// [`show`](Coordinator::show); nothing else mutates the current form.
#[derive(Debug, Clone, Copy, Default)]
pub struct Coordinator {
    current: VisibleForm,
}

impl Coordinator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The currently visible form. Read-only.
    #[must_use]
    pub fn current(&self) -> VisibleForm {
        self.current
    }

    /// Switches to `form`, returning the transition to apply.
    ///
    /// Requesting the form that is already current is a no-op and returns
    /// `None` (idempotent).
    pub fn show(&mut self, form: VisibleForm) -> Option<Transition> {
        if self.current == form {
            return None;
        }
        let hide = self.current;
        self.current = form;
        Some(Transition { hide, show: form })
    }
}
