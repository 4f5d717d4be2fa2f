// SPDX-License-Identifier: MPL-2.0
//! Login and configure forms behind a single visibility coordinator.
//!
//! The [`Coordinator`] owns which form is current; form components accept
//! input only while active. Switching forms produces an atomic
//! [`Transition`] applied by the update loop.

pub mod configure;
pub mod coordinator;
pub mod login;

pub use coordinator::{Coordinator, Transition, VisibleForm};
