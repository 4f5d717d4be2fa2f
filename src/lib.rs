// SPDX-License-Identifier: MPL-2.0
//! `iced_gate` is a slide-to-unlock login screen built with the Iced GUI
//! framework.
//!
//! A drag-to-threshold gesture gates access to a login form, a secondary
//! configure form edits the account settings, and a status banner reports
//! transient feedback with timed decay.

pub mod app;
pub mod error;
pub mod ui;
