// SPDX-License-Identifier: MPL-2.0
//! Top-level messages and runtime flags for the application.

use crate::ui::forms::{configure, login};
use crate::ui::status;
use crate::ui::unlock;
use std::time::Instant;

/// Top-level messages consumed by `App::update`. The variants forward
/// lower-level component messages while keeping a single update entrypoint.
#[derive(Debug, Clone)]
pub enum Message {
    Unlock(unlock::Message),
    Login(login::Message),
    Configure(configure::Message),
    Status(status::Message),
    /// Periodic tick driving spring-back and fade animations.
    Tick(Instant),
}

/// Runtime flags passed in from the CLI to tweak startup behavior.
#[derive(Debug, Default)]
pub struct Flags {
    /// Optional config directory override (for settings.toml).
    /// Takes precedence over `ICED_GATE_CONFIG_DIR` environment variable.
    pub config_dir: Option<String>,
}
