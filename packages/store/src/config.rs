//! # Timer configuration
//!
//! Durations used by the focus timer. Every field has a serde default, so a
//! missing or partial config is equivalent to [`TimerConfig::default`].
//!
//! | Field | Default |
//! |-------|---------|
//! | `focus_secs` | 25 minutes |
//! | `break_secs` | 5 minutes |
//! | `fade_step_ms` | 150 ms per 10% volume step when the music fades out |

use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TimerConfig {
    #[serde(default = "default_focus_secs")]
    pub focus_secs: u32,
    #[serde(default = "default_break_secs")]
    pub break_secs: u32,
    #[serde(default = "default_fade_step_ms")]
    pub fade_step_ms: u32,
}

fn default_focus_secs() -> u32 {
    25 * 60
}

fn default_break_secs() -> u32 {
    5 * 60
}

fn default_fade_step_ms() -> u32 {
    150
}

impl Default for TimerConfig {
    fn default() -> Self {
        Self {
            focus_secs: default_focus_secs(),
            break_secs: default_break_secs(),
            fade_step_ms: default_fade_step_ms(),
        }
    }
}

impl TimerConfig {
    /// Builder method to override both phase lengths.
    pub fn with_durations(mut self, focus_secs: u32, break_secs: u32) -> Self {
        self.focus_secs = focus_secs;
        self.break_secs = break_secs;
        self
    }
}
