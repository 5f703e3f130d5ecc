//! # Focus timer
//!
//! [`Pomodoro`] alternates between a focus phase and a break phase. The UI calls
//! [`Pomodoro::tick`] once a second while the timer runs and acts on the
//! [`MusicCommand`]s the timer returns: background music starts with the
//! timer, pauses with it, rewinds on reset and fades out when a phase ends.

use crate::config::TimerConfig;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Focus,
    Break,
}

impl Phase {
    pub fn next(self) -> Self {
        match self {
            Phase::Focus => Phase::Break,
            Phase::Break => Phase::Focus,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Phase::Focus => "Deep Focus",
            Phase::Break => "Break Time",
        }
    }

    /// Message shown when this phase runs out.
    pub fn finished_message(self) -> &'static str {
        match self {
            Phase::Focus => "Work session finished! Take a break.",
            Phase::Break => "Break over! Back to work.",
        }
    }
}

/// What the audio player should do next.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MusicCommand {
    Play,
    Pause,
    /// Pause and seek back to the start.
    Rewind,
    /// Fade out, see [`FadeOut`].
    FadeOut,
}

/// Reported by [`Pomodoro::tick`] when a phase runs out.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PhaseFinished {
    pub finished: Phase,
    pub next: Phase,
    pub message: &'static str,
    pub music: Option<MusicCommand>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Pomodoro {
    config: TimerConfig,
    phase: Phase,
    remaining: u32,
    running: bool,
    music_playing: bool,
}

impl Default for Pomodoro {
    fn default() -> Self {
        Self::new(TimerConfig::default())
    }
}

impl Pomodoro {
    pub fn new(config: TimerConfig) -> Self {
        let remaining = config.focus_secs;
        Self {
            config,
            phase: Phase::Focus,
            remaining,
            running: false,
            music_playing: false,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn remaining_secs(&self) -> u32 {
        self.remaining
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn is_music_playing(&self) -> bool {
        self.music_playing
    }

    pub fn config(&self) -> &TimerConfig {
        &self.config
    }

    fn duration(&self, phase: Phase) -> u32 {
        match phase {
            Phase::Focus => self.config.focus_secs,
            Phase::Break => self.config.break_secs,
        }
    }

    /// Start or pause the countdown.
    pub fn toggle(&mut self) -> Option<MusicCommand> {
        if self.running {
            self.running = false;
            self.music_playing = false;
            return Some(MusicCommand::Pause);
        }
        self.running = true;
        if self.music_playing {
            None
        } else {
            self.music_playing = true;
            Some(MusicCommand::Play)
        }
    }

    /// Stop and restore the full duration of the current phase.
    pub fn reset(&mut self) -> MusicCommand {
        self.running = false;
        self.music_playing = false;
        self.remaining = self.duration(self.phase);
        MusicCommand::Rewind
    }

    /// Play or pause the music without touching the countdown.
    pub fn toggle_music(&mut self) -> MusicCommand {
        self.music_playing = !self.music_playing;
        if self.music_playing {
            MusicCommand::Play
        } else {
            MusicCommand::Pause
        }
    }

    /// Called by the player once a fade-out has completed.
    pub fn music_stopped(&mut self) {
        self.music_playing = false;
    }

    /// Advance one second. Returns the finished phase when the countdown hits zero.
    pub fn tick(&mut self) -> Option<PhaseFinished> {
        if !self.running {
            return None;
        }
        self.remaining = self.remaining.saturating_sub(1);
        if self.remaining > 0 {
            return None;
        }

        self.running = false;
        let finished = self.phase;
        let next = finished.next();
        self.phase = next;
        self.remaining = self.duration(next);

        Some(PhaseFinished {
            finished,
            next,
            message: finished.finished_message(),
            music: self.music_playing.then_some(MusicCommand::FadeOut),
        })
    }

    /// `m:ss`
    pub fn display(&self) -> String {
        format!("{}:{:02}", self.remaining / 60, self.remaining % 60)
    }
}

/// Volume ramp for fading the music out.
///
/// Starts at full volume and lowers it by 10% per step. Once the volume is at
/// 10% the next step yields `None`: the player should then pause and restore
/// full volume for the next playback.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FadeOut {
    tenths: u8,
}

impl Default for FadeOut {
    fn default() -> Self {
        Self { tenths: 10 }
    }
}

impl Iterator for FadeOut {
    type Item = f64;

    fn next(&mut self) -> Option<f64> {
        if self.tenths <= 1 {
            return None;
        }
        self.tenths -= 1;
        Some(f64::from(self.tenths) / 10.0)
    }
}
