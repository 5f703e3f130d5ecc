//! Workout stopwatch for the gym tracker.

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum BodyPart {
    #[default]
    Chest,
    Back,
    Legs,
    Arms,
    Shoulders,
    Cardio,
}

impl BodyPart {
    pub const ALL: [BodyPart; 6] = [
        BodyPart::Chest,
        BodyPart::Back,
        BodyPart::Legs,
        BodyPart::Arms,
        BodyPart::Shoulders,
        BodyPart::Cardio,
    ];

    pub fn label(self) -> &'static str {
        match self {
            BodyPart::Chest => "Chest",
            BodyPart::Back => "Back",
            BodyPart::Legs => "Legs",
            BodyPart::Arms => "Arms",
            BodyPart::Shoulders => "Shoulders",
            BodyPart::Cardio => "Cardio",
        }
    }
}

impl std::fmt::Display for BodyPart {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Elapsed time of the current workout. Stopping resets it.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Workout {
    part: BodyPart,
    elapsed_secs: u64,
    tracking: bool,
}

impl Workout {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn part(&self) -> BodyPart {
        self.part
    }

    pub fn select(&mut self, part: BodyPart) {
        self.part = part;
    }

    pub fn is_tracking(&self) -> bool {
        self.tracking
    }

    pub fn elapsed_secs(&self) -> u64 {
        self.elapsed_secs
    }

    pub fn start(&mut self) {
        self.tracking = true;
    }

    pub fn stop(&mut self) {
        self.tracking = false;
        self.elapsed_secs = 0;
    }

    pub fn tick(&mut self) {
        if self.tracking {
            self.elapsed_secs += 1;
        }
    }

    pub fn clock(&self) -> String {
        format_clock(self.elapsed_secs)
    }

    /// Label of the start button, e.g. `START CHEST`.
    pub fn start_label(&self) -> String {
        format!("START {}", self.part.label().to_uppercase())
    }
}

/// `HH:MM:SS`
pub fn format_clock(seconds: u64) -> String {
    let hours = seconds / 3600;
    let minutes = (seconds % 3600) / 60;
    let secs = seconds % 60;
    format!("{hours:02}:{minutes:02}:{secs:02}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_clock() {
        assert_eq!(format_clock(0), "00:00:00");
        assert_eq!(format_clock(59), "00:00:59");
        assert_eq!(format_clock(3_725), "01:02:05");
        assert_eq!(format_clock(100 * 3600), "100:00:00");
    }

    #[test]
    fn test_stopwatch() {
        let mut workout = Workout::new();
        assert_eq!(workout.part(), BodyPart::Chest);
        workout.tick();
        assert_eq!(workout.elapsed_secs(), 0);

        workout.select(BodyPart::Legs);
        assert_eq!(workout.start_label(), "START LEGS");
        workout.start();
        workout.tick();
        workout.tick();
        assert_eq!(workout.clock(), "00:00:02");

        workout.stop();
        assert!(!workout.is_tracking());
        assert_eq!(workout.clock(), "00:00:00");
    }
}
