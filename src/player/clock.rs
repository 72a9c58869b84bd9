use std::time::Duration;

/// Outcome of advancing the clock by one tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ClockTick {
    /// Paused, nothing moved
    Idle,
    Position(f64),
    /// Reached the end of the track; the clock is now paused there
    Ended,
}

/// Simulated playback position, advanced by explicit ticks.
///
/// Stands in for a media element: it only knows where playback is, not what
/// is being played.
#[derive(Debug, Clone, PartialEq)]
pub struct PlaybackClock {
    position_secs: f64,
    playing: bool,
    speed: f64,
    duration_secs: Option<f64>,
}

impl PlaybackClock {
    pub fn new() -> Self {
        Self {
            position_secs: 0.0,
            playing: false,
            speed: 1.0,
            duration_secs: None,
        }
    }

    /// Rewind to 0 and pause for a newly loaded track
    pub fn reset(&mut self, duration_secs: Option<f64>) {
        self.position_secs = 0.0;
        self.playing = false;
        self.duration_secs = duration_secs.filter(|d| d.is_finite() && *d >= 0.0);
    }

    pub fn play(&mut self) {
        self.playing = true;
    }

    pub fn pause(&mut self) {
        self.playing = false;
    }

    pub fn toggle(&mut self) {
        self.playing = !self.playing;
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn position_secs(&self) -> f64 {
        self.position_secs
    }

    pub fn duration_secs(&self) -> Option<f64> {
        self.duration_secs
    }

    pub fn speed(&self) -> f64 {
        self.speed
    }

    /// Ignores non-positive and non-finite rates
    pub fn set_speed(&mut self, speed: f64) {
        if speed.is_finite() && speed > 0.0 {
            self.speed = speed;
        }
    }

    /// Jump to `secs`, clamped to the track
    pub fn seek(&mut self, secs: f64) {
        let secs = if secs.is_nan() { 0.0 } else { secs.max(0.0) };
        self.position_secs = match self.duration_secs {
            Some(duration) => secs.min(duration),
            None => secs,
        };
    }

    pub fn tick(&mut self, elapsed: Duration) -> ClockTick {
        if !self.playing {
            return ClockTick::Idle;
        }

        self.position_secs += elapsed.as_secs_f64() * self.speed;
        if let Some(duration) = self.duration_secs
            && self.position_secs >= duration
        {
            self.position_secs = duration;
            self.playing = false;
            return ClockTick::Ended;
        }

        ClockTick::Position(self.position_secs)
    }
}

impl Default for PlaybackClock {
    fn default() -> Self {
        Self::new()
    }
}

/// Format seconds as `m:ss` (minutes unpadded)
pub fn format_time(secs: f64) -> String {
    let total = if secs.is_finite() && secs > 0.0 {
        secs.floor() as u64
    } else {
        0
    };
    format!("{}:{:02}", total / 60, total % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paused_clock_does_not_move() {
        let mut clock = PlaybackClock::new();
        assert_eq!(clock.tick(Duration::from_secs(1)), ClockTick::Idle);
        assert_eq!(clock.position_secs(), 0.0);
    }

    #[test]
    fn ticks_scale_with_speed() {
        let mut clock = PlaybackClock::new();
        clock.play();
        clock.set_speed(2.0);
        clock.set_speed(-1.0);
        assert_eq!(
            clock.tick(Duration::from_millis(500)),
            ClockTick::Position(1.0)
        );
    }

    #[test]
    fn ends_at_duration() {
        let mut clock = PlaybackClock::new();
        clock.reset(Some(3.0));
        clock.play();
        clock.tick(Duration::from_secs(2));
        assert_eq!(clock.tick(Duration::from_secs(2)), ClockTick::Ended);
        assert_eq!(clock.position_secs(), 3.0);
        assert!(!clock.is_playing());
    }

    #[test]
    fn seek_clamps() {
        let mut clock = PlaybackClock::new();
        clock.seek(-4.0);
        assert_eq!(clock.position_secs(), 0.0);
        clock.seek(500.0);
        assert_eq!(clock.position_secs(), 500.0);

        clock.reset(Some(90.0));
        clock.seek(500.0);
        assert_eq!(clock.position_secs(), 90.0);
        clock.seek(f64::NAN);
        assert_eq!(clock.position_secs(), 0.0);
    }

    #[test]
    fn formats_minutes_and_seconds() {
        assert_eq!(format_time(0.0), "0:00");
        assert_eq!(format_time(75.9), "1:15");
        assert_eq!(format_time(600.0), "10:00");
        assert_eq!(format_time(-3.0), "0:00");
        assert_eq!(format_time(f64::NAN), "0:00");
    }
}
