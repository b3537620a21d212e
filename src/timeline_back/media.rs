use std::time::Instant;

/// the playable media element a timeline follows
pub trait Media {
    /// playback position, in seconds
    fn current_time(&self) -> f64;

    fn seek(&mut self, time: f64);

    /// length of the media, in seconds, once known
    fn duration(&self) -> Option<f64>;

    fn is_playing(&self) -> bool;

    fn play(&mut self);

    fn pause(&mut self);

    fn stop(&mut self) {
        self.pause();
        self.seek(0.0);
    }
}

/// media without content, advanced by the wall clock
#[derive(Clone, Copy, Debug)]
pub struct PlaybackClock {
    duration: f64,
    /// position of the playhead, in seconds
    position: f64,
    playing: bool,
    /// when the position was last advanced
    last_tick: Option<Instant>,
}

impl PlaybackClock {
    pub fn new(duration: f64) -> Self {
        Self {
            duration,
            position: 0.0,
            playing: false,
            last_tick: None,
        }
    }

    /// moves the playhead by the time passed since the previous call
    ///
    /// returns whether the position changed
    pub fn advance(&mut self, now: Instant) -> bool {
        if !self.playing {
            self.last_tick = None;
            return false;
        }

        let Some(last_tick) = self.last_tick.replace(now) else {
            return false;
        };

        self.position += now.saturating_duration_since(last_tick).as_secs_f64();
        if self.position >= self.duration {
            self.position = self.duration;
            self.playing = false;
            self.last_tick = None;
        }

        true
    }
}

impl Media for PlaybackClock {
    fn current_time(&self) -> f64 {
        self.position
    }

    fn seek(&mut self, time: f64) {
        self.position = time.clamp(0.0, self.duration);
    }

    fn duration(&self) -> Option<f64> {
        Some(self.duration)
    }

    fn is_playing(&self) -> bool {
        self.playing
    }

    fn play(&mut self) {
        if self.position >= self.duration {
            self.position = 0.0;
        }
        self.playing = true;
    }

    fn pause(&mut self) {
        self.playing = false;
        self.last_tick = None;
    }
}
