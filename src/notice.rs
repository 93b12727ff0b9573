use std::time::{Duration, Instant};

pub const DEFAULT_HOLD: Duration = Duration::from_millis(2000);
pub const FADE: Duration = Duration::from_millis(500);

/// Transient message shown in a corner of the window. Once posted it runs
/// its own timer to completion; nothing cancels it.
#[derive(Debug, Clone)]
pub struct Notice {
    pub text: String,
    posted_at: Instant,
    hold: Duration,
}

impl Notice {
    pub fn new(text: &str, posted_at: Instant, hold: Duration) -> Self {
        Self {
            text: text.to_string(),
            posted_at,
            hold,
        }
    }

    /// 1.0 while held, then fades linearly to 0.0.
    pub fn opacity(&self, now: Instant) -> f32 {
        let age = now.saturating_duration_since(self.posted_at);
        if age <= self.hold {
            1.0
        } else {
            let faded = (age - self.hold).as_secs_f32() / FADE.as_secs_f32();
            (1.0 - faded).max(0.0)
        }
    }

    pub fn is_expired(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.posted_at) >= self.hold + FADE
    }
}
