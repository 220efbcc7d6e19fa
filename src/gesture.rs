//! Simulated gesture-quality indicators.
//!
//! Readings are cosmetic and have no influence on session control.

use std::fmt;
use std::time::{Duration, Instant};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

pub const GESTURE_POLL_INTERVAL: Duration = Duration::from_millis(3000);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GestureLevel {
    #[default]
    Good,
    Warning,
    Poor,
}

impl GestureLevel {
    pub const ALL: [GestureLevel; 3] = [Self::Good, Self::Warning, Self::Poor];

    pub fn label(self) -> &'static str {
        match self {
            Self::Good => "good",
            Self::Warning => "warning",
            Self::Poor => "poor",
        }
    }
}

impl fmt::Display for GestureLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GestureReading {
    pub attention: GestureLevel,
    pub eye_contact: GestureLevel,
    pub posture: GestureLevel,
}

impl fmt::Display for GestureReading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "attention={} eye_contact={} posture={}",
            self.attention, self.eye_contact, self.posture
        )
    }
}

pub trait GestureSource: Send {
    fn sample(&mut self) -> GestureReading;
}

/// Picks every level uniformly at random.
pub struct RandomGestureSource {
    rng: StdRng,
}

impl RandomGestureSource {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn from_seed(seed: Option<u64>) -> Self {
        seed.map_or_else(Self::new, Self::seeded)
    }

    fn level(&mut self) -> GestureLevel {
        GestureLevel::ALL[self.rng.gen_range(0..GestureLevel::ALL.len())]
    }
}

impl Default for RandomGestureSource {
    fn default() -> Self {
        Self::new()
    }
}

impl GestureSource for RandomGestureSource {
    fn sample(&mut self) -> GestureReading {
        GestureReading {
            attention: self.level(),
            eye_contact: self.level(),
            posture: self.level(),
        }
    }
}

/// Rate-limits a [`GestureSource`] to one sample per [`GESTURE_POLL_INTERVAL`].
pub struct GesturePoller {
    source: Box<dyn GestureSource>,
    interval: Duration,
    last_sample: Option<Instant>,
    reading: GestureReading,
}

impl GesturePoller {
    pub fn new(source: impl GestureSource + 'static) -> Self {
        Self {
            source: Box::new(source),
            interval: GESTURE_POLL_INTERVAL,
            last_sample: None,
            reading: GestureReading::default(),
        }
    }

    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    pub fn reading(&self) -> GestureReading {
        self.reading
    }

    /// Samples when the interview is active and the interval has elapsed.
    /// Inactive polls reset the timer so a fresh session starts from "good".
    pub fn poll(&mut self, now: Instant, interview_active: bool) -> Option<GestureReading> {
        if !interview_active {
            self.last_sample = None;
            self.reading = GestureReading::default();
            return None;
        }

        let Some(last) = self.last_sample else {
            self.last_sample = Some(now);
            return None;
        };
        if now.saturating_duration_since(last) < self.interval {
            return None;
        }

        self.last_sample = Some(now);
        self.reading = self.source.sample();
        Some(self.reading)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct AlwaysPoor;

    impl GestureSource for AlwaysPoor {
        fn sample(&mut self) -> GestureReading {
            GestureReading {
                attention: GestureLevel::Poor,
                eye_contact: GestureLevel::Poor,
                posture: GestureLevel::Poor,
            }
        }
    }

    #[test]
    fn seeded_sources_repeat() {
        let mut first = RandomGestureSource::seeded(7);
        let mut second = RandomGestureSource::seeded(7);
        for _ in 0..5 {
            assert_eq!(first.sample(), second.sample());
        }
    }

    #[test]
    fn poller_waits_one_interval_after_activation() {
        let start = Instant::now();
        let mut poller = GesturePoller::new(AlwaysPoor);

        assert_eq!(poller.poll(start, true), None);
        assert_eq!(poller.poll(start + Duration::from_millis(2999), true), None);
        let reading = poller
            .poll(start + GESTURE_POLL_INTERVAL, true)
            .expect("interval elapsed");
        assert_eq!(reading.posture, GestureLevel::Poor);
    }

    #[test]
    fn inactive_poll_never_samples_and_resets() {
        let start = Instant::now();
        let mut poller = GesturePoller::new(AlwaysPoor).with_interval(Duration::ZERO);
        poller.poll(start, true);
        poller.poll(start, true);
        assert_eq!(poller.reading().attention, GestureLevel::Poor);

        assert_eq!(poller.poll(start, false), None);
        assert_eq!(poller.reading(), GestureReading::default());
    }
}
