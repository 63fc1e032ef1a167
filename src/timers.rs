//! Countdown, animation and real-time-alarm bookkeeping.
//!
//! The countdown is decremented by the 1 Hz RTC alarm, which is re-armed
//! one second ahead on every tick while a cycle runs. The animation
//! frame counter is advanced by the 10 Hz animation timer.

use crate::config::ANIMATION_FRAMES;

/// Wall-clock time as kept by the RTC (24-hour).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TimeOfDay {
    pub hours: u8,
    pub minutes: u8,
    pub seconds: u8,
}

impl TimeOfDay {
    pub const MIDNIGHT: Self = Self::new(0, 0, 0);

    pub const fn new(hours: u8, minutes: u8, seconds: u8) -> Self {
        Self {
            hours,
            minutes,
            seconds,
        }
    }

    /// One second later, carrying into minutes and hours.
    pub const fn next_second(self) -> Self {
        let mut t = self;
        t.seconds += 1;
        if t.seconds >= 60 {
            t.seconds = 0;
            t.minutes += 1;
            if t.minutes >= 60 {
                t.minutes = 0;
                t.hours = (t.hours + 1) % 24;
            }
        }
        t
    }

    /// Seconds since midnight.
    pub const fn as_seconds(self) -> u32 {
        self.hours as u32 * 3600 + self.minutes as u32 * 60 + self.seconds as u32
    }

    /// Time of day `secs` after midnight (wraps at 24 h).
    pub const fn from_seconds(secs: u32) -> Self {
        let secs = secs % 86_400;
        Self::new((secs / 3600) as u8, (secs % 3600 / 60) as u8, (secs % 60) as u8)
    }
}

/// Real-time clock with a one-shot alarm.
pub trait RealTimeClock {
    fn now(&mut self) -> TimeOfDay;

    /// Fire the alarm when the clock reaches `at`, replacing any armed alarm.
    fn arm_alarm(&mut self, at: TimeOfDay);

    fn disarm_alarm(&mut self);
}

/// Periodic tick source.
pub trait PeriodicTimer {
    fn start(&mut self, hz: u32);
    fn stop(&mut self);
}

/// Result of one countdown tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CountdownTick {
    /// No countdown is running.
    Idle,
    /// Seconds left after this tick.
    Remaining(u32),
    /// The tick found zero seconds left; the run is over.
    Expired,
}

/// Remaining seconds of the running cycle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Countdown {
    remaining: Option<u32>,
}

impl Countdown {
    pub const fn new() -> Self {
        Self { remaining: None }
    }

    /// Start (or restart) from `total_secs`.
    pub fn start(&mut self, total_secs: u32) {
        self.remaining = Some(total_secs);
    }

    /// Discard the countdown.
    pub fn clear(&mut self) {
        self.remaining = None;
    }

    pub const fn is_running(&self) -> bool {
        self.remaining.is_some()
    }

    /// Seconds left, 0 when idle.
    pub const fn remaining(&self) -> u32 {
        match self.remaining {
            Some(secs) => secs,
            None => 0,
        }
    }

    /// Apply one alarm tick.
    pub fn tick(&mut self) -> CountdownTick {
        match self.remaining {
            None => CountdownTick::Idle,
            Some(0) => {
                self.remaining = None;
                CountdownTick::Expired
            }
            Some(secs) => {
                self.remaining = Some(secs - 1);
                CountdownTick::Remaining(secs - 1)
            }
        }
    }
}

/// Frame counter of the running-cycle animation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Animation {
    frame: u8,
}

impl Animation {
    pub const fn new() -> Self {
        Self { frame: 0 }
    }

    pub const fn frame(&self) -> u8 {
        self.frame
    }

    pub fn reset(&mut self) {
        self.frame = 0;
    }

    /// Step to the next frame, wrapping after the last.
    pub fn advance(&mut self) -> u8 {
        self.frame = (self.frame + 1) % ANIMATION_FRAMES;
        self.frame
    }
}
