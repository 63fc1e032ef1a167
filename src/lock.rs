//! Door lock with hold-to-release confirmation.
//!
//! A tap on the lock button engages the lock. Releasing it again needs
//! the button held for [`UNLOCK_HOLD_SECS`] ticks of the 1 Hz lock timer
//! and then let go inside the button:
//!
//! ```text
//! Unlocked --press--> LockedIdle --press--> LockedPressing
//!                        ^                     |  tick x3
//!                        |                     v
//!                        +--release-- ReadyToRelease --release in zone--> Unlocked
//! ```
//!
//! Letting go early (or outside the button) drops back to `LockedIdle`.

use crate::config::UNLOCK_HOLD_SECS;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LockState {
    Unlocked,
    LockedIdle,
    LockedPressing,
    ReadyToRelease,
}

/// Door lock solenoid.
pub trait LockActuator {
    /// `true` releases the door, `false` holds it shut.
    fn set_open(&mut self, open: bool);
}

/// What a lock input changed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LockTransition {
    /// Nothing changed.
    None,
    /// Unlocked -> LockedIdle; the actuator closes.
    Engaged,
    /// Hold started; the 1 Hz timer must run.
    HoldStarted,
    /// Hold counted one more second.
    HoldProgress(u8),
    /// Hold abandoned before release; back to LockedIdle.
    HoldAborted,
    /// Hold reached the threshold; release now unlocks.
    ReadyToRelease,
    /// Lock released; the actuator opens.
    Released,
}

/// Lock state plus the hold counter.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LockController {
    state: LockState,
    held_secs: u8,
}

impl LockController {
    pub const fn new() -> Self {
        Self {
            state: LockState::Unlocked,
            held_secs: 0,
        }
    }

    pub const fn state(&self) -> LockState {
        self.state
    }

    /// Seconds the button has been held in the current hold.
    pub const fn held_secs(&self) -> u8 {
        self.held_secs
    }

    /// `true` in every state but `Unlocked`.
    pub const fn is_locked(&self) -> bool {
        !matches!(self.state, LockState::Unlocked)
    }

    /// Press inside the lock button.
    pub fn press(&mut self) -> LockTransition {
        match self.state {
            LockState::Unlocked => {
                self.state = LockState::LockedIdle;
                self.held_secs = 0;
                LockTransition::Engaged
            }
            LockState::LockedIdle => {
                self.state = LockState::LockedPressing;
                self.held_secs = 0;
                LockTransition::HoldStarted
            }
            LockState::LockedPressing | LockState::ReadyToRelease => LockTransition::None,
        }
    }

    /// Release anywhere; `in_zone` tells whether it was inside the button.
    pub fn release(&mut self, in_zone: bool) -> LockTransition {
        match self.state {
            LockState::LockedPressing => {
                self.state = LockState::LockedIdle;
                self.held_secs = 0;
                LockTransition::HoldAborted
            }
            LockState::ReadyToRelease => {
                self.held_secs = 0;
                if in_zone {
                    self.state = LockState::Unlocked;
                    LockTransition::Released
                } else {
                    self.state = LockState::LockedIdle;
                    LockTransition::HoldAborted
                }
            }
            LockState::Unlocked | LockState::LockedIdle => LockTransition::None,
        }
    }

    /// One tick of the 1 Hz lock timer.
    pub fn tick(&mut self) -> LockTransition {
        if self.state != LockState::LockedPressing {
            return LockTransition::None;
        }
        self.held_secs = self.held_secs.saturating_add(1);
        if self.held_secs >= UNLOCK_HOLD_SECS {
            self.state = LockState::ReadyToRelease;
            LockTransition::ReadyToRelease
        } else {
            LockTransition::HoldProgress(self.held_secs)
        }
    }
}

impl Default for LockController {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engaged() -> LockController {
        let mut lock = LockController::new();
        assert_eq!(lock.press(), LockTransition::Engaged);
        assert_eq!(lock.release(true), LockTransition::None);
        assert_eq!(lock.state(), LockState::LockedIdle);
        lock
    }

    #[test]
    fn tap_engages_lock() {
        let lock = engaged();
        assert!(lock.is_locked());
    }

    #[test]
    fn short_hold_returns_to_idle() {
        let mut lock = engaged();
        assert_eq!(lock.press(), LockTransition::HoldStarted);
        assert_eq!(lock.tick(), LockTransition::HoldProgress(1));
        assert_eq!(lock.tick(), LockTransition::HoldProgress(2));
        assert_eq!(lock.release(true), LockTransition::HoldAborted);
        assert_eq!(lock.state(), LockState::LockedIdle);
        assert_eq!(lock.held_secs(), 0);
    }

    #[test]
    fn three_second_hold_then_release_unlocks() {
        let mut lock = engaged();
        lock.press();
        lock.tick();
        lock.tick();
        assert_eq!(lock.tick(), LockTransition::ReadyToRelease);
        assert_eq!(lock.state(), LockState::ReadyToRelease);
        assert_eq!(lock.release(true), LockTransition::Released);
        assert_eq!(lock.state(), LockState::Unlocked);
        assert_eq!(lock.held_secs(), 0);
    }

    #[test]
    fn release_outside_button_keeps_lock() {
        let mut lock = engaged();
        lock.press();
        for _ in 0..3 {
            lock.tick();
        }
        assert_eq!(lock.release(false), LockTransition::HoldAborted);
        assert_eq!(lock.state(), LockState::LockedIdle);
    }

    #[test]
    fn ticks_only_count_while_pressing() {
        let mut lock = LockController::new();
        assert_eq!(lock.tick(), LockTransition::None);
        let mut lock = engaged();
        assert_eq!(lock.tick(), LockTransition::None);
        assert_eq!(lock.held_secs(), 0);
    }

    #[test]
    fn ready_state_ignores_extra_ticks_and_presses() {
        let mut lock = engaged();
        lock.press();
        for _ in 0..3 {
            lock.tick();
        }
        assert_eq!(lock.tick(), LockTransition::None);
        assert_eq!(lock.press(), LockTransition::None);
        assert_eq!(lock.state(), LockState::ReadyToRelease);
    }
}
