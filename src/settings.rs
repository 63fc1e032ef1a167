//! Configuration overlay - pending edits from the settings screen.
//!
//! Each numeric setting is an index into a small fixed option list;
//! advancing past the end wraps to the first option. Nothing reaches a
//! cycle until [`Overlay::commit`] is called on leaving the screen.

use crate::catalog::Cycle;

/// Minutes per rinse.
pub const RINSE_DURATIONS: [u16; 4] = [0, 15, 30, 45];

/// Number of rinses.
pub const RINSE_COUNTS: [u16; 4] = [0, 1, 2, 3];

/// Spin speed in RPM.
pub const SPIN_RPMS: [u16; 4] = [600, 800, 900, 1200];

/// Minutes of spin.
pub const SPIN_DURATIONS: [u16; 4] = [0, 5, 10, 15];

/// One editable setting on the settings screen.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Setting {
    RinseDuration,
    RinseCount,
    SpinRpm,
    SpinDuration,
    Heavy,
    Bubbles,
}

impl Setting {
    /// All settings in screen order.
    pub const ALL: [Setting; 6] = [
        Setting::RinseDuration,
        Setting::RinseCount,
        Setting::SpinRpm,
        Setting::SpinDuration,
        Setting::Heavy,
        Setting::Bubbles,
    ];

    /// Number of values this setting cycles through.
    pub const fn option_count(self) -> usize {
        match self {
            Setting::RinseDuration => RINSE_DURATIONS.len(),
            Setting::RinseCount => RINSE_COUNTS.len(),
            Setting::SpinRpm => SPIN_RPMS.len(),
            Setting::SpinDuration => SPIN_DURATIONS.len(),
            Setting::Heavy | Setting::Bubbles => 2,
        }
    }
}

/// Index after `index` in a list of `len` options.
pub const fn next_option(index: usize, len: usize) -> usize {
    if index + 1 < len {
        index + 1
    } else {
        0
    }
}

/// Working copy of the settings screen.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Overlay {
    rinse_duration: usize,
    rinse_count: usize,
    spin_rpm: usize,
    spin_duration: usize,
    heavy: bool,
    bubbles: bool,
}

impl Overlay {
    /// All settings on their first option, toggles off.
    pub const fn new() -> Self {
        Self {
            rinse_duration: 0,
            rinse_count: 0,
            spin_rpm: 0,
            spin_duration: 0,
            heavy: false,
            bubbles: false,
        }
    }

    /// Step `setting` to its next option (toggles flip).
    pub fn advance(&mut self, setting: Setting) {
        let len = setting.option_count();
        match setting {
            Setting::RinseDuration => self.rinse_duration = next_option(self.rinse_duration, len),
            Setting::RinseCount => self.rinse_count = next_option(self.rinse_count, len),
            Setting::SpinRpm => self.spin_rpm = next_option(self.spin_rpm, len),
            Setting::SpinDuration => self.spin_duration = next_option(self.spin_duration, len),
            Setting::Heavy => self.heavy = !self.heavy,
            Setting::Bubbles => self.bubbles = !self.bubbles,
        }
    }

    /// Current option index of `setting` (toggles report 0 or 1).
    pub const fn index(&self, setting: Setting) -> usize {
        match setting {
            Setting::RinseDuration => self.rinse_duration,
            Setting::RinseCount => self.rinse_count,
            Setting::SpinRpm => self.spin_rpm,
            Setting::SpinDuration => self.spin_duration,
            Setting::Heavy => self.heavy as usize,
            Setting::Bubbles => self.bubbles as usize,
        }
    }

    pub const fn rinse_duration(&self) -> u16 {
        RINSE_DURATIONS[self.rinse_duration]
    }

    pub const fn rinse_count(&self) -> u16 {
        RINSE_COUNTS[self.rinse_count]
    }

    pub const fn spin_rpm(&self) -> u16 {
        SPIN_RPMS[self.spin_rpm]
    }

    pub const fn spin_duration(&self) -> u16 {
        SPIN_DURATIONS[self.spin_duration]
    }

    pub const fn heavy(&self) -> bool {
        self.heavy
    }

    pub const fn bubbles(&self) -> bool {
        self.bubbles
    }

    /// Numeric value of a setting for display (toggles as 0/1).
    pub const fn value(&self, setting: Setting) -> u16 {
        match setting {
            Setting::RinseDuration => self.rinse_duration(),
            Setting::RinseCount => self.rinse_count(),
            Setting::SpinRpm => self.spin_rpm(),
            Setting::SpinDuration => self.spin_duration(),
            Setting::Heavy => self.heavy as u16,
            Setting::Bubbles => self.bubbles as u16,
        }
    }

    /// Write the overlay into `cycle`.
    ///
    /// Only the timing, speed and flag fields change; name and icon stay.
    pub fn commit(&self, cycle: &mut Cycle) {
        cycle.rinse_duration = self.rinse_duration();
        cycle.rinse_count = self.rinse_count();
        cycle.spin_rpm = self.spin_rpm();
        cycle.spin_duration = self.spin_duration();
        cycle.heavy = self.heavy;
        cycle.bubbles = self.bubbles;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;

    #[test]
    fn fresh_overlay_uses_first_options() {
        let overlay = Overlay::new();
        assert_eq!(overlay.rinse_duration(), 0);
        assert_eq!(overlay.rinse_count(), 0);
        assert_eq!(overlay.spin_rpm(), 600);
        assert_eq!(overlay.spin_duration(), 0);
        assert!(!overlay.heavy());
        assert!(!overlay.bubbles());
    }

    #[test]
    fn advance_wraps_to_zero_past_the_end() {
        let mut overlay = Overlay::new();
        for expected in [15, 30, 45, 0] {
            overlay.advance(Setting::RinseDuration);
            assert_eq!(overlay.rinse_duration(), expected);
        }
    }

    #[test]
    fn full_cycle_of_advances_is_identity() {
        for setting in Setting::ALL {
            let mut overlay = Overlay::new();
            overlay.advance(setting);
            let before = overlay;
            for _ in 0..setting.option_count() {
                overlay.advance(setting);
            }
            assert_eq!(overlay, before, "{:?}", setting);
        }
    }

    #[test]
    fn indices_stay_in_bounds() {
        let mut overlay = Overlay::new();
        for _ in 0..50 {
            for setting in Setting::ALL {
                overlay.advance(setting);
                assert!(overlay.index(setting) < setting.option_count());
            }
        }
    }

    #[test]
    fn advance_touches_only_its_setting() {
        let mut overlay = Overlay::new();
        overlay.advance(Setting::SpinRpm);
        assert_eq!(overlay.spin_rpm(), 800);
        assert_eq!(overlay.rinse_duration(), 0);
        assert_eq!(overlay.spin_duration(), 0);
        assert!(!overlay.heavy());
    }

    #[test]
    fn next_option_wraps() {
        assert_eq!(next_option(0, 4), 1);
        assert_eq!(next_option(3, 4), 0);
        assert_eq!(next_option(0, 1), 0);
    }

    #[test]
    fn commit_writes_only_overlay_fields() {
        let mut catalog = Catalog::new();
        let before = *catalog.current();

        let mut overlay = Overlay::new();
        overlay.advance(Setting::RinseDuration);
        overlay.advance(Setting::RinseDuration);
        overlay.advance(Setting::RinseCount);
        overlay.advance(Setting::SpinRpm);
        overlay.advance(Setting::SpinRpm);
        overlay.advance(Setting::SpinRpm);
        overlay.advance(Setting::SpinDuration);
        overlay.advance(Setting::Heavy);
        overlay.commit(catalog.current_mut());

        let after = *catalog.current();
        assert_eq!(after.name, before.name);
        assert_eq!(after.icon, before.icon);
        assert_eq!(after.rinse_duration, 30);
        assert_eq!(after.rinse_count, 1);
        assert_eq!(after.spin_rpm, 1200);
        assert_eq!(after.spin_duration, 5);
        assert!(after.heavy);
        assert!(!after.bubbles);
    }

    #[test]
    fn commit_leaves_other_cycles_alone() {
        let mut catalog = Catalog::new();
        let quick = *catalog.get(0).unwrap();
        let mut overlay = Overlay::new();
        overlay.advance(Setting::Bubbles);
        overlay.commit(catalog.current_mut());
        assert_eq!(*catalog.get(0).unwrap(), quick);
    }
}
