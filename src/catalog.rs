//! Wash cycle presets and the circular cycle menu.
//!
//! The catalog is a fixed array; "previous" and "next" are index
//! arithmetic modulo the catalog length, so navigation never allocates
//! and the presets live for the whole program.

use crate::render::Icon;

/// Number of entries in the cycle menu.
pub const CYCLE_COUNT: usize = 6;

/// Index of the cycle selected at power-up (Daily).
pub const DEFAULT_CYCLE: usize = 1;

/// A wash preset with its timing and spin parameters.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Cycle {
    /// Label shown on the menu.
    pub name: &'static str,
    /// Minutes spent in each rinse.
    pub rinse_duration: u16,
    /// Number of rinses.
    pub rinse_count: u16,
    /// Spin speed in RPM.
    pub spin_rpm: u16,
    /// Minutes spent spinning.
    pub spin_duration: u16,
    /// Heavy-duty wash.
    pub heavy: bool,
    /// Bubble injection enabled.
    pub bubbles: bool,
    /// Menu icon.
    pub icon: Icon,
}

impl Cycle {
    /// Total cycle length in minutes.
    pub const fn total_minutes(&self) -> u32 {
        self.rinse_duration as u32 * self.rinse_count as u32 + self.spin_duration as u32
    }

    /// Total cycle length in seconds, the countdown start value.
    pub const fn total_seconds(&self) -> u32 {
        self.total_minutes() * 60
    }
}

const PRESETS: [Cycle; CYCLE_COUNT] = [
    Cycle {
        name: "Quick",
        rinse_duration: 5,
        rinse_count: 3,
        spin_rpm: 900,
        spin_duration: 5,
        heavy: false,
        bubbles: true,
        icon: Icon::Clock,
    },
    Cycle {
        name: "Daily",
        rinse_duration: 15,
        rinse_count: 2,
        spin_rpm: 1200,
        spin_duration: 8,
        heavy: false,
        bubbles: true,
        icon: Icon::Day,
    },
    Cycle {
        name: "Heavy",
        rinse_duration: 10,
        rinse_count: 3,
        spin_rpm: 1200,
        spin_duration: 10,
        heavy: true,
        bubbles: true,
        icon: Icon::Anvil,
    },
    Cycle {
        name: "Rinse",
        rinse_duration: 10,
        rinse_count: 1,
        spin_rpm: 0,
        spin_duration: 0,
        heavy: false,
        bubbles: false,
        icon: Icon::Water,
    },
    Cycle {
        name: "Spin",
        rinse_duration: 0,
        rinse_count: 0,
        spin_rpm: 1200,
        spin_duration: 10,
        heavy: false,
        bubbles: false,
        icon: Icon::Vortex,
    },
    Cycle {
        name: "Config",
        rinse_duration: 0,
        rinse_count: 0,
        spin_rpm: 600,
        spin_duration: 0,
        heavy: false,
        bubbles: false,
        icon: Icon::Gear,
    },
];

/// Index of the entry after `index`, wrapping to the start.
pub const fn next_index(index: usize) -> usize {
    (index + 1) % CYCLE_COUNT
}

/// Index of the entry before `index`, wrapping to the end.
pub const fn previous_index(index: usize) -> usize {
    (index + CYCLE_COUNT - 1) % CYCLE_COUNT
}

/// Owns every cycle and tracks the one shown on the menu.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Catalog {
    cycles: [Cycle; CYCLE_COUNT],
    current: usize,
}

impl Catalog {
    /// Catalog with the factory presets, Daily selected.
    pub const fn new() -> Self {
        Self {
            cycles: PRESETS,
            current: DEFAULT_CYCLE,
        }
    }

    /// Index of the selected cycle.
    pub const fn current_index(&self) -> usize {
        self.current
    }

    /// The selected cycle.
    pub fn current(&self) -> &Cycle {
        &self.cycles[self.current]
    }

    /// Mutable access to the selected cycle's parameters.
    pub fn current_mut(&mut self) -> &mut Cycle {
        &mut self.cycles[self.current]
    }

    /// Cycle at `index`, if in range.
    pub fn get(&self, index: usize) -> Option<&Cycle> {
        self.cycles.get(index)
    }

    /// Select the next cycle and return it.
    pub fn advance(&mut self) -> &Cycle {
        self.current = next_index(self.current);
        self.current()
    }

    /// Select the previous cycle and return it.
    pub fn retreat(&mut self) -> &Cycle {
        self.current = previous_index(self.current);
        self.current()
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_on_daily() {
        let catalog = Catalog::new();
        assert_eq!(catalog.current().name, "Daily");
        assert_eq!(catalog.current().icon, Icon::Day);
    }

    #[test]
    fn advancing_six_times_returns_to_start() {
        let mut catalog = Catalog::new();
        let start = catalog.current_index();
        let mut seen = [false; CYCLE_COUNT];
        for _ in 0..CYCLE_COUNT {
            seen[catalog.current_index()] = true;
            catalog.advance();
        }
        assert_eq!(catalog.current_index(), start);
        assert!(seen.iter().all(|&s| s), "every cycle visited once");
    }

    #[test]
    fn retreat_undoes_advance() {
        let mut catalog = Catalog::new();
        catalog.advance();
        catalog.retreat();
        assert_eq!(catalog.current_index(), DEFAULT_CYCLE);
    }

    #[test]
    fn menu_order_wraps_from_config_to_quick() {
        assert_eq!(next_index(5), 0);
        assert_eq!(previous_index(0), 5);

        let catalog = Catalog::new();
        let order: [&str; CYCLE_COUNT] = core::array::from_fn(|i| catalog.get(i).unwrap().name);
        assert_eq!(order, ["Quick", "Daily", "Heavy", "Rinse", "Spin", "Config"]);
    }

    #[test]
    fn total_seconds_of_fifteen_by_two_plus_eight() {
        let cycle = Catalog::new().get(1).copied().unwrap();
        assert_eq!(cycle.rinse_duration, 15);
        assert_eq!(cycle.rinse_count, 2);
        assert_eq!(cycle.spin_duration, 8);
        assert_eq!(cycle.total_minutes(), 38);
        assert_eq!(cycle.total_seconds(), 2280);
    }

    #[test]
    fn get_out_of_range_is_none() {
        assert!(Catalog::new().get(CYCLE_COUNT).is_none());
    }
}
