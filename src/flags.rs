//! Redraw flags shared between event handlers and the render loop.
//!
//! Handlers only ever set bits; the render loop is the only consumer and
//! clears what it takes. A single `AtomicU16` holds all flags, so raising
//! and taking are each one read-modify-write.

use core::ops::{BitOr, BitOrAssign};
use core::sync::atomic::{AtomicU16, Ordering};

/// A set of screen regions that need repainting.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Redraw(u16);

impl Redraw {
    pub const NONE: Self = Self(0);
    /// Full cycle menu.
    pub const MENU: Self = Self(1 << 0);
    /// Full settings screen.
    pub const SETTINGS: Self = Self(1 << 1);
    /// Full running-cycle screen.
    pub const RUNNING: Self = Self(1 << 2);
    /// Full "door open" notice screen.
    pub const DOOR_NOTICE: Self = Self(1 << 3);
    /// Cycle icon and summary on the menu.
    pub const SUMMARY: Self = Self(1 << 4);
    /// Remaining-time text on the running screen.
    pub const COUNTDOWN: Self = Self(1 << 5);
    /// Next animation frame on the running screen.
    pub const ANIMATION: Self = Self(1 << 6);
    /// Lock button icon.
    pub const LOCK_ICON: Self = Self(1 << 7);
    /// "DOOR OPEN" banner over the current screen.
    pub const DOOR_BANNER: Self = Self(1 << 8);

    /// Flags that repaint a whole screen.
    pub const FULL_SCREENS: Self =
        Self(Self::MENU.0 | Self::SETTINGS.0 | Self::RUNNING.0 | Self::DOOR_NOTICE.0);

    pub const fn bits(self) -> u16 {
        self.0
    }

    pub const fn from_bits(bits: u16) -> Self {
        Self(bits)
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub const fn contains(self, other: Self) -> bool {
        other.0 != 0 && self.0 & other.0 == other.0
    }

    pub const fn intersects(self, other: Self) -> bool {
        self.0 & other.0 != 0
    }

    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }
}

impl BitOr for Redraw {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        self.union(rhs)
    }
}

impl BitOrAssign for Redraw {
    fn bitor_assign(&mut self, rhs: Self) {
        *self = self.union(rhs);
    }
}

/// Interrupt-safe set of pending redraws.
pub struct DirtyFlags {
    bits: AtomicU16,
}

impl DirtyFlags {
    pub const fn new() -> Self {
        Self {
            bits: AtomicU16::new(0),
        }
    }

    /// Mark `redraw` pending. Callable from any context.
    pub fn raise(&self, redraw: Redraw) {
        if !redraw.is_empty() {
            self.bits.fetch_or(redraw.bits(), Ordering::AcqRel);
        }
    }

    /// Pending flags without clearing them.
    pub fn pending(&self) -> Redraw {
        Redraw::from_bits(self.bits.load(Ordering::Acquire))
    }

    /// Take and clear every pending flag (render loop only).
    pub fn take_all(&self) -> Redraw {
        Redraw::from_bits(self.bits.swap(0, Ordering::AcqRel))
    }
}

impl Default for DirtyFlags {
    fn default() -> Self {
        Self::new()
    }
}
