//! Touch zones of each screen.
//!
//! All zones are inclusive rectangles in screen coordinates. The lock
//! button sits in the bottom-left corner on every screen and is always
//! tested first.

use crate::config::DISPLAY_WIDTH;
use crate::settings::Setting;

/// Inclusive screen rectangle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Rect {
    pub x0: u16,
    pub y0: u16,
    pub x1: u16,
    pub y1: u16,
}

impl Rect {
    pub const fn new(x0: u16, y0: u16, x1: u16, y1: u16) -> Self {
        Self { x0, y0, x1, y1 }
    }

    pub const fn contains(&self, x: u16, y: u16) -> bool {
        x >= self.x0 && x <= self.x1 && y >= self.y0 && y <= self.y1
    }
}

const BUTTON_X0: u16 = DISPLAY_WIDTH / 2 - 80;
const BUTTON_X1: u16 = DISPLAY_WIDTH / 2 + 80;
const PLUS_X0: u16 = DISPLAY_WIDTH - 70;
const PLUS_X1: u16 = DISPLAY_WIDTH - 10;

/// Top of the first settings row.
pub const SETTINGS_ROW_BASE: u16 = 100;
/// Vertical offset between the two rows of a settings group.
pub const SETTINGS_ROW_STEP: u16 = 40;
/// Vertical offset between settings groups.
pub const SETTINGS_GROUP_STEP: u16 = 110;
const PLUS_HEIGHT: u16 = 36;

/// Lock button, present on every screen.
pub const LOCK: Rect = Rect::new(10, 408, 70, 468);
/// "Wash" button on the menu.
pub const START: Rect = Rect::new(BUTTON_X0, 248, BUTTON_X1, 328);
/// "Mode" button on the menu.
pub const MODE: Rect = Rect::new(BUTTON_X0, 339, BUTTON_X1, 397);
/// Bottom button: "Configure" on the menu, "Back"/"Cancel" elsewhere.
pub const BOTTOM: Rect = Rect::new(BUTTON_X0, 409, BUTTON_X1, 467);

/// Top edge of the row showing `setting` on the settings screen.
pub const fn settings_row_y(setting: Setting) -> u16 {
    let (group, row) = match setting {
        Setting::RinseDuration => (0, 0),
        Setting::RinseCount => (0, 1),
        Setting::SpinRpm => (1, 0),
        Setting::SpinDuration => (1, 1),
        Setting::Heavy => (2, 0),
        Setting::Bubbles => (2, 1),
    };
    SETTINGS_ROW_BASE + group * SETTINGS_GROUP_STEP + row * SETTINGS_ROW_STEP
}

/// "+" hotspot that advances `setting`.
pub const fn settings_hotspot(setting: Setting) -> Rect {
    let y0 = settings_row_y(setting);
    Rect::new(PLUS_X0, y0, PLUS_X1, y0 + PLUS_HEIGHT)
}

/// Buttons on the cycle menu.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MenuZone {
    Start,
    Mode,
    Config,
}

/// Buttons on the settings screen.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SettingsZone {
    Advance(Setting),
    Back,
}

pub fn hit_lock(x: u16, y: u16) -> bool {
    LOCK.contains(x, y)
}

pub fn hit_menu(x: u16, y: u16) -> Option<MenuZone> {
    if START.contains(x, y) {
        Some(MenuZone::Start)
    } else if MODE.contains(x, y) {
        Some(MenuZone::Mode)
    } else if BOTTOM.contains(x, y) {
        Some(MenuZone::Config)
    } else {
        None
    }
}

pub fn hit_settings(x: u16, y: u16) -> Option<SettingsZone> {
    if BOTTOM.contains(x, y) {
        return Some(SettingsZone::Back);
    }
    Setting::ALL
        .into_iter()
        .find(|&s| settings_hotspot(s).contains(x, y))
        .map(SettingsZone::Advance)
}

/// Cancel on the running screen, Back on the door notice.
pub fn hit_bottom(x: u16, y: u16) -> bool {
    BOTTOM.contains(x, y)
}
