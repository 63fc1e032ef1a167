//! Screen drawing from a [`Snapshot`].
//!
//! The render loop takes the pending [`Redraw`] flags, copies a snapshot
//! of the panel state and then calls [`render`] with no lock held. All
//! drawing goes through the [`PanelDisplay`] trait; pixels, fonts and
//! icon bitmaps belong to the display adapter.
//!
//! Full-screen flags repaint whichever screen the snapshot is on, so a
//! stale flag for a screen already left just repaints the current one.
//! Partial flags are then applied on top, skipping anything the full
//! repaint already covered.

use core::fmt::Write;

use heapless::String;

use crate::config::{DISPLAY_HEIGHT, DISPLAY_WIDTH};
use crate::flags::Redraw;
use crate::lock::LockState;
use crate::panel::{Snapshot, UiMode};
use crate::settings::{Overlay, Setting};
use crate::zones::{self, settings_row_y};

/// Bitmap drawn by the display adapter.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Icon {
    // Cycle icons (128x128)
    Clock,
    Day,
    Anvil,
    Water,
    Vortex,
    Gear,

    /// "+" next to a setting.
    Plus,

    // Bottom buttons (160 wide)
    Wash,
    Mode,
    Configure,
    Back,
    Cancel,

    // Lock button (60x60)
    Unlocked,
    LockedGray,
    LockedRed,
    LockedGreen,

    /// Frame of the running-cycle animation.
    AnimationFrame(u8),
}

impl Icon {
    /// Width and height in pixels.
    pub const fn size(self) -> (u16, u16) {
        match self {
            Icon::Clock | Icon::Day | Icon::Anvil | Icon::Water | Icon::Vortex | Icon::Gear => {
                (128, 128)
            }
            Icon::Plus => (60, 36),
            Icon::Wash => (160, 80),
            Icon::Mode | Icon::Configure | Icon::Back | Icon::Cancel => (160, 58),
            Icon::Unlocked | Icon::LockedGray | Icon::LockedRed | Icon::LockedGreen => (60, 60),
            Icon::AnimationFrame(_) => (126, 126),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Color {
    White,
    Gray,
    Black,
    Red,
}

/// Text face.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Font {
    /// Body and title text (36 px line).
    Body,
    /// Settings group headings (28 px line).
    Heading,
}

impl Font {
    pub const fn line_height(self) -> u16 {
        match self {
            Font::Body => 36,
            Font::Heading => 28,
        }
    }
}

/// Drawing primitives the panel needs.
pub trait PanelDisplay {
    type Error;

    /// Draw `icon` with its top-left corner at `(x, y)`.
    fn draw_icon(&mut self, x: u16, y: u16, icon: Icon) -> Result<(), Self::Error>;

    /// Fill the inclusive rectangle `(x0, y0)..=(x1, y1)`.
    fn fill_rect(&mut self, x0: u16, y0: u16, x1: u16, y1: u16, color: Color)
        -> Result<(), Self::Error>;

    /// Draw `text` with its top-left corner at `(x, y)`; `spacing` is the
    /// extra gap between glyphs.
    fn draw_text(&mut self, font: Font, text: &str, x: u16, y: u16, spacing: u16)
        -> Result<(), Self::Error>;
}

// Layout

const W: u16 = DISPLAY_WIDTH;
const H: u16 = DISPLAY_HEIGHT;

const CYCLE_ICON_X: u16 = W / 2 - 64;
const CYCLE_ICON_Y: u16 = 20;
const ANIMATION_X: u16 = W / 2 - 63;
const ANIMATION_Y: u16 = 20;
const TEXT_X: u16 = 20;
const TITLE_Y: u16 = 30;
const SUMMARY_NAME_Y: u16 = 158;
const SUMMARY_TIME_Y: u16 = 198;
const SUMMARY_BOTTOM: u16 = 236;
const RUNNING_NAME_Y: u16 = 188;
const COUNTDOWN_Y: u16 = 228;
const VALUE_X: u16 = W / 2;
const PLUS_X: u16 = W - 70;
const GROUP_TITLE_OFFSET: u16 = 30;

const TEXT_LEN: usize = 32;

/// Icon for the lock button in `state`.
pub const fn lock_icon(state: LockState) -> Icon {
    match state {
        LockState::Unlocked => Icon::Unlocked,
        LockState::LockedIdle => Icon::LockedRed,
        LockState::LockedPressing => Icon::LockedGray,
        LockState::ReadyToRelease => Icon::LockedGreen,
    }
}

/// "HH:MM:SS" for the countdown.
pub fn countdown_text(secs: u32) -> String<TEXT_LEN> {
    let mut s = String::new();
    let _ = write!(s, "{:02}:{:02}:{:02}", secs / 3600, secs % 3600 / 60, secs % 60);
    s
}

/// "<h>h <mm>min" for the cycle summary.
pub fn duration_text(minutes: u32) -> String<TEXT_LEN> {
    let mut s = String::new();
    let _ = write!(s, "{}h {:02}min", minutes / 60, minutes % 60);
    s
}

/// Value column text of one settings row.
pub fn setting_text(overlay: &Overlay, setting: Setting) -> String<TEXT_LEN> {
    let mut s = String::new();
    let _ = match setting {
        Setting::RinseDuration | Setting::SpinDuration => {
            write!(s, "{} min", overlay.value(setting))
        }
        Setting::RinseCount => write!(s, "{}x", overlay.rinse_count()),
        Setting::SpinRpm => write!(s, "{}", overlay.spin_rpm()),
        Setting::Heavy | Setting::Bubbles => {
            s.push_str(if overlay.value(setting) != 0 { "Yes" } else { "No" })
                .map_err(|_| core::fmt::Error)
        }
    };
    s
}

const fn setting_label(setting: Setting) -> &'static str {
    match setting {
        Setting::RinseDuration | Setting::SpinDuration => "Time:",
        Setting::RinseCount => "Count:",
        Setting::SpinRpm => "RPM:",
        Setting::Heavy => "Heavy:",
        Setting::Bubbles => "Bubbles:",
    }
}

/// Draw everything `redraw` asks for. Returns what was actually drawn.
pub fn render<D: PanelDisplay>(
    redraw: Redraw,
    snap: &Snapshot,
    display: &mut D,
) -> Result<Redraw, D::Error> {
    let mut drawn = Redraw::NONE;

    if redraw.intersects(Redraw::FULL_SCREENS) {
        drawn |= draw_screen(snap, display)?;
    }

    let covered = drawn;

    if redraw.contains(Redraw::SUMMARY)
        && snap.mode == UiMode::Menu
        && !covered.contains(Redraw::MENU)
    {
        draw_summary(snap, display)?;
        drawn |= Redraw::SUMMARY;
    }

    let running_partial = snap.mode == UiMode::CycleRunning && !covered.contains(Redraw::RUNNING);

    if redraw.contains(Redraw::COUNTDOWN) && running_partial {
        draw_countdown(snap.remaining_secs, display)?;
        drawn |= Redraw::COUNTDOWN;
    }

    if redraw.contains(Redraw::ANIMATION) && running_partial {
        display.draw_icon(
            ANIMATION_X,
            ANIMATION_Y,
            Icon::AnimationFrame(snap.animation_frame),
        )?;
        drawn |= Redraw::ANIMATION;
    }

    if redraw.contains(Redraw::LOCK_ICON) && covered.is_empty() {
        draw_lock(snap.lock, display)?;
        drawn |= Redraw::LOCK_ICON;
    }

    // The banner sits over the animation area, so a new frame erases it.
    if (redraw.contains(Redraw::DOOR_BANNER) || drawn.contains(Redraw::ANIMATION))
        && snap.door_open
        && running_partial
    {
        draw_door_banner(display)?;
        drawn |= Redraw::DOOR_BANNER;
    }

    Ok(drawn)
}

fn draw_screen<D: PanelDisplay>(snap: &Snapshot, display: &mut D) -> Result<Redraw, D::Error> {
    display.fill_rect(0, 0, W - 1, H - 1, Color::White)?;

    let drawn = match snap.mode {
        UiMode::Menu => {
            draw_summary(snap, display)?;
            display.draw_icon(zones::START.x0, zones::START.y0, Icon::Wash)?;
            display.draw_icon(zones::MODE.x0, zones::MODE.y0 - 1, Icon::Mode)?;
            display.draw_icon(zones::BOTTOM.x0, zones::BOTTOM.y0 - 1, Icon::Configure)?;
            Redraw::MENU
        }
        UiMode::ConfigEditing => {
            draw_settings(&snap.overlay, display)?;
            display.draw_icon(zones::BOTTOM.x0, zones::BOTTOM.y0 - 1, Icon::Back)?;
            Redraw::SETTINGS
        }
        UiMode::CycleRunning => {
            display.draw_icon(
                ANIMATION_X,
                ANIMATION_Y,
                Icon::AnimationFrame(snap.animation_frame),
            )?;
            display.draw_text(Font::Body, snap.cycle.name, TEXT_X, RUNNING_NAME_Y, 1)?;
            draw_countdown(snap.remaining_secs, display)?;
            display.draw_icon(zones::BOTTOM.x0, zones::BOTTOM.y0 - 1, Icon::Cancel)?;
            if snap.door_open {
                draw_door_banner(display)?;
            }
            Redraw::RUNNING
        }
        UiMode::DoorOpenNotice => {
            display.draw_text(Font::Body, "DOOR OPEN", TEXT_X, TITLE_Y, 1)?;
            display.draw_text(Font::Body, "Close the door", TEXT_X, SUMMARY_NAME_Y, 1)?;
            display.draw_text(Font::Body, "to start", TEXT_X, SUMMARY_TIME_Y, 1)?;
            display.draw_icon(zones::BOTTOM.x0, zones::BOTTOM.y0 - 1, Icon::Back)?;
            Redraw::DOOR_NOTICE
        }
    };

    draw_lock(snap.lock, display)?;
    Ok(drawn)
}

fn draw_summary<D: PanelDisplay>(snap: &Snapshot, display: &mut D) -> Result<(), D::Error> {
    let (w, h) = snap.cycle.icon.size();
    display.fill_rect(
        CYCLE_ICON_X,
        CYCLE_ICON_Y,
        CYCLE_ICON_X + w - 1,
        CYCLE_ICON_Y + h - 1,
        Color::White,
    )?;
    display.draw_icon(CYCLE_ICON_X, CYCLE_ICON_Y, snap.cycle.icon)?;
    display.fill_rect(0, SUMMARY_NAME_Y, W - 1, SUMMARY_BOTTOM, Color::White)?;

    let mut name: String<TEXT_LEN> = String::new();
    let _ = write!(name, "Mode: {}", snap.cycle.name);
    display.draw_text(Font::Body, &name, TEXT_X, SUMMARY_NAME_Y, 1)?;
    display.draw_text(
        Font::Body,
        &duration_text(snap.cycle.total_minutes()),
        TEXT_X,
        SUMMARY_TIME_Y,
        1,
    )
}

fn draw_countdown<D: PanelDisplay>(secs: u32, display: &mut D) -> Result<(), D::Error> {
    let bottom = COUNTDOWN_Y + Font::Body.line_height();
    display.fill_rect(TEXT_X, COUNTDOWN_Y, W - 1, bottom, Color::White)?;
    display.draw_text(Font::Body, &countdown_text(secs), TEXT_X, COUNTDOWN_Y, 1)
}

fn draw_settings<D: PanelDisplay>(overlay: &Overlay, display: &mut D) -> Result<(), D::Error> {
    display.draw_text(Font::Body, "Settings", TEXT_X, TITLE_Y, 1)?;

    for (title, first) in [
        ("RINSE", Setting::RinseDuration),
        ("SPIN", Setting::SpinRpm),
        ("EXTRAS", Setting::Heavy),
    ] {
        let y = settings_row_y(first) - GROUP_TITLE_OFFSET;
        display.draw_text(Font::Heading, title, TEXT_X, y, 1)?;
    }

    for setting in Setting::ALL {
        let y = settings_row_y(setting);
        display.draw_text(Font::Body, setting_label(setting), TEXT_X, y, 1)?;
        display.draw_text(Font::Body, &setting_text(overlay, setting), VALUE_X, y, 1)?;
        display.draw_icon(PLUS_X, y, Icon::Plus)?;
    }
    Ok(())
}

fn draw_lock<D: PanelDisplay>(state: LockState, display: &mut D) -> Result<(), D::Error> {
    let r = zones::LOCK;
    display.fill_rect(r.x0, r.y0, r.x1, r.y1, Color::Gray)?;
    display.draw_icon(r.x0, r.y0, lock_icon(state))
}

fn draw_door_banner<D: PanelDisplay>(display: &mut D) -> Result<(), D::Error> {
    display.fill_rect(0, TITLE_Y, W - 1, TITLE_Y + Font::Body.line_height(), Color::Red)?;
    display.draw_text(Font::Body, "DOOR OPEN", TEXT_X, TITLE_Y, 1)
}
