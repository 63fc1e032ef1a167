//! Touch dispatcher - raw controller messages to screen events.
//!
//! The touch panel is mounted rotated against the TFT, so the raw axes
//! are swapped and the raw Y axis is mirrored:
//!
//! ```text
//! screen_x = W - W * raw_y / 4096
//! screen_y = H * raw_x / 4096
//! ```
//!
//! Only "contact" (0xC0) and "release" (0x20) messages produce events.
//! Each invocation drains at most [`TOUCH_BATCH_MAX`] messages so the
//! touch interrupt does bounded work; the rest stay queued.

use core::fmt::Write;

use heapless::String;

use crate::config::{
    DIAGNOSTIC_LINE_LEN, DISPLAY_HEIGHT, DISPLAY_WIDTH, MXT_MESSAGE_LEN, MXT_T9_FIRST_REPORT_ID,
    MXT_T9_MAX_TOUCHES, TOUCH_BATCH_MAX, TOUCH_PRESS_STATUS, TOUCH_RAW_RANGE,
    TOUCH_RELEASE_STATUS,
};
use crate::error::Error;

/// One message read from the touch controller.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RawTouch {
    /// Touch (finger) identifier.
    pub id: u8,
    /// Raw X in device space (0..4095).
    pub x: u16,
    /// Raw Y in device space (0..4095).
    pub y: u16,
    /// Controller status byte.
    pub status: u8,
}

/// Contact state carried by a touch message.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TouchStatus {
    Press,
    Release,
}

impl TouchStatus {
    /// Decode a status byte; anything but press/release is `None`.
    pub const fn from_raw(status: u8) -> Option<Self> {
        match status {
            TOUCH_PRESS_STATUS => Some(TouchStatus::Press),
            TOUCH_RELEASE_STATUS => Some(TouchStatus::Release),
            _ => None,
        }
    }
}

/// A touch in screen coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TouchEvent {
    pub x: u16,
    pub y: u16,
    /// `true` for contact, `false` for release.
    pub pressed: bool,
}

/// Screen X from the raw Y axis (mirrored), clamped to `0..W`.
pub const fn convert_x(raw_y: u16) -> u16 {
    let raw = clamp_raw(raw_y);
    let w = DISPLAY_WIDTH as u32;
    let x = w - w * raw / TOUCH_RAW_RANGE;
    if x >= w {
        (w - 1) as u16
    } else {
        x as u16
    }
}

/// Screen Y from the raw X axis, in `0..H`.
pub const fn convert_y(raw_x: u16) -> u16 {
    let raw = clamp_raw(raw_x);
    (DISPLAY_HEIGHT as u32 * raw / TOUCH_RAW_RANGE) as u16
}

const fn clamp_raw(raw: u16) -> u32 {
    let raw = raw as u32;
    if raw >= TOUCH_RAW_RANGE {
        TOUCH_RAW_RANGE - 1
    } else {
        raw
    }
}

impl RawTouch {
    /// Screen position of this message regardless of its status.
    pub const fn screen_position(&self) -> (u16, u16) {
        (convert_x(self.y), convert_y(self.x))
    }

    /// Screen event for press/release messages, `None` for any other status.
    pub const fn normalize(&self) -> Option<TouchEvent> {
        let (x, y) = self.screen_position();
        match TouchStatus::from_raw(self.status) {
            Some(status) => Some(TouchEvent {
                x,
                y,
                pressed: matches!(status, TouchStatus::Press),
            }),
            None => None,
        }
    }
}

/// Decode one maXTouch T5 message carrying a T9 touch report.
///
/// Layout: report ID, status, X\[11:4\], Y\[11:4\], X\[3:0\]|Y\[3:0\],
/// then area/amplitude bytes we ignore. Messages from other objects
/// are rejected with [`Error::UnexpectedMessage`].
pub fn parse_t9_message(msg: &[u8; MXT_MESSAGE_LEN]) -> Result<RawTouch, Error> {
    let report_id = msg[0];
    let id = report_id.wrapping_sub(MXT_T9_FIRST_REPORT_ID);
    if report_id < MXT_T9_FIRST_REPORT_ID || id >= MXT_T9_MAX_TOUCHES {
        return Err(Error::UnexpectedMessage(report_id));
    }

    let x = (u16::from(msg[2]) << 4) | u16::from(msg[4] >> 4);
    let y = (u16::from(msg[3]) << 4) | u16::from(msg[4] & 0x0F);

    Ok(RawTouch {
        id,
        x,
        y,
        status: msg[1],
    })
}

/// Queue of touch messages on the controller.
pub trait TouchSource {
    /// `true` while the controller has unread messages.
    fn has_pending(&mut self) -> bool;

    /// Pop the next message.
    fn read_event(&mut self) -> Result<RawTouch, Error>;
}

/// Best-effort text output for per-touch diagnostics (serial console).
pub trait DiagnosticSink {
    fn emit(&mut self, line: &str);
}

/// Sink that discards diagnostics.
pub struct NoDiagnostics;

impl DiagnosticSink for NoDiagnostics {
    fn emit(&mut self, _line: &str) {}
}

/// Format the diagnostic line for one message.
///
/// `Nr: <id>, X:<x>, Y:<y>, Status:0x<hex> conv X:<x>, Y:<y>\n\r`
pub fn diagnostic_line(raw: &RawTouch) -> String<DIAGNOSTIC_LINE_LEN> {
    let (x, y) = raw.screen_position();
    let mut line = String::new();
    // The longest line (all fields at max width) fits in the buffer.
    let _ = write!(
        line,
        "Nr: {}, X:{}, Y:{}, Status:0x{:x} conv X:{}, Y:{}\n\r",
        raw.id, raw.x, raw.y, raw.status, x, y
    );
    line
}

/// Drain up to [`TOUCH_BATCH_MAX`] messages from `source`.
///
/// Press/release messages are handed to `on_event`; other statuses are
/// dropped. A failed read is skipped and still counts toward the cap.
/// Returns the number of messages consumed (including failed reads).
pub fn drain<S, D, F>(source: &mut S, diagnostics: &mut D, mut on_event: F) -> usize
where
    S: TouchSource,
    D: DiagnosticSink,
    F: FnMut(TouchEvent),
{
    let mut consumed = 0;

    while consumed < TOUCH_BATCH_MAX && source.has_pending() {
        consumed += 1;

        let raw = match source.read_event() {
            Ok(raw) => raw,
            Err(e) => {
                warn!("Touch: read failed, skipping ({})", e);
                continue;
            }
        };

        diagnostics.emit(diagnostic_line(&raw).as_str());

        match raw.normalize() {
            Some(event) => on_event(event),
            None => debug!("Touch: dropped status 0x{:x}", raw.status),
        }
    }

    consumed
}
