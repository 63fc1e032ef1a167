//! Application-wide constants and compile-time configuration.
//!
//! Display geometry, touch-controller protocol values, timer rates and
//! pin assignments live here so they can be tuned in one place.

// Display

/// Panel width in pixels (portrait orientation).
pub const DISPLAY_WIDTH: u16 = 320;

/// Panel height in pixels (portrait orientation).
pub const DISPLAY_HEIGHT: u16 = 480;

// Touch controller

/// Raw touch coordinates span `0..TOUCH_RAW_RANGE` on both axes.
pub const TOUCH_RAW_RANGE: u32 = 4096;

/// Status byte of a touch message reporting contact.
pub const TOUCH_PRESS_STATUS: u8 = 0xC0;

/// Status byte of a touch message reporting release.
pub const TOUCH_RELEASE_STATUS: u8 = 0x20;

/// Maximum touch messages drained per touch interrupt.
pub const TOUCH_BATCH_MAX: usize = 3;

/// Capacity of one diagnostic text line.
pub const DIAGNOSTIC_LINE_LEN: usize = 70;

/// 7-bit I²C address of the maXTouch controller.
pub const MXT_I2C_ADDRESS: u8 = 0x4A;

/// Register address of the T5 message processor object.
///
/// Read from the controller's object table at bring-up on the reference
/// board; fixed here because the object table layout does not change
/// with our configuration.
pub const MXT_T5_ADDRESS: u16 = 0x0126;

/// First report ID assigned to the T9 multi-touch object.
pub const MXT_T9_FIRST_REPORT_ID: u8 = 2;

/// Touches tracked by T9 (one report ID each).
pub const MXT_T9_MAX_TOUCHES: u8 = 10;

/// Bytes in one T5 message (report ID + T9 payload).
pub const MXT_MESSAGE_LEN: usize = 8;

// Timers

/// Rate of the running-cycle animation timer (Hz).
pub const ANIMATION_TICK_HZ: u32 = 10;

/// Number of frames in the washing-drum animation.
pub const ANIMATION_FRAMES: u8 = 18;

/// Rate of the lock hold-to-release timer (Hz).
pub const LOCK_TICK_HZ: u32 = 1;

/// Seconds the lock button must be held before it may be released.
pub const UNLOCK_HOLD_SECS: u8 = 3;

/// Main loop poll interval for pending redraws (ms).
pub const RENDER_POLL_MS: u64 = 10;

/// Settle time after a door switch edge (ms).
pub const DOOR_DEBOUNCE_MS: u64 = 20;

/// SPI staging buffer for the display interface (bytes).
pub const DISPLAY_BUFFER_LEN: usize = 512;

// GPIO pin assignments (nRF52840-DK defaults)
//
// These are logical names; actual `embassy_nrf::peripherals::*` types are
// selected in `main.rs`.  Adjust for your custom PCB.
//
//   Touch CHG      → P0.13 (active low, message pending)
//   Touch SDA      → P0.26
//   Touch SCL      → P0.27
//   TFT SCK        → P0.19
//   TFT MOSI       → P0.20
//   TFT CS         → P0.21
//   TFT DC         → P0.22
//   TFT RST        → P0.23
//   Door switch    → P0.11 (high = open)
//   Lock actuator  → P0.06 (high = released)
//   Door LED       → P0.14 (active low, lit while the door is open)
//   Diagnostic TX  → P1.02 (115200 8N1)
