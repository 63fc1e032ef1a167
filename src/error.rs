//! Unified error type for the panel.
//!
//! We avoid `alloc` - all error variants carry only fixed-size data.
//! None of these are fatal to the state machine: a failed touch read is
//! skipped and a failed draw is retried by the next state change.

/// Top-level error type used across the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    // Touch
    /// A queued touch message could not be read from the controller.
    TouchRead,

    /// The touch controller reported a message from an object we do not
    /// decode (not a touch report).
    UnexpectedMessage(u8),

    // Display
    /// SPI transaction to the display failed.
    Display,

    // Diagnostics
    /// The diagnostic serial link rejected a write.
    Serial,
}
