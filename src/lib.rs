//! Host-testable core of the wash-panel firmware.
//!
//! Everything that decides what the panel does lives here: the cycle
//! catalog, the settings overlay, touch normalisation, the screen state
//! machine, the lock and the countdown. Hardware is reached only through
//! the traits in [`touch`], [`timers`], [`lock`], [`render`] and
//! [`context`].
//!
//! Usage: `cargo test` (host, default features)
//!
//! Note: The embedded binary uses main.rs with #![no_std] and #![no_main]
//! and is built with `--features embedded`.

#![cfg_attr(not(test), no_std)]

#[macro_use]
mod fmt;

pub mod catalog;
pub mod config;
pub mod context;
pub mod error;
pub mod flags;
pub mod lock;
pub mod panel;
pub mod render;
pub mod settings;
pub mod timers;
pub mod touch;
pub mod zones;

pub use context::PanelContext;
pub use error::Error;
pub use panel::{Panel, PanelPolicy};
