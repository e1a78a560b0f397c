//! Rotamenu Platform Abstraction Layer
//!
//! This crate defines the small set of platform services the menu core
//! needs from a board: digital input pins, a monotonic millisecond clock,
//! and a way to delay or yield cooperatively. Chip-specific code (the
//! ESP32 firmware, or a simulated platform in host tests) implements
//! these traits.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  Application (rotamenu-firmware)        │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  rotamenu-core (decoder, menus)         │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  rotamenu-hal (this crate - traits)     │
//! └─────────────────────────────────────────┘
//! ```
//!
//! # Traits
//!
//! - [`gpio::InputPin`] - Digital input
//! - [`time::Timebase`] - Monotonic clock, delays and cooperative yield

#![no_std]
#![deny(unsafe_code)]

pub mod gpio;
pub mod time;

// Re-export key traits at crate root for convenience
pub use gpio::InputPin;
pub use time::Timebase;

#[cfg(feature = "embassy")]
pub use time::EmbassyTimebase;
