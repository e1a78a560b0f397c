//! Board-agnostic core logic for the rotary encoder menu firmware
//!
//! This crate contains everything that does not depend on a specific
//! board or display driver:
//!
//! - Quadrature decoding and the interrupt-shared step counter
//! - Debounced push button monitoring
//! - Menu model, menu state machine and action table
//! - Interaction prompts (value entry, list chooser, confirmation)
//! - Timing configuration and its TOML loader

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod config;
pub mod input;
pub mod menu;
pub mod ui;

#[cfg(test)]
mod sim;
