//! Display abstraction for Rotamenu
//!
//! This crate provides:
//! - `RenderSink` trait, the drawing surface the menu core renders to
//! - `TextColor` for normal and inverted (highlighted) text
//! - `Canvas`, a headless sink that records the last presented frame
//!
//! # Architecture
//!
//! The menu core never talks to display hardware. It issues
//! Adafruit-GFX style calls (cursor, text size, print, rectangles) on a
//! `RenderSink` and finishes every frame with `present()`. The firmware
//! implements the trait on top of an SSD1306 driver; tests use `Canvas`
//! to inspect what would have been shown.

#![no_std]

pub mod backend;
pub mod screen;

// Re-export key types
pub use backend::{DisplayError, RenderSink, TextColor, SCREEN_HEIGHT, SCREEN_WIDTH};
pub use screen::{Canvas, Frame, Shape, TextRun};
