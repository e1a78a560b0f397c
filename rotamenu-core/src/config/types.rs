//! Configuration type definitions

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Default SSD1306 I2C address
pub const DEFAULT_DISPLAY_ADDRESS: u8 = 0x3C;

/// Menu and input timing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MenuConfig {
    /// Encoder counts per menu step (1 or 2 depending on the encoder)
    pub item_trigger: u8,
    /// Inactivity timeout for prompts and the menu (seconds)
    pub display_timeout_s: u16,
    /// Delay before re-reading a changed button level (ms)
    pub button_settle_ms: u32,
    /// Minimum time between accepted button changes (ms)
    pub button_min_change_ms: u32,
    /// How long the confirmation prompt waits before sampling (ms)
    pub confirm_hold_ms: u32,
    /// Poll interval while waiting for a keypress (ms)
    pub keypress_poll_ms: u32,
    /// Poll interval while waiting for the button to be released (ms)
    pub release_poll_ms: u32,
}

impl Default for MenuConfig {
    fn default() -> Self {
        Self {
            item_trigger: 1,
            display_timeout_s: 10,
            button_settle_ms: 40,
            button_min_change_ms: 500,
            confirm_hold_ms: 2000,
            keypress_poll_ms: 20,
            release_poll_ms: 5,
        }
    }
}

impl MenuConfig {
    /// Encoder counts per step as a signed threshold (at least 1)
    pub fn trigger(&self) -> i32 {
        i32::from(self.item_trigger.max(1))
    }

    /// Inactivity timeout in milliseconds
    pub fn display_timeout_ms(&self) -> u64 {
        u64::from(self.display_timeout_s) * 1000
    }
}

/// OLED panel setup
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DisplayConfig {
    /// I2C address (0x3C or 0x3D)
    pub address: u8,
    /// Mount the panel upside down
    pub rotate_180: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            address: DEFAULT_DISPLAY_ADDRESS,
            rotate_180: false,
        }
    }
}

/// Complete device configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Config {
    pub menu: MenuConfig,
    pub display: DisplayConfig,
}
