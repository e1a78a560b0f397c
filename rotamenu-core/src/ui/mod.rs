//! Interaction primitives
//!
//! Everything here blocks its caller until the user answers or the
//! inactivity timeout expires, but every wait goes through the
//! platform's async delay or yield so other tasks keep running.

pub mod layout;
pub mod menu_system;
pub mod prompt;

pub use menu_system::MenuSystem;

use rotamenu_display::DisplayError;

/// How [`MenuSystem::wait_for_keypress`] ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Keypress {
    /// The button was pressed
    Pressed,
    /// The knob was turned
    Rotated,
    /// Nothing happened before the timeout
    TimedOut,
}

/// Log a failed draw and carry on; the menu keeps working without a panel
pub(crate) fn report(result: Result<(), DisplayError>) {
    if let Err(_err) = result {
        #[cfg(feature = "defmt")]
        defmt::warn!("display error: {}", _err);
    }
}
