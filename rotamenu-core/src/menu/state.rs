//! Menu state machine
//!
//! What the main loop does on each pass is a function of the current
//! state: nothing while inactive, navigation while displaying, and a
//! frozen highlight while a click waits for application code.

use super::events::MenuEvent;

/// Menu states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MenuState {
    /// No title set; nothing is drawn
    #[default]
    Inactive,
    /// Menu shown, highlight follows the encoder
    Displaying,
    /// An item was clicked and has not been consumed yet
    ActionPending,
}

impl MenuState {
    /// Check if a menu is shown
    pub fn is_active(&self) -> bool {
        !matches!(self, MenuState::Inactive)
    }

    /// Check if encoder movement should move the highlight
    pub fn navigation_allowed(&self) -> bool {
        matches!(self, MenuState::Displaying)
    }

    /// Process an event and return the next state
    pub fn transition(self, event: MenuEvent) -> Self {
        use MenuEvent::*;
        use MenuState::*;

        match (self, event) {
            (Inactive, Defined) => Displaying,

            (Displaying, Defined) => Displaying,
            (Displaying, Clicked) => ActionPending,
            (Displaying, Cleared) => Inactive,

            // Redefining the menu discards the pending click
            (ActionPending, Defined) => Displaying,
            (ActionPending, Consumed) => Displaying,
            (ActionPending, Cleared) => Inactive,

            // Default: stay in current state
            _ => self,
        }
    }
}
