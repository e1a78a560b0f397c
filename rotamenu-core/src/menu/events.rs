//! Events that drive the menu state machine

/// Menu lifecycle events
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MenuEvent {
    /// A menu was (re)defined with a non-empty title
    Defined,
    /// The button was pressed on the highlighted item
    Clicked,
    /// Application code took the pending click
    Consumed,
    /// The title was cleared; no menu is shown
    Cleared,
}
