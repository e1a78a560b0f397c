//! Menu subsystem
//!
//! A single active menu of up to [`MENU_MAX`] items, the explicit
//! state machine describing its lifecycle, and the table that maps a
//! clicked item to an application action.

pub mod action;
pub mod events;
pub mod model;
pub mod state;

pub use action::{ActionTable, MenuSet};
pub use events::MenuEvent;
pub use model::{Label, MenuModel, LABEL_LEN, MENU_MAX};
pub use state::MenuState;
