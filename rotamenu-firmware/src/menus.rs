//! Demo menus and their actions

use rotamenu_core::menu::{ActionTable, MenuSet};

/// Menus shown by the demo
#[derive(Debug, Clone, Copy, PartialEq, Eq, defmt::Format)]
pub enum Menu {
    Main,
    Second,
}

impl MenuSet for Menu {
    const COUNT: usize = 2;

    fn index(self) -> usize {
        self as usize
    }

    fn title(self) -> &'static str {
        match self {
            Menu::Main => "Main Menu",
            Menu::Second => "Menu 2",
        }
    }

    fn items(self) -> &'static [&'static str] {
        match self {
            Menu::Main => &["list", "enter a value", "message", "MENU 2"],
            Menu::Second => &["Uptime", "menu off", "RETURN"],
        }
    }
}

/// What a menu item does when clicked
#[derive(Debug, Clone, Copy, PartialEq, Eq, defmt::Format)]
pub enum Action {
    /// Pick from a list; the first entry asks for confirmation
    ChooseFromList,
    EnterValue,
    Message,
    Uptime,
    /// Switch the menu off until the next button press
    MenuOff,
    Open(Menu),
}

/// Entries offered by the list action
///
/// A timed out list returns index 0, so the first entry only leads to a
/// confirmation prompt and nothing destructive.
pub const LIST_ITEMS: [&str; 8] = [
    "Confirm",
    "Item 1",
    "Item 2",
    "Item 3",
    "Item 4",
    "Item 5",
    "Item 6",
    "Item 7",
];

pub fn actions() -> ActionTable<Action, { Menu::COUNT }> {
    ActionTable::new()
        .with(Menu::Main, 0, Action::ChooseFromList)
        .with(Menu::Main, 1, Action::EnterValue)
        .with(Menu::Main, 2, Action::Message)
        .with(Menu::Main, 3, Action::Open(Menu::Second))
        .with(Menu::Second, 0, Action::Uptime)
        .with(Menu::Second, 1, Action::MenuOff)
        .with(Menu::Second, 2, Action::Open(Menu::Main))
}
