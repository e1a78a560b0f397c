//! Screen layout for a 128x64 panel
//!
//! Text size 1 uses a 6x8 glyph cell, size 2 is 12x16, size 3 is 18x24.

/// Line spacing for text size 1
pub const LINE_SPACE_1: i32 = 9;

/// Line spacing for text size 2
pub const LINE_SPACE_2: i32 = 17;

/// Top of the lower bank on two-colour (yellow/blue) panels
pub const TOP_LINE: i32 = 18;

/// Left edge of menu item labels
pub const MENU_ITEM_X: i32 = 10;

/// Baseline row of the first menu item
pub const MENU_ITEM_Y: i32 = 12;

/// Left edge of the `>` cursor
pub const CURSOR_X: i32 = 2;

/// Left edge of the list chooser title
pub const LIST_TITLE_X: i32 = 10;

/// Items shown by the list chooser (two columns)
pub const LIST_CAPACITY: usize = 10;

/// Items per list chooser column
pub const LIST_COLUMN: usize = LIST_CAPACITY / 2;

/// Top of the value shown by value entry
pub const VALUE_TEXT_Y: i32 = 27;

/// Height of the value entry bar graph
pub const BAR_HEIGHT: u32 = 10;

/// Titles longer than this are drawn at text size 1
pub const LARGE_TITLE_MAX: usize = 8;
