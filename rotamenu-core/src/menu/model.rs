//! Menu model
//!
//! Title, item slots, highlighted index and the pending click of the one
//! active menu. Slots are filled from index 0; the first empty slot ends
//! the menu.

use heapless::String;
use rotamenu_display::{DisplayError, RenderSink, TextColor};

use super::action::MenuSet;
use super::events::MenuEvent;
use super::state::MenuState;
use crate::input::Direction;
use crate::ui::layout::{CURSOR_X, LINE_SPACE_1, MENU_ITEM_X, MENU_ITEM_Y};

/// Maximum number of items in a menu
pub const MENU_MAX: usize = 5;

/// Characters kept per title or item (one text size 1 line)
pub const LABEL_LEN: usize = 21;

/// Menu title or item text
pub type Label = String<LABEL_LEN>;

/// Copy `text` into a label, dropping what does not fit
pub(crate) fn label(text: &str) -> Label {
    let mut out = Label::new();
    for ch in text.chars() {
        if out.push(ch).is_err() {
            break;
        }
    }
    out
}

/// The active menu
#[derive(Debug, Clone)]
pub struct MenuModel<M> {
    active: Option<M>,
    title: Label,
    items: [Label; MENU_MAX],
    highlighted: usize,
    clicked: Option<usize>,
    state: MenuState,
}

impl<M: Copy> Default for MenuModel<M> {
    fn default() -> Self {
        Self::new()
    }
}

impl<M: Copy> MenuModel<M> {
    /// Create an inactive menu with no items
    pub fn new() -> Self {
        Self {
            active: None,
            title: Label::new(),
            items: Default::default(),
            highlighted: 0,
            clicked: None,
            state: MenuState::Inactive,
        }
    }

    /// Set one item slot
    ///
    /// An empty label clears every slot and moves the highlight to the
    /// top. A non-empty label fills the slot and drops any pending click.
    /// Indexes past [`MENU_MAX`] are ignored.
    pub fn set_item(&mut self, index: usize, text: &str) {
        if index >= MENU_MAX {
            return;
        }

        if text.is_empty() {
            for item in self.items.iter_mut() {
                item.clear();
            }
            self.highlighted = 0;
        } else {
            self.items[index] = label(text);
            self.clicked = None;
            if self.state.is_active() {
                self.state = self.state.transition(MenuEvent::Defined);
            }
        }
    }

    /// Replace the menu with `title` and `items`
    ///
    /// Items past [`MENU_MAX`] are dropped.
    pub fn define(&mut self, title: &str, items: &[&str]) {
        self.active = None;
        self.set_title(title);
        self.set_item(0, "");
        for (index, item) in items.iter().enumerate() {
            self.set_item(index, item);
        }
    }

    /// Set the title; an empty title switches the menu off
    ///
    /// A pending click survives a title change; only a new item drops it.
    pub fn set_title(&mut self, title: &str) {
        if title.is_empty() {
            self.deactivate();
            return;
        }
        self.title = label(title);
        if self.clicked.is_none() {
            self.state = self.state.transition(MenuEvent::Defined);
        }
    }

    /// Switch the menu off
    pub fn deactivate(&mut self) {
        self.title.clear();
        self.active = None;
        self.clicked = None;
        self.state = self.state.transition(MenuEvent::Cleared);
    }

    /// Check if a menu is shown
    pub fn is_active(&self) -> bool {
        self.state.is_active()
    }

    pub fn state(&self) -> MenuState {
        self.state
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// Identifier of the menu shown with [`show`](Self::show), if any
    pub fn active(&self) -> Option<M> {
        self.active
    }

    /// Label of a filled slot
    pub fn item(&self, index: usize) -> Option<&str> {
        self.items
            .get(index)
            .map(|item| item.as_str())
            .filter(|item| !item.is_empty())
    }

    /// Filled slots, in order
    pub fn items(&self) -> impl Iterator<Item = &str> {
        self.items
            .iter()
            .map(|item| item.as_str())
            .take_while(|item| !item.is_empty())
    }

    /// Number of filled slots
    pub fn item_count(&self) -> usize {
        self.items().count()
    }

    pub fn highlighted(&self) -> usize {
        self.highlighted
    }

    pub fn clicked(&self) -> Option<usize> {
        self.clicked
    }

    /// Move the highlight one item
    ///
    /// Clockwise moves down the list and stops on the last filled slot;
    /// counter-clockwise moves up and stops at the top.
    pub fn advance_highlight(&mut self, direction: Direction) {
        match direction {
            Direction::Clockwise => {
                if self.highlighted + 1 < MENU_MAX {
                    self.highlighted += 1;
                }
                if self.items[self.highlighted].is_empty() && self.highlighted > 0 {
                    self.highlighted -= 1;
                }
            }
            Direction::CounterClockwise => {
                self.highlighted = self.highlighted.saturating_sub(1);
            }
        }
    }

    /// Mark the highlighted item clicked
    ///
    /// Returns false when no menu is active or a click is already pending.
    pub fn click(&mut self) -> bool {
        if !self.state.is_active() || self.clicked.is_some() {
            return false;
        }
        self.clicked = Some(self.highlighted);
        self.state = self.state.transition(MenuEvent::Clicked);
        true
    }

    /// Take the pending click index
    pub fn take_clicked(&mut self) -> Option<usize> {
        let index = self.clicked.take()?;
        self.state = self.state.transition(MenuEvent::Consumed);
        Some(index)
    }

    /// Take the pending click along with the menu it belongs to
    ///
    /// A click on a menu built with [`define`](Self::define) is consumed
    /// but returns `None`; use [`take_clicked`](Self::take_clicked) for those.
    pub fn take_click(&mut self) -> Option<(M, usize)> {
        let menu = self.active;
        let index = self.take_clicked()?;
        menu.map(|menu| (menu, index))
    }

    /// Draw the menu and present it
    pub fn render<S: RenderSink + ?Sized>(&self, sink: &mut S) -> Result<(), DisplayError> {
        sink.clear()?;

        sink.set_text_size(1);
        sink.set_text_color(TextColor::Normal);
        sink.set_cursor(LINE_SPACE_1, 0);
        sink.print(&self.title)?;
        sink.draw_line(0, LINE_SPACE_1, sink.width() as i32, LINE_SPACE_1)?;

        let marked = self.clicked.unwrap_or(self.highlighted);
        for (index, item) in self.items().enumerate() {
            let color = if index == marked {
                TextColor::Inverted
            } else {
                TextColor::Normal
            };
            sink.set_text_color(color);
            sink.set_cursor(MENU_ITEM_X, row(index));
            sink.print(item)?;
        }

        if self.clicked.is_none() {
            sink.set_text_color(TextColor::Normal);
            sink.set_cursor(CURSOR_X, row(self.highlighted));
            sink.print(">")?;
        }

        sink.present()
    }
}

impl<M: MenuSet> MenuModel<M> {
    /// Show one of the application's menus
    pub fn show(&mut self, menu: M) {
        self.define(menu.title(), menu.items());
        self.active = Some(menu);

        #[cfg(feature = "defmt")]
        defmt::debug!("menu '{}' shown", menu.title());
    }
}

fn row(index: usize) -> i32 {
    MENU_ITEM_Y + index as i32 * LINE_SPACE_1
}

#[cfg(test)]
mod tests {
    use super::*;
    use rotamenu_display::Canvas;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Demo {
        Main,
        Other,
    }

    impl MenuSet for Demo {
        const COUNT: usize = 2;

        fn index(self) -> usize {
            self as usize
        }

        fn title(self) -> &'static str {
            match self {
                Demo::Main => "Main Menu",
                Demo::Other => "Menu 2",
            }
        }

        fn items(self) -> &'static [&'static str] {
            match self {
                Demo::Main => &["list", "enter a value", "message", "MENU 2"],
                Demo::Other => &["Uptime", "menu off", "RETURN"],
            }
        }
    }

    #[test]
    fn test_new_is_inactive() {
        let model: MenuModel<Demo> = MenuModel::new();
        assert!(!model.is_active());
        assert_eq!(model.item_count(), 0);
        assert_eq!(model.clicked(), None);
    }

    #[test]
    fn test_show_populates() {
        let mut model = MenuModel::new();
        model.show(Demo::Main);

        assert!(model.is_active());
        assert_eq!(model.state(), MenuState::Displaying);
        assert_eq!(model.title(), "Main Menu");
        assert_eq!(model.item_count(), 4);
        assert_eq!(model.item(3), Some("MENU 2"));
        assert_eq!(model.item(4), None);
        assert_eq!(model.active(), Some(Demo::Main));
    }

    #[test]
    fn test_clear_resets_slots_and_highlight() {
        let mut model: MenuModel<Demo> = MenuModel::new();
        model.define("Test", &["a", "b", "c"]);
        model.advance_highlight(Direction::Clockwise);
        model.advance_highlight(Direction::Clockwise);
        assert_eq!(model.highlighted(), 2);

        model.set_item(0, "");

        assert_eq!(model.item_count(), 0);
        assert!((0..MENU_MAX).all(|i| model.item(i).is_none()));
        assert_eq!(model.highlighted(), 0);
    }

    #[test]
    fn test_out_of_range_index_ignored() {
        let mut model: MenuModel<Demo> = MenuModel::new();
        model.define("Test", &["a"]);
        model.set_item(MENU_MAX, "x");
        model.set_item(MENU_MAX, "");
        assert_eq!(model.item_count(), 1);
    }

    #[test]
    fn test_define_truncates_items() {
        let mut model: MenuModel<Demo> = MenuModel::new();
        model.define("Test", &["1", "2", "3", "4", "5", "6", "7"]);
        assert_eq!(model.item_count(), MENU_MAX);
    }

    #[test]
    fn test_highlight_stops_at_last_item() {
        let mut model = MenuModel::new();
        model.show(Demo::Other);

        for _ in 0..10 {
            model.advance_highlight(Direction::Clockwise);
        }
        assert_eq!(model.highlighted(), 2);

        for _ in 0..10 {
            model.advance_highlight(Direction::CounterClockwise);
        }
        assert_eq!(model.highlighted(), 0);
    }

    #[test]
    fn test_highlight_full_menu() {
        let mut model: MenuModel<Demo> = MenuModel::new();
        model.define("Full", &["1", "2", "3", "4", "5"]);
        for _ in 0..10 {
            model.advance_highlight(Direction::Clockwise);
        }
        assert_eq!(model.highlighted(), MENU_MAX - 1);
    }

    #[test]
    fn test_click_round_trip() {
        let mut model = MenuModel::new();
        model.show(Demo::Main);
        model.advance_highlight(Direction::Clockwise);
        model.advance_highlight(Direction::Clockwise);

        assert!(model.click());
        assert_eq!(model.clicked(), Some(2));
        assert_eq!(model.state(), MenuState::ActionPending);

        // second press while pending is ignored
        model.advance_highlight(Direction::CounterClockwise);
        assert!(!model.click());
        assert_eq!(model.clicked(), Some(2));

        assert_eq!(model.take_click(), Some((Demo::Main, 2)));
        assert_eq!(model.clicked(), None);
        assert_eq!(model.take_click(), None);

        model.show(Demo::Main);
        assert_eq!(model.highlighted(), 0);
        assert_eq!(model.clicked(), None);
        assert_eq!(model.state(), MenuState::Displaying);
    }

    #[test]
    fn test_redefine_drops_pending_click() {
        let mut model = MenuModel::new();
        model.show(Demo::Main);
        assert!(model.click());

        model.show(Demo::Other);
        assert_eq!(model.clicked(), None);
        assert_eq!(model.state(), MenuState::Displaying);
        assert_eq!(model.active(), Some(Demo::Other));
    }

    #[test]
    fn test_retitle_keeps_pending_click() {
        let mut model: MenuModel<Demo> = MenuModel::new();
        model.define("Main", &["a", "b"]);
        assert!(model.click());

        model.set_title("Other");
        assert_eq!(model.title(), "Other");
        assert_eq!(model.clicked(), Some(0));
        assert_eq!(model.state(), MenuState::ActionPending);

        // no items: nothing clears the click either
        model.define("Empty", &[]);
        assert_eq!(model.clicked(), Some(0));
        assert_eq!(model.state(), MenuState::ActionPending);
        assert!(!model.click());

        assert_eq!(model.take_clicked(), Some(0));
        assert_eq!(model.state(), MenuState::Displaying);
    }

    #[test]
    fn test_click_ignored_when_inactive() {
        let mut model: MenuModel<Demo> = MenuModel::new();
        assert!(!model.click());

        model.show(Demo::Main);
        model.deactivate();
        assert!(!model.click());
        assert_eq!(model.state(), MenuState::Inactive);
        assert_eq!(model.active(), None);
    }

    #[test]
    fn test_empty_title_deactivates() {
        let mut model = MenuModel::new();
        model.show(Demo::Main);
        model.set_title("");
        assert!(!model.is_active());
    }

    #[test]
    fn test_take_clicked_on_untyped_menu() {
        let mut model: MenuModel<Demo> = MenuModel::new();
        model.define("Ad hoc", &["yes", "no"]);
        assert!(model.click());
        assert_eq!(model.take_clicked(), Some(0));
        assert_eq!(model.state(), MenuState::Displaying);
    }

    #[test]
    fn test_render_highlight() {
        let mut model = MenuModel::new();
        model.show(Demo::Other);
        model.advance_highlight(Direction::Clockwise);

        let mut canvas = Canvas::default();
        model.render(&mut canvas).unwrap();
        let frame = canvas.shown();

        let title = frame.find("Menu 2").unwrap();
        assert_eq!((title.x, title.y), (LINE_SPACE_1, 0));

        let uptime = frame.find("Uptime").unwrap();
        assert_eq!((uptime.x, uptime.y), (MENU_ITEM_X, 12));
        assert_eq!(uptime.color, TextColor::Normal);

        let off = frame.find("menu off").unwrap();
        assert_eq!(off.y, 21);
        assert_eq!(off.color, TextColor::Inverted);

        let cursor = frame.find(">").unwrap();
        assert_eq!((cursor.x, cursor.y), (CURSOR_X, 21));
    }

    #[test]
    fn test_render_clicked_hides_cursor() {
        let mut model = MenuModel::new();
        model.show(Demo::Main);
        model.advance_highlight(Direction::Clockwise);
        model.click();

        let mut canvas = Canvas::default();
        model.render(&mut canvas).unwrap();
        let frame = canvas.shown();

        assert!(!frame.contains(">"));
        assert_eq!(
            frame.find("enter a value").unwrap().color,
            TextColor::Inverted
        );
        assert_eq!(frame.find("list").unwrap().color, TextColor::Normal);
    }
}
