//! Menu identifiers and click dispatch
//!
//! Applications describe their menus as an enum implementing [`MenuSet`]
//! and resolve a taken click to an action value through an
//! [`ActionTable`] instead of comparing title strings.

use super::model::MENU_MAX;

/// A fixed set of application menus
pub trait MenuSet: Copy + PartialEq {
    /// Number of menus in the set
    const COUNT: usize;

    /// Dense index in `0..COUNT`
    fn index(self) -> usize;

    /// Title drawn above the items
    fn title(self) -> &'static str;

    /// Item labels, at most [`MENU_MAX`] are shown
    fn items(self) -> &'static [&'static str];
}

/// Maps `(menu, item)` to an action
///
/// `MENUS` must be at least `M::COUNT`; menus past it have no bindings.
#[derive(Debug, Clone)]
pub struct ActionTable<A, const MENUS: usize> {
    slots: [[Option<A>; MENU_MAX]; MENUS],
}

impl<A: Copy, const MENUS: usize> Default for ActionTable<A, MENUS> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A: Copy, const MENUS: usize> ActionTable<A, MENUS> {
    /// Create a table with nothing bound
    pub const fn new() -> Self {
        Self {
            slots: [[None; MENU_MAX]; MENUS],
        }
    }

    /// Bind an action to an item; returns false if the slot does not exist
    pub fn bind<M: MenuSet>(&mut self, menu: M, item: usize, action: A) -> bool {
        match self.slot_mut(menu.index(), item) {
            Some(slot) => {
                *slot = Some(action);
                true
            }
            None => false,
        }
    }

    /// Builder form of [`bind`](Self::bind); out-of-range slots are ignored
    pub fn with<M: MenuSet>(mut self, menu: M, item: usize, action: A) -> Self {
        self.bind(menu, item, action);
        self
    }

    /// Action bound to an item
    pub fn lookup<M: MenuSet>(&self, menu: M, item: usize) -> Option<A> {
        self.slots.get(menu.index())?.get(item).copied().flatten()
    }

    fn slot_mut(&mut self, menu: usize, item: usize) -> Option<&mut Option<A>> {
        self.slots.get_mut(menu)?.get_mut(item)
    }
}
