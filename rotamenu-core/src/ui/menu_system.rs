//! Menu system
//!
//! Owns the platform handles (button pin, timebase, display) and the
//! active menu. The application's main loop calls [`MenuSystem::service`]
//! once per pass and then resolves any click it takes.

use rotamenu_display::RenderSink;
use rotamenu_hal::{InputPin, Timebase};

use super::report;
use crate::config::MenuConfig;
use crate::input::{ButtonEdge, ButtonMonitor, SharedEncoder};
use crate::menu::{MenuModel, MenuSet};

/// Menu subsystem for one encoder, one button and one display
pub struct MenuSystem<'a, M, P, T, S> {
    pub(crate) encoder: &'a SharedEncoder,
    pub(crate) button: P,
    pub(crate) time: T,
    pub(crate) display: S,
    pub(crate) config: MenuConfig,
    monitor: ButtonMonitor,
    model: MenuModel<M>,
    last_activity_ms: u64,
}

impl<'a, M, P, T, S> MenuSystem<'a, M, P, T, S>
where
    M: Copy,
    P: InputPin,
    T: Timebase,
    S: RenderSink,
{
    /// Create the menu system with no menu shown
    pub fn new(
        encoder: &'a SharedEncoder,
        button: P,
        time: T,
        display: S,
        config: MenuConfig,
    ) -> Self {
        let monitor = ButtonMonitor::from_pin(&button, &config);
        let last_activity_ms = time.now_ms();
        Self {
            encoder,
            button,
            time,
            display,
            config,
            monitor,
            model: MenuModel::new(),
            last_activity_ms,
        }
    }

    pub fn model(&self) -> &MenuModel<M> {
        &self.model
    }

    pub fn model_mut(&mut self) -> &mut MenuModel<M> {
        &mut self.model
    }

    pub fn display(&self) -> &S {
        &self.display
    }

    /// Display access for application screens drawn between menus
    pub fn display_mut(&mut self) -> &mut S {
        &mut self.display
    }

    pub fn time(&self) -> &T {
        &self.time
    }

    pub fn config(&self) -> &MenuConfig {
        &self.config
    }

    pub fn is_active(&self) -> bool {
        self.model.is_active()
    }

    /// Debounced button state as last seen by [`check_button`](Self::check_button)
    pub fn button_pressed(&self) -> bool {
        self.monitor.is_pressed()
    }

    /// Milliseconds since the last accepted button change or menu step
    pub fn idle_ms(&self) -> u64 {
        self.time.elapsed_ms(self.last_activity_ms)
    }

    /// Restart the idle timer
    pub fn touch(&mut self) {
        self.last_activity_ms = self.time.now_ms();
    }

    /// Replace the menu with an ad hoc title and items
    pub fn define(&mut self, title: &str, items: &[&str]) {
        self.model.define(title, items);
        self.touch();
    }

    /// Switch the menu off and blank the display
    pub fn deactivate(&mut self) {
        self.model.deactivate();
        report(self.blank());

        #[cfg(feature = "defmt")]
        defmt::debug!("menu off");
    }

    pub(crate) fn blank(&mut self) -> Result<(), rotamenu_display::DisplayError> {
        self.display.clear()?;
        self.display.present()
    }

    /// Check the button for a debounced change
    ///
    /// Returns true whenever a change was accepted. A press while a menu
    /// is shown and no click is pending clicks the highlighted item.
    pub async fn check_button(&mut self) -> bool {
        let Some(edge) = self.monitor.poll(&self.button, &mut self.time).await else {
            return false;
        };

        self.touch();
        if edge == ButtonEdge::Pressed && self.model.click() {
            #[cfg(feature = "defmt")]
            defmt::debug!(
                "menu '{}' item {} selected",
                self.model.title(),
                self.model.highlighted()
            );
        }
        true
    }

    /// Take the raw button level as the debounced one
    ///
    /// Prompts call this on exit so the press that ended them is never
    /// seen as a fresh click.
    pub(crate) fn resync_button(&mut self) {
        self.monitor.resync(self.button.is_high());
    }

    /// Move the highlight by one consumed encoder step, if any
    ///
    /// Does nothing while a click is pending; the counts stay queued.
    pub fn step_highlight(&mut self) {
        if !self.model.state().navigation_allowed() {
            return;
        }
        if let Some(direction) = self.encoder.consume_step(self.config.trigger()) {
            self.model.advance_highlight(direction);
            self.touch();
        }
    }

    /// Draw the active menu
    pub fn render(&mut self) {
        report(self.model.render(&mut self.display));
    }

    /// One pass of the menu loop
    ///
    /// With a menu shown: check the button, move the highlight, redraw.
    /// Always yields once.
    pub async fn service(&mut self) {
        if self.model.is_active() {
            self.check_button().await;
            self.step_highlight();
            self.render();
        }
        self.time.yield_now().await;
    }

    /// Take the pending click, if any
    pub fn take_click(&mut self) -> Option<(M, usize)> {
        self.model.take_click()
    }

    /// Take the pending click index of an ad hoc menu
    pub fn take_clicked(&mut self) -> Option<usize> {
        self.model.take_clicked()
    }
}

impl<'a, M, P, T, S> MenuSystem<'a, M, P, T, S>
where
    M: MenuSet,
    P: InputPin,
    T: Timebase,
    S: RenderSink,
{
    /// Show one of the application's menus
    pub fn show(&mut self, menu: M) {
        self.model.show(menu);
        self.touch();
    }
}
