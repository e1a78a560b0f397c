//! Blocking prompts
//!
//! Each prompt reads the raw button pin rather than the debounced state
//! and hands the level it ends on back to the menu's button monitor, so
//! the press that ends a prompt is never reported as a second click.

use rotamenu_display::{DisplayError, RenderSink, TextColor};
use rotamenu_hal::{InputPin, Timebase};

use super::layout::{
    BAR_HEIGHT, LARGE_TITLE_MAX, LINE_SPACE_1, LINE_SPACE_2, LIST_CAPACITY, LIST_COLUMN,
    LIST_TITLE_X, TOP_LINE, VALUE_TEXT_Y,
};
use super::menu_system::MenuSystem;
use super::{report, Keypress};
use crate::input::Direction;

/// Width of the value entry bar for `value` in `[low, high]`
fn bar_width(value: i32, low: i32, high: i32, width: u32) -> u32 {
    if high <= low {
        return 0;
    }
    let span = i64::from(high) - i64::from(low);
    let offset = (i64::from(value) - i64::from(low)).clamp(0, span);
    (offset * i64::from(width) / span) as u32
}

/// Clamp without panicking when `low > high`; `low` wins
fn limit(value: i32, low: i32, high: i32) -> i32 {
    let value = if value > high { high } else { value };
    if value < low {
        low
    } else {
        value
    }
}

impl<M, P, T, S> MenuSystem<'_, M, P, T, S>
where
    M: Copy,
    P: InputPin,
    T: Timebase,
    S: RenderSink,
{
    /// Wait for the button to be let go, up to `timeout_ms`
    async fn wait_for_release(&mut self, timeout_ms: u64, poll_ms: u32) {
        let start = self.time.now_ms();
        while self.button.is_low() && self.time.elapsed_ms(start) < timeout_ms {
            self.time.delay_ms(poll_ms).await;
        }
    }

    /// Wait for a press or any turn of the knob
    ///
    /// A button held on entry has to be released first. The encoder
    /// counter is cleared before waiting. `timeout_ms` covers the whole
    /// call.
    pub async fn wait_for_keypress(&mut self, timeout_ms: u32) -> Keypress {
        let timeout_ms = u64::from(timeout_ms);
        let poll_ms = self.config.keypress_poll_ms;
        let start = self.time.now_ms();

        self.wait_for_release(timeout_ms, poll_ms).await;
        self.encoder.reset();

        loop {
            if self.time.elapsed_ms(start) >= timeout_ms {
                return Keypress::TimedOut;
            }
            if self.button.is_low() {
                self.resync_button();
                return Keypress::Pressed;
            }
            if self.encoder.position() != 0 {
                return Keypress::Rotated;
            }
            self.time.delay_ms(poll_ms).await;
        }
    }

    /// Enter a number with the knob
    ///
    /// Clockwise lowers the value by `step`, counter-clockwise raises it,
    /// always kept within `low..=high`. Ends on a button press or after
    /// the display timeout passes with no turn; either way the current
    /// value is returned.
    pub async fn enter_value(
        &mut self,
        title: &str,
        start: i32,
        step: i32,
        low: i32,
        high: i32,
    ) -> i32 {
        let timeout_ms = self.config.display_timeout_ms();
        let trigger = self.config.trigger();

        report(self.draw_value_title(title));

        let mut value = start;
        self.wait_for_release(timeout_ms, self.config.release_poll_ms)
            .await;

        let mut timer = self.time.now_ms();
        let mut drawn = None;
        while self.button.is_high() && self.time.elapsed_ms(timer) < timeout_ms {
            match self.encoder.consume_step(trigger) {
                Some(Direction::Clockwise) => {
                    value = value.saturating_sub(step);
                    timer = self.time.now_ms();
                }
                Some(Direction::CounterClockwise) => {
                    value = value.saturating_add(step);
                    timer = self.time.now_ms();
                }
                None => {}
            }
            value = limit(value, low, high);

            if drawn != Some(value) {
                report(self.draw_value(value, low, high));
                drawn = Some(value);
            }
            self.time.yield_now().await;
        }

        self.resync_button();

        #[cfg(feature = "defmt")]
        defmt::debug!("value '{}' set to {}", title, value);

        value
    }

    /// Pick one of `items` with the knob
    ///
    /// Up to ten items are shown in two columns. Returns the highlighted
    /// index on a button press, or 0 if the display timeout passes with
    /// no turn, so item 0 should be the safe choice. An empty list
    /// returns 0 straight away.
    pub async fn choose_from_list(&mut self, items: &[&str], title: &str) -> usize {
        if items.is_empty() {
            return 0;
        }

        let items = &items[..items.len().min(LIST_CAPACITY)];
        let timeout_ms = self.config.display_timeout_ms();
        let trigger = self.config.trigger();

        report(self.draw_list(title, items, 0));
        self.wait_for_release(timeout_ms, self.config.release_poll_ms)
            .await;

        let mut timer = self.time.now_ms();
        let mut highlighted = 0usize;
        while self.button.is_high() && self.time.elapsed_ms(timer) < timeout_ms {
            match self.encoder.take_step(trigger) {
                Some(Direction::Clockwise) => {
                    highlighted += 1;
                    timer = self.time.now_ms();
                }
                Some(Direction::CounterClockwise) => {
                    highlighted = highlighted.saturating_sub(1);
                    timer = self.time.now_ms();
                }
                None => {}
            }
            highlighted = highlighted.min(items.len() - 1);

            report(self.draw_list(title, items, highlighted));
            self.time.yield_now().await;
        }

        if self.time.elapsed_ms(timer) >= timeout_ms {
            highlighted = 0;
        }
        self.resync_button();

        #[cfg(feature = "defmt")]
        defmt::debug!("item {} chosen from '{}'", highlighted, title);

        highlighted
    }

    /// Long-press gate for destructive actions
    ///
    /// Shows "HOLD BUTTON TO CONFIRM!", waits the confirm hold time and
    /// returns true only if the button is still down at the end.
    pub async fn confirm_action_required(&mut self) -> bool {
        report(self.draw_confirm_prompt());
        self.time.delay_ms(self.config.confirm_hold_ms).await;
        report(self.blank());

        let confirmed = self.button.is_low();
        self.resync_button();

        #[cfg(feature = "defmt")]
        defmt::debug!("confirmation {}", if confirmed { "held" } else { "dropped" });

        confirmed
    }

    fn draw_value_title(&mut self, title: &str) -> Result<(), DisplayError> {
        let display = &mut self.display;
        display.clear()?;
        display.set_text_size(if title.chars().count() > LARGE_TITLE_MAX {
            1
        } else {
            2
        });
        display.set_text_color(TextColor::Normal);
        display.set_cursor(0, 0);
        display.print(title)?;
        display.present()
    }

    fn draw_value(&mut self, value: i32, low: i32, high: i32) -> Result<(), DisplayError> {
        let display = &mut self.display;
        let width = display.width();
        let height = display.height() as i32;

        display.fill_rect(0, VALUE_TEXT_Y, width, (height - VALUE_TEXT_Y) as u32, false)?;
        display.set_text_size(3);
        display.set_text_color(TextColor::Normal);
        display.set_cursor(0, VALUE_TEXT_Y);
        display.print_number(value)?;

        let bar = bar_width(value, low, high, width);
        display.fill_rect(0, height - BAR_HEIGHT as i32, bar, BAR_HEIGHT, true)?;
        display.present()
    }

    fn draw_list(
        &mut self,
        title: &str,
        items: &[&str],
        highlighted: usize,
    ) -> Result<(), DisplayError> {
        let display = &mut self.display;
        let width = display.width() as i32;

        display.clear()?;
        display.set_text_size(1);
        display.set_text_color(TextColor::Normal);
        display.set_cursor(LIST_TITLE_X, 0);
        display.print(title)?;
        display.draw_line(0, LINE_SPACE_1, width, LINE_SPACE_1)?;

        for (index, item) in items.iter().enumerate() {
            let (x, y) = if index < LIST_COLUMN {
                (0, LINE_SPACE_1 * index as i32 + 1 + TOP_LINE)
            } else {
                (width / 2, LINE_SPACE_1 * (index - LIST_COLUMN) as i32 + TOP_LINE)
            };
            display.set_cursor(x, y);
            display.set_text_color(if index == highlighted {
                TextColor::Inverted
            } else {
                TextColor::Normal
            });
            display.print(item)?;
        }
        display.present()
    }

    fn draw_confirm_prompt(&mut self) -> Result<(), DisplayError> {
        let display = &mut self.display;
        display.clear()?;
        display.set_text_size(2);
        display.set_text_color(TextColor::Normal);
        for (line, text) in ["HOLD", "BUTTON TO", "CONFIRM!"].into_iter().enumerate() {
            display.set_cursor(0, LINE_SPACE_2 * line as i32);
            display.print(text)?;
        }
        display.present()
    }
}
