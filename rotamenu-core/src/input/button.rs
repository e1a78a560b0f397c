//! Debounced push button
//!
//! The button is active low (pulled up, pressed pulls to ground).

use rotamenu_hal::{InputPin, Timebase};

use crate::config::MenuConfig;

/// Accepted change of the debounced button level
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ButtonEdge {
    Pressed,
    Released,
}

/// Debounce and rate-limit state for one button
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ButtonMonitor {
    /// Debounced level; high means released
    level_high: bool,
    last_change_ms: Option<u64>,
    last_activity_ms: Option<u64>,
    settle_ms: u32,
    min_change_ms: u32,
}

impl ButtonMonitor {
    /// Create a monitor that starts at the given debounced level
    pub fn new(level_high: bool, config: &MenuConfig) -> Self {
        Self {
            level_high,
            last_change_ms: None,
            last_activity_ms: None,
            settle_ms: config.button_settle_ms,
            min_change_ms: config.button_min_change_ms,
        }
    }

    /// Create a monitor that starts at the pin's current level
    pub fn from_pin<P: InputPin + ?Sized>(pin: &P, config: &MenuConfig) -> Self {
        Self::new(pin.is_high(), config)
    }

    /// Debounced state
    pub fn is_pressed(&self) -> bool {
        !self.level_high
    }

    /// Adopt a level read elsewhere without reporting it as a change
    ///
    /// Rate limiting still counts from the last accepted change.
    pub fn resync(&mut self, level_high: bool) {
        self.level_high = level_high;
    }

    /// Time of the last accepted change
    pub fn last_activity_ms(&self) -> Option<u64> {
        self.last_activity_ms
    }

    /// Check the pin for a debounced change
    ///
    /// Returns immediately when the raw level matches the debounced one.
    /// Otherwise waits the settle time and re-reads; a reading that
    /// reverted is bounce. A confirmed change is still dropped when it
    /// comes sooner than the minimum change interval after the last one.
    pub async fn poll<P, T>(&mut self, pin: &P, time: &mut T) -> Option<ButtonEdge>
    where
        P: InputPin + ?Sized,
        T: Timebase,
    {
        if pin.is_high() == self.level_high {
            return None;
        }

        time.delay_ms(self.settle_ms).await;
        if pin.is_high() == self.level_high {
            return None;
        }

        let now = time.now_ms();
        if let Some(last) = self.last_change_ms {
            if now.saturating_sub(last) < u64::from(self.min_change_ms) {
                #[cfg(feature = "defmt")]
                defmt::trace!("button change ignored, {} ms since last", now - last);
                return None;
            }
        }

        self.level_high = !self.level_high;
        self.last_change_ms = Some(now);
        self.last_activity_ms = Some(now);

        let edge = if self.level_high {
            ButtonEdge::Released
        } else {
            ButtonEdge::Pressed
        };

        #[cfg(feature = "defmt")]
        defmt::debug!("button {}", edge);

        Some(edge)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::Sim;
    use embassy_futures::block_on;

    fn config() -> MenuConfig {
        MenuConfig::default()
    }

    #[test]
    fn test_unchanged_level_is_cheap() {
        let sim = Sim::new();
        let pin = sim.pin();
        let mut time = sim.clock();
        let mut monitor = ButtonMonitor::from_pin(&pin, &config());

        assert_eq!(block_on(monitor.poll(&pin, &mut time)), None);
        assert_eq!(sim.now(), 0);
    }

    #[test]
    fn test_press_accepted_after_settle() {
        let sim = Sim::new();
        sim.press(0, 1_000);
        let pin = sim.pin();
        let mut time = sim.clock();
        let mut monitor = ButtonMonitor::new(true, &config());

        assert_eq!(
            block_on(monitor.poll(&pin, &mut time)),
            Some(ButtonEdge::Pressed)
        );
        assert_eq!(sim.now(), 40);
        assert!(monitor.is_pressed());
        assert_eq!(monitor.last_activity_ms(), Some(40));
    }

    #[test]
    fn test_bounce_rejected() {
        let sim = Sim::new();
        // 10 ms glitch, gone before the 40 ms re-read
        sim.press(0, 10);
        let pin = sim.pin();
        let mut time = sim.clock();
        let mut monitor = ButtonMonitor::new(true, &config());

        assert_eq!(block_on(monitor.poll(&pin, &mut time)), None);
        assert!(!monitor.is_pressed());
        assert_eq!(monitor.last_activity_ms(), None);
    }

    #[test]
    fn test_rate_limited() {
        let sim = Sim::new();
        sim.press(0, 200);
        let pin = sim.pin();
        let mut time = sim.clock();
        let mut monitor = ButtonMonitor::new(true, &config());

        assert_eq!(
            block_on(monitor.poll(&pin, &mut time)),
            Some(ButtonEdge::Pressed)
        );

        // released at 200, but the press was accepted at 40
        sim.advance(260);
        assert_eq!(block_on(monitor.poll(&pin, &mut time)), None);
        assert!(monitor.is_pressed());

        // past the 500 ms window the release goes through
        sim.advance(300);
        assert_eq!(
            block_on(monitor.poll(&pin, &mut time)),
            Some(ButtonEdge::Released)
        );
        assert!(!monitor.is_pressed());
    }

    #[test]
    fn test_starts_at_pin_level() {
        let sim = Sim::new();
        sim.press(0, 5_000);
        let pin = sim.pin();
        let monitor = ButtonMonitor::from_pin(&pin, &config());
        assert!(monitor.is_pressed());
    }

    #[test]
    fn test_resync_swallows_press() {
        let sim = Sim::new();
        sim.press(0, 1_000);
        let pin = sim.pin();
        let mut time = sim.clock();
        let mut monitor = ButtonMonitor::new(true, &config());

        monitor.resync(false);
        assert!(monitor.is_pressed());
        assert_eq!(block_on(monitor.poll(&pin, &mut time)), None);
        assert_eq!(monitor.last_activity_ms(), None);

        // the release is reported normally
        sim.advance(1_000);
        assert_eq!(
            block_on(monitor.poll(&pin, &mut time)),
            Some(ButtonEdge::Released)
        );
    }
}
