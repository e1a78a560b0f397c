//! Simulated board for host tests
//!
//! A shared millisecond clock, a push button scripted as timed level
//! changes, and encoder turns delivered as phase-A edges whenever the
//! clock passes their scheduled time.

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::Rc;

use rotamenu_hal::{InputPin, Timebase};

use crate::input::SharedEncoder;

/// Next phase pair for one detent, as sampled on a phase A edge
///
/// Clockwise alternates 00/11, counter-clockwise alternates 01/10.
pub fn next_phase(phase: (bool, bool), clockwise: bool) -> (bool, bool) {
    let a = !phase.0;
    let b = if clockwise { a } else { !a };
    (a, b)
}

#[derive(Default)]
struct SimState {
    now: Cell<u64>,
    /// `(at_ms, level_high)`, sorted by time
    button: RefCell<Vec<(u64, bool)>>,
    /// `(at_ms, signed detents)`, sorted by time
    turns: RefCell<VecDeque<(u64, i32)>>,
    phase: Cell<(bool, bool)>,
}

/// Handle for scripting a simulation
#[derive(Clone, Default)]
pub struct Sim {
    state: Rc<SimState>,
}

impl Sim {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn now(&self) -> u64 {
        self.state.now.get()
    }

    /// Move the clock without delivering encoder turns
    pub fn advance(&self, ms: u64) {
        self.state.now.set(self.now() + ms);
    }

    /// Hold the button down from `at_ms` for `hold_ms`
    pub fn press(&self, at_ms: u64, hold_ms: u64) {
        let mut button = self.state.button.borrow_mut();
        button.push((at_ms, false));
        button.push((at_ms + hold_ms, true));
        button.sort_by_key(|&(at, _)| at);
    }

    /// Turn the knob by `detents` at `at_ms`; positive is clockwise
    pub fn turn(&self, at_ms: u64, detents: i32) {
        let mut turns = self.state.turns.borrow_mut();
        turns.push_back((at_ms, detents));
        turns.make_contiguous().sort_by_key(|&(at, _)| at);
    }

    pub fn pin(&self) -> SimPin {
        SimPin {
            state: self.state.clone(),
        }
    }

    /// Timebase that only moves the clock
    pub fn clock(&self) -> SimTimebase<'static> {
        SimTimebase {
            state: self.state.clone(),
            encoder: None,
        }
    }

    /// Timebase that also feeds scheduled turns into `encoder`
    pub fn timebase<'a>(&self, encoder: &'a SharedEncoder) -> SimTimebase<'a> {
        SimTimebase {
            state: self.state.clone(),
            encoder: Some(encoder),
        }
    }
}

/// Active-low button driven by the script
pub struct SimPin {
    state: Rc<SimState>,
}

impl InputPin for SimPin {
    fn is_high(&self) -> bool {
        let now = self.state.now.get();
        self.state
            .button
            .borrow()
            .iter()
            .take_while(|&&(at, _)| at <= now)
            .last()
            .map_or(true, |&(_, high)| high)
    }
}

pub struct SimTimebase<'a> {
    state: Rc<SimState>,
    encoder: Option<&'a SharedEncoder>,
}

impl SimTimebase<'_> {
    fn advance(&mut self, ms: u64) {
        let now = self.state.now.get() + ms;
        self.state.now.set(now);

        let Some(encoder) = self.encoder else {
            return;
        };

        let mut turns = self.state.turns.borrow_mut();
        while let Some(&(at, detents)) = turns.front() {
            if at > now {
                break;
            }
            turns.pop_front();
            for _ in 0..detents.unsigned_abs() {
                let phase = next_phase(self.state.phase.get(), detents > 0);
                self.state.phase.set(phase);
                encoder.on_edge(phase.0, phase.1);
            }
        }
    }
}

impl Timebase for SimTimebase<'_> {
    fn now_ms(&self) -> u64 {
        self.state.now.get()
    }

    async fn delay_ms(&mut self, ms: u32) {
        self.advance(u64::from(ms));
    }

    async fn yield_now(&mut self) {
        self.advance(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embassy_futures::block_on;

    #[test]
    fn test_button_script() {
        let sim = Sim::new();
        sim.press(100, 50);
        let pin = sim.pin();

        assert!(pin.is_high());
        sim.advance(100);
        assert!(pin.is_low());
        sim.advance(49);
        assert!(pin.is_low());
        sim.advance(1);
        assert!(pin.is_high());
    }

    #[test]
    fn test_turns_delivered_on_time() {
        let sim = Sim::new();
        let encoder = SharedEncoder::new();
        sim.turn(10, 3);
        sim.turn(20, -1);
        let mut time = sim.timebase(&encoder);

        block_on(time.delay_ms(9));
        assert_eq!(encoder.position(), 0);
        block_on(time.yield_now());
        assert_eq!(encoder.position(), 3);
        block_on(time.delay_ms(10));
        assert_eq!(encoder.position(), 2);
    }
}
