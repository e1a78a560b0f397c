//! Quadrature decoding
//!
//! The interrupt fires on every edge of phase A only. Each call samples
//! both phases and compares them with the pair seen on the previous call:
//!
//! | previous -> new        | result     |
//! |------------------------|------------|
//! | unchanged              | `Idle`     |
//! | A changed, new A == B  | `Forward`  |
//! | A changed, new A != B  | `Backward` |
//! | only B changed         | `Invalid`  |
//!
//! Transitions where both phases changed are a lost intermediate state
//! and count as one step in the direction given by the new pair.

/// Result of classifying one phase sample against the previous one
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Transition {
    /// No change since the last sample (contact bounce)
    Idle,
    /// One step clockwise (+1)
    Forward,
    /// One step counter-clockwise (-1)
    Backward,
    /// Phase B moved without an A edge; missed or spurious edge
    Invalid,
}

impl Transition {
    /// Signed change this transition applies to the position
    pub const fn delta(self) -> i32 {
        match self {
            Transition::Forward => 1,
            Transition::Backward => -1,
            Transition::Idle | Transition::Invalid => 0,
        }
    }
}

/// Rotation direction of one consumed step
///
/// Positive positions are clockwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Direction {
    Clockwise,
    CounterClockwise,
}

/// Classify a phase sample against the previous one
pub const fn classify(prev_a: bool, prev_b: bool, a: bool, b: bool) -> Transition {
    if prev_a == a && prev_b == b {
        Transition::Idle
    } else if prev_a != a {
        if a == b {
            Transition::Forward
        } else {
            Transition::Backward
        }
    } else {
        Transition::Invalid
    }
}

/// Decoder state: signed position plus the last sampled phase pair
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct QuadratureDecoder {
    position: i32,
    prev_a: bool,
    prev_b: bool,
}

impl QuadratureDecoder {
    /// Decoder at position 0 with both phases last seen low
    pub const fn new() -> Self {
        Self {
            position: 0,
            prev_a: false,
            prev_b: false,
        }
    }

    /// Apply one phase sample
    ///
    /// The sampled pair always becomes the new previous pair, including
    /// after an invalid transition.
    pub fn update(&mut self, a: bool, b: bool) -> Transition {
        let transition = classify(self.prev_a, self.prev_b, a, b);

        if transition == Transition::Invalid {
            #[cfg(feature = "defmt")]
            defmt::debug!(
                "invalid encoder transition prev={},{} new={},{}",
                self.prev_a,
                self.prev_b,
                a,
                b
            );
        }

        self.position = self.position.wrapping_add(transition.delta());
        self.prev_a = a;
        self.prev_b = b;
        transition
    }

    /// Current signed position
    pub fn position(&self) -> i32 {
        self.position
    }

    /// Last sampled phase pair `(a, b)`
    pub fn phases(&self) -> (bool, bool) {
        (self.prev_a, self.prev_b)
    }

    /// Read the position and set it to zero
    pub fn take(&mut self) -> i32 {
        core::mem::take(&mut self.position)
    }

    /// Zero the position, keeping the phase history
    pub fn reset(&mut self) {
        self.position = 0;
    }

    /// Remove one step of `trigger` counts if the position has reached it
    ///
    /// Any remainder stays in the position for the next call.
    pub fn consume_step(&mut self, trigger: i32) -> Option<Direction> {
        let trigger = trigger.max(1);
        if self.position >= trigger {
            self.position -= trigger;
            Some(Direction::Clockwise)
        } else if self.position <= -trigger {
            self.position += trigger;
            Some(Direction::CounterClockwise)
        } else {
            None
        }
    }

    /// Like [`consume_step`](Self::consume_step) but discards the remainder
    pub fn take_step(&mut self, trigger: i32) -> Option<Direction> {
        let direction = self.consume_step(trigger)?;
        self.position = 0;
        Some(direction)
    }
}
