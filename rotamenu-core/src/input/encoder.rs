//! Interrupt-shared encoder counter
//!
//! The GPIO interrupt and the main loop both touch the decoder. Every
//! access on either side runs inside `critical_section::with`, so the
//! main loop never sees a half-applied update.

use core::cell::Cell;

use critical_section::Mutex;

use super::quadrature::{Direction, QuadratureDecoder, Transition};

/// Quadrature decoder that can live in a `static`
///
/// ```ignore
/// static ENCODER: SharedEncoder = SharedEncoder::new();
///
/// #[handler]
/// fn gpio_isr() {
///     ENCODER.on_edge(pin_a.is_high(), pin_b.is_high());
/// }
/// ```
pub struct SharedEncoder {
    inner: Mutex<Cell<QuadratureDecoder>>,
}

impl SharedEncoder {
    pub const fn new() -> Self {
        Self {
            inner: Mutex::new(Cell::new(QuadratureDecoder::new())),
        }
    }

    fn with<R>(&self, f: impl FnOnce(&mut QuadratureDecoder) -> R) -> R {
        critical_section::with(|cs| {
            let cell = self.inner.borrow(cs);
            let mut decoder = cell.get();
            let result = f(&mut decoder);
            cell.set(decoder);
            result
        })
    }

    /// Feed one phase sample; call from the phase A edge interrupt
    pub fn on_edge(&self, a: bool, b: bool) -> Transition {
        self.with(|decoder| decoder.update(a, b))
    }

    /// Read the accumulated position and clear it
    pub fn take(&self) -> i32 {
        self.with(QuadratureDecoder::take)
    }

    /// Consume one step of `trigger` counts, keeping any remainder
    pub fn consume_step(&self, trigger: i32) -> Option<Direction> {
        self.with(|decoder| decoder.consume_step(trigger))
    }

    /// Consume one step of `trigger` counts and clear the remainder
    pub fn take_step(&self, trigger: i32) -> Option<Direction> {
        self.with(|decoder| decoder.take_step(trigger))
    }

    /// Zero the position
    pub fn reset(&self) {
        self.with(QuadratureDecoder::reset)
    }

    /// Snapshot of the position
    pub fn position(&self) -> i32 {
        self.with(|decoder| decoder.position())
    }
}

impl Default for SharedEncoder {
    fn default() -> Self {
        Self::new()
    }
}
