//! GPIO pin abstractions
//!
//! Provides the digital input trait that chip-specific code implements
//! for the encoder phase pins and the push button.

/// Digital input pin
///
/// Implementations should handle the actual hardware register reading
/// for the specific chip. Reads must be side-effect free so they can be
/// repeated for debouncing.
pub trait InputPin {
    /// Check if the pin reads high (logic 1)
    fn is_high(&self) -> bool;

    /// Check if the pin reads low (logic 0)
    fn is_low(&self) -> bool {
        !self.is_high()
    }
}

impl<T: InputPin + ?Sized> InputPin for &T {
    fn is_high(&self) -> bool {
        (**self).is_high()
    }
}

impl<T: InputPin + ?Sized> InputPin for &mut T {
    fn is_high(&self) -> bool {
        (**self).is_high()
    }
}
