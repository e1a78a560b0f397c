//! Encoder and push button input
//!
//! The quadrature decoder runs in interrupt context and only ever touches
//! the shared step counter. The button monitor runs in the main loop.

pub mod button;
pub mod encoder;
pub mod quadrature;

pub use button::{ButtonEdge, ButtonMonitor};
pub use encoder::SharedEncoder;
pub use quadrature::{classify, Direction, QuadratureDecoder, Transition};
