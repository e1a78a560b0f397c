//! Board wiring (ESP32 DevKit)
//!
//! | Signal         | GPIO |
//! |----------------|------|
//! | Encoder A      | 13   |
//! | Encoder B      | 14   |
//! | Encoder button | 15   |
//! | OLED SDA       | 21   |
//! | OLED SCL       | 22   |

use core::cell::RefCell;

use critical_section::Mutex;
use esp_hal::gpio::Input;
use esp_hal::{handler, ram};
use rotamenu_core::input::SharedEncoder;
use rotamenu_hal::InputPin;

/// Encoder counter shared with the GPIO interrupt
pub static ENCODER: SharedEncoder = SharedEncoder::new();

/// Phase pins, owned by the interrupt once installed
static PHASE_A: Mutex<RefCell<Option<Input<'static>>>> = Mutex::new(RefCell::new(None));
static PHASE_B: Mutex<RefCell<Option<Input<'static>>>> = Mutex::new(RefCell::new(None));

/// Hand the phase pins to the interrupt handler
///
/// Phase A must already be listening for any edge.
pub fn install_encoder(a: Input<'static>, b: Input<'static>) {
    critical_section::with(|cs| {
        ENCODER.on_edge(a.is_high(), b.is_high());
        ENCODER.reset();
        PHASE_A.borrow_ref_mut(cs).replace(a);
        PHASE_B.borrow_ref_mut(cs).replace(b);
    });
}

/// Phase A edge: sample both phases and feed the decoder
#[handler]
#[ram]
pub fn encoder_isr() {
    critical_section::with(|cs| {
        let mut a = PHASE_A.borrow_ref_mut(cs);
        let b = PHASE_B.borrow_ref(cs);
        let (Some(a), Some(b)) = (a.as_mut(), b.as_ref()) else {
            return;
        };

        if !a.is_interrupt_set() {
            return;
        }
        a.clear_interrupt();

        ENCODER.on_edge(a.is_high(), b.is_high());
    });
}

/// Push button with a pull-up, pressed reads low
pub struct ButtonPin(pub Input<'static>);

impl InputPin for ButtonPin {
    fn is_high(&self) -> bool {
        self.0.is_high()
    }
}
