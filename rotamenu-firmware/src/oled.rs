//! SSD1306 render sink
//!
//! Implements [`RenderSink`] on the ssd1306 buffered graphics mode using
//! embedded-graphics text and primitives. Size 1 text uses the 6x9
//! font so it fits the 9 pixel menu rows, anything larger the 10x20 font.

use embedded_graphics::mono_font::ascii::{FONT_10X20, FONT_6X9};
use embedded_graphics::mono_font::{MonoFont, MonoTextStyleBuilder};
use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{Line, PrimitiveStyle, Rectangle};
use embedded_graphics::text::{Baseline, Text};
use ssd1306::mode::BufferedGraphicsMode;
use ssd1306::prelude::*;
use ssd1306::{I2CDisplayInterface, Ssd1306};

use rotamenu_core::config::DisplayConfig;
use rotamenu_core::ui::layout::LINE_SPACE_1;
use rotamenu_display::{DisplayError, RenderSink, TextColor};

// Size 1 glyphs must not spill into the next menu row
const _: () = assert!(FONT_6X9.character_size.height as i32 <= LINE_SPACE_1);

/// Concrete display driver, generic over the I2C implementation
pub type Display<I2C> =
    Ssd1306<I2CInterface<I2C>, DisplaySize128x64, BufferedGraphicsMode<DisplaySize128x64>>;

/// SSD1306 panel behind the menu core's drawing calls
pub struct OledSink<I2C> {
    display: Display<I2C>,
    cursor: Point,
    size: u8,
    color: TextColor,
}

impl<I2C> OledSink<I2C>
where
    I2C: embedded_hal::i2c::I2c,
{
    /// Wrap the bus; call [`init`](Self::init) before drawing
    pub fn new(i2c: I2C, config: &DisplayConfig) -> Self {
        let interface = I2CDisplayInterface::new_custom_address(i2c, config.address);
        let rotation = if config.rotate_180 {
            DisplayRotation::Rotate180
        } else {
            DisplayRotation::Rotate0
        };
        let display =
            Ssd1306::new(interface, DisplaySize128x64, rotation).into_buffered_graphics_mode();

        Self {
            display,
            cursor: Point::zero(),
            size: 1,
            color: TextColor::Normal,
        }
    }

    /// Initialise the controller and blank the panel
    pub fn init(&mut self) -> Result<(), DisplayError> {
        self.display.init().map_err(|_| DisplayError::NotInitialized)?;
        self.display.clear_buffer();
        self.present()
    }

    fn font(&self) -> &'static MonoFont<'static> {
        if self.size <= 1 {
            &FONT_6X9
        } else {
            &FONT_10X20
        }
    }
}

impl<I2C> RenderSink for OledSink<I2C>
where
    I2C: embedded_hal::i2c::I2c,
{
    fn clear(&mut self) -> Result<(), DisplayError> {
        self.display.clear_buffer();
        self.cursor = Point::zero();
        Ok(())
    }

    fn set_text_size(&mut self, size: u8) {
        self.size = size.max(1);
    }

    fn set_text_color(&mut self, color: TextColor) {
        self.color = color;
    }

    fn set_cursor(&mut self, x: i32, y: i32) {
        self.cursor = Point::new(x, y);
    }

    fn print(&mut self, text: &str) -> Result<(), DisplayError> {
        let builder = MonoTextStyleBuilder::new().font(self.font());
        let style = match self.color {
            TextColor::Normal => builder.text_color(BinaryColor::On),
            TextColor::Inverted => builder
                .text_color(BinaryColor::Off)
                .background_color(BinaryColor::On),
        }
        .build();

        self.cursor = Text::with_baseline(text, self.cursor, style, Baseline::Top)
            .draw(&mut self.display)
            .map_err(|_| DisplayError::Communication)?;
        Ok(())
    }

    fn draw_line(&mut self, x0: i32, y0: i32, x1: i32, y1: i32) -> Result<(), DisplayError> {
        Line::new(Point::new(x0, y0), Point::new(x1, y1))
            .into_styled(PrimitiveStyle::with_stroke(BinaryColor::On, 1))
            .draw(&mut self.display)
            .map_err(|_| DisplayError::Communication)
    }

    fn draw_rect(&mut self, x: i32, y: i32, width: u32, height: u32) -> Result<(), DisplayError> {
        Rectangle::new(Point::new(x, y), Size::new(width, height))
            .into_styled(PrimitiveStyle::with_stroke(BinaryColor::On, 1))
            .draw(&mut self.display)
            .map_err(|_| DisplayError::Communication)
    }

    fn fill_rect(
        &mut self,
        x: i32,
        y: i32,
        width: u32,
        height: u32,
        on: bool,
    ) -> Result<(), DisplayError> {
        Rectangle::new(Point::new(x, y), Size::new(width, height))
            .into_styled(PrimitiveStyle::with_fill(BinaryColor::from(on)))
            .draw(&mut self.display)
            .map_err(|_| DisplayError::Communication)
    }

    fn width(&self) -> u32 {
        self.display.bounding_box().size.width
    }

    fn height(&self) -> u32 {
        self.display.bounding_box().size.height
    }

    fn present(&mut self) -> Result<(), DisplayError> {
        self.display.flush().map_err(|_| DisplayError::Communication)
    }
}
