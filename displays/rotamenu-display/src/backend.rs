//! Render sink trait
//!
//! Defines the interface between the menu core and a drawing surface.

use core::fmt::Write;

use heapless::String;

/// Default panel width in pixels (SSD1306 128x64)
pub const SCREEN_WIDTH: u32 = 128;

/// Default panel height in pixels
pub const SCREEN_HEIGHT: u32 = 64;

/// Display backend errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayError {
    /// Communication error with display
    Communication,
    /// Invalid coordinates or dimensions
    InvalidCoordinates,
    /// Display not initialized
    NotInitialized,
    /// Buffer overflow
    BufferOverflow,
}

/// Text foreground/background styling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TextColor {
    /// Lit pixels on a dark background
    #[default]
    Normal,
    /// Dark pixels on a lit background (selection highlight)
    Inverted,
}

/// Drawing surface
///
/// Modelled on the Adafruit GFX call set: a text cursor, an integer text
/// size multiplier (1 = 6x8 glyph cell), a text color, and primitive
/// shapes. Nothing reaches the panel until [`present`](Self::present).
pub trait RenderSink {
    /// Clear the frame buffer
    fn clear(&mut self) -> Result<(), DisplayError>;

    /// Set the text size multiplier (1, 2 or 3)
    fn set_text_size(&mut self, size: u8);

    /// Set the text styling for following `print` calls
    fn set_text_color(&mut self, color: TextColor);

    /// Move the text cursor (top-left corner of the next glyph)
    fn set_cursor(&mut self, x: i32, y: i32);

    /// Print text at the cursor and advance the cursor past it
    fn print(&mut self, text: &str) -> Result<(), DisplayError>;

    /// Print a signed decimal number at the cursor
    fn print_number(&mut self, value: i32) -> Result<(), DisplayError> {
        let mut buf: String<12> = String::new();
        write!(buf, "{}", value).map_err(|_| DisplayError::BufferOverflow)?;
        self.print(&buf)
    }

    /// Draw a one pixel line between two points
    fn draw_line(&mut self, x0: i32, y0: i32, x1: i32, y1: i32) -> Result<(), DisplayError>;

    /// Draw a rectangle outline
    fn draw_rect(&mut self, x: i32, y: i32, width: u32, height: u32) -> Result<(), DisplayError>;

    /// Fill a rectangle with lit (`on`) or dark pixels
    fn fill_rect(
        &mut self,
        x: i32,
        y: i32,
        width: u32,
        height: u32,
        on: bool,
    ) -> Result<(), DisplayError>;

    /// Panel width in pixels
    fn width(&self) -> u32;

    /// Panel height in pixels
    fn height(&self) -> u32;

    /// Flush the frame buffer to the panel
    fn present(&mut self) -> Result<(), DisplayError>;
}

impl<T: RenderSink + ?Sized> RenderSink for &mut T {
    fn clear(&mut self) -> Result<(), DisplayError> {
        (**self).clear()
    }

    fn set_text_size(&mut self, size: u8) {
        (**self).set_text_size(size)
    }

    fn set_text_color(&mut self, color: TextColor) {
        (**self).set_text_color(color)
    }

    fn set_cursor(&mut self, x: i32, y: i32) {
        (**self).set_cursor(x, y)
    }

    fn print(&mut self, text: &str) -> Result<(), DisplayError> {
        (**self).print(text)
    }

    fn print_number(&mut self, value: i32) -> Result<(), DisplayError> {
        (**self).print_number(value)
    }

    fn draw_line(&mut self, x0: i32, y0: i32, x1: i32, y1: i32) -> Result<(), DisplayError> {
        (**self).draw_line(x0, y0, x1, y1)
    }

    fn draw_rect(&mut self, x: i32, y: i32, width: u32, height: u32) -> Result<(), DisplayError> {
        (**self).draw_rect(x, y, width, height)
    }

    fn fill_rect(
        &mut self,
        x: i32,
        y: i32,
        width: u32,
        height: u32,
        on: bool,
    ) -> Result<(), DisplayError> {
        (**self).fill_rect(x, y, width, height, on)
    }

    fn width(&self) -> u32 {
        (**self).width()
    }

    fn height(&self) -> u32 {
        (**self).height()
    }

    fn present(&mut self) -> Result<(), DisplayError> {
        (**self).present()
    }
}
