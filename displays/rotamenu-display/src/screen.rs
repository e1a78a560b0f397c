//! Headless canvas
//!
//! A `RenderSink` that keeps a structured record of what was drawn
//! instead of pixels. Used as the display stand-in for host tests and
//! for boards running without a panel.

use heapless::{String, Vec};

use crate::backend::{DisplayError, RenderSink, TextColor, SCREEN_HEIGHT, SCREEN_WIDTH};

/// Maximum text runs per frame
pub const MAX_TEXT_RUNS: usize = 32;

/// Maximum shapes per frame
pub const MAX_SHAPES: usize = 16;

/// Maximum characters kept per text run
pub const RUN_LEN: usize = 24;

/// Glyph cell width at text size 1
const GLYPH_WIDTH: i32 = 6;

/// One `print` call: text plus the styling in effect when it was drawn
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextRun {
    pub x: i32,
    pub y: i32,
    pub size: u8,
    pub color: TextColor,
    pub text: String<RUN_LEN>,
}

/// Primitive shapes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Shape {
    Line { x0: i32, y0: i32, x1: i32, y1: i32 },
    Rect { x: i32, y: i32, width: u32, height: u32 },
    Fill { x: i32, y: i32, width: u32, height: u32 },
}

impl Shape {
    fn origin(&self) -> (i32, i32) {
        match *self {
            Shape::Line { x0, y0, .. } => (x0, y0),
            Shape::Rect { x, y, .. } | Shape::Fill { x, y, .. } => (x, y),
        }
    }
}

/// Recorded content of one frame
#[derive(Debug, Clone, Default)]
pub struct Frame {
    texts: Vec<TextRun, MAX_TEXT_RUNS>,
    shapes: Vec<Shape, MAX_SHAPES>,
}

impl Frame {
    /// Remove everything
    pub fn clear(&mut self) {
        self.texts.clear();
        self.shapes.clear();
    }

    /// Text runs in draw order
    pub fn texts(&self) -> &[TextRun] {
        &self.texts
    }

    /// Shapes in draw order
    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    /// Most recent run whose text matches exactly
    pub fn find(&self, text: &str) -> Option<&TextRun> {
        self.texts.iter().rev().find(|run| run.text.as_str() == text)
    }

    /// Check if any run matches exactly
    pub fn contains(&self, text: &str) -> bool {
        self.find(text).is_some()
    }

    /// Filled shapes only, as `(x, y, width, height)`
    pub fn fills(&self) -> impl Iterator<Item = (i32, i32, u32, u32)> + '_ {
        self.shapes.iter().filter_map(|shape| match *shape {
            Shape::Fill {
                x,
                y,
                width,
                height,
            } => Some((x, y, width, height)),
            _ => None,
        })
    }

    /// Check if nothing has been drawn
    pub fn is_blank(&self) -> bool {
        self.texts.is_empty() && self.shapes.is_empty()
    }

    /// Drop everything whose origin lies inside the given rectangle
    fn erase(&mut self, x: i32, y: i32, width: u32, height: u32) {
        let inside = |px: i32, py: i32| {
            px >= x && py >= y && px < x + width as i32 && py < y + height as i32
        };
        self.texts.retain(|run| !inside(run.x, run.y));
        self.shapes.retain(|shape| {
            let (px, py) = shape.origin();
            !inside(px, py)
        });
    }
}

/// Headless render sink
///
/// Drawing goes to a working frame; `present()` publishes it as the
/// shown frame, like a buffered OLED driver flushing to the panel.
#[derive(Debug, Clone)]
pub struct Canvas {
    width: u32,
    height: u32,
    working: Frame,
    shown: Frame,
    cursor: (i32, i32),
    text_size: u8,
    color: TextColor,
    presented: u32,
}

impl Default for Canvas {
    fn default() -> Self {
        Self::new(SCREEN_WIDTH, SCREEN_HEIGHT)
    }
}

impl Canvas {
    /// Create an empty canvas with the given pixel dimensions
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            working: Frame::default(),
            shown: Frame::default(),
            cursor: (0, 0),
            text_size: 1,
            color: TextColor::Normal,
            presented: 0,
        }
    }

    /// The last presented frame
    pub fn shown(&self) -> &Frame {
        &self.shown
    }

    /// The frame currently being drawn
    pub fn working(&self) -> &Frame {
        &self.working
    }

    /// Number of `present()` calls so far
    pub fn frames_presented(&self) -> u32 {
        self.presented
    }

    /// Current text cursor
    pub fn cursor(&self) -> (i32, i32) {
        self.cursor
    }
}

impl RenderSink for Canvas {
    fn clear(&mut self) -> Result<(), DisplayError> {
        self.working.clear();
        Ok(())
    }

    fn set_text_size(&mut self, size: u8) {
        self.text_size = size.max(1);
    }

    fn set_text_color(&mut self, color: TextColor) {
        self.color = color;
    }

    fn set_cursor(&mut self, x: i32, y: i32) {
        self.cursor = (x, y);
    }

    fn print(&mut self, text: &str) -> Result<(), DisplayError> {
        if text.is_empty() {
            return Ok(());
        }

        let mut kept: String<RUN_LEN> = String::new();
        for ch in text.chars() {
            if kept.push(ch).is_err() {
                break;
            }
        }

        let run = TextRun {
            x: self.cursor.0,
            y: self.cursor.1,
            size: self.text_size,
            color: self.color,
            text: kept,
        };
        self.working
            .texts
            .push(run)
            .map_err(|_| DisplayError::BufferOverflow)?;

        let advance = text.chars().count() as i32 * GLYPH_WIDTH * i32::from(self.text_size);
        self.cursor.0 += advance;
        Ok(())
    }

    fn draw_line(&mut self, x0: i32, y0: i32, x1: i32, y1: i32) -> Result<(), DisplayError> {
        self.working
            .shapes
            .push(Shape::Line { x0, y0, x1, y1 })
            .map_err(|_| DisplayError::BufferOverflow)
    }

    fn draw_rect(&mut self, x: i32, y: i32, width: u32, height: u32) -> Result<(), DisplayError> {
        self.working
            .shapes
            .push(Shape::Rect {
                x,
                y,
                width,
                height,
            })
            .map_err(|_| DisplayError::BufferOverflow)
    }

    fn fill_rect(
        &mut self,
        x: i32,
        y: i32,
        width: u32,
        height: u32,
        on: bool,
    ) -> Result<(), DisplayError> {
        if !on {
            // Dark fill is background; it only removes what it covers
            self.working.erase(x, y, width, height);
            return Ok(());
        }
        if width == 0 || height == 0 {
            return Ok(());
        }
        self.working
            .shapes
            .push(Shape::Fill {
                x,
                y,
                width,
                height,
            })
            .map_err(|_| DisplayError::BufferOverflow)
    }

    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn present(&mut self) -> Result<(), DisplayError> {
        self.shown = self.working.clone();
        self.presented = self.presented.saturating_add(1);
        Ok(())
    }
}
