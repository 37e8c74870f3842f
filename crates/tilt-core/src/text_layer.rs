// src/text_layer.rs
//! Text layer owning the single on-screen text region

use embedded_graphics::mono_font::{MonoFont, MonoTextStyle};
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{PrimitiveStyle, Rectangle};
use embedded_graphics::text::{Baseline, Text};
use heapless::{String, Vec};
use log::debug;

use crate::config::{DISPLAY_TEXT_CAPACITY, DisplayText, PLACEHOLDER_TEXT, TEXT_MARGIN_PX};

/// Longest line the layout keeps, in bytes.
pub const MAX_LINE_LEN: usize = 64;

/// Most lines the layout keeps.
pub const MAX_LINES: usize = 16;

pub type Line = String<MAX_LINE_LEN>;
pub type Lines = Vec<Line, MAX_LINES>;

const ELLIPSIS: &str = "...";

/// System fonts available to the layer
///
/// - `Compact`: ProFont 9pt, fits a full sample line on the watch
/// - `Small`: ProFont 12pt
/// - `Medium`: ProFont 14pt (default)
/// - `Large`: ProFont 24pt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SystemFont {
    Compact,
    Small,
    #[default]
    Medium,
    Large,
}

impl SystemFont {
    pub fn font(&self) -> &'static MonoFont<'static> {
        match self {
            SystemFont::Compact => &profont::PROFONT_9_POINT,
            SystemFont::Small => &profont::PROFONT_12_POINT,
            SystemFont::Medium => &profont::PROFONT_14_POINT,
            SystemFont::Large => &profont::PROFONT_24_POINT,
        }
    }
}

/// How text that does not fit on one line is laid out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OverflowMode {
    /// Break lines between words, splitting words longer than a line
    #[default]
    WordWrap,
    /// One line per source line, cut short with "..."
    TrailingEllipsis,
    /// Like `WordWrap`, but newlines are treated as spaces
    Fill,
}

/// Area of `surface` covered by the text layer: the full height, inset
/// horizontally by [`TEXT_MARGIN_PX`] on each side.
pub fn text_bounds(surface: Rectangle) -> Rectangle {
    Rectangle::new(
        surface.top_left + Point::new(TEXT_MARGIN_PX as i32, 0),
        Size::new(
            surface.size.width.saturating_sub(2 * TEXT_MARGIN_PX),
            surface.size.height,
        ),
    )
}

/// A rectangular text region showing one string at a time.
///
/// The last call to [`display`](Self::display) wins; there is no queue of
/// pending text. Text is black on white unless styled otherwise.
///
/// # Examples
/// ```ignore
/// let mut layer = TextLayer::new(text_bounds(surface))
///     .with_font(SystemFont::Large);
/// layer.display("Z axis positive.");
/// layer.draw(&mut display)?;
/// ```
pub struct TextLayer {
    bounds: Rectangle,
    text: DisplayText,
    font: SystemFont,
    overflow: OverflowMode,
    foreground: Rgb565,
    background: Option<Rgb565>,
    dirty: bool,
}

impl TextLayer {
    /// Create a layer showing the placeholder text.
    pub fn new(bounds: Rectangle) -> Self {
        let mut text = DisplayText::new();
        text.push_str(PLACEHOLDER_TEXT).ok();

        Self {
            bounds,
            text,
            font: SystemFont::default(),
            overflow: OverflowMode::default(),
            foreground: Rgb565::BLACK,
            background: Some(Rgb565::WHITE),
            dirty: true,
        }
    }

    pub fn with_font(mut self, font: SystemFont) -> Self {
        self.set_font(font);
        self
    }

    pub fn with_overflow_mode(mut self, overflow: OverflowMode) -> Self {
        self.set_overflow_mode(overflow);
        self
    }

    /// Set text color and an optional background fill.
    pub fn with_colors(mut self, foreground: Rgb565, background: Option<Rgb565>) -> Self {
        self.foreground = foreground;
        self.background = background;
        self.dirty = true;
        self
    }

    /// Replace the shown text.
    ///
    /// Text longer than the layer capacity is cut at a char boundary.
    /// Returns `true` if the content changed and needs a redraw.
    pub fn display(&mut self, text: &str) -> bool {
        let text = truncate_to_char_boundary(text, DISPLAY_TEXT_CAPACITY);
        if self.text.as_str() == text {
            return false;
        }

        self.text.clear();
        self.text.push_str(text).ok();
        self.dirty = true;
        true
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn set_font(&mut self, font: SystemFont) {
        if self.font != font {
            self.font = font;
            self.dirty = true;
        }
    }

    pub fn font(&self) -> SystemFont {
        self.font
    }

    pub fn set_overflow_mode(&mut self, overflow: OverflowMode) {
        if self.overflow != overflow {
            self.overflow = overflow;
            self.dirty = true;
        }
    }

    pub fn overflow_mode(&self) -> OverflowMode {
        self.overflow
    }

    pub fn bounds(&self) -> Rectangle {
        self.bounds
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn mark_clean(&mut self) {
        self.dirty = false;
    }

    /// Characters that fit across the layer with the current font.
    pub fn chars_per_line(&self) -> usize {
        let font = self.font.font();
        let advance = font.character_size.width + font.character_spacing;
        ((self.bounds.size.width / advance.max(1)) as usize).clamp(1, MAX_LINE_LEN)
    }

    /// Lines as they will be drawn.
    pub fn lines(&self) -> Lines {
        layout_lines(&self.text, self.chars_per_line(), self.overflow)
    }

    /// Whole lines that fit vertically in the layer.
    pub fn visible_line_count(&self) -> usize {
        let line_height = self.font.font().character_size.height.max(1);
        (self.bounds.size.height / line_height) as usize
    }

    /// Lines that will actually be drawn.
    pub fn visible_lines(&self) -> Lines {
        let mut lines = self.lines();
        let visible = self.visible_line_count();
        if lines.len() > visible {
            debug!("Text layer clipped to {} of {} lines", visible, lines.len());
            lines.truncate(visible);
        }
        lines
    }

    /// Draw the layer, clipped to whole lines that fit in its bounds.
    pub fn draw<D: DrawTarget<Color = Rgb565>>(&self, display: &mut D) -> Result<(), D::Error> {
        if let Some(background) = self.background {
            self.bounds
                .into_styled(PrimitiveStyle::with_fill(background))
                .draw(display)?;
        }

        let font = self.font.font();
        let style = MonoTextStyle::new(font, self.foreground);
        let line_height = font.character_size.height as i32;

        let x = self.bounds.top_left.x;
        let mut y = self.bounds.top_left.y;
        for line in &self.visible_lines() {
            Text::with_baseline(line, Point::new(x, y), style, Baseline::Top).draw(display)?;
            y += line_height;
        }

        Ok(())
    }
}

fn truncate_to_char_boundary(text: &str, max_len: usize) -> &str {
    if text.len() <= max_len {
        return text;
    }
    let mut end = max_len;
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    &text[..end]
}

/// Split `text` into lines of at most `max_chars` characters.
pub fn layout_lines(text: &str, max_chars: usize, overflow: OverflowMode) -> Lines {
    let max_chars = max_chars.clamp(1, MAX_LINE_LEN);
    let mut lines = Lines::new();

    match overflow {
        OverflowMode::WordWrap => {
            for paragraph in text.split('\n') {
                wrap_words(paragraph.split_whitespace(), max_chars, &mut lines);
            }
        }
        OverflowMode::Fill => {
            wrap_words(text.split_whitespace(), max_chars, &mut lines);
        }
        OverflowMode::TrailingEllipsis => {
            for paragraph in text.split('\n') {
                lines.push(ellipsize(paragraph, max_chars)).ok();
            }
        }
    }

    lines
}

/// Greedy word wrap. An empty paragraph still produces one blank line.
fn wrap_words<'a>(words: impl Iterator<Item = &'a str>, max_chars: usize, lines: &mut Lines) {
    let mut current = Line::new();
    let mut current_len = 0;
    let mut any_word = false;

    for word in words {
        any_word = true;
        let mut word = word;

        while !word.is_empty() {
            let word_len = word.chars().count();
            let needed = if current_len == 0 {
                word_len
            } else {
                current_len + 1 + word_len
            };

            if needed <= max_chars {
                if current_len > 0 {
                    current.push(' ').ok();
                    current_len += 1;
                }
                current.push_str(word).ok();
                current_len += word_len;
                break;
            }

            if current_len > 0 {
                lines.push(core::mem::take(&mut current)).ok();
                current_len = 0;
                continue;
            }

            // Word wider than a line: break it
            let split = word
                .char_indices()
                .nth(max_chars)
                .map_or(word.len(), |(i, _)| i);
            let (head, tail) = word.split_at(split);
            current.push_str(head).ok();
            lines.push(core::mem::take(&mut current)).ok();
            word = tail;
        }
    }

    if current_len > 0 || !any_word {
        lines.push(current).ok();
    }
}

fn ellipsize(paragraph: &str, max_chars: usize) -> Line {
    let mut line = Line::new();
    if paragraph.chars().count() <= max_chars {
        for c in paragraph.chars() {
            line.push(c).ok();
        }
        return line;
    }

    let keep = max_chars.saturating_sub(ELLIPSIS.len());
    for c in paragraph.chars().take(keep) {
        line.push(c).ok();
    }
    for c in ELLIPSIS.chars().take(max_chars - keep) {
        line.push(c).ok();
    }
    line
}
