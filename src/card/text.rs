//! Text faces used on the letter card.
//!
//! A face is either a TrueType/OpenType outline font loaded from disk or the
//! built-in 5x7 pixel face. The pixel face is always available and renders the
//! same on every host, so it doubles as the fallback when a configured font
//! cannot be loaded.

use std::fs;
use std::path::Path;

use ab_glyph::{Font, FontArc, PxScale, ScaleFont};
use image::{Rgba, RgbaImage};
use imageproc::drawing::{draw_filled_rect_mut, draw_text_mut, text_size};
use imageproc::rect::Rect;
use log::{debug, warn};

use super::RenderError;

pub const GLYPH_WIDTH: usize = 5;
pub const GLYPH_HEIGHT: usize = 7;

/// A sized face able to measure and draw a single line of text.
#[derive(Clone)]
pub enum TextFace {
    Pixel { scale: u32 },
    Outline { font: FontArc, scale: PxScale },
}

impl TextFace {
    /// Pixel face whose cap height approximates `size_px`.
    pub fn pixel(size_px: f32) -> Self {
        let scale = (size_px / GLYPH_HEIGHT as f32).round().max(1.0) as u32;
        TextFace::Pixel { scale }
    }

    /// Use `font` at `size_px` when present, the pixel face otherwise.
    pub fn sized(font: Option<&FontArc>, size_px: f32) -> Self {
        match font {
            Some(font) => TextFace::Outline {
                font: font.clone(),
                scale: PxScale::from(size_px),
            },
            None => TextFace::pixel(size_px),
        }
    }

    /// Horizontal advance of `text`, trailing spaces included.
    pub fn measure(&self, text: &str) -> u32 {
        match self {
            TextFace::Pixel { scale } => {
                text.chars().count() as u32 * (GLYPH_WIDTH as u32 + 1) * scale
            }
            TextFace::Outline { font, scale } => text_size(*scale, font, text).0,
        }
    }

    /// Draw `text` with its left edge at `x` and its baseline at `baseline`.
    pub fn draw(&self, canvas: &mut RgbaImage, x: i32, baseline: i32, text: &str, color: Rgba<u8>) {
        match self {
            TextFace::Pixel { scale } => {
                let top = baseline - (GLYPH_HEIGHT as u32 * scale) as i32;
                let advance = ((GLYPH_WIDTH as u32 + 1) * scale) as i32;
                for (idx, ch) in text.chars().enumerate() {
                    draw_glyph(canvas, x + idx as i32 * advance, top, ch, color, *scale);
                }
            }
            TextFace::Outline { font, scale } => {
                let ascent = font.as_scaled(*scale).ascent().round() as i32;
                draw_text_mut(canvas, color, x, baseline - ascent, *scale, font, text);
            }
        }
    }

    /// Draw `text` horizontally centered on `center_x`.
    pub fn draw_centered(
        &self,
        canvas: &mut RgbaImage,
        center_x: i32,
        baseline: i32,
        text: &str,
        color: Rgba<u8>,
    ) {
        let half = (self.measure(text) / 2) as i32;
        self.draw(canvas, center_x - half, baseline, text, color);
    }
}

/// Fonts the renderer prefers over the pixel face.
#[derive(Clone, Default)]
pub struct CardFonts {
    /// Title face.
    pub display: Option<FontArc>,
    /// To/from, message and footer face.
    pub body: Option<FontArc>,
}

impl CardFonts {
    /// Pixel face everywhere. Output is identical on every host.
    pub fn pixel() -> Self {
        Self::default()
    }

    /// Load the configured fonts, falling back to the pixel face for any that
    /// cannot be read or parsed.
    pub fn load_or_fallback(display: Option<&Path>, body: Option<&Path>) -> Self {
        Self {
            display: display.and_then(fallback_on_error),
            body: body.and_then(fallback_on_error),
        }
    }
}

/// Read and parse a font file.
pub fn load_font(path: &Path) -> Result<FontArc, RenderError> {
    let data = fs::read(path).map_err(|err| RenderError::Font {
        path: path.to_path_buf(),
        reason: err.to_string(),
    })?;
    FontArc::try_from_vec(data).map_err(|err| RenderError::Font {
        path: path.to_path_buf(),
        reason: err.to_string(),
    })
}

fn fallback_on_error(path: &Path) -> Option<FontArc> {
    match load_font(path) {
        Ok(font) => {
            debug!("loaded card font {}", path.display());
            Some(font)
        }
        Err(err) => {
            warn!("{err}; using the built-in pixel face");
            None
        }
    }
}

fn draw_glyph(canvas: &mut RgbaImage, x: i32, y: i32, ch: char, color: Rgba<u8>, scale: u32) {
    let pattern = glyph_pattern(ch);
    for (row, bits) in pattern.iter().enumerate() {
        for col in 0..GLYPH_WIDTH {
            if bits & (1 << (GLYPH_WIDTH - 1 - col)) != 0 {
                let px = x + col as i32 * scale as i32;
                let py = y + row as i32 * scale as i32;
                draw_filled_rect_mut(canvas, Rect::at(px, py).of_size(scale, scale), color);
            }
        }
    }
}

// Upper-case only; lower-case letters share the capital glyph.
#[rustfmt::skip]
fn glyph_pattern(ch: char) -> [u8; GLYPH_HEIGHT] {
    match ch.to_ascii_uppercase() {
        '0' => [0b01110, 0b10001, 0b10011, 0b10101, 0b11001, 0b10001, 0b01110],
        '1' => [0b00100, 0b01100, 0b00100, 0b00100, 0b00100, 0b00100, 0b01110],
        '2' => [0b01110, 0b10001, 0b00001, 0b00110, 0b01000, 0b10000, 0b11111],
        '3' => [0b11110, 0b00001, 0b00001, 0b01110, 0b00001, 0b00001, 0b11110],
        '4' => [0b00010, 0b00110, 0b01010, 0b10010, 0b11111, 0b00010, 0b00010],
        '5' => [0b11111, 0b10000, 0b11110, 0b00001, 0b00001, 0b10001, 0b01110],
        '6' => [0b00110, 0b01000, 0b10000, 0b11110, 0b10001, 0b10001, 0b01110],
        '7' => [0b11111, 0b00001, 0b00010, 0b00100, 0b01000, 0b01000, 0b01000],
        '8' => [0b01110, 0b10001, 0b10001, 0b01110, 0b10001, 0b10001, 0b01110],
        '9' => [0b01110, 0b10001, 0b10001, 0b01111, 0b00001, 0b00010, 0b01100],
        'A' => [0b01110, 0b10001, 0b10001, 0b11111, 0b10001, 0b10001, 0b10001],
        'B' => [0b11110, 0b10001, 0b10001, 0b11110, 0b10001, 0b10001, 0b11110],
        'C' => [0b01110, 0b10001, 0b10000, 0b10000, 0b10000, 0b10001, 0b01110],
        'D' => [0b11110, 0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b11110],
        'E' => [0b11111, 0b10000, 0b10000, 0b11110, 0b10000, 0b10000, 0b11111],
        'F' => [0b11111, 0b10000, 0b10000, 0b11110, 0b10000, 0b10000, 0b10000],
        'G' => [0b01110, 0b10001, 0b10000, 0b10111, 0b10001, 0b10001, 0b01110],
        'H' => [0b10001, 0b10001, 0b10001, 0b11111, 0b10001, 0b10001, 0b10001],
        'I' => [0b01110, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100, 0b01110],
        'J' => [0b00111, 0b00010, 0b00010, 0b00010, 0b10010, 0b10010, 0b01100],
        'K' => [0b10001, 0b10010, 0b10100, 0b11000, 0b10100, 0b10010, 0b10001],
        'L' => [0b10000, 0b10000, 0b10000, 0b10000, 0b10000, 0b10000, 0b11111],
        'M' => [0b10001, 0b11011, 0b10101, 0b10101, 0b10001, 0b10001, 0b10001],
        'N' => [0b10001, 0b10001, 0b11001, 0b10101, 0b10011, 0b10001, 0b10001],
        'O' => [0b01110, 0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b01110],
        'P' => [0b11110, 0b10001, 0b10001, 0b11110, 0b10000, 0b10000, 0b10000],
        'Q' => [0b01110, 0b10001, 0b10001, 0b10001, 0b10101, 0b10010, 0b01101],
        'R' => [0b11110, 0b10001, 0b10001, 0b11110, 0b10100, 0b10010, 0b10001],
        'S' => [0b01111, 0b10000, 0b10000, 0b01110, 0b00001, 0b00001, 0b11110],
        'T' => [0b11111, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100],
        'U' => [0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b01110],
        'V' => [0b10001, 0b10001, 0b10001, 0b01010, 0b01010, 0b00100, 0b00100],
        'W' => [0b10001, 0b10001, 0b10001, 0b10101, 0b10101, 0b10101, 0b01010],
        'X' => [0b10001, 0b10001, 0b01010, 0b00100, 0b01010, 0b10001, 0b10001],
        'Y' => [0b10001, 0b10001, 0b01010, 0b00100, 0b00100, 0b00100, 0b00100],
        'Z' => [0b11111, 0b00001, 0b00010, 0b00100, 0b01000, 0b10000, 0b11111],
        '-' => [0b00000, 0b00000, 0b00000, 0b11111, 0b00000, 0b00000, 0b00000],
        '&' => [0b01100, 0b10010, 0b10100, 0b01000, 0b10101, 0b10010, 0b01101],
        '/' => [0b00001, 0b00010, 0b00100, 0b01000, 0b10000, 0b10000, 0b00000],
        ':' => [0b00000, 0b00100, 0b00000, 0b00000, 0b00100, 0b00000, 0b00000],
        '#' => [0b01010, 0b11111, 0b01010, 0b01010, 0b11111, 0b01010, 0b01010],
        '@' => [0b01110, 0b10001, 0b10111, 0b10101, 0b10111, 0b10000, 0b01110],
        '\'' => [0b00100, 0b00100, 0b00000, 0b00000, 0b00000, 0b00000, 0b00000],
        '’' => [0b00100, 0b00100, 0b00000, 0b00000, 0b00000, 0b00000, 0b00000],
        '=' => [0b00000, 0b11111, 0b00000, 0b00000, 0b11111, 0b00000, 0b00000],
        '"' => [0b01010, 0b01010, 0b00000, 0b00000, 0b00000, 0b00000, 0b00000],
        '.' => [0b00000, 0b00000, 0b00000, 0b00000, 0b00000, 0b00110, 0b00110],
        ',' => [0b00000, 0b00000, 0b00000, 0b00000, 0b00110, 0b00100, 0b01000],
        '<' => [0b00010, 0b00100, 0b01000, 0b10000, 0b01000, 0b00100, 0b00010],
        '>' => [0b01000, 0b00100, 0b00010, 0b00001, 0b00010, 0b00100, 0b01000],
        '(' => [0b00010, 0b00100, 0b01000, 0b01000, 0b01000, 0b00100, 0b00010],
        ')' => [0b01000, 0b00100, 0b00010, 0b00010, 0b00010, 0b00100, 0b01000],
        '[' => [0b01110, 0b01000, 0b01000, 0b01000, 0b01000, 0b01000, 0b01110],
        ']' => [0b01110, 0b00010, 0b00010, 0b00010, 0b00010, 0b00010, 0b01110],
        '+' => [0b00000, 0b00100, 0b00100, 0b11111, 0b00100, 0b00100, 0b00000],
        '!' => [0b00100, 0b00100, 0b00100, 0b00100, 0b00100, 0b00000, 0b00100],
        '$' => [0b00100, 0b01111, 0b10100, 0b01110, 0b00101, 0b11110, 0b00100],
        '%' => [0b11001, 0b11010, 0b00100, 0b01000, 0b10110, 0b00110, 0b00000],
        '_' => [0b00000, 0b00000, 0b00000, 0b00000, 0b00000, 0b00000, 0b11111],
        ';' => [0b00000, 0b00100, 0b00000, 0b00000, 0b00110, 0b00100, 0b01000],
        '*' => [0b00100, 0b10101, 0b01110, 0b10101, 0b00100, 0b00000, 0b00000],
        '?' => [0b01110, 0b10001, 0b00010, 0b00100, 0b00100, 0b00000, 0b00100],
        '♥' => [0b00000, 0b01010, 0b11111, 0b11111, 0b01110, 0b00100, 0b00000],
        _ => [0b00000; GLYPH_HEIGHT],
    }
}
