use std::io::Cursor;

use image::{DynamicImage, ImageBuffer, ImageFormat, Rgba, RgbaImage};
use imageproc::drawing::draw_filled_rect_mut;
use imageproc::rect::Rect;
use log::debug;

use super::RenderError;
use super::text::{CardFonts, TextFace};
use super::wrap::{MessageLayout, WrapBounds, wrap_message};
use crate::letter::LetterRecord;

/// Story-format card width in pixels.
pub const CARD_WIDTH: u32 = 1080;
/// Story-format card height in pixels.
pub const CARD_HEIGHT: u32 = 1920;

const W: i32 = CARD_WIDTH as i32;
const H: i32 = CARD_HEIGHT as i32;

const OUTER_FRAME_INSET: i32 = 30;
const OUTER_FRAME_WIDTH: u32 = 12;
const INNER_FRAME_INSET: i32 = 50;
const INNER_FRAME_WIDTH: u32 = 6;

const HEART_OFFSET: i32 = 90;
const HEART_SIZE: i32 = 32;

const TITLE_LINES: [(&str, i32); 2] = [("VALENTINE'S", 140), ("LETTER", 210)];
const TITLE_SIZE: f32 = 52.0;
const TITLE_DIVIDER_Y: i32 = 250;
const TITLE_DIVIDER_MARGIN: i32 = 120;

const CONTENT_TOP: i32 = 300;
const CONTENT_BOTTOM: i32 = H - 250;
const CONTENT_LEFT: i32 = 100;
const CONTENT_RIGHT: i32 = W - 100;

const ADDRESS_SIZE: f32 = 24.0;
const TO_OFFSET: i32 = 50;
const FROM_OFFSET: i32 = 100;
const ADDRESS_DIVIDER_OFFSET: i32 = 130;

const BODY_SIZE: f32 = 20.0;
const BODY_INDENT: i32 = 20;
const BODY_OFFSET: i32 = 200;
const BODY_LINE_HEIGHT: i32 = 32;
const BODY_BOTTOM_RESERVE: i32 = 100;

const FOOTER_SIZE: f32 = 18.0;
const FOOTER_BASELINE: i32 = H - 60;

/// Rectangle on the card reserved for the address block and message body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContentRegion {
    pub top: i32,
    pub bottom: i32,
    pub left: i32,
    pub right: i32,
}

impl ContentRegion {
    pub fn width(&self) -> i32 {
        self.right - self.left
    }
}

/// The card's content region.
pub const CONTENT: ContentRegion = ContentRegion {
    top: CONTENT_TOP,
    bottom: CONTENT_BOTTOM,
    left: CONTENT_LEFT,
    right: CONTENT_RIGHT,
};

/// Bounds the message body is wrapped into.
pub fn message_bounds() -> WrapBounds {
    WrapBounds {
        max_width: (CONTENT.width() - 2 * BODY_INDENT) as u32,
        first_baseline: CONTENT.top + BODY_OFFSET,
        line_height: BODY_LINE_HEIGHT,
        last_baseline: CONTENT.bottom - BODY_BOTTOM_RESERVE,
    }
}

/// Colors and footer text of the card.
#[derive(Debug, Clone, PartialEq)]
pub struct CardTheme {
    pub background: Rgba<u8>,
    pub dark: Rgba<u8>,
    pub primary: Rgba<u8>,
    pub secondary: Rgba<u8>,
    pub accent: Rgba<u8>,
    pub branding: String,
}

impl Default for CardTheme {
    fn default() -> Self {
        Self {
            background: rgb(0xff, 0xf5, 0xe1),
            dark: rgb(0x2b, 0x2d, 0x42),
            primary: rgb(0xe6, 0x39, 0x46),
            secondary: rgb(0xff, 0xb3, 0xd9),
            accent: rgb(0xff, 0x6b, 0x9d),
            branding: "@danmced".to_string(),
        }
    }
}

impl CardTheme {
    /// Default palette with a custom footer.
    pub fn with_branding<S: Into<String>>(branding: S) -> Self {
        Self {
            branding: branding.into(),
            ..Self::default()
        }
    }
}

/// Paints letter cards. Cheap to clone; fonts are shared.
#[derive(Clone, Default)]
pub struct CardRenderer {
    fonts: CardFonts,
    theme: CardTheme,
}

impl CardRenderer {
    pub fn new(fonts: CardFonts, theme: CardTheme) -> Self {
        Self { fonts, theme }
    }

    pub fn theme(&self) -> &CardTheme {
        &self.theme
    }

    /// Face used for the message body.
    pub fn message_face(&self) -> TextFace {
        TextFace::sized(self.fonts.body.as_ref(), BODY_SIZE)
    }

    /// Wrap `message` exactly as [`CardRenderer::render`] would.
    pub fn layout_message(&self, message: &str) -> MessageLayout {
        let face = self.message_face();
        wrap_message(message, &message_bounds(), |text| face.measure(text))
    }

    /// Render the card and encode it as PNG.
    pub fn render(&self, letter: &LetterRecord) -> Result<Vec<u8>, RenderError> {
        let (canvas, layout) = self.paint(letter)?;
        let bytes = encode_png(canvas)?;
        debug!(
            "rendered card for letter {}: {} body line(s), truncated={}, {} bytes",
            letter.id,
            layout.lines.len(),
            layout.truncated,
            bytes.len()
        );
        Ok(bytes)
    }

    /// Paint the card onto a fresh surface without encoding it.
    pub fn paint(&self, letter: &LetterRecord) -> Result<(RgbaImage, MessageLayout), RenderError> {
        let theme = &self.theme;
        let mut canvas = new_surface(CARD_WIDTH, CARD_HEIGHT, theme.background)?;

        stroke_rect(
            &mut canvas,
            OUTER_FRAME_INSET,
            OUTER_FRAME_INSET,
            W - 2 * OUTER_FRAME_INSET,
            H - 2 * OUTER_FRAME_INSET,
            OUTER_FRAME_WIDTH,
            theme.dark,
        );
        stroke_rect(
            &mut canvas,
            INNER_FRAME_INSET,
            INNER_FRAME_INSET,
            W - 2 * INNER_FRAME_INSET,
            H - 2 * INNER_FRAME_INSET,
            INNER_FRAME_WIDTH,
            theme.primary,
        );

        let near = HEART_OFFSET;
        draw_heart(&mut canvas, near, near, HEART_SIZE, theme.primary);
        draw_heart(&mut canvas, W - near, near, HEART_SIZE, theme.secondary);
        draw_heart(&mut canvas, near, H - near, HEART_SIZE, theme.secondary);
        draw_heart(&mut canvas, W - near, H - near, HEART_SIZE, theme.primary);

        let title = TextFace::sized(self.fonts.display.as_ref(), TITLE_SIZE);
        for (text, baseline) in TITLE_LINES {
            title.draw_centered(&mut canvas, W / 2, baseline, text, theme.dark);
        }
        hline(
            &mut canvas,
            TITLE_DIVIDER_MARGIN,
            W - TITLE_DIVIDER_MARGIN,
            TITLE_DIVIDER_Y,
            3,
            theme.accent,
        );

        let address = TextFace::sized(self.fonts.body.as_ref(), ADDRESS_SIZE);
        address.draw(
            &mut canvas,
            CONTENT.left,
            CONTENT.top + TO_OFFSET,
            &format!("TO: {}", letter.recipient),
            theme.dark,
        );
        address.draw(
            &mut canvas,
            CONTENT.left,
            CONTENT.top + FROM_OFFSET,
            &format!("FROM: {}", letter.sender),
            theme.dark,
        );
        hline(
            &mut canvas,
            CONTENT.left,
            CONTENT.right,
            CONTENT.top + ADDRESS_DIVIDER_OFFSET,
            2,
            theme.secondary,
        );

        let body = self.message_face();
        let layout = wrap_message(&letter.message, &message_bounds(), |text| body.measure(text));
        for line in &layout.lines {
            body.draw(
                &mut canvas,
                CONTENT.left + BODY_INDENT,
                line.baseline,
                &line.text,
                theme.dark,
            );
        }

        let footer = TextFace::sized(self.fonts.body.as_ref(), FOOTER_SIZE);
        footer.draw_centered(&mut canvas, W / 2, FOOTER_BASELINE, &theme.branding, theme.accent);

        Ok((canvas, layout))
    }
}

/// Render `letter` with the built-in pixel face and default theme.
pub fn render_letter_card(letter: &LetterRecord) -> Result<Vec<u8>, RenderError> {
    CardRenderer::default().render(letter)
}

fn new_surface(width: u32, height: u32, fill: Rgba<u8>) -> Result<RgbaImage, RenderError> {
    let too_large = || RenderError::Surface { width, height };
    let pixels = (width as usize)
        .checked_mul(height as usize)
        .ok_or_else(too_large)?;
    let mut raw: Vec<u8> = Vec::new();
    raw.try_reserve_exact(pixels.checked_mul(4).ok_or_else(too_large)?)
        .map_err(|_| too_large())?;
    for _ in 0..pixels {
        raw.extend_from_slice(&fill.0);
    }
    ImageBuffer::from_raw(width, height, raw).ok_or_else(too_large)
}

fn encode_png(canvas: RgbaImage) -> Result<Vec<u8>, RenderError> {
    let mut out = Cursor::new(Vec::new());
    DynamicImage::ImageRgba8(canvas).write_to(&mut out, ImageFormat::Png)?;
    Ok(out.into_inner())
}

/// Stroke a rectangle outline centered on its edges, like a canvas `strokeRect`.
fn stroke_rect(
    canvas: &mut RgbaImage,
    x: i32,
    y: i32,
    width: i32,
    height: i32,
    line: u32,
    color: Rgba<u8>,
) {
    let half = (line / 2) as i32;
    let outer_w = (width + line as i32) as u32;
    let outer_h = (height + line as i32) as u32;
    let edges = [
        Rect::at(x - half, y - half).of_size(outer_w, line),
        Rect::at(x - half, y + height - half).of_size(outer_w, line),
        Rect::at(x - half, y - half).of_size(line, outer_h),
        Rect::at(x + width - half, y - half).of_size(line, outer_h),
    ];
    for edge in edges {
        draw_filled_rect_mut(canvas, edge, color);
    }
}

fn hline(canvas: &mut RgbaImage, x0: i32, x1: i32, y: i32, line: u32, color: Rgba<u8>) {
    let rect = Rect::at(x0, y - (line / 2) as i32).of_size((x1 - x0).max(1) as u32, line);
    draw_filled_rect_mut(canvas, rect, color);
}

/// Pixel heart centered near `(x, y)`, built on a grid of `size / 8` units.
fn draw_heart(canvas: &mut RgbaImage, x: i32, y: i32, size: i32, color: Rgba<u8>) {
    let s = size / 8;
    // (dx, dy, width) in units, one unit tall each.
    let rows: [(i32, i32, i32); 6] = [
        (-2, -1, 1),
        (1, -1, 1),
        (-3, 0, 7),
        (-3, 1, 6),
        (-2, 2, 4),
        (-1, 3, 2),
    ];
    for (dx, dy, units) in rows {
        let rect = Rect::at(x + dx * s, y + dy * s).of_size((units * s) as u32, s as u32);
        draw_filled_rect_mut(canvas, rect, color);
    }
}

fn rgb(r: u8, g: u8, b: u8) -> Rgba<u8> {
    Rgba([r, g, b, 0xff])
}
