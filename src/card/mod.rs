//! Letter card rendering: a 1080x1920 PNG story card built from a letter.

mod paint;
mod text;
mod wrap;

use std::path::PathBuf;

use thiserror::Error;

use crate::letter::LetterRecord;

pub use paint::{
    CARD_HEIGHT, CARD_WIDTH, CONTENT, CardRenderer, CardTheme, ContentRegion, message_bounds,
    render_letter_card,
};
pub use text::{CardFonts, GLYPH_HEIGHT, GLYPH_WIDTH, TextFace, load_font};
pub use wrap::{LayoutLine, MessageLayout, TRUNCATION_MARKER, WrapBounds, wrap_message};

/// Failure to produce a card image. No partial image is ever returned.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("cannot allocate a {width}x{height} drawing surface")]
    Surface { width: u32, height: u32 },
    #[error("failed to encode card image: {0}")]
    Encode(#[from] image::ImageError),
    #[error("cannot load font {}: {reason}", path.display())]
    Font { path: PathBuf, reason: String },
    #[error("card render task did not complete: {0}")]
    Aborted(String),
}

/// Turns a letter into encoded card bytes. Rendering runs on a blocking thread.
pub trait CardSource: Send + Sync + 'static {
    fn render_card(&self, letter: &LetterRecord) -> Result<Vec<u8>, RenderError>;
}

impl CardSource for CardRenderer {
    fn render_card(&self, letter: &LetterRecord) -> Result<Vec<u8>, RenderError> {
        self.render(letter)
    }
}
