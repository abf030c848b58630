//! Valentine's letters: storage, pixel-art story cards and card sharing.

pub mod card;
pub mod config;
pub mod letter;
pub mod share;
mod templates;

pub use card::{CardFonts, CardSource, CardRenderer, CardTheme, MessageLayout, RenderError, render_letter_card};
pub use config::AppConfig;
pub use letter::{
    AVAILABLE_REACTIONS, LetterRecord, LetterStore, NewLetter, Reactions, StoreError,
    export_filename,
};
pub use share::{
    LocalPlatform, PlatformCapability, ShareDispatcher, ShareError, ShareOptions, ShareOutcome,
    ShareRoute,
};
pub use templates::{LetterTemplate, TemplateRegistry, TemplateTheme, UnknownTemplate};

use sha2::{Digest, Sha256};

/// Hex SHA-256 of rendered card bytes, handy for checking that renders are stable.
pub fn card_digest(bytes: &[u8]) -> String {
    let digest = Sha256::digest(bytes);
    format!("{digest:x}")
}
