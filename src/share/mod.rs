//! Export a letter card: native share sheet, story deep link or download.

mod dispatch;
pub mod links;
mod local;
mod platform;
pub mod sdk;

use thiserror::Error;

use crate::card::RenderError;

pub use dispatch::{DEFAULT_DEEP_LINK_TIMEOUT, ShareDispatcher, ShareOptions};
pub use local::LocalPlatform;
pub use platform::{
    MOBILE_SIGNATURES, NativeShareError, PlatformCapability, PlatformClass, PlatformError,
    SharePayload, SharePlatform, classify_user_agent,
};

/// Route that delivered a shared card.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShareRoute {
    NativeShare,
    DeepLink,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShareOutcome {
    Shared { route: ShareRoute },
    Downloaded { filename: String },
    /// The user dismissed the share sheet. Not an error.
    Cancelled,
}

#[derive(Debug, Error)]
pub enum ShareError {
    #[error(transparent)]
    Render(#[from] RenderError),
    #[error("could not share or save {filename}: {source}")]
    Exhausted {
        filename: String,
        #[source]
        source: PlatformError,
    },
}
