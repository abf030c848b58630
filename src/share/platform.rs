//! Platform seam for exporting a card: capability probing plus the three
//! delivery primitives (native share sheet, deep link, file download).

use std::io;

use thiserror::Error;

/// User-agent fragments that mark a mobile platform (matched case-insensitively).
pub const MOBILE_SIGNATURES: [&str; 4] = ["iphone", "ipad", "ipod", "android"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlatformClass {
    Mobile,
    Desktop,
}

/// Classify a user agent as mobile or desktop.
pub fn classify_user_agent(user_agent: &str) -> PlatformClass {
    let ua = user_agent.to_ascii_lowercase();
    if MOBILE_SIGNATURES.iter().any(|sig| ua.contains(sig)) {
        PlatformClass::Mobile
    } else {
        PlatformClass::Desktop
    }
}

/// The first export route a platform should try.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlatformCapability {
    /// Mobile with a native share sheet.
    NativeShareCapable,
    /// Mobile without a share sheet; try the story deep link.
    DeepLinkCapable,
    /// Desktop; save the file.
    DownloadOnly,
}

impl PlatformCapability {
    pub fn resolve(class: PlatformClass, native_share: bool) -> Self {
        match (class, native_share) {
            (PlatformClass::Mobile, true) => PlatformCapability::NativeShareCapable,
            (PlatformClass::Mobile, false) => PlatformCapability::DeepLinkCapable,
            (PlatformClass::Desktop, _) => PlatformCapability::DownloadOnly,
        }
    }

    pub fn from_user_agent(user_agent: &str, native_share: bool) -> Self {
        Self::resolve(classify_user_agent(user_agent), native_share)
    }
}

/// Outcome of a native share attempt that did not complete.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum NativeShareError {
    /// The user dismissed the share sheet.
    #[error("share cancelled by the user")]
    Cancelled,
    #[error("native share failed: {0}")]
    Failed(String),
}

#[derive(Debug, Error)]
pub enum PlatformError {
    #[error("{0} is not supported on this platform")]
    Unsupported(&'static str),
    #[error("unknown object reference '{0}'")]
    UnknownReference(String),
    #[error("i/o error: {0}")]
    Io(#[from] io::Error),
    #[error("{0}")]
    Rejected(String),
}

/// What gets handed to a native share sheet.
#[derive(Debug, Clone, Copy)]
pub struct SharePayload<'a> {
    pub filename: &'a str,
    pub mime_type: &'a str,
    pub title: &'a str,
    pub text: &'a str,
    pub image: &'a [u8],
}

/// Host capabilities the share dispatcher drives.
///
/// Object references are short-lived handles to image bytes (blob URLs in a
/// browser). Every reference created through [`SharePlatform::create_object_ref`]
/// is released exactly once by the dispatcher.
#[allow(async_fn_in_trait)]
pub trait SharePlatform {
    fn capability(&self) -> PlatformCapability;

    /// Show the native share sheet. Resolves when the user finishes or dismisses it.
    async fn share_native(&self, payload: &SharePayload<'_>) -> Result<(), NativeShareError>;

    fn create_object_ref(&self, image: &[u8]) -> Result<String, PlatformError>;

    fn release_object_ref(&self, reference: &str);

    /// Open `uri`; `Ok(true)` when the target application took over.
    async fn open_deep_link(&self, uri: &str) -> Result<bool, PlatformError>;

    /// Save the bytes behind `reference` as `filename`.
    fn save_file(&self, reference: &str, filename: &str) -> Result<(), PlatformError>;
}

/// Releases its object reference when dropped.
pub(crate) struct TransientRef<'p, P: SharePlatform + ?Sized> {
    platform: &'p P,
    reference: String,
}

impl<'p, P: SharePlatform + ?Sized> TransientRef<'p, P> {
    pub(crate) fn create(platform: &'p P, image: &[u8]) -> Result<Self, PlatformError> {
        let reference = platform.create_object_ref(image)?;
        Ok(Self {
            platform,
            reference,
        })
    }

    pub(crate) fn reference(&self) -> &str {
        &self.reference
    }
}

impl<P: SharePlatform + ?Sized> Drop for TransientRef<'_, P> {
    fn drop(&mut self) {
        self.platform.release_object_ref(&self.reference);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mobile_signatures_match_any_case() {
        let iphone = "Mozilla/5.0 (iPhone; CPU iPhone OS 17_0 like Mac OS X)";
        assert_eq!(classify_user_agent(iphone), PlatformClass::Mobile);
        assert_eq!(classify_user_agent("ANDROID 14"), PlatformClass::Mobile);
        let mac = "Mozilla/5.0 (Macintosh; Intel Mac OS X 14_0)";
        assert_eq!(classify_user_agent(mac), PlatformClass::Desktop);
        assert_eq!(classify_user_agent(""), PlatformClass::Desktop);
    }

    #[test]
    fn capability_resolution() {
        use PlatformCapability::*;
        assert_eq!(PlatformCapability::from_user_agent("iPad", true), NativeShareCapable);
        assert_eq!(PlatformCapability::from_user_agent("iPad", false), DeepLinkCapable);
        assert_eq!(PlatformCapability::from_user_agent("Windows NT", true), DownloadOnly);
    }
}
