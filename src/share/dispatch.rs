use std::sync::Arc;
use std::time::Duration;

use log::{debug, info, warn};

use super::links::{SHARE_TITLE, instagram_story_link, share_caption};
use super::platform::{
    NativeShareError, PlatformCapability, SharePayload, SharePlatform, TransientRef,
};
use super::{ShareError, ShareOutcome, ShareRoute};
use crate::card::{CardRenderer, CardSource, RenderError};
use crate::letter::LetterRecord;

pub const DEFAULT_DEEP_LINK_TIMEOUT: Duration = Duration::from_millis(1500);
const PNG_MIME: &str = "image/png";

/// Knobs for a [`ShareDispatcher`].
#[derive(Debug, Clone)]
pub struct ShareOptions {
    /// Appended to the native share caption.
    pub branding: String,
    /// How long a deep link may take to report navigation.
    pub deep_link_timeout: Duration,
}

impl Default for ShareOptions {
    fn default() -> Self {
        Self {
            branding: "@danmced".to_string(),
            deep_link_timeout: DEFAULT_DEEP_LINK_TIMEOUT,
        }
    }
}

/// Renders a letter card and delivers it through the best route the platform offers.
///
/// Routes are tried in a fixed order: native share sheet, then story deep link,
/// then file download. A failing route falls through to the download; only a
/// failed download surfaces as [`ShareError::Exhausted`]. A user dismissing the
/// share sheet ends the flow with [`ShareOutcome::Cancelled`].
pub struct ShareDispatcher<P, R = CardRenderer> {
    platform: P,
    renderer: Arc<R>,
    options: ShareOptions,
}

impl<P: SharePlatform, R: CardSource> ShareDispatcher<P, R> {
    pub fn new(platform: P, renderer: R, options: ShareOptions) -> Self {
        Self {
            platform,
            renderer: Arc::new(renderer),
            options,
        }
    }

    pub fn platform(&self) -> &P {
        &self.platform
    }

    pub async fn share_letter(&self, letter: &LetterRecord) -> Result<ShareOutcome, ShareError> {
        let image = self.render(letter).await?;
        let filename = letter.export_filename();
        let capability = self.platform.capability();
        debug!("sharing letter {} via {:?}", letter.id, capability);

        match capability {
            PlatformCapability::NativeShareCapable => {
                let caption = share_caption(letter, &self.options.branding);
                let payload = SharePayload {
                    filename: &filename,
                    mime_type: PNG_MIME,
                    title: SHARE_TITLE,
                    text: &caption,
                    image: &image,
                };
                match self.platform.share_native(&payload).await {
                    Ok(()) => {
                        info!("letter {} shared through the share sheet", letter.id);
                        return Ok(ShareOutcome::Shared {
                            route: ShareRoute::NativeShare,
                        });
                    }
                    Err(NativeShareError::Cancelled) => {
                        debug!("share sheet dismissed for letter {}", letter.id);
                        return Ok(ShareOutcome::Cancelled);
                    }
                    Err(err) => warn!("{err}; falling back to download"),
                }
            }
            PlatformCapability::DeepLinkCapable => {
                if self.try_deep_link(&image).await {
                    info!("letter {} handed to the story deep link", letter.id);
                    return Ok(ShareOutcome::Shared {
                        route: ShareRoute::DeepLink,
                    });
                }
            }
            PlatformCapability::DownloadOnly => {}
        }

        self.download(&image, filename)
    }

    async fn render(&self, letter: &LetterRecord) -> Result<Vec<u8>, RenderError> {
        let renderer = Arc::clone(&self.renderer);
        let letter = letter.clone();
        tokio::task::spawn_blocking(move || renderer.render_card(&letter))
            .await
            .map_err(|err| RenderError::Aborted(err.to_string()))?
    }

    async fn try_deep_link(&self, image: &[u8]) -> bool {
        let handle = match TransientRef::create(&self.platform, image) {
            Ok(handle) => handle,
            Err(err) => {
                warn!("cannot reference card for deep link: {err}");
                return false;
            }
        };
        let uri = instagram_story_link(handle.reference());
        let opened =
            tokio::time::timeout(self.options.deep_link_timeout, self.platform.open_deep_link(&uri))
                .await;
        match opened {
            Ok(Ok(true)) => true,
            Ok(Ok(false)) => {
                debug!("deep link did not navigate; falling back to download");
                false
            }
            Ok(Err(err)) => {
                warn!("deep link failed: {err}; falling back to download");
                false
            }
            Err(_) => {
                warn!(
                    "deep link gave no answer within {:?}; falling back to download",
                    self.options.deep_link_timeout
                );
                false
            }
        }
    }

    fn download(&self, image: &[u8], filename: String) -> Result<ShareOutcome, ShareError> {
        let exhausted = |source| ShareError::Exhausted {
            filename: filename.clone(),
            source,
        };
        let handle = TransientRef::create(&self.platform, image).map_err(exhausted)?;
        self.platform
            .save_file(handle.reference(), &filename)
            .map_err(exhausted)?;
        drop(handle);
        info!("card saved as {filename}");
        Ok(ShareOutcome::Downloaded { filename })
    }
}
