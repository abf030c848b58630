use std::sync::Mutex;
use std::time::Duration;

use pretty_assertions::assert_eq;
use valentine::share::{
    NativeShareError, PlatformCapability, PlatformError, SharePayload, SharePlatform,
};
use valentine::card::RenderError;
use valentine::{
    CardRenderer, CardSource, LetterRecord, LocalPlatform, ShareDispatcher, ShareError, ShareOptions,
    ShareOutcome, ShareRoute,
};

#[derive(Debug, Clone, Copy)]
enum NativeResult {
    Ok,
    Cancel,
    Fail,
}

#[derive(Debug, Clone, Copy)]
enum DeepLinkResult {
    Navigated,
    Stayed,
    Hang,
}

#[derive(Debug, Default)]
struct Calls {
    native: Vec<(String, String)>,
    deep_links: Vec<String>,
    downloads: Vec<String>,
    created: usize,
    released: usize,
}

struct FakePlatform {
    capability: PlatformCapability,
    native: NativeResult,
    deep_link: DeepLinkResult,
    fail_save: bool,
    calls: Mutex<Calls>,
}

impl FakePlatform {
    fn new(capability: PlatformCapability) -> Self {
        Self {
            capability,
            native: NativeResult::Ok,
            deep_link: DeepLinkResult::Stayed,
            fail_save: false,
            calls: Mutex::new(Calls::default()),
        }
    }

    fn calls(&self) -> std::sync::MutexGuard<'_, Calls> {
        self.calls.lock().unwrap()
    }
}

impl SharePlatform for FakePlatform {
    fn capability(&self) -> PlatformCapability {
        self.capability
    }

    async fn share_native(&self, payload: &SharePayload<'_>) -> Result<(), NativeShareError> {
        assert_eq!(payload.mime_type, "image/png");
        assert!(!payload.image.is_empty());
        self.calls()
            .native
            .push((payload.filename.to_string(), payload.text.to_string()));
        match self.native {
            NativeResult::Ok => Ok(()),
            NativeResult::Cancel => Err(NativeShareError::Cancelled),
            NativeResult::Fail => Err(NativeShareError::Failed("share sheet crashed".into())),
        }
    }

    fn create_object_ref(&self, _image: &[u8]) -> Result<String, PlatformError> {
        let mut calls = self.calls();
        calls.created += 1;
        Ok(format!("blob:test/{}", calls.created))
    }

    fn release_object_ref(&self, _reference: &str) {
        self.calls().released += 1;
    }

    async fn open_deep_link(&self, uri: &str) -> Result<bool, PlatformError> {
        self.calls().deep_links.push(uri.to_string());
        match self.deep_link {
            DeepLinkResult::Navigated => Ok(true),
            DeepLinkResult::Stayed => Ok(false),
            DeepLinkResult::Hang => std::future::pending().await,
        }
    }

    fn save_file(&self, _reference: &str, filename: &str) -> Result<(), PlatformError> {
        if self.fail_save {
            return Err(PlatformError::Rejected("disk full".into()));
        }
        self.calls().downloads.push(filename.to_string());
        Ok(())
    }
}

fn dispatcher(platform: FakePlatform) -> ShareDispatcher<FakePlatform> {
    let options = ShareOptions {
        deep_link_timeout: Duration::from_millis(50),
        ..ShareOptions::default()
    };
    ShareDispatcher::new(platform, CardRenderer::default(), options)
}

/// Card source that never produces an image.
enum BrokenCard {
    NoSurface,
    Panics,
}

impl CardSource for BrokenCard {
    fn render_card(&self, _letter: &LetterRecord) -> Result<Vec<u8>, RenderError> {
        match self {
            BrokenCard::NoSurface => Err(RenderError::Surface {
                width: 1080,
                height: 1920,
            }),
            BrokenCard::Panics => panic!("renderer blew up"),
        }
    }
}

fn broken_dispatcher(card: BrokenCard) -> ShareDispatcher<FakePlatform, BrokenCard> {
    let platform = FakePlatform::new(PlatformCapability::NativeShareCapable);
    ShareDispatcher::new(platform, card, ShareOptions::default())
}

fn assert_untouched(calls: &Calls) {
    assert!(calls.native.is_empty());
    assert!(calls.deep_links.is_empty());
    assert!(calls.downloads.is_empty());
    assert_eq!(calls.created, 0);
}

fn letter() -> LetterRecord {
    LetterRecord::new("abc123", "Sam", "Lee", "Will you be my valentine?")
}

fn downloaded() -> ShareOutcome {
    ShareOutcome::Downloaded {
        filename: "valentine-letter-abc123.png".to_string(),
    }
}

#[tokio::test]
async fn desktop_only_downloads() {
    let dispatcher = dispatcher(FakePlatform::new(PlatformCapability::DownloadOnly));
    let outcome = dispatcher.share_letter(&letter()).await.unwrap();
    assert_eq!(outcome, downloaded());

    let calls = dispatcher.platform().calls();
    assert!(calls.native.is_empty());
    assert!(calls.deep_links.is_empty());
    assert_eq!(calls.downloads, vec!["valentine-letter-abc123.png"]);
    assert_eq!(calls.created, calls.released);
}

#[tokio::test]
async fn deep_link_that_does_not_navigate_falls_back_to_one_download() {
    let dispatcher = dispatcher(FakePlatform::new(PlatformCapability::DeepLinkCapable));
    let outcome = dispatcher.share_letter(&letter()).await.unwrap();
    assert_eq!(outcome, downloaded());

    let calls = dispatcher.platform().calls();
    assert_eq!(
        calls.deep_links,
        vec!["instagram://stories/share?media_type=image&source_url=blob%3Atest%2F1"]
    );
    assert_eq!(calls.downloads.len(), 1);
    assert_eq!(calls.created, 2);
    assert_eq!(calls.released, 2);
}

#[tokio::test]
async fn deep_link_that_navigates_is_shared() {
    let mut platform = FakePlatform::new(PlatformCapability::DeepLinkCapable);
    platform.deep_link = DeepLinkResult::Navigated;
    let dispatcher = dispatcher(platform);
    let outcome = dispatcher.share_letter(&letter()).await.unwrap();
    assert_eq!(outcome, ShareOutcome::Shared { route: ShareRoute::DeepLink });

    let calls = dispatcher.platform().calls();
    assert!(calls.downloads.is_empty());
    assert_eq!(calls.created, calls.released);
}

#[tokio::test]
async fn silent_deep_link_times_out_into_download() {
    let mut platform = FakePlatform::new(PlatformCapability::DeepLinkCapable);
    platform.deep_link = DeepLinkResult::Hang;
    let dispatcher = dispatcher(platform);
    let outcome = dispatcher.share_letter(&letter()).await.unwrap();
    assert_eq!(outcome, downloaded());
    assert_eq!(dispatcher.platform().calls().released, 2);
}

#[tokio::test]
async fn native_share_success() {
    let dispatcher = dispatcher(FakePlatform::new(PlatformCapability::NativeShareCapable));
    let outcome = dispatcher.share_letter(&letter()).await.unwrap();
    assert_eq!(outcome, ShareOutcome::Shared { route: ShareRoute::NativeShare });

    let calls = dispatcher.platform().calls();
    assert_eq!(
        calls.native,
        vec![(
            "valentine-letter-abc123.png".to_string(),
            "Check out this Valentine's letter from Lee to Sam! 💕 @danmced".to_string()
        )]
    );
    assert!(calls.downloads.is_empty());
}

#[tokio::test]
async fn cancelled_native_share_is_a_silent_no_op() {
    let mut platform = FakePlatform::new(PlatformCapability::NativeShareCapable);
    platform.native = NativeResult::Cancel;
    let dispatcher = dispatcher(platform);
    let outcome = dispatcher.share_letter(&letter()).await.unwrap();
    assert_eq!(outcome, ShareOutcome::Cancelled);

    let calls = dispatcher.platform().calls();
    assert!(calls.downloads.is_empty());
    assert!(calls.deep_links.is_empty());
}

#[tokio::test]
async fn failed_native_share_skips_deep_link_and_downloads() {
    let mut platform = FakePlatform::new(PlatformCapability::NativeShareCapable);
    platform.native = NativeResult::Fail;
    let dispatcher = dispatcher(platform);
    let outcome = dispatcher.share_letter(&letter()).await.unwrap();
    assert_eq!(outcome, downloaded());

    let calls = dispatcher.platform().calls();
    assert!(calls.deep_links.is_empty());
    assert_eq!(calls.downloads.len(), 1);
}

#[tokio::test]
async fn failed_download_exhausts_the_chain() {
    let mut platform = FakePlatform::new(PlatformCapability::DeepLinkCapable);
    platform.fail_save = true;
    let dispatcher = dispatcher(platform);
    let err = dispatcher.share_letter(&letter()).await.unwrap_err();
    match err {
        ShareError::Exhausted { filename, .. } => {
            assert_eq!(filename, "valentine-letter-abc123.png")
        }
        other => panic!("unexpected error: {other}"),
    }
    let calls = dispatcher.platform().calls();
    assert_eq!(calls.created, calls.released);
}

#[tokio::test]
async fn desktop_end_to_end_writes_the_card() {
    let dir = tempfile::tempdir().unwrap();
    let platform = LocalPlatform::with_capability(PlatformCapability::DownloadOnly, dir.path());
    let dispatcher = ShareDispatcher::new(platform, CardRenderer::default(), ShareOptions::default());
    let message: String = "lorem ipsum dolor sit amet ".repeat(30).chars().take(600).collect();
    let record = LetterRecord::new("abc123", "Sam", "Lee", message.as_str());

    let outcome = dispatcher.share_letter(&record).await.unwrap();
    assert_eq!(outcome, downloaded());

    let saved = std::fs::read(dir.path().join("valentine-letter-abc123.png")).unwrap();
    assert!(!saved.is_empty());
    assert_eq!(dispatcher.platform().live_refs(), 0);
}

#[tokio::test]
async fn local_mobile_without_sdk_falls_back_to_download() {
    let dir = tempfile::tempdir().unwrap();
    let platform = LocalPlatform::with_capability(PlatformCapability::DeepLinkCapable, dir.path());
    let dispatcher = ShareDispatcher::new(platform, CardRenderer::default(), ShareOptions::default());
    let outcome = dispatcher.share_letter(&letter()).await.unwrap();
    assert_eq!(outcome, downloaded());
    assert!(dir.path().join("valentine-letter-abc123.png").exists());
}

#[tokio::test]
async fn render_failure_stops_before_any_route() {
    let dispatcher = broken_dispatcher(BrokenCard::NoSurface);
    let err = dispatcher.share_letter(&letter()).await.unwrap_err();
    assert!(matches!(err, ShareError::Render(RenderError::Surface { .. })));
    assert_untouched(&dispatcher.platform().calls());
}

#[tokio::test]
async fn panicking_render_task_is_reported_as_aborted() {
    let dispatcher = broken_dispatcher(BrokenCard::Panics);
    let err = dispatcher.share_letter(&letter()).await.unwrap_err();
    assert!(matches!(err, ShareError::Render(RenderError::Aborted(_))));
    assert_untouched(&dispatcher.platform().calls());
}
