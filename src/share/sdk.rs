//! Process-wide handle to the third-party share SDK.
//!
//! The handle is set up by the first caller and reused afterwards. Nothing in
//! the dispatch chain needs it beyond [`ShareSdk::native_share_available`].

use std::env;
use std::sync::atomic::{AtomicUsize, Ordering};

use log::info;
use once_cell::sync::OnceCell;

/// Environment variable holding the SDK application id.
pub const APP_ID_ENV: &str = "VALENTINE_SHARE_APP_ID";
const SDK_VERSION: &str = "v18.0";

static SHARE_SDK: OnceCell<ShareSdk> = OnceCell::new();
static INIT_CALLS: AtomicUsize = AtomicUsize::new(0);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShareSdk {
    app_id: Option<String>,
    version: &'static str,
}

impl ShareSdk {
    /// Configure the SDK from an optional application id.
    pub fn configure(app_id: Option<String>) -> Self {
        let app_id = app_id.filter(|id| !id.trim().is_empty());
        Self {
            app_id,
            version: SDK_VERSION,
        }
    }

    pub fn app_id(&self) -> Option<&str> {
        self.app_id.as_deref()
    }

    pub fn version(&self) -> &'static str {
        self.version
    }

    /// A share sheet can only be offered once the SDK has an app id.
    pub fn native_share_available(&self) -> bool {
        self.app_id.is_some()
    }
}

/// Shared SDK handle, initialized from the environment on first use.
pub fn share_sdk() -> &'static ShareSdk {
    SHARE_SDK.get_or_init(|| {
        INIT_CALLS.fetch_add(1, Ordering::SeqCst);
        let sdk = ShareSdk::configure(env::var(APP_ID_ENV).ok());
        info!(
            "share sdk {} initialized (native share {})",
            sdk.version(),
            if sdk.native_share_available() { "enabled" } else { "disabled" }
        );
        sdk
    })
}

/// How many times the SDK setup ran in this process (0 or 1).
pub fn init_count() -> usize {
    INIT_CALLS.load(Ordering::SeqCst)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn initialization_runs_once() {
        let first = share_sdk() as *const ShareSdk;
        let second = share_sdk() as *const ShareSdk;
        assert_eq!(first, second);
        assert_eq!(init_count(), 1);
        assert_eq!(init_count(), init_count());
    }

    #[test]
    fn blank_app_id_disables_native_share() {
        assert!(!ShareSdk::configure(Some("  ".into())).native_share_available());
        assert!(!ShareSdk::configure(None).native_share_available());
        let sdk = ShareSdk::configure(Some("1234".into()));
        assert_eq!(sdk.app_id(), Some("1234"));
        assert!(sdk.native_share_available());
    }
}
