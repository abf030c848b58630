use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};

use log::{debug, info};

use super::platform::{
    NativeShareError, PlatformCapability, PlatformError, SharePayload, SharePlatform,
};
use super::sdk::ShareSdk;

/// The machine the CLI runs on.
///
/// Downloads land in `output_dir`. There is no share sheet and no application
/// registered for story deep links, so those routes always fall through.
pub struct LocalPlatform {
    capability: PlatformCapability,
    output_dir: PathBuf,
    objects: Mutex<HashMap<String, Vec<u8>>>,
    next_ref: AtomicU64,
}

impl LocalPlatform {
    pub fn new(user_agent: &str, sdk: &ShareSdk, output_dir: &Path) -> Self {
        let capability =
            PlatformCapability::from_user_agent(user_agent, sdk.native_share_available());
        Self::with_capability(capability, output_dir)
    }

    pub fn with_capability(capability: PlatformCapability, output_dir: &Path) -> Self {
        Self {
            capability,
            output_dir: output_dir.to_path_buf(),
            objects: Mutex::new(HashMap::new()),
            next_ref: AtomicU64::new(1),
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Object references not yet released.
    pub fn live_refs(&self) -> usize {
        self.objects.lock().map(|objects| objects.len()).unwrap_or(0)
    }
}

impl SharePlatform for LocalPlatform {
    fn capability(&self) -> PlatformCapability {
        self.capability
    }

    async fn share_native(&self, payload: &SharePayload<'_>) -> Result<(), NativeShareError> {
        debug!("no share sheet for {}", payload.filename);
        Err(NativeShareError::Failed(
            "no share sheet on this host".to_string(),
        ))
    }

    fn create_object_ref(&self, image: &[u8]) -> Result<String, PlatformError> {
        let id = self.next_ref.fetch_add(1, Ordering::SeqCst);
        let reference = format!("blob:local/{id}");
        let mut objects = self
            .objects
            .lock()
            .map_err(|_| PlatformError::Rejected("object table poisoned".to_string()))?;
        objects.insert(reference.clone(), image.to_vec());
        Ok(reference)
    }

    fn release_object_ref(&self, reference: &str) {
        if let Ok(mut objects) = self.objects.lock() {
            objects.remove(reference);
        }
    }

    async fn open_deep_link(&self, uri: &str) -> Result<bool, PlatformError> {
        info!("no handler registered for {uri}");
        Ok(false)
    }

    fn save_file(&self, reference: &str, filename: &str) -> Result<(), PlatformError> {
        let objects = self
            .objects
            .lock()
            .map_err(|_| PlatformError::Rejected("object table poisoned".to_string()))?;
        let bytes = objects
            .get(reference)
            .ok_or_else(|| PlatformError::UnknownReference(reference.to_string()))?;
        fs::create_dir_all(&self.output_dir)?;
        fs::write(self.output_dir.join(filename), bytes)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capability_follows_user_agent_and_sdk() {
        let dir = Path::new("unused");
        let sdk = ShareSdk::configure(Some("42".into()));
        let phone = LocalPlatform::new("Android 14", &sdk, dir);
        assert_eq!(phone.capability(), PlatformCapability::NativeShareCapable);
        let no_sdk = LocalPlatform::new("Android 14", &ShareSdk::configure(None), dir);
        assert_eq!(no_sdk.capability(), PlatformCapability::DeepLinkCapable);
        let desk = LocalPlatform::new("X11; Linux x86_64", &sdk, dir);
        assert_eq!(desk.capability(), PlatformCapability::DownloadOnly);
    }

    #[test]
    fn saves_referenced_bytes_and_releases() {
        let dir = tempfile::tempdir().unwrap();
        let platform = LocalPlatform::with_capability(PlatformCapability::DownloadOnly, dir.path());
        let reference = platform.create_object_ref(b"png").unwrap();
        platform.save_file(&reference, "card.png").unwrap();
        assert_eq!(fs::read(dir.path().join("card.png")).unwrap(), b"png");
        platform.release_object_ref(&reference);
        assert_eq!(platform.live_refs(), 0);
        assert!(matches!(
            platform.save_file(&reference, "again.png"),
            Err(PlatformError::UnknownReference(_))
        ));
    }
}
