//! Shared clap helper types for CLI commands.

use clap::ValueEnum;
use valentine::{PlatformCapability, TemplateTheme};

/// Template themes accepted by `--theme`.
#[derive(ValueEnum, Debug, Clone, Copy)]
pub enum ThemeArg {
    Romantic,
    Funny,
    Friendship,
}

impl From<ThemeArg> for TemplateTheme {
    fn from(value: ThemeArg) -> TemplateTheme {
        match value {
            ThemeArg::Romantic => TemplateTheme::Romantic,
            ThemeArg::Funny => TemplateTheme::Funny,
            ThemeArg::Friendship => TemplateTheme::Friendship,
        }
    }
}

/// Forces the share route instead of probing the user agent.
#[derive(ValueEnum, Debug, Clone, Copy)]
pub enum CapabilityArg {
    #[value(name = "native")]
    NativeShare,
    #[value(name = "deep-link")]
    DeepLink,
    Download,
}

impl From<CapabilityArg> for PlatformCapability {
    fn from(value: CapabilityArg) -> PlatformCapability {
        match value {
            CapabilityArg::NativeShare => PlatformCapability::NativeShareCapable,
            CapabilityArg::DeepLink => PlatformCapability::DeepLinkCapable,
            CapabilityArg::Download => PlatformCapability::DownloadOnly,
        }
    }
}
