use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;
use url::Url;

/// A language version whose reference tree can be crawled
///
/// Only the versions in [`Version::SUPPORTED`] can be constructed; anything else
/// is rejected when the configuration is parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Version(u8);

/// Error returned when a version number is outside the supported set
#[derive(Debug, Error)]
#[error("unsupported language version {0} (supported: 3, 4, 5, 6)")]
pub struct UnsupportedVersion(pub u8);

impl Version {
    /// Versions with a published reference tree
    pub const SUPPORTED: [Version; 4] = [Version(3), Version(4), Version(5), Version(6)];

    /// Returns the numeric version
    pub fn number(self) -> u8 {
        self.0
    }

    /// Resolves the index page of this version under `base`
    ///
    /// `base` is the reference root, e.g.
    /// `https://www.tradingview.com/pine-script-reference/`; the result is
    /// `<base>v6/`. A missing trailing slash on `base` is tolerated.
    pub fn index_url(self, base: &Url) -> Result<Url, url::ParseError> {
        let mut root = base.clone();
        if !root.path().ends_with('/') {
            let path = format!("{}/", root.path());
            root.set_path(&path);
        }
        root.join(&format!("{}/", self))
    }
}

impl TryFrom<u8> for Version {
    type Error = UnsupportedVersion;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::SUPPORTED
            .into_iter()
            .find(|v| v.0 == value)
            .ok_or(UnsupportedVersion(value))
    }
}

impl From<Version> for u8 {
    fn from(version: Version) -> Self {
        version.0
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v{}", self.0)
    }
}
