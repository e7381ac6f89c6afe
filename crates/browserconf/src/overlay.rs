//! Bundler-version-specific structural overlays.
//!
//! Supported bundler majors disagree on where some settings live (for
//! example the target environment). Each major gets one [`VersionOverlay`];
//! supporting another major means adding an implementation here.

use std::fmt;
use std::str::FromStr;

use semver::VersionReq;
use serde_json::json;

use crate::error::{ConfigError, Result};
use crate::fragment::ConfigurationFragment;

/// Bundler major version detected by the surrounding system
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BundlerVersion {
    V4,
    #[default]
    V5,
}

impl BundlerVersion {
    pub fn major(self) -> u64 {
        match self {
            Self::V4 => 4,
            Self::V5 => 5,
        }
    }

    pub fn from_major(major: u64) -> Option<Self> {
        match major {
            4 => Some(Self::V4),
            5 => Some(Self::V5),
            _ => None,
        }
    }

    /// Detect the major from a version string or range such as `5.11.0`,
    /// `v4.46.0` or `^5.0.0`.
    ///
    /// ```
    /// use browserconf::BundlerVersion;
    ///
    /// assert_eq!(BundlerVersion::detect("^5.11.0").unwrap(), BundlerVersion::V5);
    /// assert_eq!(BundlerVersion::detect("v4.46.0").unwrap(), BundlerVersion::V4);
    /// assert!(BundlerVersion::detect("3.12.0").is_err());
    /// ```
    pub fn detect(version: &str) -> Result<Self> {
        let unsupported = || ConfigError::UnsupportedBundlerVersion(version.to_string());

        let trimmed = version.trim().trim_start_matches(|c: char| c == 'v' || c == 'V');
        if trimmed.is_empty() {
            return Err(unsupported());
        }

        let requirement = VersionReq::parse(trimmed).map_err(|_| unsupported())?;
        let major = requirement
            .comparators
            .first()
            .map(|comparator| comparator.major)
            .ok_or_else(unsupported)?;

        Self::from_major(major).ok_or_else(unsupported)
    }

    /// The overlay collaborator for this version
    pub fn overlay(self) -> &'static dyn VersionOverlay {
        match self {
            Self::V4 => &LegacyOverlay,
            Self::V5 => &TargetListOverlay,
        }
    }
}

impl FromStr for BundlerVersion {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self> {
        Self::detect(s)
    }
}

impl fmt::Display for BundlerVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.major())
    }
}

/// Structural overlay contributed for one bundler major
pub trait VersionOverlay: Send + Sync {
    fn version(&self) -> BundlerVersion;

    fn fragment(&self) -> ConfigurationFragment;
}

/// Major 4 reads its target from defaults; nothing to add
pub struct LegacyOverlay;

impl VersionOverlay for LegacyOverlay {
    fn version(&self) -> BundlerVersion {
        BundlerVersion::V4
    }

    fn fragment(&self) -> ConfigurationFragment {
        ConfigurationFragment::new()
    }
}

/// Major 5 expresses the target environment as a list
pub struct TargetListOverlay;

impl VersionOverlay for TargetListOverlay {
    fn version(&self) -> BundlerVersion {
        BundlerVersion::V5
    }

    fn fragment(&self) -> ConfigurationFragment {
        ConfigurationFragment::new().with("target", json!(["web", "es5"]))
    }
}

/// Select the overlay for `version` and merge it onto `base`.
pub fn merge_version_overlay(base: &mut ConfigurationFragment, version: BundlerVersion) {
    let overlay = version.overlay();
    tracing::debug!(version = %overlay.version(), "applying bundler version overlay");
    base.merge(overlay.fragment());
}
