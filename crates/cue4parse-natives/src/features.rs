//! Native feature table
//!
//! Each optional codec is a cargo feature of this crate. Availability is
//! fixed at build time, so every lookup here is a pure function.

use std::fmt;
use std::str::FromStr;

/// Optional native codec that may be compiled into this build
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NativeFeature {
    /// ACL animation compression (requires `acl` feature)
    Acl,
    /// Oodle compression (requires `oodle` feature)
    Oodle,
}

impl NativeFeature {
    /// Every feature this build knows about, in declaration order
    pub const ALL: [Self; 2] = [Self::Acl, Self::Oodle];

    /// Exact name used across the C ABI
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Acl => "ACL",
            Self::Oodle => "Oodle",
        }
    }

    pub const fn description(&self) -> &'static str {
        match self {
            Self::Acl => "Animation Compression Library decoding for animation sequences",
            Self::Oodle => "Oodle decompression for compressed archive blocks",
        }
    }

    /// Look up a feature by its exact, case-sensitive name
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.name() == name)
    }

    /// Check if the feature was compiled in
    pub const fn is_available(&self) -> bool {
        match self {
            Self::Acl => cfg!(feature = "acl"),
            Self::Oodle => cfg!(feature = "oodle"),
        }
    }

    pub const fn info(&self) -> FeatureInfo {
        FeatureInfo {
            name: self.name(),
            description: self.description(),
            available: self.is_available(),
        }
    }
}

impl fmt::Display for NativeFeature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for NativeFeature {
    type Err = String;

    /// Lenient parse for operator input; the ABI lookup stays exact
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "acl" => Ok(Self::Acl),
            "oodle" => Ok(Self::Oodle),
            _ => Err(format!("unknown native feature: {s}")),
        }
    }
}

/// Availability report for one native feature
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FeatureInfo {
    /// Exact feature name
    pub name: &'static str,
    /// Human-readable summary
    pub description: &'static str,
    /// Whether the feature was compiled in
    pub available: bool,
}

/// Check if a named feature is available in this build
///
/// Matching is exact and case-sensitive. Unknown, empty, or NUL-containing
/// names report `false`.
pub fn is_feature_available(feature: &str) -> bool {
    match NativeFeature::from_name(feature) {
        Some(f) => f.is_available(),
        None => {
            tracing::debug!(feature, "unknown native feature requested");
            false
        }
    }
}

/// Get the availability of every known feature
pub fn available_features() -> Vec<FeatureInfo> {
    NativeFeature::ALL.iter().map(NativeFeature::info).collect()
}

/// Names of the features compiled into this build
pub fn enabled_features() -> Vec<&'static str> {
    NativeFeature::ALL
        .iter()
        .filter(|f| f.is_available())
        .map(NativeFeature::name)
        .collect()
}
