//! CUE4Parse Provider - Unreal Engine archive access
//!
//! This crate drives the CUE4Parse CLI tool as a child process to list
//! packages, read export tables and export objects from a game's archives.
//! The `asset` module turns that output into typed exports and properties.
//! Native codec availability comes from `cue4parse-natives`.
//!
//! # Example
//!
//! ```no_run
//! use cue4parse_provider::{GameVersion, Provider, is_feature_available};
//!
//! println!("Oodle available: {}", is_feature_available("Oodle"));
//!
//! let mut provider = Provider::new("/path/to/game/paks", GameVersion::UE5_3);
//! provider.add_key("", "0x0123456789ABCDEF0123456789ABCDEF0123456789ABCDEF0123456789ABCDEF");
//!
//! let package = provider.load_package("Game/Characters/Hero.uasset")?;
//! for export in &package.exports {
//!     println!("{} ({})", export.name, export.class_name);
//! }
//! # Ok::<(), cue4parse_provider::Error>(())
//! ```

pub mod asset;
mod command;
pub mod package;
pub mod provider;

#[cfg(all(test, unix))]
mod test_support;

pub use cue4parse_common::{AesKey, Config, Error, ExportFormat, GameVersion, ProviderConfig, Result};
pub use cue4parse_natives::{FeatureInfo, NativeFeature, available_features, is_feature_available};
pub use asset::{Asset, AssetExport, FName, ObjectReference, PackageIndex, Property};
pub use package::{ExportInfo, PackageInfo};
pub use provider::Provider;
