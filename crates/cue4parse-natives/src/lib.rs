//! CUE4Parse Natives - native capability checks
//!
//! This crate builds both a shared library for foreign callers and an rlib
//! for Rust code. It reports which optional native codecs were compiled in:
//!
//! - **ACL** (feature `acl`): animation compression decoding
//! - **Oodle** (feature `oodle`): archive block decompression
//!
//! # Example
//!
//! ```
//! use cue4parse_natives::is_feature_available;
//!
//! if is_feature_available("Oodle") {
//!     println!("Oodle decompression is supported");
//! }
//! assert!(!is_feature_available("NonExistentFeature"));
//! ```
//!
//! C callers link the shared library and call `IsFeatureAvailable`, declared
//! in `include/cue4parse_c_api.h`.

pub mod features;

#[allow(unsafe_code)]
pub mod ffi;

pub use features::{
    FeatureInfo, NativeFeature, available_features, enabled_features, is_feature_available,
};
pub use ffi::IsFeatureAvailable;
