//! C ABI export
//!
//! `IsFeatureAvailable` is declared in `include/cue4parse_c_api.h`.

use crate::features::is_feature_available;
use std::ffi::{CStr, c_char};

/// Check if a named feature is available, for foreign callers.
///
/// Returns `false` for a null pointer, a name that is not valid UTF-8,
/// or any name [`is_feature_available`] does not recognise.
///
/// # Safety
///
/// `feature` must be null or point to a NUL-terminated string that stays
/// valid and unmodified for the duration of the call.
#[allow(non_snake_case)]
#[unsafe(no_mangle)]
pub unsafe extern "C" fn IsFeatureAvailable(feature: *const c_char) -> bool {
    if feature.is_null() {
        return false;
    }

    // SAFETY: non-null and NUL-terminated per the caller contract.
    let name = unsafe { CStr::from_ptr(feature) };
    name.to_str().is_ok_and(is_feature_available)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::CString;
    use std::ptr;

    fn call(name: &CStr) -> bool {
        unsafe { IsFeatureAvailable(name.as_ptr()) }
    }

    #[test]
    fn test_null_pointer() {
        assert!(!unsafe { IsFeatureAvailable(ptr::null()) });
    }

    #[test]
    fn test_matches_safe_api() {
        assert_eq!(call(c"ACL"), is_feature_available("ACL"));
        assert_eq!(call(c"Oodle"), is_feature_available("Oodle"));
    }

    #[test]
    fn test_unknown_and_empty() {
        assert!(!call(c""));
        assert!(!call(c"NonExistentFeature"));
        assert!(!call(c"acl"));
    }

    #[test]
    fn test_invalid_utf8() {
        let name = CString::new(vec![0x41, 0xFF, 0x43]).unwrap();
        assert!(!call(&name));
    }

    #[test]
    fn test_owned_string() {
        let name = CString::new("Oodle").unwrap();
        assert_eq!(call(&name), cfg!(feature = "oodle"));
    }
}
