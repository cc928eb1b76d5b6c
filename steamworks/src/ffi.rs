#![allow(unsafe_code)]
//! Internal FFI utilities: C string and integer conversions.

use std::ffi::{CStr, c_char, c_int};

use crate::error::{Error, Result};

/// Copy a **borrowed** C string owned by the SDK. Does NOT free anything.
pub(crate) unsafe fn read_borrowed_string(ptr: *const c_char) -> Result<String> {
    if ptr.is_null() {
        return Err(Error::NullPointer);
    }
    unsafe { CStr::from_ptr(ptr) }
        .to_str()
        .map(String::from)
        .map_err(|_| Error::InvalidUtf8)
}

/// Clamp a count for a C `int` parameter.
#[inline]
pub(crate) fn to_c_int(n: u32) -> c_int {
    c_int::try_from(n).unwrap_or(c_int::MAX)
}

/// Negative counts from the SDK mean "nothing".
#[inline]
pub(crate) fn from_c_count(n: c_int) -> u32 {
    u32::try_from(n).unwrap_or(0)
}
