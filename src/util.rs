//! Utility functions for FFI operations.

use std::ffi::{CStr, CString};
use std::path::PathBuf;

use libc::c_char;
use thiserror::Error;

use crate::error::ArtsStatus;

/// Malformed pointer arguments at the C boundary.
#[derive(Debug, Error)]
pub(crate) enum ArgumentError {
    #[error("null pointer passed for parameter: {0}")]
    NullPointer(&'static str),

    #[error("invalid UTF-8 in {0}")]
    InvalidUtf8(&'static str),
}

impl ArgumentError {
    pub fn status(&self) -> ArtsStatus {
        match self {
            ArgumentError::NullPointer(_) => ArtsStatus::NullPointer,
            ArgumentError::InvalidUtf8(_) => ArtsStatus::InvalidUtf8,
        }
    }
}

/// Convert a C string to a PathBuf.
///
/// # Safety
///
/// The caller must ensure `ptr` is either null or points to a valid
/// null-terminated C string.
pub(crate) unsafe fn cstr_to_path(ptr: *const c_char) -> Result<PathBuf, ArgumentError> {
    unsafe { cstr_to_string(ptr, "path") }.map(PathBuf::from)
}

/// Convert a C string to a Rust String.
///
/// # Safety
///
/// The caller must ensure `ptr` is either null or points to a valid
/// null-terminated C string.
pub(crate) unsafe fn cstr_to_string(
    ptr: *const c_char,
    param_name: &'static str,
) -> Result<String, ArgumentError> {
    if ptr.is_null() {
        return Err(ArgumentError::NullPointer(param_name));
    }

    let cstr = unsafe { CStr::from_ptr(ptr) };
    match cstr.to_str() {
        Ok(s) => Ok(s.to_string()),
        Err(_) => Err(ArgumentError::InvalidUtf8(param_name)),
    }
}

/// Convert a Rust string to a C string, returning an owned pointer.
///
/// The caller is responsible for freeing the returned pointer with
/// `arts_string_free`. Interior NUL bytes are replaced by spaces.
pub(crate) fn string_to_cstr(s: String) -> *mut c_char {
    CString::new(s.replace('\0', " "))
        .map(CString::into_raw)
        .unwrap_or(std::ptr::null_mut())
}

/// Free a string returned by this library.
///
/// Safe to call with NULL.
///
/// # Safety
///
/// `ptr` must be NULL or a pointer returned by this library that has not
/// been freed yet.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn arts_string_free(ptr: *mut c_char) {
    if ptr.is_null() {
        return;
    }
    unsafe {
        drop(CString::from_raw(ptr));
    }
}
