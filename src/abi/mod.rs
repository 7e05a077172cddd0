//! Flat C surface keyed by class name.
//!
//! Every function runs inside [`ffi_guard!`], so a panic never unwinds into
//! the caller; it is reported as `ArtsStatus::Panicked` instead. Failures
//! record the thread's last error and return a neutral value: the null
//! handle, zero, a null pointer, or a nonzero status.

#![allow(non_snake_case)]

use std::path::PathBuf;

use libc::{c_char, c_long};
use thiserror::Error;

use crate::error::{ArtsStatus, NativeError, arts_last_error_code, clear_last_error, set_last_error};
use crate::handle::{NULL_HANDLE, RawHandle};
use crate::native::{self, FileFormat, NodeKind};
use crate::util::{ArgumentError, cstr_to_path};

/// Catch panics and report failures at the C boundary.
///
/// The body evaluates to `Result<T, AbiError>`. On success the last error is
/// cleared and the value returned; otherwise the error is recorded and
/// `$fallback` returned.
macro_rules! ffi_guard {
    ($fallback:expr, $body:block) => {{
        let outcome = ::std::panic::catch_unwind(::std::panic::AssertUnwindSafe(
            || -> ::std::result::Result<_, $crate::abi::AbiError> { $body },
        ));
        $crate::abi::finish(outcome, $fallback)
    }};
}

/// Like [`ffi_guard!`] for functions that return a status code: 0 on
/// success, the failure's `ArtsStatus` code otherwise.
macro_rules! ffi_status {
    ($body:block) => {{
        let outcome = ::std::panic::catch_unwind(::std::panic::AssertUnwindSafe(
            || -> ::std::result::Result<(), $crate::abi::AbiError> { $body },
        ));
        $crate::abi::finish_status(outcome)
    }};
}

mod array;
mod basic;
mod gridded_field;
mod vector;
mod xsec_record;

pub use array::*;
pub use basic::*;
pub use gridded_field::*;
pub use vector::*;
pub use xsec_record::*;

/// Any failure that can reach the C boundary.
#[derive(Debug, Error)]
pub(crate) enum AbiError {
    #[error(transparent)]
    Native(#[from] NativeError),
    #[error(transparent)]
    Argument(#[from] ArgumentError),
}

impl AbiError {
    fn status(&self) -> ArtsStatus {
        match self {
            AbiError::Native(e) => e.status(),
            AbiError::Argument(e) => e.status(),
        }
    }
}

pub(crate) fn finish<T>(outcome: std::thread::Result<Result<T, AbiError>>, fallback: T) -> T {
    match outcome {
        Ok(Ok(value)) => {
            clear_last_error();
            value
        }
        Ok(Err(e)) => {
            set_last_error(e.status(), &e.to_string());
            fallback
        }
        Err(panic) => {
            let message = panic
                .downcast_ref::<&str>()
                .map(|s| s.to_string())
                .or_else(|| panic.downcast_ref::<String>().cloned())
                .unwrap_or_else(|| "unknown panic".to_string());
            set_last_error(ArtsStatus::Panicked, &format!("panic at FFI boundary: {message}"));
            fallback
        }
    }
}

pub(crate) fn finish_status(outcome: std::thread::Result<Result<(), AbiError>>) -> c_long {
    finish(outcome, ());
    arts_last_error_code()
}

fn expect_kind(handle: RawHandle, expected: NodeKind) -> Result<(), NativeError> {
    let found = native::kind_of(handle)?;
    if found != expected {
        return Err(NativeError::KindMismatch { expected, found });
    }
    Ok(())
}

fn to_usize(value: c_long, what: &str) -> Result<usize, NativeError> {
    usize::try_from(value)
        .map_err(|_| NativeError::InvalidArgument(format!("{what} must not be negative, got {value}")))
}

fn to_c_long(value: usize) -> c_long {
    c_long::try_from(value).unwrap_or(c_long::MAX)
}

// Class-generic bodies shared by the per-class functions.

fn create(kind: NodeKind) -> RawHandle {
    ffi_guard!(NULL_HANDLE, { Ok(native::create(kind)?) })
}

fn delete(kind: NodeKind, handle: RawHandle) {
    ffi_guard!((), {
        expect_kind(handle, kind)?;
        Ok(native::delete(handle)?)
    })
}

fn print(kind: NodeKind, handle: RawHandle) {
    ffi_guard!((), {
        expect_kind(handle, kind)?;
        Ok(native::print(handle)?)
    })
}

unsafe fn xmlread(kind: NodeKind, handle: RawHandle, path: *const c_char) -> c_long {
    ffi_status!({
        let path = unsafe { cstr_to_path(path) }?;
        expect_kind(handle, kind)?;
        Ok(native::read_xml(handle, &path)?)
    })
}

unsafe fn xmlsave(
    kind: NodeKind,
    handle: RawHandle,
    path: *const c_char,
    filetype: c_long,
    no_clobber: c_long,
) -> c_long {
    ffi_status!({
        let path: PathBuf = unsafe { cstr_to_path(path) }?;
        expect_kind(handle, kind)?;
        let format = FileFormat::from_code(i64::from(filetype))?;
        native::save_xml(handle, &path, format, no_clobber == 0)?;
        Ok(())
    })
}

/// JSON dump of the whole value tree of any object.
///
/// # Returns
///
/// NULL on failure.
///
/// # Ownership
///
/// Caller owns the returned string. Must call `arts_string_free()`.
#[unsafe(no_mangle)]
pub extern "C" fn arts_json(handle: u64) -> *mut c_char {
    ffi_guard!(std::ptr::null_mut(), {
        let json = native::to_json(handle)?;
        Ok(crate::util::string_to_cstr(json))
    })
}

/// Class name of any object (e.g. "XsecRecord", "ArrayOfVector").
///
/// # Returns
///
/// Static string, NULL for an invalid handle. Do not free this string.
#[unsafe(no_mangle)]
pub extern "C" fn arts_kind(handle: u64) -> *const c_char {
    ffi_guard!(std::ptr::null(), {
        let kind = native::kind_of(handle)?;
        Ok(kind_cstr(kind).as_ptr())
    })
}

fn kind_cstr(kind: NodeKind) -> &'static std::ffi::CStr {
    use crate::native::ClassKind::*;
    match kind {
        NodeKind::Class(Index) => c"Index",
        NodeKind::Class(Numeric) => c"Numeric",
        NodeKind::Class(String) => c"String",
        NodeKind::Class(Vector) => c"Vector",
        NodeKind::Class(Matrix) => c"Matrix",
        NodeKind::Class(GriddedField2) => c"GriddedField2",
        NodeKind::Class(XsecRecord) => c"XsecRecord",
        NodeKind::ArrayOf(Index) => c"ArrayOfIndex",
        NodeKind::ArrayOf(Numeric) => c"ArrayOfNumeric",
        NodeKind::ArrayOf(String) => c"ArrayOfString",
        NodeKind::ArrayOf(Vector) => c"ArrayOfVector",
        NodeKind::ArrayOf(Matrix) => c"ArrayOfMatrix",
        NodeKind::ArrayOf(GriddedField2) => c"ArrayOfGriddedField2",
        NodeKind::ArrayOf(XsecRecord) => c"ArrayOfXsecRecord",
    }
}
