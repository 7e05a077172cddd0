//! Index, Numeric and String.

use libc::{c_char, c_long};

use super::{create, delete, expect_kind, print, xmlread, xmlsave};
use crate::handle::NULL_HANDLE;
use crate::native::{self, ClassKind, NodeKind};
use crate::util::{cstr_to_string, string_to_cstr};

const INDEX: NodeKind = NodeKind::Class(ClassKind::Index);
const NUMERIC: NodeKind = NodeKind::Class(ClassKind::Numeric);
const STRING: NodeKind = NodeKind::Class(ClassKind::String);

// Index

/// Create a new Index, initialised to 0.
///
/// # Ownership
///
/// Caller owns the returned handle. Must call `deleteIndex()` to free.
#[unsafe(no_mangle)]
pub extern "C" fn createIndex() -> u64 {
    create(INDEX)
}

#[unsafe(no_mangle)]
pub extern "C" fn deleteIndex(handle: u64) {
    delete(INDEX, handle)
}

#[unsafe(no_mangle)]
pub extern "C" fn printIndex(handle: u64) {
    print(INDEX, handle)
}

/// # Safety
///
/// `path` must be NULL or a valid null-terminated string.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn xmlreadIndex(handle: u64, path: *const c_char) -> c_long {
    unsafe { xmlread(INDEX, handle, path) }
}

/// # Safety
///
/// `path` must be NULL or a valid null-terminated string.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn xmlsaveIndex(
    handle: u64,
    path: *const c_char,
    filetype: c_long,
    no_clobber: c_long,
) -> c_long {
    unsafe { xmlsave(INDEX, handle, path, filetype, no_clobber) }
}

/// Value of an Index, 0 on failure.
#[unsafe(no_mangle)]
pub extern "C" fn getIndex(handle: u64) -> i64 {
    ffi_guard!(0, { Ok(native::index(handle)?) })
}

#[unsafe(no_mangle)]
pub extern "C" fn setIndex(handle: u64, value: i64) -> c_long {
    ffi_status!({ Ok(native::set_index(handle, value)?) })
}

// Numeric

/// Create a new Numeric, initialised to 0.
///
/// # Ownership
///
/// Caller owns the returned handle. Must call `deleteNumeric()` to free.
#[unsafe(no_mangle)]
pub extern "C" fn createNumeric() -> u64 {
    create(NUMERIC)
}

#[unsafe(no_mangle)]
pub extern "C" fn deleteNumeric(handle: u64) {
    delete(NUMERIC, handle)
}

#[unsafe(no_mangle)]
pub extern "C" fn printNumeric(handle: u64) {
    print(NUMERIC, handle)
}

/// # Safety
///
/// `path` must be NULL or a valid null-terminated string.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn xmlreadNumeric(handle: u64, path: *const c_char) -> c_long {
    unsafe { xmlread(NUMERIC, handle, path) }
}

/// # Safety
///
/// `path` must be NULL or a valid null-terminated string.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn xmlsaveNumeric(
    handle: u64,
    path: *const c_char,
    filetype: c_long,
    no_clobber: c_long,
) -> c_long {
    unsafe { xmlsave(NUMERIC, handle, path, filetype, no_clobber) }
}

/// Value of a Numeric, NaN on failure.
#[unsafe(no_mangle)]
pub extern "C" fn getNumeric(handle: u64) -> f64 {
    ffi_guard!(f64::NAN, { Ok(native::numeric(handle)?) })
}

#[unsafe(no_mangle)]
pub extern "C" fn setNumeric(handle: u64, value: f64) -> c_long {
    ffi_status!({ Ok(native::set_numeric(handle, value)?) })
}

// String

/// Create a new empty String.
///
/// # Ownership
///
/// Caller owns the returned handle. Must call `deleteString()` to free.
#[unsafe(no_mangle)]
pub extern "C" fn createString() -> u64 {
    create(STRING)
}

#[unsafe(no_mangle)]
pub extern "C" fn deleteString(handle: u64) {
    delete(STRING, handle)
}

#[unsafe(no_mangle)]
pub extern "C" fn printString(handle: u64) {
    print(STRING, handle)
}

/// # Safety
///
/// `path` must be NULL or a valid null-terminated string.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn xmlreadString(handle: u64, path: *const c_char) -> c_long {
    unsafe { xmlread(STRING, handle, path) }
}

/// # Safety
///
/// `path` must be NULL or a valid null-terminated string.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn xmlsaveString(
    handle: u64,
    path: *const c_char,
    filetype: c_long,
    no_clobber: c_long,
) -> c_long {
    unsafe { xmlsave(STRING, handle, path, filetype, no_clobber) }
}

/// Contents of a String.
///
/// # Returns
///
/// NULL on failure.
///
/// # Ownership
///
/// Caller owns the returned string. Must call `arts_string_free()`.
#[unsafe(no_mangle)]
pub extern "C" fn getString(handle: u64) -> *mut c_char {
    ffi_guard!(std::ptr::null_mut(), {
        Ok(string_to_cstr(native::string(handle)?))
    })
}

/// Replace the contents of a String.
///
/// # Safety
///
/// `value` must be NULL or a valid null-terminated UTF-8 string.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn setString(handle: u64, value: *const c_char) -> c_long {
    ffi_status!({
        let value = unsafe { cstr_to_string(value, "value") }?;
        Ok(native::set_string(handle, value)?)
    })
}

/// Copy the value of one object into another of the same class.
///
/// Compound fields keep their handles; only their contents change.
#[unsafe(no_mangle)]
pub extern "C" fn arts_copy(dst: u64, src: u64) -> c_long {
    ffi_status!({
        let kind = native::kind_of(src)?;
        expect_kind(dst, kind)?;
        Ok(native::copy(dst, src)?)
    })
}

/// Whether a handle refers to a live object. Never records an error.
#[unsafe(no_mangle)]
pub extern "C" fn arts_is_valid(handle: u64) -> bool {
    handle != NULL_HANDLE && native::kind_of(handle).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ArtsStatus, arts_last_error_code};
    use crate::util::arts_string_free;
    use std::ffi::{CStr, CString};

    #[test]
    fn index_and_numeric_accessors() {
        let i = createIndex();
        assert_eq!(setIndex(i, 42), 0);
        assert_eq!(getIndex(i), 42);

        let n = createNumeric();
        assert_eq!(setNumeric(n, 2.5), 0);
        assert_eq!(getNumeric(n), 2.5);

        // wrong class
        assert_ne!(setNumeric(i, 1.0), 0);
        assert_eq!(arts_last_error_code(), ArtsStatus::KindMismatch.code());
        assert!(getNumeric(i).is_nan());

        deleteIndex(i);
        deleteNumeric(n);
        assert!(!arts_is_valid(i));
    }

    #[test]
    fn string_accessors() {
        let s = createString();
        let value = CString::new("Hej").unwrap();
        assert_eq!(unsafe { setString(s, value.as_ptr()) }, 0);

        let out = getString(s);
        assert_eq!(unsafe { CStr::from_ptr(out) }.to_str().unwrap(), "Hej");
        unsafe { arts_string_free(out) };

        assert_eq!(
            unsafe { setString(s, std::ptr::null()) },
            ArtsStatus::NullPointer.code()
        );
        deleteString(s);
    }

    #[test]
    fn copy_needs_matching_class() {
        let a = createIndex();
        let b = createIndex();
        let n = createNumeric();
        setIndex(a, 5);
        assert_eq!(arts_copy(b, a), 0);
        assert_eq!(getIndex(b), 5);
        assert_eq!(arts_copy(n, a), ArtsStatus::KindMismatch.code());
        deleteIndex(a);
        deleteIndex(b);
        deleteNumeric(n);
    }
}
