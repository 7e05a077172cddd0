//! GriddedField2.
//!
//! The grids and the data matrix are fields of the gridded field; their
//! handles are borrowed and must not be passed to a delete function.

use libc::{c_char, c_long};

use super::{create, delete, print, to_usize, xmlread, xmlsave};
use crate::handle::NULL_HANDLE;
use crate::native::{self, ClassKind, NodeKind};
use crate::util::{cstr_to_string, string_to_cstr};

const GRIDDED_FIELD2: NodeKind = NodeKind::Class(ClassKind::GriddedField2);

/// Create a new GriddedField2 with empty grids and a 0x0 data matrix.
///
/// # Ownership
///
/// Caller owns the returned handle. Must call `deleteGriddedField2()` to free.
#[unsafe(no_mangle)]
pub extern "C" fn createGriddedField2() -> u64 {
    create(GRIDDED_FIELD2)
}

#[unsafe(no_mangle)]
pub extern "C" fn deleteGriddedField2(handle: u64) {
    delete(GRIDDED_FIELD2, handle)
}

#[unsafe(no_mangle)]
pub extern "C" fn printGriddedField2(handle: u64) {
    print(GRIDDED_FIELD2, handle)
}

/// # Safety
///
/// `path` must be NULL or a valid null-terminated string.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn xmlreadGriddedField2(handle: u64, path: *const c_char) -> c_long {
    unsafe { xmlread(GRIDDED_FIELD2, handle, path) }
}

/// # Safety
///
/// `path` must be NULL or a valid null-terminated string.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn xmlsaveGriddedField2(
    handle: u64,
    path: *const c_char,
    filetype: c_long,
    no_clobber: c_long,
) -> c_long {
    unsafe { xmlsave(GRIDDED_FIELD2, handle, path, filetype, no_clobber) }
}

/// Name of the field.
///
/// # Ownership
///
/// Caller owns the returned string. Must call `arts_string_free()`.
#[unsafe(no_mangle)]
pub extern "C" fn getNameGriddedField2(handle: u64) -> *mut c_char {
    ffi_guard!(std::ptr::null_mut(), {
        Ok(string_to_cstr(native::gridded_field_name(handle)?))
    })
}

/// # Safety
///
/// `name` must be NULL or a valid null-terminated UTF-8 string.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn setNameGriddedField2(handle: u64, name: *const c_char) -> c_long {
    ffi_status!({
        let name = unsafe { cstr_to_string(name, "name") }?;
        Ok(native::set_gridded_field_name(handle, name)?)
    })
}

/// Name of grid `dim` (0 or 1).
///
/// # Ownership
///
/// Caller owns the returned string. Must call `arts_string_free()`.
#[unsafe(no_mangle)]
pub extern "C" fn getGridNameGriddedField2(handle: u64, dim: c_long) -> *mut c_char {
    ffi_guard!(std::ptr::null_mut(), {
        let dim = to_usize(dim, "dim")?;
        Ok(string_to_cstr(native::grid_name(handle, dim)?))
    })
}

/// # Safety
///
/// `name` must be NULL or a valid null-terminated UTF-8 string.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn setGridNameGriddedField2(
    handle: u64,
    dim: c_long,
    name: *const c_char,
) -> c_long {
    ffi_status!({
        let dim = to_usize(dim, "dim")?;
        let name = unsafe { cstr_to_string(name, "name") }?;
        Ok(native::set_grid_name(handle, dim, name)?)
    })
}

/// Borrowed Vector handle of grid `dim` (0 or 1), 0 on failure.
#[unsafe(no_mangle)]
pub extern "C" fn getGridGriddedField2(handle: u64, dim: c_long) -> u64 {
    ffi_guard!(NULL_HANDLE, {
        let dim = to_usize(dim, "dim")?;
        Ok(native::grid(handle, dim)?)
    })
}

/// Borrowed Matrix handle of the field data, 0 on failure.
#[unsafe(no_mangle)]
pub extern "C" fn getDataGriddedField2(handle: u64) -> u64 {
    ffi_guard!(NULL_HANDLE, { Ok(native::gridded_field_data(handle)?) })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::abi::{deleteVector, nelemGetVector, setDataVector};
    use crate::error::{ArtsStatus, arts_last_error_code};
    use crate::util::arts_string_free;
    use std::ffi::{CStr, CString};

    #[test]
    fn grids_are_borrowed_fields() {
        let gf = createGriddedField2();
        let grid = getGridGriddedField2(gf, 1);
        assert_ne!(grid, NULL_HANDLE);

        let values = [1.0, 2.0];
        assert_eq!(unsafe { setDataVector(grid, values.as_ptr(), 2) }, 0);
        // a fresh view sees the same storage
        assert_eq!(nelemGetVector(getGridGriddedField2(gf, 1)), 2);

        deleteVector(grid);
        assert_eq!(arts_last_error_code(), ArtsStatus::NotRoot.code());

        assert_eq!(getGridGriddedField2(gf, 2), NULL_HANDLE);
        assert_eq!(arts_last_error_code(), ArtsStatus::IndexOutOfRange.code());

        deleteGriddedField2(gf);
        assert_eq!(nelemGetVector(grid), 0);
        assert_eq!(arts_last_error_code(), ArtsStatus::InvalidHandle.code());
    }

    #[test]
    fn names() {
        let gf = createGriddedField2();
        let name = CString::new("coeffs").unwrap();
        assert_eq!(unsafe { setNameGriddedField2(gf, name.as_ptr()) }, 0);
        let grid_name = CString::new("frequency").unwrap();
        assert_eq!(unsafe { setGridNameGriddedField2(gf, 0, grid_name.as_ptr()) }, 0);

        let out = getNameGriddedField2(gf);
        assert_eq!(unsafe { CStr::from_ptr(out) }.to_str().unwrap(), "coeffs");
        unsafe { arts_string_free(out) };

        let out = getGridNameGriddedField2(gf, 0);
        assert_eq!(unsafe { CStr::from_ptr(out) }.to_str().unwrap(), "frequency");
        unsafe { arts_string_free(out) };

        assert!(getGridNameGriddedField2(gf, -1).is_null());
        assert_eq!(arts_last_error_code(), ArtsStatus::InvalidArgument.code());
        deleteGriddedField2(gf);
    }
}
