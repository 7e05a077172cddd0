//! Arrays of every class.
//!
//! Element handles returned by `getelemArrayOf*` are borrowed. Shrinking an
//! array releases the dropped elements, so their handles become invalid.

use libc::{c_char, c_long};

use super::{create, delete, print, to_c_long, to_usize, xmlread, xmlsave};
use crate::handle::NULL_HANDLE;
use crate::native::{self, ClassKind, NodeKind};

fn size(element: ClassKind, handle: u64) -> c_long {
    ffi_guard!(0, { Ok(to_c_long(native::array_len(handle, element)?)) })
}

fn resize(element: ClassKind, handle: u64, len: c_long) -> c_long {
    ffi_status!({
        let len = to_usize(len, "len")?;
        Ok(native::array_resize(handle, element, len)?)
    })
}

fn getelem(element: ClassKind, handle: u64, index: c_long) -> u64 {
    ffi_guard!(NULL_HANDLE, {
        let index = to_usize(index, "index")?;
        Ok(native::array_elem(handle, element, index)?)
    })
}

// ArrayOfIndex

/// Create a new empty ArrayOfIndex.
///
/// # Ownership
///
/// Caller owns the returned handle. Must call `deleteArrayOfIndex()` to free.
#[unsafe(no_mangle)]
pub extern "C" fn createArrayOfIndex() -> u64 {
    create(NodeKind::ArrayOf(ClassKind::Index))
}

/// Release the array and every element in it.
#[unsafe(no_mangle)]
pub extern "C" fn deleteArrayOfIndex(handle: u64) {
    delete(NodeKind::ArrayOf(ClassKind::Index), handle)
}

#[unsafe(no_mangle)]
pub extern "C" fn printArrayOfIndex(handle: u64) {
    print(NodeKind::ArrayOf(ClassKind::Index), handle)
}

/// # Safety
///
/// `path` must be NULL or a valid null-terminated string.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn xmlreadArrayOfIndex(handle: u64, path: *const c_char) -> c_long {
    unsafe { xmlread(NodeKind::ArrayOf(ClassKind::Index), handle, path) }
}

/// # Safety
///
/// `path` must be NULL or a valid null-terminated string.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn xmlsaveArrayOfIndex(
    handle: u64,
    path: *const c_char,
    filetype: c_long,
    no_clobber: c_long,
) -> c_long {
    unsafe { xmlsave(NodeKind::ArrayOf(ClassKind::Index), handle, path, filetype, no_clobber) }
}

/// Number of elements, 0 on failure.
#[unsafe(no_mangle)]
pub extern "C" fn sizeArrayOfIndex(handle: u64) -> c_long {
    size(ClassKind::Index, handle)
}

/// Grow with default elements or shrink, releasing the dropped ones.
#[unsafe(no_mangle)]
pub extern "C" fn resizeArrayOfIndex(handle: u64, len: c_long) -> c_long {
    resize(ClassKind::Index, handle, len)
}

/// Borrowed handle of element `index`, 0 if out of range.
#[unsafe(no_mangle)]
pub extern "C" fn getelemArrayOfIndex(handle: u64, index: c_long) -> u64 {
    getelem(ClassKind::Index, handle, index)
}

// ArrayOfNumeric

/// Create a new empty ArrayOfNumeric.
#[unsafe(no_mangle)]
pub extern "C" fn createArrayOfNumeric() -> u64 {
    create(NodeKind::ArrayOf(ClassKind::Numeric))
}

#[unsafe(no_mangle)]
pub extern "C" fn deleteArrayOfNumeric(handle: u64) {
    delete(NodeKind::ArrayOf(ClassKind::Numeric), handle)
}

#[unsafe(no_mangle)]
pub extern "C" fn printArrayOfNumeric(handle: u64) {
    print(NodeKind::ArrayOf(ClassKind::Numeric), handle)
}

/// # Safety
///
/// `path` must be NULL or a valid null-terminated string.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn xmlreadArrayOfNumeric(handle: u64, path: *const c_char) -> c_long {
    unsafe { xmlread(NodeKind::ArrayOf(ClassKind::Numeric), handle, path) }
}

/// # Safety
///
/// `path` must be NULL or a valid null-terminated string.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn xmlsaveArrayOfNumeric(
    handle: u64,
    path: *const c_char,
    filetype: c_long,
    no_clobber: c_long,
) -> c_long {
    unsafe { xmlsave(NodeKind::ArrayOf(ClassKind::Numeric), handle, path, filetype, no_clobber) }
}

#[unsafe(no_mangle)]
pub extern "C" fn sizeArrayOfNumeric(handle: u64) -> c_long {
    size(ClassKind::Numeric, handle)
}

#[unsafe(no_mangle)]
pub extern "C" fn resizeArrayOfNumeric(handle: u64, len: c_long) -> c_long {
    resize(ClassKind::Numeric, handle, len)
}

#[unsafe(no_mangle)]
pub extern "C" fn getelemArrayOfNumeric(handle: u64, index: c_long) -> u64 {
    getelem(ClassKind::Numeric, handle, index)
}

// ArrayOfString

/// Create a new empty ArrayOfString.
#[unsafe(no_mangle)]
pub extern "C" fn createArrayOfString() -> u64 {
    create(NodeKind::ArrayOf(ClassKind::String))
}

#[unsafe(no_mangle)]
pub extern "C" fn deleteArrayOfString(handle: u64) {
    delete(NodeKind::ArrayOf(ClassKind::String), handle)
}

#[unsafe(no_mangle)]
pub extern "C" fn printArrayOfString(handle: u64) {
    print(NodeKind::ArrayOf(ClassKind::String), handle)
}

/// # Safety
///
/// `path` must be NULL or a valid null-terminated string.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn xmlreadArrayOfString(handle: u64, path: *const c_char) -> c_long {
    unsafe { xmlread(NodeKind::ArrayOf(ClassKind::String), handle, path) }
}

/// # Safety
///
/// `path` must be NULL or a valid null-terminated string.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn xmlsaveArrayOfString(
    handle: u64,
    path: *const c_char,
    filetype: c_long,
    no_clobber: c_long,
) -> c_long {
    unsafe { xmlsave(NodeKind::ArrayOf(ClassKind::String), handle, path, filetype, no_clobber) }
}

#[unsafe(no_mangle)]
pub extern "C" fn sizeArrayOfString(handle: u64) -> c_long {
    size(ClassKind::String, handle)
}

#[unsafe(no_mangle)]
pub extern "C" fn resizeArrayOfString(handle: u64, len: c_long) -> c_long {
    resize(ClassKind::String, handle, len)
}

#[unsafe(no_mangle)]
pub extern "C" fn getelemArrayOfString(handle: u64, index: c_long) -> u64 {
    getelem(ClassKind::String, handle, index)
}

// ArrayOfVector

/// Create a new empty ArrayOfVector.
#[unsafe(no_mangle)]
pub extern "C" fn createArrayOfVector() -> u64 {
    create(NodeKind::ArrayOf(ClassKind::Vector))
}

#[unsafe(no_mangle)]
pub extern "C" fn deleteArrayOfVector(handle: u64) {
    delete(NodeKind::ArrayOf(ClassKind::Vector), handle)
}

#[unsafe(no_mangle)]
pub extern "C" fn printArrayOfVector(handle: u64) {
    print(NodeKind::ArrayOf(ClassKind::Vector), handle)
}

/// # Safety
///
/// `path` must be NULL or a valid null-terminated string.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn xmlreadArrayOfVector(handle: u64, path: *const c_char) -> c_long {
    unsafe { xmlread(NodeKind::ArrayOf(ClassKind::Vector), handle, path) }
}

/// # Safety
///
/// `path` must be NULL or a valid null-terminated string.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn xmlsaveArrayOfVector(
    handle: u64,
    path: *const c_char,
    filetype: c_long,
    no_clobber: c_long,
) -> c_long {
    unsafe { xmlsave(NodeKind::ArrayOf(ClassKind::Vector), handle, path, filetype, no_clobber) }
}

#[unsafe(no_mangle)]
pub extern "C" fn sizeArrayOfVector(handle: u64) -> c_long {
    size(ClassKind::Vector, handle)
}

#[unsafe(no_mangle)]
pub extern "C" fn resizeArrayOfVector(handle: u64, len: c_long) -> c_long {
    resize(ClassKind::Vector, handle, len)
}

#[unsafe(no_mangle)]
pub extern "C" fn getelemArrayOfVector(handle: u64, index: c_long) -> u64 {
    getelem(ClassKind::Vector, handle, index)
}

// ArrayOfMatrix

/// Create a new empty ArrayOfMatrix.
#[unsafe(no_mangle)]
pub extern "C" fn createArrayOfMatrix() -> u64 {
    create(NodeKind::ArrayOf(ClassKind::Matrix))
}

#[unsafe(no_mangle)]
pub extern "C" fn deleteArrayOfMatrix(handle: u64) {
    delete(NodeKind::ArrayOf(ClassKind::Matrix), handle)
}

#[unsafe(no_mangle)]
pub extern "C" fn printArrayOfMatrix(handle: u64) {
    print(NodeKind::ArrayOf(ClassKind::Matrix), handle)
}

/// # Safety
///
/// `path` must be NULL or a valid null-terminated string.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn xmlreadArrayOfMatrix(handle: u64, path: *const c_char) -> c_long {
    unsafe { xmlread(NodeKind::ArrayOf(ClassKind::Matrix), handle, path) }
}

/// # Safety
///
/// `path` must be NULL or a valid null-terminated string.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn xmlsaveArrayOfMatrix(
    handle: u64,
    path: *const c_char,
    filetype: c_long,
    no_clobber: c_long,
) -> c_long {
    unsafe { xmlsave(NodeKind::ArrayOf(ClassKind::Matrix), handle, path, filetype, no_clobber) }
}

#[unsafe(no_mangle)]
pub extern "C" fn sizeArrayOfMatrix(handle: u64) -> c_long {
    size(ClassKind::Matrix, handle)
}

#[unsafe(no_mangle)]
pub extern "C" fn resizeArrayOfMatrix(handle: u64, len: c_long) -> c_long {
    resize(ClassKind::Matrix, handle, len)
}

#[unsafe(no_mangle)]
pub extern "C" fn getelemArrayOfMatrix(handle: u64, index: c_long) -> u64 {
    getelem(ClassKind::Matrix, handle, index)
}

// ArrayOfGriddedField2

/// Create a new empty ArrayOfGriddedField2.
#[unsafe(no_mangle)]
pub extern "C" fn createArrayOfGriddedField2() -> u64 {
    create(NodeKind::ArrayOf(ClassKind::GriddedField2))
}

#[unsafe(no_mangle)]
pub extern "C" fn deleteArrayOfGriddedField2(handle: u64) {
    delete(NodeKind::ArrayOf(ClassKind::GriddedField2), handle)
}

#[unsafe(no_mangle)]
pub extern "C" fn printArrayOfGriddedField2(handle: u64) {
    print(NodeKind::ArrayOf(ClassKind::GriddedField2), handle)
}

/// # Safety
///
/// `path` must be NULL or a valid null-terminated string.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn xmlreadArrayOfGriddedField2(handle: u64, path: *const c_char) -> c_long {
    unsafe { xmlread(NodeKind::ArrayOf(ClassKind::GriddedField2), handle, path) }
}

/// # Safety
///
/// `path` must be NULL or a valid null-terminated string.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn xmlsaveArrayOfGriddedField2(
    handle: u64,
    path: *const c_char,
    filetype: c_long,
    no_clobber: c_long,
) -> c_long {
    unsafe { xmlsave(NodeKind::ArrayOf(ClassKind::GriddedField2), handle, path, filetype, no_clobber) }
}

#[unsafe(no_mangle)]
pub extern "C" fn sizeArrayOfGriddedField2(handle: u64) -> c_long {
    size(ClassKind::GriddedField2, handle)
}

#[unsafe(no_mangle)]
pub extern "C" fn resizeArrayOfGriddedField2(handle: u64, len: c_long) -> c_long {
    resize(ClassKind::GriddedField2, handle, len)
}

#[unsafe(no_mangle)]
pub extern "C" fn getelemArrayOfGriddedField2(handle: u64, index: c_long) -> u64 {
    getelem(ClassKind::GriddedField2, handle, index)
}

// ArrayOfXsecRecord

/// Create a new empty ArrayOfXsecRecord.
#[unsafe(no_mangle)]
pub extern "C" fn createArrayOfXsecRecord() -> u64 {
    create(NodeKind::ArrayOf(ClassKind::XsecRecord))
}

#[unsafe(no_mangle)]
pub extern "C" fn deleteArrayOfXsecRecord(handle: u64) {
    delete(NodeKind::ArrayOf(ClassKind::XsecRecord), handle)
}

#[unsafe(no_mangle)]
pub extern "C" fn printArrayOfXsecRecord(handle: u64) {
    print(NodeKind::ArrayOf(ClassKind::XsecRecord), handle)
}

/// # Safety
///
/// `path` must be NULL or a valid null-terminated string.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn xmlreadArrayOfXsecRecord(handle: u64, path: *const c_char) -> c_long {
    unsafe { xmlread(NodeKind::ArrayOf(ClassKind::XsecRecord), handle, path) }
}

/// # Safety
///
/// `path` must be NULL or a valid null-terminated string.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn xmlsaveArrayOfXsecRecord(
    handle: u64,
    path: *const c_char,
    filetype: c_long,
    no_clobber: c_long,
) -> c_long {
    unsafe { xmlsave(NodeKind::ArrayOf(ClassKind::XsecRecord), handle, path, filetype, no_clobber) }
}

#[unsafe(no_mangle)]
pub extern "C" fn sizeArrayOfXsecRecord(handle: u64) -> c_long {
    size(ClassKind::XsecRecord, handle)
}

#[unsafe(no_mangle)]
pub extern "C" fn resizeArrayOfXsecRecord(handle: u64, len: c_long) -> c_long {
    resize(ClassKind::XsecRecord, handle, len)
}

#[unsafe(no_mangle)]
pub extern "C" fn getelemArrayOfXsecRecord(handle: u64, index: c_long) -> u64 {
    getelem(ClassKind::XsecRecord, handle, index)
}
