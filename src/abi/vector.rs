//! Vector and Matrix.
//!
//! Element data crosses the boundary by copy: the caller passes a buffer and
//! its capacity in elements, or a pointer to the values to store.

use libc::{c_char, c_long};

use super::{create, delete, print, to_c_long, to_usize, xmlread, xmlsave};
use crate::error::NativeError;
use crate::native::{self, ClassKind, Matrix, NodeKind};
use crate::util::ArgumentError;

const VECTOR: NodeKind = NodeKind::Class(ClassKind::Vector);
const MATRIX: NodeKind = NodeKind::Class(ClassKind::Matrix);

/// Copy `values` into a caller buffer of `capacity` elements.
///
/// # Safety
///
/// `out` must be NULL or valid for writes of `capacity` doubles.
unsafe fn copy_out(values: &[f64], out: *mut f64, capacity: c_long) -> Result<(), super::AbiError> {
    let capacity = to_usize(capacity, "capacity")?;
    if values.len() > capacity {
        return Err(NativeError::InvalidArgument(format!(
            "buffer holds {capacity} values, {} needed",
            values.len()
        ))
        .into());
    }
    if values.is_empty() {
        return Ok(());
    }
    if out.is_null() {
        return Err(ArgumentError::NullPointer("out").into());
    }
    unsafe { std::ptr::copy_nonoverlapping(values.as_ptr(), out, values.len()) };
    Ok(())
}

/// Read `len` values from a caller pointer. NULL is accepted when `len` is 0.
///
/// # Safety
///
/// `data` must be NULL or valid for reads of `len` doubles.
unsafe fn copy_in(data: *const f64, len: usize) -> Result<Vec<f64>, ArgumentError> {
    if len == 0 {
        return Ok(Vec::new());
    }
    if data.is_null() {
        return Err(ArgumentError::NullPointer("data"));
    }
    Ok(unsafe { std::slice::from_raw_parts(data, len) }.to_vec())
}

// Vector

/// Create a new empty Vector.
///
/// # Ownership
///
/// Caller owns the returned handle. Must call `deleteVector()` to free.
#[unsafe(no_mangle)]
pub extern "C" fn createVector() -> u64 {
    create(VECTOR)
}

#[unsafe(no_mangle)]
pub extern "C" fn deleteVector(handle: u64) {
    delete(VECTOR, handle)
}

#[unsafe(no_mangle)]
pub extern "C" fn printVector(handle: u64) {
    print(VECTOR, handle)
}

/// # Safety
///
/// `path` must be NULL or a valid null-terminated string.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn xmlreadVector(handle: u64, path: *const c_char) -> c_long {
    unsafe { xmlread(VECTOR, handle, path) }
}

/// # Safety
///
/// `path` must be NULL or a valid null-terminated string.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn xmlsaveVector(
    handle: u64,
    path: *const c_char,
    filetype: c_long,
    no_clobber: c_long,
) -> c_long {
    unsafe { xmlsave(VECTOR, handle, path, filetype, no_clobber) }
}

/// Number of elements, 0 on failure.
#[unsafe(no_mangle)]
pub extern "C" fn nelemGetVector(handle: u64) -> c_long {
    ffi_guard!(0, { Ok(native::with_vector(handle, |v| to_c_long(v.len()))?) })
}

/// Copy the elements of a Vector into `out`.
///
/// Fails with `InvalidArgument` if `capacity` is smaller than the vector.
///
/// # Safety
///
/// `out` must be NULL or valid for writes of `capacity` doubles.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn getDataVector(handle: u64, out: *mut f64, capacity: c_long) -> c_long {
    ffi_status!({
        let values = native::vector(handle)?;
        unsafe { copy_out(&values, out, capacity) }
    })
}

/// Replace the elements of a Vector with `len` values read from `data`.
///
/// # Safety
///
/// `data` must be NULL or valid for reads of `len` doubles.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn setDataVector(handle: u64, data: *const f64, len: c_long) -> c_long {
    ffi_status!({
        let len = to_usize(len, "len")?;
        let values = unsafe { copy_in(data, len) }?;
        Ok(native::set_vector(handle, values)?)
    })
}

// Matrix

/// Create a new 0x0 Matrix.
///
/// # Ownership
///
/// Caller owns the returned handle. Must call `deleteMatrix()` to free.
#[unsafe(no_mangle)]
pub extern "C" fn createMatrix() -> u64 {
    create(MATRIX)
}

#[unsafe(no_mangle)]
pub extern "C" fn deleteMatrix(handle: u64) {
    delete(MATRIX, handle)
}

#[unsafe(no_mangle)]
pub extern "C" fn printMatrix(handle: u64) {
    print(MATRIX, handle)
}

/// # Safety
///
/// `path` must be NULL or a valid null-terminated string.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn xmlreadMatrix(handle: u64, path: *const c_char) -> c_long {
    unsafe { xmlread(MATRIX, handle, path) }
}

/// # Safety
///
/// `path` must be NULL or a valid null-terminated string.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn xmlsaveMatrix(
    handle: u64,
    path: *const c_char,
    filetype: c_long,
    no_clobber: c_long,
) -> c_long {
    unsafe { xmlsave(MATRIX, handle, path, filetype, no_clobber) }
}

#[unsafe(no_mangle)]
pub extern "C" fn rowsMatrix(handle: u64) -> c_long {
    ffi_guard!(0, { Ok(native::with_matrix(handle, |m| to_c_long(m.nrows()))?) })
}

#[unsafe(no_mangle)]
pub extern "C" fn colsMatrix(handle: u64) -> c_long {
    ffi_guard!(0, { Ok(native::with_matrix(handle, |m| to_c_long(m.ncols()))?) })
}

/// Copy the elements of a Matrix, row-major, into `out`.
///
/// # Safety
///
/// `out` must be NULL or valid for writes of `capacity` doubles.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn getDataMatrix(handle: u64, out: *mut f64, capacity: c_long) -> c_long {
    ffi_status!({
        let matrix = native::matrix(handle)?;
        unsafe { copy_out(matrix.data(), out, capacity) }
    })
}

/// Replace a Matrix with `nrows * ncols` row-major values read from `data`.
///
/// # Safety
///
/// `data` must be NULL or valid for reads of `nrows * ncols` doubles.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn setDataMatrix(
    handle: u64,
    data: *const f64,
    nrows: c_long,
    ncols: c_long,
) -> c_long {
    ffi_status!({
        let nrows = to_usize(nrows, "nrows")?;
        let ncols = to_usize(ncols, "ncols")?;
        let len = nrows.checked_mul(ncols).ok_or_else(|| {
            NativeError::InvalidArgument(format!("matrix shape {nrows}x{ncols} overflows"))
        })?;
        let values = unsafe { copy_in(data, len) }?;
        Ok(native::set_matrix(handle, Matrix::new(nrows, ncols, values)?)?)
    })
}
