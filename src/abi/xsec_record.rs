//! XsecRecord.
//!
//! The four fit-bound vectors and the coefficient array are fields of the
//! record. The `get*` functions return borrowed handles to them.

use libc::{c_char, c_long};

use super::{create, delete, print, xmlread, xmlsave};
use crate::handle::NULL_HANDLE;
use crate::native::{self, ClassKind, NodeKind, Species, XsecField};

const XSEC_RECORD: NodeKind = NodeKind::Class(ClassKind::XsecRecord);

/// Create a new XsecRecord with the default version and species.
///
/// # Ownership
///
/// Caller owns the returned handle. Must call `deleteXsecRecord()` to free.
#[unsafe(no_mangle)]
pub extern "C" fn createXsecRecord() -> u64 {
    create(XSEC_RECORD)
}

/// Release a record and all of its fields.
///
/// Handles previously returned by the `get*XsecRecord` functions become
/// invalid.
#[unsafe(no_mangle)]
pub extern "C" fn deleteXsecRecord(handle: u64) {
    delete(XSEC_RECORD, handle)
}

#[unsafe(no_mangle)]
pub extern "C" fn printXsecRecord(handle: u64) {
    print(XSEC_RECORD, handle)
}

/// Load a record from an XML file.
///
/// # Returns
///
/// 0 on success, nonzero on failure.
///
/// # Safety
///
/// `path` must be NULL or a valid null-terminated string.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn xmlreadXsecRecord(handle: u64, path: *const c_char) -> c_long {
    unsafe { xmlread(XSEC_RECORD, handle, path) }
}

/// Save a record to an XML file.
///
/// # Parameters
///
/// - `filetype`: 0 ascii, 1 zipped ascii, 2 binary
/// - `no_clobber`: nonzero to fail if the file exists
///
/// # Returns
///
/// 0 on success, nonzero on failure.
///
/// # Safety
///
/// `path` must be NULL or a valid null-terminated string.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn xmlsaveXsecRecord(
    handle: u64,
    path: *const c_char,
    filetype: c_long,
    no_clobber: c_long,
) -> c_long {
    unsafe { xmlsave(XSEC_RECORD, handle, path, filetype, no_clobber) }
}

#[unsafe(no_mangle)]
pub extern "C" fn getVersionXsecRecord(handle: u64) -> c_long {
    ffi_guard!(0, {
        let version = native::version(handle)?;
        Ok(c_long::try_from(version).unwrap_or(c_long::MAX))
    })
}

#[unsafe(no_mangle)]
pub extern "C" fn setVersionXsecRecord(handle: u64, version: c_long) -> c_long {
    ffi_status!({ Ok(native::set_version(handle, i64::from(version))?) })
}

/// Species code of the record, 0 on failure.
#[unsafe(no_mangle)]
pub extern "C" fn getSpeciesXsecRecord(handle: u64) -> c_long {
    ffi_guard!(0, {
        let code = native::species(handle)?.code();
        Ok(c_long::try_from(code).unwrap_or(0))
    })
}

/// Set the species by code. Unknown codes fail with `InvalidArgument`.
#[unsafe(no_mangle)]
pub extern "C" fn setSpeciesXsecRecord(handle: u64, species: c_long) -> c_long {
    ffi_status!({
        let species = Species::from_code(i64::from(species))?;
        Ok(native::set_species(handle, species)?)
    })
}

fn field(handle: u64, field: XsecField) -> u64 {
    ffi_guard!(NULL_HANDLE, { Ok(native::xsec_field(handle, field)?) })
}

/// Borrowed Vector handle, 0 on failure.
#[unsafe(no_mangle)]
pub extern "C" fn getFitMinPressuresXsecRecord(handle: u64) -> u64 {
    field(handle, XsecField::FitMinPressures)
}

/// Borrowed Vector handle, 0 on failure.
#[unsafe(no_mangle)]
pub extern "C" fn getFitMaxPressuresXsecRecord(handle: u64) -> u64 {
    field(handle, XsecField::FitMaxPressures)
}

/// Borrowed Vector handle, 0 on failure.
#[unsafe(no_mangle)]
pub extern "C" fn getFitMinTemperaturesXsecRecord(handle: u64) -> u64 {
    field(handle, XsecField::FitMinTemperatures)
}

/// Borrowed Vector handle, 0 on failure.
#[unsafe(no_mangle)]
pub extern "C" fn getFitMaxTemperaturesXsecRecord(handle: u64) -> u64 {
    field(handle, XsecField::FitMaxTemperatures)
}

/// Borrowed ArrayOfGriddedField2 handle, 0 on failure.
#[unsafe(no_mangle)]
pub extern "C" fn getFitCoeffsXsecRecord(handle: u64) -> u64 {
    field(handle, XsecField::FitCoeffs)
}
