//! The C surface driven the way a foreign caller would.

use std::ffi::{CStr, CString};

use arts::native::Species;
use arts::*;
use libc::c_long;
use pretty_assertions::assert_eq;

fn last_message() -> String {
    let ptr = arts_last_error_message();
    assert!(!ptr.is_null());
    let text = unsafe { CStr::from_ptr(ptr) }.to_str().unwrap().to_owned();
    unsafe { arts_string_free(ptr) };
    text
}

#[test]
fn xsec_record_save_and_load() {
    let dir = tempfile::tempdir().unwrap();
    let path = CString::new(dir.path().join("t.xml").to_str().unwrap()).unwrap();

    let x = createXsecRecord();
    assert_eq!(setVersionXsecRecord(x, 3), 0);
    assert_eq!(setSpeciesXsecRecord(x, Species::Ozone.code() as c_long), 0);
    let coeffs = getFitCoeffsXsecRecord(x);
    assert_eq!(resizeArrayOfGriddedField2(coeffs, 1), 0);

    assert_eq!(unsafe { xmlsaveXsecRecord(x, path.as_ptr(), 0, 0) }, 0);
    assert_eq!(
        unsafe { xmlsaveXsecRecord(x, path.as_ptr(), 0, 1) },
        ArtsStatus::FileFailure.code()
    );

    let y = createXsecRecord();
    assert_eq!(unsafe { xmlreadXsecRecord(y, path.as_ptr()) }, 0);
    assert_eq!(getVersionXsecRecord(y), 3);
    assert_eq!(getSpeciesXsecRecord(y), Species::Ozone.code() as c_long);
    assert_eq!(sizeArrayOfGriddedField2(getFitCoeffsXsecRecord(y)), 1);

    deleteXsecRecord(x);
    deleteXsecRecord(y);
    assert!(!arts_is_valid(coeffs));
}

#[test]
fn vector_buffers() {
    let v = createVector();
    let data = [0.5, 1.5, 2.5];
    assert_eq!(unsafe { setDataVector(v, data.as_ptr(), 3) }, 0);
    assert_eq!(nelemGetVector(v), 3);

    let mut out = [0.0; 3];
    assert_eq!(unsafe { getDataVector(v, out.as_mut_ptr(), 3) }, 0);
    assert_eq!(out, data);

    assert_eq!(
        unsafe { setDataVector(v, std::ptr::null(), 2) },
        ArtsStatus::NullPointer.code()
    );
    assert_eq!(unsafe { setDataVector(v, std::ptr::null(), 0) }, 0);
    assert_eq!(nelemGetVector(v), 0);
    deleteVector(v);
}

#[test]
fn matrix_shape_is_checked() {
    let m = createMatrix();
    let data = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0];
    assert_eq!(unsafe { setDataMatrix(m, data.as_ptr(), 2, 3) }, 0);
    assert_eq!(rowsMatrix(m), 2);
    assert_eq!(colsMatrix(m), 3);
    assert_eq!(
        unsafe { setDataMatrix(m, data.as_ptr(), -1, 3) },
        ArtsStatus::InvalidArgument.code()
    );
    deleteMatrix(m);
}

#[test]
fn strings_cross_the_boundary() {
    let s = createString();
    let value = CString::new("CFC11").unwrap();
    assert_eq!(unsafe { setString(s, value.as_ptr()) }, 0);

    let out = getString(s);
    assert_eq!(unsafe { CStr::from_ptr(out) }.to_str().unwrap(), "CFC11");
    unsafe { arts_string_free(out) };

    let bad = [0xc3u8, 0x28, 0x00];
    assert_eq!(
        unsafe { setString(s, bad.as_ptr() as *const _) },
        ArtsStatus::InvalidUtf8.code()
    );
    deleteString(s);
}

#[test]
fn views_and_stale_handles() {
    let gf = createGriddedField2();
    let grid = getGridGriddedField2(gf, 0);
    assert_ne!(grid, NULL_HANDLE);
    assert!(arts_is_valid(grid));

    deleteVector(grid);
    assert_eq!(arts_last_error_code(), ArtsStatus::NotRoot.code());
    assert!(arts_is_valid(grid));

    assert_eq!(getGridGriddedField2(gf, 2), NULL_HANDLE);
    assert_eq!(arts_last_error_code(), ArtsStatus::IndexOutOfRange.code());

    deleteGriddedField2(gf);
    assert!(!arts_is_valid(grid));
    assert_eq!(nelemGetVector(grid), 0);
    assert_eq!(arts_last_error_code(), ArtsStatus::InvalidHandle.code());
    assert!(last_message().contains("invalid or released handle"));
}

#[test]
fn wrong_class_is_reported() {
    let i = createIndex();
    assert!(getNumeric(i).is_nan());
    assert_eq!(arts_last_error_code(), ArtsStatus::KindMismatch.code());
    assert_eq!(unsafe { CStr::from_ptr(arts_kind(i)) }.to_str().unwrap(), "Index");

    let n = createNumeric();
    assert_eq!(arts_copy(n, i), ArtsStatus::KindMismatch.code());
    deleteIndex(i);
    deleteNumeric(n);
}

#[test]
fn arrays_of_every_class() {
    let a = createArrayOfIndex();
    assert_eq!(resizeArrayOfIndex(a, 2), 0);
    assert_eq!(setIndex(getelemArrayOfIndex(a, 1), 11), 0);
    assert_eq!(getIndex(getelemArrayOfIndex(a, 1)), 11);
    assert_eq!(getelemArrayOfIndex(a, 2), NULL_HANDLE);
    assert_eq!(resizeArrayOfIndex(a, -1), ArtsStatus::InvalidArgument.code());
    deleteArrayOfIndex(a);

    let records = createArrayOfXsecRecord();
    assert_eq!(resizeArrayOfXsecRecord(records, 1), 0);
    let record = getelemArrayOfXsecRecord(records, 0);
    assert_eq!(getVersionXsecRecord(record), 2);
    deleteArrayOfXsecRecord(records);
    assert!(!arts_is_valid(record));
}

#[test]
fn handles_adopted_by_wrappers() {
    let raw = createVector();
    let data = [4.0];
    assert_eq!(unsafe { setDataVector(raw, data.as_ptr(), 1) }, 0);

    let v = classes::Vector::adopt(raw).unwrap();
    assert_eq!(v.values().unwrap(), vec![4.0]);
    assert!(matches!(
        classes::Vector::adopt(raw),
        Err(ClassError::Native(NativeError::AlreadyOwned(_)))
    ));
    assert_eq!(NativeError::AlreadyOwned(raw).status(), ArtsStatus::InvalidArgument);
    drop(v);
    assert!(!arts_is_valid(raw));
}
