//! The native side of the bindings.
//!
//! Every object lives in one process-wide [`Store`] behind a mutex. The
//! functions here take the lock for the duration of a single operation, so
//! calls from several threads are serialised rather than racing.

mod data;
mod kind;
mod species;
mod store;
mod text;
pub mod xml;

use std::path::{Path, PathBuf};
use std::sync::Mutex;

pub use data::{Data, GriddedField2Data, Matrix, XSEC_RECORD_VERSION, XsecRecordData};
pub use kind::{ClassKind, NodeKind};
pub use species::Species;
pub use store::XsecField;
pub use xml::FileFormat;

use crate::error::NativeError;
use crate::handle::RawHandle;
use store::Store;

static STORE: Mutex<Store> = Mutex::new(Store::new());

fn with_store<R>(f: impl FnOnce(&mut Store) -> Result<R, NativeError>) -> Result<R, NativeError> {
    let mut store = STORE.lock().map_err(|_| NativeError::Poisoned)?;
    f(&mut store)
}

// Lifecycle.

/// Allocate a default-initialised root object.
pub fn create(kind: NodeKind) -> Result<RawHandle, NativeError> {
    with_store(|store| Ok(store.alloc(kind, None)))
}

/// Allocate a root object already claimed by its caller.
pub fn create_owned(kind: NodeKind) -> Result<RawHandle, NativeError> {
    with_store(|store| {
        let handle = store.alloc(kind, None);
        store.claim(handle)?;
        Ok(handle)
    })
}

/// Record that a Rust owner has taken `handle`. Fails for fields and for
/// roots that already have an owner.
pub fn claim(handle: RawHandle) -> Result<(), NativeError> {
    with_store(|store| store.claim(handle))
}

/// Drop the ownership mark set by [`claim`] or [`create_owned`].
pub fn disown(handle: RawHandle) -> Result<(), NativeError> {
    with_store(|store| store.disown(handle))
}

/// Release a root object and all of its fields.
pub fn delete(handle: RawHandle) -> Result<(), NativeError> {
    with_store(|store| store.delete(handle))
}

pub fn kind_of(handle: RawHandle) -> Result<NodeKind, NativeError> {
    with_store(|store| store.kind(handle))
}

// Whole values.

pub fn snapshot(handle: RawHandle) -> Result<Data, NativeError> {
    with_store(|store| store.snapshot(handle))
}

pub fn assign(handle: RawHandle, data: Data) -> Result<(), NativeError> {
    with_store(|store| store.assign(handle, data))
}

/// Copy the contents of `src` into `dst`. Both must be of the same class.
pub fn copy(dst: RawHandle, src: RawHandle) -> Result<(), NativeError> {
    with_store(|store| {
        let data = store.snapshot(src)?;
        store.assign(dst, data)
    })
}

/// Human-readable dump of an object.
pub fn render(handle: RawHandle) -> Result<String, NativeError> {
    snapshot(handle).map(|data| data.to_string())
}

/// Write the dump of an object to stdout.
pub fn print(handle: RawHandle) -> Result<(), NativeError> {
    let text = render(handle)?;
    println!("{text}");
    Ok(())
}

/// JSON form of an object's whole value tree.
pub fn to_json(handle: RawHandle) -> Result<String, NativeError> {
    let data = snapshot(handle)?;
    serde_json::to_string(&data).map_err(|e| NativeError::InvalidArgument(e.to_string()))
}

// XML files.

/// Load the file at `path` into an existing object.
///
/// The file must hold a value of the object's class. Every failure is
/// reported as a file error.
pub fn read_xml(handle: RawHandle, path: &Path) -> Result<(), NativeError> {
    let expected = kind_of(handle)?;
    let data = xml::read(path)?;
    if data.kind() != expected {
        return Err(NativeError::file(
            path,
            format!("file holds {}, expected {expected}", data.kind()),
        ));
    }
    assign(handle, data)
}

/// Save an object and return the path actually written.
pub fn save_xml(
    handle: RawHandle,
    path: &Path,
    format: FileFormat,
    clobber: bool,
) -> Result<PathBuf, NativeError> {
    let data = snapshot(handle)?;
    xml::save(&data, path, format, clobber)
}

// Leaf classes.

pub fn index(handle: RawHandle) -> Result<i64, NativeError> {
    with_store(|store| store.index(handle))
}

pub fn set_index(handle: RawHandle, value: i64) -> Result<(), NativeError> {
    with_store(|store| store.set_index(handle, value))
}

pub fn numeric(handle: RawHandle) -> Result<f64, NativeError> {
    with_store(|store| store.numeric(handle))
}

pub fn set_numeric(handle: RawHandle, value: f64) -> Result<(), NativeError> {
    with_store(|store| store.set_numeric(handle, value))
}

pub fn string(handle: RawHandle) -> Result<String, NativeError> {
    with_store(|store| store.string(handle).map(str::to_owned))
}

pub fn set_string(handle: RawHandle, value: String) -> Result<(), NativeError> {
    with_store(|store| store.set_string(handle, value))
}

pub fn vector(handle: RawHandle) -> Result<Vec<f64>, NativeError> {
    with_store(|store| store.vector(handle).map(<[f64]>::to_vec))
}

/// Run `f` on the elements of a vector without copying them out of the store.
pub fn with_vector<R>(handle: RawHandle, f: impl FnOnce(&[f64]) -> R) -> Result<R, NativeError> {
    with_store(|store| store.vector(handle).map(f))
}

pub fn set_vector(handle: RawHandle, values: Vec<f64>) -> Result<(), NativeError> {
    with_store(|store| store.set_vector(handle, values))
}

pub fn matrix(handle: RawHandle) -> Result<Matrix, NativeError> {
    with_store(|store| store.matrix(handle).cloned())
}

/// Run `f` on a matrix without copying it out of the store.
pub fn with_matrix<R>(handle: RawHandle, f: impl FnOnce(&Matrix) -> R) -> Result<R, NativeError> {
    with_store(|store| store.matrix(handle).map(f))
}

pub fn set_matrix(handle: RawHandle, value: Matrix) -> Result<(), NativeError> {
    with_store(|store| store.set_matrix(handle, value))
}

// GriddedField2.

pub fn gridded_field_name(handle: RawHandle) -> Result<String, NativeError> {
    with_store(|store| store.gridded_field_name(handle).map(str::to_owned))
}

pub fn set_gridded_field_name(handle: RawHandle, name: String) -> Result<(), NativeError> {
    with_store(|store| store.set_gridded_field_name(handle, name))
}

pub fn grid_name(handle: RawHandle, dim: usize) -> Result<String, NativeError> {
    with_store(|store| store.grid_name(handle, dim).map(str::to_owned))
}

pub fn set_grid_name(handle: RawHandle, dim: usize, name: String) -> Result<(), NativeError> {
    with_store(|store| store.set_grid_name(handle, dim, name))
}

/// Vector node holding grid `dim` (0 or 1).
pub fn grid(handle: RawHandle, dim: usize) -> Result<RawHandle, NativeError> {
    with_store(|store| store.grid(handle, dim))
}

/// Matrix node holding the field data.
pub fn gridded_field_data(handle: RawHandle) -> Result<RawHandle, NativeError> {
    with_store(|store| store.gridded_field_data(handle))
}

// XsecRecord.

pub fn version(handle: RawHandle) -> Result<i64, NativeError> {
    with_store(|store| store.version(handle))
}

pub fn set_version(handle: RawHandle, version: i64) -> Result<(), NativeError> {
    with_store(|store| store.set_version(handle, version))
}

pub fn species(handle: RawHandle) -> Result<Species, NativeError> {
    with_store(|store| store.species(handle))
}

pub fn set_species(handle: RawHandle, species: Species) -> Result<(), NativeError> {
    with_store(|store| store.set_species(handle, species))
}

pub fn xsec_field(handle: RawHandle, field: XsecField) -> Result<RawHandle, NativeError> {
    with_store(|store| store.xsec_field(handle, field))
}

// Arrays.

pub fn array_len(handle: RawHandle, element: ClassKind) -> Result<usize, NativeError> {
    with_store(|store| store.array_len(handle, element))
}

/// Borrowed handle of element `index`.
pub fn array_elem(handle: RawHandle, element: ClassKind, index: usize) -> Result<RawHandle, NativeError> {
    with_store(|store| store.array_elem(handle, element, index))
}

/// Resize an array. Handles of dropped elements become invalid.
pub fn array_resize(handle: RawHandle, element: ClassKind, len: usize) -> Result<(), NativeError> {
    with_store(|store| store.array_resize(handle, element, len))
}

/// Append a default element and return its handle.
pub fn array_push(handle: RawHandle, element: ClassKind) -> Result<RawHandle, NativeError> {
    with_store(|store| {
        let len = store.array_len(handle, element)?;
        store.array_resize(handle, element, len + 1)?;
        store.array_elem(handle, element, len)
    })
}
