//! Safe Rust wrappers over native objects.
//!
//! Every wrapper holds one [`Handle`]. Wrappers made with
//! [`ArtsClass::new`] own their object and release it on drop; wrappers
//! handed out by field getters and array element access are borrowed views
//! and never release anything.
//!
//! Views carry no lifetime. A view that outlives its owner, or an array
//! element dropped by a resize, refers to a released handle: every operation
//! on it then fails with an invalid-handle error instead of reaching freed
//! memory.
//!
//! ```
//! use arts::classes::{ArtsClass, XsecRecord};
//!
//! let x = XsecRecord::new()?;
//! x.set_version(3)?;
//! x.fit_min_pressures()?.set_values(&[100.0, 200.0])?;
//!
//! let y = XsecRecord::new()?;
//! y.set(&x)?;
//! assert_eq!(x, y);
//! # Ok::<(), arts::ClassError>(())
//! ```

use std::fmt;
use std::path::{Path, PathBuf};

use crate::error::ClassResult;
use crate::handle::RawHandle;
use crate::native::{self, ClassKind, NodeKind};

/// Implements [`HandleWrapped`], [`ArtsElement`], `PartialEq`, `Display` and
/// `Debug` for a single-handle wrapper struct.
macro_rules! wrapper {
    ($ty:ident, $class:ident) => {
        impl $crate::classes::HandleWrapped for $ty {
            fn handle(&self) -> &$crate::classes::Handle {
                &self.handle
            }

            fn from_handle(handle: $crate::classes::Handle) -> Self {
                Self { handle }
            }

            fn into_handle(self) -> $crate::classes::Handle {
                self.handle
            }
        }

        impl $crate::classes::ArtsElement for $ty {
            const CLASS: $crate::native::ClassKind = $crate::native::ClassKind::$class;
        }

        impl PartialEq for $ty {
            fn eq(&self, other: &Self) -> bool {
                $crate::classes::ArtsClass::equals(self, other).unwrap_or(false)
            }
        }

        impl ::std::fmt::Display for $ty {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                $crate::classes::display(self, f)
            }
        }

        impl ::std::fmt::Debug for $ty {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.debug_struct(stringify!($ty))
                    .field("handle", &self.handle)
                    .finish()
            }
        }
    };
}

mod array;
mod basic;
mod gridded_field;
mod io;
mod vector;
mod xsec_record;

pub use array::{
    ArrayOf, ArrayOfGriddedField2, ArrayOfIndex, ArrayOfMatrix, ArrayOfNumeric, ArrayOfString,
    ArrayOfVector, ArrayOfXsecRecord,
};
pub use basic::{ArtsString, Index, Numeric};
pub use gridded_field::GriddedField2;
pub use io::SaveOptions;
pub use vector::{Matrix, Vector};
pub use xsec_record::XsecRecord;

/// A native object handle together with its ownership flag.
///
/// The flag is fixed at construction. An owning handle deletes its object
/// exactly once, when dropped; a borrowed one never does.
pub struct Handle {
    raw: RawHandle,
    owned: bool,
}

impl Handle {
    fn create(kind: NodeKind) -> ClassResult<Self> {
        Ok(Self {
            raw: native::create_owned(kind)?,
            owned: true,
        })
    }

    fn borrowed(raw: RawHandle) -> Self {
        Self { raw, owned: false }
    }

    pub fn raw(&self) -> RawHandle {
        self.raw
    }

    pub fn is_owner(&self) -> bool {
        self.owned
    }

    /// Give up ownership and return the raw handle.
    ///
    /// The caller becomes responsible for deleting the object, e.g. with the
    /// matching `delete*` C function.
    pub fn into_raw(self) -> RawHandle {
        let raw = self.raw;
        if self.owned {
            // a stale handle has nothing left to disown
            let _ = native::disown(raw);
        }
        std::mem::forget(self);
        raw
    }
}

impl Drop for Handle {
    fn drop(&mut self) {
        if self.owned {
            // A failure here means the object is already gone.
            let _ = native::delete(self.raw);
        }
    }
}

impl fmt::Debug for Handle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Handle")
            .field("raw", &format_args!("{:#x}", self.raw))
            .field("owned", &self.owned)
            .finish()
    }
}

/// Access to the handle inside a wrapper.
pub trait HandleWrapped: Sized {
    fn handle(&self) -> &Handle;

    #[doc(hidden)]
    fn from_handle(handle: Handle) -> Self;

    #[doc(hidden)]
    fn into_handle(self) -> Handle;
}

/// Operations shared by every wrapped class.
pub trait ArtsClass: HandleWrapped {
    /// Native class of the wrapped object.
    const KIND: NodeKind;

    /// Copy every field of `other` into `self`.
    ///
    /// Compound fields are copied through their views; no handle of `self`
    /// changes.
    fn set(&self, other: &Self) -> ClassResult<()>;

    /// Field-by-field equality.
    fn equals(&self, other: &Self) -> ClassResult<bool>;

    /// New default-initialised object owned by the returned wrapper.
    fn new() -> ClassResult<Self> {
        Handle::create(Self::KIND).map(Self::from_handle)
    }

    /// Borrowed view of an existing object. Fails if the handle is invalid
    /// or refers to another class.
    fn from_raw(raw: RawHandle) -> ClassResult<Self> {
        let found = native::kind_of(raw)?;
        if found != Self::KIND {
            return Err(crate::error::NativeError::KindMismatch {
                expected: Self::KIND,
                found,
            }
            .into());
        }
        Ok(Self::from_handle(Handle::borrowed(raw)))
    }

    /// Take ownership of a root object, typically one released with
    /// [`ArtsClass::into_raw`]. Fields of other objects cannot be adopted,
    /// and neither can a root that already has an owner.
    fn adopt(raw: RawHandle) -> ClassResult<Self> {
        Self::from_raw(raw)?;
        native::claim(raw)?;
        Ok(Self::from_handle(Handle { raw, owned: true }))
    }

    fn raw(&self) -> RawHandle {
        self.handle().raw()
    }

    fn is_owner(&self) -> bool {
        self.handle().is_owner()
    }

    /// Release ownership and return the raw handle.
    fn into_raw(self) -> RawHandle {
        self.into_handle().into_raw()
    }

    fn class_name(&self) -> &'static str {
        Self::KIND.name()
    }

    /// Write the native dump of the object to stdout.
    fn print(&self) -> ClassResult<()> {
        Ok(native::print(self.raw())?)
    }

    /// The native dump as a string.
    fn render(&self) -> ClassResult<String> {
        Ok(native::render(self.raw())?)
    }

    fn to_json(&self) -> ClassResult<String> {
        Ok(native::to_json(self.raw())?)
    }

    /// Load the contents of an XML file into this object.
    fn readxml(&self, path: impl AsRef<Path>) -> ClassResult<()> {
        Ok(native::read_xml(self.raw(), path.as_ref())?)
    }

    /// Save to an XML file and return the path written.
    fn savexml(&self, path: impl AsRef<Path>, options: SaveOptions) -> ClassResult<PathBuf> {
        Ok(native::save_xml(
            self.raw(),
            path.as_ref(),
            options.format,
            options.clobber,
        )?)
    }
}

/// Classes that can be stored in an [`ArrayOf`].
pub trait ArtsElement: ArtsClass {
    const CLASS: ClassKind;
}

/// Shared `Display` body: the native dump, or a marker for a dead handle.
pub(crate) fn display<T: ArtsClass>(value: &T, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match value.render() {
        Ok(text) => f.write_str(&text),
        Err(e) => write!(f, "<{}: {e}>", T::KIND),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ClassError, NativeError};

    #[test]
    fn owner_releases_on_drop() {
        let v = Vector::new().unwrap();
        let raw = v.raw();
        assert!(v.is_owner());
        drop(v);
        assert!(native::kind_of(raw).is_err());
    }

    #[test]
    fn view_does_not_release() {
        let v = Vector::new().unwrap();
        let view = Vector::from_raw(v.raw()).unwrap();
        assert!(!view.is_owner());
        drop(view);
        assert!(native::kind_of(v.raw()).is_ok());
    }

    #[test]
    fn from_raw_checks_class() {
        let v = Vector::new().unwrap();
        assert!(matches!(
            Matrix::from_raw(v.raw()),
            Err(ClassError::Type { .. })
        ));
        assert!(matches!(
            Vector::from_raw(crate::NULL_HANDLE),
            Err(ClassError::Native(NativeError::InvalidHandle(_)))
        ));
    }

    #[test]
    fn into_raw_and_adopt() {
        let v = Vector::new().unwrap();
        v.set_values(&[1.0]).unwrap();
        let raw = v.into_raw();
        assert!(native::kind_of(raw).is_ok());

        let back = Vector::adopt(raw).unwrap();
        assert!(back.is_owner());
        assert_eq!(back.values().unwrap(), vec![1.0]);
        drop(back);
        assert!(native::kind_of(raw).is_err());
    }

    #[test]
    fn fields_cannot_be_adopted() {
        let x = XsecRecord::new().unwrap();
        let raw = x.fit_min_pressures().unwrap().raw();
        assert!(matches!(
            Vector::adopt(raw),
            Err(ClassError::Native(NativeError::NotRoot(_)))
        ));
    }

    #[test]
    fn owned_handle_cannot_be_adopted_twice() {
        let v = Vector::new().unwrap();
        v.set_values(&[2.0]).unwrap();
        assert!(matches!(
            Vector::adopt(v.raw()),
            Err(ClassError::Native(NativeError::AlreadyOwned(_)))
        ));
        assert_eq!(v.values().unwrap(), vec![2.0]);

        let raw = v.into_raw();
        let first = Vector::adopt(raw).unwrap();
        assert!(matches!(
            Vector::adopt(raw),
            Err(ClassError::Native(NativeError::AlreadyOwned(_)))
        ));
        drop(first);
        assert!(native::kind_of(raw).is_err());
    }

    #[test]
    fn display_of_dead_view() {
        let v = Vector::new().unwrap();
        let view = Vector::from_raw(v.raw()).unwrap();
        drop(v);
        assert!(view.to_string().starts_with("<Vector: invalid or released handle"));
        assert!(format!("{view:?}").contains("owned: false"));
    }
}
