//! C FFI bindings and safe wrappers for ARTS data classes.
//!
//! The crate keeps a native store of typed objects (Index, Numeric, String,
//! Vector, Matrix, GriddedField2, XsecRecord and arrays of each) and exposes
//! it two ways:
//!
//! - a flat C surface of `create*`, `delete*`, `get*`, `set*`, `xmlread*` and
//!   `xmlsave*` functions keyed by class name, usable from any language with
//!   C FFI support;
//! - the [`classes`] module, where every class is a Rust type holding one
//!   handle.
//!
//! # Thread Safety
//!
//! All objects live in one process-wide store guarded by a mutex, so every
//! entry point may be called from any thread. Each call is atomic; a
//! sequence of calls is not. The last error is kept per thread.
//!
//! # Memory Management
//!
//! - Handles returned by `create*` must be released with the matching
//!   `delete*`. Deleting a root object releases all of its fields.
//! - Handles returned by field getters and `getelem*` are views. They must
//!   not be deleted and become invalid once their owner is released.
//! - Strings returned by functions must be freed with `arts_string_free`.
//!
//! # Feature Flags
//!
//! - `zascii` (default): gzip-compressed XML via flate2

#![allow(clippy::missing_safety_doc)]

mod abi;
pub mod classes;
mod error;
mod handle;
pub mod native;
mod util;

// Re-export all public FFI types and functions
pub use abi::*;
pub use classes::{ArtsClass, ArtsElement, HandleWrapped, SaveOptions};
pub use error::{ArtsStatus, ClassError, ClassResult, NativeError, arts_last_error_code, arts_last_error_message};
pub use handle::{NULL_HANDLE, RawHandle};
pub use native::FileFormat;
pub use util::arts_string_free;

use libc::c_char;

/// Library version string.
///
/// # Returns
///
/// Static string containing the version (e.g., "0.1.0").
/// Do not free this string.
#[unsafe(no_mangle)]
pub extern "C" fn arts_version() -> *const c_char {
    static VERSION: &[u8] = concat!(env!("CARGO_PKG_VERSION"), "\0").as_bytes();
    VERSION.as_ptr() as *const c_char
}

/// Feature flags bitmask.
///
/// # Returns
///
/// Bitmask indicating which features are compiled in:
/// - Bit 0 (0x01): `zascii` - gzip-compressed XML files
///
/// # Example
///
/// ```c
/// uint32_t features = arts_features();
/// if (features & 0x01) { /* filetype 1 available */ }
/// ```
#[unsafe(no_mangle)]
pub extern "C" fn arts_features() -> u32 {
    let mut flags = 0u32;

    #[cfg(feature = "zascii")]
    {
        flags |= 1 << 0;
    }

    flags
}
