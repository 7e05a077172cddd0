//! Error handling for the native store, the C surface and the class wrappers.
//!
//! The C surface reports an [`ArtsStatus`] code and keeps the last error of
//! the calling thread for retrieval with `arts_last_error_code` and
//! `arts_last_error_message`. Rust callers get [`NativeError`] from the
//! native store and [`ClassError`] from the class wrappers.

use std::cell::RefCell;
use std::ffi::CString;
use std::path::PathBuf;

use libc::{c_char, c_long};
use thiserror::Error;

use crate::handle::RawHandle;
use crate::native::NodeKind;

/// Status codes returned across the C boundary.
///
/// `Ok` is 0 and every failure is nonzero. Values are ABI-stable.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtsStatus {
    /// No error
    Ok = 0,
    /// File read or save failed. Missing files, bad content and permission
    /// problems are not told apart.
    FileFailure = 1,
    /// Handle is null, stale or was never issued
    InvalidHandle = 2,
    /// Null pointer passed for a required argument
    NullPointer = 3,
    /// Invalid UTF-8 in a string argument
    InvalidUtf8 = 4,
    /// Handle refers to a different class than the function expects
    KindMismatch = 5,
    /// Element or dimension index out of range
    IndexOutOfRange = 6,
    /// Argument value outside its legal domain
    InvalidArgument = 7,
    /// Handle is a view into another object and cannot be deleted
    NotRoot = 8,
    /// Internal error (poisoned store after a prior panic)
    Internal = 9,
    /// A Rust panic was caught at the FFI boundary
    Panicked = 128,
}

impl ArtsStatus {
    /// Value as returned by the status-returning C functions.
    pub fn code(self) -> c_long {
        self as c_long
    }
}

struct LastError {
    status: ArtsStatus,
    message: Option<CString>,
}

thread_local! {
    static LAST_ERROR: RefCell<LastError> = const {
        RefCell::new(LastError {
            status: ArtsStatus::Ok,
            message: None,
        })
    };
}

pub(crate) fn set_last_error(status: ArtsStatus, message: &str) {
    let message = CString::new(message.replace('\0', " ")).ok();
    LAST_ERROR.with(|last| *last.borrow_mut() = LastError { status, message });
}

pub(crate) fn clear_last_error() {
    LAST_ERROR.with(|last| {
        *last.borrow_mut() = LastError {
            status: ArtsStatus::Ok,
            message: None,
        }
    });
}

/// Status code of the last failed call on this thread, 0 after a success.
#[unsafe(no_mangle)]
pub extern "C" fn arts_last_error_code() -> c_long {
    LAST_ERROR.with(|last| last.borrow().status.code())
}

/// Message of the last failed call on this thread.
///
/// # Returns
///
/// NULL if the last call succeeded.
///
/// # Ownership
///
/// Caller owns the returned string. Must call `arts_string_free()`.
#[unsafe(no_mangle)]
pub extern "C" fn arts_last_error_message() -> *mut c_char {
    LAST_ERROR.with(|last| match &last.borrow().message {
        Some(message) => message.clone().into_raw(),
        None => std::ptr::null_mut(),
    })
}

/// Errors raised by the native store.
#[derive(Debug, Error)]
pub enum NativeError {
    #[error("invalid or released handle {0:#x}")]
    InvalidHandle(RawHandle),

    #[error("expected {expected}, found {found}")]
    KindMismatch { expected: NodeKind, found: NodeKind },

    #[error("index {index} out of range for length {len}")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("handle {0:#x} is a view into another object and cannot be deleted")]
    NotRoot(RawHandle),

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("handle {0:#x} already has an owner")]
    AlreadyOwned(RawHandle),

    #[error("cannot access {}: {reason}", path.display())]
    File { path: PathBuf, reason: String },

    #[error("native store lock poisoned")]
    Poisoned,
}

impl NativeError {
    pub(crate) fn file(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        Self::File {
            path: path.into(),
            reason: reason.to_string(),
        }
    }

    /// Status code reported for this error at the C boundary.
    pub fn status(&self) -> ArtsStatus {
        match self {
            NativeError::InvalidHandle(_) => ArtsStatus::InvalidHandle,
            NativeError::KindMismatch { .. } => ArtsStatus::KindMismatch,
            NativeError::IndexOutOfRange { .. } => ArtsStatus::IndexOutOfRange,
            NativeError::NotRoot(_) => ArtsStatus::NotRoot,
            NativeError::InvalidArgument(_) | NativeError::AlreadyOwned(_) => {
                ArtsStatus::InvalidArgument
            }
            NativeError::File { .. } => ArtsStatus::FileFailure,
            NativeError::Poisoned => ArtsStatus::Internal,
        }
    }
}

/// Errors raised by the class wrappers.
#[derive(Debug, Error)]
pub enum ClassError {
    /// A handle or value of the wrong class was supplied.
    #[error("expected {expected}, got {found}")]
    Type { expected: String, found: String },

    /// Reading or saving a file failed.
    #[error("file operation failed on {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: NativeError,
    },

    /// Index outside the bounds of an array or grid set.
    #[error("index {index} out of range for length {len}")]
    Index { index: usize, len: usize },

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Any other native failure, passed through unclassified.
    #[error(transparent)]
    Native(NativeError),
}

impl From<NativeError> for ClassError {
    fn from(e: NativeError) -> Self {
        match e {
            NativeError::KindMismatch { expected, found } => ClassError::Type {
                expected: expected.to_string(),
                found: found.to_string(),
            },
            NativeError::IndexOutOfRange { index, len } => ClassError::Index { index, len },
            NativeError::InvalidArgument(message) => ClassError::InvalidArgument(message),
            NativeError::File { path, reason } => ClassError::Io {
                path: path.clone(),
                source: NativeError::File { path, reason },
            },
            other => ClassError::Native(other),
        }
    }
}

/// Result alias for the class wrappers.
pub type ClassResult<T> = Result<T, ClassError>;
