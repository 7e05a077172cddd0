//! Homogeneous arrays of any element class.

use std::fmt;
use std::marker::PhantomData;

use super::{
    ArtsClass, ArtsElement, ArtsString, GriddedField2, Handle, HandleWrapped, Index, Matrix,
    Numeric, Vector, XsecRecord,
};
use crate::error::ClassResult;
use crate::native::{self, NodeKind};

/// Ordered sequence of `T` stored natively.
///
/// Elements are reached through borrowed views. A view of an element dropped
/// by [`ArrayOf::resize`] is invalid afterwards; views of kept elements stay
/// valid.
pub struct ArrayOf<T> {
    handle: Handle,
    _element: PhantomData<fn() -> T>,
}

pub type ArrayOfIndex = ArrayOf<Index>;
pub type ArrayOfNumeric = ArrayOf<Numeric>;
pub type ArrayOfString = ArrayOf<ArtsString>;
pub type ArrayOfVector = ArrayOf<Vector>;
pub type ArrayOfMatrix = ArrayOf<Matrix>;
pub type ArrayOfGriddedField2 = ArrayOf<GriddedField2>;
pub type ArrayOfXsecRecord = ArrayOf<XsecRecord>;

impl<T: ArtsElement> HandleWrapped for ArrayOf<T> {
    fn handle(&self) -> &Handle {
        &self.handle
    }

    fn from_handle(handle: Handle) -> Self {
        Self {
            handle,
            _element: PhantomData,
        }
    }

    fn into_handle(self) -> Handle {
        self.handle
    }
}

impl<T: ArtsElement> ArrayOf<T> {
    pub fn len(&self) -> ClassResult<usize> {
        Ok(native::array_len(self.raw(), T::CLASS)?)
    }

    pub fn is_empty(&self) -> ClassResult<bool> {
        self.len().map(|len| len == 0)
    }

    /// View of element `index`.
    pub fn get(&self, index: usize) -> ClassResult<T> {
        T::from_raw(native::array_elem(self.raw(), T::CLASS, index)?)
    }

    /// Copy `value` into element `index`.
    pub fn set_at(&self, index: usize, value: &T) -> ClassResult<()> {
        self.get(index)?.set(value)
    }

    /// Grow with default elements or shrink from the end.
    pub fn resize(&self, len: usize) -> ClassResult<()> {
        Ok(native::array_resize(self.raw(), T::CLASS, len)?)
    }

    /// Append a copy of `value`.
    pub fn push(&self, value: &T) -> ClassResult<()> {
        T::from_raw(native::array_push(self.raw(), T::CLASS)?)?.set(value)
    }

    /// Append copies of every value in order.
    pub fn extend<'a>(&self, values: impl IntoIterator<Item = &'a T>) -> ClassResult<()>
    where
        T: 'a,
    {
        values.into_iter().try_for_each(|value| self.push(value))
    }

    /// Views of the elements in order.
    ///
    /// The length is read once, up front.
    pub fn iter(&self) -> impl Iterator<Item = ClassResult<T>> + '_ {
        let (len, failed) = match self.len() {
            Ok(len) => (len, None),
            Err(e) => (0, Some(Err(e))),
        };
        failed.into_iter().chain((0..len).map(move |i| self.get(i)))
    }
}

impl<T: ArtsElement> ArtsClass for ArrayOf<T> {
    const KIND: NodeKind = NodeKind::ArrayOf(T::CLASS);

    fn set(&self, other: &Self) -> ClassResult<()> {
        let len = other.len()?;
        self.resize(len)?;
        for i in 0..len {
            self.get(i)?.set(&other.get(i)?)?;
        }
        Ok(())
    }

    fn equals(&self, other: &Self) -> ClassResult<bool> {
        let len = self.len()?;
        if len != other.len()? {
            return Ok(false);
        }
        for i in 0..len {
            if !self.get(i)?.equals(&other.get(i)?)? {
                return Ok(false);
            }
        }
        Ok(true)
    }
}

impl<T: ArtsElement> PartialEq for ArrayOf<T> {
    fn eq(&self, other: &Self) -> bool {
        self.equals(other).unwrap_or(false)
    }
}

impl<T: ArtsElement> fmt::Display for ArrayOf<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        super::display(self, f)
    }
}

impl<T: ArtsElement> fmt::Debug for ArrayOf<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct(Self::KIND.name())
            .field("handle", &self.handle)
            .finish()
    }
}
