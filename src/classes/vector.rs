//! Vector and Matrix.

use super::{ArtsClass, Handle};
use crate::error::ClassResult;
use crate::native::{self, ClassKind, NodeKind};

/// One-dimensional numeric array.
pub struct Vector {
    handle: Handle,
}

wrapper!(Vector, Vector);

impl Vector {
    /// New owned Vector holding a copy of `values`.
    pub fn from_slice(values: &[f64]) -> ClassResult<Self> {
        let this = Self::new()?;
        this.set_values(values)?;
        Ok(this)
    }

    pub fn len(&self) -> ClassResult<usize> {
        Ok(native::with_vector(self.raw(), <[f64]>::len)?)
    }

    pub fn is_empty(&self) -> ClassResult<bool> {
        self.len().map(|len| len == 0)
    }

    /// Copy of the elements.
    pub fn values(&self) -> ClassResult<Vec<f64>> {
        Ok(native::vector(self.raw())?)
    }

    pub fn set_values(&self, values: &[f64]) -> ClassResult<()> {
        Ok(native::set_vector(self.raw(), values.to_vec())?)
    }
}

impl ArtsClass for Vector {
    const KIND: NodeKind = NodeKind::Class(ClassKind::Vector);

    fn set(&self, other: &Self) -> ClassResult<()> {
        Ok(native::set_vector(self.raw(), other.values()?)?)
    }

    fn equals(&self, other: &Self) -> ClassResult<bool> {
        let theirs = other.values()?;
        Ok(native::with_vector(self.raw(), |ours| ours == theirs.as_slice())?)
    }
}

impl PartialEq<[f64]> for Vector {
    fn eq(&self, other: &[f64]) -> bool {
        native::with_vector(self.raw(), |ours| ours == other).unwrap_or(false)
    }
}

/// Two-dimensional row-major numeric array.
pub struct Matrix {
    handle: Handle,
}

wrapper!(Matrix, Matrix);

impl Matrix {
    /// New owned Matrix of the given shape filled from row-major `values`.
    pub fn from_rows(nrows: usize, ncols: usize, values: Vec<f64>) -> ClassResult<Self> {
        let this = Self::new()?;
        this.set_data(native::Matrix::new(nrows, ncols, values)?)?;
        Ok(this)
    }

    /// `(nrows, ncols)`.
    pub fn shape(&self) -> ClassResult<(usize, usize)> {
        Ok(native::with_matrix(self.raw(), |m| (m.nrows(), m.ncols()))?)
    }

    /// Copy of the matrix contents.
    pub fn data(&self) -> ClassResult<native::Matrix> {
        Ok(native::matrix(self.raw())?)
    }

    pub fn set_data(&self, data: native::Matrix) -> ClassResult<()> {
        Ok(native::set_matrix(self.raw(), data)?)
    }
}

impl ArtsClass for Matrix {
    const KIND: NodeKind = NodeKind::Class(ClassKind::Matrix);

    fn set(&self, other: &Self) -> ClassResult<()> {
        self.set_data(other.data()?)
    }

    fn equals(&self, other: &Self) -> ClassResult<bool> {
        let theirs = other.data()?;
        Ok(native::with_matrix(self.raw(), |ours| *ours == theirs)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ClassError;

    #[test]
    fn vector_values() {
        let v = Vector::from_slice(&[1.0, 2.0]).unwrap();
        assert_eq!(v.len().unwrap(), 2);
        assert!(!v.is_empty().unwrap());
        assert_eq!(v, *[1.0, 2.0].as_slice());
    }

    #[test]
    fn set_copies_values() {
        let a = Vector::from_slice(&[1.0]).unwrap();
        let b = Vector::new().unwrap();
        b.set(&a).unwrap();
        a.set_values(&[5.0]).unwrap();
        assert_eq!(b.values().unwrap(), vec![1.0]);
        assert_ne!(a, b);
    }

    #[test]
    fn matrix_shape() {
        let m = Matrix::from_rows(2, 3, vec![0.0; 6]).unwrap();
        assert_eq!(m.shape().unwrap(), (2, 3));
        assert!(matches!(
            Matrix::from_rows(2, 2, vec![0.0; 3]),
            Err(ClassError::InvalidArgument(_))
        ));
        let copy = Matrix::new().unwrap();
        copy.set(&m).unwrap();
        assert_eq!(copy, m);
    }
}
