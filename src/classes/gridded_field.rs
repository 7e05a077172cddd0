//! GriddedField2.

use super::{ArtsClass, Handle, Matrix, Vector};
use crate::error::ClassResult;
use crate::native::{self, ClassKind, NodeKind};

/// Data matrix over two named grids.
pub struct GriddedField2 {
    handle: Handle,
}

wrapper!(GriddedField2, GriddedField2);

impl GriddedField2 {
    pub fn name(&self) -> ClassResult<String> {
        Ok(native::gridded_field_name(self.raw())?)
    }

    pub fn set_name(&self, name: &str) -> ClassResult<()> {
        Ok(native::set_gridded_field_name(self.raw(), name.to_owned())?)
    }

    /// Name of grid `dim` (0 or 1).
    pub fn grid_name(&self, dim: usize) -> ClassResult<String> {
        Ok(native::grid_name(self.raw(), dim)?)
    }

    pub fn set_grid_name(&self, dim: usize, name: &str) -> ClassResult<()> {
        Ok(native::set_grid_name(self.raw(), dim, name.to_owned())?)
    }

    /// View of grid `dim` (0 or 1).
    pub fn grid(&self, dim: usize) -> ClassResult<Vector> {
        Vector::from_raw(native::grid(self.raw(), dim)?)
    }

    pub fn set_grid(&self, dim: usize, grid: &Vector) -> ClassResult<()> {
        self.grid(dim)?.set(grid)
    }

    /// View of the data matrix.
    pub fn data(&self) -> ClassResult<Matrix> {
        Matrix::from_raw(native::gridded_field_data(self.raw())?)
    }

    pub fn set_data(&self, data: &Matrix) -> ClassResult<()> {
        self.data()?.set(data)
    }
}

impl ArtsClass for GriddedField2 {
    const KIND: NodeKind = NodeKind::Class(ClassKind::GriddedField2);

    fn set(&self, other: &Self) -> ClassResult<()> {
        self.set_name(&other.name()?)?;
        for dim in 0..2 {
            self.set_grid_name(dim, &other.grid_name(dim)?)?;
            self.set_grid(dim, &other.grid(dim)?)?;
        }
        self.set_data(&other.data()?)
    }

    fn equals(&self, other: &Self) -> ClassResult<bool> {
        if self.name()? != other.name()? {
            return Ok(false);
        }
        for dim in 0..2 {
            if self.grid_name(dim)? != other.grid_name(dim)?
                || !self.grid(dim)?.equals(&other.grid(dim)?)?
            {
                return Ok(false);
            }
        }
        self.data()?.equals(&other.data()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ClassError;

    fn sample() -> GriddedField2 {
        let gf = GriddedField2::new().unwrap();
        gf.set_name("band").unwrap();
        gf.set_grid_name(0, "frequency").unwrap();
        gf.set_grid(0, &Vector::from_slice(&[1.0, 2.0]).unwrap()).unwrap();
        gf.set_data(&Matrix::from_rows(2, 1, vec![3.0, 4.0]).unwrap())
            .unwrap();
        gf
    }

    #[test]
    fn field_views_share_storage() {
        let gf = sample();
        let a = gf.grid(0).unwrap();
        let b = gf.grid(0).unwrap();
        a.set_values(&[7.0]).unwrap();
        assert_eq!(b.values().unwrap(), vec![7.0]);
        assert!(!a.is_owner());
    }

    #[test]
    fn set_and_equality() {
        let src = sample();
        let dst = GriddedField2::new().unwrap();
        assert_ne!(dst, src);
        dst.set(&src).unwrap();
        assert_eq!(dst, src);

        dst.set_grid_name(1, "other").unwrap();
        assert_ne!(dst, src);
    }

    #[test]
    fn grid_dimension_is_checked() {
        let gf = GriddedField2::new().unwrap();
        assert!(matches!(
            gf.grid(2),
            Err(ClassError::Index { index: 2, len: 2 })
        ));
    }
}
