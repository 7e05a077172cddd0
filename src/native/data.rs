//! Owned value trees.
//!
//! A [`Data`] is a detached copy of a node and all of its children. The store
//! produces one with `snapshot` and writes one back with `assign`; the XML
//! codec, the text dump and the JSON export all work on this form.

use serde::Serialize;

use super::kind::{ClassKind, NodeKind};
use super::species::Species;
use crate::error::NativeError;

/// Row-major dense matrix.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Matrix {
    nrows: usize,
    ncols: usize,
    data: Vec<f64>,
}

impl Matrix {
    pub fn new(nrows: usize, ncols: usize, data: Vec<f64>) -> Result<Self, NativeError> {
        let expected = nrows.checked_mul(ncols).ok_or_else(|| {
            NativeError::InvalidArgument(format!("matrix shape {nrows}x{ncols} overflows"))
        })?;
        if data.len() != expected {
            return Err(NativeError::InvalidArgument(format!(
                "matrix shape {nrows}x{ncols} needs {expected} values, got {}",
                data.len()
            )));
        }
        Ok(Self { nrows, ncols, data })
    }

    pub fn nrows(&self) -> usize {
        self.nrows
    }

    pub fn ncols(&self) -> usize {
        self.ncols
    }

    pub fn data(&self) -> &[f64] {
        &self.data
    }

    pub fn rows(&self) -> impl Iterator<Item = &[f64]> {
        // chunks(0) panics; an empty matrix has no rows to yield anyway.
        self.data.chunks(self.ncols.max(1)).take(self.nrows)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct GriddedField2Data {
    pub name: String,
    pub grid_names: [String; 2],
    pub grids: [Vec<f64>; 2],
    pub data: Matrix,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct XsecRecordData {
    pub version: i64,
    pub species: Species,
    pub fit_min_pressures: Vec<f64>,
    pub fit_max_pressures: Vec<f64>,
    pub fit_min_temperatures: Vec<f64>,
    pub fit_max_temperatures: Vec<f64>,
    pub fit_coeffs: Vec<GriddedField2Data>,
}

/// Version written for freshly created records.
pub const XSEC_RECORD_VERSION: i64 = 2;

impl Default for XsecRecordData {
    fn default() -> Self {
        Self {
            version: XSEC_RECORD_VERSION,
            species: Species::default(),
            fit_min_pressures: Vec::new(),
            fit_max_pressures: Vec::new(),
            fit_min_temperatures: Vec::new(),
            fit_max_temperatures: Vec::new(),
            fit_coeffs: Vec::new(),
        }
    }
}

/// Detached value of any node.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "class", content = "value")]
pub enum Data {
    Index(i64),
    Numeric(f64),
    String(String),
    Vector(Vec<f64>),
    Matrix(Matrix),
    GriddedField2(Box<GriddedField2Data>),
    XsecRecord(Box<XsecRecordData>),
    Array { element: ClassKind, items: Vec<Data> },
}

impl Data {
    pub fn kind(&self) -> NodeKind {
        match self {
            Data::Index(_) => NodeKind::Class(ClassKind::Index),
            Data::Numeric(_) => NodeKind::Class(ClassKind::Numeric),
            Data::String(_) => NodeKind::Class(ClassKind::String),
            Data::Vector(_) => NodeKind::Class(ClassKind::Vector),
            Data::Matrix(_) => NodeKind::Class(ClassKind::Matrix),
            Data::GriddedField2(_) => NodeKind::Class(ClassKind::GriddedField2),
            Data::XsecRecord(_) => NodeKind::Class(ClassKind::XsecRecord),
            Data::Array { element, .. } => NodeKind::ArrayOf(*element),
        }
    }
}

impl From<GriddedField2Data> for Data {
    fn from(value: GriddedField2Data) -> Self {
        Data::GriddedField2(Box::new(value))
    }
}

impl From<XsecRecordData> for Data {
    fn from(value: XsecRecordData) -> Self {
        Data::XsecRecord(Box::new(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matrix_shape_is_checked() {
        assert!(Matrix::new(2, 3, vec![0.0; 6]).is_ok());
        assert!(Matrix::new(2, 3, vec![0.0; 5]).is_err());
        assert!(Matrix::new(usize::MAX, 2, Vec::new()).is_err());
    }

    #[test]
    fn matrix_rows() {
        let m = Matrix::new(2, 2, vec![1.0, 2.0, 3.0, 4.0]).unwrap();
        let rows: Vec<&[f64]> = m.rows().collect();
        assert_eq!(rows, vec![&[1.0, 2.0][..], &[3.0, 4.0][..]]);
        assert_eq!(Matrix::default().rows().count(), 0);
    }

    #[test]
    fn json_shape() {
        let json = serde_json::to_string(&Data::Vector(vec![1.0, 2.5])).unwrap();
        assert_eq!(json, r#"{"class":"Vector","value":[1.0,2.5]}"#);
    }
}
