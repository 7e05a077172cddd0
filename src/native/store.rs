//! Node storage.
//!
//! Compound classes keep their compound fields as child nodes, so a field
//! handle stays meaningful for as long as its owner lives. A child remembers
//! its parent and cannot be deleted on its own; deleting a root releases the
//! whole subtree.

use super::data::{Data, GriddedField2Data, Matrix, XsecRecordData};
use super::kind::{ClassKind, NodeKind};
use super::species::Species;
use crate::error::NativeError;
use crate::handle::{HandleTable, RawHandle};

pub(crate) struct Node {
    parent: Option<RawHandle>,
    /// Set while a Rust wrapper owns this root.
    claimed: bool,
    value: Value,
}

pub(crate) enum Value {
    Index(i64),
    Numeric(f64),
    String(String),
    Vector(Vec<f64>),
    Matrix(Matrix),
    GriddedField2(GriddedField2Node),
    XsecRecord(XsecRecordNode),
    Array(ArrayNode),
}

pub(crate) struct GriddedField2Node {
    name: String,
    grid_names: [String; 2],
    grids: [RawHandle; 2],
    data: RawHandle,
}

pub(crate) struct XsecRecordNode {
    version: i64,
    species: Species,
    fit_min_pressures: RawHandle,
    fit_max_pressures: RawHandle,
    fit_min_temperatures: RawHandle,
    fit_max_temperatures: RawHandle,
    fit_coeffs: RawHandle,
}

pub(crate) struct ArrayNode {
    element: ClassKind,
    items: Vec<RawHandle>,
}

/// Compound fields of an [`XsecRecordNode`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum XsecField {
    FitMinPressures,
    FitMaxPressures,
    FitMinTemperatures,
    FitMaxTemperatures,
    FitCoeffs,
}

const VECTOR: NodeKind = NodeKind::Class(ClassKind::Vector);
const MATRIX: NodeKind = NodeKind::Class(ClassKind::Matrix);
const GRIDDED_FIELD2: NodeKind = NodeKind::Class(ClassKind::GriddedField2);
const XSEC_RECORD: NodeKind = NodeKind::Class(ClassKind::XsecRecord);
const FIT_COEFFS: NodeKind = NodeKind::ArrayOf(ClassKind::GriddedField2);

impl Value {
    fn kind(&self) -> NodeKind {
        match self {
            Value::Index(_) => NodeKind::Class(ClassKind::Index),
            Value::Numeric(_) => NodeKind::Class(ClassKind::Numeric),
            Value::String(_) => NodeKind::Class(ClassKind::String),
            Value::Vector(_) => VECTOR,
            Value::Matrix(_) => MATRIX,
            Value::GriddedField2(_) => GRIDDED_FIELD2,
            Value::XsecRecord(_) => XSEC_RECORD,
            Value::Array(array) => NodeKind::ArrayOf(array.element),
        }
    }

    fn children(&self) -> Vec<RawHandle> {
        match self {
            Value::GriddedField2(gf) => vec![gf.grids[0], gf.grids[1], gf.data],
            Value::XsecRecord(xr) => vec![
                xr.fit_min_pressures,
                xr.fit_max_pressures,
                xr.fit_min_temperatures,
                xr.fit_max_temperatures,
                xr.fit_coeffs,
            ],
            Value::Array(array) => array.items.clone(),
            _ => Vec::new(),
        }
    }
}

fn mismatch(expected: NodeKind, found: &Value) -> NativeError {
    NativeError::KindMismatch {
        expected,
        found: found.kind(),
    }
}

fn grid_dim(dim: usize) -> Result<usize, NativeError> {
    if dim < 2 {
        Ok(dim)
    } else {
        Err(NativeError::IndexOutOfRange { index: dim, len: 2 })
    }
}

pub(crate) struct Store {
    nodes: HandleTable<Node>,
}

impl Store {
    pub const fn new() -> Self {
        Self {
            nodes: HandleTable::new(),
        }
    }

    /// Number of live nodes, children included.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Allocate a default-initialised node together with its children.
    pub fn alloc(&mut self, kind: NodeKind, parent: Option<RawHandle>) -> RawHandle {
        let handle = self.nodes.insert(Node {
            parent,
            claimed: false,
            value: Value::Index(0),
        });
        let value = match kind {
            NodeKind::Class(ClassKind::Index) => Value::Index(0),
            NodeKind::Class(ClassKind::Numeric) => Value::Numeric(0.0),
            NodeKind::Class(ClassKind::String) => Value::String(String::new()),
            NodeKind::Class(ClassKind::Vector) => Value::Vector(Vec::new()),
            NodeKind::Class(ClassKind::Matrix) => Value::Matrix(Matrix::default()),
            NodeKind::Class(ClassKind::GriddedField2) => {
                Value::GriddedField2(GriddedField2Node {
                    name: String::new(),
                    grid_names: Default::default(),
                    grids: [
                        self.alloc(VECTOR, Some(handle)),
                        self.alloc(VECTOR, Some(handle)),
                    ],
                    data: self.alloc(MATRIX, Some(handle)),
                })
            }
            NodeKind::Class(ClassKind::XsecRecord) => {
                let defaults = XsecRecordData::default();
                Value::XsecRecord(XsecRecordNode {
                    version: defaults.version,
                    species: defaults.species,
                    fit_min_pressures: self.alloc(VECTOR, Some(handle)),
                    fit_max_pressures: self.alloc(VECTOR, Some(handle)),
                    fit_min_temperatures: self.alloc(VECTOR, Some(handle)),
                    fit_max_temperatures: self.alloc(VECTOR, Some(handle)),
                    fit_coeffs: self.alloc(FIT_COEFFS, Some(handle)),
                })
            }
            NodeKind::ArrayOf(element) => Value::Array(ArrayNode {
                element,
                items: Vec::new(),
            }),
        };
        if let Some(node) = self.nodes.get_mut(handle) {
            node.value = value;
        }
        handle
    }

    fn node(&self, handle: RawHandle) -> Result<&Node, NativeError> {
        self.nodes
            .get(handle)
            .ok_or(NativeError::InvalidHandle(handle))
    }

    fn value(&self, handle: RawHandle) -> Result<&Value, NativeError> {
        self.node(handle).map(|node| &node.value)
    }

    fn value_mut(&mut self, handle: RawHandle) -> Result<&mut Value, NativeError> {
        self.nodes
            .get_mut(handle)
            .map(|node| &mut node.value)
            .ok_or(NativeError::InvalidHandle(handle))
    }

    pub fn kind(&self, handle: RawHandle) -> Result<NodeKind, NativeError> {
        self.value(handle).map(Value::kind)
    }

    pub fn parent(&self, handle: RawHandle) -> Result<Option<RawHandle>, NativeError> {
        self.node(handle).map(|node| node.parent)
    }

    /// Release a root node and everything below it.
    pub fn delete(&mut self, handle: RawHandle) -> Result<(), NativeError> {
        if self.node(handle)?.parent.is_some() {
            return Err(NativeError::NotRoot(handle));
        }
        self.release(handle);
        Ok(())
    }

    /// Mark a root as owned by a wrapper. A root has at most one owner.
    pub fn claim(&mut self, handle: RawHandle) -> Result<(), NativeError> {
        if self.parent(handle)?.is_some() {
            return Err(NativeError::NotRoot(handle));
        }
        let node = self
            .nodes
            .get_mut(handle)
            .ok_or(NativeError::InvalidHandle(handle))?;
        if node.claimed {
            return Err(NativeError::AlreadyOwned(handle));
        }
        node.claimed = true;
        Ok(())
    }

    pub fn disown(&mut self, handle: RawHandle) -> Result<(), NativeError> {
        let node = self
            .nodes
            .get_mut(handle)
            .ok_or(NativeError::InvalidHandle(handle))?;
        node.claimed = false;
        Ok(())
    }

    fn release(&mut self, handle: RawHandle) {
        if let Some(node) = self.nodes.remove(handle) {
            for child in node.value.children() {
                self.release(child);
            }
        }
    }

    // Leaf classes.

    pub fn index(&self, handle: RawHandle) -> Result<i64, NativeError> {
        match self.value(handle)? {
            Value::Index(v) => Ok(*v),
            other => Err(mismatch(NodeKind::Class(ClassKind::Index), other)),
        }
    }

    pub fn set_index(&mut self, handle: RawHandle, v: i64) -> Result<(), NativeError> {
        match self.value_mut(handle)? {
            Value::Index(slot) => {
                *slot = v;
                Ok(())
            }
            other => Err(mismatch(NodeKind::Class(ClassKind::Index), other)),
        }
    }

    pub fn numeric(&self, handle: RawHandle) -> Result<f64, NativeError> {
        match self.value(handle)? {
            Value::Numeric(v) => Ok(*v),
            other => Err(mismatch(NodeKind::Class(ClassKind::Numeric), other)),
        }
    }

    pub fn set_numeric(&mut self, handle: RawHandle, v: f64) -> Result<(), NativeError> {
        match self.value_mut(handle)? {
            Value::Numeric(slot) => {
                *slot = v;
                Ok(())
            }
            other => Err(mismatch(NodeKind::Class(ClassKind::Numeric), other)),
        }
    }

    pub fn string(&self, handle: RawHandle) -> Result<&str, NativeError> {
        match self.value(handle)? {
            Value::String(s) => Ok(s.as_str()),
            other => Err(mismatch(NodeKind::Class(ClassKind::String), other)),
        }
    }

    pub fn set_string(&mut self, handle: RawHandle, s: String) -> Result<(), NativeError> {
        match self.value_mut(handle)? {
            Value::String(slot) => {
                *slot = s;
                Ok(())
            }
            other => Err(mismatch(NodeKind::Class(ClassKind::String), other)),
        }
    }

    pub fn vector(&self, handle: RawHandle) -> Result<&[f64], NativeError> {
        match self.value(handle)? {
            Value::Vector(v) => Ok(v.as_slice()),
            other => Err(mismatch(VECTOR, other)),
        }
    }

    pub fn set_vector(&mut self, handle: RawHandle, v: Vec<f64>) -> Result<(), NativeError> {
        match self.value_mut(handle)? {
            Value::Vector(slot) => {
                *slot = v;
                Ok(())
            }
            other => Err(mismatch(VECTOR, other)),
        }
    }

    pub fn matrix(&self, handle: RawHandle) -> Result<&Matrix, NativeError> {
        match self.value(handle)? {
            Value::Matrix(m) => Ok(m),
            other => Err(mismatch(MATRIX, other)),
        }
    }

    pub fn set_matrix(&mut self, handle: RawHandle, m: Matrix) -> Result<(), NativeError> {
        match self.value_mut(handle)? {
            Value::Matrix(slot) => {
                *slot = m;
                Ok(())
            }
            other => Err(mismatch(MATRIX, other)),
        }
    }

    // GriddedField2.

    fn gridded_field(&self, handle: RawHandle) -> Result<&GriddedField2Node, NativeError> {
        match self.value(handle)? {
            Value::GriddedField2(gf) => Ok(gf),
            other => Err(mismatch(GRIDDED_FIELD2, other)),
        }
    }

    fn gridded_field_mut(
        &mut self,
        handle: RawHandle,
    ) -> Result<&mut GriddedField2Node, NativeError> {
        match self.value_mut(handle)? {
            Value::GriddedField2(gf) => Ok(gf),
            other => Err(mismatch(GRIDDED_FIELD2, other)),
        }
    }

    pub fn gridded_field_name(&self, handle: RawHandle) -> Result<&str, NativeError> {
        self.gridded_field(handle).map(|gf| gf.name.as_str())
    }

    pub fn set_gridded_field_name(
        &mut self,
        handle: RawHandle,
        name: String,
    ) -> Result<(), NativeError> {
        self.gridded_field_mut(handle)?.name = name;
        Ok(())
    }

    pub fn grid_name(&self, handle: RawHandle, dim: usize) -> Result<&str, NativeError> {
        let gf = self.gridded_field(handle)?;
        Ok(&gf.grid_names[grid_dim(dim)?])
    }

    pub fn set_grid_name(
        &mut self,
        handle: RawHandle,
        dim: usize,
        name: String,
    ) -> Result<(), NativeError> {
        let dim = grid_dim(dim)?;
        self.gridded_field_mut(handle)?.grid_names[dim] = name;
        Ok(())
    }

    pub fn grid(&self, handle: RawHandle, dim: usize) -> Result<RawHandle, NativeError> {
        let gf = self.gridded_field(handle)?;
        Ok(gf.grids[grid_dim(dim)?])
    }

    pub fn gridded_field_data(&self, handle: RawHandle) -> Result<RawHandle, NativeError> {
        self.gridded_field(handle).map(|gf| gf.data)
    }

    // XsecRecord.

    fn xsec_record(&self, handle: RawHandle) -> Result<&XsecRecordNode, NativeError> {
        match self.value(handle)? {
            Value::XsecRecord(xr) => Ok(xr),
            other => Err(mismatch(XSEC_RECORD, other)),
        }
    }

    fn xsec_record_mut(&mut self, handle: RawHandle) -> Result<&mut XsecRecordNode, NativeError> {
        match self.value_mut(handle)? {
            Value::XsecRecord(xr) => Ok(xr),
            other => Err(mismatch(XSEC_RECORD, other)),
        }
    }

    pub fn version(&self, handle: RawHandle) -> Result<i64, NativeError> {
        self.xsec_record(handle).map(|xr| xr.version)
    }

    pub fn set_version(&mut self, handle: RawHandle, version: i64) -> Result<(), NativeError> {
        self.xsec_record_mut(handle)?.version = version;
        Ok(())
    }

    pub fn species(&self, handle: RawHandle) -> Result<Species, NativeError> {
        self.xsec_record(handle).map(|xr| xr.species)
    }

    pub fn set_species(&mut self, handle: RawHandle, species: Species) -> Result<(), NativeError> {
        self.xsec_record_mut(handle)?.species = species;
        Ok(())
    }

    pub fn xsec_field(&self, handle: RawHandle, field: XsecField) -> Result<RawHandle, NativeError> {
        let xr = self.xsec_record(handle)?;
        Ok(match field {
            XsecField::FitMinPressures => xr.fit_min_pressures,
            XsecField::FitMaxPressures => xr.fit_max_pressures,
            XsecField::FitMinTemperatures => xr.fit_min_temperatures,
            XsecField::FitMaxTemperatures => xr.fit_max_temperatures,
            XsecField::FitCoeffs => xr.fit_coeffs,
        })
    }

    // Arrays.

    fn array(&self, handle: RawHandle, element: ClassKind) -> Result<&ArrayNode, NativeError> {
        match self.value(handle)? {
            Value::Array(array) if array.element == element => Ok(array),
            other => Err(mismatch(NodeKind::ArrayOf(element), other)),
        }
    }

    fn array_mut(
        &mut self,
        handle: RawHandle,
        element: ClassKind,
    ) -> Result<&mut ArrayNode, NativeError> {
        let expected = NodeKind::ArrayOf(element);
        let found = self.kind(handle)?;
        match self.value_mut(handle)? {
            Value::Array(array) if array.element == element => Ok(array),
            _ => Err(NativeError::KindMismatch { expected, found }),
        }
    }

    pub fn array_len(&self, handle: RawHandle, element: ClassKind) -> Result<usize, NativeError> {
        self.array(handle, element).map(|array| array.items.len())
    }

    pub fn array_elem(
        &self,
        handle: RawHandle,
        element: ClassKind,
        index: usize,
    ) -> Result<RawHandle, NativeError> {
        let array = self.array(handle, element)?;
        array
            .items
            .get(index)
            .copied()
            .ok_or(NativeError::IndexOutOfRange {
                index,
                len: array.items.len(),
            })
    }

    /// Grow with default elements or shrink by releasing the tail.
    pub fn array_resize(
        &mut self,
        handle: RawHandle,
        element: ClassKind,
        len: usize,
    ) -> Result<(), NativeError> {
        let array = self.array_mut(handle, element)?;
        let current = array.items.len();
        if len <= current {
            let removed = array.items.split_off(len);
            for item in removed {
                self.release(item);
            }
            return Ok(());
        }

        let added: Vec<RawHandle> = (current..len)
            .map(|_| self.alloc(NodeKind::Class(element), Some(handle)))
            .collect();
        self.array_mut(handle, element)?.items.extend(added);
        Ok(())
    }

    // Whole-tree copies.

    /// Detached copy of a node and its children.
    pub fn snapshot(&self, handle: RawHandle) -> Result<Data, NativeError> {
        Ok(match self.value(handle)? {
            Value::Index(v) => Data::Index(*v),
            Value::Numeric(v) => Data::Numeric(*v),
            Value::String(s) => Data::String(s.clone()),
            Value::Vector(v) => Data::Vector(v.clone()),
            Value::Matrix(m) => Data::Matrix(m.clone()),
            Value::GriddedField2(_) => self.snapshot_gridded_field(handle)?.into(),
            Value::XsecRecord(xr) => {
                let coeffs = self.array(xr.fit_coeffs, ClassKind::GriddedField2)?;
                XsecRecordData {
                    version: xr.version,
                    species: xr.species,
                    fit_min_pressures: self.vector(xr.fit_min_pressures)?.to_vec(),
                    fit_max_pressures: self.vector(xr.fit_max_pressures)?.to_vec(),
                    fit_min_temperatures: self.vector(xr.fit_min_temperatures)?.to_vec(),
                    fit_max_temperatures: self.vector(xr.fit_max_temperatures)?.to_vec(),
                    fit_coeffs: coeffs
                        .items
                        .iter()
                        .map(|&item| self.snapshot_gridded_field(item))
                        .collect::<Result<_, _>>()?,
                }
                .into()
            }
            Value::Array(array) => Data::Array {
                element: array.element,
                items: array
                    .items
                    .iter()
                    .map(|&item| self.snapshot(item))
                    .collect::<Result<_, _>>()?,
            },
        })
    }

    fn snapshot_gridded_field(&self, handle: RawHandle) -> Result<GriddedField2Data, NativeError> {
        let gf = self.gridded_field(handle)?;
        Ok(GriddedField2Data {
            name: gf.name.clone(),
            grid_names: gf.grid_names.clone(),
            grids: [
                self.vector(gf.grids[0])?.to_vec(),
                self.vector(gf.grids[1])?.to_vec(),
            ],
            data: self.matrix(gf.data)?.clone(),
        })
    }

    /// Overwrite the contents of a node in place.
    ///
    /// Child handles of compound nodes are kept; only their contents change.
    pub fn assign(&mut self, handle: RawHandle, data: Data) -> Result<(), NativeError> {
        let expected = self.kind(handle)?;
        if data.kind() != expected {
            return Err(NativeError::KindMismatch {
                expected,
                found: data.kind(),
            });
        }

        match data {
            Data::Index(v) => self.set_index(handle, v),
            Data::Numeric(v) => self.set_numeric(handle, v),
            Data::String(s) => self.set_string(handle, s),
            Data::Vector(v) => self.set_vector(handle, v),
            Data::Matrix(m) => self.set_matrix(handle, m),
            Data::GriddedField2(gf) => self.assign_gridded_field(handle, *gf),
            Data::XsecRecord(xr) => {
                let XsecRecordData {
                    version,
                    species,
                    fit_min_pressures,
                    fit_max_pressures,
                    fit_min_temperatures,
                    fit_max_temperatures,
                    fit_coeffs,
                } = *xr;

                let node = self.xsec_record_mut(handle)?;
                node.version = version;
                node.species = species;
                let targets = [
                    (node.fit_min_pressures, fit_min_pressures),
                    (node.fit_max_pressures, fit_max_pressures),
                    (node.fit_min_temperatures, fit_min_temperatures),
                    (node.fit_max_temperatures, fit_max_temperatures),
                ];
                let coeffs_handle = node.fit_coeffs;

                for (target, values) in targets {
                    self.set_vector(target, values)?;
                }
                self.assign(
                    coeffs_handle,
                    Data::Array {
                        element: ClassKind::GriddedField2,
                        items: fit_coeffs.into_iter().map(Data::from).collect(),
                    },
                )
            }
            Data::Array { element, items } => {
                self.array_resize(handle, element, items.len())?;
                let targets = self.array(handle, element)?.items.clone();
                for (target, item) in targets.into_iter().zip(items) {
                    self.assign(target, item)?;
                }
                Ok(())
            }
        }
    }

    fn assign_gridded_field(
        &mut self,
        handle: RawHandle,
        data: GriddedField2Data,
    ) -> Result<(), NativeError> {
        let GriddedField2Data {
            name,
            grid_names,
            grids: [grid0, grid1],
            data,
        } = data;

        let node = self.gridded_field_mut(handle)?;
        node.name = name;
        node.grid_names = grid_names;
        let (grid_handles, data_handle) = (node.grids, node.data);

        self.set_vector(grid_handles[0], grid0)?;
        self.set_vector(grid_handles[1], grid1)?;
        self.set_matrix(data_handle, data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const XSEC: NodeKind = NodeKind::Class(ClassKind::XsecRecord);

    #[test]
    fn xsec_record_allocates_children() {
        let mut store = Store::new();
        let h = store.alloc(XSEC, None);
        // record + four vectors + coefficient array
        assert_eq!(store.len(), 6);

        let coeffs = store.xsec_field(h, XsecField::FitCoeffs).unwrap();
        assert_eq!(store.kind(coeffs).unwrap(), FIT_COEFFS);
        assert_eq!(store.parent(coeffs).unwrap(), Some(h));
        assert_eq!(store.version(h).unwrap(), 2);
        assert_eq!(
            store.snapshot(h).unwrap(),
            Data::from(XsecRecordData::default())
        );
    }

    #[test]
    fn delete_releases_subtree() {
        let mut store = Store::new();
        let h = store.alloc(XSEC, None);
        let coeffs = store.xsec_field(h, XsecField::FitCoeffs).unwrap();
        store
            .array_resize(coeffs, ClassKind::GriddedField2, 2)
            .unwrap();
        assert_eq!(store.len(), 6 + 2 * 4);

        store.delete(h).unwrap();
        assert_eq!(store.len(), 0);
        assert!(matches!(
            store.array_len(coeffs, ClassKind::GriddedField2),
            Err(NativeError::InvalidHandle(_))
        ));
        assert!(matches!(store.delete(h), Err(NativeError::InvalidHandle(_))));
    }

    #[test]
    fn child_cannot_be_deleted() {
        let mut store = Store::new();
        let h = store.alloc(XSEC, None);
        let v = store.xsec_field(h, XsecField::FitMinPressures).unwrap();
        assert!(matches!(store.delete(v), Err(NativeError::NotRoot(_))));
        assert!(store.vector(v).is_ok());
    }

    #[test]
    fn root_has_one_owner() {
        let mut store = Store::new();
        let h = store.alloc(XSEC, None);
        store.claim(h).unwrap();
        assert!(matches!(store.claim(h), Err(NativeError::AlreadyOwned(_))));

        store.disown(h).unwrap();
        store.claim(h).unwrap();

        let v = store.xsec_field(h, XsecField::FitMinPressures).unwrap();
        assert!(matches!(store.claim(v), Err(NativeError::NotRoot(_))));
        store.delete(h).unwrap();
        assert!(matches!(store.claim(h), Err(NativeError::InvalidHandle(_))));
    }

    #[test]
    fn shrinking_array_invalidates_tail() {
        let mut store = Store::new();
        let h = store.alloc(NodeKind::ArrayOf(ClassKind::Vector), None);
        store.array_resize(h, ClassKind::Vector, 3).unwrap();
        let first = store.array_elem(h, ClassKind::Vector, 0).unwrap();
        let last = store.array_elem(h, ClassKind::Vector, 2).unwrap();

        store.array_resize(h, ClassKind::Vector, 1).unwrap();
        assert!(store.vector(first).is_ok());
        assert!(matches!(store.vector(last), Err(NativeError::InvalidHandle(_))));
        assert!(matches!(
            store.array_elem(h, ClassKind::Vector, 1),
            Err(NativeError::IndexOutOfRange { index: 1, len: 1 })
        ));
    }

    #[test]
    fn array_element_kind_is_checked() {
        let mut store = Store::new();
        let h = store.alloc(NodeKind::ArrayOf(ClassKind::Vector), None);
        assert!(matches!(
            store.array_len(h, ClassKind::Matrix),
            Err(NativeError::KindMismatch { .. })
        ));
        assert!(matches!(
            store.array_resize(h, ClassKind::Matrix, 2),
            Err(NativeError::KindMismatch {
                expected: NodeKind::ArrayOf(ClassKind::Matrix),
                found: NodeKind::ArrayOf(ClassKind::Vector),
            })
        ));
        assert_eq!(store.array_len(h, ClassKind::Vector).unwrap(), 0);

        let v = store.alloc(VECTOR, None);
        assert!(matches!(
            store.array_resize(v, ClassKind::Vector, 1),
            Err(NativeError::KindMismatch { found: VECTOR, .. })
        ));
    }

    #[test]
    fn snapshot_assign_round_trip() {
        let mut store = Store::new();
        let src = store.alloc(XSEC, None);
        store.set_version(src, 3).unwrap();
        store.set_species(src, Species::CFC11).unwrap();
        let p = store.xsec_field(src, XsecField::FitMinPressures).unwrap();
        store.set_vector(p, vec![100.0, 200.0]).unwrap();
        let coeffs = store.xsec_field(src, XsecField::FitCoeffs).unwrap();
        store
            .array_resize(coeffs, ClassKind::GriddedField2, 1)
            .unwrap();
        let band = store
            .array_elem(coeffs, ClassKind::GriddedField2, 0)
            .unwrap();
        store.set_gridded_field_name(band, "band0".into()).unwrap();

        let snapshot = store.snapshot(src).unwrap();
        let dst = store.alloc(XSEC, None);
        let dst_min = store.xsec_field(dst, XsecField::FitMinPressures).unwrap();
        store.assign(dst, snapshot.clone()).unwrap();

        assert_eq!(store.snapshot(dst).unwrap(), snapshot);
        // children keep their handles
        assert_eq!(
            store.xsec_field(dst, XsecField::FitMinPressures).unwrap(),
            dst_min
        );
        assert_eq!(store.vector(dst_min).unwrap(), &[100.0, 200.0]);
    }

    #[test]
    fn assign_rejects_other_kind() {
        let mut store = Store::new();
        let h = store.alloc(VECTOR, None);
        assert!(matches!(
            store.assign(h, Data::Index(1)),
            Err(NativeError::KindMismatch { .. })
        ));
    }

    #[test]
    fn grid_dimension_is_bounded() {
        let mut store = Store::new();
        let h = store.alloc(GRIDDED_FIELD2, None);
        assert!(store.grid(h, 1).is_ok());
        assert!(matches!(
            store.grid(h, 2),
            Err(NativeError::IndexOutOfRange { index: 2, len: 2 })
        ));
        assert!(store.set_grid_name(h, 5, "x".into()).is_err());
    }
}
