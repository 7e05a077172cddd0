//! Class identifiers for native nodes.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Classes that can stand alone and appear as array elements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ClassKind {
    Index,
    Numeric,
    String,
    Vector,
    Matrix,
    GriddedField2,
    XsecRecord,
}

impl ClassKind {
    pub const ALL: [ClassKind; 7] = [
        ClassKind::Index,
        ClassKind::Numeric,
        ClassKind::String,
        ClassKind::Vector,
        ClassKind::Matrix,
        ClassKind::GriddedField2,
        ClassKind::XsecRecord,
    ];

    /// Class name as used in XML tags and ABI symbol names.
    pub fn name(self) -> &'static str {
        match self {
            ClassKind::Index => "Index",
            ClassKind::Numeric => "Numeric",
            ClassKind::String => "String",
            ClassKind::Vector => "Vector",
            ClassKind::Matrix => "Matrix",
            ClassKind::GriddedField2 => "GriddedField2",
            ClassKind::XsecRecord => "XsecRecord",
        }
    }

    /// Name of the array-of-this class.
    pub fn array_name(self) -> &'static str {
        match self {
            ClassKind::Index => "ArrayOfIndex",
            ClassKind::Numeric => "ArrayOfNumeric",
            ClassKind::String => "ArrayOfString",
            ClassKind::Vector => "ArrayOfVector",
            ClassKind::Matrix => "ArrayOfMatrix",
            ClassKind::GriddedField2 => "ArrayOfGriddedField2",
            ClassKind::XsecRecord => "ArrayOfXsecRecord",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.name() == name)
    }
}

/// Class of a native node: a plain class or an array of one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NodeKind {
    Class(ClassKind),
    ArrayOf(ClassKind),
}

impl NodeKind {
    pub fn name(self) -> &'static str {
        match self {
            NodeKind::Class(k) => k.name(),
            NodeKind::ArrayOf(k) => k.array_name(),
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
