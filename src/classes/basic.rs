//! Scalar classes.

use super::{ArtsClass, Handle};
use crate::error::ClassResult;
use crate::native::{self, ClassKind, NodeKind};

/// Integer value.
pub struct Index {
    handle: Handle,
}

wrapper!(Index, Index);

impl Index {
    /// New owned Index holding `value`.
    pub fn with_value(value: i64) -> ClassResult<Self> {
        let this = Self::new()?;
        this.set_value(value)?;
        Ok(this)
    }

    pub fn value(&self) -> ClassResult<i64> {
        Ok(native::index(self.raw())?)
    }

    pub fn set_value(&self, value: i64) -> ClassResult<()> {
        Ok(native::set_index(self.raw(), value)?)
    }
}

impl ArtsClass for Index {
    const KIND: NodeKind = NodeKind::Class(ClassKind::Index);

    fn set(&self, other: &Self) -> ClassResult<()> {
        self.set_value(other.value()?)
    }

    fn equals(&self, other: &Self) -> ClassResult<bool> {
        Ok(self.value()? == other.value()?)
    }
}

impl PartialEq<i64> for Index {
    fn eq(&self, other: &i64) -> bool {
        self.value().is_ok_and(|v| v == *other)
    }
}

/// Floating point value.
pub struct Numeric {
    handle: Handle,
}

wrapper!(Numeric, Numeric);

impl Numeric {
    pub fn with_value(value: f64) -> ClassResult<Self> {
        let this = Self::new()?;
        this.set_value(value)?;
        Ok(this)
    }

    pub fn value(&self) -> ClassResult<f64> {
        Ok(native::numeric(self.raw())?)
    }

    pub fn set_value(&self, value: f64) -> ClassResult<()> {
        Ok(native::set_numeric(self.raw(), value)?)
    }
}

impl ArtsClass for Numeric {
    const KIND: NodeKind = NodeKind::Class(ClassKind::Numeric);

    fn set(&self, other: &Self) -> ClassResult<()> {
        self.set_value(other.value()?)
    }

    fn equals(&self, other: &Self) -> ClassResult<bool> {
        Ok(self.value()? == other.value()?)
    }
}

impl PartialEq<f64> for Numeric {
    fn eq(&self, other: &f64) -> bool {
        self.value().is_ok_and(|v| v == *other)
    }
}

/// Text value. Named to stay clear of [`std::string::String`].
pub struct ArtsString {
    handle: Handle,
}

wrapper!(ArtsString, String);

impl ArtsString {
    pub fn with_value(value: &str) -> ClassResult<Self> {
        let this = Self::new()?;
        this.set_value(value)?;
        Ok(this)
    }

    pub fn value(&self) -> ClassResult<String> {
        Ok(native::string(self.raw())?)
    }

    pub fn set_value(&self, value: &str) -> ClassResult<()> {
        Ok(native::set_string(self.raw(), value.to_owned())?)
    }
}

impl ArtsClass for ArtsString {
    const KIND: NodeKind = NodeKind::Class(ClassKind::String);

    fn set(&self, other: &Self) -> ClassResult<()> {
        self.set_value(&other.value()?)
    }

    fn equals(&self, other: &Self) -> ClassResult<bool> {
        Ok(self.value()? == other.value()?)
    }
}

impl PartialEq<str> for ArtsString {
    fn eq(&self, other: &str) -> bool {
        self.value().is_ok_and(|v| v == other)
    }
}

impl PartialEq<&str> for ArtsString {
    fn eq(&self, other: &&str) -> bool {
        self == *other
    }
}
