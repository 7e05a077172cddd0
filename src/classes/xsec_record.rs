//! XsecRecord.

use super::{ArrayOfGriddedField2, ArtsClass, Handle, Vector};
use crate::error::ClassResult;
use crate::native::{self, ClassKind, NodeKind, Species, XsecField};

/// Cross-section fit coefficients of one species.
///
/// The scalar fields are read and written by value. The compound fields are
/// returned as fresh views on every call, and their setters copy contents
/// into the existing field rather than replacing it.
pub struct XsecRecord {
    handle: Handle,
}

wrapper!(XsecRecord, XsecRecord);

impl XsecRecord {
    pub fn version(&self) -> ClassResult<i64> {
        Ok(native::version(self.raw())?)
    }

    pub fn set_version(&self, version: i64) -> ClassResult<()> {
        Ok(native::set_version(self.raw(), version)?)
    }

    pub fn species(&self) -> ClassResult<Species> {
        Ok(native::species(self.raw())?)
    }

    pub fn set_species(&self, species: Species) -> ClassResult<()> {
        Ok(native::set_species(self.raw(), species)?)
    }

    fn vector_field(&self, field: XsecField) -> ClassResult<Vector> {
        Vector::from_raw(native::xsec_field(self.raw(), field)?)
    }

    pub fn fit_min_pressures(&self) -> ClassResult<Vector> {
        self.vector_field(XsecField::FitMinPressures)
    }

    pub fn set_fit_min_pressures(&self, values: &Vector) -> ClassResult<()> {
        self.fit_min_pressures()?.set(values)
    }

    pub fn fit_max_pressures(&self) -> ClassResult<Vector> {
        self.vector_field(XsecField::FitMaxPressures)
    }

    pub fn set_fit_max_pressures(&self, values: &Vector) -> ClassResult<()> {
        self.fit_max_pressures()?.set(values)
    }

    pub fn fit_min_temperatures(&self) -> ClassResult<Vector> {
        self.vector_field(XsecField::FitMinTemperatures)
    }

    pub fn set_fit_min_temperatures(&self, values: &Vector) -> ClassResult<()> {
        self.fit_min_temperatures()?.set(values)
    }

    pub fn fit_max_temperatures(&self) -> ClassResult<Vector> {
        self.vector_field(XsecField::FitMaxTemperatures)
    }

    pub fn set_fit_max_temperatures(&self, values: &Vector) -> ClassResult<()> {
        self.fit_max_temperatures()?.set(values)
    }

    /// One gridded field per band.
    pub fn fit_coeffs(&self) -> ClassResult<ArrayOfGriddedField2> {
        ArrayOfGriddedField2::from_raw(native::xsec_field(self.raw(), XsecField::FitCoeffs)?)
    }

    pub fn set_fit_coeffs(&self, coeffs: &ArrayOfGriddedField2) -> ClassResult<()> {
        self.fit_coeffs()?.set(coeffs)
    }

    fn bounds(&self) -> ClassResult<[Vector; 4]> {
        Ok([
            self.fit_min_pressures()?,
            self.fit_max_pressures()?,
            self.fit_min_temperatures()?,
            self.fit_max_temperatures()?,
        ])
    }
}

impl ArtsClass for XsecRecord {
    const KIND: NodeKind = NodeKind::Class(ClassKind::XsecRecord);

    fn set(&self, other: &Self) -> ClassResult<()> {
        self.set_version(other.version()?)?;
        self.set_species(other.species()?)?;
        for (ours, theirs) in self.bounds()?.iter().zip(other.bounds()?.iter()) {
            ours.set(theirs)?;
        }
        self.set_fit_coeffs(&other.fit_coeffs()?)
    }

    fn equals(&self, other: &Self) -> ClassResult<bool> {
        if self.version()? != other.version()? || self.species()? != other.species()? {
            return Ok(false);
        }
        for (ours, theirs) in self.bounds()?.iter().zip(other.bounds()?.iter()) {
            if !ours.equals(theirs)? {
                return Ok(false);
            }
        }
        self.fit_coeffs()?.equals(&other.fit_coeffs()?)
    }
}
