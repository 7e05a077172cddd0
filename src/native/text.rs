//! Human-readable dump of native values, as written by the print functions.

use std::fmt;

use super::data::{Data, GriddedField2Data, Matrix, XsecRecordData};

fn write_numbers(f: &mut fmt::Formatter<'_>, values: &[f64]) -> fmt::Result {
    for (i, v) in values.iter().enumerate() {
        if i > 0 {
            f.write_str(" ")?;
        }
        write!(f, "{v}")?;
    }
    Ok(())
}

impl fmt::Display for Matrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, row) in self.rows().enumerate() {
            if i > 0 {
                f.write_str("\n")?;
            }
            write_numbers(f, row)?;
        }
        Ok(())
    }
}

impl fmt::Display for GriddedField2Data {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "GriddedField2: {}", self.name)?;
        for (name, grid) in self.grid_names.iter().zip(&self.grids) {
            write!(f, "{name}: ")?;
            write_numbers(f, grid)?;
            f.write_str("\n")?;
        }
        write!(f, "{}", self.data)
    }
}

impl fmt::Display for XsecRecordData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Species: {}", self.species)?;
        writeln!(f, "Version: {}", self.version)?;
        let bounds = [
            ("Fit min pressures", &self.fit_min_pressures),
            ("Fit max pressures", &self.fit_max_pressures),
            ("Fit min temperatures", &self.fit_min_temperatures),
            ("Fit max temperatures", &self.fit_max_temperatures),
        ];
        for (label, values) in bounds {
            write!(f, "{label}: ")?;
            write_numbers(f, values)?;
            f.write_str("\n")?;
        }
        write!(f, "Fit coefficients: {} band(s)", self.fit_coeffs.len())?;
        for band in &self.fit_coeffs {
            write!(f, "\n{band}")?;
        }
        Ok(())
    }
}

impl fmt::Display for Data {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Data::Index(v) => write!(f, "{v}"),
            Data::Numeric(v) => write!(f, "{v}"),
            Data::String(s) => f.write_str(s),
            Data::Vector(v) => write_numbers(f, v),
            Data::Matrix(m) => write!(f, "{m}"),
            Data::GriddedField2(gf) => write!(f, "{gf}"),
            Data::XsecRecord(xr) => write!(f, "{xr}"),
            Data::Array { items, .. } => {
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str("\n")?;
                    }
                    write!(f, "{item}")?;
                }
                Ok(())
            }
        }
    }
}
