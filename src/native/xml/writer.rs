//! XML document writer.
//!
//! In binary mode the element skeleton is still written as text, while
//! every number goes to a separate little-endian payload in document order.

use std::fmt::Write as _;

use super::FileFormat;
use crate::native::data::{Data, GriddedField2Data, Matrix, XsecRecordData};

pub(crate) fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}

pub(crate) struct XmlWriter {
    binary: bool,
    text: String,
    payload: Vec<u8>,
}

impl XmlWriter {
    pub fn new(format: FileFormat) -> Self {
        Self {
            binary: format == FileFormat::Binary,
            text: String::new(),
            payload: Vec::new(),
        }
    }

    /// Write a complete document and return the text and the binary payload.
    pub fn document(mut self, data: &Data) -> (String, Vec<u8>) {
        let format = if self.binary { "binary" } else { "ascii" };
        self.text.push_str("<?xml version=\"1.0\"?>\n");
        let _ = writeln!(self.text, "<arts format=\"{format}\" version=\"1\">");
        self.element(data);
        self.text.push_str("</arts>\n");
        (self.text, self.payload)
    }

    fn element(&mut self, data: &Data) {
        match data {
            Data::Index(v) => {
                self.text.push_str("<Index>\n");
                if self.binary {
                    self.payload.extend_from_slice(&v.to_le_bytes());
                } else {
                    let _ = writeln!(self.text, "{v}");
                }
                self.text.push_str("</Index>\n");
            }
            Data::Numeric(v) => {
                self.text.push_str("<Numeric>\n");
                self.numbers(std::slice::from_ref(v), 1);
                self.text.push_str("</Numeric>\n");
            }
            Data::String(s) => self.string(s),
            Data::Vector(v) => self.vector(v, None),
            Data::Matrix(m) => self.matrix(m),
            Data::GriddedField2(gf) => self.gridded_field(gf),
            Data::XsecRecord(xr) => self.xsec_record(xr),
            Data::Array { element, items } => {
                let _ = writeln!(
                    self.text,
                    "<Array type=\"{}\" nelem=\"{}\">",
                    element.name(),
                    items.len()
                );
                for item in items {
                    self.element(item);
                }
                self.text.push_str("</Array>\n");
            }
        }
    }

    /// Numbers, `per_line` to a line in ascii mode.
    fn numbers(&mut self, values: &[f64], per_line: usize) {
        if self.binary {
            for v in values {
                self.payload.extend_from_slice(&v.to_le_bytes());
            }
            return;
        }
        for line in values.chunks(per_line.max(1)) {
            let mut first = true;
            for v in line {
                if !first {
                    self.text.push(' ');
                }
                first = false;
                let _ = write!(self.text, "{v:e}");
            }
            self.text.push('\n');
        }
    }

    fn string(&mut self, s: &str) {
        let _ = write!(self.text, "<String>\n\"{}\"\n</String>\n", escape(s));
    }

    fn vector(&mut self, values: &[f64], name: Option<&str>) {
        match name {
            Some(name) => {
                let _ = writeln!(
                    self.text,
                    "<Vector name=\"{}\" nelem=\"{}\">",
                    escape(name),
                    values.len()
                );
            }
            None => {
                let _ = writeln!(self.text, "<Vector nelem=\"{}\">", values.len());
            }
        }
        self.numbers(values, 1);
        self.text.push_str("</Vector>\n");
    }

    fn matrix(&mut self, m: &Matrix) {
        let _ = writeln!(
            self.text,
            "<Matrix nrows=\"{}\" ncols=\"{}\">",
            m.nrows(),
            m.ncols()
        );
        self.numbers(m.data(), m.ncols());
        self.text.push_str("</Matrix>\n");
    }

    fn gridded_field(&mut self, gf: &GriddedField2Data) {
        let _ = writeln!(self.text, "<GriddedField2 name=\"{}\">", escape(&gf.name));
        for (name, grid) in gf.grid_names.iter().zip(&gf.grids) {
            self.vector(grid, Some(name));
        }
        self.matrix(&gf.data);
        self.text.push_str("</GriddedField2>\n");
    }

    fn xsec_record(&mut self, xr: &XsecRecordData) {
        let _ = writeln!(self.text, "<XsecRecord version=\"{}\">", xr.version);
        self.string(xr.species.name());
        self.vector(&xr.fit_min_pressures, None);
        self.vector(&xr.fit_max_pressures, None);
        self.vector(&xr.fit_min_temperatures, None);
        self.vector(&xr.fit_max_temperatures, None);
        let _ = writeln!(
            self.text,
            "<Array type=\"GriddedField2\" nelem=\"{}\">",
            xr.fit_coeffs.len()
        );
        for band in &xr.fit_coeffs {
            self.gridded_field(band);
        }
        self.text.push_str("</Array>\n");
        self.text.push_str("</XsecRecord>\n");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn ascii_vector_document() {
        let (text, payload) = XmlWriter::new(FileFormat::Ascii).document(&Data::Vector(vec![1.0, 0.5]));
        assert_eq!(
            text,
            "<?xml version=\"1.0\"?>\n\
             <arts format=\"ascii\" version=\"1\">\n\
             <Vector nelem=\"2\">\n\
             1e0\n\
             5e-1\n\
             </Vector>\n\
             </arts>\n"
        );
        assert!(payload.is_empty());
    }

    #[test]
    fn binary_moves_numbers_to_payload() {
        let (text, payload) =
            XmlWriter::new(FileFormat::Binary).document(&Data::Vector(vec![1.0, 2.0]));
        assert!(text.contains("<arts format=\"binary\" version=\"1\">"));
        assert!(text.contains("<Vector nelem=\"2\">\n</Vector>"));
        assert_eq!(payload.len(), 16);
        assert_eq!(&payload[..8], &1.0f64.to_le_bytes());
    }

    #[test]
    fn strings_are_escaped() {
        let (text, _) = XmlWriter::new(FileFormat::Ascii).document(&Data::String("a<\"b\"".into()));
        assert!(text.contains("\"a&lt;&quot;b&quot;\""));
    }

    #[test]
    fn matrix_rows_on_lines() {
        let m = Matrix::new(2, 2, vec![1.0, 2.0, 3.0, 4.0]).unwrap();
        let (text, _) = XmlWriter::new(FileFormat::Ascii).document(&Data::Matrix(m));
        assert!(text.contains("<Matrix nrows=\"2\" ncols=\"2\">\n1e0 2e0\n3e0 4e0\n</Matrix>"));
    }
}
