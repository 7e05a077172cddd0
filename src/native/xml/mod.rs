//! ARTS XML file I/O.
//!
//! `ascii` and `zascii` files hold the whole document as text, the latter
//! gzip-compressed. `binary` files hold the element skeleton, with every
//! number stored little-endian in a companion `<file>.bin`.

mod reader;
mod writer;

use std::fmt;
use std::fs;
use std::io::Read as _;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::data::Data;
use crate::error::NativeError;

/// Output format of an XML save.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileFormat {
    #[default]
    Ascii,
    #[serde(rename = "zascii")]
    ZippedAscii,
    Binary,
}

impl FileFormat {
    /// Code used by the `xmlsave*` C functions.
    pub fn code(self) -> i64 {
        match self {
            FileFormat::Ascii => 0,
            FileFormat::ZippedAscii => 1,
            FileFormat::Binary => 2,
        }
    }

    pub fn from_code(code: i64) -> Result<Self, NativeError> {
        match code {
            0 => Ok(FileFormat::Ascii),
            1 => Ok(FileFormat::ZippedAscii),
            2 => Ok(FileFormat::Binary),
            other => Err(NativeError::InvalidArgument(format!(
                "unknown file format code {other}"
            ))),
        }
    }

    /// Format tag as accepted by the scripting side.
    pub fn tag(self) -> &'static str {
        match self {
            FileFormat::Ascii => "ascii",
            FileFormat::ZippedAscii => "zascii",
            FileFormat::Binary => "binary",
        }
    }
}

impl fmt::Display for FileFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for FileFormat {
    type Err = NativeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ascii" => Ok(FileFormat::Ascii),
            "zascii" => Ok(FileFormat::ZippedAscii),
            "binary" => Ok(FileFormat::Binary),
            other => Err(NativeError::InvalidArgument(format!(
                "unknown file format \"{other}\""
            ))),
        }
    }
}

fn with_suffix(path: &Path, suffix: &str) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(suffix);
    PathBuf::from(name)
}

fn is_gzip_name(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == "gz")
}

/// Companion file holding the numbers of a binary document.
pub fn bin_path(path: &Path) -> PathBuf {
    with_suffix(path, ".bin")
}

/// Write `data` to `path` and return the path actually written.
///
/// Zipped output gets `.gz` appended unless the name already ends in it.
/// With `clobber` unset an existing destination is an error.
pub fn save(
    data: &Data,
    path: &Path,
    format: FileFormat,
    clobber: bool,
) -> Result<PathBuf, NativeError> {
    let target = match format {
        FileFormat::ZippedAscii if !is_gzip_name(path) => with_suffix(path, ".gz"),
        _ => path.to_path_buf(),
    };
    if !clobber && target.exists() {
        return Err(NativeError::file(&target, "file exists and clobbering is disabled"));
    }

    let (text, payload) = writer::XmlWriter::new(format).document(data);
    match format {
        FileFormat::Ascii => {
            fs::write(&target, text).map_err(|e| NativeError::file(&target, e))?;
        }
        FileFormat::ZippedAscii => write_gzip(&target, text.as_bytes())?,
        FileFormat::Binary => {
            let bin = bin_path(&target);
            if !clobber && bin.exists() {
                return Err(NativeError::file(&bin, "file exists and clobbering is disabled"));
            }
            fs::write(&target, text).map_err(|e| NativeError::file(&target, e))?;
            fs::write(&bin, payload).map_err(|e| NativeError::file(&bin, e))?;
        }
    }
    Ok(target)
}

#[cfg(feature = "zascii")]
fn write_gzip(path: &Path, bytes: &[u8]) -> Result<(), NativeError> {
    use flate2::Compression;
    use flate2::write::GzEncoder;
    use std::io::Write as _;

    let file = fs::File::create(path).map_err(|e| NativeError::file(path, e))?;
    let mut encoder = GzEncoder::new(file, Compression::default());
    encoder
        .write_all(bytes)
        .and_then(|()| encoder.finish())
        .and_then(|mut file| file.flush())
        .map_err(|e| NativeError::file(path, e))
}

#[cfg(not(feature = "zascii"))]
fn write_gzip(path: &Path, _bytes: &[u8]) -> Result<(), NativeError> {
    Err(NativeError::file(path, "built without zascii support"))
}

#[cfg(feature = "zascii")]
fn read_gzip(path: &Path) -> Result<String, NativeError> {
    let file = fs::File::open(path).map_err(|e| NativeError::file(path, e))?;
    let mut text = String::new();
    flate2::read::GzDecoder::new(file)
        .read_to_string(&mut text)
        .map_err(|e| NativeError::file(path, e))?;
    Ok(text)
}

#[cfg(not(feature = "zascii"))]
fn read_gzip(path: &Path) -> Result<String, NativeError> {
    Err(NativeError::file(path, "built without zascii support"))
}

/// Read the value stored at `path`, falling back to `path.gz` when the plain
/// name does not exist.
pub fn read(path: &Path) -> Result<Data, NativeError> {
    let source = if path.exists() {
        path.to_path_buf()
    } else {
        let zipped = with_suffix(path, ".gz");
        if !zipped.exists() {
            return Err(NativeError::file(path, "no such file"));
        }
        zipped
    };

    let text = if is_gzip_name(&source) {
        read_gzip(&source)?
    } else {
        let mut text = String::new();
        fs::File::open(&source)
            .and_then(|mut file| file.read_to_string(&mut text))
            .map_err(|e| NativeError::file(&source, e))?;
        text
    };

    let format = reader::document_format(&text).map_err(|e| NativeError::file(&source, e))?;
    let payload = match format {
        FileFormat::Binary => {
            let bin = bin_path(&source);
            Some(fs::read(&bin).map_err(|e| NativeError::file(&bin, e))?)
        }
        _ => None,
    };
    reader::parse(&text, payload).map_err(|e| NativeError::file(&source, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::native::{GriddedField2Data, Matrix};

    fn sample() -> Data {
        Data::from(GriddedField2Data {
            name: "coeffs".into(),
            grid_names: ["f".into(), "c".into()],
            grids: [vec![1.0, 2.0], vec![0.5]],
            data: Matrix::new(2, 1, vec![3.0, 4.0]).unwrap(),
        })
    }

    #[test]
    fn format_codes_and_tags() {
        for format in [FileFormat::Ascii, FileFormat::ZippedAscii, FileFormat::Binary] {
            assert_eq!(FileFormat::from_code(format.code()).unwrap(), format);
            assert_eq!(format.tag().parse::<FileFormat>().unwrap(), format);
        }
        assert!(FileFormat::from_code(3).is_err());
        assert!("xml".parse::<FileFormat>().is_err());
        assert_eq!(FileFormat::default(), FileFormat::Ascii);
    }

    #[test]
    fn ascii_file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("gf.xml");
        let written = save(&sample(), &path, FileFormat::Ascii, true).unwrap();
        assert_eq!(written, path);
        assert_eq!(read(&path).unwrap(), sample());
    }

    #[test]
    fn binary_writes_companion_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("gf.xml");
        save(&sample(), &path, FileFormat::Binary, true).unwrap();
        assert!(bin_path(&path).exists());
        assert_eq!(read(&path).unwrap(), sample());

        fs::remove_file(bin_path(&path)).unwrap();
        assert!(read(&path).is_err());
    }

    #[cfg(feature = "zascii")]
    #[test]
    fn zipped_name_gets_suffix_and_read_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("gf.xml");
        let written = save(&sample(), &path, FileFormat::ZippedAscii, true).unwrap();
        assert_eq!(written, dir.path().join("gf.xml.gz"));
        assert!(!path.exists());
        assert_eq!(read(&path).unwrap(), sample());
    }

    #[test]
    fn no_clobber_refuses_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("gf.xml");
        fs::write(&path, "occupied").unwrap();
        assert!(matches!(
            save(&sample(), &path, FileFormat::Ascii, false),
            Err(NativeError::File { .. })
        ));
        assert_eq!(fs::read_to_string(&path).unwrap(), "occupied");
        save(&sample(), &path, FileFormat::Ascii, true).unwrap();
    }

    #[test]
    fn failures_are_file_errors() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.xml");
        assert!(matches!(read(&missing), Err(NativeError::File { .. })));

        let garbage = dir.path().join("garbage.xml");
        fs::write(&garbage, "not xml at all").unwrap();
        assert!(matches!(read(&garbage), Err(NativeError::File { .. })));
    }
}
