//! Save options for XML output.

use crate::error::{ClassError, ClassResult};
use crate::native::FileFormat;

/// How [`ArtsClass::savexml`](super::ArtsClass::savexml) writes a file.
///
/// The default is ascii output that overwrites an existing file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SaveOptions {
    pub format: FileFormat,
    /// Overwrite an existing destination. When unset, saving to an existing
    /// path fails.
    pub clobber: bool,
}

impl Default for SaveOptions {
    fn default() -> Self {
        Self {
            format: FileFormat::Ascii,
            clobber: true,
        }
    }
}

impl SaveOptions {
    pub fn new(format: FileFormat) -> Self {
        Self {
            format,
            ..Self::default()
        }
    }

    /// Options from a format tag: `"ascii"`, `"zascii"` or `"binary"`.
    pub fn from_tag(tag: &str, clobber: bool) -> ClassResult<Self> {
        let format = tag
            .parse()
            .map_err(|_| ClassError::InvalidArgument(format!("unknown file format \"{tag}\"")))?;
        Ok(Self { format, clobber })
    }

    pub fn clobber(mut self, clobber: bool) -> Self {
        self.clobber = clobber;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_ascii_with_clobber() {
        let options = SaveOptions::default();
        assert_eq!(options.format, FileFormat::Ascii);
        assert!(options.clobber);
        assert!(!SaveOptions::new(FileFormat::Binary).clobber(false).clobber);
    }

    #[test]
    fn from_tag() {
        assert_eq!(
            SaveOptions::from_tag("binary", false).unwrap(),
            SaveOptions::new(FileFormat::Binary).clobber(false)
        );
        assert!(matches!(
            SaveOptions::from_tag("xml", true),
            Err(ClassError::InvalidArgument(_))
        ));
    }
}
