//! Image sizes used to resolve relative crop terms.

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use tracing::debug;

use crate::error::CroppanError;

/// The pixel size of the image a crop applies to, when known.
///
/// Either dimension may be unknown; crops that are entirely absolute (or
/// that only use origin-relative and size terms) resolve without one.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ImageExtent {
    pub width: Option<i64>,
    pub height: Option<i64>,
}

impl ImageExtent {
    /// Creates a known extent.
    pub fn new(width: i64, height: i64) -> Self {
        Self {
            width: Some(width),
            height: Some(height),
        }
    }

    /// An extent with neither dimension known.
    pub fn unknown() -> Self {
        Self::default()
    }

    /// Returns true if both dimensions are known.
    pub fn is_known(&self) -> bool {
        self.width.is_some() && self.height.is_some()
    }

    /// Reads the size of the named image from its file header.
    ///
    /// No name, or a name that does not exist on disk, yields an unknown
    /// extent rather than an error. That lets crops be described for
    /// placeholder image names as long as they do not depend on the size.
    ///
    /// # Errors
    /// Returns [`CroppanError::ImageSize`] if the file exists but its size
    /// cannot be read.
    pub fn probe(image: Option<&str>) -> Result<Self, CroppanError> {
        let Some(name) = image else {
            return Ok(Self::unknown());
        };
        let path = Path::new(name);

        if let Err(e) = fs::metadata(path) {
            if e.kind() == ErrorKind::NotFound {
                debug!(image = name, "image not found, resolving crop without its size");
                return Ok(Self::unknown());
            }
        }

        let size = imagesize::size(path).map_err(|source| CroppanError::ImageSize {
            path: path.to_path_buf(),
            source,
        })?;

        Ok(Self::new(size.width as i64, size.height as i64))
    }
}
