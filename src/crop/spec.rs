//! Four-term crop specs (`"x1,y1,x2,y2"`).

use std::fmt;
use std::str::FromStr;

use super::{CoordTerm, CropBox, ImageExtent};
use crate::error::CroppanError;

/// Number of terms in a crop spec.
const TERM_COUNT: usize = 4;

/// A parsed, not yet resolved crop description.
///
/// Terms are stored in `x1, y1, x2, y2` order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CropSpec {
    terms: [CoordTerm; TERM_COUNT],
}

impl CropSpec {
    /// Creates a crop spec from already parsed terms.
    ///
    /// # Errors
    /// Returns [`CroppanError::InvalidCropSpec`] if x1 or y1 is a size
    /// offset, which has no first coordinate to be measured from.
    pub fn new(terms: [CoordTerm; TERM_COUNT]) -> Result<Self, CroppanError> {
        let spec = Self { terms };
        for (idx, term) in terms[..2].iter().enumerate() {
            if term.needs_anchor() {
                return Err(CroppanError::InvalidCropSpec {
                    spec: spec.to_string(),
                    message: format!(
                        "size term '{}' cannot be used for {}",
                        term,
                        ["x1", "y1"][idx]
                    ),
                });
            }
        }
        Ok(spec)
    }

    /// Parses a comma-separated crop spec.
    ///
    /// Missing trailing fields default to `+0`, so `"10,10"` keeps everything
    /// right of and below `(10, 10)` and an empty string selects the whole
    /// image.
    ///
    /// # Errors
    /// Returns an error if there are more than four fields or any field is
    /// not a valid [`CoordTerm`].
    pub fn parse(s: &str) -> Result<Self, CroppanError> {
        let mut terms = [CoordTerm::ZeroSentinel; TERM_COUNT];

        if !s.trim().is_empty() {
            let fields: Vec<&str> = s.split(',').collect();
            if fields.len() > TERM_COUNT {
                return Err(CroppanError::InvalidCropSpec {
                    spec: s.to_string(),
                    message: format!("too many fields ({}, expected {})", fields.len(), TERM_COUNT),
                });
            }
            for (slot, field) in terms.iter_mut().zip(fields) {
                *slot = CoordTerm::parse(field)?;
            }
        }

        Self::new(terms).map_err(|e| match e {
            CroppanError::InvalidCropSpec { message, .. } => CroppanError::InvalidCropSpec {
                spec: s.to_string(),
                message,
            },
            other => other,
        })
    }

    /// Returns the terms in `x1, y1, x2, y2` order.
    pub fn terms(&self) -> &[CoordTerm; TERM_COUNT] {
        &self.terms
    }

    /// Resolves the spec against an image size.
    ///
    /// Each axis is resolved first coordinate first, so that x2 and y2 can
    /// refer to the resolved x1 and y1.
    pub fn resolve(&self, extent: ImageExtent) -> Result<CropBox, CroppanError> {
        let [tx1, ty1, tx2, ty2] = &self.terms;
        let x1 = tx1.evaluate(None, extent.width)?;
        let y1 = ty1.evaluate(None, extent.height)?;
        let x2 = tx2.evaluate(Some(x1), extent.width)?;
        let y2 = ty2.evaluate(Some(y1), extent.height)?;
        Ok(CropBox::new(x1, y1, x2, y2))
    }

    /// Resolves the spec against the named image, reading its size from disk.
    ///
    /// See [`ImageExtent::probe`] for how missing images are handled.
    pub fn resolve_for_image(&self, image: Option<&str>) -> Result<CropBox, CroppanError> {
        self.resolve(ImageExtent::probe(image)?)
    }
}

impl FromStr for CropSpec {
    type Err = CroppanError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for CropSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [x1, y1, x2, y2] = &self.terms;
        write!(f, "{x1},{y1},{x2},{y2}")
    }
}
