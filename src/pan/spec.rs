//! The pan waypoint type.

use crate::crop::CropBox;
use crate::error::CroppanError;

/// A waypoint: a known crop at one image, optionally interpolating toward a
/// target crop at a later image.
///
/// Defaults are applied once, at construction:
/// - `image1` defaults to `image0` (the waypoint holds on a single image)
/// - `crop1` defaults to `crop0` (the crop does not move)
/// - `n` defaults to 1
///
/// A `crop0` of `None` means "start from whatever crop is in effect when
/// this waypoint is reached", which is normally the previous waypoint's
/// `crop1`. It is not allowed on the first waypoint of a sequence.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PanSpec {
    image0: Option<String>,
    crop0: Option<CropBox>,
    image1: Option<String>,
    crop1: Option<CropBox>,
    n: u32,
}

impl PanSpec {
    /// Creates a waypoint, applying the defaulting rules.
    ///
    /// # Errors
    /// Returns [`CroppanError::InvalidRepeatCount`] if `n` is given and is
    /// not a positive 32-bit count.
    pub fn new(
        image0: Option<String>,
        crop0: Option<CropBox>,
        image1: Option<String>,
        crop1: Option<CropBox>,
        n: Option<i64>,
    ) -> Result<Self, CroppanError> {
        let n = match n {
            None => 1,
            Some(value) => u32::try_from(value)
                .ok()
                .filter(|&n| n >= 1)
                .ok_or(CroppanError::InvalidRepeatCount { value })?,
        };

        Ok(Self {
            image1: image1.or_else(|| image0.clone()),
            crop1: crop1.or(crop0),
            image0,
            crop0,
            n,
        })
    }

    /// A single-image waypoint that holds `crop0`.
    pub fn hold(image0: impl Into<String>, crop0: Option<CropBox>) -> Self {
        let image0 = image0.into();
        Self {
            image1: Some(image0.clone()),
            image0: Some(image0),
            crop0,
            crop1: crop0,
            n: 1,
        }
    }

    /// A waypoint that pans from `crop0` at `image0` to `crop1` at `image1`.
    pub fn pan(
        image0: impl Into<String>,
        crop0: Option<CropBox>,
        image1: impl Into<String>,
        crop1: CropBox,
    ) -> Self {
        Self {
            image0: Some(image0.into()),
            crop0,
            image1: Some(image1.into()),
            crop1: Some(crop1),
            n: 1,
        }
    }

    /// Returns the same waypoint with each image emitted `n` times.
    ///
    /// # Errors
    /// Returns [`CroppanError::InvalidRepeatCount`] if `n` is zero.
    pub fn repeated(mut self, n: u32) -> Result<Self, CroppanError> {
        if n == 0 {
            return Err(CroppanError::InvalidRepeatCount { value: 0 });
        }
        self.n = n;
        Ok(self)
    }

    /// Returns the same waypoint with a different target crop.
    pub fn with_crop1(mut self, crop1: CropBox) -> Self {
        self.crop1 = Some(crop1);
        self
    }

    /// The image this waypoint starts at.
    pub fn image0(&self) -> Option<&str> {
        self.image0.as_deref()
    }

    /// The crop at `image0`, or `None` to inherit the crop in effect.
    pub fn crop0(&self) -> Option<CropBox> {
        self.crop0
    }

    /// The image at which `crop1` is reached.
    pub fn image1(&self) -> Option<&str> {
        self.image1.as_deref()
    }

    /// The target crop at `image1`.
    pub fn crop1(&self) -> Option<CropBox> {
        self.crop1
    }

    /// How many times each image of this waypoint's span is emitted.
    pub fn n(&self) -> u32 {
        self.n
    }
}
