//! Absolute crop boxes in `(x1, y1, x2, y2)` pixel form.

use std::fmt;

use serde::{Deserialize, Serialize};

/// An absolute crop rectangle within one specific image.
///
/// Coordinates follow the usual image convention: `(x1, y1)` is the
/// upper-left corner and `(x2, y2)` the lower-right one.
///
/// Note: This type does NOT enforce that `x1 <= x2` and `y1 <= y2`.
/// Boxes are built from user input and interpolation; the rendering layer
/// is where an unusable box gets rejected.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct CropBox {
    pub x1: i64,
    pub y1: i64,
    pub x2: i64,
    pub y2: i64,
}

impl CropBox {
    /// Creates a new crop box from explicit coordinates.
    #[inline]
    pub fn new(x1: i64, y1: i64, x2: i64, y2: i64) -> Self {
        Self { x1, y1, x2, y2 }
    }

    /// Returns the width of the box.
    ///
    /// May be negative if the box is malformed (x2 < x1).
    #[inline]
    pub fn width(&self) -> i64 {
        self.x2 - self.x1
    }

    /// Returns the height of the box.
    ///
    /// May be negative if the box is malformed (y2 < y1).
    #[inline]
    pub fn height(&self) -> i64 {
        self.y2 - self.y1
    }

    /// Returns true if the box is properly ordered on both axes.
    #[inline]
    pub fn is_ordered(&self) -> bool {
        self.x1 <= self.x2 && self.y1 <= self.y2
    }

    /// Returns the coordinates as an `[x1, y1, x2, y2]` array.
    #[inline]
    pub fn to_array(self) -> [i64; 4] {
        [self.x1, self.y1, self.x2, self.y2]
    }

    /// Returns the coordinates as floats, for interpolation.
    #[inline]
    pub fn to_f64_array(self) -> [f64; 4] {
        self.to_array().map(|v| v as f64)
    }

    /// Rounds interpolated coordinates to the nearest pixel.
    ///
    /// Halves round up (`floor(v + 0.5)`), so `0.5` becomes `1` and `-0.5`
    /// becomes `0`.
    pub fn from_f64_rounded(coords: [f64; 4]) -> Self {
        let [x1, y1, x2, y2] = coords.map(|v| (v + 0.5).floor() as i64);
        Self::new(x1, y1, x2, y2)
    }
}

impl From<[i64; 4]> for CropBox {
    fn from(coords: [i64; 4]) -> Self {
        let [x1, y1, x2, y2] = coords;
        Self::new(x1, y1, x2, y2)
    }
}

impl fmt::Display for CropBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {}, {})", self.x1, self.y1, self.x2, self.y2)
    }
}

// Boxes travel as plain 4-element arrays in pan files and frame listings
impl Serialize for CropBox {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_array().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for CropBox {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let coords = <[i64; 4]>::deserialize(deserializer)?;
        Ok(CropBox::from(coords))
    }
}
