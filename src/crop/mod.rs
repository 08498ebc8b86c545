//! Crop descriptions and their resolution against concrete images.
//!
//! A crop is written by users as a string of four comma-separated terms,
//! `"x1,y1,x2,y2"`. Each term may be absolute, relative to the image origin,
//! relative to the image extent, or a size measured from the first
//! coordinate of the same axis. Relative terms can only be turned into
//! numbers once the size of the image they apply to is known, so parsing
//! and resolution are two separate steps:
//!
//! 1. [`CropSpec::parse`] turns the text into four [`CoordTerm`]s.
//! 2. [`CropSpec::resolve`] evaluates them against an [`ImageExtent`],
//!    producing an absolute [`CropBox`].
//!
//! # Example
//!
//! ```
//! use croppan::crop::{CropBox, CropSpec, ImageExtent};
//!
//! let spec = CropSpec::parse("R+10, R+10, R-10, S200").unwrap();
//! let crop = spec.resolve(ImageExtent::new(1200, 1600)).unwrap();
//! assert_eq!(crop, CropBox::new(10, 10, 1190, 210));
//! ```

mod cropbox;
mod extent;
mod spec;
mod term;

// Re-export core types for convenient access
pub use cropbox::CropBox;
pub use extent::ImageExtent;
pub use spec::CropSpec;
pub use term::CoordTerm;
