//! Pan waypoints and their expansion into per-image crops.
//!
//! A pan is described by a handful of [`PanSpec`] waypoints that name only
//! some of the images in a sequence. [`expand_pans`] fills in a crop for
//! every image, interpolating linearly between waypoints, so that playing
//! the cropped images back-to-back looks like a continuous camera pan.
//!
//! # Example
//!
//! ```
//! use croppan::crop::CropBox;
//! use croppan::pan::{expand_pans, PanSpec};
//!
//! let images = ["F0.jpg", "F1.jpg", "F2.jpg", "F3.jpg"];
//! let pans = vec![PanSpec::pan(
//!     "F0.jpg",
//!     Some(CropBox::new(0, 10, 200, 210)),
//!     "F2.jpg",
//!     CropBox::new(2, 12, 202, 212),
//! )];
//!
//! let frames = expand_pans(&images, pans)
//!     .unwrap()
//!     .collect::<Result<Vec<_>, _>>()
//!     .unwrap();
//! assert_eq!(frames.len(), 4);
//! assert_eq!(frames[1].crop, CropBox::new(1, 11, 201, 211));
//! ```

mod expand;
pub mod load;
mod spec;

pub use expand::{expand_pans, Expansion, Frame};
pub use load::{load_pans, pans_from_str};
pub use spec::PanSpec;
