use std::path::PathBuf;
use thiserror::Error;

use crate::crop::CropBox;

/// The main error type for croppan operations.
#[derive(Debug, Error)]
pub enum CroppanError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid crop term '{token}': {message}")]
    InvalidCropTerm { token: String, message: String },

    #[error("Invalid crop spec '{spec}': {message}")]
    InvalidCropSpec { spec: String, message: String },

    #[error("Crop term '{term}' needs an image size, but none is available")]
    MissingExtent { term: String },

    #[error("Crop term '{term}' is relative to a first coordinate that has not been resolved")]
    MissingAnchor { term: String },

    #[error("Failed to read image size of {path}: {source}")]
    ImageSize {
        path: PathBuf,
        #[source]
        source: imagesize::ImageError,
    },

    #[error("Failed to parse pan JSON from {origin}: {source}")]
    PanJsonParse {
        origin: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to parse pan YAML from {origin}: {source}")]
    PanYamlParse {
        origin: String,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("Invalid pan spec #{index} in {origin}: {message}")]
    InvalidPanSpec {
        origin: String,
        index: usize,
        message: String,
    },

    #[error("Invalid repeat count {value} (must be at least 1)")]
    InvalidRepeatCount { value: i64 },

    #[error("No pan specs given")]
    EmptyPanList,

    #[error("The first pan spec (at {image:?}) has no starting crop to begin from")]
    MissingInitialCrop { image: Option<String> },

    #[error("Pan spec starting at '{image}' interpolates but has no target crop")]
    MissingTargetCrop { image: String },

    #[error("Crop box {crop} cannot be applied to {image}")]
    InvalidCropBox { image: String, crop: CropBox },

    #[error("Failed to open image {path}: {source}")]
    ImageOpen {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("Failed to save image {path}: {source}")]
    ImageSave {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
}
