//! Reading pan specs from JSON or YAML.
//!
//! A pan source is either a path to a file or the JSON text itself. The
//! document is a single waypoint object or a list of them:
//!
//! ```json
//! [{"image0": "F00.jpg", "crop0": "0,10,200,210"},
//!  {"image0": "F05.jpg", "crop0": null,
//!   "image1": "F10.jpg", "crop1": "100,110,300,310"}]
//! ```
//!
//! Recognized fields are `image0`, `crop0`, `image1`, `crop1` and `n`. Crop
//! fields are crop spec strings (see [`crate::crop`]) or literal
//! `[x1, y1, x2, y2]` arrays. String crops are resolved right away, once,
//! against the size of their image (`image0` for `crop0`, `image1` for
//! `crop1`).

use std::fs;
use std::path::Path;

use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use super::PanSpec;
use crate::crop::{CropBox, CropSpec};
use crate::error::CroppanError;

/// Origin reported in errors for pan text given directly.
const INLINE_ORIGIN: &str = "<inline>";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum SourceFormat {
    Json,
    Yaml,
}

impl SourceFormat {
    fn for_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml") => {
                SourceFormat::Yaml
            }
            _ => SourceFormat::Json,
        }
    }
}

/// A waypoint as written in the source document, before crop resolution
/// and defaulting.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawPanSpec {
    image0: Option<String>,
    crop0: Option<RawCrop>,
    image1: Option<String>,
    crop1: Option<RawCrop>,
    n: Option<i64>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawCrop {
    Spec(String),
    Box(CropBox),
}

impl RawCrop {
    fn resolve(self, image: Option<&str>) -> Result<CropBox, CroppanError> {
        match self {
            RawCrop::Spec(spec) => CropSpec::parse(&spec)?.resolve_for_image(image),
            RawCrop::Box(crop) => Ok(crop),
        }
    }
}

impl RawPanSpec {
    fn into_pan_spec(self) -> Result<PanSpec, CroppanError> {
        let crop0 = self
            .crop0
            .map(|c| c.resolve(self.image0.as_deref()))
            .transpose()?;
        let target_image = self.image1.as_deref().or(self.image0.as_deref());
        let crop1 = self.crop1.map(|c| c.resolve(target_image)).transpose()?;

        PanSpec::new(self.image0, crop0, self.image1, crop1, self.n)
    }
}

/// Loads pan specs from a file path, or from `source` itself if it is not a
/// readable file.
///
/// Files ending in `.yaml` or `.yml` are read as YAML, everything else as
/// JSON.
///
/// # Errors
/// Returns an error if the document cannot be parsed, a waypoint has
/// unknown or mistyped fields, or one of its crops cannot be resolved.
pub fn load_pans(source: &str) -> Result<Vec<PanSpec>, CroppanError> {
    let path = Path::new(source);
    match fs::read_to_string(path) {
        Ok(text) => {
            debug!(path = source, "reading pan specs from file");
            decode(&text, source, SourceFormat::for_path(path))
        }
        Err(e) => {
            debug!(error = %e, "pan source is not a readable file, parsing it as JSON text");
            pans_from_str(source)
        }
    }
}

/// Parses pan specs from JSON text.
///
/// Useful for testing without file I/O.
pub fn pans_from_str(json: &str) -> Result<Vec<PanSpec>, CroppanError> {
    decode(json, INLINE_ORIGIN, SourceFormat::Json)
}

/// Fuzz-only entrypoint for pan document decoding, in either source format.
#[cfg(feature = "fuzzing")]
pub fn fuzz_decode_pans(input: &str, yaml: bool) -> Result<(), CroppanError> {
    let format = if yaml {
        SourceFormat::Yaml
    } else {
        SourceFormat::Json
    };
    let _ = decode(input, "<fuzz>", format)?;
    Ok(())
}

fn decode(text: &str, origin: &str, format: SourceFormat) -> Result<Vec<PanSpec>, CroppanError> {
    let document: Value = match format {
        SourceFormat::Json => {
            serde_json::from_str(text).map_err(|source| CroppanError::PanJsonParse {
                origin: origin.to_string(),
                source,
            })?
        }
        SourceFormat::Yaml => {
            serde_yaml::from_str(text).map_err(|source| CroppanError::PanYamlParse {
                origin: origin.to_string(),
                source,
            })?
        }
    };

    let items = match document {
        Value::Array(items) => items,
        single => vec![single],
    };

    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| {
            let invalid = |message: String| CroppanError::InvalidPanSpec {
                origin: origin.to_string(),
                index,
                message,
            };

            let raw: RawPanSpec =
                serde_json::from_value(item).map_err(|e| invalid(e.to_string()))?;
            if index == 0 && raw.image0.is_none() {
                return Err(invalid("the first pan spec must name image0".to_string()));
            }
            raw.into_pan_spec()
        })
        .collect()
}
