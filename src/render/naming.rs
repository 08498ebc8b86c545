//! Output file names for rendered frames.

use std::path::{Path, PathBuf};

/// Default output name template.
pub const DEFAULT_TEMPLATE: &str = "{prefix}{stem}-{seq}{ext}";

/// Default value substituted for `{prefix}`.
pub const DEFAULT_PREFIX: &str = "pan-";

/// Builds output paths from a name template.
///
/// Placeholders:
/// - `{prefix}`: the configured prefix
/// - `{name}`: the source file name
/// - `{stem}`: the source file name without extension
/// - `{ext}`: the source extension with its leading dot, or nothing
/// - `{seq}`: the frame number, zero-padded to five digits
///
/// The generated name goes next to the source image, or into `out_dir` if
/// one is set.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OutputNaming {
    pub template: String,
    pub prefix: String,
    pub out_dir: Option<PathBuf>,
}

impl Default for OutputNaming {
    fn default() -> Self {
        Self {
            template: DEFAULT_TEMPLATE.to_string(),
            prefix: DEFAULT_PREFIX.to_string(),
            out_dir: None,
        }
    }
}

impl OutputNaming {
    /// Returns the output path for frame `seq` of source image `src`.
    pub fn output_path(&self, src: &Path, seq: usize) -> PathBuf {
        let name = src.file_name().and_then(|s| s.to_str()).unwrap_or_default();
        let stem = src.file_stem().and_then(|s| s.to_str()).unwrap_or_default();
        let ext = src
            .extension()
            .and_then(|s| s.to_str())
            .map(|e| format!(".{e}"))
            .unwrap_or_default();

        let seq = format!("{seq:05}");
        let file_name = self.expand(|key| match key {
            "prefix" => Some(self.prefix.as_str()),
            "name" => Some(name),
            "stem" => Some(stem),
            "ext" => Some(ext.as_str()),
            "seq" => Some(seq.as_str()),
            _ => None,
        });

        match &self.out_dir {
            Some(dir) => dir.join(file_name),
            None => src.with_file_name(file_name),
        }
    }

    /// Substitutes placeholders in one left-to-right pass over the template,
    /// so substituted text is never scanned again. Unknown placeholders and
    /// unmatched braces are kept literally.
    fn expand<'a>(&self, lookup: impl Fn(&str) -> Option<&'a str>) -> String {
        let mut out = String::with_capacity(self.template.len());
        let mut rest = self.template.as_str();

        while let Some(open) = rest.find('{') {
            out.push_str(&rest[..open]);
            let tail = &rest[open..];
            let value = tail
                .find('}')
                .and_then(|close| lookup(&tail[1..close]).map(|v| (v, close)));
            match value {
                Some((value, close)) => {
                    out.push_str(value);
                    rest = &tail[close + 1..];
                }
                None => {
                    out.push('{');
                    rest = &tail[1..];
                }
            }
        }
        out.push_str(rest);
        out
    }
}
