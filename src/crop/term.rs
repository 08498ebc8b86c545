//! Single coordinate terms of a crop spec.
//!
//! Term grammar, dispatched on the first character:
//!
//! | Token          | Term                        | Value                          |
//! |----------------|-----------------------------|--------------------------------|
//! | `120`          | [`CoordTerm::Absolute`]     | `120`                          |
//! | `+10`, `R10`   | [`CoordTerm::RelativeOrigin`] | `10`                         |
//! | `-10`, `R-10`  | [`CoordTerm::RelativeExtent`] | `extent - 10`                |
//! | `R0`, `+0`     | [`CoordTerm::ZeroSentinel`] | `0` first, `extent` second     |
//! | `S200`         | [`CoordTerm::SizeOffset`]   | first coordinate `+ 200`       |
//!
//! The `R` prefix exists because a bare leading `-` is awkward on command
//! lines; `R+10` and `+10` mean the same thing.

use std::fmt;

use crate::error::CroppanError;

/// One deferred crop coordinate.
///
/// Terms are evaluated against the image they apply to; see
/// [`CoordTerm::evaluate`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CoordTerm {
    /// A literal pixel coordinate.
    Absolute(i64),
    /// An offset from the image origin (always positive).
    RelativeOrigin(i64),
    /// An offset from the far edge of the image (always negative).
    RelativeExtent(i64),
    /// Zero as the first coordinate of an axis, the full extent as the second.
    ZeroSentinel,
    /// A size added to the already-resolved first coordinate of the axis.
    SizeOffset(i64),
}

impl CoordTerm {
    /// Parses one coordinate token. Surrounding whitespace is ignored.
    ///
    /// # Errors
    /// Returns [`CroppanError::InvalidCropTerm`] if the token is empty or the
    /// part after any prefix is not an integer of the expected form.
    pub fn parse(token: &str) -> Result<Self, CroppanError> {
        let trimmed = token.trim();
        let Some(first) = trimmed.chars().next() else {
            return Err(invalid(token, "empty coordinate"));
        };

        match first {
            'R' | 'r' => Self::parse_relative(token, &trimmed[1..]),
            '+' | '-' => Self::parse_relative(token, trimmed),
            'S' | 's' => parse_digits(token, &trimmed[1..]).map(CoordTerm::SizeOffset),
            _ => parse_digits(token, trimmed).map(CoordTerm::Absolute),
        }
    }

    fn parse_relative(token: &str, body: &str) -> Result<Self, CroppanError> {
        let (negative, digits) = match body.as_bytes().first() {
            Some(b'-') => (true, &body[1..]),
            Some(b'+') => (false, &body[1..]),
            _ => (false, body),
        };
        let magnitude = parse_digits(token, digits)?;

        Ok(match (magnitude, negative) {
            (0, _) => CoordTerm::ZeroSentinel,
            (m, false) => CoordTerm::RelativeOrigin(m),
            (m, true) => CoordTerm::RelativeExtent(-m),
        })
    }

    /// Returns true if this term can only be used as the second coordinate
    /// of an axis.
    pub fn needs_anchor(&self) -> bool {
        matches!(self, CoordTerm::SizeOffset(_))
    }

    /// Resolves the term to a pixel coordinate.
    ///
    /// `anchor` is `None` when evaluating the first coordinate of an axis
    /// (x1 or y1) and the resolved first coordinate when evaluating the
    /// second one (x2 or y2). `extent` is the image width or height along
    /// that axis, if known.
    ///
    /// # Errors
    /// - [`CroppanError::MissingExtent`] if the term is relative to the image
    ///   extent and no extent is known.
    /// - [`CroppanError::MissingAnchor`] if a size offset is evaluated as a
    ///   first coordinate.
    pub fn evaluate(&self, anchor: Option<i64>, extent: Option<i64>) -> Result<i64, CroppanError> {
        let missing_extent = || CroppanError::MissingExtent {
            term: self.to_string(),
        };

        match *self {
            CoordTerm::Absolute(v) | CoordTerm::RelativeOrigin(v) => Ok(v),
            CoordTerm::RelativeExtent(v) => extent
                .map(|e| e.saturating_add(v))
                .ok_or_else(missing_extent),
            CoordTerm::ZeroSentinel => match anchor {
                None => Ok(0),
                Some(_) => extent.ok_or_else(missing_extent),
            },
            CoordTerm::SizeOffset(v) => {
                anchor
                    .map(|a| a.saturating_add(v))
                    .ok_or_else(|| CroppanError::MissingAnchor {
                        term: self.to_string(),
                    })
            }
        }
    }
}

impl fmt::Display for CoordTerm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CoordTerm::Absolute(v) => write!(f, "{v}"),
            CoordTerm::RelativeOrigin(v) => write!(f, "R+{v}"),
            CoordTerm::RelativeExtent(v) => write!(f, "R{v}"),
            CoordTerm::ZeroSentinel => write!(f, "R0"),
            CoordTerm::SizeOffset(v) => write!(f, "S{v}"),
        }
    }
}

/// Parses an unsigned run of ASCII digits.
fn parse_digits(token: &str, digits: &str) -> Result<i64, CroppanError> {
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid(token, "expected an integer"));
    }
    digits
        .parse::<i64>()
        .map_err(|e| invalid(token, &e.to_string()))
}

fn invalid(token: &str, message: &str) -> CroppanError {
    CroppanError::InvalidCropTerm {
        token: token.to_string(),
        message: message.to_string(),
    }
}
