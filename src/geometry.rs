//! Rectangle parsing and normalization for the signature widget.

use crate::error::{Result, SignFieldError};
use lopdf::Object;
use serde::Serialize;

/// A normalized rectangle in PDF user space (points, origin bottom-left).
///
/// Always satisfies `llx <= urx` and `lly <= ury`, regardless of which two
/// opposite corners it was built from.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SignatureRect {
    pub llx: f32,
    pub lly: f32,
    pub urx: f32,
    pub ury: f32,
}

impl SignatureRect {
    /// Build a rectangle from two opposite corners, in any order.
    pub fn from_corners(x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
        SignatureRect {
            llx: x1.min(x2),
            lly: y1.min(y2),
            urx: x1.max(x2),
            ury: y1.max(y2),
        }
    }

    /// Parse the four corner coordinates as given on the command line.
    pub fn parse(x1: &str, y1: &str, x2: &str, y2: &str) -> Result<Self> {
        Ok(Self::from_corners(
            parse_coordinate(x1)?,
            parse_coordinate(y1)?,
            parse_coordinate(x2)?,
            parse_coordinate(y2)?,
        ))
    }

    pub fn width(&self) -> f32 {
        self.urx - self.llx
    }

    pub fn height(&self) -> f32 {
        self.ury - self.lly
    }

    /// True when the rectangle has no area and the widget cannot be seen.
    pub fn is_degenerate(&self) -> bool {
        self.width() == 0.0 || self.height() == 0.0
    }

    /// `/Rect` array value.
    pub fn to_pdf_array(&self) -> Object {
        Object::Array(vec![
            Object::Real(self.llx),
            Object::Real(self.lly),
            Object::Real(self.urx),
            Object::Real(self.ury),
        ])
    }
}

impl std::fmt::Display for SignatureRect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{} {} {} {}]", self.llx, self.lly, self.urx, self.ury)
    }
}

/// Parse one coordinate using dot-decimal notation. Non-finite values are rejected.
pub fn parse_coordinate(raw: &str) -> Result<f32> {
    let trimmed = raw.trim();
    let invalid = |reason: &str| SignFieldError::InvalidCoordinate {
        value: raw.to_string(),
        reason: reason.to_string(),
    };

    if trimmed.is_empty() {
        return Err(invalid("empty value"));
    }
    let value: f32 = trimmed.parse().map_err(|_| invalid("not a number"))?;
    if !value.is_finite() {
        return Err(invalid("must be a finite number"));
    }
    Ok(value)
}
