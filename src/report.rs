//! Summary of a completed run, printed as a line of text or as JSON.

use crate::geometry::SignatureRect;
use crate::stamper::StampOutcome;
use serde::Serialize;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldReport {
    pub input: String,
    pub output: String,
    pub field_name: String,
    pub page: u32,
    pub rect: SignatureRect,
    pub object_number: u32,
    pub generation: u16,
    pub page_count: usize,
    pub output_bytes: usize,
}

impl FieldReport {
    pub fn new(input: &Path, output: &Path, field_name: &str, outcome: &StampOutcome) -> Self {
        FieldReport {
            input: input.display().to_string(),
            output: output.display().to_string(),
            field_name: field_name.to_string(),
            page: outcome.placement.page_number,
            rect: outcome.placement.rect,
            object_number: outcome.placement.object_id.0,
            generation: outcome.placement.object_id.1,
            page_count: outcome.page_count,
            output_bytes: outcome.bytes_written,
        }
    }

    /// One-line human readable summary.
    pub fn to_text(&self) -> String {
        format!(
            "Added signature field '{}' at {} on page {} of {} -> {}",
            self.field_name, self.rect, self.page, self.input, self.output
        )
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
