//! Validation of raw command-line values into a runnable request.
//!
//! Checks run in a fixed order: input existence first, then coordinates,
//! then the field name. A missing input therefore reports exit code 2 even
//! when the coordinates are also bad.

use crate::error::{Result, SignFieldError};
use crate::field::SignatureField;
use crate::geometry::SignatureRect;
use crate::report::FieldReport;
use crate::stamper;
use std::path::{Path, PathBuf};

/// A fully validated run of the tool.
#[derive(Debug, Clone, PartialEq)]
pub struct SignFieldRequest {
    pub input: PathBuf,
    pub output: PathBuf,
    pub field: SignatureField,
}

impl SignFieldRequest {
    /// Validate the positional arguments, in the order the binary reports them.
    pub fn from_args(
        input: impl Into<PathBuf>,
        output: impl Into<PathBuf>,
        field_name: &str,
        corners: [&str; 4],
    ) -> Result<Self> {
        let input = input.into();
        let output = output.into();

        if !input.is_file() {
            return Err(SignFieldError::InputNotFound(input));
        }
        if output.as_os_str().is_empty() {
            return Err(SignFieldError::InvalidArguments(
                "output path must not be empty".into(),
            ));
        }

        let [x1, y1, x2, y2] = corners;
        let rect = SignatureRect::parse(x1, y1, x2, y2)?;
        let field = SignatureField::new(field_name, rect)?;

        Ok(SignFieldRequest {
            input,
            output,
            field,
        })
    }

    pub fn input(&self) -> &Path {
        &self.input
    }

    pub fn output(&self) -> &Path {
        &self.output
    }

    /// Execute the request and summarize what was written.
    pub fn run(&self) -> Result<FieldReport> {
        let outcome = stamper::add_signature_field_to_file(&self.input, &self.output, &self.field)?;
        Ok(FieldReport::new(
            &self.input,
            &self.output,
            self.field.name(),
            &outcome,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ExitCode;
    use crate::fixtures::document_bytes;
    use std::fs;

    const CORNERS: [&str; 4] = ["36", "36", "236", "86"];

    #[test]
    fn test_missing_input_reported_first() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("absent.pdf");
        let err = SignFieldRequest::from_args(&input, "out.pdf", "", ["x", "y", "z", "w"])
            .unwrap_err();
        assert_eq!(err.exit_code(), ExitCode::InputFileNotFound);
    }

    #[test]
    fn test_directory_is_not_an_input() {
        let dir = tempfile::tempdir().unwrap();
        let err = SignFieldRequest::from_args(dir.path(), "out.pdf", "Sig", CORNERS).unwrap_err();
        assert!(matches!(err, SignFieldError::InputNotFound(_)));
    }

    #[test]
    fn test_coordinates_checked_before_name() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in.pdf");
        fs::write(&input, document_bytes(1).unwrap()).unwrap();

        let err = SignFieldRequest::from_args(&input, "out.pdf", "bad.name", ["1", "two", "3", "4"])
            .unwrap_err();
        assert!(matches!(err, SignFieldError::InvalidCoordinate { .. }));

        let err =
            SignFieldRequest::from_args(&input, "out.pdf", "bad.name", CORNERS).unwrap_err();
        assert!(matches!(err, SignFieldError::InvalidFieldName { .. }));
        assert_eq!(err.exit_code(), ExitCode::InvalidArguments);
    }

    #[test]
    fn test_empty_output_path() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in.pdf");
        fs::write(&input, document_bytes(1).unwrap()).unwrap();
        let err = SignFieldRequest::from_args(&input, "", "Sig", CORNERS).unwrap_err();
        assert_eq!(err.exit_code(), ExitCode::InvalidArguments);
    }

    #[test]
    fn test_run_writes_output() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in.pdf");
        let output = dir.path().join("out.pdf");
        fs::write(&input, document_bytes(2).unwrap()).unwrap();

        let request =
            SignFieldRequest::from_args(&input, &output, "Signature1", ["236", "86", "36", "36"])
                .unwrap();
        assert_eq!(request.field.rect(), SignatureRect::from_corners(36.0, 36.0, 236.0, 86.0));

        let report = request.run().unwrap();
        assert_eq!(report.page, 1);
        assert_eq!(report.page_count, 2);
        assert_eq!(report.field_name, "Signature1");
        assert!(output.exists());
    }
}
