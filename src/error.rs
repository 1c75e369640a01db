//! Error type and process exit codes.
//!
//! Every failure the tool can report maps onto one of six fixed exit codes,
//! so scripts driving the binary can branch on the code alone.

use std::path::PathBuf;
use thiserror::Error;

/// Process exit codes returned by the `pdf-sigfield` binary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    /// Field inserted and output written.
    Success,
    /// Arguments are missing or malformed.
    InvalidArguments,
    /// The input file does not exist.
    InputFileNotFound,
    /// Reading the input or writing the output failed at the filesystem level.
    OutputFileCreationFailed,
    /// The document could not be parsed or the field could not be added.
    SignatureFieldError,
    /// Anything else.
    UnknownError,
}

impl ExitCode {
    pub fn code(self) -> i32 {
        match self {
            ExitCode::Success => 0,
            ExitCode::InvalidArguments => 1,
            ExitCode::InputFileNotFound => 2,
            ExitCode::OutputFileCreationFailed => 3,
            ExitCode::SignatureFieldError => 4,
            ExitCode::UnknownError => 100,
        }
    }
}

#[derive(Debug, Error)]
pub enum SignFieldError {
    #[error("invalid arguments: {0}")]
    InvalidArguments(String),

    #[error("invalid rectangle coordinate '{value}': {reason}")]
    InvalidCoordinate { value: String, reason: String },

    #[error("invalid field name '{name}': {reason}")]
    InvalidFieldName { name: String, reason: String },

    #[error("input file not found: {}", .0.display())]
    InputNotFound(PathBuf),

    #[error("failed to read {}", path.display())]
    ReadInput {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write {}", path.display())]
    WriteOutput {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse PDF")]
    Parse(#[source] lopdf::Error),

    #[error("encrypted documents are not supported")]
    Encrypted,

    #[error("document has {available} page(s), page {requested} does not exist")]
    MissingPage { requested: u32, available: usize },

    #[error("a form field named '{0}' already exists")]
    DuplicateField(String),

    #[error("malformed document structure: {0}")]
    Structure(String),

    #[error("failed to serialize PDF")]
    Serialize(#[source] std::io::Error),
}

impl SignFieldError {
    /// Exit code the binary reports for this error.
    pub fn exit_code(&self) -> ExitCode {
        match self {
            SignFieldError::InvalidArguments(_)
            | SignFieldError::InvalidCoordinate { .. }
            | SignFieldError::InvalidFieldName { .. } => ExitCode::InvalidArguments,
            SignFieldError::InputNotFound(_) => ExitCode::InputFileNotFound,
            SignFieldError::ReadInput { .. } | SignFieldError::WriteOutput { .. } => {
                ExitCode::OutputFileCreationFailed
            }
            SignFieldError::Parse(_)
            | SignFieldError::Encrypted
            | SignFieldError::MissingPage { .. }
            | SignFieldError::DuplicateField(_)
            | SignFieldError::Structure(_)
            | SignFieldError::Serialize(_) => ExitCode::SignatureFieldError,
        }
    }
}

impl From<lopdf::Error> for SignFieldError {
    fn from(err: lopdf::Error) -> Self {
        SignFieldError::Structure(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, SignFieldError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_code_values() {
        assert_eq!(ExitCode::Success.code(), 0);
        assert_eq!(ExitCode::InvalidArguments.code(), 1);
        assert_eq!(ExitCode::InputFileNotFound.code(), 2);
        assert_eq!(ExitCode::OutputFileCreationFailed.code(), 3);
        assert_eq!(ExitCode::SignatureFieldError.code(), 4);
        assert_eq!(ExitCode::UnknownError.code(), 100);
    }

    #[test]
    fn test_error_exit_code_mapping() {
        let coord = SignFieldError::InvalidCoordinate {
            value: "abc".into(),
            reason: "not a number".into(),
        };
        assert_eq!(coord.exit_code(), ExitCode::InvalidArguments);

        let missing = SignFieldError::InputNotFound(PathBuf::from("nope.pdf"));
        assert_eq!(missing.exit_code(), ExitCode::InputFileNotFound);

        let write = SignFieldError::WriteOutput {
            path: PathBuf::from("/no/such/dir/out.pdf"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "missing"),
        };
        assert_eq!(write.exit_code(), ExitCode::OutputFileCreationFailed);

        let dup = SignFieldError::DuplicateField("Signature1".into());
        assert_eq!(dup.exit_code(), ExitCode::SignatureFieldError);
        assert_eq!(SignFieldError::Encrypted.exit_code(), ExitCode::SignatureFieldError);

        let serialize = SignFieldError::Serialize(std::io::Error::new(
            std::io::ErrorKind::WriteZero,
            "buffer full",
        ));
        assert_eq!(serialize.exit_code(), ExitCode::SignatureFieldError);
        assert!(std::error::Error::source(&serialize).is_some());
    }

    #[test]
    fn test_error_messages() {
        let err = SignFieldError::MissingPage { requested: 1, available: 0 };
        assert_eq!(err.to_string(), "document has 0 page(s), page 1 does not exist");

        let err = SignFieldError::InputNotFound(PathBuf::from("in.pdf"));
        assert_eq!(err.to_string(), "input file not found: in.pdf");
    }
}
