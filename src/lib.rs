//! # pdf-sigfield
//!
//! Add an unsigned, visible signature placeholder field to an existing PDF.
//!
//! The library loads the document with [`lopdf`], builds a merged
//! field/widget dictionary (`/FT /Sig`), appends it to the target page's
//! `/Annots`, registers it in the document's AcroForm and writes the result.
//! Signing itself is left to other tools; the field created here is empty.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use pdf_sigfield::{SignatureField, SignatureRect, stamper};
//! use std::path::Path;
//!
//! let rect = SignatureRect::from_corners(36.0, 36.0, 236.0, 86.0);
//! let field = SignatureField::new("Signature1", rect).expect("valid field name");
//!
//! stamper::add_signature_field_to_file(
//!     Path::new("contract.pdf"),
//!     Path::new("contract-with-field.pdf"),
//!     &field,
//! )
//! .expect("failed to add signature field");
//! ```
//!
//! ## Modules
//!
//! - [`geometry`]: coordinate parsing and rectangle normalization
//! - [`field`]: the signature field and its widget dictionary
//! - [`acroform`]: AcroForm lookup, duplicate detection and registration
//! - [`stamper`]: inserting the field into a document or file
//! - [`request`]: validating command-line values into a runnable request
//! - [`report`]: the run summary
//! - [`error`]: error type and exit codes

pub mod acroform;
pub mod error;
pub mod field;
pub mod geometry;
pub mod report;
pub mod request;
pub mod stamper;

#[doc(hidden)]
pub mod fixtures;

pub use error::{ExitCode, Result, SignFieldError};
pub use field::SignatureField;
pub use geometry::SignatureRect;
pub use report::FieldReport;
pub use request::SignFieldRequest;
