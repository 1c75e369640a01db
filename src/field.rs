//! Signature field description and its widget dictionary.
//!
//! The field and its single widget annotation are merged into one dictionary,
//! which is how a lone signature field is normally written:
//! `/Type /Annot /Subtype /Widget /FT /Sig /T (name) /Rect [..] /P page`.

use crate::error::{Result, SignFieldError};
use crate::geometry::SignatureRect;
use lopdf::{Dictionary, Object, ObjectId, StringFormat};

/// Annotation flag bit 3: print the annotation when the page is printed.
pub const ANNOT_FLAG_PRINT: i64 = 4;

/// AcroForm `/SigFlags` bit 1: the document contains at least one signature field.
pub const SIG_FLAG_SIGNATURES_EXIST: i64 = 1;

/// Highlighting mode: invert the widget contents when clicked.
pub const HIGHLIGHT_INVERT: &[u8] = b"I";

/// Appearance state the widget starts in.
pub const APPEARANCE_STATE_NORMAL: &[u8] = b"Normal";

/// An unsigned signature placeholder field to be placed on a page.
#[derive(Debug, Clone, PartialEq)]
pub struct SignatureField {
    name: String,
    rect: SignatureRect,
}

impl SignatureField {
    /// Create a field, validating its partial name.
    pub fn new(name: impl Into<String>, rect: SignatureRect) -> Result<Self> {
        let name = name.into();
        validate_field_name(&name)?;
        Ok(SignatureField { name, rect })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn rect(&self) -> SignatureRect {
        self.rect
    }

    /// Build the merged field/widget dictionary, bound to `page_id`.
    pub fn to_widget_dict(&self, page_id: ObjectId) -> Dictionary {
        let mut dict = Dictionary::new();
        dict.set("Type", Object::Name(b"Annot".to_vec()));
        dict.set("Subtype", Object::Name(b"Widget".to_vec()));
        dict.set("FT", Object::Name(b"Sig".to_vec()));
        dict.set("T", encode_text_string(&self.name));
        dict.set("Rect", self.rect.to_pdf_array());
        dict.set("H", Object::Name(HIGHLIGHT_INVERT.to_vec()));
        dict.set("F", Object::Integer(ANNOT_FLAG_PRINT));
        dict.set("AS", Object::Name(APPEARANCE_STATE_NORMAL.to_vec()));
        dict.set("P", Object::Reference(page_id));
        dict
    }
}

/// Check a partial field name.
///
/// Periods are reserved as the separator of fully-qualified names, so a
/// partial name must not contain one.
pub fn validate_field_name(name: &str) -> Result<()> {
    let invalid = |reason: &str| SignFieldError::InvalidFieldName {
        name: name.to_string(),
        reason: reason.to_string(),
    };

    if name.is_empty() {
        return Err(invalid("name must not be empty"));
    }
    if name.contains('.') {
        return Err(invalid("name must not contain '.'"));
    }
    if name.chars().any(char::is_control) {
        return Err(invalid("name must not contain control characters"));
    }
    Ok(())
}

/// Encode a PDF text string: literal bytes for ASCII, UTF-16BE with BOM otherwise.
pub fn encode_text_string(text: &str) -> Object {
    if text.is_ascii() {
        return Object::String(text.as_bytes().to_vec(), StringFormat::Literal);
    }
    let mut bytes = vec![0xFE, 0xFF];
    for unit in text.encode_utf16() {
        bytes.extend_from_slice(&unit.to_be_bytes());
    }
    Object::String(bytes, StringFormat::Hexadecimal)
}

/// Decode the bytes of a PDF text string.
///
/// UTF-16BE is recognised by its byte order mark; anything else is treated
/// as PDFDocEncoding, approximated here by Latin-1.
pub fn decode_text_string(bytes: &[u8]) -> String {
    if bytes.len() >= 2 && bytes[0] == 0xFE && bytes[1] == 0xFF {
        let units: Vec<u16> = bytes[2..]
            .chunks_exact(2)
            .map(|pair| u16::from_be_bytes([pair[0], pair[1]]))
            .collect();
        return String::from_utf16_lossy(&units);
    }
    bytes.iter().map(|&b| b as char).collect()
}
