//! Insert a signature field into a loaded document, in memory or file to file.

use crate::acroform;
use crate::error::{Result, SignFieldError};
use crate::field::SignatureField;
use crate::geometry::SignatureRect;
use lopdf::{Document, Object, ObjectId};
use std::fs;
use std::io::Write;
use std::path::Path;

/// Page the command-line tool always places its field on.
pub const TARGET_PAGE: u32 = 1;

/// Where a field ended up after insertion.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldPlacement {
    pub object_id: ObjectId,
    pub page_number: u32,
    pub page_id: ObjectId,
    pub rect: SignatureRect,
}

/// Result of a file-to-file run.
#[derive(Debug, Clone, PartialEq)]
pub struct StampOutcome {
    pub placement: FieldPlacement,
    pub page_count: usize,
    pub bytes_written: usize,
}

/// Add `field` as a widget on the 1-based `page_number` and register it in
/// the document's AcroForm.
///
/// # Errors
///
/// Fails with [`SignFieldError::Encrypted`] for encrypted documents,
/// [`SignFieldError::MissingPage`] when the page does not exist,
/// [`SignFieldError::DuplicateField`] when a field with the same
/// fully-qualified name already exists, and [`SignFieldError::Structure`]
/// when the page tree or form is malformed.
pub fn add_signature_field(
    doc: &mut Document,
    field: &SignatureField,
    page_number: u32,
) -> Result<FieldPlacement> {
    if doc.trailer.has(b"Encrypt") {
        return Err(SignFieldError::Encrypted);
    }

    let pages = doc.get_pages();
    let page_id = *pages
        .get(&page_number)
        .ok_or(SignFieldError::MissingPage {
            requested: page_number,
            available: pages.len(),
        })?;

    if acroform::existing_field_names(doc)?
        .iter()
        .any(|existing| existing == field.name())
    {
        return Err(SignFieldError::DuplicateField(field.name().to_string()));
    }

    if field.rect().is_degenerate() {
        log::warn!(
            "signature rectangle {} has no area; the field will not be visible",
            field.rect()
        );
    }

    let object_id = doc.add_object(Object::Dictionary(field.to_widget_dict(page_id)));
    attach_to_page(doc, page_id, object_id)?;
    acroform::register_signature_field(doc, object_id)?;

    log::debug!(
        "added signature field '{}' as {} {} R on page {} ({} {} R)",
        field.name(),
        object_id.0,
        object_id.1,
        page_number,
        page_id.0,
        page_id.1
    );

    Ok(FieldPlacement {
        object_id,
        page_number,
        page_id,
        rect: field.rect(),
    })
}

/// Append an annotation reference to the page's `/Annots`, which may be an
/// inline array, an indirect array, or absent.
fn attach_to_page(doc: &mut Document, page_id: ObjectId, annot_id: ObjectId) -> Result<()> {
    let annots_ref = match doc.get_dictionary(page_id)?.get(b"Annots") {
        Ok(Object::Reference(id)) => Some(*id),
        _ => None,
    };

    if let Some(array_id) = annots_ref {
        doc.get_object_mut(array_id)?
            .as_array_mut()?
            .push(Object::Reference(annot_id));
        return Ok(());
    }

    let page = doc.get_dictionary_mut(page_id)?;
    match page.get_mut(b"Annots") {
        Ok(Object::Array(annots)) => annots.push(Object::Reference(annot_id)),
        Ok(_) => {
            return Err(SignFieldError::Structure(format!(
                "/Annots of page object {} is not an array",
                page_id.0
            )));
        }
        Err(_) => page.set("Annots", vec![Object::Reference(annot_id)]),
    }
    Ok(())
}

/// Parse a document from memory, add the field, and serialize the result.
pub fn add_signature_field_to_bytes(
    pdf: &[u8],
    field: &SignatureField,
    page_number: u32,
) -> Result<(Vec<u8>, FieldPlacement)> {
    let mut doc = Document::load_mem(pdf).map_err(SignFieldError::Parse)?;
    let placement = add_signature_field(&mut doc, field, page_number)?;
    let bytes = serialize(&mut doc)?;
    Ok((bytes, placement))
}

fn serialize(doc: &mut Document) -> Result<Vec<u8>> {
    let mut buffer = Vec::new();
    doc.save_to(&mut buffer).map_err(SignFieldError::Serialize)?;
    Ok(buffer)
}

/// Read `input`, add the field on page 1, and write the result to `output`.
///
/// The input is fully read before the output is opened, so both may name the
/// same file. The output is only created once serialization has succeeded.
pub fn add_signature_field_to_file(
    input: &Path,
    output: &Path,
    field: &SignatureField,
) -> Result<StampOutcome> {
    let data = fs::read(input).map_err(|source| SignFieldError::ReadInput {
        path: input.to_path_buf(),
        source,
    })?;

    let mut doc = Document::load_mem(&data).map_err(SignFieldError::Parse)?;
    let page_count = doc.get_pages().len();
    log::info!(
        "loaded {} (PDF {}, {} page(s), {} bytes)",
        input.display(),
        doc.version,
        page_count,
        data.len()
    );

    let placement = add_signature_field(&mut doc, field, TARGET_PAGE)?;
    let bytes = serialize(&mut doc)?;

    let write_err = |source| SignFieldError::WriteOutput {
        path: output.to_path_buf(),
        source,
    };
    let mut file = fs::File::create(output).map_err(write_err)?;
    file.write_all(&bytes).map_err(write_err)?;
    file.sync_all().map_err(write_err)?;
    log::info!("wrote {} ({} bytes)", output.display(), bytes.len());

    Ok(StampOutcome {
        placement,
        page_count,
        bytes_written: bytes.len(),
    })
}
