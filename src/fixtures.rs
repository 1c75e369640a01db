//! Small generated documents shared by the unit tests, the CLI tests and the
//! benchmarks.

use lopdf::{dictionary, Document, Object, Stream};
use std::io;
use std::path::Path;

/// A minimal document with `page_count` letter-sized pages and no form.
pub fn blank_document(page_count: usize) -> Document {
    let mut doc = Document::with_version("1.7");
    let pages_id = doc.new_object_id();
    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
    });

    let mut kids = Vec::new();
    for i in 0..page_count {
        let content = format!("BT /F1 12 Tf 72 720 Td (Page {}) Tj ET", i + 1);
        let content_id = doc.add_object(Stream::new(dictionary! {}, content.into_bytes()));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
            "Contents" => content_id,
            "Resources" => dictionary! {
                "Font" => dictionary! { "F1" => font_id },
            },
        });
        kids.push(Object::Reference(page_id));
    }

    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Count" => page_count as i64,
            "Kids" => kids,
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);
    doc
}

/// [`blank_document`] serialized to bytes.
pub fn document_bytes(page_count: usize) -> io::Result<Vec<u8>> {
    let mut doc = blank_document(page_count);
    let mut buffer = Vec::new();
    doc.save_to(&mut buffer)?;
    Ok(buffer)
}

/// Write [`blank_document`] to `path`.
pub fn write_document(path: &Path, page_count: usize) -> io::Result<()> {
    std::fs::write(path, document_bytes(page_count)?)
}
