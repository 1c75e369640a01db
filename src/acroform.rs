//! AcroForm lookup and field registration.
//!
//! The catalog's `/AcroForm` and the form's `/Fields` come in several shapes
//! in the wild: inline or indirect, present or missing. The helpers here
//! resolve each shape and always write through to the object that actually
//! holds the data.

use crate::error::{Result, SignFieldError};
use crate::field::{decode_text_string, SIG_FLAG_SIGNATURES_EXIST};
use lopdf::{dictionary, Dictionary, Document, Object, ObjectId};
use std::collections::HashSet;

/// Guards against reference cycles in malformed field trees.
const MAX_FIELD_DEPTH: usize = 32;

/// Where the AcroForm dictionary lives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FormLocation {
    /// Inline in the catalog.
    Catalog(ObjectId),
    /// Its own indirect object.
    Indirect(ObjectId),
}

/// Object id of the document catalog.
pub fn catalog_id(doc: &Document) -> Result<ObjectId> {
    doc.trailer
        .get(b"Root")
        .and_then(Object::as_reference)
        .map_err(|_| SignFieldError::Structure("trailer has no /Root reference".into()))
}

fn locate_form(doc: &Document) -> Result<Option<FormLocation>> {
    let catalog_id = catalog_id(doc)?;
    let catalog = doc.get_dictionary(catalog_id)?;
    match catalog.get(b"AcroForm") {
        Ok(Object::Reference(id)) => Ok(Some(FormLocation::Indirect(*id))),
        Ok(Object::Dictionary(_)) => Ok(Some(FormLocation::Catalog(catalog_id))),
        Ok(_) => Err(SignFieldError::Structure(
            "catalog /AcroForm is not a dictionary".into(),
        )),
        Err(_) => Ok(None),
    }
}

fn form_dict_mut(doc: &mut Document, location: FormLocation) -> Result<&mut Dictionary> {
    match location {
        FormLocation::Indirect(id) => Ok(doc.get_dictionary_mut(id)?),
        FormLocation::Catalog(catalog_id) => {
            let catalog = doc.get_dictionary_mut(catalog_id)?;
            Ok(catalog.get_mut(b"AcroForm")?.as_dict_mut()?)
        }
    }
}

fn form_dict(doc: &Document, location: FormLocation) -> Result<&Dictionary> {
    match location {
        FormLocation::Indirect(id) => Ok(doc.get_dictionary(id)?),
        FormLocation::Catalog(catalog_id) => {
            let catalog = doc.get_dictionary(catalog_id)?;
            Ok(catalog.get(b"AcroForm")?.as_dict()?)
        }
    }
}

/// Return the AcroForm location, creating an empty indirect form if the
/// catalog has none.
fn ensure_form(doc: &mut Document) -> Result<FormLocation> {
    if let Some(location) = locate_form(doc)? {
        return Ok(location);
    }
    let form_id = doc.add_object(dictionary! {
        "Fields" => Vec::<Object>::new(),
    });
    let catalog_id = catalog_id(doc)?;
    doc.get_dictionary_mut(catalog_id)?
        .set("AcroForm", Object::Reference(form_id));
    log::debug!("created AcroForm {} {} R", form_id.0, form_id.1);
    Ok(FormLocation::Indirect(form_id))
}

/// Fully-qualified names of every field in the document's form, parents included.
pub fn existing_field_names(doc: &Document) -> Result<Vec<String>> {
    let mut names = Vec::new();
    let Some(location) = locate_form(doc)? else {
        return Ok(names);
    };
    let form = form_dict(doc, location)?;
    let Ok(fields) = form.get(b"Fields") else {
        return Ok(names);
    };
    let mut visited = HashSet::new();
    for kid in resolve_array(doc, fields)? {
        collect_names(doc, kid, None, 0, &mut visited, &mut names)?;
    }
    Ok(names)
}

fn collect_names(
    doc: &Document,
    node: &Object,
    parent: Option<&str>,
    depth: usize,
    visited: &mut HashSet<ObjectId>,
    names: &mut Vec<String>,
) -> Result<()> {
    if depth > MAX_FIELD_DEPTH {
        return Err(SignFieldError::Structure(
            "form field tree is nested too deeply".into(),
        ));
    }
    let dict = match node {
        Object::Reference(id) => {
            if !visited.insert(*id) {
                return Ok(());
            }
            match doc.get_dictionary(*id) {
                Ok(dict) => dict,
                // dangling references in /Fields are common and harmless
                Err(_) => return Ok(()),
            }
        }
        Object::Dictionary(dict) => dict,
        _ => return Ok(()),
    };

    let partial = dict
        .get(b"T")
        .and_then(Object::as_str)
        .ok()
        .map(decode_text_string);
    let qualified = match (parent, partial) {
        (Some(p), Some(t)) => Some(format!("{}.{}", p, t)),
        (None, Some(t)) => Some(t),
        (Some(p), None) => Some(p.to_string()),
        (None, None) => None,
    };

    let kids = dict
        .get(b"Kids")
        .ok()
        .map(|kids| resolve_array(doc, kids))
        .transpose()?
        .unwrap_or(&[]);
    // kids without /T are widgets of this field, not child fields
    let child_fields: Vec<&Object> = kids
        .iter()
        .filter(|kid| has_partial_name(doc, kid))
        .collect();

    // parent fields own their name too, so a new field may not reuse it
    if let Some(name) = &qualified {
        names.push(name.clone());
    }
    for kid in child_fields {
        collect_names(doc, kid, qualified.as_deref(), depth + 1, visited, names)?;
    }
    Ok(())
}

fn has_partial_name(doc: &Document, node: &Object) -> bool {
    let dict = match node {
        Object::Reference(id) => doc.get_dictionary(*id).ok(),
        Object::Dictionary(dict) => Some(dict),
        _ => None,
    };
    dict.is_some_and(|d| d.has(b"T"))
}

fn resolve_array<'a>(doc: &'a Document, obj: &'a Object) -> Result<&'a [Object]> {
    match obj {
        Object::Array(items) => Ok(items),
        Object::Reference(id) => Ok(doc.get_object(*id)?.as_array()?),
        _ => Err(SignFieldError::Structure("expected an array".into())),
    }
}

/// Append `field_id` to the form's `/Fields` and set the SignaturesExist flag.
///
/// Creates the AcroForm and its `/Fields` array when missing.
pub fn register_signature_field(doc: &mut Document, field_id: ObjectId) -> Result<()> {
    let location = ensure_form(doc)?;

    let fields_ref = match form_dict(doc, location)?.get(b"Fields") {
        Ok(Object::Reference(id)) => Some(*id),
        _ => None,
    };

    match fields_ref {
        Some(array_id) => {
            doc.get_object_mut(array_id)?
                .as_array_mut()?
                .push(Object::Reference(field_id));
        }
        None => {
            let form = form_dict_mut(doc, location)?;
            match form.get_mut(b"Fields") {
                Ok(Object::Array(fields)) => fields.push(Object::Reference(field_id)),
                Ok(_) => {
                    return Err(SignFieldError::Structure(
                        "AcroForm /Fields is not an array".into(),
                    ));
                }
                Err(_) => form.set("Fields", vec![Object::Reference(field_id)]),
            }
        }
    }

    let form = form_dict_mut(doc, location)?;
    let flags = form.get(b"SigFlags").and_then(Object::as_i64).unwrap_or(0);
    form.set("SigFlags", Object::Integer(flags | SIG_FLAG_SIGNATURES_EXIST));
    Ok(())
}
