//! Page tree operations.
//!
//! Pages are addressed by zero-based index into [`page_ids`]. The helpers
//! here cover everything the operations need from the page tree:
//! - Inherited attribute lookup (`/MediaBox`, `/Rotate`, ...)
//! - Grafting a whole document's page tree under another root (merge)
//! - Keeping a subset of pages and dropping the rest (split, crop)
//! - Rotation and crop-box updates

use lopdf::{Dictionary, Document, Object, ObjectId, dictionary};

use crate::config::CropRect;
use crate::error::{PdfOpsError, Result};

/// Page attributes a page may inherit from its ancestors.
const INHERITABLE: [&[u8]; 4] = [b"Resources", b"MediaBox", b"CropBox", b"Rotate"];

/// Guard against cyclic `/Parent` chains in malformed files.
const MAX_TREE_DEPTH: usize = 64;

/// Page object ids in document order; position is the zero-based index.
pub fn page_ids(doc: &Document) -> Vec<ObjectId> {
    doc.get_pages().into_values().collect()
}

/// Id of the root `/Pages` node.
pub fn root_pages_id(doc: &Document) -> Result<ObjectId> {
    doc.catalog()
        .and_then(|catalog| catalog.get(b"Pages"))
        .and_then(Object::as_reference)
        .map_err(|e| PdfOpsError::unexpected(format!("Failed to get pages reference: {e}")))
}

/// Follow a reference to the object it points at.
fn resolve<'a>(doc: &'a Document, object: &'a Object) -> &'a Object {
    match object {
        Object::Reference(id) => doc.get_object(*id).unwrap_or(object),
        other => other,
    }
}

/// Look up `key` on a page, walking `/Parent` links until it is found.
pub fn inherited_attribute(doc: &Document, page_id: ObjectId, key: &[u8]) -> Option<Object> {
    let mut node_id = page_id;

    for _ in 0..MAX_TREE_DEPTH {
        let node = doc.get_dictionary(node_id).ok()?;
        if let Ok(value) = node.get(key) {
            return Some(value.clone());
        }
        node_id = node.get(b"Parent").and_then(Object::as_reference).ok()?;
    }

    None
}

/// Effective `/Rotate` of a page, normalized to `0..360`.
pub fn rotation(doc: &Document, page_id: ObjectId) -> i64 {
    inherited_attribute(doc, page_id, b"Rotate")
        .and_then(|value| resolve(doc, &value).as_i64().ok())
        .unwrap_or(0)
        .rem_euclid(360)
}

/// Effective `/MediaBox` of a page.
pub fn media_box(doc: &Document, page_id: ObjectId) -> Option<CropRect> {
    let value = inherited_attribute(doc, page_id, b"MediaBox")?;
    let values = resolve(doc, &value).as_array().ok()?;

    if values.len() != 4 {
        return None;
    }

    let mut coords = [0.0f32; 4];
    for (slot, value) in coords.iter_mut().zip(values) {
        *slot = resolve(doc, value).as_float().ok()?;
    }

    Some(CropRect::new(coords[0], coords[1], coords[2], coords[3]))
}

/// `/CropBox` of a page if one is set (directly or inherited).
pub fn crop_box(doc: &Document, page_id: ObjectId) -> Option<CropRect> {
    let value = inherited_attribute(doc, page_id, b"CropBox")?;
    let values = resolve(doc, &value).as_array().ok()?;
    let coords: Vec<f32> = values
        .iter()
        .filter_map(|v| resolve(doc, v).as_float().ok())
        .collect();

    match coords.as_slice() {
        [x0, y0, x1, y1] => Some(CropRect::new(*x0, *y0, *x1, *y1)),
        _ => None,
    }
}

fn page_dict_mut(doc: &mut Document, page_id: ObjectId) -> Result<&mut Dictionary> {
    doc.get_dictionary_mut(page_id)
        .map_err(|e| PdfOpsError::unexpected(format!("Failed to get page {page_id:?}: {e}")))
}

/// Add `degrees` to a page's effective rotation.
///
/// Returns the new rotation, normalized to `0..360`.
pub fn rotate_page(doc: &mut Document, page_id: ObjectId, degrees: i64) -> Result<i64> {
    let rotated = (rotation(doc, page_id) + degrees).rem_euclid(360);
    page_dict_mut(doc, page_id)?.set("Rotate", Object::Integer(rotated));
    Ok(rotated)
}

/// Set the visible area of a page.
pub fn set_crop_box(doc: &mut Document, page_id: ObjectId, rect: &CropRect) -> Result<()> {
    let crop_box: Vec<Object> = [rect.x0, rect.y0, rect.x1, rect.y1]
        .into_iter()
        .map(Object::Real)
        .collect();
    page_dict_mut(doc, page_id)?.set("CropBox", Object::Array(crop_box));
    Ok(())
}

/// Reduce the page tree to `keep`, in the given order.
///
/// Inherited attributes are copied onto each kept page before it is
/// re-parented under the root, then every object no longer reachable from
/// the trailer is pruned.
pub fn retain_pages(doc: &mut Document, keep: &[ObjectId]) -> Result<()> {
    let root_id = root_pages_id(doc)?;

    for &page_id in keep {
        let inherited: Vec<(&[u8], Object)> = INHERITABLE
            .iter()
            .filter_map(|key| inherited_attribute(doc, page_id, key).map(|value| (*key, value)))
            .collect();

        let page = page_dict_mut(doc, page_id)?;
        for (key, value) in inherited {
            if !page.has(key) {
                page.set(key.to_vec(), value);
            }
        }
        page.set("Parent", Object::Reference(root_id));
    }

    let root = doc
        .get_dictionary_mut(root_id)
        .map_err(|e| PdfOpsError::unexpected(format!("Failed to get pages object: {e}")))?;
    root.set(
        "Kids",
        Object::Array(keep.iter().map(|&id| Object::Reference(id)).collect()),
    );
    root.set("Count", Object::Integer(keep.len() as i64));

    let pruned = doc.prune_objects();
    tracing::debug!(kept = keep.len(), pruned = pruned.len(), "page tree reduced");

    Ok(())
}

/// Shift every indirect reference inside `object` by `offset`.
fn shift_references(object: &mut Object, offset: u32) {
    match object {
        Object::Reference(id) => id.0 += offset,
        Object::Array(items) => {
            for item in items.iter_mut() {
                shift_references(item, offset);
            }
        }
        Object::Dictionary(dict) => {
            for (_, value) in dict.iter_mut() {
                shift_references(value, offset);
            }
        }
        Object::Stream(stream) => {
            for (_, value) in stream.dict.iter_mut() {
                shift_references(value, offset);
            }
        }
        _ => {}
    }
}

/// Create an empty document with a catalog and an empty root `/Pages` node.
///
/// Returns the document and the id of its root `/Pages` node.
pub fn empty_document(version: &str) -> (Document, ObjectId) {
    let mut doc = Document::with_version(version);
    let root_id = doc.new_object_id();

    doc.objects.insert(
        root_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => Vec::<Object>::new(),
            "Count" => 0,
        }),
    );

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => root_id,
    });
    doc.trailer.set("Root", catalog_id);

    (doc, root_id)
}

/// Move every page of `source` to the end of `dest`'s page tree.
///
/// The source objects are renumbered past `dest.max_id` and its page tree
/// root becomes a child of `dest_root`, so attributes the source pages
/// inherit travel with them. The source catalog is dropped.
///
/// Returns the number of pages appended.
pub fn graft(dest: &mut Document, dest_root: ObjectId, source: Document) -> Result<usize> {
    let source_root = root_pages_id(&source)?;
    let source_catalog = source
        .trailer
        .get(b"Root")
        .and_then(Object::as_reference)
        .map_err(|e| PdfOpsError::unexpected(format!("Failed to get catalog: {e}")))?;
    let page_count = source.get_pages().len();

    let offset = dest.max_id;
    let shift = |id: ObjectId| (id.0 + offset, id.1);

    for (id, mut object) in source.objects {
        if id == source_catalog {
            continue;
        }
        shift_references(&mut object, offset);
        dest.objects.insert(shift(id), object);
    }
    dest.max_id = dest.max_id.max(source.max_id + offset);

    let grafted_root = shift(source_root);
    dest.get_dictionary_mut(grafted_root)
        .map_err(|e| PdfOpsError::unexpected(format!("Failed to get pages object: {e}")))?
        .set("Parent", Object::Reference(dest_root));

    let root = dest
        .get_dictionary_mut(dest_root)
        .map_err(|e| PdfOpsError::unexpected(format!("Failed to get pages object: {e}")))?;

    match root.get_mut(b"Kids") {
        Ok(Object::Array(kids)) => kids.push(Object::Reference(grafted_root)),
        _ => return Err(PdfOpsError::unexpected("Pages dictionary missing Kids array")),
    }

    let current_count = root.get(b"Count").and_then(Object::as_i64).unwrap_or(0);
    root.set("Count", Object::Integer(current_count + page_count as i64));

    Ok(page_count)
}
