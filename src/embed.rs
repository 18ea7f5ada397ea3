use crate::{BundleError, Result};
use lopdf::{dictionary, Document, Object, ObjectId, Stream};

/// Page-tree attributes a page may inherit from its ancestors
/// (PDF 32000 §7.7.3.4). The transplant rebuilds the page tree, so inherited
/// values must be flattened onto each page dictionary before its old parent
/// chain goes away.
const INHERITED_PAGE_KEYS: [&[u8]; 4] = [b"Resources", b"MediaBox", b"CropBox", b"Rotate"];

/// Upper bound on /Parent chain walks. Real page trees are a handful of
/// levels deep; without the bound a circular chain would never terminate.
const MAX_PARENT_DEPTH: usize = 64;

/// Copy every page of `host` into a fresh document, register each attachment
/// as a named embedded-file stream, and serialize the result.
///
/// The output document is standalone: all objects a page refers to move over
/// with their ids intact, while the old catalog, `/Pages` nodes, and outlines
/// are left behind and the page tree is rebuilt from scratch. Attachment `i`
/// (1-indexed) is registered under the generated name `attachment_<i>.pdf`;
/// the name tree's `/Names` array keeps input order.
pub(crate) fn embed_into(host: &Document, attachments: &[Vec<u8>]) -> Result<Vec<u8>> {
    let source = host.clone();
    let source_max_id = source.max_id;
    let mut output = Document::with_version(source.version.clone());

    // Page object ids in page order; the output /Kids array must keep exactly
    // this order.
    let page_ids: Vec<ObjectId> = source.get_pages().into_values().collect();

    // Pull the page dictionaries out before the transplant below (which skips
    // every page-tree node), flattening inherited attributes while the old
    // parent chain is still reachable.
    let mut pages: Vec<(ObjectId, lopdf::Dictionary)> = Vec::with_capacity(page_ids.len());
    for &page_id in &page_ids {
        let mut dict = source
            .get_object(page_id)
            .and_then(Object::as_dict)
            .map_err(|e| {
                BundleError::SerializationFailure(format!(
                    "page object {page_id:?} is not a dictionary: {e}"
                ))
            })?
            .clone();
        for key in INHERITED_PAGE_KEYS {
            if dict.get(key).is_err() {
                if let Some(value) = inherited_page_attribute(&source, page_id, key) {
                    dict.set(key, value);
                }
            }
        }
        pages.push((page_id, dict));
    }

    // Transplant everything else verbatim. Objects keep their ids, so
    // cross-references between transplanted objects stay valid; outlines
    // hang off the old catalog and go with it.
    for (object_id, object) in source.objects {
        match object.type_name().unwrap_or(b"") {
            b"Catalog" | b"Pages" | b"Page" | b"Outlines" | b"Outline" => {}
            _ => {
                output.objects.insert(object_id, object);
            }
        }
    }
    // Fresh ids must start above every transplanted id.
    output.max_id = source_max_id;

    let pages_id = output.new_object_id();
    for (page_id, mut dict) in pages {
        dict.set("Parent", Object::Reference(pages_id));
        output.objects.insert(page_id, Object::Dictionary(dict));
    }

    let kids: Vec<Object> = page_ids.iter().map(|&id| Object::Reference(id)).collect();
    output.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => page_ids.len() as i64,
        }),
    );

    // One embedded-file stream plus one file specification per attachment.
    // Content bytes are stored uninterpreted; /F and /UF both carry the
    // generated name because readers prefer one or the other.
    let mut name_pairs: Vec<Object> = Vec::with_capacity(attachments.len() * 2);
    for (index, content) in attachments.iter().enumerate() {
        let name = attachment_name(index + 1);

        let stream_id = output.add_object(Stream::new(
            dictionary! {
                "Type" => "EmbeddedFile",
                // Serialized as /application#2Fpdf, the writer escapes the slash.
                "Subtype" => Object::Name(b"application/pdf".to_vec()),
                "Params" => dictionary! { "Size" => content.len() as i64 },
            },
            content.clone(),
        ));
        let spec_id = output.add_object(dictionary! {
            "Type" => "Filespec",
            "F" => Object::string_literal(name.clone()),
            "UF" => Object::string_literal(name.clone()),
            "EF" => dictionary! {
                "F" => Object::Reference(stream_id),
                "UF" => Object::Reference(stream_id),
            },
        });

        name_pairs.push(Object::string_literal(name));
        name_pairs.push(Object::Reference(spec_id));
    }

    let mut catalog = dictionary! {
        "Type" => "Catalog",
        "Pages" => Object::Reference(pages_id),
    };
    // No attachments, no name tree: the catalog stays bare.
    if !name_pairs.is_empty() {
        let tree_id = output.add_object(dictionary! { "Names" => name_pairs });
        catalog.set(
            "Names",
            Object::Dictionary(dictionary! { "EmbeddedFiles" => Object::Reference(tree_id) }),
        );
    }
    let catalog_id = output.add_object(catalog);
    output.trailer.set("Root", Object::Reference(catalog_id));

    // Whatever only the old catalog referenced (metadata streams, structure
    // trees, …) is unreachable now; drop it before renumbering.
    let _ = output.prune_objects();
    output.renumber_objects();
    output.compress();

    let mut buffer = Vec::new();
    output
        .save_to(&mut buffer)
        .map_err(|e| BundleError::SerializationFailure(e.to_string()))?;
    Ok(buffer)
}

/// The attachment at (1-indexed) `position` is registered under this name.
fn attachment_name(position: usize) -> String {
    format!("attachment_{position}.pdf")
}

/// Look `key` up on a page dictionary, then up its /Parent chain.
fn inherited_page_attribute(doc: &Document, page_id: ObjectId, key: &[u8]) -> Option<Object> {
    let mut dict = doc.get_object(page_id).ok()?.as_dict().ok()?;
    for _ in 0..MAX_PARENT_DEPTH {
        if let Ok(value) = dict.get(key) {
            return Some(value.clone());
        }
        let parent_id = dict.get(b"Parent").ok()?.as_reference().ok()?;
        dict = doc.get_object(parent_id).ok()?.as_dict().ok()?;
    }
    None
}
