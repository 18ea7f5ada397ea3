use crate::{Attachment, BundleError, Result};
use lopdf::{Document, Object, ObjectId};
use std::path::Path;

/// Upper bound on name-tree /Kids recursion. Real name trees are a handful
/// of levels deep; without the bound a circular tree would recurse until the
/// stack ran out.
const MAX_TREE_DEPTH: usize = 64;

// ── PdfDocument ───────────────────────────────────────────────────────────────

/// An in-memory PDF document, the entry point for embedding and extraction.
///
/// A `PdfDocument` owns the parsed object graph for the duration of one
/// operation and exposes two capabilities on top of it: ordered page access
/// and named embedded-stream access. It holds no other state and is discarded
/// when the caller is done with it.
///
/// # Creating a document
///
/// ```no_run
/// use pdfbundle::PdfDocument;
///
/// // From a file path
/// let doc = PdfDocument::from_path("report.pdf").unwrap();
///
/// // From an in-memory buffer
/// let bytes = std::fs::read("report.pdf").unwrap();
/// let doc = PdfDocument::from_bytes(&bytes).unwrap();
/// ```
pub struct PdfDocument {
    inner: Document,
}

impl PdfDocument {
    // ── Constructors ──────────────────────────────────────────────────────────

    /// Parse a PDF from an in-memory byte slice.
    ///
    /// Returns [`BundleError::MalformedDocument`] when the bytes cannot be
    /// parsed as a PDF container (corrupt header, truncated cross-reference
    /// table, …). A document is either fully loaded or not at all; this never
    /// yields a partially populated document.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        let inner = Document::load_mem(data)
            .map_err(|e| BundleError::MalformedDocument(e.to_string()))?;
        Ok(Self { inner })
    }

    /// Load a PDF from the file system.
    ///
    /// Filesystem problems surface as [`BundleError::Io`]; parse problems as
    /// [`BundleError::MalformedDocument`].
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let data = std::fs::read(path)?;
        Self::from_bytes(&data)
    }

    // ── Pages ─────────────────────────────────────────────────────────────────

    /// Returns the number of pages in the document.
    pub fn page_count(&self) -> usize {
        self.inner.get_pages().len()
    }

    // ── Embedded file discovery ───────────────────────────────────────────────

    /// Returns `true` when the document carries at least one entry in its
    /// embedded-file name tree.
    pub fn has_embedded_files(&self) -> bool {
        !self.embedded_entries().is_empty()
    }

    /// Returns the number of entries in the embedded-file name tree.
    pub fn count_embedded_files(&self) -> usize {
        self.embedded_entries().len()
    }

    /// Names of every embedded file, in stored order, without reading any
    /// stream content.
    pub fn embedded_file_names(&self) -> Vec<String> {
        self.embedded_entries()
            .into_iter()
            .map(|(name, _)| name)
            .collect()
    }

    // ── Operations ────────────────────────────────────────────────────────────

    /// Embed `attachments` into a copy of this document and serialize it.
    ///
    /// Every page of this document is copied into a fresh output document,
    /// preserving page order, and each attachment buffer is registered as an
    /// embedded-file stream named `attachment_<i>.pdf` (1-indexed, in input
    /// order). Attachment bytes are stored verbatim and uninterpreted; no
    /// check is made that they are themselves valid PDFs.
    ///
    /// An empty `attachments` slice is legal and produces a document with the
    /// same pages and no embedded-file name tree.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use pdfbundle::PdfDocument;
    ///
    /// let host = PdfDocument::from_path("host.pdf").unwrap();
    /// let attachment = std::fs::read("invoice.pdf").unwrap();
    /// let bundled = host.embed_attachments(&[attachment]).unwrap();
    /// std::fs::write("bundled.pdf", &bundled).unwrap();
    /// ```
    pub fn embed_attachments(&self, attachments: &[Vec<u8>]) -> Result<Vec<u8>> {
        crate::embed::embed_into(&self.inner, attachments)
    }

    /// Extract every embedded attachment whose name ends in `.pdf`
    /// (case-insensitive), in the order the name tree stores them.
    ///
    /// A document without an embedded-file name tree yields an empty vector;
    /// that is a legal outcome, not an error. Whether "nothing found" should
    /// fail is a policy question for the caller.
    pub fn extract_attachments(&self) -> Vec<Attachment> {
        crate::extract::extract_pdf_attachments(self)
    }

    // ── Accessors ─────────────────────────────────────────────────────────────

    /// Returns a reference to the underlying [`lopdf::Document`].
    pub fn document(&self) -> &Document {
        &self.inner
    }

    // ── Private: name-tree access ─────────────────────────────────────────────

    /// Resolve a value that may be an inline dictionary or a reference to one.
    fn resolve_dict(&self, value: &Object) -> Option<lopdf::Dictionary> {
        if let Ok(id) = value.as_reference() {
            self.inner
                .get_object(id)
                .ok()
                .and_then(|o| o.as_dict().ok().cloned())
        } else {
            value.as_dict().ok().cloned()
        }
    }

    /// Collect `(name, file-spec object id)` pairs from the catalog's
    /// `/Names` → `/EmbeddedFiles` name tree, in stored order.
    ///
    /// Both `/Names` and `/EmbeddedFiles` may be inline dictionaries or
    /// indirect references; some producers use either form. A document
    /// without a name tree yields an empty vector.
    pub(crate) fn embedded_entries(&self) -> Vec<(String, ObjectId)> {
        let mut entries = Vec::new();

        let names_dict = self
            .inner
            .catalog()
            .ok()
            .and_then(|catalog| catalog.get(b"Names").ok().and_then(|v| self.resolve_dict(v)));

        if let Some(names_dict) = names_dict {
            if let Some(tree_root) = names_dict
                .get(b"EmbeddedFiles")
                .ok()
                .and_then(|v| self.resolve_dict(v))
            {
                self.collect_tree_node(&tree_root, &mut entries, 0);
            }
        }

        entries
    }

    /// Recursively walk a PDF name tree node, collecting
    /// `(name_string, file_spec_object_id)` pairs from leaf nodes.
    ///
    /// Descent stops at [`MAX_TREE_DEPTH`] levels, so a circular `/Kids`
    /// chain ends the walk instead of the process; entries collected before
    /// that point are kept.
    fn collect_tree_node(
        &self,
        node: &lopdf::Dictionary,
        out: &mut Vec<(String, ObjectId)>,
        depth: usize,
    ) {
        if depth >= MAX_TREE_DEPTH {
            return;
        }

        // Leaf node: a /Names array of [key, value, key, value, …]
        if let Ok(arr) = node.get(b"Names").and_then(Object::as_array) {
            let mut i = 0;
            while i + 1 < arr.len() {
                if let Ok(raw) = arr[i].as_str() {
                    let name = String::from_utf8_lossy(raw).into_owned();
                    if let Ok(spec_id) = arr[i + 1].as_reference() {
                        out.push((name, spec_id));
                    }
                }
                i += 2;
            }
        }

        // Intermediate node: a /Kids array of child references
        if let Ok(kids) = node.get(b"Kids").and_then(Object::as_array) {
            for kid in kids {
                if let Ok(kid_dict) = kid
                    .as_reference()
                    .and_then(|id| self.inner.get_object(id))
                    .and_then(Object::as_dict)
                {
                    self.collect_tree_node(kid_dict, out, depth + 1);
                }
            }
        }
    }

    /// Resolve a file-specification object down to its embedded stream and
    /// return the content bytes, decompressed when the stream carries a
    /// filter.
    ///
    /// Layout of a file specification (PDF 32000 §7.11.3):
    ///
    /// ```text
    /// <<
    ///   /Type  /Filespec
    ///   /F     (ascii filename)
    ///   /UF    (unicode filename)          ← preferred
    ///   /EF    <<
    ///              /F   <stream-ref>       ← the actual data stream
    ///              /UF  <stream-ref>       ← alternative key, same stream
    ///          >>
    /// >>
    /// ```
    ///
    /// The `/EF` entry is an **inline dictionary** (not a reference), but each
    /// of its values (`/F`, `/UF`) **is** an indirect reference to the stream
    /// object. The error string names the first structural defect found and is
    /// only used for diagnostics; a bad entry is skipped, never fatal.
    pub(crate) fn read_embedded_bytes(
        &self,
        spec_id: ObjectId,
    ) -> std::result::Result<Vec<u8>, String> {
        let spec_obj = self
            .inner
            .get_object(spec_id)
            .map_err(|e| format!("cannot resolve file spec: {e}"))?;
        let spec_dict = spec_obj
            .as_dict()
            .map_err(|_| "file spec is not a dictionary".to_string())?;

        // Some producers incorrectly store /EF as a reference; handle both.
        let ef_val = spec_dict
            .get(b"EF")
            .map_err(|_| "missing /EF entry".to_string())?;
        let ef_dict = self
            .resolve_dict(ef_val)
            .ok_or_else(|| "/EF is not a dictionary".to_string())?;

        // /UF preferred over /F (unicode vs. ASCII variant of the same stream)
        let stream_ref = ef_dict
            .get(b"UF")
            .or_else(|_| ef_dict.get(b"F"))
            .map_err(|_| "/EF has neither /F nor /UF".to_string())?;
        let stream_id = stream_ref
            .as_reference()
            .map_err(|_| "/EF stream entry is not a reference".to_string())?;

        let stream = self
            .inner
            .get_object(stream_id)
            .map_err(|e| format!("cannot resolve embedded stream: {e}"))?
            .as_stream()
            .map_err(|_| "embedded object is not a stream".to_string())?;

        // Streams this crate writes are flate-compressed on save; foreign ones
        // may carry no filter at all, in which case the raw content is the data.
        Ok(stream
            .decompressed_content()
            .unwrap_or_else(|_| stream.content.clone()))
    }
}
