use crate::PdfDocument;
use std::path::Path;

// ── Attachment ───────────────────────────────────────────────────────────────

/// A PDF file recovered from a host document's embedded-files name tree.
///
/// Returned by [`crate::PdfDocument::extract_attachments`].
#[derive(Debug, Clone)]
pub struct Attachment {
    /// The key the file is registered under in the name tree
    /// (e.g. `attachment_1.pdf`).
    pub name: String,

    /// The raw, decompressed file content.
    pub data: Vec<u8>,
}

impl Attachment {
    /// Write this attachment into `output_dir`, creating the directory if
    /// necessary.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use pdfbundle::PdfDocument;
    ///
    /// let doc = PdfDocument::from_path("bundled.pdf").unwrap();
    /// for attachment in doc.extract_attachments() {
    ///     attachment.save_to_disk("./extracted").unwrap();
    /// }
    /// ```
    pub fn save_to_disk<P: AsRef<Path>>(&self, output_dir: P) -> std::io::Result<()> {
        let dir = output_dir.as_ref();
        std::fs::create_dir_all(dir)?;
        std::fs::write(dir.join(&self.name), &self.data)
    }

    /// Returns the file extension, or `None` if the name has no extension.
    ///
    /// ```
    /// # use pdfbundle::Attachment;
    /// # let attachment = Attachment { name: "attachment_1.pdf".into(), data: vec![] };
    /// assert_eq!(attachment.extension(), Some("pdf"));
    /// ```
    pub fn extension(&self) -> Option<&str> {
        Path::new(&self.name).extension().and_then(|e| e.to_str())
    }

    /// Returns `true` when the attachment's extension matches `ext`
    /// (case-insensitive comparison).
    ///
    /// ```
    /// # use pdfbundle::Attachment;
    /// # let attachment = Attachment { name: "Scan.PDF".into(), data: vec![] };
    /// assert!(attachment.has_extension("pdf"));
    /// ```
    pub fn has_extension(&self, ext: &str) -> bool {
        self.extension()
            .map(|e| e.eq_ignore_ascii_case(ext))
            .unwrap_or(false)
    }
}

// ── Extraction ───────────────────────────────────────────────────────────────

/// Pull every embedded file whose name ends in `.pdf` out of `document`,
/// preserving name-tree order.
///
/// Entries with other suffixes are not attachments this crate deals in and
/// are passed over silently. Entries whose file specification is structurally
/// broken are skipped with a warning on stderr; one bad entry must not cost
/// the caller the rest.
pub(crate) fn extract_pdf_attachments(document: &PdfDocument) -> Vec<Attachment> {
    let mut results: Vec<Attachment> = Vec::new();

    for (name, spec_id) in document.embedded_entries() {
        if !has_pdf_suffix(&name) {
            continue;
        }
        match document.read_embedded_bytes(spec_id) {
            Err(reason) => {
                // Warn but keep going; the other entries may be fine.
                eprintln!("pdfbundle: warning: skipping '{name}': {reason}");
            }
            Ok(data) => results.push(Attachment { name, data }),
        }
    }

    results
}

/// Returns `true` when `name` ends with `.pdf`, compared case-insensitively.
/// This is a suffix test, not an extension parse: the bare name `.pdf`
/// qualifies, `report.pdf.bak` does not.
fn has_pdf_suffix(name: &str) -> bool {
    name.to_ascii_lowercase().ends_with(".pdf")
}
