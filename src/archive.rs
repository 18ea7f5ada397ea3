use crate::{Attachment, BundleError, Result};
use std::io::{Cursor, Write};

// ── ZIP bundling ─────────────────────────────────────────────────────────────

/// Bundle `attachments` into a single ZIP archive held in memory.
///
/// Entries appear in slice order, deflate-compressed, each named by the
/// attachment's `name` field. Duplicate names are preserved as duplicate
/// entries; nothing is renamed or merged. An empty slice produces a valid,
/// empty archive.
///
/// # Example
///
/// ```no_run
/// use pdfbundle::{archive_attachments, PdfDocument};
///
/// let doc = PdfDocument::from_path("bundled.pdf").unwrap();
/// let attachments = doc.extract_attachments();
/// let zip_bytes = archive_attachments(&attachments).unwrap();
/// std::fs::write("extracted_pdfs.zip", &zip_bytes).unwrap();
/// ```
pub fn archive_attachments(attachments: &[Attachment]) -> Result<Vec<u8>> {
    let mut buffer = Vec::new();
    {
        let mut zip = zip::ZipWriter::new(Cursor::new(&mut buffer));
        let options = zip::write::FileOptions::default()
            .compression_method(zip::CompressionMethod::Deflated);

        for attachment in attachments {
            zip.start_file(attachment.name.as_str(), options).map_err(|e| {
                BundleError::SerializationFailure(format!(
                    "cannot add archive entry '{}': {e}",
                    attachment.name
                ))
            })?;
            zip.write_all(&attachment.data).map_err(|e| {
                BundleError::SerializationFailure(format!(
                    "cannot write archive entry '{}': {e}",
                    attachment.name
                ))
            })?;
        }

        zip.finish()
            .map_err(|e| BundleError::SerializationFailure(format!("cannot finalize archive: {e}")))?;
    }
    Ok(buffer)
}
