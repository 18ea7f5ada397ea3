//! # pdfbundle
//!
//! A Rust library for embedding PDF attachments into a host PDF and pulling
//! them back out as a ZIP archive.
//!
//! ## What this crate does
//!
//! 1. **Load a PDF**: parses a byte buffer into an in-memory document.
//! 2. **Embed attachments**: copies every page of the host document into a
//!    fresh output document and registers each attachment as a named
//!    embedded-file stream (`attachment_1.pdf`, `attachment_2.pdf`, …).
//! 3. **Extract attachments**: walks the embedded-file name tree and returns
//!    every entry whose name ends in `.pdf`, together with its raw bytes.
//! 4. **Archive attachments**: packs extracted attachments into a single
//!    deflate-compressed ZIP buffer, one entry per attachment.
//!
//! ## Quick example
//!
//! ```no_run
//! use pdfbundle::{archive_attachments, PdfDocument};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! // Embed two PDFs into a host document.
//! let host = PdfDocument::from_path("host.pdf")?;
//! let invoice = std::fs::read("invoice.pdf")?;
//! let receipt = std::fs::read("receipt.pdf")?;
//! let bundled = host.embed_attachments(&[invoice, receipt])?;
//! std::fs::write("bundled.pdf", &bundled)?;
//!
//! // …and pull them back out as a ZIP archive.
//! let doc = PdfDocument::from_bytes(&bundled)?;
//! let attachments = doc.extract_attachments();
//! std::fs::write("attachments.zip", archive_attachments(&attachments)?)?;
//! # Ok(())
//! # }
//! ```

use thiserror::Error;

mod archive;
mod document;
mod embed;
mod extract;

pub use archive::archive_attachments;
pub use document::PdfDocument;
pub use extract::Attachment;
// The page-transplant machinery in `embed` stays private; callers go through
// PdfDocument::embed_attachments.

// ── Error type ───────────────────────────────────────────────────────────────

/// Every error that this crate can produce.
#[derive(Error, Debug)]
pub enum BundleError {
    /// The input bytes do not form a parseable PDF document.
    #[error("malformed PDF document: {0}")]
    MalformedDocument(String),

    /// A valid in-memory structure could not be serialized to output bytes
    /// (PDF or ZIP). Unlike [`MalformedDocument`] this is not an input
    /// problem; callers should report it as an internal failure.
    ///
    /// [`MalformedDocument`]: BundleError::MalformedDocument
    #[error("serialization failure: {0}")]
    SerializationFailure(String),

    /// A filesystem I/O error occurred (e.g. when loading from or saving to
    /// a path). The byte-buffer operations never produce this.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience alias used throughout this crate.
pub type Result<T> = std::result::Result<T, BundleError>;
