//! Minimal CLI that pulls every PDF attachment out of a bundled document.
//!
//! Usage:
//!   cargo run --example extract_files -- bundled.pdf            (saves next to the binary)
//!   cargo run --example extract_files -- bundled.pdf ./output
//!   cargo run --example extract_files -- bundled.pdf --zip attachments.zip

use pdfbundle::{archive_attachments, PdfDocument};
use std::{env, fs, process};

fn main() {
    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        eprintln!("Usage: {} <pdf_file> [output_dir] [--zip <path>]", args[0]);
        process::exit(1);
    }

    let pdf_path = &args[1];
    let zip_path: Option<String> = args
        .windows(2)
        .find(|w| w[0] == "--zip")
        .map(|w| w[1].clone());
    let output_dir = args
        .get(2)
        .filter(|a| a.as_str() != "--zip")
        .map(String::as_str);

    let doc = PdfDocument::from_path(pdf_path).unwrap_or_else(|e| {
        eprintln!("Cannot load PDF: {e}");
        process::exit(1);
    });
    println!("✓ Loaded {pdf_path} ({} page(s))", doc.page_count());

    let attachments = doc.extract_attachments();
    if attachments.is_empty() {
        println!("  No PDF attachments found.");
        process::exit(0);
    }
    println!("✓ {} PDF attachment(s)", attachments.len());

    let save_dir = output_dir.unwrap_or(".");
    for (i, attachment) in attachments.iter().enumerate() {
        println!("\n  File #{}", i + 1);
        println!("    Name : {}", attachment.name);
        println!("    Size : {} bytes", attachment.data.len());

        if zip_path.is_none() {
            match attachment.save_to_disk(save_dir) {
                Ok(_) => println!("    ✓ Saved to {save_dir}/{}", attachment.name),
                Err(e) => eprintln!("    ✗ Save failed: {e}"),
            }
        }
    }

    if let Some(ref zip_path) = zip_path {
        let zip_bytes = archive_attachments(&attachments).unwrap_or_else(|e| {
            eprintln!("Archiving failed: {e}");
            process::exit(1);
        });
        fs::write(zip_path, &zip_bytes).unwrap_or_else(|e| {
            eprintln!("Cannot write '{zip_path}': {e}");
            process::exit(1);
        });
        println!("\n✓ Wrote {zip_path} ({} bytes)", zip_bytes.len());
    }
}
