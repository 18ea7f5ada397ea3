//! Minimal CLI that embeds PDF files into a host document.
//!
//! Usage:
//!   cargo run --example embed_files -- host.pdf invoice.pdf receipt.pdf
//!   cargo run --example embed_files -- host.pdf invoice.pdf --out bundled.pdf

use pdfbundle::PdfDocument;
use std::{env, fs, process};

fn main() {
    let args: Vec<String> = env::args().collect();

    if args.len() < 3 {
        eprintln!(
            "Usage: {} <host_pdf> <attachment_pdf>... [--out <path>]",
            args[0]
        );
        process::exit(1);
    }

    let out_path: Option<String> = args
        .windows(2)
        .find(|w| w[0] == "--out")
        .map(|w| w[1].clone());

    // Positional arguments, with the --out pair removed.
    let mut inputs: Vec<&String> = Vec::new();
    let mut skip_next = false;
    for arg in &args[1..] {
        if skip_next {
            skip_next = false;
            continue;
        }
        if arg == "--out" {
            skip_next = true;
            continue;
        }
        inputs.push(arg);
    }

    if inputs.is_empty() {
        eprintln!("No host PDF given.");
        process::exit(1);
    }

    let host_path = inputs[0];
    let host = PdfDocument::from_path(host_path).unwrap_or_else(|e| {
        eprintln!("Cannot load host PDF: {e}");
        process::exit(1);
    });
    println!("✓ Host: {host_path} ({} page(s))", host.page_count());

    let mut attachments: Vec<Vec<u8>> = Vec::new();
    for path in &inputs[1..] {
        let data = fs::read(path).unwrap_or_else(|e| {
            eprintln!("Cannot read '{path}': {e}");
            process::exit(1);
        });
        println!("✓ Attachment: {path} ({} bytes)", data.len());
        attachments.push(data);
    }

    let bundled = host.embed_attachments(&attachments).unwrap_or_else(|e| {
        eprintln!("Embedding failed: {e}");
        process::exit(1);
    });

    let out = out_path.as_deref().unwrap_or("embedded_pdf.pdf");
    fs::write(out, &bundled).unwrap_or_else(|e| {
        eprintln!("Cannot write '{out}': {e}");
        process::exit(1);
    });
    println!("\n✓ Wrote {out} ({} bytes)", bundled.len());
}
