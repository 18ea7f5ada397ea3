//! CLI tool for bundling PDF attachments into a host document and pulling
//! them back out again.
//!
//! The `embed` command attaches PDF files to a host PDF; the `extract`
//! command recovers every attached PDF from a bundled document into a ZIP
//! archive.

use pdfbundle::{archive_attachments, PdfDocument, Result};
use std::{env, fs, process};

const DEFAULT_EMBED_OUTPUT: &str = "embedded_pdf.pdf";
const DEFAULT_EXTRACT_OUTPUT: &str = "extracted_pdfs.zip";

fn main() {
    let args: Vec<String> = env::args().collect();

    if args.len() < 2 || args.contains(&"--help".to_string()) || args.contains(&"-h".to_string()) {
        print_usage(&args[0]);
        process::exit(if args.len() < 2 { 1 } else { 0 });
    }

    let command = args[1].as_str();
    let (positional, output) = split_args(&args[2..]);

    let outcome = match command {
        "embed" => {
            if positional.is_empty() {
                eprintln!("❌ The embed command needs a host PDF");
                process::exit(1);
            }
            run_embed(
                &positional[0],
                &positional[1..],
                output.as_deref().unwrap_or(DEFAULT_EMBED_OUTPUT),
            )
        }
        "extract" => {
            if positional.len() != 1 {
                eprintln!("❌ The extract command takes exactly one input PDF");
                process::exit(1);
            }
            run_extract(
                &positional[0],
                output.as_deref().unwrap_or(DEFAULT_EXTRACT_OUTPUT),
            )
        }
        other => {
            eprintln!("❌ Unknown command '{}'", other);
            print_usage(&args[0]);
            process::exit(1);
        }
    };

    match outcome {
        Ok(()) => println!("\n✅ Done!"),
        Err(e) => {
            eprintln!("\n❌ Error: {}", e);
            process::exit(1);
        }
    }
}

fn print_usage(program_name: &str) {
    println!("📄 pdfbundle - PDF Attachment Embedding & Extraction Tool");
    println!();
    println!("USAGE:");
    println!(
        "    {} embed <host_pdf> [attachment_pdf...] [-o <output_pdf>]",
        program_name
    );
    println!("    {} extract <bundled_pdf> [-o <output_zip>]", program_name);
    println!();
    println!("COMMANDS:");
    println!("    embed      Attach PDF files to a host PDF");
    println!("    extract    Recover attached PDFs into a ZIP archive");
    println!();
    println!("OPTIONS:");
    println!("    -o, --output <path>    Where to write the result");
    println!(
        "                           (default: '{}' / '{}')",
        DEFAULT_EMBED_OUTPUT, DEFAULT_EXTRACT_OUTPUT
    );
    println!("    -h, --help             Show this help message");
    println!();
    println!("EXAMPLES:");
    println!("    {} embed report.pdf invoice.pdf receipt.pdf", program_name);
    println!("    {} extract embedded_pdf.pdf -o bundle.zip", program_name);
}

/// Split raw arguments into positional values and the `-o`/`--output` value.
fn split_args(args: &[String]) -> (Vec<String>, Option<String>) {
    let mut positional = Vec::new();
    let mut output = None;

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "-o" | "--output" => {
                if i + 1 >= args.len() {
                    eprintln!("❌ Missing value after '{}'", args[i]);
                    process::exit(1);
                }
                output = Some(args[i + 1].clone());
                i += 2;
            }
            _ => {
                positional.push(args[i].clone());
                i += 1;
            }
        }
    }

    (positional, output)
}

fn run_embed(host_path: &str, attachment_paths: &[String], output_path: &str) -> Result<()> {
    println!("📄 Host PDF: {}", host_path);
    println!("{}", "─".repeat(60));

    let host = PdfDocument::from_path(host_path)?;
    println!("✅ Loaded host ({} page(s))", host.page_count());

    let mut attachments: Vec<Vec<u8>> = Vec::with_capacity(attachment_paths.len());
    for path in attachment_paths {
        let data = fs::read(path)?;
        println!("   📎 {} ({})", path, format_bytes(data.len()));
        attachments.push(data);
    }

    print!("\n🚀 Embedding {} attachment(s)... ", attachments.len());
    let bundled = host.embed_attachments(&attachments)?;
    println!("✅ {}", format_bytes(bundled.len()));

    fs::write(output_path, &bundled)?;
    println!("💾 Saved to: {}", output_path);

    Ok(())
}

fn run_extract(pdf_path: &str, output_path: &str) -> Result<()> {
    println!("🔍 Scanning PDF: {}", pdf_path);
    println!("{}", "─".repeat(60));

    let doc = PdfDocument::from_path(pdf_path)?;
    println!("✅ Loaded ({} page(s))", doc.page_count());

    print!("📎 Looking for PDF attachments... ");
    let attachments = doc.extract_attachments();
    if attachments.is_empty() {
        println!("ℹ️  None");
        eprintln!("\n❌ No PDF attachments found in the provided PDF");
        process::exit(1);
    }
    println!("✅ Found {} PDF attachment(s)", attachments.len());

    for attachment in &attachments {
        println!(
            "   📄 {} ({})",
            attachment.name,
            format_bytes(attachment.data.len())
        );
    }

    print!("\n🚀 Archiving... ");
    let zip_bytes = archive_attachments(&attachments)?;
    println!("✅ {}", format_bytes(zip_bytes.len()));

    fs::write(output_path, &zip_bytes)?;
    println!("💾 Saved to: {}", output_path);

    Ok(())
}

fn format_bytes(bytes: usize) -> String {
    const UNITS: &[&str] = &["B", "KB", "MB", "GB"];
    let mut size = bytes as f64;
    let mut unit_index = 0;

    while size >= 1024.0 && unit_index < UNITS.len() - 1 {
        size /= 1024.0;
        unit_index += 1;
    }

    if unit_index == 0 {
        format!("{} {}", bytes, UNITS[0])
    } else {
        format!("{:.1} {}", size, UNITS[unit_index])
    }
}
