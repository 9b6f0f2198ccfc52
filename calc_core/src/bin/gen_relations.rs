//! Generate RELATIONS.md from the calculator catalog.
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin gen-relations
//! ```
//!
//! The generated file is written to `calc_core/RELATIONS.md`.

use std::fs;
use std::path::Path;

use calc_core::catalog::generate_relations_markdown;

fn main() {
    println!("Generating RELATIONS.md...");

    let markdown = generate_relations_markdown();

    // Relative to workspace root
    let output_path = Path::new("calc_core/RELATIONS.md");

    match fs::write(output_path, &markdown) {
        Ok(()) => {
            println!("Successfully wrote {} bytes to {}", markdown.len(), output_path.display());
        }
        Err(e) => {
            eprintln!("Error writing file: {}", e);
            std::process::exit(1);
        }
    }
}
