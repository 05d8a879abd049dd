//! Source parsing
//!
//! Python files are scanned lexically for top-level import statements.

pub mod import_extractor;

pub use import_extractor::{extract_from_file, extract_imports, ExtractedImports, ImportReference};
