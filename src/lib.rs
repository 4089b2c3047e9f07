//! JMdict to JSON converter
//!
//! A streaming parse/transform/serialize pipeline for the JMdict dictionary:
//! a forward-only line scanner recognizes the fixed record grammar, a typed
//! record model holds one entry at a time, and a JSON renderer with
//! configurable indentation writes the result either in one pass or streamed
//! to disk in batches.

pub mod cli;
pub mod convert;
pub mod error;
pub mod formatter;
pub mod model;
pub mod scanner;

// Re-export commonly used types
pub use convert::{ConvertConfig, ConvertSummary, Converter, NullProgress, OutputMode, Progress};
pub use error::{ConvertError, ConvertResult, ParseError, ParseResult};
pub use formatter::Layout;
pub use model::{EntityTable, Entry};
pub use scanner::DictScanner;

use std::io::BufRead;
use std::path::Path;

/// Convert a dictionary file to a JSON file with the given configuration
pub fn convert_file(
    input: &Path,
    output: &Path,
    config: ConvertConfig,
) -> ConvertResult<ConvertSummary> {
    Converter::new(config).run(input, output, &NullProgress)
}

/// Parse entries lazily from any buffered reader
pub fn parse_entries<R: BufRead>(reader: R) -> DictScanner<R> {
    DictScanner::new(reader)
}

/// Render a slice of entries as one JSON array
pub fn render_entries(entries: &[Entry], indent: u8) -> String {
    formatter::render_document(entries, &Layout::new(indent))
}
