//! Serializer/controller for the conversion pipeline
//!
//! Owns the two operating modes: in-memory (parse everything, serialize
//! once) and low-memory (render and flush each record in batches). Both
//! modes drive the same scanner and formatter and produce identical bytes
//! for duplicate-free input.

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;
use std::time::Instant;

use crate::convert::config::{ConvertConfig, OutputMode};
use crate::convert::progress::{Progress, REPORT_INTERVAL};
use crate::error::{ConvertError, ConvertResult};
use crate::formatter::{render_document, render_entry, Layout};
use crate::model::{EntityTable, Entry};
use crate::scanner::DictScanner;

/// Metadata about a completed conversion run
#[derive(Debug, Clone)]
pub struct ConvertSummary {
    /// Records parsed from the input
    pub entries: u64,
    /// Records replaced by a later duplicate `ent_seq` (in-memory mode only;
    /// low-memory mode cannot deduplicate and appends every record)
    pub duplicates: u64,
    /// Bytes written to the output
    pub output_bytes: u64,
    /// Wall-clock time for the run
    pub elapsed_ms: u64,
}

/// Main conversion controller
pub struct Converter {
    config: ConvertConfig,
}

impl Converter {
    pub fn new(config: ConvertConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ConvertConfig {
        &self.config
    }

    /// Run the full file-to-file pipeline
    ///
    /// The configuration is validated and the input opened before the output
    /// file is touched. A failed low-memory run leaves its partial output on
    /// disk; cleanup is the caller's responsibility. There is no retry
    /// anywhere; any failure aborts the run.
    pub fn run(
        &self,
        input: &Path,
        output: &Path,
        progress: &dyn Progress,
    ) -> ConvertResult<ConvertSummary> {
        self.config
            .validate()
            .map_err(ConvertError::invalid_argument)?;

        let file = File::open(input).map_err(|e| ConvertError::io(input, e))?;
        let scanner = DictScanner::new(BufReader::new(file));
        let start = Instant::now();

        match self.config.mode {
            OutputMode::InMemory => self.run_in_memory(scanner, output, progress, start),
            OutputMode::LowMemory => self.run_low_memory(scanner, output, progress, start),
        }
    }

    /// Render the whole dictionary from a reader into one JSON string
    /// (in-memory semantics, independent of the configured mode)
    pub fn render_to_string<R: BufRead>(&self, reader: R) -> ConvertResult<String> {
        let scanner = DictScanner::new(reader);
        let (entries, _, _) = self.collect(scanner, &crate::convert::progress::NullProgress)?;
        Ok(render_document(&entries, &Layout::new(self.config.indent)))
    }

    fn run_in_memory<R: BufRead>(
        &self,
        scanner: DictScanner<R>,
        output: &Path,
        progress: &dyn Progress,
        start: Instant,
    ) -> ConvertResult<ConvertSummary> {
        let (entries, count, duplicates) = self.collect(scanner, progress)?;

        let layout = Layout::new(self.config.indent);
        let document = render_document(&entries, &layout);

        if self.config.validate_output {
            serde_json::from_str::<serde_json::Value>(&document)
                .map_err(|e| ConvertError::invalid_output(e.to_string()))?;
        }

        let mut writer =
            BufWriter::new(File::create(output).map_err(|e| ConvertError::io(output, e))?);
        writer
            .write_all(document.as_bytes())
            .and_then(|_| writer.flush())
            .map_err(|e| ConvertError::io(output, e))?;

        progress.finish(count);
        Ok(ConvertSummary {
            entries: count,
            duplicates,
            output_bytes: document.len() as u64,
            elapsed_ms: start.elapsed().as_millis() as u64,
        })
    }

    /// Parse everything into an insertion-ordered collection keyed by
    /// `ent_seq`; a duplicate identifier replaces the earlier record in place
    fn collect<R: BufRead>(
        &self,
        mut scanner: DictScanner<R>,
        progress: &dyn Progress,
    ) -> ConvertResult<(Vec<Entry>, u64, u64)> {
        let mut entries: Vec<Entry> = Vec::new();
        let mut index: HashMap<String, usize> = HashMap::new();
        let mut count = 0u64;
        let mut duplicates = 0u64;

        while let Some(entry) = scanner.next_entry()? {
            count += 1;
            if count % REPORT_INTERVAL == 0 {
                progress.records(count);
            }
            match index.get(&entry.ent_seq) {
                Some(&slot) => {
                    duplicates += 1;
                    entries[slot] = entry;
                }
                None => {
                    index.insert(entry.ent_seq.clone(), entries.len());
                    entries.push(entry);
                }
            }
        }

        Ok((entries, count, duplicates))
    }

    fn run_low_memory<R: BufRead>(
        &self,
        mut scanner: DictScanner<R>,
        output: &Path,
        progress: &dyn Progress,
        start: Instant,
    ) -> ConvertResult<ConvertSummary> {
        let layout = Layout::new(self.config.indent);
        let file = File::create(output).map_err(|e| ConvertError::io(output, e))?;
        let mut writer = BufWriter::new(file);

        let mut buffer = String::from("[");
        let mut count = 0u64;
        let mut pending = 0usize;
        let mut written = 0u64;

        while let Some(entry) = scanner.next_entry()? {
            // Separator before every record except the first; the closing
            // bracket then lands after the final record with no stray comma.
            if count > 0 {
                buffer.push(',');
            }
            count += 1;
            pending += 1;

            buffer.push_str(layout.newline());
            buffer.push_str(&layout.pad(1));
            buffer.push_str(&render_entry(&entry, &layout, 1));

            if pending >= self.config.batch_size {
                written += flush_text(&mut writer, &mut buffer, output)?;
                pending = 0;
            }
            if count % REPORT_INTERVAL == 0 {
                progress.records(count);
            }
        }

        buffer.push_str(layout.newline());
        buffer.push(']');
        written += flush_text(&mut writer, &mut buffer, output)?;
        writer.flush().map_err(|e| ConvertError::io(output, e))?;

        progress.finish(count);
        Ok(ConvertSummary {
            entries: count,
            duplicates: 0,
            output_bytes: written,
            elapsed_ms: start.elapsed().as_millis() as u64,
        })
    }
}

/// Write the accumulated batch text and reset the buffer
fn flush_text<W: Write>(
    writer: &mut W,
    buffer: &mut String,
    output: &Path,
) -> ConvertResult<u64> {
    let len = buffer.len() as u64;
    writer
        .write_all(buffer.as_bytes())
        .map_err(|e| ConvertError::io(output, e))?;
    buffer.clear();
    Ok(len)
}

/// Scan only the header of the input and return its entity table
///
/// Stops at the first record, which is far enough to have passed every
/// declaration comment block in a real dictionary dump.
pub fn scan_entities(input: &Path) -> ConvertResult<EntityTable> {
    let file = File::open(input).map_err(|e| ConvertError::io(input, e))?;
    let mut scanner = DictScanner::new(BufReader::new(file));
    scanner.next_entry()?;
    Ok(scanner.into_entities())
}
