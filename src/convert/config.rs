//! Configuration options for the conversion pipeline

/// Operating mode of the serializer/controller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// Parse the whole input, then serialize and write once.
    /// Peak memory is proportional to the dictionary size.
    #[default]
    InMemory,
    /// Serialize and flush each record as it is parsed.
    /// Peak memory is bounded by one batch of rendered text plus one entry.
    LowMemory,
}

impl OutputMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            OutputMode::InMemory => "in-memory",
            OutputMode::LowMemory => "low-memory",
        }
    }
}

/// Conversion configuration options
#[derive(Debug, Clone)]
pub struct ConvertConfig {
    /// Spaces per indentation level; 0 produces compact single-line JSON
    pub indent: u8,
    /// Operating mode
    pub mode: OutputMode,
    /// Records rendered between flushes in low-memory mode
    pub batch_size: usize,
    /// Expected record count, used only to scale progress reporting
    pub expected_total: Option<u64>,
    /// Re-parse the rendered document with serde_json (in-memory mode only)
    pub validate_output: bool,
}

impl Default for ConvertConfig {
    fn default() -> Self {
        Self {
            indent: 0,
            mode: OutputMode::InMemory,
            batch_size: 1000,
            expected_total: None,
            validate_output: false,
        }
    }
}

impl ConvertConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set indentation depth
    pub fn with_indent(mut self, indent: u8) -> Self {
        self.indent = indent;
        self
    }

    /// Set operating mode
    pub fn with_mode(mut self, mode: OutputMode) -> Self {
        self.mode = mode;
        self
    }

    /// Set the low-memory flush batch size
    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size;
        self
    }

    /// Set the expected total for progress scaling
    pub fn with_expected_total(mut self, total: Option<u64>) -> Self {
        self.expected_total = total;
        self
    }

    /// Enable/disable post-conversion output validation
    pub fn with_validation(mut self, validate: bool) -> Self {
        self.validate_output = validate;
        self
    }

    /// Validate configuration consistency
    pub fn validate(&self) -> Result<(), String> {
        if self.batch_size == 0 {
            return Err("batch size must be at least 1".to_string());
        }
        if self.mode == OutputMode::LowMemory && self.validate_output {
            return Err("output validation requires in-memory mode".to_string());
        }
        Ok(())
    }
}
