//! Error types and handling infrastructure for the JMdict conversion pipeline

use std::io;
use std::path::PathBuf;

/// Errors raised by the line scanner while recognizing the record grammar
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    /// Input ended while a block was still open. The scanner has no recovery
    /// policy for a missing closing marker; this is a hard stop.
    #[error("input ended inside an open <{block}> block at line {line}{}", last_seq_suffix(.last_seq))]
    UnexpectedEof {
        /// Name of the block whose closing marker was never seen
        block: &'static str,
        /// 1-based line number of the last line read
        line: u64,
        /// `ent_seq` of the last entry that began parsing, if any
        last_seq: Option<String>,
    },

    #[error("failed to read input at line {line}: {source}")]
    Read {
        line: u64,
        #[source]
        source: io::Error,
    },
}

fn last_seq_suffix(last_seq: &Option<String>) -> String {
    match last_seq {
        Some(seq) => format!(" (last entry {})", seq),
        None => String::new(),
    }
}

impl ParseError {
    pub fn unexpected_eof(block: &'static str, line: u64, last_seq: Option<String>) -> Self {
        Self::UnexpectedEof {
            block,
            line,
            last_seq,
        }
    }

    pub fn read(line: u64, source: io::Error) -> Self {
        Self::Read { line, source }
    }

    /// The block that was open when the error occurred, if applicable
    pub fn open_block(&self) -> Option<&'static str> {
        match self {
            Self::UnexpectedEof { block, .. } => Some(block),
            Self::Read { .. } => None,
        }
    }
}

/// Main error type for conversion operations
#[derive(Debug, thiserror::Error)]
pub enum ConvertError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The rendered document failed the post-conversion JSON re-parse
    #[error("rendered output is not valid JSON: {0}")]
    InvalidOutput(String),
}

impl ConvertError {
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument(message.into())
    }

    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub fn invalid_output(message: impl Into<String>) -> Self {
        Self::InvalidOutput(message.into())
    }

    /// Create a user-friendly error message
    pub fn user_message(&self) -> String {
        match self {
            Self::Parse(err) => match err.open_block() {
                Some(block) => format!("malformed record: {} (open block: <{}>)", err, block),
                None => format!("parse failure: {}", err),
            },
            Self::InvalidArgument(arg) => format!("invalid argument: {}", arg),
            Self::Io { path, source } => {
                format!("I/O error on {}: {}", path.display(), source)
            }
            Self::InvalidOutput(msg) => format!("rendered output is not valid JSON: {}", msg),
        }
    }
}

/// Result type for conversion operations
pub type ConvertResult<T> = Result<T, ConvertError>;

/// Convenience result type for scanner operations
pub type ParseResult<T> = Result<T, ParseError>;
