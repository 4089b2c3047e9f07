//! Dictionary-to-JSON conversion module
//!
//! Contains the controller that drives the scanner and formatter, its
//! configuration, and the progress-reporting seam.

pub mod config;
pub mod engine;
pub mod progress;

pub use config::{ConvertConfig, OutputMode};
pub use engine::{ConvertSummary, Converter};
pub use progress::{NullProgress, Progress};
