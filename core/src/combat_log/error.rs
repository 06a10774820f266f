//! Error types for combat log parsing

use serde::Serialize;
use std::path::PathBuf;
use thiserror::Error;

/// Errors during combat log line parsing
#[derive(Debug, Error, Clone, PartialEq, Eq, Serialize)]
pub enum ParseError {
    #[error("line {line_number}: header does not match `DD-MM-YYYY HH:MM:SS.mmm TZ`")]
    InvalidHeader { line_number: u64 },

    #[error("line {line_number}: invalid timestamp `{segment}`")]
    InvalidTimestamp { line_number: u64, segment: String },

    #[error("line {line_number}: action matches no known form: `{action}`")]
    UnknownAction { line_number: u64, action: String },

    #[error("line {line_number}: invalid {field} `{value}`")]
    InvalidValue {
        line_number: u64,
        field: &'static str,
        value: String,
    },
}

impl ParseError {
    pub fn line_number(&self) -> u64 {
        match self {
            ParseError::InvalidHeader { line_number }
            | ParseError::InvalidTimestamp { line_number, .. }
            | ParseError::UnknownAction { line_number, .. }
            | ParseError::InvalidValue { line_number, .. } => *line_number,
        }
    }
}

/// Errors during log file reading operations
#[derive(Debug, Error)]
pub enum ReaderError {
    #[error("failed to open log file {path}")]
    OpenFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to memory map file {path}")]
    MemoryMap {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
