//! # Error Module
//!
//! Error types for the signer pipeline.
//!
//! ## Design Principles
//! - **The executor never fails** - stage problems are reported, not returned
//! - **Include context** - stage names, file paths and line numbers
//! - **Panics are fatal** - nothing here models a crashed stage

use crate::core::pipeline::ItemKind;
use std::path::PathBuf;
use thiserror::Error;

/// Top-level application error
#[derive(Error, Debug)]
pub enum SignerError {
    #[error("Input error: {0}")]
    Input(#[from] InputError),

    #[error("Output error: {0}")]
    Output(String),
}

/// Errors raised while reading the values to sign
#[derive(Error, Debug)]
pub enum InputError {
    #[error("Failed to read input file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid number {value:?} on line {line}")]
    InvalidNumber { line: usize, value: String },
}

/// Conditions a stage reports while it keeps running
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StageError {
    #[error("{stage}: can't convert {found} item to {expected}")]
    TypeMismatch {
        stage: String,
        expected: ItemKind,
        found: ItemKind,
    },

    #[error("{stage}: downstream closed, item discarded")]
    Disconnected { stage: String },
}

/// Convenience Result type alias
pub type Result<T> = std::result::Result<T, SignerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn type_mismatch_names_stage_and_kinds() {
        let error = StageError::TypeMismatch {
            stage: "single_hash".to_string(),
            expected: ItemKind::Int,
            found: ItemKind::Text,
        };
        assert_eq!(
            error.to_string(),
            "single_hash: can't convert string item to int"
        );
    }

    #[test]
    fn invalid_number_includes_line() {
        let error = InputError::InvalidNumber {
            line: 3,
            value: "x7".to_string(),
        };
        let message = error.to_string();
        assert!(message.contains("line 3"));
        assert!(message.contains("\"x7\""));
    }

    #[test]
    fn input_error_converts_to_top_level() {
        let error: SignerError = InputError::InvalidNumber {
            line: 1,
            value: "?".to_string(),
        }
        .into();
        assert!(matches!(error, SignerError::Input(_)));
    }
}
