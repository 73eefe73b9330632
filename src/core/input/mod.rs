//! # Input Module
//!
//! Reads the integers fed to the signing pipeline.
//!
//! ## Format
//! - Integers separated by whitespace and/or commas
//! - `#` starts a comment that runs to the end of the line
//! - Blank lines are ignored

use crate::error::InputError;
use std::fs;
use std::path::Path;

/// The sequence signed when no values are given
pub const DEFAULT_VALUES: [i64; 7] = [0, 1, 1, 2, 3, 5, 8];

/// Parse integers from text
pub fn parse_values(text: &str) -> Result<Vec<i64>, InputError> {
    let mut values = Vec::new();

    for (index, line) in text.lines().enumerate() {
        let content = line.split('#').next().unwrap_or_default();
        let tokens = content
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|token| !token.is_empty());

        for token in tokens {
            let value = token
                .parse::<i64>()
                .map_err(|_| InputError::InvalidNumber {
                    line: index + 1,
                    value: token.to_string(),
                })?;
            values.push(value);
        }
    }

    Ok(values)
}

/// Read and parse integers from a file
pub fn read_values(path: &Path) -> Result<Vec<i64>, InputError> {
    let text = fs::read_to_string(path).map_err(|source| InputError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    parse_values(&text)
}
