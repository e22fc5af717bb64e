//! Utility functions for error handling
//!
//! Helpers that open input files and attach the path and purpose to
//! any failure.

use std::fs;
use std::io;
use std::path::Path;

use crate::error::{CohortMatchError, Result};

/// Safely open a file with rich error information
///
/// # Arguments
/// * `path` - The path to the file to open
/// * `purpose` - Why the file is being opened (for error context)
pub fn safe_open_file(path: &Path, purpose: &str) -> Result<fs::File> {
    if !path.exists() {
        return Err(CohortMatchError::io(
            path,
            format!("needed for {purpose}"),
            io::Error::new(io::ErrorKind::NotFound, "file not found"),
        ));
    }

    if !path.is_file() {
        return Err(CohortMatchError::io(
            path,
            format!("expected a file for {purpose}"),
            io::Error::new(io::ErrorKind::InvalidInput, "path is not a file"),
        ));
    }

    fs::File::open(path).map_err(|e| {
        let context = match e.kind() {
            io::ErrorKind::PermissionDenied => "permission denied - check file permissions".to_string(),
            _ => format!("failed to open file for {purpose}"),
        };
        CohortMatchError::io(path, context, e)
    })
}

/// Safely read a file to string with rich error information
pub fn safe_read_to_string(path: &Path, purpose: &str) -> Result<String> {
    let mut file = safe_open_file(path, purpose)?;

    let mut content = String::new();
    match io::Read::read_to_string(&mut file, &mut content) {
        Ok(_) => Ok(content),
        Err(e) => {
            let context = match e.kind() {
                io::ErrorKind::InvalidData => {
                    "file contains invalid UTF-8 data - cannot read as text".to_string()
                }
                _ => format!("failed to read file content for {purpose}"),
            };
            Err(CohortMatchError::io(path, context, e))
        }
    }
}
