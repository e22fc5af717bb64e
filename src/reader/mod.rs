//! Reading the comma-separated subject table.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use log::info;

use crate::error::Result;
use crate::error::util::safe_open_file;

/// Create a subject table reader over any byte source
///
/// The first row is treated as a header and skipped. Rows may have
/// differing field counts; short rows are dealt with by the cohort builder.
pub fn subject_table_reader<R: Read>(source: R) -> csv::Reader<R> {
    csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(source)
}

/// Open a subject table file
pub fn open_subject_table(path: &Path) -> Result<csv::Reader<File>> {
    info!("Reading subject table {}", path.display());
    let file = safe_open_file(path, "subject table")?;
    Ok(subject_table_reader(file))
}
