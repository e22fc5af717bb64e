//! Cohort builder
//!
//! Partitions subject table rows into the abstainer and relapser cohorts.
//! Rows that cannot be used are excluded and recorded, never fatal.

use std::io::Read;
use std::path::Path;
use std::time::Instant;

use csv::StringRecord;
use log::{debug, info, warn};

use crate::algorithm::cohort::types::{
    ABSTAINERS, CaseCohort, CohortBuild, RELAPSERS, SkipReason, SkippedRow,
};
use crate::config::{CohortBuilderConfig, DuplicatePolicy};
use crate::error::{CohortMatchError, Result};
use crate::models::{Cohort, RelapseStatus, SubjectRecord};
use crate::reader::open_subject_table;

/// Classification of a single row
#[derive(Debug, Clone, PartialEq)]
enum RowOutcome<'a> {
    Accept {
        cohort: CaseCohort,
        subject: &'a str,
        age: f64,
    },
    Skip(SkipReason),
}

/// Builds case cohorts from a subject table
#[derive(Debug, Clone, Default)]
pub struct CohortBuilder {
    config: CohortBuilderConfig,
}

impl CohortBuilder {
    /// Create a new builder with the given configuration
    #[must_use]
    pub const fn new(config: CohortBuilderConfig) -> Self {
        Self { config }
    }

    /// Read a subject table file and build the cohorts
    pub fn build_from_path(&self, path: &Path) -> Result<CohortBuild> {
        let start = Instant::now();
        let mut reader = open_subject_table(path)?;
        let build = self.build(&mut reader)?;
        info!(
            "Read {} abstainers and {} relapsers from {} in {:.2?} ({} rows skipped)",
            build.abstainers.len(),
            build.relapsers.len(),
            path.display(),
            start.elapsed(),
            build.skipped.len()
        );
        Ok(build)
    }

    /// Build the cohorts from every remaining record of a CSV reader
    pub fn build<R: Read>(&self, reader: &mut csv::Reader<R>) -> Result<CohortBuild> {
        let mut build = CohortBuild {
            abstainers: Cohort::new(ABSTAINERS),
            relapsers: Cohort::new(RELAPSERS),
            skipped: Vec::new(),
            duplicates: Vec::new(),
            rows_read: 0,
        };

        for record in reader.records() {
            let record = record?;
            let line = record.position().map_or(0, csv::Position::line);
            build.rows_read += 1;

            match self.classify(&record) {
                RowOutcome::Accept {
                    cohort,
                    subject,
                    age,
                } => {
                    let target = match cohort {
                        CaseCohort::Abstainers => &mut build.abstainers,
                        CaseCohort::Relapsers => &mut build.relapsers,
                    };
                    if target.contains(subject) {
                        self.on_duplicate(target, subject, line, &mut build.duplicates)?;
                    }
                    target.insert(subject, age)?;
                }
                RowOutcome::Skip(reason) => {
                    let subject = record.get(self.config.columns.id).unwrap_or_default();
                    debug!("Skipping line {line} ({subject}): {reason}");
                    build.skipped.push(SkippedRow {
                        line,
                        subject: subject.to_string(),
                        reason,
                    });
                }
            }
        }

        info!(
            "Built cohorts from {} rows: {} abstainers, {} relapsers, {} skipped",
            build.rows_read,
            build.abstainers.len(),
            build.relapsers.len(),
            build.skipped.len()
        );
        for (reason, count) in build.skip_counts() {
            debug!("  {count} rows skipped: {reason}");
        }

        Ok(build)
    }

    fn on_duplicate(
        &self,
        cohort: &Cohort,
        subject: &str,
        line: u64,
        duplicates: &mut Vec<String>,
    ) -> Result<()> {
        match self.config.duplicate_policy {
            DuplicatePolicy::Reject => Err(CohortMatchError::DuplicateSubject {
                cohort: cohort.name().to_string(),
                subject: subject.to_string(),
                line,
            }),
            DuplicatePolicy::KeepLast => {
                warn!(
                    "Subject {subject} repeats in cohort '{}' at line {line}; keeping the later row",
                    cohort.name()
                );
                duplicates.push(subject.to_string());
                Ok(())
            }
        }
    }

    fn classify<'a>(&self, record: &'a StringRecord) -> RowOutcome<'a> {
        let columns = &self.config.columns;
        let marked = record
            .get(columns.id)
            .is_some_and(|id| id.contains(self.config.missing_data_marker.as_str()));
        if marked {
            return RowOutcome::Skip(SkipReason::MissingDataMarker);
        }
        if record.len() < columns.required_len() {
            return RowOutcome::Skip(SkipReason::MissingColumns);
        }

        let row = SubjectRecord {
            id: &record[columns.id],
            relapse_flag: &record[columns.relapse_flag],
            age: &record[columns.age],
            sex: &record[columns.sex],
        };

        match row.sex() {
            None => return RowOutcome::Skip(SkipReason::UnrecognizedSex),
            Some(sex) if sex != self.config.sex => {
                return RowOutcome::Skip(SkipReason::OtherSex);
            }
            Some(_) => {}
        }

        let cohort = match row.relapse_status() {
            RelapseStatus::Abstained => CaseCohort::Abstainers,
            RelapseStatus::Relapsed => CaseCohort::Relapsers,
            RelapseStatus::Unknown => return RowOutcome::Skip(SkipReason::UnknownRelapseStatus),
        };

        match row.parsed_age() {
            Some(age) => RowOutcome::Accept {
                cohort,
                subject: row.id,
                age,
            },
            None => RowOutcome::Skip(SkipReason::InvalidAge),
        }
    }
}
