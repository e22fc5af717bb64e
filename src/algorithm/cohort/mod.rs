//! Building the abstainer and relapser cohorts from a subject table.

pub mod builder;
pub mod types;

pub use builder::CohortBuilder;
pub use types::{
    ABSTAINERS, CaseCohort, CohortBuild, RELAPSERS, SkipReason, SkippedRow, count_by_reason,
};
