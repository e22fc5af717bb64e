//! Data models for subjects and cohorts.

pub mod cohort;
pub mod subject;

pub use cohort::Cohort;
pub use subject::{RelapseStatus, SEX_TOKENS, Sex, SubjectRecord};
