//! # Studyplan Core Library
//!
//! This library provides the core logic for Studyplan, a personal
//! exam-preparation planner. All operations are available via the
//! standalone `studyplan` CLI binary, which is a thin layer over this crate.
//!
//! ## Architecture
//!
//! - **Study model**: subjects with exam dates and difficulty, each owning an
//!   ordered list of prioritised topics with hour estimates
//! - **Storage**: the subject catalog as one JSON document, written
//!   atomically; TOML-based configuration
//! - **Scheduler**: ranks incomplete topics by urgency and splits an hour
//!   budget across them, for one day or a run of days
//!
//! ## Key Components
//!
//! - [`Catalog`]: The subject collection passed between the other parts
//! - [`SubjectStore`]: Load/save of the catalog
//! - [`Config`]: Application configuration management
//! - [`Scheduler`]: Urgency ranking and hour allocation

pub mod error;
pub mod scheduler;
pub mod storage;
pub mod study;

pub use error::{ConfigError, CoreError, RecordKind, Result, ValidationError};
pub use scheduler::{
    DayPlan, PlannedSession, Schedule, ScheduleEntry, ScheduleSummary, Scheduler, StudyPlan,
    UrgencyWeights,
};
pub use storage::{data_dir, Config, SubjectStore};
pub use study::{Catalog, Difficulty, Priority, Subject, Topic};
