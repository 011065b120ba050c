//! Demo subjects for trying the tool on an empty catalog.

use chrono::{Duration, NaiveDate};

use super::{Catalog, Subject, Topic};
use crate::error::Result;

/// Three subjects with exams 60, 45 and 30 days after `today`, a couple of
/// topics already done.
///
/// # Errors
///
/// Returns [`crate::CoreError::Duplicate`] if `catalog` already holds one
/// of the sample subjects; nothing is added in that case.
pub fn add_sample_subjects(catalog: &mut Catalog, today: NaiveDate) -> Result<usize> {
    let subjects = sample_subjects(today)?;
    let mut merged = catalog.clone();
    for subject in subjects {
        merged.add_subject(subject)?;
    }
    let added = merged.len() - catalog.len();
    *catalog = merged;
    Ok(added)
}

fn sample_subjects(today: NaiveDate) -> Result<Vec<Subject>> {
    let mut cs = Subject::new("Computer Science", today + Duration::days(60), 4)?;
    cs.add_topic(Topic::new("Data Structures", 5, 10.0)?)?;
    cs.add_topic(Topic::new("Algorithms", 5, 12.0)?)?;
    cs.add_topic(Topic::new("Operating Systems", 3, 8.0)?)?;
    cs.add_topic(Topic::new("Computer Networks", 4, 6.0)?)?;
    cs.topic_mut("Data Structures")?.mark_complete();

    let mut math = Subject::new("Mathematics", today + Duration::days(45), 5)?;
    math.add_topic(Topic::new("Calculus", 5, 15.0)?)?;
    math.add_topic(Topic::new("Linear Algebra", 4, 10.0)?)?;
    math.add_topic(Topic::new("Probability", 3, 8.0)?)?;

    let mut physics = Subject::new("Physics", today + Duration::days(30), 4)?;
    physics.add_topic(Topic::new("Mechanics", 5, 10.0)?)?;
    physics.add_topic(Topic::new("Thermodynamics", 4, 8.0)?)?;
    physics.add_topic(Topic::new("Electromagnetism", 4, 12.0)?)?;
    physics.topic_mut("Thermodynamics")?.mark_complete();

    Ok(vec![cs, math, physics])
}
