//! Subjects: an exam date, a difficulty rating and an ordered topic list.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::{check_name, names_match, Difficulty, Topic};
use crate::error::{CoreError, RecordKind, Result, ValidationError};

/// A course or exam area.
///
/// Progress is never stored; it is recomputed from the topics on every read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "SubjectRecord")]
pub struct Subject {
    name: String,
    exam_date: NaiveDate,
    difficulty: Difficulty,
    topics: Vec<Topic>,
}

#[derive(Deserialize)]
struct SubjectRecord {
    name: String,
    exam_date: NaiveDate,
    difficulty: Difficulty,
    topics: Vec<Topic>,
}

impl TryFrom<SubjectRecord> for Subject {
    type Error = ValidationError;

    fn try_from(record: SubjectRecord) -> Result<Self, Self::Error> {
        let mut subject = Subject {
            name: check_name("subject name", record.name)?,
            exam_date: record.exam_date,
            difficulty: record.difficulty,
            topics: Vec::with_capacity(record.topics.len()),
        };
        for topic in record.topics {
            if subject.find(topic.name()).is_some() {
                return Err(ValidationError::invalid(
                    "topics",
                    format!(
                        "duplicate topic '{}' in subject '{}'",
                        topic.name(),
                        subject.name
                    ),
                ));
            }
            subject.topics.push(topic);
        }
        Ok(subject)
    }
}

impl Subject {
    /// Create a subject with no topics.
    ///
    /// Exam dates in the past are accepted; the scheduler treats them as
    /// maximally urgent.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] if `name` is empty or `difficulty` is
    /// outside `1..=5`.
    pub fn new(
        name: impl Into<String>,
        exam_date: NaiveDate,
        difficulty: i64,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            name: check_name("subject name", name.into())?,
            exam_date,
            difficulty: Difficulty::new(difficulty)?,
            topics: Vec::new(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn exam_date(&self) -> NaiveDate {
        self.exam_date
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    /// Topics in insertion order.
    pub fn topics(&self) -> &[Topic] {
        &self.topics
    }

    fn find(&self, name: &str) -> Option<usize> {
        self.topics.iter().position(|t| names_match(t.name(), name))
    }

    /// Append a topic.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Duplicate`] if a topic with the same name
    /// (ignoring case) already exists in this subject.
    pub fn add_topic(&mut self, topic: Topic) -> Result<()> {
        if self.find(topic.name()).is_some() {
            return Err(CoreError::duplicate(RecordKind::Topic, topic.name()));
        }
        self.topics.push(topic);
        Ok(())
    }

    /// Remove and return the named topic.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::NotFound`] if no topic matches.
    pub fn remove_topic(&mut self, name: &str) -> Result<Topic> {
        let index = self
            .find(name)
            .ok_or_else(|| CoreError::not_found(RecordKind::Topic, name))?;
        Ok(self.topics.remove(index))
    }

    /// # Errors
    ///
    /// Returns [`CoreError::NotFound`] if no topic matches.
    pub fn topic(&self, name: &str) -> Result<&Topic> {
        self.find(name)
            .map(|i| &self.topics[i])
            .ok_or_else(|| CoreError::not_found(RecordKind::Topic, name))
    }

    /// # Errors
    ///
    /// Returns [`CoreError::NotFound`] if no topic matches.
    pub fn topic_mut(&mut self, name: &str) -> Result<&mut Topic> {
        match self.find(name) {
            Some(i) => Ok(&mut self.topics[i]),
            None => Err(CoreError::not_found(RecordKind::Topic, name)),
        }
    }

    /// Completed topics as a percentage of all topics; 0 with no topics.
    pub fn update_progress(&self) -> f64 {
        if self.topics.is_empty() {
            return 0.0;
        }
        let completed = self.topics.iter().filter(|t| t.is_completed()).count();
        completed as f64 / self.topics.len() as f64 * 100.0
    }

    pub fn progress(&self) -> f64 {
        self.update_progress()
    }

    /// True once there is at least one topic and all are done.
    pub fn is_complete(&self) -> bool {
        !self.topics.is_empty() && self.topics.iter().all(Topic::is_completed)
    }

    /// Whole days from `today` to the exam; negative once it has passed.
    pub fn days_until_exam(&self, today: NaiveDate) -> i64 {
        (self.exam_date - today).num_days()
    }

    pub fn set_exam_date(&mut self, exam_date: NaiveDate) {
        self.exam_date = exam_date;
    }

    /// # Errors
    ///
    /// Returns a [`ValidationError`] if `difficulty` is outside `1..=5`.
    pub fn set_difficulty(&mut self, difficulty: i64) -> Result<(), ValidationError> {
        self.difficulty = Difficulty::new(difficulty)?;
        Ok(())
    }

    /// Reset every topic to not started.
    pub fn reset_progress(&mut self) {
        for topic in &mut self.topics {
            topic.reset_progress();
        }
    }

    /// Total hours still needed across incomplete topics.
    pub fn remaining_hours(&self) -> f64 {
        self.topics.iter().map(Topic::remaining_hours).sum()
    }
}

impl fmt::Display for Subject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let status = if self.is_complete() { "✓" } else { "✗" };
        write!(
            f,
            "Subject: {} [Exam date: {}, Difficulty: {}, Progress: {:.2}%, Topics: {}, Status: {}]",
            self.name,
            self.exam_date.format("%Y-%m-%d"),
            self.difficulty,
            self.progress(),
            self.topics.len(),
            status
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn subject_with_topics(n: usize) -> Subject {
        let mut subject = Subject::new("Computer Science", date(2025, 12, 1), 3).unwrap();
        for i in 0..n {
            subject
                .add_topic(Topic::new(format!("Topic {i}"), 3, 2.0).unwrap())
                .unwrap();
        }
        subject
    }

    #[test]
    fn new_subject_has_no_progress() {
        let subject = Subject::new("Mathematics", date(2025, 12, 1), 3).unwrap();
        assert_eq!(subject.name(), "Mathematics");
        assert_eq!(subject.difficulty().get(), 3);
        assert_eq!(subject.exam_date(), date(2025, 12, 1));
        assert_eq!(subject.progress(), 0.0);
        assert!(subject.topics().is_empty());
        assert!(!subject.is_complete());
    }

    #[test]
    fn construction_rejects_bad_fields() {
        assert!(Subject::new("Chemistry", date(2025, 12, 1), 0).is_err());
        assert!(Subject::new("Biology", date(2025, 12, 1), 6).is_err());
        assert!(Subject::new("  ", date(2025, 12, 1), 3).is_err());
    }

    #[test]
    fn past_exam_dates_are_allowed() {
        assert!(Subject::new("Physics", date(2020, 1, 1), 1).is_ok());
    }

    #[test]
    fn add_topic_keeps_order_and_rejects_duplicates() {
        let mut subject = subject_with_topics(0);
        subject.add_topic(Topic::new("Data Structures", 5, 10.0).unwrap()).unwrap();
        subject.add_topic(Topic::new("Algorithms", 5, 12.0).unwrap()).unwrap();

        let err = subject
            .add_topic(Topic::new("data structures", 1, 1.0).unwrap())
            .unwrap_err();
        assert!(matches!(err, CoreError::Duplicate { kind: RecordKind::Topic, .. }));

        let names: Vec<_> = subject.topics().iter().map(Topic::name).collect();
        assert_eq!(names, ["Data Structures", "Algorithms"]);
    }

    #[test]
    fn remove_topic_reports_missing() {
        let mut subject = subject_with_topics(2);
        let removed = subject.remove_topic("topic 0").unwrap();
        assert_eq!(removed.name(), "Topic 0");
        assert_eq!(subject.topics().len(), 1);

        let err = subject.remove_topic("Topic 0").unwrap_err();
        assert!(matches!(err, CoreError::NotFound { kind: RecordKind::Topic, .. }));
    }

    #[test]
    fn progress_follows_topics() {
        let mut subject = subject_with_topics(4);
        subject.topic_mut("Topic 1").unwrap().mark_complete();
        assert_eq!(subject.progress(), 25.0);

        for i in 0..4 {
            subject.topic_mut(&format!("Topic {i}")).unwrap().mark_complete();
        }
        assert_eq!(subject.update_progress(), 100.0);
        assert!(subject.is_complete());
    }

    #[test]
    fn reset_progress_resets_every_topic() {
        let mut subject = subject_with_topics(2);
        subject.topic_mut("Topic 0").unwrap().add_hours(1.0).unwrap();
        subject.topic_mut("Topic 1").unwrap().mark_complete();

        subject.reset_progress();

        for topic in subject.topics() {
            assert_eq!(topic.hours_spent(), 0.0);
            assert!(!topic.is_completed());
        }
        assert_eq!(subject.progress(), 0.0);
    }

    #[test]
    fn days_until_exam_can_be_negative() {
        let subject = Subject::new("Physics", date(2025, 5, 15), 4).unwrap();
        assert_eq!(subject.days_until_exam(date(2025, 5, 10)), 5);
        assert_eq!(subject.days_until_exam(date(2025, 5, 15)), 0);
        assert_eq!(subject.days_until_exam(date(2025, 5, 20)), -5);
    }

    #[test]
    fn display_summarises_subject() {
        let mut subject = Subject::new("Physics", date(2025, 5, 15), 4).unwrap();
        assert_eq!(
            subject.to_string(),
            "Subject: Physics [Exam date: 2025-05-15, Difficulty: 4, Progress: 0.00%, Topics: 0, Status: ✗]"
        );

        let mut topic = Topic::new("Mechanics", 1, 1.0).unwrap();
        topic.mark_complete();
        subject.add_topic(topic).unwrap();
        assert_eq!(
            subject.to_string(),
            "Subject: Physics [Exam date: 2025-05-15, Difficulty: 4, Progress: 100.00%, Topics: 1, Status: ✓]"
        );
    }

    #[test]
    fn deserialization_rejects_duplicate_topics() {
        let json = r#"{
            "name": "Biology",
            "exam_date": "2025-06-15",
            "difficulty": 4,
            "topics": [
                {"name": "Cells", "priority": 5, "estimated_hours": 3.0, "completed": false},
                {"name": "cells", "priority": 2, "estimated_hours": 1.0, "completed": false}
            ]
        }"#;
        assert!(serde_json::from_str::<Subject>(json).is_err());
    }

    #[test]
    fn deserialization_rejects_bad_dates_and_difficulty() {
        let bad_date = r#"{"name":"B","exam_date":"15/06/2025","difficulty":4,"topics":[]}"#;
        assert!(serde_json::from_str::<Subject>(bad_date).is_err());
        let bad_difficulty = r#"{"name":"B","exam_date":"2025-06-15","difficulty":8,"topics":[]}"#;
        assert!(serde_json::from_str::<Subject>(bad_difficulty).is_err());
    }

    proptest! {
        #[test]
        fn progress_is_monotonic_while_completing(
            n in 1usize..12,
            order in proptest::collection::vec(0usize..12, 0..24)
        ) {
            let mut subject = subject_with_topics(n);
            let mut last = subject.progress();
            prop_assert_eq!(last, 0.0);
            for i in order {
                let name = format!("Topic {}", i % n);
                subject.topic_mut(&name).unwrap().mark_complete();
                let now = subject.progress();
                prop_assert!(now >= last);
                last = now;
            }
            for i in 0..n {
                subject.topic_mut(&format!("Topic {i}")).unwrap().mark_complete();
            }
            prop_assert_eq!(subject.progress(), 100.0);
        }
    }
}
