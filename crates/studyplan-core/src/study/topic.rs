//! A single unit of study material inside a subject.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::{check_hours, check_name, Priority};
use crate::error::ValidationError;

/// A topic with a priority, an hour estimate and completion tracking.
///
/// Fields are private so every mutation goes through a validating setter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "TopicRecord")]
pub struct Topic {
    name: String,
    priority: Priority,
    estimated_hours: f64,
    completed: bool,
    hours_spent: f64,
}

/// On-disk shape of a topic before validation.
#[derive(Deserialize)]
struct TopicRecord {
    name: String,
    priority: Priority,
    estimated_hours: f64,
    completed: bool,
    #[serde(default)]
    hours_spent: f64,
}

impl TryFrom<TopicRecord> for Topic {
    type Error = ValidationError;

    fn try_from(record: TopicRecord) -> Result<Self, Self::Error> {
        if !record.hours_spent.is_finite() || record.hours_spent < 0.0 {
            return Err(ValidationError::invalid(
                "hours_spent",
                format!("must be zero or more, got {}", record.hours_spent),
            ));
        }
        let mut topic = Self {
            name: check_name("topic name", record.name)?,
            priority: record.priority,
            estimated_hours: check_hours("estimated_hours", record.estimated_hours)?,
            completed: record.completed,
            hours_spent: record.hours_spent,
        };
        topic.settle();
        Ok(topic)
    }
}

impl Topic {
    /// Create an incomplete topic.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] if `name` is empty, `priority` is
    /// outside `1..=5`, or `estimated_hours` is not a positive number.
    pub fn new(
        name: impl Into<String>,
        priority: i64,
        estimated_hours: f64,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            name: check_name("topic name", name.into())?,
            priority: Priority::new(priority)?,
            estimated_hours: check_hours("estimated_hours", estimated_hours)?,
            completed: false,
            hours_spent: 0.0,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn priority(&self) -> Priority {
        self.priority
    }

    pub fn estimated_hours(&self) -> f64 {
        self.estimated_hours
    }

    pub fn hours_spent(&self) -> f64 {
        self.hours_spent
    }

    pub fn is_completed(&self) -> bool {
        self.completed
    }

    /// Mark the topic done. Repeat calls change nothing.
    pub fn mark_complete(&mut self) {
        self.completed = true;
        self.hours_spent = self.estimated_hours;
    }

    /// Keep `completed` and `hours_spent` consistent: a completed topic has
    /// spent exactly its estimate, and reaching the estimate completes it.
    fn settle(&mut self) {
        if self.completed || self.hours_spent >= self.estimated_hours {
            self.mark_complete();
        }
    }

    /// Record study time. Reaching the estimate completes the topic, and
    /// `hours_spent` never goes past `estimated_hours`.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] if `hours` is negative or not finite.
    pub fn add_hours(&mut self, hours: f64) -> Result<(), ValidationError> {
        if !hours.is_finite() || hours < 0.0 {
            return Err(ValidationError::invalid(
                "hours",
                format!("cannot log {hours} hours"),
            ));
        }
        if !self.completed {
            self.hours_spent += hours;
            self.settle();
        }
        Ok(())
    }

    /// Clear completion and logged time.
    pub fn reset_progress(&mut self) {
        self.completed = false;
        self.hours_spent = 0.0;
    }

    /// Percentage of the estimate already covered, capped at 100.
    pub fn progress(&self) -> f64 {
        if self.completed {
            return 100.0;
        }
        (self.hours_spent / self.estimated_hours * 100.0).min(100.0)
    }

    /// Hours still needed; never more than `estimated_hours`.
    pub fn remaining_hours(&self) -> f64 {
        if self.completed {
            return 0.0;
        }
        (self.estimated_hours - self.hours_spent).clamp(0.0, self.estimated_hours)
    }

    /// # Errors
    ///
    /// Returns a [`ValidationError`] if `priority` is outside `1..=5`.
    pub fn set_priority(&mut self, priority: i64) -> Result<(), ValidationError> {
        self.priority = Priority::new(priority)?;
        Ok(())
    }

    /// Change the estimate. Logged time at or above the new estimate
    /// completes the topic; a completed topic stays completed.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] if `hours` is not a positive number.
    pub fn set_estimated_hours(&mut self, hours: f64) -> Result<(), ValidationError> {
        self.estimated_hours = check_hours("estimated_hours", hours)?;
        self.settle();
        Ok(())
    }
}

impl fmt::Display for Topic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let status = if self.completed { "✓" } else { "✗" };
        write!(
            f,
            "Topic: {} [Priority: {}, Progress: {:.1}%, Hours: {:.1}/{:.1}, {}]",
            self.name,
            self.priority,
            self.progress(),
            self.hours_spent,
            self.estimated_hours,
            status
        )
    }
}
