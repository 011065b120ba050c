//! Urgency scoring for topics.
//!
//! The score is a weighted sum of three positive terms, so it rises
//! strictly with priority, with difficulty and as the exam gets closer:
//!
//! ```text
//! urgency = w_p * priority + w_d * difficulty + w_x / (d + 1)
//! ```
//!
//! where `d` is days until the exam, floored at zero. An exam today or in
//! the past gets the largest proximity term instead of dividing by zero.

use crate::study::{Subject, Topic};

/// Weights for the three urgency terms. All strictly positive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UrgencyWeights {
    priority: f64,
    difficulty: f64,
    proximity: f64,
}

impl Default for UrgencyWeights {
    fn default() -> Self {
        Self {
            priority: 1.0,
            difficulty: 0.5,
            proximity: 10.0,
        }
    }
}

/// Proximity factor in `(0, 1]`; 1 for an exam today or already past.
pub fn proximity(days_until_exam: i64) -> f64 {
    1.0 / (days_until_exam.max(0) as f64 + 1.0)
}

/// Urgency of `topic` in `subject` with `days_until_exam` to go.
pub fn score(weights: &UrgencyWeights, subject: &Subject, topic: &Topic, days_until_exam: i64) -> f64 {
    weights.priority * f64::from(topic.priority().get())
        + weights.difficulty * f64::from(subject.difficulty().get())
        + weights.proximity * proximity(days_until_exam)
}
