//! Study-time scheduler.
//!
//! This module distributes an hour budget across incomplete topics:
//! - Scores every incomplete topic by urgency (see [`urgency`])
//! - Ranks topics by urgency, then declared priority, then insertion order
//! - Gives each topic up to its remaining hours until the budget runs out
//! - Reports whatever budget is left over
//!
//! Scheduling only reads the catalog; it never changes topic state.

pub mod plan;
pub mod urgency;

pub use plan::{DayPlan, StudyPlan};
pub use urgency::UrgencyWeights;

use chrono::NaiveDate;
use serde::Serialize;
use tracing::debug;

use crate::error::ValidationError;
use crate::study::{Catalog, Subject, Topic};

/// Amounts below this are treated as zero to absorb float noise.
pub(crate) const HOURS_EPSILON: f64 = 1e-9;

/// One topic's share of the budget, borrowing from the catalog.
#[derive(Debug, Clone, Copy)]
pub struct ScheduleEntry<'a> {
    pub subject: &'a Subject,
    pub topic: &'a Topic,
    pub hours: f64,
    pub urgency: f64,
}

impl ScheduleEntry<'_> {
    pub fn to_session(&self) -> PlannedSession {
        PlannedSession {
            subject: self.subject.name().to_string(),
            topic: self.topic.name().to_string(),
            hours: self.hours,
            priority: self.topic.priority().get(),
            urgency: self.urgency,
        }
    }
}

/// Result of [`Scheduler::generate`].
#[derive(Debug, Clone)]
pub struct Schedule<'a> {
    pub date: NaiveDate,
    pub budget: f64,
    /// Allocations in ranking order, each with positive hours.
    pub entries: Vec<ScheduleEntry<'a>>,
    /// Ranked incomplete topics the budget did not reach; `hours` is zero.
    pub unallocated: Vec<ScheduleEntry<'a>>,
    pub leftover_hours: f64,
}

impl Schedule<'_> {
    pub fn allocated_hours(&self) -> f64 {
        self.entries.iter().map(|e| e.hours).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Owned, serializable copy for output.
    pub fn summary(&self) -> ScheduleSummary {
        ScheduleSummary {
            date: self.date,
            budget: self.budget,
            allocated_hours: self.allocated_hours(),
            leftover_hours: self.leftover_hours,
            entries: self.entries.iter().map(ScheduleEntry::to_session).collect(),
            unallocated: self.unallocated.iter().map(ScheduleEntry::to_session).collect(),
        }
    }
}

/// A block of study time for one topic, by name.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlannedSession {
    pub subject: String,
    pub topic: String,
    pub hours: f64,
    pub priority: u8,
    pub urgency: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScheduleSummary {
    pub date: NaiveDate,
    pub budget: f64,
    pub allocated_hours: f64,
    pub leftover_hours: f64,
    pub entries: Vec<PlannedSession>,
    pub unallocated: Vec<PlannedSession>,
}

/// A ranked topic awaiting hours, addressed by catalog position.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Candidate {
    pub subject: usize,
    pub topic: usize,
    pub priority: u8,
    pub urgency: f64,
    pub need: f64,
}

/// Outcome of handing a budget to ranked candidates.
pub(crate) struct Allocation {
    pub granted: Vec<(Candidate, f64)>,
    pub skipped: Vec<Candidate>,
    pub leftover: f64,
}

pub(crate) fn check_budget(field: &str, hours: f64) -> Result<f64, ValidationError> {
    if !hours.is_finite() || hours < 0.0 {
        return Err(ValidationError::invalid(
            field,
            format!("must be zero or more hours, got {hours}"),
        ));
    }
    Ok(hours)
}

/// Greedy fill in ranking order; no candidate gets more than its need.
pub(crate) fn allocate(candidates: &[Candidate], budget: f64) -> Allocation {
    let mut remaining = budget;
    let mut granted = Vec::new();
    let mut skipped = Vec::new();

    for candidate in candidates {
        if remaining <= HOURS_EPSILON {
            skipped.push(*candidate);
            continue;
        }
        let hours = candidate.need.min(remaining);
        granted.push((*candidate, hours));
        remaining -= hours;
    }

    if remaining < HOURS_EPSILON {
        remaining = 0.0;
    }

    Allocation {
        granted,
        skipped,
        leftover: remaining,
    }
}

/// Ranks topics and hands out study hours.
#[derive(Debug, Clone, Default)]
pub struct Scheduler {
    weights: UrgencyWeights,
}

impl Scheduler {
    /// Create a scheduler with default weights
    pub fn new() -> Self {
        Self::default()
    }

    /// Split `budget` hours across incomplete topics for `today`.
    ///
    /// # Arguments
    /// * `catalog` - Subjects to schedule; only read
    /// * `budget` - Hours available for the period
    /// * `today` - Date that days-until-exam is measured from
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] if `budget` is negative or not finite.
    pub fn generate<'a>(
        &self,
        catalog: &'a Catalog,
        budget: f64,
        today: NaiveDate,
    ) -> Result<Schedule<'a>, ValidationError> {
        let budget = check_budget("budget", budget)?;
        let ranked = self.rank(catalog, today, |_, _, topic| topic.remaining_hours(), |_| true);
        let allocation = allocate(&ranked, budget);

        let entry = |c: &Candidate, hours: f64| {
            let subject = &catalog.subjects()[c.subject];
            ScheduleEntry {
                subject,
                topic: &subject.topics()[c.topic],
                hours,
                urgency: c.urgency,
            }
        };

        let schedule = Schedule {
            date: today,
            budget,
            entries: allocation
                .granted
                .iter()
                .map(|(c, hours)| entry(c, *hours))
                .collect(),
            unallocated: allocation.skipped.iter().map(|c| entry(c, 0.0)).collect(),
            leftover_hours: allocation.leftover,
        };

        debug!(
            %today,
            budget,
            allocated = schedule.entries.len(),
            unallocated = schedule.unallocated.len(),
            leftover = schedule.leftover_hours,
            "generated schedule"
        );
        Ok(schedule)
    }

    /// Rank topics with a positive need.
    ///
    /// Candidates are collected in catalog order, then stably sorted by
    /// urgency and declared priority, both descending, so remaining ties
    /// keep insertion order.
    pub(crate) fn rank(
        &self,
        catalog: &Catalog,
        today: NaiveDate,
        mut need: impl FnMut(usize, usize, &Topic) -> f64,
        include: impl Fn(&Subject) -> bool,
    ) -> Vec<Candidate> {
        let mut candidates = Vec::new();

        for (si, subject) in catalog.iter().enumerate() {
            if !include(subject) {
                continue;
            }
            let days = subject.days_until_exam(today);
            for (ti, topic) in subject.topics().iter().enumerate() {
                if topic.is_completed() {
                    continue;
                }
                let hours = need(si, ti, topic);
                if hours <= 0.0 {
                    continue;
                }
                candidates.push(Candidate {
                    subject: si,
                    topic: ti,
                    priority: topic.priority().get(),
                    urgency: urgency::score(&self.weights, subject, topic, days),
                    need: hours,
                });
            }
        }

        candidates.sort_by(|a, b| {
            b.urgency
                .total_cmp(&a.urgency)
                .then_with(|| b.priority.cmp(&a.priority))
        });
        candidates
    }
}
