//! Multi-day study plans built by repeating the daily allocation.

use chrono::{Duration, NaiveDate};
use serde::Serialize;
use tracing::debug;

use super::{allocate, check_budget, PlannedSession, Scheduler, HOURS_EPSILON};
use crate::error::ValidationError;
use crate::study::Catalog;

/// Sessions for one calendar day.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DayPlan {
    pub date: NaiveDate,
    pub sessions: Vec<PlannedSession>,
}

impl DayPlan {
    pub fn total_hours(&self) -> f64 {
        self.sessions.iter().map(|s| s.hours).sum()
    }
}

/// Result of [`Scheduler::plan_days`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StudyPlan {
    pub start: NaiveDate,
    pub hours_per_day: f64,
    /// Days with at least one session, in date order.
    pub days: Vec<DayPlan>,
    /// Hours of incomplete work the horizon did not cover.
    pub unplanned_hours: f64,
}

impl StudyPlan {
    pub fn total_hours(&self) -> f64 {
        self.days.iter().map(DayPlan::total_hours).sum()
    }
}

impl Scheduler {
    /// Plan `days` consecutive days from `start`, `hours_per_day` each.
    ///
    /// Urgency is recomputed for every day and each topic's remaining need
    /// carries over. A subject drops out once its exam date is behind the
    /// day being planned; the exam day itself is still planned.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] if `hours_per_day` is negative or not
    /// finite.
    pub fn plan_days(
        &self,
        catalog: &Catalog,
        hours_per_day: f64,
        days: u32,
        start: NaiveDate,
    ) -> Result<StudyPlan, ValidationError> {
        let hours_per_day = check_budget("hours_per_day", hours_per_day)?;
        // Indexed [subject][topic] so totals are summed in catalog order.
        let mut remaining: Vec<Vec<f64>> = catalog
            .iter()
            .map(|subject| subject.topics().iter().map(|t| t.remaining_hours()).collect())
            .collect();

        let mut plan_days = Vec::new();
        // A budget the allocator treats as zero can never grant anything.
        let horizon = if hours_per_day > HOURS_EPSILON { days } else { 0 };
        for offset in 0..horizon {
            let Some(date) = start.checked_add_signed(Duration::days(i64::from(offset))) else {
                break;
            };
            let ranked = self.rank(
                catalog,
                date,
                |si, ti, _| remaining[si][ti],
                |subject| subject.exam_date() >= date,
            );
            // Needs only shrink and subjects only drop out, so nothing later
            // can be scheduled either.
            if ranked.is_empty() {
                break;
            }

            let allocation = allocate(&ranked, hours_per_day);
            if allocation.granted.is_empty() {
                continue;
            }

            let mut sessions = Vec::with_capacity(allocation.granted.len());
            for (candidate, hours) in allocation.granted {
                let subject = &catalog.subjects()[candidate.subject];
                let topic = &subject.topics()[candidate.topic];
                let need = &mut remaining[candidate.subject][candidate.topic];
                *need -= hours;
                if *need <= HOURS_EPSILON {
                    *need = 0.0;
                }
                sessions.push(PlannedSession {
                    subject: subject.name().to_string(),
                    topic: topic.name().to_string(),
                    hours,
                    priority: topic.priority().get(),
                    urgency: candidate.urgency,
                });
            }
            plan_days.push(DayPlan { date, sessions });
        }

        let unplanned_hours: f64 = remaining.iter().flatten().sum();
        debug!(
            %start,
            days,
            planned_days = plan_days.len(),
            unplanned_hours,
            "built study plan"
        );
        Ok(StudyPlan {
            start,
            hours_per_day,
            days: plan_days,
            unplanned_hours,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::study::{Subject, Topic};
    use std::collections::HashMap;

    fn start() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 1).unwrap()
    }

    fn subject(name: &str, days_out: i64, difficulty: i64, topics: &[(&str, i64, f64)]) -> Subject {
        let mut s = Subject::new(name, start() + Duration::days(days_out), difficulty).unwrap();
        for (topic, priority, hours) in topics {
            s.add_topic(Topic::new(*topic, *priority, *hours).unwrap()).unwrap();
        }
        s
    }

    fn sample() -> Catalog {
        Catalog::from_subjects(vec![
            subject("Mathematics", 10, 4, &[("Calculus", 5, 10.0), ("Algebra", 3, 8.0)]),
            subject("Physics", 5, 3, &[("Mechanics", 4, 6.0), ("Thermodynamics", 3, 4.0)]),
        ])
        .unwrap()
    }

    #[test]
    fn daily_budget_is_respected() {
        let plan = Scheduler::new().plan_days(&sample(), 4.0, 7, start()).unwrap();
        assert!(!plan.days.is_empty());
        assert!(plan.days.len() <= 7);
        for day in &plan.days {
            assert!(day.total_hours() <= 4.0 + 1e-9);
        }
        assert_eq!(plan.days[0].date, start());
    }

    #[test]
    fn plan_covers_all_work_given_enough_days() {
        let catalog = sample();
        let plan = Scheduler::new().plan_days(&catalog, 4.0, 30, start()).unwrap();
        assert!((plan.total_hours() - 28.0).abs() < 1e-9);
        assert_eq!(plan.unplanned_hours, 0.0);
        // 28 hours at 4 a day.
        assert_eq!(plan.days.len(), 7);
    }

    #[test]
    fn no_topic_is_planned_beyond_its_need() {
        let plan = Scheduler::new().plan_days(&sample(), 3.0, 30, start()).unwrap();
        let mut per_topic: HashMap<String, f64> = HashMap::new();
        for session in plan.days.iter().flat_map(|d| &d.sessions) {
            *per_topic.entry(session.topic.clone()).or_default() += session.hours;
        }
        assert!((per_topic["Calculus"] - 10.0).abs() < 1e-9);
        assert!((per_topic["Mechanics"] - 6.0).abs() < 1e-9);
    }

    #[test]
    fn sooner_exam_comes_first() {
        let catalog = Catalog::from_subjects(vec![
            subject("Later", 20, 3, &[("Essay", 3, 4.0)]),
            subject("Sooner", 3, 3, &[("Revision", 3, 4.0)]),
        ])
        .unwrap();
        let plan = Scheduler::new().plan_days(&catalog, 4.0, 3, start()).unwrap();
        assert_eq!(plan.days[0].sessions[0].subject, "Sooner");
        assert_eq!(plan.days[1].sessions[0].subject, "Later");
    }

    #[test]
    fn subjects_drop_out_after_exam_day() {
        let catalog =
            Catalog::from_subjects(vec![subject("Soon", 1, 3, &[("Cram", 5, 20.0)])]).unwrap();
        let plan = Scheduler::new().plan_days(&catalog, 4.0, 7, start()).unwrap();

        let dates: Vec<_> = plan.days.iter().map(|d| d.date).collect();
        assert_eq!(dates, [start(), start() + Duration::days(1)]);
        assert!((plan.unplanned_hours - 12.0).abs() < 1e-9);
    }

    #[test]
    fn completed_topics_are_not_planned() {
        let mut catalog = sample();
        for subject in ["Mathematics", "Physics"] {
            let s = catalog.subject_mut(subject).unwrap();
            let names: Vec<String> = s.topics().iter().map(|t| t.name().to_string()).collect();
            for name in names {
                s.topic_mut(&name).unwrap().mark_complete();
            }
        }
        let plan = Scheduler::new().plan_days(&catalog, 4.0, 7, start()).unwrap();
        assert!(plan.days.is_empty());
        assert_eq!(plan.unplanned_hours, 0.0);
    }

    #[test]
    fn empty_catalog_and_zero_horizon_give_empty_plans() {
        let scheduler = Scheduler::new();
        assert!(scheduler
            .plan_days(&Catalog::new(), 4.0, 7, start())
            .unwrap()
            .days
            .is_empty());
        let plan = scheduler.plan_days(&sample(), 4.0, 0, start()).unwrap();
        assert!(plan.days.is_empty());
        assert_eq!(plan.unplanned_hours, 28.0);
    }

    #[test]
    fn zero_hours_per_day_plans_nothing() {
        let plan = Scheduler::new().plan_days(&sample(), 0.0, 5, start()).unwrap();
        assert!(plan.days.is_empty());
        assert_eq!(plan.unplanned_hours, 28.0);
    }

    #[test]
    fn zero_daily_budget_returns_at_once_for_any_horizon() {
        let plan = Scheduler::new()
            .plan_days(&sample(), 0.0, u32::MAX, start())
            .unwrap();
        assert!(plan.days.is_empty());
        assert_eq!(plan.unplanned_hours, 28.0);

        let plan = Scheduler::new()
            .plan_days(&sample(), HOURS_EPSILON / 2.0, u32::MAX, start())
            .unwrap();
        assert!(plan.days.is_empty());
    }

    #[test]
    fn long_horizon_stops_after_the_last_exam() {
        let catalog =
            Catalog::from_subjects(vec![subject("Soon", 2, 3, &[("Cram", 5, 100.0)])]).unwrap();
        let plan = Scheduler::new()
            .plan_days(&catalog, 1.0, u32::MAX, start())
            .unwrap();
        assert_eq!(plan.days.len(), 3);
        assert!((plan.unplanned_hours - 97.0).abs() < 1e-9);
    }

    #[test]
    fn unplanned_hours_sum_in_catalog_order() {
        // Magnitudes far apart make the float sum depend on order.
        let catalog = Catalog::from_subjects(vec![
            subject("A", 10, 3, &[("T0", 3, 0.1), ("T1", 3, 1e16), ("T2", 3, 0.3)]),
            subject("B", 10, 3, &[("T3", 3, 2.7), ("T4", 3, 1e16), ("T5", 3, 0.7)]),
            subject("C", 10, 3, &[("T6", 3, 1e-3), ("T7", 3, 5.5)]),
        ])
        .unwrap();

        let expected: f64 = catalog
            .iter()
            .flat_map(|s| s.topics())
            .map(Topic::remaining_hours)
            .sum();
        let scheduler = Scheduler::new();
        let plan = scheduler.plan_days(&catalog, 4.0, 0, start()).unwrap();
        assert_eq!(plan.unplanned_hours.to_bits(), expected.to_bits());
        for _ in 0..16 {
            assert_eq!(scheduler.plan_days(&catalog, 4.0, 0, start()).unwrap(), plan);
        }
    }

    #[test]
    fn invalid_daily_budget_is_rejected() {
        assert!(Scheduler::new()
            .plan_days(&sample(), -2.0, 5, start())
            .is_err());
    }

    #[test]
    fn planning_leaves_catalog_unchanged() {
        let catalog = sample();
        let before = catalog.clone();
        let _ = Scheduler::new().plan_days(&catalog, 4.0, 7, start()).unwrap();
        assert_eq!(catalog, before);
    }
}
