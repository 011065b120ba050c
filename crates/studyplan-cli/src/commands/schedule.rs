use chrono::NaiveDate;
use clap::Subcommand;
use studyplan_core::{PlannedSession, Scheduler};

use super::{print_json, today};
use crate::session::Session;

#[derive(Subcommand, Debug)]
pub enum ScheduleAction {
    /// Split an hour budget across the most urgent topics
    Show {
        /// Hours available (default: schedule.daily_hours)
        #[arg(long, allow_negative_numbers = true)]
        hours: Option<f64>,
        /// Day to rank urgency for (default: today)
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    /// Plan several consecutive days
    Plan {
        /// Number of days (default: schedule.plan_days)
        #[arg(long)]
        days: Option<u32>,
        /// Hours available each day (default: schedule.daily_hours)
        #[arg(long, allow_negative_numbers = true)]
        hours_per_day: Option<f64>,
        /// First day of the plan (default: today)
        #[arg(long)]
        start: Option<NaiveDate>,
    },
}

fn session_line(index: usize, planned: &PlannedSession) -> String {
    format!(
        "{:>3}. {} / {}: {:.1} h (priority {}, urgency {:.2})",
        index + 1,
        planned.subject,
        planned.topic,
        planned.hours,
        planned.priority,
        planned.urgency
    )
}

pub fn run(action: ScheduleAction, session: &mut Session) -> Result<(), Box<dyn std::error::Error>> {
    let json = session.json;
    let defaults = session.config().schedule.clone();
    let scheduler = Scheduler::new();

    match action {
        ScheduleAction::Show { hours, date } => {
            let budget = hours.unwrap_or(defaults.daily_hours);
            let date = date.unwrap_or_else(today);
            let catalog = session.catalog()?;
            let schedule = scheduler.generate(catalog, budget, date)?;
            let summary = schedule.summary();

            if json {
                print_json(&summary)?;
                return Ok(());
            }

            println!("Schedule for {} ({:.1} h available)", summary.date, summary.budget);
            if summary.entries.is_empty() && summary.unallocated.is_empty() {
                println!("Nothing to study: no incomplete topics.");
            }
            for (i, entry) in summary.entries.iter().enumerate() {
                println!("{}", session_line(i, entry));
            }
            if !summary.unallocated.is_empty() {
                println!("Not reached (0.0 h):");
                for entry in &summary.unallocated {
                    println!("  - {} / {}", entry.subject, entry.topic);
                }
            }
            println!(
                "Allocated: {:.1} h, leftover: {:.1} h",
                summary.allocated_hours, summary.leftover_hours
            );
        }
        ScheduleAction::Plan {
            days,
            hours_per_day,
            start,
        } => {
            let days = days.unwrap_or(defaults.plan_days);
            let hours_per_day = hours_per_day.unwrap_or(defaults.daily_hours);
            let start = start.unwrap_or_else(today);
            let catalog = session.catalog()?;
            let plan = scheduler.plan_days(catalog, hours_per_day, days, start)?;

            if json {
                print_json(&plan)?;
                return Ok(());
            }

            println!(
                "Study plan from {} for {} days ({:.1} h/day)",
                plan.start, days, plan.hours_per_day
            );
            if plan.days.is_empty() {
                println!("Nothing to plan.");
            }
            for day in &plan.days {
                println!("{} ({:.1} h)", day.date, day.total_hours());
                for (i, entry) in day.sessions.iter().enumerate() {
                    println!("{}", session_line(i, entry));
                }
            }
            println!(
                "Planned: {:.1} h, not covered: {:.1} h",
                plan.total_hours(),
                plan.unplanned_hours
            );
        }
    }
    Ok(())
}
