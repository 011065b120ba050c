use chrono::NaiveDate;
use clap::Subcommand;
use serde::Serialize;
use studyplan_core::Subject;

use super::{print_json, today};
use crate::session::Session;

#[derive(Subcommand, Debug)]
pub enum SubjectAction {
    /// Add a new subject
    Add {
        /// Subject name
        name: String,
        /// Exam date (YYYY-MM-DD)
        #[arg(long)]
        exam_date: NaiveDate,
        /// Difficulty from 1 (easy) to 5 (hard)
        #[arg(long, default_value_t = 1, allow_negative_numbers = true)]
        difficulty: i64,
    },
    /// Remove a subject and all its topics
    Remove {
        /// Subject name
        name: String,
    },
    /// List all subjects
    List,
    /// Show a subject with its topics
    Show {
        /// Subject name
        name: String,
    },
    /// Change exam date or difficulty
    Edit {
        /// Subject name
        name: String,
        /// New exam date (YYYY-MM-DD)
        #[arg(long)]
        exam_date: Option<NaiveDate>,
        /// New difficulty from 1 to 5
        #[arg(long, allow_negative_numbers = true)]
        difficulty: Option<i64>,
    },
    /// Mark every topic of a subject as not started
    Reset {
        /// Subject name
        name: String,
    },
}

/// One row of `subject list --json`.
#[derive(Serialize)]
struct SubjectRow<'a> {
    name: &'a str,
    exam_date: NaiveDate,
    days_until_exam: i64,
    difficulty: u8,
    progress: f64,
    topics: usize,
    remaining_hours: f64,
}

impl<'a> SubjectRow<'a> {
    fn new(subject: &'a Subject, today: NaiveDate) -> Self {
        Self {
            name: subject.name(),
            exam_date: subject.exam_date(),
            days_until_exam: subject.days_until_exam(today),
            difficulty: subject.difficulty().get(),
            progress: subject.progress(),
            topics: subject.topics().len(),
            remaining_hours: subject.remaining_hours(),
        }
    }
}

fn print_subject(subject: &Subject, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    if json {
        print_json(subject)
    } else {
        println!("{subject}");
        Ok(())
    }
}

pub fn run(action: SubjectAction, session: &mut Session) -> Result<(), Box<dyn std::error::Error>> {
    let json = session.json;
    match action {
        SubjectAction::Add {
            name,
            exam_date,
            difficulty,
        } => {
            let subject = Subject::new(name, exam_date, difficulty)?;
            session.catalog()?.add_subject(subject.clone())?;
            session.save()?;
            print_subject(&subject, json)?;
        }
        SubjectAction::Remove { name } => {
            let removed = session.catalog()?.remove_subject(&name)?;
            session.save()?;
            if json {
                print_json(&removed)?;
            } else {
                println!(
                    "Subject removed: {} ({} topics)",
                    removed.name(),
                    removed.topics().len()
                );
            }
        }
        SubjectAction::List => {
            let today = today();
            let catalog = session.catalog()?;
            if json {
                let rows: Vec<_> = catalog.iter().map(|s| SubjectRow::new(s, today)).collect();
                print_json(&rows)?;
            } else if catalog.is_empty() {
                println!("No subjects yet.");
            } else {
                for subject in catalog.iter() {
                    println!("{subject}");
                }
            }
        }
        SubjectAction::Show { name } => {
            let today = today();
            let subject = session.catalog()?.subject(&name)?;
            if json {
                print_json(subject)?;
            } else {
                println!("{subject}");
                let days = subject.days_until_exam(today);
                match days {
                    0 => println!("  Exam is today"),
                    d if d < 0 => println!("  Exam was {} days ago", -d),
                    d => println!("  {d} days until exam"),
                }
                println!("  {:.1} hours of work remaining", subject.remaining_hours());
                for topic in subject.topics() {
                    println!("  - {topic}");
                }
            }
        }
        SubjectAction::Edit {
            name,
            exam_date,
            difficulty,
        } => {
            if exam_date.is_none() && difficulty.is_none() {
                return Err("nothing to change; pass --exam-date or --difficulty".into());
            }
            let subject = session.catalog()?.subject_mut(&name)?;
            if let Some(difficulty) = difficulty {
                subject.set_difficulty(difficulty)?;
            }
            if let Some(exam_date) = exam_date {
                subject.set_exam_date(exam_date);
            }
            let updated = subject.clone();
            session.save()?;
            print_subject(&updated, json)?;
        }
        SubjectAction::Reset { name } => {
            let subject = session.catalog()?.subject_mut(&name)?;
            subject.reset_progress();
            let updated = subject.clone();
            session.save()?;
            print_subject(&updated, json)?;
        }
    }
    Ok(())
}
