use clap::Subcommand;
use studyplan_core::Topic;

use super::print_json;
use crate::session::Session;

#[derive(Subcommand, Debug)]
pub enum TopicAction {
    /// Add a topic to a subject
    Add {
        /// Subject name
        subject: String,
        /// Topic name
        name: String,
        /// Priority from 1 (low) to 5 (high)
        #[arg(long, default_value_t = 1, allow_negative_numbers = true)]
        priority: i64,
        /// Estimated hours of study
        #[arg(long, default_value_t = 1.0, allow_negative_numbers = true)]
        hours: f64,
    },
    /// Remove a topic from a subject
    Remove {
        subject: String,
        name: String,
    },
    /// Mark a topic as completed
    Complete {
        subject: String,
        name: String,
    },
    /// Record hours studied; completes the topic once its estimate is reached
    Log {
        subject: String,
        name: String,
        /// Hours studied
        #[arg(allow_negative_numbers = true)]
        hours: f64,
    },
    /// Change priority or estimated hours
    Edit {
        subject: String,
        name: String,
        /// New priority from 1 to 5
        #[arg(long, allow_negative_numbers = true)]
        priority: Option<i64>,
        /// New estimated hours
        #[arg(long, allow_negative_numbers = true)]
        hours: Option<f64>,
    },
    /// Clear completion and logged hours
    Reset {
        subject: String,
        name: String,
    },
    /// List the topics of a subject
    List {
        subject: String,
    },
}

fn print_topic(topic: &Topic, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    if json {
        print_json(topic)
    } else {
        println!("{topic}");
        Ok(())
    }
}

pub fn run(action: TopicAction, session: &mut Session) -> Result<(), Box<dyn std::error::Error>> {
    let json = session.json;
    match action {
        TopicAction::Add {
            subject,
            name,
            priority,
            hours,
        } => {
            let topic = Topic::new(name, priority, hours)?;
            session
                .catalog()?
                .subject_mut(&subject)?
                .add_topic(topic.clone())?;
            session.save()?;
            print_topic(&topic, json)?;
        }
        TopicAction::Remove { subject, name } => {
            let removed = session.catalog()?.subject_mut(&subject)?.remove_topic(&name)?;
            session.save()?;
            if json {
                print_json(&removed)?;
            } else {
                println!("Topic removed: {}", removed.name());
            }
        }
        TopicAction::Complete { subject, name } => {
            let topic = session.catalog()?.subject_mut(&subject)?.topic_mut(&name)?;
            topic.mark_complete();
            let updated = topic.clone();
            session.save()?;
            print_topic(&updated, json)?;
        }
        TopicAction::Log {
            subject,
            name,
            hours,
        } => {
            let topic = session.catalog()?.subject_mut(&subject)?.topic_mut(&name)?;
            let was_completed = topic.is_completed();
            topic.add_hours(hours)?;
            let updated = topic.clone();
            session.save()?;
            print_topic(&updated, json)?;
            if !json && !was_completed && updated.is_completed() {
                println!("Estimate reached; topic marked complete.");
            }
        }
        TopicAction::Edit {
            subject,
            name,
            priority,
            hours,
        } => {
            if priority.is_none() && hours.is_none() {
                return Err("nothing to change; pass --priority or --hours".into());
            }
            let topic = session.catalog()?.subject_mut(&subject)?.topic_mut(&name)?;
            // Apply to a copy so a bad second value leaves the first unchanged.
            let mut edited = topic.clone();
            if let Some(priority) = priority {
                edited.set_priority(priority)?;
            }
            if let Some(hours) = hours {
                edited.set_estimated_hours(hours)?;
            }
            *topic = edited.clone();
            session.save()?;
            print_topic(&edited, json)?;
        }
        TopicAction::Reset { subject, name } => {
            let topic = session.catalog()?.subject_mut(&subject)?.topic_mut(&name)?;
            topic.reset_progress();
            let updated = topic.clone();
            session.save()?;
            print_topic(&updated, json)?;
        }
        TopicAction::List { subject } => {
            let subject = session.catalog()?.subject(&subject)?;
            if json {
                print_json(subject.topics())?;
            } else if subject.topics().is_empty() {
                println!("No topics in {} yet.", subject.name());
            } else {
                for topic in subject.topics() {
                    println!("{topic}");
                }
            }
        }
    }
    Ok(())
}
