use studyplan_core::study::add_sample_subjects;

use super::today;
use crate::session::Session;

pub fn run(session: &mut Session) -> Result<(), Box<dyn std::error::Error>> {
    let added = add_sample_subjects(session.catalog()?, today())?;
    session.save()?;
    println!("Added {added} sample subjects.");
    Ok(())
}
