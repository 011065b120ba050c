//! The in-memory subject collection handed between storage, scheduler and
//! the command layer.

use super::{names_match, Subject};
use crate::error::{CoreError, RecordKind, Result};

/// Subjects in insertion order, unique by name ignoring case.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    subjects: Vec<Subject>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a catalog, rejecting repeated subject names.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Duplicate`] for the first repeated name.
    pub fn from_subjects(subjects: Vec<Subject>) -> Result<Self> {
        let mut catalog = Self::new();
        for subject in subjects {
            catalog.add_subject(subject)?;
        }
        Ok(catalog)
    }

    pub fn subjects(&self) -> &[Subject] {
        &self.subjects
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Subject> {
        self.subjects.iter()
    }

    pub fn len(&self) -> usize {
        self.subjects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.subjects.is_empty()
    }

    pub fn topic_count(&self) -> usize {
        self.subjects.iter().map(|s| s.topics().len()).sum()
    }

    fn find(&self, name: &str) -> Option<usize> {
        self.subjects.iter().position(|s| names_match(s.name(), name))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.find(name).is_some()
    }

    /// # Errors
    ///
    /// Returns [`CoreError::Duplicate`] if the name is taken.
    pub fn add_subject(&mut self, subject: Subject) -> Result<()> {
        if self.contains(subject.name()) {
            return Err(CoreError::duplicate(RecordKind::Subject, subject.name()));
        }
        self.subjects.push(subject);
        Ok(())
    }

    /// Remove and return the named subject along with its topics.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::NotFound`] if no subject matches.
    pub fn remove_subject(&mut self, name: &str) -> Result<Subject> {
        let index = self
            .find(name)
            .ok_or_else(|| CoreError::not_found(RecordKind::Subject, name))?;
        Ok(self.subjects.remove(index))
    }

    /// # Errors
    ///
    /// Returns [`CoreError::NotFound`] if no subject matches.
    pub fn subject(&self, name: &str) -> Result<&Subject> {
        self.find(name)
            .map(|i| &self.subjects[i])
            .ok_or_else(|| CoreError::not_found(RecordKind::Subject, name))
    }

    /// # Errors
    ///
    /// Returns [`CoreError::NotFound`] if no subject matches.
    pub fn subject_mut(&mut self, name: &str) -> Result<&mut Subject> {
        match self.find(name) {
            Some(i) => Ok(&mut self.subjects[i]),
            None => Err(CoreError::not_found(RecordKind::Subject, name)),
        }
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a Subject;
    type IntoIter = std::slice::Iter<'a, Subject>;

    fn into_iter(self) -> Self::IntoIter {
        self.subjects.iter()
    }
}
