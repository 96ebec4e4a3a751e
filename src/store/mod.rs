// src/store/mod.rs

//! In-memory state behind the practice views. Nothing here outlives the process.

pub mod chat_board;
pub mod mock;
pub mod question_set;

use std::{cmp::Reverse, collections::HashMap};

use serde::Deserialize;

use crate::{
    config::Config,
    error::AppError,
    models::{question::QuestionType, subject::Subject},
};

pub use chat_board::ChatBoard;
pub use question_set::QuestionSet;

/// Subject whose question-type page offers the alternate set.
pub const ALTERNATE_TYPES_SUBJECT: &str = "maths";

const STANDARD_TYPES: &[QuestionType] = &[
    QuestionType::Mcq,
    QuestionType::Structured,
    QuestionType::Essay,
];

const ALTERNATE_TYPES: &[QuestionType] = &[QuestionType::Mcq, QuestionType::Structured];

/// Identifies one practice set: `/subjects/{subject_id}/years/{year}/types/{question_type}`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize)]
pub struct PracticeKey {
    pub subject_id: String,
    pub year: String,
    pub question_type: QuestionType,
}

/// Subjects, their years and every practice set opened so far.
#[derive(Debug)]
pub struct Catalog {
    subjects: Vec<Subject>,
    /// Only subjects whose years were edited have an entry; others use the defaults.
    years: HashMap<String, Vec<String>>,
    sets: HashMap<PracticeKey, QuestionSet>,
    mcq_question_count: usize,
    written_question_count: usize,
}

impl Catalog {
    pub fn new(config: &Config) -> Self {
        Self {
            subjects: Subject::defaults(),
            years: HashMap::new(),
            sets: HashMap::new(),
            mcq_question_count: config.mcq_question_count,
            written_question_count: config.written_question_count,
        }
    }

    pub fn subjects(&self) -> &[Subject] {
        &self.subjects
    }

    /// First subject with the given id. Ids are not unique, so later duplicates are shadowed.
    pub fn subject(&self, subject_id: &str) -> Result<&Subject, AppError> {
        self.subjects
            .iter()
            .find(|s| s.id == subject_id)
            .ok_or(AppError::NotFound(format!(
                "Subject '{}' not found",
                subject_id
            )))
    }

    pub fn add_subject(&mut self, subject: Subject) -> &Subject {
        tracing::info!("Adding subject '{}' ({})", subject.name, subject.id);
        self.subjects.push(subject);
        &self.subjects[self.subjects.len() - 1]
    }

    /// Removes every subject with this id along with its years and practice sets.
    pub fn remove_subject(&mut self, subject_id: &str) -> Result<usize, AppError> {
        self.subject(subject_id)?;

        let before = self.subjects.len();
        self.subjects.retain(|s| s.id != subject_id);
        self.years.remove(subject_id);
        self.sets.retain(|key, _| key.subject_id != subject_id);

        let removed = before - self.subjects.len();
        tracing::info!("Removed {} subject(s) with id '{}'", removed, subject_id);
        Ok(removed)
    }

    pub fn years(&self, subject_id: &str) -> Result<Vec<String>, AppError> {
        self.subject(subject_id)?;
        Ok(match self.years.get(subject_id) {
            Some(years) => years.clone(),
            None => mock::DEFAULT_YEARS.iter().map(|y| y.to_string()).collect(),
        })
    }

    fn years_mut(&mut self, subject_id: &str) -> &mut Vec<String> {
        self.years
            .entry(subject_id.to_string())
            .or_insert_with(|| mock::DEFAULT_YEARS.iter().map(|y| y.to_string()).collect())
    }

    /// Adds a year and re-sorts the list newest first, by numeric value.
    pub fn add_year(&mut self, subject_id: &str, year: &str) -> Result<Vec<String>, AppError> {
        self.subject(subject_id)?;

        let years = self.years_mut(subject_id);
        if years.iter().any(|y| y == year) {
            return Err(AppError::Conflict(format!(
                "Year {} already exists for '{}'",
                year, subject_id
            )));
        }
        years.push(year.to_string());
        years.sort_by_key(|y| Reverse(y.parse::<u32>().unwrap_or(0)));

        tracing::info!("Added year {} to '{}'", year, subject_id);
        Ok(years.clone())
    }

    /// Removes a year and discards the practice sets opened under it.
    pub fn remove_year(&mut self, subject_id: &str, year: &str) -> Result<Vec<String>, AppError> {
        self.subject(subject_id)?;

        let years = self.years_mut(subject_id);
        let position = years
            .iter()
            .position(|y| y == year)
            .ok_or(AppError::NotFound(format!(
                "Year {} not found for '{}'",
                year, subject_id
            )))?;
        years.remove(position);
        let remaining = years.clone();

        self.sets
            .retain(|key, _| !(key.subject_id == subject_id && key.year == year));

        tracing::info!("Removed year {} from '{}'", year, subject_id);
        Ok(remaining)
    }

    /// Question types offered on the subject's type-selection page.
    pub fn question_types(&self, subject_id: &str) -> Result<&'static [QuestionType], AppError> {
        self.subject(subject_id)?;
        Ok(if subject_id == ALTERNATE_TYPES_SUBJECT {
            ALTERNATE_TYPES
        } else {
            STANDARD_TYPES
        })
    }

    /// Checks that the subject, year and type all exist in the catalog.
    fn check_key(&self, key: &PracticeKey) -> Result<(), AppError> {
        if !self.years(&key.subject_id)?.contains(&key.year) {
            return Err(AppError::NotFound(format!(
                "Year {} not found for '{}'",
                key.year, key.subject_id
            )));
        }
        if !self.question_types(&key.subject_id)?.contains(&key.question_type) {
            return Err(AppError::NotFound(format!(
                "'{}' does not offer {} questions",
                key.subject_id, key.question_type
            )));
        }
        Ok(())
    }

    /// The practice set for `key`, generated from mock data on first access.
    pub fn set_mut(&mut self, key: &PracticeKey) -> Result<&mut QuestionSet, AppError> {
        self.check_key(key)?;

        let count = match key.question_type {
            QuestionType::Mcq => self.mcq_question_count,
            QuestionType::Structured | QuestionType::Essay => self.written_question_count,
        };

        Ok(self.sets.entry(key.clone()).or_insert_with(|| {
            tracing::debug!(
                "Generating {} mock {} questions for {} {}",
                count,
                key.question_type,
                key.subject_id,
                key.year
            );
            QuestionSet::new(
                key.question_type,
                mock::generate_questions(key.question_type, &key.subject_id, &key.year, count),
            )
        }))
    }
}
