// src/store/question_set.rs

use crate::{
    error::AppError,
    models::question::{CreateQuestionRequest, Question, QuestionType},
};

/// The questions of one practice context plus the sidebar selection.
#[derive(Debug, Clone)]
pub struct QuestionSet {
    question_type: QuestionType,
    questions: Vec<Question>,
    current_index: usize,
}

impl QuestionSet {
    pub fn new(question_type: QuestionType, questions: Vec<Question>) -> Self {
        Self {
            question_type,
            questions,
            current_index: 0,
        }
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    /// The selected question, or `None` when the set is empty.
    pub fn current(&self) -> Option<&Question> {
        self.questions.get(self.current_index)
    }

    pub fn get(&self, question_id: &str) -> Option<&Question> {
        self.questions.iter().find(|q| q.id == question_id)
    }

    /// Number the next appended question will receive.
    pub fn next_number(&self) -> usize {
        self.questions.len() + 1
    }

    pub fn select(&mut self, index: usize) -> Result<(), AppError> {
        if index >= self.questions.len() {
            return Err(AppError::BadRequest(format!(
                "Question index {} is out of range (0..{})",
                index,
                self.questions.len()
            )));
        }
        self.current_index = index;
        Ok(())
    }

    /// Appends a question built from the add form. The set assigns the id and number.
    ///
    /// The form is converted before anything is pushed, so a rejected form
    /// leaves the set untouched.
    pub fn add(
        &mut self,
        form: CreateQuestionRequest,
        subject_id: &str,
        year: &str,
    ) -> Result<&Question, AppError> {
        let number = self.next_number();
        let question = form.into_question(self.question_type, subject_id, year, number)?;
        self.questions.push(question);
        Ok(&self.questions[number - 1])
    }

    /// Removes a question, renumbers the rest to `1..n` and clamps the selection.
    pub fn delete(&mut self, question_id: &str) -> Result<Question, AppError> {
        let position = self
            .questions
            .iter()
            .position(|q| q.id == question_id)
            .ok_or(AppError::NotFound(format!(
                "Question '{}' not found",
                question_id
            )))?;

        let removed = self.questions.remove(position);
        for (index, question) in self.questions.iter_mut().enumerate() {
            question.renumber(index + 1);
        }
        self.current_index = self.current_index.min(self.questions.len().saturating_sub(1));

        Ok(removed)
    }
}
