// src/models/view.rs

use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    error::AppError,
    models::{
        answer::{Answer, ViewRequest},
        question::{Question, QuestionType},
    },
    utils::role::Role,
};

/// One index button in the question sidebar.
#[derive(Debug, Serialize, ToSchema)]
pub struct SidebarEntry {
    pub index: usize,
    /// `Q{index + 1}`.
    pub label: String,
    pub question_id: String,
    pub current: bool,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SidebarView {
    pub entries: Vec<SidebarEntry>,
    pub current_index: usize,
    /// Whether add and delete affordances are shown.
    pub can_edit: bool,
}

impl SidebarView {
    pub fn build(questions: &[Question], current_index: usize, role: Role) -> Self {
        let entries = questions
            .iter()
            .enumerate()
            .map(|(index, q)| SidebarEntry {
                index,
                label: format!("Q{}", index + 1),
                question_id: q.id.clone(),
                current: index == current_index,
            })
            .collect();

        Self {
            entries,
            current_index,
            can_edit: role.is_admin(),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ChoiceField {
    pub id: String,
    pub text: String,
    pub selected: bool,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PartField {
    pub sub_question_id: String,
    pub question_text: String,
    pub marks: Option<u32>,
    pub value: String,
}

/// The answer-capture widget for a question.
#[derive(Debug, Serialize, ToSchema)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Capture {
    /// Single free-text box.
    Text { value: String },
    /// Radio group over the mcq options.
    Choice { options: Vec<ChoiceField> },
    /// One field per sub-question.
    Parts { fields: Vec<PartField> },
}

impl Capture {
    /// Picks the widget from the question's shape and pre-fills it with `answer`.
    ///
    /// Returns `BadRequest` when the answer does not fit the widget.
    fn build(question: &Question, answer: Option<&Answer>) -> Result<Self, AppError> {
        let options = question.options.as_deref().unwrap_or_default();
        let sub_questions = question.sub_questions.as_deref().unwrap_or_default();

        if !options.is_empty() {
            let selected = match answer {
                None => None,
                Some(Answer::Choice { option_id }) => {
                    if question.option(option_id).is_none() {
                        return Err(AppError::BadRequest(format!(
                            "Option '{}' does not exist on {}",
                            option_id, question.id
                        )));
                    }
                    Some(option_id.as_str())
                }
                Some(_) => {
                    return Err(AppError::BadRequest(
                        "Multiple-choice questions take a choice answer".to_string(),
                    ));
                }
            };
            let options = options
                .iter()
                .map(|o| ChoiceField {
                    id: o.id.clone(),
                    text: o.text.clone(),
                    selected: selected == Some(o.id.as_str()),
                })
                .collect();
            return Ok(Capture::Choice { options });
        }

        if !sub_questions.is_empty() {
            let parts = match answer {
                None => None,
                Some(Answer::Parts { parts }) => {
                    if let Some(unknown) = parts
                        .keys()
                        .find(|key| !sub_questions.iter().any(|s| &s.id == *key))
                    {
                        return Err(AppError::BadRequest(format!(
                            "Sub-question '{}' does not exist on {}",
                            unknown, question.id
                        )));
                    }
                    Some(parts)
                }
                Some(_) => {
                    return Err(AppError::BadRequest(
                        "Structured and essay questions take a parts answer".to_string(),
                    ));
                }
            };
            let fields = sub_questions
                .iter()
                .map(|s| PartField {
                    sub_question_id: s.id.clone(),
                    question_text: s.question_text.clone(),
                    marks: s.marks,
                    value: parts
                        .and_then(|p| p.get(&s.id))
                        .cloned()
                        .unwrap_or_default(),
                })
                .collect();
            return Ok(Capture::Parts { fields });
        }

        match answer {
            None => Ok(Capture::Text { value: String::new() }),
            Some(Answer::Text { text }) => Ok(Capture::Text { value: text.clone() }),
            Some(_) => Err(AppError::BadRequest(
                "This question takes a free-text answer".to_string(),
            )),
        }
    }
}

/// The main content pane for the selected question.
#[derive(Debug, Serialize, ToSchema)]
pub struct QuestionView {
    pub question_id: String,
    /// Position shown in the title, `index + 1`.
    pub question_number: usize,
    #[serde(rename = "type")]
    pub question_type: QuestionType,
    pub badge: String,
    pub question_text: String,
    pub question_image: Option<String>,
    pub capture: Capture,
    /// Present only when the explanation toggle is on.
    pub explanation: Option<String>,
    /// Text of the correct option, present only when the answer toggle is on.
    pub revealed_answer: Option<String>,
    /// Plain equality between the chosen and the correct option, once revealed.
    pub is_correct: Option<bool>,
    pub can_edit: bool,
}

impl QuestionView {
    pub fn render(
        question: &Question,
        index: usize,
        role: Role,
        request: &ViewRequest,
    ) -> Result<Self, AppError> {
        let capture = Capture::build(question, request.answer.as_ref())?;

        let (revealed_answer, is_correct) = if request.show_answer {
            let revealed = question.answer_text().map(str::to_string);
            let correct = match (&request.answer, &question.answer) {
                (Some(Answer::Choice { option_id }), Some(answer)) => Some(option_id == answer),
                _ => None,
            };
            (revealed, correct)
        } else {
            (None, None)
        };

        Ok(Self {
            question_id: question.id.clone(),
            question_number: index + 1,
            question_type: question.question_type,
            badge: question.question_type.badge().to_string(),
            question_text: question.question_text.clone(),
            question_image: question.question_image.clone(),
            capture,
            explanation: request
                .show_explanation
                .then(|| question.explanation.clone()),
            revealed_answer,
            is_correct,
            can_edit: role.is_admin(),
        })
    }
}

/// Everything the practice page needs: sidebar plus the selected question.
#[derive(Debug, Serialize, ToSchema)]
pub struct PracticePage {
    pub subject_id: String,
    pub year: String,
    pub question_type: QuestionType,
    pub total: usize,
    pub sidebar: SidebarView,
    /// `None` when the set is empty.
    pub current: Option<QuestionView>,
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;
    use crate::store::mock;

    fn mcq() -> Question {
        mock::generate_question(QuestionType::Mcq, "physics", "2023", 3)
    }

    fn structured() -> Question {
        mock::generate_question(QuestionType::Structured, "biology", "2021", 2)
    }

    #[test]
    fn test_revealed_mcq_answer_shows_matching_option_text() {
        let mut q = mcq();
        q.answer = Some("4".to_string());
        let req = ViewRequest {
            answer: Some(Answer::Choice { option_id: "2".into() }),
            show_explanation: false,
            show_answer: true,
        };

        let view = QuestionView::render(&q, 2, Role::Student, &req).unwrap();
        assert_eq!(view.revealed_answer.as_deref(), Some("Option 4 for question 3"));
        assert_eq!(view.is_correct, Some(false));
        assert!(view.explanation.is_none());
        match view.capture {
            Capture::Choice { options } => {
                assert_eq!(options.len(), 5);
                assert!(options[1].selected);
                assert_eq!(options.iter().filter(|o| o.selected).count(), 1);
            }
            other => panic!("expected choice capture, got {:?}", other),
        }
    }

    #[test]
    fn test_hidden_answer_is_not_leaked() {
        let view = QuestionView::render(&mcq(), 0, Role::Student, &ViewRequest::default()).unwrap();
        assert!(view.revealed_answer.is_none());
        assert!(view.is_correct.is_none());
    }

    #[test]
    fn test_structured_renders_one_field_per_sub_question() {
        let q = structured();
        let mut parts = HashMap::new();
        parts.insert("2-b".to_string(), "Mitochondria".to_string());
        let req = ViewRequest {
            answer: Some(Answer::Parts { parts }),
            show_explanation: true,
            show_answer: false,
        };

        let view = QuestionView::render(&q, 1, Role::Admin, &req).unwrap();
        assert!(view.can_edit);
        assert!(view.explanation.is_some());
        match view.capture {
            Capture::Parts { fields } => {
                let ids: Vec<&str> = fields.iter().map(|f| f.sub_question_id.as_str()).collect();
                assert_eq!(ids, ["2-a", "2-b", "2-c"]);
                assert_eq!(fields[0].value, "");
                assert_eq!(fields[1].value, "Mitochondria");
                assert_eq!(fields[2].marks, Some(5));
            }
            other => panic!("expected parts capture, got {:?}", other),
        }
    }

    #[test]
    fn test_unknown_sub_question_is_rejected() {
        let mut parts = HashMap::new();
        parts.insert("9-z".to_string(), "?".to_string());
        let req = ViewRequest {
            answer: Some(Answer::Parts { parts }),
            ..Default::default()
        };
        assert!(QuestionView::render(&structured(), 0, Role::Student, &req).is_err());
    }

    #[test]
    fn test_mismatched_answer_shape_is_rejected() {
        let req = ViewRequest {
            answer: Some(Answer::Text { text: "B".into() }),
            ..Default::default()
        };
        assert!(QuestionView::render(&mcq(), 0, Role::Student, &req).is_err());
    }

    #[test]
    fn test_question_without_options_or_parts_takes_free_text() {
        let mut q = mcq();
        q.options = Some(Vec::new());
        q.answer = None;
        let req = ViewRequest {
            answer: Some(Answer::Text { text: "42".into() }),
            show_answer: true,
            ..Default::default()
        };
        let view = QuestionView::render(&q, 0, Role::Student, &req).unwrap();
        assert!(matches!(view.capture, Capture::Text { ref value } if value == "42"));
        assert!(view.revealed_answer.is_none());
    }

    #[test]
    fn test_sidebar_marks_current_entry() {
        let questions: Vec<Question> = (1..=3)
            .map(|n| mock::generate_question(QuestionType::Essay, "biology", "2024", n))
            .collect();
        let sidebar = SidebarView::build(&questions, 1, Role::Student);
        assert!(!sidebar.can_edit);
        assert_eq!(sidebar.entries[1].label, "Q2");
        assert!(sidebar.entries[1].current);
        assert!(!sidebar.entries[0].current);
        assert_eq!(sidebar.entries[2].question_id, "essay-q3");
    }
}
