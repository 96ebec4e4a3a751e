// src/models/question.rs

use std::fmt;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::{
    error::AppError,
    models::subject::validate_not_blank,
    utils::html::{clean_text, is_blank},
};

/// Kind of question practised in a set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum QuestionType {
    /// Multiple choice, single correct option.
    Mcq,
    /// Lettered sub-parts, each answered and marked separately.
    Structured,
    /// Long-form answer. Shaped like `Structured` for data purposes.
    Essay,
}

impl QuestionType {
    pub fn as_str(self) -> &'static str {
        match self {
            QuestionType::Mcq => "mcq",
            QuestionType::Structured => "structured",
            QuestionType::Essay => "essay",
        }
    }

    /// Upper-case badge shown next to the question title.
    pub fn badge(self) -> &'static str {
        match self {
            QuestionType::Mcq => "MCQ",
            QuestionType::Structured => "STRUCTURED",
            QuestionType::Essay => "ESSAY",
        }
    }

    pub fn has_options(self) -> bool {
        self == QuestionType::Mcq
    }

    /// Card shown on the question-type selection page.
    pub fn card(self) -> QuestionTypeCard {
        let (name, description, badge) = match self {
            QuestionType::Mcq => (
                "Multiple Choice Questions",
                "Quick assessment with multiple options",
                "MCQ",
            ),
            QuestionType::Structured => (
                "Structured Questions",
                "Detailed questions with structured answers",
                "Structured",
            ),
            QuestionType::Essay => (
                "Essay Questions",
                "Long-form comprehensive answers",
                "Essay",
            ),
        };
        QuestionTypeCard {
            id: self,
            name: name.to_string(),
            description: description.to_string(),
            badge: badge.to_string(),
        }
    }
}

impl fmt::Display for QuestionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct QuestionTypeCard {
    pub id: QuestionType,
    pub name: String,
    pub description: String,
    pub badge: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct McqOption {
    pub id: String,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct SubQuestion {
    pub id: String,
    pub question_text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub marks: Option<u32>,
}

/// A question inside a practice set.
///
/// Which optional fields are populated depends on `question_type`: mcq
/// questions carry `options` and `answer`, structured and essay questions
/// carry `sub_questions`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Question {
    /// `"{type}-q{question_number}"`, rewritten whenever the set is renumbered.
    pub id: String,
    pub question_text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub question_image: Option<String>,
    pub explanation: String,
    #[serde(rename = "type")]
    pub question_type: QuestionType,
    pub subject_id: String,
    pub year: String,
    /// 1-based position in the set.
    pub question_number: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<McqOption>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sub_questions: Option<Vec<SubQuestion>>,
    /// For mcq, the id of the correct option.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub answer: Option<String>,
}

impl Question {
    pub fn make_id(question_type: QuestionType, number: usize) -> String {
        format!("{}-q{}", question_type, number)
    }

    /// Moves the question to a new 1-based position, keeping id and number in step.
    pub fn renumber(&mut self, number: usize) {
        self.question_number = number;
        self.id = Question::make_id(self.question_type, number);
    }

    pub fn option(&self, option_id: &str) -> Option<&McqOption> {
        self.options
            .as_deref()
            .unwrap_or_default()
            .iter()
            .find(|o| o.id == option_id)
    }

    /// Text of the correct option, if this is an mcq question with a known answer.
    pub fn answer_text(&self) -> Option<&str> {
        let answer = self.answer.as_deref()?;
        self.option(answer).map(|o| o.text.as_str())
    }
}

/// Sub-question as entered on the add-question form.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct NewSubQuestion {
    pub question_text: String,
    pub marks: Option<u32>,
}

/// DTO for the add-question form.
///
/// The type, subject and year come from the practice context, and the id and
/// number are assigned by the set when the question is appended.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct CreateQuestionRequest {
    #[validate(length(min = 1, max = 2000), custom(function = validate_not_blank))]
    pub question_text: String,
    #[validate(length(min = 1, max = 4000), custom(function = validate_not_blank))]
    pub explanation: String,
    #[validate(length(max = 500), custom(function = validate_image_url))]
    pub question_image: Option<String>,
    /// Option texts for mcq questions. Blank entries are dropped.
    #[serde(default)]
    pub options: Vec<String>,
    /// Parts for structured/essay questions. Blank entries are dropped.
    #[serde(default)]
    pub sub_questions: Vec<NewSubQuestion>,
    /// Id of the correct option, counted over the retained options ("1", "2", ...).
    pub answer: Option<String>,
}

impl CreateQuestionRequest {
    /// Turns a validated form into a question for the given context.
    ///
    /// `question_number` is the number the set will assign; it is used to key
    /// sub-question ids.
    pub fn into_question(
        self,
        question_type: QuestionType,
        subject_id: &str,
        year: &str,
        question_number: usize,
    ) -> Result<Question, AppError> {
        if !question_type.has_options() && (!self.options.is_empty() || self.answer.is_some()) {
            return Err(AppError::BadRequest(format!(
                "Options and answers are only allowed for mcq questions, not {}",
                question_type
            )));
        }
        if question_type.has_options() && !self.sub_questions.is_empty() {
            return Err(AppError::BadRequest(
                "Sub-questions are not allowed for mcq questions".to_string(),
            ));
        }

        let options: Vec<McqOption> = self
            .options
            .iter()
            .filter(|text| !is_blank(text))
            .enumerate()
            .map(|(i, text)| McqOption {
                id: (i + 1).to_string(),
                text: clean_text(text),
            })
            .collect();

        let sub_questions: Vec<SubQuestion> = self
            .sub_questions
            .iter()
            .filter(|sub| !is_blank(&sub.question_text))
            .zip('a'..='z')
            .map(|(sub, letter)| SubQuestion {
                id: format!("{}-{}", question_number, letter),
                question_text: clean_text(&sub.question_text),
                marks: sub.marks,
            })
            .collect();

        let answer = self.answer.filter(|a| !is_blank(a)).map(|a| a.trim().to_string());
        if let Some(answer) = &answer {
            if !options.iter().any(|o| &o.id == answer) {
                return Err(AppError::BadRequest(format!(
                    "Answer '{}' does not match any option",
                    answer
                )));
            }
        }

        let question_image = self.question_image.filter(|url| !is_blank(url));

        Ok(Question {
            id: Question::make_id(question_type, question_number),
            question_text: clean_text(&self.question_text),
            question_image: question_image.map(|url| url.trim().to_string()),
            explanation: clean_text(&self.explanation),
            question_type,
            subject_id: subject_id.to_string(),
            year: year.to_string(),
            question_number,
            options: question_type.has_options().then_some(options),
            sub_questions: (!question_type.has_options()).then_some(sub_questions),
            answer,
        })
    }
}

/// A blank image URL means "no image"; anything else must be an http(s) URL.
fn validate_image_url(url: &str) -> Result<(), validator::ValidationError> {
    if is_blank(url) {
        return Ok(());
    }
    match url::Url::parse(url.trim()) {
        Ok(parsed) if matches!(parsed.scheme(), "http" | "https") => Ok(()),
        Ok(_) => Err(validator::ValidationError::new("unsupported_url_scheme")),
        Err(_) => Err(validator::ValidationError::new("invalid_url")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(text: &str, explanation: &str) -> CreateQuestionRequest {
        CreateQuestionRequest {
            question_text: text.to_string(),
            explanation: explanation.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_blank_text_or_explanation_fails_validation() {
        assert!(form("", "because").validate().is_err());
        assert!(form("What is 2+2?", "  ").validate().is_err());
        assert!(form("What is 2+2?", "Addition").validate().is_ok());
    }

    #[test]
    fn test_image_url_is_checked_only_when_present() {
        let mut req = form("Q", "E");
        req.question_image = Some("".to_string());
        assert!(req.validate().is_ok());
        req.question_image = Some("not a url".to_string());
        assert!(req.validate().is_err());
        req.question_image = Some("https://example.com/cell.png".to_string());
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_image_url_must_be_http_and_short() {
        let mut req = form("Q", "E");
        req.question_image = Some("javascript:alert(1)".to_string());
        assert!(req.validate().is_err());
        req.question_image = Some("data:image/png;base64,AAAA".to_string());
        assert!(req.validate().is_err());
        req.question_image = Some(format!("https://example.com/{}.png", "a".repeat(500)));
        assert!(req.validate().is_err());
        req.question_image = Some("http://example.com/cell.png".to_string());
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_plain_text_symbols_survive_conversion() {
        let mut req = form("Solve x < 5 & y > 2", "Use x <= 4");
        req.options = vec!["x < 5".into(), "x > 5".into()];
        req.answer = Some("1".into());

        let q = req.into_question(QuestionType::Mcq, "maths", "2023", 1).unwrap();
        assert_eq!(q.question_text, "Solve x < 5 & y > 2");
        assert_eq!(q.explanation, "Use x <= 4");
        assert_eq!(q.answer_text(), Some("x < 5"));
    }

    #[test]
    fn test_mcq_drops_blank_options_and_renumbers_them() {
        let mut req = form("Pick one", "Explained");
        req.options = vec!["Red".into(), "  ".into(), "Blue".into()];
        req.answer = Some("2".into());

        let q = req.into_question(QuestionType::Mcq, "physics", "2023", 7).unwrap();
        assert_eq!(q.id, "mcq-q7");
        assert_eq!(q.question_number, 7);
        let options = q.options.as_ref().unwrap();
        assert_eq!(options.len(), 2);
        assert_eq!(options[1], McqOption { id: "2".into(), text: "Blue".into() });
        assert_eq!(q.answer_text(), Some("Blue"));
        assert!(q.sub_questions.is_none());
    }

    #[test]
    fn test_mcq_answer_must_reference_retained_option() {
        let mut req = form("Pick one", "Explained");
        req.options = vec!["Red".into(), "".into()];
        req.answer = Some("2".into());
        assert!(req.into_question(QuestionType::Mcq, "physics", "2023", 1).is_err());
    }

    #[test]
    fn test_structured_sub_questions_get_lettered_ids() {
        let mut req = form("Cells", "Biology basics");
        req.sub_questions = vec![
            NewSubQuestion { question_text: "Define a cell".into(), marks: Some(2) },
            NewSubQuestion { question_text: " ".into(), marks: Some(9) },
            NewSubQuestion { question_text: "Name an organelle".into(), marks: None },
        ];

        let q = req.into_question(QuestionType::Structured, "biology", "2022", 6).unwrap();
        let subs = q.sub_questions.as_ref().unwrap();
        assert_eq!(subs.len(), 2);
        assert_eq!(subs[0].id, "6-a");
        assert_eq!(subs[1].id, "6-b");
        assert_eq!(subs[1].marks, None);
        assert!(q.options.is_none());
    }

    #[test]
    fn test_options_rejected_for_essay() {
        let mut req = form("Discuss", "Essay");
        req.options = vec!["A".into()];
        assert!(req.into_question(QuestionType::Essay, "biology", "2022", 1).is_err());
    }

    #[test]
    fn test_renumber_keeps_id_in_step() {
        let mut q = form("Q", "E")
            .into_question(QuestionType::Essay, "biology", "2022", 4)
            .unwrap();
        q.renumber(2);
        assert_eq!(q.id, "essay-q2");
        assert_eq!(q.question_number, 2);
    }

    #[test]
    fn test_question_type_serializes_lowercase() {
        let json = serde_json::to_string(&QuestionType::Structured).unwrap();
        assert_eq!(json, "\"structured\"");
    }
}
