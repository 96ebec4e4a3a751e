// src/store/mock.rs

//! Placeholder content used to populate a practice set the first time it is opened.

use crate::models::question::{McqOption, Question, QuestionType, SubQuestion};

/// Years every subject starts with, in display order.
pub const DEFAULT_YEARS: &[&str] = &["2021", "2022", "2023", "2024"];

const SUB_PARTS: &[(char, u32)] = &[('a', 2), ('b', 3), ('c', 5)];

fn mcq_options(number: usize) -> Vec<McqOption> {
    (1..=5)
        .map(|k| McqOption {
            id: k.to_string(),
            text: format!("Option {} for question {}", k, number),
        })
        .collect()
}

fn sub_questions(number: usize) -> Vec<SubQuestion> {
    SUB_PARTS
        .iter()
        .map(|&(letter, marks)| SubQuestion {
            id: format!("{}-{}", number, letter),
            question_text: format!(
                "({}) Sub-question {} for question {}",
                letter,
                letter.to_ascii_uppercase(),
                number
            ),
            marks: Some(marks),
        })
        .collect()
}

/// Builds the mock question at 1-based position `number`.
pub fn generate_question(
    question_type: QuestionType,
    subject_id: &str,
    year: &str,
    number: usize,
) -> Question {
    let mcq = question_type == QuestionType::Mcq;
    Question {
        id: Question::make_id(question_type, number),
        question_text: format!(
            "{} Question {}: This is a sample question for {} {}. Solve this problem step by step.",
            question_type.badge(),
            number,
            subject_id,
            year
        ),
        question_image: None,
        explanation: format!(
            "Detailed explanation for question {}. This explains the concept and solution approach.",
            number
        ),
        question_type,
        subject_id: subject_id.to_string(),
        year: year.to_string(),
        question_number: number,
        options: mcq.then(|| mcq_options(number)),
        sub_questions: (!mcq).then(|| sub_questions(number)),
        answer: mcq.then(|| "1".to_string()),
    }
}

/// Builds a full set of `count` mock questions numbered from 1.
pub fn generate_questions(
    question_type: QuestionType,
    subject_id: &str,
    year: &str,
    count: usize,
) -> Vec<Question> {
    (1..=count)
        .map(|n| generate_question(question_type, subject_id, year, n))
        .collect()
}
