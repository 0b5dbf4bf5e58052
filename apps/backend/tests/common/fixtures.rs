//! Request bodies for the bundled catalogue's lessons.

use serde_json::{json, Value};

/// Answers that get every question of `lesson_001` right.
pub const LESSON_001_PERFECT: &[(&str, &str)] = &[
    ("q1", ""),
    ("q2", "ನಮಸ್ಕಾರ"),
    ("q3", "False"),
    ("q4", "Thank you"),
];

/// `lesson_002` with a one-grapheme typo in the fill-blank answer.
pub const LESSON_002_WITH_TYPO: &[(&str, &str)] = &[
    ("q1", ""),
    ("q2", "ದಯವಿಟ್ಟು"),
    ("q3", "True"),
    ("q4", "ಧನ್ಯವದ"),
];

/// Build a completion request body.
pub fn complete_request(answers: &[(&str, &str)]) -> Value {
    let answers: Vec<Value> = answers
        .iter()
        .map(|(question_id, answer)| {
            json!({
                "question_id": question_id,
                "answer": answer,
                "time_spent_ms": 2_000,
            })
        })
        .collect();

    json!({
        "answers": answers,
        "time_spent_ms": 2_000 * answers.len() as u64,
    })
}

pub fn evaluate_request(question_id: &str, answer: &str) -> Value {
    json!({
        "question_id": question_id,
        "answer": answer,
    })
}
