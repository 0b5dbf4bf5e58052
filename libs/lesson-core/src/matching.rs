//! Answer evaluation, including typo-tolerant matching for typed answers.

use crate::error::EvaluationError;
use crate::types::{Question, QuestionType, Verdict};
use unicode_segmentation::UnicodeSegmentation;

/// Judge one submitted answer against a question.
pub fn evaluate(question: &Question, raw_answer: &str) -> Result<Verdict, EvaluationError> {
    check_question(question)?;
    Ok(match question.kind {
        QuestionType::MultipleChoice | QuestionType::TrueFalse => {
            if question.accepted_answers().any(|answer| answer == raw_answer) {
                Verdict::CORRECT
            } else {
                Verdict::INCORRECT
            }
        }
        QuestionType::FillBlank => evaluate_fill_blank(question, raw_answer),
        // Explanations; every other kind was rejected above.
        _ => Verdict::CORRECT,
    })
}

/// Check that a question can be judged at all, before any answer arrives.
pub fn check_question(question: &Question) -> Result<(), EvaluationError> {
    match question.kind {
        QuestionType::Explanation => Ok(()),
        QuestionType::MultipleChoice | QuestionType::TrueFalse => {
            if question.accepted_answers().next().is_none() {
                return Err(no_accepted_answers(question));
            }
            Ok(())
        }
        QuestionType::FillBlank => {
            if fill_blank_answers(question).next().is_none() {
                return Err(no_accepted_answers(question));
            }
            Ok(())
        }
        QuestionType::Unknown => Err(EvaluationError::UnknownQuestionType {
            question_id: question.id.clone(),
        }),
        kind => Err(EvaluationError::UngradedQuestionType {
            question_id: question.id.clone(),
            kind: kind.as_str(),
        }),
    }
}

/// Canonical answers followed by the transliteration, if any.
fn fill_blank_answers(question: &Question) -> impl Iterator<Item = &str> {
    question
        .accepted_answers()
        .chain(question.correct_answer_transliteration.as_deref())
}

fn evaluate_fill_blank(question: &Question, raw_answer: &str) -> Verdict {
    let accepted: Vec<String> = fill_blank_answers(question).map(normalize).collect();

    let typed = normalize(raw_answer);
    if accepted.iter().any(|answer| *answer == typed) {
        return Verdict::CORRECT;
    }

    // An empty submission never counts as a typo.
    if typed.is_empty() {
        return Verdict::INCORRECT;
    }

    let is_typo = accepted
        .iter()
        .filter(|answer| !answer.is_empty())
        .any(|answer| within_typo_tolerance(&typed, answer));

    if is_typo {
        Verdict::TYPO
    } else {
        Verdict::INCORRECT
    }
}

fn no_accepted_answers(question: &Question) -> EvaluationError {
    EvaluationError::NoAcceptedAnswers {
        question_id: question.id.clone(),
    }
}

/// Trim surrounding whitespace and lower-case.
fn normalize(s: &str) -> String {
    s.trim().to_lowercase()
}

/// Largest edit distance still treated as a typo for strings of these lengths.
pub fn typo_tolerance(typed_len: usize, correct_len: usize) -> usize {
    let max_len = typed_len.max(correct_len);
    (max_len / 5).max(1)
}

/// Whether `typed` differs from `correct` by a small, nonzero number of edits.
pub fn within_typo_tolerance(typed: &str, correct: &str) -> bool {
    let distance = levenshtein_distance(typed, correct);
    let tolerance = typo_tolerance(char_count(typed), char_count(correct));
    distance > 0 && distance <= tolerance
}

/// Number of user-perceived characters (extended grapheme clusters).
pub fn char_count(s: &str) -> usize {
    s.graphemes(true).count()
}

/// Calculate Levenshtein distance between two strings.
///
/// Edits are counted over extended grapheme clusters, so a consonant with its
/// vowel sign is a single character.
pub fn levenshtein_distance(a: &str, b: &str) -> usize {
    let a_chars: Vec<&str> = a.graphemes(true).collect();
    let b_chars: Vec<&str> = b.graphemes(true).collect();

    let m = a_chars.len();
    let n = b_chars.len();

    if m == 0 {
        return n;
    }
    if n == 0 {
        return m;
    }

    let mut prev = (0..=n).collect::<Vec<_>>();
    let mut curr = vec![0; n + 1];

    for i in 1..=m {
        curr[0] = i;

        for j in 1..=n {
            let cost = if a_chars[i - 1] == b_chars[j - 1] {
                0
            } else {
                1
            };

            curr[j] = (prev[j] + 1) // deletion
                .min(curr[j - 1] + 1) // insertion
                .min(prev[j - 1] + cost); // substitution
        }

        std::mem::swap(&mut prev, &mut curr);
    }

    prev[n]
}
