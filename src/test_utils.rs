#[cfg(test)]
pub mod fixtures {
    use crate::models::domain::{Difficulty, Quiz, QuizQuestion, SummaryDocument};

    /// Creates a pending 5-question easy quiz
    pub fn test_quiz(user_id: &str, summary_id: &str) -> Quiz {
        Quiz::new(user_id, summary_id, Difficulty::Easy, 5)
    }

    /// Creates questions q1..qN with options A-D and the given correct answers
    pub fn test_questions(quiz_id: &str, correct_answers: &[&str]) -> Vec<QuizQuestion> {
        correct_answers
            .iter()
            .enumerate()
            .map(|(i, correct)| QuizQuestion {
                id: format!("q{}", i + 1),
                quiz_id: quiz_id.to_string(),
                text: format!("Question {}", i + 1),
                options: [
                    "A".to_string(),
                    "B".to_string(),
                    "C".to_string(),
                    "D".to_string(),
                ],
                correct_answer: correct.to_string(),
                explanation: format!("Because {} is right", correct),
                user_answer: None,
            })
            .collect()
    }

    pub fn test_summary(user_id: &str) -> SummaryDocument {
        SummaryDocument::new_summary_document(
            user_id,
            "lecture-notes.pdf",
            "Photosynthesis converts light energy into chemical energy.",
        )
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::*;

    #[test]
    fn test_fixtures_test_questions() {
        let questions = test_questions("quiz-1", &["A", "C"]);

        assert_eq!(questions.len(), 2);
        assert_eq!(questions[1].id, "q2");
        assert_eq!(questions[1].correct_answer, "C");
        assert!(questions.iter().all(|q| q.quiz_id == "quiz-1"));
    }

    #[test]
    fn test_fixtures_test_summary() {
        let summary = test_summary("user-1");
        assert_eq!(summary.user_id, "user-1");
        assert_eq!(summary.filename, "lecture-notes.pdf");
    }
}
