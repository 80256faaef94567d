pub mod quiz;
pub mod quiz_question;
pub mod summary_document;
pub use quiz::{Difficulty, Quiz, SubmissionState};
pub use quiz_question::QuizQuestion;
pub use summary_document::SummaryDocument;
