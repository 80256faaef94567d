pub mod quiz_repository;
pub mod summary_document_repository;

pub use quiz_repository::{MongoQuizRepository, QuizRepository};
pub use summary_document_repository::{
    MongoSummaryDocumentRepository, SummaryDocumentRepository,
};
