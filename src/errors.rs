use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use serde::Serialize;
use thiserror::Error;

/// Why a quiz generation attempt was abandoned.
///
/// These kinds are kept for diagnostics only; callers of the quiz service
/// see all of them as [`AppError::GenerationFailed`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenerationError {
    #[error("model provider unavailable: {0}")]
    ModelUnavailable(String),

    #[error("model did not answer within {0}s")]
    ModelTimeout(u64),

    #[error("malformed model output: {0}")]
    MalformedModelOutput(String),

    #[error("model returned no questions")]
    EmptyGenerationResult,

    #[error("question #{index} is incomplete: {reason}")]
    IncompleteQuestion { index: usize, reason: String },

    #[error("question #{index} does not have exactly 4 string options")]
    InvalidOptionsShape { index: usize },

    #[error("correct answer of question '{question_id}' is not one of its options")]
    CorrectAnswerNotInOptions { question_id: String },

    #[error("question id '{0}' appears more than once")]
    DuplicateQuestionId(String),
}

#[derive(Debug, Clone, Error)]
pub enum AppError {
    #[error("Question count must be 5, 10 or 15, got {0}")]
    InvalidQuestionCount(i32),

    #[error("Invalid difficulty '{0}', expected easy, medium or hard")]
    InvalidDifficulty(String),

    // Worded as "not found" so a foreign summary is indistinguishable from a missing one.
    #[error("Summary not found")]
    AccessDenied,

    #[error("Quiz not found: {0}")]
    QuizNotFound(String),

    #[error("Quiz {0} has already been submitted")]
    AlreadySubmitted(String),

    #[error("Quiz generation failed, please try again later")]
    GenerationFailed(#[source] GenerationError),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Internal server error: {0}")]
    InternalError(String),
}

impl AppError {
    fn error_code(&self) -> &'static str {
        match self {
            AppError::InvalidQuestionCount(_) => "INVALID_QUESTION_COUNT",
            AppError::InvalidDifficulty(_) => "INVALID_DIFFICULTY",
            AppError::AccessDenied | AppError::QuizNotFound(_) => "NOT_FOUND",
            AppError::AlreadySubmitted(_) => "ALREADY_SUBMITTED",
            AppError::GenerationFailed(_) => "GENERATION_FAILED",
            AppError::ValidationError(_) => "VALIDATION_ERROR",
            AppError::DatabaseError(_) => "DATABASE_ERROR",
            AppError::Unauthorized(_) => "UNAUTHORIZED",
            AppError::InternalError(_) => "INTERNAL_ERROR",
        }
    }
}

impl From<GenerationError> for AppError {
    fn from(err: GenerationError) -> Self {
        AppError::GenerationFailed(err)
    }
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: &'static str,
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::InvalidQuestionCount(_)
            | AppError::InvalidDifficulty(_)
            | AppError::ValidationError(_) => StatusCode::BAD_REQUEST,
            AppError::AccessDenied | AppError::QuizNotFound(_) => StatusCode::NOT_FOUND,
            AppError::AlreadySubmitted(_) => StatusCode::CONFLICT,
            AppError::GenerationFailed(_) => StatusCode::BAD_GATEWAY,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::DatabaseError(_) | AppError::InternalError(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ErrorResponse {
            error: self.to_string(),
            code: self.error_code(),
        })
    }
}

impl From<mongodb::error::Error> for AppError {
    fn from(err: mongodb::error::Error) -> Self {
        AppError::DatabaseError(err.to_string())
    }
}
impl From<mongodb::bson::ser::Error> for AppError {
    fn from(err: mongodb::bson::ser::Error) -> Self {
        AppError::InternalError(format!("BSON serialization error: {}", err))
    }
}
impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        AppError::ValidationError(err.to_string())
    }
}

pub type AppResult<T> = Result<T, AppError>;
