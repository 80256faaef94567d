pub mod grading;
pub mod model_service;
pub mod question_mapper;
pub mod quiz_service;
pub mod response_sanitizer;
