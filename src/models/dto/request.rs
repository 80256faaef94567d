use serde::Deserialize;
use validator::Validate;

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct GenerateQuizRequest {
    #[validate(length(min = 1, max = 100))]
    pub summary_id: String,

    #[validate(length(min = 1, max = 20))]
    pub difficulty: String,

    // Checked by the quiz service so the rejection carries its own error kind
    pub question_count: i32,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SubmittedAnswer {
    #[validate(length(min = 1, max = 100))]
    pub question_id: String,

    pub answer: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SubmitQuizRequest {
    #[validate(nested)]
    pub answers: Vec<SubmittedAnswer>,
}

#[derive(Debug, Clone, Deserialize, Validate, Default)]
pub struct ListQuizzesQuery {
    #[validate(length(min = 1, max = 100))]
    pub summary_id: Option<String>,

    #[validate(range(min = 0))]
    pub page: Option<i64>,
}

impl ListQuizzesQuery {
    pub fn page(&self) -> i64 {
        self.page.unwrap_or(0).max(0)
    }
}
