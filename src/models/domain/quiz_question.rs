use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct QuizQuestion {
    pub id: String,      // model supplied, unique within its quiz ("q1")
    pub quiz_id: String, // owning quiz
    pub text: String,
    pub options: [String; 4],
    pub correct_answer: String,
    pub explanation: String,
    #[serde(default)]
    pub user_answer: Option<String>, // set once, at submission
}

impl QuizQuestion {
    pub fn options_vec(&self) -> Vec<String> {
        self.options.to_vec()
    }
}
