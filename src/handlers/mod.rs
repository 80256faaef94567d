pub mod quiz_handler;

use actix_web::web;
use actix_web_httpauth::middleware::HttpAuthentication;

use crate::auth::bearer_validator;

pub use quiz_handler::{
    generate_quiz, get_quiz, health_check, health_check_ready, list_quizzes, submit_quiz,
};

/// Quiz routes behind bearer authentication.
pub fn configure_quiz_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("")
            .wrap(HttpAuthentication::bearer(bearer_validator))
            .service(generate_quiz)
            .service(list_quizzes)
            .service(get_quiz)
            .service(submit_quiz),
    );
}
