mod common;

use actix_web::{http::StatusCode, test, web, App};
use serde_json::{json, Value};

use common::*;
use summary_quiz_server::{
    app_state::AppState,
    auth::JwtService,
    config::Config,
    db::Database,
    handlers::{configure_quiz_routes, health_check},
};

fn test_config() -> Config {
    let mut config = Config::from_env();
    config.mongo_conn_string = "mongodb://localhost:27017".to_string();
    config
}

#[actix_web::test]
async fn authenticated_quiz_round_trip() {
    let ctx = context(gateway_returning(
        model_response(&["A", "B", "C", "D", "A"]),
        1,
    ));
    let summary = seed_summary(&ctx, "user-1", "notes.pdf").await;

    let config = test_config();
    // Never pinged: every handler below is served by the in-memory repositories
    let db = Database::new(&config).await.expect("client should build");
    let jwt = JwtService::new(&config.jwt_secret, 1);
    let bearer = format!("Bearer {}", jwt.create_token("user-1").unwrap());

    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(AppState::with_service(ctx.service.clone(), db)))
            .app_data(web::Data::new(jwt))
            .service(health_check)
            .configure(configure_quiz_routes),
    )
    .await;

    // generate
    let req = test::TestRequest::post()
        .uri("/api/quizzes")
        .insert_header(("Authorization", bearer.clone()))
        .set_json(json!({
            "summary_id": summary.id,
            "difficulty": "easy",
            "question_count": 5
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let quiz: Value = test::read_body_json(resp).await;
    let quiz_id = quiz["id"].as_str().unwrap().to_string();
    assert_eq!(quiz["questions"].as_array().unwrap().len(), 5);
    assert!(quiz["questions"][0].get("correct_answer").is_none());

    // detail before submission
    let req = test::TestRequest::get()
        .uri(&format!("/api/quizzes/{}", quiz_id))
        .insert_header(("Authorization", bearer.clone()))
        .to_request();
    let detail: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(detail["is_submitted"], false);

    // submit
    let answers = json!({
        "answers": [
            { "question_id": "q1", "answer": "A" },
            { "question_id": "q2", "answer": "B" },
            { "question_id": "q3", "answer": "WRONG" },
            { "question_id": "q4", "answer": "D" },
            { "question_id": "q5", "answer": "A" }
        ]
    });
    let req = test::TestRequest::post()
        .uri(&format!("/api/quizzes/{}/submit", quiz_id))
        .insert_header(("Authorization", bearer.clone()))
        .set_json(&answers)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let graded: Value = test::read_body_json(resp).await;
    assert_eq!(graded["correct_answers"], 4);
    assert_eq!(graded["results"][2]["is_correct"], false);
    assert_eq!(graded["results"][2]["correct_answer"], "C");

    // resubmit
    let req = test::TestRequest::post()
        .uri(&format!("/api/quizzes/{}/submit", quiz_id))
        .insert_header(("Authorization", bearer.clone()))
        .set_json(&answers)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);
    let error: Value = test::read_body_json(resp).await;
    assert_eq!(error["code"], "ALREADY_SUBMITTED");

    // list with query parameters
    let req = test::TestRequest::get()
        .uri(&format!("/api/quizzes?summary_id={}&page=0", summary.id))
        .insert_header(("Authorization", bearer.clone()))
        .to_request();
    let page: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(page["total"], 1);
    assert_eq!(page["page"], 0);
    assert_eq!(page["items"][0]["filename"], "notes.pdf");
    assert_eq!(page["items"][0]["correct_answers"], 4);
}

#[actix_web::test]
async fn invalid_requests_are_bad_requests() {
    let mut gateway = MockGateway::new();
    gateway.expect_complete().never();
    let ctx = context(gateway);
    let summary = seed_summary(&ctx, "user-1", "notes.pdf").await;

    let config = test_config();
    let db = Database::new(&config).await.expect("client should build");
    let jwt = JwtService::new(&config.jwt_secret, 1);
    let bearer = format!("Bearer {}", jwt.create_token("user-1").unwrap());

    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(AppState::with_service(ctx.service.clone(), db)))
            .app_data(web::Data::new(jwt))
            .configure(configure_quiz_routes),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/api/quizzes")
        .insert_header(("Authorization", bearer.clone()))
        .set_json(json!({
            "summary_id": summary.id,
            "difficulty": "easy",
            "question_count": 7
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let req = test::TestRequest::get()
        .uri("/api/quizzes?page=-1")
        .insert_header(("Authorization", bearer.clone()))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let req = test::TestRequest::get()
        .uri(&format!("/api/quizzes?page={}", i64::MAX))
        .insert_header(("Authorization", bearer.clone()))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let req = test::TestRequest::get()
        .uri("/api/quizzes/no-such-quiz")
        .insert_header(("Authorization", bearer))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}
