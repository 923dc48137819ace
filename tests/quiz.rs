//! Integration tests for POST /quizzes and the metrics it feeds.

mod common;

use std::collections::HashSet;

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use rstest::rstest;
use serde_json::{json, Value};

use common::{assert_error, seeded_app};

#[tokio::test]
async fn quiz_returns_an_unseen_question_from_the_category() {
    let app = seeded_app().await;
    let science = app.add_questions(3, 1).await;
    app.add_questions(3, 2).await;

    let response = app
        .post(
            "/quizzes",
            json!({
                "previous_questions": [science[0]],
                "quiz_category": { "id": 1, "type": "Science" },
            }),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["success"], true);
    let question = &response.body["question"];
    for field in ["id", "question", "answer", "category", "difficulty"] {
        assert!(question.get(field).is_some(), "missing {field}");
    }
    assert_eq!(question["category"], 1);
    assert_ne!(question["id"], science[0]);
}

#[tokio::test]
async fn exhausted_category_ends_the_quiz() {
    let app = seeded_app().await;
    let science = app.add_questions(4, 1).await;
    app.add_questions(2, 3).await;

    let response = app
        .post(
            "/quizzes",
            json!({
                "previous_questions": science,
                "quiz_category": { "id": 1, "type": "Science" },
            }),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body, json!({ "success": true, "question": null }));
}

#[rstest]
#[case(json!({ "previous_questions": [], "quiz_category": { "id": 0, "type": "click" } }))]
#[case(json!({ "previous_questions": [], "quiz_category": { "id": "0" } }))]
#[case(json!({ "previous_questions": [], "quiz_category": null }))]
#[case(json!({ "previous_questions": [] }))]
#[case(json!({}))]
#[tokio::test]
async fn category_zero_draws_from_every_category(#[case] body: Value) {
    let app = seeded_app().await;
    let id = app.add_question("Only one left?", 5).await;

    let response = app.post("/quizzes", body).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["question"]["id"], id);
}

#[tokio::test]
async fn playing_to_the_end_serves_every_question_once() {
    let app = seeded_app().await;
    let mut expected: HashSet<i64> = app.add_questions(6, 2).await.into_iter().collect();
    expected.extend(app.add_questions(4, 6).await);

    let mut previous: Vec<i64> = Vec::new();
    loop {
        let response = app
            .post(
                "/quizzes",
                json!({ "previous_questions": &previous, "quiz_category": { "id": 0 } }),
            )
            .await;
        assert_eq!(response.status, StatusCode::OK);
        match response.body["question"]["id"].as_i64() {
            Some(id) => {
                assert!(!previous.contains(&id), "question {id} served twice");
                previous.push(id);
            }
            None => break,
        }
    }

    assert_eq!(previous.into_iter().collect::<HashSet<_>>(), expected);
}

#[tokio::test]
async fn category_with_no_questions_ends_immediately() {
    let app = seeded_app().await;
    app.add_questions(2, 1).await;

    let response = app
        .post(
            "/quizzes",
            json!({ "previous_questions": [], "quiz_category": { "id": 6, "type": "Sports" } }),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["question"], Value::Null);
}

#[rstest]
#[case(json!({ "previous_questions": null }))]
#[case(json!({ "previous_questions": ["a"] }))]
#[case(json!({ "previous_questions": [], "quiz_category": { "id": "science" } }))]
#[case(json!({ "previous_questions": [], "quiz_category": 3 }))]
#[case(json!([1, 2]))]
#[tokio::test]
async fn malformed_quiz_requests_are_unprocessable(#[case] body: Value) {
    let app = seeded_app().await;
    app.add_questions(2, 1).await;

    assert_error(&app.post("/quizzes", body).await, 422, "Unprocessable entity");
}

#[tokio::test]
async fn served_questions_show_up_in_metrics() {
    let app = seeded_app().await;
    app.add_questions(2, 4).await;

    let response = app
        .post(
            "/quizzes",
            json!({ "previous_questions": [], "quiz_category": { "id": 4, "type": "History" } }),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);

    let request = Request::builder()
        .method(Method::GET)
        .uri("/metrics")
        .body(Body::empty())
        .unwrap();
    let (status, headers, bytes) = app.send_raw(request).await;

    assert_eq!(status, StatusCode::OK);
    assert!(headers[header::CONTENT_TYPE]
        .to_str()
        .unwrap()
        .starts_with("text/plain"));
    let text = String::from_utf8(bytes).unwrap();
    assert!(text.contains("quiz_questions_served_total{category=\"4\"}"));
}
