//! Shared helpers for the HTTP integration tests.
//!
//! Each test gets its own in-memory SQLite database with migrations applied and
//! the six standard categories seeded.

#![allow(dead_code)]

use axum::body::Body;
use axum::http::{header, HeaderMap, Method, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use sqlx::SqlitePool;
use tower::ServiceExt;

use trivia_api::db::queries::categories::import_categories;
use trivia_api::db::queries::questions::create_question;
use trivia_api::db::{establish_connection, run_migrations, Category, NewQuestion};
use trivia_api::server::app::build_app;

pub const CATEGORIES: [(i64, &str); 6] = [
    (1, "Science"),
    (2, "Art"),
    (3, "Geography"),
    (4, "History"),
    (5, "Entertainment"),
    (6, "Sports"),
];

pub struct TestApp {
    pub app: Router,
    pub pool: SqlitePool,
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Value,
}

pub async fn empty_app() -> TestApp {
    let pool = establish_connection("sqlite::memory:", 1).await.unwrap();
    run_migrations(&pool).await.unwrap();
    TestApp {
        app: build_app(pool.clone()),
        pool,
    }
}

pub async fn seeded_app() -> TestApp {
    let test_app = empty_app().await;
    let categories = CATEGORIES
        .iter()
        .map(|(id, kind)| Category {
            id: *id,
            kind: (*kind).to_owned(),
        })
        .collect();
    import_categories(&test_app.pool, categories).await.unwrap();
    test_app
}

impl TestApp {
    pub async fn add_question(&self, question: &str, category: i64) -> i64 {
        create_question(
            &self.pool,
            &NewQuestion {
                question: question.to_owned(),
                answer: "answer".to_owned(),
                category,
                difficulty: 1,
            },
        )
        .await
        .unwrap()
    }

    pub async fn add_questions(&self, count: usize, category: i64) -> Vec<i64> {
        let mut ids = Vec::with_capacity(count);
        for n in 0..count {
            ids.push(self.add_question(&format!("Question {n}?"), category).await);
        }
        ids
    }

    pub async fn send_raw(&self, request: Request<Body>) -> (StatusCode, HeaderMap, Vec<u8>) {
        let response = self.app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let headers = response.headers().clone();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, headers, bytes.to_vec())
    }

    pub async fn request(&self, method: Method, uri: &str, body: Option<Value>) -> TestResponse {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string())),
            None => builder.body(Body::empty()),
        }
        .unwrap();

        let (status, headers, bytes) = self.send_raw(request).await;
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        TestResponse {
            status,
            headers,
            body,
        }
    }

    pub async fn get(&self, uri: &str) -> TestResponse {
        self.request(Method::GET, uri, None).await
    }

    pub async fn post(&self, uri: &str, body: Value) -> TestResponse {
        self.request(Method::POST, uri, Some(body)).await
    }

    pub async fn delete(&self, uri: &str) -> TestResponse {
        self.request(Method::DELETE, uri, None).await
    }
}

pub fn assert_error(response: &TestResponse, code: u16, message: &str) {
    assert_eq!(response.status.as_u16(), code, "body: {}", response.body);
    assert_eq!(response.body["success"], false);
    assert_eq!(response.body["error"], code);
    assert_eq!(response.body["message"], message);
}
