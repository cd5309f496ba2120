#![allow(clippy::unwrap_used, clippy::expect_used)]
#![allow(dead_code)]
//! Test utilities for driving the real router against the in-memory store.

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Method, Request, StatusCode, header};
use axum::response::Response;
use serde_json::{Value, json};
use storage::Database;
use tower::ServiceExt;

use matchday_web::session::create_session_layer;

/// A fresh application with an empty store.
pub struct TestApp {
    router: Router,
    pub db: Database,
}

/// Status and decoded JSON body of one response.
pub struct TestResponse {
    pub status: StatusCode,
    pub body: Value,
    pub cookie: Option<String>,
}

impl TestApp {
    pub fn new() -> Self {
        let db = Database::in_memory();
        let router = matchday_web::app(db.clone(), create_session_layer(false));
        Self { router, db }
    }

    pub async fn request(&self, request: Request<Body>) -> Response {
        self.router
            .clone()
            .oneshot(request)
            .await
            .expect("Failed to send request")
    }

    pub async fn send(
        &self,
        method: Method,
        uri: &str,
        body: Option<Value>,
        cookie: Option<&str>,
    ) -> TestResponse {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.request(request).await;
        let status = response.status();
        let cookie = extract_cookie(&response);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };

        TestResponse {
            status,
            body,
            cookie,
        }
    }

    pub async fn get(&self, uri: &str) -> TestResponse {
        self.send(Method::GET, uri, None, None).await
    }

    pub async fn post(&self, uri: &str, body: Value) -> TestResponse {
        self.send(Method::POST, uri, Some(body), None).await
    }

    pub async fn patch(&self, uri: &str, body: Value) -> TestResponse {
        self.send(Method::PATCH, uri, Some(body), None).await
    }

    pub async fn delete(&self, uri: &str) -> TestResponse {
        self.send(Method::DELETE, uri, None, None).await
    }

    /// Creates a club and returns its id.
    pub async fn create_club(&self, common_name: &str, country: &str) -> String {
        let response = self
            .post(
                "/clubs",
                json!({
                    "fullName": format!("{} Football Club", common_name),
                    "commonName": common_name,
                    "shortName": common_name.chars().take(3).collect::<String>().to_uppercase(),
                    "country": country,
                }),
            )
            .await;
        assert_eq!(response.status, StatusCode::CREATED, "{}", response.body);
        id_of(&response.body)
    }

    /// Creates a competition over `clubs` and returns its id.
    pub async fn create_competition(&self, full_name: &str, clubs: &[&str]) -> String {
        let response = self
            .post(
                "/competitions",
                json!({
                    "fullName": full_name,
                    "shortName": full_name.split_whitespace().map(|w| &w[..1]).collect::<String>(),
                    "country": "England",
                    "type": "league",
                    "clubs": clubs,
                }),
            )
            .await;
        assert_eq!(response.status, StatusCode::CREATED, "{}", response.body);
        id_of(&response.body)
    }

    /// Signs a new account up and returns its id and session cookie.
    pub async fn sign_up(&self, email: &str, password: &str) -> (String, String) {
        let response = self
            .post(
                "/users/signup",
                json!({
                    "firstName": "Test",
                    "lastName": "User",
                    "email": email,
                    "password": password,
                }),
            )
            .await;
        assert_eq!(response.status, StatusCode::CREATED, "{}", response.body);
        let cookie = response.cookie.expect("signup sets a session cookie");
        (id_of(&response.body), cookie)
    }

    /// Creates an author account and a material written by it.
    pub async fn create_material(&self, author: &str, body: Value) -> String {
        let mut body = body;
        body["author"] = json!(author);
        let response = self.post("/materials", body).await;
        assert_eq!(response.status, StatusCode::CREATED, "{}", response.body);
        id_of(&response.body)
    }
}

pub fn id_of(body: &Value) -> String {
    body["_id"].as_str().expect("response has an _id").to_string()
}

/// The `name=value` part of the session cookie, if one was set.
pub fn extract_cookie(response: &Response) -> Option<String> {
    response
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .filter_map(|v| v.split(';').next())
        .map(str::to_string)
        .next()
}
