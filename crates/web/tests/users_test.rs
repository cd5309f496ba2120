mod common;

use axum::http::{Method, StatusCode};
use common::{TestApp, id_of};
use serde_json::{Value, json};
use storage::repository::user::UserRepository;

fn credentials(email: &str, password: &str) -> Value {
    json!({ "email": email, "password": password })
}

async fn admin_cookie(app: &TestApp) -> String {
    UserRepository::new(app.db.store())
        .ensure_admin("admin@example.com", "admin-password")
        .await
        .unwrap();
    let response = app
        .post(
            "/users/login",
            credentials("admin@example.com", "admin-password"),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK, "{}", response.body);
    response.cookie.unwrap()
}

#[tokio::test]
async fn signup_starts_a_session() {
    let app = TestApp::new();
    let (id, cookie) = app.sign_up("fan@example.com", "long-enough").await;

    let me = app
        .send(Method::GET, "/users", None, Some(&cookie))
        .await;

    assert_eq!(me.status, StatusCode::OK);
    assert_eq!(id_of(&me.body), id);
    assert_eq!(me.body["email"], "fan@example.com");
    assert_eq!(me.body["role"], "reader");
    assert!(me.body.get("password").is_none());
}

#[tokio::test]
async fn profile_requires_a_session() {
    let app = TestApp::new();

    let response = app.get("/users").await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.body["error"], "User not authenticated");
}

#[tokio::test]
async fn duplicate_email_is_a_conflict() {
    let app = TestApp::new();
    app.sign_up("fan@example.com", "long-enough").await;

    let response = app
        .post(
            "/users/signup",
            json!({
                "firstName": "Other",
                "lastName": "Fan",
                "email": "FAN@example.com",
                "password": "long-enough",
            }),
        )
        .await;

    assert_eq!(response.status, StatusCode::CONFLICT);
    assert_eq!(
        response.body["error"],
        "User already exists. Provide another email address or log in instead."
    );
}

#[tokio::test]
async fn signup_cannot_create_an_admin() {
    let app = TestApp::new();

    let response = app
        .post(
            "/users/signup",
            json!({
                "firstName": "Sneaky",
                "lastName": "Fan",
                "email": "sneaky@example.com",
                "password": "long-enough",
                "role": "admin",
            }),
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn short_password_is_rejected() {
    let app = TestApp::new();

    let response = app
        .post(
            "/users/signup",
            json!({
                "firstName": "Sam",
                "lastName": "Fan",
                "email": "sam@example.com",
                "password": "short",
            }),
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(
        response.body["error"],
        "Password must be at least 8 characters"
    );
}

#[tokio::test]
async fn login_checks_the_password() {
    let app = TestApp::new();
    let (id, _) = app.sign_up("fan@example.com", "long-enough").await;

    let wrong = app
        .post("/users/login", credentials("fan@example.com", "not-the-password"))
        .await;
    assert_eq!(wrong.status, StatusCode::UNAUTHORIZED);
    assert_eq!(wrong.body["error"], "Invalid credentials");

    let unknown = app
        .post("/users/login", credentials("nobody@example.com", "long-enough"))
        .await;
    assert_eq!(unknown.status, StatusCode::UNAUTHORIZED);

    let ok = app
        .post("/users/login", credentials("fan@example.com", "long-enough"))
        .await;
    assert_eq!(ok.status, StatusCode::OK);
    assert_eq!(id_of(&ok.body), id);
    assert!(ok.cookie.is_some());
}

#[tokio::test]
async fn logout_ends_the_session() {
    let app = TestApp::new();
    let (_, cookie) = app.sign_up("fan@example.com", "long-enough").await;

    let logout = app
        .send(Method::POST, "/users/logout", None, Some(&cookie))
        .await;
    assert_eq!(logout.status, StatusCode::OK);

    let me = app
        .send(Method::GET, "/users", None, Some(&cookie))
        .await;
    assert_eq!(me.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn users_may_only_edit_themselves() {
    let app = TestApp::new();
    let (me, cookie) = app.sign_up("fan@example.com", "long-enough").await;
    let (other, _) = app.sign_up("other@example.com", "long-enough").await;

    let update = json!({
        "firstName": "Renamed",
        "lastName": "Fan",
        "email": "fan@example.com",
    });

    let own = app
        .send(
            Method::PATCH,
            &format!("/users/{}", me),
            Some(update.clone()),
            Some(&cookie),
        )
        .await;
    assert_eq!(own.status, StatusCode::OK);
    assert_eq!(own.body["firstName"], "Renamed");

    let foreign = app
        .send(
            Method::PATCH,
            &format!("/users/{}", other),
            Some(update),
            Some(&cookie),
        )
        .await;
    assert_eq!(foreign.status, StatusCode::FORBIDDEN);
    assert_eq!(foreign.body["error"], "Insufficient permissions");
}

#[tokio::test]
async fn password_survives_a_profile_update() {
    let app = TestApp::new();
    let (me, cookie) = app.sign_up("fan@example.com", "long-enough").await;

    app.send(
        Method::PATCH,
        &format!("/users/{}", me),
        Some(json!({
            "firstName": "Renamed",
            "lastName": "Fan",
            "email": "fan@example.com",
        })),
        Some(&cookie),
    )
    .await;

    let login = app
        .post("/users/login", credentials("fan@example.com", "long-enough"))
        .await;
    assert_eq!(login.status, StatusCode::OK);
}

#[tokio::test]
async fn only_admins_create_accounts_directly() {
    let app = TestApp::new();
    let (_, reader) = app.sign_up("fan@example.com", "long-enough").await;
    let admin = admin_cookie(&app).await;

    let author = json!({
        "firstName": "Staff",
        "lastName": "Writer",
        "email": "writer@example.com",
        "password": "long-enough",
        "role": "author",
    });

    let denied = app
        .send(Method::POST, "/users/new-user", Some(author.clone()), Some(&reader))
        .await;
    assert_eq!(denied.status, StatusCode::FORBIDDEN);

    let created = app
        .send(Method::POST, "/users/new-user", Some(author), Some(&admin))
        .await;
    assert_eq!(created.status, StatusCode::CREATED, "{}", created.body);
    assert_eq!(created.body["role"], "author");

    let authors = app.get("/users/by-role?role=author").await;
    assert_eq!(authors.status, StatusCode::OK);
    assert_eq!(authors.body.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn by_role_needs_a_role() {
    let app = TestApp::new();

    let response = app.get("/users/by-role").await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "Provide a role");
}

#[tokio::test]
async fn deleting_your_account_signs_you_out() {
    let app = TestApp::new();
    let (me, cookie) = app.sign_up("fan@example.com", "long-enough").await;

    let deleted = app
        .send(Method::DELETE, &format!("/users/{}", me), None, Some(&cookie))
        .await;
    assert_eq!(deleted.status, StatusCode::NO_CONTENT);

    let me = app
        .send(Method::GET, "/users", None, Some(&cookie))
        .await;
    assert_eq!(me.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn public_listing_hides_emails() {
    let app = TestApp::new();
    app.sign_up("fan@example.com", "long-enough").await;

    let response = app.get("/users/all").await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["usersCount"], 1);
    assert!(response.body["users"][0].get("email").is_none());
}
