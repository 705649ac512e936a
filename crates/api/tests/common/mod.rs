#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::header::{CONTENT_TYPE, COOKIE, SET_COOKIE};
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

use scriptum_api::auth::password::hash_password;
use scriptum_api::auth::session::SessionConfig;
use scriptum_api::config::{ServerConfig, UploadConfig};
use scriptum_api::router::build_app_router;
use scriptum_api::state::AppState;
use scriptum_core::roles::{ROLE_ADMIN, ROLE_STAFF};
use scriptum_core::upload::DEFAULT_MAX_UPLOAD_BYTES;
use scriptum_db::models::employee::{CreateEmployee, Employee};
use scriptum_db::models::service::{CreateService, Service};
use scriptum_db::models::student::{CreateStudent, Student};
use scriptum_db::models::user::{CreateUser, User};
use scriptum_db::repositories::{EmployeeRepo, ServiceRepo, StudentRepo, UserRepo};

/// Password given to every user created through [`create_user`].
pub const TEST_PASSWORD: &str = "test_password_123!";

/// Build a test `ServerConfig` with safe defaults.
///
/// Uploads go to a fresh directory under the system temp dir so parallel
/// tests never see each other's files.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:3001".to_string()],
        request_timeout_secs: 30,
        session: SessionConfig {
            secret: "integration-test-session-secret".to_string(),
            ttl_hours: 1,
            cookie_secure: false,
        },
        upload: UploadConfig {
            dir: std::env::temp_dir().join(format!("scriptum-uploads-{}", uuid::Uuid::new_v4())),
            public_path: "/uploads".to_string(),
            max_bytes: DEFAULT_MAX_UPLOAD_BYTES,
        },
        bootstrap_admin: None,
    }
}

/// Build the application router exactly as `main.rs` does.
pub fn build_test_app(pool: PgPool) -> Router {
    let config = test_config();
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
    };
    build_app_router(state, &config)
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

async fn send(app: Router, request: Request<Body>) -> Response<Body> {
    app.oneshot(request).await.unwrap()
}

fn json_request(
    method: Method,
    uri: &str,
    body: &serde_json::Value,
    cookie: Option<&str>,
) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(CONTENT_TYPE, "application/json");
    if let Some(cookie) = cookie {
        builder = builder.header(COOKIE, cookie);
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

fn empty_request(method: Method, uri: &str, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(COOKIE, cookie);
    }
    builder.body(Body::empty()).unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, empty_request(Method::GET, uri, None)).await
}

pub async fn get_auth(app: Router, uri: &str, cookie: &str) -> Response<Body> {
    send(app, empty_request(Method::GET, uri, Some(cookie))).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send(app, json_request(Method::POST, uri, &body, None)).await
}

pub async fn post_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    cookie: &str,
) -> Response<Body> {
    send(app, json_request(Method::POST, uri, &body, Some(cookie))).await
}

pub async fn patch_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    cookie: &str,
) -> Response<Body> {
    send(app, json_request(Method::PATCH, uri, &body, Some(cookie))).await
}

pub async fn delete_auth(app: Router, uri: &str, cookie: &str) -> Response<Body> {
    send(app, empty_request(Method::DELETE, uri, Some(cookie))).await
}

/// Read the whole body and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

/// Insert a user directly with [`TEST_PASSWORD`].
pub async fn create_user(pool: &PgPool, username: &str, role: &str) -> User {
    let input = CreateUser {
        username: username.to_string(),
        email: format!("{username}@test.com"),
        password_hash: hash_password(TEST_PASSWORD).expect("hashing should succeed"),
        role: role.to_string(),
    };
    UserRepo::create(pool, &input)
        .await
        .expect("user creation should succeed")
}

/// Log in through the API and return the `name=value` pair to send back as
/// a `Cookie` header.
pub async fn login_cookie(app: Router, login: &str) -> String {
    let body = serde_json::json!({ "login": login, "password": TEST_PASSWORD });
    let response = post_json(app, "/api/auth/login", body).await;
    assert_eq!(response.status(), axum::http::StatusCode::OK);
    let set_cookie = response
        .headers()
        .get(SET_COOKIE)
        .expect("login must set a cookie")
        .to_str()
        .unwrap();
    set_cookie.split(';').next().unwrap().to_string()
}

/// Create an admin user and return its session cookie.
pub async fn admin_cookie(pool: &PgPool) -> String {
    create_user(pool, "admin", ROLE_ADMIN).await;
    login_cookie(build_test_app(pool.clone()), "admin").await
}

/// Create a staff user linked to an active employee and return both plus
/// the session cookie.
pub async fn employee_with_cookie(pool: &PgPool, username: &str) -> (Employee, String) {
    let user = create_user(pool, username, ROLE_STAFF).await;
    let employee = create_employee(pool, username, Some(user.id), None).await;
    let cookie = login_cookie(build_test_app(pool.clone()), username).await;
    (employee, cookie)
}

pub async fn create_employee(
    pool: &PgPool,
    name: &str,
    user_id: Option<i64>,
    referral_code: Option<&str>,
) -> Employee {
    let input = CreateEmployee {
        user_id,
        name: name.to_string(),
        email: format!("{name}@staff.test"),
        phone: None,
        position: None,
        is_referrer: referral_code.is_some(),
        referral_code: referral_code.map(str::to_string),
        commission_rate_bps: None,
        profit_share_bps: None,
    };
    EmployeeRepo::create(pool, &input).await.unwrap()
}

pub async fn create_student(pool: &PgPool, email: &str) -> Student {
    let input = CreateStudent {
        name: "Test Student".to_string(),
        email: email.to_string(),
        phone: None,
        country: None,
        university: None,
        notes: None,
    };
    StudentRepo::create(pool, &input).await.unwrap()
}

pub async fn create_service(pool: &PgPool, slug: &str, base_price: i64) -> Service {
    let input = CreateService {
        title: format!("Service {slug}"),
        slug: None,
        summary: None,
        description: None,
        base_price,
        features: Vec::new(),
        countries: Vec::new(),
        sort_order: None,
        is_active: None,
    };
    ServiceRepo::create(pool, &input, slug).await.unwrap()
}
