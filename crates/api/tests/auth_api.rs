//! Login, session cookie, lockout and role enforcement over HTTP.

mod common;

use axum::http::header::SET_COOKIE;
use axum::http::StatusCode;
use sqlx::PgPool;

use scriptum_core::roles::{ROLE_ADMIN, ROLE_STAFF};
use scriptum_db::models::user::UpdateUser;
use scriptum_db::repositories::UserRepo;

use common::{
    body_json, build_test_app, create_user, get, get_auth, login_cookie, post_json,
    post_json_auth, TEST_PASSWORD,
};

// ---------------------------------------------------------------------------
// Login and logout
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn login_sets_http_only_session_cookie(pool: PgPool) {
    let user = create_user(&pool, "alice", ROLE_ADMIN).await;
    let app = build_test_app(pool);

    let body = serde_json::json!({ "login": "alice", "password": TEST_PASSWORD });
    let response = post_json(app, "/api/auth/login", body).await;

    assert_eq!(response.status(), StatusCode::OK);
    let cookie = response.headers().get(SET_COOKIE).unwrap().to_str().unwrap().to_string();
    assert!(cookie.starts_with("session="), "{cookie}");
    assert!(cookie.contains("HttpOnly"), "{cookie}");

    let json = body_json(response).await;
    assert_eq!(json["data"]["id"], user.id);
    assert_eq!(json["data"]["role"], "admin");
    assert!(json["data"].get("password_hash").is_none());
}

#[sqlx::test(migrations = "../db/migrations")]
async fn login_accepts_email(pool: PgPool) {
    create_user(&pool, "bob", ROLE_STAFF).await;
    let app = build_test_app(pool);

    let cookie = login_cookie(app, "bob@test.com").await;
    assert!(cookie.starts_with("session="));
}

#[sqlx::test(migrations = "../db/migrations")]
async fn wrong_password_returns_401(pool: PgPool) {
    create_user(&pool, "carol", ROLE_STAFF).await;
    let app = build_test_app(pool);

    let body = serde_json::json!({ "login": "carol", "password": "not-the-password" });
    let response = post_json(app, "/api/auth/login", body).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn unknown_user_returns_401(pool: PgPool) {
    let app = build_test_app(pool);
    let body = serde_json::json!({ "login": "ghost", "password": TEST_PASSWORD });
    let response = post_json(app, "/api/auth/login", body).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn inactive_user_cannot_log_in(pool: PgPool) {
    let user = create_user(&pool, "dave", ROLE_STAFF).await;
    UserRepo::update(
        &pool,
        user.id,
        &UpdateUser {
            is_active: Some(false),
            ..UpdateUser::default()
        },
    )
    .await
    .unwrap();
    let app = build_test_app(pool);

    let body = serde_json::json!({ "login": "dave", "password": TEST_PASSWORD });
    let response = post_json(app, "/api/auth/login", body).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn account_locks_after_repeated_failures(pool: PgPool) {
    create_user(&pool, "erin", ROLE_STAFF).await;

    for _ in 0..5 {
        let body = serde_json::json!({ "login": "erin", "password": "wrong" });
        let response = post_json(build_test_app(pool.clone()), "/api/auth/login", body).await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    // Even the right password is refused while locked.
    let body = serde_json::json!({ "login": "erin", "password": TEST_PASSWORD });
    let response = post_json(build_test_app(pool), "/api/auth/login", body).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn logout_clears_cookie(pool: PgPool) {
    let app = build_test_app(pool);
    let response = post_json(app, "/api/auth/logout", serde_json::json!({})).await;

    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    let cookie = response.headers().get(SET_COOKIE).unwrap().to_str().unwrap();
    assert!(cookie.contains("Max-Age=0"), "{cookie}");
}

// ---------------------------------------------------------------------------
// Session handling
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn me_requires_session(pool: PgPool) {
    let app = build_test_app(pool);
    let response = get(app, "/api/auth/me").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn me_returns_current_user(pool: PgPool) {
    let user = create_user(&pool, "frank", ROLE_STAFF).await;
    let cookie = login_cookie(build_test_app(pool.clone()), "frank").await;

    let response = get_auth(build_test_app(pool), "/api/auth/me", &cookie).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["id"], user.id);
    assert_eq!(json["data"]["username"], "frank");
    assert!(json["data"]["employee_id"].is_null());
}

#[sqlx::test(migrations = "../db/migrations")]
async fn tampered_cookie_is_rejected(pool: PgPool) {
    create_user(&pool, "grace", ROLE_ADMIN).await;
    let cookie = login_cookie(build_test_app(pool.clone()), "grace").await;
    let tampered = format!("{cookie}x");

    let response = get_auth(build_test_app(pool), "/api/auth/me", &tampered).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn deactivated_user_loses_session_immediately(pool: PgPool) {
    let user = create_user(&pool, "heidi", ROLE_STAFF).await;
    let cookie = login_cookie(build_test_app(pool.clone()), "heidi").await;
    UserRepo::deactivate(&pool, user.id).await.unwrap();

    let response = get_auth(build_test_app(pool), "/api/auth/me", &cookie).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

// ---------------------------------------------------------------------------
// Roles
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn staff_cannot_reach_admin_routes(pool: PgPool) {
    create_user(&pool, "ivan", ROLE_STAFF).await;
    let cookie = login_cookie(build_test_app(pool.clone()), "ivan").await;

    let response = get_auth(build_test_app(pool), "/api/admin/students", &cookie).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn staff_without_employee_profile_cannot_use_dashboard(pool: PgPool) {
    create_user(&pool, "judy", ROLE_STAFF).await;
    let cookie = login_cookie(build_test_app(pool.clone()), "judy").await;

    let response = get_auth(build_test_app(pool), "/api/dashboard/orders", &cookie).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn admin_cannot_deactivate_self(pool: PgPool) {
    let admin = create_user(&pool, "root", ROLE_ADMIN).await;
    let cookie = login_cookie(build_test_app(pool.clone()), "root").await;

    let response = common::delete_auth(
        build_test_app(pool.clone()),
        &format!("/api/admin/users/{}", admin.id),
        &cookie,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);

    // The admin can still create other users.
    let body = serde_json::json!({
        "username": "newstaff",
        "email": "NewStaff@Test.com",
        "password": "a-strong-passw0rd!",
        "role": "staff",
    });
    let response = post_json_auth(build_test_app(pool), "/api/admin/users", body, &cookie).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["data"]["email"], "newstaff@test.com");
}
