//! Back-office catalogue endpoints: services, employees, payment methods,
//! expenses and blog posts.

mod common;

use axum::http::StatusCode;
use common::{
    admin_cookie, body_json, build_test_app, create_employee, create_service, create_student,
    delete_auth, get_auth, patch_json_auth, post_json_auth,
};
use sqlx::PgPool;

async fn create_json(
    pool: &PgPool,
    cookie: &str,
    uri: &str,
    body: serde_json::Value,
) -> serde_json::Value {
    let response = post_json_auth(build_test_app(pool.clone()), uri, body, cookie).await;
    assert_eq!(response.status(), StatusCode::CREATED, "{uri}");
    body_json(response).await["data"].clone()
}

/// An order that references `service_id`, optionally with an assignee.
async fn order_using(
    pool: &PgPool,
    cookie: &str,
    service_id: i64,
    employee_id: Option<i64>,
) -> serde_json::Value {
    let student = create_student(pool, &format!("buyer{service_id}@example.com")).await;
    create_json(
        pool,
        cookie,
        "/api/admin/orders",
        serde_json::json!({
            "student_id": student.id,
            "service_id": service_id,
            "employee_id": employee_id,
            "title": "Referenced order",
        }),
    )
    .await
}

// ---------------------------------------------------------------------------
// Delete guards
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn service_used_by_an_order_cannot_be_deleted(pool: PgPool) {
    let cookie = admin_cookie(&pool).await;
    let used = create_service(&pool, "used", 10_000).await;
    let unused = create_service(&pool, "unused", 10_000).await;
    order_using(&pool, &cookie, used.id, None).await;

    let uri = format!("/api/admin/services/{}", used.id);
    let response = delete_auth(build_test_app(pool.clone()), &uri, &cookie).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
    assert_eq!(body_json(response).await["code"], "CONFLICT");

    let response = get_auth(build_test_app(pool.clone()), &uri, &cookie).await;
    assert_eq!(response.status(), StatusCode::OK);

    let uri = format!("/api/admin/services/{}", unused.id);
    let response = delete_auth(build_test_app(pool), &uri, &cookie).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn assigned_employee_cannot_be_deleted(pool: PgPool) {
    let cookie = admin_cookie(&pool).await;
    let service = create_service(&pool, "thesis", 10_000).await;
    let busy = create_employee(&pool, "busy", None, None).await;
    let idle = create_employee(&pool, "idle", None, None).await;
    order_using(&pool, &cookie, service.id, Some(busy.id)).await;

    let uri = format!("/api/admin/employees/{}", busy.id);
    let response = delete_auth(build_test_app(pool.clone()), &uri, &cookie).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let uri = format!("/api/admin/employees/{}", idle.id);
    let response = delete_auth(build_test_app(pool), &uri, &cookie).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn employee_with_transfers_cannot_be_deleted(pool: PgPool) {
    let cookie = admin_cookie(&pool).await;
    let paid = create_employee(&pool, "paid", None, None).await;
    create_json(
        &pool,
        &cookie,
        "/api/admin/transfers",
        serde_json::json!({ "employee_id": paid.id, "amount": 5_000 }),
    )
    .await;

    let uri = format!("/api/admin/employees/{}", paid.id);
    let response = delete_auth(build_test_app(pool), &uri, &cookie).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn payment_method_in_use_cannot_be_deleted(pool: PgPool) {
    let cookie = admin_cookie(&pool).await;
    let method = create_json(
        &pool,
        &cookie,
        "/api/admin/payment-methods",
        serde_json::json!({ "name": "Bank transfer", "details": "IBAN ..." }),
    )
    .await;
    let method_id = method["id"].as_i64().unwrap();

    let service = create_service(&pool, "review", 20_000).await;
    let order = order_using(&pool, &cookie, service.id, None).await;
    create_json(
        &pool,
        &cookie,
        &format!("/api/admin/orders/{}/payments", order["id"]),
        serde_json::json!({ "amount": 5_000, "payment_method_id": method_id }),
    )
    .await;

    let uri = format!("/api/admin/payment-methods/{method_id}");
    let response = delete_auth(build_test_app(pool.clone()), &uri, &cookie).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);

    // Deactivating is the way out.
    let response = patch_json_auth(
        build_test_app(pool.clone()),
        &uri,
        serde_json::json!({ "is_active": false }),
        &cookie,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"]["is_active"], false);

    let response = get_auth(build_test_app(pool), "/api/admin/payment-methods", &cookie).await;
    let listed = body_json(response).await["data"].clone();
    assert!(listed.as_array().unwrap().is_empty());
}

// ---------------------------------------------------------------------------
// Payment methods and expenses
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn payment_method_crud(pool: PgPool) {
    let cookie = admin_cookie(&pool).await;

    let response = post_json_auth(
        build_test_app(pool.clone()),
        "/api/admin/payment-methods",
        serde_json::json!({ "name": "  " }),
        &cookie,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let method = create_json(
        &pool,
        &cookie,
        "/api/admin/payment-methods",
        serde_json::json!({ "name": "Wallet" }),
    )
    .await;
    assert_eq!(method["is_active"], true);
    let uri = format!("/api/admin/payment-methods/{}", method["id"]);

    let response = patch_json_auth(
        build_test_app(pool.clone()),
        &uri,
        serde_json::json!({ "name": "Mobile wallet", "details": "+00 000" }),
        &cookie,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let updated = body_json(response).await["data"].clone();
    assert_eq!(updated["name"], "Mobile wallet");
    assert_eq!(updated["details"], "+00 000");

    let response = delete_auth(build_test_app(pool.clone()), &uri, &cookie).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = get_auth(build_test_app(pool), &uri, &cookie).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn expense_crud_and_date_filter(pool: PgPool) {
    let cookie = admin_cookie(&pool).await;

    let response = post_json_auth(
        build_test_app(pool.clone()),
        "/api/admin/expenses",
        serde_json::json!({ "title": "Hosting", "amount": 0 }),
        &cookie,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let hosting = create_json(
        &pool,
        &cookie,
        "/api/admin/expenses",
        serde_json::json!({
            "title": "Hosting",
            "category": "infra",
            "amount": 4_500,
            "spent_on": "2026-03-10",
        }),
    )
    .await;
    create_json(
        &pool,
        &cookie,
        "/api/admin/expenses",
        serde_json::json!({ "title": "Ads", "amount": 9_000, "spent_on": "2026-04-02" }),
    )
    .await;

    let response = get_auth(
        build_test_app(pool.clone()),
        "/api/admin/expenses?from=2026-03-01&to=2026-03-31",
        &cookie,
    )
    .await;
    let march = body_json(response).await["data"].clone();
    let march = march.as_array().unwrap();
    assert_eq!(march.len(), 1);
    assert_eq!(march[0]["title"], "Hosting");

    let uri = format!("/api/admin/expenses/{}", hosting["id"]);
    let response = patch_json_auth(
        build_test_app(pool.clone()),
        &uri,
        serde_json::json!({ "amount": 5_000 }),
        &cookie,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let updated = body_json(response).await["data"].clone();
    assert_eq!(updated["amount"], 5_000);
    assert_eq!(updated["category"], "infra");

    let response = delete_auth(build_test_app(pool.clone()), &uri, &cookie).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    let response = delete_auth(build_test_app(pool), &uri, &cookie).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Blog
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn published_at_is_stamped_once(pool: PgPool) {
    let cookie = admin_cookie(&pool).await;
    let draft = create_json(
        &pool,
        &cookie,
        "/api/admin/blog",
        serde_json::json!({ "title": "Choosing a topic", "content": "<p>Start early.</p>" }),
    )
    .await;
    assert_eq!(draft["is_published"], false);
    assert!(draft["published_at"].is_null());

    let uri = format!("/api/admin/blog/{}", draft["id"]);
    let patch = |body: serde_json::Value| {
        let pool = pool.clone();
        let cookie = cookie.clone();
        let uri = uri.clone();
        async move {
            let response = patch_json_auth(build_test_app(pool), &uri, body, &cookie).await;
            assert_eq!(response.status(), StatusCode::OK);
            body_json(response).await["data"].clone()
        }
    };

    let published = patch(serde_json::json!({ "is_published": true })).await;
    let stamped = published["published_at"].clone();
    assert!(stamped.is_string());

    let edited = patch(serde_json::json!({ "excerpt": "How to pick a thesis topic" })).await;
    assert_eq!(edited["published_at"], stamped);

    let hidden = patch(serde_json::json!({ "is_published": false })).await;
    assert_eq!(hidden["is_published"], false);
    assert_eq!(hidden["published_at"], stamped);

    let republished = patch(serde_json::json!({ "is_published": true })).await;
    assert_eq!(republished["published_at"], stamped);
}
