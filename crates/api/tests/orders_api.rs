//! Order lifecycle, pricing, payments, public intake and the employee
//! dashboard over HTTP.

mod common;

use axum::http::StatusCode;
use common::{
    admin_cookie, body_json, build_test_app, create_employee, create_service, create_student,
    delete_auth, employee_with_cookie, get_auth, patch_json_auth, post_json, post_json_auth,
};
use sqlx::PgPool;

/// Create an order through the admin API and return its JSON detail.
async fn create_order(pool: &PgPool, cookie: &str, body: serde_json::Value) -> serde_json::Value {
    let response = post_json_auth(
        build_test_app(pool.clone()),
        "/api/admin/orders",
        body,
        cookie,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["data"].clone()
}

async fn change_status(
    pool: &PgPool,
    cookie: &str,
    id: i64,
    status: &str,
) -> axum::http::Response<axum::body::Body> {
    post_json_auth(
        build_test_app(pool.clone()),
        &format!("/api/admin/orders/{id}/status"),
        serde_json::json!({ "status": status }),
        cookie,
    )
    .await
}

// ---------------------------------------------------------------------------
// Creation and pricing
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn create_then_fetch_returns_same_fields(pool: PgPool) {
    let student = create_student(&pool, "s1@example.com").await;
    let service = create_service(&pool, "essay", 80_000).await;
    let writer = create_employee(&pool, "writer", None, None).await;
    let referrer = create_employee(&pool, "referrer", None, Some("AMIR10")).await;
    let cookie = admin_cookie(&pool).await;

    let created = create_order(
        &pool,
        &cookie,
        serde_json::json!({
            "student_id": student.id,
            "service_id": service.id,
            "employee_id": writer.id,
            "referrer_id": referrer.id,
            "title": "Literature review",
            "total_price": 110_000,
            "discount": 10_000,
            "deadline": "2026-12-01",
        }),
    )
    .await;

    // Defaults: 10% referral commission, 50% of the remainder to the employee.
    assert_eq!(created["status"], "ASSIGNED");
    assert_eq!(created["financials"]["net_price"], 100_000);
    assert_eq!(created["financials"]["referrer_commission"], 10_000);
    assert_eq!(created["financials"]["employee_share"], 45_000);
    assert_eq!(created["financials"]["company_profit"], 45_000);
    assert_eq!(created["balance_due"], 100_000);
    assert!(created["order_number"].as_str().unwrap().starts_with("ORD-"));

    let id = created["id"].as_i64().unwrap();
    let response = get_auth(
        build_test_app(pool),
        &format!("/api/admin/orders/{id}"),
        &cookie,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let fetched = body_json(response).await["data"].clone();

    for field in ["title", "status", "total_price", "discount", "deadline", "order_number"] {
        assert_eq!(fetched[field], created[field], "{field}");
    }
    assert_eq!(fetched["events"].as_array().unwrap().len(), 1);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn price_defaults_to_service_base_price(pool: PgPool) {
    let student = create_student(&pool, "s2@example.com").await;
    let service = create_service(&pool, "proofreading", 25_000).await;
    let cookie = admin_cookie(&pool).await;

    let created = create_order(
        &pool,
        &cookie,
        serde_json::json!({
            "student_id": student.id,
            "service_id": service.id,
            "title": "Proofread",
        }),
    )
    .await;

    assert_eq!(created["status"], "PENDING");
    assert_eq!(created["total_price"], 25_000);
    assert_eq!(created["financials"]["employee_share"], 0);
    assert_eq!(created["financials"]["company_profit"], 25_000);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn discount_above_price_is_rejected(pool: PgPool) {
    let student = create_student(&pool, "s3@example.com").await;
    let service = create_service(&pool, "slides", 10_000).await;
    let cookie = admin_cookie(&pool).await;

    let body = serde_json::json!({
        "student_id": student.id,
        "service_id": service.id,
        "title": "Slides",
        "total_price": 10_000,
        "discount": 20_000,
    });
    let response = post_json_auth(build_test_app(pool), "/api/admin/orders", body, &cookie).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn installment_plan_must_cover_net_price(pool: PgPool) {
    let student = create_student(&pool, "s4@example.com").await;
    let service = create_service(&pool, "dissertation", 300_000).await;
    let cookie = admin_cookie(&pool).await;

    let body = serde_json::json!({
        "student_id": student.id,
        "service_id": service.id,
        "title": "Dissertation",
        "installments": [
            { "amount": 100_000, "due_date": "2026-11-01" },
            { "amount": 100_000, "due_date": "2026-12-01" },
        ],
    });
    let response = post_json_auth(build_test_app(pool), "/api/admin/orders", body, &cookie).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ---------------------------------------------------------------------------
// Lifecycle
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn invalid_transition_returns_409(pool: PgPool) {
    let student = create_student(&pool, "s5@example.com").await;
    let service = create_service(&pool, "report", 40_000).await;
    let cookie = admin_cookie(&pool).await;
    let order = create_order(
        &pool,
        &cookie,
        serde_json::json!({
            "student_id": student.id,
            "service_id": service.id,
            "title": "Report",
        }),
    )
    .await;
    let id = order["id"].as_i64().unwrap();

    let response = change_status(&pool, &cookie, id, "COMPLETED").await;
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let response = change_status(&pool, &cookie, id, "NOT_A_STATUS").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn full_lifecycle_records_events(pool: PgPool) {
    let student = create_student(&pool, "s6@example.com").await;
    let service = create_service(&pool, "coding", 60_000).await;
    let writer = create_employee(&pool, "dev", None, None).await;
    let cookie = admin_cookie(&pool).await;
    let order = create_order(
        &pool,
        &cookie,
        serde_json::json!({
            "student_id": student.id,
            "service_id": service.id,
            "title": "Project",
        }),
    )
    .await;
    let id = order["id"].as_i64().unwrap();

    let response = post_json_auth(
        build_test_app(pool.clone()),
        &format!("/api/admin/orders/{id}/assign"),
        serde_json::json!({ "employee_id": writer.id }),
        &cookie,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let assigned = body_json(response).await["data"].clone();
    assert_eq!(assigned["status"], "ASSIGNED");
    assert_eq!(assigned["financials"]["employee_share"], 30_000);

    for status in ["IN_PROGRESS", "DELIVERED", "REVISION", "DELIVERED", "COMPLETED"] {
        let response = change_status(&pool, &cookie, id, status).await;
        assert_eq!(response.status(), StatusCode::OK, "{status}");
    }

    let response = get_auth(
        build_test_app(pool.clone()),
        &format!("/api/admin/orders/{id}/events"),
        &cookie,
    )
    .await;
    let events = body_json(response).await["data"].clone();
    // created, assigned, five status changes
    assert_eq!(events.as_array().unwrap().len(), 7);

    // Completed orders are frozen.
    let response = patch_json_auth(
        build_test_app(pool),
        &format!("/api/admin/orders/{id}"),
        serde_json::json!({ "title": "Renamed" }),
        &cookie,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn status_endpoint_refuses_direct_assignment(pool: PgPool) {
    let student = create_student(&pool, "s7@example.com").await;
    let service = create_service(&pool, "review", 20_000).await;
    let cookie = admin_cookie(&pool).await;
    let order = create_order(
        &pool,
        &cookie,
        serde_json::json!({
            "student_id": student.id,
            "service_id": service.id,
            "title": "Review",
        }),
    )
    .await;

    let response = change_status(&pool, &cookie, order["id"].as_i64().unwrap(), "ASSIGNED").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ---------------------------------------------------------------------------
// Payments
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn payments_cannot_exceed_balance(pool: PgPool) {
    let student = create_student(&pool, "s8@example.com").await;
    let service = create_service(&pool, "stats", 50_000).await;
    let cookie = admin_cookie(&pool).await;
    let order = create_order(
        &pool,
        &cookie,
        serde_json::json!({ "student_id": student.id, "service_id": service.id, "title": "SPSS" }),
    )
    .await;
    let id = order["id"].as_i64().unwrap();
    let uri = format!("/api/admin/orders/{id}/payments");

    let response = post_json_auth(
        build_test_app(pool.clone()),
        &uri,
        serde_json::json!({ "amount": 30_000 }),
        &cookie,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = post_json_auth(
        build_test_app(pool.clone()),
        &uri,
        serde_json::json!({ "amount": 30_000 }),
        &cookie,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = get_auth(
        build_test_app(pool.clone()),
        &format!("/api/admin/orders/{id}"),
        &cookie,
    )
    .await;
    let detail = body_json(response).await["data"].clone();
    assert_eq!(detail["paid_amount"], 30_000);
    assert_eq!(detail["balance_due"], 20_000);

    // An order with money on it cannot be deleted.
    let response = delete_auth(
        build_test_app(pool),
        &format!("/api/admin/orders/{id}"),
        &cookie,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn cancelled_orders_refuse_payments(pool: PgPool) {
    let student = create_student(&pool, "s9@example.com").await;
    let service = create_service(&pool, "editing", 15_000).await;
    let cookie = admin_cookie(&pool).await;
    let order = create_order(
        &pool,
        &cookie,
        serde_json::json!({ "student_id": student.id, "service_id": service.id, "title": "Edit" }),
    )
    .await;
    let id = order["id"].as_i64().unwrap();

    let response = change_status(&pool, &cookie, id, "CANCELLED").await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = post_json_auth(
        build_test_app(pool),
        &format!("/api/admin/orders/{id}/payments"),
        serde_json::json!({ "amount": 1_000 }),
        &cookie,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

// ---------------------------------------------------------------------------
// Editing and deletion
// ---------------------------------------------------------------------------

async fn patch_order(
    pool: &PgPool,
    cookie: &str,
    id: i64,
    body: serde_json::Value,
) -> axum::http::Response<axum::body::Body> {
    patch_json_auth(
        build_test_app(pool.clone()),
        &format!("/api/admin/orders/{id}"),
        body,
        cookie,
    )
    .await
}

#[sqlx::test(migrations = "../db/migrations")]
async fn repricing_below_paid_amount_is_rejected(pool: PgPool) {
    let student = create_student(&pool, "e1@example.com").await;
    let service = create_service(&pool, "analysis", 50_000).await;
    let cookie = admin_cookie(&pool).await;
    let order = create_order(
        &pool,
        &cookie,
        serde_json::json!({ "student_id": student.id, "service_id": service.id, "title": "Data" }),
    )
    .await;
    let id = order["id"].as_i64().unwrap();

    let response = post_json_auth(
        build_test_app(pool.clone()),
        &format!("/api/admin/orders/{id}/payments"),
        serde_json::json!({ "amount": 30_000 }),
        &cookie,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = patch_order(&pool, &cookie, id, serde_json::json!({ "discount": 25_000 })).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = patch_order(
        &pool,
        &cookie,
        id,
        serde_json::json!({ "total_price": 40_000 }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let detail = body_json(response).await["data"].clone();
    assert_eq!(detail["financials"]["net_price"], 40_000);
    assert_eq!(detail["paid_amount"], 30_000);
    assert_eq!(detail["balance_due"], 10_000);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn repricing_recomputes_assignee_share(pool: PgPool) {
    let student = create_student(&pool, "e2@example.com").await;
    let service = create_service(&pool, "chapter", 20_000).await;
    let writer = create_employee(&pool, "pen", None, None).await;
    let cookie = admin_cookie(&pool).await;
    let order = create_order(
        &pool,
        &cookie,
        serde_json::json!({
            "student_id": student.id,
            "service_id": service.id,
            "employee_id": writer.id,
            "title": "Intro",
        }),
    )
    .await;
    assert_eq!(order["financials"]["employee_share"], 10_000);

    let id = order["id"].as_i64().unwrap();
    let response = patch_order(
        &pool,
        &cookie,
        id,
        serde_json::json!({ "total_price": 30_000 }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let detail = body_json(response).await["data"].clone();
    assert_eq!(detail["employee_id"], writer.id);
    assert_eq!(detail["financials"]["employee_share"], 15_000);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn cancelled_orders_cannot_be_edited(pool: PgPool) {
    let student = create_student(&pool, "e3@example.com").await;
    let service = create_service(&pool, "poster", 9_000).await;
    let cookie = admin_cookie(&pool).await;
    let order = create_order(
        &pool,
        &cookie,
        serde_json::json!({
            "student_id": student.id,
            "service_id": service.id,
            "title": "Poster",
        }),
    )
    .await;
    let id = order["id"].as_i64().unwrap();
    assert_eq!(change_status(&pool, &cookie, id, "CANCELLED").await.status(), StatusCode::OK);

    let response = patch_order(
        &pool,
        &cookie,
        id,
        serde_json::json!({ "total_price": 1_000 }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
    assert_eq!(body_json(response).await["code"], "CONFLICT");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn blank_titles_are_rejected(pool: PgPool) {
    let student = create_student(&pool, "e4@example.com").await;
    let service = create_service(&pool, "memo", 5_000).await;
    let cookie = admin_cookie(&pool).await;

    let body = serde_json::json!({
        "student_id": student.id,
        "service_id": service.id,
        "title": "   ",
    });
    let response = post_json_auth(
        build_test_app(pool.clone()),
        "/api/admin/orders",
        body,
        &cookie,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let order = create_order(
        &pool,
        &cookie,
        serde_json::json!({
            "student_id": student.id,
            "service_id": service.id,
            "title": "  Memo  ",
        }),
    )
    .await;
    assert_eq!(order["title"], "Memo");

    let id = order["id"].as_i64().unwrap();
    let response = patch_order(&pool, &cookie, id, serde_json::json!({ "title": " \t " })).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn prices_beyond_the_money_ceiling_are_rejected(pool: PgPool) {
    let student = create_student(&pool, "e5@example.com").await;
    let service = create_service(&pool, "huge", 5_000).await;
    let cookie = admin_cookie(&pool).await;

    let body = serde_json::json!({
        "student_id": student.id,
        "service_id": service.id,
        "title": "Huge",
        "total_price": 10_000_000_000_000_000_i64,
    });
    let response = post_json_auth(build_test_app(pool), "/api/admin/orders", body, &cookie).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn order_without_payments_can_be_deleted(pool: PgPool) {
    let student = create_student(&pool, "e6@example.com").await;
    let service = create_service(&pool, "quiz", 3_000).await;
    let cookie = admin_cookie(&pool).await;
    let order = create_order(
        &pool,
        &cookie,
        serde_json::json!({ "student_id": student.id, "service_id": service.id, "title": "Quiz" }),
    )
    .await;
    let uri = format!("/api/admin/orders/{}", order["id"]);

    let response = delete_auth(build_test_app(pool.clone()), &uri, &cookie).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = get_auth(build_test_app(pool.clone()), &uri, &cookie).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = delete_auth(build_test_app(pool), &uri, &cookie).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn moving_back_to_pending_keeps_the_note(pool: PgPool) {
    let student = create_student(&pool, "e7@example.com").await;
    let service = create_service(&pool, "lab", 12_000).await;
    let writer = create_employee(&pool, "lab-writer", None, None).await;
    let cookie = admin_cookie(&pool).await;
    let order = create_order(
        &pool,
        &cookie,
        serde_json::json!({
            "student_id": student.id,
            "service_id": service.id,
            "employee_id": writer.id,
            "title": "Lab report",
        }),
    )
    .await;
    let id = order["id"].as_i64().unwrap();

    let response = post_json_auth(
        build_test_app(pool.clone()),
        &format!("/api/admin/orders/{id}/status"),
        serde_json::json!({ "status": "PENDING", "note": "writer is on leave" }),
        &cookie,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let detail = body_json(response).await["data"].clone();
    assert!(detail["employee_id"].is_null());

    let events = detail["events"].as_array().unwrap();
    let last = events.last().unwrap();
    assert_eq!(last["to_status"], "PENDING");
    assert_eq!(last["note"], "writer is on leave");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn list_search_accepts_order_numbers(pool: PgPool) {
    let student = create_student(&pool, "e8@example.com").await;
    let service = create_service(&pool, "notes", 4_000).await;
    let cookie = admin_cookie(&pool).await;
    let mut numbers = Vec::new();
    for title in ["Alpha", "Beta"] {
        let order = create_order(
            &pool,
            &cookie,
            serde_json::json!({
                "student_id": student.id,
                "service_id": service.id,
                "title": title,
            }),
        )
        .await;
        numbers.push(order["order_number"].as_str().unwrap().to_string());
    }

    let uri = format!("/api/admin/orders?search={}", numbers[1]);
    let response = get_auth(build_test_app(pool), &uri, &cookie).await;
    let found = body_json(response).await["data"].clone();
    let found = found.as_array().unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0]["order_number"], numbers[1].as_str());
    assert_eq!(found[0]["title"], "Beta");
}

// ---------------------------------------------------------------------------
// Public intake
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn intake_creates_pending_order_and_student(pool: PgPool) {
    let service = create_service(&pool, "research", 70_000).await;
    let referrer = create_employee(&pool, "promoter", None, Some("SARA5")).await;

    let body = serde_json::json!({
        "name": "Omar",
        "email": "Omar@Example.com",
        "service_id": service.id,
        "title": "Research proposal",
        "referral_code": "sara5",
    });
    let response = post_json(build_test_app(pool.clone()), "/api/orders", body).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let receipt = body_json(response).await["data"].clone();
    assert_eq!(receipt["status"], "PENDING");
    assert!(receipt["order_number"].as_str().unwrap().starts_with("ORD-"));

    let student = scriptum_db::repositories::StudentRepo::find_by_email(&pool, "omar@example.com")
        .await
        .unwrap()
        .expect("student created from intake");

    let cookie = admin_cookie(&pool).await;
    let response = get_auth(
        build_test_app(pool),
        &format!("/api/admin/orders?student_id={}", student.id),
        &cookie,
    )
    .await;
    let orders = body_json(response).await["data"].clone();
    assert_eq!(orders.as_array().unwrap().len(), 1);
    assert_eq!(orders[0]["referrer_id"], referrer.id);
    assert_eq!(orders[0]["total_price"], 70_000);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn intake_rejects_unknown_referral_code(pool: PgPool) {
    let service = create_service(&pool, "translation", 30_000).await;

    let body = serde_json::json!({
        "name": "Nour",
        "email": "nour@example.com",
        "service_id": service.id,
        "title": "Translate abstract",
        "referral_code": "NOPE",
    });
    let response = post_json(build_test_app(pool), "/api/orders", body).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn intake_rejects_blank_title_before_creating_student(pool: PgPool) {
    let service = create_service(&pool, "abstract", 8_000).await;
    let cookie = admin_cookie(&pool).await;

    let body = serde_json::json!({
        "name": "Lina",
        "email": "lina@example.com",
        "service_id": service.id,
        "title": "    ",
    });
    let response = post_json(build_test_app(pool.clone()), "/api/orders", body).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = get_auth(build_test_app(pool), "/api/admin/students", &cookie).await;
    let students = body_json(response).await["data"].clone();
    assert!(students.as_array().unwrap().is_empty());
}

#[sqlx::test(migrations = "../db/migrations")]
async fn intake_can_be_closed(pool: PgPool) {
    let service = create_service(&pool, "poster", 12_000).await;
    let cookie = admin_cookie(&pool).await;

    let response = patch_json_auth(
        build_test_app(pool.clone()),
        "/api/admin/settings",
        serde_json::json!({ "order_intake_enabled": false }),
        &cookie,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = serde_json::json!({
        "name": "Rami",
        "email": "rami@example.com",
        "service_id": service.id,
        "title": "Poster",
    });
    let response = post_json(build_test_app(pool), "/api/orders", body).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

// ---------------------------------------------------------------------------
// Employee dashboard
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn dashboard_is_scoped_to_the_assignee(pool: PgPool) {
    let student = create_student(&pool, "s10@example.com").await;
    let service = create_service(&pool, "analysis", 40_000).await;
    let (mine, my_cookie) = employee_with_cookie(&pool, "maya").await;
    let other = create_employee(&pool, "other", None, None).await;
    let admin = admin_cookie(&pool).await;

    let my_order = create_order(
        &pool,
        &admin,
        serde_json::json!({
            "student_id": student.id,
            "service_id": service.id,
            "employee_id": mine.id,
            "title": "Mine",
        }),
    )
    .await;
    let their_order = create_order(
        &pool,
        &admin,
        serde_json::json!({
            "student_id": student.id,
            "service_id": service.id,
            "employee_id": other.id,
            "title": "Theirs",
        }),
    )
    .await;

    let response = get_auth(
        build_test_app(pool.clone()),
        "/api/dashboard/orders",
        &my_cookie,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let listed = body_json(response).await["data"].clone();
    assert_eq!(listed.as_array().unwrap().len(), 1);
    assert_eq!(listed[0]["id"], my_order["id"]);

    let response = get_auth(
        build_test_app(pool.clone()),
        &format!("/api/dashboard/orders/{}", their_order["id"]),
        &my_cookie,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = get_auth(
        build_test_app(pool),
        &format!("/api/dashboard/orders/{}", my_order["id"]),
        &my_cookie,
    )
    .await;
    let detail = body_json(response).await["data"].clone();
    assert_eq!(detail["employee_share"], 20_000);
    assert!(detail.get("total_price").is_none());
}

#[sqlx::test(migrations = "../db/migrations")]
async fn assignee_can_start_and_deliver_but_not_complete(pool: PgPool) {
    let student = create_student(&pool, "s11@example.com").await;
    let service = create_service(&pool, "methods", 40_000).await;
    let (me, cookie) = employee_with_cookie(&pool, "yara").await;
    let admin = admin_cookie(&pool).await;
    let order = create_order(
        &pool,
        &admin,
        serde_json::json!({
            "student_id": student.id,
            "service_id": service.id,
            "employee_id": me.id,
            "title": "Methods chapter",
        }),
    )
    .await;
    let uri = format!("/api/dashboard/orders/{}/status", order["id"]);

    for status in ["IN_PROGRESS", "DELIVERED"] {
        let response = post_json_auth(
            build_test_app(pool.clone()),
            &uri,
            serde_json::json!({ "status": status }),
            &cookie,
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK, "{status}");
    }

    let response = post_json_auth(
        build_test_app(pool.clone()),
        &uri,
        serde_json::json!({ "status": "COMPLETED" }),
        &cookie,
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    // Earnings count only completed work, so nothing yet.
    let response = get_auth(build_test_app(pool), "/api/dashboard/earnings", &cookie).await;
    assert_eq!(response.status(), StatusCode::OK);
    let earnings = body_json(response).await["data"].clone();
    assert_eq!(earnings["employee_id"], me.id);
}
