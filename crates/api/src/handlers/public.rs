//! Unauthenticated endpoints used by the marketing site: the service
//! catalogue, the blog, public settings and the order intake form.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;
use validator::Validate;

use scriptum_core::error::CoreError;
use scriptum_core::finance::{price_order, PricingInput};
use scriptum_core::order::OrderStatus;
use scriptum_core::validation::{blank_to_none, validate_required};
use scriptum_db::models::order::{IntakeReceipt, NewOrder, OrderIntake};
use scriptum_db::models::settings::PublicSettings;
use scriptum_db::models::student::{CreateStudent, Student};
use scriptum_db::repositories::{
    BlogPostRepo, EmployeeRepo, OrderRepo, ServiceRepo, SettingsRepo, StudentRepo,
};
use scriptum_db::DbPool;

use super::orders::referrer_rate;
use crate::error::{AppError, AppResult};
use crate::query::PaginationParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// `?tag=` filter for the public blog list.
#[derive(Debug, Default, Deserialize)]
pub struct BlogListParams {
    pub tag: Option<String>,
}

// ---------------------------------------------------------------------------
// Catalogue and content
// ---------------------------------------------------------------------------

/// GET /api/services
pub async fn list_services(
    State(state): State<AppState>,
    Query(page): Query<PaginationParams>,
) -> AppResult<impl IntoResponse> {
    let (limit, offset) = page.resolve();
    let services = ServiceRepo::list(&state.pool, false, limit, offset).await?;
    Ok(Json(DataResponse { data: services }))
}

/// GET /api/services/{slug}
pub async fn get_service(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> AppResult<impl IntoResponse> {
    let service = ServiceRepo::find_active_by_slug(&state.pool, &slug)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Service '{slug}' not found")))?;
    Ok(Json(DataResponse { data: service }))
}

/// GET /api/blog?tag=
pub async fn list_posts(
    State(state): State<AppState>,
    Query(page): Query<PaginationParams>,
    Query(params): Query<BlogListParams>,
) -> AppResult<impl IntoResponse> {
    let (limit, offset) = page.resolve();
    let tag = blank_to_none(params.tag);
    let posts = BlogPostRepo::list(&state.pool, true, tag.as_deref(), limit, offset).await?;
    Ok(Json(DataResponse { data: posts }))
}

/// GET /api/blog/{slug}
pub async fn get_post(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> AppResult<impl IntoResponse> {
    let post = BlogPostRepo::find_published_by_slug(&state.pool, &slug)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Post '{slug}' not found")))?;
    Ok(Json(DataResponse { data: post }))
}

/// GET /api/settings
pub async fn get_settings(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let settings = SettingsRepo::get(&state.pool).await?;
    Ok(Json(DataResponse {
        data: PublicSettings::from(settings),
    }))
}

// ---------------------------------------------------------------------------
// Order intake
// ---------------------------------------------------------------------------

/// POST /api/orders
///
/// Creates a `PENDING` order priced at the service's base price. The
/// student is matched by email or created. An unknown referral code is
/// rejected so a typo does not silently lose the referrer their commission.
pub async fn submit_order(
    State(state): State<AppState>,
    Json(input): Json<OrderIntake>,
) -> AppResult<impl IntoResponse> {
    let settings = SettingsRepo::get(&state.pool).await?;
    if !settings.order_intake_enabled {
        return Err(AppError::Core(CoreError::Forbidden(
            "Online ordering is currently closed".into(),
        )));
    }

    input.validate()?;

    let service = ServiceRepo::find_by_id(&state.pool, input.service_id)
        .await?
        .filter(|s| s.is_active)
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Service",
            id: input.service_id,
        }))?;

    let referrer = match blank_to_none(input.referral_code.clone()) {
        Some(code) => Some(
            EmployeeRepo::find_active_referrer_by_code(&state.pool, &code)
                .await?
                .ok_or_else(|| {
                    AppError::Core(CoreError::Validation(format!(
                        "Unknown referral code '{code}'"
                    )))
                })?,
        ),
        None => None,
    };

    let title = validate_required("title", &input.title, 300)?;
    let student = find_or_create_student(&state.pool, &input).await?;

    let financials = price_order(PricingInput {
        total_price: service.base_price,
        discount: 0,
        referrer_rate_bps: referrer.as_ref().map(|r| referrer_rate(r, &settings)),
        employee_rate_bps: None,
    })?;

    let new_order = NewOrder {
        student_id: student.id,
        service_id: service.id,
        employee_id: None,
        referrer_id: referrer.as_ref().map(|r| r.id),
        title,
        description: blank_to_none(input.description),
        deadline: input.deadline,
        status: OrderStatus::Pending.as_str().to_string(),
        total_price: service.base_price,
        discount: 0,
        financials,
        installments: Vec::new(),
        notes: None,
    };
    let order = OrderRepo::create(&state.pool, &new_order, None).await?;

    tracing::info!(
        order_id = order.id,
        student_id = student.id,
        service_id = service.id,
        referrer_id = ?order.referrer_id,
        "Order submitted through intake",
    );

    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: IntakeReceipt {
                order_number: order.order_number(),
                status: order.status,
            },
        }),
    ))
}

/// Match the student by email (case-insensitive) or create them.
///
/// Two submissions racing on the same new email both end up with the row
/// the first one inserted.
async fn find_or_create_student(pool: &DbPool, input: &OrderIntake) -> AppResult<Student> {
    let email = input.email.trim().to_lowercase();
    if let Some(student) = StudentRepo::find_by_email(pool, &email).await? {
        return Ok(student);
    }

    let create = CreateStudent {
        name: validate_required("name", &input.name, 200)?,
        email: email.clone(),
        phone: blank_to_none(input.phone.clone()),
        country: blank_to_none(input.country.clone()),
        university: blank_to_none(input.university.clone()),
        notes: None,
    };

    match StudentRepo::create(pool, &create).await {
        Ok(student) => {
            tracing::info!(student_id = student.id, "Student created from intake");
            Ok(student)
        }
        Err(sqlx::Error::Database(db_err)) if db_err.constraint() == Some("uq_students_email") => {
            StudentRepo::find_by_email(pool, &email)
                .await?
                .ok_or_else(|| AppError::InternalError("Student vanished after conflict".into()))
        }
        Err(e) => Err(e.into()),
    }
}
