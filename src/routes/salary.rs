use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
};

use crate::{
    dto::salary_dto::{ApiResponse, SubmitSalaryPayload, UpdateSalaryPayload},
    error::Result,
    extract::{json::ApiJson, path::ApiPath},
    services::salary_service::SubmitOutcome,
    AppState,
};

#[utoipa::path(
    post,
    path = "/user/salary",
    request_body = SubmitSalaryPayload,
    responses(
        (status = 201, description = "First submission for this email, record created", body = crate::models::salary_detail::SalaryDetail),
        (status = 200, description = "Returning submitter, local salary updated", body = crate::models::salary_detail::SalaryDetail),
        (status = 422, description = "Validation failed; `errors` maps fields to messages")
    ),
    tag = "Salary"
)]
#[axum::debug_handler]
pub async fn submit_salary(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<SubmitSalaryPayload>,
) -> Result<impl IntoResponse> {
    let (detail, outcome) = state.salary_service.submit_salary(payload).await?;
    let (status, message) = match outcome {
        SubmitOutcome::Created => (StatusCode::CREATED, "Salary details submitted successfully"),
        SubmitOutcome::Updated => (StatusCode::OK, "Salary details updated successfully"),
    };
    Ok((status, Json(ApiResponse::new(message, detail))))
}

#[utoipa::path(
    get,
    path = "/admin/salaries",
    responses(
        (status = 200, description = "Every salary record, ordered by user id", body = [crate::models::user::User])
    ),
    tag = "Admin"
)]
#[axum::debug_handler]
pub async fn list_salaries(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let users = state.salary_service.list_all().await?;
    Ok(Json(ApiResponse::new(
        "Salary records retrieved successfully",
        users,
    )))
}

#[utoipa::path(
    get,
    path = "/admin/salary/{user_id}",
    params(
        ("user_id" = i64, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "Salary record found", body = crate::models::user::User),
        (status = 404, description = "User not found"),
        (status = 422, description = "User id is not an integer")
    ),
    tag = "Admin"
)]
#[axum::debug_handler]
pub async fn get_salary(
    State(state): State<AppState>,
    ApiPath(user_id): ApiPath<i64>,
) -> Result<impl IntoResponse> {
    let user = state.salary_service.get_salary(user_id).await?;
    Ok(Json(ApiResponse::new("Salary record retrieved successfully", user)))
}

#[utoipa::path(
    put,
    path = "/admin/salary/{user_id}",
    params(
        ("user_id" = i64, Path, description = "User ID")
    ),
    request_body = UpdateSalaryPayload,
    responses(
        (status = 200, description = "Salary record updated", body = crate::models::user::User),
        (status = 404, description = "User not found"),
        (status = 422, description = "Validation failed")
    ),
    tag = "Admin"
)]
#[axum::debug_handler]
pub async fn update_salary(
    State(state): State<AppState>,
    ApiPath(user_id): ApiPath<i64>,
    ApiJson(payload): ApiJson<UpdateSalaryPayload>,
) -> Result<impl IntoResponse> {
    let user = state.salary_service.admin_update(user_id, payload).await?;
    Ok(Json(ApiResponse::new("Salary record updated successfully", user)))
}
