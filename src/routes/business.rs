use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    routing::{get, post},
};

use crate::{
    dto::business::{BusinessStatus, RegisterBusinessRequest},
    error::AppResult,
    middleware::{auth::AuthUser, extract::JsonBody},
    models::BusinessInfo,
    response::{ApiResponse, ErrorResponse},
    services::business_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/register", post(register_business))
        .route("/status", get(business_status))
}

#[utoipa::path(
    post,
    path = "/api/business-donor/register",
    request_body = RegisterBusinessRequest,
    responses(
        (status = 201, description = "Registered as business donor", body = ApiResponse<BusinessInfo>),
        (status = 400, description = "Missing field or already registered", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Business donors"
)]
pub async fn register_business(
    State(state): State<AppState>,
    user: AuthUser,
    JsonBody(payload): JsonBody<RegisterBusinessRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<BusinessInfo>>)> {
    let resp = business_service::register(&state, &user, payload).await?;
    Ok((StatusCode::CREATED, Json(resp)))
}

#[utoipa::path(
    get,
    path = "/api/business-donor/status",
    responses(
        (status = 200, description = "Business donor status", body = ApiResponse<BusinessStatus>)
    ),
    security(("bearer_auth" = [])),
    tag = "Business donors"
)]
pub async fn business_status(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<ApiResponse<BusinessStatus>>> {
    let resp = business_service::status(&state, &user).await?;
    Ok(Json(resp))
}
