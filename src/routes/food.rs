use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    routing::get,
};

use crate::{
    dto::food::{
        CreateFoodItemRequest, CreatedFoodItem, FoodListingList, MyFoodItemList,
        UpdateFoodItemRequest,
    },
    error::AppResult,
    middleware::{auth::AuthUser, extract::{JsonBody, PathParam}},
    models::{FoodDetail, FoodItem},
    response::{ApiResponse, ErrorResponse},
    services::food_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_available).post(create_food_item))
        .route("/mine", get(list_mine))
        .route(
            "/{id}",
            get(get_food_item)
                .put(update_food_item)
                .delete(delete_food_item),
        )
}

#[utoipa::path(
    get,
    path = "/api/food-items",
    responses(
        (status = 200, description = "Available food, newest first", body = ApiResponse<FoodListingList>)
    ),
    tag = "Food"
)]
pub async fn list_available(
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<FoodListingList>>> {
    let resp = food_service::list_available(&state).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/food-items/mine",
    responses(
        (status = 200, description = "The caller's listings", body = ApiResponse<MyFoodItemList>)
    ),
    security(("bearer_auth" = [])),
    tag = "Food"
)]
pub async fn list_mine(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<ApiResponse<MyFoodItemList>>> {
    let resp = food_service::list_mine(&state, &user).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/food-items/{id}",
    params(
        ("id" = i64, Path, description = "Food item ID")
    ),
    responses(
        (status = 200, description = "Food item with provider details", body = ApiResponse<FoodDetail>),
        (status = 404, description = "Food item not found", body = ErrorResponse),
    ),
    tag = "Food"
)]
pub async fn get_food_item(
    PathParam(id): PathParam<i64>,
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<FoodDetail>>> {
    let resp = food_service::get_food_item(&state, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/food-items",
    request_body = CreateFoodItemRequest,
    responses(
        (status = 201, description = "Food item created", body = ApiResponse<CreatedFoodItem>),
        (status = 400, description = "Invalid listing", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Food"
)]
pub async fn create_food_item(
    State(state): State<AppState>,
    user: AuthUser,
    JsonBody(payload): JsonBody<CreateFoodItemRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<CreatedFoodItem>>)> {
    let resp = food_service::create_food_item(&state, &user, payload).await?;
    Ok((StatusCode::CREATED, Json(resp)))
}

#[utoipa::path(
    put,
    path = "/api/food-items/{id}",
    params(
        ("id" = i64, Path, description = "Food item ID")
    ),
    request_body = UpdateFoodItemRequest,
    responses(
        (status = 200, description = "Food item updated", body = ApiResponse<FoodItem>),
        (status = 403, description = "Not the provider", body = ErrorResponse),
        (status = 404, description = "Food item not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Food"
)]
pub async fn update_food_item(
    State(state): State<AppState>,
    user: AuthUser,
    PathParam(id): PathParam<i64>,
    JsonBody(payload): JsonBody<UpdateFoodItemRequest>,
) -> AppResult<Json<ApiResponse<FoodItem>>> {
    let resp = food_service::update_food_item(&state, &user, id, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    delete,
    path = "/api/food-items/{id}",
    params(
        ("id" = i64, Path, description = "Food item ID")
    ),
    responses(
        (status = 200, description = "Food item deleted"),
        (status = 400, description = "Food item has orders", body = ErrorResponse),
        (status = 403, description = "Not the provider", body = ErrorResponse),
        (status = 404, description = "Food item not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Food"
)]
pub async fn delete_food_item(
    State(state): State<AppState>,
    user: AuthUser,
    PathParam(id): PathParam<i64>,
) -> AppResult<Json<ApiResponse<()>>> {
    let resp = food_service::delete_food_item(&state, &user, id).await?;
    Ok(Json(resp))
}
