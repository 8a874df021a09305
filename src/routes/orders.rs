use axum::{
    Json, Router,
    extract::State,
    routing::{get, post, put},
};

use crate::{
    dto::orders::{MyOrderList, NegotiationList, SubmitOrderRequest, SubmitOrderResponse},
    error::AppResult,
    lifecycle::Transition,
    middleware::{auth::AuthUser, extract::{JsonBody, PathParam, QueryParams}},
    models::{Order, OrderDetail},
    response::{ApiResponse, ErrorResponse},
    routes::params::{MyOrdersQuery, NegotiationQuery},
    services::order_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(submit_order))
        .route("/mine", get(list_my_orders))
        .route("/negotiations", get(list_negotiations))
        .route("/{id}", get(get_order).post(confirm_payment))
        .route("/{id}/approve", put(approve_order))
        .route("/{id}/reject", put(reject_order))
        .route("/{id}/complete", put(complete_order))
        .route("/{id}/cancel", put(cancel_order))
}

#[utoipa::path(
    post,
    path = "/api/orders",
    request_body = SubmitOrderRequest,
    responses(
        (status = 200, description = "Order placed or negotiation sent", body = SubmitOrderResponse),
        (status = 400, description = "Unavailable, own listing, already processing or invalid amount", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Orders"
)]
pub async fn submit_order(
    State(state): State<AppState>,
    user: AuthUser,
    JsonBody(payload): JsonBody<SubmitOrderRequest>,
) -> AppResult<Json<SubmitOrderResponse>> {
    let resp = order_service::submit_order(&state, &user, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/orders/mine",
    params(MyOrdersQuery),
    responses(
        (status = 200, description = "The caller's orders", body = ApiResponse<MyOrderList>)
    ),
    security(("bearer_auth" = [])),
    tag = "Orders"
)]
pub async fn list_my_orders(
    State(state): State<AppState>,
    user: AuthUser,
    QueryParams(query): QueryParams<MyOrdersQuery>,
) -> AppResult<Json<ApiResponse<MyOrderList>>> {
    let resp = order_service::list_my_orders(&state, &user, query).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/orders/negotiations",
    params(NegotiationQuery),
    responses(
        (status = 200, description = "Offers on one of the caller's listings", body = ApiResponse<NegotiationList>),
        (status = 400, description = "food_item_id missing", body = ErrorResponse),
        (status = 403, description = "Not the provider", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Orders"
)]
pub async fn list_negotiations(
    State(state): State<AppState>,
    user: AuthUser,
    QueryParams(query): QueryParams<NegotiationQuery>,
) -> AppResult<Json<ApiResponse<NegotiationList>>> {
    let resp = order_service::list_negotiations(&state, &user, query).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/orders/{id}",
    params(("id" = i64, Path, description = "Order ID")),
    responses(
        (status = 200, description = "Order with food and both parties", body = ApiResponse<OrderDetail>),
        (status = 403, description = "Not a party to the order", body = ErrorResponse),
        (status = 404, description = "Order not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Orders"
)]
pub async fn get_order(
    State(state): State<AppState>,
    user: AuthUser,
    PathParam(id): PathParam<i64>,
) -> AppResult<Json<ApiResponse<OrderDetail>>> {
    let resp = order_service::get_order_detail(&state, &user, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/orders/{id}",
    params(("id" = i64, Path, description = "Order ID")),
    responses(
        (status = 200, description = "Payment confirmed", body = ApiResponse<Order>),
        (status = 400, description = "Food item already taken", body = ErrorResponse),
        (status = 403, description = "Not the consumer", body = ErrorResponse),
        (status = 404, description = "Order not found or not approved", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Orders"
)]
pub async fn confirm_payment(
    State(state): State<AppState>,
    user: AuthUser,
    PathParam(id): PathParam<i64>,
) -> AppResult<Json<ApiResponse<Order>>> {
    transition(&state, &user, id, Transition::ConfirmPayment).await
}

#[utoipa::path(
    put,
    path = "/api/orders/{id}/approve",
    params(("id" = i64, Path, description = "Order ID")),
    responses(
        (status = 200, description = "Negotiation approved", body = ApiResponse<Order>),
        (status = 403, description = "Not the provider", body = ErrorResponse),
        (status = 404, description = "Order not found or not pending", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Orders"
)]
pub async fn approve_order(
    State(state): State<AppState>,
    user: AuthUser,
    PathParam(id): PathParam<i64>,
) -> AppResult<Json<ApiResponse<Order>>> {
    transition(&state, &user, id, Transition::Approve).await
}

#[utoipa::path(
    put,
    path = "/api/orders/{id}/reject",
    params(("id" = i64, Path, description = "Order ID")),
    responses(
        (status = 200, description = "Negotiation rejected", body = ApiResponse<Order>),
        (status = 403, description = "Not the provider", body = ErrorResponse),
        (status = 404, description = "Order not found or not pending", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Orders"
)]
pub async fn reject_order(
    State(state): State<AppState>,
    user: AuthUser,
    PathParam(id): PathParam<i64>,
) -> AppResult<Json<ApiResponse<Order>>> {
    transition(&state, &user, id, Transition::Reject).await
}

#[utoipa::path(
    put,
    path = "/api/orders/{id}/complete",
    params(("id" = i64, Path, description = "Order ID")),
    responses(
        (status = 200, description = "Order completed", body = ApiResponse<Order>),
        (status = 403, description = "Not a party to the order", body = ErrorResponse),
        (status = 404, description = "Order not found or not confirmed", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Orders"
)]
pub async fn complete_order(
    State(state): State<AppState>,
    user: AuthUser,
    PathParam(id): PathParam<i64>,
) -> AppResult<Json<ApiResponse<Order>>> {
    transition(&state, &user, id, Transition::Complete).await
}

#[utoipa::path(
    put,
    path = "/api/orders/{id}/cancel",
    params(("id" = i64, Path, description = "Order ID")),
    responses(
        (status = 200, description = "Order withdrawn by the consumer", body = ApiResponse<Order>),
        (status = 403, description = "Not the consumer", body = ErrorResponse),
        (status = 404, description = "Order not found or already confirmed", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Orders"
)]
pub async fn cancel_order(
    State(state): State<AppState>,
    user: AuthUser,
    PathParam(id): PathParam<i64>,
) -> AppResult<Json<ApiResponse<Order>>> {
    transition(&state, &user, id, Transition::Cancel).await
}

async fn transition(
    state: &AppState,
    user: &AuthUser,
    id: i64,
    transition: Transition,
) -> AppResult<Json<ApiResponse<Order>>> {
    let resp = order_service::apply_transition(state, user, id, transition).await?;
    Ok(Json(resp))
}
