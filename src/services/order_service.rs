use chrono::Utc;
use sea_orm::ActiveValue::NotSet;
use sea_orm::sea_query::{Expr, LockType};
use sea_orm::{
    ActiveEnum, ActiveModelTrait, ColumnTrait, ConnectionTrait, DbBackend, DbErr, EntityTrait,
    FromQueryResult, PaginatorTrait, QueryFilter, QuerySelect, Set, SqlErr, Statement,
    TransactionTrait,
};

use crate::{
    audit,
    dto::orders::{MyOrderList, NegotiationList, SubmitOrderRequest, SubmitOrderResponse},
    entity::{
        food_items::{Column as FoodCol, Entity as FoodItems, FoodKind, FoodStatus},
        orders::{ActiveModel as OrderActive, Column as OrderCol, Entity as Orders, OrderStatus},
        users::{Column as UserCol, Entity as Users},
    },
    error::{AppError, AppResult},
    lifecycle::{OrderError, Participant, StatisticsCredit, Transition, decide_placement},
    middleware::auth::AuthUser,
    models::{MyOrder, Negotiation, Order, OrderDetail},
    money::Money,
    response::ApiResponse,
    routes::params::{MyOrdersQuery, NegotiationQuery},
    state::AppState,
};

/// Places an order for a food item on behalf of the caller.
///
/// Runs in one transaction holding a row lock on the food item, so two
/// submissions for the same item never both see it available.
pub async fn submit_order(
    state: &AppState,
    user: &AuthUser,
    payload: SubmitOrderRequest,
) -> AppResult<SubmitOrderResponse> {
    let food_item_id = payload
        .food_item_id
        .ok_or_else(|| AppError::missing_field("food_item_id"))?;

    let txn = state.orm.begin().await?;

    let food = FoodItems::find_by_id(food_item_id)
        .lock(LockType::Update)
        .one(&txn)
        .await?
        .filter(|food| food.status == FoodStatus::Available)
        .ok_or(OrderError::NotAvailable)?;

    if food.provider_id == user.user_id {
        return Err(OrderError::SelfOrderForbidden.into());
    }

    if food.kind == FoodKind::Jualan {
        let in_progress = Orders::find()
            .filter(OrderCol::FoodItemId.eq(food.id))
            .filter(OrderCol::Status.is_in(OrderStatus::ACTIVE))
            .count(&txn)
            .await?;
        if in_progress > 0 {
            return Err(OrderError::AlreadyProcessing.into());
        }
    }

    // Sale items go at the listed price; whatever was offered is not looked at.
    let offered = match food.kind {
        FoodKind::Jualan => None,
        FoodKind::Donasi => payload
            .order_amount
            .as_ref()
            .map(|amount| amount.validate("order_amount"))
            .transpose()?,
    };

    let listed = stored_money(food.price_patungan)?;
    let placement = decide_placement(food.kind, listed, offered)
        .ok_or_else(|| AppError::missing_field("order_amount"))?;

    let order = OrderActive {
        id: NotSet,
        food_item_id: Set(food.id),
        user_id: Set(user.user_id),
        order_amount: Set(placement.amount.get()),
        status: Set(placement.status),
        created_at: NotSet,
        updated_at: NotSet,
    }
    .insert(&txn)
    .await
    .map_err(holder_conflict)?;

    if placement.status == OrderStatus::Confirmed {
        claim_food_item(&txn, food.id).await?;
        credit_consumer(
            &txn,
            user.user_id,
            StatisticsCredit::new(placement.amount, food.weight),
        )
        .await?;
    }

    txn.commit().await?;

    tracing::info!(
        order_id = order.id,
        food_item_id = food.id,
        consumer_id = user.user_id,
        status = ?placement.status,
        amount = %placement.amount,
        "order submitted"
    );
    audit::record(
        state,
        user.user_id,
        "order_submit",
        "orders",
        serde_json::json!({
            "order_id": order.id,
            "food_item_id": food.id,
            "status": placement.status,
            "order_amount": placement.amount,
        }),
    )
    .await;

    Ok(SubmitOrderResponse::new(
        placement.message(),
        order.into(),
        placement.is_negotiation(),
    ))
}

/// Moves an existing order along one edge of its lifecycle.
///
/// The order row is locked and its status update is guarded by the expected
/// prior status. Payment confirmation also claims the food item and credits
/// the consumer inside the same transaction.
pub async fn apply_transition(
    state: &AppState,
    user: &AuthUser,
    order_id: i64,
    transition: Transition,
) -> AppResult<ApiResponse<Order>> {
    let txn = state.orm.begin().await?;

    let order = Orders::find_by_id(order_id)
        .lock(LockType::Update)
        .one(&txn)
        .await?
        .ok_or(OrderError::NotFoundOrWrongState)?;
    let food = FoodItems::find_by_id(order.food_item_id)
        .one(&txn)
        .await?
        .ok_or(OrderError::NotFoundOrWrongState)?;

    let participant = Participant::of(user.user_id, order.user_id, food.provider_id)
        .filter(|participant| transition.permits(*participant))
        .ok_or(OrderError::NotParticipant)?;

    let from_states = transition.from_states();
    if !from_states.contains(&order.status) {
        return Err(OrderError::NotFoundOrWrongState.into());
    }

    let result = Orders::update_many()
        .col_expr(OrderCol::Status, Expr::value(transition.target()))
        .col_expr(OrderCol::UpdatedAt, Expr::value(Utc::now()))
        .filter(OrderCol::Id.eq(order.id))
        .filter(OrderCol::Status.is_in(from_states.iter().copied()))
        .exec(&txn)
        .await
        .map_err(holder_conflict)?;
    if result.rows_affected != 1 {
        return Err(OrderError::NotFoundOrWrongState.into());
    }

    if transition.claims_item() {
        claim_food_item(&txn, food.id).await?;
        let amount = stored_money(order.order_amount)?;
        credit_consumer(&txn, order.user_id, StatisticsCredit::new(amount, food.weight)).await?;
    }

    let updated = Orders::find_by_id(order.id)
        .one(&txn)
        .await?
        .ok_or(OrderError::NotFoundOrWrongState)?;

    txn.commit().await?;

    tracing::info!(
        order_id = updated.id,
        actor_id = user.user_id,
        ?participant,
        ?transition,
        from = ?order.status,
        to = ?updated.status,
        "order transitioned"
    );
    audit::record(
        state,
        user.user_id,
        transition.audit_action(),
        "orders",
        serde_json::json!({
            "order_id": updated.id,
            "from": order.status,
            "to": updated.status,
        }),
    )
    .await;

    Ok(ApiResponse::success(
        transition.success_message(),
        updated.into(),
    ))
}

pub async fn get_order_detail(
    state: &AppState,
    user: &AuthUser,
    order_id: i64,
) -> AppResult<ApiResponse<OrderDetail>> {
    let sql = r#"
        SELECT o.id, o.food_item_id, o.user_id, o.order_amount, o.status, o.created_at,
            f.name AS food_name,
            f.image_url AS food_image,
            f.price_patungan,
            f.location_address,
            f.location_details,
            f.availability,
            f.weight AS food_weight,
            f.provider_id,
            p.name AS provider_name,
            p.avatar AS provider_avatar,
            p.rating AS provider_rating,
            p.reviews_count AS provider_reviews,
            c.name AS customer_name,
            c.avatar AS customer_avatar,
            c.rating AS customer_rating,
            c.reviews_count AS customer_reviews
        FROM orders o
        JOIN food_items f ON o.food_item_id = f.id
        JOIN users p ON f.provider_id = p.id
        JOIN users c ON o.user_id = c.id
        WHERE o.id = $1
    "#;
    let detail = OrderDetail::find_by_statement(Statement::from_sql_and_values(
        DbBackend::Postgres,
        sql,
        [order_id.into()],
    ))
    .one(&state.orm)
    .await?
    .ok_or_else(|| AppError::not_found("Order"))?;

    if Participant::of(user.user_id, detail.user_id, detail.provider_id).is_none() {
        return Err(AppError::Forbidden);
    }

    Ok(ApiResponse::data(detail))
}

/// The caller's orders as a consumer, newest first.
pub async fn list_my_orders(
    state: &AppState,
    user: &AuthUser,
    query: MyOrdersQuery,
) -> AppResult<ApiResponse<MyOrderList>> {
    let sql = r#"
        SELECT o.id, o.food_item_id, o.user_id, o.order_amount, o.status, o.created_at,
            f.name AS food_name,
            f.image_url AS food_image,
            f.price_patungan,
            p.name AS provider_name,
            p.avatar AS provider_avatar,
            p.rating AS provider_rating,
            p.reviews_count AS provider_reviews
        FROM orders o
        JOIN food_items f ON o.food_item_id = f.id
        JOIN users p ON f.provider_id = p.id
        WHERE o.user_id = $1 AND ($2::text IS NULL OR o.status = $2::text)
        ORDER BY o.created_at DESC, o.id DESC
    "#;
    let status = query.status.map(|status| status.to_value());
    let items = MyOrder::find_by_statement(Statement::from_sql_and_values(
        DbBackend::Postgres,
        sql,
        [user.user_id.into(), status.into()],
    ))
    .all(&state.orm)
    .await?;

    Ok(ApiResponse::data(MyOrderList { items }))
}

/// Offers on one of the caller's listings. Cancelled offers are left out.
pub async fn list_negotiations(
    state: &AppState,
    user: &AuthUser,
    query: NegotiationQuery,
) -> AppResult<ApiResponse<NegotiationList>> {
    let food_item_id = query
        .food_item_id
        .ok_or_else(|| AppError::missing_field("food_item_id"))?;

    let food = FoodItems::find_by_id(food_item_id)
        .one(&state.orm)
        .await?
        .ok_or_else(|| AppError::not_found("Food item"))?;
    if food.provider_id != user.user_id {
        return Err(AppError::Forbidden);
    }

    let sql = r#"
        SELECT o.id, o.food_item_id, o.user_id, o.order_amount, o.status, o.created_at,
            u.name AS user_name,
            u.avatar AS user_avatar,
            u.rating AS user_rating,
            u.reviews_count AS user_reviews
        FROM orders o
        JOIN users u ON o.user_id = u.id
        WHERE o.food_item_id = $1
          AND o.status IN ('pending', 'approved', 'confirmed', 'completed')
        ORDER BY o.created_at DESC, o.id DESC
    "#;
    let items = Negotiation::find_by_statement(Statement::from_sql_and_values(
        DbBackend::Postgres,
        sql,
        [food.id.into()],
    ))
    .all(&state.orm)
    .await?;

    Ok(ApiResponse::data(NegotiationList { items }))
}

/// Flips the item from available to ordered, failing if another order got there first.
async fn claim_food_item<C: ConnectionTrait>(conn: &C, food_item_id: i64) -> AppResult<()> {
    let result = FoodItems::update_many()
        .col_expr(FoodCol::Status, Expr::value(FoodStatus::Ordered))
        .col_expr(FoodCol::UpdatedAt, Expr::value(Utc::now()))
        .filter(FoodCol::Id.eq(food_item_id))
        .filter(FoodCol::Status.eq(FoodStatus::Available))
        .exec(conn)
        .await?;
    if result.rows_affected == 0 {
        return Err(OrderError::NotAvailable.into());
    }
    Ok(())
}

async fn credit_consumer<C: ConnectionTrait>(
    conn: &C,
    consumer_id: i64,
    credit: StatisticsCredit,
) -> AppResult<()> {
    let result = Users::update_many()
        .col_expr(
            UserCol::TotalSavings,
            Expr::col(UserCol::TotalSavings).add(credit.savings),
        )
        .col_expr(
            UserCol::TotalWasteSaved,
            Expr::col(UserCol::TotalWasteSaved).add(credit.waste_grams),
        )
        .filter(UserCol::Id.eq(consumer_id))
        .exec(conn)
        .await?;
    if result.rows_affected != 1 {
        return Err(AppError::Internal(anyhow::anyhow!(
            "consumer {consumer_id} missing while crediting statistics"
        )));
    }
    Ok(())
}

fn stored_money(amount: i64) -> AppResult<Money> {
    Money::new(amount)
        .map_err(|err| AppError::Internal(anyhow::anyhow!("stored amount {amount}: {err}")))
}

/// The one-holder index firing means another order claimed the item.
fn holder_conflict(err: DbErr) -> AppError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => OrderError::NotAvailable.into(),
        _ => err.into(),
    }
}
