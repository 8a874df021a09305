use chrono::Utc;
use sea_orm::ActiveValue::NotSet;
use sea_orm::{
    ActiveModelTrait, DbBackend, EntityTrait, FromQueryResult, ModelTrait, PaginatorTrait, Set,
    Statement, TransactionTrait,
};
use sea_orm::sea_query::LockType;
use sea_orm::QuerySelect;

use crate::{
    audit,
    dto::food::{
        CreateFoodItemRequest, CreatedFoodItem, FoodListingList, MyFoodItemList,
        UpdateFoodItemRequest,
    },
    entity::{
        food_items::{ActiveModel as FoodActive, Entity as FoodItems, FoodStatus},
        orders::Entity as Orders,
    },
    error::{AppError, AppResult},
    middleware::auth::AuthUser,
    models::{FoodDetail, FoodItem, FoodListing, MyFoodItem},
    money::{AmountInput, Money},
    response::ApiResponse,
    state::AppState,
};

const LISTING_COLUMNS: &str = r#"
    f.id, f.provider_id, f.name, f.distance, f.availability, f.image_url,
    f.location_address, f.location_details, f.description_title, f.description_content,
    f.price_patungan, f.weight, f.status, f.type AS kind, f.created_at,
    u.name AS provider_name,
    u.avatar AS provider_avatar,
    u.rating AS provider_rating,
    u.reviews_count AS provider_reviews
"#;

/// Every available item, newest first.
pub async fn list_available(state: &AppState) -> AppResult<ApiResponse<FoodListingList>> {
    let sql = format!(
        "SELECT {LISTING_COLUMNS}
         FROM food_items f
         JOIN users u ON f.provider_id = u.id
         WHERE f.status = 'available'
         ORDER BY f.created_at DESC, f.id DESC"
    );
    let items = FoodListing::find_by_statement(Statement::from_string(DbBackend::Postgres, sql))
        .all(&state.orm)
        .await?;

    Ok(ApiResponse::data(FoodListingList { items }))
}

pub async fn get_food_item(state: &AppState, id: i64) -> AppResult<ApiResponse<FoodDetail>> {
    let sql = format!(
        "SELECT {LISTING_COLUMNS},
            u.bank_name AS provider_bank_name,
            u.account_number AS provider_account_number
         FROM food_items f
         JOIN users u ON f.provider_id = u.id
         WHERE f.id = $1"
    );
    let item = FoodDetail::find_by_statement(Statement::from_sql_and_values(
        DbBackend::Postgres,
        sql,
        [id.into()],
    ))
    .one(&state.orm)
    .await?
    .ok_or_else(|| AppError::not_found("Food item"))?;

    Ok(ApiResponse::data(item))
}

/// The caller's own listings in any status.
pub async fn list_mine(state: &AppState, user: &AuthUser) -> AppResult<ApiResponse<MyFoodItemList>> {
    let sql = r#"
        SELECT f.id, f.name, f.image_url, f.availability, f.price_patungan, f.weight,
            f.status, f.type AS kind, f.created_at,
            EXISTS (
                SELECT 1 FROM orders o
                WHERE o.food_item_id = f.id AND o.status = 'pending'
            ) AS has_pending_negotiations
        FROM food_items f
        WHERE f.provider_id = $1
        ORDER BY f.created_at DESC, f.id DESC
    "#;
    let items = MyFoodItem::find_by_statement(Statement::from_sql_and_values(
        DbBackend::Postgres,
        sql,
        [user.user_id.into()],
    ))
    .all(&state.orm)
    .await?;

    Ok(ApiResponse::data(MyFoodItemList { items }))
}

pub async fn create_food_item(
    state: &AppState,
    user: &AuthUser,
    payload: CreateFoodItemRequest,
) -> AppResult<ApiResponse<CreatedFoodItem>> {
    let name = required_name(payload.name)?;
    let price = required_price(payload.price_patungan.as_ref())?;
    let weight = required_weight(payload.weight)?;

    let item = FoodActive {
        id: NotSet,
        provider_id: Set(user.user_id),
        name: Set(name),
        distance: Set(payload.distance),
        availability: Set(payload.availability),
        image_url: Set(payload.image_url),
        location_address: Set(payload.location_address),
        location_details: Set(payload.location_details),
        description_title: Set(payload.description_title),
        description_content: Set(payload.description_content),
        price_patungan: Set(price.get()),
        weight: Set(weight),
        status: Set(FoodStatus::Available),
        kind: Set(payload.kind.unwrap_or_default()),
        created_at: NotSet,
        updated_at: NotSet,
    }
    .insert(&state.orm)
    .await?;

    tracing::info!(food_item_id = item.id, provider_id = user.user_id, "food item created");
    audit::record(
        state,
        user.user_id,
        "food_item_create",
        "food_items",
        serde_json::json!({ "food_item_id": item.id }),
    )
    .await;

    Ok(ApiResponse::success(
        "Food item created successfully",
        CreatedFoodItem {
            id: item.id,
            item: item.into(),
        },
    ))
}

/// Overwrites a listing. Status and type are owned by the order lifecycle.
pub async fn update_food_item(
    state: &AppState,
    user: &AuthUser,
    id: i64,
    payload: UpdateFoodItemRequest,
) -> AppResult<ApiResponse<FoodItem>> {
    let name = required_name(payload.name)?;
    let price = required_price(payload.price_patungan.as_ref())?;
    let weight = required_weight(payload.weight)?;

    let existing = FoodItems::find_by_id(id)
        .one(&state.orm)
        .await?
        .ok_or_else(|| AppError::not_found("Food item"))?;
    if existing.provider_id != user.user_id {
        return Err(AppError::Forbidden);
    }

    let mut active: FoodActive = existing.into();
    active.name = Set(name);
    active.distance = Set(payload.distance);
    active.availability = Set(payload.availability);
    active.image_url = Set(payload.image_url);
    active.location_address = Set(payload.location_address);
    active.location_details = Set(payload.location_details);
    active.description_title = Set(payload.description_title);
    active.description_content = Set(payload.description_content);
    active.price_patungan = Set(price.get());
    active.weight = Set(weight);
    active.updated_at = Set(Utc::now().into());
    let updated = active.update(&state.orm).await?;

    audit::record(
        state,
        user.user_id,
        "food_item_update",
        "food_items",
        serde_json::json!({ "food_item_id": id }),
    )
    .await;

    Ok(ApiResponse::success(
        "Food item updated successfully",
        updated.into(),
    ))
}

pub async fn delete_food_item(
    state: &AppState,
    user: &AuthUser,
    id: i64,
) -> AppResult<ApiResponse<()>> {
    let txn = state.orm.begin().await?;

    let existing = FoodItems::find_by_id(id)
        .lock(LockType::Update)
        .one(&txn)
        .await?
        .ok_or_else(|| AppError::not_found("Food item"))?;
    if existing.provider_id != user.user_id {
        return Err(AppError::Forbidden);
    }

    // Orders keep their history; a listing that has any cannot go away.
    let order_count = existing.find_related(Orders).count(&txn).await?;
    if order_count > 0 {
        return Err(AppError::Conflict(
            "Food item has orders and cannot be deleted".to_string(),
        ));
    }

    existing.delete(&txn).await?;
    txn.commit().await?;

    audit::record(
        state,
        user.user_id,
        "food_item_delete",
        "food_items",
        serde_json::json!({ "food_item_id": id }),
    )
    .await;

    Ok(ApiResponse::message("Food item deleted successfully"))
}

fn required_name(name: Option<String>) -> AppResult<String> {
    name.map(|n| n.trim().to_string())
        .filter(|n| !n.is_empty())
        .ok_or_else(|| AppError::missing_field("name"))
}

fn required_price(price: Option<&AmountInput>) -> AppResult<Money> {
    price
        .ok_or_else(|| AppError::missing_field("price_patungan"))?
        .validate("price_patungan")
}

fn required_weight(weight: Option<i32>) -> AppResult<i32> {
    let weight = weight.ok_or_else(|| AppError::missing_field("weight"))?;
    if weight < 0 {
        return Err(AppError::Validation(
            "weight must not be negative".to_string(),
        ));
    }
    Ok(weight)
}
