#![allow(dead_code)]

use food_rescue_api::{
    db::{create_pool, run_migrations},
    dto::{auth::SignupRequest, food::CreateFoodItemRequest, orders::SubmitOrderRequest},
    entity::{food_items::FoodKind, users::Entity as Users},
    middleware::auth::AuthUser,
    money::AmountInput,
    services::{auth_service, food_service},
    state::{AppState, AuthKeys},
};
use sea_orm::EntityTrait;
use uuid::Uuid;

/// Connects to the test database, or returns `None` so the caller can skip.
pub async fn setup_state() -> anyhow::Result<Option<AppState>> {
    let database_url = match std::env::var("TEST_DATABASE_URL")
        .or_else(|_| std::env::var("DATABASE_URL"))
    {
        Ok(url) => url,
        Err(_) => {
            eprintln!("Skipping test: set TEST_DATABASE_URL or DATABASE_URL to run integration tests.");
            return Ok(None);
        }
    };

    let pool = create_pool(&database_url, 5).await?;
    run_migrations(&pool).await?;
    Ok(Some(AppState::new(pool, AuthKeys::new("test-secret", 1))))
}

/// Signs up a fresh account. Emails are unique per call so runs never collide.
pub async fn create_user(state: &AppState, label: &str) -> anyhow::Result<AuthUser> {
    let email = format!("{label}-{}@example.com", Uuid::new_v4());
    let resp = auth_service::signup(
        state,
        SignupRequest {
            email: Some(email.clone()),
            password: Some("rahasia123".into()),
        },
    )
    .await?;
    let profile = resp.data.ok_or_else(|| anyhow::anyhow!("signup returned no profile"))?;
    Ok(AuthUser {
        user_id: profile.id,
        email,
    })
}

pub async fn create_food(
    state: &AppState,
    provider: &AuthUser,
    price: &str,
    weight: i32,
    kind: FoodKind,
) -> anyhow::Result<i64> {
    let resp = food_service::create_food_item(
        state,
        provider,
        CreateFoodItemRequest {
            name: Some("Nasi Gudeg".into()),
            distance: Some("1.5 km".into()),
            availability: Some("Tersedia sejak 17.00".into()),
            image_url: None,
            location_address: Some("Lokasi Pengambilan".into()),
            location_details: None,
            description_title: None,
            description_content: None,
            price_patungan: Some(AmountInput::from(price)),
            weight: Some(weight),
            kind: Some(kind),
        },
    )
    .await?;
    let created = resp.data.ok_or_else(|| anyhow::anyhow!("create returned no item"))?;
    Ok(created.id)
}

pub fn order_request(food_item_id: i64, amount: Option<i64>) -> SubmitOrderRequest {
    SubmitOrderRequest {
        food_item_id: Some(food_item_id),
        order_amount: amount.map(AmountInput::from),
    }
}

/// (total_savings, total_waste_saved)
pub async fn stats(state: &AppState, user: &AuthUser) -> anyhow::Result<(i64, i64)> {
    let model = Users::find_by_id(user.user_id)
        .one(&state.orm)
        .await?
        .ok_or_else(|| anyhow::anyhow!("user {} missing", user.user_id))?;
    Ok((model.total_savings, model.total_waste_saved))
}
