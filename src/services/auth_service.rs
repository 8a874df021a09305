use argon2::{
    Argon2, PasswordHasher,
    password_hash::{PasswordHash, PasswordVerifier, SaltString},
};
use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use password_hash::rand_core::OsRng;
use sea_orm::{ActiveModelTrait, ColumnTrait, DbErr, EntityTrait, QueryFilter, Set, SqlErr};
use sea_orm::ActiveValue::NotSet;

use crate::{
    audit,
    dto::auth::{Claims, LoginRequest, LoginResponse, SignupRequest, UpdateProfileRequest},
    entity::users::{ActiveModel as UserActive, Column as UserCol, Entity as Users},
    error::{AppError, AppResult},
    middleware::auth::AuthUser,
    models::UserProfile,
    response::ApiResponse,
    state::{AppState, AuthKeys},
};

pub async fn signup(state: &AppState, payload: SignupRequest) -> AppResult<ApiResponse<UserProfile>> {
    let (email, password) = credentials(payload.email, payload.password)?;

    let exists = Users::find()
        .filter(UserCol::Email.eq(email.as_str()))
        .one(&state.orm)
        .await?;
    if exists.is_some() {
        return Err(email_taken());
    }

    let password_hash = hash_password(&password)?;

    let user = UserActive {
        id: NotSet,
        email: Set(email),
        password_hash: Set(password_hash),
        name: Set(None),
        full_name: Set(None),
        address: Set(None),
        phone_number: Set(None),
        id_number: Set(None),
        ktp_photo: Set(None),
        bank_name: Set(None),
        account_number: Set(None),
        avatar: Set(None),
        rating: NotSet,
        reviews_count: NotSet,
        total_savings: NotSet,
        total_waste_saved: NotSet,
        is_verified: NotSet,
        is_business_donor: NotSet,
        created_at: NotSet,
    }
    .insert(&state.orm)
    .await
    .map_err(duplicate_email)?;

    audit::record(
        state,
        user.id,
        "user_signup",
        "users",
        serde_json::json!({ "user_id": user.id }),
    )
    .await;

    Ok(ApiResponse::success("User created successfully", user.into()))
}

pub async fn login(state: &AppState, payload: LoginRequest) -> AppResult<ApiResponse<LoginResponse>> {
    let (email, password) = credentials(payload.email, payload.password)?;

    let user = Users::find()
        .filter(UserCol::Email.eq(email.as_str()))
        .one(&state.orm)
        .await?;
    let user = match user {
        Some(u) => u,
        None => return Err(invalid_credentials()),
    };

    let parsed_hash = PasswordHash::new(&user.password_hash)
        .map_err(|_| AppError::Internal(anyhow::anyhow!("Invalid password hash")))?;
    if Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_err()
    {
        return Err(invalid_credentials());
    }

    let token = issue_token(&state.auth, user.id, &user.email)?;

    audit::record(
        state,
        user.id,
        "user_login",
        "users",
        serde_json::json!({ "user_id": user.id }),
    )
    .await;

    Ok(ApiResponse::success(
        "Login successful",
        LoginResponse {
            token: format!("Bearer {}", token),
            user: user.into(),
        },
    ))
}

pub async fn me(state: &AppState, user: &AuthUser) -> AppResult<ApiResponse<UserProfile>> {
    let model = Users::find_by_id(user.user_id)
        .one(&state.orm)
        .await?
        .ok_or_else(|| AppError::not_found("User"))?;
    Ok(ApiResponse::data(model.into()))
}

pub async fn update_profile(
    state: &AppState,
    user: &AuthUser,
    payload: UpdateProfileRequest,
) -> AppResult<ApiResponse<UserProfile>> {
    let existing = Users::find_by_id(user.user_id)
        .one(&state.orm)
        .await?
        .ok_or_else(|| AppError::not_found("User"))?;

    let mut active: UserActive = existing.into();
    if let Some(name) = payload.name {
        active.name = Set(Some(name));
    }
    if let Some(full_name) = payload.full_name {
        active.full_name = Set(Some(full_name));
    }
    if let Some(address) = payload.address {
        active.address = Set(Some(address));
    }
    if let Some(phone_number) = payload.phone_number {
        active.phone_number = Set(Some(phone_number));
    }
    if let Some(id_number) = payload.id_number {
        active.id_number = Set(Some(id_number));
    }
    if let Some(ktp_photo) = payload.ktp_photo {
        active.ktp_photo = Set(Some(ktp_photo));
    }
    if let Some(bank_name) = payload.bank_name {
        active.bank_name = Set(Some(bank_name));
    }
    if let Some(account_number) = payload.account_number {
        active.account_number = Set(Some(account_number));
    }
    if let Some(avatar) = payload.avatar {
        active.avatar = Set(Some(avatar));
    }
    active.is_verified = Set(true);

    let updated = active.update(&state.orm).await?;

    audit::record(
        state,
        user.user_id,
        "profile_update",
        "users",
        serde_json::json!({ "user_id": user.user_id }),
    )
    .await;

    Ok(ApiResponse::success("Profile updated successfully", updated.into()))
}

pub fn issue_token(keys: &AuthKeys, user_id: i64, email: &str) -> AppResult<String> {
    let expiration = Duration::try_hours(keys.token_ttl_hours)
        .and_then(|ttl| Utc::now().checked_add_signed(ttl))
        .ok_or_else(|| AppError::Internal(anyhow::anyhow!("Failed to set expiration")))?;

    let claims = Claims {
        sub: user_id.to_string(),
        email: email.to_string(),
        exp: expiration.timestamp() as usize,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(keys.jwt_secret.as_bytes()),
    )
    .map_err(|e| AppError::Internal(anyhow::anyhow!(e.to_string())))
}

pub fn decode_token(keys: &AuthKeys, token: &str) -> AppResult<AuthUser> {
    let decoded = decode::<Claims>(
        token,
        &DecodingKey::from_secret(keys.jwt_secret.as_bytes()),
        &Validation::default(),
    )
    .map_err(|_| AppError::Unauthorized("Invalid or expired token".into()))?;

    let user_id = decoded
        .claims
        .sub
        .parse::<i64>()
        .map_err(|_| AppError::Unauthorized("Invalid user id in token".into()))?;

    Ok(AuthUser {
        user_id,
        email: decoded.claims.email,
    })
}

pub fn hash_password(password: &str) -> AppResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AppError::Internal(anyhow::anyhow!(e.to_string())))
}

fn credentials(email: Option<String>, password: Option<String>) -> AppResult<(String, String)> {
    let email = email
        .map(|e| e.trim().to_lowercase())
        .filter(|e| !e.is_empty())
        .ok_or_else(|| AppError::missing_field("email"))?;
    let password = password
        .filter(|p| !p.is_empty())
        .ok_or_else(|| AppError::missing_field("password"))?;
    Ok((email, password))
}

fn email_taken() -> AppError {
    AppError::Conflict("User with this email already exists".to_string())
}

/// A concurrent signup can pass the lookup and still lose on `users_email_key`.
fn duplicate_email(err: DbErr) -> AppError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => email_taken(),
        _ => err.into(),
    }
}

fn invalid_credentials() -> AppError {
    AppError::Unauthorized("Invalid email or password".into())
}
