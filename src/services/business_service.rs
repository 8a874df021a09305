use sea_orm::ActiveValue::NotSet;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DbErr, EntityTrait, QueryFilter, Set, SqlErr, TransactionTrait,
};

use crate::{
    audit,
    dto::business::{BusinessStatus, RegisterBusinessRequest},
    entity::{
        business_infos::{ActiveModel as BusinessActive, Column as BusinessCol, Entity as BusinessInfos},
        users::{Column as UserCol, Entity as Users},
    },
    error::{AppError, AppResult},
    middleware::auth::AuthUser,
    models::BusinessInfo,
    response::ApiResponse,
    state::AppState,
};

const DEFAULT_STATUS: &str = "approved";

/// Registers the caller as a business donor. Registration is approved on submit.
pub async fn register(
    state: &AppState,
    user: &AuthUser,
    payload: RegisterBusinessRequest,
) -> AppResult<ApiResponse<BusinessInfo>> {
    let business_name = required(payload.business_name, "business_name")?;
    let category = required(payload.category, "category")?;
    let address = required(payload.address, "address")?;
    let average_revenue = required(payload.average_revenue, "average_revenue")?;
    let contact_name = required(payload.contact_name, "contact_name")?;
    let contact_phone = required(payload.contact_phone, "contact_phone")?;
    let contact_email = required(payload.contact_email, "contact_email")?;

    let txn = state.orm.begin().await?;

    let existing = BusinessInfos::find()
        .filter(BusinessCol::UserId.eq(user.user_id))
        .one(&txn)
        .await?;
    if existing.is_some() {
        return Err(already_registered());
    }

    let info = BusinessActive {
        id: NotSet,
        user_id: Set(user.user_id),
        business_name: Set(business_name),
        category: Set(category),
        address: Set(address),
        average_revenue: Set(average_revenue),
        contact_name: Set(contact_name),
        contact_phone: Set(contact_phone),
        contact_email: Set(contact_email),
        nib: Set(optional(payload.nib)),
        halal_certificate: Set(optional(payload.halal_certificate)),
        pirt: Set(optional(payload.pirt)),
        npwp: Set(optional(payload.npwp)),
        status: Set(DEFAULT_STATUS.to_string()),
        created_at: NotSet,
        updated_at: NotSet,
    }
    .insert(&txn)
    .await
    .map_err(duplicate_registration)?;

    let result = Users::update_many()
        .col_expr(UserCol::IsBusinessDonor, Expr::value(true))
        .filter(UserCol::Id.eq(user.user_id))
        .exec(&txn)
        .await?;
    if result.rows_affected == 0 {
        return Err(AppError::not_found("User"));
    }

    txn.commit().await?;

    audit::record(
        state,
        user.user_id,
        "business_donor_register",
        "info_bisnis",
        serde_json::json!({ "business_info_id": info.id }),
    )
    .await;

    Ok(ApiResponse::success(
        "Business donor registered successfully",
        info.into(),
    ))
}

pub async fn status(state: &AppState, user: &AuthUser) -> AppResult<ApiResponse<BusinessStatus>> {
    let account = Users::find_by_id(user.user_id)
        .one(&state.orm)
        .await?
        .ok_or_else(|| AppError::not_found("User"))?;

    let info = if account.is_business_donor {
        BusinessInfos::find()
            .filter(BusinessCol::UserId.eq(user.user_id))
            .one(&state.orm)
            .await?
            .map(BusinessInfo::from)
    } else {
        None
    };

    Ok(ApiResponse::data(BusinessStatus {
        is_business_donor: account.is_business_donor,
        info,
    }))
}

fn already_registered() -> AppError {
    AppError::Conflict("User already registered as business donor".to_string())
}

/// Two registrations racing past the lookup meet on `info_bisnis_user_id_key`.
fn duplicate_registration(err: DbErr) -> AppError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => already_registered(),
        _ => err.into(),
    }
}

fn required(value: Option<String>, field: &str) -> AppResult<String> {
    optional(value).ok_or_else(|| AppError::missing_field(field))
}

fn optional(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
