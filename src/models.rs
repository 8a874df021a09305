use chrono::{DateTime, Utc};
use sea_orm::FromQueryResult;
use serde::Serialize;
use utoipa::ToSchema;

use crate::entity::{
    business_infos::Model as BusinessInfoModel,
    food_items::{FoodKind, FoodStatus, Model as FoodItemModel},
    orders::{Model as OrderModel, OrderStatus},
    users::Model as UserModel,
};

/// A user as shown to themselves. Never carries the password hash.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct UserProfile {
    pub id: i64,
    pub email: String,
    pub name: Option<String>,
    pub full_name: Option<String>,
    pub address: Option<String>,
    pub phone_number: Option<String>,
    pub bank_name: Option<String>,
    pub account_number: Option<String>,
    pub avatar: Option<String>,
    pub rating: f64,
    pub reviews_count: i32,
    pub total_savings: i64,
    pub total_waste_saved: i64,
    pub is_verified: bool,
    pub is_business_donor: bool,
    pub created_at: DateTime<Utc>,
}

impl From<UserModel> for UserProfile {
    fn from(model: UserModel) -> Self {
        Self {
            id: model.id,
            email: model.email,
            name: model.name,
            full_name: model.full_name,
            address: model.address,
            phone_number: model.phone_number,
            bank_name: model.bank_name,
            account_number: model.account_number,
            avatar: model.avatar,
            rating: model.rating,
            reviews_count: model.reviews_count,
            total_savings: model.total_savings,
            total_waste_saved: model.total_waste_saved,
            is_verified: model.is_verified,
            is_business_donor: model.is_business_donor,
            created_at: model.created_at.with_timezone(&Utc),
        }
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct FoodItem {
    pub id: i64,
    pub provider_id: i64,
    pub name: String,
    pub distance: Option<String>,
    pub availability: Option<String>,
    pub image_url: Option<String>,
    pub location_address: Option<String>,
    pub location_details: Option<String>,
    pub description_title: Option<String>,
    pub description_content: Option<String>,
    pub price_patungan: i64,
    pub weight: i32,
    pub status: FoodStatus,
    #[serde(rename = "type")]
    pub kind: FoodKind,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<FoodItemModel> for FoodItem {
    fn from(model: FoodItemModel) -> Self {
        Self {
            id: model.id,
            provider_id: model.provider_id,
            name: model.name,
            distance: model.distance,
            availability: model.availability,
            image_url: model.image_url,
            location_address: model.location_address,
            location_details: model.location_details,
            description_title: model.description_title,
            description_content: model.description_content,
            price_patungan: model.price_patungan,
            weight: model.weight,
            status: model.status,
            kind: model.kind,
            created_at: model.created_at.with_timezone(&Utc),
            updated_at: model.updated_at.with_timezone(&Utc),
        }
    }
}

/// Catalog entry with the provider's public details.
#[derive(Debug, Clone, Serialize, ToSchema, FromQueryResult)]
pub struct FoodListing {
    pub id: i64,
    pub provider_id: i64,
    pub name: String,
    pub distance: Option<String>,
    pub availability: Option<String>,
    pub image_url: Option<String>,
    pub location_address: Option<String>,
    pub location_details: Option<String>,
    pub description_title: Option<String>,
    pub description_content: Option<String>,
    pub price_patungan: i64,
    pub weight: i32,
    pub status: FoodStatus,
    #[serde(rename = "type")]
    pub kind: FoodKind,
    pub created_at: DateTime<Utc>,
    pub provider_name: Option<String>,
    pub provider_avatar: Option<String>,
    pub provider_rating: f64,
    pub provider_reviews: i32,
}

/// A single listing, including where to transfer the contribution.
#[derive(Debug, Clone, Serialize, ToSchema, FromQueryResult)]
pub struct FoodDetail {
    pub id: i64,
    pub provider_id: i64,
    pub name: String,
    pub distance: Option<String>,
    pub availability: Option<String>,
    pub image_url: Option<String>,
    pub location_address: Option<String>,
    pub location_details: Option<String>,
    pub description_title: Option<String>,
    pub description_content: Option<String>,
    pub price_patungan: i64,
    pub weight: i32,
    pub status: FoodStatus,
    #[serde(rename = "type")]
    pub kind: FoodKind,
    pub created_at: DateTime<Utc>,
    pub provider_name: Option<String>,
    pub provider_avatar: Option<String>,
    pub provider_rating: f64,
    pub provider_reviews: i32,
    pub provider_bank_name: Option<String>,
    pub provider_account_number: Option<String>,
}

#[derive(Debug, Clone, Serialize, ToSchema, FromQueryResult)]
pub struct MyFoodItem {
    pub id: i64,
    pub name: String,
    pub image_url: Option<String>,
    pub availability: Option<String>,
    pub price_patungan: i64,
    pub weight: i32,
    pub status: FoodStatus,
    #[serde(rename = "type")]
    pub kind: FoodKind,
    pub created_at: DateTime<Utc>,
    pub has_pending_negotiations: bool,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct Order {
    pub id: i64,
    pub food_item_id: i64,
    pub user_id: i64,
    pub order_amount: i64,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<OrderModel> for Order {
    fn from(model: OrderModel) -> Self {
        Self {
            id: model.id,
            food_item_id: model.food_item_id,
            user_id: model.user_id,
            order_amount: model.order_amount,
            status: model.status,
            created_at: model.created_at.with_timezone(&Utc),
            updated_at: model.updated_at.with_timezone(&Utc),
        }
    }
}

/// An order with both parties and the food it is for.
#[derive(Debug, Clone, Serialize, ToSchema, FromQueryResult)]
pub struct OrderDetail {
    pub id: i64,
    pub food_item_id: i64,
    pub user_id: i64,
    pub order_amount: i64,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
    pub food_name: String,
    pub food_image: Option<String>,
    pub price_patungan: i64,
    pub location_address: Option<String>,
    pub location_details: Option<String>,
    pub availability: Option<String>,
    pub food_weight: i32,
    pub provider_id: i64,
    pub provider_name: Option<String>,
    pub provider_avatar: Option<String>,
    pub provider_rating: f64,
    pub provider_reviews: i32,
    pub customer_name: Option<String>,
    pub customer_avatar: Option<String>,
    pub customer_rating: f64,
    pub customer_reviews: i32,
}

#[derive(Debug, Clone, Serialize, ToSchema, FromQueryResult)]
pub struct MyOrder {
    pub id: i64,
    pub food_item_id: i64,
    pub user_id: i64,
    pub order_amount: i64,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
    pub food_name: String,
    pub food_image: Option<String>,
    pub price_patungan: i64,
    pub provider_name: Option<String>,
    pub provider_avatar: Option<String>,
    pub provider_rating: f64,
    pub provider_reviews: i32,
}

/// An offer on a listing as its provider sees it.
#[derive(Debug, Clone, Serialize, ToSchema, FromQueryResult)]
pub struct Negotiation {
    pub id: i64,
    pub food_item_id: i64,
    pub user_id: i64,
    pub order_amount: i64,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
    pub user_name: Option<String>,
    pub user_avatar: Option<String>,
    pub user_rating: f64,
    pub user_reviews: i32,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct BusinessInfo {
    pub id: i64,
    pub user_id: i64,
    pub business_name: String,
    pub category: String,
    pub address: String,
    pub average_revenue: String,
    pub contact_name: String,
    pub contact_phone: String,
    pub contact_email: String,
    pub nib: Option<String>,
    pub halal_certificate: Option<String>,
    pub pirt: Option<String>,
    pub npwp: Option<String>,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

impl From<BusinessInfoModel> for BusinessInfo {
    fn from(model: BusinessInfoModel) -> Self {
        Self {
            id: model.id,
            user_id: model.user_id,
            business_name: model.business_name,
            category: model.category,
            address: model.address,
            average_revenue: model.average_revenue,
            contact_name: model.contact_name,
            contact_phone: model.contact_phone,
            contact_email: model.contact_email,
            nib: model.nib,
            halal_certificate: model.halal_certificate,
            pirt: model.pirt,
            npwp: model.npwp,
            status: model.status,
            created_at: model.created_at.with_timezone(&Utc),
        }
    }
}
