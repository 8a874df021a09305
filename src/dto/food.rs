use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{
    entity::food_items::FoodKind,
    models::{FoodItem, FoodListing, MyFoodItem},
    money::AmountInput,
};

/// Listing as uploaded by a provider. The provider is the caller.
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateFoodItemRequest {
    pub name: Option<String>,
    pub distance: Option<String>,
    pub availability: Option<String>,
    pub image_url: Option<String>,
    pub location_address: Option<String>,
    pub location_details: Option<String>,
    pub description_title: Option<String>,
    pub description_content: Option<String>,
    pub price_patungan: Option<AmountInput>,
    pub weight: Option<i32>,
    #[serde(rename = "type")]
    pub kind: Option<FoodKind>,
}

/// Full overwrite of a listing; omitted optional fields are cleared.
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateFoodItemRequest {
    pub name: Option<String>,
    pub distance: Option<String>,
    pub availability: Option<String>,
    pub image_url: Option<String>,
    pub location_address: Option<String>,
    pub location_details: Option<String>,
    pub description_title: Option<String>,
    pub description_content: Option<String>,
    pub price_patungan: Option<AmountInput>,
    pub weight: Option<i32>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CreatedFoodItem {
    pub id: i64,
    pub item: FoodItem,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(transparent)]
pub struct FoodListingList {
    #[schema(value_type = Vec<FoodListing>)]
    pub items: Vec<FoodListing>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(transparent)]
pub struct MyFoodItemList {
    #[schema(value_type = Vec<MyFoodItem>)]
    pub items: Vec<MyFoodItem>,
}
