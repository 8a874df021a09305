use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(unique)]
    pub email: String,
    pub password_hash: String,
    pub name: Option<String>,
    pub full_name: Option<String>,
    pub address: Option<String>,
    pub phone_number: Option<String>,
    pub id_number: Option<String>,
    pub ktp_photo: Option<String>,
    pub bank_name: Option<String>,
    pub account_number: Option<String>,
    pub avatar: Option<String>,
    pub rating: f64,
    pub reviews_count: i32,
    /// Rupiah, credited when an order is confirmed.
    pub total_savings: i64,
    /// Grams of food rescued.
    pub total_waste_saved: i64,
    pub is_verified: bool,
    pub is_business_donor: bool,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::food_items::Entity")]
    FoodItems,
    #[sea_orm(has_many = "super::orders::Entity")]
    Orders,
    #[sea_orm(has_one = "super::business_infos::Entity")]
    BusinessInfo,
}

impl Related<super::food_items::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::FoodItems.def()
    }
}

impl Related<super::orders::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Orders.def()
    }
}

impl Related<super::business_infos::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::BusinessInfo.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
