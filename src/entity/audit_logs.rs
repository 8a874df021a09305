use sea_orm::entity::prelude::*;
use serde_json::Value;

/// One row per mutating action. Written through `crate::audit`.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "audit_logs")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    /// The acting user; kept as NULL if the account is later removed.
    pub user_id: Option<i64>,
    /// e.g. `order_submit`, `order_confirm_payment`, `food_item_delete`.
    pub action: String,
    /// Table the action touched.
    pub resource: Option<String>,
    /// Ids and state changes, such as `{"order_id", "from", "to"}`.
    pub metadata: Option<Value>,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::UserId",
        to = "super::users::Column::Id",
        on_delete = "SetNull"
    )]
    Actor,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Actor.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
