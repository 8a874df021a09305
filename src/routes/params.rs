use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};

use crate::entity::orders::OrderStatus;

#[derive(Debug, Default, Deserialize, ToSchema, IntoParams)]
pub struct MyOrdersQuery {
    /// Only orders in this status.
    pub status: Option<OrderStatus>,
}

#[derive(Debug, Default, Deserialize, ToSchema, IntoParams)]
pub struct NegotiationQuery {
    pub food_item_id: Option<i64>,
}
