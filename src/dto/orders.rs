use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{
    entity::orders::OrderStatus,
    models::{MyOrder, Negotiation, Order},
    money::AmountInput,
    response::STATUS_SUCCESS,
};

/// The consumer is the caller; any `user_id` in the body is ignored.
#[derive(Debug, Deserialize, ToSchema)]
pub struct SubmitOrderRequest {
    pub food_item_id: Option<i64>,
    pub order_amount: Option<AmountInput>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SubmitOrderResponse {
    pub message: String,
    pub data: Order,
    pub status: String,
    pub order_status: OrderStatus,
    pub is_negotiation: bool,
}

impl SubmitOrderResponse {
    pub fn new(message: impl Into<String>, order: Order, is_negotiation: bool) -> Self {
        Self {
            message: message.into(),
            order_status: order.status,
            data: order,
            status: STATUS_SUCCESS.to_string(),
            is_negotiation,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(transparent)]
pub struct MyOrderList {
    #[schema(value_type = Vec<MyOrder>)]
    pub items: Vec<MyOrder>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(transparent)]
pub struct NegotiationList {
    #[schema(value_type = Vec<Negotiation>)]
    pub items: Vec<Negotiation>,
}
