use utoipa::{
    Modify, OpenApi,
    openapi::{
        self,
        OpenApi as OpenApiSpec,
        security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    },
};
use utoipa_scalar::{Scalar, Servable};

use crate::{
    dto::{
        auth::{LoginRequest, LoginResponse, SignupRequest, UpdateProfileRequest},
        business::{BusinessStatus, RegisterBusinessRequest},
        food::{
            CreateFoodItemRequest, CreatedFoodItem, FoodListingList, MyFoodItemList,
            UpdateFoodItemRequest,
        },
        orders::{MyOrderList, NegotiationList, SubmitOrderRequest, SubmitOrderResponse},
    },
    entity::{
        food_items::{FoodKind, FoodStatus},
        orders::OrderStatus,
    },
    models::{
        BusinessInfo, FoodDetail, FoodItem, FoodListing, MyFoodItem, MyOrder, Negotiation, Order,
        OrderDetail, UserProfile,
    },
    money::{AmountInput, Money},
    response::ErrorResponse,
    routes::{auth, business, food, health, orders, params},
};

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        auth::signup,
        auth::login,
        auth::me,
        auth::update_profile,
        food::list_available,
        food::list_mine,
        food::get_food_item,
        food::create_food_item,
        food::update_food_item,
        food::delete_food_item,
        orders::submit_order,
        orders::list_my_orders,
        orders::list_negotiations,
        orders::get_order,
        orders::confirm_payment,
        orders::approve_order,
        orders::reject_order,
        orders::complete_order,
        orders::cancel_order,
        business::register_business,
        business::business_status
    ),
    components(
        schemas(
            UserProfile,
            FoodItem,
            FoodListing,
            FoodDetail,
            MyFoodItem,
            Order,
            OrderDetail,
            MyOrder,
            Negotiation,
            BusinessInfo,
            FoodStatus,
            FoodKind,
            OrderStatus,
            Money,
            AmountInput,
            SignupRequest,
            LoginRequest,
            LoginResponse,
            UpdateProfileRequest,
            CreateFoodItemRequest,
            UpdateFoodItemRequest,
            CreatedFoodItem,
            FoodListingList,
            MyFoodItemList,
            SubmitOrderRequest,
            SubmitOrderResponse,
            MyOrderList,
            NegotiationList,
            RegisterBusinessRequest,
            BusinessStatus,
            ErrorResponse,
            params::MyOrdersQuery,
            params::NegotiationQuery,
            health::HealthData
        )
    ),
    security(
        ("bearer_auth" = [])
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Health check endpoint"),
        (name = "Auth", description = "Account and profile endpoints"),
        (name = "Food", description = "Food listing endpoints"),
        (name = "Orders", description = "Order and negotiation endpoints"),
        (name = "Business donors", description = "Business donor registration"),
    )
)]
pub struct ApiDoc;

pub fn scalar_docs() -> Scalar<OpenApiSpec> {
    Scalar::with_url("/docs", ApiDoc::openapi())
}
