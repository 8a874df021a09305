pub mod auth_service;
pub mod business_service;
pub mod food_service;
pub mod order_service;
