pub mod auth;
pub mod business;
pub mod food;
pub mod orders;
