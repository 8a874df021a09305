pub mod audit_logs;
pub mod business_infos;
pub mod food_items;
pub mod orders;
pub mod users;

pub use audit_logs::Entity as AuditLogs;
pub use business_infos::Entity as BusinessInfos;
pub use food_items::Entity as FoodItems;
pub use orders::Entity as Orders;
pub use users::Entity as Users;
