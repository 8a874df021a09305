use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::BusinessInfo;

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct RegisterBusinessRequest {
    pub business_name: Option<String>,
    pub category: Option<String>,
    pub address: Option<String>,
    pub average_revenue: Option<String>,
    pub contact_name: Option<String>,
    pub contact_phone: Option<String>,
    pub contact_email: Option<String>,
    pub nib: Option<String>,
    pub halal_certificate: Option<String>,
    pub pirt: Option<String>,
    pub npwp: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct BusinessStatus {
    pub is_business_donor: bool,
    pub info: Option<BusinessInfo>,
}
