//! The singleton settings row.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use scriptum_core::types::{BasisPoints, Timestamp};
use scriptum_core::validation::not_blank;

/// Platform-wide defaults. There is exactly one row.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Settings {
    pub site_name: String,
    pub contact_email: Option<String>,
    pub contact_phone: Option<String>,
    pub whatsapp_number: Option<String>,
    pub currency: String,
    pub referral_commission_bps: BasisPoints,
    pub employee_share_bps: BasisPoints,
    pub max_installments: i32,
    pub order_intake_enabled: bool,
    pub updated_at: Timestamp,
}

/// The part of [`Settings`] the marketing site may read.
#[derive(Debug, Clone, Serialize)]
pub struct PublicSettings {
    pub site_name: String,
    pub contact_email: Option<String>,
    pub contact_phone: Option<String>,
    pub whatsapp_number: Option<String>,
    pub currency: String,
    pub max_installments: i32,
    pub order_intake_enabled: bool,
}

impl From<Settings> for PublicSettings {
    fn from(s: Settings) -> Self {
        Self {
            site_name: s.site_name,
            contact_email: s.contact_email,
            contact_phone: s.contact_phone,
            whatsapp_number: s.whatsapp_number,
            currency: s.currency,
            max_installments: s.max_installments,
            order_intake_enabled: s.order_intake_enabled,
        }
    }
}

#[derive(Debug, Default, Deserialize, validator::Validate)]
pub struct UpdateSettings {
    #[validate(length(min = 1, max = 100), custom(function = "not_blank"))]
    pub site_name: Option<String>,
    #[validate(email)]
    pub contact_email: Option<String>,
    #[validate(length(max = 40))]
    pub contact_phone: Option<String>,
    #[validate(length(max = 40))]
    pub whatsapp_number: Option<String>,
    pub currency: Option<String>,
    pub referral_commission_bps: Option<BasisPoints>,
    pub employee_share_bps: Option<BasisPoints>,
    #[validate(range(min = 1, max = 36))]
    pub max_installments: Option<i32>,
    pub order_intake_enabled: Option<bool>,
}
