//! Repository for the singleton `settings` row.

use sqlx::PgPool;

use crate::models::settings::{Settings, UpdateSettings};

const COLUMNS: &str = "site_name, contact_email, contact_phone, whatsapp_number, currency, \
                        referral_commission_bps, employee_share_bps, max_installments, \
                        order_intake_enabled, updated_at";

pub struct SettingsRepo;

impl SettingsRepo {
    /// Fetch the settings row. The migration seeds it, so it always exists.
    pub async fn get(pool: &PgPool) -> Result<Settings, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM settings WHERE id = 1");
        sqlx::query_as::<_, Settings>(&query).fetch_one(pool).await
    }

    pub async fn update(pool: &PgPool, input: &UpdateSettings) -> Result<Settings, sqlx::Error> {
        let query = format!(
            "UPDATE settings SET
                site_name = COALESCE($1, site_name),
                contact_email = COALESCE($2, contact_email),
                contact_phone = COALESCE($3, contact_phone),
                whatsapp_number = COALESCE($4, whatsapp_number),
                currency = COALESCE($5, currency),
                referral_commission_bps = COALESCE($6, referral_commission_bps),
                employee_share_bps = COALESCE($7, employee_share_bps),
                max_installments = COALESCE($8, max_installments),
                order_intake_enabled = COALESCE($9, order_intake_enabled)
             WHERE id = 1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Settings>(&query)
            .bind(&input.site_name)
            .bind(&input.contact_email)
            .bind(&input.contact_phone)
            .bind(&input.whatsapp_number)
            .bind(&input.currency)
            .bind(input.referral_commission_bps)
            .bind(input.employee_share_bps)
            .bind(input.max_installments)
            .bind(input.order_intake_enabled)
            .fetch_one(pool)
            .await
    }
}
