use bigdecimal::BigDecimal;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// crm_movements 原始行，数值列未经校验
#[derive(Debug, Clone, FromRow)]
pub struct MovementRow {
    pub id: Uuid,
    pub client_id: Option<Uuid>,
    pub movement_type: String,
    pub status: Option<String>,
    pub total_amount: Option<BigDecimal>,
    pub items: Option<serde_json::Value>,
    pub due_date: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
}

/// crm_movement_payments 原始行
#[derive(Debug, Clone, FromRow)]
pub struct PaymentRow {
    pub id: Uuid,
    pub movement_id: Uuid,
    pub amount: Option<BigDecimal>,
    pub payment_method: Option<String>,
    pub verification_status: Option<String>,
    pub created_at: DateTime<Utc>,
}
