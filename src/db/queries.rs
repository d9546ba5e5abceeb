use crate::models::{MovementRow, PaymentRow};
use sqlx::PgPool;
use uuid::Uuid;

/// 查询全部往来 (按创建时间倒序)
pub async fn list_movements(pool: &PgPool) -> Result<Vec<MovementRow>, sqlx::Error> {
    sqlx::query_as::<_, MovementRow>(
        r#"
        SELECT id, client_id, movement_type, status,
               total_amount, items, due_date, created_at
        FROM crm_movements
        ORDER BY created_at DESC
        "#
    )
    .fetch_all(pool)
    .await
}

/// 查询单笔往来
pub async fn get_movement(
    pool: &PgPool,
    movement_id: Uuid,
) -> Result<Option<MovementRow>, sqlx::Error> {
    sqlx::query_as::<_, MovementRow>(
        r#"
        SELECT id, client_id, movement_type, status,
               total_amount, items, due_date, created_at
        FROM crm_movements
        WHERE id = $1
        "#
    )
    .bind(movement_id)
    .fetch_optional(pool)
    .await
}

/// 批量查询多笔往来的付款记录
pub async fn list_payments_for_movements(
    pool: &PgPool,
    movement_ids: &[Uuid],
) -> Result<Vec<PaymentRow>, sqlx::Error> {
    if movement_ids.is_empty() {
        return Ok(Vec::new());
    }

    sqlx::query_as::<_, PaymentRow>(
        r#"
        SELECT id, movement_id, amount, payment_method,
               verification_status, created_at
        FROM crm_movement_payments
        WHERE movement_id = ANY($1)
        ORDER BY created_at ASC
        "#
    )
    .bind(movement_ids)
    .fetch_all(pool)
    .await
}
