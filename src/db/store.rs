use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::db::queries;
use crate::error::AppError;
use crate::models::Movement;
use crate::service::normalize::attach_payments;

/// 往来记录的只读数据源
#[async_trait]
pub trait MovementStore: Send + Sync {
    async fn list_movements(&self) -> Result<Vec<Movement>, AppError>;

    async fn get_movement(&self, movement_id: Uuid) -> Result<Option<Movement>, AppError>;
}

/// 基于 Postgres 的实现
pub struct PgMovementStore {
    pool: PgPool,
}

impl PgMovementStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MovementStore for PgMovementStore {
    async fn list_movements(&self) -> Result<Vec<Movement>, AppError> {
        let start = std::time::Instant::now();
        let rows = queries::list_movements(&self.pool).await?;

        let ids: Vec<Uuid> = rows.iter().map(|r| r.id).collect();
        let mut payments = Vec::new();
        // 分块查询，避免 ANY($1) 参数过大
        for chunk in ids.chunks(1000) {
            payments.extend(queries::list_payments_for_movements(&self.pool, chunk).await?);
        }

        tracing::debug!(
            "Loaded {} movements and {} payments in {:?}",
            rows.len(),
            payments.len(),
            start.elapsed()
        );

        Ok(attach_payments(rows, payments))
    }

    async fn get_movement(&self, movement_id: Uuid) -> Result<Option<Movement>, AppError> {
        let Some(row) = queries::get_movement(&self.pool, movement_id).await? else {
            return Ok(None);
        };
        let payments = queries::list_payments_for_movements(&self.pool, &[movement_id]).await?;

        Ok(attach_payments(vec![row], payments).into_iter().next())
    }
}
