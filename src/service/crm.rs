use chrono::NaiveDate;
use std::sync::Arc;
use uuid::Uuid;

use crate::db::{write_debts_csv, MovementStore};
use crate::error::AppError;
use crate::models::{ClientDebtSummary, CrmStats, Debt, MovementBalance, StatusDivergence};
use crate::service::ledger;
use crate::service::pricing::PricingEngine;

/// CRM 账款服务：读取往来记录并计算欠款、统计
pub struct CrmService {
    store: Arc<dyn MovementStore>,
    pricing: PricingEngine,
}

impl CrmService {
    pub fn new(store: Arc<dyn MovementStore>, pricing: PricingEngine) -> Self {
        Self { store, pricing }
    }

    /// 未结清的赊销/寄售，按到期日排序
    pub async fn debts(&self) -> Result<Vec<Debt>, AppError> {
        let movements = self.store.list_movements().await?;
        let mut debts = ledger::classify_debt(&movements);
        ledger::sort_debts_by_due_date(&mut debts);

        tracing::info!(
            "Classified {} open debts out of {} movements",
            debts.len(),
            movements.len()
        );
        Ok(debts)
    }

    pub async fn debts_by_client(&self) -> Result<Vec<ClientDebtSummary>, AppError> {
        let debts = self.debts().await?;
        Ok(ledger::summarize_by_client(&debts))
    }

    pub async fn stats(&self, reference_date: NaiveDate) -> Result<CrmStats, AppError> {
        let movements = self.store.list_movements().await?;
        let stats = ledger::aggregate_stats(&movements, reference_date);
        tracing::debug!("CRM stats as of {}: {:?}", reference_date, stats);
        Ok(stats)
    }

    pub async fn movement_balance(
        &self,
        movement_id: Uuid,
        today: NaiveDate,
    ) -> Result<MovementBalance, AppError> {
        let movement = self
            .store
            .get_movement(movement_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("movement {}", movement_id)))?;

        Ok(MovementBalance {
            movement_id: movement.id,
            status: movement.status,
            total_amount: movement.total_amount,
            items_total: movement.items_total(),
            total_paid: ledger::total_paid(&movement),
            remaining_balance: ledger::remaining_balance(&movement),
            is_overdue: ledger::is_overdue(&movement, today),
            breakdown: self.pricing.price_breakdown(movement.total_amount),
        })
    }

    /// 对比存储状态与实时逾期判断，仅报告
    pub async fn reconciliation(&self, today: NaiveDate) -> Result<Vec<StatusDivergence>, AppError> {
        let movements = self.store.list_movements().await?;
        let divergences = ledger::detect_status_divergence(&movements, today);

        for d in &divergences {
            tracing::warn!(
                "Movement {} stored status '{}' disagrees with derived overdue={} (remaining {}, due {:?})",
                d.movement_id,
                d.stored_status.as_str(),
                d.derived_overdue,
                d.remaining_balance,
                d.due_date
            );
        }
        Ok(divergences)
    }

    pub async fn debts_csv(&self) -> Result<Vec<u8>, AppError> {
        let debts = self.debts().await?;
        let mut buf = Vec::new();
        write_debts_csv(&debts, &mut buf)?;
        Ok(buf)
    }
}
