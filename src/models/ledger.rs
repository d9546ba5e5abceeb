use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::movement::{Movement, MovementStatus, MovementType};
use super::pricing::PriceBreakdown;

/// 应收账款视图 (不落库，每次读取时重新计算)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Debt {
    pub movement_id: Uuid,
    pub client_id: Option<Uuid>,
    pub movement_type: MovementType,
    pub status: MovementStatus,
    pub total_amount: i64,
    pub due_date: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
    pub total_paid: i64,
    pub remaining_balance: i64,
}

impl Debt {
    pub fn from_movement(movement: &Movement, total_paid: i64, remaining_balance: i64) -> Self {
        Self {
            movement_id: movement.id,
            client_id: movement.client_id,
            movement_type: movement.movement_type,
            status: movement.status,
            total_amount: movement.total_amount,
            due_date: movement.due_date,
            created_at: movement.created_at,
            total_paid,
            remaining_balance,
        }
    }
}

/// CRM 仪表盘统计
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrmStats {
    pub samples: u64,
    pub consignments: u64,
    /// sale_invoice + sale_credit
    pub sales: u64,
    pub total_pending: i64,
    pub overdue_amount: i64,
    pub overdue_count: u64,
}

/// 按 B2B 客户汇总的欠款
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientDebtSummary {
    pub client_id: Option<Uuid>,
    pub movement_count: usize,
    pub total_amount: i64,
    pub total_paid: i64,
    pub remaining_balance: i64,
    pub next_due_date: Option<NaiveDate>,
}

/// 存储状态与实时逾期判断不一致
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusDivergence {
    pub movement_id: Uuid,
    pub stored_status: MovementStatus,
    pub derived_overdue: bool,
    pub remaining_balance: i64,
    pub due_date: Option<NaiveDate>,
}

/// 单笔往来的收款情况
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovementBalance {
    pub movement_id: Uuid,
    pub status: MovementStatus,
    pub total_amount: i64,
    /// 明细行合计，可与 total_amount 对账
    pub items_total: i64,
    pub total_paid: i64,
    pub remaining_balance: i64,
    pub is_overdue: bool,
    pub breakdown: PriceBreakdown,
}
