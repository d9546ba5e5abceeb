use chrono::NaiveDate;
use indexmap::IndexMap;
use std::cmp::Ordering;

use crate::models::{
    ClientDebtSummary, CrmStats, Debt, Movement, MovementStatus, MovementType, StatusDivergence,
};

/// 已收款总额
pub fn total_paid(movement: &Movement) -> i64 {
    movement
        .payments
        .iter()
        .fold(0i64, |acc, p| acc.saturating_add(p.amount))
}

/// 剩余应收 = 总额 - 已收，多付时为负数 (不截断)
/// 超出 i64 范围时饱和
pub fn remaining_balance(movement: &Movement) -> i64 {
    movement.total_amount.saturating_sub(total_paid(movement))
}

/// 实时逾期判断：有到期日、到期日早于今天、且仍有余额
pub fn is_overdue(movement: &Movement, today: NaiveDate) -> bool {
    match movement.due_date {
        Some(due) => due < today && remaining_balance(movement) > 0,
        None => false,
    }
}

/// 筛选出赊销/寄售中尚未结清的往来，并附上收款信息
/// 输出顺序与输入一致，排序交给 sort_debts_by_due_date
pub fn classify_debt(movements: &[Movement]) -> Vec<Debt> {
    movements
        .iter()
        .filter(|m| m.movement_type.carries_debt() && m.status.is_open_debt())
        .map(|m| Debt::from_movement(m, total_paid(m), remaining_balance(m)))
        .collect()
}

/// 到期日最近的在前，无到期日的排最后
pub fn sort_debts_by_due_date(debts: &mut [Debt]) {
    debts.sort_by(|a, b| {
        let by_due = match (a.due_date, b.due_date) {
            (Some(x), Some(y)) => x.cmp(&y),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        };
        by_due.then_with(|| a.created_at.cmp(&b.created_at))
    });
}

/// 单次遍历汇总 CRM 统计
pub fn aggregate_stats(movements: &[Movement], reference_date: NaiveDate) -> CrmStats {
    movements.iter().fold(CrmStats::default(), |mut stats, m| {
        match m.movement_type {
            MovementType::Sample => stats.samples += 1,
            MovementType::Consignment => stats.consignments += 1,
            MovementType::SaleInvoice | MovementType::SaleCredit => stats.sales += 1,
        }

        let unpaid = m.status != MovementStatus::Paid;
        if m.movement_type.carries_debt() && unpaid {
            stats.total_pending = stats.total_pending.saturating_add(remaining_balance(m));
        }

        if unpaid && m.due_date.is_some_and(|due| due < reference_date) {
            stats.overdue_amount = stats.overdue_amount.saturating_add(remaining_balance(m));
            stats.overdue_count += 1;
        }

        stats
    })
}

/// 按客户汇总，保持首次出现的顺序
pub fn summarize_by_client(debts: &[Debt]) -> Vec<ClientDebtSummary> {
    let mut grouped: IndexMap<Option<uuid::Uuid>, ClientDebtSummary> = IndexMap::new();

    for debt in debts {
        let entry = grouped
            .entry(debt.client_id)
            .or_insert_with(|| ClientDebtSummary {
                client_id: debt.client_id,
                movement_count: 0,
                total_amount: 0,
                total_paid: 0,
                remaining_balance: 0,
                next_due_date: None,
            });

        entry.movement_count += 1;
        entry.total_amount = entry.total_amount.saturating_add(debt.total_amount);
        entry.total_paid = entry.total_paid.saturating_add(debt.total_paid);
        entry.remaining_balance = entry.remaining_balance.saturating_add(debt.remaining_balance);
        if debt.remaining_balance > 0 {
            entry.next_due_date = match (entry.next_due_date, debt.due_date) {
                (Some(current), Some(due)) => Some(current.min(due)),
                (current, due) => current.or(due),
            };
        }
    }

    grouped.into_values().collect()
}

/// 找出存储状态 overdue 与实时判断不一致的往来，只报告不修正
pub fn detect_status_divergence(movements: &[Movement], today: NaiveDate) -> Vec<StatusDivergence> {
    movements
        .iter()
        .filter_map(|m| {
            let stored_overdue = m.status == MovementStatus::Overdue;
            let derived_overdue = is_overdue(m, today);
            // 已结清或已退回的往来不会再被调度任务标记
            let reconcilable = !matches!(m.status, MovementStatus::Paid | MovementStatus::Returned);

            if stored_overdue == derived_overdue || (!stored_overdue && !reconcilable) {
                return None;
            }

            Some(StatusDivergence {
                movement_id: m.id,
                stored_status: m.status,
                derived_overdue,
                remaining_balance: remaining_balance(m),
                due_date: m.due_date,
            })
        })
        .collect()
}
