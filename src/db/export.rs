use std::io::Write;

use crate::models::Debt;

/// 导出应收账款到 CSV (带表头)
pub fn write_debts_csv<W: Write>(debts: &[Debt], writer: W) -> Result<(), csv::Error> {
    let mut writer = csv::Writer::from_writer(writer);

    writer.write_record([
        "movement_id",
        "client_id",
        "movement_type",
        "status",
        "due_date",
        "total_amount",
        "total_paid",
        "remaining_balance",
    ])?;

    for debt in debts {
        writer.write_record(&[
            debt.movement_id.to_string(),
            debt.client_id.map(|c| c.to_string()).unwrap_or_default(),
            debt.movement_type.as_str().to_string(),
            debt.status.as_str().to_string(),
            debt.due_date.map(|d| d.to_string()).unwrap_or_default(),
            debt.total_amount.to_string(),
            debt.total_paid.to_string(),
            debt.remaining_balance.to_string(),
        ])?;
    }

    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{MovementStatus, MovementType};
    use chrono::{NaiveDate, Utc};
    use uuid::Uuid;

    #[test]
    fn writes_header_and_one_line_per_debt() {
        let debt = Debt {
            movement_id: Uuid::nil(),
            client_id: None,
            movement_type: MovementType::SaleCredit,
            status: MovementStatus::PartialPaid,
            total_amount: 50000,
            due_date: NaiveDate::from_ymd_opt(2026, 11, 30),
            created_at: Utc::now(),
            total_paid: 20000,
            remaining_balance: 30000,
        };

        let mut out = Vec::new();
        write_debts_csv(&[debt], &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("movement_id,client_id,movement_type"));
        assert_eq!(
            lines[1],
            "00000000-0000-0000-0000-000000000000,,sale_credit,partial_paid,2026-11-30,50000,20000,30000"
        );
    }
}
