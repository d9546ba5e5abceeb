use bigdecimal::{BigDecimal, ToPrimitive};
use serde_json::Value;
use std::collections::HashMap;
use uuid::Uuid;

use crate::models::{
    Movement, MovementItem, MovementRow, MovementStatus, MovementType, Payment, PaymentMethod,
    PaymentRow, VerificationStatus,
};
use crate::service::pricing::round_half_up;

/// 任意浮点 → 整数金额，非有限值按 0 处理
pub fn coerce_amount(value: f64) -> i64 {
    round_half_up(value)
}

/// numeric 列 → 整数金额，NULL 按 0 处理
pub fn coerce_decimal(value: Option<&BigDecimal>) -> i64 {
    value
        .and_then(|v| v.to_f64())
        .map(coerce_amount)
        .unwrap_or(0)
}

/// jsonb 中的数字可能是 number 也可能是字符串
pub fn coerce_json_number(value: &Value) -> f64 {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    parsed.filter(|v| v.is_finite()).unwrap_or(0.0)
}

fn json_id(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// 解析 items 列，丢弃不完整的行
pub fn normalize_items(movement_id: Uuid, items: Option<&Value>) -> Vec<MovementItem> {
    let Some(Value::Array(entries)) = items else {
        return Vec::new();
    };

    entries
        .iter()
        .filter_map(|entry| {
            let Value::Object(obj) = entry else {
                tracing::warn!("Movement {}: skipping non-object item {}", movement_id, entry);
                return None;
            };
            let Some(product_id) = json_id(obj.get("product_id")) else {
                tracing::warn!("Movement {}: skipping item without product_id", movement_id);
                return None;
            };
            Some(MovementItem {
                product_id,
                variant_id: json_id(obj.get("variant_id")),
                quantity: obj.get("quantity").map(coerce_json_number).unwrap_or(0.0),
                unit_price: obj
                    .get("unit_price")
                    .map(|v| coerce_amount(coerce_json_number(v)))
                    .unwrap_or(0),
            })
        })
        .collect()
}

pub fn normalize_payment(row: PaymentRow) -> Payment {
    Payment {
        id: row.id,
        movement_id: row.movement_id,
        amount: coerce_decimal(row.amount.as_ref()),
        payment_method: row
            .payment_method
            .as_deref()
            .map(PaymentMethod::from_string)
            .unwrap_or(PaymentMethod::Other),
        verification_status: row
            .verification_status
            .as_deref()
            .and_then(VerificationStatus::parse),
        created_at: row.created_at,
    }
}

/// 原始行 → 类型化的 Movement。类型无法识别时返回 None
pub fn normalize_movement(row: MovementRow, payments: Vec<PaymentRow>) -> Option<Movement> {
    let Some(movement_type) = MovementType::parse(&row.movement_type) else {
        tracing::warn!(
            "Movement {} has unknown type '{}', skipping",
            row.id,
            row.movement_type
        );
        return None;
    };

    Some(Movement {
        id: row.id,
        client_id: row.client_id,
        movement_type,
        status: row
            .status
            .as_deref()
            .map(MovementStatus::from_string)
            .unwrap_or(MovementStatus::Pending),
        total_amount: coerce_decimal(row.total_amount.as_ref()),
        items: normalize_items(row.id, row.items.as_ref()),
        due_date: row.due_date,
        created_at: row.created_at,
        payments: payments.into_iter().map(normalize_payment).collect(),
    })
}

/// 将付款行按 movement_id 挂到对应的往来上，保持往来原有顺序
pub fn attach_payments(rows: Vec<MovementRow>, payments: Vec<PaymentRow>) -> Vec<Movement> {
    let mut by_movement: HashMap<Uuid, Vec<PaymentRow>> = HashMap::new();
    for payment in payments {
        by_movement.entry(payment.movement_id).or_default().push(payment);
    }

    rows.into_iter()
        .filter_map(|row| {
            let payments = by_movement.remove(&row.id).unwrap_or_default();
            normalize_movement(row, payments)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, Utc};
    use serde_json::json;
    use std::str::FromStr;

    fn movement_row(id: Uuid, total: Option<&str>, items: Option<Value>) -> MovementRow {
        MovementRow {
            id,
            client_id: None,
            movement_type: "sale_credit".to_string(),
            status: Some("delivered".to_string()),
            total_amount: total.map(|t| BigDecimal::from_str(t).unwrap()),
            items,
            due_date: NaiveDate::from_ymd_opt(2026, 3, 1),
            created_at: Utc::now(),
        }
    }

    fn payment_row(movement_id: Uuid, amount: Option<&str>) -> PaymentRow {
        PaymentRow {
            id: Uuid::new_v4(),
            movement_id,
            amount: amount.map(|a| BigDecimal::from_str(a).unwrap()),
            payment_method: Some("transferencia".to_string()),
            verification_status: Some("approved".to_string()),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn decimals_are_rounded_and_null_is_zero() {
        let d = BigDecimal::from_str("19000.50").unwrap();
        assert_eq!(coerce_decimal(Some(&d)), 19001);
        assert_eq!(coerce_decimal(None), 0);
        assert_eq!(coerce_amount(f64::NAN), 0);
    }

    #[test]
    fn json_numbers_accept_strings() {
        assert_eq!(coerce_json_number(&json!(3)), 3.0);
        assert_eq!(coerce_json_number(&json!("4990")), 4990.0);
        assert_eq!(coerce_json_number(&json!("abc")), 0.0);
        assert_eq!(coerce_json_number(&Value::Null), 0.0);
    }

    #[test]
    fn items_without_product_are_dropped() {
        let id = Uuid::new_v4();
        let items = json!([
            {"product_id": "p-1", "quantity": "2", "unit_price": 4990},
            {"quantity": 1, "unit_price": 100},
            "garbage",
            {"product_id": 42, "variant_id": "v-9", "quantity": 1, "unit_price": "1500.4"}
        ]);

        let parsed = normalize_items(id, Some(&items));
        assert_eq!(parsed.len(), 2);
        assert_eq!(parsed[0].product_id, "p-1");
        assert_eq!(parsed[0].quantity, 2.0);
        assert_eq!(parsed[0].unit_price, 4990);
        assert_eq!(parsed[1].product_id, "42");
        assert_eq!(parsed[1].variant_id.as_deref(), Some("v-9"));
        assert_eq!(parsed[1].unit_price, 1500);
    }

    #[test]
    fn unknown_movement_type_is_skipped() {
        let mut row = movement_row(Uuid::new_v4(), Some("1000"), None);
        row.movement_type = "gift".to_string();
        assert!(normalize_movement(row, Vec::new()).is_none());
    }

    #[test]
    fn payments_attach_to_their_movement() {
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        let rows = vec![
            movement_row(a, Some("50000"), None),
            movement_row(b, None, Some(json!([]))),
        ];
        let payments = vec![
            payment_row(a, Some("20000")),
            payment_row(a, None),
            payment_row(Uuid::new_v4(), Some("999")),
        ];

        let movements = attach_payments(rows, payments);
        assert_eq!(movements.len(), 2);
        assert_eq!(movements[0].id, a);
        assert_eq!(movements[0].total_amount, 50000);
        assert_eq!(movements[0].payments.len(), 2);
        assert_eq!(movements[0].payments[0].amount, 20000);
        assert_eq!(movements[0].payments[0].payment_method, PaymentMethod::Transfer);
        assert_eq!(movements[0].payments[1].amount, 0);
        assert_eq!(movements[1].total_amount, 0);
        assert!(movements[1].payments.is_empty());
    }
}
