use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// 商业往来类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MovementType {
    Sample,
    Consignment,
    SaleInvoice,
    SaleCredit,
}

impl MovementType {
    pub fn as_str(&self) -> &'static str {
        match self {
            MovementType::Sample => "sample",
            MovementType::Consignment => "consignment",
            MovementType::SaleInvoice => "sale_invoice",
            MovementType::SaleCredit => "sale_credit",
        }
    }

    /// 无法识别的类型返回 None，由调用方决定是否丢弃该行
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim() {
            "sample" => Some(MovementType::Sample),
            "consignment" => Some(MovementType::Consignment),
            "sale_invoice" => Some(MovementType::SaleInvoice),
            "sale_credit" => Some(MovementType::SaleCredit),
            _ => None,
        }
    }

    /// 会产生应收账款的类型
    pub fn carries_debt(&self) -> bool {
        matches!(self, MovementType::SaleCredit | MovementType::Consignment)
    }
}

/// 往来状态 (由 CRM 写操作维护，账本只读)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MovementStatus {
    Pending,
    Delivered,
    Sold,
    Returned,
    Paid,
    PartialPaid,
    Overdue,
}

impl MovementStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            MovementStatus::Pending => "pending",
            MovementStatus::Delivered => "delivered",
            MovementStatus::Sold => "sold",
            MovementStatus::Returned => "returned",
            MovementStatus::Paid => "paid",
            MovementStatus::PartialPaid => "partial_paid",
            MovementStatus::Overdue => "overdue",
        }
    }

    pub fn from_string(s: &str) -> Self {
        match s.trim() {
            "delivered" => MovementStatus::Delivered,
            "sold" => MovementStatus::Sold,
            "returned" => MovementStatus::Returned,
            "paid" => MovementStatus::Paid,
            "partial_paid" => MovementStatus::PartialPaid,
            "overdue" => MovementStatus::Overdue,
            _ => MovementStatus::Pending,
        }
    }

    /// 仍有未结清余额的状态
    pub fn is_open_debt(&self) -> bool {
        matches!(
            self,
            MovementStatus::Delivered
                | MovementStatus::Sold
                | MovementStatus::PartialPaid
                | MovementStatus::Overdue
        )
    }
}

/// 付款方式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    Cash,
    Transfer,
    Check,
    Card,
    Other,
}

impl PaymentMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::Cash => "cash",
            PaymentMethod::Transfer => "transfer",
            PaymentMethod::Check => "check",
            PaymentMethod::Card => "card",
            PaymentMethod::Other => "other",
        }
    }

    pub fn from_string(s: &str) -> Self {
        match s.trim() {
            "cash" | "efectivo" => PaymentMethod::Cash,
            "transfer" | "transferencia" => PaymentMethod::Transfer,
            "check" | "cheque" => PaymentMethod::Check,
            "card" | "tarjeta" => PaymentMethod::Card,
            _ => PaymentMethod::Other,
        }
    }
}

/// 转账凭证审核状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerificationStatus {
    Pending,
    Approved,
    Rejected,
}

impl VerificationStatus {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim() {
            "pending" => Some(VerificationStatus::Pending),
            "approved" => Some(VerificationStatus::Approved),
            "rejected" => Some(VerificationStatus::Rejected),
            _ => None,
        }
    }
}

/// 往来明细行
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovementItem {
    pub product_id: String,
    pub variant_id: Option<String>,
    pub quantity: f64,
    pub unit_price: i64,
}

impl MovementItem {
    /// 行金额 = round(数量 × 单价)
    pub fn line_total(&self) -> i64 {
        crate::service::pricing::round_half_up(self.quantity * self.unit_price as f64)
    }
}

/// 付款记录 (MovementPayment)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Payment {
    pub id: Uuid,
    pub movement_id: Uuid,
    pub amount: i64,
    pub payment_method: PaymentMethod,
    pub verification_status: Option<VerificationStatus>,
    pub created_at: DateTime<Utc>,
}

/// 商业往来 (样品 / 寄售 / 发票销售 / 赊销)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Movement {
    pub id: Uuid,
    pub client_id: Option<Uuid>,
    pub movement_type: MovementType,
    pub status: MovementStatus,
    /// 含税总额
    pub total_amount: i64,
    pub items: Vec<MovementItem>,
    pub due_date: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
    pub payments: Vec<Payment>,
}

impl Movement {
    pub fn items_total(&self) -> i64 {
        self.items
            .iter()
            .fold(0i64, |acc, item| acc.saturating_add(item.line_total()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_from_unknown_string_is_pending() {
        assert_eq!(MovementStatus::from_string("archived"), MovementStatus::Pending);
        assert_eq!(MovementStatus::from_string(" partial_paid "), MovementStatus::PartialPaid);
    }

    #[test]
    fn only_credit_sales_and_consignments_carry_debt() {
        assert!(MovementType::SaleCredit.carries_debt());
        assert!(MovementType::Consignment.carries_debt());
        assert!(!MovementType::Sample.carries_debt());
        assert!(!MovementType::SaleInvoice.carries_debt());
        assert_eq!(MovementType::parse("gift"), None);
    }

    #[test]
    fn items_total_rounds_each_line() {
        let movement = Movement {
            id: Uuid::nil(),
            client_id: None,
            movement_type: MovementType::Consignment,
            status: MovementStatus::Delivered,
            total_amount: 0,
            items: vec![
                MovementItem {
                    product_id: "p-1".to_string(),
                    variant_id: None,
                    quantity: 3.0,
                    unit_price: 4990,
                },
                MovementItem {
                    product_id: "p-2".to_string(),
                    variant_id: Some("500ml".to_string()),
                    quantity: 0.5,
                    unit_price: 1001,
                },
            ],
            due_date: None,
            created_at: Utc::now(),
            payments: Vec::new(),
        };

        assert_eq!(movement.items_total(), 14970 + 501);
    }
}
