use serde::{Deserialize, Serialize};

use crate::service::pricing::format_amount;

/// 含税 / 不含税 / IVA 拆分结果
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceBreakdown {
    pub gross: i64,
    pub net: i64,
    pub iva: i64,
    pub tax_rate: f64,
}

impl PriceBreakdown {
    /// 例: "Neto: $15.966 · IVA (19%): $3.034 · Total: $19.000"
    pub fn summary(&self) -> String {
        format!(
            "Neto: ${} · IVA ({}%): ${} · Total: ${}",
            format_amount(self.net as f64),
            (self.tax_rate * 100.0).round() as i64,
            format_amount(self.iva as f64),
            format_amount(self.gross as f64),
        )
    }
}
