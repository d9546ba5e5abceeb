use crate::models::PriceBreakdown;

/// 智利 IVA 标准税率 19%
pub const DEFAULT_TAX_RATE: f64 = 0.19;

/// 四舍五入到整数 (半数向正无穷方向，-2.5 → -2)
/// 非有限值返回 0
pub fn round_half_up(value: f64) -> i64 {
    if !value.is_finite() {
        return 0;
    }
    let floor = value.floor();
    let rounded = if value - floor >= 0.5 { floor + 1.0 } else { floor };
    rounded as i64
}

fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}

/// 税率非法 (非有限值或使除数 <= 0) 时退回默认税率
fn effective_rate(tax_rate: f64) -> f64 {
    if tax_rate.is_finite() && tax_rate > -1.0 {
        tax_rate
    } else {
        DEFAULT_TAX_RATE
    }
}

/// 含税 → 不含税: round(gross / (1 + rate))
pub fn net_from_gross(gross: f64, tax_rate: f64) -> i64 {
    let gross = finite_or_zero(gross);
    round_half_up(gross / (1.0 + effective_rate(tax_rate)))
}

/// 含税金额中的 IVA，永不为负
pub fn iva_from_gross(gross: f64, tax_rate: f64) -> i64 {
    let gross = finite_or_zero(gross);
    let net = net_from_gross(gross, tax_rate);
    round_half_up(gross - net as f64).max(0)
}

/// 不含税 → 含税: round(net × (1 + rate))
/// 用于录入的是净成本的场景 (供应商发票、入库成本)
pub fn gross_from_net(net: f64, tax_rate: f64) -> i64 {
    let net = finite_or_zero(net);
    round_half_up(net * (1.0 + effective_rate(tax_rate)))
}

/// 以含税总额为锚的拆分，gross 原样返回
pub fn price_breakdown(gross: i64, tax_rate: f64) -> PriceBreakdown {
    let tax_rate = effective_rate(tax_rate);
    PriceBreakdown {
        gross,
        net: net_from_gross(gross as f64, tax_rate),
        iva: iva_from_gross(gross as f64, tax_rate),
        tax_rate,
    }
}

/// 以不含税成本为锚的拆分，net 原样返回
pub fn cost_breakdown(net: i64, tax_rate: f64) -> PriceBreakdown {
    let tax_rate = effective_rate(tax_rate);
    let gross = gross_from_net(net as f64, tax_rate);
    PriceBreakdown {
        gross,
        net,
        iva: gross.saturating_sub(net).max(0),
        tax_rate,
    }
}

/// 千分位格式 (es-CL, 分隔符 '.')，无货币符号、无小数
/// NaN / 无穷 / None 均显示为 "0"
pub fn format_amount<V: Into<Option<f64>>>(value: V) -> String {
    let value = value.into().map(finite_or_zero).unwrap_or(0.0);
    let rounded = round_half_up(value);

    let digits = rounded.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if rounded < 0 {
        grouped.push('-');
    }
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }
    grouped
}

/// 绑定税率的定价引擎，默认 19%
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PricingEngine {
    tax_rate: f64,
}

impl Default for PricingEngine {
    fn default() -> Self {
        Self {
            tax_rate: DEFAULT_TAX_RATE,
        }
    }
}

impl PricingEngine {
    pub fn new(tax_rate: f64) -> Self {
        let effective = effective_rate(tax_rate);
        if effective != tax_rate {
            tracing::warn!(
                "Invalid tax rate {}, falling back to {}",
                tax_rate,
                DEFAULT_TAX_RATE
            );
        }
        Self { tax_rate: effective }
    }

    pub fn tax_rate(&self) -> f64 {
        self.tax_rate
    }

    /// 单次调用覆盖税率
    pub fn with_rate(&self, tax_rate: Option<f64>) -> Self {
        match tax_rate {
            Some(rate) => Self::new(rate),
            None => *self,
        }
    }

    pub fn net_from_gross(&self, gross: f64) -> i64 {
        net_from_gross(gross, self.tax_rate)
    }

    pub fn iva_from_gross(&self, gross: f64) -> i64 {
        iva_from_gross(gross, self.tax_rate)
    }

    pub fn gross_from_net(&self, net: f64) -> i64 {
        gross_from_net(net, self.tax_rate)
    }

    pub fn price_breakdown(&self, gross: i64) -> PriceBreakdown {
        price_breakdown(gross, self.tax_rate)
    }

    pub fn cost_breakdown(&self, net: i64) -> PriceBreakdown {
        cost_breakdown(net, self.tax_rate)
    }
}
