use crate::error::AppError;
use crate::models::{ClientDebtSummary, CrmStats, Debt, MovementBalance, PriceBreakdown, StatusDivergence};
use crate::service::normalize::coerce_amount;
use crate::service::{CrmService, PricingEngine};
use axum::{
    extract::{Json, Path, Query, State},
    http::header,
    response::{IntoResponse, Response},
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

/// 共享状态
#[derive(Clone)]
pub struct AppState {
    pub crm: Arc<CrmService>,
    pub pricing: PricingEngine,
}

/// 统一响应体
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub message: String,
    pub data: Option<T>,
}

fn ok<T: Serialize>(message: impl Into<String>, data: T) -> Json<ApiResponse<T>> {
    Json(ApiResponse {
        success: true,
        message: message.into(),
        data: Some(data),
    })
}

fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

/// 查询参数保持字符串，非法数值按 0 处理而不是拒绝请求
fn parse_number(raw: Option<&str>) -> Option<f64> {
    raw.and_then(|s| s.trim().parse::<f64>().ok())
}

#[derive(Debug, Deserialize)]
pub struct BreakdownQuery {
    pub gross: Option<String>,
    pub tax_rate: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CostQuery {
    pub net: Option<String>,
    pub tax_rate: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct BreakdownResponse {
    #[serde(flatten)]
    pub breakdown: PriceBreakdown,
    pub summary: String,
}

impl From<PriceBreakdown> for BreakdownResponse {
    fn from(breakdown: PriceBreakdown) -> Self {
        Self {
            summary: breakdown.summary(),
            breakdown,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct StatsQuery {
    pub reference_date: Option<String>,
}

/// 日期格式 YYYY-MM-DD，空值取今天
fn parse_reference_date(raw: Option<&str>) -> Result<NaiveDate, AppError> {
    match raw.map(str::trim).filter(|s| !s.is_empty()) {
        Some(s) => NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|e| {
            AppError::BadRequest(format!("invalid reference_date '{}': {}", s, e))
        }),
        None => Ok(today()),
    }
}

/// 健康检查
pub async fn health_check() -> &'static str {
    "OK"
}

/// 含税金额拆分
pub async fn price_breakdown(
    State(state): State<AppState>,
    Query(q): Query<BreakdownQuery>,
) -> Json<ApiResponse<BreakdownResponse>> {
    let engine = state.pricing.with_rate(parse_number(q.tax_rate.as_deref()));
    let gross = coerce_amount(parse_number(q.gross.as_deref()).unwrap_or(0.0));
    ok("price breakdown", BreakdownResponse::from(engine.price_breakdown(gross)))
}

/// 净成本拆分 (供应商成本、入库成本)
pub async fn cost_breakdown(
    State(state): State<AppState>,
    Query(q): Query<CostQuery>,
) -> Json<ApiResponse<BreakdownResponse>> {
    let engine = state.pricing.with_rate(parse_number(q.tax_rate.as_deref()));
    let net = coerce_amount(parse_number(q.net.as_deref()).unwrap_or(0.0));
    ok("cost breakdown", BreakdownResponse::from(engine.cost_breakdown(net)))
}

pub async fn list_debts(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<Debt>>>, AppError> {
    let debts = state.crm.debts().await?;
    Ok(ok(format!("{} open debts", debts.len()), debts))
}

pub async fn debts_by_client(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<ClientDebtSummary>>>, AppError> {
    let summary = state.crm.debts_by_client().await?;
    Ok(ok(format!("{} clients with open debts", summary.len()), summary))
}

pub async fn export_debts_csv(State(state): State<AppState>) -> Result<Response, AppError> {
    let body = state.crm.debts_csv().await?;
    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8"),
            (header::CONTENT_DISPOSITION, "attachment; filename=\"debts.csv\""),
        ],
        body,
    )
        .into_response())
}

pub async fn crm_stats(
    State(state): State<AppState>,
    Query(q): Query<StatsQuery>,
) -> Result<Json<ApiResponse<CrmStats>>, AppError> {
    let reference_date = parse_reference_date(q.reference_date.as_deref())?;
    let stats = state.crm.stats(reference_date).await?;
    Ok(ok(format!("stats as of {}", reference_date), stats))
}

pub async fn movement_balance(
    State(state): State<AppState>,
    Path(movement_id): Path<Uuid>,
) -> Result<Json<ApiResponse<MovementBalance>>, AppError> {
    let balance = state.crm.movement_balance(movement_id, today()).await?;
    Ok(ok("movement balance", balance))
}

pub async fn reconciliation(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<StatusDivergence>>>, AppError> {
    let divergences = state.crm.reconciliation(today()).await?;
    Ok(ok(format!("{} status divergences", divergences.len()), divergences))
}
