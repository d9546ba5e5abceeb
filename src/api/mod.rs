pub mod handlers;

pub use handlers::*;

use axum::{routing::get, Router};
use tower::ServiceBuilder;

/// 构建路由
pub fn router(state: AppState) -> Router {
    let pricing_routes = Router::new()
        .route("/api/pricing/breakdown", get(price_breakdown))
        .route("/api/pricing/cost", get(cost_breakdown));

    let crm_routes = Router::new()
        .route("/api/crm/debts", get(list_debts))
        .route("/api/crm/debts/by-client", get(debts_by_client))
        .route("/api/crm/debts.csv", get(export_debts_csv))
        .route("/api/crm/stats", get(crm_stats))
        .route("/api/crm/movements/:id/balance", get(movement_balance))
        .route("/api/crm/reconciliation", get(reconciliation));

    Router::new()
        .route("/health", get(health_check))
        .merge(pricing_routes)
        .merge(crm_routes)
        .layer(ServiceBuilder::new())
        .with_state(state)
}
