//! 定价接口集成测试

mod common;

use axum::http::StatusCode;
use common::{get_json, test_router};

#[tokio::test]
async fn health_check_returns_ok() {
    let (status, body) = common::get(test_router(Vec::new()), "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, b"OK");
}

#[tokio::test]
async fn breakdown_of_19000_gross() {
    let (status, json) = get_json(test_router(Vec::new()), "/api/pricing/breakdown?gross=19000").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["success"], true);
    let data = &json["data"];
    assert_eq!(data["gross"], 19000);
    assert_eq!(data["net"], 15966);
    assert_eq!(data["iva"], 3034);
    assert_eq!(data["tax_rate"], 0.19);
    assert_eq!(data["summary"], "Neto: $15.966 · IVA (19%): $3.034 · Total: $19.000");
}

#[tokio::test]
async fn breakdown_with_missing_or_invalid_gross_is_zero() {
    for uri in ["/api/pricing/breakdown", "/api/pricing/breakdown?gross=abc"] {
        let (status, json) = get_json(test_router(Vec::new()), uri).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["data"]["gross"], 0);
        assert_eq!(json["data"]["net"], 0);
        assert_eq!(json["data"]["iva"], 0);
    }
}

#[tokio::test]
async fn breakdown_honours_rate_override() {
    let (_, json) = get_json(
        test_router(Vec::new()),
        "/api/pricing/breakdown?gross=11000&tax_rate=0.10",
    )
    .await;

    assert_eq!(json["data"]["net"], 10000);
    assert_eq!(json["data"]["iva"], 1000);
    assert_eq!(json["data"]["tax_rate"], 0.1);
}

#[tokio::test]
async fn cost_breakdown_grosses_up_net() {
    let (status, json) = get_json(test_router(Vec::new()), "/api/pricing/cost?net=15966").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"]["net"], 15966);
    assert_eq!(json["data"]["gross"], 19000);
    assert_eq!(json["data"]["iva"], 3034);
}
