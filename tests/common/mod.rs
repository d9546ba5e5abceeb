#![allow(dead_code)]

use async_trait::async_trait;
use axum::{body::Body, http::Request, Router};
use calmar_ledger::api::{self, AppState};
use calmar_ledger::models::{Movement, MovementStatus, MovementType, Payment, PaymentMethod};
use calmar_ledger::{AppError, CrmService, MovementStore, PricingEngine};
use chrono::{NaiveDate, TimeZone, Utc};
use std::sync::Arc;
use tower::util::ServiceExt;
use uuid::Uuid;

/// 测试用内存数据源
pub struct InMemoryStore {
    pub movements: Vec<Movement>,
}

#[async_trait]
impl MovementStore for InMemoryStore {
    async fn list_movements(&self) -> Result<Vec<Movement>, AppError> {
        Ok(self.movements.clone())
    }

    async fn get_movement(&self, movement_id: Uuid) -> Result<Option<Movement>, AppError> {
        Ok(self.movements.iter().find(|m| m.id == movement_id).cloned())
    }
}

pub fn crm_service(movements: Vec<Movement>) -> CrmService {
    CrmService::new(Arc::new(InMemoryStore { movements }), PricingEngine::default())
}

pub fn test_router(movements: Vec<Movement>) -> Router {
    let pricing = PricingEngine::default();
    api::router(AppState {
        crm: Arc::new(CrmService::new(Arc::new(InMemoryStore { movements }), pricing)),
        pricing,
    })
}

pub async fn get(router: Router, uri: &str) -> (axum::http::StatusCode, Vec<u8>) {
    let response = router
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, body.to_vec())
}

pub async fn get_json(router: Router, uri: &str) -> (axum::http::StatusCode, serde_json::Value) {
    let (status, body) = get(router, uri).await;
    (status, serde_json::from_slice(&body).unwrap())
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn movement(
    movement_type: MovementType,
    status: MovementStatus,
    total_amount: i64,
    due_date: Option<NaiveDate>,
) -> Movement {
    Movement {
        id: Uuid::new_v4(),
        client_id: None,
        movement_type,
        status,
        total_amount,
        items: Vec::new(),
        due_date,
        created_at: Utc.with_ymd_and_hms(2026, 8, 1, 10, 0, 0).unwrap(),
        payments: Vec::new(),
    }
}

pub fn with_payment(mut m: Movement, amount: i64) -> Movement {
    m.payments.push(Payment {
        id: Uuid::new_v4(),
        movement_id: m.id,
        amount,
        payment_method: PaymentMethod::Transfer,
        verification_status: None,
        created_at: Utc::now(),
    });
    m
}
