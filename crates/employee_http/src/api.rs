//! Router and request handlers.
//!
//! # Responsibility
//! - Expose employee CRUD over `/employees`.
//! - Decide 404 vs 200 from optional service results.
//!
//! # Invariants
//! - Each request runs its service calls under one hold of the connection
//!   lock, so the existence check and write of `PUT` see the same state.
//! - Handlers never panic on storage failures; they return `ApiError`.
//! - All requests share one connection behind a `std::sync::Mutex`, so
//!   database work is serialised and runs synchronously on the worker thread.

use crate::error::ApiError;
use axum::extract::{Path, Request, State};
use axum::http::StatusCode;
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use employee_core::{
    core_version, Employee, EmployeeId, EmployeeService, ServiceResult, SqliteEmployeeRepository,
};
use log::{info, warn};
use rusqlite::Connection;
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex};
use std::time::Instant;

/// Shared handler state: one migrated SQLite connection.
#[derive(Clone)]
pub struct AppState {
    conn: Arc<Mutex<Connection>>,
}

impl AppState {
    /// Wraps a connection returned by `employee_core::db::open_db*`.
    pub fn new(conn: Connection) -> Self {
        Self {
            conn: Arc::new(Mutex::new(conn)),
        }
    }

    fn with_service<T>(
        &self,
        f: impl FnOnce(&EmployeeService<SqliteEmployeeRepository<'_>>) -> ServiceResult<T>,
    ) -> Result<T, ApiError> {
        let conn = self.conn.lock().map_err(|_| ApiError::StorageUnavailable)?;
        let repo = SqliteEmployeeRepository::try_new(&conn)?;
        let service = EmployeeService::new(repo);
        Ok(f(&service)?)
    }
}

/// Body of `GET /health`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// Builds the application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/employees", get(list_employees).post(create_employee))
        .route(
            "/employees/{id}",
            get(get_employee)
                .put(update_employee)
                .delete(delete_employee),
        )
        .layer(middleware::from_fn(log_requests))
        .with_state(state)
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: core_version().to_string(),
    })
}

async fn create_employee(
    State(state): State<AppState>,
    Json(candidate): Json<Employee>,
) -> Result<(StatusCode, Json<Employee>), ApiError> {
    let created = state.with_service(|service| service.create(&candidate))?;
    Ok((StatusCode::CREATED, Json(created)))
}

async fn list_employees(State(state): State<AppState>) -> Result<Json<Vec<Employee>>, ApiError> {
    let employees = state.with_service(|service| service.list_all())?;
    Ok(Json(employees))
}

async fn get_employee(
    State(state): State<AppState>,
    Path(id): Path<EmployeeId>,
) -> Result<Response, ApiError> {
    let found = state.with_service(|service| service.get_by_id(id))?;
    Ok(json_or_not_found(found))
}

async fn update_employee(
    State(state): State<AppState>,
    Path(id): Path<EmployeeId>,
    Json(body): Json<Employee>,
) -> Result<Response, ApiError> {
    let updated = state.with_service(|service| {
        if service.get_by_id(id)?.is_none() {
            return Ok(None);
        }
        let employee = Employee { id: Some(id), ..body };
        service.update(&employee).map(Some)
    })?;
    Ok(json_or_not_found(updated))
}

async fn delete_employee(
    State(state): State<AppState>,
    Path(id): Path<EmployeeId>,
) -> Result<StatusCode, ApiError> {
    state.with_service(|service| service.delete_by_id(id))?;
    Ok(StatusCode::NO_CONTENT)
}

fn json_or_not_found(employee: Option<Employee>) -> Response {
    match employee {
        Some(employee) => Json(employee).into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

async fn log_requests(request: Request, next: Next) -> Response {
    let started_at = Instant::now();
    let method = request.method().clone();
    let path = request.uri().path().to_string();

    let response = next.run(request).await;

    let status = response.status();
    let duration_ms = started_at.elapsed().as_millis();
    if status.is_server_error() {
        warn!(
            "event=http_request module=http status=error method={method} path={path} http_status={} duration_ms={duration_ms}",
            status.as_u16()
        );
    } else {
        info!(
            "event=http_request module=http status=ok method={method} path={path} http_status={} duration_ms={duration_ms}",
            status.as_u16()
        );
    }
    response
}
