use crate::response::ApiError;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::Json;
use phonebook_core::{CustomerAddress, PhoneNumber, SystemResponse};
use phonebook_store::Store;
use serde::Deserialize;

pub const CREATED: &str = "Created";
pub const CONFLICT: &str = "conflict: phone already exists";
pub const UPDATED: &str = "Updated";
pub const UPDATE_NOT_FOUND: &str = "Phone not found";

#[derive(Debug, Deserialize)]
pub struct PhoneQuery {
    pub phone: PhoneNumber,
}

pub async fn fetch_address(
    State(store): State<Store>,
    query: Result<Query<PhoneQuery>, QueryRejection>,
) -> Result<Json<CustomerAddress>, ApiError> {
    let Query(PhoneQuery { phone }) = query?;
    match store.addresses().fetch(&phone).await? {
        Some(record) => Ok(Json(record)),
        None => {
            tracing::debug!(phone = %phone, "no address for phone");
            Err(ApiError::NotFound)
        }
    }
}

pub async fn create_address(
    State(store): State<Store>,
    payload: Result<Json<CustomerAddress>, JsonRejection>,
) -> Result<(StatusCode, Json<SystemResponse>), ApiError> {
    let Json(record) = payload?;
    if store.addresses().create(&record).await? {
        tracing::info!(phone = %record.phone, "address created");
        return Ok((
            StatusCode::CREATED,
            Json(SystemResponse::with_address(CREATED, record)),
        ));
    }
    tracing::debug!(phone = %record.phone, "phone already registered");
    Ok((
        StatusCode::CONFLICT,
        Json(SystemResponse::with_address(CONFLICT, record)),
    ))
}

pub async fn update_address(
    State(store): State<Store>,
    payload: Result<Json<CustomerAddress>, JsonRejection>,
) -> Result<(StatusCode, Json<SystemResponse>), ApiError> {
    let Json(record) = payload?;
    if store.addresses().update(&record).await? {
        tracing::info!(phone = %record.phone, "address updated");
        return Ok((
            StatusCode::OK,
            Json(SystemResponse::with_address(UPDATED, record)),
        ));
    }
    tracing::debug!(phone = %record.phone, "update for unknown phone");
    Ok((
        StatusCode::NOT_FOUND,
        Json(SystemResponse::with_address(UPDATE_NOT_FOUND, record)),
    ))
}

pub async fn remove_address(
    State(store): State<Store>,
    query: Result<Query<PhoneQuery>, QueryRejection>,
) -> Result<StatusCode, ApiError> {
    let Query(PhoneQuery { phone }) = query?;
    if store.addresses().remove(&phone).await? {
        tracing::info!(phone = %phone, "address removed");
        return Ok(StatusCode::NO_CONTENT);
    }
    tracing::debug!(phone = %phone, "delete for unknown phone");
    Err(ApiError::NotFound)
}
