//! Interpretation of backend responses.
//!
//! The backend signals failure through an `error` field, usually but not
//! always alongside a 4xx status. The field wins over the status code; a
//! non-2xx status without one is still a failure.

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::{ApiError, ErrorKind, HealthStatus, Product};

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct RawResponse {
    pub status: u16,
    pub body: String,
}

impl RawResponse {
    fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

pub(crate) fn product_list(raw: &RawResponse) -> Result<Vec<Product>, ApiError> {
    let value = checked_body(raw)?;
    decode(value)
}

/// Accepts both a bare product and the `{"status": .., "product": {..}}` wrapper.
pub(crate) fn scraped_product(raw: &RawResponse) -> Result<Product, ApiError> {
    let value = checked_body(raw)?;
    match wrapped_product(&value) {
        Some(product) => decode(product.clone()),
        None => decode(value),
    }
}

/// Only `{"product": {..}}` counts as success.
pub(crate) fn refetched_product(raw: &RawResponse) -> Result<Product, ApiError> {
    let value = checked_body(raw)?;
    match wrapped_product(&value) {
        Some(product) => decode(product.clone()),
        None => Err(ApiError::new(
            ErrorKind::MissingProduct,
            "response has no product payload",
        )),
    }
}

pub(crate) fn single_product(raw: &RawResponse) -> Result<Product, ApiError> {
    let value = checked_body(raw)?;
    decode(value)
}

pub(crate) fn health(raw: &RawResponse) -> Result<HealthStatus, ApiError> {
    let value = checked_body(raw)?;
    decode(value)
}

fn checked_body(raw: &RawResponse) -> Result<Value, ApiError> {
    let value = match serde_json::from_str::<Value>(&raw.body) {
        Ok(value) => value,
        Err(_) if !raw.is_success() => return Err(status_error(raw.status)),
        Err(err) => return Err(ApiError::new(ErrorKind::MalformedBody, err.to_string())),
    };
    if let Some(message) = server_error(&value) {
        return Err(ApiError::new(ErrorKind::Server, message));
    }
    if !raw.is_success() {
        return Err(status_error(raw.status));
    }
    Ok(value)
}

fn wrapped_product(value: &Value) -> Option<&Value> {
    value.get("product").filter(|product| product.is_object())
}

fn server_error(value: &Value) -> Option<String> {
    match value.get("error")? {
        Value::Null => None,
        Value::String(message) => Some(message.clone()),
        other => Some(other.to_string()),
    }
}

fn status_error(status: u16) -> ApiError {
    ApiError::new(ErrorKind::HttpStatus(status), format!("http status {status}"))
}

fn decode<T: DeserializeOwned>(value: Value) -> Result<T, ApiError> {
    serde_json::from_value(value).map_err(|err| ApiError::new(ErrorKind::MalformedBody, err.to_string()))
}
