//! Typed surface over the backend API.
//!
//! Each module maps to one area of the console: authentication, the
//! self-service profile, admin user management, and roles. Envelope
//! unwrapping happens here; the HTTP gateway below never touches bodies.

pub mod auth;
pub mod models;
pub mod profile;
pub mod roles;
pub mod users;

use reqwest::Response;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::{Error, Result};
use self::models::Envelope;

/// Unwrap the `{ status, error?, data? }` envelope, surfacing domain
/// failures as [`Error::Api`].
pub(crate) async fn unwrap_data<T: DeserializeOwned>(response: Response) -> Result<T> {
    let status = response.status();
    let body = response.text().await?;

    if !status.is_success() {
        // Failures usually arrive wrapped in the same envelope; prefer the
        // backend's message when one is present.
        if let Ok(envelope) = serde_json::from_str::<Envelope<Value>>(&body) {
            if let Some(error) = envelope.error {
                return Err(Error::Api(error));
            }
        }
        return Err(Error::Status { status, body });
    }

    let envelope: Envelope<T> = serde_json::from_str(&body)?;
    if !envelope.status {
        return Err(Error::Api(
            envelope.error.unwrap_or_else(|| "request failed".to_string()),
        ));
    }
    envelope
        .data
        .ok_or_else(|| Error::Api("response missing data".to_string()))
}

/// Like [`unwrap_data`] for operations whose success carries no payload.
pub(crate) async fn expect_success(response: Response) -> Result<()> {
    let status = response.status();
    if status.is_success() {
        return Ok(());
    }
    let body = response.text().await.unwrap_or_default();
    if let Ok(envelope) = serde_json::from_str::<Envelope<Value>>(&body) {
        if let Some(error) = envelope.error {
            return Err(Error::Api(error));
        }
    }
    Err(Error::Status { status, body })
}

/// Read a bare JSON body (endpoints that predate the envelope).
pub(crate) async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(Error::Status { status, body });
    }
    Ok(response.json().await?)
}
