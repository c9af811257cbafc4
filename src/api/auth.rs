//! Login, registration, and password recovery.

use serde::Serialize;
use serde_json::json;

use crate::api::{self, models::AuthData};
use crate::client::ApiClient;
use crate::error::Result;

#[derive(Debug, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
}

/// Log in and persist the returned access token.
pub async fn login(client: &ApiClient, request: &LoginRequest) -> Result<AuthData> {
    let response = client.post("/auth/login", request).await?;
    let data: AuthData = api::unwrap_data(response).await?;
    client.token_store().set(&data.access_token);
    Ok(data)
}

/// Register a new account; the backend signs the caller in immediately, so
/// the returned token is persisted like a login.
pub async fn register(client: &ApiClient, request: &RegisterRequest) -> Result<AuthData> {
    let response = client.post("/auth/register", request).await?;
    let data: AuthData = api::unwrap_data(response).await?;
    client.token_store().set(&data.access_token);
    Ok(data)
}

/// Request a password-reset OTP to be emailed.
pub async fn forgot_password(client: &ApiClient, email: &str) -> Result<()> {
    let response = client
        .post("/auth/forgot-password", &json!({ "email": email }))
        .await?;
    api::expect_success(response).await
}

/// Reset the password with the emailed OTP.
pub async fn reset_password(
    client: &ApiClient,
    email: &str,
    otp: &str,
    new_password: &str,
) -> Result<()> {
    let response = client
        .post(
            "/auth/reset-password",
            &json!({ "email": email, "otp": otp, "newPassword": new_password }),
        )
        .await?;
    api::expect_success(response).await
}

/// The backend keeps no session state for its JWTs, so logging out is
/// purely client-side: drop the token.
pub fn logout(client: &ApiClient) {
    client.token_store().remove();
}
