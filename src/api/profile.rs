//! Self-service profile endpoints.

use std::path::Path;

use reqwest::multipart::{Form, Part};

use crate::api::{
    self,
    models::{Profile, UpdateProfile},
};
use crate::client::ApiClient;
use crate::error::Result;

pub async fn get(client: &ApiClient) -> Result<Profile> {
    let response = client.get("/customer/profile").await?;
    api::unwrap_data(response).await
}

pub async fn update(client: &ApiClient, changes: &UpdateProfile) -> Result<()> {
    let response = client.put("/customer/profile", changes).await?;
    api::expect_success(response).await
}

/// Upload a new profile image as a multipart form with a single `file`
/// field. The upload pipeline beyond that is the backend's business.
pub async fn upload_image(client: &ApiClient, path: &Path) -> Result<()> {
    let bytes = tokio::fs::read(path).await?;
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "upload".to_string());
    let form = Form::new().part("file", Part::bytes(bytes).file_name(file_name));
    let response = client.post_multipart("/customer/profile/image", form).await?;
    api::expect_success(response).await
}

/// Delete the signed-in account. The session is gone with the account, so
/// the stored token is cleared too.
pub async fn delete_account(client: &ApiClient) -> Result<()> {
    let response = client.delete("/customer/account").await?;
    api::expect_success(response).await?;
    client.token_store().remove();
    Ok(())
}
